//! Integration tests for loading parser settings from files.

use std::fs;

use argos::{
    ArgosError, ArgumentParser, ArgumentSpec, CommandSpec, OptionSpec, OptionStyle, Output,
    ParserConfig, ParserResultCode, SharedBuffer,
};
use tempfile::TempDir;

fn sample_config() -> ParserConfig {
    let mut config = ParserConfig {
        program_name: "deploy".into(),
        version: "2.1.0".into(),
        about: "Deploys the current build.".into(),
        ..ParserConfig::default()
    };
    config.settings.case_insensitive = true;
    config.settings.exit.auto_exit = false;
    config.settings.exit.error_code = 2;
    config.help.line_width = 60;
    config.help.word_split_rules.push("de ploy ment".into());
    config
}

#[test]
fn test_yaml_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("argos.yaml");
    sample_config().save(&path).unwrap();

    let loaded = ParserConfig::load(&path).unwrap();
    assert_eq!(loaded.program_name, "deploy");
    assert_eq!(loaded.version, "2.1.0");
    assert!(loaded.settings.case_insensitive);
    assert!(!loaded.settings.exit.auto_exit);
    assert_eq!(loaded.settings.exit.error_code, 2);
    assert_eq!(loaded.help.line_width, 60);
    assert_eq!(loaded.help.word_split_rules, ["de ploy ment"]);
}

#[test]
fn test_json_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("argos.json");
    sample_config().save(&path).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.trim_start().starts_with('{'));
    let loaded = ParserConfig::load(&path).unwrap();
    assert_eq!(loaded.about, "Deploys the current build.");
    assert_eq!(loaded.settings.exit.error_code, 2);
}

#[test]
fn test_missing_file() {
    let dir = TempDir::new().unwrap();
    let result = ParserConfig::load(dir.path().join("missing.yaml"));
    assert!(matches!(result, Err(ArgosError::Io(_))));
}

#[test]
fn test_malformed_yaml() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("argos.yaml");
    fs::write(&path, "settings: [not, a, map]\n").unwrap();
    assert!(matches!(ParserConfig::load(&path), Err(ArgosError::Yaml(_))));
}

#[test]
fn test_loaded_config_drives_parsing() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("argos.yaml");
    fs::write(
        &path,
        "program_name: tool\nversion: 0.3.0\nsettings:\n  option_style: Slash\n  case_insensitive: true\n  exit:\n    auto_exit: false\n",
    )
    .unwrap();

    let buffer = SharedBuffer::new();
    let parser = ArgumentParser::default()
        .with_output(Output::Buffer(buffer.clone()))
        .with_config(ParserConfig::load(&path).unwrap())
        .add_option(OptionSpec::new(["/quiet"]))
        .add_argument(ArgumentSpec::new("FILE"));
    assert_eq!(parser.program_name(), "tool");
    assert_eq!(parser.settings().option_style, OptionStyle::Slash);

    let args = parser.parse(["/QUIET", "a.txt"]).unwrap();
    assert_eq!(args.result_code(), ParserResultCode::Success);
    assert!(args.value("/quiet").unwrap().as_bool(false));

    let args = parser.parse(["/version"]).unwrap();
    assert_eq!(args.result_code(), ParserResultCode::Stop);
    assert_eq!(buffer.contents(), "tool 0.3.0\n");
}

#[test]
fn test_config_require_command() {
    let config: ParserConfig =
        serde_yaml::from_str("program_name: vcs\nrequire_command: false\nsettings:\n  exit:\n    auto_exit: false\n")
            .unwrap();
    let args = ArgumentParser::default()
        .with_output(Output::Buffer(SharedBuffer::new()))
        .with_config(config)
        .add_command(CommandSpec::new("commit"))
        .parse(Vec::<String>::new())
        .unwrap();
    assert_eq!(args.result_code(), ParserResultCode::Success);
}
