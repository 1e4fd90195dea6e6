//! Integration tests for subcommands.

use argos::{
    ArgumentParser, ArgumentSpec, CommandSpec, IteratorItem, OptionSpec, OptionType, Output,
    ParserResultCode, SharedBuffer,
};

/// A parser that writes to a buffer and never exits.
fn parser(name: &str) -> (ArgumentParser, SharedBuffer) {
    let buffer = SharedBuffer::new();
    let parser = ArgumentParser::new(name)
        .with_auto_exit(false)
        .with_output(Output::Buffer(buffer.clone()));
    (parser, buffer)
}

fn foo_and_bar(parser: ArgumentParser) -> ArgumentParser {
    parser
        .add_command(
            CommandSpec::new("foo")
                .with_about("Does foo things.")
                .with_option(OptionSpec::new(["-v"])),
        )
        .add_command(CommandSpec::new("bar").with_about("Does bar things."))
}

#[test]
fn test_help_lists_commands() {
    let (parser, buffer) = parser("test");
    foo_and_bar(parser).write_help_text().unwrap();
    let text = buffer.contents();
    assert!(text.contains("  test foo|bar\n"));
    assert!(text.contains("COMMANDS\n"));
    assert!(text.contains("Does foo things."));
    assert!(text.contains("Does bar things."));
}

#[test]
fn test_optional_command_in_brackets() {
    let (parser, buffer) = parser("test");
    foo_and_bar(parser)
        .with_require_command(false)
        .write_help_text()
        .unwrap();
    assert!(buffer.contents().contains("  test [foo|bar]\n"));
}

#[test]
fn test_subcommand_values() {
    let (parser, _) = parser("test");
    let args = parser
        .add_command(CommandSpec::new("foo").with_argument(ArgumentSpec::new("ARG")))
        .parse(["foo", "x"])
        .unwrap();
    assert_eq!(args.result_code(), ParserResultCode::Success);
    let subcommands = args.subcommands();
    assert_eq!(subcommands.len(), 1);
    let foo = &subcommands[0];
    assert_eq!(foo.command_name(), "foo");
    assert_eq!(foo.result_code(), ParserResultCode::Success);
    assert_eq!(foo.value("ARG").unwrap().as_string(""), "x");
    assert!(args.value("ARG").is_err());
}

#[test]
fn test_missing_command() {
    let (parser, buffer) = parser("test");
    let args = foo_and_bar(parser).parse(Vec::<String>::new()).unwrap();
    assert_eq!(args.result_code(), ParserResultCode::Failure);
    assert!(buffer.contents().starts_with("test: No command given.\n"));
}

#[test]
fn test_command_not_required() {
    let (parser, _) = parser("test");
    let args = foo_and_bar(parser)
        .with_require_command(false)
        .parse(Vec::<String>::new())
        .unwrap();
    assert_eq!(args.result_code(), ParserResultCode::Success);
    assert!(args.subcommands().is_empty());
}

#[test]
fn test_unknown_command() {
    let (parser, buffer) = parser("test");
    let args = foo_and_bar(parser).parse(["baz"]).unwrap();
    assert_eq!(args.result_code(), ParserResultCode::Failure);
    assert!(buffer.contents().starts_with("test: Unknown command: baz\n"));
}

#[test]
fn test_single_command_only() {
    let (parser, buffer) = parser("test");
    let args = foo_and_bar(parser).parse(["foo", "bar"]).unwrap();
    assert_eq!(args.result_code(), ParserResultCode::Failure);
    assert!(buffer
        .contents()
        .starts_with("test foo: Too many arguments, starting with \"bar\".\n"));
}

#[test]
fn test_multi_command() {
    let (parser, _) = parser("test");
    let args = foo_and_bar(parser)
        .with_multi_command(true)
        .parse(["foo", "-v", "bar", "foo"])
        .unwrap();
    assert_eq!(args.result_code(), ParserResultCode::Success);
    let names: Vec<String> = args.subcommands().iter().map(|s| s.command_name()).collect();
    assert_eq!(names, ["foo", "bar", "foo"]);
    let subcommands = args.subcommands();
    assert!(subcommands[0].value("-v").unwrap().as_bool(false));
    assert!(!subcommands[2].value("-v").unwrap().as_bool(false));
}

#[test]
fn test_nested_commands() {
    let (parser, _) = parser("git");
    let parser = parser.add_command(
        CommandSpec::new("remote").with_command(
            CommandSpec::new("add")
                .with_argument(ArgumentSpec::new("NAME"))
                .with_argument(ArgumentSpec::new("URL")),
        ),
    );
    let args = parser
        .parse(["remote", "add", "origin", "https://example.com/repo.git"])
        .unwrap();
    assert_eq!(args.result_code(), ParserResultCode::Success);
    let remote = &args.subcommands()[0];
    assert_eq!(remote.command_name(), "remote");
    let add = &remote.subcommands()[0];
    assert_eq!(add.command_name(), "add");
    assert_eq!(add.value("NAME").unwrap().as_string(""), "origin");
    assert_eq!(
        add.value("URL").unwrap().as_string(""),
        "https://example.com/repo.git"
    );
}

#[test]
fn test_nested_command_errors_use_command_path() {
    let (parser, buffer) = parser("git");
    let args = parser
        .add_command(
            CommandSpec::new("remote")
                .with_command(CommandSpec::new("add").with_argument(ArgumentSpec::new("NAME"))),
        )
        .parse(["remote", "add"])
        .unwrap();
    assert_eq!(args.result_code(), ParserResultCode::Failure);
    assert!(buffer
        .contents()
        .starts_with("git remote add: Too few arguments. Expected 1, received 0.\n"));
}

#[test]
fn test_iterator_reports_commands() {
    let (parser, _) = parser("test");
    let mut it = foo_and_bar(parser).make_iterator(["foo", "-v"]).unwrap();
    assert!(matches!(it.next(), Some(IteratorItem::Command(c)) if c.name() == "foo"));
    assert!(matches!(it.next(), Some(IteratorItem::Option(o, _)) if o.flags() == ["-v"]));
    assert!(it.next().is_none());
    assert_eq!(it.parsed_arguments().result_code(), ParserResultCode::Success);
}

#[test]
fn test_sibling_name_ends_variable_arguments() {
    let (parser, _) = parser("test");
    let args = parser
        .with_multi_command(true)
        .add_command(
            CommandSpec::new("foo")
                .with_argument(ArgumentSpec::new("A").with_counts(0, 1))
                .with_argument(ArgumentSpec::new("B")),
        )
        .add_command(CommandSpec::new("bar"))
        .parse(["foo", "x", "bar"])
        .unwrap();
    assert_eq!(args.result_code(), ParserResultCode::Success);
    let subcommands = args.subcommands();
    let names: Vec<String> = subcommands.iter().map(|s| s.command_name()).collect();
    assert_eq!(names, ["foo", "bar"]);
    assert!(subcommands[0].values("A").unwrap().is_empty());
    assert_eq!(subcommands[0].values("B").unwrap().as_strings(&[]), ["x"]);
}

#[test]
fn test_subcommand_after_last_option_counts_flags_as_arguments() {
    let (parser, _) = parser("test");
    let args = parser
        .add_option(OptionSpec::new(["--"]).with_type(OptionType::LastOption))
        .add_command(
            CommandSpec::new("foo")
                .with_argument(ArgumentSpec::new("A").with_counts(0, 1))
                .with_argument(ArgumentSpec::new("B")),
        )
        .parse(["--", "foo", "-x", "y"])
        .unwrap();
    assert_eq!(args.result_code(), ParserResultCode::Success);
    let foo = &args.subcommands()[0];
    assert_eq!(foo.values("A").unwrap().as_strings(&[]), ["-x"]);
    assert_eq!(foo.values("B").unwrap().as_strings(&[]), ["y"]);
}

#[test]
fn test_filter_keeps_tokens_left_in_subcommand() {
    let (parser, _) = parser("prog");
    let args = parser
        .add_command(
            CommandSpec::new("foo")
                .with_option(OptionSpec::new(["--stop"]).with_type(OptionType::Stop)),
        )
        .parse(["foo", "--stop", "a", "b"])
        .unwrap();
    assert_eq!(args.result_code(), ParserResultCode::Stop);
    assert!(args.unprocessed_arguments().is_empty());
    assert_eq!(args.subcommands()[0].unprocessed_arguments(), ["a", "b"]);

    let mut argv: Vec<String> = ["prog", "foo", "--stop", "a", "b"].map(String::from).to_vec();
    args.filter_parsed_arguments(&mut argv);
    assert_eq!(argv, ["prog", "a", "b"]);
}
