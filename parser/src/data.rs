//! The finished parser: grammar, settings and the one-time preparation that
//! turns builder state into something the iterator can run on.

use std::rc::Rc;

use argos_text::{Output, TextError, TextFormatter};
use tracing::debug;

use crate::command::CommandSpec;
use crate::error::{ConfigError, Result};
use crate::ids::{assign_argument_ids, assign_value_ids};
use crate::index::build_option_index;
use crate::option::OptionSpec;
use crate::settings::{HelpSettings, ParserSettings};
use crate::types::{ArgumentId, OptionStyle, OptionType, ValueId};
use crate::validate::validate_option;

#[derive(Debug, Clone, Default)]
pub(crate) struct ParserData {
    pub(crate) command: Rc<CommandSpec>,
    pub(crate) settings: ParserSettings,
    pub(crate) help: HelpSettings,
    pub(crate) version: String,
}

impl ParserData {
    /// A formatter for help text, writing to the configured output or
    /// standard output.
    pub(crate) fn help_formatter(&self) -> std::result::Result<TextFormatter, TextError> {
        self.formatter(Output::Stdout)
    }

    /// A formatter for error messages, writing to the configured output or
    /// standard error.
    pub(crate) fn error_formatter(&self) -> std::result::Result<TextFormatter, TextError> {
        self.formatter(Output::Stderr)
    }

    /// The configured output, or `fallback` if none was given.
    pub(crate) fn output_or(&self, fallback: Output) -> Output {
        self.help.output.clone().unwrap_or(fallback)
    }

    fn formatter(&self, fallback: Output) -> std::result::Result<TextFormatter, TextError> {
        let mut formatter = TextFormatter::new(self.output_or(fallback), self.help.line_width)?;
        formatter.word_splitter().add_words(&self.help.word_split_rules)?;
        Ok(formatter)
    }

    /// Validates the grammar, adds the generated help and version options and
    /// assigns all identifiers. Must run exactly once before parsing.
    pub(crate) fn finish(&mut self) -> Result<()> {
        self.help_formatter()?;
        let settings = &self.settings;
        let cmd = Rc::make_mut(&mut self.command);
        if let Some(err) = cmd.errors.first() {
            return Err(err.clone().into());
        }
        if !self.version.is_empty() {
            add_version_option(cmd, settings, &self.version);
        }
        finish_command(cmd, settings, ValueId::default())?;
        let last = assign_argument_ids(cmd, ArgumentId::default());
        debug!(program = %cmd.name, argument_ids = last.0, "Finished parser initialization");
        Ok(())
    }
}

fn add_version_option(cmd: &mut CommandSpec, settings: &ParserSettings, version: &str) {
    let ci = settings.case_insensitive;
    let flag = match settings.option_style {
        OptionStyle::Standard => "--version",
        OptionStyle::Slash => "/VERSION",
        OptionStyle::Dash => "-version",
    };
    if cmd.has_flag(flag, ci) {
        return;
    }

    let version = version.to_string();
    let option = OptionSpec::new([flag])
        .with_type(OptionType::Stop)
        .with_help("Display the program version.")
        .with_constant("1")
        .with_callback(move |cb| {
            let text = format!("{} {}\n", cb.builder.program_name(), version);
            cb.builder.output().write_str(&text)?;
            Ok(())
        });
    cmd.add_option(option);
    debug!(flag, "Added version option");
}

fn add_help_option(cmd: &mut CommandSpec, settings: &ParserSettings) {
    if !settings.generate_help_option
        || cmd.options.iter().any(|o| o.option_type == OptionType::Help)
    {
        return;
    }

    let ci = settings.case_insensitive;
    let mut flags = Vec::new();
    match settings.option_style {
        OptionStyle::Standard => {
            for flag in ["-h", "--help"] {
                if !cmd.has_flag(flag, ci) {
                    flags.push(flag);
                }
            }
        }
        OptionStyle::Slash => {
            if !cmd.has_flag("/?", ci) {
                flags.push("/?");
            }
        }
        OptionStyle::Dash => {
            if !cmd.has_flag("-h", ci) {
                flags.push("-h");
            } else if !cmd.has_flag("-help", ci) {
                flags.push("-help");
            }
        }
    }
    if flags.is_empty() {
        return;
    }

    debug!(command = %cmd.name, flags = ?flags, "Added help option");
    cmd.add_option(
        OptionSpec::new(flags)
            .with_type(OptionType::Help)
            .with_help("Display the help text.")
            .with_constant("1"),
    );
}

fn update_require_command(cmd: &mut CommandSpec) -> Result<()> {
    match cmd.require_command {
        Some(true) if cmd.commands.is_empty() => {
            Err(ConfigError::RequireCommandWithoutCommands.into())
        }
        Some(_) => Ok(()),
        None => {
            cmd.require_command = Some(!cmd.commands.is_empty() && cmd.arguments.is_empty());
            Ok(())
        }
    }
}

fn finish_command(cmd: &mut CommandSpec, settings: &ParserSettings, start: ValueId) -> Result<()> {
    if let Some(err) = cmd.errors.first() {
        return Err(err.clone().into());
    }
    for argument in &cmd.arguments {
        argument.validate()?;
    }
    for option in &mut cmd.options {
        validate_option(option, settings.option_style)?;
    }
    if !cmd.arguments.is_empty() && !cmd.commands.is_empty() {
        return Err(ConfigError::ArgumentsAndCommands(cmd.name.clone()).into());
    }
    update_require_command(cmd)?;
    add_help_option(cmd, settings);

    let last = assign_value_ids(cmd, start);
    build_option_index(cmd, settings.case_insensitive)?;
    for sub in &mut cmd.commands {
        if sub.name.is_empty() {
            return Err(ConfigError::NoCommandName.into());
        }
        finish_command(Rc::make_mut(sub), settings, last)?;
    }
    Ok(())
}
