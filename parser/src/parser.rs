//! The top-level parser builder.

use std::rc::Rc;

use argos_core::base_name;
use argos_text::Output;
use tracing::debug;

use crate::argument::ArgumentSpec;
use crate::callbacks::{ArgumentCallbackArgs, OptionCallbackArgs};
use crate::command::CommandSpec;
use crate::data::ParserData;
use crate::error::{ConfigError, Result};
use crate::help::write_help_text;
use crate::iterator::ArgumentIterator;
use crate::option::OptionSpec;
use crate::parsed::ParsedArguments;
use crate::settings::{ParserConfig, ParserSettings};
use crate::types::{Callback, HelpText, OptionStyle, TextId};

/// Declares a program's command-line grammar and parses command lines with
/// it.
///
/// The parser itself is never modified by parsing: every call to
/// [`parse`](Self::parse) works on its own finished copy of the grammar, so
/// one parser can parse any number of command lines.
///
/// # Examples
///
/// ```
/// use argos::{ArgumentParser, ArgumentSpec, OptionOperation, OptionSpec};
///
/// let parser = ArgumentParser::new("cc")
///     .with_auto_exit(false)
///     .add_option(
///         OptionSpec::new(["-I"])
///             .with_argument("DIR")
///             .with_operation(OptionOperation::Append),
///     )
///     .add_argument(ArgumentSpec::new("FILE").with_counts(1, 10));
///
/// let args = parser.parse(["-Iinclude", "-I", "src", "main.c"]).unwrap();
/// assert_eq!(args.values("-I").unwrap().as_strings(&[]), ["include", "src"]);
/// assert_eq!(args.values("FILE").unwrap().as_strings(&[]), ["main.c"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ArgumentParser {
    data: ParserData,
}

impl ArgumentParser {
    pub fn new(program_name: impl Into<String>) -> Self {
        Self {
            data: ParserData {
                command: Rc::new(CommandSpec::new(program_name)),
                ..ParserData::default()
            },
        }
    }

    fn command_mut(&mut self) -> &mut CommandSpec {
        Rc::make_mut(&mut self.data.command)
    }

    pub fn program_name(&self) -> &str {
        &self.data.command.name
    }

    pub fn settings(&self) -> &ParserSettings {
        &self.data.settings
    }

    pub fn with_program_name(mut self, name: impl Into<String>) -> Self {
        self.command_mut().name = name.into();
        self
    }

    /// Applies a configuration loaded with [`ParserConfig::load`]. Callbacks
    /// and the output sink are kept unless the configuration sets them.
    pub fn with_config(mut self, config: ParserConfig) -> Self {
        let ParserConfig {
            program_name,
            version,
            about,
            multi_command,
            require_command,
            mut settings,
            mut help,
        } = config;
        debug!(program = %program_name, "Applying parser configuration");

        if !program_name.is_empty() {
            self = self.with_program_name(program_name);
        }
        if !version.is_empty() {
            self.data.version = version;
        }
        if !about.is_empty() {
            self = self.with_about(about);
        }
        let cmd = self.command_mut();
        cmd.multi_command = multi_command;
        if require_command.is_some() {
            cmd.require_command = require_command;
        }

        let style = settings.option_style;
        settings.option_style = self.data.settings.option_style;
        settings.argument_callback = settings
            .argument_callback
            .or_else(|| self.data.settings.argument_callback.take());
        settings.option_callback = settings
            .option_callback
            .or_else(|| self.data.settings.option_callback.take());
        self.data.settings = settings;
        help.output = help.output.or_else(|| self.data.help.output.take());
        self.data.help = help;
        self.with_option_style(style)
    }

    pub fn with_allow_abbreviated_options(mut self, value: bool) -> Self {
        self.data.settings.allow_abbreviated_options = value;
        self
    }

    /// Whether to exit the process after errors and after help and exit
    /// options. Enabled by default.
    pub fn with_auto_exit(mut self, value: bool) -> Self {
        self.data.settings.exit.auto_exit = value;
        self
    }

    pub fn with_case_insensitive(mut self, value: bool) -> Self {
        self.data.settings.case_insensitive = value;
        self
    }

    pub fn with_generate_help_option(mut self, value: bool) -> Self {
        self.data.settings.generate_help_option = value;
        self
    }

    /// Sets the flag syntax. Must be called before any option is added.
    pub fn with_option_style(mut self, style: OptionStyle) -> Self {
        if style == self.data.settings.option_style {
            return self;
        }
        let cmd = &self.data.command;
        if !cmd.options.is_empty() || !cmd.commands.is_empty() {
            self.command_mut().errors.push(ConfigError::OptionStyleChanged);
        } else {
            self.data.settings.option_style = style;
        }
        self
    }

    pub fn with_ignore_undefined_options(mut self, value: bool) -> Self {
        self.data.settings.ignore_undefined_options = value;
        self
    }

    pub fn with_ignore_undefined_arguments(mut self, value: bool) -> Self {
        self.data.settings.ignore_undefined_arguments = value;
        self
    }

    pub fn with_multi_command(mut self, value: bool) -> Self {
        self.command_mut().multi_command = value;
        self
    }

    pub fn with_require_command(mut self, value: bool) -> Self {
        self.command_mut().require_command = Some(value);
        self
    }

    /// Exit codes used when auto-exit is enabled.
    pub fn with_exit_codes(mut self, error_code: i32, normal_code: i32) -> Self {
        self.data.settings.exit.error_code = error_code;
        self.data.settings.exit.normal_code = normal_code;
        self
    }

    /// A callback that runs after every argument.
    pub fn with_argument_callback(
        mut self,
        callback: impl Fn(&mut ArgumentCallbackArgs) -> Result<()> + 'static,
    ) -> Self {
        self.data.settings.argument_callback = Some(Callback(Rc::new(callback)));
        self
    }

    /// A callback that runs after every option.
    pub fn with_option_callback(
        mut self,
        callback: impl Fn(&mut OptionCallbackArgs) -> Result<()> + 'static,
    ) -> Self {
        self.data.settings.option_callback = Some(Callback(Rc::new(callback)));
        self
    }

    /// Sends help text and error messages to `output`.
    pub fn with_output(mut self, output: Output) -> Self {
        self.data.help.output = Some(output);
        self
    }

    pub fn with_line_width(mut self, width: usize) -> Self {
        self.data.help.line_width = width;
        self
    }

    /// Adds a hyphenation rule for the help text, e.g.
    /// `"compre hen sive"`.
    pub fn with_word_split_rule(mut self, rule: impl Into<String>) -> Self {
        self.data.help.word_split_rules.push(rule.into());
        self
    }

    /// Adds a `--version` option that prints the program name and `version`.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.data.version = version.into();
        self
    }

    pub fn with_about(self, text: impl Into<HelpText>) -> Self {
        self.with_text(TextId::About, text)
    }

    pub fn with_text(mut self, id: TextId, text: impl Into<HelpText>) -> Self {
        self.command_mut().texts.insert(id, text.into());
        self
    }

    /// Items added after this call are listed under `name` in the help text.
    pub fn with_section(mut self, name: impl Into<String>) -> Self {
        self.command_mut().current_section = name.into();
        self
    }

    pub fn add_argument(mut self, argument: ArgumentSpec) -> Self {
        self.command_mut().add_argument(argument);
        self
    }

    pub fn add_option(mut self, option: OptionSpec) -> Self {
        self.command_mut().add_option(option);
        self
    }

    pub fn add_command(mut self, command: CommandSpec) -> Self {
        self.command_mut().add_command(command);
        self
    }

    /// Copies the arguments, options, subcommands and texts of `command`
    /// into the top-level command.
    pub fn copy_from(mut self, command: &CommandSpec) -> Self {
        self.command_mut().copy_from(command);
        self
    }

    fn finished(&self) -> Result<ParserData> {
        let mut data = self.data.clone();
        data.finish()?;
        Ok(data)
    }

    /// Parses `args`, which must not include the program name.
    ///
    /// Parse errors are written to the error output. Unless auto-exit is
    /// disabled the process then exits; otherwise they are reported through
    /// [`ParsedArguments::result_code`].
    ///
    /// # Errors
    ///
    /// Returns an error only if the grammar itself is invalid.
    pub fn parse<I, S>(&self, args: I) -> Result<ParsedArguments>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(self.make_iterator(args)?.run())
    }

    /// Parses a complete `argv`, program name first. The program name is
    /// taken from `argv[0]` if none was set.
    ///
    /// # Examples
    ///
    /// ```
    /// use argos::{ArgumentParser, OptionSpec};
    ///
    /// let args = ArgumentParser::default()
    ///     .with_auto_exit(false)
    ///     .add_option(OptionSpec::new(["-v"]))
    ///     .parse_argv(["/usr/bin/tool", "-v"])
    ///     .unwrap();
    /// assert_eq!(args.command_name(), "tool");
    /// ```
    pub fn parse_argv<I, S>(&self, argv: I) -> Result<ParsedArguments>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut argv = argv.into_iter().map(Into::into);
        let program = argv.next().unwrap_or_default();
        if !self.program_name().is_empty() || program.is_empty() {
            return self.parse(argv);
        }
        self.clone()
            .with_program_name(base_name(&program))
            .parse(argv)
    }

    /// Prepares `args` for step-by-step parsing.
    pub fn make_iterator<I, S>(&self, args: I) -> Result<ArgumentIterator>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        let data = self.finished()?;
        debug!(program = %data.command.name, tokens = args.len(), "Parsing command line");
        Ok(ArgumentIterator::new(args, Rc::new(data)))
    }

    /// Writes the help text of the top-level command.
    pub fn write_help_text(&self) -> Result<()> {
        let data = self.finished()?;
        write_help_text(&data, &data.command, &data.command.name)?;
        Ok(())
    }
}
