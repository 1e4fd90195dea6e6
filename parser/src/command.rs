//! Declaration of commands and subcommands.

use std::collections::BTreeMap;
use std::rc::Rc;

use argos_core::are_equal;

use crate::argument::ArgumentSpec;
use crate::error::ConfigError;
use crate::option::OptionSpec;
use crate::types::{ArgumentId, HelpText, TextId, Visibility};

/// A command: the program itself or one of its subcommands.
///
/// A command has either positional arguments or subcommands, never both.
/// Options can be declared at every level, but only the options of the
/// command currently being parsed are recognized.
///
/// # Examples
///
/// ```
/// use argos::{ArgumentSpec, CommandSpec, OptionSpec};
///
/// let add = CommandSpec::new("add")
///     .with_about("Add files to the index.")
///     .with_option(OptionSpec::new(["-n", "--dry-run"]))
///     .with_argument(ArgumentSpec::new("PATH").with_counts(1, 100));
/// assert_eq!(add.name(), "add");
/// assert_eq!(add.arguments().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CommandSpec {
    pub(crate) name: String,
    pub(crate) arguments: Vec<ArgumentSpec>,
    pub(crate) options: Vec<OptionSpec>,
    pub(crate) commands: Vec<Rc<CommandSpec>>,
    pub(crate) texts: BTreeMap<TextId, HelpText>,
    pub(crate) current_section: String,
    pub(crate) section: String,
    pub(crate) require_command: Option<bool>,
    pub(crate) multi_command: bool,
    pub(crate) visibility: Visibility,
    pub(crate) id: i32,
    pub(crate) argument_id: ArgumentId,
    /// Flags sorted under the active case rule, with the index of their
    /// option. Built when the parser is finished.
    pub(crate) option_index: Vec<(String, usize)>,
    pub(crate) errors: Vec<ConfigError>,
}

impl CommandSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: Vec::new(),
            options: Vec::new(),
            commands: Vec::new(),
            texts: BTreeMap::new(),
            current_section: String::new(),
            section: String::new(),
            require_command: None,
            multi_command: false,
            visibility: Visibility::Normal,
            id: 0,
            argument_id: ArgumentId::default(),
            option_index: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn with_argument(mut self, argument: ArgumentSpec) -> Self {
        self.add_argument(argument);
        self
    }

    pub fn with_option(mut self, option: OptionSpec) -> Self {
        self.add_option(option);
        self
    }

    pub fn with_command(mut self, command: CommandSpec) -> Self {
        self.add_command(command);
        self
    }

    /// Items added after this call without a section of their own are listed
    /// under `name` in the help text.
    pub fn with_section(mut self, name: impl Into<String>) -> Self {
        self.current_section = name.into();
        self
    }

    pub fn with_text(mut self, id: TextId, text: impl Into<HelpText>) -> Self {
        self.texts.insert(id, text.into());
        self
    }

    /// Sets the [`TextId::About`] text, which is also the command's
    /// description in its parent's help text.
    pub fn with_about(self, text: impl Into<HelpText>) -> Self {
        self.with_text(TextId::About, text)
    }

    /// Whether a subcommand must be given. Commands with subcommands and no
    /// arguments require one unless told otherwise.
    pub fn with_require_command(mut self, require: bool) -> Self {
        self.require_command = Some(require);
        self
    }

    /// Allows several subcommands of this command to follow each other on one
    /// command line, e.g. `prog build test`.
    pub fn with_multi_command(mut self, multi: bool) -> Self {
        self.multi_command = multi;
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_id(mut self, id: i32) -> Self {
        self.id = id;
        self
    }

    pub fn add_argument(&mut self, mut argument: ArgumentSpec) {
        if argument.section.is_empty() {
            argument.section = self.current_section.clone();
        }
        self.arguments.push(argument);
    }

    pub fn add_option(&mut self, mut option: OptionSpec) {
        if option.section.is_empty() {
            option.section = self.current_section.clone();
        }
        self.options.push(option);
    }

    pub fn add_command(&mut self, mut command: CommandSpec) {
        if command.section.is_empty() {
            command.section = self.current_section.clone();
        }
        self.commands.push(Rc::new(command));
    }

    /// Copies the arguments, options, subcommands and texts of `other` into
    /// this command.
    ///
    /// A text that both commands define is reported as a configuration error
    /// when the parser is finished.
    pub fn copy_from(&mut self, other: &CommandSpec) {
        self.arguments.extend(other.arguments.iter().cloned());
        self.options.extend(other.options.iter().cloned());
        self.commands.extend(other.commands.iter().cloned());
        for (id, text) in &other.texts {
            if self.texts.contains_key(id) {
                self.errors.push(ConfigError::DuplicateText(*id));
            } else {
                self.texts.insert(*id, text.clone());
            }
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arguments(&self) -> &[ArgumentSpec] {
        &self.arguments
    }

    pub fn options(&self) -> &[OptionSpec] {
        &self.options
    }

    pub fn commands(&self) -> impl Iterator<Item = &CommandSpec> {
        self.commands.iter().map(|c| c.as_ref())
    }

    pub fn text(&self, id: TextId) -> Option<String> {
        self.texts.get(&id).map(HelpText::text)
    }

    /// The [`TextId::About`] text, or an empty string.
    pub fn help(&self) -> String {
        self.text(TextId::About).unwrap_or_default()
    }

    pub fn section(&self) -> &str {
        &self.section
    }

    pub fn require_command(&self) -> Option<bool> {
        self.require_command
    }

    pub fn is_multi_command(&self) -> bool {
        self.multi_command
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn argument_id(&self) -> ArgumentId {
        self.argument_id
    }

    pub(crate) fn find_command(&self, name: &str, case_insensitive: bool) -> Option<usize> {
        self.commands
            .iter()
            .position(|c| are_equal(&c.name, name, case_insensitive))
    }

    pub(crate) fn has_flag(&self, flag: &str, case_insensitive: bool) -> bool {
        self.options
            .iter()
            .flat_map(|o| o.flags.iter())
            .any(|f| are_equal(f, flag, case_insensitive))
    }
}
