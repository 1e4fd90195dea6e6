//! Declaration of options.

use std::rc::Rc;

use crate::callbacks::{OptionCallback, OptionCallbackArgs};
use crate::error::Result;
use crate::types::{
    ArgumentId, Callback, HelpText, OptionOperation, OptionType, ValueId, Visibility,
};

/// An option identified by one or more flags.
///
/// An option either takes its value from the command line (it has an
/// argument) or stores a constant. Options that neither take an argument nor
/// have a constant store `"1"` when encountered.
///
/// # Examples
///
/// ```
/// use argos::{OptionOperation, OptionSpec};
///
/// let include = OptionSpec::new(["-I", "--include"])
///     .with_argument("DIR")
///     .with_operation(OptionOperation::Append)
///     .with_help("Add a directory to the search path.");
/// assert_eq!(include.flags(), ["-I", "--include"]);
/// assert_eq!(include.argument(), "DIR");
/// ```
#[derive(Debug, Clone)]
pub struct OptionSpec {
    pub(crate) flags: Vec<String>,
    pub(crate) help: HelpText,
    pub(crate) section: String,
    pub(crate) alias: String,
    pub(crate) argument: String,
    pub(crate) constant: String,
    pub(crate) initial_value: String,
    pub(crate) operation: OptionOperation,
    pub(crate) option_type: OptionType,
    pub(crate) optional: bool,
    pub(crate) visibility: Visibility,
    pub(crate) callback: Option<OptionCallback>,
    pub(crate) id: i32,
    pub(crate) value_id: ValueId,
    pub(crate) argument_id: ArgumentId,
}

impl OptionSpec {
    pub fn new<I, S>(flags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            flags: flags.into_iter().map(Into::into).collect(),
            help: HelpText::default(),
            section: String::new(),
            alias: String::new(),
            argument: String::new(),
            constant: String::new(),
            initial_value: String::new(),
            operation: OptionOperation::Assign,
            option_type: OptionType::Normal,
            optional: true,
            visibility: Visibility::Normal,
            callback: None,
            id: 0,
            value_id: ValueId::default(),
            argument_id: ArgumentId::default(),
        }
    }

    pub fn with_help(mut self, help: impl Into<HelpText>) -> Self {
        self.help = help.into();
        self
    }

    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.section = section.into();
        self
    }

    /// Stores the option's values under `alias` instead of its flags. Options
    /// with the same alias share their values.
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = alias.into();
        self
    }

    /// Name of the option's value in the help text. Setting it makes the
    /// option consume a value from the command line.
    pub fn with_argument(mut self, name: impl Into<String>) -> Self {
        self.argument = name.into();
        self
    }

    /// The value stored when the option is encountered.
    pub fn with_constant(mut self, value: impl Into<String>) -> Self {
        self.constant = value.into();
        self
    }

    /// Stores `"1"` for `true` and `"0"` for `false`.
    pub fn with_bool_constant(self, value: bool) -> Self {
        self.with_constant(if value { "1" } else { "0" })
    }

    pub fn with_int_constant(self, value: i64) -> Self {
        self.with_constant(value.to_string())
    }

    /// A value stored before parsing starts.
    pub fn with_initial_value(mut self, value: impl Into<String>) -> Self {
        self.initial_value = value.into();
        self
    }

    pub fn with_operation(mut self, operation: OptionOperation) -> Self {
        self.operation = operation;
        self
    }

    pub fn with_type(mut self, option_type: OptionType) -> Self {
        self.option_type = option_type;
        self
    }

    /// Mandatory options must be given on the command line.
    pub fn with_optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_callback(
        mut self,
        callback: impl Fn(&mut OptionCallbackArgs) -> Result<()> + 'static,
    ) -> Self {
        self.callback = Some(Callback(Rc::new(callback)));
        self
    }

    pub fn with_id(mut self, id: i32) -> Self {
        self.id = id;
        self
    }

    pub fn flags(&self) -> &[String] {
        &self.flags
    }

    pub fn help(&self) -> String {
        self.help.text()
    }

    pub fn section(&self) -> &str {
        &self.section
    }

    pub fn alias(&self) -> &str {
        &self.alias
    }

    pub fn argument(&self) -> &str {
        &self.argument
    }

    pub fn constant(&self) -> &str {
        &self.constant
    }

    pub fn initial_value(&self) -> &str {
        &self.initial_value
    }

    pub fn operation(&self) -> OptionOperation {
        self.operation
    }

    pub fn option_type(&self) -> OptionType {
        self.option_type
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn value_id(&self) -> ValueId {
        self.value_id
    }

    pub fn argument_id(&self) -> ArgumentId {
        self.argument_id
    }

    /// The flags joined by `", "`, as used in error messages.
    pub fn joined_flags(&self) -> String {
        self.flags.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opt = OptionSpec::new(["-v"]);
        assert_eq!(opt.operation(), OptionOperation::Assign);
        assert_eq!(opt.option_type(), OptionType::Normal);
        assert!(opt.is_optional());
        assert!(opt.constant().is_empty());
    }

    #[test]
    fn test_typed_constants() {
        assert_eq!(OptionSpec::new(["-a"]).with_bool_constant(true).constant(), "1");
        assert_eq!(OptionSpec::new(["-a"]).with_bool_constant(false).constant(), "0");
        assert_eq!(OptionSpec::new(["-a"]).with_int_constant(-12).constant(), "-12");
    }

    #[test]
    fn test_joined_flags() {
        let opt = OptionSpec::new(["-f", "--file"]);
        assert_eq!(opt.joined_flags(), "-f, --file");
    }
}
