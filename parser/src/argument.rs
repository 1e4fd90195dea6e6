//! Declaration of positional arguments.

use std::rc::Rc;

use crate::callbacks::{ArgumentCallback, ArgumentCallbackArgs};
use crate::error::{ConfigError, Result};
use crate::types::{ArgumentId, Callback, HelpText, ValueId, Visibility};

/// A positional argument.
///
/// By default an argument must occur exactly once. Use
/// [`with_count`](Self::with_count), [`with_counts`](Self::with_counts) or
/// [`with_optional`](Self::with_optional) to change that.
///
/// # Examples
///
/// ```
/// use argos::ArgumentSpec;
///
/// let files = ArgumentSpec::new("FILE")
///     .with_help("Files to process.")
///     .with_counts(0, 10);
/// assert_eq!(files.name(), "FILE");
/// assert!(files.is_optional());
/// assert_eq!(files.max_count(), 10);
/// ```
#[derive(Debug, Clone)]
pub struct ArgumentSpec {
    pub(crate) name: String,
    pub(crate) help: HelpText,
    pub(crate) section: String,
    pub(crate) alias: String,
    pub(crate) callback: Option<ArgumentCallback>,
    pub(crate) min_count: u32,
    pub(crate) max_count: u32,
    pub(crate) visibility: Visibility,
    pub(crate) id: i32,
    pub(crate) value_id: ValueId,
    pub(crate) argument_id: ArgumentId,
    pub(crate) count_error: Option<ConfigError>,
}

impl ArgumentSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            help: HelpText::default(),
            section: String::new(),
            alias: String::new(),
            callback: None,
            min_count: 1,
            max_count: 1,
            visibility: Visibility::Normal,
            id: 0,
            value_id: ValueId::default(),
            argument_id: ArgumentId::default(),
            count_error: None,
        }
    }

    pub fn with_help(mut self, help: impl Into<HelpText>) -> Self {
        self.help = help.into();
        self
    }

    /// Places the argument under a custom heading in the help text.
    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.section = section.into();
        self
    }

    /// Stores the argument's values under `alias` instead of its name.
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = alias.into();
        self
    }

    pub fn with_callback(
        mut self,
        callback: impl Fn(&mut ArgumentCallbackArgs) -> Result<()> + 'static,
    ) -> Self {
        self.callback = Some(Callback(Rc::new(callback)));
        self
    }

    /// The argument must occur exactly `n` times.
    pub fn with_count(mut self, n: u32) -> Self {
        if n == 0 {
            self.count_error = Some(ConfigError::InvalidCount(
                "Argument's count must be greater than 0.".to_string(),
            ));
        } else {
            self.min_count = n;
            self.max_count = n;
        }
        self
    }

    /// The argument occurs between `min` and `max` times, both inclusive.
    pub fn with_counts(mut self, min: u32, max: u32) -> Self {
        if max == 0 {
            self.count_error = Some(ConfigError::InvalidCount(
                "Argument's max count must be greater than 0.".to_string(),
            ));
        } else if max < min {
            self.count_error = Some(ConfigError::InvalidCount(
                "Argument's max count cannot be less than its min count.".to_string(),
            ));
        } else {
            self.min_count = min;
            self.max_count = max;
        }
        self
    }

    /// An optional argument has a minimum count of zero. Making an optional
    /// argument mandatory raises the minimum to one.
    pub fn with_optional(mut self, optional: bool) -> Self {
        if optional {
            self.min_count = 0;
        } else if self.min_count == 0 {
            self.min_count = 1;
        }
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Client-defined id, returned unchanged by views.
    pub fn with_id(mut self, id: i32) -> Self {
        self.id = id;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
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

    pub fn min_count(&self) -> u32 {
        self.min_count
    }

    pub fn max_count(&self) -> u32 {
        self.max_count
    }

    pub fn is_optional(&self) -> bool {
        self.min_count == 0
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    /// Assigned when the parser is finished.
    pub fn value_id(&self) -> ValueId {
        self.value_id
    }

    /// Assigned when the parser is finished.
    pub fn argument_id(&self) -> ArgumentId {
        self.argument_id
    }

    pub(crate) fn validate(&self) -> std::result::Result<(), ConfigError> {
        if let Some(err) = &self.count_error {
            return Err(err.clone());
        }
        if self.name.is_empty() {
            return Err(ConfigError::NoArgumentName);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let arg = ArgumentSpec::new("FILE");
        assert_eq!((arg.min_count(), arg.max_count()), (1, 1));
        assert!(!arg.is_optional());
        assert_eq!(arg.visibility(), Visibility::Normal);
        assert!(arg.validate().is_ok());
    }

    #[test]
    fn test_optional_toggles_min_count() {
        let arg = ArgumentSpec::new("A").with_counts(3, 5).with_optional(true);
        assert_eq!((arg.min_count(), arg.max_count()), (0, 5));
        let arg = arg.with_optional(false);
        assert_eq!((arg.min_count(), arg.max_count()), (1, 5));
    }

    #[test]
    fn test_count_errors_are_recorded() {
        let err = ArgumentSpec::new("A").with_count(0).validate().unwrap_err();
        assert_eq!(err.to_string(), "Argument's count must be greater than 0.");
        let err = ArgumentSpec::new("A").with_counts(0, 0).validate().unwrap_err();
        assert_eq!(err.to_string(), "Argument's max count must be greater than 0.");
        let err = ArgumentSpec::new("A").with_counts(3, 2).validate().unwrap_err();
        assert_eq!(err.to_string(), "Argument's max count cannot be less than its min count.");
    }

    #[test]
    fn test_empty_name_is_rejected() {
        assert_eq!(ArgumentSpec::new("").validate(), Err(ConfigError::NoArgumentName));
    }
}
