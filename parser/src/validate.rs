//! Validation of option declarations against the active option style.
//!
//! Runs once per option when the parser is finished, so the checks always use
//! the final option style regardless of the order of builder calls.

use crate::error::ConfigError;
use crate::option::OptionSpec;
use crate::types::{OptionOperation, OptionStyle};

type Result<T> = std::result::Result<T, ConfigError>;

fn has_whitespace(flag: &str) -> bool {
    flag.contains([' ', '\t', '\n', '\r'])
}

/// A `=` is only allowed as the last character, and then the option must
/// take an argument.
fn check_flag_with_equal(flag: &str, option: &OptionSpec) -> Result<bool> {
    match flag.find('=') {
        None => Ok(true),
        Some(pos) if pos != flag.len() - 1 => Ok(false),
        Some(_) if option.argument.is_empty() => {
            Err(ConfigError::FlagWithoutArgument(flag.to_string()))
        }
        Some(_) => Ok(true),
    }
}

fn check_standard_flag(flag: &str, option: &OptionSpec) -> Result<bool> {
    let bytes = flag.as_bytes();
    if has_whitespace(flag) || bytes.len() < 2 || bytes[0] != b'-' {
        return Ok(false);
    }
    if bytes.len() == 2 {
        return Ok(true);
    }
    if bytes[1] != b'-' {
        return Ok(false);
    }
    check_flag_with_equal(flag, option)
}

fn check_prefixed_flag(flag: &str, prefix: char, option: &OptionSpec) -> Result<bool> {
    if flag.len() < 2 || !flag.starts_with(prefix) || has_whitespace(flag) {
        return Ok(false);
    }
    if flag.len() == 2 {
        return Ok(true);
    }
    check_flag_with_equal(flag, option)
}

/// Checks `option` and fills in the implicit constants.
///
/// Assigning options without argument or constant store `"1"`. Clearing
/// options that were given an argument or constant also get `"1"`.
pub(crate) fn validate_option(option: &mut OptionSpec, style: OptionStyle) -> Result<()> {
    if option.flags.is_empty() {
        return Err(ConfigError::NoFlags);
    }

    for flag in &option.flags {
        let ok = match style {
            OptionStyle::Standard => check_standard_flag(flag, option)?,
            OptionStyle::Slash => check_prefixed_flag(flag, '/', option)?,
            OptionStyle::Dash => check_prefixed_flag(flag, '-', option)?,
        };
        if !ok {
            return Err(ConfigError::InvalidFlag(flag.clone()));
        }
    }

    if !option.argument.is_empty() && !option.constant.is_empty() {
        return Err(ConfigError::ArgumentAndConstant);
    }

    match option.operation {
        OptionOperation::None => {
            if !option.constant.is_empty() {
                return Err(ConfigError::NoneWithConstant);
            }
            if !option.alias.is_empty() {
                return Err(ConfigError::NoneWithAlias);
            }
        }
        OptionOperation::Assign => {
            if option.argument.is_empty() && option.constant.is_empty() {
                option.constant = "1".to_string();
            }
        }
        OptionOperation::Append => {
            if option.argument.is_empty() && option.constant.is_empty() {
                return Err(ConfigError::AppendWithoutValue);
            }
        }
        OptionOperation::Clear => {
            if !option.argument.is_empty() || !option.constant.is_empty() {
                option.constant = "1".to_string();
            }
            if !option.optional {
                return Err(ConfigError::MandatoryClear);
            }
        }
    }
    Ok(())
}
