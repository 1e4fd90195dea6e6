//! Arguments passed to option and argument callbacks.
//!
//! A callback runs right after its option or argument has been stored. It can
//! read and modify the parsed values through the builder, report an error, or
//! push new tokens that are parsed before the rest of the command line.

use crate::error::Result;
use crate::parsed::ParsedArgumentsBuilder;
use crate::types::Callback;
use crate::view::{ArgumentView, OptionView};

/// What an option callback gets to work with.
///
/// # Examples
///
/// ```
/// use argos::{ArgumentParser, OptionSpec};
///
/// let args = ArgumentParser::new("prog")
///     .with_auto_exit(false)
///     .add_option(OptionSpec::new(["-q"]))
///     .add_option(OptionSpec::new(["--all"]).with_callback(|cb| {
///         cb.builder.assign("-q", "1")?;
///         Ok(())
///     }))
///     .parse(["--all"])
///     .unwrap();
/// assert!(args.value("-q").unwrap().as_bool(false));
/// ```
#[derive(Debug)]
pub struct OptionCallbackArgs {
    pub view: OptionView,
    /// The value taken from the command line. Empty for options that store a
    /// constant.
    pub value: String,
    pub builder: ParsedArgumentsBuilder,
    /// Tokens to parse next.
    pub new_arguments: Vec<String>,
}

/// What an argument callback gets to work with.
#[derive(Debug)]
pub struct ArgumentCallbackArgs {
    pub view: ArgumentView,
    pub value: String,
    pub builder: ParsedArgumentsBuilder,
    /// Tokens to parse next.
    pub new_arguments: Vec<String>,
}

pub type OptionCallback = Callback<dyn Fn(&mut OptionCallbackArgs) -> Result<()>>;

pub type ArgumentCallback = Callback<dyn Fn(&mut ArgumentCallbackArgs) -> Result<()>>;
