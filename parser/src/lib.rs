//! Declarative command-line argument parsing.
//!
//! This crate provides:
//! - [`ArgumentParser`] - declares the grammar and parses command lines
//! - [`ArgumentSpec`], [`OptionSpec`], [`CommandSpec`] - builders for
//!   positional arguments, flags and subcommands
//! - [`ParsedArguments`] - the parsed values of one command level
//! - [`ArgumentValue`], [`ArgumentValues`] - typed access to stored values
//! - [`ArgumentIterator`] - step-by-step parsing
//! - [`ParserConfig`] - parser settings loaded from YAML or JSON
//!
//! Help text (`-h`/`--help`) is generated from the declarations and wrapped
//! to the terminal width by [`argos_text`]. Parse errors are written with a
//! usage synopsis and, unless disabled, end the process.
//!
//! # Example
//!
//! ```
//! use argos::{ArgumentParser, ArgumentSpec, OptionSpec, Output, ParserResultCode, SharedBuffer};
//!
//! let buffer = SharedBuffer::new();
//! let parser = ArgumentParser::new("resize")
//!     .with_auto_exit(false)
//!     .with_output(Output::Buffer(buffer.clone()))
//!     .add_argument(ArgumentSpec::new("IMAGE").with_help("The image to resize."))
//!     .add_option(
//!         OptionSpec::new(["-s", "--size"])
//!             .with_argument("W,H")
//!             .with_help("The new size."),
//!     );
//!
//! let args = parser.parse(["--size", "640,480", "cat.png"]).unwrap();
//! assert_eq!(args.result_code(), ParserResultCode::Success);
//! let size = args.value("--size").unwrap().split(',', 2, 2).unwrap().as_u32s(&[]).unwrap();
//! assert_eq!(size, [640, 480]);
//! assert!(!args.value("-h").unwrap().as_bool(false));
//!
//! let args = parser.parse(["--bogus"]).unwrap();
//! assert_eq!(args.result_code(), ParserResultCode::Failure);
//! assert!(buffer.contents().starts_with("resize: Unknown option: --bogus\n"));
//! ```

mod argument;
mod callbacks;
mod command;
mod counter;
mod data;
mod error;
mod help;
mod ids;
mod index;
mod iterator;
mod option;
mod parsed;
mod parser;
mod settings;
mod store;
mod tokens;
mod types;
mod validate;
mod value;
mod view;

pub use argos_text::{Output, SharedBuffer};
pub use argument::ArgumentSpec;
pub use callbacks::{ArgumentCallback, ArgumentCallbackArgs, OptionCallback, OptionCallbackArgs};
pub use command::CommandSpec;
pub use error::{ArgosError, ConfigError, Result};
pub use iterator::{ArgumentIterator, IteratorItem};
pub use option::OptionSpec;
pub use parsed::{ParsedArguments, ParsedArgumentsBuilder};
pub use parser::ArgumentParser;
pub use settings::{ExitPolicy, HelpSettings, ParserConfig, ParserSettings};
pub use types::{
    ArgumentId, Callback, HelpText, OptionOperation, OptionStyle, OptionType, ParserResultCode,
    TextId, ValueId, Visibility,
};
pub use value::{ArgumentValue, ArgumentValues};
pub use view::{ArgumentView, CommandView, ItemView, OptionView};
