//! Error types for parser configuration and parsing.
//!
//! Configuration errors describe a grammar that cannot be parsed with and are
//! reported when the parser is finished, before any token is consumed. Parse
//! errors have already been written to the error output together with the
//! usage synopsis by the time they reach the caller.

use thiserror::Error;

/// A grammar declaration that cannot be used.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A flag is malformed for the active option style.
    #[error("Invalid flag: '{0}'.")]
    InvalidFlag(String),

    /// A flag ends with `=` but the option has no argument.
    #[error("Options ending with '=' must take an argument: {0}")]
    FlagWithoutArgument(String),

    #[error("Option cannot have both argument and constant.")]
    ArgumentAndConstant,

    #[error("NONE-options cannot have a constant.")]
    NoneWithConstant,

    #[error("NONE-options cannot have an alias.")]
    NoneWithAlias,

    #[error("Options that appends must have either constant or argument.")]
    AppendWithoutValue,

    #[error("CLEAR-options must be optional.")]
    MandatoryClear,

    #[error("Option must have one or more flags.")]
    NoFlags,

    #[error("Argument must have a name.")]
    NoArgumentName,

    #[error("Command must have a name.")]
    NoCommandName,

    /// The same flag was declared twice in one command.
    #[error("Multiple definitions of flag {0}")]
    DuplicateFlag(String),

    /// Two flags are equal under the active case rule.
    #[error("Conflicting flags: {0} and {1}")]
    ConflictingFlags(String, String),

    #[error("require_command is true, but no commands have been added.")]
    RequireCommandWithoutCommands,

    #[error("Can't change option style after options have been added.")]
    OptionStyleChanged,

    /// Occurrence counts that violate `max >= min` and `max > 0`.
    #[error("{0}")]
    InvalidCount(String),

    #[error("Command {0} has both arguments and subcommands.")]
    ArgumentsAndCommands(String),

    /// A custom text was set twice while merging commands.
    #[error("Multiple definitions of text {0:?}")]
    DuplicateText(crate::TextId),
}

/// Errors returned by the parser and by parsed-value accessors.
#[derive(Debug, Error)]
pub enum ArgosError {
    /// The grammar is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Help text layout failure.
    #[error("text layout error: {0}")]
    Text(#[from] argos_text::TextError),

    /// File I/O failure while loading or saving configuration.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parsing or serialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A name that no argument or option of the command uses.
    #[error("Unknown value: {0}")]
    UnknownValue(String),

    /// A single value was requested but several were stored.
    #[error("Attempt to read multiple values as a single value.")]
    MultipleValues,

    /// A stored value could not be converted. The message has been written to
    /// the error output.
    #[error("{0}")]
    InvalidValue(String),

    /// A callback reported an error through its builder.
    #[error("{0}")]
    Callback(String),
}

/// Convenience alias for results with [`ArgosError`].
pub type Result<T> = std::result::Result<T, ArgosError>;
