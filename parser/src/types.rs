//! Enumerations and small value types shared by the declaration and parsing
//! layers.

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// Identifies a value slot in the parsed-arguments store.
///
/// Arguments and options that share a name, alias or flag share a value id,
/// so writes through one of them are visible through the others. The zero id
/// is used for options that never store anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ValueId(pub u32);

/// Identifies a single declared argument, option or command.
///
/// Argument ids are unique across the whole command tree. The zero id means
/// "no particular declaration", e.g. for values assigned from a callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ArgumentId(pub u32);

impl ValueId {
    pub fn is_none(self) -> bool {
        self.0 == 0
    }
}

impl ArgumentId {
    pub fn is_none(self) -> bool {
        self.0 == 0
    }
}

/// How option flags are written on the command line.
///
/// # Examples
///
/// ```
/// use argos::OptionStyle;
///
/// assert_eq!(OptionStyle::default(), OptionStyle::Standard);
/// assert_eq!(OptionStyle::Slash.prefix(), '/');
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OptionStyle {
    /// `-a`, `-abc` (clustered short flags), `--long` and `--long=value`.
    #[default]
    Standard,
    /// `/flag` and `/flag=value`.
    Slash,
    /// `-flag` and `-flag=value`, no clustering.
    Dash,
}

impl OptionStyle {
    /// The character every flag in this style starts with.
    pub fn prefix(self) -> char {
        match self {
            OptionStyle::Slash => '/',
            OptionStyle::Standard | OptionStyle::Dash => '-',
        }
    }
}

/// What an option does to its value slot when it is encountered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OptionOperation {
    /// Nothing is stored. Useful for options that only trigger callbacks.
    None,
    /// Replace any previous value.
    #[default]
    Assign,
    /// Add a value after the previous ones.
    Append,
    /// Remove all values.
    Clear,
}

/// Special behavior an option triggers after its operation is performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OptionType {
    #[default]
    Normal,
    /// Writes the help text and stops parsing like [`OptionType::Exit`].
    Help,
    /// Stops parsing. Remaining tokens become unprocessed arguments.
    Stop,
    /// Stops parsing and exits the process when auto-exit is enabled.
    Exit,
    /// Stops parsing after checking that all required arguments were given.
    LastArgument,
    /// Every following token is treated as an argument.
    LastOption,
}

impl OptionType {
    /// Options of these types get their own line in the usage synopsis.
    pub(crate) fn is_stop(self) -> bool {
        matches!(self, OptionType::Help | OptionType::Stop | OptionType::Exit)
    }
}

/// Overall outcome of a parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParserResultCode {
    /// Parsing has not finished yet.
    #[default]
    None,
    Success,
    /// A stop, exit or help option was encountered.
    Stop,
    Failure,
}

/// Custom text blocks in the help output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TextId {
    /// Text written before the usage section.
    InitialText,
    /// Replaces the "USAGE" heading.
    UsageTitle,
    /// Replaces the generated usage synopsis. An empty text removes it.
    Usage,
    /// Text written between the usage synopsis and the argument sections.
    About,
    /// Replaces the "COMMANDS" heading.
    CommandsTitle,
    /// Replaces the "ARGUMENTS" heading.
    ArgumentsTitle,
    /// Replaces the "OPTIONS" heading.
    OptionsTitle,
    /// Text written after everything else.
    FinalText,
    /// Replaces the usage synopsis that follows error messages.
    ErrorUsage,
}

/// Where an argument, option or command is listed in the help output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Visibility {
    Hidden,
    /// Only in the usage synopsis.
    Usage,
    /// Only in the argument sections.
    Text,
    /// Both in the synopsis and the argument sections.
    #[default]
    Normal,
}

impl Visibility {
    pub fn in_usage(self) -> bool {
        matches!(self, Visibility::Usage | Visibility::Normal)
    }

    pub fn in_text(self) -> bool {
        matches!(self, Visibility::Text | Visibility::Normal)
    }
}

/// A reference-counted closure that can be stored in cloneable specs.
pub struct Callback<F: ?Sized>(pub(crate) Rc<F>);

impl<F: ?Sized> Clone for Callback<F> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<F: ?Sized> fmt::Debug for Callback<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Callback")
    }
}

/// Help text given either as a string or as a closure evaluated when the
/// help text is written.
///
/// # Examples
///
/// ```
/// use argos::HelpText;
///
/// let fixed = HelpText::from("Input file.");
/// let lazy = HelpText::dynamic(|| format!("{} files", 3));
/// assert_eq!(fixed.text(), "Input file.");
/// assert_eq!(lazy.text(), "3 files");
/// ```
#[derive(Debug, Clone)]
pub enum HelpText {
    Static(String),
    Dynamic(Callback<dyn Fn() -> String>),
}

impl HelpText {
    pub fn dynamic(f: impl Fn() -> String + 'static) -> Self {
        HelpText::Dynamic(Callback(Rc::new(f)))
    }

    /// Evaluates the text.
    pub fn text(&self) -> String {
        match self {
            HelpText::Static(s) => s.clone(),
            HelpText::Dynamic(f) => (f.0)(),
        }
    }
}

impl Default for HelpText {
    fn default() -> Self {
        HelpText::Static(String::new())
    }
}

impl From<&str> for HelpText {
    fn from(s: &str) -> Self {
        HelpText::Static(s.to_string())
    }
}

impl From<String> for HelpText {
    fn from(s: String) -> Self {
        HelpText::Static(s)
    }
}
