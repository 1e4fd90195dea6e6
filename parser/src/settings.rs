//! Parser behavior and help layout settings.
//!
//! The plain fields are serializable so a whole parser setup can be kept in a
//! YAML or JSON file next to the program.
//!
//! # Example YAML
//!
//! ```yaml
//! program_name: deploy
//! version: 2.1.0
//! about: Deploys the current build.
//! settings:
//!   allow_abbreviated_options: true
//!   option_style: Standard
//!   exit:
//!     auto_exit: true
//!     error_code: 2
//!     normal_code: 0
//! help:
//!   line_width: 100
//!   word_split_rules:
//!     - de ploy ment
//! ```

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use argos_text::Output;
use serde::{Deserialize, Serialize};

use crate::callbacks::{ArgumentCallback, OptionCallback};
use crate::error::Result;
use crate::types::OptionStyle;

/// What happens when parsing fails or a help or exit option is encountered.
///
/// With `auto_exit` the process exits with `error_code` after an error and
/// with `normal_code` after a help or exit option. Without it, the outcome is
/// reported through [`ParserResultCode`](crate::ParserResultCode).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExitPolicy {
    pub auto_exit: bool,
    pub error_code: i32,
    pub normal_code: i32,
}

impl Default for ExitPolicy {
    fn default() -> Self {
        Self {
            auto_exit: true,
            error_code: 64,
            normal_code: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserSettings {
    /// Accept unique prefixes of long flags.
    pub allow_abbreviated_options: bool,
    /// Match flags and command names ignoring ASCII case.
    pub case_insensitive: bool,
    /// Add `-h`/`--help` (or the style's equivalent) to every command without
    /// a help option.
    pub generate_help_option: bool,
    pub option_style: OptionStyle,
    /// Store unknown flags as unprocessed arguments instead of failing.
    pub ignore_undefined_options: bool,
    /// Store surplus positional tokens as unprocessed arguments instead of
    /// failing.
    pub ignore_undefined_arguments: bool,
    pub exit: ExitPolicy,
    /// Runs after every argument's own callback.
    #[serde(skip)]
    pub argument_callback: Option<ArgumentCallback>,
    /// Runs after every option's own callback.
    #[serde(skip)]
    pub option_callback: Option<OptionCallback>,
}

impl Default for ParserSettings {
    fn default() -> Self {
        Self {
            allow_abbreviated_options: false,
            case_insensitive: false,
            generate_help_option: true,
            option_style: OptionStyle::Standard,
            ignore_undefined_options: false,
            ignore_undefined_arguments: false,
            exit: ExitPolicy::default(),
            argument_callback: None,
            option_callback: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HelpSettings {
    /// Zero selects the default width of 80.
    pub line_width: usize,
    /// Hyphenation rules such as `"in compre hensi bili ties"`.
    pub word_split_rules: Vec<String>,
    /// Destination of help text and error messages. `None` writes help to
    /// standard output and errors to standard error.
    #[serde(skip)]
    pub output: Option<Output>,
}

/// A complete parser setup without the grammar.
///
/// # Examples
///
/// ```
/// use argos::{ArgumentParser, ParserConfig};
///
/// let config: ParserConfig = serde_yaml::from_str("program_name: tool\nversion: 1.0.0\n").unwrap();
/// let parser = ArgumentParser::default().with_config(config);
/// assert_eq!(parser.program_name(), "tool");
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    pub program_name: String,
    /// Adds a version option when non-empty.
    pub version: String,
    pub about: String,
    pub multi_command: bool,
    pub require_command: Option<bool>,
    pub settings: ParserSettings,
    pub help: HelpSettings,
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

impl ParserConfig {
    /// Loads a configuration file. Files ending in `.json` are read as JSON,
    /// everything else as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`Io`](crate::ArgosError::Io) if the file cannot be read, or
    /// [`Yaml`](crate::ArgosError::Yaml) / [`Json`](crate::ArgosError::Json)
    /// if parsing fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let reader = BufReader::new(File::open(path)?);
        let config = if is_json(path) {
            serde_json::from_reader(reader)?
        } else {
            serde_yaml::from_reader(reader)?
        };
        Ok(config)
    }

    /// Saves the configuration, using the same format rule as
    /// [`load`](Self::load).
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let writer = BufWriter::new(File::create(path)?);
        if is_json(path) {
            serde_json::to_writer_pretty(writer, self)?;
        } else {
            serde_yaml::to_writer(writer, self)?;
        }
        Ok(())
    }
}
