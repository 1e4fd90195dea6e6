//! Terminal text layout for argos help output.
//!
//! This crate provides:
//! - [`TextFormatter`] - word wrapping with indentation and list alignment
//! - [`WordSplitter`] - hyphenation rules for words that do not fit
//! - [`TextWriter`] - the single-line buffer underneath the formatter
//! - [`Output`] - destinations for formatted text
//!
//! # Example
//!
//! ```
//! use argos_text::{Output, SharedBuffer, TextFormatter};
//!
//! let buffer = SharedBuffer::new();
//! let mut formatter = TextFormatter::new(Output::Buffer(buffer.clone()), 20).unwrap();
//! formatter.push_indentation(2);
//! formatter.write_words("Wrapped text keeps its indentation.");
//! formatter.flush();
//! assert_eq!(buffer.contents(), "  Wrapped text keeps\n  its indentation.");
//! ```

mod error;
mod formatter;
mod output;
mod splitter;
mod writer;

pub use error::TextError;
pub use formatter::{CURRENT_COLUMN, TextFormatter};
pub use output::{Output, SharedBuffer};
pub use splitter::{WordSplit, WordSplitter};
pub use writer::{DEFAULT_LINE_WIDTH, TextWriter};
