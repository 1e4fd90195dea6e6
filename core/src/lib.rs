//! Leaf utilities for the argos command-line parser.
//!
//! This crate holds the pieces that do not depend on the grammar model:
//!
//! - String helpers ([`are_equal_ci`], [`is_less_ci`], [`starts_with`],
//!   [`split_string`]) with ASCII-only case folding, used for flag lookup.
//! - UTF-8 aware measuring ([`count_code_points`], [`find_nth_code_point`]),
//!   used by the text formatter to wrap help text.
//! - Number parsing ([`parse_number`], [`ParseNumber`]) for typed value
//!   accessors.
//!
//! # Example
//!
//! ```
//! use argos_core::*;
//!
//! assert!(starts_with("--VERBOSE", "--verb", true));
//! assert_eq!(split_string("1:2:3", ':', usize::MAX), vec!["1", "2", "3"]);
//! assert_eq!(parse_number::<u16>("0x1F"), Ok(31));
//! ```

mod number;
mod strings;

pub use number::{NumberError, ParseNumber, parse_number};
pub use strings::*;
