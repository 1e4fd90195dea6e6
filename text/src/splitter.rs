//! Hyphenation rules for words that do not fit on a line.
//!
//! A rule is the word written with spaces at the permitted break points, e.g.
//! `"compre hen sive"`. Breaking inserts a hyphen unless the character before
//! the break already is one. Rules match case-insensitively and ignore
//! trailing punctuation. Words without a rule are broken by
//! [`WordSplitter::default_rule`] when the caller insists.

use std::collections::HashMap;

use argos_core::{count_code_points, find_nth_code_point};

use crate::TextError;

const TRAILING_PUNCTUATION: &[char] = &[
    '.', ',', ';', ':', '!', '?', '(', ')', '[', ']', '{', '}', '<', '>', '"', '\'', '`',
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Split {
    index: usize,
    separator: Option<char>,
}

/// The first part of a split word, the separator to print after it, and the
/// rest of the word.
pub type WordSplit<'a> = (&'a str, Option<char>, &'a str);

#[derive(Debug, Clone, Default)]
pub struct WordSplitter {
    splits: HashMap<String, Vec<Split>>,
}

impl WordSplitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a split rule.
    ///
    /// # Errors
    ///
    /// Returns [`TextError::InvalidSplitRule`] if the rule starts with a
    /// space or has two consecutive spaces.
    ///
    /// # Examples
    ///
    /// ```
    /// use argos_text::WordSplitter;
    ///
    /// let mut splitter = WordSplitter::new();
    /// splitter.add_word("multi- tasking").unwrap();
    /// assert_eq!(
    ///     splitter.split("multitasking", 0, 8, false),
    ///     ("multi-", None, "tasking")
    /// );
    /// assert!(splitter.add_word(" bad").is_err());
    /// ```
    pub fn add_word(&mut self, rule: &str) -> Result<(), TextError> {
        let bytes = rule.as_bytes();
        let mut splits = Vec::new();
        for (offset, (pos, _)) in rule.match_indices(' ').enumerate() {
            if pos == 0 || bytes[pos - 1] == b' ' {
                return Err(TextError::InvalidSplitRule(rule.to_string()));
            }
            let separator = (bytes[pos - 1] != b'-').then_some('-');
            splits.push(Split {
                index: pos - offset,
                separator,
            });
        }
        let word: String = rule.chars().filter(|&c| c != ' ').collect();
        splits.push(Split {
            index: word.len(),
            separator: None,
        });
        self.splits.insert(word.to_ascii_lowercase(), splits);
        Ok(())
    }

    pub fn add_words<I, S>(&mut self, rules: I) -> Result<(), TextError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for rule in rules {
            self.add_word(rule.as_ref())?;
        }
        Ok(())
    }

    /// Splits `word[start..]` so the first part, separator included, is at
    /// most `max_length` code points wide.
    ///
    /// A registered rule is tried first. Without one, the default rule is
    /// applied only if `must_split` is set; otherwise the first part is empty
    /// and the whole word is returned as the remainder.
    pub fn split<'a>(
        &self,
        word: &'a str,
        start: usize,
        max_length: usize,
        must_split: bool,
    ) -> WordSplit<'a> {
        let key = word.trim_end_matches(TRAILING_PUNCTUATION);
        let rule = if argos_core::is_lower(key) {
            self.splits.get(key)
        } else {
            self.splits.get(&key.to_ascii_lowercase())
        };

        if let Some(splits) = rule {
            let mut prev = Split {
                index: start,
                separator: None,
            };
            let mut length = 0;
            for &split in splits {
                if split.index < start + 1 {
                    continue;
                }
                let Some(part) = word.get(prev.index..split.index) else {
                    break;
                };
                length += count_code_points(part);
                if length + usize::from(split.separator.is_some()) > max_length {
                    break;
                }
                prev = split;
            }
            if prev.index > start + 1 {
                return (&word[start..prev.index], prev.separator, &word[prev.index..]);
            }
        }

        if must_split {
            return Self::default_rule(&word[start..], max_length);
        }
        ("", None, word)
    }

    /// Breaks `word` near `max_length` code points without a registered rule.
    ///
    /// Prefers a boundary between alphanumeric and other characters (no
    /// hyphen) or between digits and non-digits (hyphen) in the last two
    /// thirds of the available width. Falls back to a hyphenated hard break.
    /// Multi-byte characters are never divided.
    pub fn default_rule(word: &str, max_length: usize) -> WordSplit<'_> {
        if max_length <= 2 {
            return ("", None, word);
        }
        let Some(end) = find_nth_code_point(word, max_length) else {
            return (word, None, "");
        };
        let bytes = word.as_bytes();
        let max_pos = prev_boundary(word, end);

        let min_pos = (max_length + 2) / 3;
        let mut index = max_pos;
        let mut count = max_length - 1;
        while count > min_pos {
            count -= 1;
            index = prev_boundary(word, index);
            let (before, after) = (bytes[index - 1], bytes[index]);
            if !before.is_ascii() || !after.is_ascii() {
                continue;
            }
            if before.is_ascii_alphanumeric() != after.is_ascii_alphanumeric() {
                return (&word[..index], None, &word[index..]);
            }
            if before.is_ascii_digit() != after.is_ascii_digit() {
                return (&word[..index], Some('-'), &word[index..]);
            }
        }
        (&word[..max_pos], Some('-'), &word[max_pos..])
    }
}

/// Start of the character preceding byte offset `index`.
fn prev_boundary(word: &str, index: usize) -> usize {
    let mut i = index - 1;
    while !word.is_char_boundary(i) {
        i -= 1;
    }
    i
}
