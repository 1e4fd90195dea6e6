//! Splitting of raw command-line tokens into flags and values.
//!
//! The standard style separates `--name=value` into `--name=` and `value`,
//! and splits clusters of short flags (`-abc`) into `-a`, `-b` and `-c`. When
//! a flag in a cluster takes a value, the rest of the cluster is the value
//! (`-ofile`). The slash and dash styles only separate `=value` suffixes.

use std::collections::VecDeque;

use tracing::debug;

use crate::types::OptionStyle;

/// How much of the token at the front of the queue has been consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cursor {
    /// Nothing.
    Start,
    /// Up to a byte offset.
    At(usize),
    /// All of it.
    Done,
}

#[derive(Debug, Clone)]
pub(crate) struct TokenIterator {
    args: VecDeque<String>,
    cursor: Cursor,
    style: OptionStyle,
}

impl TokenIterator {
    pub(crate) fn new(args: Vec<String>, style: OptionStyle) -> Self {
        Self {
            args: args.into(),
            cursor: Cursor::Start,
            style,
        }
    }

    /// Returns the next flag or argument.
    pub(crate) fn next(&mut self) -> Option<String> {
        match self.style {
            OptionStyle::Standard => self.next_standard(),
            OptionStyle::Slash => self.next_prefixed('/'),
            OptionStyle::Dash => self.next_prefixed('-'),
        }
    }

    fn next_standard(&mut self) -> Option<String> {
        match self.cursor {
            Cursor::Start => {}
            Cursor::Done => {
                self.args.pop_front();
                self.cursor = Cursor::Start;
            }
            Cursor::At(pos) => {
                let front = self.args.front()?;
                if pos < front.len() && front.as_bytes()[1] != b'-' {
                    let c = front[pos..].chars().next()?;
                    let end = pos + c.len_utf8();
                    self.cursor = if end == front.len() {
                        Cursor::Done
                    } else {
                        Cursor::At(end)
                    };
                    return Some(format!("-{c}"));
                }
                self.args.pop_front();
                self.cursor = Cursor::Start;
            }
        }

        let front = self.args.front()?;
        let mut chars = front.chars();
        let (first, second) = (chars.next(), chars.next());
        if first != Some('-') || chars.next().is_none() {
            self.cursor = Cursor::Done;
            return Some(front.clone());
        }

        if second != Some('-') {
            let end = 1 + second.map_or(0, char::len_utf8);
            self.cursor = Cursor::At(end);
            return Some(front[..end].to_string());
        }

        match front.find('=') {
            None => {
                self.cursor = Cursor::Done;
                Some(front.clone())
            }
            Some(eq) => {
                self.cursor = Cursor::At(eq + 1);
                Some(front[..=eq].to_string())
            }
        }
    }

    fn next_prefixed(&mut self, prefix: char) -> Option<String> {
        if self.cursor != Cursor::Start {
            self.cursor = Cursor::Start;
            self.args.pop_front();
        }

        let front = self.args.front()?;
        if front.chars().count() <= 2 || !front.starts_with(prefix) {
            self.cursor = Cursor::Done;
            return Some(front.clone());
        }

        match front.find('=') {
            None => {
                self.cursor = Cursor::Done;
                Some(front.clone())
            }
            Some(eq) => {
                self.cursor = Cursor::At(eq + 1);
                Some(front[..=eq].to_string())
            }
        }
    }

    /// Returns the value for the most recent flag: the unconsumed part of the
    /// current token if there is one, otherwise the whole next token.
    pub(crate) fn next_value(&mut self) -> Option<String> {
        let front = self.args.front()?;
        match self.cursor {
            Cursor::Start => {
                self.cursor = Cursor::Done;
                Some(front.clone())
            }
            Cursor::At(pos) => {
                let value = front[pos..].to_string();
                self.cursor = Cursor::Done;
                Some(value)
            }
            Cursor::Done => {
                self.args.pop_front();
                match self.args.front() {
                    Some(next) => Some(next.clone()),
                    None => {
                        self.cursor = Cursor::Start;
                        None
                    }
                }
            }
        }
    }

    /// The raw token the most recent flag or value came from.
    pub(crate) fn current(&self) -> Option<&str> {
        self.args.front().map(String::as_str)
    }

    /// Tokens that have not been consumed. An unfinished cluster of short
    /// flags is returned as a new cluster of the remaining flags.
    pub(crate) fn remaining_arguments(&self) -> Vec<String> {
        let mut result = Vec::with_capacity(self.args.len());
        match self.cursor {
            Cursor::Start => return self.args.iter().cloned().collect(),
            Cursor::At(pos) => {
                if let Some(rest) = self.cluster_rest(pos) {
                    result.push(rest);
                }
            }
            Cursor::Done => {}
        }
        result.extend(self.args.iter().skip(1).cloned());
        result
    }

    /// Inserts `tokens` so they are the next ones returned, ahead of the rest
    /// of an unfinished short flag cluster.
    pub(crate) fn insert(&mut self, tokens: Vec<String>) {
        if tokens.is_empty() {
            return;
        }
        debug!(tokens = ?tokens, "Inserting tokens");
        let at = match self.cursor {
            Cursor::Start => 0,
            Cursor::Done => 1.min(self.args.len()),
            Cursor::At(pos) => {
                if let Some(rest) = self.cluster_rest(pos) {
                    self.args[0].truncate(pos);
                    self.args.insert(1, rest);
                    self.cursor = Cursor::Done;
                }
                1
            }
        };
        for (i, token) in tokens.into_iter().enumerate() {
            self.args.insert(at + i, token);
        }
    }

    fn cluster_rest(&self, pos: usize) -> Option<String> {
        let front = self.args.front()?;
        let is_cluster = self.style == OptionStyle::Standard && front.as_bytes().get(1) != Some(&b'-');
        (is_cluster && pos < front.len()).then(|| format!("-{}", &front[pos..]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standard(args: &[&str]) -> TokenIterator {
        TokenIterator::new(args.iter().map(|s| s.to_string()).collect(), OptionStyle::Standard)
    }

    fn prefixed(args: &[&str], style: OptionStyle) -> TokenIterator {
        TokenIterator::new(args.iter().map(|s| s.to_string()).collect(), style)
    }

    #[test]
    fn test_short_and_long_flags() {
        let mut it = standard(&["-a", "--bcd", "--ef=gh", "ij"]);
        assert_eq!(it.next().as_deref(), Some("-a"));
        assert_eq!(it.next().as_deref(), Some("--bcd"));
        assert_eq!(it.next().as_deref(), Some("--ef="));
        assert_eq!(it.next_value().as_deref(), Some("gh"));
        assert_eq!(it.next().as_deref(), Some("ij"));
        assert_eq!(it.next(), None);
    }

    #[test]
    fn test_clustered_short_flags() {
        let mut it = standard(&["-abc", "x"]);
        assert_eq!(it.next().as_deref(), Some("-a"));
        assert_eq!(it.next().as_deref(), Some("-b"));
        assert_eq!(it.next().as_deref(), Some("-c"));
        assert_eq!(it.next().as_deref(), Some("x"));
        assert_eq!(it.next(), None);
    }

    #[test]
    fn test_value_attached_to_short_flag() {
        let mut it = standard(&["-n15", "-n", "12"]);
        assert_eq!(it.next().as_deref(), Some("-n"));
        assert_eq!(it.next_value().as_deref(), Some("15"));
        assert_eq!(it.next().as_deref(), Some("-n"));
        assert_eq!(it.next_value().as_deref(), Some("12"));
        assert_eq!(it.next(), None);
    }

    #[test]
    fn test_value_after_last_flag_in_cluster() {
        let mut it = standard(&["-ab", "value"]);
        assert_eq!(it.next().as_deref(), Some("-a"));
        assert_eq!(it.next().as_deref(), Some("-b"));
        assert_eq!(it.next_value().as_deref(), Some("value"));
        assert_eq!(it.next(), None);
    }

    #[test]
    fn test_empty_value_after_equal_sign() {
        let mut it = standard(&["--file=", "x"]);
        assert_eq!(it.next().as_deref(), Some("--file="));
        assert_eq!(it.next_value().as_deref(), Some(""));
        assert_eq!(it.next().as_deref(), Some("x"));
    }

    #[test]
    fn test_next_value_without_more_tokens() {
        let mut it = standard(&["-a"]);
        assert_eq!(it.next().as_deref(), Some("-a"));
        assert_eq!(it.next_value(), None);
        assert_eq!(it.next(), None);
    }

    #[test]
    fn test_single_dash_and_double_dash() {
        let mut it = standard(&["-", "--", "-x"]);
        assert_eq!(it.next().as_deref(), Some("-"));
        assert_eq!(it.next().as_deref(), Some("--"));
        assert_eq!(it.next_value().as_deref(), Some("-x"));
        assert_eq!(it.next_value(), None);
    }

    #[test]
    fn test_current_and_remaining() {
        let mut it = standard(&["-abc", "d", "e"]);
        assert_eq!(it.remaining_arguments(), vec!["-abc", "d", "e"]);
        it.next();
        assert_eq!(it.current(), Some("-abc"));
        assert_eq!(it.remaining_arguments(), vec!["-bc", "d", "e"]);
        it.next();
        it.next();
        assert_eq!(it.remaining_arguments(), vec!["d", "e"]);
        it.next();
        assert_eq!(it.current(), Some("d"));
        assert_eq!(it.remaining_arguments(), vec!["e"]);
    }

    #[test]
    fn test_insert_before_rest_of_cluster() {
        let mut it = standard(&["-aC", "x"]);
        assert_eq!(it.next().as_deref(), Some("-a"));
        it.insert(vec!["-bcd".to_string()]);
        let rest: Vec<_> = std::iter::from_fn(|| it.next()).collect();
        assert_eq!(rest, vec!["-b", "-c", "-d", "-C", "x"]);
    }

    #[test]
    fn test_insert_after_whole_token() {
        let mut it = standard(&["--go", "x"]);
        assert_eq!(it.next().as_deref(), Some("--go"));
        it.insert(vec!["y".to_string(), "z".to_string()]);
        assert_eq!(it.remaining_arguments(), vec!["y", "z", "x"]);
        let rest: Vec<_> = std::iter::from_fn(|| it.next()).collect();
        assert_eq!(rest, vec!["y", "z", "x"]);
    }

    #[test]
    fn test_slash_options() {
        let mut it = prefixed(&["/a", "/bc=d", "/ef", "g"], OptionStyle::Slash);
        assert_eq!(it.next().as_deref(), Some("/a"));
        assert_eq!(it.next().as_deref(), Some("/bc="));
        assert_eq!(it.next_value().as_deref(), Some("d"));
        assert_eq!(it.next().as_deref(), Some("/ef"));
        assert_eq!(it.next_value().as_deref(), Some("g"));
        assert_eq!(it.next(), None);
    }

    #[test]
    fn test_dash_options_are_not_clustered() {
        let mut it = prefixed(&["-abc", "-number=4"], OptionStyle::Dash);
        assert_eq!(it.next().as_deref(), Some("-abc"));
        assert_eq!(it.next().as_deref(), Some("-number="));
        assert_eq!(it.next_value().as_deref(), Some("4"));
        assert_eq!(it.next(), None);
    }

    #[test]
    fn test_prefixed_remaining() {
        let mut it = prefixed(&["/a=1", "b"], OptionStyle::Slash);
        it.next();
        assert_eq!(it.remaining_arguments(), vec!["b"]);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut it = standard(&["-ab", "c"]);
        it.next();
        let mut copy = it.clone();
        assert_eq!(copy.next().as_deref(), Some("-b"));
        assert_eq!(copy.next().as_deref(), Some("c"));
        assert_eq!(it.next().as_deref(), Some("-b"));
    }
}
