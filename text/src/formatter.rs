//! Word wrapping on top of [`TextWriter`] and [`WordSplitter`].
//!
//! Text is written either as running prose ([`TextFormatter::write_words`]),
//! which is wrapped at whitespace, or as preformatted lines
//! ([`TextFormatter::write_lines`]), where each line is kept together if at
//! all possible.
//!
//! Running prose supports hanging indentation. Whitespace at the start of a
//! line, or after a list marker (`-`, `*` or `1.`), fixes the column where
//! the wrapped continuation lines of that paragraph start:
//!
//! ```
//! use argos_text::{Output, SharedBuffer, TextFormatter};
//!
//! let buffer = SharedBuffer::new();
//! let mut formatter = TextFormatter::new(Output::Buffer(buffer.clone()), 17).unwrap();
//! formatter.write_words("- Abcdef ghijk lmn");
//! formatter.flush();
//! assert_eq!(buffer.contents(), "- Abcdef ghijk\n  lmn");
//! ```

use crate::{DEFAULT_LINE_WIDTH, Output, TextError, TextWriter, WordSplitter};

/// Pass to [`TextFormatter::push_indentation`] to indent at the column where
/// the next text would be written.
pub const CURRENT_COLUMN: usize = usize::MAX;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Alignment {
    None,
    Aligned,
    UnalignedMarker,
    AlignedMarker,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Tab,
    Newline,
    Spaces,
    Word,
}

fn next_token(text: &str) -> (Token, &str, &str) {
    let bytes = text.as_bytes();
    match bytes[0] {
        b'\t' => (Token::Tab, &text[..1], &text[1..]),
        b'\r' if bytes.get(1) == Some(&b'\n') => (Token::Newline, &text[..2], &text[2..]),
        b'\r' | b'\n' => (Token::Newline, &text[..1], &text[1..]),
        b' ' => {
            let n = text.find(|c| c != ' ').unwrap_or(text.len());
            (Token::Spaces, &text[..n], &text[n..])
        }
        _ => {
            let n = text.find(['\t', '\r', '\n', ' ']).unwrap_or(text.len());
            (Token::Word, &text[..n], &text[n..])
        }
    }
}

fn next_line(text: &str) -> (&str, &str) {
    match text.find(['\n', '\r']) {
        None => (text, ""),
        Some(pos) if text[pos..].starts_with("\r\n") => (&text[..pos], &text[pos + 2..]),
        Some(pos) => (&text[..pos], &text[pos + 1..]),
    }
}

fn is_list_marker(s: &str) -> bool {
    match s {
        "-" | "*" => true,
        _ => s.len() > 1 && s.ends_with('.') && s[..s.len() - 1].bytes().all(|c| c.is_ascii_digit()),
    }
}

/// Wraps text to a fixed line width.
#[derive(Debug, Clone)]
pub struct TextFormatter {
    writer: TextWriter,
    splitter: WordSplitter,
    indents: Vec<usize>,
    alignment: Alignment,
}

impl TextFormatter {
    /// Creates a formatter writing to `output`. A `line_width` of zero selects
    /// [`DEFAULT_LINE_WIDTH`].
    ///
    /// # Errors
    ///
    /// Returns [`TextError::LineWidthTooSmall`] for widths of 1 or 2.
    pub fn new(output: Output, line_width: usize) -> Result<Self, TextError> {
        let line_width = if line_width == 0 {
            DEFAULT_LINE_WIDTH
        } else {
            line_width
        };
        if line_width <= 2 {
            return Err(TextError::LineWidthTooSmall(line_width));
        }
        let mut writer = TextWriter::new(line_width);
        writer.set_output(output);
        Ok(Self {
            writer,
            splitter: WordSplitter::new(),
            indents: vec![0],
            alignment: Alignment::None,
        })
    }

    pub fn word_splitter(&mut self) -> &mut WordSplitter {
        &mut self.splitter
    }

    pub fn set_word_splitter(&mut self, splitter: WordSplitter) {
        self.splitter = splitter;
    }

    pub fn output(&self) -> &Output {
        self.writer.output()
    }

    pub fn set_output(&mut self, output: Output) {
        self.writer.set_output(output);
    }

    pub fn line_width(&self) -> usize {
        self.writer.line_width()
    }

    pub fn set_line_width(&mut self, line_width: usize) -> Result<(), TextError> {
        if line_width <= 2 {
            return Err(TextError::LineWidthTooSmall(line_width));
        }
        self.writer.set_line_width(line_width);
        Ok(())
    }

    pub fn current_line_width(&self) -> usize {
        self.writer.current_width()
    }

    pub fn is_current_line_empty(&self) -> bool {
        self.writer.is_current_line_empty()
    }

    /// Pushes a new indentation level. [`CURRENT_COLUMN`] indents at the
    /// column where the next text would start, absorbing pending spaces.
    pub fn push_indentation(&mut self, indent: usize) {
        let indent = if indent == CURRENT_COLUMN {
            let column = self.writer.current_width();
            self.writer.set_spaces(0);
            column
        } else {
            indent
        };
        self.indents.push(indent);
        self.writer.set_indentation(indent);
    }

    /// Restores the previous indentation level.
    ///
    /// # Errors
    ///
    /// Returns [`TextError::NoIndentation`] when only the base level is left.
    pub fn pop_indentation(&mut self) -> Result<(), TextError> {
        if self.indents.len() == 1 {
            return Err(TextError::NoIndentation);
        }
        self.indents.pop();
        self.writer.set_indentation(self.indents[self.indents.len() - 1]);
        Ok(())
    }

    /// Writes running text, wrapping at whitespace and splitting words that
    /// cannot fit on a line of their own.
    pub fn write_words(&mut self, text: &str) {
        let mut text = text;
        while !text.is_empty() {
            let (token, value, rest) = next_token(text);
            match token {
                Token::Tab => {
                    self.writer.tab();
                    self.begin_alignment();
                }
                Token::Newline => {
                    self.end_alignment();
                    self.newline();
                }
                Token::Spaces => {
                    self.writer.set_spaces(value.len());
                    self.begin_alignment();
                }
                Token::Word => {
                    self.update_alignment(value);
                    self.append_word(value);
                }
            }
            text = rest;
        }
        self.end_alignment();
    }

    /// Writes preformatted text. Each line is kept whole unless it is longer
    /// than the line width.
    pub fn write_lines(&mut self, text: &str) {
        let mut remainder = text;
        while !remainder.is_empty() {
            let (line, rest) = next_line(remainder);
            if !line.is_empty() {
                self.append_word(line);
            }
            if !rest.is_empty() {
                self.newline();
            }
            remainder = rest;
        }
        if text.ends_with(['\n', '\r']) {
            self.newline();
        }
    }

    pub fn newline(&mut self) {
        self.writer.newline();
        self.writer.set_spaces(0);
    }

    pub fn flush(&mut self) {
        self.writer.flush();
    }

    fn append_word(&mut self, word: &str) {
        let mut remainder = word;
        while !self.writer.write(remainder, false) {
            let width = self.writer.remaining_width();
            let (head, separator, rest) = self.splitter.split(
                word,
                word.len() - remainder.len(),
                width,
                self.writer.is_current_line_empty(),
            );
            if !head.is_empty() {
                self.writer.write(head, false);
                if let Some(sep) = separator {
                    self.writer.write(sep.encode_utf8(&mut [0; 4]), false);
                }
                self.newline();
                remainder = rest;
            } else if self.writer.is_current_line_empty() {
                if self.writer.spaces() != 0 {
                    self.writer.set_spaces(0);
                } else {
                    self.writer.write(remainder, true);
                    return;
                }
            } else {
                self.newline();
            }
        }
    }

    fn begin_alignment(&mut self) {
        match self.alignment {
            _ if self.writer.is_current_line_empty()
                || self.alignment == Alignment::UnalignedMarker =>
            {
                self.push_indentation(CURRENT_COLUMN);
                self.alignment = Alignment::Aligned;
            }
            Alignment::AlignedMarker => {
                self.pop_alignment_level();
                self.push_indentation(CURRENT_COLUMN);
                self.alignment = Alignment::Aligned;
            }
            _ => {}
        }
    }

    fn update_alignment(&mut self, token: &str) {
        if self.writer.is_current_line_empty() && is_list_marker(token) {
            self.alignment = if self.alignment == Alignment::Aligned {
                Alignment::AlignedMarker
            } else {
                Alignment::UnalignedMarker
            };
        }
    }

    fn end_alignment(&mut self) {
        if matches!(self.alignment, Alignment::Aligned | Alignment::AlignedMarker) {
            self.pop_alignment_level();
            self.alignment = Alignment::None;
        }
    }

    // Alignment levels are always pushed by `begin_alignment`, so the base
    // level is never removed here.
    fn pop_alignment_level(&mut self) {
        if self.indents.len() > 1 {
            self.indents.pop();
            self.writer.set_indentation(self.indents[self.indents.len() - 1]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SharedBuffer;

    fn formatter(width: usize) -> (TextFormatter, SharedBuffer) {
        let buffer = SharedBuffer::new();
        let formatter = TextFormatter::new(Output::Buffer(buffer.clone()), width).unwrap();
        (formatter, buffer)
    }

    const LOREM: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit.";

    #[test]
    fn test_basic_wrapping() {
        let (mut f, buffer) = formatter(40);
        f.write_words(LOREM);
        f.flush();
        assert_eq!(buffer.contents(), "Lorem ipsum dolor sit amet, consectetur\nadipiscing elit.");
    }

    #[test]
    fn test_wrapping_with_indentation() {
        let (mut f, buffer) = formatter(40);
        f.write_words(LOREM);
        f.push_indentation(17);
        f.write_words(LOREM);
        f.pop_indentation().unwrap();
        f.write_words(" ");
        f.write_words(LOREM);
        f.flush();
        assert_eq!(
            buffer.contents(),
            "Lorem ipsum dolor sit amet, consectetur\n\
             adipiscing elit. Lorem ipsum dolor sit\n                 \
             amet, consectetur\n                 \
             adipiscing elit. Lorem\n\
             ipsum dolor sit amet, consectetur\n\
             adipiscing elit."
        );
    }

    #[test]
    fn test_text_with_newlines() {
        let (mut f, buffer) = formatter(40);
        f.write_words("Lorem ipsum dolor\nsit amet, consectetur\nadipiscing elit.");
        f.flush();
        assert_eq!(buffer.contents(), "Lorem ipsum dolor\nsit amet, consectetur\nadipiscing elit.");
    }

    #[test]
    fn test_indentation_change_pads_to_column() {
        let (mut f, buffer) = formatter(40);
        f.write_words("ABCDEFGHIJ");
        f.push_indentation(20);
        f.write_words("ABCDEFGHIJ");
        f.flush();
        assert_eq!(buffer.contents(), "ABCDEFGHIJ          ABCDEFGHIJ");

        let (mut f, buffer) = formatter(40);
        f.write_lines("ABCDEFGHIJ");
        f.push_indentation(20);
        f.write_lines("ABCDEFGHIJ");
        f.flush();
        assert_eq!(buffer.contents(), "ABCDEFGHIJ          ABCDEFGHIJ");
    }

    #[test]
    fn test_keeps_whitespace_at_line_start() {
        let (mut f, buffer) = formatter(40);
        f.write_words(" Lorem ipsum dolor\n  sit amet, consectetur\n   adipiscing elit.");
        f.flush();
        assert_eq!(
            buffer.contents(),
            " Lorem ipsum dolor\n  sit amet, consectetur\n   adipiscing elit."
        );
    }

    #[test]
    fn test_preformatted_text_across_lines() {
        let (mut f, buffer) = formatter(30);
        f.push_indentation(5);
        for i in 0..5 {
            if i > 0 {
                f.write_words(" ");
            }
            f.write_lines("[abc efg]");
        }
        f.flush();
        assert_eq!(
            buffer.contents(),
            "     [abc efg] [abc efg]\n     [abc efg] [abc efg]\n     [abc efg]"
        );
    }

    #[test]
    fn test_multibyte_characters_count_as_one_column() {
        let (mut f, buffer) = formatter(40);
        f.write_words("Lorem ipsum dålår sit åmet, consøctetur adipiscing elit.");
        f.flush();
        assert_eq!(
            buffer.contents(),
            "Lorem ipsum dålår sit åmet, consøctetur\nadipiscing elit."
        );
    }

    #[test]
    fn test_splitting_word_without_rule() {
        let (mut f, buffer) = formatter(10);
        f.write_words("Brønnøysundsregisteret");
        f.flush();
        assert_eq!(buffer.contents(), "Brønnøysu-\nndsregist-\neret");
    }

    #[test]
    fn test_splitting_word_with_rule() {
        let (mut f, buffer) = formatter(12);
        f.word_splitter().add_word("Brønn øy sunds registeret").unwrap();
        f.write_words("Til Brønnøysundsregisteret");
        f.flush();
        assert_eq!(buffer.contents(), "Til Brønnøy-\nsunds-\nregisteret");
    }

    #[test]
    fn test_leading_spaces_align_continuation_lines() {
        let (mut f, buffer) = formatter(12);
        f.write_words("    Abcd efg hij klm");
        f.flush();
        assert_eq!(buffer.contents(), "    Abcd efg\n    hij klm");
    }

    #[test]
    fn test_list_item_alignment() {
        let (mut f, buffer) = formatter(17);
        f.write_words(
            "My list:\n\
             - Abcdef ghijk lmn\n    \
             * Abcdef ghij\n    \
             * Abcdef ghijk lmn\n\
             - Abcdef ghijk lmn\n\
             1. Abcdef ghijk lmn\n    \
             1. Abcdef ghijk lmn\n\
             Abcdef ghijk lmn opqrst",
        );
        f.flush();
        assert_eq!(
            buffer.contents(),
            "My list:\n\
             - Abcdef ghijk\n  \
             lmn\n    \
             * Abcdef ghij\n    \
             * Abcdef\n      \
             ghijk lmn\n\
             - Abcdef ghijk\n  \
             lmn\n\
             1. Abcdef ghijk\n   \
             lmn\n    \
             1. Abcdef\n       \
             ghijk lmn\n\
             Abcdef ghijk lmn\n\
             opqrst"
        );
    }

    #[test]
    fn test_spaces_before_newline_are_dropped() {
        let (mut f, buffer) = formatter(12);
        f.write_words("abcd \nefgh");
        f.flush();
        assert_eq!(buffer.contents(), "abcd\nefgh");
    }

    #[test]
    fn test_line_width_must_exceed_two() {
        assert_eq!(
            TextFormatter::new(Output::Stdout, 2).unwrap_err(),
            TextError::LineWidthTooSmall(2)
        );
        let (mut f, _) = formatter(0);
        assert_eq!(f.line_width(), DEFAULT_LINE_WIDTH);
        assert!(f.set_line_width(1).is_err());
    }

    #[test]
    fn test_pop_base_indentation_fails() {
        let (mut f, _) = formatter(40);
        assert_eq!(f.pop_indentation(), Err(TextError::NoIndentation));
        f.push_indentation(4);
        assert!(f.pop_indentation().is_ok());
    }
}
