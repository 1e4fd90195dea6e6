//! Single-line buffer that places text at column offsets.

use argos_core::count_code_points;
use tracing::warn;

use crate::Output;

/// Column width used when nothing else is configured.
pub const DEFAULT_LINE_WIDTH: usize = 80;

const TAB_SIZE: usize = 4;

/// Buffers one output line at a time.
///
/// Widths are measured in code points. Pending spaces and indentation are
/// only materialized when the next piece of text is written, so trailing
/// whitespace never reaches the output.
#[derive(Debug, Clone)]
pub struct TextWriter {
    output: Output,
    line: String,
    line_width: usize,
    current_line_width: usize,
    indent: usize,
    spaces: usize,
}

impl TextWriter {
    pub fn new(line_width: usize) -> Self {
        Self {
            output: Output::Stdout,
            line: String::new(),
            line_width,
            current_line_width: 0,
            indent: 0,
            spaces: 0,
        }
    }

    pub fn output(&self) -> &Output {
        &self.output
    }

    pub fn set_output(&mut self, output: Output) {
        self.output = output;
    }

    pub fn indentation(&self) -> usize {
        self.indent
    }

    /// Sets the indentation for following writes. Rejected when it would
    /// leave no room on the line.
    pub fn set_indentation(&mut self, indent: usize) -> bool {
        if indent >= self.line_width {
            return false;
        }
        self.indent = indent;
        true
    }

    /// Appends `text` after the pending spaces and indentation.
    ///
    /// Returns `false` without writing anything if `text` does not fit on the
    /// rest of the line and `force` is not set.
    pub fn write(&mut self, text: &str, force: bool) -> bool {
        let width = self.current_width();
        let remaining = width.max(self.line_width) - width;
        let text_width = count_code_points(text);
        if !force && text_width > remaining {
            return false;
        }
        self.line
            .extend(std::iter::repeat_n(' ', width - self.current_line_width));
        self.spaces = 0;
        self.line.push_str(text);
        self.current_line_width = width + text_width;
        true
    }

    pub fn newline(&mut self) {
        self.line.push('\n');
        self.current_line_width = 0;
        self.flush();
    }

    /// Sends the buffered text to the output.
    pub fn flush(&mut self) {
        if self.line.is_empty() {
            return;
        }
        if let Err(e) = self.output.write_str(&self.line) {
            warn!(output = ?self.output, error = %e, "Failed to write text");
        }
        self.line.clear();
    }

    /// Advances the pending position to the next tab stop.
    pub fn tab(&mut self) {
        self.spaces += TAB_SIZE - self.current_width() % TAB_SIZE;
    }

    pub fn spaces(&self) -> usize {
        self.spaces
    }

    pub fn set_spaces(&mut self, n: usize) {
        self.spaces = n;
    }

    /// Column where the next write would start.
    pub fn current_width(&self) -> usize {
        self.current_line_width.max(self.indent) + self.spaces
    }

    pub fn remaining_width(&self) -> usize {
        self.line_width - self.current_width().min(self.line_width)
    }

    pub fn is_current_line_empty(&self) -> bool {
        self.line.is_empty()
    }

    pub fn line_width(&self) -> usize {
        self.line_width
    }

    pub fn set_line_width(&mut self, width: usize) {
        self.line_width = width;
    }

    pub fn current_line(&self) -> &str {
        &self.line
    }
}
