//! Destinations for help text and error messages.

use std::cell::RefCell;
use std::fmt;
use std::io::{self, Write};
use std::rc::Rc;

/// Where formatted text is written.
///
/// Help text goes to standard output and error messages to standard error
/// unless the caller supplies another sink.
#[derive(Clone, Default)]
pub enum Output {
    #[default]
    Stdout,
    Stderr,
    /// In-memory buffer, mostly useful in tests.
    Buffer(SharedBuffer),
    /// Any caller-provided writer.
    Writer(Rc<RefCell<dyn Write>>),
}

impl Output {
    /// Writes `text` to the sink and flushes it.
    pub fn write_str(&self, text: &str) -> io::Result<()> {
        match self {
            Output::Stdout => {
                let mut out = io::stdout().lock();
                out.write_all(text.as_bytes())?;
                out.flush()
            }
            Output::Stderr => {
                let mut err = io::stderr().lock();
                err.write_all(text.as_bytes())?;
                err.flush()
            }
            Output::Buffer(buffer) => buffer.append(text),
            Output::Writer(writer) => {
                let mut writer = writer.borrow_mut();
                writer.write_all(text.as_bytes())?;
                writer.flush()
            }
        }
    }
}

impl fmt::Debug for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Output::Stdout => f.write_str("Stdout"),
            Output::Stderr => f.write_str("Stderr"),
            Output::Buffer(_) => f.write_str("Buffer"),
            Output::Writer(_) => f.write_str("Writer"),
        }
    }
}

/// Cloneable in-memory text sink. Clones share the same contents.
///
/// # Examples
///
/// ```
/// use argos_text::{Output, SharedBuffer};
///
/// let buffer = SharedBuffer::new();
/// Output::Buffer(buffer.clone()).write_str("hello\n").unwrap();
/// assert_eq!(buffer.contents(), "hello\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer(Rc<RefCell<String>>);

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far.
    pub fn contents(&self) -> String {
        self.0.borrow().clone()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    fn append(&self, text: &str) -> io::Result<()> {
        self.0.borrow_mut().push_str(text);
        Ok(())
    }
}

impl From<SharedBuffer> for Output {
    fn from(buffer: SharedBuffer) -> Self {
        Output::Buffer(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_buffer_clones_share_contents() {
        let buffer = SharedBuffer::new();
        let output = Output::from(buffer.clone());
        output.write_str("abc").unwrap();
        output.write_str("def").unwrap();
        assert_eq!(buffer.contents(), "abcdef");
        buffer.clear();
        assert!(buffer.contents().is_empty());
    }

    #[test]
    fn test_writer_output_receives_text() {
        let sink: Rc<RefCell<Vec<u8>>> = Rc::new(RefCell::new(Vec::new()));
        let output = Output::Writer(sink.clone());
        output.write_str("line\n").unwrap();
        assert_eq!(sink.borrow().as_slice(), b"line\n");
    }
}
