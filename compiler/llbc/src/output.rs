//! Diagnostic text writer.
//!
//! Line-buffered UTF-8 output over an adopted stream, normally stdout.
//! `write` emits text as is; `print` appends a newline, which also flushes
//! the line.

use std::io::{self, LineWriter, Stdout, Write};

pub struct Output<W: Write> {
    inner: LineWriter<W>,
}

impl Output<Stdout> {
    /// Adopt the process's standard output.
    pub fn stdout() -> Self {
        Output::new(io::stdout())
    }
}

impl<W: Write> Output<W> {
    pub fn new(stream: W) -> Self {
        Output {
            inner: LineWriter::new(stream),
        }
    }

    /// Write `text` without a trailing newline.
    pub fn write(&mut self, text: &str) -> io::Result<()> {
        self.inner.write_all(text.as_bytes())
    }

    /// Write `text` followed by a newline.
    pub fn print(&mut self, text: &str) -> io::Result<()> {
        self.write(text)?;
        self.inner.write_all(b"\n")
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }

    /// Flush and hand back the underlying stream.
    pub fn into_inner(self) -> io::Result<W> {
        self.inner.into_inner().map_err(io::IntoInnerError::into_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn captured(f: impl FnOnce(&mut Output<Vec<u8>>) -> io::Result<()>) -> String {
        let mut out = Output::new(Vec::new());
        if let Err(e) = f(&mut out) {
            panic!("write failed: {e}");
        }
        match out.into_inner() {
            Ok(bytes) => String::from_utf8(bytes).unwrap_or_else(|e| panic!("{e}")),
            Err(e) => panic!("flush failed: {e}"),
        }
    }

    #[test]
    fn test_print_appends_newline() {
        let text = captured(|out| {
            out.print("first")?;
            out.print("second")
        });
        assert_eq!(text, "first\nsecond\n");
    }

    #[test]
    fn test_write_has_no_newline() {
        let text = captured(|out| {
            out.write("a")?;
            out.write("b")?;
            out.print("c")
        });
        assert_eq!(text, "abc\n");
    }

    #[test]
    fn test_unicode_passes_through() {
        let text = captured(|out| out.print("Привет, 世界"));
        assert_eq!(text, "Привет, 世界\n");
    }

    #[test]
    fn test_partial_line_is_flushed_on_into_inner() {
        let text = captured(|out| out.write("no newline"));
        assert_eq!(text, "no newline");
    }
}
