//! Line-oriented terminal I/O shared by every menu and flow.
//!
//! Generic over the reader and writer so flows can be scripted in tests.

use crate::core::tui::{self, BoxStyle, ItemStatus};
use std::fmt::Display;
use std::io::{self, BufRead, StdinLock, Stdout, Write};

pub struct Console<R, W> {
    input: R,
    output: W,
}

impl Console<StdinLock<'static>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Next input line with surrounding whitespace removed; `None` at end of input.
    ///
    /// Bytes that are not UTF-8 become U+FFFD, so garbage reads as an
    /// unparseable answer instead of an I/O failure.
    pub fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut buf = Vec::new();
        let n = self.input.read_until(b'\n', &mut buf)?;
        if n == 0 {
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&buf).trim().to_string()))
    }

    /// Print `label` without a newline and read the answer. End of input reads as blank.
    pub fn prompt(&mut self, label: &str) -> io::Result<String> {
        Ok(self.prompt_or_eof(label)?.unwrap_or_default())
    }

    /// Like `prompt`, but reports end of input as `None`.
    pub fn prompt_or_eof(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;
        self.read_line()
    }

    pub fn line(&mut self, text: impl Display) -> io::Result<()> {
        writeln!(self.output, "{}", text)
    }

    pub fn blank(&mut self) -> io::Result<()> {
        writeln!(self.output)
    }

    pub fn status(&mut self, text: &str, status: ItemStatus) -> io::Result<()> {
        tui::write_item(&mut self.output, text, status)
    }

    pub fn section(&mut self, title: &str) -> io::Result<()> {
        tui::write_section(&mut self.output, title)
    }

    pub fn banner(&mut self, title: &str, subtitle: &str, style: BoxStyle) -> io::Result<()> {
        tui::write_box(&mut self.output, title, subtitle, style)
    }

    pub fn into_output(self) -> W {
        self.output
    }
}
