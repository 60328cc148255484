//! Where terminal output goes.

use std::io::{self, Write};
use std::sync::Arc;

use crossterm::tty::IsTty;
use parking_lot::Mutex;

/// A byte sink that knows whether a human is watching it.
pub trait Output: Write + Send {
    fn is_tty(&self) -> bool;
}

/// The process's standard output.
#[derive(Debug)]
pub struct StdoutOutput {
    stdout: io::Stdout,
}

impl StdoutOutput {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
        }
    }
}

impl Default for StdoutOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl Write for StdoutOutput {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.stdout.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.stdout.flush()
    }
}

impl Output for StdoutOutput {
    fn is_tty(&self) -> bool {
        self.stdout.is_tty()
    }
}

/// In-memory output. Clones share the same buffer, so a test can hand one
/// copy to the terminal and read back through the other.
#[derive(Debug, Clone, Default)]
pub struct MemoryOutput {
    buf: Arc<Mutex<Vec<u8>>>,
    tty: bool,
}

impl MemoryOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// A buffer that claims to be an interactive terminal.
    pub fn tty() -> Self {
        Self {
            tty: true,
            ..Self::default()
        }
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buf.lock()).into_owned()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.lock().is_empty()
    }

    pub fn reset(&self) {
        self.buf.lock().clear();
    }
}

impl Write for MemoryOutput {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Output for MemoryOutput {
    fn is_tty(&self) -> bool {
        self.tty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_buffer() {
        let out = MemoryOutput::new();
        let mut writer = out.clone();
        write!(writer, "hello").unwrap();
        assert_eq!(out.contents(), "hello");
        assert!(!out.is_tty());

        out.reset();
        assert!(out.is_empty());
    }

    #[test]
    fn tty_flag() {
        assert!(MemoryOutput::tty().is_tty());
    }
}
