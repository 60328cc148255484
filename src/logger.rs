//! Bridge from the `log` facade to a [`Terminal`].
//!
//! Error records take the fail label, everything else the info label.
//! Records are only rendered after the terminal lock is free, so code that
//! logs must not do so while holding it.

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

use crate::payload::Payload;
use crate::terminal::Terminal;

pub struct TerminalLogger {
    terminal: Terminal,
    level: LevelFilter,
}

impl TerminalLogger {
    pub fn new(terminal: Terminal, level: LevelFilter) -> Self {
        Self { terminal, level }
    }
}

impl Log for TerminalLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let message = record.args().to_string();
        let payload = if record.level() == Level::Error {
            Payload::error(message)
        } else {
            Payload::Text(message)
        };

        if let Err(err) = self.terminal.log(payload) {
            if cfg!(debug_assertions) {
                eprintln!("terminal logger: write failed: {err}");
            }
        }
    }

    fn flush(&self) {}
}

/// Install a [`TerminalLogger`] as the global `log` backend.
pub fn init(terminal: Terminal, level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_boxed_logger(Box::new(TerminalLogger::new(terminal, level)))?;
    log::set_max_level(level);
    Ok(())
}
