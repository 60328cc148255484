//! The process's error-reporting slot.
//!
//! Instead of patching a global, the application owns an [`ErrorSlot`] and
//! threads it to whoever reports errors. [`Terminal::setup`] swaps the
//! terminal in and keeps the previous sink as a backup;
//! [`Terminal::teardown`] swaps it back. Only one backup exists at a time.
//!
//! [`Terminal::setup`]: crate::terminal::Terminal::setup
//! [`Terminal::teardown`]: crate::terminal::Terminal::teardown

use std::fmt;

use crate::payload::Payload;

/// Anything that can receive error reports.
pub type ErrorSink = Box<dyn FnMut(Payload) + Send>;

pub struct ErrorSlot {
    current: Option<ErrorSink>,
    backup: Option<ErrorSink>,
}

impl ErrorSlot {
    pub fn new(sink: ErrorSink) -> Self {
        Self {
            current: Some(sink),
            backup: None,
        }
    }

    /// A slot whose sink prints to standard error.
    pub fn stderr() -> Self {
        Self::new(Box::new(|data: Payload| {
            eprintln!("{}", data.structured_text());
        }))
    }

    /// A slot with no sink at all.
    pub fn empty() -> Self {
        Self {
            current: None,
            backup: None,
        }
    }

    pub fn has_sink(&self) -> bool {
        self.current.is_some()
    }

    /// Whether the original sink is currently parked in the backup.
    pub fn is_patched(&self) -> bool {
        self.backup.is_some()
    }

    /// Hand `data` to the current sink. Returns `false` when there is none.
    pub fn report(&mut self, data: impl Into<Payload>) -> bool {
        match self.current.as_mut() {
            Some(sink) => {
                sink(data.into());
                true
            }
            None => false,
        }
    }

    /// Park the current sink and install `sink`. Refused while a backup is
    /// held or when there is nothing to park.
    pub(crate) fn patch(&mut self, sink: ErrorSink) -> bool {
        if self.backup.is_some() || self.current.is_none() {
            return false;
        }
        self.backup = self.current.replace(sink);
        true
    }

    pub(crate) fn restore(&mut self) -> bool {
        match self.backup.take() {
            Some(original) => {
                self.current = Some(original);
                true
            }
            None => false,
        }
    }
}

impl Default for ErrorSlot {
    fn default() -> Self {
        Self::stderr()
    }
}

impl fmt::Debug for ErrorSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorSlot")
            .field("has_sink", &self.has_sink())
            .field("is_patched", &self.is_patched())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    fn recording() -> (Arc<Mutex<Vec<String>>>, ErrorSink) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink_seen = Arc::clone(&seen);
        let sink: ErrorSink = Box::new(move |data: Payload| {
            sink_seen.lock().push(data.display_text());
        });
        (seen, sink)
    }

    #[test]
    fn report_reaches_current_sink() {
        let (seen, sink) = recording();
        let mut slot = ErrorSlot::new(sink);
        assert!(slot.report("first"));
        assert_eq!(*seen.lock(), vec!["first".to_string()]);
    }

    #[test]
    fn empty_slot_reports_nothing() {
        let mut slot = ErrorSlot::empty();
        assert!(!slot.has_sink());
        assert!(!slot.report("lost"));
    }

    #[test]
    fn patch_and_restore() {
        let (original, sink) = recording();
        let (patched, replacement) = recording();
        let mut slot = ErrorSlot::new(sink);

        assert!(slot.patch(replacement));
        assert!(slot.is_patched());
        slot.report("while patched");

        let (_, another) = recording();
        assert!(!slot.patch(another));

        assert!(slot.restore());
        assert!(!slot.restore());
        slot.report("after restore");

        assert_eq!(*patched.lock(), vec!["while patched".to_string()]);
        assert_eq!(*original.lock(), vec!["after restore".to_string()]);
    }
}
