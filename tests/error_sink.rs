use parking_lot::Mutex;
use std::sync::Arc;

use tagterm::{Config, ErrorSink, ErrorSlot, MemoryOutput, Payload, Terminal, TerminalError};

/// Slot whose original sink records what it receives.
fn recording_slot() -> (Arc<Mutex<Vec<String>>>, ErrorSlot) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink_seen = Arc::clone(&seen);
    let sink: ErrorSink = Box::new(move |data: Payload| sink_seen.lock().push(data.display_text()));
    (seen, ErrorSlot::new(sink))
}

fn plain_terminal() -> (Terminal, MemoryOutput) {
    let out = MemoryOutput::new();
    let config = Config {
        color: false,
        ..Config::default()
    };
    (Terminal::with_output(config, out.clone()), out)
}

#[test]
fn setup_routes_reports_through_terminal() {
    let (original, mut slot) = recording_slot();
    let (terminal, out) = plain_terminal();

    assert!(terminal.setup(&mut slot).unwrap());
    assert!(slot.is_patched());

    slot.report("Error: boom");
    assert_eq!(out.contents(), " FAIL:  Error: boom\n");
    assert!(original.lock().is_empty());
}

#[test]
fn second_setup_is_refused() {
    let (_, mut slot) = recording_slot();
    let (terminal, out) = plain_terminal();
    let (other, other_out) = plain_terminal();

    assert!(terminal.setup(&mut slot).unwrap());
    assert!(!other.setup(&mut slot).unwrap());

    slot.report("still the first terminal");
    assert!(out.contents().contains("still the first terminal"));
    assert!(other_out.is_empty());
}

#[test]
fn teardown_restores_original_sink() {
    let (original, mut slot) = recording_slot();
    let (terminal, out) = plain_terminal();

    assert!(terminal.setup(&mut slot).unwrap());
    assert!(terminal.teardown(&mut slot));
    assert!(!slot.is_patched());

    slot.report("back home");
    assert_eq!(*original.lock(), vec!["back home".to_string()]);
    assert!(out.is_empty());

    assert!(!terminal.teardown(&mut slot));
}

#[test]
fn setup_after_teardown_works_again() {
    let (_, mut slot) = recording_slot();
    let (terminal, _) = plain_terminal();

    assert!(terminal.setup(&mut slot).unwrap());
    assert!(terminal.teardown(&mut slot));
    assert!(terminal.setup(&mut slot).unwrap());
}

#[test]
fn setup_without_sink_is_fatal() {
    let mut slot = ErrorSlot::empty();
    let (terminal, _) = plain_terminal();

    let err = terminal.setup(&mut slot).unwrap_err();
    assert!(matches!(err, TerminalError::NoErrorSink));
    assert_eq!(err.to_string(), "no error sink installed in the slot");
    assert!(!slot.is_patched());
}

#[test]
fn sink_respects_verbosity() {
    let (_, mut slot) = recording_slot();
    let (terminal, out) = plain_terminal();

    terminal.setup(&mut slot).unwrap();
    terminal.set_verbose(0.0);
    slot.report("Error: swallowed");
    assert!(out.is_empty());
}
