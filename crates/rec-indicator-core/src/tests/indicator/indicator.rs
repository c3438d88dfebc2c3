use crate::{
    DisplayAction, IconKind, Indicator, Notification, RecordEvent, RecordingState,
    tests::indicator::{FakeDisplay, FakeWindow},
};

use std::{
    io,
    sync::{Arc, Mutex},
};

const STARTED: &str = "OBS_WEBSOCKET_OUTPUT_STARTED";
const PAUSED: &str = "OBS_WEBSOCKET_OUTPUT_PAUSED";
const RESUMED: &str = "OBS_WEBSOCKET_OUTPUT_RESUMED";
const STOPPED: &str = "OBS_WEBSOCKET_OUTPUT_STOPPED";

fn feed(
    indicator: &mut Indicator<FakeWindow>,
    display: &mut FakeDisplay,
    output_states: &[&str],
) {
    for state in output_states {
        indicator.process(display, &Notification::record_state(*state, true));
    }
}

fn assert_window_invariant(indicator: &Indicator<FakeWindow>, display: &FakeDisplay) {
    assert_eq!(
        indicator.window().is_some(),
        indicator.state() != RecordingState::Idle,
        "window present iff state is not Idle"
    );
    assert_eq!(
        display.live.len(),
        usize::from(indicator.window().is_some()),
        "exactly the indicator's window is live"
    );
}

/// WHAT: A single Started shows the recording icon
/// WHY: Basic show path
#[test]
#[allow(clippy::unwrap_used)]
fn given_idle_when_started_then_recording_with_one_recording_window() {
    // Given: A fresh indicator
    let mut display = FakeDisplay::default();
    let mut indicator = Indicator::new();

    // When: Recording starts
    feed(&mut indicator, &mut display, &[STARTED]);

    // Then: One window shows the recording icon
    assert_eq!(indicator.state(), RecordingState::Recording);
    assert_eq!(indicator.window().unwrap().kind, IconKind::Recording);
    assert_eq!(display.live.len(), 1);
    assert!(indicator.session_id().is_some());
}

/// WHAT: Pausing swaps the icon and closes the previous window
/// WHY: Only one overlay may be visible
#[test]
#[allow(clippy::unwrap_used)]
fn given_recording_when_paused_then_single_paused_window() {
    // Given: A recording indicator
    let mut display = FakeDisplay::default();
    let mut indicator = Indicator::new();
    feed(&mut indicator, &mut display, &[STARTED]);
    let session_id = indicator.session_id();

    // When: Recording pauses
    feed(&mut indicator, &mut display, &[PAUSED]);

    // Then: Exactly one window, showing the paused icon
    assert_eq!(indicator.state(), RecordingState::Paused);
    assert_eq!(indicator.window().unwrap().kind, IconKind::Paused);
    assert_eq!(display.live.len(), 1);
    assert_eq!(display.dismissed, 1);
    assert_eq!(indicator.session_id(), session_id);
}

/// WHAT: Full round trip ends Idle with nothing leaked
/// WHY: Resume must close the paused window before reopening
#[test]
fn given_full_cycle_when_processed_then_idle_with_no_leaked_windows() {
    // Given: A fresh indicator
    let mut display = FakeDisplay::default();
    let mut indicator = Indicator::new();

    // When: Start, pause, resume, stop
    feed(
        &mut indicator,
        &mut display,
        &[STARTED, PAUSED, RESUMED, STOPPED],
    );

    // Then: Idle, no window, icons shown in order, every window dismissed
    assert_eq!(indicator.state(), RecordingState::Idle);
    assert!(indicator.window().is_none());
    assert!(display.live.is_empty());
    assert_eq!(
        display.shown,
        vec![IconKind::Recording, IconKind::Paused, IconKind::Recording]
    );
    assert_eq!(display.dismissed, 3);
    assert!(indicator.session_id().is_none());
}

/// WHAT: Pause without a prior start is a no-op
/// WHY: Events for a recording we never saw must not open a window
#[test]
fn given_idle_when_paused_then_stays_idle_without_window() {
    let mut display = FakeDisplay::default();
    let mut indicator = Indicator::new();

    feed(&mut indicator, &mut display, &[PAUSED]);

    assert_eq!(indicator.state(), RecordingState::Idle);
    assert!(indicator.window().is_none());
    assert!(display.shown.is_empty());
}

/// WHAT: A repeated Started does not open a second window
/// WHY: Idempotence of the start notification
#[test]
#[allow(clippy::unwrap_used)]
fn given_recording_when_started_again_then_window_unchanged() {
    // Given: A recording indicator
    let mut display = FakeDisplay::default();
    let mut indicator = Indicator::new();
    feed(&mut indicator, &mut display, &[STARTED]);
    let window_id = indicator.window().unwrap().id;

    // When: Started arrives again
    let action = indicator.apply(&mut display, RecordEvent::Started);

    // Then: Nothing happened
    assert_eq!(action, DisplayAction::None);
    assert_eq!(indicator.state(), RecordingState::Recording);
    assert_eq!(indicator.window().unwrap().id, window_id);
    assert_eq!(display.live.len(), 1);
    assert_eq!(display.shown.len(), 1);
}

/// WHAT: The window invariant holds after every event of every short sequence
/// WHY: Any ordering of notifications must leave display and state in sync
#[test]
fn given_all_event_sequences_when_processed_then_window_invariant_holds() {
    let events = [STARTED, PAUSED, RESUMED, STOPPED];
    let max_len = 5;

    let mut sequences: Vec<Vec<&str>> = vec![Vec::new()];
    for _ in 0..max_len {
        let mut longer = Vec::new();
        for sequence in &sequences {
            for event in events {
                let mut next = sequence.clone();
                next.push(event);
                longer.push(next);
            }
        }

        for sequence in &longer {
            let mut display = FakeDisplay::default();
            let mut indicator = Indicator::new();
            for state in sequence {
                feed(&mut indicator, &mut display, &[*state]);
                assert_window_invariant(&indicator, &display);
            }
        }

        sequences = longer;
    }
}

/// WHAT: An unknown kind changes nothing and logs exactly one entry
/// WHY: Malformed notifications are reported but never fatal
#[test]
#[allow(clippy::unwrap_used)]
fn given_unrecognized_kind_when_processed_then_unchanged_and_logged_once() {
    // Given: A recording indicator and a captured log
    let mut display = FakeDisplay::default();
    let mut indicator = Indicator::new();
    feed(&mut indicator, &mut display, &[STARTED]);
    let window_id = indicator.window().unwrap().id;

    let buffer = Arc::new(Mutex::new(Vec::new()));
    let writer = {
        let buffer = Arc::clone(&buffer);
        move || CaptureWriter(Arc::clone(&buffer))
    };
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .with_writer(writer)
        .finish();

    // When: An unknown kind arrives
    let action = tracing::subscriber::with_default(subscriber, || {
        indicator.process(
            &mut display,
            &Notification::record_state("OBS_WEBSOCKET_OUTPUT_EXPLODED", true),
        )
    });

    // Then: No effect, and one warning naming the kind
    assert_eq!(action, DisplayAction::None);
    assert_eq!(indicator.state(), RecordingState::Recording);
    assert_eq!(indicator.window().unwrap().id, window_id);
    assert_eq!(display.live.len(), 1);

    let output = String::from_utf8(buffer.lock().unwrap().clone()).unwrap();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 1, "log output: {}", output);
    assert!(lines[0].contains("WARN"));
    assert!(lines[0].contains("OBS_WEBSOCKET_OUTPUT_EXPLODED"));
}

/// WHAT: Transitional states are accepted silently
/// WHY: Starting/stopping always precede a real transition
#[test]
fn given_starting_state_when_processed_then_no_action() {
    let mut display = FakeDisplay::default();
    let mut indicator = Indicator::new();

    let action = indicator.process(
        &mut display,
        &Notification::record_state("OBS_WEBSOCKET_OUTPUT_STARTING", false),
    );

    assert_eq!(action, DisplayAction::None);
    assert_eq!(indicator.state(), RecordingState::Idle);
}

/// WHAT: A missing icon leaves the overlay absent but the state advances
/// WHY: Display failures are non-fatal and state mirrors the recorder
#[test]
#[allow(clippy::unwrap_used)]
fn given_missing_recording_icon_when_started_then_recording_without_window() {
    // Given: A display that cannot load the recording icon
    let mut display = FakeDisplay::failing_for(IconKind::Recording);
    let mut indicator = Indicator::new();

    // When: Recording starts and then pauses
    feed(&mut indicator, &mut display, &[STARTED]);
    assert_eq!(indicator.state(), RecordingState::Recording);
    assert!(indicator.window().is_none());

    feed(&mut indicator, &mut display, &[PAUSED]);

    // Then: The paused icon still shows
    assert_eq!(indicator.state(), RecordingState::Paused);
    assert_eq!(indicator.window().unwrap().kind, IconKind::Paused);
    assert_eq!(display.live.len(), 1);
}

/// WHAT: Session loss clears a live overlay
/// WHY: A stale recording icon must not outlive its event source
#[test]
fn given_paused_when_session_closed_then_idle_and_window_closed() {
    let mut display = FakeDisplay::default();
    let mut indicator = Indicator::new();
    feed(&mut indicator, &mut display, &[STARTED, PAUSED]);

    let action = indicator.process(
        &mut display,
        &Notification::SessionClosed {
            reason: "Server closed the session".to_string(),
        },
    );

    assert_eq!(action, DisplayAction::Hide);
    assert_eq!(indicator.state(), RecordingState::Idle);
    assert!(display.live.is_empty());
}

/// WHAT: Shutdown on an idle indicator is a no-op
/// WHY: Process exit calls shutdown unconditionally
#[test]
fn given_idle_when_shutdown_then_no_action() {
    let mut display = FakeDisplay::default();
    let mut indicator: Indicator<FakeWindow> = Indicator::default();

    assert_eq!(indicator.shutdown(&mut display), DisplayAction::None);
    assert_eq!(display.dismissed, 0);
}

struct CaptureWriter(Arc<Mutex<Vec<u8>>>);

impl io::Write for CaptureWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let Ok(mut buffer) = self.0.lock() {
            buffer.extend_from_slice(buf);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
