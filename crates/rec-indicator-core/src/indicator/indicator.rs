//! Stateful recording indicator.
//!
//! Owns the current [`RecordingState`] and the single live overlay handle,
//! and drives an [`OverlayDisplay`] from the pure [`transition`] table.

use crate::{DisplayAction, Notification, OverlayDisplay, RecordEvent, RecordingState, transition};

use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

/// Recording indicator state machine.
///
/// Must be driven from the thread that owns the UI. Events are applied
/// one at a time in delivery order.
pub struct Indicator<H> {
    state: RecordingState,
    window: Option<H>,
    session_id: Option<Uuid>,
}

impl<H> Indicator<H> {
    /// Create an indicator in the `Idle` state with no overlay.
    pub fn new() -> Self {
        Self {
            state: RecordingState::Idle,
            window: None,
            session_id: None,
        }
    }

    /// Current recording state.
    pub fn state(&self) -> RecordingState {
        self.state
    }

    /// The live overlay handle, if any.
    pub fn window(&self) -> Option<&H> {
        self.window.as_ref()
    }

    /// Mutable access to the live overlay handle, for redraws.
    pub fn window_mut(&mut self) -> Option<&mut H> {
        self.window.as_mut()
    }

    /// Log correlation id of the current recording session.
    pub fn session_id(&self) -> Option<Uuid> {
        self.session_id
    }

    /// Handle one notification from the hand-off queue.
    ///
    /// Never fails: unrecognized kinds are logged and ignored, display
    /// failures are logged and leave the overlay absent.
    #[instrument(skip(self, display), fields(state = ?self.state))]
    pub fn process<D>(&mut self, display: &mut D, notification: &Notification) -> DisplayAction
    where
        D: OverlayDisplay<Handle = H>,
    {
        match notification {
            Notification::RecordState {
                output_state,
                output_active,
            } => match RecordEvent::from_output_state(output_state) {
                Ok(Some(event)) => self.apply(display, event),
                Ok(None) => {
                    debug!(output_state = %output_state, output_active, "Transitional output state");
                    DisplayAction::None
                }
                Err(e) => {
                    warn!(error = %e, "Unrecognized recording event ignored");
                    DisplayAction::None
                }
            },
            Notification::SessionClosed { reason } => {
                warn!(reason = %reason, "Control-service session closed, clearing indicator");
                self.shutdown(display)
            }
        }
    }

    /// Apply a parsed event.
    pub fn apply<D>(&mut self, display: &mut D, event: RecordEvent) -> DisplayAction
    where
        D: OverlayDisplay<Handle = H>,
    {
        let (next, action) = transition(event, self.state);

        if action == DisplayAction::None {
            debug!(state = ?self.state, event = ?event, "Event has no effect in current state");
            return action;
        }

        self.perform(display, action);

        if self.state == RecordingState::Idle {
            self.session_id = Some(Uuid::new_v4());
        }

        info!(
            session_id = ?self.session_id,
            from = ?self.state,
            to = ?next,
            "Recording state changed"
        );

        if next == RecordingState::Idle {
            self.session_id = None;
        }
        self.state = next;

        action
    }

    /// Close any live overlay and return to `Idle`.
    ///
    /// Returns [`DisplayAction::Hide`] if a window was closed.
    pub fn shutdown<D>(&mut self, display: &mut D) -> DisplayAction
    where
        D: OverlayDisplay<Handle = H>,
    {
        let had_window = self.close_window(display);
        self.state = RecordingState::Idle;
        self.session_id = None;

        if had_window {
            DisplayAction::Hide
        } else {
            DisplayAction::None
        }
    }

    fn perform<D>(&mut self, display: &mut D, action: DisplayAction)
    where
        D: OverlayDisplay<Handle = H>,
    {
        match action {
            DisplayAction::None => {}
            DisplayAction::Show(kind) | DisplayAction::Replace(kind) => {
                // Exactly one handle may be live, so the old one always goes first.
                self.close_window(display);
                match display.display(kind) {
                    Ok(handle) => self.window = Some(handle),
                    Err(e) => error!(kind = %kind, error = %e, "Failed to show indicator"),
                }
            }
            DisplayAction::Hide => {
                self.close_window(display);
            }
        }
    }

    fn close_window<D>(&mut self, display: &mut D) -> bool
    where
        D: OverlayDisplay<Handle = H>,
    {
        match self.window.take() {
            Some(handle) => {
                display.dismiss(handle);
                true
            }
            None => false,
        }
    }
}

impl<H> Default for Indicator<H> {
    fn default() -> Self {
        Self::new()
    }
}
