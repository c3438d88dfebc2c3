/// Message carried over the hand-off queue from the connection listener
/// to the thread that owns the overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// Raw `RecordStateChanged` payload.
    RecordState {
        /// `outputState` as sent by the control service.
        output_state: String,
        /// `outputActive` as sent by the control service.
        output_active: bool,
    },
    /// The control-service session ended after startup.
    SessionClosed {
        /// Why the session ended.
        reason: String,
    },
}

impl Notification {
    /// Build a record state notification from an `outputState` value.
    pub fn record_state(output_state: impl Into<String>, output_active: bool) -> Self {
        Notification::RecordState {
            output_state: output_state.into(),
            output_active,
        }
    }
}
