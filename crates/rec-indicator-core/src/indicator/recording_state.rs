/// Logical recording state mirrored from the control service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecordingState {
    /// No recording in progress.
    #[default]
    Idle,
    /// Recording is running.
    Recording,
    /// Recording is paused.
    Paused,
}

impl RecordingState {
    /// Whether an overlay should be visible in this state.
    pub fn is_active(self) -> bool {
        !matches!(self, RecordingState::Idle)
    }
}
