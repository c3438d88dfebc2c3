use crate::{DisplayAction, IconKind, RecordEvent, RecordingState};

/// Compute the next state and the overlay action for an event.
///
/// Events that do not apply to the current state leave it unchanged with
/// [`DisplayAction::None`].
pub fn transition(event: RecordEvent, current: RecordingState) -> (RecordingState, DisplayAction) {
    use RecordEvent as E;
    use RecordingState as S;

    match (current, event) {
        (S::Idle, E::Started) => (S::Recording, DisplayAction::Show(IconKind::Recording)),
        (S::Recording, E::Paused) => (S::Paused, DisplayAction::Replace(IconKind::Paused)),
        (S::Paused, E::Resumed) => (S::Recording, DisplayAction::Replace(IconKind::Recording)),
        (S::Recording | S::Paused, E::Stopped) => (S::Idle, DisplayAction::Hide),
        (state, _) => (state, DisplayAction::None),
    }
}
