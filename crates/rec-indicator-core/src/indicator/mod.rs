mod display_action;
#[allow(clippy::module_inception)]
mod indicator;
mod notification;
mod overlay_display;
mod record_event;
mod recording_state;
mod transition;

pub use {
    display_action::{DisplayAction, IconKind},
    indicator::Indicator,
    notification::Notification,
    overlay_display::OverlayDisplay,
    record_event::RecordEvent,
    recording_state::RecordingState,
    transition::transition,
};
