use tao::event::{ElementState, MouseButton};

/// Whether a mouse button change on the overlay should start a window drag.
///
/// Pressing the left button anywhere on the icon picks it up.
pub fn starts_drag(state: ElementState, button: MouseButton) -> bool {
    matches!((state, button), (ElementState::Pressed, MouseButton::Left))
}
