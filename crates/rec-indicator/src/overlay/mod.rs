mod drag;
mod overlay_window;
mod pixels;
mod placement;
mod tao_overlay;

pub(crate) use {
    drag::starts_drag,
    overlay_window::OverlayWindow,
    pixels::to_buffer_pixels,
    placement::{Corner, place},
    tao_overlay::TaoOverlay,
};
