//! Overlay windows on top of the `tao` event loop.
//!
//! Borderless, always-on-top, transparent image windows painted through
//! `softbuffer`. Must only be used from the event loop thread.

use crate::{
    UiCommand,
    config::{IconsConfig, OverlayConfig},
    overlay::{OverlayWindow, place, to_buffer_pixels},
};

use rec_indicator_core::{CoreResult, IconKind, IndicatorError, OverlayDisplay};

use std::{panic::Location, path::Path, rc::Rc};

use error_location::ErrorLocation;
use softbuffer::{Context, Surface};
use tao::{
    dpi::{PhysicalPosition, PhysicalSize},
    event_loop::EventLoopWindowTarget,
    window::WindowBuilder,
};
use tracing::{debug, info, instrument};

const WINDOW_TITLE: &str = "Recording Indicator";

/// [`OverlayDisplay`] backed by the running event loop.
///
/// Cheap to build; create one per event loop callback.
///
/// Opacity: `softbuffer` 0.4 presents the buffer as `0RGB` on its desktop
/// backends (X11, Wayland, Win32 and macOS), so the alpha byte is dropped
/// and the configured opacity does not make the window see-through. What
/// remains is the premultiplied colour, that is the icon blended over black
/// at that opacity: transparent icon pixels show black and opaque ones are
/// dimmed (to 80% at the default 0.8). Set `opacity = 1.0` and use icons
/// without transparent regions for an undimmed indicator.
pub struct TaoOverlay<'a> {
    target: &'a EventLoopWindowTarget<UiCommand>,
    icons: &'a IconsConfig,
    overlay: &'a OverlayConfig,
}

impl<'a> TaoOverlay<'a> {
    /// Borrow the event loop target and overlay settings.
    pub fn new(
        target: &'a EventLoopWindowTarget<UiCommand>,
        icons: &'a IconsConfig,
        overlay: &'a OverlayConfig,
    ) -> Self {
        Self {
            target,
            icons,
            overlay,
        }
    }

    fn position_for(&self, icon_size: PhysicalSize<u32>) -> PhysicalPosition<i32> {
        let monitor = self
            .target
            .primary_monitor()
            .or_else(|| self.target.available_monitors().next());

        match monitor {
            Some(monitor) => place(
                monitor.position(),
                monitor.size(),
                icon_size,
                self.overlay.corner,
                self.overlay.margin,
            ),
            None => {
                debug!("No monitor reported, placing overlay at origin");
                PhysicalPosition::new(0, 0)
            }
        }
    }
}

impl OverlayDisplay for TaoOverlay<'_> {
    type Handle = OverlayWindow;

    #[instrument(skip(self))]
    fn display(&mut self, kind: IconKind) -> CoreResult<OverlayWindow> {
        let path = self.icons.path_for(kind);

        let image = image::open(path)
            .map_err(|e| display_error(path, format!("Failed to load icon: {}", e)))?
            .into_rgba8();

        let size = PhysicalSize::new(image.width(), image.height());
        let position = self.position_for(size);

        let window = WindowBuilder::new()
            .with_title(WINDOW_TITLE)
            .with_decorations(false)
            .with_always_on_top(true)
            .with_transparent(true)
            .with_resizable(false)
            .with_focused(false)
            .with_inner_size(size)
            .with_position(position)
            .build(self.target)
            .map_err(|e| display_error(path, format!("Failed to create window: {}", e)))?;
        let window = Rc::new(window);

        let context = Context::new(Rc::clone(&window))
            .map_err(|e| display_error(path, format!("Failed to create surface context: {}", e)))?;
        let surface = Surface::new(&context, Rc::clone(&window))
            .map_err(|e| display_error(path, format!("Failed to create surface: {}", e)))?;

        let pixels = to_buffer_pixels(&image, self.overlay.opacity);
        let overlay_window = OverlayWindow::new(window, surface, pixels, size, kind);
        overlay_window.request_redraw();

        info!(
            kind = %kind,
            path = ?path,
            x = position.x,
            y = position.y,
            "Indicator shown"
        );

        Ok(overlay_window)
    }

    fn dismiss(&mut self, handle: OverlayWindow) {
        let kind = handle.kind();
        drop(handle);
        info!(kind = %kind, "Indicator hidden");
    }
}

#[track_caller]
fn display_error(path: &Path, reason: String) -> IndicatorError {
    IndicatorError::Display {
        path: path.to_path_buf(),
        reason,
        location: ErrorLocation::from(Location::caller()),
    }
}
