use crate::{AppError, AppResult};

use rec_indicator_core::IconKind;

use std::{num::NonZeroU32, panic::Location, rc::Rc};

use error_location::ErrorLocation;
use softbuffer::Surface;
use tao::{
    dpi::PhysicalSize,
    window::{Window, WindowId},
};

/// A live overlay window with its prepared pixels.
///
/// Dropping it closes the window.
pub struct OverlayWindow {
    window: Rc<Window>,
    surface: Surface<Rc<Window>, Rc<Window>>,
    pixels: Vec<u32>,
    size: PhysicalSize<u32>,
    kind: IconKind,
}

impl OverlayWindow {
    pub(crate) fn new(
        window: Rc<Window>,
        surface: Surface<Rc<Window>, Rc<Window>>,
        pixels: Vec<u32>,
        size: PhysicalSize<u32>,
        kind: IconKind,
    ) -> Self {
        Self {
            window,
            surface,
            pixels,
            size,
            kind,
        }
    }

    /// Window id, for matching redraw events.
    pub fn id(&self) -> WindowId {
        self.window.id()
    }

    /// Icon this window shows.
    pub fn kind(&self) -> IconKind {
        self.kind
    }

    /// Start moving the window with the pointer.
    ///
    /// Must be called while the left button is held.
    #[track_caller]
    pub fn drag(&self) -> AppResult<()> {
        self.window
            .drag_window()
            .map_err(|e| AppError::RenderError {
                reason: format!("Failed to start window drag: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })
    }

    /// Ask the event loop for a redraw.
    pub fn request_redraw(&self) {
        self.window.request_redraw();
    }

    /// Paint the icon.
    #[track_caller]
    pub fn redraw(&mut self) -> AppResult<()> {
        let (Some(width), Some(height)) = (
            NonZeroU32::new(self.size.width),
            NonZeroU32::new(self.size.height),
        ) else {
            return Ok(());
        };

        self.surface
            .resize(width, height)
            .map_err(|e| AppError::RenderError {
                reason: format!("Failed to resize surface: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        let mut buffer = self.surface.buffer_mut().map_err(|e| AppError::RenderError {
            reason: format!("Failed to get surface buffer: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let len = buffer.len().min(self.pixels.len());
        buffer[..len].copy_from_slice(&self.pixels[..len]);

        buffer.present().map_err(|e| AppError::RenderError {
            reason: format!("Failed to present surface: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        Ok(())
    }
}
