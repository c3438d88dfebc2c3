use crate::{CoreResult, IconKind};

/// Side-effecting sink that puts overlay windows on screen.
///
/// Implementations hold no decision logic. [`Indicator`](crate::Indicator)
/// decides when to call them and guarantees at most one live handle.
pub trait OverlayDisplay {
    /// Owned handle to a displayed overlay. Dropping it must not leak
    /// the window, but [`dismiss`](Self::dismiss) is always called first.
    type Handle;

    /// Open an overlay showing the icon for `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`IndicatorError::Display`](crate::IndicatorError::Display)
    /// if the icon cannot be loaded or the window cannot be created.
    fn display(&mut self, kind: IconKind) -> CoreResult<Self::Handle>;

    /// Close an overlay previously returned by [`display`](Self::display).
    fn dismiss(&mut self, handle: Self::Handle);
}
