use std::fmt;

/// Which icon an active overlay shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconKind {
    /// Recording in progress.
    Recording,
    /// Recording paused.
    Paused,
}

impl fmt::Display for IconKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IconKind::Recording => f.write_str("recording"),
            IconKind::Paused => f.write_str("paused"),
        }
    }
}

/// Overlay side effect produced by a state transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayAction {
    /// Nothing to do.
    None,
    /// Open the overlay with the given icon.
    Show(IconKind),
    /// Close the current overlay and open one with the given icon.
    Replace(IconKind),
    /// Close the current overlay.
    Hide,
}
