use error_location::ErrorLocation;
use thiserror::Error;

/// Indicator errors with source location tracking.
#[derive(Error, Debug)]
pub enum IndicatorError {
    /// Failed to establish or keep the control-service session.
    #[error("Connection error: {reason} {location}")]
    Connection {
        /// Description of the connection failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// A frame from the control service could not be understood.
    #[error("Protocol error: {reason} {location}")]
    Protocol {
        /// Description of the malformed frame.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Recording state kind outside the known set.
    #[error("Unrecognized event kind: {kind} {location}")]
    UnrecognizedEvent {
        /// The raw kind as received.
        kind: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Overlay could not be shown.
    #[error("Display error for {path:?}: {reason} {location}")]
    Display {
        /// Icon asset involved.
        path: std::path::PathBuf,
        /// Description of the display failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The hand-off queue has no consumer left.
    #[error("Channel closed: {reason} {location}")]
    ChannelClosed {
        /// Description of the failed hand-off.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Async runtime could not be created or joined.
    #[error("Runtime error: {reason} {location}")]
    Runtime {
        /// Description of the runtime failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

/// Result type alias using [`IndicatorError`].
pub type Result<T> = std::result::Result<T, IndicatorError>;
