use crate::{CoreResult, IndicatorError};

use std::panic::Location;

use error_location::ErrorLocation;

const OUTPUT_STARTING: &str = "OBS_WEBSOCKET_OUTPUT_STARTING";
const OUTPUT_STARTED: &str = "OBS_WEBSOCKET_OUTPUT_STARTED";
const OUTPUT_PAUSED: &str = "OBS_WEBSOCKET_OUTPUT_PAUSED";
const OUTPUT_RESUMED: &str = "OBS_WEBSOCKET_OUTPUT_RESUMED";
const OUTPUT_STOPPING: &str = "OBS_WEBSOCKET_OUTPUT_STOPPING";
const OUTPUT_STOPPED: &str = "OBS_WEBSOCKET_OUTPUT_STOPPED";

/// Recording state change reported by the control service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordEvent {
    /// Recording started.
    Started,
    /// Recording paused.
    Paused,
    /// Recording resumed after a pause.
    Resumed,
    /// Recording stopped.
    Stopped,
}

impl RecordEvent {
    /// Parse an `outputState` value.
    ///
    /// Returns `Ok(None)` for the transitional starting/stopping states,
    /// which carry no indicator change of their own.
    ///
    /// # Errors
    ///
    /// Returns [`IndicatorError::UnrecognizedEvent`] for any other value.
    #[track_caller]
    pub fn from_output_state(output_state: &str) -> CoreResult<Option<Self>> {
        match output_state {
            OUTPUT_STARTED => Ok(Some(Self::Started)),
            OUTPUT_PAUSED => Ok(Some(Self::Paused)),
            OUTPUT_RESUMED => Ok(Some(Self::Resumed)),
            OUTPUT_STOPPED => Ok(Some(Self::Stopped)),
            OUTPUT_STARTING | OUTPUT_STOPPING => Ok(None),
            other => Err(IndicatorError::UnrecognizedEvent {
                kind: other.to_string(),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}
