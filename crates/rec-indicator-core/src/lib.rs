//! Rec-indicator Core Library
//!
//! Recording state machine, OBS WebSocket listener, and the host-driven
//! adapter for showing an overlay while a recording is active or paused.
//!
//! # Example
//!
//! ```no_run
//! use rec_indicator_core::{
//!     ConnectionSettings, CoreResult, EmbeddedIndicator, IconKind, OverlayDisplay,
//! };
//!
//! struct Printer;
//!
//! impl OverlayDisplay for Printer {
//!     type Handle = IconKind;
//!
//!     fn display(&mut self, kind: IconKind) -> CoreResult<IconKind> {
//!         println!("showing {}", kind);
//!         Ok(kind)
//!     }
//!
//!     fn dismiss(&mut self, kind: IconKind) {
//!         println!("hiding {}", kind);
//!     }
//! }
//!
//! fn main() -> CoreResult<()> {
//!     let settings = ConnectionSettings {
//!         host: "localhost".to_string(),
//!         port: 4455,
//!         password: None,
//!     };
//!     let mut indicator = EmbeddedIndicator::load(&settings)?;
//!     let mut display = Printer;
//!
//!     for _ in 0..600 {
//!         indicator.tick(&mut display);
//!         std::thread::sleep(std::time::Duration::from_millis(100));
//!     }
//!
//!     indicator.unload(&mut display);
//!     Ok(())
//! }
//! ```

mod embedded;
mod error;
mod indicator;
mod obs;

pub use {
    embedded::EmbeddedIndicator,
    error::IndicatorError,
    error::Result as CoreResult,
    indicator::{
        DisplayAction, IconKind, Indicator, Notification, OverlayDisplay, RecordEvent,
        RecordingState, transition,
    },
    obs::{ConnectionListener, ConnectionSettings, HANDOFF_CAPACITY, authentication_string},
};
