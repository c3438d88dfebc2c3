mod embedded_indicator;

pub use embedded_indicator::EmbeddedIndicator;
