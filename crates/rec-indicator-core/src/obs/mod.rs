mod auth;
mod connection_listener;
mod connection_settings;
pub(crate) mod protocol;

pub use {
    auth::authentication_string,
    connection_listener::{ConnectionListener, HANDOFF_CAPACITY},
    connection_settings::ConnectionSettings,
};
