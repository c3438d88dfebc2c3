use std::fmt;

/// Where and how to reach the control service.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionSettings {
    /// Host name or address.
    pub host: String,
    /// WebSocket port.
    pub port: u16,
    /// Password, required only when the server asks for authentication.
    pub password: Option<String>,
}

impl ConnectionSettings {
    /// WebSocket URL for these settings.
    pub fn url(&self) -> String {
        format!("ws://{}:{}", self.host, self.port)
    }
}

// Keeps the password out of logs.
impl fmt::Debug for ConnectionSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
