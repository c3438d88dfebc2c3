use crate::config::{default_host, default_port};

use serde::{Deserialize, Serialize};

/// Control-service connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// WebSocket server host.
    #[serde(default = "default_host")]
    pub host: String,
    /// WebSocket server port.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Server password. Omit when authentication is disabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}
