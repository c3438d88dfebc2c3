//! OBS WebSocket v5 message shapes used by the listener.
//!
//! Only the handshake and the event frame are modelled; requests and
//! batches are never sent.

use crate::{CoreResult, IndicatorError};

use std::panic::Location;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;

pub(crate) const OP_HELLO: u8 = 0;
pub(crate) const OP_IDENTIFY: u8 = 1;
pub(crate) const OP_IDENTIFIED: u8 = 2;
pub(crate) const OP_EVENT: u8 = 5;

pub(crate) const RPC_VERSION: u32 = 1;

/// `EventSubscription::Outputs`, which carries `RecordStateChanged`.
pub(crate) const EVENT_SUBSCRIPTION_OUTPUTS: u32 = 1 << 6;

pub(crate) const RECORD_STATE_CHANGED: &str = "RecordStateChanged";

#[derive(Debug, Deserialize)]
pub(crate) struct Envelope {
    pub op: u8,
    #[serde(default)]
    pub d: Value,
}

#[derive(Debug, Serialize)]
struct OutgoingEnvelope<'a, T> {
    op: u8,
    d: &'a T,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Hello {
    #[serde(default)]
    pub obs_web_socket_version: Option<String>,
    pub rpc_version: u32,
    #[serde(default)]
    pub authentication: Option<AuthChallenge>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AuthChallenge {
    pub challenge: String,
    pub salt: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Identify {
    pub rpc_version: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authentication: Option<String>,
    pub event_subscriptions: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Identified {
    pub negotiated_rpc_version: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EventFrame {
    pub event_type: String,
    #[serde(default)]
    pub event_data: Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RecordStateChanged {
    pub output_active: bool,
    pub output_state: String,
    #[serde(default)]
    pub output_path: Option<String>,
}

/// Parse a text frame into its opcode envelope.
#[track_caller]
pub(crate) fn decode(text: &str) -> CoreResult<Envelope> {
    serde_json::from_str(text).map_err(|e| IndicatorError::Protocol {
        reason: format!("Malformed frame: {}", e),
        location: ErrorLocation::from(Location::caller()),
    })
}

/// Deserialize the `d` payload of an envelope, or an event's `eventData`.
#[track_caller]
pub(crate) fn decode_payload<T: DeserializeOwned>(payload: Value) -> CoreResult<T> {
    serde_json::from_value(payload).map_err(|e| IndicatorError::Protocol {
        reason: format!("Malformed payload: {}", e),
        location: ErrorLocation::from(Location::caller()),
    })
}

/// Serialize a payload with its opcode.
#[track_caller]
pub(crate) fn encode<T: Serialize>(op: u8, payload: &T) -> CoreResult<String> {
    serde_json::to_string(&OutgoingEnvelope { op, d: payload }).map_err(|e| {
        IndicatorError::Protocol {
            reason: format!("Failed to encode op {}: {}", op, e),
            location: ErrorLocation::from(Location::caller()),
        }
    })
}
