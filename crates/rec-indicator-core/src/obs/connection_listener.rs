//! Control-service session and event subscription.
//!
//! Performs the OBS WebSocket v5 handshake subscribed to output events,
//! then forwards every `RecordStateChanged` notification over the
//! hand-off queue in delivery order.

use crate::{
    ConnectionSettings, CoreResult, IndicatorError, Notification,
    obs::{
        auth::authentication_string,
        protocol::{
            self, EVENT_SUBSCRIPTION_OUTPUTS, Envelope, EventFrame, Hello, Identified, Identify,
            OP_EVENT, OP_HELLO, OP_IDENTIFIED, OP_IDENTIFY, RECORD_STATE_CHANGED, RPC_VERSION,
            RecordStateChanged,
        },
    },
};

use std::panic::Location;

use async_tungstenite::{
    WebSocketStream,
    tokio::{ConnectStream, connect_async},
    tungstenite::{Message, protocol::CloseFrame},
};
use error_location::ErrorLocation;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, instrument, warn};

/// Capacity of the hand-off queue between listener and consumer.
pub const HANDOFF_CAPACITY: usize = 32;

/// An identified session with the control service.
pub struct ConnectionListener {
    stream: WebSocketStream<ConnectStream>,
    negotiated_rpc_version: u32,
}

impl ConnectionListener {
    /// Connect and identify, subscribed to output events.
    ///
    /// # Errors
    ///
    /// Returns [`IndicatorError::Connection`] if the server is unreachable,
    /// closes the session (e.g. authentication failed), or asks for a
    /// password that is not configured. Returns [`IndicatorError::Protocol`]
    /// if the handshake frames are malformed.
    #[instrument(fields(url = %settings.url()))]
    pub async fn connect(settings: &ConnectionSettings) -> CoreResult<Self> {
        let url = settings.url();

        let (mut stream, _) =
            connect_async(url.as_str())
                .await
                .map_err(|e| IndicatorError::Connection {
                    reason: format!("Failed to connect to {}: {}", url, e),
                    location: ErrorLocation::from(Location::caller()),
                })?;

        let hello: Hello = protocol::decode_payload(Self::expect_op(&mut stream, OP_HELLO).await?)?;

        info!(
            obs_web_socket_version = ?hello.obs_web_socket_version,
            rpc_version = hello.rpc_version,
            auth_required = hello.authentication.is_some(),
            "Received Hello"
        );

        let authentication = match &hello.authentication {
            Some(challenge) => {
                let password =
                    settings
                        .password
                        .as_deref()
                        .ok_or_else(|| IndicatorError::Connection {
                            reason: "Server requires authentication but no password is configured"
                                .to_string(),
                            location: ErrorLocation::from(Location::caller()),
                        })?;
                Some(authentication_string(
                    password,
                    &challenge.salt,
                    &challenge.challenge,
                ))
            }
            None => None,
        };

        let identify = Identify {
            rpc_version: RPC_VERSION,
            authentication,
            event_subscriptions: EVENT_SUBSCRIPTION_OUTPUTS,
        };

        stream
            .send(Message::Text(protocol::encode(OP_IDENTIFY, &identify)?))
            .await
            .map_err(|e| IndicatorError::Connection {
                reason: format!("Failed to send Identify: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        let identified: Identified =
            protocol::decode_payload(Self::expect_op(&mut stream, OP_IDENTIFIED).await?)?;

        info!(
            negotiated_rpc_version = identified.negotiated_rpc_version,
            "Connected to control service"
        );

        Ok(Self {
            stream,
            negotiated_rpc_version: identified.negotiated_rpc_version,
        })
    }

    /// RPC version agreed during the handshake.
    pub fn negotiated_rpc_version(&self) -> u32 {
        self.negotiated_rpc_version
    }

    /// Forward notifications until shutdown or session loss.
    ///
    /// On session loss a [`Notification::SessionClosed`] is queued before
    /// returning, so the consumer can clear the overlay. There is no
    /// reconnect.
    ///
    /// # Errors
    ///
    /// Returns [`IndicatorError::Connection`] if the session is lost and
    /// [`IndicatorError::ChannelClosed`] if the consumer has gone.
    #[instrument(skip_all)]
    pub async fn run(
        mut self,
        tx: mpsc::Sender<Notification>,
        mut shutdown_rx: watch::Receiver<bool>,
    ) -> CoreResult<()> {
        loop {
            tokio::select! {
                _ = shutdown_rx.changed() => {
                    info!("Listener shutting down");
                    if let Err(e) = self.stream.close(None).await {
                        debug!(error = %e, "Close handshake did not complete");
                    }
                    return Ok(());
                }

                frame = Self::next_frame(&mut self.stream) => {
                    match frame {
                        Ok(envelope) => match Self::notification_from(envelope) {
                            Ok(Some(notification)) => {
                                tx.send(notification).await.map_err(|e| {
                                    IndicatorError::ChannelClosed {
                                        reason: format!("Failed to hand off notification: {}", e),
                                        location: ErrorLocation::from(Location::caller()),
                                    }
                                })?;
                            }
                            Ok(None) => {}
                            Err(e) => warn!(error = %e, "Skipping malformed event"),
                        },
                        Err(e @ IndicatorError::Protocol { .. }) => {
                            warn!(error = %e, "Skipping malformed frame");
                        }
                        Err(e) => {
                            warn!(error = %e, "Control-service session lost");
                            let _ = tx
                                .send(Notification::SessionClosed {
                                    reason: e.to_string(),
                                })
                                .await;
                            return Err(e);
                        }
                    }
                }
            }
        }
    }

    /// Map an incoming envelope to a notification, if it is one we consume.
    pub(crate) fn notification_from(envelope: Envelope) -> CoreResult<Option<Notification>> {
        if envelope.op != OP_EVENT {
            debug!(op = envelope.op, "Ignoring non-event frame");
            return Ok(None);
        }

        let event: EventFrame = protocol::decode_payload(envelope.d)?;
        if event.event_type != RECORD_STATE_CHANGED {
            debug!(event_type = %event.event_type, "Ignoring unrelated event");
            return Ok(None);
        }

        let change: RecordStateChanged = protocol::decode_payload(event.event_data)?;
        debug!(
            output_state = %change.output_state,
            output_active = change.output_active,
            output_path = ?change.output_path,
            "Received RecordStateChanged"
        );

        Ok(Some(Notification::RecordState {
            output_state: change.output_state,
            output_active: change.output_active,
        }))
    }

    async fn expect_op(
        stream: &mut WebSocketStream<ConnectStream>,
        op: u8,
    ) -> CoreResult<serde_json::Value> {
        let envelope = Self::next_frame(stream).await?;
        if envelope.op != op {
            return Err(IndicatorError::Protocol {
                reason: format!("Expected op {} during handshake, got op {}", op, envelope.op),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        Ok(envelope.d)
    }

    async fn next_frame(stream: &mut WebSocketStream<ConnectStream>) -> CoreResult<Envelope> {
        loop {
            match stream.next().await {
                Some(Ok(Message::Text(text))) => return protocol::decode(&text),
                Some(Ok(Message::Close(frame))) => {
                    return Err(IndicatorError::Connection {
                        reason: close_reason(frame),
                        location: ErrorLocation::from(Location::caller()),
                    });
                }
                // Pings are answered by the stream itself.
                Some(Ok(_)) => continue,
                Some(Err(e)) => {
                    return Err(IndicatorError::Connection {
                        reason: format!("WebSocket error: {}", e),
                        location: ErrorLocation::from(Location::caller()),
                    });
                }
                None => {
                    return Err(IndicatorError::Connection {
                        reason: "WebSocket stream ended".to_string(),
                        location: ErrorLocation::from(Location::caller()),
                    });
                }
            }
        }
    }
}

fn close_reason(frame: Option<CloseFrame<'_>>) -> String {
    match frame {
        Some(frame) => format!(
            "Server closed the session ({}): {}",
            u16::from(frame.code),
            frame.reason
        ),
        None => "Server closed the session".to_string(),
    }
}
