use crate::{
    ConnectionListener, HANDOFF_CAPACITY, IndicatorError, Notification,
    tests::obs::fake_obs::{FakeObs, PASSWORD, settings_for},
};

use std::time::Duration;

use tokio::sync::{mpsc, watch};

const TIMEOUT: Duration = Duration::from_secs(5);

/// WHAT: Events are forwarded in delivery order after the handshake
/// WHY: Out-of-order processing would desync the icon from the state
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_server_events_when_listening_then_notifications_forwarded_in_order() {
    // Given: A server that reports a full recording cycle
    let (addr, identify_rx) = FakeObs {
        output_states: vec![
            "OBS_WEBSOCKET_OUTPUT_STARTING",
            "OBS_WEBSOCKET_OUTPUT_STARTED",
            "OBS_WEBSOCKET_OUTPUT_PAUSED",
            "OBS_WEBSOCKET_OUTPUT_RESUMED",
            "OBS_WEBSOCKET_OUTPUT_STOPPED",
        ],
        ..FakeObs::default()
    }
    .spawn()
    .await;

    // When: Connecting and running the listener
    let listener = ConnectionListener::connect(&settings_for(addr, None))
        .await
        .unwrap();
    assert_eq!(listener.negotiated_rpc_version(), 1);

    let (tx, mut rx) = mpsc::channel(HANDOFF_CAPACITY);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let handle = tokio::spawn(listener.run(tx, shutdown_rx));

    // Then: Identify subscribed to output events without auth
    let identify = identify_rx.await.unwrap();
    assert_eq!(identify["op"], 1);
    assert_eq!(identify["d"]["eventSubscriptions"], 64);
    assert!(identify["d"].get("authentication").is_none());

    // And: Notifications arrive in order
    let mut received = Vec::new();
    for _ in 0..5 {
        let notification = tokio::time::timeout(TIMEOUT, rx.recv())
            .await
            .unwrap()
            .unwrap();
        received.push(notification);
    }
    assert_eq!(
        received,
        vec![
            Notification::record_state("OBS_WEBSOCKET_OUTPUT_STARTING", false),
            Notification::record_state("OBS_WEBSOCKET_OUTPUT_STARTED", true),
            Notification::record_state("OBS_WEBSOCKET_OUTPUT_PAUSED", false),
            Notification::record_state("OBS_WEBSOCKET_OUTPUT_RESUMED", true),
            Notification::record_state("OBS_WEBSOCKET_OUTPUT_STOPPED", false),
        ]
    );

    // And: Shutdown closes the session cleanly
    shutdown_tx.send(true).unwrap();
    let result = tokio::time::timeout(TIMEOUT, handle).await.unwrap().unwrap();
    assert!(result.is_ok());
}

/// WHAT: The correct password passes the auth challenge
/// WHY: Most OBS installs have authentication enabled
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_auth_required_when_password_correct_then_identified() {
    let (addr, identify_rx) = FakeObs {
        require_auth: true,
        ..FakeObs::default()
    }
    .spawn()
    .await;

    let result = ConnectionListener::connect(&settings_for(addr, Some(PASSWORD))).await;

    assert!(result.is_ok());
    let identify = identify_rx.await.unwrap();
    assert_eq!(
        identify["d"]["authentication"],
        "sQBlPUYd9mki/3XVFBp4Pt08FCMWdMVIqnFWdEitUME="
    );
}

/// WHAT: A wrong password yields a connection error carrying the close code
/// WHY: Startup connection failure must be reported to the operator
#[tokio::test]
async fn given_auth_required_when_password_wrong_then_connection_error() {
    let (addr, _identify_rx) = FakeObs {
        require_auth: true,
        ..FakeObs::default()
    }
    .spawn()
    .await;

    let result = ConnectionListener::connect(&settings_for(addr, Some("wrong"))).await;

    assert!(matches!(
        result,
        Err(IndicatorError::Connection { ref reason, .. }) if reason.contains("4009")
    ));
}

/// WHAT: A challenge without a configured password fails before Identify
/// WHY: Sending no auth would only earn a less helpful close from the server
#[tokio::test]
async fn given_auth_required_when_no_password_then_connection_error() {
    let (addr, _identify_rx) = FakeObs {
        require_auth: true,
        ..FakeObs::default()
    }
    .spawn()
    .await;

    let result = ConnectionListener::connect(&settings_for(addr, None)).await;

    assert!(matches!(
        result,
        Err(IndicatorError::Connection { ref reason, .. }) if reason.contains("password")
    ));
}

/// WHAT: Nothing listening yields a connection error
/// WHY: No retry; the operator is told immediately
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_no_server_when_connecting_then_connection_error() {
    // Bind then drop to get a port nobody listens on.
    let socket = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = socket.local_addr().unwrap();
    drop(socket);

    let result = ConnectionListener::connect(&settings_for(addr, None)).await;

    assert!(matches!(result, Err(IndicatorError::Connection { .. })));
}

/// WHAT: Malformed frames are skipped and the session survives
/// WHY: One bad frame must not tear down the indicator
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_malformed_frames_when_listening_then_later_events_still_forwarded() {
    let (addr, _identify_rx) = FakeObs {
        raw_frames: vec![
            "not json".to_string(),
            r#"{"op":5,"d":{"eventType":"RecordStateChanged","eventData":{}}}"#.to_string(),
        ],
        output_states: vec!["OBS_WEBSOCKET_OUTPUT_STARTED"],
        ..FakeObs::default()
    }
    .spawn()
    .await;

    let listener = ConnectionListener::connect(&settings_for(addr, None))
        .await
        .unwrap();
    let (tx, mut rx) = mpsc::channel(HANDOFF_CAPACITY);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let handle = tokio::spawn(listener.run(tx, shutdown_rx));

    let notification = tokio::time::timeout(TIMEOUT, rx.recv())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(
        notification,
        Notification::record_state("OBS_WEBSOCKET_OUTPUT_STARTED", true)
    );

    shutdown_tx.send(true).unwrap();
    let _ = tokio::time::timeout(TIMEOUT, handle).await;
}

/// WHAT: Server-side close queues SessionClosed and ends with an error
/// WHY: The consumer must clear the overlay when events stop
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_server_closes_when_listening_then_session_closed_notification() {
    let (addr, _identify_rx) = FakeObs {
        output_states: vec!["OBS_WEBSOCKET_OUTPUT_STARTED"],
        close_after_events: true,
        ..FakeObs::default()
    }
    .spawn()
    .await;

    let listener = ConnectionListener::connect(&settings_for(addr, None))
        .await
        .unwrap();
    let (tx, mut rx) = mpsc::channel(HANDOFF_CAPACITY);
    let (_shutdown_tx, shutdown_rx) = watch::channel(false);

    let result = tokio::time::timeout(TIMEOUT, listener.run(tx, shutdown_rx))
        .await
        .unwrap();

    assert!(matches!(result, Err(IndicatorError::Connection { .. })));
    assert_eq!(
        rx.recv().await.unwrap(),
        Notification::record_state("OBS_WEBSOCKET_OUTPUT_STARTED", true)
    );
    assert!(matches!(
        rx.recv().await.unwrap(),
        Notification::SessionClosed { .. }
    ));
}
