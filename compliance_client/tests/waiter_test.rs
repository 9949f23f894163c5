mod common;

use std::time::Duration;

use common::{Ending, MockNotificationServer};
use compliance_client::{CompletionReason, CompletionWaiter};
use tokio_tungstenite::tungstenite::Message;
use url::Url;

const TIMEOUT: Duration = Duration::from_secs(5);

fn waiter(server: &MockNotificationServer, marker: Option<&str>) -> CompletionWaiter {
    CompletionWaiter::new(Url::parse(&server.url).unwrap(), marker.map(str::to_owned))
}

#[tokio::test]
async fn test_messages_in_order_then_close() {
    let server = MockNotificationServer::with_text(&["queued", "running", "finished"], Ending::Close).await;

    let mut received = Vec::new();
    let outcome = tokio::time::timeout(TIMEOUT, waiter(&server, None).wait(|m| received.push(m.to_owned())))
        .await
        .expect("waiter must return once the channel closes")
        .unwrap();

    assert_eq!(received, ["queued", "running", "finished"]);
    assert_eq!(outcome.messages_received, 3);
    assert_eq!(outcome.reason, CompletionReason::ChannelClosed);
}

#[tokio::test]
async fn test_close_handshake_is_answered() {
    let server = MockNotificationServer::with_text(&["finished"], Ending::Close).await;

    tokio::time::timeout(TIMEOUT, waiter(&server, None).wait(|_| {}))
        .await
        .unwrap()
        .unwrap();

    let acknowledged = tokio::time::timeout(TIMEOUT, server.handle).await.unwrap().unwrap();
    assert!(acknowledged, "the service never received a close reply");
}

#[tokio::test]
async fn test_blank_marker_does_not_end_wait() {
    let server = MockNotificationServer::with_text(&["queued", "", "running", "finished"], Ending::HoldOpen).await;

    let mut received = Vec::new();
    let result = tokio::time::timeout(
        Duration::from_millis(500),
        waiter(&server, Some("")).wait(|m| received.push(m.to_owned())),
    )
    .await;

    assert!(result.is_err(), "a blank marker ended the wait");
    assert_eq!(received, ["queued", "", "running", "finished"]);
}

#[tokio::test]
async fn test_dropped_connection_ends_wait() {
    let server = MockNotificationServer::with_text(&["running"], Ending::Drop).await;

    let mut received = Vec::new();
    let outcome = tokio::time::timeout(TIMEOUT, waiter(&server, None).wait(|m| received.push(m.to_owned())))
        .await
        .expect("waiter must return once the connection drops")
        .unwrap();

    assert_eq!(received, ["running"]);
    assert_eq!(outcome.reason, CompletionReason::ChannelClosed);
}

#[tokio::test]
async fn test_binary_messages_are_decoded() {
    let messages = vec![
        Message::Binary(b"progress 50%".to_vec().into()),
        Message::Text("done".into()),
    ];
    let server = MockNotificationServer::start(messages, Ending::Close).await;

    let mut received = Vec::new();
    tokio::time::timeout(TIMEOUT, waiter(&server, None).wait(|m| received.push(m.to_owned())))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(received, ["progress 50%", "done"]);
}

#[tokio::test]
async fn test_completion_marker_ends_wait_on_open_channel() {
    let server = MockNotificationServer::with_text(&["running", "RUN COMPLETE", "never seen"], Ending::HoldOpen).await;

    let mut received = Vec::new();
    let outcome = tokio::time::timeout(
        TIMEOUT,
        waiter(&server, Some("RUN COMPLETE")).wait(|m| received.push(m.to_owned())),
    )
    .await
    .expect("the marker must end the wait without a close from the service")
    .unwrap();

    assert_eq!(received, ["running", "RUN COMPLETE"]);
    assert_eq!(outcome.messages_received, 2);
    assert_eq!(outcome.reason, CompletionReason::MarkerReceived);
}

#[tokio::test]
async fn test_silent_open_channel_blocks() {
    let server = MockNotificationServer::with_text(&[], Ending::HoldOpen).await;

    let mut received = Vec::new();
    let result = tokio::time::timeout(
        Duration::from_millis(500),
        waiter(&server, None).wait(|m| received.push(m.to_owned())),
    )
    .await;

    assert!(result.is_err(), "waiter returned on a channel that never closed");
    assert!(received.is_empty());
}

#[tokio::test]
async fn test_open_channel_blocks_after_messages() {
    let server = MockNotificationServer::with_text(&["running"], Ending::HoldOpen).await;

    let mut received = Vec::new();
    let result = tokio::time::timeout(
        Duration::from_millis(500),
        waiter(&server, None).wait(|m| received.push(m.to_owned())),
    )
    .await;

    assert!(result.is_err());
    assert_eq!(received, ["running"]);
}

#[tokio::test]
async fn test_unreachable_notification_service_fails() {
    let port = std::net::TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap().port();
    let waiter = CompletionWaiter::new(Url::parse(&format!("ws://127.0.0.1:{port}")).unwrap(), None);

    let result = tokio::time::timeout(TIMEOUT, waiter.wait(|_| {})).await.unwrap();

    assert!(result.is_err());
}
