use error_printer::{ErrorPrinter, OptionPrinter};
use futures::{Stream, StreamExt};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::error::ProtocolError;
use tokio_tungstenite::tungstenite::{Error as WsError, Message};
use tracing::{debug, info, warn};
use url::Url;

use crate::error::Result;
use crate::types::{CompletionReason, WaitOutcome};

/// Blocks until the notification service reports that a run is complete.
///
/// Completion is signalled by the service closing the channel. If a completion marker is
/// configured, a text message equal to it (ignoring surrounding whitespace) also ends the wait.
/// There is no timeout: a channel that stays open and silent blocks forever, so callers that
/// need a deadline must impose one themselves.
#[derive(Debug, Clone)]
pub struct CompletionWaiter {
    notification_url: Url,
    completion_marker: Option<String>,
}

impl CompletionWaiter {
    /// A marker that is empty or only whitespace counts as no marker at all.
    pub fn new(notification_url: Url, completion_marker: Option<String>) -> Self {
        Self {
            notification_url,
            completion_marker: completion_marker.filter(|marker| !marker.trim().is_empty()),
        }
    }

    pub fn notification_url(&self) -> &Url {
        &self.notification_url
    }

    /// Connect to the notification channel and pass every received message to `on_message`,
    /// in order, until the run completes.
    pub async fn wait<F: FnMut(&str)>(&self, mut on_message: F) -> Result<WaitOutcome> {
        info!("Waiting for completion on {}", self.notification_url);
        self.completion_marker
            .as_deref()
            .info_none("No completion marker configured; waiting for the service to close the channel");
        let (mut stream, _response) = connect_async(self.notification_url.as_str()).await?;

        let mut messages_received = 0usize;
        let closed = |messages_received: usize| WaitOutcome {
            messages_received,
            reason: CompletionReason::ChannelClosed,
        };

        loop {
            let message = match stream.next().await {
                None => {
                    info!("Notification channel ended after {messages_received} messages");
                    return Ok(closed(messages_received));
                },
                Some(Ok(message)) => message,
                Some(Err(e)) if is_peer_gone(&e) => {
                    warn!("Notification channel dropped without a close handshake: {e}");
                    return Ok(closed(messages_received));
                },
                Some(Err(e)) => return Err(e.into()),
            };

            let text = match message {
                Message::Text(text) => text.as_str().to_owned(),
                Message::Binary(data) => String::from_utf8_lossy(&data).into_owned(),
                Message::Close(frame) => {
                    info!("Notification channel closed by the service after {messages_received} messages: {frame:?}");
                    finish_close_handshake(&mut stream).await;
                    return Ok(closed(messages_received));
                },
                Message::Ping(_) | Message::Pong(_) | Message::Frame(_) => continue,
            };

            messages_received += 1;
            debug!("Notification {messages_received}: {text}");
            on_message(&text);

            if self.is_completion_marker(&text) {
                info!("Completion marker received after {messages_received} messages");
                let _ = stream.close(None).await.warn_error("closing the notification channel");
                return Ok(WaitOutcome {
                    messages_received,
                    reason: CompletionReason::MarkerReceived,
                });
            }
        }
    }

    fn is_completion_marker(&self, text: &str) -> bool {
        self.completion_marker
            .as_deref()
            .is_some_and(|marker| text.trim() == marker.trim())
    }
}

/// Prints a notification the way an operator watching the run expects to see it.
pub fn print_message(message: &str) {
    println!("< {message}");
}

/// The close reply is only written while the stream is polled, so keep reading until the
/// connection is done.
async fn finish_close_handshake<S>(stream: &mut S)
where
    S: Stream<Item = std::result::Result<Message, WsError>> + Unpin,
{
    while let Some(next) = stream.next().await {
        match next {
            Ok(message) => debug!("Ignoring {message:?} after close"),
            Err(e) => {
                if !is_peer_gone(&e) {
                    debug!("Notification channel error after close: {e}");
                }
                break;
            },
        }
    }
}

fn is_peer_gone(e: &WsError) -> bool {
    matches!(
        e,
        WsError::ConnectionClosed | WsError::AlreadyClosed | WsError::Protocol(ProtocolError::ResetWithoutClosingHandshake)
    )
}
