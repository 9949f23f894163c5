#![allow(dead_code)]

use std::path::{Path, PathBuf};

use compliance_config::ComplianceConfig;
use futures::{SinkExt, StreamExt};
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;
use wiremock::MockServer;

/// How the mock notification service ends the conversation after sending its messages.
#[derive(Clone, Copy, Debug)]
pub enum Ending {
    /// Send a close frame and finish the closing handshake.
    Close,
    /// Drop the TCP connection without a close frame.
    Drop,
    /// Keep the channel open and never send anything else.
    HoldOpen,
}

/// A notification service that accepts a single websocket connection and plays back `messages`.
///
/// With [`Ending::Close`] the handle resolves to whether the client answered the close frame.
pub struct MockNotificationServer {
    pub url: String,
    pub handle: JoinHandle<bool>,
}

impl MockNotificationServer {
    pub async fn start(messages: Vec<Message>, ending: Ending) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("ws://{}", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (tcp, _) = listener.accept().await.unwrap();
            let mut ws = tokio_tungstenite::accept_async(tcp).await.unwrap();

            for message in messages {
                ws.send(message).await.unwrap();
            }

            match ending {
                Ending::Close => {
                    let _ = ws.close(None).await;
                    let mut acknowledged = false;
                    while let Some(Ok(message)) = ws.next().await {
                        acknowledged |= message.is_close();
                    }
                    acknowledged
                },
                Ending::Drop => {
                    drop(ws);
                    false
                },
                Ending::HoldOpen => {
                    let _ws = ws;
                    std::future::pending::<bool>().await
                },
            }
        });

        Self { url, handle }
    }

    pub async fn with_text(messages: &[&str], ending: Ending) -> Self {
        Self::start(messages.iter().map(|m| Message::Text((*m).into())).collect(), ending).await
    }
}

/// Configuration pointing at the mock services, writing archives to `output_dir`.
pub fn config_for(http: &MockServer, notification_url: &str, output_dir: &Path) -> ComplianceConfig {
    let mut config = ComplianceConfig::default();
    config.endpoints.base_url = format!("{}/v1", http.uri());
    config.endpoints.notification_url = notification_url.to_owned();
    config.download.output_dir = output_dir.to_path_buf();
    config
}

/// Writes `payload` as the run configuration file inside `dir`.
pub fn write_run_configuration(dir: &Path, payload: &Value) -> PathBuf {
    let path = dir.join("config.json");
    std::fs::write(&path, serde_json::to_vec_pretty(payload).unwrap()).unwrap();
    path
}

/// Deterministic archive content large enough to span many copy buffers.
pub fn archive_bytes(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i * 31 % 256) as u8).collect()
}
