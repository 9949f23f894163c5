use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;

use crate::error::{ComplianceClientError, Result};

/// The run configuration posted to the conformance service. Its content is not interpreted.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfiguration(Value);

impl RunConfiguration {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let value = serde_json::from_slice(bytes).map_err(ComplianceClientError::InvalidConfig)?;
        Ok(Self(value))
    }

    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await.map_err(|source| ComplianceClientError::ConfigFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_slice(&bytes)
    }

    pub fn as_json(&self) -> &Value {
        &self.0
    }
}

/// Token correlating a submitted run with its run-start and download requests.
///
/// The identifier also names the result archive, so it may not be empty or contain path
/// separators.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RunIdentifier(String);

impl RunIdentifier {
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        if id.is_empty() || id == "." || id == ".." || id.contains(['/', '\\']) {
            return Err(ComplianceClientError::InvalidRunIdentifier(id));
        }
        Ok(Self(id))
    }

    /// Extract the identifier from the `timestamp` field of a submission response.
    /// Strings are taken as is and numbers are rendered in their shortest decimal form,
    /// e.g. `1718000000` or `1718000000.123`.
    pub fn from_submit_response(response: &SubmitResponse) -> Result<Self> {
        match &response.timestamp {
            None | Some(Value::Null) => Err(ComplianceClientError::MissingRunIdentifier),
            Some(Value::String(s)) => Self::new(s.as_str()),
            Some(Value::Number(n)) => Self::new(n.to_string()),
            Some(other) => Err(ComplianceClientError::InvalidRunIdentifier(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name of the result archive for this run.
    pub fn archive_file_name(&self) -> String {
        format!("result_{}.zip", self.0)
    }
}

impl fmt::Display for RunIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Body of the configuration submission response. Only `timestamp` is read.
#[derive(Debug, Default, Deserialize)]
pub struct SubmitResponse {
    #[serde(default)]
    pub timestamp: Option<Value>,
}

/// What the service answered to a configuration submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub run_id: RunIdentifier,
    /// The response body as received.
    pub response: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionReason {
    /// The notification service closed the channel.
    ChannelClosed,
    /// The configured completion marker was received.
    MarkerReceived,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitOutcome {
    pub messages_received: usize,
    pub reason: CompletionReason,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadSummary {
    pub path: PathBuf,
    pub bytes_written: u64,
    pub status: u16,
}

/// Everything a finished run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub run_id: RunIdentifier,
    pub wait: WaitOutcome,
    pub download: DownloadSummary,
}
