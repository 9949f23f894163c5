#![cfg_attr(feature = "strict", deny(warnings))]

pub use crate::error::{ComplianceClientError, Result};
pub use downloader::{copy_in_chunks, Downloader};
pub use endpoints::ServiceEndpoints;
pub use http_client::{build_http_client, Api, RequestLogger, ResponseErrorLogger};
pub use runner::ComplianceRunner;
pub use submitter::Submitter;
pub use types::{
    CompletionReason, DownloadSummary, RunConfiguration, RunIdentifier, RunReport, Submission, SubmitResponse, WaitOutcome,
};
pub use waiter::{print_message, CompletionWaiter};

mod downloader;
mod endpoints;
mod error;
mod http_client;
mod runner;
mod submitter;
mod types;
mod waiter;

/// User agent sent with every request to the conformance service.
pub const USER_AGENT: &str = concat!("mqtt-compliance/", env!("CARGO_PKG_VERSION"));
