use std::path::Path;

use compliance_config::ComplianceConfig;
use tracing::info;

use crate::downloader::Downloader;
use crate::endpoints::ServiceEndpoints;
use crate::error::Result;
use crate::http_client::build_http_client;
use crate::submitter::Submitter;
use crate::types::{DownloadSummary, RunConfiguration, RunIdentifier, RunReport, Submission, WaitOutcome};
use crate::waiter::CompletionWaiter;
use crate::USER_AGENT;

/// Drives one conformance run: submit the configuration, wait for the service to report
/// completion, then download the result archive.
///
/// The phases are also exposed individually so a front end can report progress between them.
#[derive(Debug, Clone)]
pub struct ComplianceRunner {
    submitter: Submitter,
    waiter: CompletionWaiter,
    downloader: Downloader,
}

impl ComplianceRunner {
    pub fn new(config: &ComplianceConfig) -> Result<Self> {
        let endpoints = ServiceEndpoints::from_config(&config.endpoints)?;
        let client = build_http_client(&config.http, USER_AGENT)?;

        Ok(Self {
            submitter: Submitter::new(endpoints.clone(), client.clone()),
            waiter: CompletionWaiter::new(endpoints.notification_url().clone(), config.run.completion_marker.clone()),
            downloader: Downloader::new(endpoints, client, &config.download.output_dir, config.download.chunk_size),
        })
    }

    pub fn waiter(&self) -> &CompletionWaiter {
        &self.waiter
    }

    pub fn downloader(&self) -> &Downloader {
        &self.downloader
    }

    /// Load the run configuration at `config_path`, submit it and start the run.
    pub async fn submit(&self, config_path: impl AsRef<Path>) -> Result<Submission> {
        let config_path = config_path.as_ref();
        info!("Loading run configuration from {config_path:?}");
        let config = RunConfiguration::from_path(config_path).await?;

        let submission = self.submitter.submit_configuration(&config).await?;
        self.submitter.start_run(&submission.run_id).await?;
        Ok(submission)
    }

    pub async fn wait_for_completion<F: FnMut(&str)>(&self, on_message: F) -> Result<WaitOutcome> {
        self.waiter.wait(on_message).await
    }

    pub async fn download(&self, run_id: &RunIdentifier) -> Result<DownloadSummary> {
        self.downloader.download(run_id).await
    }

    /// Run every phase in order. The first failure ends the run; nothing after it is attempted.
    pub async fn run_compliance<F: FnMut(&str)>(&self, config_path: impl AsRef<Path>, on_message: F) -> Result<RunReport> {
        let run_id = self.submit(config_path).await?.run_id;
        let wait = self.wait_for_completion(on_message).await?;
        let download = self.download(&run_id).await?;

        info!(
            run_id = %run_id,
            messages = wait.messages_received,
            bytes = download.bytes_written,
            "Conformance run finished"
        );

        Ok(RunReport { run_id, wait, download })
    }
}
