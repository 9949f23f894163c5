use reqwest_middleware::ClientWithMiddleware;
use tracing::{info, warn};

use crate::endpoints::ServiceEndpoints;
use crate::error::{ComplianceClientError, Result};
use crate::http_client::{Api, ResponseErrorLogger};
use crate::types::{RunConfiguration, RunIdentifier, Submission, SubmitResponse};

/// Posts run configurations to the conformance service and starts the resulting runs.
#[derive(Debug, Clone)]
pub struct Submitter {
    endpoints: ServiceEndpoints,
    client: ClientWithMiddleware,
}

impl Submitter {
    pub fn new(endpoints: ServiceEndpoints, client: ClientWithMiddleware) -> Self {
        Self { endpoints, client }
    }

    /// Submit the configuration and return the run identifier assigned by the service.
    pub async fn submit(&self, config: &RunConfiguration) -> Result<RunIdentifier> {
        Ok(self.submit_configuration(config).await?.run_id)
    }

    /// Like [`Submitter::submit`], also keeping the raw response body for display.
    pub async fn submit_configuration(&self, config: &RunConfiguration) -> Result<Submission> {
        let url = self.endpoints.submit_url()?;
        info!("Submitting run configuration to {url}");

        let response = self
            .client
            .post(url)
            .with_extension(Api("conformance-cfg"))
            .json(config.as_json())
            .send()
            .await
            .process_error("conformance-cfg")?;

        let body = response.text().await?;
        info!("Submission response: {body}");

        let parsed: SubmitResponse = serde_json::from_str(&body).map_err(ComplianceClientError::InvalidResponse)?;
        let run_id = RunIdentifier::from_submit_response(&parsed)?;
        info!("Run identifier: {run_id}");

        Ok(Submission { run_id, response: body })
    }

    /// Ask the service to start the run. The response body is discarded and an error status is
    /// only logged; transport failures are still returned.
    pub async fn start_run(&self, run_id: &RunIdentifier) -> Result<()> {
        let url = self.endpoints.run_url(run_id)?;
        info!("Starting run {run_id}");

        let response = self.client.get(url).with_extension(Api("conformance-run")).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Run start for {run_id} returned HTTP status {status}; continuing");
        }

        Ok(())
    }
}
