use compliance_config::groups::endpoints;
use url::Url;

use crate::error::{ComplianceClientError, Result};
use crate::types::RunIdentifier;

/// Locations of the conformance service and its notification channel.
///
/// Route paths are appended to the base URL segment by segment, so the run identifier is
/// percent-encoded where needed and a trailing slash on the base URL does not matter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceEndpoints {
    base_url: Url,
    notification_url: Url,
}

impl ServiceEndpoints {
    pub fn new(base_url: &str, notification_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(ComplianceClientError::InvalidEndpoint(base_url.to_string()));
        }

        let notification_url = Url::parse(notification_url)?;
        if !matches!(notification_url.scheme(), "ws" | "wss") {
            return Err(ComplianceClientError::InvalidEndpoint(format!(
                "notification URL must use ws:// or wss://, got {notification_url}"
            )));
        }

        Ok(Self {
            base_url,
            notification_url,
        })
    }

    pub fn from_config(config: &endpoints::ConfigValueGroup) -> Result<Self> {
        Self::new(&config.base_url, &config.notification_url)
    }

    pub fn notification_url(&self) -> &Url {
        &self.notification_url
    }

    /// `{base}/conformance/cfg/mqtt/broker`
    pub fn submit_url(&self) -> Result<Url> {
        self.route(&["conformance", "cfg", "mqtt", "broker"])
    }

    /// `{base}/conformance/run/mqtt/{id}`
    pub fn run_url(&self, run_id: &RunIdentifier) -> Result<Url> {
        self.route(&["conformance", "run", "mqtt", run_id.as_str()])
    }

    /// `{base}/history/download/mqtt/{id}`
    pub fn download_url(&self, run_id: &RunIdentifier) -> Result<Url> {
        self.route(&["history", "download", "mqtt", run_id.as_str()])
    }

    fn route(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ComplianceClientError::InvalidEndpoint(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoints(base: &str) -> ServiceEndpoints {
        ServiceEndpoints::new(base, "ws://localhost:8080").unwrap()
    }

    #[test]
    fn test_routes() {
        let ep = endpoints("https://localhost:3001/v1");
        let run_id = RunIdentifier::new("1700000000").unwrap();

        assert_eq!(ep.submit_url().unwrap().as_str(), "https://localhost:3001/v1/conformance/cfg/mqtt/broker");
        assert_eq!(ep.run_url(&run_id).unwrap().as_str(), "https://localhost:3001/v1/conformance/run/mqtt/1700000000");
        assert_eq!(
            ep.download_url(&run_id).unwrap().as_str(),
            "https://localhost:3001/v1/history/download/mqtt/1700000000"
        );
    }

    #[test]
    fn test_trailing_slash_on_base() {
        let ep = endpoints("http://127.0.0.1:9000/v1/");
        assert_eq!(ep.submit_url().unwrap().as_str(), "http://127.0.0.1:9000/v1/conformance/cfg/mqtt/broker");
    }

    #[test]
    fn test_identifier_is_encoded() {
        let ep = endpoints("http://127.0.0.1:9000/v1");
        let run_id = RunIdentifier::new("2024-01-01 10:00").unwrap();
        assert_eq!(
            ep.run_url(&run_id).unwrap().as_str(),
            "http://127.0.0.1:9000/v1/conformance/run/mqtt/2024-01-01%2010:00"
        );
    }

    #[test]
    fn test_invalid_endpoints() {
        assert!(ServiceEndpoints::new("not a url", "ws://localhost:8080").is_err());
        assert!(ServiceEndpoints::new("mailto:someone@example.com", "ws://localhost:8080").is_err());
        assert!(matches!(
            ServiceEndpoints::new("https://localhost:3001/v1", "http://localhost:8080"),
            Err(ComplianceClientError::InvalidEndpoint(_))
        ));
    }
}
