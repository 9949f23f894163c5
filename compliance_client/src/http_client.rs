use std::time::Instant;

use compliance_config::groups::http as http_config;
use error_printer::ErrorPrinter;
use http::Extensions;
use reqwest::{Request, Response};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware, Middleware, Next};
use tracing::{debug, error, info, warn};

use crate::error::{ComplianceClientError, Result};

/// Names the API a request belongs to; attached with `RequestBuilder::with_extension` and picked
/// up by [`RequestLogger`].
#[derive(Clone, Copy, Debug)]
pub struct Api(pub &'static str);

/// Builds the client used for every request to the conformance service.
pub fn build_http_client(config: &http_config::ConfigValueGroup, user_agent: &str) -> Result<ClientWithMiddleware> {
    if config.accept_invalid_certs {
        warn!("TLS certificate verification is disabled for the conformance service");
    }

    let reqwest_client = reqwest::Client::builder()
        .user_agent(user_agent)
        .connect_timeout(config.connect_timeout)
        .read_timeout(config.read_timeout)
        .danger_accept_invalid_certs(config.accept_invalid_certs)
        .build()?;

    Ok(ClientBuilder::new(reqwest_client).with(RequestLogger).build())
}

/// Logs every outbound request together with its status and latency.
pub struct RequestLogger;

#[async_trait::async_trait]
impl Middleware for RequestLogger {
    async fn handle(
        &self,
        req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> reqwest_middleware::Result<Response> {
        let api = extensions.get::<Api>().map(|api| api.0).unwrap_or("unnamed");
        let method = req.method().clone();
        let url = req.url().clone();
        let start = Instant::now();

        debug!(api, %method, %url, "sending request");
        let result = next.run(req, extensions).await;
        let elapsed_ms = start.elapsed().as_millis() as u64;

        match &result {
            Ok(response) => {
                info!(api, %method, %url, status = response.status().as_u16(), elapsed_ms, "request completed")
            },
            Err(e) => warn!(api, %method, %url, elapsed_ms, "request failed: {e}"),
        }

        result
    }
}

/// Turns a sent request into either a successful response or a logged error.
pub trait ResponseErrorLogger<T> {
    fn process_error(self, operation: &'static str) -> Result<T>;
}

impl ResponseErrorLogger<Response> for reqwest_middleware::Result<Response> {
    fn process_error(self, operation: &'static str) -> Result<Response> {
        let response = self.log_error(format!("{operation}: request failed"))?;

        let status = response.status();
        if !status.is_success() {
            error!(operation, status = status.as_u16(), url = %response.url(), "request returned an error status");
            return Err(ComplianceClientError::HttpStatus { operation, status });
        }

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use tracing_test::traced_test;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::USER_AGENT;

    fn client() -> ClientWithMiddleware {
        build_http_client(&http_config::ConfigValueGroup::default(), USER_AGENT).unwrap()
    }

    #[tokio::test]
    async fn test_user_agent_is_sent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ping"))
            .and(header("user-agent", USER_AGENT))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let response = client()
            .get(format!("{}/ping", server.uri()))
            .with_extension(Api("ping"))
            .send()
            .await
            .process_error("ping")
            .unwrap();

        assert_eq!(response.status(), 200);
    }

    #[tokio::test]
    #[traced_test]
    async fn test_error_status_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let result = client().get(server.uri()).send().await.process_error("ping");

        match result {
            Err(ComplianceClientError::HttpStatus { operation, status }) => {
                assert_eq!(operation, "ping");
                assert_eq!(status.as_u16(), 503);
            },
            other => panic!("expected an HTTP status error, got {other:?}"),
        }
        assert!(logs_contain("request returned an error status"));
    }

    #[tokio::test]
    async fn test_unreachable_service_is_an_error() {
        // Bind and drop a listener to get a port nothing is listening on.
        let port = std::net::TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap().port();

        let result = client()
            .get(format!("http://127.0.0.1:{port}/"))
            .send()
            .await
            .process_error("ping");

        assert!(matches!(result, Err(ComplianceClientError::ReqwestMiddlewareError(_))));
    }
}
