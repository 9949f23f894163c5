use crate::groups::{download, endpoints, http, log, run};

/// All configuration groups of the compliance client.
///
/// `ComplianceConfig::new()` starts from the defaults and applies environment overrides;
/// command line flags are expected to be layered on top by the caller.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComplianceConfig {
    pub endpoints: endpoints::ConfigValueGroup,
    pub http: http::ConfigValueGroup,
    pub run: run::ConfigValueGroup,
    pub download: download::ConfigValueGroup,
    pub log: log::ConfigValueGroup,
}

impl ComplianceConfig {
    pub fn new() -> Self {
        let mut config = Self::default();
        config.apply_env_overrides();
        config
    }

    pub fn apply_env_overrides(&mut self) {
        self.endpoints.apply_env_overrides();
        self.http.apply_env_overrides();
        self.run.apply_env_overrides();
        self.download.apply_env_overrides();
        self.log.apply_env_overrides();
    }
}
