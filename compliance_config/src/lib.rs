#![cfg_attr(feature = "strict", deny(warnings))]

pub mod config_value;
pub mod groups;
pub mod macros;

mod compliance_config;
mod guards;

pub use compliance_config::ComplianceConfig;
pub use config_value::ParsableConfigValue;
pub use guards::EnvVarGuard;

/// Prefix of every environment variable read by the configuration groups.
/// A field `bar` in group `foo` is read from `MQTT_COMPLIANCE_FOO_BAR`.
pub const ENV_PREFIX: &str = "MQTT_COMPLIANCE";
