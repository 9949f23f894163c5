use std::time::Duration;

crate::config_group!({

    /// Skip TLS certificate verification for the conformance service. Only meant for local
    /// test deployments using self-signed certificates.
    ///
    /// The default value is false.
    ///
    /// Use the environment variable `MQTT_COMPLIANCE_HTTP_ACCEPT_INVALID_CERTS` to set this value.
    ref accept_invalid_certs : bool = false;

    /// Maximum time allowed to establish a TCP connection to the service.
    ///
    /// The default value is 30sec.
    ///
    /// Use the environment variable `MQTT_COMPLIANCE_HTTP_CONNECT_TIMEOUT` to set this value.
    ref connect_timeout : Duration = Duration::from_secs(30);

    /// Maximum time allowed between receiving data packets of a response.
    ///
    /// The default value is 300sec.
    ///
    /// Use the environment variable `MQTT_COMPLIANCE_HTTP_READ_TIMEOUT` to set this value.
    ref read_timeout : Duration = Duration::from_secs(300);

});
