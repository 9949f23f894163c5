crate::config_group!({

    /// Base URL of the conformance service REST API. The configuration, run and history
    /// routes are appended to this.
    ///
    /// The default value is "https://localhost:3001/v1".
    ///
    /// Use the environment variable `MQTT_COMPLIANCE_ENDPOINTS_BASE_URL` to set this value.
    ref base_url : String = "https://localhost:3001/v1".to_string();

    /// Websocket URL of the notification service that reports run progress.
    ///
    /// The default value is "ws://localhost:8080".
    ///
    /// Use the environment variable `MQTT_COMPLIANCE_ENDPOINTS_NOTIFICATION_URL` to set this value.
    ref notification_url : String = "ws://localhost:8080".to_string();

});
