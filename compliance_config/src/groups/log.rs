crate::config_group!({

    /// The log destination.
    ///
    /// If this path exists as a directory or the path ends with a /, a new log file is created in
    /// that directory for each invocation. Any other non-empty value is used as the log file itself.
    /// If unset or empty, logs go to the console.
    ///
    /// The default value is None.
    ///
    /// Use the environment variable `MQTT_COMPLIANCE_LOG_DEST` to set this value.
    ref dest : Option<String> = None;

    /// The format the logs are printed in. If "json", then logs are dumped as json blobs; otherwise they
    /// are treated as text.  By default logging to files is done in json and console logging is done with text.
    ///
    /// The default value is None.
    ///
    /// Use the environment variable `MQTT_COMPLIANCE_LOG_FORMAT` to set this value.
    ref format : Option<String> = None;

    /// The base name for a log file when logging to a directory. The timestamp and pid are appended to
    /// this name to form the log file.
    ///
    /// The default value is "mqtt-compliance".
    ///
    /// Use the environment variable `MQTT_COMPLIANCE_LOG_PREFIX` to set this value.
    ref prefix : String = "mqtt-compliance".to_string();

});
