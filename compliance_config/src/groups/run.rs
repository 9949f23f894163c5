use std::path::PathBuf;

crate::config_group!({

    /// The JSON file holding the run configuration posted to the conformance service.
    ///
    /// The default value is "config.json".
    ///
    /// Use the environment variable `MQTT_COMPLIANCE_RUN_CONFIG_PATH` to set this value.
    ref config_path : PathBuf = PathBuf::from("config.json");

    /// A notification message that marks the end of the run. When set, receiving this exact
    /// text (ignoring surrounding whitespace) ends the wait. When unset, the wait ends only when
    /// the notification service closes the channel.
    ///
    /// The default value is None.
    ///
    /// Use the environment variable `MQTT_COMPLIANCE_RUN_COMPLETION_MARKER` to set this value.
    ref completion_marker : Option<String> = None;

});
