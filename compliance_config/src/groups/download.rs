use std::path::PathBuf;

crate::config_group!({

    /// Directory the result archive is written to.
    ///
    /// The default value is the current directory.
    ///
    /// Use the environment variable `MQTT_COMPLIANCE_DOWNLOAD_OUTPUT_DIR` to set this value.
    ref output_dir : PathBuf = PathBuf::from(".");

    /// Size of the buffer used to copy the archive from the response to disk.
    ///
    /// The default value is 1024.
    ///
    /// Use the environment variable `MQTT_COMPLIANCE_DOWNLOAD_CHUNK_SIZE` to set this value.
    ref chunk_size : usize = 1024;

});
