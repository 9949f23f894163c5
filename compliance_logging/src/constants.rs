/// Default log level for the client to use. Override using the `RUST_LOG` env variable.
pub(crate) const DEFAULT_LOG_LEVEL_FILE: &str = "info";
pub(crate) const DEFAULT_LOG_LEVEL_CONSOLE: &str = "warn";

/// File name used when the log destination names a directory-like path without a file name.
pub(crate) const DEFAULT_LOG_FILE_NAME: &str = "mqtt-compliance.log";
