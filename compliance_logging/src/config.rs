use std::path::{Path, PathBuf};

use compliance_config::groups::log;

#[derive(Clone, Debug, PartialEq)]
pub enum LoggingMode {
    Directory(PathBuf),
    File(PathBuf),
    Console,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LoggingConfig {
    pub logging_mode: LoggingMode,
    pub use_json: bool,
    pub file_prefix: String,
    pub version: String,
}

impl LoggingConfig {
    /// Choose the logging mode and format from the `log` configuration group.
    pub fn new(version: String, log_config: &log::ConfigValueGroup) -> LoggingConfig {
        let logging_mode = match log_config.dest.as_deref().map(str::trim) {
            None | Some("") => LoggingMode::Console,
            Some(log_dest) => {
                let path = Path::new(log_dest).to_path_buf();

                if log_dest.ends_with('/') || log_dest.ends_with('\\') || path.is_dir() {
                    LoggingMode::Directory(path)
                } else {
                    LoggingMode::File(path)
                }
            },
        };

        let use_json = match &log_config.format {
            Some(format) => format.to_ascii_lowercase().trim() == "json",
            None => logging_mode != LoggingMode::Console,
        };

        Self {
            logging_mode,
            use_json,
            file_prefix: log_config.prefix.clone(),
            version,
        }
    }
}
