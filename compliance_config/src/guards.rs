use std::env;
use std::ffi::OsStr;

/// Guard that temporarily sets an environment variable and restores the previous value on drop.
///
/// Meant for tests that exercise environment overrides; combine with `serial_test` since the
/// process environment is shared between test threads.
///
/// # Examples
///
/// ```no_run
/// use compliance_config::EnvVarGuard;
///
/// let _guard = EnvVarGuard::set("MQTT_COMPLIANCE_DOWNLOAD_CHUNK_SIZE", "4096");
/// // The previous value (or absence) is restored when `_guard` goes out of scope.
/// ```
pub struct EnvVarGuard {
    key: &'static str,
    prev: Option<String>,
}

impl EnvVarGuard {
    pub fn set(key: &'static str, value: impl AsRef<OsStr>) -> Self {
        let prev = env::var(key).ok();
        env::set_var(key, value);
        Self { key, prev }
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        match &self.prev {
            Some(v) => env::set_var(self.key, v),
            None => env::remove_var(self.key),
        }
    }
}
