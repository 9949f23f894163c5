/// Declares a configuration group inside the calling module.
///
/// Expands to a `ConfigValueGroup` struct holding one public field per entry, a `Default`
/// implementation built from the given values, and `apply_env_overrides`, which reads
/// `MQTT_COMPLIANCE_{GROUP}_{FIELD}` for every field. The group name is the name of the
/// module the macro is invoked in.
///
/// # Example
/// ```rust
/// mod download {
///     compliance_config::config_group!({
///         /// Size of the buffer used when copying the archive to disk.
///         ref chunk_size: usize = 1024;
///     });
/// }
///
/// let group = download::ConfigValueGroup::new();
/// assert_eq!(group.chunk_size, 1024);
/// ```
#[macro_export]
macro_rules! config_group {
    ({
        $(
            $(#[$meta:meta])*
            ref $name:ident : $type:ty = $value:expr;
        )+
    }) => {
        #[allow(non_snake_case)]
        #[derive(Debug, Clone, PartialEq)]
        pub struct ConfigValueGroup {
            $(
                $(#[$meta])*
                pub $name: $type,
            )+
        }

        impl Default for ConfigValueGroup {
            fn default() -> Self {
                Self {
                    $( $name: $value, )+
                }
            }
        }

        impl ConfigValueGroup {
            /// The group with every field at its default value.
            pub fn new() -> Self {
                Self::default()
            }

            /// The upper-cased group name used in environment variable names.
            pub fn group_name() -> String {
                module_path!().rsplit("::").next().unwrap_or_default().to_uppercase()
            }

            /// Replace field values with the matching environment variables, when set and parsable.
            pub fn apply_env_overrides(&mut self) {
                let group_name = Self::group_name();
                $(
                    let env_name = format!(
                        "{}_{}_{}",
                        $crate::ENV_PREFIX,
                        group_name,
                        stringify!($name).to_uppercase()
                    );
                    let maybe_env_value = std::env::var(&env_name).ok();
                    self.$name = <$type as $crate::ParsableConfigValue>::parse(
                        &env_name,
                        maybe_env_value,
                        self.$name.clone(),
                    );
                )+
            }
        }
    };
}
