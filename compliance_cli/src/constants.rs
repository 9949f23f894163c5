pub const PROGRAM_NAME: &str = "mqtt-compliance";

pub const CURRENT_VERSION: &str = env!("CARGO_PKG_VERSION");
