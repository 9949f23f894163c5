pub mod download;
pub mod endpoints;
pub mod http;
pub mod log;
pub mod run;
