pub mod app;
pub mod constants;
