pub mod catalog;
pub mod env;
pub mod tracing_init;

pub use env::{AppConfig, ConfigError};
pub use tracing_init::init_tracing;
