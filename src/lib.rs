#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod errors;
pub mod protocol;
pub mod services;
pub mod store;
pub mod telemetry;

// Re-exports for public API
pub use config::EngineConfig;
pub use engine::{Engine, SessionHandle};
pub use error::EngineError;
pub use protocol::{Intent, Notification};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    use tracing_subscriber::EnvFilter;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
