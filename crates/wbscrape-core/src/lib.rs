pub mod app_config;
pub mod config;
pub mod failure;
pub mod records;

pub use app_config::{AppConfig, Endpoints};
pub use config::{load_app_config, load_app_config_from_env};
pub use failure::FailureKind;
pub use records::{CategoryDescriptor, ProductRecord, SalesOutcome};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
