mod app_config;
mod config;
pub mod geometry;
mod location;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use location::{LocationResult, Point, ProviderKind};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    #[error("coordinate {axis} is not a finite number: {value}")]
    NonFiniteCoordinate { axis: &'static str, value: f64 },

    #[error("input address must not be empty")]
    EmptyAddress,
}
