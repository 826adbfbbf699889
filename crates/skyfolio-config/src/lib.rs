//! Configuration for Skyfolio.
//!
//! Settings persist to disk as `config.ron`. Every section is
//! `#[serde(default)]`, so older or partial files keep loading, and command
//! line flags override whatever was loaded.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    Config, DebugConfig, EnvironmentConfig, MotionConfig, SessionConfig, WindowConfig,
    default_config_dir,
};
pub use error::ConfigError;
