//! Configuration for tree felling.
//!
//! Settings persist to disk as `config.ron`, can be overridden from the
//! command line via clap, and are checked for hot-reload changes.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{Config, DebugConfig, FellConfig, MAX_GATHER_RADIUS, default_config_dir};
pub use error::ConfigError;
