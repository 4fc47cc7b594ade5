//! Command-line overrides for the persisted configuration.

use std::path::PathBuf;

use clap::Args;

use crate::Config;

/// Shared command-line arguments.
///
/// CLI values override settings loaded from `config.ron`. Binaries embed
/// this with `#[command(flatten)]`.
#[derive(Args, Debug, Default, Clone)]
pub struct CliArgs {
    /// Maximum voxels broken per felled tree.
    #[arg(long)]
    pub max_break_count: Option<u32>,

    /// Radius around each broken voxel to gather drops from.
    #[arg(long)]
    pub gather_radius: Option<u32>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(max) = args.max_break_count {
            self.fell.max_break_count = max;
        }
        if let Some(radius) = args.gather_radius {
            self.fell.gather_radius = radius;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            max_break_count: Some(42),
            log_level: Some("debug".to_string()),
            ..CliArgs::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.fell.max_break_count, 42);
        assert_eq!(config.debug.log_level, "debug");
        // Non-overridden fields retain defaults
        assert_eq!(config.fell.gather_radius, 4);
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, original);
    }
}
