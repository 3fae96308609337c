//! Command-line overrides shared by the globe binaries.

use crate::{ConfigError, GlobeConfig};
use clap::Args;
use std::path::PathBuf;

/// Globe configuration arguments.
///
/// Values given on the command line override the ones loaded from `--config`.
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// JSON config file; missing fields take their defaults.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Lattice half-extent.
    #[arg(long, allow_negative_numbers = true)]
    pub resolution: Option<i32>,

    /// Shell radius.
    #[arg(long, allow_negative_numbers = true)]
    pub radius: Option<f32>,

    /// Noise seed.
    #[arg(long, allow_negative_numbers = true)]
    pub seed: Option<i32>,

    /// Land threshold; cells with noise above it become land.
    #[arg(long, allow_negative_numbers = true)]
    pub threshold: Option<f32>,

    /// Seconds of post-release inertia.
    #[arg(long)]
    pub inertia: Option<f32>,
}

impl GlobeConfig {
    /// Apply command-line overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &ConfigArgs) {
        if let Some(r) = args.resolution {
            self.terrain.resolution = r;
        }
        if let Some(r) = args.radius {
            self.terrain.radius = r;
        }
        if let Some(s) = args.seed {
            self.terrain.noise_seed = s;
        }
        if let Some(t) = args.threshold {
            self.terrain.land_threshold = t;
        }
        if let Some(i) = args.inertia {
            self.spin.inertia_duration = i;
        }
    }
}

impl ConfigArgs {
    /// Load `--config` if given, then apply the overrides.
    pub fn resolve(&self) -> Result<GlobeConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => GlobeConfig::load(path)?,
            None => GlobeConfig::default(),
        };
        config.apply_cli_overrides(self);
        Ok(config)
    }
}
