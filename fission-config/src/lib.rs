//! # Fission Configuration System
//!
//! Layered configuration for the chain-reaction simulator and its
//! histogram renderer.
//!
//! ## Features
//! - **Layering**: defaults, YAML files and `FISSION_*` environment variables
//! - **Eager validation**: probability sums, ranges and colours are checked
//!   before a run starts

#![warn(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use tracing::debug;
use validator::Validate;

mod error;
mod render;
mod simulation;
pub mod validation;

pub use error::ConfigError;
pub use render::RenderConfig;
pub use simulation::{ProbabilityConfig, SimulationConfig};

const BASE_FILE: &str = "config/fission.yaml";
const ENV_PREFIX: &str = "FISSION_";

/// Top‑level configuration container.
#[derive(Debug, Serialize, Deserialize, Validate, Default, Clone, PartialEq)]
#[serde(default)]
pub struct FissionConfig {
    /// Chain-reaction parameters and seed.
    #[validate(nested)]
    pub simulation: SimulationConfig,

    /// Histogram surface settings.
    #[validate(nested)]
    pub render: RenderConfig,
}

impl FissionConfig {
    /// Load configuration from default files and environment.
    ///
    /// Hierarchy:
    /// 1. Default values
    /// 2. `config/fission.yaml`, if present
    /// 3. `config/<FISSION_ENV>.yaml`, if present
    /// 4. `FISSION_*` environment variables (`__` separates nested keys)
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(FissionConfig::default()));

        if Path::new(BASE_FILE).exists() {
            figment = figment.merge(Yaml::file(BASE_FILE));
        } else {
            debug!("{} not found, using default configuration", BASE_FILE);
        }

        if let Ok(env) = std::env::var("FISSION_ENV") {
            let env_file = format!("config/{}.yaml", env);
            if Path::new(&env_file).exists() {
                figment = figment.merge(Yaml::file(env_file));
            }
        }

        Self::extract(figment.merge(Env::prefixed(ENV_PREFIX).split("__")))
    }

    /// Load configuration from a specific file, still honouring environment overrides.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(PathBuf::from(path)));
        }

        Self::extract(
            Figment::from(Serialized::defaults(FissionConfig::default()))
                .merge(Yaml::file(path))
                .merge(Env::prefixed(ENV_PREFIX).split("__")),
        )
    }

    /// [`load_from_path`](Self::load_from_path) when a path is given, [`load`](Self::load) otherwise.
    pub fn resolve(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_from_path(path),
            None => Self::load(),
        }
    }

    fn extract(figment: Figment) -> Result<Self, ConfigError> {
        figment
            .extract()
            .map_err(ConfigError::from)
            .and_then(|config: Self| {
                config.validate()?;
                Ok(config)
            })
    }
}
