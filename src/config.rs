//! Run configuration for the autoplay binary.
//!
//! Values come from an optional TOML file; command-line flags win over the file.
//!
//! ```toml
//! seed = 42
//! policy = "random"
//! max_moves = 500
//! ```

use std::fs;
use std::io;
use std::path::Path;

use serde::Deserialize;

use crate::policy::PolicyKind;

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    /// RNG seed; a fresh one is drawn when absent.
    pub seed: Option<u64>,
    pub policy: PolicyKind,
    /// Stop after this many accepted moves even if the game is not over.
    pub max_moves: Option<u32>,
}

impl RunConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Overlay command-line values; `None` keeps what the file said.
    pub fn merge_cli(
        mut self,
        seed: Option<u64>,
        policy: Option<PolicyKind>,
        max_moves: Option<u32>,
    ) -> Self {
        if seed.is_some() {
            self.seed = seed;
        }
        if let Some(p) = policy {
            self.policy = p;
        }
        if max_moves.is_some() {
            self.max_moves = max_moves;
        }
        self
    }
}
