// Simulation source for synthesized existence and reputation facts
// No real network lookups are made; every fake fact is drawn from here

use rand::Rng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::app_config::ConfigError;

/// Supplies pseudo-random samples keyed by `(subject, facet)`
pub trait SimulationSource: Send + Sync + fmt::Debug {
    /// A sample in `[0, 1)`
    fn sample(&self, subject: &str, facet: &str) -> f64;

    /// True with probability `p`
    fn chance(&self, subject: &str, facet: &str, p: f64) -> bool {
        self.sample(subject, facet) < p
    }

    /// An index in `0..n`
    fn pick(&self, subject: &str, facet: &str, n: usize) -> usize {
        if n == 0 {
            return 0;
        }
        ((self.sample(subject, facet) * n as f64) as usize).min(n - 1)
    }

    /// A value in `low..=high`
    fn between(&self, subject: &str, facet: &str, low: u32, high: u32) -> u32 {
        if high <= low {
            return low;
        }
        let span = (high - low + 1) as usize;
        low + self.pick(subject, facet, span) as u32
    }
}

// =============================================================================
// IMPLEMENTATIONS
// =============================================================================

/// Deterministic source: the same subject always yields the same facts
#[derive(Debug, Clone)]
pub struct HashedSimulation {
    salt: String,
}

impl HashedSimulation {
    pub fn new(salt: impl Into<String>) -> Self {
        Self { salt: salt.into() }
    }
}

impl Default for HashedSimulation {
    fn default() -> Self {
        Self::new("scamguard")
    }
}

impl SimulationSource for HashedSimulation {
    fn sample(&self, subject: &str, facet: &str) -> f64 {
        let mut hasher = Sha256::new();
        hasher.update(self.salt.as_bytes());
        hasher.update(b"|");
        hasher.update(subject.as_bytes());
        hasher.update(b"|");
        hasher.update(facet.as_bytes());
        let digest = hasher.finalize();

        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&digest[..8]);
        // Top 53 bits fill an f64 mantissa exactly
        (u64::from_be_bytes(bytes) >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// Fresh randomness per call
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomSimulation;

impl SimulationSource for RandomSimulation {
    fn sample(&self, _subject: &str, _facet: &str) -> f64 {
        rand::thread_rng().gen::<f64>()
    }
}

/// Returns the same sample for everything; used by tests
#[derive(Debug, Clone, Copy)]
pub struct FixedSimulation(pub f64);

impl SimulationSource for FixedSimulation {
    fn sample(&self, _subject: &str, _facet: &str) -> f64 {
        self.0.clamp(0.0, 0.999_999)
    }
}

// =============================================================================
// MODE SELECTION
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimulationMode {
    #[default]
    Hashed,
    Random,
}

impl SimulationMode {
    pub fn build(&self) -> Arc<dyn SimulationSource> {
        match self {
            SimulationMode::Hashed => Arc::new(HashedSimulation::default()),
            SimulationMode::Random => Arc::new(RandomSimulation),
        }
    }
}

impl FromStr for SimulationMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hashed" | "deterministic" => Ok(SimulationMode::Hashed),
            "random" => Ok(SimulationMode::Random),
            other => Err(ConfigError::InvalidValue(
                "SCAMGUARD_SIMULATION".to_string(),
                format!("unknown simulation mode '{}'", other),
            )),
        }
    }
}
