use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Termination settings for one optimization run.
///
/// Supplied once at the start of a run and never mutated for that run's
/// lifetime. A caller may build a fresh config between runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationConfig {
    /// Overall score at which the run stops immediately.
    pub target_score: f64,
    /// Hard limit on the number of rounds.
    pub max_iterations: u32,
    /// Window size for stagnation detection.
    pub early_stopping_rounds: u32,
    /// Minimum absolute per-round score delta that counts as improvement.
    pub min_improvement: f64,
}

impl Default for OptimizationConfig {
    fn default() -> Self {
        Self {
            target_score: 0.8,
            max_iterations: 10,
            early_stopping_rounds: 2,
            min_improvement: 0.01,
        }
    }
}

impl OptimizationConfig {
    /// Loads the config from environment variables, falling back to defaults
    /// for anything unset. Reads `.env` if present.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();
        Ok(Self {
            target_score: env_f64("TAILOR_TARGET_SCORE", defaults.target_score)?,
            max_iterations: env_u32("TAILOR_MAX_ITERATIONS", defaults.max_iterations)?,
            early_stopping_rounds: env_u32(
                "TAILOR_EARLY_STOPPING_ROUNDS",
                defaults.early_stopping_rounds,
            )?,
            min_improvement: env_f64("TAILOR_MIN_IMPROVEMENT", defaults.min_improvement)?,
        })
    }
}

fn env_f64(key: &str, default: f64) -> Result<f64> {
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<f64>()
            .with_context(|| format!("'{key}' must be a number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}

fn env_u32(key: &str, default: u32) -> Result<u32> {
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<u32>()
            .with_context(|| format!("'{key}' must be an integer, got '{raw}'")),
        Err(_) => Ok(default),
    }
}
