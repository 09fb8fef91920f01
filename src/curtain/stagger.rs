use crate::foundation::{
    error::{CurtainError, CurtainResult},
    math::Rng64,
};

/// Delay table used by the overlay and entrance variants.
pub const STABLE_DELAYS: [f64; 10] = [0.02, 0.05, 0.03, 0.06, 0.04, 0.07, 0.03, 0.05, 0.04, 0.02];

/// How per-point start delays are produced.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum StaggerPolicy {
    /// A fixed, hand-tuned table. The first N entries are used on every cycle.
    Table { delays: Vec<f64> },
    /// Each delay drawn uniformly from `[0, max_jitter)`, redrawn every cycle.
    Jitter { max_jitter: f64, seed: u64 },
}

impl Default for StaggerPolicy {
    fn default() -> Self {
        Self::Table {
            delays: STABLE_DELAYS.to_vec(),
        }
    }
}

impl StaggerPolicy {
    pub fn validate(&self, points: usize) -> CurtainResult<()> {
        match self {
            Self::Table { delays } => {
                if delays.len() < points {
                    return Err(CurtainError::validation(format!(
                        "stagger table has {} entries but the curtain has {points} points",
                        delays.len()
                    )));
                }
                if delays.iter().any(|d| !d.is_finite() || *d < 0.0) {
                    return Err(CurtainError::validation(
                        "stagger table entries must be finite and >= 0",
                    ));
                }
            }
            Self::Jitter { max_jitter, .. } => {
                if !max_jitter.is_finite() || *max_jitter < 0.0 {
                    return Err(CurtainError::validation(
                        "stagger max_jitter must be finite and >= 0",
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Stateful delay generator for one curtain.
///
/// The jitter stream is seeded once and keeps advancing, so consecutive cycles get fresh delays
/// while a given seed still replays the same sequence of cycles.
#[derive(Clone, Debug)]
pub struct Stagger {
    policy: StaggerPolicy,
    rng: Rng64,
}

impl Stagger {
    pub fn new(policy: StaggerPolicy) -> Self {
        let seed = match &policy {
            StaggerPolicy::Jitter { seed, .. } => *seed,
            StaggerPolicy::Table { .. } => 0,
        };
        Self {
            policy,
            rng: Rng64::new(seed),
        }
    }

    pub fn policy(&self) -> &StaggerPolicy {
        &self.policy
    }

    /// `n` start delays in seconds, one per control point.
    pub fn compute_delays(&mut self, n: usize) -> Vec<f64> {
        match &self.policy {
            StaggerPolicy::Table { delays } => delays.iter().copied().take(n).collect(),
            StaggerPolicy::Jitter { max_jitter, .. } => jitter_delays(&mut self.rng, n, *max_jitter),
        }
    }
}

pub fn jitter_delays(rng: &mut Rng64, n: usize, max_jitter: f64) -> Vec<f64> {
    (0..n).map(|_| rng.next_f64_01() * max_jitter).collect()
}

/// Constant lag for one layer so the layers ripple one after the other.
pub fn per_layer_stagger(layer_index: usize, total_layers: usize, per_path_delay: f64) -> f64 {
    debug_assert!(layer_index < total_layers, "layer index out of range");
    (layer_index as f64) * per_path_delay
}

#[cfg(test)]
#[path = "../../tests/unit/curtain/stagger.rs"]
mod tests;
