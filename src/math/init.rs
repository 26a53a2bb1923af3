use rand::Rng;
use serde::{Serialize, Deserialize};

/// How a fresh weight matrix is filled.
///
/// Randomness is always supplied by the caller, so a seeded generator makes
/// every construction reproducible.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WeightInit {
    /// Every weight starts at 0.0. Fully deterministic.
    Zeros,
    /// Uniform samples from `[-scale, scale)`.
    Uniform { scale: f64 },
}

impl WeightInit {
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match *self {
            WeightInit::Zeros => 0.0,
            WeightInit::Uniform { scale } => (rng.gen::<f64>() * 2.0 - 1.0) * scale,
        }
    }
}

impl Default for WeightInit {
    fn default() -> Self {
        WeightInit::Uniform { scale: 0.5 }
    }
}
