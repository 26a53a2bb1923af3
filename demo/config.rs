use std::path::Path;

use anyhow::Context as _;
use serde::Deserialize;

/// Knobs for the demonstration scenarios.
/// Also defines the `--config` JSON format (every field can be omitted).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Seed for the shared generator; entropy when absent.
    pub seed: Option<u64>,
    pub learning_rate: f64,
    /// Overrides every scenario's own epoch budget.
    pub epochs: Option<usize>,
    /// Hidden units for the XOR network.
    pub hidden_units: usize,
    /// Half-width of the uniform range the XOR network starts from.
    pub init_scale: f64,
    /// Random training points for `model_linear`.
    pub linear_samples: usize,
    /// Fresh points classified after training `model_linear`.
    pub prediction_samples: usize,
    /// Points are drawn from `[-point_bound, point_bound]²`.
    pub point_bound: i64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        DemoConfig {
            seed: None,
            learning_rate: 0.1,
            epochs: None,
            hidden_units: 4,
            init_scale: 0.5,
            linear_samples: 50,
            prediction_samples: 20,
            point_bound: 20,
        }
    }
}

impl DemoConfig {
    pub fn load_json(path: &Path) -> anyhow::Result<DemoConfig> {
        let file = std::fs::File::open(path)
            .with_context(|| format!("opening config {}", path.display()))?;
        let reader = std::io::BufReader::new(file);
        serde_json::from_reader(reader)
            .with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn epochs_or(&self, default: usize) -> usize {
        self.epochs.unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg: DemoConfig = serde_json::from_str(r#"{"seed": 7, "hidden_units": 8}"#).unwrap();
        assert_eq!(cfg.seed, Some(7));
        assert_eq!(cfg.hidden_units, 8);
        assert_eq!(cfg.learning_rate, 0.1);
        assert_eq!(cfg.epochs_or(100), 100);
    }

    #[test]
    fn epoch_override_wins() {
        let cfg: DemoConfig = serde_json::from_str(r#"{"epochs": 5}"#).unwrap();
        assert_eq!(cfg.epochs_or(1000), 5);
    }
}
