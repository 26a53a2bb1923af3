use serde::{Serialize, Deserialize};

/// Per-epoch training statistics emitted by both engines.
///
/// When a `progress_tx` channel is configured in `TrainConfig`, the training
/// loop sends one `EpochStats` value at the end of every completed epoch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochStats {
    /// 1-based epoch number.
    pub epoch: usize,
    /// Total epochs this run will execute.
    pub total_epochs: usize,
    /// Samples whose prediction disagreed with the label when visited,
    /// i.e. before that sample's own weight update.
    pub misclassified: usize,
    /// `1 - misclassified / samples`.
    pub accuracy: f64,
    /// Wall-clock duration of this single epoch in milliseconds.
    pub elapsed_ms: u64,
}

impl EpochStats {
    pub(crate) fn new(
        epoch: usize,
        total_epochs: usize,
        misclassified: usize,
        samples: usize,
        elapsed_ms: u64,
    ) -> Self {
        EpochStats {
            epoch,
            total_epochs,
            misclassified,
            accuracy: 1.0 - misclassified as f64 / samples as f64,
            elapsed_ms,
        }
    }

    pub fn is_clean(&self) -> bool {
        self.misclassified == 0
    }
}
