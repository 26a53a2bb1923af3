use std::sync::mpsc;

use crate::error::{check_learning_rate, Result};
use crate::train::epoch_stats::EpochStats;

/// Configuration for a single `train_with` run.
///
/// # Fields
/// - `learning_rate`: step size applied to every weight update; must be > 0
/// - `progress_tx`: optional channel sender; one `EpochStats` is sent per
///   completed epoch. A dropped receiver is ignored and the
///   run still completes its full epoch budget.
#[derive(Debug, Clone)]
pub struct TrainConfig {
    pub learning_rate: f64,
    pub progress_tx: Option<mpsc::Sender<EpochStats>>,
}

impl TrainConfig {
    /// Creates a minimal `TrainConfig` with no progress channel.
    pub fn new(learning_rate: f64) -> Self {
        TrainConfig { learning_rate, progress_tx: None }
    }

    pub fn with_progress(mut self, tx: mpsc::Sender<EpochStats>) -> Self {
        self.progress_tx = Some(tx);
        self
    }

    pub(crate) fn validate(&self) -> Result<()> {
        check_learning_rate(self.learning_rate)
    }

    pub(crate) fn report(&self, stats: EpochStats) {
        if let Some(ref tx) = self.progress_tx {
            // Training never stops early, so a closed channel only means
            // nobody is listening any more.
            let _ = tx.send(stats);
        }
    }
}
