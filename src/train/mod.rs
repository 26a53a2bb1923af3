pub mod epoch_stats;
pub mod metrics;
pub mod train_config;

pub use epoch_stats::EpochStats;
pub use metrics::{accuracy, Classifier};
pub use train_config::TrainConfig;
