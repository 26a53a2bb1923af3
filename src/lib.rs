pub mod error;
pub mod activation;
pub mod math;
pub mod data;
pub mod perceptron;
pub mod layers;
pub mod network;
pub mod train;

// Convenience re-exports
pub use error::{NnError, Result};
pub use activation::activation::{Activation, SignActivation, TanhActivation};
pub use math::{init::WeightInit, matrix::Matrix};
pub use data::dataset::Dataset;
pub use perceptron::perceptron::Perceptron;
pub use layers::dense::Layer;
pub use network::mlp::Mlp;
pub use train::{accuracy, Classifier, EpochStats, TrainConfig};
