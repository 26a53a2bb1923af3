use std::time::Instant;

use rand::Rng;
use tracing::{debug, info};

use crate::activation::activation::{Activation, SignActivation};
use crate::data::dataset::Dataset;
use crate::error::{NnError, Result};
use crate::math::init::WeightInit;
use crate::train::epoch_stats::EpochStats;
use crate::train::metrics::Classifier;
use crate::train::train_config::TrainConfig;

/// A single linear threshold unit trained with the perceptron learning rule.
///
/// The bias is the weight of an implicit input that is always 1. The length
/// of `weights` is fixed at construction; training only changes values.
#[derive(Debug, Clone)]
pub struct Perceptron<A: Activation = SignActivation> {
    weights: Vec<f64>,
    bias_weight: f64,
    activation: A,
    epoch_count: usize,
}

impl<A: Activation> Perceptron<A> {
    /// All weights and the bias start at zero.
    pub fn new(input_dimension: usize, activation: A, epoch_count: usize) -> Result<Self> {
        check_construction(input_dimension, epoch_count)?;
        Ok(Perceptron {
            weights: vec![0.0; input_dimension],
            bias_weight: 0.0,
            activation,
            epoch_count,
        })
    }

    /// Draws the weight vector from `init`; the bias still starts at zero.
    pub fn with_init<R: Rng + ?Sized>(
        input_dimension: usize,
        activation: A,
        epoch_count: usize,
        init: WeightInit,
        rng: &mut R,
    ) -> Result<Self> {
        check_construction(input_dimension, epoch_count)?;
        let weights = (0..input_dimension).map(|_| init.sample(rng)).collect();
        Ok(Perceptron { weights, bias_weight: 0.0, activation, epoch_count })
    }

    pub fn input_dimension(&self) -> usize {
        self.weights.len()
    }

    pub fn epoch_count(&self) -> usize {
        self.epoch_count
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn bias_weight(&self) -> f64 {
        self.bias_weight
    }

    pub fn activation(&self) -> &A {
        &self.activation
    }

    /// `bias + Σ wᵢ·xᵢ`, accumulated in index order.
    fn weighted_sum(&self, row: &[f64]) -> f64 {
        let mut sum = self.bias_weight;
        for (w, x) in self.weights.iter().zip(row) {
            sum += w * x;
        }
        sum
    }

    fn check_width(&self, width: usize) -> Result<()> {
        if width == self.input_dimension() {
            Ok(())
        } else {
            Err(NnError::DimensionMismatch { expected: self.input_dimension(), actual: width })
        }
    }

    /// Evaluates one row. The row must have exactly `input_dimension` values.
    pub fn feedforward(&self, row: &[f64]) -> Result<f64> {
        self.check_width(row.len())?;
        Ok(self.activation.apply(self.weighted_sum(row)))
    }

    pub fn train(&mut self, dataset: &Dataset, learning_rate: f64) -> Result<()> {
        self.train_with(dataset, &TrainConfig::new(learning_rate))
    }

    /// Runs the full epoch budget over `dataset` in order, updating after
    /// every sample:
    ///
    /// ```text
    /// error = label - prediction
    /// wᵢ   += learning_rate · error · xᵢ
    /// bias += learning_rate · error
    /// ```
    ///
    /// Fails before the first update if the dataset width or learning rate
    /// is wrong. There is no early exit once every sample is classified.
    pub fn train_with(&mut self, dataset: &Dataset, config: &TrainConfig) -> Result<()> {
        self.check_width(dataset.feature_width())?;
        config.validate()?;

        let learning_rate = config.learning_rate;
        info!(
            inputs = self.input_dimension(),
            samples = dataset.sample_count(),
            epochs = self.epoch_count,
            learning_rate,
            "training perceptron"
        );

        for epoch in 1..=self.epoch_count {
            let t_start = Instant::now();
            let mut misclassified = 0;

            for (row, label) in dataset.iter() {
                let prediction = self.activation.apply(self.weighted_sum(row));
                let error = label - prediction;
                if error != 0.0 {
                    misclassified += 1;
                }

                for (w, x) in self.weights.iter_mut().zip(row) {
                    *w += learning_rate * error * x;
                }
                self.bias_weight += learning_rate * error;
            }

            let stats = EpochStats::new(
                epoch,
                self.epoch_count,
                misclassified,
                dataset.sample_count(),
                t_start.elapsed().as_millis() as u64,
            );
            debug!(epoch, misclassified, accuracy = stats.accuracy, "perceptron epoch");
            config.report(stats);
        }

        info!(weights = ?self.weights, bias = self.bias_weight, "perceptron trained");
        Ok(())
    }
}

fn check_construction(input_dimension: usize, epoch_count: usize) -> Result<()> {
    if input_dimension == 0 {
        return Err(NnError::ZeroDimension { name: "input dimension" });
    }
    if epoch_count == 0 {
        return Err(NnError::ZeroEpochs);
    }
    Ok(())
}

impl<A: Activation> Classifier for Perceptron<A> {
    fn input_dimension(&self) -> usize {
        self.weights.len()
    }

    fn classify(&self, row: &[f64]) -> Result<Vec<f64>> {
        self.feedforward(row).map(|y| vec![y])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::toy;
    use std::sync::mpsc;

    #[test]
    fn starts_at_zero() {
        let p = Perceptron::new(3, SignActivation, 10).unwrap();
        assert_eq!(p.weights(), &[0.0, 0.0, 0.0]);
        assert_eq!(p.bias_weight(), 0.0);
        assert_eq!(p.epoch_count(), 10);
        // Zero sum sits on the threshold, which the sign function maps to +1.
        assert_eq!(p.feedforward(&[5.0, -2.0, 1.0]).unwrap(), 1.0);
    }

    #[test]
    fn rejects_zero_dimension_and_epochs() {
        assert_eq!(
            Perceptron::new(0, SignActivation, 10).unwrap_err(),
            NnError::ZeroDimension { name: "input dimension" }
        );
        assert_eq!(Perceptron::new(2, SignActivation, 0).unwrap_err(), NnError::ZeroEpochs);
    }

    #[test]
    fn single_update_follows_learning_rule() {
        // One epoch over one sample: prediction +1, label -1, error -2.
        let mut p = Perceptron::new(2, SignActivation, 1).unwrap();
        let ds = Dataset::new(vec![vec![1.0, 3.0]], vec![-1.0]).unwrap();
        p.train(&ds, 0.5).unwrap();
        assert_eq!(p.weights(), &[-1.0, -3.0]);
        assert_eq!(p.bias_weight(), -1.0);
    }

    #[test]
    fn invalid_training_call_leaves_weights_untouched() {
        let mut p = Perceptron::new(2, SignActivation, 5).unwrap();
        let narrow = toy::integer_threshold(0..5, 2).unwrap();
        assert_eq!(
            p.train(&narrow, 0.1).unwrap_err(),
            NnError::DimensionMismatch { expected: 2, actual: 1 }
        );
        let and = toy::and_gate().unwrap();
        assert_eq!(p.train(&and, 0.0).unwrap_err(), NnError::InvalidLearningRate(0.0));
        assert_eq!(p.weights(), &[0.0, 0.0]);
        assert_eq!(p.bias_weight(), 0.0);
    }

    #[test]
    fn wrong_width_feedforward_fails() {
        let p = Perceptron::new(2, SignActivation, 1).unwrap();
        assert!(p.feedforward(&[1.0]).is_err());
        assert!(p.feedforward(&[1.0, 2.0, 3.0]).is_err());
    }

    #[test]
    fn reports_every_epoch_even_after_converging() {
        let mut p = Perceptron::new(2, SignActivation, 100).unwrap();
        let (tx, rx) = mpsc::channel();
        p.train_with(&toy::and_gate().unwrap(), &TrainConfig::new(0.1).with_progress(tx))
            .unwrap();
        let stats: Vec<EpochStats> = rx.try_iter().collect();
        assert_eq!(stats.len(), 100);
        assert_eq!(stats[0].epoch, 1);
        assert!(!stats[0].is_clean());
        let last = stats.last().unwrap();
        assert_eq!(last.total_epochs, 100);
        assert!(last.is_clean());
        assert_eq!(last.accuracy, 1.0);
    }

    #[test]
    fn dropped_receiver_does_not_stop_training() {
        let mut p = Perceptron::new(2, SignActivation, 100).unwrap();
        let (tx, rx) = mpsc::channel();
        drop(rx);
        p.train_with(&toy::and_gate().unwrap(), &TrainConfig::new(0.1).with_progress(tx))
            .unwrap();
        let and = toy::and_gate().unwrap();
        for (row, label) in and.iter() {
            assert_eq!(p.feedforward(row).unwrap(), label);
        }
    }
}
