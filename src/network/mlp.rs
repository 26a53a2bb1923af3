use std::time::Instant;

use rand::Rng;
use tracing::{debug, info};

use crate::activation::activation::{Activation, SignActivation};
use crate::data::dataset::Dataset;
use crate::error::{NnError, Result};
use crate::layers::dense::Layer;
use crate::math::init::WeightInit;
use crate::train::epoch_stats::EpochStats;
use crate::train::metrics::Classifier;
use crate::train::train_config::TrainConfig;

/// A two-layer perceptron: input → hidden → output.
///
/// Both layers share one activation. The hidden layer is `input_dimension`
/// wide on its input side, and the output layer takes exactly one input per
/// hidden unit.
#[derive(Debug, Clone)]
pub struct Mlp<A: Activation = SignActivation> {
    hidden: Layer,
    output: Layer,
    activation: A,
    epoch_count: usize,
}

/// Everything one forward pass produces, kept for the backward pass.
struct ForwardPass {
    hidden_sums: Vec<f64>,
    hidden: Vec<f64>,
    output_sums: Vec<f64>,
    output: Vec<f64>,
}

impl<A: Activation> Mlp<A> {
    /// Builds both layers, drawing every weight and bias from `init`.
    ///
    /// XOR setup: 4 hidden units, `WeightInit::Uniform { scale: 0.5 }`, 1000
    /// epochs at learning rate 0.1. Random starts with that setup learn XOR
    /// with high probability but not always; a start that must converge
    /// should come from [`Mlp::from_layers`].
    pub fn new<R: Rng + ?Sized>(
        input_dimension: usize,
        hidden_units: usize,
        output_units: usize,
        epoch_count: usize,
        activation: A,
        init: WeightInit,
        rng: &mut R,
    ) -> Result<Self> {
        if input_dimension == 0 {
            return Err(NnError::ZeroDimension { name: "input dimension" });
        }
        if hidden_units == 0 {
            return Err(NnError::ZeroDimension { name: "hidden units" });
        }
        if output_units == 0 {
            return Err(NnError::ZeroDimension { name: "output units" });
        }
        if epoch_count == 0 {
            return Err(NnError::ZeroEpochs);
        }

        let hidden = Layer::new(hidden_units, input_dimension, init, rng)?;
        let output = Layer::new(output_units, hidden_units, init, rng)?;
        Ok(Mlp { hidden, output, activation, epoch_count })
    }

    /// Uses pre-built layers as the starting weights.
    pub fn from_layers(
        hidden: Layer,
        output: Layer,
        epoch_count: usize,
        activation: A,
    ) -> Result<Self> {
        if epoch_count == 0 {
            return Err(NnError::ZeroEpochs);
        }
        if output.input_size() != hidden.units() {
            return Err(NnError::LayerShapeMismatch {
                expected: format!("output layer with {} inputs", hidden.units()),
                actual: format!("output layer with {} inputs", output.input_size()),
            });
        }
        Ok(Mlp { hidden, output, activation, epoch_count })
    }

    pub fn input_dimension(&self) -> usize {
        self.hidden.input_size()
    }

    pub fn hidden_units(&self) -> usize {
        self.hidden.units()
    }

    pub fn output_units(&self) -> usize {
        self.output.units()
    }

    pub fn epoch_count(&self) -> usize {
        self.epoch_count
    }

    pub fn hidden_layer(&self) -> &Layer {
        &self.hidden
    }

    pub fn output_layer(&self) -> &Layer {
        &self.output
    }

    pub fn activation(&self) -> &A {
        &self.activation
    }

    fn check_width(&self, width: usize) -> Result<()> {
        if width == self.input_dimension() {
            Ok(())
        } else {
            Err(NnError::DimensionMismatch { expected: self.input_dimension(), actual: width })
        }
    }

    fn forward(&self, row: &[f64]) -> ForwardPass {
        let hidden_sums = self.hidden.weighted_sums(row);
        let hidden: Vec<f64> = hidden_sums.iter().map(|&z| self.activation.apply(z)).collect();
        let output_sums = self.output.weighted_sums(&hidden);
        let output = output_sums.iter().map(|&u| self.activation.apply(u)).collect();
        ForwardPass { hidden_sums, hidden, output_sums, output }
    }

    /// One output value per output unit.
    pub fn feedforward(&self, row: &[f64]) -> Result<Vec<f64>> {
        self.check_width(row.len())?;
        Ok(self.forward(row).output)
    }

    pub fn train(&mut self, dataset: &Dataset, learning_rate: f64) -> Result<()> {
        self.train_with(dataset, &TrainConfig::new(learning_rate))
    }

    /// Online backpropagation for the full epoch budget, samples in order.
    ///
    /// Each row's label is the target for every output unit. Per sample:
    ///
    /// ```text
    /// δ_out[k]    = (label - y[k]) · f'(u[k])
    /// δ_hidden[j] = (Σ_k v[k][j] · δ_out[k]) · f'(z[j])   // v before update
    /// v += lr · δ_out ⊗ h,    w += lr · δ_hidden ⊗ x
    /// ```
    ///
    /// With the default sign activation `f'` is its tanh surrogate, see
    /// `SignActivation::derivative`.
    pub fn train_with(&mut self, dataset: &Dataset, config: &TrainConfig) -> Result<()> {
        self.check_width(dataset.feature_width())?;
        config.validate()?;

        let learning_rate = config.learning_rate;
        info!(
            inputs = self.input_dimension(),
            hidden = self.hidden_units(),
            outputs = self.output_units(),
            samples = dataset.sample_count(),
            epochs = self.epoch_count,
            learning_rate,
            "training mlp"
        );

        for epoch in 1..=self.epoch_count {
            let t_start = Instant::now();
            let mut misclassified = 0;

            for (row, label) in dataset.iter() {
                let pass = self.forward(row);

                if pass.output.iter().any(|&y| y != label) {
                    misclassified += 1;
                }

                let output_deltas: Vec<f64> = pass.output.iter()
                    .zip(&pass.output_sums)
                    .map(|(&y, &u)| (label - y) * self.activation.derivative(u))
                    .collect();

                // Error reaching the hidden units, through the output weights
                // that produced this sample's prediction.
                let hidden_deltas: Vec<f64> = self.output.backpropagate(&output_deltas)
                    .into_iter()
                    .zip(&pass.hidden_sums)
                    .map(|(err, &z)| err * self.activation.derivative(z))
                    .collect();

                self.output.apply_deltas(&output_deltas, &pass.hidden, learning_rate);
                self.hidden.apply_deltas(&hidden_deltas, row, learning_rate);
            }

            let stats = EpochStats::new(
                epoch,
                self.epoch_count,
                misclassified,
                dataset.sample_count(),
                t_start.elapsed().as_millis() as u64,
            );
            debug!(epoch, misclassified, accuracy = stats.accuracy, "mlp epoch");
            config.report(stats);
        }

        info!("mlp trained");
        Ok(())
    }
}

impl<A: Activation> Classifier for Mlp<A> {
    fn input_dimension(&self) -> usize {
        self.hidden.input_size()
    }

    fn classify(&self, row: &[f64]) -> Result<Vec<f64>> {
        self.feedforward(row)
    }
}
