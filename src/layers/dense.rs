use rand::Rng;

use crate::error::{NnError, Result};
use crate::math::{init::WeightInit, matrix::Matrix};

/// A fully connected layer of perceptron-like units.
///
/// `weights` has shape (units × input_size): row `k` holds the incoming
/// weights of unit `k`. The shape never changes after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    weights: Matrix,
    biases: Vec<f64>,
}

impl Layer {
    pub fn new<R: Rng + ?Sized>(
        units: usize,
        input_size: usize,
        init: WeightInit,
        rng: &mut R,
    ) -> Result<Layer> {
        if units == 0 {
            return Err(NnError::ZeroDimension { name: "layer units" });
        }
        if input_size == 0 {
            return Err(NnError::ZeroDimension { name: "layer input size" });
        }

        let weights = Matrix::from_init(units, input_size, init, rng);
        let biases = (0..units).map(|_| init.sample(rng)).collect();
        Ok(Layer { weights, biases })
    }

    /// Wraps explicit weights; `biases` needs one entry per weight row.
    pub fn from_parts(weights: Matrix, biases: Vec<f64>) -> Result<Layer> {
        if weights.rows() == 0 {
            return Err(NnError::ZeroDimension { name: "layer units" });
        }
        if weights.cols() == 0 {
            return Err(NnError::ZeroDimension { name: "layer input size" });
        }
        if biases.len() != weights.rows() {
            return Err(NnError::LayerShapeMismatch {
                expected: format!("{} biases", weights.rows()),
                actual: format!("{} biases", biases.len()),
            });
        }
        Ok(Layer { weights, biases })
    }

    pub fn units(&self) -> usize {
        self.weights.rows()
    }

    pub fn input_size(&self) -> usize {
        self.weights.cols()
    }

    pub fn weights(&self) -> &Matrix {
        &self.weights
    }

    pub fn biases(&self) -> &[f64] {
        &self.biases
    }

    /// Pre-activation sums `z_k = b_k + Σ w_ki · x_i`, one per unit.
    /// `input` must already be `input_size` wide.
    pub(crate) fn weighted_sums(&self, input: &[f64]) -> Vec<f64> {
        debug_assert_eq!(input.len(), self.input_size());
        self.weights
            .iter_rows()
            .zip(&self.biases)
            .map(|(row, &bias)| {
                let mut sum = bias;
                for (w, x) in row.iter().zip(input) {
                    sum += w * x;
                }
                sum
            })
            .collect()
    }

    /// Pushes per-unit error terms back to this layer's inputs through the
    /// current weights: `e_i = Σ_k w_ki · δ_k`.
    ///
    /// Must be called before `apply_deltas` for the same sample so the
    /// error reflects the weights that produced the output.
    pub(crate) fn backpropagate(&self, deltas: &[f64]) -> Vec<f64> {
        debug_assert_eq!(deltas.len(), self.units());
        (0..self.input_size())
            .map(|i| {
                let mut sum = 0.0;
                for (k, delta) in deltas.iter().enumerate() {
                    sum += self.weights.get(k, i) * delta;
                }
                sum
            })
            .collect()
    }

    /// `w_ki += lr · δ_k · x_i` and `b_k += lr · δ_k`.
    pub(crate) fn apply_deltas(&mut self, deltas: &[f64], inputs: &[f64], learning_rate: f64) {
        debug_assert_eq!(deltas.len(), self.units());
        debug_assert_eq!(inputs.len(), self.input_size());
        for (k, &delta) in deltas.iter().enumerate() {
            let step = learning_rate * delta;
            for (w, x) in self.weights.row_mut(k).iter_mut().zip(inputs) {
                *w += step * x;
            }
            self.biases[k] += step;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn layer() -> Layer {
        let weights = Matrix::from_data(vec![vec![1.0, -2.0], vec![0.5, 0.25]]).unwrap();
        Layer::from_parts(weights, vec![0.5, -1.0]).unwrap()
    }

    #[test]
    fn new_has_requested_shape() {
        let mut rng = StdRng::seed_from_u64(9);
        let l = Layer::new(3, 2, WeightInit::Uniform { scale: 0.5 }, &mut rng).unwrap();
        assert_eq!((l.units(), l.input_size()), (3, 2));
        assert_eq!(l.biases().len(), 3);
    }

    #[test]
    fn new_rejects_zero_sizes() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(Layer::new(0, 2, WeightInit::Zeros, &mut rng).is_err());
        assert!(Layer::new(2, 0, WeightInit::Zeros, &mut rng).is_err());
    }

    #[test]
    fn from_parts_requires_one_bias_per_unit() {
        let weights = Matrix::zeros(2, 3);
        assert!(matches!(
            Layer::from_parts(weights, vec![0.0]),
            Err(NnError::LayerShapeMismatch { .. })
        ));
    }

    #[test]
    fn from_parts_rejects_empty_shapes() {
        assert_eq!(
            Layer::from_parts(Matrix::zeros(0, 2), vec![]).unwrap_err(),
            NnError::ZeroDimension { name: "layer units" }
        );
        assert_eq!(
            Layer::from_parts(Matrix::zeros(1, 0), vec![0.0]).unwrap_err(),
            NnError::ZeroDimension { name: "layer input size" }
        );
    }

    #[test]
    fn weighted_sums_include_bias() {
        assert_eq!(layer().weighted_sums(&[2.0, 1.0]), vec![0.5, 0.25]);
    }

    #[test]
    fn backpropagate_uses_weight_columns() {
        // e_0 = 1·1 + 0.5·2, e_1 = -2·1 + 0.25·2
        assert_eq!(layer().backpropagate(&[1.0, 2.0]), vec![2.0, -1.5]);
    }

    #[test]
    fn apply_deltas_updates_weights_and_biases() {
        let mut l = layer();
        l.apply_deltas(&[1.0, 0.0], &[2.0, -1.0], 0.5);
        assert_eq!(l.weights().row(0), Some(&[2.0, -2.5][..]));
        assert_eq!(l.weights().row(1), Some(&[0.5, 0.25][..]));
        assert_eq!(l.biases(), &[1.0, -1.0]);
    }
}
