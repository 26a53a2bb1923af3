use crate::data::dataset::Dataset;
use crate::error::{NnError, Result};

/// Anything that maps one input row to one or more ±1 labels.
pub trait Classifier {
    fn input_dimension(&self) -> usize;

    fn classify(&self, row: &[f64]) -> Result<Vec<f64>>;
}

/// Fraction of rows in `dataset` for which every output of `model` equals
/// the row's label.
pub fn accuracy<C: Classifier + ?Sized>(model: &C, dataset: &Dataset) -> Result<f64> {
    if dataset.feature_width() != model.input_dimension() {
        return Err(NnError::DimensionMismatch {
            expected: model.input_dimension(),
            actual: dataset.feature_width(),
        });
    }

    let mut correct = 0usize;
    for (row, label) in dataset.iter() {
        let outputs = model.classify(row)?;
        if outputs.iter().all(|&y| y == label) {
            correct += 1;
        }
    }
    Ok(correct as f64 / dataset.sample_count() as f64)
}
