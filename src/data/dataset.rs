use crate::error::{NnError, Result};

/// A labeled, rectangular training set.
///
/// Rows are samples, columns are features. Every label is -1 or +1. The
/// engines only ever borrow a `Dataset`; they never keep a reference to it
/// after `train` returns.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    features: Vec<Vec<f64>>,
    labels: Vec<f64>,
    feature_width: usize,
}

impl Dataset {
    pub fn new(features: Vec<Vec<f64>>, labels: Vec<f64>) -> Result<Dataset> {
        let feature_width = match features.first() {
            Some(first) => first.len(),
            None => return Err(NnError::EmptyDataset),
        };
        if feature_width == 0 {
            return Err(NnError::ZeroDimension { name: "feature width" });
        }
        if labels.len() != features.len() {
            return Err(NnError::SampleCountMismatch {
                expected: features.len(),
                actual: labels.len(),
            });
        }

        for (row, sample) in features.iter().enumerate() {
            if sample.len() != feature_width {
                return Err(NnError::RaggedRow {
                    row,
                    expected: feature_width,
                    actual: sample.len(),
                });
            }
            if let Some(column) = sample.iter().position(|x| !x.is_finite()) {
                return Err(NnError::NonFiniteFeature { row, column });
            }
        }

        let bad_label = labels.iter().enumerate().find(|&(_, &l)| l != 1.0 && l != -1.0);
        if let Some((row, &value)) = bad_label {
            return Err(NnError::InvalidLabel { row, value });
        }

        Ok(Dataset { features, labels, feature_width })
    }

    /// Builds a dataset from a flat row-major buffer with stride
    /// `feature_width`. `sample_count` must agree with both the buffer and
    /// the label vector.
    pub fn from_flat(
        sample_count: usize,
        feature_width: usize,
        buffer: &[f64],
        labels: Vec<f64>,
    ) -> Result<Dataset> {
        if sample_count == 0 {
            return Err(NnError::EmptyDataset);
        }
        if feature_width == 0 {
            return Err(NnError::ZeroDimension { name: "feature width" });
        }
        let expected = sample_count * feature_width;
        if buffer.len() != expected {
            return Err(NnError::FlatBufferLength { expected, actual: buffer.len() });
        }
        if labels.len() != sample_count {
            return Err(NnError::SampleCountMismatch {
                expected: sample_count,
                actual: labels.len(),
            });
        }

        let features = buffer.chunks_exact(feature_width).map(<[f64]>::to_vec).collect();
        Dataset::new(features, labels)
    }

    pub fn sample_count(&self) -> usize {
        self.features.len()
    }

    pub fn feature_width(&self) -> usize {
        self.feature_width
    }

    pub fn features(&self) -> &[Vec<f64>] {
        &self.features
    }

    pub fn labels(&self) -> &[f64] {
        &self.labels
    }

    /// Samples in dataset order.
    pub fn iter(&self) -> impl Iterator<Item = (&[f64], f64)> + '_ {
        self.features.iter().map(Vec::as_slice).zip(self.labels.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_from_rows() {
        let ds = Dataset::new(vec![vec![0.0, 1.0], vec![1.0, 0.0]], vec![1.0, -1.0]).unwrap();
        assert_eq!(ds.sample_count(), 2);
        assert_eq!(ds.feature_width(), 2);
        let rows: Vec<_> = ds.iter().collect();
        assert_eq!(rows[1], (&[1.0, 0.0][..], -1.0));
    }

    #[test]
    fn builds_from_flat_buffer() {
        let buffer = [0.0, 0.0, 0.0, 1.0, 1.0, 1.0];
        let ds = Dataset::from_flat(3, 2, &buffer, vec![-1.0, -1.0, 1.0]).unwrap();
        assert_eq!(ds.features()[1], vec![0.0, 1.0]);
        assert_eq!(ds.labels(), &[-1.0, -1.0, 1.0]);
    }

    #[test]
    fn flat_buffer_stride_must_match() {
        let err = Dataset::from_flat(3, 2, &[0.0; 5], vec![1.0; 3]).unwrap_err();
        assert_eq!(err, NnError::FlatBufferLength { expected: 6, actual: 5 });
        let err = Dataset::from_flat(3, 2, &[0.0; 6], vec![1.0; 2]).unwrap_err();
        assert_eq!(err, NnError::SampleCountMismatch { expected: 3, actual: 2 });
    }

    #[test]
    fn rejects_bad_shapes_and_labels() {
        assert_eq!(Dataset::new(vec![], vec![]).unwrap_err(), NnError::EmptyDataset);
        assert_eq!(
            Dataset::new(vec![vec![1.0], vec![1.0, 2.0]], vec![1.0, 1.0]).unwrap_err(),
            NnError::RaggedRow { row: 1, expected: 1, actual: 2 }
        );
        assert_eq!(
            Dataset::new(vec![vec![1.0]], vec![0.0]).unwrap_err(),
            NnError::InvalidLabel { row: 0, value: 0.0 }
        );
        assert_eq!(
            Dataset::new(vec![vec![f64::NAN]], vec![1.0]).unwrap_err(),
            NnError::NonFiniteFeature { row: 0, column: 0 }
        );
        assert_eq!(
            Dataset::new(vec![vec![]], vec![1.0]).unwrap_err(),
            NnError::ZeroDimension { name: "feature width" }
        );
    }
}
