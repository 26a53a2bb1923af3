//! Small built-in datasets: logic-gate truth tables, a 1-D threshold and
//! random points split by a line.

use std::ops::Range;

use rand::Rng;

use crate::data::dataset::Dataset;
use crate::error::Result;

fn truth_table(outputs: [f64; 4]) -> Result<Dataset> {
    let inputs = vec![
        vec![0.0, 0.0],
        vec![0.0, 1.0],
        vec![1.0, 0.0],
        vec![1.0, 1.0],
    ];
    Dataset::new(inputs, outputs.to_vec())
}

/// AND gate with -1 for false and +1 for true. Linearly separable.
pub fn and_gate() -> Result<Dataset> {
    truth_table([-1.0, -1.0, -1.0, 1.0])
}

/// XOR gate with -1 for false and +1 for true. Not linearly separable.
pub fn xor_gate() -> Result<Dataset> {
    truth_table([-1.0, 1.0, 1.0, -1.0])
}

/// One feature per integer in `range`, labeled +1 when it is strictly
/// greater than `threshold`.
pub fn integer_threshold(range: Range<i64>, threshold: i64) -> Result<Dataset> {
    let features = range.clone().map(|x| vec![x as f64]).collect();
    let labels = range.map(|x| if x > threshold { 1.0 } else { -1.0 }).collect();
    Dataset::new(features, labels)
}

/// The line `y = slope * x + intercept`. Points on or above it are +1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub slope: f64,
    pub intercept: f64,
}

impl Line {
    pub fn new(slope: f64, intercept: f64) -> Line {
        Line { slope, intercept }
    }

    pub fn label(&self, x: f64, y: f64) -> f64 {
        if y >= self.slope * x + self.intercept { 1.0 } else { -1.0 }
    }

    /// Draws a single integer-valued point in `[lo, hi]²`.
    pub fn random_point<R: Rng + ?Sized>(lo: i64, hi: i64, rng: &mut R) -> (f64, f64) {
        let x = rng.gen_range(lo..=hi) as f64;
        let y = rng.gen_range(lo..=hi) as f64;
        (x, y)
    }

    /// `count` labeled integer points drawn uniformly from `[lo, hi]²`.
    pub fn random_points<R: Rng + ?Sized>(
        &self,
        count: usize,
        lo: i64,
        hi: i64,
        rng: &mut R,
    ) -> Result<Dataset> {
        let mut features = Vec::with_capacity(count);
        let mut labels = Vec::with_capacity(count);
        for _ in 0..count {
            let (x, y) = Line::random_point(lo, hi, rng);
            features.push(vec![x, y]);
            labels.push(self.label(x, y));
        }
        Dataset::new(features, labels)
    }
}
