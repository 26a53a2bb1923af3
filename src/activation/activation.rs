use serde::{Serialize, Deserialize};

/// Maps a unit's weighted sum to its output.
///
/// Engines call through this trait on every evaluation, so swapping the
/// activation never requires touching the training code.
pub trait Activation {
    fn apply(&self, weighted_sum: f64) -> f64;

    /// Slope used to scale an error signal when it is pushed back through a
    /// unit. Only the MLP calls this; the single-layer learning rule works on
    /// the raw error.
    fn derivative(&self, weighted_sum: f64) -> f64;
}

/// The sign function: +1 for a non-negative sum, -1 otherwise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SignActivation;

impl Activation for SignActivation {
    fn apply(&self, weighted_sum: f64) -> f64 {
        if weighted_sum >= 0.0 { 1.0 } else { -1.0 }
    }

    /// The true derivative of a step is zero almost everywhere, which would
    /// stop any error from reaching the hidden layer. Backpropagation instead
    /// uses the slope of tanh, the smooth curve the sign function saturates
    /// to: units whose sum sits near the threshold receive most of the error.
    fn derivative(&self, weighted_sum: f64) -> f64 {
        let t = weighted_sum.tanh();
        1.0 - t * t
    }
}

/// Hyperbolic tangent: a continuous output in (-1, 1).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TanhActivation;

impl Activation for TanhActivation {
    fn apply(&self, weighted_sum: f64) -> f64 {
        weighted_sum.tanh()
    }

    fn derivative(&self, weighted_sum: f64) -> f64 {
        let t = weighted_sum.tanh();
        1.0 - t * t
    }
}

impl<A: Activation + ?Sized> Activation for &A {
    fn apply(&self, weighted_sum: f64) -> f64 {
        (**self).apply(weighted_sum)
    }

    fn derivative(&self, weighted_sum: f64) -> f64 {
        (**self).derivative(weighted_sum)
    }
}

impl<A: Activation + ?Sized> Activation for Box<A> {
    fn apply(&self, weighted_sum: f64) -> f64 {
        (**self).apply(weighted_sum)
    }

    fn derivative(&self, weighted_sum: f64) -> f64 {
        (**self).derivative(weighted_sum)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn sign_threshold_is_inclusive_at_zero() {
        assert_eq!(SignActivation.apply(0.0), 1.0);
        assert_eq!(SignActivation.apply(-0.0), 1.0);
        assert_eq!(SignActivation.apply(-1e-12), -1.0);
        assert_eq!(SignActivation.apply(3.5), 1.0);
    }

    #[test]
    fn sign_surrogate_slope_peaks_at_threshold() {
        assert_eq!(SignActivation.derivative(0.0), 1.0);
        assert!(SignActivation.derivative(0.5) < 1.0);
        assert!(SignActivation.derivative(10.0) < 1e-6);
        assert_eq!(SignActivation.derivative(2.0), SignActivation.derivative(-2.0));
    }

    #[test]
    fn tanh_matches_std() {
        assert_eq!(TanhActivation.apply(0.3), 0.3_f64.tanh());
        assert_eq!(TanhActivation.derivative(0.0), 1.0);
    }

    #[test]
    fn boxed_activation_dispatches() {
        let boxed: Box<dyn Activation> = Box::new(SignActivation);
        assert_eq!(boxed.apply(-2.0), -1.0);
        assert_eq!((&SignActivation).apply(2.0), 1.0);
    }

    proptest! {
        #[test]
        fn sign_is_plus_one_for_non_negative(x in 0.0f64..1e12) {
            prop_assert_eq!(SignActivation.apply(x), 1.0);
        }

        #[test]
        fn sign_is_minus_one_for_negative(x in -1e12f64..-1e-300) {
            prop_assert_eq!(SignActivation.apply(x), -1.0);
        }

        #[test]
        fn sign_is_deterministic(x in proptest::num::f64::NORMAL) {
            prop_assert_eq!(SignActivation.apply(x), SignActivation.apply(x));
        }
    }
}
