pub mod activation;

pub use activation::{Activation, SignActivation, TanhActivation};
