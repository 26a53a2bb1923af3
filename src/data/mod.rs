pub mod dataset;
pub mod toy;

pub use dataset::Dataset;
pub use toy::Line;
