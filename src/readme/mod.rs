pub mod builder;
pub mod render;
pub mod splice;

pub use builder::{BuildOutcome, CheckOutcome, ReadmeBuilder};
