pub mod aggregate;
pub mod analytic;
pub mod bench; // profiling utilities
pub mod cancel;
pub mod engine;
pub mod model;
pub mod path;
pub mod runner;

pub use engine::{price, PricingEngine, PricingError};
