pub mod lagged_fibonacci;
pub mod minstd;
pub mod mt19937;
pub mod source;

pub use lagged_fibonacci::LaggedFibonacci;
pub use minstd::MinStd;
pub use mt19937::Mt19937;
pub use source::{build, EngineRng, NormalSource, NormalVariateSource};
