pub mod config;
pub mod engine_type;
pub mod result;
