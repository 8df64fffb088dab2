pub mod convergence;
pub mod engines;
pub mod price;

use euler_mc_shared::engine_type::EngineType;

/// Resolves user input to an engine; an unrecognized name is passed through
/// as `Unknown` so the pricer reports it.
pub(crate) fn resolve_engine(input: &str) -> EngineType {
    let engine = EngineType::lookup(input);
    if !engine.is_known() {
        tracing::warn!(input, "engine not recognized");
    }
    engine
}
