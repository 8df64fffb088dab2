use euler_mc_shared::engine_type::EngineType;

pub fn run() -> anyhow::Result<()> {
    println!("{:<4} {:<22} {}", "ID", "NAME", "DESCRIPTION");
    for engine in EngineType::ALL {
        println!(
            "{:<4} {:<22} {}",
            engine.id(),
            engine.short_name(),
            engine.description()
        );
    }
    Ok(())
}
