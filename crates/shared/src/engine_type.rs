use std::fmt;

/// Pseudo-random engines a normal source can be built on.
///
/// Lookups are total: anything that does not name a supported engine resolves
/// to [`EngineType::Unknown`], which callers must check for explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EngineType {
    #[default]
    MersenneTwister,
    LaggedFibonacci,
    LinearCongruential,
    Unknown,
}

impl EngineType {
    /// The engines that can actually produce numbers.
    pub const ALL: [EngineType; 3] = [
        EngineType::MersenneTwister,
        EngineType::LaggedFibonacci,
        EngineType::LinearCongruential,
    ];

    pub fn id(self) -> u32 {
        match self {
            EngineType::MersenneTwister => 1,
            EngineType::LaggedFibonacci => 2,
            EngineType::LinearCongruential => 3,
            EngineType::Unknown => 4,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            EngineType::MersenneTwister => "Mersenne Twister",
            EngineType::LaggedFibonacci => "Lagged Fibonacci",
            EngineType::LinearCongruential => "Linear Congruential",
            EngineType::Unknown => "Unknown",
        }
    }

    pub fn short_name(self) -> &'static str {
        match self {
            EngineType::MersenneTwister => "mersenne-twister",
            EngineType::LaggedFibonacci => "lagged-fibonacci",
            EngineType::LinearCongruential => "linear-congruential",
            EngineType::Unknown => "unknown",
        }
    }

    pub fn is_known(self) -> bool {
        self != EngineType::Unknown
    }

    /// Exact match on the description.
    pub fn from_description(desc: &str) -> EngineType {
        Self::ALL
            .into_iter()
            .find(|e| e.description() == desc)
            .unwrap_or(EngineType::Unknown)
    }

    pub fn from_id(id: u32) -> EngineType {
        Self::ALL
            .into_iter()
            .find(|e| e.id() == id)
            .unwrap_or(EngineType::Unknown)
    }

    /// Lenient lookup for user input: description (any case), short name,
    /// abbreviation, or numeric id.
    pub fn lookup(input: &str) -> EngineType {
        let input = input.trim();
        if let Ok(id) = input.parse::<u32>() {
            return Self::from_id(id);
        }
        let normalized = input.to_ascii_lowercase().replace(['_', ' '], "-");
        Self::ALL
            .into_iter()
            .find(|e| {
                e.short_name() == normalized
                    || e.description().eq_ignore_ascii_case(input)
                    || e.abbreviation() == normalized
            })
            .unwrap_or(EngineType::Unknown)
    }

    fn abbreviation(self) -> &'static str {
        match self {
            EngineType::MersenneTwister => "mt",
            EngineType::LaggedFibonacci => "lf",
            EngineType::LinearCongruential => "lcg",
            EngineType::Unknown => "",
        }
    }
}

impl fmt::Display for EngineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}
