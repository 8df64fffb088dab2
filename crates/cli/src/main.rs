mod commands;
mod output;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use euler_mc_shared::config::{
    ConfigErrors, NumericPolicy, OptionConfiguration, OptionKind, RunSettings, BASELINE_DIVIDEND,
    BASELINE_EXPIRY, BASELINE_RATE, BASELINE_SIMS, BASELINE_SPOT, BASELINE_STEPS,
    BASELINE_STRIKE, BASELINE_VOLATILITY,
};

#[derive(Parser)]
#[command(name = "euler-mc", about = "Euler-Maruyama Monte Carlo option pricer")]
struct Cli {
    /// Log pricing progress (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price a European option
    Price {
        #[command(flatten)]
        option: OptionArgs,
        #[command(flatten)]
        run: RunArgs,
    },
    /// List the supported random engines
    Engines,
    /// Show how the standard error shrinks as the number of simulations grows
    Convergence {
        #[command(flatten)]
        option: OptionArgs,
        #[command(flatten)]
        run: RunArgs,
        /// Simulation counts to compare
        #[arg(long, value_delimiter = ',', default_value = "1000,4000,16000,64000")]
        sizes: Vec<u64>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    Call,
    Put,
}

#[derive(Args)]
struct OptionArgs {
    /// Strike price
    #[arg(long, default_value_t = BASELINE_STRIKE)]
    strike: f64,
    /// Time to expiry in years
    #[arg(long, default_value_t = BASELINE_EXPIRY)]
    expiry: f64,
    /// Continuously compounded risk-free rate
    #[arg(long, default_value_t = BASELINE_RATE)]
    rate: f64,
    /// Volatility of the underlying
    #[arg(long, default_value_t = BASELINE_VOLATILITY)]
    volatility: f64,
    /// Spot price of the underlying
    #[arg(long, default_value_t = BASELINE_SPOT)]
    spot: f64,
    /// Continuous dividend yield
    #[arg(long, default_value_t = BASELINE_DIVIDEND)]
    dividend: f64,
    /// Number of simulated paths
    #[arg(long, default_value_t = BASELINE_SIMS)]
    simulations: u64,
    /// Option type
    #[arg(long = "type", value_enum, default_value = "call")]
    kind: KindArg,
}

#[derive(Args)]
struct RunArgs {
    /// Number of time steps per path
    #[arg(long, default_value_t = BASELINE_STEPS)]
    steps: u32,
    /// Random engine: name, description, or id (see `engines`)
    #[arg(long, default_value = "mersenne-twister")]
    engine: String,
    /// Number of parallel workers (0 = auto)
    #[arg(long, default_value = "0")]
    workers: usize,
    /// Run seed; omit for a fresh random seed
    #[arg(long)]
    seed: Option<u64>,
    /// Fail the run on the first path with a non-finite value
    #[arg(long)]
    strict: bool,
}

impl OptionArgs {
    fn build(&self) -> Result<OptionConfiguration, ConfigErrors> {
        OptionConfiguration::builder()
            .strike(self.strike)
            .expiry(self.expiry)
            .rate(self.rate)
            .volatility(self.volatility)
            .spot(self.spot)
            .dividend(self.dividend)
            .n_simulations(self.simulations)
            .kind(match self.kind {
                KindArg::Call => OptionKind::Call,
                KindArg::Put => OptionKind::Put,
            })
            .build()
    }
}

impl RunArgs {
    fn settings(&self) -> RunSettings {
        RunSettings {
            n_steps: self.steps,
            n_workers: if self.workers == 0 { None } else { Some(self.workers) },
            seed: self.seed,
            numeric_policy: if self.strict {
                NumericPolicy::Fail
            } else {
                NumericPolicy::Exclude
            },
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "info" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    match cli.command {
        Commands::Price { option, run } => {
            commands::price::run(option.build()?, run.settings(), &run.engine)
        }
        Commands::Engines => commands::engines::run(),
        Commands::Convergence { option, run, sizes } => {
            commands::convergence::run(option.build()?, run.settings(), &run.engine, &sizes)
        }
    }
}
