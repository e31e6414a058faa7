use clap::{Parser, Subcommand, ValueEnum};

use widelane::{
    Lane128, LaneBackend, NativeLane, defaults, detect_lane_backend, lane_backend_description,
    selftest,
};

#[derive(Parser)]
#[command(name = "widelane")]
#[command(about = "widelane - 512-bit vector operations over 128-bit lanes", long_about = None)]
#[command(version)]
struct Cli {
    /// Verbosity level: 1=error, 2=warning, 3=message, 4=debug, 5+=trace
    #[arg(short = 'v', long, value_name = "INT", default_value_t = defaults::VERBOSITY, global = true)]
    verbosity: i32,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the detected lane backend and which backends this host supports
    Info,

    /// Run the known-answer self-test
    Selftest {
        /// Which backend(s) to test
        #[arg(short = 'b', long, value_enum, default_value = "auto")]
        backend: BackendChoice,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum BackendChoice {
    /// Whatever detection picks (honours WIDELANE_FORCE_SOFT)
    Auto,
    /// The hardware lane of this target
    Native,
    /// The portable lane
    Soft,
    /// Every backend available on this host
    All,
}

impl BackendChoice {
    fn backends(self) -> Vec<LaneBackend> {
        match self {
            BackendChoice::Auto => vec![detect_lane_backend()],
            BackendChoice::Native => vec![NativeLane::BACKEND],
            BackendChoice::Soft => vec![LaneBackend::Soft],
            BackendChoice::All => LaneBackend::ALL
                .into_iter()
                .filter(|b| b.is_available())
                .collect(),
        }
    }
}

fn init_logging(verbosity: i32) {
    // Map verbosity (1=error, 2=warning, 3=message, 4=debug, 5+=trace)
    let log_level = match verbosity {
        v if v <= 1 => log::LevelFilter::Error,
        2 => log::LevelFilter::Warn,
        3 => log::LevelFilter::Info,
        4 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .format_timestamp(None)
        .format_target(false)
        .init();
}

fn run_selftest(choice: BackendChoice) -> anyhow::Result<()> {
    let backends = choice.backends();
    for backend in &backends {
        log::info!("Running self-test on {}", backend.name());
        selftest::run_for_backend(*backend)?;
    }
    log::info!("All {} backend self-test(s) passed", backends.len());
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbosity);

    match cli.command {
        Commands::Info => {
            let backend = detect_lane_backend();
            println!("Detected backend: {}", backend.name());
            println!("Description:      {}", lane_backend_description(backend));
            for candidate in LaneBackend::ALL {
                println!(
                    "  {:<6} {}",
                    candidate.name(),
                    if candidate.is_available() { "available" } else { "unavailable" }
                );
            }
        }
        Commands::Selftest { backend } => {
            if let Err(e) = run_selftest(backend) {
                log::error!("Self-test failed: {:#}", e);
                std::process::exit(1);
            }
        }
    }
}
