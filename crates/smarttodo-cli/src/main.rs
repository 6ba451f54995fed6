use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "smarttodo", version, about = "Smart Todo CLI")]
struct Cli {
    /// Enable debug logging (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommended order of open tasks
    Prioritize(commands::prioritize::PrioritizeArgs),
    /// All tasks ordered by importance tier, then due date
    List(commands::list::ListArgs),
    /// Completion analytics
    Analytics(commands::analytics::AnalyticsArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing(verbose: bool) {
    // Off unless asked for; logs go to stderr so JSON on stdout stays clean.
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        std::env::var("RUST_LOG")
            .ok()
            .and_then(|raw| EnvFilter::try_new(raw.trim()).ok())
            .unwrap_or_else(|| EnvFilter::new("off"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Prioritize(args) => commands::prioritize::run(args),
        Commands::List(args) => commands::list::run(args),
        Commands::Analytics(args) => commands::analytics::run(args),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
