use clap::{CommandFactory, Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "glow-cli", version, about = "Glow CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build routines from a products file
    Routine {
        #[command(subcommand)]
        action: commands::routine::RoutineAction,
    },
    /// Product catalog utilities
    Products {
        #[command(subcommand)]
        action: commands::products::ProductsAction,
    },
    /// Rule set management
    Rules {
        #[command(subcommand)]
        action: commands::rules::RulesAction,
    },
    /// Generate shell completions
    Completions {
        /// Target shell
        shell: clap_complete::Shell,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Routine { action } => commands::routine::run(action),
        Commands::Products { action } => commands::products::run(action),
        Commands::Rules { action } => commands::rules::run(action),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "glow-cli", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
