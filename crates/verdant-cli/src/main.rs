mod commands;
mod config;
mod error;
mod logging;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "verdant",
    version,
    about = "Greenness scoring for HPLC analytical methods"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a method file (JSON)
    Score {
        /// Path to the method JSON file
        method_file: PathBuf,

        /// Custom reagent library file(s), layered over the built-in library
        #[arg(short, long = "library", value_name = "FILE")]
        library: Vec<PathBuf>,

        /// TOML config with integration settings and default schemes
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Include the step-by-step audit trail
        #[arg(long)]
        trace: bool,
    },
    /// Integrate a method's gradient and show phase and reagent volumes
    Gradient {
        /// Path to the method JSON file
        method_file: PathBuf,

        /// TOML config with integration settings
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Author and inspect reagent factors
    Reagent {
        #[command(subcommand)]
        action: ReagentAction,
    },
    /// Inspect the named weight schemes
    Schemes {
        #[command(subcommand)]
        action: SchemesAction,
    },
    /// Work with custom reagent library files
    Library {
        #[command(subcommand)]
        action: LibraryAction,
    },
}

#[derive(Subcommand)]
enum ReagentAction {
    /// Run the decision evaluators over a reagent's decision paths (JSON)
    Evaluate {
        /// Path to the reagent JSON file (name, density, paths)
        file: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// List reagents in the library
    List {
        /// Custom reagent library file(s), layered over the built-in library
        #[arg(short, long = "library", value_name = "FILE")]
        library: Vec<PathBuf>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
}

#[derive(Subcommand)]
enum SchemesAction {
    /// List every preset per slot
    List,
    /// Show one preset's weights
    Show {
        /// Slot: safety, health, environment, stage or final
        slot: String,
        /// Preset name (e.g., "Balanced")
        name: String,
    },
}

#[derive(Subcommand)]
enum LibraryAction {
    /// Validate a custom reagent library file
    Validate {
        /// Path to JSON library file
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose, cli.quiet);

    let result = match cli.command {
        Commands::Score {
            method_file,
            library,
            config,
            output,
            trace,
        } => commands::score::run(method_file, library, config, &output, trace),
        Commands::Gradient {
            method_file,
            config,
            output,
        } => commands::gradient::run(method_file, config, &output),
        Commands::Reagent { action } => match action {
            ReagentAction::Evaluate { file, output } => commands::reagent::evaluate(&file, &output),
            ReagentAction::List { library, output } => commands::reagent::list(library, &output),
        },
        Commands::Schemes { action } => match action {
            SchemesAction::List => commands::schemes::list(),
            SchemesAction::Show { slot, name } => commands::schemes::show(&slot, &name),
        },
        Commands::Library { action } => match action {
            LibraryAction::Validate { file } => commands::library::validate(&file),
        },
    };

    if let Err(e) = result {
        match e.core_kind() {
            Some(kind) => eprintln!("Error [{kind}]: {e}"),
            None => eprintln!("Error: {e}"),
        }
        std::process::exit(1);
    }
}
