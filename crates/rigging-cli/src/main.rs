//! Rigging CLI - declarative Kubernetes workloads from a single Rig.yaml

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod error;
mod exit_codes;

#[derive(Parser)]
#[command(name = "rigging")]
#[command(version)]
#[command(about = "Synthesize Kubernetes manifests from workload declarations", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug output
    #[arg(long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a rig to Kubernetes YAML
    Template {
        /// Rig file
        file: PathBuf,

        /// Default namespace for workloads that set none
        #[arg(short, long)]
        namespace: Option<String>,

        /// Output directory (if not set, outputs to stdout)
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Show only resources of this kind
        #[arg(short = 's', long)]
        show_only: Option<String>,
    },

    /// Check that every workload of a rig synthesizes
    Lint {
        /// Rig file
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    miette::set_panic_hook();

    let cli = Cli::parse();
    init_tracing(cli.debug);

    let result = match cli.command {
        Commands::Template {
            file,
            namespace,
            output_dir,
            show_only,
        } => commands::template::run(
            &file,
            namespace.as_deref(),
            output_dir.as_deref(),
            show_only.as_deref(),
        ),

        Commands::Lint { file, json } => commands::lint::run(&file, json),
    };

    if let Err(err) = result {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}
