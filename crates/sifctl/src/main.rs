//! sifctl - Singularity/Apptainer image builds and runs
//!
//! This is the main entry point for the sifctl command-line interface.

mod cli;
mod commands;
mod output;
mod version;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::{Cli, Commands};

fn main() -> Result<()> {
    // Initialize rustls crypto provider (required for rustls 0.23+)
    // This must be done before any TLS operations
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.quiet);

    let settings = cli.settings.as_deref();
    match cli.command {
        Commands::Version(args) => commands::version::run(args),
        Commands::Detect(args) => commands::detect::run(args, settings),
        Commands::Build(args) => commands::build::run(args, settings),
        Commands::Run(args) => commands::run::run(args, settings),
        Commands::Inspect(args) => commands::inspect::run(args, settings),
        Commands::Manifest(args) => commands::manifest::run(args, settings),
    }
}

/// Initialize tracing with appropriate verbosity
fn init_tracing(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("info"),
            1 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    // Logs go to stderr so manifest/detect output stays pipeable
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}
