//! modshift CLI - Command-line interface for the modshift codemod
//!
//! Fast CommonJS to ES module codemod engine written in Rust.

mod commands;

use clap::Parser;
use commands::Commands;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "modshift",
    author,
    version,
    about = "Fast CommonJS to ES module codemod engine",
    long_about = "modshift rewrites CommonJS module-loading idioms in an ESTree JSON\n\
                  document into ES module import declarations. Pair it with an ESTree\n\
                  parser and printer to migrate whole source files."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Transform(args) => args.run(),
        Commands::List(args) => args.run(),
        Commands::Init(args) => args.run(),
    }
}
