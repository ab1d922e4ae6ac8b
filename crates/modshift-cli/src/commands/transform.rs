//! Transform command - rewrites an ESTree JSON document in one pass

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use modshift_core::config::{self, Config};
use modshift_core::logger::{MemoryLogger, Warning};
use serde_json::Value;
use tracing::debug;

#[derive(Args, Debug)]
pub struct TransformArgs {
    /// ESTree JSON document to rewrite; '-' or absent reads stdin
    pub input: Option<PathBuf>,

    /// Write the rewritten document here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Use a specific config file instead of searching for modshift.toml
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Emit compact JSON instead of pretty-printed
    #[arg(long)]
    pub compact: bool,
}

impl TransformArgs {
    pub fn run(&self) -> Result<()> {
        let config = self.load_config()?;
        let mut registry = modshift_core::default_registry();
        registry.configure(&config.transforms);

        let source = self.read_input()?;
        debug!(bytes = source.len(), "read input document");
        let mut ast: Value =
            serde_json::from_str(&source).context("input is not a valid JSON document")?;

        let mut logger = MemoryLogger::new();
        registry.run_all(&mut ast, &mut logger)?;

        for warning in logger.warnings() {
            eprintln!("{}", render_warning(warning));
        }

        let rendered = if self.compact {
            serde_json::to_string(&ast)?
        } else {
            let mut pretty = serde_json::to_string_pretty(&ast)?;
            pretty.push('\n');
            pretty
        };
        self.write_output(&rendered)
    }

    fn load_config(&self) -> Result<Config> {
        match &self.config {
            Some(path) => {
                let result = config::load_config_with_warnings(path)?;
                for warning in &result.warnings {
                    eprintln!("{} {}", "warning:".yellow().bold(), warning);
                }
                Ok(result.config)
            }
            None => Ok(config::load_config_or_default(&std::env::current_dir()?)),
        }
    }

    fn read_input(&self) -> Result<String> {
        match &self.input {
            Some(path) if path.as_os_str() != "-" => fs::read_to_string(path)
                .with_context(|| format!("failed to read '{}'", path.display())),
            _ => {
                let mut buffer = String::new();
                io::stdin()
                    .read_to_string(&mut buffer)
                    .context("failed to read stdin")?;
                Ok(buffer)
            }
        }
    }

    fn write_output(&self, rendered: &str) -> Result<()> {
        match &self.output {
            Some(path) => fs::write(path, rendered)
                .with_context(|| format!("failed to write '{}'", path.display())),
            None => {
                io::stdout().write_all(rendered.as_bytes())?;
                Ok(())
            }
        }
    }
}

fn render_warning(warning: &Warning) -> String {
    let header = format!("warning[{}]", warning.category).yellow().bold();
    let node = warning.node_type.as_deref().unwrap_or("node");
    match warning.loc {
        Some((line, column)) => format!(
            "{}: {} ({} at {}:{})",
            header, warning.message, node, line, column
        ),
        None => format!("{}: {} ({})", header, warning.message, node),
    }
}
