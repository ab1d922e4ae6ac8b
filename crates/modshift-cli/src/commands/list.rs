//! List command - shows the registered transforms

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde_json::json;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Emit machine-readable JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

impl ListArgs {
    pub fn run(&self) -> Result<()> {
        let registry = modshift_core::default_registry();

        if self.json {
            let transforms: Vec<_> = registry
                .transforms()
                .map(|t| {
                    let metadata = t.metadata();
                    json!({
                        "id": metadata.id,
                        "name": metadata.name,
                        "description": metadata.description,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&transforms)?);
        } else {
            for transform in registry.transforms() {
                let metadata = transform.metadata();
                println!(
                    "{} {}  {}",
                    metadata.id.dimmed(),
                    metadata.name.cyan().bold(),
                    metadata.description
                );
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_runs_in_both_formats() {
        assert!(ListArgs { json: false }.run().is_ok());
        assert!(ListArgs { json: true }.run().is_ok());
    }
}
