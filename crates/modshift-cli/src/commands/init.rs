//! Init command - initializes modshift configuration in a project

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use modshift_core::config::CONFIG_FILENAME;
use std::fs;
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# modshift configuration file
# See https://github.com/modshift/modshift for documentation

[transforms]
# Run only these transforms (all transforms run by default)
# enabled = ["commonjs-imports"]

# Skip specific transforms
# disabled = []
"#;

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Force overwrite existing configuration
    #[arg(short, long)]
    pub force: bool,
}

impl InitArgs {
    pub fn run(&self) -> Result<()> {
        self.run_in(Path::new("."))
    }

    fn run_in(&self, dir: &Path) -> Result<()> {
        let config_path = dir.join(CONFIG_FILENAME);

        if config_path.exists() && !self.force {
            anyhow::bail!(
                "Config file '{}' already exists. Use --force to overwrite.",
                CONFIG_FILENAME
            );
        }

        fs::write(&config_path, DEFAULT_CONFIG)?;
        println!(
            "{} Created {} configuration file",
            "✓".green().bold(),
            CONFIG_FILENAME.cyan()
        );
        Ok(())
    }
}
