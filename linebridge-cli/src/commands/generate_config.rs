//! Generate config command implementation

use anyhow::{Context, Result};
use clap::Args;
use linebridge_core::BridgeConfig;
use std::path::PathBuf;

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Output file path (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self) -> Result<()> {
        let template = generate_template()?;

        match &self.output {
            Some(path) => {
                std::fs::write(path, template)
                    .with_context(|| format!("Failed to write to {}", path.display()))?;
                println!("Configuration written to {}", path.display());
            }
            None => print!("{template}"),
        }

        Ok(())
    }
}

/// Default configuration rendered as commented TOML
pub fn generate_template() -> Result<String> {
    let body = BridgeConfig::default().to_toml_string()?;
    Ok(format!(
        "# linebridge configuration\n\
         # lines.max_lines = 0 reads every line; lines.mode is \"lines\" or \"text\"\n\n{body}"
    ))
}
