//! Config command implementation.

use crate::cli::ConfigArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use std::path::Path;

/// Execute the config command.
pub fn execute_config(
    args: ConfigArgs,
    config: &Config,
    source: Option<&Path>,
    formatter: &Formatter,
) -> Result<()> {
    config.validate()?;

    if args.check {
        let origin = source
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "built-in defaults".to_string());
        eprintln!("{}", formatter.success(&format!("Configuration valid ({})", origin)));
        return Ok(());
    }

    println!("{}", formatter.format_config(config)?);
    Ok(())
}
