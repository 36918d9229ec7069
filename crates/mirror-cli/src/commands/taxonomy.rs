//! Taxonomy command implementation.

use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;

/// Execute the taxonomy command.
///
/// Prints the built-in rules followed by any `extra_rules` from the
/// configuration, in matching priority order.
pub fn execute_taxonomy(config: &Config, formatter: &Formatter) -> Result<()> {
    config.validate()?;
    let taxonomy = config.extraction.taxonomy();
    println!("{}", formatter.format_taxonomy(&taxonomy)?);
    Ok(())
}
