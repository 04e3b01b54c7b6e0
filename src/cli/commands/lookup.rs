//! Lookup command implementation

use crate::cli::error::CliError;
use crate::models::country_code_from_name;

/// Handle the lookup command
pub fn handle_lookup(name: &str) -> Result<(), CliError> {
    let code = country_code_from_name(name)
        .ok_or_else(|| CliError::InvalidArgument(format!("Unknown country name: {}", name)))?;
    println!("{}", code);
    Ok(())
}
