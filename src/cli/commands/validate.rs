//! Validate command implementation

use crate::cli::error::CliError;
use crate::models::FieldName;
use crate::resolver::MetadataResolver;
use crate::source::AddressFormatSource;

/// Handle the validate command
pub async fn handle_validate<S: AddressFormatSource>(
    resolver: &MetadataResolver<S>,
    country: &str,
    field: &str,
    value: &str,
    offline: bool,
) -> Result<(), CliError> {
    let field: FieldName = field
        .parse()
        .map_err(|e| CliError::InvalidArgument(format!("{}", e)))?;

    let metadata = if offline {
        resolver.resolve_static(country)
    } else {
        resolver.resolve_dynamic(country).await
    };

    let result = metadata.validate_field(field, value);
    if !result.is_valid {
        return Err(CliError::ValidationFailed(result.error.unwrap_or_default()));
    }

    match metadata.transform_value(field, Some(value)) {
        Some(transformed) if transformed != value => {
            println!("Valid ({} stored as {:?})", field, transformed)
        }
        _ => println!("Valid"),
    }
    Ok(())
}
