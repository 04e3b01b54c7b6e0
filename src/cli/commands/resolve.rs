//! Resolve command implementation

use crate::cli::error::CliError;
use crate::cli::output::format_summary;
use crate::resolver::MetadataResolver;
use crate::source::AddressFormatSource;

/// Handle the resolve command
pub async fn handle_resolve<S: AddressFormatSource>(
    resolver: &MetadataResolver<S>,
    country: &str,
    offline: bool,
    json: bool,
) -> Result<(), CliError> {
    let metadata = if offline {
        resolver.resolve_static(country)
    } else {
        resolver.resolve_dynamic(country).await
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&metadata)?);
    } else {
        print!("{}", format_summary(country, &metadata));
    }
    Ok(())
}
