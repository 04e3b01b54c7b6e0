//! Output formatting for CLI

use crate::models::{FieldKind, NormalizedMetadata};

/// Format resolved metadata as a human-readable summary
pub fn format_summary(country: &str, metadata: &NormalizedMetadata) -> String {
    let mut output = String::new();

    output.push_str(&format!("Address form for {}\n", country.trim().to_uppercase()));
    output.push_str(&format!("  Format: {}\n", metadata.format.replace("%n", " | ")));
    output.push_str(&format!(
        "  Postcode: {}\n",
        if metadata.has_postcode { "yes" } else { "no" }
    ));

    output.push_str("\nFields:\n");
    for field in metadata.all_fields() {
        let Some(descriptor) = metadata.descriptor(field) else {
            continue;
        };
        let marker = if metadata.is_required(field) { "*" } else { " " };
        output.push_str(&format!("  {} {:<20} {}", marker, field, descriptor.label));
        if let FieldKind::Select { options } = &descriptor.kind {
            output.push_str(&format!(" [select, {} options]", options.len()));
        }
        if let Some(pattern) = &descriptor.pattern {
            output.push_str(&format!(" /{}/", pattern.source()));
        }
        output.push('\n');
    }

    output.push_str("\nLayout:\n");
    for row in &metadata.layout {
        let cells: Vec<String> = row
            .cells()
            .iter()
            .map(|cell| format!("{}:{}", cell.field, cell.span))
            .collect();
        output.push_str(&format!("  {}\n", cells.join("  ")));
    }

    output
}
