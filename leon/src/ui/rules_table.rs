//! Tabular listing of the registry for `leon rules list`.

use comfy_table::{presets::UTF8_FULL_CONDENSED, ContentArrangement, Table};

use leon_core::SanitizerRegistry;

/// Builds the table: order, name, kind, value, enabled, origin, description.
pub fn build_rules_table(registry: &SanitizerRegistry) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["#", "Name", "Kind", "Value", "Enabled", "Origin", "Description"]);

    for (position, entry) in registry.list().enumerate() {
        let sanitizer = &entry.sanitizer;
        table.add_row(vec![
            (position + 1).to_string(),
            sanitizer.name().to_string(),
            sanitizer.kind().to_string(),
            sanitizer.value().to_string(),
            if entry.enabled { "yes" } else { "no" }.to_string(),
            if entry.is_builtin() { "built-in" } else { "user" }.to_string(),
            sanitizer.description().to_string(),
        ]);
    }
    table
}
