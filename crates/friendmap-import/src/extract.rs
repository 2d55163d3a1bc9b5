//! Field extraction from raw vCard and CSV blocks.

use friendmap_core::{ExtractedFields, FieldKey};

use crate::formats::{CsvRow, RawBlock, VCardBlock};

/// Extract recognised fields from one raw block.
///
/// Returns `None` when the block cannot be read at all (a CSV row with
/// fewer values than the header has columns). Blocks that are readable but
/// incomplete still return their partial fields; rejecting them is the
/// normalizer's job.
#[must_use]
pub fn extract_fields(block: &RawBlock<'_>) -> Option<ExtractedFields> {
    match block {
        RawBlock::VCard(card) => Some(extract_vcard(card)),
        RawBlock::Csv(row) => extract_csv_row(row),
    }
}

/// Extract fields from a vCard block, line by line.
///
/// Every field keeps its first value. The one exception is the name: an
/// `FN:` line replaces a name reconstructed from an earlier `N:` line.
#[must_use]
pub fn extract_vcard(card: &VCardBlock<'_>) -> ExtractedFields {
    let mut fields = ExtractedFields::new();
    let mut has_formatted_name = false;

    for line in &card.lines {
        if let Some(name) = line.strip_prefix("FN:") {
            if !has_formatted_name && fields.replace(FieldKey::Name, name) {
                has_formatted_name = true;
            }
        } else if let Some(structured) = line.strip_prefix("N:") {
            if !fields.contains(FieldKey::Name) {
                fields.insert_first(FieldKey::Name, &name_from_structured(structured));
            }
        } else if line.starts_with("TEL") {
            insert_property(&mut fields, FieldKey::Phone, line);
        } else if line.starts_with("EMAIL") {
            insert_property(&mut fields, FieldKey::Email, line);
        } else if line.starts_with("PHOTO") {
            insert_property(&mut fields, FieldKey::Photo, line);
        } else if line.starts_with("ADR") {
            if let Some(value) = property_value(line) {
                insert_address(&mut fields, value);
            }
        } else if line.contains("WORK") && line.contains("ADR") {
            // Grouped exports write `item1.ADR;type=WORK:...`; only used
            // while no street line has been found.
            if !fields.contains(FieldKey::AddressLine) {
                if let Some(value) = property_value(line) {
                    insert_address(&mut fields, value);
                }
            }
        }
    }

    fields
}

/// Extract fields from one CSV data row.
///
/// Returns `None` when the row has fewer values than the header has
/// columns. When no header matched the name role, the first column is used
/// as the name.
#[must_use]
pub fn extract_csv_row(row: &CsvRow<'_>) -> Option<ExtractedFields> {
    let values = row.values();
    if values.len() < row.columns.header_len() {
        return None;
    }

    let mut fields = ExtractedFields::new();
    let value_of = |key: FieldKey| row.columns.index_of(key).and_then(|idx| values.get(idx));

    let name = value_of(FieldKey::Name).or_else(|| values.first());
    if let Some(name) = name {
        fields.insert_first(FieldKey::Name, name);
    }

    for key in [
        FieldKey::AddressLine,
        FieldKey::City,
        FieldKey::State,
        FieldKey::Zip,
        FieldKey::Phone,
        FieldKey::Email,
    ] {
        if let Some(value) = value_of(key) {
            fields.insert_first(key, value);
        }
    }

    Some(fields)
}

/// The value after the first `:` of a property line, parameters ignored.
fn property_value(line: &str) -> Option<&str> {
    line.split_once(':').map(|(_, value)| value)
}

fn insert_property(fields: &mut ExtractedFields, key: FieldKey, line: &str) {
    if let Some(value) = property_value(line) {
        fields.insert_first(key, value);
    }
}

/// Rebuild `"Given Family"` from an `N:` value (`Family;Given;...`).
fn name_from_structured(value: &str) -> String {
    let mut parts = value.split(';');
    let family = parts.next().unwrap_or_default().trim();
    let given = parts.next().unwrap_or_default().trim();
    format!("{given} {family}").trim().to_string()
}

/// Split an `ADR` value (`POBox;Extended;Street;City;State;Zip;Country`)
/// into the four address fields.
fn insert_address(fields: &mut ExtractedFields, value: &str) {
    let parts: Vec<&str> = value.split(';').collect();
    for (idx, key) in [
        (2, FieldKey::AddressLine),
        (3, FieldKey::City),
        (4, FieldKey::State),
        (5, FieldKey::Zip),
    ] {
        if let Some(part) = parts.get(idx) {
            fields.insert_first(key, part);
        }
    }
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
