use friendmap_core::ContactFormat;

use super::*;
use crate::formats::parse_blocks;

fn card(lines: &[&'static str]) -> VCardBlock<'static> {
    VCardBlock {
        lines: lines.to_vec(),
    }
}

fn csv_fields(text: &str) -> Vec<Option<ExtractedFields>> {
    parse_blocks(text, ContactFormat::Csv)
        .iter()
        .map(extract_fields)
        .collect()
}

// -----------------------------------------------------------------------
// vCard
// -----------------------------------------------------------------------

#[test]
fn vcard_full_contact() {
    let fields = extract_vcard(&card(&[
        "VERSION:3.0",
        "FN:Jane Doe",
        "TEL;TYPE=CELL:+1 555 0100",
        "EMAIL;TYPE=INTERNET:jane@example.com",
        "PHOTO;ENCODING=b;TYPE=JPEG:/9j/4AAQ",
        "ADR;TYPE=HOME:;;123 Main St;Springfield;IL;62704;USA",
        "END:VCARD",
    ]));
    assert_eq!(fields.get(FieldKey::Name), Some("Jane Doe"));
    assert_eq!(fields.get(FieldKey::Phone), Some("+1 555 0100"));
    assert_eq!(fields.get(FieldKey::Email), Some("jane@example.com"));
    assert_eq!(fields.get(FieldKey::Photo), Some("/9j/4AAQ"));
    assert_eq!(fields.get(FieldKey::AddressLine), Some("123 Main St"));
    assert_eq!(fields.get(FieldKey::City), Some("Springfield"));
    assert_eq!(fields.get(FieldKey::State), Some("IL"));
    assert_eq!(fields.get(FieldKey::Zip), Some("62704"));
}

#[test]
fn vcard_first_tel_wins() {
    let fields = extract_vcard(&card(&["FN:Jane", "TEL:111", "TEL;TYPE=WORK:222"]));
    assert_eq!(fields.get(FieldKey::Phone), Some("111"));
}

#[test]
fn vcard_first_email_wins() {
    let fields = extract_vcard(&card(&["EMAIL:a@example.com", "EMAIL:b@example.com"]));
    assert_eq!(fields.get(FieldKey::Email), Some("a@example.com"));
}

#[test]
fn vcard_structured_name_when_fn_absent() {
    let fields = extract_vcard(&card(&["N:Doe;Jane;;;"]));
    assert_eq!(fields.get(FieldKey::Name), Some("Jane Doe"));
}

#[test]
fn vcard_structured_name_with_only_family() {
    let fields = extract_vcard(&card(&["N:Doe;;;;"]));
    assert_eq!(fields.get(FieldKey::Name), Some("Doe"));
}

#[test]
fn vcard_empty_structured_name_is_absent() {
    let fields = extract_vcard(&card(&["N:;;;;"]));
    assert!(!fields.contains(FieldKey::Name));
}

#[test]
fn vcard_fn_preferred_over_earlier_n() {
    let fields = extract_vcard(&card(&["N:Doe;Jane;;;", "FN:Janie D."]));
    assert_eq!(fields.get(FieldKey::Name), Some("Janie D."));
}

#[test]
fn vcard_n_ignored_after_fn() {
    let fields = extract_vcard(&card(&["FN:Janie D.", "N:Doe;Jane;;;"]));
    assert_eq!(fields.get(FieldKey::Name), Some("Janie D."));
}

#[test]
fn vcard_second_fn_does_not_overwrite() {
    let fields = extract_vcard(&card(&["FN:First", "FN:Second"]));
    assert_eq!(fields.get(FieldKey::Name), Some("First"));
}

#[test]
fn vcard_first_address_wins() {
    let fields = extract_vcard(&card(&[
        "ADR;TYPE=HOME:;;1 Home Rd;Homeville;CA;90001;USA",
        "ADR;TYPE=WORK:;;2 Work Ave;Worktown;NY;10001;USA",
    ]));
    assert_eq!(fields.get(FieldKey::AddressLine), Some("1 Home Rd"));
    assert_eq!(fields.get(FieldKey::City), Some("Homeville"));
}

#[test]
fn vcard_partial_address_is_completed_by_later_adr() {
    let fields = extract_vcard(&card(&[
        "FN:Jane Doe",
        "ADR;TYPE=HOME:;;;;IL;62704;USA",
        "ADR;TYPE=WORK:;;123 Main St;Springfield;MO;65801;USA",
    ]));
    assert_eq!(fields.get(FieldKey::AddressLine), Some("123 Main St"));
    assert_eq!(fields.get(FieldKey::City), Some("Springfield"));
    assert_eq!(fields.get(FieldKey::State), Some("IL"));
    assert_eq!(fields.get(FieldKey::Zip), Some("62704"));
}

#[test]
fn vcard_grouped_work_address_skipped_once_street_known() {
    let fields = extract_vcard(&card(&[
        "ADR:;;1 Home Rd;;;;USA",
        "item1.ADR;type=WORK:;;2 Work Ave;Worktown;NY;10001;USA",
    ]));
    assert_eq!(fields.get(FieldKey::AddressLine), Some("1 Home Rd"));
    assert!(!fields.contains(FieldKey::City));
}

#[test]
fn vcard_grouped_work_address_is_used_as_fallback() {
    let fields = extract_vcard(&card(&[
        "FN:Jane",
        "item1.ADR;type=WORK;type=pref:;;2 Work Ave;Worktown;NY;10001;USA",
    ]));
    assert_eq!(fields.get(FieldKey::AddressLine), Some("2 Work Ave"));
    assert_eq!(fields.get(FieldKey::Zip), Some("10001"));
}

#[test]
fn vcard_grouped_home_address_is_ignored() {
    let fields = extract_vcard(&card(&[
        "FN:Jane",
        "item1.ADR;type=HOME:;;1 Home Rd;Homeville;CA;90001;USA",
    ]));
    assert!(!fields.has_address());
}

#[test]
fn vcard_short_address_sets_available_parts() {
    let fields = extract_vcard(&card(&["ADR:;;;Springfield"]));
    assert_eq!(fields.get(FieldKey::City), Some("Springfield"));
    assert!(!fields.contains(FieldKey::AddressLine));
    assert!(!fields.contains(FieldKey::State));
}

#[test]
fn vcard_property_without_colon_is_ignored() {
    let fields = extract_vcard(&card(&["TEL;TYPE=CELL", "TEL:555"]));
    assert_eq!(fields.get(FieldKey::Phone), Some("555"));
}

#[test]
fn vcard_value_keeps_later_colons() {
    let fields = extract_vcard(&card(&["PHOTO;VALUE=uri:https://example.com/p.jpg"]));
    assert_eq!(fields.get(FieldKey::Photo), Some("https://example.com/p.jpg"));
}

#[test]
fn vcard_prefix_match_is_case_sensitive() {
    let fields = extract_vcard(&card(&["fn:jane", "tel:555"]));
    assert!(fields.is_empty());
}

// -----------------------------------------------------------------------
// CSV
// -----------------------------------------------------------------------

#[test]
fn csv_maps_columns_by_role() {
    let rows = csv_fields("Name,Street,City,State,Zip,Phone,Email\nJohn Smith,1 Elm St,Boston,MA,02108,555,j@example.com\n");
    let fields = rows[0].as_ref().unwrap();
    assert_eq!(fields.get(FieldKey::Name), Some("John Smith"));
    assert_eq!(fields.get(FieldKey::AddressLine), Some("1 Elm St"));
    assert_eq!(fields.get(FieldKey::City), Some("Boston"));
    assert_eq!(fields.get(FieldKey::State), Some("MA"));
    assert_eq!(fields.get(FieldKey::Zip), Some("02108"));
    assert_eq!(fields.get(FieldKey::Phone), Some("555"));
    assert_eq!(fields.get(FieldKey::Email), Some("j@example.com"));
    assert!(!fields.contains(FieldKey::Photo));
}

#[test]
fn csv_short_row_is_unreadable() {
    let rows = csv_fields("Name,Street,City\nJohn,1 Elm St\n");
    assert!(rows[0].is_none());
}

#[test]
fn csv_extra_values_are_tolerated() {
    let rows = csv_fields("Name,City\nJohn,Boston,extra\n");
    assert_eq!(rows[0].as_ref().unwrap().get(FieldKey::City), Some("Boston"));
}

#[test]
fn csv_first_column_is_name_without_name_header() {
    let rows = csv_fields("Who,City\nJohn,Boston\n");
    assert_eq!(rows[0].as_ref().unwrap().get(FieldKey::Name), Some("John"));
}

#[test]
fn csv_empty_name_column_leaves_name_absent() {
    let rows = csv_fields("City,Name\nBoston,\n");
    let fields = rows[0].as_ref().unwrap();
    assert!(!fields.contains(FieldKey::Name));
    assert_eq!(fields.get(FieldKey::City), Some("Boston"));
}

#[test]
fn csv_blank_values_are_absent() {
    let rows = csv_fields("Name,Street,City\nJohn,,Boston\n");
    let fields = rows[0].as_ref().unwrap();
    assert!(!fields.contains(FieldKey::AddressLine));
}

#[test]
fn csv_column_order_does_not_change_fields() {
    let forward = csv_fields("Name,Street,City,State,Zip\nJohn Smith,1 Elm St,Boston,MA,02108\n");
    let shuffled = csv_fields("Zip,City,Name,State,Street\n02108,Boston,John Smith,MA,1 Elm St\n");
    assert_eq!(forward, shuffled);
}
