//! Format framing: splitting a file payload into one raw block per contact.

mod csv;
mod vcard;

pub use csv::{parse_csv, ColumnMap, CsvRow};
pub use vcard::{parse_vcard, VCardBlock};

use friendmap_core::ContactFormat;

/// One contact's unparsed data, borrowed from the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawBlock<'a> {
    VCard(VCardBlock<'a>),
    Csv(CsvRow<'a>),
}

/// Split `text` into raw blocks using the parser for `format`.
///
/// Structurally invalid input (no header row, no `BEGIN:VCARD` marker)
/// yields an empty vector rather than an error.
#[must_use]
pub fn parse_blocks(text: &str, format: ContactFormat) -> Vec<RawBlock<'_>> {
    match format {
        ContactFormat::VCard => parse_vcard(text).into_iter().map(RawBlock::VCard).collect(),
        ContactFormat::Csv => parse_csv(text).into_iter().map(RawBlock::Csv).collect(),
    }
}
