//! vCard framing.
//!
//! Blocks are delimited only by the `BEGIN:VCARD` marker, so a missing
//! `END:VCARD` does not lose a contact.

const BEGIN_MARKER: &str = "BEGIN:VCARD";

/// The trimmed, non-empty lines of one `BEGIN:VCARD` span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VCardBlock<'a> {
    pub lines: Vec<&'a str>,
}

/// Split a vCard stream into blocks.
///
/// Text before the first `BEGIN:VCARD` is discarded. Each block runs to the
/// next marker or the end of input; `END:VCARD` is kept as an ordinary line.
#[must_use]
pub fn parse_vcard(text: &str) -> Vec<VCardBlock<'_>> {
    text.split(BEGIN_MARKER)
        .skip(1)
        .map(|segment| VCardBlock {
            lines: segment
                .split('\n')
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .collect(),
        })
        .collect()
}
