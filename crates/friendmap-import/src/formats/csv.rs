//! CSV framing and header-to-role resolution.
//!
//! Fields are split on bare commas. Quoted values containing commas are not
//! supported and will shift the remaining columns of that row.

use std::collections::BTreeMap;
use std::sync::Arc;

use friendmap_core::FieldKey;

/// Header substrings that identify each column role, checked in table order.
const ROLE_PATTERNS: &[(FieldKey, &[&str])] = &[
    (FieldKey::Name, &["name", "display"]),
    (FieldKey::AddressLine, &["address", "street"]),
    (FieldKey::City, &["city"]),
    (FieldKey::State, &["state", "region"]),
    (FieldKey::Zip, &["zip", "postal"]),
    (FieldKey::Phone, &["phone", "tel"]),
    (FieldKey::Email, &["email", "mail"]),
];

/// Column indexes resolved once from the header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    header_len: usize,
    roles: BTreeMap<FieldKey, usize>,
}

impl ColumnMap {
    /// Resolve column roles from a raw header line.
    ///
    /// Each role takes the first column whose lowercased, unquoted name
    /// contains one of the role's substrings. Roles are resolved
    /// independently, so one column may serve several roles.
    #[must_use]
    pub fn from_header(header: &str) -> Self {
        let headers: Vec<String> = header
            .split(',')
            .map(|h| h.replace('"', "").trim().to_lowercase())
            .collect();

        let roles = ROLE_PATTERNS
            .iter()
            .filter_map(|(key, patterns)| {
                headers
                    .iter()
                    .position(|h| patterns.iter().any(|p| h.contains(p)))
                    .map(|idx| (*key, idx))
            })
            .collect();

        Self {
            header_len: headers.len(),
            roles,
        }
    }

    /// Number of columns in the header row.
    #[must_use]
    pub fn header_len(&self) -> usize {
        self.header_len
    }

    /// Column index for `key`, if any header matched it.
    #[must_use]
    pub fn index_of(&self, key: FieldKey) -> Option<usize> {
        self.roles.get(&key).copied()
    }
}

/// One data line plus the shared column map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvRow<'a> {
    pub columns: Arc<ColumnMap>,
    /// 1-based line number in the source, header included.
    pub line_number: usize,
    pub line: &'a str,
}

impl CsvRow<'_> {
    /// Split the row into cleaned values: quote characters removed and
    /// surrounding whitespace trimmed.
    #[must_use]
    pub fn values(&self) -> Vec<String> {
        self.line
            .split(',')
            .map(|v| v.replace('"', "").trim().to_string())
            .collect()
    }
}

/// Split CSV text into one [`CsvRow`] per non-blank data line.
///
/// The first line is the header. Text with no header line yields no rows.
#[must_use]
pub fn parse_csv(text: &str) -> Vec<CsvRow<'_>> {
    let mut lines = text.split('\n').enumerate();

    let Some((_, header)) = lines.next() else {
        return vec![];
    };
    if header.trim().is_empty() {
        return vec![];
    }

    let columns = Arc::new(ColumnMap::from_header(header));

    lines
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| CsvRow {
            columns: Arc::clone(&columns),
            line_number: idx + 1,
            line,
        })
        .collect()
}
