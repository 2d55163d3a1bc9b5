use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Source format of an exported contact file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactFormat {
    VCard,
    Csv,
}

impl ContactFormat {
    /// Guess the format from a file name and its content.
    ///
    /// A `.vcf` extension or a `BEGIN:VCARD` marker anywhere in the content
    /// selects vCard; otherwise a `.csv` extension selects CSV. Returns `None`
    /// when neither rule matches.
    #[must_use]
    pub fn detect(file_name: &str, content: &str) -> Option<Self> {
        let lower = file_name.to_lowercase();
        if lower.ends_with(".vcf") || content.contains("BEGIN:VCARD") {
            Some(ContactFormat::VCard)
        } else if lower.ends_with(".csv") {
            Some(ContactFormat::Csv)
        } else {
            None
        }
    }
}

impl std::fmt::Display for ContactFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContactFormat::VCard => write!(f, "vcard"),
            ContactFormat::Csv => write!(f, "csv"),
        }
    }
}

impl FromStr for ContactFormat {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "vcard" | "vcf" => Ok(ContactFormat::VCard),
            "csv" => Ok(ContactFormat::Csv),
            other => Err(CoreError::UnknownFormat(other.to_string())),
        }
    }
}
