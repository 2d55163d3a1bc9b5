//! Canonical contact types shared by the import pipeline and its consumers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The fixed set of fields the extractor recognises in a source record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldKey {
    Name,
    Phone,
    Email,
    Photo,
    AddressLine,
    City,
    State,
    Zip,
}

impl FieldKey {
    /// The four keys that together make up a postal address.
    pub const ADDRESS: [FieldKey; 4] = [
        FieldKey::AddressLine,
        FieldKey::City,
        FieldKey::State,
        FieldKey::Zip,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            FieldKey::Name => "name",
            FieldKey::Phone => "phone",
            FieldKey::Email => "email",
            FieldKey::Photo => "photo",
            FieldKey::AddressLine => "addressLine",
            FieldKey::City => "city",
            FieldKey::State => "state",
            FieldKey::Zip => "zip",
        }
    }
}

impl std::fmt::Display for FieldKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields pulled out of one raw source record.
///
/// A key is present only when a non-empty value was found. Values are stored
/// trimmed, and [`ExtractedFields::insert_first`] never overwrites an existing
/// value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractedFields {
    values: BTreeMap<FieldKey, String>,
}

impl ExtractedFields {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` under `key` unless the key is already set or the
    /// trimmed value is empty. Returns `true` if the value was stored.
    pub fn insert_first(&mut self, key: FieldKey, value: &str) -> bool {
        let value = value.trim();
        if value.is_empty() || self.values.contains_key(&key) {
            return false;
        }
        self.values.insert(key, value.to_string());
        true
    }

    /// Stores `value` under `key`, replacing any previous value. Empty values
    /// are ignored and leave the previous value in place.
    pub fn replace(&mut self, key: FieldKey, value: &str) -> bool {
        let value = value.trim();
        if value.is_empty() {
            return false;
        }
        self.values.insert(key, value.to_string());
        true
    }

    #[must_use]
    pub fn get(&self, key: FieldKey) -> Option<&str> {
        self.values.get(&key).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, key: FieldKey) -> bool {
        self.values.contains_key(&key)
    }

    /// Returns `true` if any postal address component has been set.
    #[must_use]
    pub fn has_address(&self) -> bool {
        FieldKey::ADDRESS.iter().any(|key| self.contains(*key))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// Coordinates produced by the geocoding step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeocodeResult {
    pub lat: f64,
    pub lng: f64,
    /// `true` when the coordinates came from the jittered fallback rather
    /// than the external provider.
    pub is_fallback: bool,
}

impl GeocodeResult {
    #[must_use]
    pub fn from_provider(coords: Coordinates) -> Self {
        Self {
            lat: coords.lat,
            lng: coords.lng,
            is_fallback: false,
        }
    }

    #[must_use]
    pub fn fallback(coords: Coordinates) -> Self {
        Self {
            lat: coords.lat,
            lng: coords.lng,
            is_fallback: true,
        }
    }
}

/// A contact that made it through the import pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRecord {
    /// Sequence number unique within one import batch.
    pub id: u64,
    pub name: String,
    pub address_line: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    /// Set once geocoding has finished, whether from the provider or the
    /// fallback. Serialized inline as `lat`, `lng`, and `isFallback`.
    #[serde(flatten)]
    pub location: Option<GeocodeResult>,
}

impl ContactRecord {
    #[must_use]
    pub fn lat(&self) -> Option<f64> {
        self.location.map(|loc| loc.lat)
    }

    #[must_use]
    pub fn lng(&self) -> Option<f64> {
        self.location.map(|loc| loc.lng)
    }

    /// Single-line address for display, omitting the street when absent.
    #[must_use]
    pub fn display_address(&self) -> String {
        let locality = format!("{}, {} {}", self.city, self.state, self.zip);
        let locality = locality.trim();
        if self.address_line.is_empty() {
            locality.to_string()
        } else {
            format!("{}, {locality}", self.address_line)
        }
    }

    /// The photo as an image source, wrapping bare base64 payloads in a
    /// JPEG data URI.
    #[must_use]
    pub fn photo_src(&self) -> Option<String> {
        let photo = self.photo.as_deref()?.trim();
        if photo.is_empty() {
            return None;
        }
        if photo.starts_with("data:") {
            Some(photo.to_string())
        } else {
            Some(format!("data:image/jpeg;base64,{photo}"))
        }
    }

    /// Up to two uppercase initials taken from the name's words.
    #[must_use]
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .take(2)
            .flat_map(char::to_uppercase)
            .collect()
    }
}
