//! Validation and address assembly for extracted fields.
//!
//! Pure data shaping; nothing here talks to the geocoder.

use friendmap_core::{ContactRecord, ExtractedFields, FieldKey, GeocodeResult};

/// Why a block was left out of an import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rejection {
    /// The block could not be read (CSV row shorter than the header).
    Unreadable,
    MissingName,
    /// Neither a street line nor a city was found.
    MissingLocation,
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rejection::Unreadable => write!(f, "unreadable record"),
            Rejection::MissingName => write!(f, "missing name"),
            Rejection::MissingLocation => write!(f, "missing street address and city"),
        }
    }
}

/// A validated contact that has not been geocoded yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedContact {
    pub name: String,
    pub address_line: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub photo: Option<String>,
    /// Single-line address handed to the geocoder.
    pub mailing_address: String,
}

impl NormalizedContact {
    /// Attach a batch id and geocoding result, producing the final record.
    #[must_use]
    pub fn into_record(self, id: u64, location: GeocodeResult) -> ContactRecord {
        ContactRecord {
            id,
            name: self.name,
            address_line: self.address_line,
            city: self.city,
            state: self.state,
            zip: self.zip,
            phone: self.phone,
            email: self.email,
            photo: self.photo,
            location: Some(location),
        }
    }
}

/// Validate `fields` and assemble the mailing address.
///
/// # Errors
///
/// Returns [`Rejection::MissingName`] when no name was extracted, or
/// [`Rejection::MissingLocation`] when both the street line and the city
/// are absent.
pub fn normalize(fields: &ExtractedFields) -> Result<NormalizedContact, Rejection> {
    let text = |key: FieldKey| fields.get(key).unwrap_or_default().to_string();
    let optional = |key: FieldKey| fields.get(key).map(str::to_string);

    let name = text(FieldKey::Name);
    if name.is_empty() {
        return Err(Rejection::MissingName);
    }

    let address_line = text(FieldKey::AddressLine);
    let city = text(FieldKey::City);
    if address_line.is_empty() && city.is_empty() {
        return Err(Rejection::MissingLocation);
    }

    let state = text(FieldKey::State);
    let zip = text(FieldKey::Zip);
    let mailing_address = mailing_address(&address_line, &city, &state, &zip);

    Ok(NormalizedContact {
        name,
        address_line,
        city,
        state,
        zip,
        phone: optional(FieldKey::Phone),
        email: optional(FieldKey::Email),
        photo: optional(FieldKey::Photo),
        mailing_address,
    })
}

/// Build `"{street}, {city}, {state} {zip}"`, dropping the street segment
/// when it is empty, then trim the result.
#[must_use]
pub fn mailing_address(address_line: &str, city: &str, state: &str, zip: &str) -> String {
    let address = if address_line.is_empty() {
        format!("{city}, {state} {zip}")
    } else {
        format!("{address_line}, {city}, {state} {zip}")
    };
    address.trim().to_string()
}
