//! Contact import pipeline: vCard and CSV parsing, field extraction,
//! normalization, and geocoding with a jittered fallback.

pub mod error;
pub mod extract;
pub mod formats;
pub mod geocode;
pub mod import;
pub mod normalize;

pub use error::GeocodeError;
pub use extract::{extract_csv_row, extract_fields, extract_vcard};
pub use formats::{parse_blocks, parse_csv, parse_vcard, ColumnMap, CsvRow, RawBlock, VCardBlock};
pub use geocode::{
    fallback_result, fallback_result_with, GeocodeProvider, Geocoder, GoogleGeocodingClient,
    DEFAULT_TIMEOUT, FALLBACK_CENTER, FALLBACK_LAT_JITTER, FALLBACK_LNG_JITTER,
};
pub use import::{ContactImporter, DroppedBlock, ImportOutcome};
pub use normalize::{mailing_address, normalize, NormalizedContact, Rejection};
