//! Whole-file import: parse, extract, normalize, geocode.
//!
//! Records are geocoded one at a time in file order so the provider never
//! sees more than one in-flight request per import and the output order
//! matches the input.

use std::sync::atomic::{AtomicBool, Ordering};

use friendmap_core::{ContactFormat, ContactRecord};
use serde::Serialize;

use crate::extract::extract_fields;
use crate::formats::{parse_blocks, RawBlock};
use crate::geocode::Geocoder;
use crate::normalize::{normalize, NormalizedContact, Rejection};

/// A block that did not become a contact, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DroppedBlock {
    /// 0-based position of the block within the file.
    pub block_index: usize,
    /// Source line for CSV rows; `None` for vCard blocks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_number: Option<usize>,
    pub reason: Rejection,
}

/// Result of importing one file.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportOutcome {
    pub imported: Vec<ContactRecord>,
    pub dropped_count: usize,
    pub dropped: Vec<DroppedBlock>,
    /// `true` when the import stopped early on a cancellation request.
    pub cancelled: bool,
}

impl ImportOutcome {
    /// Returns `true` when nothing usable was found; callers show a single
    /// "no contacts with addresses" notice in that case.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.imported.is_empty()
    }

    /// Number of imported records whose coordinates are fallback guesses.
    #[must_use]
    pub fn fallback_count(&self) -> usize {
        self.imported
            .iter()
            .filter(|r| r.location.is_some_and(|loc| loc.is_fallback))
            .count()
    }
}

/// Drives the import pipeline against an explicitly supplied geocoder.
#[derive(Debug, Clone)]
pub struct ContactImporter {
    geocoder: Geocoder,
}

impl ContactImporter {
    #[must_use]
    pub fn new(geocoder: Geocoder) -> Self {
        Self { geocoder }
    }

    /// An importer whose geocoder has no provider.
    #[must_use]
    pub fn offline() -> Self {
        Self::new(Geocoder::offline())
    }

    #[must_use]
    pub fn geocoder(&self) -> &Geocoder {
        &self.geocoder
    }

    /// Import every usable contact in `raw`.
    ///
    /// Never fails: malformed blocks are counted in `dropped_count` and
    /// geocoding problems resolve to fallback coordinates.
    pub async fn import_file(&self, raw: &str, format: ContactFormat) -> ImportOutcome {
        self.run(raw, format, None).await
    }

    /// Like [`ContactImporter::import_file`], but checks `cancel` before each
    /// block and returns the records finished so far once it is set.
    pub async fn import_file_with_cancel(
        &self,
        raw: &str,
        format: ContactFormat,
        cancel: &AtomicBool,
    ) -> ImportOutcome {
        self.run(raw, format, Some(cancel)).await
    }

    async fn run(
        &self,
        raw: &str,
        format: ContactFormat,
        cancel: Option<&AtomicBool>,
    ) -> ImportOutcome {
        let blocks = parse_blocks(raw, format);
        let total = blocks.len();
        tracing::debug!(%format, blocks = total, "parsed contact file");

        let mut outcome = ImportOutcome::default();
        let mut next_id: u64 = 1;

        for (block_index, block) in blocks.iter().enumerate() {
            if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                tracing::info!(
                    %format,
                    processed = block_index,
                    total,
                    "import cancelled"
                );
                outcome.cancelled = true;
                break;
            }

            let contact = match normalize_block(block) {
                Ok(contact) => contact,
                Err(reason) => {
                    tracing::debug!(block_index, %reason, "dropping contact block");
                    outcome.dropped.push(DroppedBlock {
                        block_index,
                        line_number: line_number(block),
                        reason,
                    });
                    continue;
                }
            };

            let location = self.geocoder.geocode(&contact.mailing_address).await;
            outcome.imported.push(contact.into_record(next_id, location));
            next_id += 1;
        }

        outcome.dropped_count = outcome.dropped.len();
        tracing::info!(
            %format,
            imported = outcome.imported.len(),
            dropped = outcome.dropped_count,
            fallback = outcome.fallback_count(),
            "contact import finished"
        );
        outcome
    }
}

fn normalize_block(block: &RawBlock<'_>) -> Result<NormalizedContact, Rejection> {
    let fields = extract_fields(block).ok_or(Rejection::Unreadable)?;
    normalize(&fields)
}

fn line_number(block: &RawBlock<'_>) -> Option<usize> {
    match block {
        RawBlock::Csv(row) => Some(row.line_number),
        RawBlock::VCard(_) => None,
    }
}
