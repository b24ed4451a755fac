//! Batch processing: normalize a submission, flag duplicates, persist it as a new import.

use serde::Serialize;
use std::collections::HashMap;

use crate::link_db::{
    clean_alias, clean_profile_name, find_or_create_profile, insert_import, insert_urls,
    load_seen, unix_timestamp_millis, Import, ImportId, LinkDb, ProcessedUrl, ProfileId, SeenRow,
    UrlId,
};
use crate::normalize::{normalize, NormalizedUrl};
use crate::Result;

/// Result of one `process_urls` call. `processed` matches the input order and length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchOutcome {
    pub profile_id: ProfileId,
    pub import_id: ImportId,
    pub processed: Vec<ProcessedUrl>,
}

impl BatchOutcome {
    pub fn duplicate_count(&self) -> usize {
        self.processed.iter().filter(|u| u.is_duplicate).count()
    }
}

/// Where a canonical URL was first seen. Stored records carry their id;
/// entries added earlier in the running batch have none yet.
#[derive(Debug, Clone)]
struct SeenEntry {
    record_id: Option<UrlId>,
    created_at: i64,
    import_alias: String,
    import_created_at: i64,
}

impl From<SeenRow> for SeenEntry {
    fn from(row: SeenRow) -> Self {
        SeenEntry {
            record_id: Some(row.id),
            created_at: row.created_at,
            import_alias: row.import_alias,
            import_created_at: row.import_created_at,
        }
    }
}

/// Canonical URL → earliest sighting. `rows` arrive oldest first, so the first
/// insert for a key wins.
fn seen_set(rows: Vec<SeenRow>) -> HashMap<String, SeenEntry> {
    let mut seen = HashMap::with_capacity(rows.len());
    for row in rows {
        seen.entry(row.cleaned_url.clone())
            .or_insert_with(|| SeenEntry::from(row));
    }
    seen
}

/// Marks each URL against everything seen so far: stored records of the profile
/// first, then earlier items of this same batch. Must run sequentially.
fn mark_batch(
    raw_urls: &[String],
    seen: &mut HashMap<String, SeenEntry>,
    import: &Import,
) -> Vec<ProcessedUrl> {
    let mut processed = Vec::with_capacity(raw_urls.len());
    for raw in raw_urls {
        let NormalizedUrl { cleaned_url, domain } = normalize(raw);
        let is_duplicate = match seen.get(&cleaned_url) {
            Some(first) => {
                tracing::trace!(
                    url = %cleaned_url,
                    first_record = ?first.record_id,
                    first_seen_at = first.created_at,
                    first_import = %first.import_alias,
                    first_import_at = first.import_created_at,
                    "duplicate within profile"
                );
                true
            }
            None => {
                seen.insert(
                    cleaned_url.clone(),
                    SeenEntry {
                        record_id: None,
                        created_at: import.created_at,
                        import_alias: import.alias.clone(),
                        import_created_at: import.created_at,
                    },
                );
                false
            }
        };
        processed.push(ProcessedUrl {
            original_url: raw.clone(),
            cleaned_url,
            domain,
            is_duplicate,
        });
    }
    processed
}

/// Normalizes `raw_urls`, flags duplicates against the profile's history and
/// against earlier items of the same batch, and stores everything as a new
/// import. The profile is created on first use; the import is created even when
/// `raw_urls` is empty.
///
/// Runs in one transaction, so either the import and all its records are
/// written or nothing is. Two concurrent batches for the same profile can still
/// both treat a URL as new.
pub async fn process_urls(
    db: &LinkDb,
    profile_name: &str,
    import_alias: &str,
    raw_urls: &[String],
) -> Result<BatchOutcome> {
    let profile_name = clean_profile_name(profile_name)?;
    let import_alias = clean_alias(import_alias)?;
    let now = unix_timestamp_millis();

    let mut tx = db.begin().await?;
    let profile = find_or_create_profile(&mut tx, profile_name, now).await?;
    let import = insert_import(&mut tx, profile.id, import_alias, now).await?;

    let mut seen = seen_set(load_seen(&mut tx, profile.id).await?);
    let processed = mark_batch(raw_urls, &mut seen, &import);

    insert_urls(&mut tx, profile.id, import.id, now, &processed).await?;
    tx.commit().await?;

    let outcome = BatchOutcome {
        profile_id: profile.id,
        import_id: import.id,
        processed,
    };
    tracing::info!(
        profile = %profile.name,
        alias = %import.alias,
        import_id = import.id,
        urls = outcome.processed.len(),
        duplicates = outcome.duplicate_count(),
        "processed batch"
    );
    Ok(outcome)
}
