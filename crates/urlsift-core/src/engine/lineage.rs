//! Duplicate lineage: which earlier record a duplicate collides with.

use crate::link_db::{DuplicateProvenance, LinkDb, UrlRecord};
use crate::Result;

/// Finds the record `url` was flagged as a duplicate of.
///
/// Looks for the earliest same-profile record with the same canonical form that
/// was created strictly before `url`. If there is none (same-millisecond batch,
/// or the original was deleted), looks again without the time bound, skipping
/// `url` itself. Ties on `created_at` go to the lowest id.
///
/// `Ok(None)` means the origin is unknown. The record stays flagged either way:
/// duplicate flags are never recomputed after deletions.
pub async fn resolve_duplicate(db: &LinkDb, url: &UrlRecord) -> Result<Option<DuplicateProvenance>> {
    if !url.is_duplicate {
        return Ok(None);
    }

    let earlier = db
        .earliest_match(url.profile_id, &url.cleaned_url, None, Some(url.created_at))
        .await?;
    if earlier.is_some() {
        return Ok(earlier);
    }

    let fallback = db
        .earliest_match(url.profile_id, &url.cleaned_url, Some(url.id), None)
        .await?;
    if fallback.is_none() {
        tracing::debug!(url_id = url.id, cleaned = %url.cleaned_url, "duplicate origin unknown");
    }
    Ok(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::batch::process_urls;
    use crate::link_db::{open_memory, RecordScope, UrlFilter, UrlView};

    async fn rows(db: &LinkDb, scope: RecordScope) -> Vec<UrlView> {
        db.query_urls(scope, &UrlFilter::default(), 100, 0)
            .await
            .unwrap()
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn unique_records_have_no_provenance() {
        let db = open_memory().await.unwrap();
        let out = process_urls(&db, "p", "a", &strings(&["https://x.com/a"]))
            .await
            .unwrap();
        let view = &rows(&db, RecordScope::Import(out.import_id)).await[0];
        assert!(resolve_duplicate(&db, &view.record).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn cross_import_duplicate_points_to_first_import() {
        let db = open_memory().await.unwrap();
        let a = process_urls(&db, "p", "import A", &strings(&["https://x.com/a?utm_source=1"]))
            .await
            .unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let b = process_urls(&db, "p", "import B", &strings(&["https://x.com/a/"]))
            .await
            .unwrap();
        assert!(b.processed[0].is_duplicate);

        let original = rows(&db, RecordScope::Import(a.import_id)).await.remove(0);
        let dup = rows(&db, RecordScope::Import(b.import_id)).await.remove(0);
        let prov = resolve_duplicate(&db, &dup.record).await.unwrap().unwrap();
        assert_eq!(prov.id, original.record.id);
        assert_eq!(prov.original_url, "https://x.com/a?utm_source=1");
        assert_eq!(prov.import_alias, "import A");
        assert_eq!(prov.import_created_at, original.import.created_at);
    }

    #[tokio::test]
    async fn same_batch_duplicate_falls_back_to_first_occurrence() {
        let db = open_memory().await.unwrap();
        let out = process_urls(
            &db,
            "p",
            "batch",
            &strings(&[
                "https://x.com/a?ref=1",
                "https://x.com/a?ref=2",
                "https://x.com/a?ref=3",
            ]),
        )
        .await
        .unwrap();
        // Newest first: ids descending.
        let listed = rows(&db, RecordScope::Import(out.import_id)).await;
        let first = &listed[2].record;
        for dup in &listed[..2] {
            let prov = resolve_duplicate(&db, &dup.record).await.unwrap().unwrap();
            assert_eq!(prov.id, first.id);
            assert_eq!(prov.original_url, "https://x.com/a?ref=1");
        }
    }

    #[tokio::test]
    async fn deleted_original_leaves_flag_and_falls_back() {
        let db = open_memory().await.unwrap();
        let a = process_urls(&db, "p", "A", &strings(&["https://x.com/a"]))
            .await
            .unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let b = process_urls(&db, "p", "B", &strings(&["https://x.com/a"]))
            .await
            .unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let c = process_urls(&db, "p", "C", &strings(&["https://x.com/a"]))
            .await
            .unwrap();

        db.delete_import(a.import_id).await.unwrap();

        // B stays a duplicate; its only sibling left is the later C record.
        let b_row = rows(&db, RecordScope::Import(b.import_id)).await.remove(0);
        assert!(b_row.record.is_duplicate);
        let prov = resolve_duplicate(&db, &b_row.record).await.unwrap().unwrap();
        assert_eq!(prov.import_alias, "C");

        db.delete_import(c.import_id).await.unwrap();
        assert!(resolve_duplicate(&db, &b_row.record).await.unwrap().is_none());
    }
}
