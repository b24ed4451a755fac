//! Filtered, paginated URL listings with duplicate provenance attached.

use serde::Serialize;

use super::lineage::resolve_duplicate;
use crate::link_db::{ImportId, LinkDb, RecordScope, UrlFilter, UrlView};
use crate::{Error, Result};

pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Page size used by export-all: one page that holds everything in practice.
pub const EXPORT_PAGE_SIZE: u32 = 10_000;

/// Which URL set a listing covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    /// One import.
    Import(ImportId),
    /// Every import of the named profile.
    Profile(String),
}

/// 1-based page window. Both values are at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    page: u32,
    page_size: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Pagination {
    pub fn new(page: u32, page_size: u32) -> Result<Self> {
        if page == 0 {
            return Err(Error::Validation("page must be at least 1".into()));
        }
        if page_size == 0 {
            return Err(Error::Validation("page size must be at least 1".into()));
        }
        Ok(Self { page, page_size })
    }

    /// First page with `page_size` rows: the export-all window.
    pub fn everything(page_size: u32) -> Result<Self> {
        Self::new(1, page_size)
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.page_size)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UrlPage {
    pub urls: Vec<UrlView>,
    pub total_count: u64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u64,
}

impl UrlPage {
    fn empty(pagination: Pagination) -> Self {
        UrlPage {
            urls: Vec::new(),
            total_count: 0,
            page: 1,
            page_size: pagination.page_size,
            total_pages: 0,
        }
    }
}

/// Lists the URLs in `scope` that match `filter`, newest first, one page at a time.
/// Every duplicate row carries its provenance (or `None` if it cannot be traced).
/// An unknown profile yields an empty page rather than an error.
pub async fn list_urls(
    db: &LinkDb,
    scope: &Scope,
    filter: &UrlFilter,
    pagination: Pagination,
) -> Result<UrlPage> {
    let scope = match scope {
        Scope::Import(id) => RecordScope::Import(*id),
        Scope::Profile(name) => match db.profile_by_name(name).await? {
            Some(profile) => RecordScope::Profile(profile.id),
            None => {
                tracing::debug!(profile = %name, "listing unknown profile");
                return Ok(UrlPage::empty(pagination));
            }
        },
    };

    let total_count = db.count_urls(scope, filter).await?;
    let mut urls = db
        .query_urls(
            scope,
            filter,
            u64::from(pagination.page_size),
            pagination.offset(),
        )
        .await?;

    for view in urls.iter_mut() {
        if view.record.is_duplicate {
            view.duplicate_of = resolve_duplicate(db, &view.record).await?;
        }
    }

    Ok(UrlPage {
        urls,
        total_count,
        page: pagination.page,
        page_size: pagination.page_size,
        total_pages: total_count.div_ceil(u64::from(pagination.page_size)),
    })
}

/// Export-all: the same listing as one page of `export_page_size` rows.
pub async fn list_all_urls(
    db: &LinkDb,
    scope: &Scope,
    filter: &UrlFilter,
    export_page_size: u32,
) -> Result<Vec<UrlView>> {
    let page = list_urls(db, scope, filter, Pagination::everything(export_page_size)?).await?;
    if page.total_count > page.urls.len() as u64 {
        tracing::warn!(
            total = page.total_count,
            exported = page.urls.len(),
            "export truncated at page size"
        );
    }
    Ok(page.urls)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::batch::process_urls;
    use crate::link_db::open_memory;
    use std::collections::HashSet;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    async fn seeded() -> (LinkDb, ImportId, ImportId) {
        let db = open_memory().await.unwrap();
        let a = process_urls(
            &db,
            "p",
            "A",
            &strings(&[
                "https://jobs.acme.com/1",
                "https://jobs.acme.com/2?utm_source=x",
                "https://blog.acme.com/post",
                "https://other.org/jobs",
                "https://other.org/about",
            ]),
        )
        .await
        .unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let b = process_urls(
            &db,
            "p",
            "B",
            &strings(&[
                "https://jobs.acme.com/1/",
                "https://jobs.acme.com/2",
                "https://new.acme.com/",
                "https://other.org/jobs?ref=mail",
            ]),
        )
        .await
        .unwrap();
        (db, a.import_id, b.import_id)
    }

    #[test]
    fn pagination_validation() {
        assert!(Pagination::new(0, 10).is_err());
        assert!(Pagination::new(1, 0).is_err());
        let p = Pagination::new(3, 20).unwrap();
        assert_eq!(p.offset(), 40);
        assert_eq!(Pagination::default().page_size(), DEFAULT_PAGE_SIZE);
        assert_eq!(Pagination::default().page(), 1);
    }

    #[tokio::test]
    async fn unknown_profile_is_empty_not_error() {
        let db = open_memory().await.unwrap();
        let page = list_urls(
            &db,
            &Scope::Profile("nobody".into()),
            &UrlFilter::default(),
            Pagination::new(2, 10).unwrap(),
        )
        .await
        .unwrap();
        assert!(page.urls.is_empty());
        assert_eq!(page.total_count, 0);
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.page, 1);
        assert_eq!(page.page_size, 10);
    }

    #[tokio::test]
    async fn pages_partition_the_filtered_set() {
        let (db, _, _) = seeded().await;
        let scope = Scope::Profile("p".into());
        let filter = UrlFilter::default();

        let full = list_all_urls(&db, &scope, &filter, EXPORT_PAGE_SIZE).await.unwrap();
        assert_eq!(full.len(), 9);

        let first = list_urls(&db, &scope, &filter, Pagination::new(1, 4).unwrap())
            .await
            .unwrap();
        assert_eq!(first.total_count, 9);
        assert_eq!(first.total_pages, 3);

        let mut concatenated = Vec::new();
        for page in 1..=first.total_pages as u32 {
            let p = list_urls(&db, &scope, &filter, Pagination::new(page, 4).unwrap())
                .await
                .unwrap();
            concatenated.extend(p.urls);
        }
        let ids: Vec<_> = concatenated.iter().map(|v| v.record.id).collect();
        let full_ids: Vec<_> = full.iter().map(|v| v.record.id).collect();
        assert_eq!(ids, full_ids);
        assert_eq!(ids.iter().collect::<HashSet<_>>().len(), ids.len());

        let beyond = list_urls(&db, &scope, &filter, Pagination::new(4, 4).unwrap())
            .await
            .unwrap();
        assert!(beyond.urls.is_empty());
        assert_eq!(beyond.total_count, 9);
    }

    #[tokio::test]
    async fn newest_first_ordering() {
        let (db, a, b) = seeded().await;
        let all = list_all_urls(&db, &Scope::Profile("p".into()), &UrlFilter::default(), 100)
            .await
            .unwrap();
        assert!(all[..4].iter().all(|v| v.import.id == b));
        assert!(all[4..].iter().all(|v| v.import.id == a));
        assert!(all
            .windows(2)
            .all(|w| (w[0].record.created_at, w[0].record.id) > (w[1].record.created_at, w[1].record.id)));
    }

    #[tokio::test]
    async fn duplicates_carry_provenance() {
        let (db, a, b) = seeded().await;
        let page = list_urls(
            &db,
            &Scope::Import(b),
            &UrlFilter::default(),
            Pagination::default(),
        )
        .await
        .unwrap();
        assert_eq!(page.total_count, 4);
        for view in &page.urls {
            if view.record.is_duplicate {
                let prov = view.duplicate_of.as_ref().expect("provenance");
                assert_eq!(prov.import_alias, "A");
            } else {
                assert!(view.duplicate_of.is_none());
            }
        }
        let dup_count = page.urls.iter().filter(|v| v.record.is_duplicate).count();
        assert_eq!(dup_count, 3);

        let a_page = list_urls(&db, &Scope::Import(a), &UrlFilter::default(), Pagination::default())
            .await
            .unwrap();
        assert!(a_page.urls.iter().all(|v| !v.record.is_duplicate));
    }

    #[tokio::test]
    async fn combined_filters_are_the_intersection() {
        let (db, _, _) = seeded().await;
        let scope = Scope::Profile("p".into());
        let ids = |page: UrlPage| -> HashSet<i64> { page.urls.iter().map(|v| v.record.id).collect() };

        let domain = UrlFilter {
            domain: Some("ACME".into()),
            ..Default::default()
        };
        let dup = UrlFilter {
            is_duplicate: Some(true),
            ..Default::default()
        };
        let search = UrlFilter {
            search: Some("jobs".into()),
            ..Default::default()
        };
        let combined = UrlFilter {
            domain: domain.domain.clone(),
            is_duplicate: dup.is_duplicate,
            search: search.search.clone(),
        };

        let wide = Pagination::everything(EXPORT_PAGE_SIZE).unwrap();
        let d = ids(list_urls(&db, &scope, &domain, wide).await.unwrap());
        let u = ids(list_urls(&db, &scope, &dup, wide).await.unwrap());
        let s = ids(list_urls(&db, &scope, &search, wide).await.unwrap());
        let c = ids(list_urls(&db, &scope, &combined, wide).await.unwrap());

        let expected: HashSet<i64> = d
            .intersection(&u)
            .copied()
            .collect::<HashSet<_>>()
            .intersection(&s)
            .copied()
            .collect();
        assert_eq!(c, expected);
        // jobs.acme.com/1/ and jobs.acme.com/2 from import B.
        assert_eq!(c.len(), 2);
    }

    #[tokio::test]
    async fn deleted_import_excluded_from_profile_listing() {
        let (db, a, _) = seeded().await;
        db.delete_import(a).await.unwrap();
        let page = list_urls(
            &db,
            &Scope::Profile("p".into()),
            &UrlFilter::default(),
            Pagination::default(),
        )
        .await
        .unwrap();
        assert_eq!(page.total_count, 4);
        assert!(page.urls.iter().all(|v| v.import.alias == "B"));
        // Flags are not recomputed; with import A gone there is nothing left to point at.
        assert!(page
            .urls
            .iter()
            .filter(|v| v.record.is_duplicate)
            .all(|v| v.duplicate_of.is_none()));
    }
}
