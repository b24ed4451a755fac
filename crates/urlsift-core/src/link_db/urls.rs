//! URL record operations: batch insert, filtered listing, lineage lookups.

use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite, SqliteConnection};

use super::db::LinkDb;
use super::types::{
    DuplicateProvenance, ImportId, ImportRef, ProcessedUrl, ProfileId, ProfileRef, RecordScope,
    UrlFilter, UrlId, UrlRecord, UrlView,
};
use crate::Result;

/// Rows per multi-row INSERT; 10 binds per row keeps us under SQLite's
/// default limit of 999 host parameters.
const INSERT_CHUNK: usize = 90;

/// Lowercased shadow columns matched by the free-text search filter.
/// SQLite's `lower()` only folds ASCII, so these are filled from Rust.
const SEARCH_COLUMNS: [&str; 3] = ["u.original_url_lc", "u.cleaned_url_lc", "u.domain_lc"];

const VIEW_SELECT: &str = r#"
    SELECT
        u.id, u.profile_id, u.import_id, u.original_url, u.cleaned_url,
        u.domain, u.is_duplicate, u.created_at,
        i.alias AS import_alias, i.created_at AS import_created_at,
        p.name AS profile_name
    FROM urls u
    JOIN imports i ON i.id = u.import_id
    JOIN profiles p ON p.id = u.profile_id
"#;

/// Existing record as seen by the batch processor when it builds its seen-set.
#[derive(Debug, Clone)]
pub(crate) struct SeenRow {
    pub cleaned_url: String,
    pub id: UrlId,
    pub created_at: i64,
    pub import_alias: String,
    pub import_created_at: i64,
}

/// Every record of a profile, oldest first (ties by id), with its import's alias.
pub(crate) async fn load_seen(
    conn: &mut SqliteConnection,
    profile_id: ProfileId,
) -> Result<Vec<SeenRow>> {
    let rows = sqlx::query(
        r#"
        SELECT u.cleaned_url, u.id, u.created_at,
               i.alias AS import_alias, i.created_at AS import_created_at
        FROM urls u
        JOIN imports i ON i.id = u.import_id
        WHERE u.profile_id = ?1
        ORDER BY u.created_at ASC, u.id ASC
        "#,
    )
    .bind(profile_id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| SeenRow {
            cleaned_url: row.get("cleaned_url"),
            id: row.get("id"),
            created_at: row.get("created_at"),
            import_alias: row.get("import_alias"),
            import_created_at: row.get("import_created_at"),
        })
        .collect())
}

/// Insert `urls` under one import, preserving slice order in the id sequence.
pub(crate) async fn insert_urls(
    conn: &mut SqliteConnection,
    profile_id: ProfileId,
    import_id: ImportId,
    created_at: i64,
    urls: &[ProcessedUrl],
) -> Result<u64> {
    let mut inserted = 0;
    for chunk in urls.chunks(INSERT_CHUNK) {
        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(
            "INSERT INTO urls (profile_id, import_id, original_url, cleaned_url, domain, \
             original_url_lc, cleaned_url_lc, domain_lc, is_duplicate, created_at) ",
        );
        qb.push_values(chunk, |mut b, url| {
            b.push_bind(profile_id)
                .push_bind(import_id)
                .push_bind(url.original_url.as_str())
                .push_bind(url.cleaned_url.as_str())
                .push_bind(url.domain.as_str())
                .push_bind(url.original_url.to_lowercase())
                .push_bind(url.cleaned_url.to_lowercase())
                .push_bind(url.domain.to_lowercase())
                .push_bind(url.is_duplicate)
                .push_bind(created_at);
        });
        inserted += qb.build().execute(&mut *conn).await?.rows_affected();
    }
    Ok(inserted)
}

/// Appends `WHERE` for the scope and every set filter. Expects the `urls` table aliased as `u`.
fn push_scope_and_filters(qb: &mut QueryBuilder<'_, Sqlite>, scope: RecordScope, filter: &UrlFilter) {
    match scope {
        RecordScope::Import(id) => {
            qb.push(" WHERE u.import_id = ");
            qb.push_bind(id);
        }
        RecordScope::Profile(id) => {
            qb.push(" WHERE u.profile_id = ");
            qb.push_bind(id);
        }
    }

    if let Some(domain) = filter.domain_term() {
        qb.push(" AND instr(u.domain_lc, ");
        qb.push_bind(domain.to_lowercase());
        qb.push(") > 0");
    }

    if let Some(flag) = filter.is_duplicate {
        qb.push(" AND u.is_duplicate = ");
        qb.push_bind(flag);
    }

    if let Some(term) = filter.search_term() {
        let term = term.to_lowercase();
        qb.push(" AND (");
        for (i, column) in SEARCH_COLUMNS.iter().enumerate() {
            if i > 0 {
                qb.push(" OR ");
            }
            qb.push(format!("instr({column}, "));
            qb.push_bind(term.clone());
            qb.push(") > 0");
        }
        qb.push(")");
    }
}

fn record_from_row(row: &SqliteRow) -> UrlRecord {
    UrlRecord {
        id: row.get("id"),
        profile_id: row.get("profile_id"),
        import_id: row.get("import_id"),
        original_url: row.get("original_url"),
        cleaned_url: row.get("cleaned_url"),
        domain: row.get("domain"),
        is_duplicate: row.get("is_duplicate"),
        created_at: row.get("created_at"),
    }
}

fn view_from_row(row: &SqliteRow) -> UrlView {
    let record = record_from_row(row);
    UrlView {
        import: ImportRef {
            id: record.import_id,
            alias: row.get("import_alias"),
            created_at: row.get("import_created_at"),
        },
        profile: ProfileRef {
            id: record.profile_id,
            name: row.get("profile_name"),
        },
        record,
        duplicate_of: None,
    }
}

impl LinkDb {
    /// Number of records in `scope` matching `filter`.
    pub async fn count_urls(&self, scope: RecordScope, filter: &UrlFilter) -> Result<u64> {
        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new("SELECT COUNT(*) AS n FROM urls u");
        push_scope_and_filters(&mut qb, scope, filter);
        let row = qb.build().fetch_one(&self.pool).await?;
        let n: i64 = row.get("n");
        Ok(n as u64)
    }

    /// One window of matching records, newest first (ties by id, newest first).
    /// `duplicate_of` is left unset; the listing layer fills it in.
    pub async fn query_urls(
        &self,
        scope: RecordScope,
        filter: &UrlFilter,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<UrlView>> {
        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(VIEW_SELECT);
        push_scope_and_filters(&mut qb, scope, filter);
        qb.push(" ORDER BY u.created_at DESC, u.id DESC LIMIT ");
        qb.push_bind(limit as i64);
        qb.push(" OFFSET ");
        qb.push_bind(offset as i64);

        let rows = qb.build().fetch_all(&self.pool).await?;
        Ok(rows.iter().map(view_from_row).collect())
    }

    pub async fn get_url(&self, id: UrlId) -> Result<Option<UrlRecord>> {
        let row = sqlx::query(
            r#"
            SELECT id, profile_id, import_id, original_url, cleaned_url,
                   domain, is_duplicate, created_at
            FROM urls u
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(record_from_row))
    }

    /// Earliest record in `profile_id` whose canonical form is `cleaned_url`,
    /// optionally skipping `exclude_id` and optionally restricted to
    /// `created_at < before`. Ties on `created_at` go to the lowest id.
    pub async fn earliest_match(
        &self,
        profile_id: ProfileId,
        cleaned_url: &str,
        exclude_id: Option<UrlId>,
        before: Option<i64>,
    ) -> Result<Option<DuplicateProvenance>> {
        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(
            r#"
            SELECT u.id, u.original_url, u.created_at,
                   i.alias AS import_alias, i.created_at AS import_created_at
            FROM urls u
            JOIN imports i ON i.id = u.import_id
            WHERE u.profile_id = "#,
        );
        qb.push_bind(profile_id);
        qb.push(" AND u.cleaned_url = ");
        qb.push_bind(cleaned_url.to_string());
        if let Some(id) = exclude_id {
            qb.push(" AND u.id <> ");
            qb.push_bind(id);
        }
        if let Some(ts) = before {
            qb.push(" AND u.created_at < ");
            qb.push_bind(ts);
        }
        qb.push(" ORDER BY u.created_at ASC, u.id ASC LIMIT 1");

        let row = qb.build().fetch_optional(&self.pool).await?;
        Ok(row.map(|row| DuplicateProvenance {
            id: row.get("id"),
            original_url: row.get("original_url"),
            created_at: row.get("created_at"),
            import_alias: row.get("import_alias"),
            import_created_at: row.get("import_created_at"),
        }))
    }
}
