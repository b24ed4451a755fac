//! Import operations: create, get, list per profile, delete (cascading to URLs).

use sqlx::{Row, SqliteConnection};

use super::db::{unix_timestamp_millis, LinkDb};
use super::types::{Import, ImportId, ImportSummary, ProfileId};
use crate::{Error, Result};

/// Trims `alias` and rejects blanks. Aliases need not be unique.
pub(crate) fn clean_alias(alias: &str) -> Result<&str> {
    let alias = alias.trim();
    if alias.is_empty() {
        return Err(Error::Validation("import alias is required".into()));
    }
    Ok(alias)
}

pub(crate) async fn insert_import(
    conn: &mut SqliteConnection,
    profile_id: ProfileId,
    alias: &str,
    now: i64,
) -> Result<Import> {
    let id = sqlx::query(
        r#"
        INSERT INTO imports (profile_id, alias, created_at)
        VALUES (?1, ?2, ?3)
        "#,
    )
    .bind(profile_id)
    .bind(alias)
    .bind(now)
    .execute(&mut *conn)
    .await?
    .last_insert_rowid();

    Ok(Import {
        id,
        profile_id,
        alias: alias.to_string(),
        created_at: now,
    })
}

impl LinkDb {
    /// Create an empty import under `profile_id`.
    pub async fn create_import(&self, profile_id: ProfileId, alias: &str) -> Result<Import> {
        let alias = clean_alias(alias)?;
        let mut conn = self.pool.acquire().await?;
        insert_import(&mut conn, profile_id, alias, unix_timestamp_millis()).await
    }

    pub async fn get_import(&self, id: ImportId) -> Result<Option<Import>> {
        let row = sqlx::query(
            r#"
            SELECT id, profile_id, alias, created_at
            FROM imports
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| Import {
            id: row.get("id"),
            profile_id: row.get("profile_id"),
            alias: row.get("alias"),
            created_at: row.get("created_at"),
        }))
    }

    /// Imports of one profile, newest first, with URL and duplicate counts.
    pub async fn list_imports(&self, profile_id: ProfileId) -> Result<Vec<ImportSummary>> {
        let rows = sqlx::query(
            r#"
            SELECT
                i.id, i.alias, i.created_at,
                COUNT(u.id) AS url_count,
                COALESCE(SUM(u.is_duplicate), 0) AS duplicate_count
            FROM imports i
            LEFT JOIN urls u ON u.import_id = i.id
            WHERE i.profile_id = ?1
            GROUP BY i.id, i.alias, i.created_at
            ORDER BY i.created_at DESC, i.id DESC
            "#,
        )
        .bind(profile_id)
        .fetch_all(&self.pool)
        .await?;

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            let url_count: i64 = row.get("url_count");
            let duplicate_count: i64 = row.get("duplicate_count");
            out.push(ImportSummary {
                id: row.get("id"),
                alias: row.get("alias"),
                created_at: row.get("created_at"),
                url_count: url_count as u64,
                duplicate_count: duplicate_count as u64,
            });
        }
        Ok(out)
    }

    /// Permanently remove an import and every URL record it owns.
    ///
    /// Duplicate flags on other imports' records are left untouched.
    pub async fn delete_import(&self, id: ImportId) -> Result<()> {
        let mut tx = self.begin().await?;

        let urls = sqlx::query("DELETE FROM urls WHERE import_id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let deleted = sqlx::query("DELETE FROM imports WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if deleted.rows_affected() == 0 {
            // Dropping the transaction rolls back.
            return Err(Error::not_found("import", id));
        }

        tx.commit().await?;
        tracing::info!(
            import_id = id,
            urls = urls.rows_affected(),
            "deleted import"
        );
        Ok(())
    }
}
