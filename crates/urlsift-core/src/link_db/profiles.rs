//! Profile operations: find-or-create, explicit create, listing, stats.

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};

use super::db::{unix_timestamp_millis, LinkDb};
use super::types::{Profile, ProfileId, ProfileStats, ProfileSummary};
use crate::{Error, Result};

fn profile_from_row(row: &SqliteRow) -> Profile {
    Profile {
        id: row.get("id"),
        name: row.get("name"),
        created_at: row.get("created_at"),
    }
}

/// Trims `name` and rejects blanks.
pub(crate) fn clean_profile_name(name: &str) -> Result<&str> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::Validation("profile name is required".into()));
    }
    Ok(name)
}

pub(crate) async fn find_by_name(conn: &mut SqliteConnection, name: &str) -> Result<Option<Profile>> {
    let row = sqlx::query(
        r#"
        SELECT id, name, created_at
        FROM profiles
        WHERE name = ?1
        "#,
    )
    .bind(name)
    .fetch_optional(&mut *conn)
    .await?;
    Ok(row.as_ref().map(profile_from_row))
}

/// Returns the profile called `name`, creating it first if needed.
/// `ON CONFLICT DO NOTHING` keeps this safe when two writers race on a new name.
pub(crate) async fn find_or_create(
    conn: &mut SqliteConnection,
    name: &str,
    now: i64,
) -> Result<Profile> {
    sqlx::query(
        r#"
        INSERT INTO profiles (name, created_at)
        VALUES (?1, ?2)
        ON CONFLICT(name) DO NOTHING
        "#,
    )
    .bind(name)
    .bind(now)
    .execute(&mut *conn)
    .await?;

    find_by_name(conn, name)
        .await?
        .ok_or_else(|| Error::not_found("profile", name))
}

impl LinkDb {
    /// Look up a profile by its exact (trimmed) name.
    pub async fn profile_by_name(&self, name: &str) -> Result<Option<Profile>> {
        let mut conn = self.pool.acquire().await?;
        find_by_name(&mut conn, name.trim()).await
    }

    pub async fn find_or_create_profile(&self, name: &str) -> Result<Profile> {
        let name = clean_profile_name(name)?;
        let mut conn = self.pool.acquire().await?;
        find_or_create(&mut conn, name, unix_timestamp_millis()).await
    }

    /// Create a profile; fails with `AlreadyExists` if the name is taken.
    pub async fn create_profile(&self, name: &str) -> Result<Profile> {
        let name = clean_profile_name(name)?;
        let now = unix_timestamp_millis();
        let inserted = sqlx::query(
            r#"
            INSERT INTO profiles (name, created_at)
            VALUES (?1, ?2)
            ON CONFLICT(name) DO NOTHING
            "#,
        )
        .bind(name)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if inserted.rows_affected() == 0 {
            return Err(Error::AlreadyExists(format!("profile {name:?}")));
        }
        Ok(Profile {
            id: inserted.last_insert_rowid(),
            name: name.to_string(),
            created_at: now,
        })
    }

    /// All profiles, newest first, with their import and URL counts.
    pub async fn list_profiles(&self) -> Result<Vec<ProfileSummary>> {
        let rows = sqlx::query(
            r#"
            SELECT
                p.id, p.name, p.created_at,
                (SELECT COUNT(*) FROM imports i WHERE i.profile_id = p.id) AS import_count,
                (SELECT COUNT(*) FROM urls u WHERE u.profile_id = p.id) AS url_count
            FROM profiles p
            ORDER BY p.created_at DESC, p.id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            let import_count: i64 = row.get("import_count");
            let url_count: i64 = row.get("url_count");
            out.push(ProfileSummary {
                id: row.get("id"),
                name: row.get("name"),
                created_at: row.get("created_at"),
                import_count: import_count as u64,
                url_count: url_count as u64,
            });
        }
        Ok(out)
    }

    /// URL totals for one profile.
    pub async fn profile_stats(&self, profile_id: ProfileId) -> Result<ProfileStats> {
        let row = sqlx::query(
            r#"
            SELECT
                COUNT(*) AS total_urls,
                COALESCE(SUM(is_duplicate), 0) AS duplicate_urls,
                COUNT(DISTINCT domain) AS unique_domains
            FROM urls
            WHERE profile_id = ?1
            "#,
        )
        .bind(profile_id)
        .fetch_one(&self.pool)
        .await?;

        let total: i64 = row.get("total_urls");
        let duplicates: i64 = row.get("duplicate_urls");
        let domains: i64 = row.get("unique_domains");
        Ok(ProfileStats {
            total_urls: total as u64,
            duplicate_urls: duplicates as u64,
            unique_urls: (total - duplicates) as u64,
            unique_domains: domains as u64,
        })
    }
}
