//! Types used by the link database.

use serde::{Deserialize, Serialize};

pub type ProfileId = i64;
pub type ImportId = i64;
pub type UrlId = i64;

/// Named bucket of imports. Names are unique and case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: ProfileId,
    pub name: String,
    pub created_at: i64,
}

/// One batch submission under a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Import {
    pub id: ImportId,
    pub profile_id: ProfileId,
    pub alias: String,
    pub created_at: i64,
}

/// One stored URL. `is_duplicate` is fixed when the row is written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlRecord {
    pub id: UrlId,
    pub profile_id: ProfileId,
    pub import_id: ImportId,
    pub original_url: String,
    pub cleaned_url: String,
    pub domain: String,
    pub is_duplicate: bool,
    pub created_at: i64,
}

/// Outcome for one submitted URL; also the payload of the batch insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessedUrl {
    pub original_url: String,
    pub cleaned_url: String,
    pub domain: String,
    pub is_duplicate: bool,
}

/// The earliest other record a duplicate collides with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateProvenance {
    pub id: UrlId,
    pub original_url: String,
    pub created_at: i64,
    pub import_alias: String,
    pub import_created_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportRef {
    pub id: ImportId,
    pub alias: String,
    pub created_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRef {
    pub id: ProfileId,
    pub name: String,
}

/// Listing row: the record, where it came from, and (for duplicates) what it duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlView {
    #[serde(flatten)]
    pub record: UrlRecord,
    pub import: ImportRef,
    pub profile: ProfileRef,
    pub duplicate_of: Option<DuplicateProvenance>,
}

/// Profile row for `profiles` listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileSummary {
    pub id: ProfileId,
    pub name: String,
    pub created_at: i64,
    pub import_count: u64,
    pub url_count: u64,
}

/// Import row for per-profile import listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub id: ImportId,
    pub alias: String,
    pub created_at: i64,
    pub url_count: u64,
    pub duplicate_count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileStats {
    pub total_urls: u64,
    pub duplicate_urls: u64,
    pub unique_urls: u64,
    pub unique_domains: u64,
}

/// Which records a query looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordScope {
    Import(ImportId),
    Profile(ProfileId),
}

/// Optional, AND-combined listing filters. Empty strings count as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlFilter {
    /// Case-insensitive substring of the domain.
    pub domain: Option<String>,
    pub is_duplicate: Option<bool>,
    /// Case-insensitive substring of the original URL, cleaned URL, or domain.
    pub search: Option<String>,
}

impl UrlFilter {
    pub(crate) fn domain_term(&self) -> Option<&str> {
        self.domain.as_deref().filter(|s| !s.is_empty())
    }

    pub(crate) fn search_term(&self) -> Option<&str> {
        self.search.as_deref().filter(|s| !s.is_empty())
    }
}
