//! Persistent link database (SQLite via sqlx).
//!
//! Stores profiles, their imports, and every submitted URL together with its
//! canonical form and the duplicate flag computed when it was written.

mod db;
mod imports;
mod profiles;
mod types;
mod urls;

pub use db::LinkDb;
pub use types::*;

pub(crate) use db::unix_timestamp_millis;
pub(crate) use imports::{clean_alias, insert_import};
pub(crate) use profiles::{clean_profile_name, find_or_create as find_or_create_profile};
pub(crate) use urls::{insert_urls, load_seen, SeenRow};

#[cfg(test)]
pub(crate) use db::open_memory;
