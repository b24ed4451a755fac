//! `urlsift imports <profile>` – list a profile's imports, newest first.

use anyhow::Result;
use urlsift_core::link_db::LinkDb;

use super::render::format_timestamp;

pub async fn run_imports(db: &LinkDb, profile: &str) -> Result<()> {
    let imports = match db.profile_by_name(profile.trim()).await? {
        Some(p) => db.list_imports(p.id).await?,
        None => Vec::new(),
    };
    if imports.is_empty() {
        println!("No imports for profile {profile}.");
        return Ok(());
    }
    println!("{:<6} {:<6} {:<6} {:<26} {}", "ID", "URLS", "DUPS", "CREATED", "ALIAS");
    for i in imports {
        println!(
            "{:<6} {:<6} {:<6} {:<26} {}",
            i.id,
            i.url_count,
            i.duplicate_count,
            format_timestamp(i.created_at),
            i.alias
        );
    }
    Ok(())
}
