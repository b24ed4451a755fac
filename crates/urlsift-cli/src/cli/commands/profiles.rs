//! `urlsift profiles` – list profiles with import and URL counts.

use anyhow::Result;
use urlsift_core::link_db::LinkDb;

use super::render::format_timestamp;

pub async fn run_profiles(db: &LinkDb) -> Result<()> {
    let profiles = db.list_profiles().await?;
    if profiles.is_empty() {
        println!("No profiles in database.");
        return Ok(());
    }
    println!("{:<6} {:<8} {:<8} {:<26} {}", "ID", "IMPORTS", "URLS", "CREATED", "NAME");
    for p in profiles {
        println!(
            "{:<6} {:<8} {:<8} {:<26} {}",
            p.id,
            p.import_count,
            p.url_count,
            format_timestamp(p.created_at),
            p.name
        );
    }
    Ok(())
}
