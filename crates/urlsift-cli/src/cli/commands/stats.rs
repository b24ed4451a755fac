//! `urlsift stats <profile>` – URL totals for a profile.

use anyhow::Result;
use urlsift_core::link_db::LinkDb;
use urlsift_core::Error;

pub async fn run_stats(db: &LinkDb, profile: &str) -> Result<()> {
    let name = profile.trim();
    let p = db
        .profile_by_name(name)
        .await?
        .ok_or_else(|| Error::not_found("profile", name))?;
    let stats = db.profile_stats(p.id).await?;
    println!("Profile:        {}", p.name);
    println!("Total URLs:     {}", stats.total_urls);
    println!("Unique URLs:    {}", stats.unique_urls);
    println!("Duplicate URLs: {}", stats.duplicate_urls);
    println!("Domains:        {}", stats.unique_domains);
    Ok(())
}
