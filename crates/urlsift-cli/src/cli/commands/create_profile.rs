//! `urlsift create-profile <name>` – create an empty profile.

use anyhow::Result;
use urlsift_core::link_db::LinkDb;

pub async fn run_create_profile(db: &LinkDb, name: &str) -> Result<()> {
    let profile = db.create_profile(name).await?;
    println!("Created profile {} ({})", profile.name, profile.id);
    Ok(())
}
