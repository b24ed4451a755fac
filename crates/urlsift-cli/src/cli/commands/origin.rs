//! `urlsift origin <id>` – show the earlier URL a duplicate was matched against.

use anyhow::Result;
use urlsift_core::engine::resolve_duplicate;
use urlsift_core::link_db::LinkDb;
use urlsift_core::Error;

use super::render::format_timestamp;

pub async fn run_origin(db: &LinkDb, id: i64) -> Result<()> {
    let record = db.get_url(id).await?.ok_or_else(|| Error::not_found("url", id))?;
    println!("URL {}: {}", record.id, record.cleaned_url);
    if !record.is_duplicate {
        println!("Not a duplicate.");
        return Ok(());
    }
    match resolve_duplicate(db, &record).await? {
        Some(prov) => {
            println!(
                "Duplicate of URL {} first seen {} in import '{}' ({})",
                prov.id,
                format_timestamp(prov.created_at),
                prov.import_alias,
                format_timestamp(prov.import_created_at)
            );
            println!("  {}", prov.original_url);
        }
        None => println!("Duplicate, but the original is no longer stored."),
    }
    Ok(())
}
