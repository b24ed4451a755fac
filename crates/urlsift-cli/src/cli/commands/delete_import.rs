//! `urlsift delete-import <id>` – delete an import and its URLs.

use anyhow::Result;
use urlsift_core::link_db::LinkDb;

pub async fn run_delete_import(db: &LinkDb, id: i64) -> Result<()> {
    db.delete_import(id).await?;
    println!("Deleted import {id}");
    Ok(())
}
