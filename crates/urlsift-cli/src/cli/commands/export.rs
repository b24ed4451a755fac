//! `urlsift export (--profile <p> | --import <id>)` – every matching URL as CSV or text.

use anyhow::{Context, Result};
use std::path::Path;
use urlsift_core::engine::{list_all_urls, Scope};
use urlsift_core::link_db::{LinkDb, UrlFilter};

use super::render::{render_csv, render_txt};
use crate::cli::ExportFormat;

pub async fn run_export(
    db: &LinkDb,
    scope: &Scope,
    filter: &UrlFilter,
    format: ExportFormat,
    output: Option<&Path>,
    export_page_size: u32,
) -> Result<()> {
    let urls = list_all_urls(db, scope, filter, export_page_size).await?;
    let body = match format {
        ExportFormat::Csv => render_csv(&urls),
        ExportFormat::Txt => render_txt(&urls),
    };

    match output {
        Some(path) => {
            std::fs::write(path, body)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("Exported {} URLs to {}", urls.len(), path.display());
        }
        None => print!("{body}"),
    }
    Ok(())
}
