//! `urlsift list (--profile <p> | --import <id>)` – one page of URLs, newest first.

use anyhow::Result;
use urlsift_core::engine::{list_urls, Pagination, Scope};
use urlsift_core::link_db::{LinkDb, UrlFilter};

use super::render::{format_timestamp, status_label};

pub async fn run_list(
    db: &LinkDb,
    scope: &Scope,
    filter: &UrlFilter,
    page: u32,
    page_size: u32,
    json: bool,
) -> Result<()> {
    let page = list_urls(db, scope, filter, Pagination::new(page, page_size)?).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&page)?);
        return Ok(());
    }
    if page.urls.is_empty() {
        println!("No URLs match.");
    }
    for view in &page.urls {
        println!(
            "{:<6} {:<9} {:<26} {:<20} {}",
            view.record.id,
            status_label(view),
            format_timestamp(view.record.created_at),
            view.import.alias,
            view.record.cleaned_url
        );
        if let Some(prov) = &view.duplicate_of {
            println!(
                "       first seen in '{}' at {} as {}",
                prov.import_alias,
                format_timestamp(prov.created_at),
                prov.original_url
            );
        }
    }
    println!(
        "Page {} of {} ({} URLs)",
        page.page,
        page.total_pages.max(1),
        page.total_count
    );
    Ok(())
}
