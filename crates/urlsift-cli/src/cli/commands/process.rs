//! `urlsift process --profile <p> --alias <a>` – clean, deduplicate and store a batch.

use anyhow::{bail, Context, Result};
use std::io::Read;
use std::path::Path;
use urlsift_core::engine::process_urls;
use urlsift_core::intake::{extract_urls_from_text, is_valid_url, parse_submission};
use urlsift_core::link_db::LinkDb;

/// Inline text wins; otherwise the file, where `-` (or no file at all) means stdin.
fn read_input(file: Option<&Path>, text: Option<&str>) -> Result<String> {
    if let Some(text) = text {
        return Ok(text.to_string());
    }
    match file {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}

pub async fn run_process(
    db: &LinkDb,
    profile: &str,
    alias: &str,
    file: Option<&Path>,
    text: Option<&str>,
    extract: bool,
    json: bool,
) -> Result<()> {
    let input = read_input(file, text)?;
    let urls = if extract {
        extract_urls_from_text(&input)
    } else {
        parse_submission(&input)
    };
    if urls.is_empty() {
        bail!("no URLs found in input");
    }
    for url in urls.iter().filter(|u| !is_valid_url(u)) {
        tracing::warn!(url = %url, "input line does not parse as a URL; storing as-is");
    }

    let outcome = process_urls(db, profile, alias, &urls).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }
    for url in &outcome.processed {
        let status = if url.is_duplicate { "DUP" } else { "NEW" };
        println!("{:<4} {}", status, url.cleaned_url);
    }
    println!(
        "Import {} for profile {}: {} URLs, {} duplicates",
        outcome.import_id,
        profile.trim(),
        outcome.processed.len(),
        outcome.duplicate_count()
    );
    Ok(())
}
