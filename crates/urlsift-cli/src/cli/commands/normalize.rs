//! `urlsift normalize <url>...` – print canonical form and domain, store nothing.

use anyhow::Result;
use urlsift_core::normalize::normalize;

pub fn run_normalize(urls: &[String]) -> Result<()> {
    for raw in urls {
        let n = normalize(raw);
        println!("{}\t{}", n.cleaned_url, n.domain);
    }
    Ok(())
}
