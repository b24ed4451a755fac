//! The duplicate-lineage engine: batch processing, provenance lookup, listings.

pub mod batch;
pub mod lineage;
pub mod listing;

pub use batch::{process_urls, BatchOutcome};
pub use lineage::resolve_duplicate;
pub use listing::{list_all_urls, list_urls, Pagination, Scope, UrlPage};
