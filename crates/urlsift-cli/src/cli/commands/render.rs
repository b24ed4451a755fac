//! Text rendering shared by list and export: timestamps, CSV, plain text.

use chrono::{DateTime, SecondsFormat};
use urlsift_core::link_db::UrlView;

pub const CSV_HEADER: &str = "Original URL,Cleaned URL,Domain,Status,Import,Created At";

/// Unix milliseconds as RFC 3339 UTC; out-of-range values print as the raw number.
pub fn format_timestamp(millis: i64) -> String {
    DateTime::from_timestamp_millis(millis)
        .map(|t| t.to_rfc3339_opts(SecondsFormat::Millis, true))
        .unwrap_or_else(|| millis.to_string())
}

pub fn status_label(view: &UrlView) -> &'static str {
    if view.record.is_duplicate {
        "Duplicate"
    } else {
        "Unique"
    }
}

fn csv_field(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

pub fn render_csv(urls: &[UrlView]) -> String {
    let mut out = String::from(CSV_HEADER);
    out.push('\n');
    for view in urls {
        let fields = [
            csv_field(&view.record.original_url),
            csv_field(&view.record.cleaned_url),
            csv_field(&view.record.domain),
            csv_field(status_label(view)),
            csv_field(&view.import.alias),
            csv_field(&format_timestamp(view.record.created_at)),
        ];
        out.push_str(&fields.join(","));
        out.push('\n');
    }
    out
}

/// One cleaned URL per line.
pub fn render_txt(urls: &[UrlView]) -> String {
    let mut out = String::new();
    for view in urls {
        out.push_str(&view.record.cleaned_url);
        out.push('\n');
    }
    out
}
