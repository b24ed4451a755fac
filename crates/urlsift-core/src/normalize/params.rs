//! Query parameter classification: tracking noise vs. functional identifiers.

/// Parameters that exist only for analytics or attribution.
/// A name also matches when it starts with `<entry>_` (e.g. `utm_source_x`, `ref_src`).
const TRACKING_PARAMS: &[&str] = &[
    // Campaign analytics
    "utm_source",
    "utm_medium",
    "utm_campaign",
    "utm_term",
    "utm_content",
    // Ad-network click ids
    "fbclid",
    "fb_source",
    "fb_ref",
    "gclid",
    "gclsrc",
    "dclid",
    // Generic referral markers
    "ref",
    "source",
    "referrer",
    "campaign",
    "medium",
    "origin",
    "gh_src",
    "trackingId",
    "src",
    "tk",
    "from",
    "sponsored",
    "refId",
    "trk",
    "_ga",
    "_gac",
    "mc_cid",
    "mc_eid",
];

/// Parameters required to identify the resource; never stripped.
const FUNCTIONAL_PARAMS: &[&str] = &[
    // Job identifiers
    "gh_jid",
    "jid",
    "job_id",
    "jobId",
    "id",
    "posting_id",
    // Application flow
    "t",
    "token",
    "application_id",
    // Listing filters
    "location",
    "department",
    "team",
    "category",
    // Lever application flow
    "lever-origin",
    "lever-source",
];

/// True when `name` is on the functional allow-list or looks like a job identifier
/// (contains `jid`, or contains both `job` and `id`). Case-insensitive.
pub fn is_functional_param(name: &str) -> bool {
    let lower = name.to_lowercase();
    if lower.contains("jid") || (lower.contains("job") && lower.contains("id")) {
        return true;
    }
    FUNCTIONAL_PARAMS
        .iter()
        .any(|p| p.eq_ignore_ascii_case(&lower))
}

/// True when `name` equals a tracking parameter or extends one with `_`. Case-insensitive.
pub fn is_tracking_param(name: &str) -> bool {
    let lower = name.to_lowercase();
    TRACKING_PARAMS.iter().any(|p| {
        let p = p.to_ascii_lowercase();
        lower == p
            || lower
                .strip_prefix(p.as_str())
                .is_some_and(|rest| rest.starts_with('_'))
    })
}

/// A parameter is stripped only when it is tracking and not functional.
pub fn should_strip(name: &str) -> bool {
    is_tracking_param(name) && !is_functional_param(name)
}
