//! Provider record → canonical [`Job`] mapping.
//!
//! The normalizer is total: any JSON value, including `null` or an array,
//! yields a fully populated job. Each field is looked up in the shapes the
//! supported providers use, in priority order, before falling back to a
//! default.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;
use serde_json::Value;

use crate::models::{Badge, Job};

pub const DEFAULT_COMPANY: &str = "Unknown";
pub const DEFAULT_LOCATION: &str = "Remote";
pub const DEFAULT_SALARY: &str = "Not disclosed";
pub const DEFAULT_URL: &str = "#";
pub const DEFAULT_POSTED: &str = "Just now";

/// Maximum description length, in characters.
pub const DESCRIPTION_LIMIT: usize = 300;

const POSTED_FORMAT: &str = "%b %-d, %Y";

static MARKUP_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid tag regex"));

/// Map one raw provider record into a [`Job`].
///
/// `index` is the record's position in its provider's own result list; it
/// drives both the id and the badge.
pub fn normalize(raw: &Value, source: &str, index: usize) -> Job {
    Job {
        id: format!("{source}-{}", index + 1),
        title: text_at(raw, &["title"]).unwrap_or_default().to_string(),
        company: company(raw),
        location: location(raw),
        salary: salary(raw),
        description: text_at(raw, &["description"])
            .map(clean_description)
            .unwrap_or_default(),
        url: first_text(raw, &[&["redirect_url"], &["url"], &["refs", "landing_page"]])
            .unwrap_or(DEFAULT_URL)
            .to_string(),
        source: source.to_string(),
        tags: vec![
            source.to_uppercase(),
            "Live API".to_string(),
            "Verified".to_string(),
        ],
        posted: raw
            .get("created")
            .and_then(format_posted)
            .unwrap_or_else(|| DEFAULT_POSTED.to_string()),
        badge: Badge::for_position(index),
    }
}

/// Normalize up to `limit` records, numbering them in their original order.
pub fn normalize_all(records: &[Value], source: &str, limit: usize) -> Vec<Job> {
    records
        .iter()
        .take(limit)
        .enumerate()
        .map(|(i, raw)| normalize(raw, source, i))
        .collect()
}

/// Strip markup tags and cap the length at [`DESCRIPTION_LIMIT`] characters.
pub fn clean_description(html: &str) -> String {
    MARKUP_TAG
        .replace_all(html, "")
        .chars()
        .take(DESCRIPTION_LIMIT)
        .collect()
}

fn company(raw: &Value) -> String {
    first_text(
        raw,
        &[&["company", "display_name"], &["company", "name"], &["company"]],
    )
    .unwrap_or(DEFAULT_COMPANY)
    .to_string()
}

fn location(raw: &Value) -> String {
    let first_listed = raw
        .get("locations")
        .and_then(Value::as_array)
        .and_then(|locations| locations.first())
        .and_then(|loc| text_at(loc, &["name"]));

    first_text(
        raw,
        &[
            &["location", "display_name"],
            &["location"],
            &["candidate_required_location"],
        ],
    )
    .or(first_listed)
    .unwrap_or(DEFAULT_LOCATION)
    .to_string()
}

fn salary(raw: &Value) -> String {
    let min = raw.get("salary_min").and_then(scalar_text);
    let max = raw.get("salary_max").and_then(scalar_text);
    if let (Some(min), Some(max)) = (min, max) {
        return format!("₹{min} - ₹{max}");
    }
    raw.get("salary")
        .and_then(scalar_text)
        .unwrap_or_else(|| DEFAULT_SALARY.to_string())
}

/// Non-empty string at a nested object path.
fn text_at<'a>(raw: &'a Value, path: &[&str]) -> Option<&'a str> {
    let mut current = raw;
    for key in path {
        current = current.get(key)?;
    }
    current.as_str().filter(|s| !s.trim().is_empty())
}

fn first_text<'a>(raw: &'a Value, paths: &[&[&str]]) -> Option<&'a str> {
    paths.iter().find_map(|path| text_at(raw, path))
}

/// Render a non-empty string or non-zero number as text.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                (i != 0).then(|| i.to_string())
            } else if let Some(u) = n.as_u64() {
                (u != 0).then(|| u.to_string())
            } else {
                let f = n.as_f64()?;
                if f == 0.0 || !f.is_finite() {
                    None
                } else if f.fract() == 0.0 {
                    Some(format!("{f:.0}"))
                } else {
                    Some(f.to_string())
                }
            }
        }
        _ => None,
    }
}

/// Human-readable posting date from an ISO-8601 string or unix seconds.
fn format_posted(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let s = s.trim();
            if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
                return Some(dt.format(POSTED_FORMAT).to_string());
            }
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
                return Some(dt.format(POSTED_FORMAT).to_string());
            }
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .map(|d| d.format(POSTED_FORMAT).to_string())
        }
        Value::Number(n) => n
            .as_i64()
            .filter(|secs| *secs > 0)
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .map(|dt| dt.format(POSTED_FORMAT).to_string()),
        _ => None,
    }
}
