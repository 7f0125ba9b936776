//! Normalisation of raw list-filter values.
//!
//! List endpoints accept loosely-typed query strings. Everything here is
//! lenient: a value that cannot be understood yields `None` (filter not
//! applied) rather than an error.

use crate::patch::{parse_timestamp, parse_timestamp_end_of_day};
use crate::types::{DbId, Minutes, Timestamp};

/// Sentinel used by the UI to mean "do not filter on this field".
pub const FILTER_ALL: &str = "all";

/// Separator for multi-value filters (`tags=a,b`, `status=todo,in_progress`).
pub const LIST_SEPARATOR: char = ',';

/// Normalise an exact-match filter value.
///
/// Absent, blank and `"all"` all mean "no filter".
pub fn exact_filter(raw: Option<&str>) -> Option<&str> {
    let value = raw?.trim();
    if value.is_empty() || value.eq_ignore_ascii_case(FILTER_ALL) {
        None
    } else {
        Some(value)
    }
}

/// Parse an id filter. Non-numeric values are ignored.
pub fn id_filter(raw: Option<&str>) -> Option<DbId> {
    exact_filter(raw)?.parse().ok()
}

/// Split a comma-separated list, trimming entries and dropping empty ones.
///
/// Entries are taken literally: `"all"` is an ordinary value here (a tag may
/// be called `all`). Returns `None` when nothing usable remains.
pub fn list_filter(raw: Option<&str>) -> Option<Vec<String>> {
    let items: Vec<String> = raw?
        .split(LIST_SEPARATOR)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    if items.is_empty() {
        None
    } else {
        Some(items)
    }
}

/// Like [`list_filter`], but honours the `"all"` sentinel and keeps only
/// entries accepted by `parse`.
///
/// Used for enum-valued filters: unknown statuses are dropped, and if none
/// survive the filter is not applied at all.
pub fn parsed_list_filter<T, F>(raw: Option<&str>, parse: F) -> Option<Vec<T>>
where
    F: Fn(&str) -> Option<T>,
{
    let parsed: Vec<T> = list_filter(exact_filter(raw))?
        .iter()
        .filter_map(|item| parse(item.as_str()))
        .collect();

    if parsed.is_empty() {
        None
    } else {
        Some(parsed)
    }
}

/// Build an `ILIKE` pattern for a case-insensitive substring search.
///
/// An empty search string means "no search filter". `%`, `_` and `\` in the
/// user input are escaped so they match literally.
pub fn search_pattern(raw: Option<&str>) -> Option<String> {
    let term = raw?.trim();
    if term.is_empty() {
        return None;
    }

    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    Some(pattern)
}

/// Parse a boolean flag. Only `true`/`false`/`1`/`0` are understood.
pub fn bool_filter(raw: Option<&str>) -> Option<bool> {
    match raw?.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

/// Parse a non-negative minutes bound.
pub fn minutes_filter(raw: Option<&str>) -> Option<Minutes> {
    exact_filter(raw)?.parse().ok().filter(|m: &Minutes| *m >= 0)
}

/// Parse the lower bound of a date window.
pub fn date_from_filter(raw: Option<&str>) -> Option<Timestamp> {
    parse_timestamp(exact_filter(raw)?)
}

/// Parse the upper bound of a date window. A bare date covers the whole day.
pub fn date_to_filter(raw: Option<&str>) -> Option<Timestamp> {
    parse_timestamp_end_of_day(exact_filter(raw)?)
}
