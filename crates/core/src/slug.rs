//! URL slugs for tours.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::DbId;

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));
static DISALLOWED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9_\-]+").expect("valid regex"));
static DASH_RUN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-{2,}").expect("valid regex"));

/// Build a slug from a display name, optionally suffixed with `-{id}`.
///
/// Lowercases, turns `&` and whitespace runs into dashes, drops everything
/// outside `[a-z0-9_-]`, collapses dash runs and trims dashes at both ends.
///
/// ```
/// use panotour_core::slug::slugify;
///
/// assert_eq!(slugify("Museum & Gardens", None), "museum-gardens");
/// assert_eq!(slugify("Museum", Some(7)), "museum-7");
/// ```
pub fn slugify(name: &str, id: Option<DbId>) -> String {
    let lowered = name.trim().to_lowercase().replace('&', "-");
    let dashed = WHITESPACE_RE.replace_all(&lowered, "-");
    let cleaned = DISALLOWED_RE.replace_all(&dashed, "");
    let collapsed = DASH_RUN_RE.replace_all(&cleaned, "-");
    let slug = collapsed.trim_matches('-');

    match id {
        Some(id) => format!("{slug}-{id}"),
        None => slug.to_string(),
    }
}
