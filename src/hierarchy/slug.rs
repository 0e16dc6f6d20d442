//! Slug derivation and deduplication.

use std::collections::HashSet;

use thiserror::Error;

use crate::board::{Board, BoardId};

/// Slug used when a name has no character that survives derivation.
pub const FALLBACK_SLUG: &str = "board";

/// Reasons a slug cannot be allocated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SlugError {
    /// An explicit slug uses characters outside `[a-z0-9_-]`.
    #[error("slug \"{0}\" may only contain lowercase letters, digits, hyphens and underscores")]
    InvalidFormat(String),

    /// An explicit slug is already used by another board.
    #[error("slug \"{0}\" is already in use")]
    Duplicate(String),
}

/// Check that a slug is non-empty and only uses `[a-z0-9_-]`.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-')
}

/// Derive a URL-safe slug from a board name.
///
/// The name is lower-cased, characters outside `[a-z0-9\s_-]` are dropped,
/// whitespace and hyphen runs collapse to one hyphen and hyphens are trimmed
/// from both ends. A name with nothing left becomes [`FALLBACK_SLUG`].
///
/// # Examples
///
/// ```
/// use boardtree::hierarchy::slugify;
///
/// assert_eq!(slugify("Liverpool FC!!"), "liverpool-fc");
/// assert_eq!(slugify("  Serie A -- Italy "), "serie-a-italy");
/// ```
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());

    for c in name.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' {
            slug.push(c);
        } else if (c == '-' || c.is_whitespace()) && !slug.ends_with('-') {
            slug.push('-');
        }
    }

    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug.to_string()
    }
}

/// Allocate a slug for a board that is being created or edited.
///
/// An explicit `desired` slug must be well formed and free; it is never
/// corrected. Without one, the slug is derived from `name` and suffixed with
/// `-1`, `-2`, ... until it is free. `exclude_id` lets a board keep its own
/// slug on edit. An empty or all-whitespace `desired` counts as not
/// supplied; any other value is checked exactly as given.
///
/// This check runs against a snapshot; the repository's own uniqueness
/// constraint has the final say.
pub fn allocate_slug(
    boards: &[Board],
    name: &str,
    desired: Option<&str>,
    exclude_id: Option<BoardId>,
) -> Result<String, SlugError> {
    let taken: HashSet<&str> = boards
        .iter()
        .filter(|b| Some(b.id) != exclude_id)
        .filter_map(|b| b.slug.as_deref())
        .collect();

    if let Some(desired) = desired.filter(|s| !s.trim().is_empty()) {
        if !is_valid_slug(desired) {
            return Err(SlugError::InvalidFormat(desired.to_string()));
        }
        if taken.contains(desired) {
            return Err(SlugError::Duplicate(desired.to_string()));
        }
        return Ok(desired.to_string());
    }

    let base = slugify(name);
    if !taken.contains(base.as_str()) {
        return Ok(base);
    }

    let mut suffix = 1u32;
    loop {
        let candidate = format!("{base}-{suffix}");
        if !taken.contains(candidate.as_str()) {
            return Ok(candidate);
        }
        suffix += 1;
    }
}
