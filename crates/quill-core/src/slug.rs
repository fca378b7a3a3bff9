//! Slug derivation for post titles.

use ::slug::slugify;

use crate::domain::MAX_SLUG_LEN;
use crate::error::DomainError;

/// Derive a URL-safe slug from a human-readable title.
///
/// The result is lowercase, hyphen separated and at most
/// [`MAX_SLUG_LEN`] characters long.
pub fn derive_slug(title: &str) -> Result<String, DomainError> {
    if title.trim().is_empty() {
        return Err(DomainError::Validation(
            "cannot derive a slug from an empty title".into(),
        ));
    }

    let mut candidate = slugify(title);
    if candidate.len() > MAX_SLUG_LEN {
        // slugify output is ASCII, so byte truncation is safe.
        candidate.truncate(MAX_SLUG_LEN);
        let trimmed = candidate.trim_end_matches('-').len();
        candidate.truncate(trimmed);
    }

    if candidate.is_empty() {
        return Err(DomainError::Validation(format!(
            "failed to derive slug from `{title}`"
        )));
    }

    Ok(candidate)
}
