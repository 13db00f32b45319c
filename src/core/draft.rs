//! Layer 2: Draft snapshot and editor helpers
//!
//! DraftFields is the unit of autosave: two snapshots compare by deep value
//! equality (derived PartialEq), never by identity. Slug and word-count
//! helpers back the publish path and the editor footer.

use rand::Rng;
use rand::distr::Alphanumeric;
use serde::{Deserialize, Serialize};

use super::identity::Slug;

/// Words per minute assumed for reading-time estimates.
const READING_WPM: usize = 200;

/// Length of the random suffix appended to make slugs unique.
const SLUG_SUFFIX_LEN: usize = 6;

/// Editable fields of a draft, as captured by the editor.
///
/// Superseded on every edit; persisted on successful autosave.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftFields {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl DraftFields {
    /// A draft with nothing typed yet. Autosave stays disabled for these.
    pub fn is_blank(&self) -> bool {
        self.title.is_empty() && self.content.is_empty()
    }
}

/// Normalize a title into a URL slug.
///
/// Lowercase, drop everything outside word characters / whitespace /
/// hyphens, collapse whitespace, underscore, and hyphen runs into a single
/// hyphen, trim hyphens at both ends.
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase();
    let mut out = String::with_capacity(lowered.len());
    let mut pending_sep = false;
    for c in lowered.trim().chars() {
        if c.is_ascii_alphanumeric() {
            if pending_sep && !out.is_empty() {
                out.push('-');
            }
            pending_sep = false;
            out.push(c);
        } else if c.is_whitespace() || c == '-' || c == '_' {
            pending_sep = true;
        }
        // Other punctuation is dropped without acting as a separator.
    }
    out
}

/// Slugify plus a random 6-char suffix so concurrent authors with the same
/// title never collide.
pub fn unique_slug(title: &str) -> Slug {
    let base = slugify(title);
    let suffix: String = rand::rng()
        .sample_iter(Alphanumeric)
        .take(SLUG_SUFFIX_LEN)
        .map(|b| (b as char).to_ascii_lowercase())
        .collect();
    let raw = if base.is_empty() {
        suffix
    } else {
        format!("{base}-{suffix}")
    };
    Slug::parse(&raw).unwrap_or_else(|_| {
        // slugify output is [a-z0-9-] with no edge hyphens by construction
        unreachable!("slugify produced invalid slug: {raw}")
    })
}

/// Whitespace-delimited word count.
pub fn word_count(content: &str) -> usize {
    content.split_whitespace().count()
}

/// Estimated reading time, minimum one minute for non-empty content.
pub fn reading_time_minutes(content: &str) -> usize {
    word_count(content).div_ceil(READING_WPM)
}
