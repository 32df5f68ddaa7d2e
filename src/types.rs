//! Shared types used across both pipeline stages.
//!
//! These types are serialized to JSON between stages (scan → emit) and into
//! the final site manifest, so their wire shape is part of the crate's
//! observable contract.

use serde::{Deserialize, Serialize};

/// A value carried in both site languages.
///
/// German and English are the only languages the collection ships; the
/// rendering layer picks one side based on the active locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Localized {
    pub de: String,
    pub en: String,
}

impl Localized {
    /// Look up one side by locale code. Unknown codes return `None` rather
    /// than guessing a fallback; the caller owns the fallback policy.
    pub fn get(&self, code: &str) -> Option<&str> {
        match code {
            "de" => Some(&self.de),
            "en" => Some(&self.en),
            _ => None,
        }
    }
}

/// One gallery entry: a single recreated movie computer interface.
///
/// This is the canonical record shape (the latest schema revision). Records
/// authored under older revisions are normalized into this shape by the
/// loader in [`crate::records`] before anything downstream sees them.
///
/// Optional links and previews use an explicit absent marker: a missing
/// value serializes as `null` instead of dropping the key, and consumers
/// treat "present but null" as the normal not-available state. Deserialization
/// also accepts an omitted key, because records older than the
/// `website_url`/`animated_image` revisions never carried those keys at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Display name of the recreation project.
    pub title: String,
    /// The source movie's name, per language.
    pub film: Localized,
    /// Live demo link.
    pub url: Option<String>,
    /// Source repository link.
    pub repo: Option<String>,
    /// Creator portfolio link.
    pub website_url: Option<String>,
    /// Static preview: a path under the media dir, or a remote URL.
    pub image: String,
    /// Animated preview: a path under the media dir, or a remote URL.
    pub animated_image: Option<String>,
    /// Free-text description of the technology used.
    pub stack: String,
    /// Project description, per language.
    pub desc: Localized,
    /// Category labels in display order. Empty means "uncategorized".
    pub tags: Vec<String>,
}

impl Project {
    /// Whether the record carries at least one outgoing link.
    pub fn has_link(&self) -> bool {
        self.url.is_some() || self.repo.is_some() || self.website_url.is_some()
    }
}
