//! Media asset verification.
//!
//! Project records reference their previews either as remote URLs or as
//! paths relative to the media dir. A dangling local reference would ship a
//! broken gallery card, so the scan stage checks every local reference
//! against the filesystem. The sweep also runs the other way: media files no
//! record references are reported as orphans, so leftovers from removed
//! projects surface instead of accumulating silently.

use crate::types::Project;
use std::collections::BTreeSet;
use std::path::Path;
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum MediaError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to walk media dir: {0}")]
    Walk(#[from] walkdir::Error),
}

/// File extensions that count as media in the orphan sweep. Anything else
/// in the media dir (notes, .gitkeep) is ignored.
const MEDIA_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "gif", "avif", "mp4", "webm"];

/// A record's preview reference that points at nothing on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingAsset {
    /// Title of the referencing record.
    pub record: String,
    /// Which preview field held the reference.
    pub field: &'static str,
    /// The dangling path, relative to the media dir.
    pub path: String,
}

/// Outcome of the media sweep.
#[derive(Debug, Default)]
pub struct MediaCheck {
    pub missing: Vec<MissingAsset>,
    /// Media files on disk that no record references, relative paths in
    /// walk order.
    pub orphans: Vec<String>,
}

/// Whether a preview reference is a remote URL (left untouched by the
/// pipeline) rather than a path under the media dir.
pub fn is_remote(reference: &str) -> bool {
    reference.starts_with("http://")
        || reference.starts_with("https://")
        || reference.starts_with("//")
}

/// Check every local preview reference against the media dir and sweep the
/// dir for orphans.
///
/// A media dir is allowed to be absent as long as no record needs it (a
/// collection hosting all previews remotely has none).
pub fn check_assets(projects: &[Project], media_dir: &Path) -> Result<MediaCheck, MediaError> {
    let mut check = MediaCheck::default();
    let mut referenced = BTreeSet::new();

    for project in projects {
        let previews = [
            ("image", Some(project.image.as_str())),
            ("animated_image", project.animated_image.as_deref()),
        ];
        for (field, reference) in previews {
            let Some(reference) = reference else { continue };
            if is_remote(reference) {
                continue;
            }
            referenced.insert(reference.to_string());
            if !media_dir.join(reference).is_file() {
                check.missing.push(MissingAsset {
                    record: project.title.clone(),
                    field,
                    path: reference.to_string(),
                });
            }
        }
    }

    if media_dir.is_dir() {
        for entry in WalkDir::new(media_dir) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy();
            if name.starts_with('.') {
                continue;
            }
            let ext = entry
                .path()
                .extension()
                .map(|e| e.to_string_lossy().to_lowercase())
                .unwrap_or_default();
            if !MEDIA_EXTENSIONS.contains(&ext.as_str()) {
                continue;
            }
            let rel = entry
                .path()
                .strip_prefix(media_dir)
                .expect("walked entries live under media_dir")
                .to_string_lossy()
                .to_string();
            if !referenced.contains(&rel) {
                check.orphans.push(rel);
            }
        }
    }

    Ok(check)
}
