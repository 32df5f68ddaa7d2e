//! Content scanning and manifest generation.
//!
//! Stage 1 of the build pipeline. Reads the content directory, validates and
//! normalizes everything in it, and produces the manifest the emit stage
//! consumes.
//!
//! ## Content Directory
//!
//! ```text
//! content/
//! ├── site.toml          # Site configuration (optional, sparse overrides)
//! ├── projects.json      # Project records, an ordered JSON array
//! ├── i18n/
//! │   ├── en.json        # Translation resources, one per locale
//! │   └── de.json
//! └── media/
//!     ├── hal9000.png    # Previews referenced by records
//!     └── hal9000.gif
//! ```
//!
//! ## Validation
//!
//! Scan fails fast on anything that would ship broken:
//! - a record violating the schema (see [`crate::records`]);
//! - a missing or malformed translation file for a configured locale;
//! - a local preview reference with no file behind it.
//!
//! Conditions that are legal but probably unintended come back as
//! [`Warning`]s instead: duplicate project titles, records with an empty tag
//! list, records with no outgoing link at all, translation keys missing from
//! one locale, and orphaned media files.

use crate::config::{self, SiteConfig};
use crate::i18n::{self, I18nError, TranslationFile};
use crate::media::{self, MediaError};
use crate::records::{self, RecordError};
use crate::types::Project;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Record error: {0}")]
    Record(#[from] RecordError),
    #[error("i18n error: {0}")]
    I18n(#[from] I18nError),
    #[error("Media error: {0}")]
    Media(#[from] MediaError),
    #[error("projects file not found: {0}")]
    MissingProjectsFile(PathBuf),
    #[error("{record}: field `{field}` references missing media file \"{path}\"")]
    MissingMedia {
        record: String,
        field: &'static str,
        path: String,
    },
}

/// Manifest output from the scan stage, consumed by emit.
#[derive(Debug, Serialize, Deserialize)]
pub struct Manifest {
    pub config: SiteConfig,
    pub projects: Vec<Project>,
}

/// A condition worth telling the author about without failing the build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// Two records share a display title.
    DuplicateTitle { title: String },
    /// A record's tag list is empty; the gallery shows it as uncategorized.
    Untagged { title: String },
    /// A record has neither demo, repo, nor portfolio link.
    Linkless { title: String },
    /// A translation key exists in some locale but not this one.
    MissingTranslation { locale: String, key: String },
    /// A media file no record references.
    OrphanMedia { path: String },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::DuplicateTitle { title } => {
                write!(f, "duplicate project title \"{title}\"")
            }
            Warning::Untagged { title } => {
                write!(f, "\"{title}\" has no tags (shown as uncategorized)")
            }
            Warning::Linkless { title } => {
                write!(f, "\"{title}\" has no demo, repo, or portfolio link")
            }
            Warning::MissingTranslation { locale, key } => {
                write!(f, "locale \"{locale}\" is missing translation key \"{key}\"")
            }
            Warning::OrphanMedia { path } => {
                write!(f, "media file \"{path}\" is not referenced by any record")
            }
        }
    }
}

/// Scan output: the manifest plus everything advisory that came up on the way.
#[derive(Debug)]
pub struct ScanResult {
    pub manifest: Manifest,
    pub warnings: Vec<Warning>,
    /// Translation key sets per locale, for display.
    pub translations: Vec<TranslationFile>,
}

/// Scan the content directory into a validated manifest.
///
/// `base_url_override` is the startup value of [`config::BASE_URL_ENV`];
/// passing it in keeps the environment read at the process edge and the scan
/// itself deterministic.
pub fn scan(root: &Path, base_url_override: Option<String>) -> Result<ScanResult, ScanError> {
    let config = config::load_config(root, base_url_override)?;

    let projects_path = root.join(&config.data.projects_file);
    if !projects_path.is_file() {
        return Err(ScanError::MissingProjectsFile(projects_path));
    }
    let projects = records::load_projects(&projects_path)?;

    let mut warnings = lint_projects(&projects);

    // Every configured locale must resolve to a loadable translation file.
    let locales_dir = root.join(&config.data.locales_dir);
    let mut translations = Vec::new();
    for locale in &config.i18n.locales {
        translations.push(i18n::load_translation(&locales_dir, &locale.code, &locale.file)?);
    }
    warnings.extend(translation_warnings(&translations));

    let media_dir = root.join(&config.data.media_dir);
    let media_check = media::check_assets(&projects, &media_dir)?;
    if let Some(missing) = media_check.missing.into_iter().next() {
        return Err(ScanError::MissingMedia {
            record: missing.record,
            field: missing.field,
            path: missing.path,
        });
    }
    warnings.extend(
        media_check
            .orphans
            .into_iter()
            .map(|path| Warning::OrphanMedia { path }),
    );

    Ok(ScanResult {
        manifest: Manifest { config, projects },
        warnings,
        translations,
    })
}

/// Advisory checks over the validated record collection.
fn lint_projects(projects: &[Project]) -> Vec<Warning> {
    let mut warnings = Vec::new();

    let mut seen = std::collections::HashSet::new();
    for project in projects {
        if !seen.insert(project.title.as_str()) {
            warnings.push(Warning::DuplicateTitle {
                title: project.title.clone(),
            });
        }
    }

    for project in projects {
        if project.tags.is_empty() {
            warnings.push(Warning::Untagged {
                title: project.title.clone(),
            });
        }
        if !project.has_link() {
            warnings.push(Warning::Linkless {
                title: project.title.clone(),
            });
        }
    }

    warnings
}

/// Compare each locale's key set against the union of all locales.
fn translation_warnings(translations: &[TranslationFile]) -> Vec<Warning> {
    let mut union = TranslationFile {
        code: String::new(),
        file: String::new(),
        keys: Default::default(),
    };
    for t in translations {
        union.keys.extend(t.keys.iter().cloned());
    }

    let mut warnings = Vec::new();
    for t in translations {
        for key in i18n::missing_keys(&union, t) {
            warnings.push(Warning::MissingTranslation {
                locale: t.code.clone(),
                key,
            });
        }
    }
    warnings
}
