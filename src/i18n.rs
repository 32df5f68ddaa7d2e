//! Translation resource loading and consistency checks.
//!
//! Each locale entry in the site configuration references a JSON file
//! (`en.json`, `de.json`) under the locales dir. The i18n runtime that
//! consumes these files lives in the rendering layer; this module does not
//! define their internal structure. The pipeline enforces exactly two things:
//!
//! - every referenced file exists and parses as JSON with a top-level object
//!   (a missing or malformed file fails the build at scan time, rather than
//!   surfacing as a blank UI string after deploy);
//! - key sets are compared across locales, with keys flattened to dotted
//!   paths (`nav.home`), and gaps reported as warnings, not failures - a
//!   translation may legitimately lag behind.

use serde_json::Value;
use std::collections::BTreeSet;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum I18nError {
    #[error("failed to read locale file {file}: {source}")]
    Io {
        file: String,
        source: std::io::Error,
    },
    #[error("locale file {file} is not valid JSON: {source}")]
    Json {
        file: String,
        source: serde_json::Error,
    },
    #[error("locale file {file} must contain a top-level JSON object")]
    NotAnObject { file: String },
}

/// A loaded translation resource: the locale it serves and the flattened
/// key set it provides. Values are not kept; the pipeline never reads them.
#[derive(Debug, Clone)]
pub struct TranslationFile {
    pub code: String,
    pub file: String,
    pub keys: BTreeSet<String>,
}

/// Load one locale's translation file from the locales dir.
pub fn load_translation(
    locales_dir: &Path,
    code: &str,
    file: &str,
) -> Result<TranslationFile, I18nError> {
    let path = locales_dir.join(file);
    let content = std::fs::read_to_string(&path).map_err(|source| I18nError::Io {
        file: file.to_string(),
        source,
    })?;
    let root: Value = serde_json::from_str(&content).map_err(|source| I18nError::Json {
        file: file.to_string(),
        source,
    })?;
    if !root.is_object() {
        return Err(I18nError::NotAnObject {
            file: file.to_string(),
        });
    }

    let mut keys = BTreeSet::new();
    flatten_keys("", &root, &mut keys);
    Ok(TranslationFile {
        code: code.to_string(),
        file: file.to_string(),
        keys,
    })
}

/// Flatten nested objects to dotted key paths. Leaves (strings, arrays,
/// numbers) terminate a path; the empty object contributes nothing.
fn flatten_keys(prefix: &str, value: &Value, out: &mut BTreeSet<String>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten_keys(&path, child, out);
            }
        }
        _ => {
            if !prefix.is_empty() {
                out.insert(prefix.to_string());
            }
        }
    }
}

/// Keys present in `reference` but absent from `translation`, in sorted order.
pub fn missing_keys(reference: &TranslationFile, translation: &TranslationFile) -> Vec<String> {
    reference
        .keys
        .difference(&translation.keys)
        .cloned()
        .collect()
}
