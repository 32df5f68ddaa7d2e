//! Project record loading, validation, and normalization.
//!
//! The gallery's entries live in a single `projects.json` file: an ordered
//! JSON array of project records authored by hand. Three schema revisions
//! coexist in the wild, so the loader does not deserialize straight into
//! [`Project`]; it walks each record explicitly, which buys two things:
//!
//! - **Descriptive rejection**: a broken record fails with the record's
//!   position and title plus the exact field path (`desc.en`, `tags[2]`),
//!   not a bare serde type error.
//! - **Explicit normalization**: legacy shapes are converted in one audited
//!   place instead of being silently coerced during deserialization.
//!
//! ## Schema revisions
//!
//! The record shape drifted across three revisions of the collection:
//!
//! | Revision | `film` | `website_url` | `animated_image` |
//! |----------|--------|---------------|------------------|
//! | first    | string | yes           | no               |
//! | middle   | string | no            | no               |
//! | latest   | `{de, en}` | yes       | yes              |
//!
//! Stored records carry no version marker, so the loader keys on shape:
//! a `film` that is a JSON object with `de`/`en` keys is the localized form,
//! a JSON string is the legacy form. Legacy film titles predate localization
//! and were shown untranslated in both languages, so normalization copies
//! the one title into both sides. Any other shape is rejected.
//!
//! ## Validation rules
//!
//! - `title`, `image`, `stack` are required non-empty strings.
//! - `film` and `desc` are required; their `de` and `en` sides are required
//!   non-empty strings (after film normalization).
//! - `tags` is a required list of non-empty strings; the empty list is legal
//!   and means "uncategorized". Order is the author's display order and is
//!   preserved verbatim.
//! - `url`, `repo`, `website_url`, `animated_image` are optional: `null` is
//!   the normal not-available value, and an omitted key loads as `null` for
//!   records authored before the key existed. An empty string is rejected.
//! - Unknown keys are rejected to catch typos early.

use crate::types::{Localized, Project};
use serde_json::Value;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecordError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("projects file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("projects file must contain a top-level JSON array")]
    NotAnArray,
    #[error("{record} is not a JSON object")]
    NotAnObject { record: String },
    #[error("{record}: unknown field `{field}`")]
    UnknownField { record: String, field: String },
    #[error("{record}: missing required field `{field}`")]
    MissingField { record: String, field: String },
    #[error("{record}: field `{field}` must not be empty")]
    EmptyField { record: String, field: String },
    #[error("{record}: field `{field}` must be {expected}")]
    WrongType {
        record: String,
        field: String,
        expected: &'static str,
    },
    #[error("{record}: field `film` must be a {{de, en}} mapping or a plain string")]
    FilmShape { record: String },
}

/// Every key the latest schema revision recognizes. Older revisions use
/// subsets of this list; nothing ever used a key outside it.
const RECORD_FIELDS: &[&str] = &[
    "title",
    "film",
    "url",
    "repo",
    "website_url",
    "image",
    "animated_image",
    "stack",
    "desc",
    "tags",
];

/// Load and validate all project records from a `projects.json` file.
pub fn load_projects(path: &Path) -> Result<Vec<Project>, RecordError> {
    let content = fs::read_to_string(path)?;
    parse_projects(&content)
}

/// Parse and validate a projects collection from JSON text.
///
/// Records are returned in authored order. The first invalid record aborts
/// the load; an all-or-nothing collection keeps the downstream stages free
/// of partially-valid state.
pub fn parse_projects(json: &str) -> Result<Vec<Project>, RecordError> {
    let root: Value = serde_json::from_str(json)?;
    let entries = root.as_array().ok_or(RecordError::NotAnArray)?;

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| validate_record(index, entry))
        .collect()
}

/// Human-facing record identity for error messages: 1-based position, plus
/// the title when the record got far enough to have one.
fn record_label(index: usize, title: Option<&str>) -> String {
    match title {
        Some(t) if !t.trim().is_empty() => format!("record {} (\"{}\")", index + 1, t),
        _ => format!("record {}", index + 1),
    }
}

fn validate_record(index: usize, value: &Value) -> Result<Project, RecordError> {
    let obj = value.as_object().ok_or_else(|| RecordError::NotAnObject {
        record: record_label(index, None),
    })?;
    let record = record_label(index, obj.get("title").and_then(Value::as_str));

    for key in obj.keys() {
        if !RECORD_FIELDS.contains(&key.as_str()) {
            return Err(RecordError::UnknownField {
                record: record.clone(),
                field: key.clone(),
            });
        }
    }

    Ok(Project {
        title: required_string(obj, "title", &record)?,
        film: normalize_film(obj.get("film"), &record)?,
        url: optional_string(obj, "url", &record)?,
        repo: optional_string(obj, "repo", &record)?,
        website_url: optional_string(obj, "website_url", &record)?,
        image: required_string(obj, "image", &record)?,
        animated_image: optional_string(obj, "animated_image", &record)?,
        stack: required_string(obj, "stack", &record)?,
        desc: required_localized(obj.get("desc"), "desc", &record)?,
        tags: required_tags(obj.get("tags"), &record)?,
    })
}

/// Normalize the `film` field to its localized form.
///
/// This is the compatibility shim for the schema drift described in the
/// module docs: object ⇒ localized revision, string ⇒ legacy revision
/// (one untranslated title, used for both languages).
fn normalize_film(value: Option<&Value>, record: &str) -> Result<Localized, RecordError> {
    match value {
        None | Some(Value::Null) => Err(RecordError::MissingField {
            record: record.to_string(),
            field: "film".to_string(),
        }),
        Some(Value::String(title)) => {
            if title.trim().is_empty() {
                return Err(RecordError::EmptyField {
                    record: record.to_string(),
                    field: "film".to_string(),
                });
            }
            Ok(Localized {
                de: title.clone(),
                en: title.clone(),
            })
        }
        Some(value @ Value::Object(_)) => required_localized(Some(value), "film", record),
        Some(_) => Err(RecordError::FilmShape {
            record: record.to_string(),
        }),
    }
}

fn required_localized(
    value: Option<&Value>,
    field: &str,
    record: &str,
) -> Result<Localized, RecordError> {
    let obj = match value {
        None | Some(Value::Null) => {
            return Err(RecordError::MissingField {
                record: record.to_string(),
                field: field.to_string(),
            });
        }
        Some(Value::Object(obj)) => obj,
        Some(_) => {
            return Err(RecordError::WrongType {
                record: record.to_string(),
                field: field.to_string(),
                expected: "a {de, en} mapping",
            });
        }
    };

    for key in obj.keys() {
        if key != "de" && key != "en" {
            return Err(RecordError::UnknownField {
                record: record.to_string(),
                field: format!("{field}.{key}"),
            });
        }
    }

    Ok(Localized {
        de: required_string(obj, "de", record).map_err(|e| prefix_field(e, field))?,
        en: required_string(obj, "en", record).map_err(|e| prefix_field(e, field))?,
    })
}

/// Rewrite a nested field name to its full dotted path (`en` → `desc.en`).
fn prefix_field(err: RecordError, parent: &str) -> RecordError {
    match err {
        RecordError::MissingField { record, field } => RecordError::MissingField {
            record,
            field: format!("{parent}.{field}"),
        },
        RecordError::EmptyField { record, field } => RecordError::EmptyField {
            record,
            field: format!("{parent}.{field}"),
        },
        RecordError::WrongType {
            record,
            field,
            expected,
        } => RecordError::WrongType {
            record,
            field: format!("{parent}.{field}"),
            expected,
        },
        other => other,
    }
}

fn required_string(
    obj: &serde_json::Map<String, Value>,
    field: &str,
    record: &str,
) -> Result<String, RecordError> {
    match obj.get(field) {
        None | Some(Value::Null) => Err(RecordError::MissingField {
            record: record.to_string(),
            field: field.to_string(),
        }),
        Some(Value::String(s)) => {
            if s.trim().is_empty() {
                Err(RecordError::EmptyField {
                    record: record.to_string(),
                    field: field.to_string(),
                })
            } else {
                Ok(s.clone())
            }
        }
        Some(_) => Err(RecordError::WrongType {
            record: record.to_string(),
            field: field.to_string(),
            expected: "a string",
        }),
    }
}

fn optional_string(
    obj: &serde_json::Map<String, Value>,
    field: &str,
    record: &str,
) -> Result<Option<String>, RecordError> {
    match obj.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => {
            if s.trim().is_empty() {
                // Absent is spelled `null`; an empty string is an authoring error.
                Err(RecordError::EmptyField {
                    record: record.to_string(),
                    field: field.to_string(),
                })
            } else {
                Ok(Some(s.clone()))
            }
        }
        Some(_) => Err(RecordError::WrongType {
            record: record.to_string(),
            field: field.to_string(),
            expected: "a string or null",
        }),
    }
}

fn required_tags(value: Option<&Value>, record: &str) -> Result<Vec<String>, RecordError> {
    let entries = match value {
        None | Some(Value::Null) => {
            return Err(RecordError::MissingField {
                record: record.to_string(),
                field: "tags".to_string(),
            });
        }
        Some(Value::Array(entries)) => entries,
        Some(_) => {
            return Err(RecordError::WrongType {
                record: record.to_string(),
                field: "tags".to_string(),
                expected: "a list of strings",
            });
        }
    };

    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| match entry {
            Value::String(tag) if !tag.trim().is_empty() => Ok(tag.clone()),
            Value::String(_) => Err(RecordError::EmptyField {
                record: record.to_string(),
                field: format!("tags[{i}]"),
            }),
            _ => Err(RecordError::WrongType {
                record: record.to_string(),
                field: format!("tags[{i}]"),
                expected: "a string",
            }),
        })
        .collect()
}
