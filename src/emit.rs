//! Site manifest emission.
//!
//! Stage 2 of the build pipeline. Takes the scan manifest and composes
//! `site.json`, the single artifact the rendering layer consumes. Emission
//! is where config stops being configuration and becomes resolved values:
//!
//! - `media_base_path` is computed here, once, and stored in the manifest;
//! - local preview references are resolved to full URLs under it (remote
//!   URLs pass through untouched);
//! - each locale gets its route base, derived from the base URL and the
//!   locale strategy.
//!
//! Everything the rendering layer must reproduce byte for byte (head
//! metadata, the css cascade order) is copied through verbatim.

use crate::config::{LocaleStrategy, join_base};
use crate::media;
use crate::scan::Manifest;
use crate::types::Project;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EmitError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// The composed manifest handed to the rendering layer.
#[derive(Debug, Serialize, Deserialize)]
pub struct SiteManifest {
    pub head: crate::config::HeadConfig,
    pub base_url: String,
    pub build_assets_dir: String,
    pub cdn_url: String,
    pub components_dir: String,
    /// Resolved once at emission; consumers never derive it themselves.
    pub media_base_path: String,
    /// Stylesheets in cascade order, exactly as configured.
    pub css: Vec<String>,
    pub default_locale: String,
    pub strategy: LocaleStrategy,
    pub locales: Vec<LocaleRoute>,
    /// Records with preview references resolved to servable URLs.
    pub projects: Vec<Project>,
}

/// A configured locale plus its resolved route base.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocaleRoute {
    pub code: String,
    pub name: String,
    pub file: String,
    /// URL path prefix for this locale's routes.
    pub route_base: String,
}

/// Compose the site manifest from a scan manifest. Pure; no filesystem.
pub fn compose(manifest: &Manifest) -> SiteManifest {
    let config = &manifest.config;
    let media_base_path = config.app.media_base_path();

    let locales = config
        .i18n
        .locales
        .iter()
        .map(|locale| {
            let route_base = if config.i18n.strategy.encodes_in_path(
                &locale.code,
                &config.i18n.default_locale,
            ) {
                join_base(&config.app.base_url, &format!("{}/", locale.code))
            } else {
                config.app.base_url.clone()
            };
            LocaleRoute {
                code: locale.code.clone(),
                name: locale.name.clone(),
                file: locale.file.clone(),
                route_base,
            }
        })
        .collect();

    let projects = manifest
        .projects
        .iter()
        .map(|project| resolve_project(project, &media_base_path))
        .collect();

    SiteManifest {
        head: config.head.clone(),
        base_url: config.app.base_url.clone(),
        build_assets_dir: config.app.build_assets_dir.clone(),
        cdn_url: config.app.cdn_url.clone(),
        components_dir: config.app.components_dir.clone(),
        media_base_path,
        css: config.css.clone(),
        default_locale: config.i18n.default_locale.clone(),
        strategy: config.i18n.strategy,
        locales,
        projects,
    }
}

/// Resolve a record's preview references against the media base.
fn resolve_project(project: &Project, media_base: &str) -> Project {
    let mut resolved = project.clone();
    resolved.image = resolve_media_url(&project.image, media_base);
    resolved.animated_image = project
        .animated_image
        .as_deref()
        .map(|reference| resolve_media_url(reference, media_base));
    resolved
}

/// Turn a preview reference into a servable URL: remote references pass
/// through, local paths are joined under the media base.
pub fn resolve_media_url(reference: &str, media_base: &str) -> String {
    if media::is_remote(reference) {
        reference.to_string()
    } else {
        join_base(media_base, reference)
    }
}

/// Read a scan manifest from disk, compose the site manifest, and write it
/// to `<output_dir>/site.json`.
pub fn emit(manifest_path: &Path, output_dir: &Path) -> Result<SiteManifest, EmitError> {
    let manifest_content = fs::read_to_string(manifest_path)?;
    let manifest: Manifest = serde_json::from_str(&manifest_content)?;

    let site = compose(&manifest);

    fs::create_dir_all(output_dir)?;
    let json = serde_json::to_string_pretty(&site)?;
    fs::write(output_dir.join("site.json"), json)?;
    Ok(site)
}
