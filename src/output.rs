//! CLI output formatting for both pipeline stages.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. The primary display
//! for every record is its semantic identity — positional index, title, and
//! film — with source details (preview files, links) shown as indented
//! context lines. This makes the output readable as a content inventory
//! while still letting authors trace entries back to specific files.
//!
//! # Output Format
//!
//! ## Scan
//!
//! ```text
//! Projects
//! 001 HAL 9000 (2001: A Space Odyssey)
//!     Stack: Canvas
//!     Tags: sci-fi, retro
//!     Preview: hal9000.png
//!     Shipboard computer of the Discovery
//!
//! Locales
//!     en English (en.json, 12 keys) [default]
//!     de Deutsch (de.json, 12 keys)
//!
//! Config
//!     site.toml
//!     Base URL: /movie-os-collection/
//!
//! Warnings
//!     media file "leftover.png" is not referenced by any record
//! ```
//!
//! ## Emit
//!
//! ```text
//! Site manifest → dist/site.json
//!     Media base: /movie-os-collection/media/
//!     Stylesheets: 10 (cascade order preserved)
//!     Locale routes: en → /movie-os-collection/, de → /movie-os-collection/
//!     Projects: 3
//! ```
//!
//! # Architecture
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects.

use crate::emit::SiteManifest;
use crate::scan::ScanResult;
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    if text.len() <= max {
        text.to_string()
    } else {
        format!("{}...", &text[..max])
    }
}

// ============================================================================
// Stage 1: Scan output
// ============================================================================

/// Format scan stage output showing the validated collection.
pub fn format_scan_output(result: &ScanResult, source_root: &Path) -> Vec<String> {
    let mut lines = Vec::new();
    let manifest = &result.manifest;

    lines.push("Projects".to_string());
    for (i, project) in manifest.projects.iter().enumerate() {
        lines.push(format!(
            "{} {} ({})",
            format_index(i + 1),
            project.title,
            project.film.en
        ));
        lines.push(format!("    Stack: {}", project.stack));
        if !project.tags.is_empty() {
            lines.push(format!("    Tags: {}", project.tags.join(", ")));
        }
        match &project.animated_image {
            Some(animated) => lines.push(format!(
                "    Preview: {} (animated: {})",
                project.image, animated
            )),
            None => lines.push(format!("    Preview: {}", project.image)),
        }
        let desc = truncate_desc(project.desc.en.trim(), 60);
        if !desc.is_empty() {
            lines.push(format!("    {desc}"));
        }
    }

    lines.push(String::new());
    lines.push("Locales".to_string());
    for translation in &result.translations {
        let default_marker = if translation.code == manifest.config.i18n.default_locale {
            " [default]"
        } else {
            ""
        };
        let name = manifest
            .config
            .i18n
            .locales
            .iter()
            .find(|l| l.code == translation.code)
            .map(|l| l.name.as_str())
            .unwrap_or("");
        lines.push(format!(
            "    {} {} ({}, {} keys){}",
            translation.code,
            name,
            translation.file,
            translation.keys.len(),
            default_marker
        ));
    }

    lines.push(String::new());
    lines.push("Config".to_string());
    if source_root.join("site.toml").exists() {
        lines.push("    site.toml".to_string());
    } else {
        lines.push("    (stock defaults)".to_string());
    }
    lines.push(format!("    Base URL: {}", manifest.config.app.base_url));
    lines.push(format!("    Stylesheets: {}", manifest.config.css.len()));

    if !result.warnings.is_empty() {
        lines.push(String::new());
        lines.push("Warnings".to_string());
        for warning in &result.warnings {
            lines.push(format!("    {warning}"));
        }
    }

    lines
}

/// Print scan output to stdout.
pub fn print_scan_output(result: &ScanResult, source_root: &Path) {
    for line in format_scan_output(result, source_root) {
        println!("{}", line);
    }
}

// ============================================================================
// Stage 2: Emit output
// ============================================================================

/// Format emit stage output summarizing the composed site manifest.
pub fn format_emit_output(site: &SiteManifest, output_dir: &Path) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push(format!(
        "Site manifest → {}",
        output_dir.join("site.json").display()
    ));
    lines.push(format!("    Media base: {}", site.media_base_path));
    lines.push(format!(
        "    Stylesheets: {} (cascade order preserved)",
        site.css.len()
    ));
    let routes: Vec<String> = site
        .locales
        .iter()
        .map(|l| format!("{} → {}", l.code, l.route_base))
        .collect();
    lines.push(format!("    Locale routes: {}", routes.join(", ")));
    lines.push(format!("    Projects: {}", site.projects.len()));
    lines
}

/// Print emit output to stdout.
pub fn print_emit_output(site: &SiteManifest, output_dir: &Path) {
    for line in format_emit_output(site, output_dir) {
        println!("{}", line);
    }
}
