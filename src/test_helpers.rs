//! Shared test utilities for the screen-gal test suite.
//!
//! Provides fixture setup and lookup helpers that work with scan-phase data
//! structures (`Manifest`, `Project`).
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let result = scan::scan(tmp.path(), None).unwrap();
//!
//! let hal = find_project(&result.manifest, "HAL 9000");
//! assert_eq!(hal.stack, "Canvas");
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::scan::Manifest;
use crate::types::Project;

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/content/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Replace the fixture's `projects.json` with the given JSON text.
pub fn write_projects(root: &Path, json: &str) {
    std::fs::write(root.join("projects.json"), json).unwrap();
}

// =========================================================================
// Manifest lookups — panics with a clear message on miss
// =========================================================================

/// Find a project by title. Panics if not found.
pub fn find_project<'a>(manifest: &'a Manifest, title: &str) -> &'a Project {
    manifest
        .projects
        .iter()
        .find(|p| p.title == title)
        .unwrap_or_else(|| {
            let titles: Vec<&str> = manifest
                .projects
                .iter()
                .map(|p| p.title.as_str())
                .collect();
            panic!("project '{title}' not found. Available: {titles:?}")
        })
}

/// All project titles in manifest order.
pub fn project_titles(manifest: &Manifest) -> Vec<&str> {
    manifest
        .projects
        .iter()
        .map(|p| p.title.as_str())
        .collect()
}
