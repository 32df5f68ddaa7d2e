//! # Screen Gal
//!
//! Build-time data pipeline for the Movie Computer Screens Collection: a
//! bilingual (German/English) gallery of computer interfaces from movies,
//! recreated for the web. The gallery's content is authored by hand — a JSON
//! array of project records plus a TOML site configuration — and this crate
//! turns that content into a single validated manifest the rendering layer
//! consumes.
//!
//! # Architecture: Two-Stage Pipeline
//!
//! Content is processed in two independent stages, each producing a JSON
//! artifact the next consumer reads:
//!
//! ```text
//! 1. Scan   content/  →  manifest.json   (records + config, validated + normalized)
//! 2. Emit   manifest  →  site.json       (composed manifest for the rendering layer)
//! ```
//!
//! This separation exists for three reasons:
//!
//! - **Debuggability**: each artifact is human-readable JSON you can inspect.
//! - **A stable consumer contract**: the rendering layer only ever sees
//!   `site.json` — fully resolved, one shape, no legacy variants.
//! - **Testability**: composition is a pure function from manifest to
//!   manifest, so tests can exercise it without touching the filesystem.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Stage 1 — loads and validates config, records, translations, and media into the scan manifest |
//! | [`emit`] | Stage 2 — composes `site.json`: resolved media URLs, locale routes, verbatim head metadata |
//! | [`records`] | Project record parsing, schema validation, legacy-shape normalization |
//! | [`config`] | `site.toml` loading, defaults/overlay merging, validation, base-URL resolution |
//! | [`i18n`] | Translation resource loading and cross-locale key checks |
//! | [`media`] | Media asset verification: dangling references, orphan sweep |
//! | [`types`] | Shared types serialized between stages (`Project`, `Localized`) |
//! | [`output`] | CLI output formatting — information-first display of pipeline results |
//!
//! # Design Decisions
//!
//! ## Hand-Walked Record Validation
//!
//! Records are not deserialized straight into [`types::Project`]. The loader
//! walks the JSON explicitly so that a broken record fails with its position
//! and exact field path (`record 3 ("WOPR"): missing required field
//! desc.en`), and so that the legacy `film` shape is normalized in one
//! audited place. Three schema revisions of the collection coexist in
//! authored data; the shim is documented in [`records`].
//!
//! ## Explicit Absent Markers
//!
//! Optional record fields serialize as explicit `null`, never by dropping
//! the key. Consumers treat "present but null" as the normal not-available
//! state; a key that would vanish on re-serialization could not round-trip
//! the authored data faithfully.
//!
//! ## Configuration as a Value
//!
//! All site configuration lives in one validated [`config::SiteConfig`],
//! built once at startup from stock defaults, the optional `site.toml`
//! overlay, and the `SCREEN_GAL_BASE_URL` override — then passed by
//! reference. Nothing reads the environment or global state after startup,
//! and derived values (the media base path, locale route bases) are computed
//! once during emission and stored in the manifest.
//!
//! ## Rendering Stays External
//!
//! The pipeline deliberately ends at `site.json`. HTML generation, routing,
//! CSS delivery, and deployment belong to the rendering layer; this crate's
//! contract is that everything in `site.json` is already validated, already
//! resolved, and byte-for-byte faithful where it matters (head metadata,
//! stylesheet cascade order).

pub mod config;
pub mod emit;
pub mod i18n;
pub mod media;
pub mod output;
pub mod records;
pub mod scan;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
