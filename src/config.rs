//! Site configuration module.
//!
//! Handles loading, validating, and merging `site.toml`. Configuration is a
//! single file at the content root: stock defaults are the base layer and the
//! user file is merged on top key-by-key, so config files stay sparse.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [head]
//! title = "Movie Computer Screens Collection"
//! description = "A collection of computer interfaces from movies recreated for the web"
//! # ... keywords, author, canonical, favicon, [head.open_graph]
//!
//! [app]
//! base_url = "/movie-os-collection/"   # route/asset prefix
//! build_assets_dir = "/_assets/"       # bundled build artifacts subpath
//! cdn_url = ""                         # empty = relative paths
//!
//! css = ["vendor/mouse-follower.min.css", "assets/css/main.css"]  # cascade order
//!
//! [i18n]
//! default_locale = "en"
//! strategy = "no_prefix"               # or "prefix", "prefix_except_default"
//!
//! [[i18n.locales]]
//! code = "en"
//! name = "English"
//! file = "en.json"
//! ```
//!
//! The head and OpenGraph strings are emitted verbatim into page markup by
//! the rendering layer; their defaults reproduce the deployed site's metadata
//! byte for byte.
//!
//! Unknown keys are rejected to catch typos early.
//!
//! ## Base URL resolution
//!
//! `SCREEN_GAL_BASE_URL`, when set, overrides `app.base_url`. The variable is
//! read once at process start and folded into the config struct before any
//! derived path is computed; nothing re-reads the environment later.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Environment variable overriding `app.base_url`, resolved once at startup.
pub const BASE_URL_ENV: &str = "SCREEN_GAL_BASE_URL";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `site.toml`.
///
/// All fields have defaults matching the deployed collection. User config
/// files need only specify the values they want to override. Unknown keys
/// are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Page head metadata, emitted verbatim by the rendering layer.
    pub head: HeadConfig,
    /// Deployment paths: base URL, build assets subpath, optional CDN.
    pub app: AppConfig,
    /// Stylesheet references in cascade order. Later entries override
    /// earlier ones; the list is passed through exactly as declared.
    pub css: Vec<String>,
    /// Supported locales and the locale-selection strategy.
    pub i18n: I18nConfig,
    /// Content layout: where records, media, and translations live.
    pub data: DataConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            head: HeadConfig::default(),
            app: AppConfig::default(),
            css: default_css(),
            i18n: I18nConfig::default(),
            data: DataConfig::default(),
        }
    }
}

fn default_css() -> Vec<String> {
    [
        "vendor/mouse-follower.min.css",
        "assets/css/main.css",
        "assets/css/forms.css",
        "assets/css/components.css",
        "assets/css/navigation.css",
        "assets/css/tables.css",
        "assets/css/layout.css",
        "assets/css/mouse-follower.css",
        "assets/css/ui-extensions.css",
        "assets/css/animations.css",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl SiteConfig {
    /// Validate config values. Misconfiguration fails at startup, before any
    /// stage runs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.head.title.trim().is_empty() {
            return Err(ConfigError::Validation(
                "head.title must not be empty".into(),
            ));
        }
        if self.head.description.trim().is_empty() {
            return Err(ConfigError::Validation(
                "head.description must not be empty".into(),
            ));
        }
        if self.head.canonical.trim().is_empty() {
            return Err(ConfigError::Validation(
                "head.canonical must not be empty".into(),
            ));
        }
        if !self.app.base_url.starts_with('/') {
            return Err(ConfigError::Validation(format!(
                "app.base_url must start with '/', got \"{}\"",
                self.app.base_url
            )));
        }
        if !self.app.cdn_url.is_empty()
            && !self.app.cdn_url.starts_with("http://")
            && !self.app.cdn_url.starts_with("https://")
        {
            return Err(ConfigError::Validation(
                "app.cdn_url must be empty or an http(s) URL".into(),
            ));
        }
        self.i18n.validate()?;
        self.data.validate()?;
        Ok(())
    }
}

/// Page head metadata. These strings are part of the site's observable
/// contract (link previews key on them) and must be reproduced exactly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeadConfig {
    pub title: String,
    pub description: String,
    pub keywords: String,
    pub author: String,
    /// Canonical page URL, also used for the `rel=canonical` link tag.
    pub canonical: String,
    pub favicon: String,
    pub open_graph: OpenGraphConfig,
}

impl Default for HeadConfig {
    fn default() -> Self {
        Self {
            title: "Movie Computer Screens Collection".to_string(),
            description: "A collection of computer interfaces from movies recreated for the web"
                .to_string(),
            keywords:
                "movie computer screens, movie interfaces, web recreation, UI collection, movie tech"
                    .to_string(),
            author: "Manuel Hintermayr".to_string(),
            canonical: "https://projects.manuelhintermayr.com/movie-os-collection".to_string(),
            favicon: "/favicon.ico".to_string(),
            open_graph: OpenGraphConfig::default(),
        }
    }
}

/// OpenGraph tags consumed by link-preview generators.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OpenGraphConfig {
    pub title: String,
    pub description: String,
    pub url: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl Default for OpenGraphConfig {
    fn default() -> Self {
        Self {
            title: "Movie Computer Screens Collection".to_string(),
            description: "A collection of computer interfaces from movies recreated for the web"
                .to_string(),
            url: "https://projects.manuelhintermayr.com/movie-os-collection".to_string(),
            kind: "website".to_string(),
        }
    }
}

/// Deployment path settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Base path prefix applied to all generated routes and asset URLs.
    pub base_url: String,
    /// Subpath under which bundled build artifacts are served.
    pub build_assets_dir: String,
    /// Optional prefix rewriting asset URLs to an external host.
    /// Empty means relative paths.
    pub cdn_url: String,
    /// Directory the rendering layer scans for auto-discovered components.
    pub components_dir: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "/movie-os-collection/".to_string(),
            build_assets_dir: "/_assets/".to_string(),
            cdn_url: String::new(),
            components_dir: "components".to_string(),
        }
    }
}

impl AppConfig {
    /// Fold the startup environment override into the config.
    pub fn override_base_url(&mut self, value: Option<String>) {
        if let Some(url) = value {
            self.base_url = url;
        }
    }

    /// Prefix under which assets are served: the CDN when one is configured,
    /// the base path otherwise.
    pub fn asset_prefix(&self) -> &str {
        if self.cdn_url.is_empty() {
            &self.base_url
        } else {
            &self.cdn_url
        }
    }

    /// Prefix for media asset references in project records:
    /// the asset prefix joined with the literal `media/`.
    pub fn media_base_path(&self) -> String {
        join_base(self.asset_prefix(), "media/")
    }
}

/// Join a URL prefix and a tail with exactly one `/` separator, regardless
/// of whether the prefix carries a trailing slash.
pub fn join_base(prefix: &str, tail: &str) -> String {
    format!(
        "{}/{}",
        prefix.trim_end_matches('/'),
        tail.trim_start_matches('/')
    )
}

/// Locale setup: supported languages and URL strategy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct I18nConfig {
    /// Locale applied when none is selected.
    pub default_locale: String,
    /// Whether the active locale is encoded in the URL path.
    pub strategy: LocaleStrategy,
    pub locales: Vec<Locale>,
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            default_locale: "en".to_string(),
            strategy: LocaleStrategy::NoPrefix,
            locales: vec![
                Locale {
                    code: "en".to_string(),
                    name: "English".to_string(),
                    file: "en.json".to_string(),
                },
                Locale {
                    code: "de".to_string(),
                    name: "Deutsch".to_string(),
                    file: "de.json".to_string(),
                },
            ],
        }
    }
}

impl I18nConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.locales.is_empty() {
            return Err(ConfigError::Validation(
                "i18n.locales must not be empty".into(),
            ));
        }
        let mut seen = std::collections::HashSet::new();
        for locale in &self.locales {
            if locale.code.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "i18n locale codes must not be empty".into(),
                ));
            }
            if locale.file.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "locale \"{}\" has no translation file",
                    locale.code
                )));
            }
            if !seen.insert(locale.code.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate locale code \"{}\"",
                    locale.code
                )));
            }
        }
        if !seen.contains(self.default_locale.as_str()) {
            return Err(ConfigError::Validation(format!(
                "default_locale \"{}\" is not in i18n.locales",
                self.default_locale
            )));
        }
        Ok(())
    }
}

/// One supported language.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Locale {
    /// Locale code, also the URL path segment under prefix strategies.
    pub code: String,
    /// Display name shown in the language switcher.
    pub name: String,
    /// Translation resource filename under the locales dir.
    pub file: String,
}

/// Policy governing whether the active locale is encoded in the URL path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocaleStrategy {
    /// Locale never appears in the URL; selection is client-side only.
    NoPrefix,
    /// Every locale gets a path prefix, the default included.
    Prefix,
    /// Non-default locales get a path prefix; the default stays bare.
    PrefixExceptDefault,
}

impl LocaleStrategy {
    /// Whether routes for `code` carry the locale as a path segment.
    pub fn encodes_in_path(&self, code: &str, default_locale: &str) -> bool {
        match self {
            LocaleStrategy::NoPrefix => false,
            LocaleStrategy::Prefix => true,
            LocaleStrategy::PrefixExceptDefault => code != default_locale,
        }
    }
}

/// Content layout settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DataConfig {
    /// Project records file, relative to the content root.
    pub projects_file: String,
    /// Media assets directory, relative to the content root.
    pub media_dir: String,
    /// Translation resources directory, relative to the content root.
    pub locales_dir: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            projects_file: "projects.json".to_string(),
            media_dir: "media".to_string(),
            locales_dir: "i18n".to_string(),
        }
    }
}

impl DataConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        for (key, value) in [
            ("data.projects_file", &self.projects_file),
            ("data.media_dir", &self.media_dir),
            ("data.locales_dir", &self.locales_dir),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Validation(format!("{key} must not be empty")));
            }
        }
        Ok(())
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely; this includes
///   arrays, so an overridden `css` list replaces the stock list wholesale
///   rather than being appended to.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a `site.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `site.toml` exists in the directory.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("site.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `site.toml` in the given directory and fold in the
/// startup base-URL override.
///
/// Merges user values on top of stock defaults, rejects unknown keys, and
/// validates the result (again after the override, so a bad override value
/// fails just as fast as a bad file).
pub fn load_config(
    root: &Path,
    base_url_override: Option<String>,
) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(root)?;
    let mut config = resolve_config(base, overlay)?;
    if base_url_override.is_some() {
        config.app.override_base_url(base_url_override);
        config.validate()?;
    }
    Ok(config)
}

/// Returns a fully-commented stock `site.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# screen-gal Configuration
# ========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Place this file as site.toml in the content root. Each key overrides the
# stock default; unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Stylesheets, in cascade order. Later entries override earlier ones; the
# list reaches the rendering layer exactly as written here. Declared at the
# top level, so it must precede the first table header below.
# ---------------------------------------------------------------------------
css = [
    "vendor/mouse-follower.min.css",
    "assets/css/main.css",
    "assets/css/forms.css",
    "assets/css/components.css",
    "assets/css/navigation.css",
    "assets/css/tables.css",
    "assets/css/layout.css",
    "assets/css/mouse-follower.css",
    "assets/css/ui-extensions.css",
    "assets/css/animations.css",
]

# ---------------------------------------------------------------------------
# Page head metadata. Emitted verbatim into page markup by the rendering
# layer - change with care, link previews key on these strings.
# ---------------------------------------------------------------------------
[head]
title = "Movie Computer Screens Collection"
description = "A collection of computer interfaces from movies recreated for the web"
keywords = "movie computer screens, movie interfaces, web recreation, UI collection, movie tech"
author = "Manuel Hintermayr"
canonical = "https://projects.manuelhintermayr.com/movie-os-collection"
favicon = "/favicon.ico"

[head.open_graph]
title = "Movie Computer Screens Collection"
description = "A collection of computer interfaces from movies recreated for the web"
url = "https://projects.manuelhintermayr.com/movie-os-collection"
type = "website"

# ---------------------------------------------------------------------------
# Deployment paths
# ---------------------------------------------------------------------------
[app]
# Base path prefix applied to all generated routes and asset URLs.
# Overridable at build time via SCREEN_GAL_BASE_URL.
base_url = "/movie-os-collection/"

# Subpath under which bundled build artifacts are served.
build_assets_dir = "/_assets/"

# Optional prefix rewriting asset URLs to an external host.
# Leave empty for relative paths.
cdn_url = ""

# Directory the rendering layer scans for auto-discovered components.
components_dir = "components"

# ---------------------------------------------------------------------------
# Locales
# ---------------------------------------------------------------------------
[i18n]
# Locale applied when none is selected.
default_locale = "en"

# Whether the active locale is encoded in the URL path:
# "no_prefix", "prefix", or "prefix_except_default".
strategy = "no_prefix"

[[i18n.locales]]
code = "en"
name = "English"
file = "en.json"

[[i18n.locales]]
code = "de"
name = "Deutsch"
file = "de.json"

# ---------------------------------------------------------------------------
# Content layout, relative to the content root
# ---------------------------------------------------------------------------
[data]
projects_file = "projects.json"
media_dir = "media"
locales_dir = "i18n"
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_reproduces_site_metadata() {
        let config = SiteConfig::default();
        assert_eq!(config.head.title, "Movie Computer Screens Collection");
        assert_eq!(
            config.head.description,
            "A collection of computer interfaces from movies recreated for the web"
        );
        assert_eq!(config.head.author, "Manuel Hintermayr");
        assert_eq!(
            config.head.canonical,
            "https://projects.manuelhintermayr.com/movie-os-collection"
        );
        assert_eq!(config.head.open_graph.kind, "website");
        assert_eq!(config.head.open_graph.url, config.head.canonical);
    }

    #[test]
    fn default_config_paths_and_locales() {
        let config = SiteConfig::default();
        assert_eq!(config.app.base_url, "/movie-os-collection/");
        assert_eq!(config.app.cdn_url, "");
        assert_eq!(config.app.components_dir, "components");
        assert_eq!(config.i18n.default_locale, "en");
        assert_eq!(config.i18n.strategy, LocaleStrategy::NoPrefix);
        let codes: Vec<&str> = config
            .i18n
            .locales
            .iter()
            .map(|l| l.code.as_str())
            .collect();
        assert_eq!(codes, vec!["en", "de"]);
    }

    #[test]
    fn default_css_order_is_cascade_order() {
        let config = SiteConfig::default();
        assert_eq!(config.css.first().unwrap(), "vendor/mouse-follower.min.css");
        assert_eq!(config.css.last().unwrap(), "assets/css/animations.css");
        assert_eq!(config.css.len(), 10);
    }

    #[test]
    fn parse_partial_config_preserves_defaults() {
        let toml = r#"
[app]
base_url = "/screens/"
"#;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.app.base_url, "/screens/");
        // Defaults preserved
        assert_eq!(config.head.title, "Movie Computer Screens Collection");
        assert_eq!(config.i18n.default_locale, "en");
    }

    #[test]
    fn overridden_css_list_replaces_stock_list() {
        let base = stock_defaults_value();
        let overlay: toml::Value = toml::from_str(
            r#"
css = ["assets/css/main.css", "assets/css/custom.css"]
"#,
        )
        .unwrap();
        let config = resolve_config(base, Some(overlay)).unwrap();
        assert_eq!(
            config.css,
            vec!["assets/css/main.css", "assets/css/custom.css"]
        );
    }

    // =========================================================================
    // media_base_path / join_base
    // =========================================================================

    #[test]
    fn media_base_path_from_default_base_url() {
        let app = AppConfig::default();
        assert_eq!(app.media_base_path(), "/movie-os-collection/media/");
    }

    #[test]
    fn media_base_path_normalizes_missing_trailing_slash() {
        let app = AppConfig {
            base_url: "/movie-os-collection".to_string(),
            ..AppConfig::default()
        };
        assert_eq!(app.media_base_path(), "/movie-os-collection/media/");
    }

    #[test]
    fn media_base_path_prefers_cdn_when_set() {
        let app = AppConfig {
            cdn_url: "https://cdn.example.com/".to_string(),
            ..AppConfig::default()
        };
        assert_eq!(app.media_base_path(), "https://cdn.example.com/media/");
    }

    #[test]
    fn join_base_collapses_double_slash() {
        assert_eq!(join_base("/gallery/", "/media/"), "/gallery/media/");
        assert_eq!(join_base("/gallery", "media/"), "/gallery/media/");
    }

    #[test]
    fn override_base_url_applies_only_when_set() {
        let mut app = AppConfig::default();
        app.override_base_url(None);
        assert_eq!(app.base_url, "/movie-os-collection/");
        app.override_base_url(Some("/preview/".to_string()));
        assert_eq!(app.base_url, "/preview/");
    }

    // =========================================================================
    // Locale strategy
    // =========================================================================

    #[test]
    fn no_prefix_never_encodes() {
        assert!(!LocaleStrategy::NoPrefix.encodes_in_path("de", "en"));
        assert!(!LocaleStrategy::NoPrefix.encodes_in_path("en", "en"));
    }

    #[test]
    fn prefix_always_encodes() {
        assert!(LocaleStrategy::Prefix.encodes_in_path("en", "en"));
        assert!(LocaleStrategy::Prefix.encodes_in_path("de", "en"));
    }

    #[test]
    fn prefix_except_default_spares_the_default() {
        let s = LocaleStrategy::PrefixExceptDefault;
        assert!(!s.encodes_in_path("en", "en"));
        assert!(s.encodes_in_path("de", "en"));
    }

    #[test]
    fn strategy_parses_from_snake_case() {
        let toml = r#"
[i18n]
strategy = "prefix_except_default"
"#;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.i18n.strategy, LocaleStrategy::PrefixExceptDefault);
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path(), None).unwrap();
        assert_eq!(config.app.base_url, "/movie-os-collection/");
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("site.toml"),
            r#"
[head]
title = "Screens"

[app]
base_url = "/screens/"
"#,
        )
        .unwrap();

        let config = load_config(tmp.path(), None).unwrap();
        assert_eq!(config.head.title, "Screens");
        assert_eq!(config.app.base_url, "/screens/");
        // Unspecified values should be defaults
        assert_eq!(config.head.author, "Manuel Hintermayr");
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("site.toml"), "this is not valid toml [[[").unwrap();
        let result = load_config(tmp.path(), None);
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn load_config_applies_env_override_after_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("site.toml"),
            r#"
[app]
base_url = "/from-file/"
"#,
        )
        .unwrap();

        let config = load_config(tmp.path(), Some("/from-env/".to_string())).unwrap();
        assert_eq!(config.app.base_url, "/from-env/");
    }

    #[test]
    fn load_config_validates_override_value() {
        let tmp = TempDir::new().unwrap();
        let result = load_config(tmp.path(), Some("no-leading-slash/".to_string()));
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    // =========================================================================
    // Unknown key rejection tests
    // =========================================================================

    #[test]
    fn unknown_key_rejected() {
        let toml_str = r#"
[app]
base_uri = "/screens/"
"#;
        let result: Result<SiteConfig, _> = toml::from_str(toml_str);
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("unknown field"));
    }

    #[test]
    fn unknown_section_rejected() {
        let toml_str = r#"
[apps]
base_url = "/screens/"
"#;
        let result: Result<SiteConfig, _> = toml::from_str(toml_str);
        assert!(result.is_err());
    }

    #[test]
    fn unknown_locale_key_rejected() {
        let toml_str = r#"
[[i18n.locales]]
code = "en"
name = "English"
file = "en.json"
flag = "gb"
"#;
        let result: Result<SiteConfig, _> = toml::from_str(toml_str);
        assert!(result.is_err());
    }

    // =========================================================================
    // Validation tests
    // =========================================================================

    #[test]
    fn validate_default_config_passes() {
        assert!(SiteConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_base_url_must_be_rooted() {
        let mut config = SiteConfig::default();
        config.app.base_url = "movie-os-collection/".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("base_url"));
    }

    #[test]
    fn validate_cdn_url_scheme() {
        let mut config = SiteConfig::default();
        config.app.cdn_url = "ftp://cdn.example.com".to_string();
        assert!(config.validate().is_err());
        config.app.cdn_url = "https://cdn.example.com".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_empty_head_title() {
        let mut config = SiteConfig::default();
        config.head.title = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_empty_locale_list() {
        let mut config = SiteConfig::default();
        config.i18n.locales.clear();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("locales"));
    }

    #[test]
    fn validate_duplicate_locale_code() {
        let mut config = SiteConfig::default();
        config.i18n.locales.push(Locale {
            code: "en".to_string(),
            name: "English (US)".to_string(),
            file: "en-us.json".to_string(),
        });
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("duplicate locale"));
    }

    #[test]
    fn validate_default_locale_must_be_listed() {
        let mut config = SiteConfig::default();
        config.i18n.default_locale = "fr".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("default_locale"));
    }

    #[test]
    fn validate_locale_without_file() {
        let mut config = SiteConfig::default();
        config.i18n.locales[0].file = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_empty_data_paths() {
        let mut config = SiteConfig::default();
        config.data.media_dir = String::new();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("media_dir"));
    }

    #[test]
    fn load_config_validates_values() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("site.toml"),
            r#"
[i18n]
default_locale = "fr"
"#,
        )
        .unwrap();
        let result = load_config(tmp.path(), None);
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    // =========================================================================
    // merge_toml tests
    // =========================================================================

    #[test]
    fn merge_toml_scalar_override() {
        let base: toml::Value = toml::from_str(r#"quality = 90"#).unwrap();
        let overlay: toml::Value = toml::from_str(r#"quality = 70"#).unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged.get("quality").unwrap().as_integer(), Some(70));
    }

    #[test]
    fn merge_toml_table_merge_preserves_base_keys() {
        let base: toml::Value = toml::from_str(
            r#"
[head]
title = "A"
author = "B"
"#,
        )
        .unwrap();
        let overlay: toml::Value = toml::from_str(
            r#"
[head]
title = "C"
"#,
        )
        .unwrap();
        let merged = merge_toml(base, overlay);
        let head = merged.get("head").unwrap();
        assert_eq!(head.get("title").unwrap().as_str(), Some("C"));
        assert_eq!(head.get("author").unwrap().as_str(), Some("B"));
    }

    #[test]
    fn merge_toml_deep_nested() {
        let base: toml::Value = toml::from_str(
            r#"
[head.open_graph]
title = "A"
url = "https://a.example"
"#,
        )
        .unwrap();
        let overlay: toml::Value = toml::from_str(
            r#"
[head.open_graph]
title = "B"
"#,
        )
        .unwrap();
        let merged = merge_toml(base, overlay);
        let og = merged.get("head").unwrap().get("open_graph").unwrap();
        assert_eq!(og.get("title").unwrap().as_str(), Some("B"));
        assert_eq!(og.get("url").unwrap().as_str(), Some("https://a.example"));
    }

    #[test]
    fn merge_toml_array_replaces_wholesale() {
        let base: toml::Value = toml::from_str(r#"css = ["a.css", "b.css"]"#).unwrap();
        let overlay: toml::Value = toml::from_str(r#"css = ["c.css"]"#).unwrap();
        let merged = merge_toml(base, overlay);
        let css = merged.get("css").unwrap().as_array().unwrap();
        assert_eq!(css.len(), 1);
        assert_eq!(css[0].as_str(), Some("c.css"));
    }

    // =========================================================================
    // stock_config_toml tests
    // =========================================================================

    #[test]
    fn stock_config_toml_is_valid_toml() {
        let content = stock_config_toml();
        let _: toml::Value = toml::from_str(content).expect("stock config must be valid TOML");
    }

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let content = stock_config_toml();
        let config: SiteConfig = toml::from_str(content).unwrap();
        let defaults = SiteConfig::default();
        assert_eq!(config.head.title, defaults.head.title);
        assert_eq!(config.head.keywords, defaults.head.keywords);
        assert_eq!(config.app.base_url, defaults.app.base_url);
        assert_eq!(config.css, defaults.css);
        assert_eq!(config.i18n.default_locale, defaults.i18n.default_locale);
        assert_eq!(config.data.projects_file, defaults.data.projects_file);
    }

    #[test]
    fn stock_config_toml_contains_all_sections() {
        let content = stock_config_toml();
        assert!(content.contains("[head]"));
        assert!(content.contains("[head.open_graph]"));
        assert!(content.contains("[app]"));
        assert!(content.contains("css = ["));
        assert!(content.contains("[i18n]"));
        assert!(content.contains("[[i18n.locales]]"));
        assert!(content.contains("[data]"));
    }

    #[test]
    fn stock_defaults_value_has_all_sections() {
        let val = stock_defaults_value();
        assert!(val.get("head").is_some());
        assert!(val.get("app").is_some());
        assert!(val.get("css").is_some());
        assert!(val.get("i18n").is_some());
        assert!(val.get("data").is_some());
    }
}
