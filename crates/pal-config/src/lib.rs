//! Configuration management for paldocs.
//!
//! Parses `paldocs.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `site.url`
//! - `docs.source_dir`

mod expand;

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override content source directory.
    pub source_dir: Option<PathBuf>,
    /// Override public site URL.
    pub site_url: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "paldocs.toml";

/// Directory for paldocs project data, relative to the config file.
const PROJECT_DIRNAME: &str = ".paldocs";

/// Package managers accepted by `preferences.default_package_manager`.
const PACKAGE_MANAGERS: [&str; 3] = ["npm", "yarn", "pnpm"];

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Public site configuration.
    pub site: SiteConfig,
    /// Documentation content configuration (paths are relative strings from TOML).
    docs: DocsConfigRaw,
    /// Sidebar navigation configuration.
    pub navigation: NavigationConfig,
    /// Table of contents configuration.
    pub toc: TocConfig,
    /// Active-section tracking configuration.
    pub scroll_spy: ScrollSpyConfig,
    /// Heading extraction scheduling.
    pub extraction: ExtractionConfig,
    /// Package-manager preference configuration.
    preferences: PreferencesConfigRaw,

    /// Resolved docs configuration (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// Resolved preferences configuration (set after loading).
    #[serde(skip)]
    pub preferences_resolved: PreferencesConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Public site configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Canonical site URL.
    pub url: String,
    /// Display name of the documented product.
    pub name: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            url: "https://paljs.com".to_owned(),
            name: "PalJS".to_owned(),
        }
    }
}

/// Raw docs configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsConfigRaw {
    source_dir: Option<String>,
    pattern: Option<String>,
}

/// Resolved documentation configuration with absolute paths.
#[derive(Debug, Default)]
pub struct DocsConfig {
    /// Content root; document paths are derived relative to it.
    pub source_dir: PathBuf,
    /// Glob selecting document files, relative to `source_dir`.
    pub pattern: String,
    /// Project directory for paldocs data (`.paldocs/`).
    pub project_dir: PathBuf,
}

/// Explicit sidebar group ordering.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Groups with an explicit position. Unlisted groups sort after these.
    pub groups: Vec<GroupOrder>,
}

/// Position of one sidebar group.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct GroupOrder {
    /// Group label, matching the `group` frontmatter field.
    pub title: String,
    /// Sort key; lower values come first.
    pub order: i64,
}

/// Table of contents configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct TocConfig {
    /// Shallowest heading level shown.
    pub min_level: u8,
    /// Deepest heading level shown.
    pub max_level: u8,
}

impl Default for TocConfig {
    fn default() -> Self {
        Self {
            min_level: 2,
            max_level: 3,
        }
    }
}

/// Active-section tracking configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ScrollSpyConfig {
    /// Percentage of the viewport, measured from the bottom, excluded from
    /// the observation zone. 80 means headings count as reached in the top 20%.
    pub bottom_margin_percent: u8,
}

impl Default for ScrollSpyConfig {
    fn default() -> Self {
        Self {
            bottom_margin_percent: 80,
        }
    }
}

/// Heading extraction scheduling.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Delay between the page becoming ready and the first extraction.
    pub initial_delay_ms: u64,
    /// Quiet period that ends a burst of content mutations.
    pub debounce_ms: u64,
}

impl ExtractionConfig {
    /// Initial delay as a [`Duration`].
    #[must_use]
    pub fn initial_delay(&self) -> Duration {
        Duration::from_millis(self.initial_delay_ms)
    }

    /// Debounce window as a [`Duration`].
    #[must_use]
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            initial_delay_ms: 100,
            debounce_ms: 100,
        }
    }
}

/// Raw preferences configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct PreferencesConfigRaw {
    storage_key: Option<String>,
    default_package_manager: Option<String>,
    file: Option<String>,
}

/// Resolved package-manager preference configuration.
#[derive(Debug)]
pub struct PreferencesConfig {
    /// Key the preference is stored under.
    pub storage_key: String,
    /// Package manager used when nothing is stored.
    pub default_package_manager: String,
    /// File backing the preference store.
    pub file: PathBuf,
}

impl Default for PreferencesConfig {
    fn default() -> Self {
        Self {
            storage_key: "paljs-docs-package-manager".to_owned(),
            default_package_manager: "pnpm".to_owned(),
            file: PathBuf::from(PROJECT_DIRNAME).join("preferences.json"),
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`site.url`").
        field: String,
        /// Error message (e.g., "${`SITE_URL`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `paldocs.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.docs_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(url) = &settings.site_url {
            self.site.url.clone_from(url);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        let project_dir = base.join(PROJECT_DIRNAME);
        Self {
            site: SiteConfig::default(),
            docs: DocsConfigRaw::default(),
            navigation: NavigationConfig::default(),
            toc: TocConfig::default(),
            scroll_spy: ScrollSpyConfig::default(),
            extraction: ExtractionConfig::default(),
            preferences: PreferencesConfigRaw::default(),
            docs_resolved: DocsConfig {
                source_dir: base.join("content"),
                pattern: "docs/**/*.mdx".to_owned(),
                project_dir: project_dir.clone(),
            },
            preferences_resolved: PreferencesConfig {
                file: project_dir.join("preferences.json"),
                ..PreferencesConfig::default()
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Explicit group orders as `(title, order)` pairs.
    pub fn group_orders(&self) -> impl Iterator<Item = (&str, i64)> + '_ {
        self.navigation
            .groups
            .iter()
            .map(|group| (group.title.as_str(), group.order))
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_site()?;
        self.validate_navigation()?;
        self.validate_toc()?;
        self.validate_scroll_spy()?;
        self.validate_preferences()?;
        Ok(())
    }

    fn validate_site(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.site.url, "site.url")?;
        require_http_url(&self.site.url, "site.url")
    }

    fn validate_navigation(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for group in &self.navigation.groups {
            require_non_empty(&group.title, "navigation.groups.title")?;
            if !seen.insert(group.title.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "navigation group '{}' is listed more than once",
                    group.title
                )));
            }
        }
        Ok(())
    }

    fn validate_toc(&self) -> Result<(), ConfigError> {
        let TocConfig {
            min_level,
            max_level,
        } = self.toc;
        if !(1..=6).contains(&min_level) || !(1..=6).contains(&max_level) {
            return Err(ConfigError::Validation(
                "toc levels must be between 1 and 6".to_owned(),
            ));
        }
        if min_level > max_level {
            return Err(ConfigError::Validation(
                "toc.min_level cannot exceed toc.max_level".to_owned(),
            ));
        }
        Ok(())
    }

    fn validate_scroll_spy(&self) -> Result<(), ConfigError> {
        if self.scroll_spy.bottom_margin_percent >= 100 {
            return Err(ConfigError::Validation(
                "scroll_spy.bottom_margin_percent must be less than 100".to_owned(),
            ));
        }
        Ok(())
    }

    fn validate_preferences(&self) -> Result<(), ConfigError> {
        let prefs = &self.preferences_resolved;
        require_non_empty(&prefs.storage_key, "preferences.storage_key")?;
        if !PACKAGE_MANAGERS.contains(&prefs.default_package_manager.as_str()) {
            return Err(ConfigError::Validation(format!(
                "preferences.default_package_manager must be one of {}",
                PACKAGE_MANAGERS.join(", ")
            )));
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.site.url = expand::expand_env(&self.site.url, "site.url")?;

        if let Some(ref source_dir) = self.docs.source_dir {
            self.docs.source_dir = Some(expand::expand_env(source_dir, "docs.source_dir")?);
        }

        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        let project_dir = config_dir.join(PROJECT_DIRNAME);
        self.docs_resolved = DocsConfig {
            source_dir: resolve(self.docs.source_dir.as_deref(), "content"),
            pattern: self
                .docs
                .pattern
                .clone()
                .unwrap_or_else(|| "docs/**/*.mdx".to_owned()),
            project_dir: project_dir.clone(),
        };

        let defaults = PreferencesConfig::default();
        self.preferences_resolved = PreferencesConfig {
            storage_key: self
                .preferences
                .storage_key
                .clone()
                .unwrap_or(defaults.storage_key),
            default_package_manager: self
                .preferences
                .default_package_manager
                .clone()
                .unwrap_or(defaults.default_package_manager),
            file: match self.preferences.file.as_deref() {
                Some(file) => config_dir.join(file),
                None => project_dir.join("preferences.json"),
            },
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(config.site.url, "https://paljs.com");
        assert_eq!(
            config.docs_resolved.source_dir,
            PathBuf::from("/test/content")
        );
        assert_eq!(config.docs_resolved.pattern, "docs/**/*.mdx");
        assert_eq!(
            config.docs_resolved.project_dir,
            PathBuf::from("/test/.paldocs")
        );
        assert_eq!(
            config.preferences_resolved.file,
            PathBuf::from("/test/.paldocs/preferences.json")
        );
        assert_eq!(config.toc.min_level, 2);
        assert_eq!(config.toc.max_level, 3);
        assert_eq!(config.scroll_spy.bottom_margin_percent, 80);
        assert_eq!(config.extraction.debounce(), Duration::from_millis(100));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.site.name, "PalJS");
        assert!(config.navigation.groups.is_empty());
    }

    #[test]
    fn test_parse_navigation_groups() {
        let toml = r#"
[[navigation.groups]]
title = "Getting Started"
order = 1

[[navigation.groups]]
title = "Packages"
order = 2
"#;
        let config: Config = toml::from_str(toml).unwrap();
        let orders: Vec<_> = config.group_orders().collect();
        assert_eq!(orders, vec![("Getting Started", 1), ("Packages", 2)]);
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
[docs]
source_dir = "site/content"
pattern = "guides/**/*.md"

[preferences]
storage_key = "custom-key"
default_package_manager = "yarn"
file = "state/prefs.json"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.docs_resolved.source_dir,
            PathBuf::from("/project/site/content")
        );
        assert_eq!(config.docs_resolved.pattern, "guides/**/*.md");
        assert_eq!(config.preferences_resolved.storage_key, "custom-key");
        assert_eq!(config.preferences_resolved.default_package_manager, "yarn");
        assert_eq!(
            config.preferences_resolved.file,
            PathBuf::from("/project/state/prefs.json")
        );
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(
            &path,
            "[site]\nurl = \"https://docs.example.com\"\n\n[toc]\nmin_level = 2\nmax_level = 4\n",
        )
        .unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.site.url, "https://docs.example.com");
        assert_eq!(config.toc.max_level, 4);
        assert_eq!(config.docs_resolved.source_dir, dir.path().join("content"));
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let result = Config::load(Some(Path::new("/nonexistent/paldocs.toml")), None);
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_invalid_site_url_rejected() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.site.url = "paljs.com".to_owned();

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("site.url"));
    }

    #[test]
    fn test_toc_levels_validated() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.toc.min_level = 4;
        config.toc.max_level = 3;
        assert!(config.validate().is_err());

        config.toc.min_level = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_scroll_spy_margin_validated() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.scroll_spy.bottom_margin_percent = 100;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_package_manager_rejected() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.preferences_resolved.default_package_manager = "bun".to_owned();

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("default_package_manager"));
    }

    #[test]
    fn test_duplicate_group_rejected() {
        let toml = r#"
[[navigation.groups]]
title = "Packages"
order = 1

[[navigation.groups]]
title = "Packages"
order = 2
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("Packages"));
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            source_dir: Some(PathBuf::from("/custom/content")),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(
            config.docs_resolved.source_dir,
            PathBuf::from("/custom/content")
        );
        assert_eq!(config.site.url, "https://paljs.com");
    }
}
