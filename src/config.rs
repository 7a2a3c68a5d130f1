//! Site configuration module.
//!
//! Handles loading and validating the `config.toml` at the site root. Every
//! key is optional; missing keys fall back to the stock defaults below.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! languages = ["en", "de"]  # One page is built per language, in this order
//! landing_dir = "a-landing" # Section kept out of the page index
//!
//! [paths]                   # Relative to the site root
//! content = "content/pages/info"
//! lang_toggle = "content/fragments/lang-toggle/meta.json"
//! styles = [
//!     "styles/fragments/footer.css",
//!     "styles/fragments/lang-toggle.css",
//!     "styles/fragments/topic.css",
//!     "styles/fragments/content.css",
//!     "styles/pages/info.css",
//! ]
//!
//! [github]
//! repository = ""           # e.g. "https://github.com/owner/site"
//! branch = "master"         # Branch edit links point at
//! content_path = ""         # Content root inside the repository (empty = paths.content)
//!
//! [processing]
//! max_processes = 2         # Max parallel page renders (omit for auto = CPU cores)
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::types::Lang;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CONFIG_FILE: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Languages to build, in build order.
    pub languages: Vec<Lang>,
    /// Section name excluded from the page index.
    pub landing_dir: String,
    /// Input locations, relative to the site root.
    pub paths: PathsConfig,
    /// Repository the content is edited in.
    pub github: GithubConfig,
    /// Parallel rendering settings.
    pub processing: ProcessingConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            languages: Lang::ALL.to_vec(),
            landing_dir: "a-landing".to_string(),
            paths: PathsConfig::default(),
            github: GithubConfig::default(),
            processing: ProcessingConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.languages.is_empty() {
            return Err(ConfigError::Validation(
                "languages must not be empty".into(),
            ));
        }
        let mut seen = HashSet::new();
        if let Some(dup) = self.languages.iter().find(|l| !seen.insert(**l)) {
            return Err(ConfigError::Validation(format!(
                "language '{dup}' listed twice"
            )));
        }
        if self.landing_dir.trim().is_empty() {
            return Err(ConfigError::Validation(
                "landing_dir must not be empty".into(),
            ));
        }
        if self.paths.content.trim().is_empty() {
            return Err(ConfigError::Validation(
                "paths.content must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Absolute-or-relative content root for a given site root.
    pub fn content_dir(&self, site_root: &Path) -> PathBuf {
        site_root.join(&self.paths.content)
    }

    /// Repository URL without trailing slash, `None` when not configured.
    pub fn repository(&self) -> Option<&str> {
        let repo = self.github.repository.trim().trim_end_matches('/');
        (!repo.is_empty()).then_some(repo)
    }

    /// Root URL that topic file paths are appended to for edit links.
    ///
    /// The content location is `github.content_path` when set, otherwise
    /// `paths.content` (the site root is then assumed to be the repository
    /// root). `None` when no repository is configured.
    pub fn edit_root(&self) -> Option<String> {
        let repo = self.repository()?;
        let content = match self.github.content_path.trim_matches('/') {
            "" => self.paths.content.trim_matches('/'),
            path => path,
        };
        Some(format!(
            "{}/edit/{}/{}/",
            repo, self.github.branch, content
        ))
    }
}

/// Input locations, relative to the site root.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    /// Content root: section files, topic directories and `meta.json`.
    pub content: String,
    /// Language toggle strings (`meta.json` of the toggle fragment).
    pub lang_toggle: String,
    /// Stylesheets bundled into the page, in cascade order.
    pub styles: Vec<String>,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            content: "content/pages/info".to_string(),
            lang_toggle: "content/fragments/lang-toggle/meta.json".to_string(),
            styles: vec![
                "styles/fragments/footer.css".to_string(),
                "styles/fragments/lang-toggle.css".to_string(),
                "styles/fragments/topic.css".to_string(),
                "styles/fragments/content.css".to_string(),
                "styles/pages/info.css".to_string(),
            ],
        }
    }
}

/// Repository settings used for the footer link and topic edit links.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GithubConfig {
    /// Repository URL. Empty disables edit links and the footer link.
    pub repository: String,
    /// Branch edit links point at.
    pub branch: String,
    /// Content root relative to the repository root, for edit links.
    /// Empty means `paths.content`.
    pub content_path: String,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            repository: String::new(),
            branch: "master".to_string(),
            content_path: String::new(),
        }
    }
}

/// Parallel rendering settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of pages rendered at once.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)`, at least 1
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config
        .max_processes
        .map(|n| n.clamp(1, cores))
        .unwrap_or(cores)
}

/// Load config from `config.toml` in the given site root.
///
/// Uses stock defaults when the file doesn't exist; rejects unknown keys
/// and validates the result.
pub fn load_config(site_root: &Path) -> Result<SiteConfig, ConfigError> {
    let config_path = site_root.join(CONFIG_FILE);
    let config = if config_path.exists() {
        let content = fs::read_to_string(&config_path)?;
        toml::from_str(&content)?
    } else {
        SiteConfig::default()
    };
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Info Pages Configuration
# ========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# Languages to build. One page is written per language to <output>/<lang>/.
# Every content file must have a block for each of them.
languages = ["en", "de"]

# Section whose topic directory is rendered but kept out of the page index.
landing_dir = "a-landing"

# ---------------------------------------------------------------------------
# Input locations (relative to the site root)
# ---------------------------------------------------------------------------
[paths]
# Content root: section .md files, topic directories and meta.json.
content = "content/pages/info"

# Strings for the language toggle, keyed by language.
lang_toggle = "content/fragments/lang-toggle/meta.json"

# Stylesheets inlined into the page, in cascade order.
styles = [
    "styles/fragments/footer.css",
    "styles/fragments/lang-toggle.css",
    "styles/fragments/topic.css",
    "styles/fragments/content.css",
    "styles/pages/info.css",
]

# ---------------------------------------------------------------------------
# Repository
# ---------------------------------------------------------------------------
[github]
# Repository URL, e.g. "https://github.com/owner/site".
# Leave empty to build without edit links and footer link.
repository = ""

# Branch that topic edit links point at.
branch = "master"

# Content root relative to the repository root. Set this when the site root
# is a subdirectory of the repository, e.g. "src/content/pages/info".
# Empty uses paths.content.
content_path = ""

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum pages rendered in parallel.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 2
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_builds_both_languages() {
        let config = SiteConfig::default();
        assert_eq!(config.languages, vec![Lang::En, Lang::De]);
        assert_eq!(config.landing_dir, "a-landing");
    }

    #[test]
    fn default_styles_in_cascade_order() {
        let config = SiteConfig::default();
        assert_eq!(config.paths.styles.len(), 5);
        assert_eq!(config.paths.styles[0], "styles/fragments/footer.css");
        assert_eq!(config.paths.styles[4], "styles/pages/info.css");
    }

    #[test]
    fn parse_partial_config() {
        let config: SiteConfig = toml::from_str(
            r#"
[github]
repository = "https://github.com/owner/site"
"#,
        )
        .unwrap();
        assert_eq!(config.github.repository, "https://github.com/owner/site");
        assert_eq!(config.github.branch, "master");
        assert_eq!(config.paths.content, "content/pages/info");
    }

    #[test]
    fn stock_config_matches_defaults() {
        let stock: SiteConfig = toml::from_str(stock_config_toml()).unwrap();
        let defaults = SiteConfig::default();

        assert_eq!(stock.languages, defaults.languages);
        assert_eq!(stock.landing_dir, defaults.landing_dir);
        assert_eq!(stock.paths.content, defaults.paths.content);
        assert_eq!(stock.paths.lang_toggle, defaults.paths.lang_toggle);
        assert_eq!(stock.paths.styles, defaults.paths.styles);
        assert_eq!(stock.github.branch, defaults.github.branch);
        assert_eq!(stock.github.content_path, defaults.github.content_path);
        assert_eq!(stock.processing.max_processes, None);
    }

    #[test]
    fn unknown_key_rejected() {
        let result: Result<SiteConfig, _> = toml::from_str("colour = \"red\"");
        assert!(result.is_err());
    }

    #[test]
    fn unknown_language_rejected() {
        let result: Result<SiteConfig, _> = toml::from_str("languages = [\"fr\"]");
        assert!(result.is_err());
    }

    #[test]
    fn empty_languages_fail_validation() {
        let config = SiteConfig {
            languages: vec![],
            ..SiteConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn duplicate_language_fails_validation() {
        let config = SiteConfig {
            languages: vec![Lang::En, Lang::De, Lang::En],
            ..SiteConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("'en' listed twice"));
    }

    #[test]
    fn empty_landing_dir_fails_validation() {
        let config = SiteConfig {
            landing_dir: " ".to_string(),
            ..SiteConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn edit_root_none_without_repository() {
        assert_eq!(SiteConfig::default().edit_root(), None);
    }

    #[test]
    fn edit_root_built_from_repository_branch_and_content() {
        let mut config = SiteConfig::default();
        config.github.repository = "https://github.com/owner/site/".to_string();
        config.github.branch = "main".to_string();

        assert_eq!(
            config.edit_root().as_deref(),
            Some("https://github.com/owner/site/edit/main/content/pages/info/")
        );
    }

    #[test]
    fn edit_root_uses_repository_content_path_when_set() {
        let config: SiteConfig = toml::from_str(
            r#"
[github]
repository = "https://github.com/owner/site"
content_path = "/src/content/pages/info/"
"#,
        )
        .unwrap();

        assert_eq!(
            config.edit_root().as_deref(),
            Some("https://github.com/owner/site/edit/master/src/content/pages/info/")
        );
    }

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();

        assert_eq!(config.languages, vec![Lang::En, Lang::De]);
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE),
            "languages = [\"de\"]\nlanding_dir = \"start\"\n",
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.languages, vec![Lang::De]);
        assert_eq!(config.landing_dir, "start");
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "languages = [").unwrap();

        assert!(matches!(
            load_config(tmp.path()),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn load_config_validates() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "languages = []").unwrap();

        assert!(matches!(
            load_config(tmp.path()),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn effective_threads_auto() {
        let config = ProcessingConfig {
            max_processes: None,
        };
        assert!(effective_threads(&config) >= 1);
    }

    #[test]
    fn effective_threads_never_zero() {
        let config = ProcessingConfig {
            max_processes: Some(0),
        };
        assert_eq!(effective_threads(&config), 1);
    }

    #[test]
    fn effective_threads_clamped_to_cores() {
        let cores = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        let config = ProcessingConfig {
            max_processes: Some(cores + 64),
        };
        assert_eq!(effective_threads(&config), cores);
    }
}
