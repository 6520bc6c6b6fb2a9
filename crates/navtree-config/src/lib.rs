//! Site configuration for navtree.
//!
//! Parses `navtree.toml` with serde and provides auto-discovery of the config
//! file in parent directories. Loading is eager: the `[[sidebar]]` declaration
//! is validated into a [`NavTree`] as part of [`Config::load`], so a config
//! that loads successfully always carries a usable navigation tree.
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `base`
//! - `theme.repo`
//! - `theme.logo`
//! - `nav[*].link`

mod expand;

use std::path::{Path, PathBuf};

use navtree_nav::{FsDocuments, NavError, NavTree, RawNode, missing_documents};
use serde::Deserialize;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "navtree.toml";

/// Deepest heading level a table of contents can include.
const MAX_HEADING_LEVEL: u8 = 6;

/// Site configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site title.
    pub title: Option<String>,
    /// Site description.
    pub description: Option<String>,
    /// Base URL the site is served under (starts and ends with `/`).
    pub base: String,
    /// Documentation configuration (paths are relative strings from TOML).
    docs: DocsConfigRaw,
    /// Markdown rendering settings.
    pub markdown: MarkdownConfig,
    /// Theme settings.
    pub theme: ThemeConfig,
    /// Top-bar navigation links.
    pub nav: Vec<NavLink>,
    /// Sidebar declaration as written in the config file.
    sidebar: Vec<RawNode>,

    /// Resolved docs configuration (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// Validated sidebar (set after loading).
    #[serde(skip)]
    pub navigation: NavTree,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw docs configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsConfigRaw {
    source_dir: Option<String>,
}

/// Resolved documentation configuration with absolute paths.
#[derive(Debug, Default)]
pub struct DocsConfig {
    /// Source directory for markdown files.
    pub source_dir: PathBuf,
}

/// Markdown rendering settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct MarkdownConfig {
    /// Heading levels included in the per-page table of contents.
    pub toc_levels: Vec<u8>,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            toc_levels: vec![2, 3],
        }
    }
}

/// Theme settings.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Label for the "last updated" timestamp. `None` hides it.
    pub last_updated: Option<String>,
    /// Repository shown in the top bar (e.g., "unification-com/mainchain").
    pub repo: Option<String>,
    /// Docs directory inside the repository, used for "edit this page" links.
    pub docs_dir: Option<String>,
    /// Logo image path.
    pub logo: Option<String>,
}

/// Top-bar navigation link.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NavLink {
    /// Link text.
    pub text: String,
    /// Link target: an http(s) URL or a site path starting with `/`.
    pub link: String,
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
        /// Config field path (e.g., "`theme.repo`").
        field: String,
        /// Error message (e.g., "${`DOCS_REPO`} not set").
        message: String,
    },
    /// Sidebar declaration is invalid.
    #[error(transparent)]
    Navigation(#[from] NavError),
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `navtree.toml` in current directory and parents,
    /// falling back to defaults relative to the current directory.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing or
    /// validation fails, or the sidebar declaration is invalid.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            return Self::load_from_file(path);
        }

        match Self::discover_config() {
            Some(discovered) => Self::load_from_file(&discovered),
            None => {
                tracing::debug!("No {CONFIG_FILENAME} found, using defaults");
                Ok(Self::default_with_cwd())
            }
        }
    }

    /// Parse configuration from TOML content.
    ///
    /// Relative paths are resolved against `config_dir`. Runs the same
    /// expansion, validation and sidebar loading as [`Config::load`].
    ///
    /// # Errors
    ///
    /// Returns error if parsing or validation fails, or the sidebar
    /// declaration is invalid.
    pub fn from_toml_str(content: &str, config_dir: &Path) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;
        config.resolve_paths(config_dir);
        config.validate()?;
        config.navigation = navtree_nav::load(&config.sidebar)?;

        tracing::info!(
            title = config.title.as_deref().unwrap_or_default(),
            sidebar_nodes = config.navigation.len(),
            "Configuration loaded"
        );

        Ok(config)
    }

    /// Sidebar declaration in its raw form.
    #[must_use]
    pub fn sidebar(&self) -> &[RawNode] {
        &self.sidebar
    }

    /// Sidebar paths with no markdown document in the docs directory.
    ///
    /// Scans `docs_resolved.source_dir` and returns missing paths in sidebar
    /// order. Each missing path is logged as a warning.
    #[must_use]
    pub fn check_documents(&self) -> Vec<String> {
        let documents = FsDocuments::scan(&self.docs_resolved.source_dir);
        let missing = missing_documents(&self.navigation, &documents);
        for path in &missing {
            tracing::warn!(
                path = %path,
                source_dir = %self.docs_resolved.source_dir.display(),
                "Sidebar entry has no matching document"
            );
        }
        missing
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
        Self {
            title: None,
            description: None,
            base: "/".to_owned(),
            docs: DocsConfigRaw::default(),
            markdown: MarkdownConfig::default(),
            theme: ThemeConfig::default(),
            nav: Vec::new(),
            sidebar: Vec::new(),
            docs_resolved: DocsConfig {
                source_dir: base.join("docs"),
            },
            navigation: NavTree::default(),
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config_dir = path.parent().unwrap_or(Path::new("."));
        let mut config = Self::from_toml_str(&content, config_dir)?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading. The sidebar is validated separately
    /// by the navigation loader.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_base()?;
        self.validate_markdown()?;
        self.validate_nav()?;
        Ok(())
    }

    fn validate_base(&self) -> Result<(), ConfigError> {
        if !self.base.starts_with('/') || !self.base.ends_with('/') {
            return Err(ConfigError::Validation(format!(
                "base must start and end with '/', got '{}'",
                self.base
            )));
        }
        Ok(())
    }

    fn validate_markdown(&self) -> Result<(), ConfigError> {
        let levels = &self.markdown.toc_levels;

        if let Some(level) = levels
            .iter()
            .find(|&&level| level == 0 || level > MAX_HEADING_LEVEL)
        {
            return Err(ConfigError::Validation(format!(
                "markdown.toc_levels entries must be between 1 and {MAX_HEADING_LEVEL}, got {level}"
            )));
        }
        if levels.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(ConfigError::Validation(
                "markdown.toc_levels must be strictly ascending".to_owned(),
            ));
        }

        Ok(())
    }

    fn validate_nav(&self) -> Result<(), ConfigError> {
        for (i, link) in self.nav.iter().enumerate() {
            require_non_empty(&link.text, &format!("nav[{i}].text"))?;
            require_non_empty(&link.link, &format!("nav[{i}].link"))?;

            let target = link.link.as_str();
            let is_url = target.starts_with("http://") || target.starts_with("https://");
            if !is_url && !target.starts_with('/') {
                return Err(ConfigError::Validation(format!(
                    "nav[{i}].link must be an http(s) URL or start with '/'"
                )));
            }
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.base = expand::expand_env(&self.base, "base")?;
        expand::expand_optional(&mut self.theme.repo, "theme.repo")?;
        expand::expand_optional(&mut self.theme.logo, "theme.logo")?;
        for (i, link) in self.nav.iter_mut().enumerate() {
            link.link = expand::expand_env(&link.link, &format!("nav[{i}].link"))?;
        }
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.docs_resolved = DocsConfig {
            source_dir: config_dir.join(self.docs.source_dir.as_deref().unwrap_or("docs")),
        };
    }
}
