//! Configuration management for Guida.
//!
//! Parses `guida.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## File Layout
//!
//! ```toml
//! [site]
//! title = "Guida 3IB"
//! url = "https://example.github.io"
//! base = "/guida/"
//!
//! [image]
//! service = "noop"
//!
//! [[social]]
//! icon = "github"
//! label = "GitHub"
//! href = "https://github.com/example/guida"
//!
//! [[sidebar]]
//! label = "OOP"
//! items = [{ label = "Polimorfismo", slug = "esempio" }]
//!
//! [[sidebar]]
//! label = "Reference"
//! autogenerate = { directory = "reference" }
//! ```
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
//! - `site.base`
//! - `social[].href`

mod expand;

use std::path::{Path, PathBuf};

use guida_sidebar::{Sidebar, ValidationError};
use serde::{Deserialize, Serialize};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override site title.
    pub title: Option<String>,
    /// Override deployed site URL.
    pub url: Option<String>,
    /// Override base path.
    pub base: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "guida.toml";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Site identity and deployment location.
    pub site: SiteConfig,
    /// Image processing configuration.
    pub image: ImageConfig,
    /// External links shown in the site header.
    pub social: Vec<SocialLink>,
    /// Sidebar navigation tree.
    pub sidebar: Sidebar,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Site identity and deployment location.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Site display name.
    pub title: String,
    /// Deployed site URL (e.g. `https://example.github.io`).
    pub url: Option<String>,
    /// Path prefix the site is served under.
    pub base: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Guida".to_owned(),
            url: None,
            base: "/".to_owned(),
        }
    }
}

/// Image processing configuration.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImageConfig {
    /// Image service used by the renderer.
    pub service: ImageService,
}

/// Image service used by the renderer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageService {
    /// Optimize and transform images.
    #[default]
    Sharp,
    /// Pass images through untouched.
    Noop,
}

/// External link descriptor.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SocialLink {
    /// Icon name known to the renderer (e.g. `github`).
    pub icon: String,
    /// Accessible label.
    pub label: String,
    /// Link target.
    pub href: String,
}

impl SocialLink {
    /// Validate that all fields are properly set.
    ///
    /// `field` is the config path used in error messages (e.g. `social[0]`).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any field is empty or `href` is not an http(s) URL.
    pub fn validate(&self, field: &str) -> Result<(), ConfigError> {
        require_non_empty(&self.icon, &format!("{field}.icon"))?;
        require_non_empty(&self.label, &format!("{field}.label"))?;
        require_non_empty(&self.href, &format!("{field}.href"))?;
        require_http_url(&self.href, &format!("{field}.href"))?;
        Ok(())
    }
}

/// The configuration object handed to the site renderer.
#[derive(Debug, Serialize)]
pub struct ExportedConfig<'a> {
    /// Site display name.
    pub title: &'a str,
    /// Deployed site URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site: Option<&'a str>,
    /// Path prefix.
    pub base: &'a str,
    /// Image processing configuration.
    pub image: &'a ImageConfig,
    /// External links.
    pub social: &'a [SocialLink],
    /// Sidebar tree, unchanged from the declaration.
    pub sidebar: &'a Sidebar,
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
    /// TOML parsing error, including malformed sidebar entries.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Sidebar structure error.
    #[error("Configuration error: {0}")]
    Sidebar(#[from] ValidationError),
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
    if value.trim().is_empty() {
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
    /// Otherwise, searches for `guida.toml` in current directory and parents,
    /// falling back to defaults when none is found.
    ///
    /// CLI settings are applied after loading, taking precedence over config
    /// file values. The result is validated after the overrides.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let discovered = match config_path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound(path.to_path_buf()));
                }
                Some(path.to_path_buf())
            }
            None => std::env::current_dir()
                .ok()
                .and_then(|cwd| Self::discover_from(&cwd)),
        };

        let mut config = match discovered {
            Some(path) => Self::load_from_file(&path)?,
            None => {
                tracing::debug!("No {CONFIG_FILENAME} found, using defaults");
                Self::default()
            }
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;

        Ok(config)
    }

    /// Parse configuration from TOML content.
    ///
    /// Expands environment variables but does not validate.
    ///
    /// # Errors
    ///
    /// Returns error if the TOML is malformed or a referenced variable is unset.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(content)?;
        config.expand_env_vars()?;
        Ok(config)
    }

    /// The configuration object consumed by the site renderer.
    #[must_use]
    pub fn export(&self) -> ExportedConfig<'_> {
        ExportedConfig {
            title: &self.site.title,
            site: self.site.url.as_deref(),
            base: &self.site.base,
            image: &self.image,
            social: &self.social,
            sidebar: &self.sidebar,
        }
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(title) = &settings.title {
            self.site.title.clone_from(title);
        }
        if let Some(url) = &settings.url {
            self.site.url = Some(url.clone());
        }
        if let Some(base) = &settings.base {
            self.site.base.clone_from(base);
        }
    }

    /// Search for config file in `start` and its parents.
    fn discover_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
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

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml(&content)?;
        config.config_path = Some(path.to_path_buf());

        tracing::debug!(
            path = %path.display(),
            entries = config.sidebar.entry_count(),
            "Loaded configuration"
        );

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Checks that all required fields are properly set and contain valid values.
    /// Called automatically by [`Config::load`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` or `ConfigError::Sidebar` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_site()?;
        self.validate_social()?;
        self.sidebar.validate()?;
        Ok(())
    }

    /// Validate site configuration.
    fn validate_site(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.site.title, "site.title")?;

        if let Some(ref url) = self.site.url {
            require_non_empty(url, "site.url")?;
            require_http_url(url, "site.url")?;
        }

        let base = &self.site.base;
        if !base.starts_with('/') || !base.ends_with('/') {
            return Err(ConfigError::Validation(
                "site.base must start and end with '/'".to_owned(),
            ));
        }

        Ok(())
    }

    /// Validate social links.
    fn validate_social(&self) -> Result<(), ConfigError> {
        for (index, link) in self.social.iter().enumerate() {
            link.validate(&format!("social[{index}]"))?;
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref url) = self.site.url {
            self.site.url = Some(expand::expand_env(url, "site.url")?);
        }
        self.site.base = expand::expand_env(&self.site.base, "site.base")?;

        for (index, link) in self.social.iter_mut().enumerate() {
            link.href = expand::expand_env(&link.href, &format!("social[{index}].href"))?;
        }

        Ok(())
    }
}
