//! Configuration management for annotag using the prefer crate.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Default address for `annotag serve`.
pub const DEFAULT_BIND: &str = "127.0.0.1:8000";

/// Assets directory name under the UI root.
pub const ASSETS_SUBDIR: &str = "assets";

/// Resolved application settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Directory the static UI is served from.
    pub root_dir: PathBuf,
    /// Directory holding output.json, tags.json and aliases.json.
    pub assets_dir: PathBuf,
    /// Default bind address for the server.
    pub bind: String,
}

impl Default for Settings {
    fn default() -> Self {
        let root_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self {
            assets_dir: root_dir.join(ASSETS_SUBDIR),
            root_dir,
            bind: DEFAULT_BIND.to_string(),
        }
    }
}

impl Settings {
    /// Create settings rooted at a given UI directory.
    pub fn with_root_dir(root_dir: PathBuf) -> Self {
        Self {
            assets_dir: root_dir.join(ASSETS_SUBDIR),
            root_dir,
            ..Default::default()
        }
    }
}

/// Configuration file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, prefer::FromValue)]
pub struct Config {
    /// UI root directory.
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "root")]
    pub root_dir: Option<String>,
    /// Assets directory (defaults to `<root_dir>/assets`).
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "assets")]
    pub assets_dir: Option<String>,
    /// Server bind address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bind: Option<String>,
    /// Path to the config file this was loaded from (not serialized).
    #[serde(skip)]
    #[prefer(skip)]
    pub source_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration using prefer crate for discovery.
    /// Automatically discovers annotag config files in standard locations.
    pub async fn load() -> Self {
        match prefer::load("annotag").await {
            Ok(pref_config) => {
                if let Some(path) = pref_config.source_path() {
                    match Self::load_from_path(path).await {
                        Ok(config) => config,
                        Err(e) => {
                            tracing::warn!("{}", e);
                            Self::default()
                        }
                    }
                } else {
                    Self::default()
                }
            }
            // No config file found
            Err(_) => Self::default(),
        }
    }

    /// Load configuration from a specific file path.
    /// Supports JSON, TOML and YAML based on file extension.
    pub async fn load_from_path(path: &Path) -> Result<Self, String> {
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

        let mut config: Config = match ext {
            "toml" => toml::from_str(&contents)
                .map_err(|e| format!("Failed to parse TOML config: {}", e))?,
            "yaml" | "yml" => serde_yaml::from_str(&contents)
                .map_err(|e| format!("Failed to parse YAML config: {}", e))?,
            _ => serde_json::from_str(&contents)
                .map_err(|e| format!("Failed to parse JSON config: {}", e))?,
        };

        config.source_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Get the base directory for resolving relative paths.
    /// Returns the config file's parent directory if available, otherwise None.
    pub fn base_dir(&self) -> Option<PathBuf> {
        self.source_path
            .as_ref()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    }

    /// Apply configuration to settings.
    /// `base_dir` is used to resolve relative paths (typically config file dir or CWD).
    pub fn apply_to_settings(&self, settings: &mut Settings, base_dir: &Path) {
        if let Some(ref root_dir) = self.root_dir {
            settings.root_dir = resolve_path(root_dir, base_dir);
            settings.assets_dir = settings.root_dir.join(ASSETS_SUBDIR);
        }
        if let Some(ref assets_dir) = self.assets_dir {
            settings.assets_dir = resolve_path(assets_dir, base_dir);
        }
        if let Some(ref bind) = self.bind {
            settings.bind = bind.clone();
        }
    }
}

/// Resolve a path that may be relative.
/// - Absolute paths are returned as-is
/// - Paths starting with ~ are expanded
/// - Relative paths are resolved against `base_dir`
pub fn resolve_path(path_str: &str, base_dir: &Path) -> PathBuf {
    let expanded = shellexpand::tilde(path_str);
    let path = Path::new(expanded.as_ref());

    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}

/// Options for loading settings.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Explicit config file path (overrides auto-discovery).
    pub config_path: Option<PathBuf>,
    /// Use CWD for relative paths instead of config file directory.
    pub use_cwd: bool,
    /// UI root directory (--root flag).
    pub root_dir: Option<PathBuf>,
    /// Assets directory (--assets flag).
    pub assets_dir: Option<PathBuf>,
}

/// Load config from file sources.
async fn load_file_config(options: &LoadOptions) -> Config {
    // Priority 1: Explicit --config flag
    if let Some(ref config_path) = options.config_path {
        return match Config::load_from_path(config_path).await {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("{}", e);
                Config::default()
            }
        };
    }

    // Priority 2: Auto-discover via prefer
    Config::load().await
}

fn env_path(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

/// Load settings with explicit options.
///
/// Precedence, lowest first: defaults, config file, `ANNOTAG_ROOT` /
/// `ANNOTAG_ASSETS` environment variables, CLI flags.
pub async fn load_settings_with_options(options: LoadOptions) -> (Settings, Config) {
    let config = load_file_config(&options).await;
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let mut settings = Settings::default();

    // Determine base directory for resolving relative paths
    let base_dir = if options.use_cwd {
        cwd.clone()
    } else {
        config.base_dir().unwrap_or_else(|| cwd.clone())
    };

    config.apply_to_settings(&mut settings, &base_dir);

    if let Some(root) = env_path("ANNOTAG_ROOT") {
        tracing::debug!("Using ANNOTAG_ROOT from environment: {}", root);
        settings.root_dir = resolve_path(&root, &cwd);
        if config.assets_dir.is_none() {
            settings.assets_dir = settings.root_dir.join(ASSETS_SUBDIR);
        }
    }
    if let Some(assets) = env_path("ANNOTAG_ASSETS") {
        tracing::debug!("Using ANNOTAG_ASSETS from environment: {}", assets);
        settings.assets_dir = resolve_path(&assets, &cwd);
    }

    if let Some(root) = options.root_dir {
        settings.root_dir = cwd.join(root);
        if options.assets_dir.is_none() {
            settings.assets_dir = settings.root_dir.join(ASSETS_SUBDIR);
        }
    }
    if let Some(assets) = options.assets_dir {
        settings.assets_dir = cwd.join(assets);
    }

    (settings, config)
}
