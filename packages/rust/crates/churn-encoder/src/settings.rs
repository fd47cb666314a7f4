//! Runtime settings loader for churn-encoder.
//!
//! Loads and merges:
//! - System defaults: `<PRJ_ROOT>/packages/conf/churn-encoder.yaml`
//! - User overrides:  `<PRJ_CONFIG_HOME>/churn-encoder/settings.yaml`
//!
//! Merge precedence is user over system.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use serde::Deserialize;

const DEFAULT_SYSTEM_SETTINGS_RELATIVE_PATH: &str = "packages/conf/churn-encoder.yaml";
const DEFAULT_USER_SETTINGS_RELATIVE_PATH: &str = "churn-encoder/settings.yaml";
const DEFAULT_CONFIG_HOME_RELATIVE_PATH: &str = ".config";
static CONFIG_HOME_OVERRIDE: OnceLock<PathBuf> = OnceLock::new();

/// Merged runtime settings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RuntimeSettings {
    /// Encoder schema overrides
    #[serde(default)]
    pub encoder: EncoderSettings,
    /// Default input files
    #[serde(default)]
    pub data: DataSettings,
}

/// Overrides applied on top of the churn encoder config
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EncoderSettings {
    /// Vector dimension
    pub dimension: Option<usize>,
    /// Basis seed
    pub seed: Option<u64>,
}

/// Default data locations, relative to the project root unless absolute
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DataSettings {
    /// Pattern JSONL file
    pub patterns_path: Option<String>,
    /// Customer fixture file
    pub customers_path: Option<String>,
}

impl RuntimeSettings {
    fn merge(self, overlay: Self) -> Self {
        Self {
            encoder: self.encoder.merge(overlay.encoder),
            data: self.data.merge(overlay.data),
        }
    }

    /// Resolved pattern file, if configured.
    #[must_use]
    pub fn patterns_path(&self) -> Option<PathBuf> {
        self.data
            .patterns_path
            .as_deref()
            .map(|p| absolutize(&project_root(), PathBuf::from(p)))
    }

    /// Resolved customer fixture file, if configured.
    #[must_use]
    pub fn customers_path(&self) -> Option<PathBuf> {
        self.data
            .customers_path
            .as_deref()
            .map(|p| absolutize(&project_root(), PathBuf::from(p)))
    }
}

impl EncoderSettings {
    fn merge(self, overlay: Self) -> Self {
        Self {
            dimension: overlay.dimension.or(self.dimension),
            seed: overlay.seed.or(self.seed),
        }
    }
}

impl DataSettings {
    fn merge(self, overlay: Self) -> Self {
        Self {
            patterns_path: overlay.patterns_path.or(self.patterns_path),
            customers_path: overlay.customers_path.or(self.customers_path),
        }
    }
}

/// Load merged runtime settings (user overrides system).
#[must_use]
pub fn load_runtime_settings() -> RuntimeSettings {
    let root = project_root();
    let config_home = CONFIG_HOME_OVERRIDE
        .get()
        .cloned()
        .or_else(|| env_path("PRJ_CONFIG_HOME"))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_HOME_RELATIVE_PATH));
    load_runtime_settings_from_paths(
        &root.join(DEFAULT_SYSTEM_SETTINGS_RELATIVE_PATH),
        &absolutize(&root, config_home).join(DEFAULT_USER_SETTINGS_RELATIVE_PATH),
    )
}

/// Load and merge two explicit settings files; either may be missing.
#[must_use]
pub fn load_runtime_settings_from_paths(system: &Path, user: &Path) -> RuntimeSettings {
    read_settings(system).merge(read_settings(user))
}

/// Missing file: defaults. Unreadable or malformed file: warn, then defaults.
fn read_settings(path: &Path) -> RuntimeSettings {
    if !path.is_file() {
        return RuntimeSettings::default();
    }
    let parsed = std::fs::read_to_string(path)
        .map_err(|error| error.to_string())
        .and_then(|raw| serde_yaml::from_str(&raw).map_err(|error| error.to_string()));
    parsed.unwrap_or_else(|error| {
        tracing::warn!(path = %path.display(), %error, "ignoring settings file");
        RuntimeSettings::default()
    })
}

fn env_path(name: &str) -> Option<PathBuf> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

fn project_root() -> PathBuf {
    env_path("PRJ_ROOT")
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Set config-home override (used by CLI `--conf`).
///
/// Absolute, or relative to the project root. The first call wins.
pub fn set_config_home_override(path: impl Into<PathBuf>) {
    let path = path.into();
    if path.as_os_str().is_empty() {
        return;
    }
    if let Err(ignored) = CONFIG_HOME_OVERRIDE.set(path) {
        tracing::warn!(ignored = %ignored.display(), "config home override already set");
    }
}

fn absolutize(root: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() { path } else { root.join(path) }
}
