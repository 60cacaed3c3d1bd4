//! Project configuration (`.djinit.toml`)

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::BootstrapError;
use crate::version::DEFAULT_DJANGO_VERSION;

/// Config file name looked up in the project root
pub const CONFIG_FILE_NAME: &str = ".djinit.toml";

/// djinit configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Default answers for prompts and unset flags
    #[serde(default)]
    pub defaults: Defaults,

    /// Template resolution settings
    #[serde(default)]
    pub templates: TemplatesConfig,
}

/// Default values offered by both front ends
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Defaults {
    /// Django version suggested when none is supplied
    #[serde(default = "default_django_version")]
    pub django_version: String,

    /// First app name suggested when none is supplied
    #[serde(default = "default_app_name")]
    pub app_name: String,
}

/// Template override settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TemplatesConfig {
    /// Directory holding template overrides (embedded defaults otherwise)
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

fn default_django_version() -> String {
    DEFAULT_DJANGO_VERSION.to_string()
}

fn default_app_name() -> String {
    "users".to_string()
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            django_version: default_django_version(),
            app_name: default_app_name(),
        }
    }
}

/// Load `.djinit.toml` from the project root, or defaults when absent.
pub fn load_config(root: &Path) -> Result<Config, BootstrapError> {
    let path = root.join(CONFIG_FILE_NAME);
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(&path)?;
    toml::from_str(&content)
        .map_err(|e| BootstrapError::Config(format!("{}: {}", path.display(), e)))
}
