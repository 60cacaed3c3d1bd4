//! Template discovery and embedding
//!
//! Templates ship embedded in the binary. An override directory can be
//! supplied instead; it is resolved once at process start, in this order:
//! 1. Environment variable: DJINIT_TEMPLATES_DIR
//! 2. `templates.dir` in `.djinit.toml`
//! 3. User data directory: <data_local_dir>/djinit/templates
//! 4. Embedded defaults

use std::fs;
use std::path::PathBuf;

use crate::config::Config;
use crate::error::BootstrapError;

/// Name of the environment variable for the template directory override
pub const TEMPLATES_DIR_ENV_VAR: &str = "DJINIT_TEMPLATES_DIR";

/// The fixed template set copied into bootstrapped projects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    Requirements,
    Readme,
    EnvExample,
    SettingsBase,
    SettingsDev,
    SettingsProd,
}

impl Template {
    /// Path of the template file inside an override directory
    pub fn rel_path(self) -> &'static str {
        match self {
            Template::Requirements => "requirements.txt",
            Template::Readme => "readme.md",
            Template::EnvExample => "env.example",
            Template::SettingsBase => "settings/base.py",
            Template::SettingsDev => "settings/dev.py",
            Template::SettingsProd => "settings/prod.py",
        }
    }

    /// Embedded default content
    fn embedded(self) -> &'static str {
        match self {
            Template::Requirements => include_str!("../templates/requirements.txt"),
            Template::Readme => include_str!("../templates/readme.md"),
            Template::EnvExample => include_str!("../templates/env.example"),
            Template::SettingsBase => include_str!("../templates/settings/base.py"),
            Template::SettingsDev => include_str!("../templates/settings/dev.py"),
            Template::SettingsProd => include_str!("../templates/settings/prod.py"),
        }
    }
}

/// Resolved template source for one process run
#[derive(Debug, Clone)]
pub struct Templates {
    override_dir: Option<PathBuf>,
}

impl Templates {
    /// Resolve the template source using the discovery order.
    pub fn discover(config: &Config) -> Self {
        if let Ok(env_dir) = std::env::var(TEMPLATES_DIR_ENV_VAR) {
            let path = PathBuf::from(env_dir);
            if path.is_dir() {
                return Self::from_dir(path);
            }
        }

        if let Some(dir) = &config.templates.dir {
            if dir.is_dir() {
                return Self::from_dir(dir.clone());
            }
        }

        if let Some(data_dir) = dirs::data_local_dir() {
            let path = data_dir.join("djinit").join("templates");
            if path.is_dir() {
                return Self::from_dir(path);
            }
        }

        Self::embedded()
    }

    /// Use only the embedded defaults.
    pub fn embedded() -> Self {
        Self { override_dir: None }
    }

    /// Use an override directory.
    pub fn from_dir(dir: PathBuf) -> Self {
        Self {
            override_dir: Some(dir),
        }
    }

    /// Fetch template contents.
    ///
    /// With an override directory, the file must exist there; the embedded
    /// defaults are not consulted as a fallback, so a broken override is
    /// reported instead of silently masked.
    pub fn contents(&self, template: Template) -> Result<String, BootstrapError> {
        match &self.override_dir {
            None => Ok(template.embedded().to_string()),
            Some(dir) => {
                let path = dir.join(template.rel_path());
                if !path.is_file() {
                    return Err(BootstrapError::TemplateMissing {
                        name: template.rel_path().to_string(),
                        dir: dir.clone(),
                    });
                }
                Ok(fs::read_to_string(&path)?)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_embedded_templates_are_nonempty() {
        let templates = Templates::embedded();
        for template in [
            Template::Requirements,
            Template::Readme,
            Template::EnvExample,
            Template::SettingsBase,
            Template::SettingsDev,
            Template::SettingsProd,
        ] {
            let content = templates.contents(template).unwrap();
            assert!(!content.trim().is_empty(), "{:?} is empty", template);
        }
    }

    #[test]
    fn test_embedded_settings_wire_up_dev_chain() {
        let templates = Templates::embedded();
        let dev = templates.contents(Template::SettingsDev).unwrap();
        assert!(dev.contains("from .base import"));
        let base = templates.contents(Template::SettingsBase).unwrap();
        assert!(base.contains("environ"));
    }

    #[test]
    fn test_override_dir_takes_precedence() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("requirements.txt"), "django==5.2.3\n").unwrap();

        let templates = Templates::from_dir(temp.path().to_path_buf());
        assert_eq!(
            templates.contents(Template::Requirements).unwrap(),
            "django==5.2.3\n"
        );
    }

    #[test]
    fn test_override_dir_missing_file_errors() {
        let temp = TempDir::new().unwrap();
        let templates = Templates::from_dir(temp.path().to_path_buf());

        let err = templates.contents(Template::Readme).unwrap_err();
        assert_eq!(err.code(), "TEMPLATE_MISSING");
        assert!(err.to_string().contains("readme.md"));
    }
}
