//! Django version validation and pip pinning

/// Fallback when the requested version does not parse or is too old
pub const DEFAULT_DJANGO_VERSION: &str = "5.2.3";

/// Result of validating a requested Django version
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionResolution {
    /// Requested version accepted as given
    Accepted(String),
    /// Requested version malformed or major < 3; default substituted
    Fallback { requested: String },
}

impl VersionResolution {
    /// The version that will actually be installed
    pub fn resolved(&self) -> &str {
        match self {
            VersionResolution::Accepted(v) => v,
            VersionResolution::Fallback { .. } => DEFAULT_DJANGO_VERSION,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, VersionResolution::Fallback { .. })
    }
}

/// Validate a requested Django version.
///
/// The leading `.`-separated component must parse as an integer >= 3;
/// anything else falls back to `DEFAULT_DJANGO_VERSION`.
pub fn resolve_django_version(requested: &str) -> VersionResolution {
    let major = requested
        .split('.')
        .next()
        .and_then(|part| part.parse::<u32>().ok());

    match major {
        Some(major) if major >= 3 => VersionResolution::Accepted(requested.to_string()),
        _ => VersionResolution::Fallback {
            requested: requested.to_string(),
        },
    }
}

/// Build the pip requirement for a resolved version.
///
/// A full three-component version is pinned exactly (`django==5.2.3`); a
/// shorter one installs the latest compatible release (`django~=5.2`).
pub fn pip_requirement(version: &str) -> String {
    if version.split('.').count() == 3 {
        format!("django=={version}")
    } else {
        format!("django~={version}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_version_accepted() {
        let res = resolve_django_version("5.2.3");
        assert_eq!(res, VersionResolution::Accepted("5.2.3".to_string()));
        assert_eq!(res.resolved(), "5.2.3");
        assert!(!res.is_fallback());
    }

    #[test]
    fn test_two_component_version_accepted() {
        let res = resolve_django_version("5.2");
        assert_eq!(res.resolved(), "5.2");
    }

    #[test]
    fn test_old_major_falls_back() {
        let res = resolve_django_version("2.0");
        assert!(res.is_fallback());
        assert_eq!(res.resolved(), DEFAULT_DJANGO_VERSION);
    }

    #[test]
    fn test_garbage_falls_back() {
        assert!(resolve_django_version("abc").is_fallback());
        assert!(resolve_django_version("").is_fallback());
        assert!(resolve_django_version(".5").is_fallback());
    }

    #[test]
    fn test_pip_requirement_pinning() {
        assert_eq!(pip_requirement("5.2.3"), "django==5.2.3");
        assert_eq!(pip_requirement("5.2"), "django~=5.2");
        assert_eq!(pip_requirement("5"), "django~=5");
        assert_eq!(pip_requirement("5.2.3.1"), "django~=5.2.3.1");
    }
}
