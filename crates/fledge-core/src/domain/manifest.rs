//! Project manifest values and the release tag derived from them.

use std::fmt;

use crate::domain::error::DomainError;

/// The two fields Fledge needs from `pubspec.yaml`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectManifest {
    name: String,
    version: Option<String>,
}

impl ProjectManifest {
    pub fn new(name: impl Into<String>, version: Option<String>) -> Result<Self, DomainError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(DomainError::MissingRequiredField { field: "name" });
        }
        let version = version
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());
        Ok(Self { name, version })
    }

    /// Root package name, used in `package:` imports.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Release tag for this manifest's version.
    pub fn release_tag(&self) -> Result<ReleaseTag, DomainError> {
        let version = self
            .version()
            .ok_or(DomainError::MissingRequiredField { field: "version" })?;
        ReleaseTag::from_version(version)
    }
}

/// A git tag of the form `v<semver>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseTag(String);

impl ReleaseTag {
    /// `1.2.3+45` → `v1.2.3`; `1.0.0` → `v1.0.0`.
    pub fn from_version(version: &str) -> Result<Self, DomainError> {
        let core = version.split('+').next().unwrap_or_default().trim();
        if core.is_empty() {
            return Err(DomainError::InvalidVersion {
                version: version.to_string(),
                reason: "nothing before the build number".into(),
            });
        }
        if core.chars().any(char::is_whitespace) {
            return Err(DomainError::InvalidVersion {
                version: version.to_string(),
                reason: "tags cannot contain whitespace".into(),
            });
        }
        Ok(Self(format!("v{core}")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReleaseTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
