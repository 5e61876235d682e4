use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::WiringError;

/// Group under which the Smithy artifacts are published.
pub const SMITHY_GROUP: &str = "software.amazon.smithy";

/// CLI version requested when nothing in the project hints at a better one.
pub const DEFAULT_CLI_VERSION: &str = "0.9.5";

/// The identity of a dependency, without its version.
///
/// Two dependencies refer to the same artifact when their coordinates are
/// equal, whatever versions they were declared with.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coordinates {
    pub group: String,
    pub name: String,
}

impl Coordinates {
    pub fn new(group: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            name: name.into(),
        }
    }

    /// Attach a version, producing a dependency request for these coordinates.
    pub fn at(&self, version: impl Into<String>) -> Dependency {
        Dependency {
            group: self.group.clone(),
            name: self.name.clone(),
            version: version.into(),
        }
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group, self.name)
    }
}

/// A declared dependency. Immutable once declared.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Dependency {
    pub group: String,
    pub name: String,
    pub version: String,
}

impl Dependency {
    pub fn new(
        group: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            name: name.into(),
            version: version.into(),
        }
    }

    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.group.as_str(), self.name.as_str())
    }

    /// Identity check, the version is never compared.
    pub fn matches(&self, coordinates: &Coordinates) -> bool {
        self.group == coordinates.group && self.name == coordinates.name
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.name, self.version)
    }
}

impl FromStr for Dependency {
    type Err = WiringError;

    fn from_str(notation: &str) -> Result<Self, Self::Err> {
        let mut parts = notation.split(':');

        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(group), Some(name), Some(version), None)
                if !group.is_empty() && !name.is_empty() && !version.is_empty() =>
            {
                Ok(Dependency::new(group, name, version))
            }
            _ => Err(WiringError::InvalidNotation(notation.to_string())),
        }
    }
}

impl TryFrom<String> for Dependency {
    type Error = WiringError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Dependency> for String {
    fn from(value: Dependency) -> Self {
        value.to_string()
    }
}

/// Which artifacts stand for the CLI and for the model library, and which
/// buckets they are read from and written to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ToolIdentity {
    /// The CLI artifact requested for validation.
    pub cli: Coordinates,
    /// The library whose version hints at a compatible CLI.
    pub model: Coordinates,
    /// Fallback when the model library isn't declared.
    pub default_version: String,
    /// Bucket used to build the classpath the CLI is invoked with.
    pub cli_bucket: String,
    /// Bucket scanned for the model library.
    pub runtime_bucket: String,
}

impl Default for ToolIdentity {
    fn default() -> Self {
        Self {
            cli: Coordinates::new(SMITHY_GROUP, "smithy-cli"),
            model: Coordinates::new(SMITHY_GROUP, "smithy-model"),
            default_version: DEFAULT_CLI_VERSION.to_string(),
            cli_bucket: "smithyCli".to_string(),
            runtime_bucket: "runtimeClasspath".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_notation() {
        let dep: Dependency = "software.amazon.smithy:smithy-cli:1.2.3".parse().unwrap();
        assert_eq!(dep.group, "software.amazon.smithy");
        assert_eq!(dep.name, "smithy-cli");
        assert_eq!(dep.version, "1.2.3");
        assert_eq!(dep.to_string(), "software.amazon.smithy:smithy-cli:1.2.3");
    }

    #[test]
    fn test_parse_notation_rejects_malformed() {
        for notation in ["", "a:b", "a:b:c:d", "a::1.0", ":b:1.0", "a:b:"] {
            let err = notation.parse::<Dependency>().unwrap_err();
            assert!(matches!(err, WiringError::InvalidNotation(_)), "{notation}");
        }
    }

    #[test]
    fn test_matches_ignores_version() {
        let coordinates = Coordinates::new("g", "n");
        assert!(Dependency::new("g", "n", "1.0").matches(&coordinates));
        assert!(Dependency::new("g", "n", "2.0").matches(&coordinates));
        assert!(!Dependency::new("g", "other", "1.0").matches(&coordinates));
        assert!(!Dependency::new("other", "n", "1.0").matches(&coordinates));
    }

    #[test]
    fn test_dependency_serde_uses_notation() {
        let dep = Dependency::new("g", "n", "1.0");
        let json = serde_json::to_string(&dep).unwrap();
        assert_eq!(json, r#""g:n:1.0""#);

        let back: Dependency = serde_json::from_str(&json).unwrap();
        assert_eq!(back, dep);
        assert!(serde_json::from_str::<Dependency>(r#""nope""#).is_err());
    }

    #[test]
    fn test_default_identity() {
        let identity = ToolIdentity::default();
        assert_eq!(identity.cli.to_string(), "software.amazon.smithy:smithy-cli");
        assert_eq!(identity.model.to_string(), "software.amazon.smithy:smithy-model");
        assert_eq!(identity.default_version, "0.9.5");
    }
}
