use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

use crate::error::WiringError;

/// Projection built when the declaration doesn't name one.
pub const DEFAULT_PROJECTION: &str = "source";

/// Options the build script can set on the `smithy` extension.
///
/// Nothing is validated or defaulted when the values are set; an unset option
/// stays `None` until one of the `*_or_default` readers is asked for it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct Declaration {
    /// Projection whose output gets validated and packaged.
    pub projection: Option<String>,
    /// Where the generated manifests are written.
    pub output_directory: Option<Utf8PathBuf>,
    /// CLI version to request instead of inferring one.
    pub cli_version_override: Option<String>,
    /// Turns the generation task off when `false`.
    pub enabled: Option<bool>,
}

impl Declaration {
    pub fn from_json(text: &str) -> Result<Self, WiringError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn projection(&mut self, projection: impl Into<String>) -> &mut Self {
        self.projection = Some(projection.into());
        self
    }

    pub fn output_directory(&mut self, dir: impl Into<Utf8PathBuf>) -> &mut Self {
        self.output_directory = Some(dir.into());
        self
    }

    pub fn cli_version(&mut self, version: impl Into<String>) -> &mut Self {
        self.cli_version_override = Some(version.into());
        self
    }

    pub fn enabled(&mut self, enabled: bool) -> &mut Self {
        self.enabled = Some(enabled);
        self
    }

    pub fn projection_or_default(&self) -> &str {
        self.projection.as_deref().unwrap_or(DEFAULT_PROJECTION)
    }

    /// `<build dir>/smithyprojections/<project>` unless set explicitly.
    pub fn output_directory_or_default(
        &self,
        build_dir: &Utf8Path,
        project: &str,
    ) -> Utf8PathBuf {
        match &self.output_directory {
            Some(dir) => dir.clone(),
            None => build_dir.join("smithyprojections").join(project),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_until_read() {
        let declaration = Declaration::default();
        assert_eq!(declaration.projection, None);
        assert_eq!(declaration.output_directory, None);
        assert_eq!(declaration.cli_version_override, None);
        assert_eq!(declaration.projection_or_default(), "source");
        assert_eq!(
            declaration.output_directory_or_default(Utf8Path::new("build"), "weather"),
            Utf8PathBuf::from("build/smithyprojections/weather")
        );
        assert!(declaration.is_enabled());
    }

    #[test]
    fn test_setters_chain() {
        let mut declaration = Declaration::default();
        declaration
            .projection("external")
            .output_directory("out")
            .cli_version("1.0.0")
            .enabled(false);

        assert_eq!(declaration.projection_or_default(), "external");
        assert_eq!(
            declaration.output_directory_or_default(Utf8Path::new("build"), "weather"),
            Utf8PathBuf::from("out")
        );
        assert_eq!(declaration.cli_version_override.as_deref(), Some("1.0.0"));
        assert!(!declaration.is_enabled());
    }

    #[test]
    fn test_from_json() {
        let declaration =
            Declaration::from_json(r#"{ "projection": "a", "cliVersionOverride": "2.0" }"#)
                .unwrap();
        assert_eq!(declaration.projection.as_deref(), Some("a"));
        assert_eq!(declaration.cli_version_override.as_deref(), Some("2.0"));
        assert_eq!(declaration.output_directory, None);

        assert!(matches!(
            Declaration::from_json(r#"{ "projections": "a" }"#),
            Err(WiringError::Manifest(_))
        ));
    }
}
