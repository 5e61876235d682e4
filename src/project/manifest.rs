use std::collections::BTreeMap;

use camino::Utf8PathBuf;
use serde::Deserialize;

use crate::core::Dependency;
use crate::error::WiringError;
use crate::project::{HostProject, Project};

/// JSON description of a host project, on top of the JVM conventions.
///
/// ```json
/// {
///   "name": "weather",
///   "sourceGroups": ["integ"],
///   "dependencies": {
///     "runtimeClasspath": ["software.amazon.smithy:smithy-model:1.2.3"]
///   },
///   "disabledTasks": ["jar"]
/// }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ProjectManifest {
    pub name: String,
    pub project_dir: Option<Utf8PathBuf>,
    /// Groups created in addition to `main` and `test`.
    pub source_groups: Vec<String>,
    pub dependencies: BTreeMap<String, Vec<Dependency>>,
    pub disabled_tasks: Vec<String>,
}

impl ProjectManifest {
    pub fn from_json(text: &str) -> Result<Self, WiringError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Builds the project. Relative `projectDir` values are resolved against
    /// `base`.
    pub fn into_project(self, base: impl Into<Utf8PathBuf>) -> Result<HostProject, WiringError> {
        let base = base.into();
        let dir = match self.project_dir {
            Some(dir) if dir.is_absolute() => dir,
            Some(dir) => base.join(dir),
            None => base,
        };

        let mut project = HostProject::java_conventions(self.name, dir)?;

        for group in &self.source_groups {
            project.add_source_group(group);
        }

        for (bucket, dependencies) in self.dependencies {
            project.ensure_bucket(&bucket);
            for dependency in dependencies {
                project.add_dependency(&bucket, dependency)?;
            }
        }

        for task in &self.disabled_tasks {
            project.set_task_enabled(task, false)?;
        }

        Ok(project)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_into_project() {
        let manifest = ProjectManifest::from_json(
            r#"{
                "name": "weather",
                "projectDir": "weather",
                "sourceGroups": ["integ"],
                "dependencies": {
                    "runtimeClasspath": ["software.amazon.smithy:smithy-model:1.2.3"],
                    "smithyCli": []
                },
                "disabledTasks": ["jar"]
            }"#,
        )
        .unwrap();

        let project = manifest.into_project("/work").unwrap();

        assert_eq!(project.name(), "weather");
        assert_eq!(project.project_dir().as_str(), "/work/weather");
        assert_eq!(project.source_group_names(), vec!["integ", "main", "test"]);
        assert_eq!(
            project.dependencies("runtimeClasspath").unwrap(),
            [Dependency::new("software.amazon.smithy", "smithy-model", "1.2.3")]
        );
        assert_eq!(project.dependencies("smithyCli"), Some(&[][..]));
        assert!(!project.task_node(project.task("jar").unwrap()).enabled);
    }

    #[test]
    fn test_manifest_errors() {
        assert!(matches!(
            ProjectManifest::from_json(r#"{ "name": "x", "plugins": [] }"#),
            Err(WiringError::Manifest(_))
        ));
        assert!(matches!(
            ProjectManifest::from_json(r#"{ "dependencies": { "runtimeClasspath": ["bad"] } }"#),
            Err(WiringError::Manifest(_))
        ));

        let manifest = ProjectManifest::from_json(r#"{ "disabledTasks": ["javadoc"] }"#).unwrap();
        assert!(matches!(
            manifest.into_project("."),
            Err(WiringError::MissingTask(name)) if name == "javadoc"
        ));
    }
}
