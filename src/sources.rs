//! Model sources for every source group.
//!
//! Models can live in `model/`, `src/<group>/smithy` and
//! `src/<group>/resources/META-INF/smithy`. These directories are attached to
//! each source group as a separate source set, next to the group's own sources.
//! The `main` group also gets the staging directory of the generated manifests
//! as a resource root, so they end up in the packaged artifact.

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

use crate::diagnostics::{Event, Sink};
use crate::error::WiringError;
use crate::project::{Project, SourceDirectorySet};

/// Placeholder replaced by the group name in directory templates.
const NAME: &str = "{name}";

/// Where model sources are searched for, per source group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SourceLayout {
    /// Key the model source set is attached under.
    pub key: String,
    /// Directory shared by every group.
    pub shared: Utf8PathBuf,
    /// Per-group directories, `{name}` is replaced by the group name.
    pub templates: Vec<String>,
    /// Group receiving the resource root.
    pub resource_group: String,
    /// Resource root, relative to the build directory.
    pub resource_root: Utf8PathBuf,
}

impl Default for SourceLayout {
    fn default() -> Self {
        Self {
            key: "smithy".to_string(),
            shared: Utf8PathBuf::from("model"),
            templates: vec![
                "src/{name}/smithy".to_string(),
                "src/{name}/resources/META-INF/smithy".to_string(),
            ],
            resource_group: "main".to_string(),
            resource_root: Utf8PathBuf::from("tmp/smithy-inf"),
        }
    }
}

impl SourceLayout {
    /// The directories searched for the given group, shared directory first.
    pub fn dirs_for(&self, group: &str) -> Result<Vec<Utf8PathBuf>, WiringError> {
        check_group_name(group)?;

        let mut dirs = Vec::with_capacity(self.templates.len() + 1);
        dirs.push(self.shared.clone());
        dirs.extend(
            self.templates
                .iter()
                .map(|template| Utf8PathBuf::from(template.replace(NAME, group))),
        );

        Ok(dirs)
    }
}

/// Rejects names that would produce a wrong or inaccessible directory.
fn check_group_name(name: &str) -> Result<(), WiringError> {
    let unsafe_name = name.is_empty()
        || name == "."
        || name == ".."
        || name
            .chars()
            .any(|c| matches!(c, '/' | '\\' | ':') || c.is_control());

    if unsafe_name {
        return Err(WiringError::UnsafeGroupName(name.to_string()));
    }

    Ok(())
}

/// Attaches the model source set to every source group the project has at
/// the moment of the call, and registers the resource root.
///
/// Returns the names of the extended groups. Running it again on the same
/// project leaves it unchanged.
pub fn extend_source_groups<P, S>(
    project: &mut P,
    layout: &SourceLayout,
    sink: &mut S,
) -> Result<Vec<String>, WiringError>
where
    P: Project + ?Sized,
    S: Sink + ?Sized,
{
    let groups = project.source_group_names();

    for name in &groups {
        let dirs = layout.dirs_for(name)?;

        let mut set = SourceDirectorySet::new(name, format!("{name} Smithy sources"));
        for dir in &dirs {
            set.src_dir(dir.clone());
        }

        project.attach_source_set(name, &layout.key, set)?;
        sink.emit(Event::SourcesAttached {
            group: name.clone(),
            key: layout.key.clone(),
            dirs,
        });

        if *name == layout.resource_group {
            let dir = project.build_dir().join(&layout.resource_root);
            if project.add_resource_root(name, dir.clone())? {
                sink.emit(Event::ResourceRootRegistered {
                    group: name.clone(),
                    dir,
                });
            }
        }
    }

    Ok(groups)
}

/// Every model directory attached to any group, resolved against the project
/// directory. Groups without the extension are skipped.
pub fn model_dirs<P>(project: &P, key: &str) -> Vec<Utf8PathBuf>
where
    P: Project + ?Sized,
{
    let base: &Utf8Path = project.project_dir();
    let mut dirs: Vec<Utf8PathBuf> = Vec::new();

    for name in project.source_group_names() {
        let Some(set) = project.source_group(&name).and_then(|g| g.extension(key)) else {
            continue;
        };

        for dir in set.dirs() {
            let dir = base.join(dir);
            if !dirs.contains(&dir) {
                dirs.push(dir);
            }
        }
    }

    dirs
}

/// The model source set attached to a group.
pub fn model_sources<'a, P>(
    project: &'a P,
    group: &str,
    key: &str,
) -> Result<Option<&'a SourceDirectorySet>, WiringError>
where
    P: Project + ?Sized,
{
    let group = project
        .source_group(group)
        .ok_or_else(|| WiringError::MissingSourceGroup(group.to_string()))?;
    Ok(group.extension(key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Diagnostics;
    use crate::project::HostProject;

    fn extend(project: &mut HostProject) -> Diagnostics {
        let mut diagnostics = Diagnostics::new();
        extend_source_groups(project, &SourceLayout::default(), &mut diagnostics).unwrap();
        diagnostics
    }

    #[test]
    fn test_every_group_gets_three_dirs() {
        let mut project = HostProject::java_conventions("demo", "/work").unwrap();
        extend(&mut project);

        for name in ["main", "test"] {
            let set = model_sources(&project, name, "smithy").unwrap().unwrap();
            assert_eq!(set.len(), 3);
            assert_eq!(
                set.dirs(),
                [
                    Utf8PathBuf::from("model"),
                    Utf8PathBuf::from(format!("src/{name}/smithy")),
                    Utf8PathBuf::from(format!("src/{name}/resources/META-INF/smithy")),
                ]
            );
        }
    }

    #[test]
    fn test_primary_sources_untouched() {
        let mut project = HostProject::java_conventions("demo", "/work").unwrap();
        let before = project.source_group("test").unwrap().primary.clone();
        extend(&mut project);

        let group = project.source_group("test").unwrap();
        assert_eq!(group.primary, before);
        assert_eq!(group.extensions.len(), 1);
    }

    #[test]
    fn test_groups_added_late_are_extended() {
        let mut project = HostProject::java_conventions("demo", "/work").unwrap();
        project.add_source_group("integ");
        extend(&mut project);

        let set = model_sources(&project, "integ", "smithy").unwrap().unwrap();
        assert!(set.dirs().iter().any(|dir| dir.as_str().contains("integ")));
    }

    #[test]
    fn test_resource_root_only_for_main() {
        let mut project = HostProject::java_conventions("demo", "/work").unwrap();
        let diagnostics = extend(&mut project);

        let main = project.source_group("main").unwrap();
        assert!(
            main.resources
                .dirs()
                .contains(&Utf8PathBuf::from("build/tmp/smithy-inf"))
        );
        assert_eq!(project.source_group("test").unwrap().resources.len(), 1);

        let registered = diagnostics
            .iter()
            .filter(|e| matches!(e, Event::ResourceRootRegistered { .. }))
            .count();
        assert_eq!(registered, 1);
    }

    #[test]
    fn test_running_twice_is_idempotent() {
        let mut project = HostProject::java_conventions("demo", "/work").unwrap();
        extend(&mut project);
        let once = project.source_group("main").unwrap().clone();

        let diagnostics = extend(&mut project);
        let twice = project.source_group("main").unwrap();

        assert_eq!(&once, twice);
        assert_eq!(twice.resources.len(), 2);
        assert!(
            !diagnostics
                .iter()
                .any(|e| matches!(e, Event::ResourceRootRegistered { .. }))
        );
    }

    #[test]
    fn test_unsafe_group_name() {
        for name in ["", ".", "..", "a/b", "a\\b", "a:b", "a\nb"] {
            let mut project = HostProject::new("demo", "/work");
            project.add_source_group(name);

            let err = extend_source_groups(
                &mut project,
                &SourceLayout::default(),
                &mut Diagnostics::new(),
            )
            .unwrap_err();
            assert!(matches!(err, WiringError::UnsafeGroupName(_)), "{name:?}");
        }
    }

    #[test]
    fn test_model_dirs_dedup_shared() {
        let mut project = HostProject::java_conventions("demo", "/work").unwrap();
        assert!(model_dirs(&project, "smithy").is_empty());

        extend(&mut project);
        let dirs = model_dirs(&project, "smithy");

        assert_eq!(dirs.len(), 5);
        assert_eq!(dirs[0], Utf8PathBuf::from("/work/model"));
        assert!(dirs.contains(&Utf8PathBuf::from("/work/src/test/smithy")));
    }

    #[test]
    fn test_model_sources_missing_group() {
        let project = HostProject::java_conventions("demo", "/work").unwrap();
        assert!(model_sources(&project, "main", "smithy").unwrap().is_none());
        assert!(matches!(
            model_sources(&project, "nope", "smithy"),
            Err(WiringError::MissingSourceGroup(_))
        ));
    }
}
