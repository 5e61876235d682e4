//! The host project as seen by the wiring pass.
//!
//! [`Project`] is everything the pass needs from the host build: source groups,
//! named dependency buckets and the task graph, all looked up by name. The pass
//! only ever reads or appends through it. [`HostProject`] is the in-memory
//! implementation used by drivers and tests.

mod manifest;
mod source;
mod tasks;

use std::collections::BTreeMap;

use camino::{Utf8Path, Utf8PathBuf};

pub use crate::project::manifest::ProjectManifest;
pub use crate::project::source::{SourceDirectorySet, SourceGroup};
pub use crate::project::tasks::{TaskGraph, TaskId, TaskNode};

use crate::core::Dependency;
use crate::error::WiringError;

/// Tasks every JVM-style host is expected to define.
pub mod conventions {
    pub const COMPILE: &str = "compileJava";
    pub const PACKAGE: &str = "jar";
    pub const ASSEMBLE: &str = "assemble";
    pub const BUILD: &str = "build";
    pub const RUNTIME_CLASSPATH: &str = "runtimeClasspath";
    pub const COMPILE_CLASSPATH: &str = "compileClasspath";
}

pub trait Project {
    fn name(&self) -> &str;

    /// Directory relative source paths are resolved against.
    fn project_dir(&self) -> &Utf8Path;

    /// Build output directory, relative to the project directory.
    fn build_dir(&self) -> Utf8PathBuf {
        Utf8PathBuf::from("build")
    }

    /// Names of the source groups as they are right now.
    fn source_group_names(&self) -> Vec<String>;

    fn source_group(&self, name: &str) -> Option<&SourceGroup>;

    /// Attaches `set` to the group under `key`, replacing what was there.
    fn attach_source_set(
        &mut self,
        group: &str,
        key: &str,
        set: SourceDirectorySet,
    ) -> Result<(), WiringError>;

    /// Returns `false` if the group already had this resource root.
    fn add_resource_root(&mut self, group: &str, dir: Utf8PathBuf) -> Result<bool, WiringError>;

    fn dependencies(&self, bucket: &str) -> Option<&[Dependency]>;

    /// Creates the bucket unless it exists already.
    fn ensure_bucket(&mut self, bucket: &str);

    fn add_dependency(&mut self, bucket: &str, dependency: Dependency) -> Result<(), WiringError>;

    fn task(&self, name: &str) -> Option<TaskId>;

    fn task_node(&self, id: TaskId) -> &TaskNode;

    fn register_task(&mut self, name: &str, enabled: bool) -> Result<TaskId, WiringError>;

    fn set_enabled(&mut self, id: TaskId, enabled: bool);

    /// Returns `false` if the edge already existed.
    fn depends_on(
        &mut self,
        dependent: TaskId,
        prerequisite: TaskId,
    ) -> Result<bool, WiringError>;
}

/// In-memory project model.
#[derive(Debug)]
pub struct HostProject {
    name: String,
    project_dir: Utf8PathBuf,
    groups: BTreeMap<String, SourceGroup>,
    buckets: BTreeMap<String, Vec<Dependency>>,
    pub tasks: TaskGraph,
}

impl HostProject {
    /// An empty project, no groups, buckets or tasks.
    pub fn new(name: impl Into<String>, project_dir: impl Into<Utf8PathBuf>) -> Self {
        Self {
            name: name.into(),
            project_dir: project_dir.into(),
            groups: BTreeMap::new(),
            buckets: BTreeMap::new(),
            tasks: TaskGraph::new(),
        }
    }

    /// A project with what the base JVM convention sets up: `main` and `test`
    /// groups, classpath buckets and the `compileJava -> jar -> assemble ->
    /// build` chain.
    pub fn java_conventions(
        name: impl Into<String>,
        project_dir: impl Into<Utf8PathBuf>,
    ) -> Result<Self, WiringError> {
        use conventions::*;

        let mut project = Self::new(name, project_dir);
        project.add_source_group("main");
        project.add_source_group("test");
        project.ensure_bucket(COMPILE_CLASSPATH);
        project.ensure_bucket(RUNTIME_CLASSPATH);

        let mut previous = None;
        for name in [COMPILE, PACKAGE, ASSEMBLE, BUILD] {
            let id = project.tasks.register(name, true)?;
            if let Some(prerequisite) = previous {
                project.tasks.depends_on(id, prerequisite)?;
            }
            previous = Some(id);
        }

        Ok(project)
    }

    /// Returns the named group, creating it with the conventional layout.
    pub fn add_source_group(&mut self, name: &str) -> &mut SourceGroup {
        self.groups
            .entry(name.to_string())
            .or_insert_with(|| SourceGroup::conventional(name))
    }

    pub fn set_task_enabled(&mut self, name: &str, enabled: bool) -> Result<(), WiringError> {
        let id = self
            .tasks
            .get(name)
            .ok_or_else(|| WiringError::MissingTask(name.to_string()))?;
        self.tasks.node_mut(id).enabled = enabled;
        Ok(())
    }

    /// Direct prerequisites of a task by name, empty if there is no such task.
    pub fn prerequisites(&self, name: &str) -> Vec<&str> {
        self.tasks
            .get(name)
            .map(|id| self.tasks.prerequisites(id))
            .unwrap_or_default()
    }
}

impl Project for HostProject {
    fn name(&self) -> &str {
        &self.name
    }

    fn project_dir(&self) -> &Utf8Path {
        &self.project_dir
    }

    fn source_group_names(&self) -> Vec<String> {
        self.groups.keys().cloned().collect()
    }

    fn source_group(&self, name: &str) -> Option<&SourceGroup> {
        self.groups.get(name)
    }

    fn attach_source_set(
        &mut self,
        group: &str,
        key: &str,
        set: SourceDirectorySet,
    ) -> Result<(), WiringError> {
        let group = self
            .groups
            .get_mut(group)
            .ok_or_else(|| WiringError::MissingSourceGroup(group.to_string()))?;
        group.extensions.insert(key.to_string(), set);
        Ok(())
    }

    fn add_resource_root(&mut self, group: &str, dir: Utf8PathBuf) -> Result<bool, WiringError> {
        let group = self
            .groups
            .get_mut(group)
            .ok_or_else(|| WiringError::MissingSourceGroup(group.to_string()))?;
        Ok(group.resources.src_dir(dir))
    }

    fn dependencies(&self, bucket: &str) -> Option<&[Dependency]> {
        self.buckets.get(bucket).map(Vec::as_slice)
    }

    fn ensure_bucket(&mut self, bucket: &str) {
        self.buckets.entry(bucket.to_string()).or_default();
    }

    fn add_dependency(&mut self, bucket: &str, dependency: Dependency) -> Result<(), WiringError> {
        self.buckets
            .get_mut(bucket)
            .ok_or_else(|| WiringError::MissingBucket(bucket.to_string()))?
            .push(dependency);
        Ok(())
    }

    fn task(&self, name: &str) -> Option<TaskId> {
        self.tasks.get(name)
    }

    fn task_node(&self, id: TaskId) -> &TaskNode {
        self.tasks.node(id)
    }

    fn register_task(&mut self, name: &str, enabled: bool) -> Result<TaskId, WiringError> {
        self.tasks.register(name, enabled)
    }

    fn set_enabled(&mut self, id: TaskId, enabled: bool) {
        self.tasks.node_mut(id).enabled = enabled;
    }

    fn depends_on(
        &mut self,
        dependent: TaskId,
        prerequisite: TaskId,
    ) -> Result<bool, WiringError> {
        self.tasks.depends_on(dependent, prerequisite)
    }
}
