use std::collections::BTreeMap;

use camino::{Utf8Path, Utf8PathBuf};
use serde::Serialize;

/// An ordered set of directories searched for one kind of source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceDirectorySet {
    pub name: String,
    pub display_name: String,
    dirs: Vec<Utf8PathBuf>,
}

impl SourceDirectorySet {
    pub fn new(name: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            display_name: display_name.into(),
            dirs: Vec::new(),
        }
    }

    /// Adds a directory, returns `false` if it was already part of the set.
    pub fn src_dir(&mut self, dir: impl Into<Utf8PathBuf>) -> bool {
        let dir = dir.into();
        if self.dirs.contains(&dir) {
            return false;
        }
        self.dirs.push(dir);
        true
    }

    pub fn dirs(&self) -> &[Utf8PathBuf] {
        &self.dirs
    }

    pub fn len(&self) -> usize {
        self.dirs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }
}

/// A named collection of source directories owned by the host, e.g. `main`.
///
/// Primary sources and resources are the host's own. Other source kinds hang
/// off the group as named extensions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceGroup {
    pub name: String,
    pub primary: SourceDirectorySet,
    pub resources: SourceDirectorySet,
    pub extensions: BTreeMap<String, SourceDirectorySet>,
}

impl SourceGroup {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            primary: SourceDirectorySet::new(&name, format!("{name} sources")),
            resources: SourceDirectorySet::new(&name, format!("{name} resources")),
            extensions: BTreeMap::new(),
            name,
        }
    }

    /// Group laid out like a JVM project: `src/<name>/java` and
    /// `src/<name>/resources`.
    pub fn conventional(name: impl Into<String>) -> Self {
        let mut group = Self::new(name);
        let base = Utf8Path::new("src").join(&group.name);
        group.primary.src_dir(base.join("java"));
        group.resources.src_dir(base.join("resources"));
        group
    }

    pub fn extension(&self, key: &str) -> Option<&SourceDirectorySet> {
        self.extensions.get(key)
    }
}
