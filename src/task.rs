//! The generation task, as far as wiring is concerned.
//!
//! What the task does when it runs is up to the host. The wiring pass only
//! needs its name and whether it is going to run at all.

use camino::Utf8PathBuf;

use crate::declaration::Declaration;

/// Result of userland task logic.
pub type TaskResult<T> = anyhow::Result<T, anyhow::Error>;

/// What a generation task gets to look at when deciding whether it runs.
#[derive(Debug, Clone, Copy)]
pub struct GenerationContext<'a> {
    pub declaration: &'a Declaration,
    /// Model directories of every source group, absolute, no duplicates.
    pub model_dirs: &'a [Utf8PathBuf],
}

pub trait GenerationTask {
    fn name(&self) -> &str;

    fn is_enabled(&self, context: &GenerationContext<'_>) -> TaskResult<bool>;
}

/// Builds the projection and packages the result. Runs only when it isn't
/// switched off and there is at least one model file to build.
#[derive(Debug, Clone)]
pub struct ModelBuildTask {
    name: String,
    extensions: Vec<String>,
}

impl ModelBuildTask {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extensions: vec!["smithy".to_string(), "json".to_string()],
        }
    }

    /// Replaces the file extensions recognized as models.
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// First model file found under any of the directories.
    pub fn find_model_file(&self, dirs: &[Utf8PathBuf]) -> TaskResult<Option<Utf8PathBuf>> {
        for dir in dirs.iter().filter(|dir| dir.is_dir()) {
            let base = glob::Pattern::escape(dir.as_str());

            for extension in &self.extensions {
                let pattern = format!("{base}/**/*.{extension}");

                for entry in glob::glob(&pattern)? {
                    let path = Utf8PathBuf::try_from(entry?)?;
                    if path.is_file() {
                        return Ok(Some(path));
                    }
                }
            }
        }

        Ok(None)
    }
}

impl Default for ModelBuildTask {
    fn default() -> Self {
        Self::new("smithyBuildJar")
    }
}

impl GenerationTask for ModelBuildTask {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_enabled(&self, context: &GenerationContext<'_>) -> TaskResult<bool> {
        if !context.declaration.is_enabled() {
            return Ok(false);
        }

        Ok(self.find_model_file(context.model_dirs)?.is_some())
    }
}
