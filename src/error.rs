use thiserror::Error;

/// Failure of the configuration-time pass.
///
/// Every variant is fatal for the pass that raised it. The host is expected to
/// surface it through its own evaluation failure channel and stop the build.
#[derive(Debug, Error)]
pub enum WiringError {
    #[error("Task '{0}' not found, was the base build convention applied?")]
    MissingTask(String),

    #[error("Task '{0}' is already registered")]
    DuplicateTask(String),

    #[error("Dependency bucket '{0}' not found")]
    MissingBucket(String),

    #[error("Source group '{0}' not found")]
    MissingSourceGroup(String),

    #[error("Source group name '{0}' can't be used in a directory path")]
    UnsafeGroupName(String),

    #[error("Invalid version '{version}' for {coordinates}")]
    InvalidVersion { coordinates: String, version: String },

    #[error("Invalid dependency notation '{0}', expected 'group:name:version'")]
    InvalidNotation(String),

    #[error("Making '{dependent}' depend on '{prerequisite}' would create a cycle")]
    Cycle {
        dependent: String,
        prerequisite: String,
    },

    #[error("Task '{0}':\n{1}")]
    Task(String, anyhow::Error),

    #[error("Couldn't parse manifest.\n{0}")]
    Manifest(#[from] serde_json::Error),
}
