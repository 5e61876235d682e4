//! Picks the CLI version used to validate the generated artifacts.
//!
//! Precedence:
//! 1. a CLI already declared in the CLI bucket is left alone,
//! 2. the version configured on the declaration,
//! 3. the version of the first model library in the runtime bucket,
//! 4. [`DEFAULT_CLI_VERSION`](crate::DEFAULT_CLI_VERSION).
//!
//! Only the first model library counts when several are declared with
//! different versions.
//!
//! The configured version skips inference but never adds a second CLI next to
//! a declared one. At most one dependency is appended per pass.

use serde::Serialize;

use crate::core::{Dependency, ToolIdentity};
use crate::diagnostics::{Event, Sink};
use crate::error::WiringError;
use crate::project::Project;

/// How the CLI version was settled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "source", rename_all = "camelCase")]
pub enum CliResolution {
    /// Declared by the user, nothing was added.
    Pinned { dependency: Dependency },
    /// Taken from the declaration.
    Overridden { dependency: Dependency },
    /// Taken from the model library.
    Detected { dependency: Dependency },
    /// Nothing to infer from, the default was used.
    Defaulted { dependency: Dependency },
}

impl CliResolution {
    /// The CLI dependency in effect.
    pub fn dependency(&self) -> &Dependency {
        match self {
            CliResolution::Pinned { dependency }
            | CliResolution::Overridden { dependency }
            | CliResolution::Detected { dependency }
            | CliResolution::Defaulted { dependency } => dependency,
        }
    }

    pub fn version(&self) -> &str {
        &self.dependency().version
    }

    /// Whether a dependency was appended to the CLI bucket.
    pub fn is_added(&self) -> bool {
        !matches!(self, CliResolution::Pinned { .. })
    }
}

/// Makes sure the CLI bucket requests a CLI, inferring the version if the
/// user didn't pin one. Appends at most one dependency.
pub fn add_cli_dependencies<P, S>(
    project: &mut P,
    identity: &ToolIdentity,
    version_override: Option<&str>,
    sink: &mut S,
) -> Result<CliResolution, WiringError>
where
    P: Project + ?Sized,
    S: Sink + ?Sized,
{
    project.ensure_bucket(&identity.cli_bucket);

    let pinned = project
        .dependencies(&identity.cli_bucket)
        .unwrap_or_default()
        .iter()
        .find(|dependency| dependency.matches(&identity.cli))
        .cloned();

    if let Some(dependency) = pinned {
        sink.emit(Event::CliPinned {
            dependency: dependency.clone(),
        });
        return Ok(CliResolution::Pinned { dependency });
    }

    let resolution = match version_override {
        Some(version) => {
            sink.emit(Event::CliVersionOverridden {
                version: version.to_string(),
            });
            CliResolution::Overridden {
                dependency: cli_dependency(identity, version)?,
            }
        }
        None => match detect_model_version(&*project, identity)? {
            Some(version) => {
                sink.emit(Event::CliVersionDetected {
                    version: version.clone(),
                });
                CliResolution::Detected {
                    dependency: cli_dependency(identity, &version)?,
                }
            }
            None => {
                sink.emit(Event::CliVersionDefaulted {
                    version: identity.default_version.clone(),
                });
                CliResolution::Defaulted {
                    dependency: cli_dependency(identity, &identity.default_version)?,
                }
            }
        },
    };

    let dependency = resolution.dependency().clone();
    project.add_dependency(&identity.cli_bucket, dependency.clone())?;
    sink.emit(Event::DependencyAdded {
        bucket: identity.cli_bucket.clone(),
        dependency,
    });

    Ok(resolution)
}

/// Version of the first model library in the runtime bucket.
fn detect_model_version<P>(
    project: &P,
    identity: &ToolIdentity,
) -> Result<Option<String>, WiringError>
where
    P: Project + ?Sized,
{
    let runtime = project
        .dependencies(&identity.runtime_bucket)
        .ok_or_else(|| WiringError::MissingBucket(identity.runtime_bucket.clone()))?;

    Ok(runtime
        .iter()
        .find(|dependency| dependency.matches(&identity.model))
        .map(|dependency| dependency.version.clone()))
}

fn cli_dependency(identity: &ToolIdentity, version: &str) -> Result<Dependency, WiringError> {
    let version = version.trim();
    if version.is_empty() || version.contains(':') {
        return Err(WiringError::InvalidVersion {
            coordinates: identity.cli.to_string(),
            version: version.to_string(),
        });
    }

    Ok(identity.cli.at(version))
}
