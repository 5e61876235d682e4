#![forbid(unsafe_code)]
//! Configuration-time wiring of Smithy models into a host build.
//!
//! Applied to a JVM-style project, the plugin
//! - attaches model source directories to every source group,
//! - requests a Smithy CLI matching the model library the project uses,
//! - makes the model build task a prerequisite of compilation or assembly.
//!
//! None of it can be decided while the host is still being configured, so the
//! work is split in two: [`ModelPlugin::apply`] registers what the build script
//! can configure, and [`Declared::wire`] runs the pass once the project is
//! final.

mod core;
mod declaration;
mod diagnostics;
mod error;
mod plugin;
pub mod project;
pub mod sources;
mod task;
#[cfg(feature = "logging")]
mod utils;
pub mod version;
pub mod wiring;

pub use crate::core::{Coordinates, DEFAULT_CLI_VERSION, Dependency, SMITHY_GROUP, ToolIdentity};
pub use crate::declaration::{DEFAULT_PROJECTION, Declaration};
pub use crate::diagnostics::{Diagnostics, Event, Sink, TracingSink};
pub use crate::error::WiringError;
pub use crate::plugin::{Declared, ModelPlugin, Wired, WiringReport};
pub use crate::project::{HostProject, Project, ProjectManifest};
pub use crate::sources::SourceLayout;
pub use crate::task::{GenerationContext, GenerationTask, ModelBuildTask, TaskResult};
#[cfg(feature = "logging")]
pub use crate::utils::init_logging;
pub use crate::version::CliResolution;
pub use crate::wiring::{HostTasks, WiringOutcome};
