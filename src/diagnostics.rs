//! Observable side channel of the wiring pass.
//!
//! Components never log on their own. Each one receives a [`Sink`] and reports
//! what it did as an [`Event`], so hosts and tests decide what happens to the
//! output. [`Diagnostics`] keeps everything in memory, [`TracingSink`] forwards
//! to `tracing`.

use camino::Utf8PathBuf;
use serde::Serialize;

use crate::core::Dependency;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum Event {
    /// A model source set was attached to a source group.
    SourcesAttached {
        group: String,
        key: String,
        dirs: Vec<Utf8PathBuf>,
    },
    /// A resource root was added to a source group.
    ResourceRootRegistered { group: String, dir: Utf8PathBuf },
    /// The CLI was already declared by the user.
    CliPinned { dependency: Dependency },
    /// The CLI version came from the declaration.
    CliVersionOverridden { version: String },
    /// The CLI version was taken from the model library.
    CliVersionDetected { version: String },
    /// No model library found, the default version is assumed.
    CliVersionDefaulted { version: String },
    /// A dependency request was appended to a bucket.
    DependencyAdded { bucket: String, dependency: Dependency },
    /// The generation task decided whether it runs.
    GenerationState { task: String, enabled: bool },
    /// `dependent` now depends on `prerequisite`.
    TaskWired { dependent: String, prerequisite: String },
    /// The generation task is disabled and was left out of the graph.
    TaskSkipped { task: String },
}

/// Receiver of wiring events.
pub trait Sink {
    fn emit(&mut self, event: Event);
}

/// Records events in emission order.
#[derive(Debug, Default)]
pub struct Diagnostics {
    pub events: Vec<Event>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.events.iter()
    }

    pub fn contains(&self, event: &Event) -> bool {
        self.events.contains(event)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.events)
    }
}

impl Sink for Diagnostics {
    fn emit(&mut self, event: Event) {
        self.events.push(event);
    }
}

/// Forwards events to the `tracing` subscriber installed by the host.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl Sink for TracingSink {
    fn emit(&mut self, event: Event) {
        match event {
            Event::SourcesAttached { group, key, dirs } => {
                tracing::debug!(%group, %key, ?dirs, "adding model sources to source group");
            }
            Event::ResourceRootRegistered { group, dir } => {
                tracing::debug!(%group, %dir, "registering model resource artifacts");
            }
            Event::CliPinned { dependency } => {
                tracing::info!(%dependency, "using explicitly configured CLI");
            }
            Event::CliVersionOverridden { version } => {
                tracing::info!("using configured CLI version {}", version);
            }
            Event::CliVersionDetected { version } => {
                tracing::info!("detected CLI version {}", version);
            }
            Event::CliVersionDefaulted { version } => {
                tracing::info!(
                    "no model dependencies were found, assuming CLI version {}",
                    version
                );
            }
            Event::DependencyAdded { bucket, dependency } => {
                tracing::debug!(%bucket, %dependency, "adding dependency");
            }
            Event::GenerationState { task, enabled } => {
                tracing::debug!(%task, enabled, "generation task state");
            }
            Event::TaskWired {
                dependent,
                prerequisite,
            } => {
                tracing::info!("{} now depends on {}", dependent, prerequisite);
            }
            Event::TaskSkipped { task } => {
                tracing::info!("{} is disabled, leaving the task graph untouched", task);
            }
        }
    }
}

impl<S: Sink + ?Sized> Sink for &mut S {
    fn emit(&mut self, event: Event) {
        (**self).emit(event);
    }
}
