use std::fmt::Debug;

use camino::Utf8PathBuf;
use serde::Serialize;

use crate::core::ToolIdentity;
use crate::declaration::Declaration;
use crate::diagnostics::{Event, Sink};
use crate::error::WiringError;
use crate::project::Project;
use crate::sources::{SourceLayout, extend_source_groups, model_dirs};
use crate::task::{GenerationContext, GenerationTask, ModelBuildTask};
use crate::version::{CliResolution, add_cli_dependencies};
use crate::wiring::{HostTasks, WiringOutcome, wire_generation_task};

/// Wires Smithy models into a host project.
///
/// The plugin works in two steps. [`ModelPlugin::apply`] runs while the host
/// is still being configured and hands back a [`Declared`] plugin whose
/// [`Declaration`] the build script is free to change. Once the host's
/// configuration is final, the driver calls [`Declared::wire`] exactly once.
/// Everything that depends on the final state of the project happens there.
///
/// # Example
///
/// ```rust
/// use smithy_wire::{Diagnostics, HostProject, ModelPlugin};
///
/// let mut project = HostProject::java_conventions("weather", "/work/weather")?;
/// let mut plugin = ModelPlugin::default().apply(&mut project)?;
/// plugin.declaration_mut().projection("external");
///
/// let wired = plugin.wire(&mut project, &mut Diagnostics::new())?;
/// assert_eq!(wired.report().cli.version(), "0.9.5");
/// # Ok::<(), smithy_wire::WiringError>(())
/// ```
pub struct ModelPlugin {
    identity: ToolIdentity,
    layout: SourceLayout,
    host_tasks: HostTasks,
    task: Box<dyn GenerationTask>,
}

impl ModelPlugin {
    pub fn new() -> Self {
        Self {
            identity: ToolIdentity::default(),
            layout: SourceLayout::default(),
            host_tasks: HostTasks::default(),
            task: Box::new(ModelBuildTask::default()),
        }
    }

    pub fn identity(mut self, identity: ToolIdentity) -> Self {
        self.identity = identity;
        self
    }

    pub fn layout(mut self, layout: SourceLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn host_tasks(mut self, host_tasks: HostTasks) -> Self {
        self.host_tasks = host_tasks;
        self
    }

    pub fn generation_task(mut self, task: impl GenerationTask + 'static) -> Self {
        self.task = Box::new(task);
        self
    }

    /// Registers the generation task and the declaration. Nothing else about
    /// the project is looked at yet.
    pub fn apply<P>(self, project: &mut P) -> Result<Declared, WiringError>
    where
        P: Project + ?Sized,
    {
        if project.task(self.task.name()).is_none() {
            project.register_task(self.task.name(), true)?;
        }

        Ok(Declared {
            plugin: self,
            declaration: Declaration::default(),
        })
    }
}

impl Default for ModelPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for ModelPlugin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelPlugin")
            .field("identity", &self.identity)
            .field("layout", &self.layout)
            .field("host_tasks", &self.host_tasks)
            .field("task", &self.task.name())
            .finish()
    }
}

/// The plugin between application and the end of the host's configuration.
#[derive(Debug)]
pub struct Declared {
    plugin: ModelPlugin,
    declaration: Declaration,
}

impl Declared {
    pub fn declaration(&self) -> &Declaration {
        &self.declaration
    }

    pub fn declaration_mut(&mut self) -> &mut Declaration {
        &mut self.declaration
    }

    /// Name of the generation task registered by [`ModelPlugin::apply`].
    pub fn task_name(&self) -> &str {
        self.plugin.task.name()
    }

    /// Runs the configuration-time pass against the final project state.
    ///
    /// Steps run in a fixed order, each one relying on the previous:
    /// 1. model sources are attached to every source group,
    /// 2. the CLI dependency is settled,
    /// 3. the generation task decides whether it runs, unless the host
    ///    already disabled it,
    /// 4. the generation task is wired into the graph.
    ///
    /// The first error aborts the pass.
    pub fn wire<P, S>(self, project: &mut P, sink: &mut S) -> Result<Wired, WiringError>
    where
        P: Project + ?Sized,
        S: Sink + ?Sized,
    {
        let Declared {
            plugin,
            declaration,
        } = self;
        let name = plugin.task.name().to_string();

        let groups = extend_source_groups(project, &plugin.layout, sink)?;

        let cli = add_cli_dependencies(
            project,
            &plugin.identity,
            declaration.cli_version_override.as_deref(),
            sink,
        )?;

        let id = project
            .task(&name)
            .ok_or_else(|| WiringError::MissingTask(name.clone()))?;

        // A task the host switched off stays off, the plugin can only narrow.
        let dirs = model_dirs(&*project, &plugin.layout.key);
        let context = GenerationContext {
            declaration: &declaration,
            model_dirs: &dirs,
        };
        let enabled = project.task_node(id).enabled
            && plugin
                .task
                .is_enabled(&context)
                .map_err(|err| WiringError::Task(name.clone(), err))?;

        if !enabled {
            project.set_enabled(id, false);
        }
        sink.emit(Event::GenerationState {
            task: name.clone(),
            enabled,
        });

        let outcome = wire_generation_task(project, &plugin.host_tasks, &name, sink)?;

        let build_dir = project.project_dir().join(project.build_dir());
        let report = WiringReport {
            project: project.name().to_string(),
            projection: declaration.projection_or_default().to_string(),
            output_directory: declaration.output_directory_or_default(&build_dir, project.name()),
            groups,
            cli,
            task: name,
            enabled,
            outcome,
        };

        Ok(Wired {
            declaration,
            report,
        })
    }
}

/// The plugin after the pass. The declaration can no longer change.
#[derive(Debug)]
pub struct Wired {
    declaration: Declaration,
    report: WiringReport,
}

impl Wired {
    pub fn declaration(&self) -> &Declaration {
        &self.declaration
    }

    pub fn report(&self) -> &WiringReport {
        &self.report
    }

    pub fn into_report(self) -> WiringReport {
        self.report
    }
}

/// Summary of what the pass decided.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WiringReport {
    pub project: String,
    pub projection: String,
    pub output_directory: Utf8PathBuf,
    /// Source groups that received model sources.
    pub groups: Vec<String>,
    pub cli: CliResolution,
    /// Name of the generation task.
    pub task: String,
    pub enabled: bool,
    pub outcome: WiringOutcome,
}

impl WiringReport {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
