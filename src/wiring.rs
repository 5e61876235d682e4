//! Splices the generation task into the host's task graph.
//!
//! Without a packaged artifact the generation only has to be done by the time
//! `assemble` runs. With one, it has to run before compilation so its output is
//! validated and picked up by the package.

use serde::{Deserialize, Serialize};

use crate::diagnostics::{Event, Sink};
use crate::error::WiringError;
use crate::project::{Project, TaskId, conventions};

/// Names of the host tasks the generation task is wired against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HostTasks {
    pub compile: String,
    pub package: String,
    pub assemble: String,
}

impl Default for HostTasks {
    fn default() -> Self {
        Self {
            compile: conventions::COMPILE.to_string(),
            package: conventions::PACKAGE.to_string(),
            assemble: conventions::ASSEMBLE.to_string(),
        }
    }
}

/// Where the generation task ended up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum WiringOutcome {
    /// The generation task is disabled, no edge was added.
    Skipped,
    /// The generation task is a prerequisite of `dependent`.
    Wired { dependent: String },
}

fn lookup<P>(project: &P, name: &str) -> Result<TaskId, WiringError>
where
    P: Project + ?Sized,
{
    project
        .task(name)
        .ok_or_else(|| WiringError::MissingTask(name.to_string()))
}

/// Adds exactly one edge from the generation task, or none if it's disabled.
pub fn wire_generation_task<P, S>(
    project: &mut P,
    tasks: &HostTasks,
    generation: &str,
    sink: &mut S,
) -> Result<WiringOutcome, WiringError>
where
    P: Project + ?Sized,
    S: Sink + ?Sized,
{
    let generation_id = lookup(&*project, generation)?;

    if !project.task_node(generation_id).enabled {
        sink.emit(Event::TaskSkipped {
            task: generation.to_string(),
        });
        return Ok(WiringOutcome::Skipped);
    }

    let package = lookup(&*project, &tasks.package)?;
    let dependent = if project.task_node(package).enabled {
        &tasks.compile
    } else {
        &tasks.assemble
    };

    let dependent_id = lookup(&*project, dependent)?;
    project.depends_on(dependent_id, generation_id)?;

    sink.emit(Event::TaskWired {
        dependent: dependent.clone(),
        prerequisite: generation.to_string(),
    });

    Ok(WiringOutcome::Wired {
        dependent: dependent.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Diagnostics;
    use crate::project::HostProject;

    const GENERATE: &str = "smithyBuildJar";

    fn project(generation: bool, package: bool) -> HostProject {
        let mut project = HostProject::java_conventions("demo", "/work").unwrap();
        project.register_task(GENERATE, generation).unwrap();
        project.set_task_enabled("jar", package).unwrap();
        project
    }

    fn wire(project: &mut HostProject) -> Result<WiringOutcome, WiringError> {
        wire_generation_task(
            project,
            &HostTasks::default(),
            GENERATE,
            &mut Diagnostics::new(),
        )
    }

    #[test]
    fn test_package_enabled_wires_compile() {
        let mut project = project(true, true);
        let outcome = wire(&mut project).unwrap();

        assert_eq!(
            outcome,
            WiringOutcome::Wired {
                dependent: "compileJava".into()
            }
        );
        assert_eq!(project.prerequisites("compileJava"), vec![GENERATE]);
        assert!(!project.prerequisites("assemble").contains(&GENERATE));
    }

    #[test]
    fn test_package_disabled_wires_assemble() {
        let mut project = project(true, false);
        let outcome = wire(&mut project).unwrap();

        assert_eq!(
            outcome,
            WiringOutcome::Wired {
                dependent: "assemble".into()
            }
        );
        assert!(project.prerequisites("assemble").contains(&GENERATE));
        assert!(project.prerequisites("compileJava").is_empty());
    }

    #[test]
    fn test_disabled_generation_adds_nothing() {
        for package in [true, false] {
            let mut project = project(false, package);
            let edges = project.tasks.edge_count();

            assert_eq!(wire(&mut project).unwrap(), WiringOutcome::Skipped);
            assert_eq!(project.tasks.edge_count(), edges);
        }
    }

    #[test]
    fn test_exactly_one_edge() {
        let mut project = project(true, true);
        let edges = project.tasks.edge_count();
        wire(&mut project).unwrap();
        assert_eq!(project.tasks.edge_count(), edges + 1);

        // Wiring again finds the edge in place.
        wire(&mut project).unwrap();
        assert_eq!(project.tasks.edge_count(), edges + 1);
    }

    #[test]
    fn test_missing_host_tasks() {
        let mut project = HostProject::new("demo", "/work");
        assert!(matches!(
            wire(&mut project),
            Err(WiringError::MissingTask(name)) if name == GENERATE
        ));

        project.register_task(GENERATE, true).unwrap();
        assert!(matches!(
            wire(&mut project),
            Err(WiringError::MissingTask(name)) if name == "jar"
        ));

        project.register_task("jar", false).unwrap();
        assert!(matches!(
            wire(&mut project),
            Err(WiringError::MissingTask(name)) if name == "assemble"
        ));
    }

    #[test]
    fn test_disabled_generation_does_not_need_host_tasks() {
        let mut project = HostProject::new("demo", "/work");
        project.register_task(GENERATE, false).unwrap();
        assert_eq!(wire(&mut project).unwrap(), WiringOutcome::Skipped);
    }
}
