use std::collections::HashMap;

use petgraph::Direction;
use petgraph::Graph;
use petgraph::algo::has_path_connecting;
use petgraph::graph::NodeIndex;

use crate::error::WiringError;

/// Typed handle to a task registered in a [`TaskGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(pub(crate) NodeIndex);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskNode {
    pub name: String,
    pub enabled: bool,
}

/// The host's task dependency graph.
///
/// An edge `a -> b` means `b` depends on `a`, so `a` has to run first.
#[derive(Debug, Default)]
pub struct TaskGraph {
    graph: Graph<TaskNode, ()>,
    names: HashMap<String, NodeIndex>,
}

impl TaskGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        name: impl Into<String>,
        enabled: bool,
    ) -> Result<TaskId, WiringError> {
        let name = name.into();
        if self.names.contains_key(&name) {
            return Err(WiringError::DuplicateTask(name));
        }

        let index = self.graph.add_node(TaskNode {
            name: name.clone(),
            enabled,
        });
        self.names.insert(name, index);

        Ok(TaskId(index))
    }

    pub fn get(&self, name: &str) -> Option<TaskId> {
        self.names.get(name).copied().map(TaskId)
    }

    pub fn node(&self, id: TaskId) -> &TaskNode {
        &self.graph[id.0]
    }

    pub fn node_mut(&mut self, id: TaskId) -> &mut TaskNode {
        &mut self.graph[id.0]
    }

    /// Makes `dependent` depend on `prerequisite`.
    ///
    /// Returns `false` when the edge already existed. Edges closing a cycle are
    /// rejected and leave the graph as it was.
    pub fn depends_on(
        &mut self,
        dependent: TaskId,
        prerequisite: TaskId,
    ) -> Result<bool, WiringError> {
        if self.graph.contains_edge(prerequisite.0, dependent.0) {
            return Ok(false);
        }

        if dependent == prerequisite
            || has_path_connecting(&self.graph, dependent.0, prerequisite.0, None)
        {
            return Err(WiringError::Cycle {
                dependent: self.node(dependent).name.clone(),
                prerequisite: self.node(prerequisite).name.clone(),
            });
        }

        self.graph.add_edge(prerequisite.0, dependent.0, ());
        Ok(true)
    }

    /// Names of the direct prerequisites of a task, sorted.
    pub fn prerequisites(&self, id: TaskId) -> Vec<&str> {
        let mut names: Vec<_> = self
            .graph
            .neighbors_directed(id.0, Direction::Incoming)
            .map(|index| self.graph[index].name.as_str())
            .collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}
