//! The step dependency graph of a recipe.
//!
//! An edge `A -> B` means step `A` must be finished before step `B` can start, either because
//! `B` uses something `A` produces or because `B` lists `A` as a prerequisite.

use crate::error::{ArgumentError, StructureError};
use crate::recipe::Recipe;
use ahash::{AHashMap, AHashSet};
use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::VecDeque;

mod builder;
mod cycle;

use builder::GraphBuilder;

/// A step in the graph. Nodes are created in the recipe's step order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepNode {
    /// Position in `Recipe::steps`.
    pub position: usize,
    pub index: u32,
    pub id: String,
}

/// Everything one step hands to another.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepDependency {
    pub ingredients: Vec<String>,
    pub instruments: Vec<String>,
    pub vessels: Vec<String>,
    /// The consumer lists the producer as a prerequisite.
    pub explicit: bool,
}

impl StepDependency {
    /// True when no product flows along the edge.
    pub fn is_ordering_only(&self) -> bool {
        self.ingredients.is_empty() && self.instruments.is_empty() && self.vessels.is_empty()
    }
}

/// A validated, acyclic view of a recipe's step dependencies.
///
/// Holds step indices, never copies of step data. Rebuild it whenever the recipe changes.
#[derive(Debug, Clone)]
pub struct RecipeGraph {
    recipe_id: String,
    graph: DiGraph<StepNode, StepDependency>,
    nodes: AHashMap<u32, NodeIndex>,
    order: Vec<u32>,
}

impl RecipeGraph {
    /// Builds the graph and checks it is acyclic.
    ///
    /// Fails on an empty recipe, duplicate step indices, references to products or steps that
    /// do not exist, and dependency cycles. A cycle error lists the step indices on the loop.
    pub fn build(recipe: &Recipe) -> Result<Self, StructureError> {
        let (graph, nodes) = GraphBuilder::new(recipe).build()?;

        if let Some(cycle) = cycle::find_cycle(&graph) {
            return Err(StructureError::Cycle {
                steps: cycle.into_iter().map(|n| graph[n].index).collect(),
            });
        }

        let order = cycle::topological_order(&graph)
            .into_iter()
            .map(|n| graph[n].index)
            .collect();

        Ok(Self {
            recipe_id: recipe.id.clone(),
            graph,
            nodes,
            order,
        })
    }

    pub fn recipe_id(&self) -> &str {
        &self.recipe_id
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// All steps, in recipe order.
    pub fn steps(&self) -> impl Iterator<Item = &StepNode> {
        self.graph.node_weights()
    }

    /// Step indices such that every edge points from an earlier to a later entry.
    pub fn topological_order(&self) -> &[u32] {
        &self.order
    }

    /// All edges as `(producer, consumer, dependency)`, sorted by the steps' positions.
    pub fn edges(&self) -> Vec<(u32, u32, &StepDependency)> {
        let mut edges: Vec<_> = self
            .graph
            .edge_references()
            .map(|e| (e.source(), e.target(), e.weight()))
            .collect();
        edges.sort_by_key(|(source, target, _)| (source.index(), target.index()));
        edges
            .into_iter()
            .map(|(source, target, weight)| {
                (self.graph[source].index, self.graph[target].index, weight)
            })
            .collect()
    }

    /// What `from` hands to `to`, if they are directly connected.
    pub fn dependency(&self, from: u32, to: u32) -> Option<&StepDependency> {
        let from = *self.nodes.get(&from)?;
        let to = *self.nodes.get(&to)?;
        self.graph
            .find_edge(from, to)
            .map(|edge| &self.graph[edge])
    }

    /// Position in `Recipe::steps` of the step with `index`.
    pub fn position_of(&self, index: u32) -> Option<usize> {
        self.nodes.get(&index).map(|n| n.index())
    }

    /// Steps that feed directly into `step`, in recipe order.
    pub fn predecessors(&self, step: u32) -> Result<Vec<u32>, ArgumentError> {
        self.neighbors(step, Direction::Incoming)
    }

    /// Steps fed directly by `step`, in recipe order.
    pub fn successors(&self, step: u32) -> Result<Vec<u32>, ArgumentError> {
        self.neighbors(step, Direction::Outgoing)
    }

    /// Every step `step` transitively depends on, in recipe order.
    pub fn all_predecessors(&self, step: u32) -> Result<Vec<u32>, ArgumentError> {
        let start = self.node(step)?;
        let mut seen = AHashSet::new();
        let mut queue = VecDeque::from([start]);
        while let Some(node) = queue.pop_front() {
            for previous in self.graph.neighbors_directed(node, Direction::Incoming) {
                if seen.insert(previous) {
                    queue.push_back(previous);
                }
            }
        }
        let mut found: Vec<NodeIndex> = seen.into_iter().collect();
        found.sort_unstable();
        Ok(found.into_iter().map(|n| self.graph[n].index).collect())
    }

    /// True when every step `step` depends on has been completed.
    pub fn is_ready(&self, step: u32, completed: &AHashSet<u32>) -> Result<bool, ArgumentError> {
        Ok(self
            .all_predecessors(step)?
            .iter()
            .all(|p| completed.contains(p)))
    }

    /// Steps not yet completed whose dependencies all are, in topological order.
    pub fn ready_steps(&self, completed: &AHashSet<u32>) -> Vec<u32> {
        self.order
            .iter()
            .copied()
            .filter(|step| !completed.contains(step))
            .filter(|step| self.is_ready(*step, completed).unwrap_or(false))
            .collect()
    }

    fn node(&self, step: u32) -> Result<NodeIndex, ArgumentError> {
        self.nodes
            .get(&step)
            .copied()
            .ok_or(ArgumentError::UnknownStep(step))
    }

    fn neighbors(&self, step: u32, direction: Direction) -> Result<Vec<u32>, ArgumentError> {
        let node = self.node(step)?;
        let mut found: Vec<NodeIndex> = self.graph.neighbors_directed(node, direction).collect();
        found.sort_unstable();
        found.dedup();
        Ok(found.into_iter().map(|n| self.graph[n].index).collect())
    }
}
