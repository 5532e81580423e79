//! Flow-chart rendering of recipe graphs.
//!
//! Produces Mermaid flow-chart text. Output is a pure function of the recipe and the renderer's
//! options, so the same input always yields byte-identical text.

use crate::error::StructureError;
use crate::graph::RecipeGraph;
use crate::recipe::{Recipe, RecipeStep};
use crate::text::{condense, english_list, format_duration};
use ahash::AHashSet;
use itertools::Itertools;
use std::fmt;
use std::str::FromStr;

mod escape;

pub use escape::{escape_label, sanitize_id};

/// Layout direction of the chart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FlowDirection {
    #[default]
    TopBottom,
    LeftRight,
    BottomTop,
    RightLeft,
}

impl FlowDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlowDirection::TopBottom => "TB",
            FlowDirection::LeftRight => "LR",
            FlowDirection::BottomTop => "BT",
            FlowDirection::RightLeft => "RL",
        }
    }
}

impl fmt::Display for FlowDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FlowDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "TB" | "TD" => Ok(FlowDirection::TopBottom),
            "LR" => Ok(FlowDirection::LeftRight),
            "BT" => Ok(FlowDirection::BottomTop),
            "RL" => Ok(FlowDirection::RightLeft),
            other => Err(format!("unknown flow direction '{}'", other)),
        }
    }
}

/// The chart keyword to open the diagram with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DiagramKind {
    #[default]
    Flowchart,
    Graph,
}

impl DiagramKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagramKind::Flowchart => "flowchart",
            DiagramKind::Graph => "graph",
        }
    }
}

/// Renders recipes to flow-chart text.
#[derive(Debug, Clone)]
pub struct DiagramRenderer {
    direction: FlowDirection,
    kind: DiagramKind,
    max_label_ingredients: usize,
    max_label_chars: usize,
}

impl Default for DiagramRenderer {
    fn default() -> Self {
        DiagramRenderer::builder().build()
    }
}

pub struct DiagramRendererBuilder {
    direction: FlowDirection,
    kind: DiagramKind,
    max_label_ingredients: usize,
    max_label_chars: usize,
}

impl DiagramRendererBuilder {
    pub fn direction(mut self, direction: FlowDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn kind(mut self, kind: DiagramKind) -> Self {
        self.kind = kind;
        self
    }

    /// Past this many ingredients a node label lists the first few and "etc...".
    pub fn max_label_ingredients(mut self, count: usize) -> Self {
        self.max_label_ingredients = count.max(1);
        self
    }

    /// Explicit instructions in node labels are cut to this many characters.
    pub fn max_label_chars(mut self, count: usize) -> Self {
        self.max_label_chars = count.max(4);
        self
    }

    pub fn build(self) -> DiagramRenderer {
        DiagramRenderer {
            direction: self.direction,
            kind: self.kind,
            max_label_ingredients: self.max_label_ingredients,
            max_label_chars: self.max_label_chars,
        }
    }
}

impl DiagramRenderer {
    pub fn builder() -> DiagramRendererBuilder {
        DiagramRendererBuilder {
            direction: FlowDirection::default(),
            kind: DiagramKind::default(),
            max_label_ingredients: 3,
            max_label_chars: 60,
        }
    }

    pub fn direction(&self) -> FlowDirection {
        self.direction
    }

    /// Builds the recipe's graph and renders it. Cycles and dangling references are returned as
    /// errors, never rendered partially.
    pub fn render(&self, recipe: &Recipe) -> Result<String, StructureError> {
        let graph = RecipeGraph::build(recipe)?;
        self.render_with_graph(recipe, &graph)
    }

    /// Renders `recipe` using a graph already built from it.
    ///
    /// Supporting recipes are drawn first, each in its own subgraph; their graphs are built here.
    /// A graph built from a different recipe, or from an earlier version of this one, is
    /// rejected.
    pub fn render_with_graph(
        &self,
        recipe: &Recipe,
        graph: &RecipeGraph,
    ) -> Result<String, StructureError> {
        if !graph_matches(recipe, graph) {
            return Err(StructureError::GraphMismatch {
                recipe_id: recipe.id.clone(),
                graph_recipe_id: graph.recipe_id().to_string(),
            });
        }

        let mut lines = vec![format!("{} {};", self.kind.as_str(), self.direction)];
        let mut ids = SubgraphIds::default();
        let prefix = ids.claim(&recipe.id);
        let mut seen = AHashSet::new();
        self.render_supporting(recipe, &mut lines, &mut seen, &mut ids)?;
        self.render_recipe(recipe, graph, &prefix, &mut lines, &mut ids);

        let mut output = lines.join("\n");
        output.push('\n');
        Ok(output)
    }

    fn render_supporting(
        &self,
        recipe: &Recipe,
        lines: &mut Vec<String>,
        seen: &mut AHashSet<String>,
        ids: &mut SubgraphIds,
    ) -> Result<(), StructureError> {
        seen.insert(recipe.id.clone());
        for supporting in &recipe.supporting_recipes {
            if seen.contains(&supporting.id) {
                continue;
            }
            let graph = RecipeGraph::build(supporting)?;
            self.render_supporting(supporting, lines, seen, ids)?;
            let prefix = ids.claim(&supporting.id);
            self.render_recipe(supporting, &graph, &prefix, lines, ids);
        }
        Ok(())
    }

    fn render_recipe(
        &self,
        recipe: &Recipe,
        graph: &RecipeGraph,
        prefix: &str,
        lines: &mut Vec<String>,
        ids: &mut SubgraphIds,
    ) {
        let node_id = |position: usize| format!("{}_Step{}", prefix, position);

        for (position, step) in recipe.steps.iter().enumerate() {
            lines.push(format!(
                "{}[\"{}\"];",
                node_id(position),
                escape_label(&self.step_label(step))
            ));
        }

        for (from, to, dependency) in graph.edges() {
            let (Some(from), Some(to)) = (graph.position_of(from), graph.position_of(to)) else {
                continue;
            };
            let (from, to) = (node_id(from), node_id(to));
            if !dependency.ingredients.is_empty() {
                lines.push(format!(
                    "{} --->|{}| {};",
                    from,
                    escape_label(&english_list(&dependency.ingredients)),
                    to
                ));
            }
            if !dependency.instruments.is_empty() {
                lines.push(format!(
                    "{} ===>|{}| {};",
                    from,
                    escape_label(&english_list(&dependency.instruments)),
                    to
                ));
            }
            if !dependency.vessels.is_empty() {
                lines.push(format!(
                    "{} -.->|{}| {};",
                    from,
                    escape_label(&english_list(&dependency.vessels)),
                    to
                ));
            }
            if dependency.is_ordering_only() {
                lines.push(format!("{} --> {};", from, to));
            }
        }

        lines.push(format!(
            "subgraph {} [\"{}\"]",
            prefix,
            escape_label(&recipe.name)
        ));
        lines.push(format!("direction {}", self.direction));
        for position in 0..recipe.steps.len() {
            lines.push(format!("{};", node_id(position)));
        }

        for (i, task) in recipe.prep_tasks.iter().enumerate() {
            let label = if task.maximum_buffer_seconds == 0 {
                format!("prep task: {}", task.name)
            } else {
                format!(
                    "(up to {} in advance)",
                    format_duration(task.maximum_buffer_seconds)
                )
            };
            let task_id = ids.claim(&format!("{}_{}", prefix, i));
            lines.push(format!(
                "subgraph {} [\"{}\"]",
                task_id,
                escape_label(&label)
            ));
            lines.push(format!("direction {}", self.direction));
            for step_id in &task.step_ids {
                if let Some(position) = recipe.steps.iter().position(|s| &s.id == step_id) {
                    lines.push(format!("{};", node_id(position)));
                }
            }
            lines.push("end".to_string());
        }

        lines.push("end".to_string());
    }

    /// "{n}. {preparation} {ingredients}", or the condensed explicit instructions.
    fn step_label(&self, step: &RecipeStep) -> String {
        let number = step.index + 1;
        if !step.explicit_instructions.trim().is_empty() {
            return format!(
                "{}. {}",
                number,
                condense(&step.explicit_instructions, self.max_label_chars)
            );
        }

        let names: Vec<&str> = step
            .ingredients
            .iter()
            .filter(|i| i.ingredient.is_some() || i.product_of.is_some())
            .map(|i| match &i.ingredient {
                Some(valid) if i.name.is_empty() => valid.name.as_str(),
                _ => i.name.as_str(),
            })
            .collect();

        let ingredients = if names.len() > self.max_label_ingredients {
            names
                .iter()
                .take(self.max_label_ingredients - 1)
                .chain(std::iter::once(&"etc..."))
                .join(", ")
        } else {
            english_list(&names)
        };

        format!("{}. {} {}", number, step.preparation.name, ingredients)
            .trim_end()
            .to_string()
    }
}

/// True when `graph` was built from this exact list of steps.
fn graph_matches(recipe: &Recipe, graph: &RecipeGraph) -> bool {
    graph.recipe_id() == recipe.id
        && graph.node_count() == recipe.steps.len()
        && graph
            .steps()
            .zip(&recipe.steps)
            .all(|(node, step)| node.index == step.index && node.id == step.id)
}

/// Subgraph identifiers handed out so far in one diagram.
///
/// Distinct recipe ids can sanitize to the same identifier ("a-b" and "a_b"); later claims get a
/// numeric suffix so no two subgraphs share nodes.
#[derive(Default)]
struct SubgraphIds {
    used: AHashSet<String>,
}

impl SubgraphIds {
    fn claim(&mut self, id: &str) -> String {
        let base = sanitize_id(id);
        let mut candidate = base.clone();
        let mut suffix = 2;
        while self.used.contains(&candidate) {
            candidate = format!("{}_{}", base, suffix);
            suffix += 1;
        }
        self.used.insert(candidate.clone());
        candidate
    }
}

/// Renders `recipe` with default options in the given direction.
pub fn render_recipe_diagram(
    recipe: &Recipe,
    direction: FlowDirection,
) -> Result<String, StructureError> {
    DiagramRenderer::builder()
        .direction(direction)
        .build()
        .render(recipe)
}
