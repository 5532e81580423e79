//! # Kondate - Recipe Graph, Diagram and Scaling Engine
//!
//! **Kondate** turns fully hydrated recipes into the derived views a meal-planning application
//! needs: a validated step dependency graph, a flow-chart description of that graph, scaled
//! copies of the recipe for a different yield, and equipment and shopping checklists across
//! several recipes. Every operation is a pure function of its inputs; recipes are never mutated.
//!
//! ## Core Workflow
//!
//! 1.  **Load Your Data**: Parse API JSON with [`Recipe::from_json`](recipe::Recipe::from_json),
//!     implement the `IntoRecipe` trait for your own format, or build a `Recipe` in code.
//! 2.  **Build the Graph**: [`RecipeGraph::build`](graph::RecipeGraph::build) links steps through
//!     the products they pass on and their explicit prerequisites, and rejects cycles.
//! 3.  **Render**: [`DiagramRenderer`](render::DiagramRenderer) writes the graph as flow-chart
//!     text for an external diagram library.
//! 4.  **Scale and Aggregate**: [`Scaler`](scale::Scaler) produces a scaled copy;
//!     the [`aggregate`] functions build checklists across recipes.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use kondate::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let json = std::fs::read_to_string("recipe.json")?;
//!     let recipe = Recipe::from_json(&json)?;
//!
//!     // Validate the step dependencies and walk them in order
//!     let graph = RecipeGraph::build(&recipe)?;
//!     println!("Steps in order: {:?}", graph.topological_order());
//!
//!     // Render a left-to-right flow chart
//!     let diagram = DiagramRenderer::builder()
//!         .direction(FlowDirection::LeftRight)
//!         .build()
//!         .render_with_graph(&recipe, &graph)?;
//!     println!("{}", diagram);
//!
//!     // Double the recipe
//!     let doubled = Scaler::default().scale(&recipe, ScaleFactor::new(2.0)?);
//!     println!("Makes {}", doubled.yield_text());
//!
//!     // Equipment checklist for the recipe and the recipes it builds on
//!     let recipes = with_supporting_recipes(&[&recipe]);
//!     for entry in determine_all_instruments_for_recipes(&recipes) {
//!         println!("{} x {}", entry.quantity(), entry.name());
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod aggregate;
pub mod error;
pub mod graph;
pub mod prelude;
pub mod quantity;
pub mod recipe;
pub mod render;
pub mod scale;
pub mod suggest;
pub mod text;
