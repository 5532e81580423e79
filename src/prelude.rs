//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and functions from the kondate crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use kondate::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let recipe = Recipe::from_json(&std::fs::read_to_string("path/to/recipe.json")?)?;
//! let diagram = render_recipe_diagram(&recipe, FlowDirection::TopBottom)?;
//! let halved = scale_recipe(&recipe, 0.5)?;
//!
//! println!("{}", diagram);
//! println!("{}", halved.yield_text());
//! # Ok(())
//! # }
//! ```

// Data model and ingestion
pub use crate::quantity::QuantityRange;
pub use crate::recipe::{
    IntoRecipe, PortionName, Preparation, ProductReference, ProductType, Recipe, RecipePrepTask,
    RecipeStep, RecipeStepIngredient, RecipeStepInstrument, RecipeStepProduct, RecipeStepVessel,
};

// Graph, rendering and scaling
pub use crate::graph::{RecipeGraph, StepDependency};
pub use crate::render::{DiagramKind, DiagramRenderer, FlowDirection, render_recipe_diagram};
pub use crate::scale::{CountRounding, ScaleFactor, ScaledRecipe, Scaler, scale_recipe};

// Checklists and authoring helpers
pub use crate::aggregate::{
    EquipmentEntry, IngredientEntry, determine_all_ingredients_for_recipes,
    determine_all_instruments_for_recipes, with_supporting_recipes,
};
pub use crate::suggest::{ProductSuggestion, available_products};
pub use crate::text::step_text;

// Error types
pub use crate::error::{ArgumentError, Error, RecipeConversionError, StructureError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
