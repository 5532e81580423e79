use itertools::Itertools;
use thiserror::Error;

/// Errors raised when a recipe's steps do not describe a valid dependency structure.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StructureError {
    #[error("Recipe '{recipe_id}' has no steps")]
    EmptyRecipe { recipe_id: String },

    #[error("Step index {index} appears more than once in recipe '{recipe_id}'")]
    DuplicateStepIndex { recipe_id: String, index: u32 },

    #[error("Product '{product_id}' is produced by both step {first} and step {second}")]
    DuplicateProductId {
        product_id: String,
        first: u32,
        second: u32,
    },

    #[error("Step {step} references product '{product_id}', which no step in the recipe produces")]
    UnknownProduct { step: u32, product_id: String },

    #[error(
        "Step {step} references product #{product} of step {producer}, but that product does not exist"
    )]
    UnknownProductIndex {
        step: u32,
        producer: u32,
        product: u32,
    },

    #[error("Step {step} depends on step {missing}, which is not part of the recipe")]
    UnknownStep { step: u32, missing: u32 },

    #[error("Step dependencies form a cycle: {}", .steps.iter().join(" -> "))]
    Cycle { steps: Vec<u32> },

    #[error(
        "Graph was built from recipe '{graph_recipe_id}' and does not match recipe '{recipe_id}'"
    )]
    GraphMismatch {
        recipe_id: String,
        graph_recipe_id: String,
    },
}

/// Errors raised when a caller hands the engine a value it cannot work with.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ArgumentError {
    #[error("Scale factor must be strictly positive, got {0}")]
    NonPositiveScale(f64),

    #[error("Quantity must be a finite, non-negative number, got {0}")]
    NonFiniteQuantity(f64),

    #[error("Quantity range is inverted: minimum {min} is greater than maximum {max}")]
    InvalidRange { min: f64, max: f64 },

    #[error("Step position {position} is out of range for a recipe with {len} steps")]
    StepOutOfRange { position: usize, len: usize },

    #[error("No step with index {0} in the recipe graph")]
    UnknownStep(u32),
}

/// Errors that can occur when converting the API wire format into a `kondate` `Recipe`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecipeConversionError {
    #[error("Failed to parse recipe JSON: {0}")]
    JsonParseError(String),

    #[error("Invalid recipe data: {0}")]
    ValidationError(String),

    #[error("Invalid quantity on {context}: {source}")]
    Quantity {
        context: String,
        source: ArgumentError,
    },
}

/// Umbrella error for callers that chain ingestion, graph building and scaling.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid recipe structure: {0}")]
    InvalidRecipeStructure(#[from] StructureError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(#[from] ArgumentError),

    #[error(transparent)]
    Conversion(#[from] RecipeConversionError),
}
