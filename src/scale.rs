//! Yield scaling.
//!
//! Scaling never touches the input recipe: it returns a new [`ScaledRecipe`] so the original
//! stays available, e.g. to reset the scale back to 1.

use crate::error::ArgumentError;
use crate::quantity::QuantityRange;
use crate::recipe::{ProductType, Recipe, RecipeStep};
use serde::Serialize;

/// A validated, strictly positive multiplier for a recipe's yield.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
pub struct ScaleFactor(f64);

impl ScaleFactor {
    pub const ONE: ScaleFactor = ScaleFactor(1.0);

    /// The granularity of the usual stepped scale control.
    pub const DEFAULT_STEP: f64 = 0.25;

    pub fn new(value: f64) -> Result<Self, ArgumentError> {
        if value.is_finite() && value > 0.0 {
            Ok(Self(value))
        } else {
            Err(ArgumentError::NonPositiveScale(value))
        }
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// Moves up by one `step`, snapping to the step grid.
    pub fn step_up(&self, step: f64) -> Result<Self, ArgumentError> {
        let step = Self::new(step)?.0;
        Self::new(((self.0 / step).floor() + 1.0) * step)
    }

    /// Moves down by one `step`, snapping to the step grid. Never goes below one `step`.
    pub fn step_down(&self, step: f64) -> Result<Self, ArgumentError> {
        let step = Self::new(step)?.0;
        let below = ((self.0 / step).ceil() - 1.0) * step;
        Self::new(below.max(step))
    }
}

impl Default for ScaleFactor {
    fn default() -> Self {
        Self::ONE
    }
}

/// How scaled counts of physical things (instruments, vessels) are rounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CountRounding {
    /// Round up so a scaled recipe never asks for too few tools.
    #[default]
    Ceiling,
    /// Keep the fractional result.
    Exact,
}

/// A recipe with every quantity multiplied by a scale factor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScaledRecipe {
    pub factor: ScaleFactor,
    /// The scaled copy. Its `estimated_portions` holds the scaled yield.
    pub recipe: Recipe,
}

impl ScaledRecipe {
    /// Scaled minimum (and maximum, if any) number of portions.
    pub fn portions(&self) -> QuantityRange {
        self.recipe.estimated_portions
    }

    /// "serving" when the scaled minimum is exactly one, "servings" otherwise.
    pub fn portion_label(&self) -> &str {
        self.recipe
            .portion_name
            .for_amount(self.recipe.estimated_portions.min)
    }

    /// e.g. "2-3 servings".
    pub fn yield_text(&self) -> String {
        format!("{} {}", self.portions(), self.portion_label())
    }
}

/// Scales recipes according to its options.
#[derive(Debug, Clone, Default)]
pub struct Scaler {
    count_rounding: CountRounding,
}

#[derive(Debug, Clone, Default)]
pub struct ScalerBuilder {
    count_rounding: CountRounding,
}

impl ScalerBuilder {
    pub fn count_rounding(mut self, rounding: CountRounding) -> Self {
        self.count_rounding = rounding;
        self
    }

    pub fn build(self) -> Scaler {
        Scaler {
            count_rounding: self.count_rounding,
        }
    }
}

impl Scaler {
    pub fn builder() -> ScalerBuilder {
        ScalerBuilder::default()
    }

    /// Scales `recipe` and its supporting recipes by `factor`.
    ///
    /// Ingredient and ingredient-product amounts are multiplied exactly. Instrument and vessel
    /// counts are multiplied and then rounded per [`CountRounding`]. `to_taste` ingredients,
    /// times and temperatures are left alone. A factor of exactly 1 returns an equal recipe.
    pub fn scale(&self, recipe: &Recipe, factor: ScaleFactor) -> ScaledRecipe {
        ScaledRecipe {
            factor,
            recipe: self.scale_recipe(recipe, factor.value()),
        }
    }

    /// Like [`Scaler::scale`] but takes a raw factor, rejecting non-positive values.
    pub fn scale_by(&self, recipe: &Recipe, factor: f64) -> Result<ScaledRecipe, ArgumentError> {
        Ok(self.scale(recipe, ScaleFactor::new(factor)?))
    }

    fn scale_recipe(&self, recipe: &Recipe, factor: f64) -> Recipe {
        let mut scaled = recipe.clone();
        if factor == 1.0 {
            return scaled;
        }
        scaled.estimated_portions = recipe.estimated_portions.scaled_unchecked(factor);
        for step in &mut scaled.steps {
            self.scale_step(step, factor);
        }
        scaled.supporting_recipes = recipe
            .supporting_recipes
            .iter()
            .map(|r| self.scale_recipe(r, factor))
            .collect();
        scaled
    }

    fn scale_step(&self, step: &mut RecipeStep, factor: f64) {
        for ingredient in &mut step.ingredients {
            if !ingredient.to_taste {
                ingredient.quantity = ingredient.quantity.scaled_unchecked(factor);
            }
        }
        for instrument in &mut step.instruments {
            instrument.quantity = self.scale_count(&instrument.quantity, factor);
        }
        for vessel in &mut step.vessels {
            vessel.quantity = self.scale_count(&vessel.quantity, factor);
        }
        for product in &mut step.products {
            if let Some(quantity) = product.quantity {
                product.quantity = Some(match product.kind {
                    ProductType::Ingredient => quantity.scaled_unchecked(factor),
                    ProductType::Instrument | ProductType::Vessel => {
                        self.scale_count(&quantity, factor)
                    }
                });
            }
        }
    }

    fn scale_count(&self, quantity: &QuantityRange, factor: f64) -> QuantityRange {
        let scaled = quantity.scaled_unchecked(factor);
        match self.count_rounding {
            CountRounding::Ceiling => scaled.ceil(),
            CountRounding::Exact => scaled,
        }
    }
}

/// Scales with the default options.
pub fn scale_recipe(recipe: &Recipe, factor: f64) -> Result<ScaledRecipe, ArgumentError> {
    Scaler::default().scale_by(recipe, factor)
}

