use super::definition::*;
use super::wire::*;
use crate::error::RecipeConversionError;
use crate::quantity::QuantityRange;

/// A trait for data models that can be converted into a `kondate` [`Recipe`].
///
/// The API's JSON shape is supported out of the box through [`ApiRecipe`]. Implement this on
/// your own structs to feed the engine from another source.
///
/// # Example
///
/// ```rust,no_run
/// use kondate::error::RecipeConversionError;
/// use kondate::recipe::{IntoRecipe, Preparation, Recipe, RecipeStep};
///
/// struct Card { title: String, lines: Vec<String> }
///
/// impl IntoRecipe for Card {
///     fn into_recipe(self) -> Result<Recipe, RecipeConversionError> {
///         let mut recipe = Recipe::new("card", &self.title);
///         for (i, line) in self.lines.iter().enumerate() {
///             let step = RecipeStep::new(&format!("card-{i}"), i as u32, Preparation::new("", "do"))
///                 .with_instructions(line);
///             recipe = recipe.with_step(step);
///         }
///         Ok(recipe)
///     }
/// }
/// ```
pub trait IntoRecipe {
    /// Consumes the object and converts it into a recipe.
    fn into_recipe(self) -> Result<Recipe, RecipeConversionError>;
}

impl Recipe {
    /// Parses the API's JSON representation of a recipe.
    pub fn from_json(json: &str) -> Result<Recipe, RecipeConversionError> {
        let raw: ApiRecipe = serde_json::from_str(json)
            .map_err(|e| RecipeConversionError::JsonParseError(e.to_string()))?;
        raw.into_recipe()
    }
}

impl IntoRecipe for ApiRecipe {
    fn into_recipe(self) -> Result<Recipe, RecipeConversionError> {
        let estimated_portions = range(
            self.minimum_estimated_portions,
            self.maximum_estimated_portions,
            || format!("recipe '{}' portions", self.id),
        )?;

        let portion_name = match (
            self.portion_name.is_empty(),
            self.plural_portion_name.is_empty(),
        ) {
            (true, true) => PortionName::default(),
            (false, true) => PortionName::new(&self.portion_name, &self.portion_name),
            (true, false) => {
                PortionName::new(&self.plural_portion_name, &self.plural_portion_name)
            }
            (false, false) => PortionName::new(&self.portion_name, &self.plural_portion_name),
        };

        let steps = self
            .steps
            .into_iter()
            .map(convert_step)
            .collect::<Result<Vec<_>, _>>()?;

        let prep_tasks = self
            .prep_tasks
            .into_iter()
            .map(|task| RecipePrepTask {
                id: task.id,
                name: task.name,
                notes: task.notes,
                minimum_buffer_seconds: task.minimum_time_buffer_before_recipe_in_seconds,
                maximum_buffer_seconds: task.maximum_time_buffer_before_recipe_in_seconds,
                step_ids: task
                    .recipe_steps
                    .into_iter()
                    .map(|s| s.belongs_to_recipe_step)
                    .collect(),
            })
            .collect();

        let supporting_recipes = self
            .supporting_recipes
            .into_iter()
            .map(IntoRecipe::into_recipe)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Recipe {
            id: self.id,
            name: self.name,
            description: self.description,
            source: self.source,
            portion_name,
            estimated_portions,
            steps,
            prep_tasks,
            supporting_recipes,
        })
    }
}

fn convert_step(raw: ApiRecipeStep) -> Result<RecipeStep, RecipeConversionError> {
    let step_index = raw.index;

    let ingredients = raw
        .ingredients
        .into_iter()
        .map(|i| {
            Ok(RecipeStepIngredient {
                quantity: range(i.minimum_quantity, i.maximum_quantity, || {
                    format!("ingredient '{}' of step {}", i.name, step_index)
                })?,
                product_of: product_reference(
                    i.recipe_step_product_id,
                    i.product_of_recipe_step_index,
                    i.product_of_recipe_step_product_index,
                    step_index,
                )?,
                ingredient: i.ingredient.map(|v| ValidIngredient {
                    id: v.id,
                    name: v.name,
                    plural_name: v.plural_name,
                }),
                measurement_unit: i.measurement_unit.map(convert_unit),
                id: i.id,
                name: i.name,
                quantity_notes: i.quantity_notes,
                to_taste: i.to_taste,
                optional: i.optional,
                option_index: i.option_index,
                vessel_index: i.vessel_index,
            })
        })
        .collect::<Result<Vec<_>, RecipeConversionError>>()?;

    let instruments = raw
        .instruments
        .into_iter()
        .map(|i| {
            Ok(RecipeStepInstrument {
                quantity: range(i.minimum_quantity, i.maximum_quantity, || {
                    format!("instrument '{}' of step {}", i.name, step_index)
                })?,
                product_of: product_reference(
                    i.recipe_step_product_id,
                    i.product_of_recipe_step_index,
                    i.product_of_recipe_step_product_index,
                    step_index,
                )?,
                instrument: i.instrument.map(|v| ValidInstrument {
                    id: v.id,
                    name: v.name,
                    plural_name: v.plural_name,
                    display_in_summary_lists: v.display_in_summary_lists,
                }),
                id: i.id,
                name: i.name,
                optional: i.optional,
                option_index: i.option_index,
                preference_rank: i.preference_rank,
            })
        })
        .collect::<Result<Vec<_>, RecipeConversionError>>()?;

    let vessels = raw
        .vessels
        .into_iter()
        .map(|v| {
            Ok(RecipeStepVessel {
                quantity: range(v.minimum_quantity, v.maximum_quantity, || {
                    format!("vessel '{}' of step {}", v.name, step_index)
                })?,
                product_of: product_reference(
                    v.recipe_step_product_id,
                    v.product_of_recipe_step_index,
                    v.product_of_recipe_step_product_index,
                    step_index,
                )?,
                vessel: v.vessel.map(|e| ValidVessel {
                    id: e.id,
                    name: e.name,
                    plural_name: e.plural_name,
                    display_in_summary_lists: e.display_in_summary_lists,
                }),
                id: v.id,
                name: v.name,
                vessel_preposition: v.vessel_preposition,
            })
        })
        .collect::<Result<Vec<_>, RecipeConversionError>>()?;

    let products = raw
        .products
        .into_iter()
        .enumerate()
        .map(|(position, p)| {
            let context = || format!("product '{}' of step {}", p.name, step_index);
            Ok(RecipeStepProduct {
                kind: product_type(&p.kind)?,
                quantity: optional_range(p.minimum_quantity, p.maximum_quantity, context)?,
                storage_duration: optional_range(
                    p.minimum_storage_duration_in_seconds,
                    p.maximum_storage_duration_in_seconds,
                    context,
                )?,
                storage_temperature: optional_temperature(
                    p.minimum_storage_temperature_in_celsius,
                    p.maximum_storage_temperature_in_celsius,
                ),
                index: p.index.unwrap_or(position as u32),
                measurement_unit: p.measurement_unit.map(convert_unit),
                id: p.id,
                belongs_to_recipe_step: p.belongs_to_recipe_step,
                name: p.name,
                quantity_notes: p.quantity_notes,
                is_liquid: p.is_liquid,
                is_waste: p.is_waste,
                compostable: p.compostable,
                contained_in_vessel_index: p.contained_in_vessel_index,
            })
        })
        .collect::<Result<Vec<_>, RecipeConversionError>>()?;

    let estimated_time = optional_range(
        raw.minimum_estimated_time_in_seconds,
        raw.maximum_estimated_time_in_seconds,
        || format!("estimated time of step {}", step_index),
    )?;

    Ok(RecipeStep {
        id: raw.id,
        index: step_index,
        belongs_to_recipe: raw.belongs_to_recipe,
        preparation: Preparation {
            id: raw.preparation.id,
            name: raw.preparation.name,
        },
        explicit_instructions: raw.explicit_instructions,
        condition_expression: raw.condition_expression,
        notes: raw.notes,
        optional: raw.optional,
        prerequisite_steps: raw.prerequisite_steps,
        ingredients,
        instruments,
        vessels,
        products,
        estimated_time,
        temperature: optional_temperature(
            raw.minimum_temperature_in_celsius,
            raw.maximum_temperature_in_celsius,
        ),
    })
}

fn convert_unit(raw: ApiMeasurementUnit) -> MeasurementUnit {
    MeasurementUnit {
        id: raw.id,
        name: raw.name,
        plural_name: raw.plural_name,
    }
}

fn product_type(raw: &str) -> Result<ProductType, RecipeConversionError> {
    match raw {
        "" | "ingredient" => Ok(ProductType::Ingredient),
        "instrument" => Ok(ProductType::Instrument),
        "vessel" => Ok(ProductType::Vessel),
        other => Err(RecipeConversionError::ValidationError(format!(
            "unknown product type '{}'",
            other
        ))),
    }
}

/// An id wins over an index pair. A half-specified index pair is rejected.
fn product_reference(
    product_id: Option<String>,
    step: Option<u32>,
    product: Option<u32>,
    consumer: u32,
) -> Result<Option<ProductReference>, RecipeConversionError> {
    if let Some(product_id) = product_id.filter(|id| !id.is_empty()) {
        return Ok(Some(ProductReference::ById { product_id }));
    }
    match (step, product) {
        (Some(step), Some(product)) => Ok(Some(ProductReference::ByIndex { step, product })),
        (None, None) => Ok(None),
        _ => Err(RecipeConversionError::ValidationError(format!(
            "step {} has a product reference with only one of productOfRecipeStepIndex and productOfRecipeStepProductIndex",
            consumer
        ))),
    }
}

fn range(
    min: f64,
    max: Option<f64>,
    context: impl Fn() -> String,
) -> Result<QuantityRange, RecipeConversionError> {
    QuantityRange::new(min, max).map_err(|source| RecipeConversionError::Quantity {
        context: context(),
        source,
    })
}

fn optional_range(
    min: Option<f64>,
    max: Option<f64>,
    context: impl Fn() -> String,
) -> Result<Option<QuantityRange>, RecipeConversionError> {
    match min {
        Some(min) => range(min, max, context).map(Some),
        None => Ok(None),
    }
}

// Temperatures may be negative, so they skip the amount checks.
fn optional_temperature(min: Option<f64>, max: Option<f64>) -> Option<QuantityRange> {
    min.map(|min| QuantityRange { min, max })
}
