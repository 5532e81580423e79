use crate::quantity::QuantityRange;
use serde::Serialize;

/// A fully hydrated recipe: its steps, prep tasks and the recipes it builds on.
///
/// `steps` order is significant: it is the natural reading order of the recipe, while the
/// dependency order between steps is derived separately by [`crate::graph::RecipeGraph`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Recipe {
    pub id: String,
    pub name: String,
    pub description: String,
    pub source: String,
    pub portion_name: PortionName,
    pub estimated_portions: QuantityRange,
    pub steps: Vec<RecipeStep>,
    pub prep_tasks: Vec<RecipePrepTask>,
    pub supporting_recipes: Vec<Recipe>,
}

/// Singular and plural names for one portion, e.g. "serving" / "servings".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortionName {
    pub singular: String,
    pub plural: String,
}

impl Default for PortionName {
    fn default() -> Self {
        Self {
            singular: "portion".to_string(),
            plural: "portions".to_string(),
        }
    }
}

impl PortionName {
    pub fn new(singular: &str, plural: &str) -> Self {
        Self {
            singular: singular.to_string(),
            plural: plural.to_string(),
        }
    }

    /// Picks the singular form when `amount` rounds to exactly one.
    pub fn for_amount(&self, amount: f64) -> &str {
        if crate::quantity::clean_float(amount) == 1.0 {
            &self.singular
        } else {
            &self.plural
        }
    }
}

impl Recipe {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            estimated_portions: QuantityRange::exact(1.0),
            ..Default::default()
        }
    }

    pub fn with_portions(mut self, portions: QuantityRange, name: PortionName) -> Self {
        self.estimated_portions = portions;
        self.portion_name = name;
        self
    }

    pub fn with_step(mut self, step: RecipeStep) -> Self {
        self.steps.push(step);
        self
    }

    pub fn with_prep_task(mut self, task: RecipePrepTask) -> Self {
        self.prep_tasks.push(task);
        self
    }

    pub fn with_supporting_recipe(mut self, recipe: Recipe) -> Self {
        self.supporting_recipes.push(recipe);
        self
    }

    /// Position in `steps` of the step carrying `index`.
    pub fn position_of_step(&self, index: u32) -> Option<usize> {
        self.steps.iter().position(|s| s.index == index)
    }

    pub fn step_by_index(&self, index: u32) -> Option<&RecipeStep> {
        self.steps.iter().find(|s| s.index == index)
    }
}

/// The verb of a step, e.g. "dice" or "simmer".
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Preparation {
    pub id: String,
    pub name: String,
}

impl Preparation {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
        }
    }
}

/// One instruction unit with its own inputs and outputs.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RecipeStep {
    pub id: String,
    pub index: u32,
    pub belongs_to_recipe: String,
    pub preparation: Preparation,
    pub explicit_instructions: String,
    pub condition_expression: String,
    pub notes: String,
    pub optional: bool,
    /// Step indices that must complete before this one, regardless of products.
    pub prerequisite_steps: Vec<u32>,
    pub ingredients: Vec<RecipeStepIngredient>,
    pub instruments: Vec<RecipeStepInstrument>,
    pub vessels: Vec<RecipeStepVessel>,
    pub products: Vec<RecipeStepProduct>,
    /// Seconds.
    pub estimated_time: Option<QuantityRange>,
    /// Degrees Celsius.
    pub temperature: Option<QuantityRange>,
}

impl RecipeStep {
    pub fn new(id: &str, index: u32, preparation: Preparation) -> Self {
        Self {
            id: id.to_string(),
            index,
            preparation,
            ..Default::default()
        }
    }

    pub fn with_ingredient(mut self, ingredient: RecipeStepIngredient) -> Self {
        self.ingredients.push(ingredient);
        self
    }

    pub fn with_instrument(mut self, instrument: RecipeStepInstrument) -> Self {
        self.instruments.push(instrument);
        self
    }

    pub fn with_vessel(mut self, vessel: RecipeStepVessel) -> Self {
        self.vessels.push(vessel);
        self
    }

    pub fn with_product(mut self, mut product: RecipeStepProduct) -> Self {
        product.belongs_to_recipe_step = self.id.clone();
        product.index = self.products.len() as u32;
        self.products.push(product);
        self
    }

    pub fn with_prerequisite(mut self, step_index: u32) -> Self {
        self.prerequisite_steps.push(step_index);
        self
    }

    pub fn with_instructions(mut self, instructions: &str) -> Self {
        self.explicit_instructions = instructions.to_string();
        self
    }
}

/// Points an ingredient, instrument or vessel at a product made by another step.
///
/// Established once at ingestion time; consumers match on the variant instead of probing fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProductReference {
    /// By the product's persisted id.
    ById { product_id: String },
    /// By the producing step's index and the product's position within that step.
    ByIndex { step: u32, product: u32 },
}

impl ProductReference {
    pub fn by_id(product_id: &str) -> Self {
        ProductReference::ById {
            product_id: product_id.to_string(),
        }
    }

    pub fn by_index(step: u32, product: u32) -> Self {
        ProductReference::ByIndex { step, product }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidIngredient {
    pub id: String,
    pub name: String,
    pub plural_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MeasurementUnit {
    pub id: String,
    pub name: String,
    pub plural_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidInstrument {
    pub id: String,
    pub name: String,
    pub plural_name: String,
    pub display_in_summary_lists: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidVessel {
    pub id: String,
    pub name: String,
    pub plural_name: String,
    pub display_in_summary_lists: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RecipeStepIngredient {
    pub id: String,
    pub name: String,
    pub ingredient: Option<ValidIngredient>,
    pub measurement_unit: Option<MeasurementUnit>,
    pub quantity: QuantityRange,
    pub quantity_notes: String,
    /// The amount is up to the cook and is never scaled.
    pub to_taste: bool,
    pub optional: bool,
    pub option_index: u32,
    /// Which of the step's vessels the ingredient goes into.
    pub vessel_index: Option<u32>,
    pub product_of: Option<ProductReference>,
}

impl RecipeStepIngredient {
    pub fn new(name: &str, quantity: QuantityRange) -> Self {
        Self {
            name: name.to_string(),
            quantity,
            ..Default::default()
        }
    }

    pub fn from_product(name: &str, reference: ProductReference) -> Self {
        Self {
            name: name.to_string(),
            quantity: QuantityRange::exact(1.0),
            product_of: Some(reference),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RecipeStepInstrument {
    pub id: String,
    pub name: String,
    pub instrument: Option<ValidInstrument>,
    /// A count of physical tools.
    pub quantity: QuantityRange,
    pub optional: bool,
    pub option_index: u32,
    pub preference_rank: u32,
    pub product_of: Option<ProductReference>,
}

impl RecipeStepInstrument {
    pub fn new(instrument: ValidInstrument, quantity: QuantityRange) -> Self {
        Self {
            name: instrument.name.clone(),
            instrument: Some(instrument),
            quantity,
            ..Default::default()
        }
    }

    pub fn from_product(name: &str, reference: ProductReference) -> Self {
        Self {
            name: name.to_string(),
            quantity: QuantityRange::exact(1.0),
            product_of: Some(reference),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RecipeStepVessel {
    pub id: String,
    pub name: String,
    pub vessel: Option<ValidVessel>,
    /// e.g. "in", "on".
    pub vessel_preposition: String,
    pub quantity: QuantityRange,
    pub product_of: Option<ProductReference>,
}

impl RecipeStepVessel {
    pub fn new(vessel: ValidVessel, quantity: QuantityRange) -> Self {
        Self {
            name: vessel.name.clone(),
            vessel: Some(vessel),
            quantity,
            ..Default::default()
        }
    }

    pub fn from_product(name: &str, reference: ProductReference) -> Self {
        Self {
            name: name.to_string(),
            quantity: QuantityRange::exact(1.0),
            product_of: Some(reference),
            ..Default::default()
        }
    }
}

/// What kind of thing a step produces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductType {
    #[default]
    Ingredient,
    Instrument,
    Vessel,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RecipeStepProduct {
    pub id: String,
    pub belongs_to_recipe_step: String,
    pub index: u32,
    pub name: String,
    pub kind: ProductType,
    pub quantity: Option<QuantityRange>,
    pub measurement_unit: Option<MeasurementUnit>,
    pub quantity_notes: String,
    pub is_liquid: bool,
    pub is_waste: bool,
    pub compostable: bool,
    /// Seconds.
    pub storage_duration: Option<QuantityRange>,
    /// Degrees Celsius.
    pub storage_temperature: Option<QuantityRange>,
    /// Which of the producing step's vessels holds the product.
    pub contained_in_vessel_index: Option<u32>,
}

impl RecipeStepProduct {
    pub fn new(id: &str, name: &str, kind: ProductType) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            kind,
            ..Default::default()
        }
    }

    pub fn with_quantity(mut self, quantity: QuantityRange) -> Self {
        self.quantity = Some(quantity);
        self
    }
}

/// A group of steps that can be done ahead of time.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RecipePrepTask {
    pub id: String,
    pub name: String,
    pub notes: String,
    pub minimum_buffer_seconds: u32,
    pub maximum_buffer_seconds: u32,
    /// Ids of the steps in this task.
    pub step_ids: Vec<String>,
}
