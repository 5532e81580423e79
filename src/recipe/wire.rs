//! Structs mirroring the REST API's JSON for recipes.
//!
//! These only exist to be deserialized and converted into the domain model through
//! [`IntoRecipe`](super::IntoRecipe). Every field defaults so partial payloads still parse.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiRecipe {
    pub id: String,
    pub name: String,
    pub description: String,
    pub source: String,
    pub portion_name: String,
    pub plural_portion_name: String,
    pub minimum_estimated_portions: f64,
    pub maximum_estimated_portions: Option<f64>,
    pub steps: Vec<ApiRecipeStep>,
    pub prep_tasks: Vec<ApiRecipePrepTask>,
    pub supporting_recipes: Vec<ApiRecipe>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiRecipeStep {
    pub id: String,
    pub index: u32,
    pub belongs_to_recipe: String,
    pub preparation: ApiPreparation,
    pub explicit_instructions: String,
    pub condition_expression: String,
    pub notes: String,
    pub optional: bool,
    pub prerequisite_steps: Vec<u32>,
    pub ingredients: Vec<ApiRecipeStepIngredient>,
    pub instruments: Vec<ApiRecipeStepInstrument>,
    pub vessels: Vec<ApiRecipeStepVessel>,
    pub products: Vec<ApiRecipeStepProduct>,
    pub minimum_estimated_time_in_seconds: Option<f64>,
    pub maximum_estimated_time_in_seconds: Option<f64>,
    pub minimum_temperature_in_celsius: Option<f64>,
    pub maximum_temperature_in_celsius: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiPreparation {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiValidIngredient {
    pub id: String,
    pub name: String,
    pub plural_name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiMeasurementUnit {
    pub id: String,
    pub name: String,
    pub plural_name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiValidEquipment {
    pub id: String,
    pub name: String,
    pub plural_name: String,
    pub display_in_summary_lists: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiRecipeStepIngredient {
    pub id: String,
    pub name: String,
    pub ingredient: Option<ApiValidIngredient>,
    pub measurement_unit: Option<ApiMeasurementUnit>,
    pub minimum_quantity: f64,
    pub maximum_quantity: Option<f64>,
    pub quantity_notes: String,
    pub to_taste: bool,
    pub optional: bool,
    pub option_index: u32,
    pub vessel_index: Option<u32>,
    #[serde(rename = "recipeStepProductID")]
    pub recipe_step_product_id: Option<String>,
    pub product_of_recipe_step_index: Option<u32>,
    pub product_of_recipe_step_product_index: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiRecipeStepInstrument {
    pub id: String,
    pub name: String,
    pub instrument: Option<ApiValidEquipment>,
    pub minimum_quantity: f64,
    pub maximum_quantity: Option<f64>,
    pub optional: bool,
    pub option_index: u32,
    pub preference_rank: u32,
    #[serde(rename = "recipeStepProductID")]
    pub recipe_step_product_id: Option<String>,
    pub product_of_recipe_step_index: Option<u32>,
    pub product_of_recipe_step_product_index: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiRecipeStepVessel {
    pub id: String,
    pub name: String,
    pub vessel: Option<ApiValidEquipment>,
    pub vessel_preposition: String,
    pub minimum_quantity: f64,
    pub maximum_quantity: Option<f64>,
    #[serde(rename = "recipeStepProductID")]
    pub recipe_step_product_id: Option<String>,
    pub product_of_recipe_step_index: Option<u32>,
    pub product_of_recipe_step_product_index: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiRecipeStepProduct {
    pub id: String,
    pub belongs_to_recipe_step: String,
    pub index: Option<u32>,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub minimum_quantity: Option<f64>,
    pub maximum_quantity: Option<f64>,
    pub measurement_unit: Option<ApiMeasurementUnit>,
    pub quantity_notes: String,
    pub is_liquid: bool,
    pub is_waste: bool,
    pub compostable: bool,
    pub minimum_storage_duration_in_seconds: Option<f64>,
    pub maximum_storage_duration_in_seconds: Option<f64>,
    pub minimum_storage_temperature_in_celsius: Option<f64>,
    pub maximum_storage_temperature_in_celsius: Option<f64>,
    pub contained_in_vessel_index: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiRecipePrepTask {
    pub id: String,
    pub name: String,
    pub notes: String,
    pub minimum_time_buffer_before_recipe_in_seconds: u32,
    pub maximum_time_buffer_before_recipe_in_seconds: u32,
    pub recipe_steps: Vec<ApiRecipePrepTaskStep>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiRecipePrepTaskStep {
    pub belongs_to_recipe_step: String,
}
