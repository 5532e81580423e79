//! Suggestions for step authoring: which earlier products are still free to use.

use crate::error::ArgumentError;
use crate::quantity::QuantityRange;
use crate::recipe::{
    ProductReference, ProductType, Recipe, RecipeStep, RecipeStepIngredient, RecipeStepInstrument,
    RecipeStepProduct, RecipeStepVessel,
};

/// A product made by an earlier step that no step so far has used.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductSuggestion<'a> {
    /// Index of the producing step.
    pub step_index: u32,
    /// Position of the product within the producing step.
    pub product_index: u32,
    pub product: &'a RecipeStepProduct,
}

impl ProductSuggestion<'_> {
    pub fn reference(&self) -> ProductReference {
        ProductReference::by_index(self.step_index, self.product_index)
    }

    /// The product as a ready-to-use ingredient of a later step.
    pub fn as_ingredient(&self) -> RecipeStepIngredient {
        RecipeStepIngredient {
            name: self.product.name.clone(),
            measurement_unit: self.product.measurement_unit.clone(),
            quantity_notes: self.product.quantity_notes.clone(),
            quantity: self.product.quantity.unwrap_or_else(|| QuantityRange::exact(1.0)),
            product_of: Some(self.reference()),
            ..Default::default()
        }
    }

    pub fn as_instrument(&self) -> RecipeStepInstrument {
        RecipeStepInstrument::from_product(&self.product.name, self.reference())
    }

    pub fn as_vessel(&self) -> RecipeStepVessel {
        let mut vessel = RecipeStepVessel::from_product(&self.product.name, self.reference());
        if let Some(quantity) = self.product.quantity {
            vessel.quantity = quantity;
        }
        vessel
    }
}

/// Products of `kind` made by `recipe.steps[..up_to_step]` and not consumed within that range.
///
/// A product counts as consumed when an input of the matching kind (ingredient, instrument or
/// vessel) references it, by id or by step and product index. Results are in step order.
pub fn available_products(
    recipe: &Recipe,
    up_to_step: usize,
    kind: ProductType,
) -> Result<Vec<ProductSuggestion<'_>>, ArgumentError> {
    if up_to_step > recipe.steps.len() {
        return Err(ArgumentError::StepOutOfRange {
            position: up_to_step,
            len: recipe.steps.len(),
        });
    }

    let mut available: Vec<ProductSuggestion<'_>> = Vec::new();
    for step in &recipe.steps[..up_to_step] {
        for (position, product) in step.products.iter().enumerate() {
            if product.kind == kind {
                available.push(ProductSuggestion {
                    step_index: step.index,
                    product_index: position as u32,
                    product,
                });
            }
        }

        for reference in consumed(step, kind) {
            available.retain(|candidate| !matches_reference(candidate, reference));
        }
    }

    Ok(available)
}

fn consumed(step: &RecipeStep, kind: ProductType) -> Vec<&ProductReference> {
    match kind {
        ProductType::Ingredient => step
            .ingredients
            .iter()
            .filter_map(|i| i.product_of.as_ref())
            .collect(),
        ProductType::Instrument => step
            .instruments
            .iter()
            .filter_map(|i| i.product_of.as_ref())
            .collect(),
        ProductType::Vessel => step
            .vessels
            .iter()
            .filter_map(|v| v.product_of.as_ref())
            .collect(),
    }
}

fn matches_reference(candidate: &ProductSuggestion<'_>, reference: &ProductReference) -> bool {
    match reference {
        ProductReference::ById { product_id } => {
            !product_id.is_empty() && candidate.product.id == *product_id
        }
        ProductReference::ByIndex { step, product } => {
            candidate.step_index == *step && candidate.product_index == *product
        }
    }
}
