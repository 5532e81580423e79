use super::definition::{ProductReference, Recipe, RecipeStepProduct};
use crate::error::StructureError;
use ahash::AHashMap;

/// Where a referenced product lives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedProduct<'a> {
    /// Position of the producing step in `Recipe::steps`.
    pub position: usize,
    /// Index of the producing step.
    pub step_index: u32,
    pub product: &'a RecipeStepProduct,
}

/// Resolves `ProductReference`s against a single recipe snapshot.
pub struct ProductResolver<'a> {
    recipe: &'a Recipe,
    by_id: AHashMap<&'a str, (usize, usize)>,
    by_step_index: AHashMap<u32, usize>,
}

impl<'a> ProductResolver<'a> {
    pub fn new(recipe: &'a Recipe) -> Self {
        let mut by_id = AHashMap::new();
        let mut by_step_index = AHashMap::new();
        for (position, step) in recipe.steps.iter().enumerate() {
            by_step_index.entry(step.index).or_insert(position);
            for (product_position, product) in step.products.iter().enumerate() {
                // first producer wins; the graph builder rejects repeats
                if !product.id.is_empty() {
                    by_id
                        .entry(product.id.as_str())
                        .or_insert((position, product_position));
                }
            }
        }
        Self {
            recipe,
            by_id,
            by_step_index,
        }
    }

    /// Position in `Recipe::steps` of the step with `index`.
    pub fn step_position(&self, index: u32) -> Option<usize> {
        self.by_step_index.get(&index).copied()
    }

    /// Finds the product a reference points at. `consumer` is the index of the referencing step,
    /// used for error reporting.
    pub fn resolve(
        &self,
        consumer: u32,
        reference: &ProductReference,
    ) -> Result<ResolvedProduct<'a>, StructureError> {
        let (position, product_position) = match reference {
            ProductReference::ById { product_id } => self
                .by_id
                .get(product_id.as_str())
                .copied()
                .ok_or_else(|| StructureError::UnknownProduct {
                    step: consumer,
                    product_id: product_id.clone(),
                })?,
            ProductReference::ByIndex { step, product } => {
                let position =
                    self.step_position(*step)
                        .ok_or(StructureError::UnknownStep {
                            step: consumer,
                            missing: *step,
                        })?;
                let product_position = *product as usize;
                if product_position >= self.recipe.steps[position].products.len() {
                    return Err(StructureError::UnknownProductIndex {
                        step: consumer,
                        producer: *step,
                        product: *product,
                    });
                }
                (position, product_position)
            }
        };

        let step = &self.recipe.steps[position];
        Ok(ResolvedProduct {
            position,
            step_index: step.index,
            product: &step.products[product_position],
        })
    }
}
