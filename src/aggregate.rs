//! Equipment and shopping lists across several recipes.

use crate::error::ArgumentError;
use crate::quantity::QuantityRange;
use crate::recipe::{MeasurementUnit, Recipe, ValidIngredient, ValidInstrument, ValidVessel};
use crate::scale::ScaleFactor;
use ahash::AHashMap;
use serde::Serialize;

/// One line of an equipment checklist.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EquipmentEntry {
    Instrument {
        instrument: ValidInstrument,
        quantity: QuantityRange,
    },
    Vessel {
        vessel: ValidVessel,
        quantity: QuantityRange,
    },
}

impl EquipmentEntry {
    pub fn id(&self) -> &str {
        match self {
            EquipmentEntry::Instrument { instrument, .. } => &instrument.id,
            EquipmentEntry::Vessel { vessel, .. } => &vessel.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            EquipmentEntry::Instrument { instrument, .. } => &instrument.name,
            EquipmentEntry::Vessel { vessel, .. } => &vessel.name,
        }
    }

    pub fn quantity(&self) -> &QuantityRange {
        match self {
            EquipmentEntry::Instrument { quantity, .. }
            | EquipmentEntry::Vessel { quantity, .. } => quantity,
        }
    }

    fn quantity_mut(&mut self) -> &mut QuantityRange {
        match self {
            EquipmentEntry::Instrument { quantity, .. }
            | EquipmentEntry::Vessel { quantity, .. } => quantity,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum EquipmentKind {
    Instrument,
    Vessel,
}

/// Each recipe followed by its direct supporting recipes, one level deep.
pub fn with_supporting_recipes<'a>(recipes: &[&'a Recipe]) -> Vec<&'a Recipe> {
    recipes
        .iter()
        .flat_map(|recipe| std::iter::once(*recipe).chain(recipe.supporting_recipes.iter()))
        .collect()
}

/// Collects every instrument and vessel the recipes need into one deduplicated checklist.
///
/// Only equipment whose valid definition is flagged for summary lists is included; tools that
/// are themselves step products are skipped. Entries are keyed by the valid instrument or vessel
/// id and their quantities sum-merged. Order follows first appearance.
pub fn determine_all_instruments_for_recipes(recipes: &[&Recipe]) -> Vec<EquipmentEntry> {
    let mut entries: Vec<EquipmentEntry> = Vec::new();
    let mut positions: AHashMap<(EquipmentKind, String), usize> = AHashMap::new();

    let mut add = |key: (EquipmentKind, String), entry: EquipmentEntry| {
        if let Some(&position) = positions.get(&key) {
            let merged = entries[position].quantity().combine(entry.quantity());
            *entries[position].quantity_mut() = merged;
        } else {
            positions.insert(key, entries.len());
            entries.push(entry);
        }
    };

    for recipe in recipes {
        for step in &recipe.steps {
            for instrument in &step.instruments {
                if let Some(valid) = instrument
                    .instrument
                    .as_ref()
                    .filter(|v| v.display_in_summary_lists)
                {
                    add(
                        (EquipmentKind::Instrument, valid.id.clone()),
                        EquipmentEntry::Instrument {
                            instrument: valid.clone(),
                            quantity: instrument.quantity,
                        },
                    );
                }
            }
            for vessel in &step.vessels {
                if let Some(valid) = vessel
                    .vessel
                    .as_ref()
                    .filter(|v| v.display_in_summary_lists)
                {
                    add(
                        (EquipmentKind::Vessel, valid.id.clone()),
                        EquipmentEntry::Vessel {
                            vessel: valid.clone(),
                            quantity: vessel.quantity,
                        },
                    );
                }
            }
        }
    }

    entries
}

/// One line of a shopping list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngredientEntry {
    pub ingredient: ValidIngredient,
    pub measurement_unit: Option<MeasurementUnit>,
    pub quantity: QuantityRange,
    /// Every occurrence was "to taste".
    pub to_taste: bool,
}

/// Sums the ingredients of several recipes, each at its own scale.
///
/// Ingredients without a valid ingredient (step products) are skipped. Entries are keyed by
/// ingredient id and measurement unit id, so the same ingredient in different units stays
/// separate. `to_taste` amounts are not scaled.
pub fn determine_all_ingredients_for_recipes(
    recipes: &[(&Recipe, f64)],
) -> Result<Vec<IngredientEntry>, ArgumentError> {
    let mut entries: Vec<IngredientEntry> = Vec::new();
    let mut positions: AHashMap<(String, String), usize> = AHashMap::new();

    for (recipe, scale) in recipes {
        let scale = ScaleFactor::new(*scale)?;
        for step in &recipe.steps {
            for ingredient in &step.ingredients {
                let Some(valid) = &ingredient.ingredient else {
                    continue;
                };
                let quantity = if ingredient.to_taste {
                    ingredient.quantity
                } else {
                    ingredient.quantity.scale(scale.value())?
                };
                let key = (
                    valid.id.clone(),
                    ingredient
                        .measurement_unit
                        .as_ref()
                        .map(|u| u.id.clone())
                        .unwrap_or_default(),
                );

                if let Some(&position) = positions.get(&key) {
                    let entry = &mut entries[position];
                    entry.quantity = entry.quantity.combine(&quantity);
                    entry.to_taste &= ingredient.to_taste;
                } else {
                    positions.insert(key, entries.len());
                    entries.push(IngredientEntry {
                        ingredient: valid.clone(),
                        measurement_unit: ingredient.measurement_unit.clone(),
                        quantity,
                        to_taste: ingredient.to_taste,
                    });
                }
            }
        }
    }

    Ok(entries)
}
