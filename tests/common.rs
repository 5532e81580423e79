//! Common test utilities for building recipes and API payloads.
use kondate::prelude::*;
use kondate::recipe::{MeasurementUnit, ValidIngredient, ValidInstrument, ValidVessel};

#[allow(dead_code)]
pub fn onion() -> ValidIngredient {
    ValidIngredient {
        id: "ingredient-onion".to_string(),
        name: "onion".to_string(),
        plural_name: "onions".to_string(),
    }
}

#[allow(dead_code)]
pub fn salt() -> ValidIngredient {
    ValidIngredient {
        id: "ingredient-salt".to_string(),
        name: "salt".to_string(),
        plural_name: "salt".to_string(),
    }
}

#[allow(dead_code)]
pub fn grams() -> MeasurementUnit {
    MeasurementUnit {
        id: "unit-gram".to_string(),
        name: "gram".to_string(),
        plural_name: "grams".to_string(),
    }
}

#[allow(dead_code)]
pub fn knife() -> ValidInstrument {
    ValidInstrument {
        id: "instrument-knife".to_string(),
        name: "knife".to_string(),
        plural_name: "knives".to_string(),
        display_in_summary_lists: true,
    }
}

/// Hidden from summary lists, like a fork or a spoon.
#[allow(dead_code)]
pub fn spoon() -> ValidInstrument {
    ValidInstrument {
        id: "instrument-spoon".to_string(),
        name: "spoon".to_string(),
        plural_name: "spoons".to_string(),
        display_in_summary_lists: false,
    }
}

#[allow(dead_code)]
pub fn mixing_bowl() -> ValidVessel {
    ValidVessel {
        id: "vessel-mixing-bowl".to_string(),
        name: "mixing bowl".to_string(),
        plural_name: "mixing bowls".to_string(),
        display_in_summary_lists: true,
    }
}

#[allow(dead_code)]
pub fn ingredient(valid: ValidIngredient, amount: f64) -> RecipeStepIngredient {
    RecipeStepIngredient {
        name: valid.name.clone(),
        ingredient: Some(valid),
        quantity: QuantityRange::exact(amount),
        ..Default::default()
    }
}

/// Three steps chained through their products:
///
/// - step 0 dices an onion and produces "diced onion" (`product-0`)
/// - step 1 consumes it by step/product index and produces "sauteed onion" (`product-1`)
/// - step 2 consumes that by product id
#[allow(dead_code)]
pub fn chain_recipe() -> Recipe {
    let step0 = RecipeStep::new("step-0", 0, Preparation::new("prep-dice", "dice"))
        .with_instrument(RecipeStepInstrument::new(knife(), QuantityRange::exact(1.0)))
        .with_ingredient(ingredient(onion(), 2.0))
        .with_product(
            RecipeStepProduct::new("product-0", "diced onion", ProductType::Ingredient)
                .with_quantity(QuantityRange::exact(1.0)),
        );

    let step1 = RecipeStep::new("step-1", 1, Preparation::new("prep-saute", "saute"))
        .with_ingredient(RecipeStepIngredient::from_product(
            "diced onion",
            ProductReference::by_index(0, 0),
        ))
        .with_vessel(RecipeStepVessel::new(mixing_bowl(), QuantityRange::exact(1.0)))
        .with_product(RecipeStepProduct::new(
            "product-1",
            "sauteed onion",
            ProductType::Ingredient,
        ));

    let step2 = RecipeStep::new("step-2", 2, Preparation::new("prep-season", "season"))
        .with_ingredient(RecipeStepIngredient::from_product(
            "sauteed onion",
            ProductReference::by_id("product-1"),
        ))
        .with_ingredient(RecipeStepIngredient {
            to_taste: true,
            ..ingredient(salt(), 5.0)
        });

    Recipe::new("onion-base", "Onion Base")
        .with_portions(
            QuantityRange::exact(4.0),
            PortionName::new("serving", "servings"),
        )
        .with_step(step0)
        .with_step(step1)
        .with_step(step2)
}

/// The chain recipe with step 0 mis-tagged as needing step 2's output.
#[allow(dead_code)]
pub fn cyclic_recipe() -> Recipe {
    let mut recipe = chain_recipe();
    recipe.steps[2] = recipe.steps[2].clone().with_product(RecipeStepProduct::new(
        "product-2",
        "seasoned onion",
        ProductType::Ingredient,
    ));
    recipe.steps[0]
        .ingredients
        .push(RecipeStepIngredient::from_product(
            "seasoned onion",
            ProductReference::by_id("product-2"),
        ));
    recipe
}

/// One step needing two mixing bowls.
#[allow(dead_code)]
pub fn two_bowl_recipe(id: &str) -> Recipe {
    Recipe::new(id, id).with_step(
        RecipeStep::new(&format!("{}-step", id), 0, Preparation::new("prep-mix", "mix"))
            .with_vessel(RecipeStepVessel::new(mixing_bowl(), QuantityRange::exact(2.0))),
    )
}

/// API JSON for a two-step recipe with one supporting recipe.
#[allow(dead_code)]
pub fn wire_recipe_json() -> serde_json::Value {
    serde_json::json!({
        "id": "soup",
        "name": "Onion Soup",
        "portionName": "bowl",
        "pluralPortionName": "bowls",
        "minimumEstimatedPortions": 2,
        "maximumEstimatedPortions": 3,
        "steps": [
            {
                "id": "soup-0",
                "index": 0,
                "preparation": { "id": "prep-slice", "name": "slice" },
                "ingredients": [
                    {
                        "name": "onion",
                        "ingredient": { "id": "ingredient-onion", "name": "onion", "pluralName": "onions" },
                        "measurementUnit": { "id": "unit-gram", "name": "gram", "pluralName": "grams" },
                        "minimumQuantity": 500,
                        "maximumQuantity": 600
                    }
                ],
                "instruments": [
                    {
                        "name": "knife",
                        "instrument": { "id": "instrument-knife", "name": "knife", "pluralName": "knives", "displayInSummaryLists": true },
                        "minimumQuantity": 1
                    }
                ],
                "products": [
                    { "id": "soup-p0", "name": "sliced onion", "type": "ingredient", "minimumQuantity": 1 }
                ]
            },
            {
                "id": "soup-1",
                "index": 1,
                "preparation": { "id": "prep-simmer", "name": "simmer" },
                "minimumEstimatedTimeInSeconds": 1800,
                "ingredients": [
                    {
                        "name": "sliced onion",
                        "minimumQuantity": 1,
                        "productOfRecipeStepIndex": 0,
                        "productOfRecipeStepProductIndex": 0
                    },
                    {
                        "name": "water",
                        "ingredient": { "id": "ingredient-water", "name": "water", "pluralName": "water" },
                        "measurementUnit": { "id": "unit-cup", "name": "cup", "pluralName": "cups" },
                        "minimumQuantity": 4
                    }
                ],
                "vessels": [
                    {
                        "name": "pot",
                        "vessel": { "id": "vessel-pot", "name": "pot", "pluralName": "pots", "displayInSummaryLists": true },
                        "vesselPreposition": "in",
                        "minimumQuantity": 1
                    }
                ]
            }
        ],
        "prepTasks": [
            {
                "id": "task-0",
                "name": "slice ahead",
                "maximumTimeBufferBeforeRecipeInSeconds": 86400,
                "recipeSteps": [ { "belongsToRecipeStep": "soup-0" } ]
            }
        ],
        "supportingRecipes": [
            {
                "id": "stock",
                "name": "Stock",
                "minimumEstimatedPortions": 1,
                "steps": [
                    {
                        "id": "stock-0",
                        "index": 0,
                        "preparation": { "id": "prep-boil", "name": "boil" },
                        "products": [
                            { "id": "stock-p0", "name": "stock", "type": "ingredient" }
                        ]
                    }
                ]
            }
        ]
    })
}
