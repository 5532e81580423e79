use clap::Parser;
use kondate::recipe::wire::*;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use std::fs;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

const PREPARATIONS: &[&str] = &["chop", "dice", "mix", "whisk", "simmer", "bake", "fold", "sear"];
const INGREDIENTS: &[(&str, &str)] = &[
    ("onion", "onions"),
    ("carrot", "carrots"),
    ("egg", "eggs"),
    ("flour", "flour"),
    ("butter", "butter"),
    ("garlic clove", "garlic cloves"),
    ("tomato", "tomatoes"),
    ("salt", "salt"),
];
const UNITS: &[(&str, &str)] = &[("gram", "grams"), ("cup", "cups"), ("unit", "units")];
const INSTRUMENTS: &[(&str, &str)] = &[
    ("knife", "knives"),
    ("whisk", "whisks"),
    ("spatula", "spatulas"),
];
const VESSELS: &[(&str, &str)] = &[
    ("mixing bowl", "mixing bowls"),
    ("saucepan", "saucepans"),
    ("baking sheet", "baking sheets"),
];

/// A CLI tool to generate synthetic recipes for exercising the kondate engine
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated JSON file to
    #[arg(short, long, default_value = "generated_recipe.json")]
    output: String,

    /// Number of steps in the main recipe
    #[arg(long, default_value_t = 12)]
    steps: usize,

    /// Number of supporting recipes to attach
    #[arg(long, default_value_t = 0)]
    supporting: usize,

    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Log filter. RUST_LOG takes precedence.
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if cli.steps == 0 {
        eprintln!("Error: --steps must be at least 1");
        std::process::exit(1);
    }

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    info!(
        "Generating recipe with {} steps and {} supporting recipes...",
        cli.steps, cli.supporting
    );

    let mut recipe = generate_recipe(&mut rng, "generated", "Generated Recipe", cli.steps);
    recipe.supporting_recipes = (0..cli.supporting)
        .map(|i| {
            let steps = rng.random_range(1..=cli.steps.max(2) / 2 + 1);
            generate_recipe(
                &mut rng,
                &format!("supporting{}", i),
                &format!("Supporting Recipe {}", i + 1),
                steps,
            )
        })
        .collect();

    let json_output = serde_json::to_string_pretty(&recipe)?;
    fs::write(&cli.output, json_output)?;

    info!("Successfully generated and saved recipe to '{}'", cli.output);

    Ok(())
}

/// Builds an acyclic recipe: every product reference points at an earlier step.
fn generate_recipe(rng: &mut StdRng, id: &str, name: &str, step_count: usize) -> ApiRecipe {
    let mut steps: Vec<ApiRecipeStep> = Vec::with_capacity(step_count);
    // (step index, product index, product name) not yet consumed
    let mut open_products: Vec<(u32, u32, String)> = Vec::new();

    for position in 0..step_count {
        let index = position as u32;
        let preparation = *PREPARATIONS.choose(rng).unwrap_or(&"mix");

        let mut ingredients = Vec::new();
        if !open_products.is_empty() && rng.random_bool(0.7) {
            let pick = rng.random_range(0..open_products.len());
            let (step, product, product_name) = open_products.remove(pick);
            ingredients.push(ApiRecipeStepIngredient {
                id: format!("{}-s{}-i{}", id, index, ingredients.len()),
                name: product_name,
                minimum_quantity: 1.0,
                product_of_recipe_step_index: Some(step),
                product_of_recipe_step_product_index: Some(product),
                ..Default::default()
            });
        }
        for _ in 0..rng.random_range(0..=3) {
            ingredients.push(random_ingredient(rng, id, index, ingredients.len()));
        }

        let instruments = (0..rng.random_range(0..=2))
            .map(|_| {
                let (singular, plural) = *INSTRUMENTS.choose(rng).unwrap_or(&INSTRUMENTS[0]);
                ApiRecipeStepInstrument {
                    name: singular.to_string(),
                    instrument: Some(equipment(singular, plural, true)),
                    minimum_quantity: 1.0,
                    ..Default::default()
                }
            })
            .collect();

        let (vessel_singular, vessel_plural) = *VESSELS.choose(rng).unwrap_or(&VESSELS[0]);
        let vessels = vec![ApiRecipeStepVessel {
            name: vessel_singular.to_string(),
            vessel: Some(equipment(vessel_singular, vessel_plural, true)),
            vessel_preposition: "in".to_string(),
            minimum_quantity: 1.0,
            ..Default::default()
        }];

        let product_name = format!("{}ed mixture {}", preparation, index + 1);
        let products = vec![ApiRecipeStepProduct {
            id: format!("{}-p{}", id, index),
            belongs_to_recipe_step: format!("{}-s{}", id, index),
            index: Some(0),
            name: product_name.clone(),
            kind: "ingredient".to_string(),
            minimum_quantity: Some(1.0),
            ..Default::default()
        }];
        if position + 1 < step_count {
            open_products.push((index, 0, product_name));
        }

        let prerequisite_steps = if index > 1 && rng.random_bool(0.1) {
            vec![rng.random_range(0..index - 1)]
        } else {
            Vec::new()
        };

        steps.push(ApiRecipeStep {
            id: format!("{}-s{}", id, index),
            index,
            belongs_to_recipe: id.to_string(),
            preparation: ApiPreparation {
                id: format!("prep-{}", preparation),
                name: preparation.to_string(),
            },
            prerequisite_steps,
            ingredients,
            instruments,
            vessels,
            products,
            minimum_estimated_time_in_seconds: Some(rng.random_range(1..=30) as f64 * 60.0),
            ..Default::default()
        });
    }
    debug!("Generated {} steps for '{}'", steps.len(), id);

    ApiRecipe {
        id: id.to_string(),
        name: name.to_string(),
        portion_name: "serving".to_string(),
        plural_portion_name: "servings".to_string(),
        minimum_estimated_portions: rng.random_range(1..=8) as f64,
        steps,
        ..Default::default()
    }
}

fn random_ingredient(rng: &mut StdRng, id: &str, step: u32, n: usize) -> ApiRecipeStepIngredient {
    let (singular, plural) = *INGREDIENTS.choose(rng).unwrap_or(&INGREDIENTS[0]);
    let (unit, units) = *UNITS.choose(rng).unwrap_or(&UNITS[0]);
    let to_taste = singular == "salt";
    let minimum = (rng.random_range(1..=20) as f64) * 0.5;
    ApiRecipeStepIngredient {
        id: format!("{}-s{}-i{}", id, step, n),
        name: singular.to_string(),
        ingredient: Some(ApiValidIngredient {
            id: format!("ingredient-{}", singular.replace(' ', "-")),
            name: singular.to_string(),
            plural_name: plural.to_string(),
        }),
        measurement_unit: Some(ApiMeasurementUnit {
            id: format!("unit-{}", unit),
            name: unit.to_string(),
            plural_name: units.to_string(),
        }),
        minimum_quantity: minimum,
        maximum_quantity: rng.random_bool(0.2).then(|| minimum * 2.0),
        to_taste,
        ..Default::default()
    }
}

fn equipment(singular: &str, plural: &str, summary: bool) -> ApiValidEquipment {
    ApiValidEquipment {
        id: format!("equipment-{}", singular.replace(' ', "-")),
        name: singular.to_string(),
        plural_name: plural.to_string(),
        display_in_summary_lists: summary,
    }
}
