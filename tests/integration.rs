//! Integration tests covering the full pipeline from API JSON to checklists.
mod common;
use ahash::AHashSet;
use common::*;
use kondate::prelude::*;

fn soup() -> Recipe {
    Recipe::from_json(&wire_recipe_json().to_string()).expect("fixture should convert")
}

#[test]
fn test_json_to_diagram() {
    let recipe = soup();
    let graph = RecipeGraph::build(&recipe).unwrap();
    let diagram = DiagramRenderer::builder()
        .direction(FlowDirection::LeftRight)
        .build()
        .render_with_graph(&recipe, &graph)
        .unwrap();

    let expected = "\
flowchart LR;
stock_Step0[\"1. boil\"];
subgraph stock [\"Stock\"]
direction LR
stock_Step0;
end
soup_Step0[\"1. slice onion\"];
soup_Step1[\"2. simmer sliced onion and water\"];
soup_Step0 --->|sliced onion| soup_Step1;
subgraph soup [\"Onion Soup\"]
direction LR
soup_Step0;
soup_Step1;
subgraph soup_0 [\"(up to 1 day in advance)\"]
direction LR
soup_Step0;
end
end
";
    assert_eq!(diagram, expected);
}

#[test]
fn test_json_to_scaled_checklists() {
    let recipe = soup();
    let doubled = Scaler::default().scale(&recipe, ScaleFactor::new(2.0).unwrap());
    assert_eq!(doubled.yield_text(), "4-6 bowls");

    let shopping = determine_all_ingredients_for_recipes(&[(&recipe, 2.0)]).unwrap();
    let names: Vec<String> = shopping
        .iter()
        .map(|e| format!("{} {}", e.quantity, e.ingredient.name))
        .collect();
    assert_eq!(names, vec!["1000-1200 onion", "8 water"]);

    let included = with_supporting_recipes(&[&doubled.recipe]);
    let equipment = determine_all_instruments_for_recipes(&included);
    let names: Vec<&str> = equipment.iter().map(|e| e.name()).collect();
    assert_eq!(names, vec!["knife", "pot"]);
}

#[test]
fn test_scaling_does_not_change_the_diagram() {
    let recipe = soup();
    let renderer = DiagramRenderer::default();
    let scaled = scale_recipe(&recipe, 3.0).unwrap();
    assert_eq!(
        renderer.render(&recipe).unwrap(),
        renderer.render(&scaled.recipe).unwrap()
    );
}

#[test]
fn test_step_sentences_for_converted_recipe() {
    let recipe = soup();
    let sentences: Vec<String> = recipe
        .steps
        .iter()
        .map(|step| step_text(&recipe, step, 1.0).unwrap())
        .collect();

    assert_eq!(
        sentences,
        vec![
            "Using a knife, slice 500 to 600 grams onions to yield the ingredient sliced onion.",
            "Simmer the sliced onion from step #1 and 4 cups water in a pot.",
        ]
    );
}

#[test]
fn test_long_recipe_walks_in_order() {
    // Each step uses the previous step's product; every fifth step also waits on step 0.
    let mut recipe = Recipe::new("long", "Long");
    for index in 0..200u32 {
        let preparation = Preparation::new("", "mix");
        let mut step = RecipeStep::new(&format!("long-{}", index), index, preparation)
            .with_product(RecipeStepProduct::new(
                &format!("long-p{}", index),
                &format!("mixture {}", index),
                ProductType::Ingredient,
            ));
        if index > 0 {
            step = step.with_ingredient(RecipeStepIngredient::from_product(
                &format!("mixture {}", index - 1),
                ProductReference::by_id(&format!("long-p{}", index - 1)),
            ));
        }
        if index > 1 && index % 5 == 0 {
            step = step.with_prerequisite(0);
        }
        recipe = recipe.with_step(step);
    }

    let graph = RecipeGraph::build(&recipe).unwrap();
    let expected: Vec<u32> = (0..200).collect();
    assert_eq!(graph.topological_order(), expected.as_slice());

    let mut completed = AHashSet::new();
    for index in 0..200u32 {
        assert_eq!(graph.ready_steps(&completed), vec![index]);
        completed.insert(index);
    }

    let first = DiagramRenderer::default().render(&recipe).unwrap();
    let second = DiagramRenderer::default().render(&recipe).unwrap();
    assert_eq!(first, second);
    assert!(first.contains("long_Step0 --> long_Step5;"));
}

#[test]
fn test_closing_the_loop_is_reported() {
    let mut recipe = soup();
    recipe.steps[0]
        .ingredients
        .push(RecipeStepIngredient::from_product(
            "broth",
            ProductReference::by_index(1, 0),
        ));
    recipe.steps[1].products.push(RecipeStepProduct::new(
        "soup-p1",
        "broth",
        ProductType::Ingredient,
    ));

    let err: Error = RecipeGraph::build(&recipe).unwrap_err().into();
    assert!(matches!(
        err,
        Error::InvalidRecipeStructure(StructureError::Cycle { ref steps }) if steps == &vec![0, 1]
    ));
    assert!(DiagramRenderer::default().render(&recipe).is_err());
}
