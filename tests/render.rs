//! Tests for flow-chart rendering.
mod common;
use common::*;
use kondate::prelude::*;
use kondate::render::{escape_label, sanitize_id};

#[test]
fn test_chain_recipe_snapshot() {
    let diagram = DiagramRenderer::default().render(&chain_recipe()).unwrap();

    let expected = "\
flowchart TB;
onion_base_Step0[\"1. dice onion\"];
onion_base_Step1[\"2. saute diced onion\"];
onion_base_Step2[\"3. season sauteed onion and salt\"];
onion_base_Step0 --->|diced onion| onion_base_Step1;
onion_base_Step1 --->|sauteed onion| onion_base_Step2;
subgraph onion_base [\"Onion Base\"]
direction TB
onion_base_Step0;
onion_base_Step1;
onion_base_Step2;
end
";
    assert_eq!(diagram, expected);
}

#[test]
fn test_rendering_is_deterministic() {
    let recipe = chain_recipe().with_supporting_recipe(two_bowl_recipe("stock"));
    let renderer = DiagramRenderer::builder()
        .direction(FlowDirection::LeftRight)
        .build();

    let first = renderer.render(&recipe).unwrap();
    let second = renderer.render(&recipe).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_direction_and_kind() {
    let recipe = chain_recipe();
    let diagram = DiagramRenderer::builder()
        .direction(FlowDirection::RightLeft)
        .kind(DiagramKind::Graph)
        .build()
        .render(&recipe)
        .unwrap();

    assert!(diagram.starts_with("graph RL;\n"));
    assert!(diagram.contains("\ndirection RL\n"));

    let bottom_top = render_recipe_diagram(&recipe, FlowDirection::BottomTop).unwrap();
    assert!(bottom_top.starts_with("flowchart BT;\n"));
}

#[test]
fn test_direction_parsing() {
    assert_eq!("lr".parse::<FlowDirection>(), Ok(FlowDirection::LeftRight));
    assert_eq!("TD".parse::<FlowDirection>(), Ok(FlowDirection::TopBottom));
    assert_eq!(FlowDirection::BottomTop.to_string(), "BT");
    assert!("up".parse::<FlowDirection>().is_err());
}

#[test]
fn test_cycle_is_propagated_not_rendered() {
    let err = DiagramRenderer::default()
        .render(&cyclic_recipe())
        .unwrap_err();
    assert!(matches!(err, StructureError::Cycle { .. }));
}

#[test]
fn test_user_text_is_escaped() {
    let mut recipe = chain_recipe();
    recipe.name = "Mom's \"best\"\n[onion] base".to_string();
    recipe.steps[0].ingredients[0].name = "onion | shallot; or <leek>".to_string();

    let diagram = DiagramRenderer::default().render(&recipe).unwrap();

    assert!(diagram.contains("subgraph onion_base [\"Mom's #quot;best#quot; #91;onion#93; base\"]"));
    assert!(diagram.contains("1. dice onion #124; shallot#59; or #lt;leek#gt;"));
    // one line per statement
    assert!(diagram.lines().all(|line| !line.contains('\r')));
    assert_eq!(diagram.matches("subgraph").count(), 1);
}

#[test]
fn test_escape_helpers() {
    assert_eq!(escape_label("a  b\n\tc"), "a b c");
    assert_eq!(escape_label("#1 {x}"), "#35;1 #123;x#125;");
    assert_eq!(sanitize_id("my recipe-1"), "my_recipe_1");
    assert_eq!(sanitize_id("end"), "recipe_end");
    assert_eq!(sanitize_id(""), "recipe_");
}

#[test]
fn test_ordering_only_and_equipment_edges() {
    let mut recipe = chain_recipe();
    recipe.steps[1]
        .vessels
        .push(RecipeStepVessel::from_product("warm pan", ProductReference::by_index(0, 1)));
    recipe.steps[0] = recipe.steps[0].clone().with_product(RecipeStepProduct::new(
        "pan",
        "warm pan",
        ProductType::Vessel,
    ));
    recipe.steps.push(
        RecipeStep::new("step-3", 3, Preparation::new("", "serve"))
            .with_prerequisite(2)
            .with_instrument(RecipeStepInstrument::from_product(
                "sharpened knife",
                ProductReference::by_index(0, 2),
            )),
    );
    recipe.steps[0] = recipe.steps[0].clone().with_product(RecipeStepProduct::new(
        "knife",
        "sharpened knife",
        ProductType::Instrument,
    ));

    let diagram = DiagramRenderer::default().render(&recipe).unwrap();

    assert!(diagram.contains("onion_base_Step0 -.->|warm pan| onion_base_Step1;"));
    assert!(diagram.contains("onion_base_Step0 ===>|sharpened knife| onion_base_Step3;"));
    assert!(diagram.contains("onion_base_Step2 --> onion_base_Step3;"));
}

#[test]
fn test_long_ingredient_lists_are_cut() {
    let step = ["onion", "carrot", "celery", "garlic"].iter().fold(
        RecipeStep::new("s", 0, Preparation::new("", "chop")),
        |step, name| {
            step.with_ingredient(RecipeStepIngredient {
                name: name.to_string(),
                ingredient: Some(kondate::recipe::ValidIngredient {
                    id: name.to_string(),
                    name: name.to_string(),
                    plural_name: String::new(),
                }),
                ..Default::default()
            })
        },
    );
    let recipe = Recipe::new("mirepoix", "Mirepoix").with_step(step);

    let diagram = DiagramRenderer::default().render(&recipe).unwrap();
    assert!(diagram.contains("[\"1. chop onion, carrot, etc...\"]"));

    let wide = DiagramRenderer::builder()
        .max_label_ingredients(4)
        .build()
        .render(&recipe)
        .unwrap();
    assert!(wide.contains("[\"1. chop onion, carrot, celery, and garlic\"]"));
}

#[test]
fn test_explicit_instructions_are_condensed() {
    let mut recipe = chain_recipe();
    recipe.steps[0].explicit_instructions =
        "Dice the onion very finely, keeping the root end intact so it holds together".to_string();

    let diagram = DiagramRenderer::builder()
        .max_label_chars(20)
        .build()
        .render(&recipe)
        .unwrap();
    assert!(diagram.contains("onion_base_Step0[\"1. Dice the onion ve...\"];"));
}

#[test]
fn test_prep_tasks_render_as_nested_subgraphs() {
    let recipe = chain_recipe()
        .with_prep_task(RecipePrepTask {
            id: "task-0".to_string(),
            name: "dice ahead".to_string(),
            step_ids: vec!["step-0".to_string()],
            ..Default::default()
        })
        .with_prep_task(RecipePrepTask {
            id: "task-1".to_string(),
            name: "saute ahead".to_string(),
            maximum_buffer_seconds: 5400,
            step_ids: vec!["step-1".to_string(), "no-such-step".to_string()],
            ..Default::default()
        });

    let diagram = DiagramRenderer::default().render(&recipe).unwrap();

    assert!(diagram.contains(
        "subgraph onion_base_0 [\"prep task: dice ahead\"]\ndirection TB\nonion_base_Step0;\nend\n"
    ));
    assert!(diagram.contains(
        "subgraph onion_base_1 [\"(up to 1 hour 30 minutes in advance)\"]\ndirection TB\nonion_base_Step1;\nend\n"
    ));
    assert!(diagram.ends_with("end\nend\n"));
}

#[test]
fn test_supporting_recipes_render_first_with_one_header() {
    let recipe = chain_recipe()
        .with_supporting_recipe(two_bowl_recipe("stock"))
        .with_supporting_recipe(two_bowl_recipe("stock"));

    let diagram = DiagramRenderer::default().render(&recipe).unwrap();

    assert_eq!(diagram.matches("flowchart").count(), 1);
    assert_eq!(diagram.matches("subgraph stock ").count(), 1);
    let stock = diagram.find("subgraph stock ").unwrap();
    let main = diagram.find("subgraph onion_base ").unwrap();
    assert!(stock < main);
    assert!(diagram.contains("stock_Step0[\"1. mix\"];"));
}

#[test]
fn test_broken_supporting_recipe_fails_the_render() {
    let mut broken = cyclic_recipe();
    broken.id = "broken".to_string();
    let recipe = chain_recipe().with_supporting_recipe(broken);
    assert!(DiagramRenderer::default().render(&recipe).is_err());
}

#[test]
fn test_graph_from_another_recipe_is_rejected() {
    let single = Recipe::new("r", "R").with_step(RecipeStep::new(
        "r-0",
        0,
        Preparation::new("", "chop"),
    ));
    let other = RecipeGraph::build(&chain_recipe()).unwrap();

    let err = DiagramRenderer::default()
        .render_with_graph(&single, &other)
        .unwrap_err();
    assert_eq!(
        err,
        StructureError::GraphMismatch {
            recipe_id: "r".to_string(),
            graph_recipe_id: "onion-base".to_string()
        }
    );
}

#[test]
fn test_stale_graph_is_rejected() {
    let mut recipe = chain_recipe();
    let graph = RecipeGraph::build(&recipe).unwrap();
    recipe.steps.pop();

    let err = DiagramRenderer::default()
        .render_with_graph(&recipe, &graph)
        .unwrap_err();
    assert!(matches!(err, StructureError::GraphMismatch { .. }));
}

#[test]
fn test_colliding_recipe_ids_get_distinct_subgraphs() {
    let recipe = chain_recipe()
        .with_supporting_recipe(two_bowl_recipe("a-b"))
        .with_supporting_recipe(two_bowl_recipe("a_b"));

    let diagram = DiagramRenderer::default().render(&recipe).unwrap();

    assert!(diagram.contains("subgraph a_b [\"a-b\"]\ndirection TB\na_b_Step0;\nend\n"));
    assert!(diagram.contains("subgraph a_b_2 [\"a_b\"]\ndirection TB\na_b_2_Step0;\nend\n"));
    assert_eq!(diagram.matches("a_b_Step0").count(), 2);
}
