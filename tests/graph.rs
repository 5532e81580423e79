//! Tests for building and querying step dependency graphs.
mod common;
use ahash::AHashSet;
use common::*;
use kondate::prelude::*;

fn is_topological(graph: &RecipeGraph) -> bool {
    let order = graph.topological_order();
    let position = |index: u32| order.iter().position(|i| *i == index);
    graph
        .edges()
        .iter()
        .all(|(from, to, _)| position(*from) < position(*to))
}

#[test]
fn test_chain_recipe_edges_and_order() {
    let recipe = chain_recipe();
    let graph = RecipeGraph::build(&recipe).expect("chain recipe should be acyclic");

    assert_eq!(graph.recipe_id(), "onion-base");
    assert_eq!(graph.node_count(), 3);
    let edges: Vec<(u32, u32)> = graph.edges().iter().map(|(f, t, _)| (*f, *t)).collect();
    assert_eq!(edges, vec![(0, 1), (1, 2)]);
    assert_eq!(graph.topological_order(), &[0, 1, 2]);
    assert!(is_topological(&graph));
}

#[test]
fn test_edges_record_what_is_passed() {
    let recipe = chain_recipe();
    let graph = RecipeGraph::build(&recipe).unwrap();

    let first = graph.dependency(0, 1).expect("edge 0 -> 1");
    assert_eq!(first.ingredients, vec!["diced onion".to_string()]);
    assert!(first.instruments.is_empty());
    assert!(!first.explicit);
    assert!(!first.is_ordering_only());
    assert!(graph.dependency(0, 2).is_none());
}

#[test]
fn test_cycle_is_rejected_with_step_indices() {
    let recipe = cyclic_recipe();
    let err = RecipeGraph::build(&recipe).unwrap_err();

    match err {
        StructureError::Cycle { steps } => {
            assert_eq!(steps.len(), 3);
            for index in [0, 1, 2] {
                assert!(steps.contains(&index), "cycle should include step {}", index);
            }
        }
        other => panic!("expected a cycle error, got {:?}", other),
    }
}

#[test]
fn test_cycle_error_message_lists_path() {
    let err = RecipeGraph::build(&cyclic_recipe()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Step dependencies form a cycle: 0 -> 1 -> 2"
    );
}

#[test]
fn test_single_step_is_a_lone_node() {
    let recipe = Recipe::new("tea", "Tea").with_step(RecipeStep::new(
        "tea-0",
        0,
        Preparation::new("prep-steep", "steep"),
    ));
    let graph = RecipeGraph::build(&recipe).unwrap();

    assert_eq!(graph.node_count(), 1);
    assert_eq!(graph.edge_count(), 0);
    assert_eq!(graph.topological_order(), &[0]);
}

#[test]
fn test_isolated_steps_are_kept() {
    let mut recipe = chain_recipe();
    recipe.steps.push(RecipeStep::new(
        "preheat",
        3,
        Preparation::new("prep-preheat", "preheat"),
    ));
    let graph = RecipeGraph::build(&recipe).unwrap();

    assert_eq!(graph.node_count(), 4);
    assert_eq!(graph.edge_count(), 2);
    assert_eq!(graph.predecessors(3).unwrap(), Vec::<u32>::new());
    assert_eq!(graph.successors(3).unwrap(), Vec::<u32>::new());
    assert!(graph.topological_order().contains(&3));
}

#[test]
fn test_empty_recipe_is_rejected() {
    let err = RecipeGraph::build(&Recipe::new("empty", "Empty")).unwrap_err();
    assert!(matches!(err, StructureError::EmptyRecipe { recipe_id } if recipe_id == "empty"));
}

#[test]
fn test_duplicate_step_index_is_rejected() {
    let mut recipe = chain_recipe();
    recipe.steps[2].index = 1;
    let err = RecipeGraph::build(&recipe).unwrap_err();
    assert!(matches!(err, StructureError::DuplicateStepIndex { index: 1, .. }));
}

#[test]
fn test_unknown_product_id_is_rejected() {
    let mut recipe = chain_recipe();
    recipe.steps[2].ingredients[0].product_of = Some(ProductReference::by_id("missing"));
    let err = RecipeGraph::build(&recipe).unwrap_err();
    assert_eq!(
        err,
        StructureError::UnknownProduct {
            step: 2,
            product_id: "missing".to_string()
        }
    );
}

#[test]
fn test_unknown_product_index_is_rejected() {
    let mut recipe = chain_recipe();
    recipe.steps[1].ingredients[0].product_of = Some(ProductReference::by_index(0, 4));
    let err = RecipeGraph::build(&recipe).unwrap_err();
    assert_eq!(
        err,
        StructureError::UnknownProductIndex {
            step: 1,
            producer: 0,
            product: 4
        }
    );
}

#[test]
fn test_unknown_prerequisite_is_rejected() {
    let mut recipe = chain_recipe();
    recipe.steps[1].prerequisite_steps.push(9);
    let err = RecipeGraph::build(&recipe).unwrap_err();
    assert_eq!(err, StructureError::UnknownStep { step: 1, missing: 9 });
}

#[test]
fn test_duplicate_product_id_is_rejected() {
    // step 1 uses "dup" from step 0, then step 2 makes another "dup"
    let recipe = Recipe::new("dup", "Dup")
        .with_step(
            RecipeStep::new("s0", 0, Preparation::new("", "chop")).with_product(
                RecipeStepProduct::new("dup", "chopped", ProductType::Ingredient),
            ),
        )
        .with_step(
            RecipeStep::new("s1", 1, Preparation::new("", "fry")).with_ingredient(
                RecipeStepIngredient::from_product("chopped", ProductReference::by_id("dup")),
            ),
        )
        .with_step(
            RecipeStep::new("s2", 2, Preparation::new("", "chop")).with_product(
                RecipeStepProduct::new("dup", "chopped again", ProductType::Ingredient),
            ),
        );

    let err = RecipeGraph::build(&recipe).unwrap_err();
    assert_eq!(
        err,
        StructureError::DuplicateProductId {
            product_id: "dup".to_string(),
            first: 0,
            second: 2
        }
    );
}

#[test]
fn test_step_using_its_own_product_is_a_cycle() {
    let mut recipe = chain_recipe();
    recipe.steps[0]
        .ingredients
        .push(RecipeStepIngredient::from_product(
            "diced onion",
            ProductReference::by_index(0, 0),
        ));

    let err = RecipeGraph::build(&recipe).unwrap_err();
    assert_eq!(err, StructureError::Cycle { steps: vec![0] });
}

#[test]
fn test_step_waiting_on_itself_is_a_cycle() {
    let mut recipe = chain_recipe();
    recipe.steps[1].prerequisite_steps.push(1);

    let err = RecipeGraph::build(&recipe).unwrap_err();
    assert_eq!(err, StructureError::Cycle { steps: vec![1] });
}

#[test]
fn test_explicit_prerequisite_adds_ordering_edge() {
    let mut recipe = chain_recipe();
    recipe.steps.push(
        RecipeStep::new("serve", 3, Preparation::new("prep-serve", "serve")).with_prerequisite(0),
    );
    let graph = RecipeGraph::build(&recipe).unwrap();

    let dependency = graph.dependency(0, 3).expect("explicit edge");
    assert!(dependency.explicit);
    assert!(dependency.is_ordering_only());
    assert!(is_topological(&graph));
}

#[test]
fn test_prerequisite_on_product_edge_shares_the_edge() {
    let mut recipe = chain_recipe();
    recipe.steps[1].prerequisite_steps.push(0);
    let graph = RecipeGraph::build(&recipe).unwrap();

    assert_eq!(graph.edge_count(), 2);
    let dependency = graph.dependency(0, 1).unwrap();
    assert!(dependency.explicit);
    assert!(!dependency.is_ordering_only());
}

#[test]
fn test_order_follows_dependencies_not_listing() {
    // Listed out of dependency order: the first listed step needs the second.
    let recipe = Recipe::new("reversed", "Reversed")
        .with_step(
            RecipeStep::new("b", 1, Preparation::new("", "plate")).with_ingredient(
                RecipeStepIngredient::from_product("cooked rice", ProductReference::by_index(0, 0)),
            ),
        )
        .with_step(
            RecipeStep::new("a", 0, Preparation::new("", "cook")).with_product(
                RecipeStepProduct::new("rice", "cooked rice", ProductType::Ingredient),
            ),
        );
    let graph = RecipeGraph::build(&recipe).unwrap();

    assert_eq!(graph.topological_order(), &[0, 1]);
    assert_eq!(graph.position_of(0), Some(1));
    assert!(is_topological(&graph));
}

#[test]
fn test_predecessor_queries() {
    let graph = RecipeGraph::build(&chain_recipe()).unwrap();

    assert_eq!(graph.predecessors(2).unwrap(), vec![1]);
    assert_eq!(graph.all_predecessors(2).unwrap(), vec![0, 1]);
    assert_eq!(graph.successors(0).unwrap(), vec![1]);
    assert_eq!(graph.predecessors(7), Err(ArgumentError::UnknownStep(7)));
}

#[test]
fn test_ready_steps_walk_completion_order() {
    let graph = RecipeGraph::build(&chain_recipe()).unwrap();
    let mut completed = AHashSet::new();

    assert_eq!(graph.ready_steps(&completed), vec![0]);
    assert!(!graph.is_ready(2, &completed).unwrap());

    completed.insert(0);
    assert_eq!(graph.ready_steps(&completed), vec![1]);

    completed.insert(1);
    assert!(graph.is_ready(2, &completed).unwrap());
    assert_eq!(graph.ready_steps(&completed), vec![2]);

    completed.insert(2);
    assert!(graph.ready_steps(&completed).is_empty());
}

#[test]
fn test_graph_does_not_touch_recipe() {
    let recipe = chain_recipe();
    let before = recipe.clone();
    let _ = RecipeGraph::build(&recipe).unwrap();
    assert_eq!(recipe, before);
}
