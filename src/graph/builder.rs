use super::{StepDependency, StepNode};
use crate::error::StructureError;
use crate::recipe::{ProductReference, ProductResolver, Recipe};
use ahash::AHashMap;
use petgraph::graph::{DiGraph, NodeIndex};

/// What a consuming step receives from its producer.
#[derive(Debug, Clone, Copy)]
enum Provision {
    Ingredient,
    Instrument,
    Vessel,
}

/// Collects nodes and dependency edges from a recipe. Cycles are not checked here.
pub(super) struct GraphBuilder<'a> {
    recipe: &'a Recipe,
    resolver: ProductResolver<'a>,
    graph: DiGraph<StepNode, StepDependency>,
    nodes: AHashMap<u32, NodeIndex>,
}

impl<'a> GraphBuilder<'a> {
    pub(super) fn new(recipe: &'a Recipe) -> Self {
        Self {
            recipe,
            resolver: ProductResolver::new(recipe),
            graph: DiGraph::with_capacity(recipe.steps.len(), recipe.steps.len()),
            nodes: AHashMap::with_capacity(recipe.steps.len()),
        }
    }

    pub(super) fn build(
        mut self,
    ) -> Result<(DiGraph<StepNode, StepDependency>, AHashMap<u32, NodeIndex>), StructureError>
    {
        let recipe = self.recipe;
        if recipe.steps.is_empty() {
            return Err(StructureError::EmptyRecipe {
                recipe_id: recipe.id.clone(),
            });
        }

        let mut producers: AHashMap<&str, u32> = AHashMap::new();
        for (position, step) in recipe.steps.iter().enumerate() {
            if self.nodes.contains_key(&step.index) {
                return Err(StructureError::DuplicateStepIndex {
                    recipe_id: recipe.id.clone(),
                    index: step.index,
                });
            }
            let node = self.graph.add_node(StepNode {
                position,
                index: step.index,
                id: step.id.clone(),
            });
            self.nodes.insert(step.index, node);

            for product in step.products.iter().filter(|p| !p.id.is_empty()) {
                if let Some(first) = producers.insert(product.id.as_str(), step.index) {
                    return Err(StructureError::DuplicateProductId {
                        product_id: product.id.clone(),
                        first,
                        second: step.index,
                    });
                }
            }
        }

        for (position, step) in recipe.steps.iter().enumerate() {
            let consumer = NodeIndex::new(position);

            for ingredient in &step.ingredients {
                if let Some(reference) = &ingredient.product_of {
                    self.add_product_edge(
                        consumer,
                        step.index,
                        reference,
                        Provision::Ingredient,
                        &ingredient.name,
                    )?;
                }
            }
            for instrument in &step.instruments {
                if let Some(reference) = &instrument.product_of {
                    self.add_product_edge(
                        consumer,
                        step.index,
                        reference,
                        Provision::Instrument,
                        &instrument.name,
                    )?;
                }
            }
            for vessel in &step.vessels {
                if let Some(reference) = &vessel.product_of {
                    self.add_product_edge(
                        consumer,
                        step.index,
                        reference,
                        Provision::Vessel,
                        &vessel.name,
                    )?;
                }
            }

            for prerequisite in &step.prerequisite_steps {
                let producer =
                    self.nodes
                        .get(prerequisite)
                        .copied()
                        .ok_or(StructureError::UnknownStep {
                            step: step.index,
                            missing: *prerequisite,
                        })?;
                self.edge_mut(producer, consumer).explicit = true;
            }
        }

        Ok((self.graph, self.nodes))
    }

    fn add_product_edge(
        &mut self,
        consumer: NodeIndex,
        consumer_index: u32,
        reference: &ProductReference,
        provision: Provision,
        name: &str,
    ) -> Result<(), StructureError> {
        let resolved = self.resolver.resolve(consumer_index, reference)?;
        let producer = NodeIndex::new(resolved.position);
        let name = if name.is_empty() {
            resolved.product.name.clone()
        } else {
            name.to_string()
        };

        let dependency = self.edge_mut(producer, consumer);
        let names = match provision {
            Provision::Ingredient => &mut dependency.ingredients,
            Provision::Instrument => &mut dependency.instruments,
            Provision::Vessel => &mut dependency.vessels,
        };
        if !names.contains(&name) {
            names.push(name);
        }
        Ok(())
    }

    /// Multiple references between the same pair of steps share one edge.
    fn edge_mut(&mut self, from: NodeIndex, to: NodeIndex) -> &mut StepDependency {
        let edge = match self.graph.find_edge(from, to) {
            Some(edge) => edge,
            None => self.graph.add_edge(from, to, StepDependency::default()),
        };
        &mut self.graph[edge]
    }
}
