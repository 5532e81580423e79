use clap::{Parser, Subcommand, ValueEnum};
use kondate::prelude::*;
use std::fs;
use std::time::Instant;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Define CLI-specific enums for clap to parse.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum DirectionCli {
    Tb,
    Lr,
    Bt,
    Rl,
}

impl From<DirectionCli> for FlowDirection {
    fn from(direction: DirectionCli) -> Self {
        match direction {
            DirectionCli::Tb => FlowDirection::TopBottom,
            DirectionCli::Lr => FlowDirection::LeftRight,
            DirectionCli::Bt => FlowDirection::BottomTop,
            DirectionCli::Rl => FlowDirection::RightLeft,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum KindCli {
    Flowchart,
    Graph,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ProductKindCli {
    Ingredient,
    Instrument,
    Vessel,
}

impl From<ProductKindCli> for ProductType {
    fn from(kind: ProductKindCli) -> Self {
        match kind {
            ProductKindCli::Ingredient => ProductType::Ingredient,
            ProductKindCli::Instrument => ProductType::Instrument,
            ProductKindCli::Vessel => ProductType::Vessel,
        }
    }
}

/// Recipe dependency graphs, flow charts, scaling and checklists
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Log filter, e.g. "info" or "kondate_cli=debug". RUST_LOG takes precedence.
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a recipe's step dependencies and print the completion order
    Graph {
        /// Path to the recipe JSON file
        recipe_path: String,
    },
    /// Render a recipe as a flow chart
    Diagram {
        recipe_path: String,
        #[arg(short, long, value_enum, default_value = "tb")]
        direction: DirectionCli,
        #[arg(short, long, value_enum, default_value = "flowchart")]
        kind: KindCli,
        /// Write the chart here instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Scale a recipe and print it as JSON
    Scale {
        recipe_path: String,
        #[arg(short, long, default_value_t = 1.0)]
        factor: f64,
        /// Keep fractional instrument and vessel counts instead of rounding up
        #[arg(long)]
        exact_counts: bool,
    },
    /// Print each step as a sentence at the given scale
    Steps {
        recipe_path: String,
        #[arg(short, long, default_value_t = 1.0)]
        factor: f64,
    },
    /// Print the combined equipment checklist for several recipes
    Equipment {
        recipe_paths: Vec<String>,
        /// Also include each recipe's supporting recipes
        #[arg(long)]
        include_supporting: bool,
    },
    /// Print the combined shopping list for several recipes, all at one scale
    Shopping {
        recipe_paths: Vec<String>,
        #[arg(short, long, default_value_t = 1.0)]
        factor: f64,
    },
    /// List unused products available to the step at a position
    Suggest {
        recipe_path: String,
        /// Position of the step being authored
        #[arg(long)]
        up_to: usize,
        #[arg(short, long, value_enum, default_value = "ingredient")]
        kind: ProductKindCli,
    },
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let total_start = Instant::now();
    match cli.command {
        Command::Graph { recipe_path } => run_graph(&recipe_path),
        Command::Diagram {
            recipe_path,
            direction,
            kind,
            output,
        } => run_diagram(&recipe_path, direction.into(), kind, output),
        Command::Scale {
            recipe_path,
            factor,
            exact_counts,
        } => run_scale(&recipe_path, factor, exact_counts),
        Command::Steps {
            recipe_path,
            factor,
        } => run_steps(&recipe_path, factor),
        Command::Equipment {
            recipe_paths,
            include_supporting,
        } => run_equipment(&recipe_paths, include_supporting),
        Command::Shopping {
            recipe_paths,
            factor,
        } => run_shopping(&recipe_paths, factor),
        Command::Suggest {
            recipe_path,
            up_to,
            kind,
        } => run_suggest(&recipe_path, up_to, kind.into()),
    }
    info!("Total execution: {:?}", total_start.elapsed());
}

fn load_recipe(path: &str) -> Recipe {
    let load_start = Instant::now();
    let json = fs::read_to_string(path).unwrap_or_else(|e| {
        exit_with_error(&format!("Failed to read recipe file '{}': {}", path, e))
    });
    let recipe = Recipe::from_json(&json)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to load recipe '{}': {}", path, e)));
    info!(
        "Loaded recipe '{}' ({} steps) in {:?}",
        recipe.name,
        recipe.steps.len(),
        load_start.elapsed()
    );
    recipe
}

fn load_recipes(paths: &[String]) -> Vec<Recipe> {
    if paths.is_empty() {
        exit_with_error("At least one recipe path is required.");
    }
    paths.iter().map(|p| load_recipe(p)).collect()
}

fn build_graph(recipe: &Recipe) -> RecipeGraph {
    let build_start = Instant::now();
    let graph = RecipeGraph::build(recipe).unwrap_or_else(|e| {
        exit_with_error(&format!("Recipe '{}' cannot be displayed: {}", recipe.name, e))
    });
    info!(
        "Built graph with {} nodes and {} edges in {:?}",
        graph.node_count(),
        graph.edge_count(),
        build_start.elapsed()
    );
    graph
}

fn run_graph(recipe_path: &str) {
    let recipe = load_recipe(recipe_path);
    let graph = build_graph(&recipe);

    println!("Recipe: {}", recipe.name);
    println!("Completion order:");
    for index in graph.topological_order() {
        let preparation = recipe
            .step_by_index(*index)
            .map(|s| s.preparation.name.as_str())
            .unwrap_or_default();
        println!("  #{} {}", index + 1, preparation);
    }

    println!("Dependencies:");
    for (from, to, dependency) in graph.edges() {
        let passed: Vec<&str> = dependency
            .ingredients
            .iter()
            .chain(&dependency.instruments)
            .chain(&dependency.vessels)
            .map(String::as_str)
            .collect();
        if passed.is_empty() {
            println!("  #{} -> #{}", from + 1, to + 1);
        } else {
            println!("  #{} -> #{} ({})", from + 1, to + 1, passed.join(", "));
        }
    }
}

fn run_diagram(recipe_path: &str, direction: FlowDirection, kind: KindCli, output: Option<String>) {
    let recipe = load_recipe(recipe_path);
    let graph = build_graph(&recipe);

    let render_start = Instant::now();
    let renderer = DiagramRenderer::builder()
        .direction(direction)
        .kind(match kind {
            KindCli::Flowchart => DiagramKind::Flowchart,
            KindCli::Graph => DiagramKind::Graph,
        })
        .build();
    let diagram = renderer
        .render_with_graph(&recipe, &graph)
        .unwrap_or_else(|e| exit_with_error(&format!("Rendering failed: {}", e)));
    info!("Rendered diagram in {:?}", render_start.elapsed());

    match output {
        Some(path) => {
            fs::write(&path, diagram).unwrap_or_else(|e| {
                exit_with_error(&format!("Failed to write diagram to '{}': {}", path, e))
            });
            println!("Diagram written to '{}'", path);
        }
        None => print!("{}", diagram),
    }
}

fn run_scale(recipe_path: &str, factor: f64, exact_counts: bool) {
    let recipe = load_recipe(recipe_path);
    let factor = ScaleFactor::new(factor)
        .unwrap_or_else(|e| exit_with_error(&format!("Invalid scale: {}", e)));

    let scaler = Scaler::builder()
        .count_rounding(if exact_counts {
            CountRounding::Exact
        } else {
            CountRounding::Ceiling
        })
        .build();
    let scale_start = Instant::now();
    let scaled = scaler.scale(&recipe, factor);
    debug!("Scaled by {} in {:?}", factor.value(), scale_start.elapsed());

    eprintln!("Yield: {}", scaled.yield_text());
    let json = serde_json::to_string_pretty(&scaled.recipe)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to serialize scaled recipe: {}", e)));
    println!("{}", json);
}

fn run_steps(recipe_path: &str, factor: f64) {
    let recipe = load_recipe(recipe_path);
    for step in &recipe.steps {
        let text = step_text(&recipe, step, factor)
            .unwrap_or_else(|e| exit_with_error(&format!("Step #{}: {}", step.index + 1, e)));
        println!("{}. {}", step.index + 1, text);
    }
}

fn run_equipment(recipe_paths: &[String], include_supporting: bool) {
    let recipes = load_recipes(recipe_paths);
    let roots: Vec<&Recipe> = recipes.iter().collect();
    let included = if include_supporting {
        with_supporting_recipes(&roots)
    } else {
        roots
    };

    let entries = determine_all_instruments_for_recipes(&included);
    debug!("Aggregated {} equipment entries", entries.len());
    for entry in entries {
        let kind = match entry {
            EquipmentEntry::Instrument { .. } => "instrument",
            EquipmentEntry::Vessel { .. } => "vessel",
        };
        println!("{} x {} ({})", entry.quantity(), entry.name(), kind);
    }
}

fn run_shopping(recipe_paths: &[String], factor: f64) {
    let recipes = load_recipes(recipe_paths);
    let meal: Vec<(&Recipe, f64)> = recipes.iter().map(|r| (r, factor)).collect();

    let entries = determine_all_ingredients_for_recipes(&meal)
        .unwrap_or_else(|e| exit_with_error(&format!("Invalid scale: {}", e)));
    for entry in entries {
        if entry.to_taste {
            println!("{} (to taste)", entry.ingredient.name);
            continue;
        }
        let unit = entry
            .measurement_unit
            .as_ref()
            .map(|u| format!(" {}", u.name))
            .unwrap_or_default();
        println!("{}{} {}", entry.quantity, unit, entry.ingredient.name);
    }
}

fn run_suggest(recipe_path: &str, up_to: usize, kind: ProductType) {
    let recipe = load_recipe(recipe_path);
    let suggestions = available_products(&recipe, up_to, kind)
        .unwrap_or_else(|e| exit_with_error(&format!("Invalid step position: {}", e)));
    if suggestions.is_empty() {
        println!("No unused {:?} products before position {}", kind, up_to);
        return;
    }
    for suggestion in suggestions {
        println!(
            "{} (step #{}, product {})",
            suggestion.product.name,
            suggestion.step_index + 1,
            suggestion.product_index
        );
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
