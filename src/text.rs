//! Human-readable text for steps, lists and durations.

use crate::error::{Error, StructureError};
use crate::quantity::{QuantityRange, clean_float, format_amount};
use crate::recipe::{
    ProductResolver, ProductType, Recipe, RecipeStep, RecipeStepIngredient,
    RecipeStepInstrument, RecipeStepVessel,
};
use crate::scale::ScaleFactor;
use itertools::Itertools;

/// Joins items the way English prose does: "a", "a and b", "a, b, and c".
pub fn english_list<S: AsRef<str>>(items: &[S]) -> String {
    match items {
        [] => String::new(),
        [only] => only.as_ref().to_string(),
        [first, second] => format!("{} and {}", first.as_ref(), second.as_ref()),
        [rest @ .., last] => format!(
            "{}, and {}",
            rest.iter().map(|s| s.as_ref()).join(", "),
            last.as_ref()
        ),
    }
}

/// Formats whole seconds as "1 day 2 hours 5 minutes", skipping zero components.
pub fn format_duration(seconds: u32) -> String {
    let units = [
        (86_400, "day", "days"),
        (3_600, "hour", "hours"),
        (60, "minute", "minutes"),
        (1, "second", "seconds"),
    ];
    let mut remaining = seconds;
    let mut parts = Vec::new();
    for (size, singular, plural) in units {
        let count = remaining / size;
        remaining %= size;
        if count > 0 {
            parts.push(format!(
                "{} {}",
                count,
                if count == 1 { singular } else { plural }
            ));
        }
    }
    if parts.is_empty() {
        "0 seconds".to_string()
    } else {
        parts.join(" ")
    }
}

/// Collapses whitespace and truncates to `max_chars` characters, marking the cut with "...".
pub fn condense(text: &str, max_chars: usize) -> String {
    let collapsed = text.split_whitespace().join(" ");
    if collapsed.chars().count() <= max_chars {
        return collapsed;
    }
    let keep = max_chars.saturating_sub(3);
    let cut: String = collapsed.chars().take(keep).collect();
    format!("{}...", cut.trim_end())
}

/// Writes out a step as a sentence at the given scale.
///
/// Explicit instructions are used verbatim when present. Otherwise the sentence is assembled
/// from the step's instruments, preparation, ingredients, vessels and products, e.g.
/// "Using a knife, dice 2 onions in a bowl to yield the ingredient diced onion."
///
/// Fails on a non-positive scale or when a product reference cannot be resolved.
pub fn step_text(recipe: &Recipe, step: &RecipeStep, scale: f64) -> Result<String, Error> {
    let scale = ScaleFactor::new(scale)?;
    let resolver = ProductResolver::new(recipe);

    let sentence = if !step.explicit_instructions.trim().is_empty() {
        step.explicit_instructions.split_whitespace().join(" ")
    } else {
        let instruments = step
            .instruments
            .iter()
            .map(|i| instrument_phrase(&resolver, step.index, i))
            .collect::<Result<Vec<_>, _>>()?;
        let ingredients = step
            .ingredients
            .iter()
            .map(|i| ingredient_phrase(&resolver, step.index, i, scale))
            .collect::<Result<Vec<_>, _>>()?;
        let vessels = step
            .vessels
            .iter()
            .map(|v| vessel_phrase(&resolver, step.index, v))
            .collect::<Result<Vec<_>, _>>()?;

        let mut sentence = String::new();
        if !instruments.is_empty() {
            sentence.push_str(&format!("Using {}, ", english_list(&instruments)));
        }
        sentence.push_str(&step.preparation.name);
        if !ingredients.is_empty() {
            sentence.push(' ');
            sentence.push_str(&english_list(&ingredients));
        }
        if !vessels.is_empty() {
            sentence.push(' ');
            sentence.push_str(&english_list(&vessels));
        }
        let products = products_phrase(step);
        if !products.is_empty() {
            sentence.push_str(" to yield ");
            sentence.push_str(&products);
        }
        sentence.push('.');
        sentence.split_whitespace().join(" ")
    };

    Ok(capitalize(&sentence))
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn from_step(
    resolver: &ProductResolver<'_>,
    consumer: u32,
    reference: &crate::recipe::ProductReference,
) -> Result<String, StructureError> {
    let resolved = resolver.resolve(consumer, reference)?;
    Ok(format!(" from step #{}", resolved.step_index + 1))
}

fn count_phrase(quantity: &QuantityRange, plural: &str) -> String {
    if quantity.is_range() {
        format!(
            "{} to {} {}",
            format_amount(quantity.min),
            format_amount(quantity.upper()),
            plural
        )
    } else {
        format!("{} {}", format_amount(quantity.min), plural)
    }
}

fn instrument_phrase(
    resolver: &ProductResolver<'_>,
    consumer: u32,
    instrument: &RecipeStepInstrument,
) -> Result<String, StructureError> {
    if let Some(reference) = &instrument.product_of {
        return Ok(format!(
            "the {}{}",
            instrument.name,
            from_step(resolver, consumer, reference)?
        ));
    }
    let (name, plural) = match &instrument.instrument {
        Some(valid) => (valid.name.as_str(), plural_or(&valid.plural_name, &valid.name)),
        None => (instrument.name.as_str(), instrument.name.as_str()),
    };
    if clean_float(instrument.quantity.min) == 1.0 && !instrument.quantity.is_range() {
        Ok(format!("a {}", name))
    } else {
        Ok(count_phrase(&instrument.quantity, plural))
    }
}

fn vessel_phrase(
    resolver: &ProductResolver<'_>,
    consumer: u32,
    vessel: &RecipeStepVessel,
) -> Result<String, StructureError> {
    let preposition = if vessel.vessel_preposition.is_empty() {
        String::new()
    } else {
        format!("{} ", vessel.vessel_preposition)
    };
    if let Some(reference) = &vessel.product_of {
        return Ok(format!(
            "{}the {}{}",
            preposition,
            vessel.name,
            from_step(resolver, consumer, reference)?
        ));
    }
    let (name, plural) = match &vessel.vessel {
        Some(valid) => (valid.name.as_str(), plural_or(&valid.plural_name, &valid.name)),
        None => (vessel.name.as_str(), vessel.name.as_str()),
    };
    if clean_float(vessel.quantity.min) == 1.0 && !vessel.quantity.is_range() {
        Ok(format!("{}a {}", preposition, name))
    } else {
        Ok(format!("{}{}", preposition, count_phrase(&vessel.quantity, plural)))
    }
}

fn ingredient_phrase(
    resolver: &ProductResolver<'_>,
    consumer: u32,
    ingredient: &RecipeStepIngredient,
    scale: ScaleFactor,
) -> Result<String, StructureError> {
    if let Some(reference) = &ingredient.product_of {
        return Ok(format!(
            "the {}{}",
            ingredient.name,
            from_step(resolver, consumer, reference)?
        ));
    }

    let (singular, plural) = match &ingredient.ingredient {
        Some(valid) => (valid.name.as_str(), plural_or(&valid.plural_name, &valid.name)),
        None => (ingredient.name.as_str(), ingredient.name.as_str()),
    };
    if ingredient.to_taste {
        return Ok(format!("{} to taste", plural));
    }

    let quantity = ingredient.quantity.scaled_unchecked(scale.value());
    let amount = clean_float(quantity.min);
    let unit = ingredient
        .measurement_unit
        .as_ref()
        .map(|u| {
            if amount == 1.0 {
                u.name.as_str()
            } else {
                plural_or(&u.plural_name, &u.name)
            }
        })
        .filter(|u| !matches!(*u, "" | "unit" | "units"));
    let name = if amount == 1.0 { singular } else { plural };

    let mut phrase = if quantity.is_range() {
        format!("{} to {}", format_amount(quantity.min), format_amount(quantity.upper()))
    } else {
        format_amount(quantity.min)
    };
    if let Some(unit) = unit {
        phrase.push(' ');
        phrase.push_str(unit);
    }
    phrase.push(' ');
    phrase.push_str(name);
    Ok(phrase)
}

fn plural_or<'a>(plural: &'a str, singular: &'a str) -> &'a str {
    if plural.is_empty() { singular } else { plural }
}

fn products_phrase(step: &RecipeStep) -> String {
    let named = |kind: ProductType| -> Vec<&str> {
        step.products
            .iter()
            .filter(|p| p.kind == kind)
            .map(|p| p.name.as_str())
            .collect()
    };

    let mut groups = Vec::new();
    let ingredients = named(ProductType::Ingredient);
    if !ingredients.is_empty() {
        groups.push(format!(
            "the {} {}",
            if ingredients.len() == 1 {
                "ingredient"
            } else {
                "ingredients"
            },
            english_list(&ingredients)
        ));
    }
    for kind in [ProductType::Instrument, ProductType::Vessel] {
        let items: Vec<String> = named(kind).into_iter().map(|n| format!("a {}", n)).collect();
        if !items.is_empty() {
            groups.push(english_list(&items));
        }
    }
    english_list(&groups)
}
