//! Prompt assembly for the three gateway operations.

use recipe_core::{Language, UserFilters};

/// System instruction for ingredient identification.
///
/// The model is told to answer with a bare comma-separated list and to use
/// the `EMPTY` sentinel when no food is visible; the sanitizer handles the
/// cases where it does not comply.
pub fn identify_system_instruction(language: Language) -> &'static str {
    match language {
        Language::No => {
            "Du er en matekspert. Identifiser ingredienser i bildet. \
             Svar KUN med en liste separert med komma. Ingen introduksjon. \
             Hvis ingen mat, svar 'EMPTY'."
        }
        Language::En => {
            "Food expert. Identify ingredients. Respond ONLY with a \
             comma-separated list. No preamble. If no food, respond 'EMPTY'."
        }
    }
}

/// User-visible part of the identification request.
pub const IDENTIFY_PROMPT: &str = "List ingredients found in this photo.";

/// System instruction for recipe generation.
pub fn recipes_system_instruction(language: Language, recipe_count: u8) -> String {
    match language {
        Language::No => format!(
            "Du er en kreativ kokk. Lag {} oppskrifter som en JSON-matrise. \
             Svar KUN med JSON. For 'imagePrompt', skriv en detaljert beskrivelse \
             på engelsk av hvordan retten ser ut servert (f.eks. 'A steaming bowl \
             of creamy tomato soup topped with fresh basil').",
            recipe_count
        ),
        Language::En => format!(
            "Creative chef. Create {} recipes as a JSON array. Respond ONLY \
             with JSON. For 'imagePrompt', write a detailed English description \
             of the plated dish.",
            recipe_count
        ),
    }
}

/// Build the recipe generation prompt from ingredients and filters.
pub fn recipes_prompt(
    ingredients: &[String],
    filters: &UserFilters,
    language: Language,
    recipe_count: u8,
) -> String {
    let ingredient_list = ingredients.join(", ");
    let diet = filters.diet.join(", ");
    let allergies = filters.allergies.join(", ");

    match language {
        Language::No => {
            let (max_calories, min_protein) = if filters.nutrition_enabled {
                (
                    filters.max_calories.to_string(),
                    format!("{} g", filters.min_protein),
                )
            } else {
                ("Ubegrenset".to_string(), "Ubegrenset".to_string())
            };
            format!(
                "Ingredienser: {ingredient_list}.\n\
                 Filtre: {} kjøkken, {diet} diett. Allergier: {allergies}.\n\
                 Maks kalorier: {max_calories}. Min protein: {min_protein}.\n\
                 Lag {recipe_count} gode oppskrifter på NORSK.",
                filters.cuisine
            )
        }
        Language::En => {
            let (max_calories, min_protein) = if filters.nutrition_enabled {
                (
                    filters.max_calories.to_string(),
                    format!("{} g", filters.min_protein),
                )
            } else {
                ("Unlimited".to_string(), "Unlimited".to_string())
            };
            format!(
                "Ingredients: {ingredient_list}.\n\
                 Filters: {} cuisine, {diet} diet. Allergies: {allergies}.\n\
                 Max calories: {max_calories}. Min protein: {min_protein}.\n\
                 Create {recipe_count} detailed recipes in ENGLISH.",
                filters.cuisine
            )
        }
    }
}
