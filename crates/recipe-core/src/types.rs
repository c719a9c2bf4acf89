//! Application data model shared across crates.

use serde::{Deserialize, Serialize};

/// Maximum number of scan history entries kept per user.
///
/// The history behaves as a fixed-size ring via truncation: inserting a new
/// entry at the front drops the oldest entry beyond this cap.
pub const HISTORY_CAP: usize = 20;

/// Cuisine options offered by the filter UI. The first entry is the default.
pub const CUISINES: &[&str] = &[
    "All", "Italian", "Asian", "Nordic", "Mexican", "Indian", "French",
];

/// Diet tag options (multi-select).
pub const DIET_OPTIONS: &[&str] = &["vegetarian", "vegan", "halal", "lowcarb", "highprotein"];

/// Allergy tag options (multi-select).
pub const ALLERGY_OPTIONS: &[&str] = &["nuts", "gluten", "lactose", "soy", "egg", "shellfish"];

/// Display language for prompts, notices and locale formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English.
    En,
    /// Norwegian (bokmål).
    No,
}

impl Default for Language {
    fn default() -> Self {
        Self::No
    }
}

impl Language {
    /// Short code used as the stored language preference.
    pub fn code(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::No => "no",
        }
    }

    /// Parse a stored language code. Unknown values fall back to the default.
    pub fn from_code(code: &str) -> Self {
        match code {
            "en" => Self::En,
            _ => Self::No,
        }
    }
}

/// A signed-in user as held in session memory and under the active-user key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Opaque unique identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Unique email, stored lowercased.
    pub email: String,
    /// Optional avatar image reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// Pro subscribers are exempt from the usage gate.
    #[serde(default)]
    pub is_pro: bool,
}

/// A registered account: the stored superset of [`User`] with the login
/// credential. The credential is only ever compared locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    #[serde(flatten)]
    pub user: User,
    /// Login credential for local matching.
    pub credential: String,
}

/// A recipe produced by the AI gateway. Immutable once created; identity is
/// by `id` for deduplication against the favorites set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub prep_time: String,
    #[serde(default)]
    pub difficulty: String,
    #[serde(default)]
    pub cuisine: String,
    #[serde(default)]
    pub available_ingredients: Vec<String>,
    #[serde(default)]
    pub missing_ingredients: Vec<String>,
    #[serde(default)]
    pub instructions: Vec<String>,
    #[serde(default)]
    pub shopping_list: Vec<String>,
    #[serde(default)]
    pub calories: f64,
    #[serde(default)]
    pub protein: f64,
    #[serde(default)]
    pub image_prompt: String,
}

/// One scan in the per-user history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Locale-formatted timestamp label.
    pub date: String,
    /// Ingredient names detected in this capture.
    pub ingredients: Vec<String>,
}

/// An item on the shopping list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingItem {
    pub id: String,
    pub text: String,
    pub completed: bool,
}

/// Dietary and nutrition filters applied to recipe generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserFilters {
    /// Single cuisine selection from [`CUISINES`].
    pub cuisine: String,
    /// Diet tags (multi-select).
    pub diet: Vec<String>,
    /// Allergy tags (multi-select).
    pub allergies: Vec<String>,
    /// Whether the calorie/protein bounds apply.
    pub nutrition_enabled: bool,
    /// Maximum calories per serving, when nutrition is enabled.
    pub max_calories: u32,
    /// Minimum grams of protein per serving, when nutrition is enabled.
    pub min_protein: u32,
}

impl Default for UserFilters {
    fn default() -> Self {
        Self {
            cuisine: "All".to_string(),
            diet: Vec::new(),
            allergies: Vec::new(),
            nutrition_enabled: false,
            max_calories: 800,
            min_protein: 20,
        }
    }
}
