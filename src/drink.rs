//! Cocktail records as returned by the remote API, and the projected `Drink`

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const INGREDIENT_PREFIX: &str = "strIngredient";

/// Top-level response of both the search and lookup endpoints.
///
/// `drinks` is `null` (or missing) when nothing matched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DrinksEnvelope {
    #[serde(default)]
    pub drinks: Option<Vec<RawDrink>>,
}

impl DrinksEnvelope {
    /// Project every record, treating a null list as empty
    pub fn into_drinks(self) -> Vec<Drink> {
        self.drinks
            .unwrap_or_default()
            .into_iter()
            .map(Drink::from)
            .collect()
    }

    /// Project the first record, if any
    pub fn into_first(self) -> Option<Drink> {
        self.drinks
            .and_then(|drinks| drinks.into_iter().next())
            .map(Drink::from)
    }
}

/// One raw recipe record
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawDrink {
    #[serde(rename = "idDrink")]
    pub id: String,

    #[serde(rename = "strDrink")]
    pub name: String,

    #[serde(rename = "strDrinkThumb", default)]
    pub thumb: Option<String>,

    #[serde(rename = "strAlcoholic", default)]
    pub alcoholic: Option<String>,

    #[serde(rename = "strGlass", default)]
    pub glass: Option<String>,

    #[serde(rename = "strCategory", default)]
    pub category: Option<String>,

    #[serde(rename = "strInstructions", default)]
    pub instructions: Option<String>,

    /// Remaining fields, including `strIngredient1..N` and measures
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

impl RawDrink {
    /// Non-null, non-blank ingredients ordered by their field number
    pub fn ingredients(&self) -> Vec<String> {
        let mut numbered: Vec<(u32, &str)> = self
            .rest
            .iter()
            .filter_map(|(key, value)| {
                let n = key.strip_prefix(INGREDIENT_PREFIX)?.parse::<u32>().ok()?;
                let name = value.as_str()?.trim();
                (!name.is_empty()).then_some((n, name))
            })
            .collect();

        numbered.sort_by_key(|(n, _)| *n);
        numbered
            .into_iter()
            .map(|(_, name)| name.to_string())
            .collect()
    }
}

/// A cocktail recipe, projected from a [`RawDrink`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Drink {
    pub id: String,
    pub name: String,
    pub image: Option<String>,
    pub info: Option<String>,
    pub glass: Option<String>,
    pub category: Option<String>,
    pub instructions: Option<String>,
    pub ingredients: Vec<String>,
}

impl From<RawDrink> for Drink {
    fn from(raw: RawDrink) -> Self {
        let ingredients = raw.ingredients();
        Self {
            id: raw.id,
            name: raw.name,
            image: raw.thumb,
            info: raw.alcoholic,
            glass: raw.glass,
            category: raw.category,
            instructions: raw.instructions,
            ingredients,
        }
    }
}
