//! Category → hashtag presets.
//!
//! A built-in table covers the verticals the scraper was first pointed at.
//! An optional YAML file replaces it wholesale:
//!
//! ```yaml
//! categories:
//!   - name: restaurant
//!     hashtags: [foodie, streetfood]
//! ```

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Fallback category used when a requested category has no preset.
pub const GENERIC_CATEGORY: &str = "_generic";

const BUILTIN_PRESETS: &[(&str, &[&str])] = &[
    (
        "restaurant",
        &[
            "restaurant",
            "foodie",
            "foodreels",
            "viralfood",
            "streetfood",
            "foodlover",
            "fypfood",
            "foodvibes",
            "cheesepull",
            "dinnerdate",
            "lunchideas",
            "foodporn",
            "forkyeah",
        ],
    ),
    (
        "burger",
        &[
            "burgerlover",
            "burgertime",
            "burgerreels",
            "smashburger",
            "cheeseburger",
            "burgersoftiktok",
            "burgersofinstagram",
        ],
    ),
    (
        "pizza",
        &[
            "pizzatime",
            "pizzanight",
            "pizzareels",
            "pizzalover",
            "pizzalovers",
            "pizzalove",
        ],
    ),
    (
        "cafe",
        &[
            "coffee",
            "coffeereels",
            "coffeetime",
            "coffeelover",
            "latteart",
            "coffeeshop",
            "coffeebar",
            "coffeebreak",
        ],
    ),
    (
        "bakery",
        &[
            "bakery",
            "bakerylove",
            "croissant",
            "pastry",
            "dessertreels",
            "sweettreats",
            "chocolatelover",
            "dessertlover",
        ],
    ),
    (
        "bar",
        &[
            "cocktails",
            "cocktailreels",
            "mixology",
            "bartenderlife",
            "nightout",
            "happyhour",
            "drinkswithfriends",
        ],
    ),
    (
        "gym",
        &[
            "gym",
            "gymreels",
            "fitness",
            "workout",
            "fitreels",
            "gymmotivation",
            "gymlife",
            "legday",
            "pushpulllegs",
            "hypertrophy",
        ],
    ),
    (
        "personal_trainer",
        &[
            "personaltrainer",
            "ptlife",
            "onlinetraining",
            "onlinecoach",
            "fitnessmotivation",
            "homeworkout",
        ],
    ),
    (
        "yoga",
        &[
            "yoga",
            "yogareels",
            "yogapractice",
            "yogainspiration",
            "yogaflow",
            "mindfulness",
        ],
    ),
    (
        "beauty_salon",
        &[
            "hairreels",
            "hairtransformation",
            "hairgoals",
            "salonreels",
            "nailart",
            "nailsreels",
            "beautysalon",
        ],
    ),
    (
        "clinic",
        &[
            "skincareclinic",
            "dermatology",
            "aestheticclinic",
            "beforeandafter",
            "skinreels",
            "facialtreatment",
        ],
    ),
    (
        "dentist",
        &[
            "dentalreels",
            "smilemakeover",
            "teethwhitening",
            "dentist",
            "dentalclinic",
            "beforeandafter",
        ],
    ),
    (
        "hotel",
        &[
            "hotelreels",
            "hotellife",
            "staycation",
            "luxuryhotel",
            "boutiquehotel",
            "hotelview",
        ],
    ),
    (
        "resort",
        &[
            "beachresort",
            "poolday",
            "resortlife",
            "vacationvibes",
            "summerreels",
        ],
    ),
    (
        "party",
        &[
            "partyreels",
            "nightlife",
            "clubreels",
            "djlife",
            "festivalseason",
        ],
    ),
    (
        "supermarket",
        &[
            "groceryhaul",
            "supermarket",
            "shoppingreels",
            "groceryshopping",
            "budgetshopping",
        ],
    ),
    (
        "fashion_store",
        &[
            "outfitinspo",
            "ootdreels",
            "fashionreels",
            "tryonhaul",
            "streetstyle",
        ],
    ),
    (
        GENERIC_CATEGORY,
        &["trending", "viral", "explorepage", "reels", "fyp"],
    ),
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryConfig {
    pub name: String,
    pub hashtags: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct CategoriesFile {
    pub categories: Vec<CategoryConfig>,
}

/// Hashtags chosen for a requested category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCategory {
    pub category: String,
    pub hashtags: Vec<String>,
    /// `true` when the category had no preset and the generic set was used.
    pub used_fallback: bool,
}

/// Lookup table from category name to its hashtag set.
#[derive(Debug, Clone)]
pub struct CategoryCatalog {
    entries: BTreeMap<String, Vec<String>>,
}

impl CategoryCatalog {
    /// Catalog backed by the built-in presets.
    #[must_use]
    pub fn builtin() -> Self {
        let entries = BUILTIN_PRESETS
            .iter()
            .map(|(name, tags)| ((*name).to_string(), normalize_hashtags(tags.iter())))
            .collect();
        Self { entries }
    }

    /// Load and validate a catalog from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::CategoriesFileIo {
                path: path.display().to_string(),
                source: e,
            })?;

        let file: CategoriesFile = serde_yaml::from_str(&content)?;
        validate_categories(&file)?;

        let entries = file
            .categories
            .into_iter()
            .map(|c| (c.name.trim().to_lowercase(), normalize_hashtags(&c.hashtags)))
            .collect();
        Ok(Self { entries })
    }

    /// Use the file at `path` when given, the built-in presets otherwise.
    ///
    /// # Errors
    ///
    /// Propagates [`Self::from_file`] errors.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::from_file(p),
            None => Ok(Self::builtin()),
        }
    }

    /// Resolve `category` to its hashtag set, falling back to the generic
    /// preset when the catalog has no entry for it.
    #[must_use]
    pub fn resolve(&self, category: &str) -> ResolvedCategory {
        let key = category.trim().to_lowercase();
        if let Some(tags) = self.entries.get(&key) {
            return ResolvedCategory {
                category: key,
                hashtags: tags.clone(),
                used_fallback: false,
            };
        }
        ResolvedCategory {
            category: key,
            hashtags: self
                .entries
                .get(GENERIC_CATEGORY)
                .cloned()
                .unwrap_or_default(),
            used_fallback: true,
        }
    }

    /// Category names in alphabetical order, paired with their hashtags.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(name, tags)| (name.as_str(), tags.as_slice()))
    }
}

/// Strip a leading `#`, trim, and lowercase one hashtag. Blank input yields `None`.
#[must_use]
pub fn normalize_hashtag(raw: &str) -> Option<String> {
    let tag = raw.trim().trim_start_matches('#').trim().to_lowercase();
    if tag.is_empty() {
        None
    } else {
        Some(tag)
    }
}

/// Normalize a hashtag list, dropping blanks and repeats but keeping the
/// first-seen order (query order matters to the collector's merge).
pub fn normalize_hashtags<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    raw.into_iter()
        .filter_map(|t| normalize_hashtag(t.as_ref()))
        .filter(|t| seen.insert(t.clone()))
        .collect()
}

fn validate_categories(file: &CategoriesFile) -> Result<(), ConfigError> {
    let mut seen_names = HashSet::new();

    for category in &file.categories {
        let name = category.name.trim();
        if name.is_empty() {
            return Err(ConfigError::Validation(
                "category name must be non-empty".to_string(),
            ));
        }

        if normalize_hashtags(&category.hashtags).is_empty() {
            return Err(ConfigError::Validation(format!(
                "category '{name}' has no hashtags"
            )));
        }

        if !seen_names.insert(name.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate category name: '{name}'"
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "categories_test.rs"]
mod tests;
