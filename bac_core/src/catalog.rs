//! Built-in catalog of drinks, foods and impairment tiers.
//!
//! The numbers in this module are the model's fixed constants. They are not
//! configurable.

use crate::impairment::{DrivingFitness, ImpairmentTier, StatusColor};
use crate::types::{DrinkKind, FoodKind};
use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;

/// Widmark distribution ratio for males (also the fallback ratio)
pub const WIDMARK_RATIO_MALE: f64 = 0.73;

/// Widmark distribution ratio for females
pub const WIDMARK_RATIO_FEMALE: f64 = 0.66;

/// Alcohol elimination in BAC percent per hour
pub const ELIMINATION_RATE: f64 = 0.015;

/// Chronic drinkers eliminate 20% faster
pub const CHRONIC_ELIMINATION_MULTIPLIER: f64 = 1.2;

/// Conversion constant of the modified Widmark formula (oz, lbs)
pub const WIDMARK_CONSTANT: f64 = 5.14;

/// Per-se legal driving limit
pub const LEGAL_LIMIT: f64 = 0.08;

/// Spacing between drinks when an order has quantity > 1
pub const DRINK_SPACING_MINUTES: i64 = 30;

/// Pure alcohol in one US standard drink
pub const STANDARD_DRINK_ALCOHOL_OZ: f64 = 0.6;

/// A default serving for a drink category
#[derive(Clone, Debug, Serialize)]
pub struct StandardDrink {
    pub kind: DrinkKind,
    pub name: String,
    pub size_oz: f64,
    pub alcohol_percent: f64,
}

/// Gastric behaviour of a food category
#[derive(Clone, Debug, Serialize)]
pub struct FoodProfile {
    pub kind: FoodKind,
    pub name: String,
    /// Minutes for the stomach to roughly halve; 0 means empty stomach
    pub gastric_half_time_min: f64,
    /// Nominal fraction by which this food lowers peak BAC
    pub peak_reduction: f64,
}

/// The complete set of lookup tables
#[derive(Clone, Debug)]
pub struct Catalog {
    pub drinks: HashMap<DrinkKind, StandardDrink>,
    pub foods: HashMap<FoodKind, FoodProfile>,
    /// Ascending by threshold
    pub tiers: Vec<ImpairmentTier>,
    pub generic_drink: StandardDrink,
    pub fallback_food: FoodKind,
}

/// Cached default catalog - built once and reused across all operations
static DEFAULT_CATALOG: Lazy<Catalog> = Lazy::new(build_default_catalog);

/// Get a reference to the cached default catalog
pub fn get_default_catalog() -> &'static Catalog {
    &DEFAULT_CATALOG
}

/// Builds the default catalog
///
/// **Note**: prefer `get_default_catalog()`; this is kept for tests and
/// validation of freshly built tables.
pub fn build_default_catalog() -> Catalog {
    let drinks = [
        (DrinkKind::BeerLight, "Light Beer", 12.0, 4.2),
        (DrinkKind::BeerRegular, "Beer", 12.0, 5.0),
        (DrinkKind::BeerIpa, "IPA", 12.0, 6.5),
        (DrinkKind::BeerStout, "Stout", 12.0, 7.0),
        (DrinkKind::WineLight, "White Wine", 5.0, 11.0),
        (DrinkKind::WineRed, "Red Wine", 5.0, 13.5),
        (DrinkKind::WineFortified, "Fortified Wine", 3.0, 20.0),
        (DrinkKind::Spirits, "Shot/Spirit", 1.5, 40.0),
        (DrinkKind::MixedDrink, "Mixed Drink", 1.5, 40.0),
    ]
    .into_iter()
    .map(|(kind, name, size_oz, alcohol_percent)| {
        (
            kind,
            StandardDrink {
                kind,
                name: name.into(),
                size_oz,
                alcohol_percent,
            },
        )
    })
    .collect();

    let foods = [
        (FoodKind::EmptyStomach, "Empty Stomach", 0.0, 0.0),
        (FoodKind::Water, "Water/Clear Liquid", 15.0, 0.05),
        (FoodKind::LightSnack, "Light Snack", 60.0, 0.20),
        (FoodKind::LightMeal, "Light Meal", 90.0, 0.30),
        (FoodKind::ModerateMeal, "Moderate Meal", 120.0, 0.40),
        (FoodKind::FullMeal, "Full Meal", 150.0, 0.45),
        (FoodKind::HighFatMeal, "High-Fat Meal", 180.0, 0.60),
    ]
    .into_iter()
    .map(|(kind, name, gastric_half_time_min, peak_reduction)| {
        (
            kind,
            FoodProfile {
                kind,
                name: name.into(),
                gastric_half_time_min,
                peak_reduction,
            },
        )
    })
    .collect();

    Catalog {
        drinks,
        foods,
        tiers: build_tiers(),
        generic_drink: StandardDrink {
            kind: DrinkKind::Other,
            name: "Drink".into(),
            size_oz: 12.0,
            alcohol_percent: 5.0,
        },
        fallback_food: FoodKind::LightMeal,
    }
}

fn build_tiers() -> Vec<ImpairmentTier> {
    use DrivingFitness::{Caution, No, Yes};

    let tier = |threshold, level: &str, description: &str, color, fitness, legal: &str| {
        ImpairmentTier {
            threshold,
            level: level.into(),
            description: description.into(),
            color,
            fitness_to_drive: fitness,
            legal_status: legal.into(),
        }
    };

    vec![
        tier(
            0.0,
            "Sober",
            "No detectable impairment",
            StatusColor::Safe,
            Yes,
            "LEGAL",
        ),
        tier(
            0.02,
            "Minimal Impairment",
            "Slight warmth, mild euphoria, minimal coordination loss",
            StatusColor::Safe,
            Yes,
            "LEGAL",
        ),
        tier(
            0.05,
            "Mild Impairment",
            "Reduced concentration, slower reaction time, slight loss of coordination",
            StatusColor::Caution,
            Caution,
            "LEGAL",
        ),
        tier(
            0.08,
            "Moderate Impairment",
            "Legal limit reached - DUI threshold for standard drivers",
            StatusColor::Warning,
            No,
            "ILLEGAL - DUI",
        ),
        tier(
            0.15,
            "Severe Impairment",
            "Enhanced DUI threshold in Tennessee (7+ day jail for first offense)",
            StatusColor::Danger,
            No,
            "ILLEGAL - ENHANCED DUI",
        ),
        tier(
            0.20,
            "Very Severe Impairment",
            "Major loss of motor control, risk of blackouts, danger of poisoning",
            StatusColor::Danger,
            No,
            "DANGEROUS - MEDICAL RISK",
        ),
        tier(
            0.30,
            "Extreme Intoxication",
            "Severe loss of consciousness, risk of death, medical emergency",
            StatusColor::Critical,
            No,
            "LIFE-THREATENING",
        ),
    ]
}

/// Number of US standard drinks in a serving, rounded to one decimal
pub fn standard_drinks(size_oz: f64, alcohol_percent: f64) -> f64 {
    let pure_alcohol_oz = size_oz * (alcohol_percent / 100.0);
    ((pure_alcohol_oz / STANDARD_DRINK_ALCOHOL_OZ) * 10.0).round() / 10.0
}

impl Catalog {
    /// Default serving for a drink kind; `Other` gets the generic serving
    pub fn drink(&self, kind: DrinkKind) -> &StandardDrink {
        self.drinks.get(&kind).unwrap_or(&self.generic_drink)
    }

    /// Gastric profile for a food kind
    pub fn food(&self, kind: FoodKind) -> &FoodProfile {
        self.foods
            .get(&kind)
            .or_else(|| self.foods.get(&self.fallback_food))
            .unwrap_or_else(|| &DEFAULT_CATALOG.foods[&FoodKind::LightMeal])
    }

    /// Validate the catalog for consistency and completeness
    ///
    /// Returns a list of validation errors, or empty Vec if valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for kind in DrinkKind::STANDARD {
            match self.drinks.get(&kind) {
                None => errors.push(format!("Drink '{}' missing from catalog", kind.as_str())),
                Some(drink) => {
                    if drink.kind != kind {
                        errors.push(format!(
                            "Drink key '{}' doesn't match entry kind '{}'",
                            kind.as_str(),
                            drink.kind.as_str()
                        ));
                    }
                    if drink.size_oz <= 0.0 {
                        errors.push(format!("Drink '{}' has non-positive volume", kind.as_str()));
                    }
                    if !(0.0..=100.0).contains(&drink.alcohol_percent) {
                        errors.push(format!(
                            "Drink '{}': alcohol percent {} outside 0-100",
                            kind.as_str(),
                            drink.alcohol_percent
                        ));
                    }
                }
            }
        }

        for kind in FoodKind::ALL {
            match self.foods.get(&kind) {
                None => errors.push(format!("Food '{}' missing from catalog", kind.as_str())),
                Some(food) => {
                    if food.gastric_half_time_min < 0.0 {
                        errors.push(format!(
                            "Food '{}' has negative gastric half-time",
                            kind.as_str()
                        ));
                    }
                    if !(0.0..=1.0).contains(&food.peak_reduction) {
                        errors.push(format!(
                            "Food '{}': peak reduction {} outside 0-1",
                            kind.as_str(),
                            food.peak_reduction
                        ));
                    }
                }
            }
        }

        if !self.foods.contains_key(&self.fallback_food) {
            errors.push("Fallback food is not in the catalog".to_string());
        }

        match self.tiers.first() {
            None => errors.push("Catalog has no impairment tiers".to_string()),
            Some(first) if first.threshold != 0.0 => {
                errors.push(format!(
                    "Lowest impairment tier starts at {}, expected 0",
                    first.threshold
                ));
            }
            Some(_) => {}
        }
        for pair in self.tiers.windows(2) {
            if pair[0].threshold >= pair[1].threshold {
                errors.push(format!(
                    "Impairment tiers out of order: '{}' ({}) before '{}' ({})",
                    pair[0].level, pair[0].threshold, pair[1].level, pair[1].threshold
                ));
            }
        }

        errors
    }
}
