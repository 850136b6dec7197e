//! Core domain types for the BAC simulator.
//!
//! This module defines the fundamental types used throughout the system:
//! - Biological profile (sex, weight, drinking habits)
//! - Drink and food categories
//! - Timestamped consumption events
//! - Drink orders as supplied by an event producer

use crate::catalog::{self, FoodProfile, StandardDrink};
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Profile Types
// ============================================================================

/// Biological sex, bound to a Widmark distribution ratio
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    /// Parse a free-form sex string. Anything unrecognized maps to `Male`,
    /// which carries the fallback Widmark ratio.
    pub fn parse_lossy(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "female" | "f" | "woman" => Sex::Female,
            _ => Sex::Male,
        }
    }

    /// Widmark distribution ratio for this sex
    pub fn widmark_ratio(self) -> f64 {
        match self {
            Sex::Male => catalog::WIDMARK_RATIO_MALE,
            Sex::Female => catalog::WIDMARK_RATIO_FEMALE,
        }
    }
}

/// Person the simulation runs for
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    pub sex: Sex,
    pub weight_lbs: f64,
    /// Informational only
    pub age: u32,
    pub chronic_drinker: bool,
    /// Informational only
    #[serde(default)]
    pub medications: Vec<String>,
}

impl Profile {
    /// Build a validated profile
    pub fn new(sex: Sex, weight_lbs: f64, age: u32, chronic_drinker: bool) -> Result<Self> {
        let profile = Self {
            sex,
            weight_lbs,
            age,
            chronic_drinker,
            medications: Vec::new(),
        };
        profile.validate()?;
        Ok(profile)
    }

    /// Check that the body weight can be used as a Widmark divisor
    pub fn validate(&self) -> Result<()> {
        if !self.weight_lbs.is_finite() || self.weight_lbs <= 0.0 {
            return Err(Error::Profile(format!(
                "weight must be a positive number of pounds, got {}",
                self.weight_lbs
            )));
        }
        Ok(())
    }

    /// Elimination rate in BAC percent per hour
    pub fn elimination_rate(&self) -> f64 {
        if self.chronic_drinker {
            catalog::ELIMINATION_RATE * catalog::CHRONIC_ELIMINATION_MULTIPLIER
        } else {
            catalog::ELIMINATION_RATE
        }
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            sex: Sex::Male,
            weight_lbs: 180.0,
            age: 30,
            chronic_drinker: false,
            medications: Vec::new(),
        }
    }
}

// ============================================================================
// Drink and Food Categories
// ============================================================================

/// Category of drink from the standard catalog
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DrinkKind {
    BeerLight,
    BeerRegular,
    BeerIpa,
    BeerStout,
    WineLight,
    WineRed,
    WineFortified,
    Spirits,
    MixedDrink,
    /// Anything not in the catalog (generic 12 oz at 5%)
    Other,
}

impl DrinkKind {
    /// All catalog kinds, excluding the `Other` fallback
    pub const STANDARD: [DrinkKind; 9] = [
        DrinkKind::BeerLight,
        DrinkKind::BeerRegular,
        DrinkKind::BeerIpa,
        DrinkKind::BeerStout,
        DrinkKind::WineLight,
        DrinkKind::WineRed,
        DrinkKind::WineFortified,
        DrinkKind::Spirits,
        DrinkKind::MixedDrink,
    ];

    /// Catalog key, e.g. `beer_regular`
    pub fn as_str(self) -> &'static str {
        match self {
            DrinkKind::BeerLight => "beer_light",
            DrinkKind::BeerRegular => "beer_regular",
            DrinkKind::BeerIpa => "beer_ipa",
            DrinkKind::BeerStout => "beer_stout",
            DrinkKind::WineLight => "wine_light",
            DrinkKind::WineRed => "wine_red",
            DrinkKind::WineFortified => "wine_fortified",
            DrinkKind::Spirits => "spirits",
            DrinkKind::MixedDrink => "mixed_drink",
            DrinkKind::Other => "other",
        }
    }

    /// Parse a catalog key case-insensitively; unknown keys become `Other`
    pub fn parse_lossy(s: &str) -> Self {
        let key = s.trim().to_lowercase();
        Self::STANDARD
            .iter()
            .copied()
            .find(|kind| kind.as_str() == key)
            .unwrap_or(DrinkKind::Other)
    }

    /// Default serving for this kind
    pub fn standard(self) -> &'static StandardDrink {
        catalog::get_default_catalog().drink(self)
    }
}

/// Category of food, bound to gastric emptying behaviour
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FoodKind {
    EmptyStomach,
    Water,
    LightSnack,
    LightMeal,
    ModerateMeal,
    FullMeal,
    HighFatMeal,
}

impl FoodKind {
    pub const ALL: [FoodKind; 7] = [
        FoodKind::EmptyStomach,
        FoodKind::Water,
        FoodKind::LightSnack,
        FoodKind::LightMeal,
        FoodKind::ModerateMeal,
        FoodKind::FullMeal,
        FoodKind::HighFatMeal,
    ];

    /// Catalog key, e.g. `high_fat_meal`
    pub fn as_str(self) -> &'static str {
        match self {
            FoodKind::EmptyStomach => "empty_stomach",
            FoodKind::Water => "water",
            FoodKind::LightSnack => "light_snack",
            FoodKind::LightMeal => "light_meal",
            FoodKind::ModerateMeal => "moderate_meal",
            FoodKind::FullMeal => "full_meal",
            FoodKind::HighFatMeal => "high_fat_meal",
        }
    }

    /// Parse a catalog key case-insensitively; unknown keys become `LightMeal`
    pub fn parse_lossy(s: &str) -> Self {
        let key = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == key)
            .unwrap_or(FoodKind::LightMeal)
    }

    /// Gastric half-time and peak reduction for this kind
    pub fn profile(self) -> &'static FoodProfile {
        catalog::get_default_catalog().food(self)
    }
}

// ============================================================================
// Consumption Events
// ============================================================================

/// A single drink that has been consumed
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DrinkEvent {
    pub id: Uuid,
    pub time: DateTime<Utc>,
    pub kind: DrinkKind,
    pub size_oz: f64,
    pub alcohol_percent: f64,
}

impl DrinkEvent {
    /// Ounces of pure alcohol in this drink
    pub fn alcohol_oz(&self) -> f64 {
        self.size_oz * (self.alcohol_percent / 100.0)
    }

    /// Equivalent number of US standard drinks
    pub fn standard_drinks(&self) -> f64 {
        catalog::standard_drinks(self.size_oz, self.alcohol_percent)
    }
}

/// A food (or drink of water) that has been consumed
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct FoodEvent {
    pub id: Uuid,
    pub time: DateTime<Utc>,
    pub kind: FoodKind,
}

impl FoodEvent {
    pub fn new(time: DateTime<Utc>, kind: FoodKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            time,
            kind,
        }
    }
}

/// Request to record one or more drinks of the same kind
///
/// Missing volume or strength falls back to the catalog serving for `kind`.
/// A quantity above one expands into drinks spaced
/// [`catalog::DRINK_SPACING_MINUTES`] apart.
#[derive(Clone, Debug)]
pub struct DrinkOrder {
    pub kind: DrinkKind,
    pub time: DateTime<Utc>,
    pub size_oz: Option<f64>,
    pub alcohol_percent: Option<f64>,
    pub quantity: u32,
}

impl DrinkOrder {
    /// A single catalog-sized drink
    pub fn new(kind: DrinkKind, time: DateTime<Utc>) -> Self {
        Self {
            kind,
            time,
            size_oz: None,
            alcohol_percent: None,
            quantity: 1,
        }
    }

    pub fn with_size_oz(mut self, size_oz: f64) -> Self {
        self.size_oz = Some(size_oz);
        self
    }

    pub fn with_alcohol_percent(mut self, alcohol_percent: f64) -> Self {
        self.alcohol_percent = Some(alcohol_percent);
        self
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    /// Reject volumes and strengths that make no physical sense
    pub fn validate(&self) -> Result<()> {
        if let Some(size) = self.size_oz {
            if !size.is_finite() || size < 0.0 {
                return Err(Error::Scenario(format!(
                    "drink volume must be a non-negative number of ounces, got {}",
                    size
                )));
            }
        }
        if let Some(pct) = self.alcohol_percent {
            if !pct.is_finite() || !(0.0..=100.0).contains(&pct) {
                return Err(Error::Scenario(format!(
                    "alcohol percent must be within 0-100, got {}",
                    pct
                )));
            }
        }
        Ok(())
    }

    /// Expand into discrete drink events
    pub fn into_events(self) -> Vec<DrinkEvent> {
        let standard = self.kind.standard();
        let size_oz = self.size_oz.unwrap_or(standard.size_oz);
        let alcohol_percent = self.alcohol_percent.unwrap_or(standard.alcohol_percent);
        let spacing = chrono::Duration::minutes(catalog::DRINK_SPACING_MINUTES);

        (0..self.quantity)
            .map(|i| DrinkEvent {
                id: Uuid::new_v4(),
                time: self.time + spacing * i as i32,
                kind: self.kind,
                size_oz,
                alcohol_percent,
            })
            .collect()
    }
}
