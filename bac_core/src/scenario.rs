//! Structured scenario input.
//!
//! A scenario file is the JSON form of what an event producer hands the
//! engine: an optional profile, an optional start time and the drinks and
//! food consumed. Category strings are matched leniently; unknown drinks
//! become a generic 12 oz / 5% serving and unknown food a light meal.

use crate::{DrinkKind, DrinkOrder, FoodKind, Profile, Result, Sex, Simulator};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Profile fields as written in a scenario or config file
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProfileEntry {
    pub sex: String,
    pub weight_lbs: f64,
    #[serde(default = "default_age")]
    pub age: u32,
    #[serde(default)]
    pub chronic_drinker: bool,
    #[serde(default)]
    pub medications: Vec<String>,
}

fn default_age() -> u32 {
    30
}

impl ProfileEntry {
    /// Validate and convert into an engine profile
    pub fn to_profile(&self) -> Result<Profile> {
        let mut profile = Profile::new(
            Sex::parse_lossy(&self.sex),
            self.weight_lbs,
            self.age,
            self.chronic_drinker,
        )?;
        profile.medications = self.medications.clone();
        Ok(profile)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DrinkEntry {
    pub kind: String,
    pub time: DateTime<Utc>,
    #[serde(default)]
    pub size_oz: Option<f64>,
    #[serde(default)]
    pub alcohol_percent: Option<f64>,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FoodEntry {
    pub kind: String,
    pub time: DateTime<Utc>,
}

/// A complete scenario description
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ScenarioFile {
    #[serde(default)]
    pub profile: Option<ProfileEntry>,
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub drinks: Vec<DrinkEntry>,
    #[serde(default)]
    pub foods: Vec<FoodEntry>,
}

impl ScenarioFile {
    /// Load a scenario from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let scenario = Self::from_json(&contents)?;
        tracing::info!(
            "Loaded scenario from {:?} ({} drink entries, {} food entries)",
            path,
            scenario.drinks.len(),
            scenario.foods.len()
        );
        Ok(scenario)
    }

    pub fn from_json(contents: &str) -> Result<Self> {
        Ok(serde_json::from_str(contents)?)
    }

    /// Build a simulator from this scenario
    ///
    /// `default_profile` is used when the file carries none; the scenario
    /// starts at `now` unless the file names a start time.
    pub fn into_simulator(self, default_profile: Profile, now: DateTime<Utc>) -> Result<Simulator> {
        let profile = match &self.profile {
            Some(entry) => entry.to_profile()?,
            None => {
                default_profile.validate()?;
                default_profile
            }
        };

        let mut sim = Simulator::new(profile, self.start_time.unwrap_or(now));

        for entry in self.foods {
            let kind = FoodKind::parse_lossy(&entry.kind);
            if kind.as_str() != entry.kind.trim().to_lowercase() {
                tracing::warn!(
                    "Unknown food '{}', treating as {}",
                    entry.kind,
                    kind.as_str()
                );
            }
            sim.add_food(entry.time, kind);
        }

        for entry in self.drinks {
            let kind = DrinkKind::parse_lossy(&entry.kind);
            if kind == DrinkKind::Other {
                tracing::warn!("Unknown drink '{}', using a generic serving", entry.kind);
            }
            let order = DrinkOrder {
                kind,
                time: entry.time,
                size_oz: entry.size_oz,
                alcohol_percent: entry.alcohol_percent,
                quantity: entry.quantity,
            };
            sim.add_drink(order)?;
        }

        tracing::debug!(
            "Scenario ready: {} drinks, {} food events, start {}",
            sim.drinks().len(),
            sim.foods().len(),
            sim.start_time()
        );
        Ok(sim)
    }
}
