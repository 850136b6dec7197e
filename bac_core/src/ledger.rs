//! Consumption ledger: drinks and food ordered by time.
//!
//! Both lists stay sorted ascending at every mutation. Events sharing a
//! timestamp keep their insertion order. Individual events cannot be
//! removed; only [`Ledger::clear`] empties the ledger.

use crate::{DrinkEvent, FoodEvent};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Ledger {
    drinks: Vec<DrinkEvent>,
    foods: Vec<FoodEvent>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_drink(&mut self, drink: DrinkEvent) {
        let idx = self.drinks.partition_point(|d| d.time <= drink.time);
        self.drinks.insert(idx, drink);
    }

    pub fn add_food(&mut self, food: FoodEvent) {
        let idx = self.foods.partition_point(|f| f.time <= food.time);
        self.foods.insert(idx, food);
    }

    /// All drinks, ascending by time
    pub fn drinks(&self) -> &[DrinkEvent] {
        &self.drinks
    }

    /// All food events, ascending by time
    pub fn foods(&self) -> &[FoodEvent] {
        &self.foods
    }

    /// Drinks consumed at or before `t`
    pub fn drinks_through(&self, t: DateTime<Utc>) -> &[DrinkEvent] {
        let end = self.drinks.partition_point(|d| d.time <= t);
        &self.drinks[..end]
    }

    /// Most recent food eaten at or before `t` (inclusive)
    pub fn food_at_or_before(&self, t: DateTime<Utc>) -> Option<&FoodEvent> {
        let end = self.foods.partition_point(|f| f.time <= t);
        end.checked_sub(1).map(|i| &self.foods[i])
    }

    pub fn is_empty(&self) -> bool {
        self.drinks.is_empty() && self.foods.is_empty()
    }

    pub fn clear(&mut self) {
        self.drinks.clear();
        self.foods.clear();
    }
}
