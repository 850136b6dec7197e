//! BAC engine: Widmark aggregation over the consumption ledger.
//!
//! ## Model
//!
//! For every drink at or before the query time:
//!
//! ```text
//! effective_oz = alcohol_oz × absorption × (1 − peak_reduction × 0.5)
//! ```
//!
//! where `absorption` and `peak_reduction` are taken from the most recent
//! food at or before that drink. The sum is converted with the modified
//! Widmark formula and a linear elimination term counted from scenario
//! start is subtracted:
//!
//! ```text
//! BAC = (Σ effective_oz × 5.14) / (weight_lbs × r) − β × hours_since_start
//! ```
//!
//! The result is clamped at zero and rounded to four decimals.

use crate::absorption::{absorption_factor, minutes_between};
use crate::catalog::WIDMARK_CONSTANT;
use crate::{DrinkEvent, DrinkOrder, FoodEvent, FoodKind, Ledger, Profile, Result};
use chrono::{DateTime, Utc};

/// Share of a food's nominal peak reduction that is actually applied
pub const PEAK_REDUCTION_SCALE: f64 = 0.5;

/// BAC (percent) at instant `t`
///
/// Pure function of its inputs. Returns 0 for any `t` before `start`.
pub fn bac_at(profile: &Profile, ledger: &Ledger, start: DateTime<Utc>, t: DateTime<Utc>) -> f64 {
    if t < start {
        return 0.0;
    }

    let total_alcohol_oz: f64 = ledger
        .drinks_through(t)
        .iter()
        .map(|drink| {
            let food = ledger.food_at_or_before(drink.time);
            let absorbed = absorption_factor(drink.time, t, food);
            let peak_reduction = food.map_or(0.0, |f| f.kind.profile().peak_reduction);
            drink.alcohol_oz() * absorbed * (1.0 - peak_reduction * PEAK_REDUCTION_SCALE)
        })
        .sum();

    let bac_raw = if total_alcohol_oz > 0.0 {
        (total_alcohol_oz * WIDMARK_CONSTANT) / (profile.weight_lbs * profile.sex.widmark_ratio())
    } else {
        0.0
    };

    let hours = (minutes_between(start, t) / 60.0).max(0.0);
    let elimination = profile.elimination_rate() * hours;

    round4((bac_raw - elimination).max(0.0))
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// A drinking session: profile, ledger and the instant it began
///
/// Mutation (profile changes, new events, reset) happens between queries.
/// Every query method takes `&self` and is side-effect free.
#[derive(Clone, Debug)]
pub struct Simulator {
    profile: Profile,
    ledger: Ledger,
    start_time: DateTime<Utc>,
}

impl Simulator {
    /// New empty scenario starting at `start_time`
    pub fn new(profile: Profile, start_time: DateTime<Utc>) -> Self {
        Self {
            profile,
            ledger: Ledger::new(),
            start_time,
        }
    }

    /// New empty scenario starting at the current wall-clock time
    pub fn starting_now(profile: Profile) -> Self {
        Self::new(profile, Utc::now())
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// Replace the profile wholesale
    pub fn set_profile(&mut self, profile: Profile) -> Result<()> {
        profile.validate()?;
        self.profile = profile;
        Ok(())
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn drinks(&self) -> &[DrinkEvent] {
        self.ledger.drinks()
    }

    pub fn foods(&self) -> &[FoodEvent] {
        self.ledger.foods()
    }

    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    /// Record a drink order, expanding quantity into spaced events
    ///
    /// Returns the events that were added.
    pub fn add_drink(&mut self, order: DrinkOrder) -> Result<Vec<DrinkEvent>> {
        order.validate()?;
        let events = order.into_events();
        for event in &events {
            self.ledger.add_drink(event.clone());
        }
        Ok(events)
    }

    /// Record food eaten at `time`
    pub fn add_food(&mut self, time: DateTime<Utc>, kind: FoodKind) -> FoodEvent {
        let event = FoodEvent::new(time, kind);
        self.ledger.add_food(event.clone());
        event
    }

    /// Drop every event and restart the scenario at `now`
    pub fn clear_scenario(&mut self, now: DateTime<Utc>) {
        self.ledger.clear();
        self.start_time = now;
    }

    /// BAC at instant `t`
    pub fn bac_at(&self, t: DateTime<Utc>) -> f64 {
        bac_at(&self.profile, &self.ledger, self.start_time, t)
    }

    /// BAC at the current wall-clock time
    pub fn current_bac(&self) -> f64 {
        self.bac_at(Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DrinkKind, Sex};
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 20, 0, 0).unwrap()
    }

    fn male_180() -> Profile {
        Profile::new(Sex::Male, 180.0, 30, false).unwrap()
    }

    #[test]
    fn test_empty_ledger_is_always_zero() {
        let sim = Simulator::new(male_180(), t0());
        for hours in [-2, 0, 1, 5, 30] {
            assert_eq!(sim.bac_at(t0() + Duration::hours(hours)), 0.0);
        }
    }

    #[test]
    fn test_before_start_is_zero() {
        let mut sim = Simulator::new(male_180(), t0());
        sim.add_drink(DrinkOrder::new(DrinkKind::Spirits, t0() - Duration::hours(1)))
            .unwrap();
        assert_eq!(sim.bac_at(t0() - Duration::minutes(1)), 0.0);
    }

    #[test]
    fn test_single_shot_on_empty_stomach() {
        let mut sim = Simulator::new(male_180(), t0());
        sim.add_drink(DrinkOrder::new(DrinkKind::Spirits, t0())).unwrap();

        // 0.6 oz × 0.10 × 5.14 / (180 × 0.73)
        let at_start = sim.bac_at(t0());
        assert!(at_start > 0.0);
        assert_eq!(at_start, 0.0023);

        assert_eq!(sim.bac_at(t0() + Duration::hours(6)), 0.0);
    }

    #[test]
    fn test_future_drinks_do_not_contribute() {
        let mut sim = Simulator::new(male_180(), t0());
        sim.add_drink(DrinkOrder::new(DrinkKind::Spirits, t0() + Duration::hours(1)))
            .unwrap();
        assert_eq!(sim.bac_at(t0() + Duration::minutes(59)), 0.0);
        assert!(sim.bac_at(t0() + Duration::hours(1)) > 0.0);
    }

    #[test]
    fn test_female_ratio_gives_higher_bac() {
        let mut male = Simulator::new(male_180(), t0());
        let mut female = Simulator::new(Profile::new(Sex::Female, 180.0, 30, false).unwrap(), t0());
        for sim in [&mut male, &mut female] {
            sim.add_drink(DrinkOrder::new(DrinkKind::WineRed, t0()).with_quantity(2))
                .unwrap();
        }
        let t = t0() + Duration::minutes(90);
        assert!(female.bac_at(t) > male.bac_at(t));
    }

    #[test]
    fn test_chronic_drinker_clears_faster() {
        let mut casual = Simulator::new(male_180(), t0());
        let chronic_profile = Profile::new(Sex::Male, 180.0, 30, true).unwrap();
        let mut chronic = Simulator::new(chronic_profile, t0());
        for sim in [&mut casual, &mut chronic] {
            sim.add_drink(DrinkOrder::new(DrinkKind::BeerRegular, t0()).with_quantity(4))
                .unwrap();
        }
        let t = t0() + Duration::hours(3);
        assert!(chronic.bac_at(t) < casual.bac_at(t));
    }

    #[test]
    fn test_food_applies_half_of_peak_reduction() {
        let mut fasted = Simulator::new(male_180(), t0());
        let mut fed = Simulator::new(male_180(), t0());
        // Meal long digested: timing identical, only magnitude differs
        fed.add_food(t0() - Duration::hours(4), FoodKind::HighFatMeal);
        for sim in [&mut fasted, &mut fed] {
            sim.add_drink(
                DrinkOrder::new(DrinkKind::Spirits, t0())
                    .with_size_oz(15.0)
                    .with_alcohol_percent(40.0),
            )
            .unwrap();
        }

        // Both sit on the 10% floor; fed is scaled by 1 - 0.6 × 0.5
        let fasted_bac = fasted.bac_at(t0());
        let fed_bac = fed.bac_at(t0());
        assert_eq!(fasted_bac, 0.0235);
        assert!((fed_bac / fasted_bac - 0.7).abs() < 0.01, "{} vs {}", fed_bac, fasted_bac);
    }

    #[test]
    fn test_elimination_counts_from_scenario_start() {
        let mut sim = Simulator::new(male_180(), t0());
        let late = t0() + Duration::hours(2);
        sim.add_drink(DrinkOrder::new(DrinkKind::Spirits, late)).unwrap();
        // 0.0023 from the floor minus two hours of elimination
        assert_eq!(sim.bac_at(late), 0.0);
    }

    #[test]
    fn test_set_profile_validates() {
        let mut sim = Simulator::new(male_180(), t0());
        let bad = Profile {
            weight_lbs: 0.0,
            ..Profile::default()
        };
        assert!(sim.set_profile(bad).is_err());
        assert_eq!(sim.profile().weight_lbs, 180.0);
    }

    #[test]
    fn test_add_drink_rejects_invalid_percent() {
        let mut sim = Simulator::new(male_180(), t0());
        let result = sim.add_drink(DrinkOrder::new(DrinkKind::Spirits, t0()).with_alcohol_percent(120.0));
        assert!(result.is_err());
        assert!(sim.drinks().is_empty());
    }

    #[test]
    fn test_clear_matches_fresh_engine() {
        let later = t0() + Duration::hours(1);
        let mut used = Simulator::new(male_180(), t0());
        used.add_drink(DrinkOrder::new(DrinkKind::BeerStout, t0()).with_quantity(3))
            .unwrap();
        used.add_food(t0(), FoodKind::FullMeal);
        used.clear_scenario(later);

        let mut fresh = Simulator::new(male_180(), later);
        for sim in [&mut used, &mut fresh] {
            sim.add_drink(DrinkOrder::new(DrinkKind::Spirits, later).with_quantity(2))
                .unwrap();
        }

        assert!(used.foods().is_empty());
        assert_eq!(used.start_time(), later);
        for minutes in (0..=240).step_by(15) {
            let t = later + Duration::minutes(minutes);
            assert_eq!(used.bac_at(t), fresh.bac_at(t));
        }
    }
}
