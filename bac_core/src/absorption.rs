//! Absorption kinetics for a single drink.
//!
//! The share of a drink's alcohol in the bloodstream follows a saturating
//! exponential with a 10% floor. An empty stomach uses a 20-minute time
//! constant. After food the curve uses a 30-minute constant and the clock
//! runs at half speed right after eating, recovering to full speed once the
//! food's gastric half-time has passed by the time of the drink.

use crate::FoodEvent;
use chrono::{DateTime, Utc};

/// Share absorbed the instant a drink is consumed
pub const ABSORPTION_FLOOR: f64 = 0.10;

/// Time constant on an empty stomach, minutes
pub const EMPTY_STOMACH_TAU_MIN: f64 = 20.0;

/// Time constant after food, minutes
pub const FED_TAU_MIN: f64 = 30.0;

/// Minutes from `from` to `to`, fractional
pub(crate) fn minutes_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    (to - from).num_milliseconds() as f64 / 60_000.0
}

/// Fraction in `[0.10, 1]` of a drink absorbed by `eval_time`
///
/// `food` is the most recent food at or before `drink_time` (see
/// [`crate::Ledger::food_at_or_before`]). Evaluating before the drink is
/// treated as zero elapsed time.
pub fn absorption_factor(
    drink_time: DateTime<Utc>,
    eval_time: DateTime<Utc>,
    food: Option<&FoodEvent>,
) -> f64 {
    let dt = minutes_between(drink_time, eval_time).max(0.0);

    let fed = food.and_then(|f| {
        let half_time = f.kind.profile().gastric_half_time_min;
        (half_time > 0.0).then(|| (minutes_between(f.time, drink_time), half_time))
    });

    let absorbed = match fed {
        None => saturate(dt, EMPTY_STOMACH_TAU_MIN),
        Some((since_food, half_time)) => {
            let delay_factor = (since_food / half_time).min(1.0);
            let effective = dt * (0.5 + 0.5 * delay_factor);
            saturate(effective, FED_TAU_MIN)
        }
    };

    absorbed.min(1.0)
}

fn saturate(minutes: f64, tau: f64) -> f64 {
    ABSORPTION_FLOOR + (1.0 - ABSORPTION_FLOOR) * (1.0 - (-minutes / tau).exp())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FoodKind;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 20, 0, 0).unwrap()
    }

    #[test]
    fn test_floor_at_drink_time() {
        let meal = FoodEvent::new(t0(), FoodKind::HighFatMeal);
        assert!((absorption_factor(t0(), t0(), None) - 0.10).abs() < 1e-12);
        assert!((absorption_factor(t0(), t0(), Some(&meal)) - 0.10).abs() < 1e-12);
    }

    #[test]
    fn test_eval_before_drink_is_clamped() {
        let before = t0() - Duration::minutes(45);
        assert!((absorption_factor(t0(), before, None) - 0.10).abs() < 1e-12);
    }

    #[test]
    fn test_empty_stomach_curve() {
        // 0.10 + 0.90 * (1 - e^-1.5)
        let a = absorption_factor(t0(), t0() + Duration::minutes(30), None);
        assert!((a - 0.7992).abs() < 1e-3, "got {}", a);
    }

    #[test]
    fn test_explicit_empty_stomach_matches_no_food() {
        let empty = FoodEvent::new(t0() - Duration::hours(1), FoodKind::EmptyStomach);
        let eval = t0() + Duration::minutes(25);
        assert_eq!(
            absorption_factor(t0(), eval, Some(&empty)),
            absorption_factor(t0(), eval, None)
        );
    }

    #[test]
    fn test_fresh_food_halves_the_clock() {
        let meal = FoodEvent::new(t0(), FoodKind::FullMeal);
        let eval = t0() + Duration::minutes(60);
        // delay_factor 0 -> effective 30 min on a 30 min constant
        let expected = 0.10 + 0.90 * (1.0 - (-1.0f64).exp());
        assert!((absorption_factor(t0(), eval, Some(&meal)) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_digested_food_runs_at_full_speed() {
        let meal = FoodEvent::new(t0() - Duration::minutes(200), FoodKind::FullMeal);
        let eval = t0() + Duration::minutes(30);
        let expected = 0.10 + 0.90 * (1.0 - (-1.0f64).exp());
        assert!((absorption_factor(t0(), eval, Some(&meal)) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_food_slows_absorption() {
        let meal = FoodEvent::new(t0(), FoodKind::ModerateMeal);
        let eval = t0() + Duration::minutes(30);
        assert!(absorption_factor(t0(), eval, Some(&meal)) < absorption_factor(t0(), eval, None));
    }

    #[test]
    fn test_monotonic_and_saturating() {
        let meal = FoodEvent::new(t0() - Duration::minutes(20), FoodKind::LightMeal);
        for food in [None, Some(&meal)] {
            let mut last = 0.0;
            for minutes in (0..=600).step_by(5) {
                let a = absorption_factor(t0(), t0() + Duration::minutes(minutes), food);
                assert!(a >= last);
                assert!(a <= 1.0);
                last = a;
            }
            let late = absorption_factor(t0(), t0() + Duration::hours(24), food);
            assert!((late - 1.0).abs() < 1e-9);
        }
    }
}
