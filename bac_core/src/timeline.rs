//! Timeline sampling and derived queries.
//!
//! Every query samples [`Simulator::bac_at`] on a fixed 5-minute grid, so
//! each call is a bounded amount of work. Durations returned by the
//! sobriety and legal-limit queries are measured from scenario start.

use crate::catalog::LEGAL_LIMIT;
use crate::impairment::{impairment_level, ImpairmentTier};
use crate::Simulator;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// Sampling interval of every timeline
pub const SAMPLE_INTERVAL_MINUTES: i64 = 5;

/// Window used for peak and legal-limit searches
pub const DEFAULT_WINDOW_HOURS: i64 = 6;

/// Window used for the sobriety search
pub const SOBRIETY_WINDOW_HOURS: i64 = 24;

/// Longest window any timeline will sample; larger requests are clamped
pub const MAX_WINDOW_HOURS: i64 = 72;

/// Where a timeline begins
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimelineAnchor {
    /// Forward projection from the given instant
    Now(DateTime<Utc>),
    /// Full history from the start of the scenario
    ScenarioStart,
}

/// One sample of the BAC curve
#[derive(Clone, Copy, Debug, Serialize, PartialEq)]
pub struct TimelinePoint {
    pub time: DateTime<Utc>,
    pub bac: f64,
}

/// Highest BAC found in a window
#[derive(Clone, Copy, Debug, Serialize, PartialEq)]
pub struct Peak {
    pub bac: f64,
    pub time: DateTime<Utc>,
}

impl Simulator {
    /// Sample BAC every 5 minutes over `hours`, both ends inclusive
    ///
    /// `hours` is clamped to `0..=MAX_WINDOW_HOURS`.
    pub fn timeline(&self, hours: i64, anchor: TimelineAnchor) -> Vec<TimelinePoint> {
        let start = match anchor {
            TimelineAnchor::Now(now) => now,
            TimelineAnchor::ScenarioStart => self.start_time(),
        };
        let steps = hours.clamp(0, MAX_WINDOW_HOURS) * 60 / SAMPLE_INTERVAL_MINUTES;

        (0..=steps)
            .map(|i| {
                let time = start + Duration::minutes(i * SAMPLE_INTERVAL_MINUTES);
                TimelinePoint {
                    time,
                    bac: self.bac_at(time),
                }
            })
            .collect()
    }

    /// Peak BAC over the next 6 hours from `now`
    ///
    /// Ties keep the earliest sample. With no positive sample the peak is
    /// 0 at scenario start.
    pub fn peak_bac(&self, now: DateTime<Utc>) -> Peak {
        let initial = Peak {
            bac: 0.0,
            time: self.start_time(),
        };
        self.timeline(DEFAULT_WINDOW_HOURS, TimelineAnchor::Now(now))
            .into_iter()
            .fold(initial, |peak, point| {
                if point.bac > peak.bac {
                    Peak {
                        bac: point.bac,
                        time: point.time,
                    }
                } else {
                    peak
                }
            })
    }

    /// Time from scenario start until BAC is at or below `threshold`
    ///
    /// Searches 24 hours ahead of `now`. If the threshold is never reached
    /// the result saturates at the window length.
    pub fn time_to_sobriety(&self, now: DateTime<Utc>, threshold: f64) -> Duration {
        self.timeline(SOBRIETY_WINDOW_HOURS, TimelineAnchor::Now(now))
            .into_iter()
            .find(|point| point.bac <= threshold)
            .map(|point| point.time - self.start_time())
            .unwrap_or_else(|| Duration::hours(SOBRIETY_WINDOW_HOURS))
    }

    /// Time from scenario start until BAC reaches the 0.08 legal limit
    ///
    /// Searches 6 hours ahead of `now`; `None` if the limit is not reached.
    pub fn time_to_legal_limit(&self, now: DateTime<Utc>) -> Option<Duration> {
        self.timeline(DEFAULT_WINDOW_HOURS, TimelineAnchor::Now(now))
            .into_iter()
            .find(|point| point.bac >= LEGAL_LIMIT)
            .map(|point| point.time - self.start_time())
    }

    /// First instant BAC drops below the 0.08 legal limit
    ///
    /// `None` if BAC at `now` is already below the limit, or if it stays at
    /// or above the limit for the next 24 hours.
    pub fn time_when_legal(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        if self.bac_at(now) < LEGAL_LIMIT {
            return None;
        }
        self.timeline(SOBRIETY_WINDOW_HOURS, TimelineAnchor::Now(now))
            .into_iter()
            .find(|point| point.bac < LEGAL_LIMIT)
            .map(|point| point.time)
    }

    /// Impairment tier at instant `t`
    pub fn impairment_at(&self, t: DateTime<Utc>) -> &'static ImpairmentTier {
        impairment_level(self.bac_at(t))
    }

    /// Impairment tier at the current wall-clock time
    pub fn current_impairment(&self) -> &'static ImpairmentTier {
        impairment_level(self.current_bac())
    }
}
