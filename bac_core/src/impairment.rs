//! Qualitative impairment classification of a BAC value.

use crate::catalog::get_default_catalog;
use serde::Serialize;
use std::fmt;

/// Verdict on whether it is reasonable to drive
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DrivingFitness {
    Yes,
    Caution,
    No,
}

impl DrivingFitness {
    pub fn as_str(self) -> &'static str {
        match self {
            DrivingFitness::Yes => "YES",
            DrivingFitness::Caution => "CAUTION",
            DrivingFitness::No => "NO",
        }
    }
}

impl fmt::Display for DrivingFitness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Severity colour for presentation layers
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StatusColor {
    Safe,
    Caution,
    Warning,
    Danger,
    Critical,
}

/// One band of the impairment scale, starting at `threshold`
#[derive(Clone, Debug, Serialize)]
pub struct ImpairmentTier {
    pub threshold: f64,
    pub level: String,
    pub description: String,
    pub color: StatusColor,
    pub fitness_to_drive: DrivingFitness,
    pub legal_status: String,
}

/// Classify a BAC value
///
/// Picks the highest tier whose threshold does not exceed `bac`. Values
/// below every threshold (negative input) land in the lowest tier.
pub fn impairment_level(bac: f64) -> &'static ImpairmentTier {
    classify(&get_default_catalog().tiers, bac)
}

/// Classify against an arbitrary ascending tier table
pub fn classify(tiers: &[ImpairmentTier], bac: f64) -> &ImpairmentTier {
    tiers
        .iter()
        .rev()
        .find(|tier| bac >= tier.threshold)
        .or_else(|| tiers.first())
        .unwrap_or_else(|| &get_default_catalog().tiers[0])
}
