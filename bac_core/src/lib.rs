#![forbid(unsafe_code)]

//! Core domain model and simulation engine for the BAC simulator.
//!
//! Estimates blood-alcohol concentration over time from a log of drinks and
//! food, using a food-modulated absorption curve on top of the Widmark
//! equation. Educational only; not a medical or legal instrument.
//!
//! This crate provides:
//! - Domain types (profile, drink/food categories, consumption events)
//! - Catalog of standard drinks, foods and impairment tiers
//! - Consumption ledger and absorption model
//! - BAC engine with timeline, peak and threshold queries
//! - Scenario file input and configuration

pub mod types;
pub mod error;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod ledger;
pub mod absorption;
pub mod engine;
pub mod timeline;
pub mod impairment;
pub mod scenario;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use catalog::{get_default_catalog, standard_drinks, Catalog};
pub use config::Config;
pub use ledger::Ledger;
pub use absorption::absorption_factor;
pub use engine::{bac_at, Simulator};
pub use timeline::{Peak, TimelineAnchor, TimelinePoint};
pub use impairment::{impairment_level, DrivingFitness, ImpairmentTier, StatusColor};
pub use scenario::ScenarioFile;
