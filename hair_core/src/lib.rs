#![forbid(unsafe_code)]

//! Core domain model and business logic for hair care routines.
//!
//! This crate provides:
//! - Domain types (hair characteristics, profiles, calendars)
//! - The profile catalog and exact-match lookup
//! - Porosity classification
//! - Wash-day distribution and routine details
//! - Weekly calendar generation
//! - Configuration and routine state persistence

pub mod types;
pub mod error;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod porosity;
pub mod schedule;
pub mod details;
pub mod calendar;
pub mod state;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use catalog::{build_default_catalog, find_profile, get_default_catalog, match_profile, Catalog};
pub use config::Config;
pub use porosity::classify_porosity;
pub use schedule::distribute_week;
pub use details::build_details;
pub use calendar::{
    cycle_week_for_date, generate_weekly_calendar, get_today_routine, monday_first_index,
    next_cycle_week, routine_for_date,
};
pub use state::RoutineState;
