//! # Planboard Core Library
//!
//! This library provides the scheduling computation engine behind
//! Planboard: work items arranged against a weekly calendar, grouped by
//! project and delivery team, with detection of schedule inconsistencies.
//! It implements a CLI-first philosophy where all operations are available
//! via a standalone CLI binary, with any GUI being a thin presentation
//! layer over the same core library.
//!
//! ## Architecture
//!
//! - **Calendar**: Monday-aligned week indexing with fractional in-week
//!   offsets and a Mon-Fri work week for capacity math
//! - **Capacity**: per-team weekly utilization, pro-rated by workday
//!   overlap
//! - **Alerts**: rule engine flagging progress delays, dependency ordering
//!   conflicts, off-schedule completion values, and capacity overflow
//! - **Graph**: dependency accessors and cycle-safe authoring
//! - **Plan**: the caller-owned entity set with strict load-time
//!   validation
//!
//! The engine is synchronous and pure: every function is deterministic in
//! its explicit arguments, including the reference "now" date.
//!
//! ## Key Components
//!
//! - [`AlertDetector`]: Rule engine producing the alert list
//! - [`Plan`]: Entity set loading, validation, and sample data
//! - [`Config`]: Application configuration management

pub mod alerts;
pub mod calendar;
pub mod capacity;
pub mod config;
pub mod error;
pub mod graph;
pub mod layout;
pub mod model;
pub mod plan;

pub use alerts::{
    generate_alerts, is_progress_delayed, progress_delay_details, Alert, AlertConfig,
    AlertDetector, AlertKind, ProgressDelayDetails, Severity,
};
pub use calendar::{all_weeks_in_year, weeks_around_date, WeekInfo};
pub use capacity::{
    capacity_breakdown, capacity_for_week, CapacityBreakdown, CapacityData, CapacityEntry,
};
pub use config::Config;
pub use error::{ConfigError, CoreError, GraphError, PlanError, Result, ValidationError};
pub use model::{PdtTeam, Project, WorkItem};
pub use plan::Plan;
