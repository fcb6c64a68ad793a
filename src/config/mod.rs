//! Configuration loading for the attendance rules.
//!
//! Rules are read from a directory of YAML files: statutory break tiers,
//! submission limits and the standard working day.
//!
//! # Example
//!
//! ```no_run
//! use kintai_core::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/kintai").unwrap();
//! println!("Max span: {}h", config.rules().limits.max_span_hours);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{BreakRules, BreakTier, LaborRules, StandardSchedule, SubmissionLimits};
