//! Attendance (kintai) rule engine
//!
//! This crate provides the computation core behind the attendance screens:
//! duration formatting and parsing, statutory breaks under article 34 of the
//! Labour Standards Act, net working time, date-range expansion, conflict
//! detection between leave and time adjustment requests, and the validation
//! every request form runs before it is submitted.
//!
//! # Example
//!
//! ```
//! use kintai_core::calculation::{calculate_working_time, format_minutes};
//!
//! assert_eq!(
//!     calculate_working_time(Some("2024-03-05T09:00"), Some("2024-03-05T18:01"), None),
//!     "8:01"
//! );
//! assert_eq!(format_minutes(-75), "-1:15");
//! ```

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod submission;
