//! Terminal display utilities for CLI output.
//!
//! Provides styled tables and themed status lines.

pub mod tables;
pub mod theme;

pub use tables::{
    TableBuilder, create_results_table, create_status_table, create_summary_table,
    format_timestamp,
};
pub use theme::{Outcome, THEME, Theme};
