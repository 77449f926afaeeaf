//! Historical usage chart.
//!
//! Reads a static list of `{ time, usage_count }` records and turns it into
//! a bar or line chart specification for the browser.

mod chart;
mod history;

pub use chart::{ChartColors, ChartKind, ChartSpec};
pub use history::{UsageError, UsageHistory, UsageRecord};
