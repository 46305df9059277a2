//! Output module for menu reports
//!
//! This module handles:
//! - Aggregating classification results into the final report
//! - Rendering the report as the single string returned to callers
//! - Counting per-outcome statistics for logging

mod report;
pub mod stats;

pub use report::{aggregate, MenuReport};
pub use stats::CrawlStatistics;
