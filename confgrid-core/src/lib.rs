//! # confgrid core
//!
//! Core library for confgrid.
//! Enumerates false-negative/false-positive combinations over a fixed
//! population, derives the true-positive count, scores each combination with
//! precision, accuracy, recall and F1, and renders the result as a report.

pub mod config;
pub mod counts;
pub mod error;
pub mod grid;
pub mod metrics;
pub mod report;

// Re-export commonly used types at the crate root.
pub use config::{ConfgridConfig, ConfigOverrides, MetricsConfig, OutputConfig, load_config};
pub use counts::ConfusionCounts;
pub use error::{ConfgridError, ConfigError, GridError, MetricError, Result};
pub use grid::{GridBounds, GridIter, GridPoint};
pub use metrics::{ClassificationMetrics, ZeroDivision};
pub use report::{ReportFormat, ReportRow, write_report, write_rows, write_score};
