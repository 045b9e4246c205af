//! Rendering of scored rows as text, CSV or JSON.
//!
//! The text layout is a header line followed by one line per row, each field
//! right-aligned in a fixed-width column. Counts are rendered with the same
//! decimal places as the metrics (`     3.00`).

use serde::{Deserialize, Serialize};
use std::io::Write;
use std::str::FromStr;

use crate::config::OutputConfig;
use crate::counts::ConfusionCounts;
use crate::error::Result;
use crate::grid::GridBounds;
use crate::metrics::{ClassificationMetrics, ZeroDivision};

/// Title line printed before the header when the banner is enabled.
pub const BANNER: &str = "---------- #Example code for calculation quality metrics -------";

/// Column labels of the text report.
pub const TEXT_HEADER: &str = " FN FP TP pre acc rec F1";

/// Column labels of the CSV report.
pub const CSV_HEADER: &str = "fn,fp,tp,precision,accuracy,recall,f1";

/// Output format of a report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Text,
    Csv,
    Json,
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportFormat::Text => write!(f, "text"),
            ReportFormat::Csv => write!(f, "csv"),
            ReportFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(ReportFormat::Text),
            "csv" => Ok(ReportFormat::Csv),
            "json" => Ok(ReportFormat::Json),
            other => Err(format!(
                "unknown report format '{other}' (expected text, csv or json)"
            )),
        }
    }
}

/// One line of the report: the confusion counts and their metrics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    #[serde(flatten)]
    pub counts: ConfusionCounts,
    #[serde(flatten)]
    pub metrics: ClassificationMetrics,
}

impl ReportRow {
    /// Fixed-width text line: FN, FP, TP, precision, accuracy, recall, F1.
    pub fn to_text(&self, width: usize, decimals: usize) -> String {
        let c = &self.counts;
        let m = &self.metrics;
        [
            f64::from(c.false_negatives),
            f64::from(c.false_positives),
            f64::from(c.true_positives),
            m.precision,
            m.accuracy,
            m.recall,
            m.f1_score,
        ]
        .iter()
        .map(|v| format!("{v:>width$.decimals$}"))
        .collect()
    }

    pub fn to_csv(&self, decimals: usize) -> String {
        let c = &self.counts;
        let m = &self.metrics;
        format!(
            "{},{},{},{:.d$},{:.d$},{:.d$},{:.d$}",
            c.false_negatives,
            c.false_positives,
            c.true_positives,
            m.precision,
            m.accuracy,
            m.recall,
            m.f1_score,
            d = decimals
        )
    }
}

/// Enumerate `bounds`, score every point under `policy` and write the report.
///
/// Returns the number of rows written.
pub fn write_report<W: Write>(
    writer: &mut W,
    bounds: &GridBounds,
    policy: ZeroDivision,
    output: &OutputConfig,
) -> Result<usize> {
    let rows = bounds.rows(policy)?;
    let written = write_rows(writer, rows, output)?;
    tracing::info!(rows = written, format = %output.format, "report written");
    Ok(written)
}

/// Write already-scored rows in the configured format.
pub fn write_rows<W, I>(writer: &mut W, rows: I, output: &OutputConfig) -> Result<usize>
where
    W: Write,
    I: IntoIterator<Item = Result<ReportRow>>,
{
    output.validate()?;
    let mut written = 0;
    match output.format {
        ReportFormat::Text => {
            if output.banner {
                writeln!(writer, "{BANNER}")?;
                writeln!(writer)?;
            }
            writeln!(writer, "{TEXT_HEADER}")?;
            for row in rows {
                writeln!(writer, "{}", row?.to_text(output.width, output.decimals))?;
                written += 1;
            }
        }
        ReportFormat::Csv => {
            writeln!(writer, "{CSV_HEADER}")?;
            for row in rows {
                writeln!(writer, "{}", row?.to_csv(output.decimals))?;
                written += 1;
            }
        }
        ReportFormat::Json => {
            let rows = rows.into_iter().collect::<Result<Vec<_>>>()?;
            serde_json::to_writer_pretty(&mut *writer, &rows)?;
            writeln!(writer)?;
            written = rows.len();
        }
    }
    Ok(written)
}

/// Score a single confusion matrix and write it as a one-row report.
///
/// Returns `false` when the row was dropped by [`ZeroDivision::Skip`].
pub fn write_score<W: Write>(
    writer: &mut W,
    counts: &ConfusionCounts,
    policy: ZeroDivision,
    output: &OutputConfig,
) -> Result<bool> {
    let Some(metrics) = ClassificationMetrics::compute(counts, policy)? else {
        tracing::warn!(%counts, "matrix skipped by zero-division policy");
        return Ok(false);
    };
    let row = ReportRow {
        counts: *counts,
        metrics,
    };
    match output.format {
        ReportFormat::Json => {
            serde_json::to_writer_pretty(&mut *writer, &row)?;
            writeln!(writer)?;
        }
        _ => {
            write_rows(writer, [Ok(row)], output)?;
        }
    }
    Ok(true)
}
