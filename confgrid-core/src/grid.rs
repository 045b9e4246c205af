//! Enumeration of (false negative, false positive) pairs over a fixed population.
//!
//! For every FN in `0..=max_false_negatives` (outer, ascending) and every FP in
//! `0..=FN` (inner, ascending) the remaining items after true negatives and
//! errors are counted as true positives.

use serde::{Deserialize, Serialize};
use std::iter::FusedIterator;

use crate::counts::ConfusionCounts;
use crate::error::{GridError, Result};
use crate::metrics::{ClassificationMetrics, ZeroDivision};
use crate::report::ReportRow;

/// Bounds of the enumeration grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridBounds {
    /// Size of the classified population.
    pub total: u32,
    /// True negatives, held constant across the grid.
    pub true_negatives: u32,
    /// Largest false-negative count; false positives never exceed the
    /// current false-negative count.
    pub max_false_negatives: u32,
}

impl Default for GridBounds {
    fn default() -> Self {
        Self {
            total: 100,
            true_negatives: 7,
            max_false_negatives: 6,
        }
    }
}

impl GridBounds {
    pub fn new(total: u32, true_negatives: u32, max_false_negatives: u32) -> Self {
        Self {
            total,
            true_negatives,
            max_false_negatives,
        }
    }

    /// Check that every grid point leaves a non-negative true-positive count.
    ///
    /// The tightest point is FN = FP = `max_false_negatives`.
    pub fn validate(&self) -> std::result::Result<(), GridError> {
        if self.total == 0 {
            return Err(GridError::EmptyPopulation);
        }
        let requested =
            u64::from(self.true_negatives) + 2 * u64::from(self.max_false_negatives);
        if requested > u64::from(self.total) {
            return Err(GridError::CountsExceedTotal {
                total: self.total,
                requested: u32::try_from(requested).unwrap_or(u32::MAX),
            });
        }
        Ok(())
    }

    /// Number of grid points: `(m + 1)(m + 2) / 2`, saturating at `usize::MAX`.
    pub fn len(&self) -> usize {
        point_count(self.max_false_negatives)
    }

    /// A grid always contains at least the (0, 0) point.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn iter(&self) -> GridIter {
        GridIter::new(self.max_false_negatives)
    }

    /// Confusion counts at one grid point.
    pub fn counts_at(&self, point: GridPoint) -> std::result::Result<ConfusionCounts, GridError> {
        ConfusionCounts::derive(
            self.total,
            self.true_negatives,
            point.false_negatives,
            point.false_positives,
        )
    }

    /// Validate the bounds, then yield one scored row per grid point in
    /// enumeration order. Rows dropped by [`ZeroDivision::Skip`] are omitted.
    pub fn rows(
        &self,
        policy: ZeroDivision,
    ) -> Result<impl Iterator<Item = Result<ReportRow>> + use<>> {
        self.validate()?;
        let bounds = *self;
        tracing::debug!(
            total = bounds.total,
            true_negatives = bounds.true_negatives,
            max_false_negatives = bounds.max_false_negatives,
            points = bounds.len(),
            %policy,
            "enumerating grid"
        );

        Ok(bounds.iter().filter_map(move |point| -> Option<Result<ReportRow>> {
            let counts = match bounds.counts_at(point) {
                Ok(counts) => counts,
                Err(e) => return Some(Err(e.into())),
            };
            match ClassificationMetrics::compute(&counts, policy) {
                Ok(Some(metrics)) => {
                    tracing::trace!(%counts, "scored grid point");
                    Some(Ok(ReportRow { counts, metrics }))
                }
                Ok(None) => None,
                Err(e) => Some(Err(e.into())),
            }
        }))
    }
}

fn point_count(max_false_negatives: u32) -> usize {
    let m = u128::from(max_false_negatives);
    usize::try_from((m + 1) * (m + 2) / 2).unwrap_or(usize::MAX)
}

impl IntoIterator for &GridBounds {
    type Item = GridPoint;
    type IntoIter = GridIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// One (FN, FP) pair of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridPoint {
    pub false_negatives: u32,
    pub false_positives: u32,
}

/// Lazy iterator over the grid in enumeration order.
#[derive(Debug, Clone)]
pub struct GridIter {
    false_negatives: u32,
    false_positives: u32,
    remaining: usize,
}

impl GridIter {
    fn new(max_false_negatives: u32) -> Self {
        Self {
            false_negatives: 0,
            false_positives: 0,
            remaining: point_count(max_false_negatives),
        }
    }
}

impl Iterator for GridIter {
    type Item = GridPoint;

    fn next(&mut self) -> Option<GridPoint> {
        if self.remaining == 0 {
            return None;
        }
        let point = GridPoint {
            false_negatives: self.false_negatives,
            false_positives: self.false_positives,
        };
        if self.false_positives < self.false_negatives {
            self.false_positives += 1;
        } else {
            self.false_negatives = self.false_negatives.saturating_add(1);
            self.false_positives = 0;
        }
        self.remaining -= 1;
        Some(point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for GridIter {}

impl FusedIterator for GridIter {}
