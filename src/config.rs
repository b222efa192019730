//! Explicit parameters for the matcher and the background selector.

use crate::error::{Result, ThemeError};
use crate::pipeline::select::resolve_override;

/// Default maximum RGB distance for a color to count as a match.
pub const DEFAULT_MAX_DIFF: f64 = 100.0;

/// Parameters for one run of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SchemeConfig {
    /// Colors at or beyond this distance from a slot never match it.
    pub max_diff: f64,
    /// Force the background slot. Values outside `0..16` mean "use prominence".
    pub background_override: Option<i64>,
}

impl Default for SchemeConfig {
    fn default() -> Self {
        Self {
            max_diff: DEFAULT_MAX_DIFF,
            background_override: None,
        }
    }
}

impl SchemeConfig {
    pub fn with_max_diff(mut self, max_diff: f64) -> Self {
        self.max_diff = max_diff;
        self
    }

    pub fn with_background(mut self, slot: Option<i64>) -> Self {
        self.background_override = slot;
        self
    }

    /// Reject thresholds that can never produce a meaningful match.
    pub fn validate(&self) -> Result<()> {
        if !self.max_diff.is_finite() || self.max_diff < 0.0 {
            return Err(ThemeError::invalid_parameter("max_diff", self.max_diff));
        }
        Ok(())
    }

    /// The override as a slot index, if it names one.
    pub fn override_slot(&self) -> Option<usize> {
        resolve_override(self.background_override)
    }
}
