//! Search policy types.

use crate::error::SearchError;

/// Iterative-deepening configuration.
///
/// Bounds run `step, 2*step, ...` while the previous bound is below
/// `depth_limit`, so the last bound tried is the first multiple of `step`
/// at or above `depth_limit`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeepeningPolicy {
    /// The controller stops deepening once a bound reaches this value.
    pub depth_limit: u32,
    /// Increment between consecutive bounds.
    pub step: u32,
    /// Hard cap on node visits summed over all iterations.
    pub max_visits: Option<u64>,
}

impl DeepeningPolicy {
    #[must_use]
    pub fn new(depth_limit: u32, step: u32) -> Self {
        Self {
            depth_limit,
            step,
            max_visits: None,
        }
    }

    #[must_use]
    pub fn with_max_visits(mut self, max_visits: u64) -> Self {
        self.max_visits = Some(max_visits);
        self
    }

    /// Validate before any iteration runs.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] if `depth_limit` or `step` is
    /// zero.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.depth_limit == 0 {
            return Err(SearchError::InvalidPolicy {
                detail: "depth_limit must be positive".into(),
            });
        }
        if self.step == 0 {
            return Err(SearchError::InvalidPolicy {
                detail: "step must be positive".into(),
            });
        }
        Ok(())
    }

    /// The depth bounds the controller will try, in order.
    ///
    /// Saturates at `u32::MAX` instead of overflowing; a saturated bound is
    /// yielded once. Yields nothing for a zero `step`.
    pub fn bounds(&self) -> impl Iterator<Item = u32> {
        let (limit, step) = (self.depth_limit, self.step);
        let mut current: u32 = 0;
        std::iter::from_fn(move || {
            if step == 0 || current >= limit {
                return None;
            }
            let next = current.saturating_add(step);
            if next == current {
                return None;
            }
            current = next;
            Some(next)
        })
    }
}

impl Default for DeepeningPolicy {
    fn default() -> Self {
        Self {
            depth_limit: 200,
            step: 1,
            max_visits: None,
        }
    }
}
