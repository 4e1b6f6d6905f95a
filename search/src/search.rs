//! Iterative-deepening controller.

use crate::contract::SearchConfiguration;
use crate::error::SearchError;
use crate::explore::{ExploreOutcome, Explorer, VisitBudget};
use crate::policy::DeepeningPolicy;
use crate::report::{IterationOutcomeV1, IterationRecordV1, SolveReportV1, TerminationReasonV1};

/// Solver over an immutable start configuration.
///
/// Each call to [`Solver::solve`] or [`Solver::solve_with_policy`] is
/// independent: trees and duplicate tables never outlive an iteration, and
/// the start configuration is only ever cloned.
#[derive(Debug, Clone)]
pub struct Solver<C> {
    start: C,
}

impl<C: SearchConfiguration> Solver<C> {
    #[must_use]
    pub fn new(start: C) -> Self {
        Self { start }
    }

    #[must_use]
    pub fn start(&self) -> &C {
        &self.start
    }

    /// Search with bounds `step, 2*step, ...` up to the first one at or above
    /// `depth_limit`.
    ///
    /// `Ok(None)` means no solution was found within the limit. That is not
    /// a proof that the puzzle is unsolvable.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] if `depth_limit` or `step` is
    /// zero.
    pub fn solve(&self, depth_limit: u32, step: u32) -> Result<Option<Vec<C::Move>>, SearchError> {
        let policy = DeepeningPolicy::new(depth_limit, step);
        Ok(self.solve_with_policy(&policy)?.solution)
    }

    /// Run the deepening loop and return the full report.
    ///
    /// All runtime terminations (solution, exhausted bounds, visit budget,
    /// oracle failure) come back as `Ok`; inspect
    /// `report.termination_reason`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] only from pre-flight policy
    /// validation. No iteration runs in that case.
    pub fn solve_with_policy(
        &self,
        policy: &DeepeningPolicy,
    ) -> Result<SolveReportV1<C::Move>, SearchError> {
        policy.validate()?;

        let mut budget = VisitBudget::new(policy.max_visits);
        let mut iterations = Vec::new();
        let mut last_bound = 0;

        for bound in policy.bounds() {
            last_bound = bound;
            let mut explorer = Explorer::new(&self.start, bound, &mut budget);
            let outcome = explorer.run();
            let stats = explorer.stats();
            // The tree and duplicate table go away here, before the next
            // iteration allocates its own.
            drop(explorer);

            tracing::debug!(
                bound,
                visited = stats.nodes_visited,
                created = stats.nodes_created,
                seen = stats.seen_states,
                duplicates = stats.duplicates_pruned,
                deadlocks = stats.deadlocks_pruned,
                "iteration finished"
            );

            match outcome {
                ExploreOutcome::Continue => {
                    iterations.push(IterationRecordV1 {
                        bound,
                        outcome: IterationOutcomeV1::Exhausted,
                        stats,
                    });
                }
                ExploreOutcome::Found(chain) => {
                    tracing::info!(bound, length = chain.len(), "solution found");
                    iterations.push(IterationRecordV1 {
                        bound,
                        outcome: IterationOutcomeV1::SolutionFound,
                        stats,
                    });
                    return Ok(SolveReportV1 {
                        termination_reason: TerminationReasonV1::SolutionFound {
                            bound,
                            length: chain.len(),
                        },
                        solution: Some(chain),
                        iterations,
                        policy: policy.clone(),
                    });
                }
                ExploreOutcome::Halted(reason) => {
                    tracing::info!(bound, reason = reason.kind(), "search halted");
                    iterations.push(IterationRecordV1 {
                        bound,
                        outcome: IterationOutcomeV1::Halted,
                        stats,
                    });
                    return Ok(SolveReportV1 {
                        solution: None,
                        termination_reason: reason,
                        iterations,
                        policy: policy.clone(),
                    });
                }
            }
        }

        tracing::info!(last_bound, "no solution within depth limit");
        Ok(SolveReportV1 {
            solution: None,
            termination_reason: TerminationReasonV1::DepthLimitReached { last_bound },
            iterations,
            policy: policy.clone(),
        })
    }
}
