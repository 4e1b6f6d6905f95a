//! `SolveReportV1`: what a solve run found and what it cost.
//!
//! The report is the only output of [`crate::search::Solver::solve_with_policy`].
//! Runtime halts are recorded here as a [`TerminationReasonV1`], never as an
//! `Err`.

use crate::policy::DeepeningPolicy;

/// Counters for one deepening iteration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IterationStatsV1 {
    /// Nodes allocated, root included.
    pub nodes_created: u64,
    /// Nodes whose configuration was derived and evaluated.
    pub nodes_visited: u64,
    /// Nodes finished because they lay beyond the bound.
    pub depth_cutoffs: u64,
    /// Nodes finished because the oracle reported a deadlock.
    pub deadlocks_pruned: u64,
    /// Nodes finished because an earlier node claimed their state.
    pub duplicates_pruned: u64,
    /// Subset of `duplicates_pruned` whose representative was already released.
    pub duplicates_of_released: u64,
    /// Nodes finished because every child finished.
    pub exhausted: u64,
    /// Finished nodes that were asked to be explored again.
    pub revisit_defects: u64,
    /// Distinct states in the duplicate table at the end of the iteration.
    pub seen_states: u64,
    /// Most nodes live in the tree at once.
    pub tree_high_water: u64,
}

/// How one iteration ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IterationOutcomeV1 {
    /// Every branch finished without a solution.
    Exhausted,
    /// A solved configuration was reached.
    SolutionFound,
    /// The search stopped early (budget or oracle failure).
    Halted,
}

/// One iteration: its bound, outcome and counters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IterationRecordV1 {
    pub bound: u32,
    pub outcome: IterationOutcomeV1,
    pub stats: IterationStatsV1,
}

/// Why the controller stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminationReasonV1 {
    /// A solution of `length` moves was found with depth bound `bound`.
    SolutionFound { bound: u32, length: usize },
    /// Every bound up to `last_bound` was exhausted. Not a proof of
    /// unsolvability.
    DepthLimitReached { last_bound: u32 },
    /// The policy's visit budget ran out.
    VisitBudgetExceeded { limit: u64 },
    /// The oracle rejected a move chain the tree produced.
    OracleContractViolation { depth: u32, detail: String },
}

impl TerminationReasonV1 {
    /// Stable snake-case tag used in JSON.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::SolutionFound { .. } => "solution_found",
            Self::DepthLimitReached { .. } => "depth_limit_reached",
            Self::VisitBudgetExceeded { .. } => "visit_budget_exceeded",
            Self::OracleContractViolation { .. } => "oracle_contract_violation",
        }
    }
}

/// Complete result of a solve run.
#[derive(Debug, Clone)]
pub struct SolveReportV1<M> {
    /// The winning move chain, if any.
    pub solution: Option<Vec<M>>,
    pub termination_reason: TerminationReasonV1,
    /// One record per bound tried, in order.
    pub iterations: Vec<IterationRecordV1>,
    /// The policy the run used.
    pub policy: DeepeningPolicy,
}

impl<M> SolveReportV1<M> {
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.solution.is_some()
    }

    /// Node visits summed over all iterations.
    #[must_use]
    pub fn total_visits(&self) -> u64 {
        self.iterations.iter().map(|i| i.stats.nodes_visited).sum()
    }

    /// Re-visitation defects summed over all iterations.
    #[must_use]
    pub fn total_revisit_defects(&self) -> u64 {
        self.iterations.iter().map(|i| i.stats.revisit_defects).sum()
    }
}

impl<M: std::fmt::Display> SolveReportV1<M> {
    /// Deterministic JSON rendering. Object keys are emitted sorted.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "iterations": self.iterations.iter().map(iteration_to_json).collect::<Vec<_>>(),
            "policy": {
                "depth_limit": self.policy.depth_limit,
                "max_visits": self.policy.max_visits,
                "step": self.policy.step,
            },
            "solution": self
                .solution
                .as_ref()
                .map(|chain| chain.iter().map(ToString::to_string).collect::<Vec<_>>()),
            "termination_reason": termination_to_json(&self.termination_reason),
        })
    }

    /// Compact JSON bytes of [`Self::to_json_value`].
    ///
    /// # Errors
    ///
    /// Propagates `serde_json` serialization failure.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(&self.to_json_value())
    }
}

fn iteration_to_json(r: &IterationRecordV1) -> serde_json::Value {
    let outcome = match r.outcome {
        IterationOutcomeV1::Exhausted => "exhausted",
        IterationOutcomeV1::SolutionFound => "solution_found",
        IterationOutcomeV1::Halted => "halted",
    };
    let s = &r.stats;
    serde_json::json!({
        "bound": r.bound,
        "outcome": outcome,
        "stats": {
            "deadlocks_pruned": s.deadlocks_pruned,
            "depth_cutoffs": s.depth_cutoffs,
            "duplicates_of_released": s.duplicates_of_released,
            "duplicates_pruned": s.duplicates_pruned,
            "exhausted": s.exhausted,
            "nodes_created": s.nodes_created,
            "nodes_visited": s.nodes_visited,
            "revisit_defects": s.revisit_defects,
            "seen_states": s.seen_states,
            "tree_high_water": s.tree_high_water,
        },
    })
}

fn termination_to_json(t: &TerminationReasonV1) -> serde_json::Value {
    let mut obj = serde_json::json!({ "type": t.kind() });
    match t {
        TerminationReasonV1::SolutionFound { bound, length } => {
            obj["bound"] = (*bound).into();
            obj["length"] = (*length).into();
        }
        TerminationReasonV1::DepthLimitReached { last_bound } => {
            obj["last_bound"] = (*last_bound).into();
        }
        TerminationReasonV1::VisitBudgetExceeded { limit } => {
            obj["limit"] = (*limit).into();
        }
        TerminationReasonV1::OracleContractViolation { depth, detail } => {
            obj["depth"] = (*depth).into();
            obj["detail"] = detail.clone().into();
        }
    }
    obj
}
