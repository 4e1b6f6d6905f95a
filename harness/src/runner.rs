//! Harness runner: parse a level, solve it, verify the answer, package a report.
//!
//! The runner uses the kernel for board rules and hashing and the search
//! crate for solving. It re-checks every solution itself before reporting it.
//!
//! # Pipeline
//!
//! ```text
//! parse_level() → Solver::solve_with_policy()
//!   → replay_verify() (fresh clone of the start board)
//!   → render_lurd() → RunReportV1 JSON → canonical_hash(RunReport)
//! ```

use pushbox_kernel::carrier::board::{Board, MoveError};
use pushbox_kernel::carrier::direction::Direction;
use pushbox_kernel::carrier::level::LevelParseError;
use pushbox_kernel::proof::hash::{canonical_hash, ContentHash, HashDomain};

use pushbox_search::error::SearchError;
use pushbox_search::policy::DeepeningPolicy;
use pushbox_search::report::SolveReportV1;
use pushbox_search::search::Solver;

use crate::worlds::sokoban::{render_lurd, SokobanWorld};

/// Schema tag written into every run report.
pub const RUN_REPORT_SCHEMA: &str = "run_report.v1";

/// Why a move chain failed replay verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplayError {
    /// Move `index` was illegal at its position.
    IllegalMove { index: usize, error: MoveError },
    /// The position after move `index` is deadlocked.
    DeadlockedAt { index: usize },
    /// Every move applied, but the final position is not solved.
    NotSolved { length: usize },
}

impl std::fmt::Display for ReplayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IllegalMove { index, error } => write!(f, "move {index} is illegal: {error}"),
            Self::DeadlockedAt { index } => write!(f, "deadlocked after move {index}"),
            Self::NotSolved { length } => {
                write!(f, "{length} moves applied but the level is not solved")
            }
        }
    }
}

impl std::error::Error for ReplayError {}

/// Error during a harness run.
#[derive(Debug)]
pub enum RunError {
    /// The level text did not parse.
    Parse(LevelParseError),
    /// The policy failed pre-flight validation.
    Policy(SearchError),
    /// The solver returned a chain that does not solve the level.
    Replay(ReplayError),
    /// Report serialization failed.
    Serialize { detail: String },
}

impl std::fmt::Display for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "level parse error: {e}"),
            Self::Policy(e) => write!(f, "policy error: {e}"),
            Self::Replay(e) => write!(f, "solution failed replay: {e}"),
            Self::Serialize { detail } => write!(f, "report serialization error: {detail}"),
        }
    }
}

impl std::error::Error for RunError {}

impl From<LevelParseError> for RunError {
    fn from(e: LevelParseError) -> Self {
        Self::Parse(e)
    }
}

impl From<SearchError> for RunError {
    fn from(e: SearchError) -> Self {
        Self::Policy(e)
    }
}

impl From<ReplayError> for RunError {
    fn from(e: ReplayError) -> Self {
        Self::Replay(e)
    }
}

/// Result of [`run_level`]: the solve report plus its packaged artifact.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// The start board the solver searched from.
    pub start: Board,
    pub solve: SolveReportV1<Direction>,
    /// LURD rendering of the solution, pushes uppercase.
    pub lurd: Option<String>,
    /// `canonical_hash(LevelText, level_text)`.
    pub level_hash: ContentHash,
    /// Canonical JSON bytes of the `RunReportV1`.
    pub report_bytes: Vec<u8>,
    /// `canonical_hash(RunReport, report_bytes)`.
    pub report_digest: ContentHash,
}

impl RunOutcome {
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.solve.is_solved()
    }
}

/// Replay `chain` from a clone of `start`: every move legal, no intermediate
/// position deadlocked, final position solved.
///
/// # Errors
///
/// Returns the first [`ReplayError`] found.
pub fn replay_verify(start: &Board, chain: &[Direction]) -> Result<(), ReplayError> {
    let mut board = start.clone();
    for (index, &dir) in chain.iter().enumerate() {
        board
            .apply_move(dir)
            .map_err(|error| ReplayError::IllegalMove { index, error })?;
        board.recompute_derived_maps();
        if board.is_deadlocked() {
            return Err(ReplayError::DeadlockedAt { index });
        }
    }
    if board.is_solved() {
        Ok(())
    } else {
        Err(ReplayError::NotSolved {
            length: chain.len(),
        })
    }
}

/// Parse, solve, verify and package one level.
///
/// A level with no solution within the policy's limits is a successful run
/// whose report says so.
///
/// # Errors
///
/// Returns [`RunError`] on parse failure, invalid policy, a solution that
/// fails replay, or serialization failure.
pub fn run_level(level_text: &str, policy: &DeepeningPolicy) -> Result<RunOutcome, RunError> {
    let world = SokobanWorld::from_level_text(level_text)?;
    let level_hash = canonical_hash(HashDomain::LevelText, level_text.as_bytes());
    tracing::debug!(
        %level_hash,
        depth_limit = policy.depth_limit,
        step = policy.step,
        "running level"
    );

    let solver = Solver::new(world);
    let solve = solver.solve_with_policy(policy)?;
    let start = solver.start().board().clone();

    let lurd = match &solve.solution {
        Some(chain) => {
            replay_verify(&start, chain)?;
            Some(render_lurd(&start, chain).map_err(|error| {
                let index = match error {
                    MoveError::InChain { index, .. } => index,
                    _ => 0,
                };
                RunError::Replay(ReplayError::IllegalMove { index, error })
            })?)
        }
        None => None,
    };

    let report = build_run_report(&level_hash, level_text, &solve, lurd.as_deref());
    let report_bytes = serde_json::to_vec(&report).map_err(|e| RunError::Serialize {
        detail: e.to_string(),
    })?;
    let report_digest = canonical_hash(HashDomain::RunReport, &report_bytes);
    tracing::info!(
        %report_digest,
        solved = solve.is_solved(),
        reason = solve.termination_reason.kind(),
        "run finished"
    );

    Ok(RunOutcome {
        start,
        solve,
        lurd,
        level_hash,
        report_bytes,
        report_digest,
    })
}

/// Build the `RunReportV1` JSON value. Keys serialize sorted.
#[must_use]
pub fn build_run_report(
    level_hash: &ContentHash,
    level_text: &str,
    solve: &SolveReportV1<Direction>,
    lurd: Option<&str>,
) -> serde_json::Value {
    serde_json::json!({
        "level": {
            "hash": level_hash.to_string(),
            "text": level_text,
        },
        "lurd": lurd,
        "schema_version": RUN_REPORT_SCHEMA,
        "solve": solve.to_json_value(),
        "verified": solve.is_solved(),
    })
}
