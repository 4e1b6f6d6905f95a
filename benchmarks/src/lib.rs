//! Shared helpers for pushbox benchmark suites.

use pushbox_harness::worlds::catalog::{CatalogLevel, LEVELS};
use pushbox_harness::worlds::sokoban::SokobanWorld;
use pushbox_kernel::carrier::direction::Direction;
use pushbox_search::policy::DeepeningPolicy;
use pushbox_search::report::SolveReportV1;
use pushbox_search::search::Solver;

/// A catalog level parsed once, ready to be solved repeatedly.
pub struct LevelSetup {
    pub name: &'static str,
    pub text: &'static str,
    pub solver: Solver<SokobanWorld>,
}

/// Parse every catalog level.
///
/// # Panics
///
/// Panics if a catalog level fails to parse. Benchmark setup failures are fatal.
#[must_use]
pub fn prepare_levels() -> Vec<LevelSetup> {
    LEVELS.iter().map(prepare_level).collect()
}

/// Parse one catalog level.
///
/// # Panics
///
/// Panics if the level fails to parse.
#[must_use]
pub fn prepare_level(level: &CatalogLevel) -> LevelSetup {
    let world = SokobanWorld::from_level_text(level.text)
        .unwrap_or_else(|e| panic!("catalog level {} does not parse: {e}", level.name));
    LevelSetup {
        name: level.name,
        text: level.text,
        solver: Solver::new(world),
    }
}

/// Policy used by every benchmark; large enough that no solvable catalog
/// level is missed.
#[must_use]
pub fn bench_policy() -> DeepeningPolicy {
    DeepeningPolicy::new(300, 50)
}

/// Solve with [`bench_policy`]. Returns the full report.
///
/// # Panics
///
/// Panics if the policy is rejected. Benchmark runs are expected to succeed.
#[must_use]
pub fn solve_only(setup: &LevelSetup) -> SolveReportV1<Direction> {
    setup
        .solver
        .solve_with_policy(&bench_policy())
        .expect("bench policy is valid")
}
