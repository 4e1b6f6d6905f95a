//! Solver locks on real push-puzzle levels.
//!
//! Proves:
//! 1. Returned chains replay legally to a solved board
//! 2. No returned chain passes through a deadlocked board
//! 3. Depth limit and step select exactly the bounds that cover a solution
//! 4. Unsolvable levels report `depth_limit_reached`, not an error
//! 5. The visit budget halts the search with a report

use pushbox_harness::runner::{replay_verify, run_level};
use pushbox_harness::worlds::catalog::{self, LEVELS};
use pushbox_harness::worlds::sokoban::SokobanWorld;
use pushbox_kernel::carrier::direction::Direction::{Down, Right};
use pushbox_search::policy::DeepeningPolicy;
use pushbox_search::report::TerminationReasonV1;
use pushbox_search::search::Solver;

fn solver(text: &str) -> Solver<SokobanWorld> {
    Solver::new(SokobanWorld::from_level_text(text).unwrap())
}

// ---------------------------------------------------------------------------
// 1-2. Replay of every catalog solution
// ---------------------------------------------------------------------------

#[test]
fn every_solvable_catalog_level_replays_cleanly() {
    let policy = lock_tests::fixture_policy();
    for level in LEVELS {
        let s = solver(level.text);
        let report = s.solve_with_policy(&policy).unwrap();
        let solution = report.solution;
        assert_eq!(solution.is_some(), level.solvable, "{}", level.name);
        if let Some(chain) = solution {
            // replay_verify checks every intermediate board for deadlock too.
            replay_verify(s.start().board(), &chain)
                .unwrap_or_else(|e| panic!("{}: {e}", level.name));
        }
    }
}

#[test]
fn two_step_level_matches_the_scripted_answer() {
    assert_eq!(
        solver(catalog::TWO_STEP).solve(10, 1).unwrap(),
        Some(vec![Right, Down])
    );
}

// ---------------------------------------------------------------------------
// 3. Bound and step semantics
// ---------------------------------------------------------------------------

#[test]
fn corridor_needs_four_moves() {
    let s = solver(catalog::CORRIDOR);
    assert_eq!(s.solve(3, 1).unwrap(), None);
    assert_eq!(s.solve(4, 1).unwrap().map(|c| c.len()), Some(4));
    // Bounds 3, 6: the second overshoots the limit and covers length 4.
    let report = s.solve_with_policy(&DeepeningPolicy::new(4, 3)).unwrap();
    assert_eq!(
        report.termination_reason,
        TerminationReasonV1::SolutionFound {
            bound: 6,
            length: 4
        }
    );
}

#[test]
fn solved_level_returns_empty_chain() {
    assert_eq!(solver(catalog::SOLVED).solve(10, 1).unwrap(), Some(vec![]));
}

// ---------------------------------------------------------------------------
// 4. Unsolvable levels
// ---------------------------------------------------------------------------

#[test]
fn dead_end_reports_depth_limit_reached() {
    let out = run_level(catalog::DEAD_END, &DeepeningPolicy::new(6, 2)).unwrap();
    assert!(!out.is_solved());
    assert_eq!(
        out.solve.termination_reason,
        TerminationReasonV1::DepthLimitReached { last_bound: 6 }
    );
    let v: serde_json::Value = serde_json::from_slice(&out.report_bytes).unwrap();
    assert_eq!(v["solve"]["termination_reason"]["type"], "depth_limit_reached");
    assert!(v["lurd"].is_null());
}

// ---------------------------------------------------------------------------
// 5. Visit budget
// ---------------------------------------------------------------------------

#[test]
fn visit_budget_halts_with_report() {
    let policy = DeepeningPolicy::new(300, 1).with_max_visits(10);
    let report = solver(catalog::TWIN_GOALS)
        .solve_with_policy(&policy)
        .unwrap();
    assert_eq!(report.solution, None);
    assert_eq!(
        report.termination_reason,
        TerminationReasonV1::VisitBudgetExceeded { limit: 10 }
    );
    assert_eq!(report.total_visits(), 10);
}
