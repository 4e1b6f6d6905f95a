//! Iterative-deepening behavior locks, driven by scripted oracles.
//!
//! Proves:
//! 1. An already-solved start returns the empty chain on the first iteration
//! 2. A two-move puzzle is solved exactly when the second bound is reached
//! 3. An immediate deadlock yields no solution
//! 4. Two chains reaching one state key: only the first is expanded
//! 5. The solver calls `recompute_derived_maps` before every solved,
//!    deadlock or move query
//! 6. Repeated solves are idempotent

use lock_tests::{already_solved, converging_paths, immediate_deadlock, right_then_down};
use pushbox_kernel::carrier::direction::Direction::{Down, Right};
use pushbox_search::policy::DeepeningPolicy;
use pushbox_search::report::{IterationOutcomeV1, TerminationReasonV1};
use pushbox_search::search::Solver;

// ---------------------------------------------------------------------------
// 1. Already solved
// ---------------------------------------------------------------------------

#[test]
fn already_solved_start_returns_empty_chain() {
    let world = already_solved();
    let solver = Solver::new(world.clone());
    assert_eq!(solver.solve(10, 1).unwrap(), Some(vec![]));

    let report = solver
        .solve_with_policy(&DeepeningPolicy::new(10, 1))
        .unwrap();
    assert_eq!(report.iterations.len(), 1);
    assert_eq!(
        report.termination_reason,
        TerminationReasonV1::SolutionFound {
            bound: 1,
            length: 0
        }
    );
    // Solved before any enumeration happened.
    assert!(world.log().enumerations.is_empty());
}

// ---------------------------------------------------------------------------
// 2. Two-move solution
// ---------------------------------------------------------------------------

#[test]
fn two_move_chain_found_on_second_iteration() {
    let solver = Solver::new(right_then_down());
    assert_eq!(solver.solve(10, 1).unwrap(), Some(vec![Right, Down]));

    let report = solver
        .solve_with_policy(&DeepeningPolicy::new(10, 1))
        .unwrap();
    let bounds: Vec<u32> = report.iterations.iter().map(|i| i.bound).collect();
    assert_eq!(bounds, vec![1, 2]);
    assert_eq!(report.iterations[0].outcome, IterationOutcomeV1::Exhausted);
    assert_eq!(report.iterations[1].outcome, IterationOutcomeV1::SolutionFound);
}

#[test]
fn two_move_chain_needs_a_bound_of_two() {
    let solver = Solver::new(right_then_down());
    assert_eq!(solver.solve(1, 1).unwrap(), None);
    // A single overshooting bound still covers it.
    assert_eq!(solver.solve(1, 2).unwrap(), Some(vec![Right, Down]));
}

// ---------------------------------------------------------------------------
// 3. Immediate deadlock
// ---------------------------------------------------------------------------

#[test]
fn immediate_deadlock_has_no_solution() {
    let world = immediate_deadlock();
    let solver = Solver::new(world.clone());
    assert_eq!(solver.solve(5, 1).unwrap(), None);

    let report = solver
        .solve_with_policy(&DeepeningPolicy::new(5, 1))
        .unwrap();
    assert_eq!(
        report.termination_reason,
        TerminationReasonV1::DepthLimitReached { last_bound: 5 }
    );
    for it in &report.iterations {
        assert_eq!(it.stats.deadlocks_pruned, 1, "bound {}", it.bound);
    }
    // The deadlocked state is never asked for its moves.
    assert_eq!(world.log().enumerations_of("stuck"), 0);
}

// ---------------------------------------------------------------------------
// 4. Duplicate state keys
// ---------------------------------------------------------------------------

#[test]
fn converging_chains_expand_exactly_once() {
    let world = converging_paths();
    let solver = Solver::new(world.clone());
    let report = solver
        .solve_with_policy(&DeepeningPolicy::new(2, 2))
        .unwrap();
    assert_eq!(report.solution, None);

    let log = world.log();
    // Visit order is enumeration order: [Right, Down] reaches the key first.
    assert_eq!(log.enumerations_of("corner_a"), 1);
    assert_eq!(log.enumerations_of("corner_b"), 0);

    let stats = report.iterations[0].stats;
    assert_eq!(stats.duplicates_pruned, 1);
    // corner_a's subtree was exhausted and released before corner_b arrived.
    assert_eq!(stats.duplicates_of_released, 1);
    assert_eq!(stats.revisit_defects, 0);
}

#[test]
fn duplicate_pruning_holds_at_every_deeper_bound() {
    for bound in 2..6 {
        let world = converging_paths();
        Solver::new(world.clone())
            .solve_with_policy(&DeepeningPolicy::new(bound, bound))
            .unwrap();
        let log = world.log();
        assert_eq!(
            log.enumerations_of("corner_a") + log.enumerations_of("corner_b"),
            1,
            "bound {bound}"
        );
    }
}

// ---------------------------------------------------------------------------
// 5. Oracle call protocol
// ---------------------------------------------------------------------------

#[test]
fn derived_maps_are_fresh_for_every_query() {
    for world in [
        already_solved(),
        right_then_down(),
        immediate_deadlock(),
        converging_paths(),
    ] {
        Solver::new(world.clone()).solve(6, 1).unwrap();
        assert_eq!(world.log().protocol_violations, 0);
    }
}

#[test]
fn solved_check_sees_fresh_maps() {
    // A solved start is answered by the solved query alone, so any stale
    // read here can only come from checking before recomputing.
    let world = already_solved();
    let report = Solver::new(world.clone())
        .solve_with_policy(&DeepeningPolicy::new(3, 1))
        .unwrap();
    assert_eq!(report.solution, Some(vec![]));
    let log = world.log();
    assert!(log.enumerations.is_empty());
    assert_eq!(log.protocol_violations, 0);

    // Same for a solution found below the root.
    let world = right_then_down();
    Solver::new(world.clone()).solve(2, 2).unwrap();
    assert_eq!(world.log().protocol_violations, 0);
}

// ---------------------------------------------------------------------------
// 6. Idempotence
// ---------------------------------------------------------------------------

#[test]
fn repeated_solves_are_idempotent() {
    let solver = Solver::new(right_then_down());
    let policy = DeepeningPolicy::new(10, 1);
    let first = solver.solve_with_policy(&policy).unwrap();
    for _ in 0..3 {
        let again = solver.solve_with_policy(&policy).unwrap();
        assert_eq!(again.solution, first.solution);
        assert_eq!(again.iterations, first.iterations);
    }
}
