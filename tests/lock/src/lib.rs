//! Shared fixtures for the lock tests and the `solve_fixture` binary.
//!
//! Single source of truth for the scripted scenarios and the fixture
//! policy. Any change here changes both the in-process tests and what the
//! cross-process fixture prints.

use pushbox_harness::worlds::scripted::{ScriptedWorld, ScriptedWorldBuilder};
use pushbox_kernel::carrier::direction::Direction::{Down, Left, Right, Up};
use pushbox_search::policy::DeepeningPolicy;

/// Policy the fixture binary runs every catalog level with.
///
/// Generous enough that every solvable catalog level is found: a bound at
/// least the number of reachable states rules out depth cutoffs.
#[must_use]
pub fn fixture_policy() -> DeepeningPolicy {
    DeepeningPolicy::new(300, 50)
}

/// The start configuration is already solved.
///
/// # Panics
///
/// Panics if the scripted graph is malformed (fixture bug).
#[must_use]
pub fn already_solved() -> ScriptedWorld {
    ScriptedWorldBuilder::new("start")
        .edge("start", Right, "elsewhere")
        .solved("start")
        .build()
        .expect("valid scripted graph")
}

/// Solvable only by `[Right, Down]`; no deadlocks, no shorter solution.
///
/// # Panics
///
/// Panics if the scripted graph is malformed (fixture bug).
#[must_use]
pub fn right_then_down() -> ScriptedWorld {
    ScriptedWorldBuilder::new("start")
        .edge("start", Right, "east")
        .edge("start", Down, "south")
        .edge("east", Down, "goal")
        .edge("east", Left, "start")
        .edge("south", Up, "start")
        .edge("south", Right, "southeast")
        .edge("southeast", Left, "south")
        .solved("goal")
        .build()
        .expect("valid scripted graph")
}

/// The only move leads straight into a deadlock.
///
/// # Panics
///
/// Panics if the scripted graph is malformed (fixture bug).
#[must_use]
pub fn immediate_deadlock() -> ScriptedWorld {
    ScriptedWorldBuilder::new("start")
        .edge("start", Right, "stuck")
        .edge("stuck", Left, "start")
        .deadlocked("stuck")
        .build()
        .expect("valid scripted graph")
}

/// `[Right, Down]` reaches `corner_a`, `[Down, Right]` reaches `corner_b`;
/// both carry the identity key `corner`. Each corner has one onward move.
///
/// # Panics
///
/// Panics if the scripted graph is malformed (fixture bug).
#[must_use]
pub fn converging_paths() -> ScriptedWorld {
    ScriptedWorldBuilder::new("start")
        .edge("start", Right, "east")
        .edge("start", Down, "south")
        .edge("east", Down, "corner_a")
        .edge("south", Right, "corner_b")
        .edge("corner_a", Right, "beyond_a")
        .edge("corner_b", Right, "beyond_b")
        .share_key("corner_a", "corner")
        .share_key("corner_b", "corner")
        .build()
        .expect("valid scripted graph")
}
