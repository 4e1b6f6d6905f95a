//! Built-in named levels.
//!
//! Small XSB levels used by the CLI (`pushbox levels`, `pushbox solve --level`),
//! the lock tests and the benchmarks.

/// Start position is already solved.
pub const SOLVED: &str = "####\n#*@#\n####\n";

/// One push to the right.
pub const ONE_PUSH: &str = "#####\n#@$.#\n#####\n";

/// Solvable only by `[Right, Down]`.
pub const TWO_STEP: &str = "####\n#@ #\n##$#\n##.#\n####\n";

/// The only move pushes the box into a corner.
pub const DEAD_END: &str = "#####\n#+$ #\n#####\n";

/// Walk up to the box, then three pushes down a corridor.
pub const CORRIDOR: &str = "#########\n#@ $  . #\n#########\n";

/// Two boxes in an open room; several orders work.
pub const TWIN_GOALS: &str = "#######\n#     #\n# $.$ #\n#  @. #\n#######\n";

/// One catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogLevel {
    pub name: &'static str,
    pub text: &'static str,
    /// Whether a solution exists at all.
    pub solvable: bool,
}

/// Every built-in level, in listing order.
pub const LEVELS: &[CatalogLevel] = &[
    CatalogLevel {
        name: "solved",
        text: SOLVED,
        solvable: true,
    },
    CatalogLevel {
        name: "one_push",
        text: ONE_PUSH,
        solvable: true,
    },
    CatalogLevel {
        name: "two_step",
        text: TWO_STEP,
        solvable: true,
    },
    CatalogLevel {
        name: "dead_end",
        text: DEAD_END,
        solvable: false,
    },
    CatalogLevel {
        name: "corridor",
        text: CORRIDOR,
        solvable: true,
    },
    CatalogLevel {
        name: "twin_goals",
        text: TWIN_GOALS,
        solvable: true,
    },
];

/// Look a level up by name.
#[must_use]
pub fn find(name: &str) -> Option<&'static CatalogLevel> {
    LEVELS.iter().find(|l| l.name == name)
}
