//! Binary that solves every catalog level and prints deterministic output
//! lines for cross-process verification.
//!
//! Usage: `solve_fixture`
//!
//! Output: one `key=value` line per field, grouped per level.

use pushbox_harness::runner::run_level;
use pushbox_harness::worlds::catalog::LEVELS;

fn main() {
    let policy = lock_tests::fixture_policy();
    for level in LEVELS {
        let outcome = run_level(level.text, &policy)
            .unwrap_or_else(|e| panic!("run of {} failed: {e}", level.name));

        println!("level={}", level.name);
        println!("level_hash={}", outcome.level_hash);
        println!("report_digest={}", outcome.report_digest);
        println!(
            "termination_reason={}",
            outcome.solve.termination_reason.kind()
        );
        println!("lurd={}", outcome.lurd.as_deref().unwrap_or("-"));
        println!("total_visits={}", outcome.solve.total_visits());
    }
}
