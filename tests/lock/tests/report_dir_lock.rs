//! Report directory persistence locks.
//!
//! Proves:
//! 1. A written report reads back byte-identical with a matching digest
//! 2. The stored LURD solution replays against the stored level text
//! 3. Any edit to the report is caught by the digest

use pushbox_harness::report_dir::{read_report_dir, write_report_dir, ReportDirReadError};
use pushbox_harness::runner::{replay_verify, run_level};
use pushbox_harness::worlds::catalog;
use pushbox_kernel::carrier::direction::Direction;
use pushbox_kernel::carrier::level::parse_level;

#[test]
fn report_round_trips_and_replays() {
    let out = run_level(catalog::CORRIDOR, &lock_tests::fixture_policy()).unwrap();
    let dir = tempfile::tempdir().unwrap();
    write_report_dir(&out, dir.path()).unwrap();

    let loaded = read_report_dir(dir.path()).unwrap();
    assert_eq!(loaded.bytes, out.report_bytes);
    assert_eq!(loaded.digest, out.report_digest);

    let text = loaded.value["level"]["text"].as_str().unwrap();
    assert_eq!(text, catalog::CORRIDOR);
    let chain = Direction::parse_lurd(loaded.value["lurd"].as_str().unwrap()).unwrap();
    replay_verify(&parse_level(text).unwrap(), &chain).unwrap();
}

#[test]
fn edited_report_fails_digest_check() {
    let out = run_level(catalog::TWO_STEP, &lock_tests::fixture_policy()).unwrap();
    let dir = tempfile::tempdir().unwrap();
    write_report_dir(&out, dir.path()).unwrap();

    let path = dir.path().join("run_report.json");
    let edited = String::from_utf8(std::fs::read(&path).unwrap())
        .unwrap()
        .replace("\"rD\"", "\"rU\"");
    std::fs::write(&path, edited).unwrap();

    let err = read_report_dir(dir.path()).unwrap_err();
    assert!(
        matches!(err, ReportDirReadError::DigestMismatch { .. }),
        "{err}"
    );
}
