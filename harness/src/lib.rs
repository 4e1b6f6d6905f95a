//! Pushbox Harness: levels in, verified reports out.
//!
//! The harness connects the kernel's board to the search engine
//! (`SokobanWorld`), re-verifies every solution by replay, and packages the
//! result as a digest-bound `RunReportV1`. It also hosts the scripted oracle
//! the lock tests use to pin down search behavior.
//!
//! The harness does NOT implement search logic; it delegates to
//! `pushbox_search`.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod report_dir;
pub mod runner;
pub mod worlds;
