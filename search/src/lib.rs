//! Pushbox Search: iterative-deepening depth-first search over move chains.
//!
//! This crate provides the solver engine. Within the workspace it depends
//! only on `pushbox_kernel` (for canonical hashing); it does NOT depend on
//! `pushbox_harness`, and it knows nothing about boards: puzzle mechanics
//! arrive through the [`SearchConfiguration`] oracle trait.
//!
//! # Crate dependency graph
//!
//! ```text
//! pushbox_kernel  ←  pushbox_search  ←  pushbox_harness
//! (board, hashing)   (tree, explorer)    (worlds, runner, CLI)
//! ```
//!
//! # Key types
//!
//! - [`Solver`]: iterative-deepening controller (`solve(depth_limit, step)`)
//! - [`MoveTree`]: arena-backed move-chain tree with generation-checked handles
//! - [`SeenTable`]: per-iteration duplicate-state table
//! - [`StateKey`]: canonical fingerprint of a configuration
//! - [`DeepeningPolicy`]: depth limit, step and visit budget
//! - [`SolveReportV1`]: solution, termination reason, per-iteration statistics
//!
//! [`SearchConfiguration`]: contract::SearchConfiguration
//! [`Solver`]: search::Solver
//! [`MoveTree`]: node::MoveTree
//! [`SeenTable`]: seen::SeenTable
//! [`StateKey`]: state_key::StateKey
//! [`DeepeningPolicy`]: policy::DeepeningPolicy
//! [`SolveReportV1`]: report::SolveReportV1

#![forbid(unsafe_code)]

pub mod contract;
pub mod error;
pub mod explore;
pub mod node;
pub mod policy;
pub mod report;
pub mod search;
pub mod seen;
pub mod state_key;
