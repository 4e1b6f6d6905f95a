//! Pushbox Kernel: the board model the solver searches over.
//!
//! # API Surface
//!
//! - [`carrier::level::parse_level`] -- parse an XSB level into a start [`carrier::board::Board`]
//! - [`carrier::board::Board`] -- move application, derived maps, solved/deadlock checks
//! - [`proof::hash::canonical_hash`] -- the single domain-separated hashing function
//!
//! # Module Dependency Direction
//!
//! `carrier` ← `proof`
//!
//! One-way only. `carrier` never hashes; callers fingerprint its canonical
//! bytes through `proof`.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod carrier;
pub mod proof;
