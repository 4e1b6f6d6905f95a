//! Proof module: canonical hashing.
//!
//! Depends on nothing else in the kernel. Search fingerprints and report
//! digests both route through [`hash::canonical_hash`].

pub mod hash;
