//! Carrier module: grid, directions, board state and the level format.
//!
//! This is the foundational layer. No other kernel module is imported here.

pub mod board;
pub mod direction;
pub mod grid;
pub mod level;
