//! Oracle implementations for the solver.

pub mod catalog;
pub mod scripted;
pub mod sokoban;
