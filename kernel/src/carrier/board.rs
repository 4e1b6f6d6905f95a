//! `Board`: one mutable configuration of a level.
//!
//! A board is the shared immutable [`Grid`] plus the agent square and box
//! occupancy. Cloning is cheap relative to search work: the grid is behind
//! an `Arc`, only the occupancy vectors are copied.
//!
//! # Derived maps
//!
//! The agent-reachability map is derived state. It goes stale on every move
//! and must be refreshed with [`Board::recompute_derived_maps`] before
//! [`Board::is_deadlocked`] gives a meaningful answer. Staleness is tracked
//! explicitly so misuse shows up in debug builds.

use std::sync::Arc;

use crate::carrier::direction::Direction;
use crate::carrier::grid::Grid;

/// What a successful move did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    /// The agent stepped onto free floor.
    Step,
    /// The agent pushed a box one square.
    Push,
}

/// Why a move was rejected. The board is left unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    /// The destination is a wall or off the grid.
    Blocked { from: usize, dir: Direction },
    /// The destination holds a box that cannot move.
    BoxBlocked { from: usize, dir: Direction },
    /// A move inside a chain failed; `index` is its position in the chain.
    InChain { index: usize, cause: MoveErrorCause },
}

/// The cause carried by [`MoveError::InChain`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveErrorCause {
    Blocked,
    BoxBlocked,
}

impl std::fmt::Display for MoveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Blocked { from, dir } => write!(f, "move {dir} from square {from} hits a wall"),
            Self::BoxBlocked { from, dir } => {
                write!(f, "push {dir} from square {from} is blocked")
            }
            Self::InChain { index, cause } => {
                let what = match cause {
                    MoveErrorCause::Blocked => "hits a wall",
                    MoveErrorCause::BoxBlocked => "pushes a blocked box",
                };
                write!(f, "move #{index} of chain {what}")
            }
        }
    }
}

impl std::error::Error for MoveError {}

impl MoveError {
    /// Re-tag a single-move error as failing at position `index` of a chain.
    #[must_use]
    pub fn in_chain(self, index: usize) -> Self {
        let cause = match self {
            Self::Blocked { .. } => MoveErrorCause::Blocked,
            Self::BoxBlocked { .. } => MoveErrorCause::BoxBlocked,
            Self::InChain { cause, .. } => cause,
        };
        Self::InChain { index, cause }
    }
}

/// A full puzzle configuration.
///
/// Equality compares agent square and box occupancy (the grid is compared
/// by value too, but boards from one level always share it).
#[derive(Debug, Clone)]
pub struct Board {
    grid: Arc<Grid>,
    agent: usize,
    boxes: Vec<bool>,
    box_count: usize,
    reachable: Vec<bool>,
    maps_stale: bool,
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.agent == other.agent && self.boxes == other.boxes && self.grid == other.grid
    }
}

impl Eq for Board {}

impl Board {
    /// Create a board. Derived maps start stale.
    ///
    /// Box squares outside the grid are ignored; the level parser never
    /// produces them.
    #[must_use]
    pub fn new(grid: Arc<Grid>, agent: usize, box_squares: &[usize]) -> Self {
        let mut boxes = vec![false; grid.len()];
        for &b in box_squares {
            if let Some(slot) = boxes.get_mut(b) {
                *slot = true;
            }
        }
        let box_count = boxes.iter().filter(|b| **b).count();
        let reachable = vec![false; grid.len()];
        Self {
            grid,
            agent,
            boxes,
            box_count,
            reachable,
            maps_stale: true,
        }
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn agent(&self) -> usize {
        self.agent
    }

    #[must_use]
    pub fn has_box(&self, index: usize) -> bool {
        self.boxes.get(index).copied().unwrap_or(false)
    }

    /// Box squares in ascending order.
    #[must_use]
    pub fn box_squares(&self) -> Vec<usize> {
        self.boxes
            .iter()
            .enumerate()
            .filter(|(_, b)| **b)
            .map(|(i, _)| i)
            .collect()
    }

    #[must_use]
    pub fn box_count(&self) -> usize {
        self.box_count
    }

    /// Whether the derived maps reflect the current position.
    #[must_use]
    pub fn maps_fresh(&self) -> bool {
        !self.maps_stale
    }

    /// Classify a move without performing it.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::Blocked`] or [`MoveError::BoxBlocked`] if the move
    /// is illegal from the current position.
    pub fn check_move(&self, dir: Direction) -> Result<MoveKind, MoveError> {
        let from = self.agent;
        let Some(to) = self.grid.open_neighbor(from, dir) else {
            return Err(MoveError::Blocked { from, dir });
        };
        if !self.has_box(to) {
            return Ok(MoveKind::Step);
        }
        match self.grid.open_neighbor(to, dir) {
            Some(beyond) if !self.has_box(beyond) => Ok(MoveKind::Push),
            _ => Err(MoveError::BoxBlocked { from, dir }),
        }
    }

    /// Apply one move.
    ///
    /// # Errors
    ///
    /// See [`Board::check_move`]. On error the board is unchanged.
    pub fn apply_move(&mut self, dir: Direction) -> Result<MoveKind, MoveError> {
        let kind = self.check_move(dir)?;
        let from = self.agent;
        let to = self
            .grid
            .neighbor(from, dir)
            .ok_or(MoveError::Blocked { from, dir })?;
        if kind == MoveKind::Push {
            let beyond = self
                .grid
                .neighbor(to, dir)
                .ok_or(MoveError::BoxBlocked { from, dir })?;
            self.boxes[to] = false;
            self.boxes[beyond] = true;
        }
        self.agent = to;
        self.maps_stale = true;
        Ok(kind)
    }

    /// Apply a chain of moves in order.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::InChain`] naming the first illegal move. Moves
    /// before it have already been applied.
    pub fn apply_move_chain(&mut self, chain: &[Direction]) -> Result<(), MoveError> {
        for (index, &dir) in chain.iter().enumerate() {
            self.apply_move(dir).map_err(|e| e.in_chain(index))?;
        }
        Ok(())
    }

    /// Refresh the agent-reachability map.
    pub fn recompute_derived_maps(&mut self) {
        self.reachable.iter_mut().for_each(|r| *r = false);
        let mut stack = vec![self.agent];
        if let Some(slot) = self.reachable.get_mut(self.agent) {
            *slot = true;
        }
        while let Some(square) = stack.pop() {
            for dir in Direction::ALL {
                let Some(next) = self.grid.open_neighbor(square, dir) else {
                    continue;
                };
                if self.reachable[next] || self.has_box(next) {
                    continue;
                }
                self.reachable[next] = true;
                stack.push(next);
            }
        }
        self.maps_stale = false;
    }

    /// Whether the agent can walk to `index` without pushing.
    #[must_use]
    pub fn is_reachable(&self, index: usize) -> bool {
        debug_assert!(!self.maps_stale, "reachability queried on stale maps");
        self.reachable.get(index).copied().unwrap_or(false)
    }

    /// Every box sits on a goal.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.boxes
            .iter()
            .enumerate()
            .all(|(i, b)| !*b || self.grid.is_goal(i))
    }

    /// Whether this position can provably never be solved.
    ///
    /// Three checks, cheapest first: a box on a dead square, a frozen 2x2
    /// block holding a box off goal, and an unsolved position where no push
    /// is available from anywhere the agent can walk.
    #[must_use]
    pub fn is_deadlocked(&self) -> bool {
        if self.is_solved() {
            return false;
        }
        let squares = self.box_squares();
        if squares.iter().any(|&b| self.grid.is_dead(b)) {
            return true;
        }
        if squares.iter().any(|&b| self.in_frozen_block(b)) {
            return true;
        }
        !self.any_push_available()
    }

    /// Legal moves from the current position in [`Direction::ALL`] order.
    #[must_use]
    pub fn possible_moves(&self) -> Vec<Direction> {
        Direction::ALL
            .into_iter()
            .filter(|&d| self.check_move(d).is_ok())
            .collect()
    }

    /// Canonical identity: agent square, then sorted box squares, each as a
    /// little-endian `u32`.
    ///
    /// Two boards with equal identity bytes are the same configuration.
    #[must_use]
    pub fn identity_bytes(&self) -> Vec<u8> {
        let squares = self.box_squares();
        let mut out = Vec::with_capacity(4 * (squares.len() + 1));
        for square in std::iter::once(self.agent).chain(squares) {
            #[allow(clippy::cast_possible_truncation)]
            out.extend_from_slice(&(square as u32).to_le_bytes());
        }
        out
    }

    fn blocks(&self, index: Option<usize>) -> bool {
        index.is_none_or(|i| self.grid.is_wall(i) || self.has_box(i))
    }

    /// Whether box `b` is part of a 2x2 square of walls and boxes that
    /// contains a box off goal. Such a block can never move again.
    fn in_frozen_block(&self, b: usize) -> bool {
        let pairs = [
            (Direction::Up, Direction::Left),
            (Direction::Up, Direction::Right),
            (Direction::Down, Direction::Left),
            (Direction::Down, Direction::Right),
        ];
        pairs.iter().any(|&(v, h)| {
            let vert = self.grid.neighbor(b, v);
            let horiz = self.grid.neighbor(b, h);
            let diag = vert.and_then(|s| self.grid.neighbor(s, h));
            let block = [Some(b), vert, horiz, diag];
            block.iter().all(|&s| self.blocks(s))
                && block
                    .iter()
                    .flatten()
                    .any(|&s| self.has_box(s) && !self.grid.is_goal(s))
        })
    }

    fn any_push_available(&self) -> bool {
        debug_assert!(!self.maps_stale, "deadlock check on stale maps");
        self.box_squares().into_iter().any(|b| {
            Direction::ALL.into_iter().any(|dir| {
                let behind = self.grid.neighbor(b, dir.opposite());
                let beyond = self.grid.open_neighbor(b, dir);
                matches!(
                    (behind, beyond),
                    (Some(stand), Some(target))
                        if self.reachable[stand] && !self.has_box(target)
                )
            })
        })
    }
}
