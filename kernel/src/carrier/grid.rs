//! `Grid`: the immutable part of a level.
//!
//! Walls, floor and goals never change during play, so a grid is built once
//! per level and shared (behind an `Arc`) by every board derived from it.
//! The static dead-square map is computed here for the same reason.

use std::collections::VecDeque;

use crate::carrier::direction::Direction;

/// Static square kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tile {
    Wall,
    Floor,
    Goal,
}

impl Tile {
    #[must_use]
    pub const fn is_passable(self) -> bool {
        !matches!(self, Self::Wall)
    }
}

/// Immutable level layout, indexed row-major (`y * width + x`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
    goals: Vec<usize>,
    /// `true` for squares a box can still be pushed to a goal from.
    live: Vec<bool>,
}

impl Grid {
    /// Build a grid from row-major tiles and compute its dead-square map.
    ///
    /// # Panics
    ///
    /// Panics if `tiles.len() != width * height`. The level parser is the
    /// only production caller and always pads rows to `width`.
    #[must_use]
    pub fn new(width: usize, height: usize, tiles: Vec<Tile>) -> Self {
        assert_eq!(tiles.len(), width * height, "grid tile count mismatch");
        let goals = tiles
            .iter()
            .enumerate()
            .filter(|(_, t)| **t == Tile::Goal)
            .map(|(i, _)| i)
            .collect();
        let mut grid = Self {
            width,
            height,
            tiles,
            goals,
            live: Vec::new(),
        };
        grid.live = grid.compute_live_squares();
        grid
    }

    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Total number of squares (`width * height`).
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Goal squares in ascending index order.
    #[must_use]
    pub fn goals(&self) -> &[usize] {
        &self.goals
    }

    #[must_use]
    pub fn tile(&self, index: usize) -> Tile {
        self.tiles.get(index).copied().unwrap_or(Tile::Wall)
    }

    #[must_use]
    pub fn is_wall(&self, index: usize) -> bool {
        !self.tile(index).is_passable()
    }

    #[must_use]
    pub fn is_goal(&self, index: usize) -> bool {
        self.tile(index) == Tile::Goal
    }

    /// A dead square is a non-wall square from which no box can ever reach a
    /// goal, whatever the other boxes do.
    #[must_use]
    pub fn is_dead(&self, index: usize) -> bool {
        !self.is_wall(index) && !self.live.get(index).copied().unwrap_or(false)
    }

    #[must_use]
    pub fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    #[must_use]
    pub fn coords(&self, index: usize) -> (usize, usize) {
        (index % self.width, index / self.width)
    }

    /// The square one step from `index`, or `None` when that leaves the grid.
    #[must_use]
    pub fn neighbor(&self, index: usize, dir: Direction) -> Option<usize> {
        let (x, y) = self.coords(index);
        let (dx, dy) = dir.delta();
        let nx = x.checked_add_signed(dx)?;
        let ny = y.checked_add_signed(dy)?;
        if nx >= self.width || ny >= self.height {
            return None;
        }
        Some(self.index(nx, ny))
    }

    /// The square one step away if it is passable.
    #[must_use]
    pub fn open_neighbor(&self, index: usize, dir: Direction) -> Option<usize> {
        self.neighbor(index, dir).filter(|&n| !self.is_wall(n))
    }

    /// Reverse-pull flood from every goal, ignoring boxes.
    ///
    /// Pulling a box from `b` to `b + d` needs the agent on `b + d` with room
    /// to back off onto `b + 2d`.
    fn compute_live_squares(&self) -> Vec<bool> {
        let mut live = vec![false; self.tiles.len()];
        let mut queue: VecDeque<usize> = VecDeque::new();
        for &g in &self.goals {
            live[g] = true;
            queue.push_back(g);
        }
        while let Some(b) = queue.pop_front() {
            for dir in Direction::ALL {
                let Some(to) = self.open_neighbor(b, dir) else {
                    continue;
                };
                if live[to] || self.open_neighbor(to, dir).is_none() {
                    continue;
                }
                live[to] = true;
                queue.push_back(to);
            }
        }
        live
    }
}
