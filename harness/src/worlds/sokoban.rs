//! `SokobanWorld`: the kernel [`Board`] behind the solver's oracle trait.

use pushbox_kernel::carrier::board::{Board, MoveError, MoveKind};
use pushbox_kernel::carrier::direction::Direction;
use pushbox_kernel::carrier::level::{parse_level, LevelParseError};

use pushbox_search::contract::SearchConfiguration;

/// A push-puzzle configuration the solver can search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SokobanWorld {
    board: Board,
}

impl SokobanWorld {
    #[must_use]
    pub fn new(board: Board) -> Self {
        Self { board }
    }

    /// Parse XSB text into a start world.
    ///
    /// # Errors
    ///
    /// Returns the parser's [`LevelParseError`].
    pub fn from_level_text(text: &str) -> Result<Self, LevelParseError> {
        parse_level(text).map(Self::new)
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }
}

impl SearchConfiguration for SokobanWorld {
    type Move = Direction;
    type Error = MoveError;

    fn apply_move_chain(&mut self, chain: &[Direction]) -> Result<(), MoveError> {
        self.board.apply_move_chain(chain)
    }

    fn recompute_derived_maps(&mut self) {
        self.board.recompute_derived_maps();
    }

    fn is_solved(&self) -> bool {
        self.board.is_solved()
    }

    fn is_deadlocked(&self) -> bool {
        self.board.is_deadlocked()
    }

    fn possible_moves(&self) -> Vec<Direction> {
        self.board.possible_moves()
    }

    fn identity_bytes(&self) -> Vec<u8> {
        self.board.identity_bytes()
    }
}

/// Render a move chain in LURD notation: lowercase for steps, uppercase for
/// pushes, replayed from `start`.
///
/// # Errors
///
/// Returns [`MoveError::InChain`] if a move is illegal at its position.
pub fn render_lurd(start: &Board, chain: &[Direction]) -> Result<String, MoveError> {
    let mut board = start.clone();
    let mut out = String::with_capacity(chain.len());
    for (index, &dir) in chain.iter().enumerate() {
        let kind = board.apply_move(dir).map_err(|e| e.in_chain(index))?;
        let c = dir.letter();
        out.push(match kind {
            MoveKind::Step => c,
            MoveKind::Push => c.to_ascii_uppercase(),
        });
    }
    Ok(out)
}
