//! XSB level parsing: the compilation boundary from text into a start [`Board`].
//!
//! # Format
//!
//! | char          | meaning          |
//! |---------------|------------------|
//! | `#`           | wall             |
//! | ` ` `-` `_`   | floor            |
//! | `.`           | goal             |
//! | `$`           | box              |
//! | `*`           | box on goal      |
//! | `@`           | agent            |
//! | `+`           | agent on goal    |
//!
//! Rows may be ragged; short rows are padded with floor. Leading and
//! trailing blank lines are ignored.

use std::sync::Arc;

use crate::carrier::board::Board;
use crate::carrier::grid::{Grid, Tile};

/// Typed failure for level parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LevelParseError {
    /// No non-blank rows.
    Empty,
    /// A character outside the XSB alphabet. `line` and `column` are 1-based.
    UnknownCharacter {
        line: usize,
        column: usize,
        found: char,
    },
    /// No `@` or `+` in the level.
    MissingAgent,
    /// More than one `@`/`+`.
    MultipleAgents { count: usize },
    /// A level needs at least one box.
    NoBoxes,
    /// Box and goal counts must match for "every box on a goal" to be solvable.
    BoxGoalMismatch { boxes: usize, goals: usize },
}

impl std::fmt::Display for LevelParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "level has no rows"),
            Self::UnknownCharacter {
                line,
                column,
                found,
            } => write!(f, "unknown level character {found:?} at {line}:{column}"),
            Self::MissingAgent => write!(f, "level has no agent"),
            Self::MultipleAgents { count } => write!(f, "level has {count} agents, expected 1"),
            Self::NoBoxes => write!(f, "level has no boxes"),
            Self::BoxGoalMismatch { boxes, goals } => {
                write!(f, "level has {boxes} boxes but {goals} goals")
            }
        }
    }
}

impl std::error::Error for LevelParseError {}

/// Parse an XSB level into a start board (derived maps stale).
///
/// # Errors
///
/// Returns a [`LevelParseError`] describing the first problem found.
pub fn parse_level(text: &str) -> Result<Board, LevelParseError> {
    let lines: Vec<(usize, &str)> = text
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim_end_matches('\r')))
        .skip_while(|(_, l)| l.trim().is_empty())
        .collect();
    let last = lines
        .iter()
        .rposition(|(_, l)| !l.trim().is_empty())
        .ok_or(LevelParseError::Empty)?;
    let rows = &lines[..=last];

    let width = rows
        .iter()
        .map(|(_, l)| l.chars().count())
        .max()
        .unwrap_or(0);
    let height = rows.len();
    let mut tiles = vec![Tile::Floor; width * height];
    let mut agents = Vec::new();
    let mut boxes = Vec::new();

    for (y, (line_no, row)) in rows.iter().enumerate() {
        for (x, c) in row.chars().enumerate() {
            let index = y * width + x;
            let (tile, has_box, has_agent) = match c {
                '#' => (Tile::Wall, false, false),
                ' ' | '-' | '_' => (Tile::Floor, false, false),
                '.' => (Tile::Goal, false, false),
                '$' => (Tile::Floor, true, false),
                '*' => (Tile::Goal, true, false),
                '@' => (Tile::Floor, false, true),
                '+' => (Tile::Goal, false, true),
                found => {
                    return Err(LevelParseError::UnknownCharacter {
                        line: *line_no,
                        column: x + 1,
                        found,
                    });
                }
            };
            tiles[index] = tile;
            if has_box {
                boxes.push(index);
            }
            if has_agent {
                agents.push(index);
            }
        }
    }

    let agent = match agents.as_slice() {
        [] => return Err(LevelParseError::MissingAgent),
        [a] => *a,
        many => return Err(LevelParseError::MultipleAgents { count: many.len() }),
    };
    if boxes.is_empty() {
        return Err(LevelParseError::NoBoxes);
    }

    let grid = Grid::new(width, height, tiles);
    if boxes.len() != grid.goals().len() {
        return Err(LevelParseError::BoxGoalMismatch {
            boxes: boxes.len(),
            goals: grid.goals().len(),
        });
    }

    Ok(Board::new(Arc::new(grid), agent, &boxes))
}

/// Render a board back to XSB text (rows right-trimmed).
#[must_use]
pub fn render_level(board: &Board) -> String {
    let grid = board.grid();
    let mut out = String::with_capacity(grid.len() + grid.height());
    for y in 0..grid.height() {
        let mut row = String::with_capacity(grid.width());
        for x in 0..grid.width() {
            let i = grid.index(x, y);
            let c = match (grid.tile(i), board.has_box(i), board.agent() == i) {
                (Tile::Wall, _, _) => '#',
                (Tile::Goal, true, _) => '*',
                (Tile::Goal, false, true) => '+',
                (Tile::Goal, false, false) => '.',
                (Tile::Floor, true, _) => '$',
                (Tile::Floor, false, true) => '@',
                (Tile::Floor, false, false) => ' ',
            };
            row.push(c);
        }
        out.push_str(row.trim_end());
        out.push('\n');
    }
    out
}
