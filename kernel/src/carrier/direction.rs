//! `Direction`: the atomic move of the agent.
//!
//! A move is a single orthogonal step. If the destination holds a box the
//! step becomes a push; whether a given step is a push depends on the board,
//! not on the direction value.

/// One orthogonal agent step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All directions in move-enumeration order.
    pub const ALL: [Direction; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Column/row delta of one step.
    #[must_use]
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Lowercase LURD letter (`u`, `d`, `l`, `r`).
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Self::Up => 'u',
            Self::Down => 'd',
            Self::Left => 'l',
            Self::Right => 'r',
        }
    }

    /// Parse a LURD letter. Case is ignored: uppercase marks a push in
    /// rendered solutions but denotes the same direction.
    #[must_use]
    pub const fn from_letter(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'u' => Some(Self::Up),
            'd' => Some(Self::Down),
            'l' => Some(Self::Left),
            'r' => Some(Self::Right),
            _ => None,
        }
    }

    /// Parse a whole LURD string. Whitespace is skipped.
    ///
    /// # Errors
    ///
    /// Returns the byte offset of the first unrecognized character.
    pub fn parse_lurd(s: &str) -> Result<Vec<Self>, usize> {
        s.char_indices()
            .filter(|(_, c)| !c.is_whitespace())
            .map(|(i, c)| Self::from_letter(c).ok_or(i))
            .collect()
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Up => "Up",
            Self::Down => "Down",
            Self::Left => "Left",
            Self::Right => "Right",
        };
        f.write_str(name)
    }
}
