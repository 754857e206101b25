use crate::error::ChessError;
use std::fmt;
use std::str::FromStr;

/// Board square as a dense index: 0 = a1, 7 = h1, 56 = a8, 63 = h8.
/// rank = index >> 3, file = index & 7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Square(u8);

impl Square {
    #[inline(always)]
    pub const fn from_index(idx: u8) -> Self {
        Square(idx)
    }

    #[inline(always)]
    pub const fn make(rank: u8, file: u8) -> Self {
        Square(rank * 8 + file)
    }

    #[inline(always)]
    pub const fn index(self) -> u8 {
        self.0
    }

    #[inline(always)]
    pub const fn rank(self) -> u8 {
        self.0 >> 3
    }

    #[inline(always)]
    pub const fn file(self) -> u8 {
        self.0 & 7
    }

    /// Step by (rank, file) deltas, `None` when the step leaves the board.
    /// Offset-table movement and the attack raycasts go through this so file
    /// wraps can't happen.
    #[inline(always)]
    pub fn offset(self, dr: i8, df: i8) -> Option<Square> {
        let r = self.rank() as i8 + dr;
        let f = self.file() as i8 + df;
        if (0..8).contains(&r) && (0..8).contains(&f) {
            Some(Square::make(r as u8, f as u8))
        } else {
            None
        }
    }
}

impl TryFrom<u8> for Square {
    type Error = ChessError;

    fn try_from(idx: u8) -> Result<Self, Self::Error> {
        if idx < 64 {
            Ok(Square(idx))
        } else {
            Err(ChessError::InvalidMoveNotation(format!(
                "square index {idx} out of range"
            )))
        }
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = (b'a' + self.file()) as char;
        let rank = (b'1' + self.rank()) as char;
        write!(f, "{file}{rank}")
    }
}

impl FromStr for Square {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(ChessError::InvalidMoveNotation(format!(
                "bad square {s:?}"
            )));
        }
        let file = bytes[0].wrapping_sub(b'a');
        let rank = bytes[1].wrapping_sub(b'1');
        if file > 7 || rank > 7 {
            return Err(ChessError::InvalidMoveNotation(format!(
                "bad square {s:?}"
            )));
        }
        Ok(Square::make(rank, file))
    }
}
