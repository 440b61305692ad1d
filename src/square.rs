use crate::direction::{KnightJump, MoveDirection};
use std::fmt;
use std::str::FromStr;

const ASCII_1: u8 = b'1';
const ASCII_LOWER_A: u8 = b'a';

/// Number of columns on the board.
pub const COLUMNS: u8 = 8;

/// Number of rows on the board.
pub const ROWS: u8 = 8;

/// Represents a position of each cell in the 8×8 game board.
///
/// Each square is backed by a unique zero-based index; index 0 is the lower
/// left corner (`a1`), index 63 the upper right corner (`h8`). Column and row
/// are derived from that index. Squares are totally ordered by index.
///
/// # Examples
///
/// ```
/// use chessrules::Square;
///
/// let sq = Square::new(4, 3).unwrap();
/// assert_eq!("e4", sq.to_string());
/// ```
///
/// `Square` can be created by parsing a coordinate name as well.
///
/// ```
/// use chessrules::Square;
///
/// let sq: Square = "e4".parse().unwrap();
/// assert_eq!(4, sq.column());
/// assert_eq!(3, sq.row());
/// ```
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub struct Square {
    inner: u8,
}

impl Square {
    /// The total number of squares on the board.
    pub const NUM_SQUARES: usize = (COLUMNS as usize) * (ROWS as usize);

    /// Creates a new instance of `Square`.
    ///
    /// `column` and `row` can each take a value from 0 to 7. Returns `None`
    /// if either is out of range.
    pub fn new(column: u8, row: u8) -> Option<Square> {
        if column >= COLUMNS || row >= ROWS {
            return None;
        }

        Some(Square {
            inner: row * COLUMNS + column,
        })
    }

    /// Creates a new instance of `Square` with the given index value.
    pub fn from_index(index: u8) -> Option<Square> {
        if index as usize >= Self::NUM_SQUARES {
            return None;
        }

        Some(Square { inner: index })
    }

    /// Returns an iterator of all squares on the board, in index order.
    pub fn iter() -> SquareIter {
        SquareIter { current: 0 }
    }

    /// Returns the column of the square (0-indexed, `a` = 0).
    pub fn column(self) -> u8 {
        self.inner % COLUMNS
    }

    /// Returns the row of the square (0-indexed, `1` = 0).
    pub fn row(self) -> u8 {
        self.inner / COLUMNS
    }

    /// Converts the instance into the unique number for array indexing purpose.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.inner as usize
    }

    /// Returns a new `Square` instance by moving the column and the row values.
    ///
    /// Returns `None` if the shift leaves the board. This is how move
    /// generation detects the board edge, as opposed to a blocked square.
    ///
    /// # Examples
    ///
    /// ```
    /// use chessrules::Square;
    ///
    /// let sq = Square::new(1, 1).unwrap();
    /// let shifted = sq.shift(2, 3).unwrap();
    ///
    /// assert_eq!(3, shifted.column());
    /// assert_eq!(4, shifted.row());
    /// ```
    #[must_use]
    pub fn shift(self, dc: i8, dr: i8) -> Option<Square> {
        let c = self.column() as i16 + dc as i16;
        let r = self.row() as i16 + dr as i16;

        if !(0..COLUMNS as i16).contains(&c) || !(0..ROWS as i16).contains(&r) {
            return None;
        }

        Square::new(c as u8, r as u8)
    }

    /// Returns the square reached by moving one step in the given direction,
    /// or `None` if the board ends there.
    #[must_use]
    pub fn step(self, direction: MoveDirection) -> Option<Square> {
        self.step_by(direction, 1)
    }

    /// Returns the square reached by moving `steps` steps in the given
    /// direction, or `None` if the board ends there.
    #[must_use]
    pub fn step_by(self, direction: MoveDirection, steps: u8) -> Option<Square> {
        let (dc, dr) = direction.offsets();
        // Widened so large step counts leave the range instead of wrapping.
        let c = self.column() as i16 + dc as i16 * steps as i16;
        let r = self.row() as i16 + dr as i16 * steps as i16;

        if !(0..COLUMNS as i16).contains(&c) || !(0..ROWS as i16).contains(&r) {
            return None;
        }

        Square::new(c as u8, r as u8)
    }

    /// Returns the square reached by the given knight jump, or `None` if the
    /// board ends there.
    #[must_use]
    pub fn jump(self, jump: KnightJump) -> Option<Square> {
        let (dc, dr) = jump.offsets();
        self.shift(dc, dr)
    }

    /// Returns the column name (`a`..`h`).
    pub fn column_name(self) -> char {
        (self.column() + ASCII_LOWER_A) as char
    }

    /// Returns the row name (`1`..`8`).
    pub fn row_name(self) -> char {
        (self.row() + ASCII_1) as char
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "{}{}", self.column_name(), self.row_name())
    }
}

/// Error type for parsing a square from its coordinate name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSquareError;

impl fmt::Display for ParseSquareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid square name")
    }
}

impl std::error::Error for ParseSquareError {}

impl FromStr for Square {
    type Err = ParseSquareError;

    /// Parses a square from its coordinate name (e.g. "e4", "a1").
    ///
    /// The name must be exactly one column letter followed by one row digit.
    ///
    /// # Examples
    ///
    /// ```
    /// use chessrules::Square;
    ///
    /// let sq: Square = "g5".parse().unwrap();
    /// assert_eq!(6, sq.column());
    /// assert_eq!(4, sq.row());
    ///
    /// assert!("e9".parse::<Square>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(ParseSquareError);
        }

        let column_char = bytes[0];
        if column_char < ASCII_LOWER_A || column_char >= ASCII_LOWER_A + COLUMNS {
            return Err(ParseSquareError);
        }

        let row_char = bytes[1];
        if row_char < ASCII_1 || row_char >= ASCII_1 + ROWS {
            return Err(ParseSquareError);
        }

        Square::new(column_char - ASCII_LOWER_A, row_char - ASCII_1).ok_or(ParseSquareError)
    }
}

/// Square constants, `SQ_A1` through `SQ_H8`.
pub mod consts {
    use super::Square;

    macro_rules! make_square {
        {0, $t:ident $($ts:ident)+} => {
            pub const $t: Square = Square { inner: 0 };
            make_square!{1, $($ts)*}
        };
        {$n:expr, $t:ident $($ts:ident)+} => {
            pub const $t: Square = Square { inner: $n };
            make_square!{($n + 1), $($ts)*}
        };
        {$n:expr, $t:ident} => {
            pub const $t: Square = Square { inner: $n };
        };
    }

    make_square! {0, SQ_A1 SQ_B1 SQ_C1 SQ_D1 SQ_E1 SQ_F1 SQ_G1 SQ_H1
    SQ_A2 SQ_B2 SQ_C2 SQ_D2 SQ_E2 SQ_F2 SQ_G2 SQ_H2
    SQ_A3 SQ_B3 SQ_C3 SQ_D3 SQ_E3 SQ_F3 SQ_G3 SQ_H3
    SQ_A4 SQ_B4 SQ_C4 SQ_D4 SQ_E4 SQ_F4 SQ_G4 SQ_H4
    SQ_A5 SQ_B5 SQ_C5 SQ_D5 SQ_E5 SQ_F5 SQ_G5 SQ_H5
    SQ_A6 SQ_B6 SQ_C6 SQ_D6 SQ_E6 SQ_F6 SQ_G6 SQ_H6
    SQ_A7 SQ_B7 SQ_C7 SQ_D7 SQ_E7 SQ_F7 SQ_G7 SQ_H7
    SQ_A8 SQ_B8 SQ_C8 SQ_D8 SQ_E8 SQ_F8 SQ_G8 SQ_H8}
}

/// This struct is created by the [`iter`] method on [`Square`].
///
/// [`iter`]: struct.Square.html#method.iter
/// [`Square`]: struct.Square.html
pub struct SquareIter {
    current: u8,
}

impl Iterator for SquareIter {
    type Item = Square;

    fn next(&mut self) -> Option<Self::Item> {
        let cur = self.current;

        if cur as usize >= Square::NUM_SQUARES {
            return None;
        }

        self.current += 1;

        Some(Square { inner: cur })
    }
}
