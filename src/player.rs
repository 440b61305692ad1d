//! Player type representing each side of the board.

use std::fmt;

/// Represents each player side.
///
/// `White` moves first and owns the two bottom rows of the standard setup;
/// `Black` owns the two top rows.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Player {
    White,
    Black,
}

impl Player {
    /// Returns the other player.
    ///
    /// # Examples
    ///
    /// ```
    /// use chessrules::Player;
    ///
    /// assert_eq!(Player::Black, Player::White.opponent());
    /// assert_eq!(Player::White, Player::Black.opponent());
    /// ```
    #[must_use]
    pub fn opponent(self) -> Player {
        match self {
            Player::White => Player::Black,
            Player::Black => Player::White,
        }
    }

    /// Returns true if `other` is the opposing side.
    pub fn is_opponent(self, other: Player) -> bool {
        self != other
    }

    /// Returns the row holding this player's king and rooks in the standard
    /// setup (row 0 for white, row 7 for black).
    pub fn home_row(self) -> u8 {
        match self {
            Player::White => 0,
            Player::Black => 7,
        }
    }

    /// Returns the row holding this player's pawns in the standard setup.
    pub fn pawn_row(self) -> u8 {
        match self {
            Player::White => 1,
            Player::Black => 6,
        }
    }

    /// Converts the instance into the unique number for array indexing purpose.
    pub fn index(self) -> usize {
        match self {
            Player::White => 0,
            Player::Black => 1,
        }
    }

    /// Returns an iterator over both players, white first.
    pub fn iter() -> PlayerIter {
        PlayerIter { current: Some(Player::White) }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Player::White => write!(f, "white"),
            Player::Black => write!(f, "black"),
        }
    }
}

/// This struct is created by the [`iter`] method on [`Player`].
///
/// [`iter`]: enum.Player.html#method.iter
/// [`Player`]: enum.Player.html
pub struct PlayerIter {
    current: Option<Player>,
}

impl Iterator for PlayerIter {
    type Item = Player;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current;
        self.current = match current {
            Some(Player::White) => Some(Player::Black),
            _ => None,
        };
        current
    }
}
