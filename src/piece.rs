//! A piece on the board: a kind owned by a side.

use crate::piece_type::PieceType;
use crate::player::Player;
use std::fmt;

/// Represents a piece: a [`PieceType`] owned by a [`Player`].
///
/// Pieces are plain values; two pieces are equal when both kind and owner
/// match.
///
/// # Examples
///
/// ```
/// use chessrules::{Piece, PieceType, Player};
///
/// let pc = Piece::new(PieceType::Knight, Player::White);
/// assert_eq!('N', pc.symbol());
/// assert_eq!("white knight", pc.to_string());
/// ```
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Piece {
    pub piece_type: PieceType,
    pub player: Player,
}

impl Piece {
    /// Creates a new instance of `Piece`.
    pub fn new(piece_type: PieceType, player: Player) -> Piece {
        Piece { piece_type, player }
    }

    /// Returns the one-letter display symbol: uppercase for white pieces,
    /// lowercase for black pieces.
    pub fn symbol(self) -> char {
        match self.player {
            Player::White => self.piece_type.symbol(),
            Player::Black => self.piece_type.symbol().to_ascii_lowercase(),
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.player, self.piece_type)
    }
}
