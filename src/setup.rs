//! Position snapshots used to seed a [`Game`](crate::Game) and to export its
//! current state.

use crate::piece::Piece;
use crate::piece_type::PieceType;
use crate::player::Player;
use crate::square::Square;

/// A snapshot of a board position: per-square pieces, the active player, the
/// four castling-availability flags and an optional en-passant target.
///
/// Move counters are deliberately not part of this representation.
///
/// # Examples
///
/// ```
/// use chessrules::{PieceType, Player, Setup};
/// use chessrules::square::consts::*;
///
/// let setup = Setup::standard();
/// assert_eq!(Player::White, setup.active_player);
///
/// let king = setup.piece_at(SQ_E1).unwrap();
/// assert_eq!(PieceType::King, king.piece_type);
/// assert_eq!(Player::White, king.player);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Setup {
    board: [Option<Piece>; Square::NUM_SQUARES],
    pub active_player: Player,
    pub white_king_side_castling: bool,
    pub white_queen_side_castling: bool,
    pub black_king_side_castling: bool,
    pub black_queen_side_castling: bool,
    pub en_passant_target: Option<Square>,
}

impl Setup {
    /// Creates an empty setup: no pieces, white to move, no castling
    /// availability, no en-passant target.
    pub fn empty() -> Setup {
        Setup {
            board: [None; Square::NUM_SQUARES],
            active_player: Player::White,
            white_king_side_castling: false,
            white_queen_side_castling: false,
            black_king_side_castling: false,
            black_queen_side_castling: false,
            en_passant_target: None,
        }
    }

    /// Creates the standard starting position with all castling rights
    /// available.
    pub fn standard() -> Setup {
        let mut setup = Setup::empty();

        let back_row = [
            PieceType::Rook,
            PieceType::Knight,
            PieceType::Bishop,
            PieceType::Queen,
            PieceType::King,
            PieceType::Bishop,
            PieceType::Knight,
            PieceType::Rook,
        ];

        for player in Player::iter() {
            for (column, &piece_type) in back_row.iter().enumerate() {
                if let Some(sq) = Square::new(column as u8, player.home_row()) {
                    setup.set_piece(sq, Some(Piece::new(piece_type, player)));
                }
            }
            for column in 0..8 {
                if let Some(sq) = Square::new(column, player.pawn_row()) {
                    setup.set_piece(sq, Some(Piece::new(PieceType::Pawn, player)));
                }
            }
        }

        setup.white_king_side_castling = true;
        setup.white_queen_side_castling = true;
        setup.black_king_side_castling = true;
        setup.black_queen_side_castling = true;

        setup
    }

    /// Returns the piece at the given square, if any.
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.board[sq.index()]
    }

    /// Places a piece at the given square, or clears it with `None`.
    pub fn set_piece(&mut self, sq: Square, piece: Option<Piece>) {
        self.board[sq.index()] = piece;
    }
}

impl Default for Setup {
    fn default() -> Setup {
        Setup::standard()
    }
}
