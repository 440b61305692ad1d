//! Ply descriptors: one candidate or executed move of a single side.

use crate::error::PlyError;
use crate::piece::Piece;
use crate::piece_type::PieceType;
use crate::player::Player;
use crate::square::consts::*;
use crate::square::Square;
use std::fmt;

/// The kind of a [`Ply`].
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum PlyKind {
    /// A plain move onto an empty square.
    Move,
    /// A capture of the piece on the target square.
    Capture,
    /// Castling toward the h-file rook.
    KingSideCastling,
    /// Castling toward the a-file rook.
    QueenSideCastling,
    /// A pawn's initial two-step advance.
    PawnDoubleAdvance,
    /// A pawn capturing "in passing"; the captured square differs from the
    /// target square.
    EnPassantCapture,
    /// A pawn advancing onto the last row, to be replaced by a chosen piece.
    Promotion,
    /// A pawn capturing onto the last row, to be replaced by a chosen piece.
    PromotionCapture,
}

/// A captured square and the piece that stood on it.
///
/// The captured square equals the ply's target square except for en-passant
/// captures, where the victim stands on the bypassed square.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Capture {
    pub square: Square,
    pub piece: Piece,
}

/// The promotion state of a ply.
///
/// Non-promotion plies are `NotApplicable`. Promotion-kind plies are created
/// `Pending` by the generator and become `Chosen` exactly once, before
/// execution.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Promotion {
    NotApplicable,
    Pending,
    Chosen(PieceType),
}

/// Describes one candidate or executed move.
///
/// Plies are created by the generator, optionally given a promotion choice by
/// the move-selection step, executed once, and then kept as a historical
/// record.
///
/// Equality compares kind, piece, source, target and capture; the promotion
/// state does not participate, since it is assigned after generation.
#[derive(Debug, Clone, Copy)]
pub struct Ply {
    kind: PlyKind,
    piece: Piece,
    source: Square,
    target: Square,
    captured: Option<Capture>,
    promotion: Promotion,
}

impl Ply {
    /// Creates a plain move ply.
    pub fn simple(piece: Piece, source: Square, target: Square) -> Ply {
        Ply {
            kind: PlyKind::Move,
            piece,
            source,
            target,
            captured: None,
            promotion: Promotion::NotApplicable,
        }
    }

    /// Creates a capture ply taking the piece on the target square.
    pub fn capture(piece: Piece, source: Square, target: Square, captured: Piece) -> Ply {
        Ply {
            kind: PlyKind::Capture,
            piece,
            source,
            target,
            captured: Some(Capture {
                square: target,
                piece: captured,
            }),
            promotion: Promotion::NotApplicable,
        }
    }

    /// Creates a king-side castling ply for the given player's king.
    pub fn king_side_castling(player: Player) -> Ply {
        let (source, target) = match player {
            Player::White => (SQ_E1, SQ_G1),
            Player::Black => (SQ_E8, SQ_G8),
        };

        Ply {
            kind: PlyKind::KingSideCastling,
            piece: Piece::new(PieceType::King, player),
            source,
            target,
            captured: None,
            promotion: Promotion::NotApplicable,
        }
    }

    /// Creates a queen-side castling ply for the given player's king.
    pub fn queen_side_castling(player: Player) -> Ply {
        let (source, target) = match player {
            Player::White => (SQ_E1, SQ_C1),
            Player::Black => (SQ_E8, SQ_C8),
        };

        Ply {
            kind: PlyKind::QueenSideCastling,
            piece: Piece::new(PieceType::King, player),
            source,
            target,
            captured: None,
            promotion: Promotion::NotApplicable,
        }
    }

    /// Creates a pawn double-advance ply.
    pub fn pawn_double_advance(piece: Piece, source: Square, target: Square) -> Ply {
        Ply {
            kind: PlyKind::PawnDoubleAdvance,
            piece,
            source,
            target,
            captured: None,
            promotion: Promotion::NotApplicable,
        }
    }

    /// Creates an en-passant capture ply. The captured pawn stands on
    /// `captured_square`, not on the target square.
    pub fn en_passant_capture(
        piece: Piece,
        source: Square,
        target: Square,
        captured_square: Square,
        captured: Piece,
    ) -> Ply {
        Ply {
            kind: PlyKind::EnPassantCapture,
            piece,
            source,
            target,
            captured: Some(Capture {
                square: captured_square,
                piece: captured,
            }),
            promotion: Promotion::NotApplicable,
        }
    }

    /// Creates a pawn promotion ply with a pending promotion choice.
    pub fn promotion(piece: Piece, source: Square, target: Square) -> Ply {
        Ply {
            kind: PlyKind::Promotion,
            piece,
            source,
            target,
            captured: None,
            promotion: Promotion::Pending,
        }
    }

    /// Creates a pawn promotion-capture ply with a pending promotion choice.
    pub fn promotion_capture(
        piece: Piece,
        source: Square,
        target: Square,
        captured: Piece,
    ) -> Ply {
        Ply {
            kind: PlyKind::PromotionCapture,
            piece,
            source,
            target,
            captured: Some(Capture {
                square: target,
                piece: captured,
            }),
            promotion: Promotion::Pending,
        }
    }

    /// Returns the kind of this ply.
    pub fn kind(&self) -> PlyKind {
        self.kind
    }

    /// Returns the moving piece.
    pub fn piece(&self) -> Piece {
        self.piece
    }

    /// Returns the square the piece moves from.
    pub fn source(&self) -> Square {
        self.source
    }

    /// Returns the square the piece moves to.
    pub fn target(&self) -> Square {
        self.target
    }

    /// Returns the capture made by this ply, if any.
    pub fn captured(&self) -> Option<Capture> {
        self.captured
    }

    /// Returns the promotion state of this ply.
    pub fn promotion_state(&self) -> Promotion {
        self.promotion
    }

    /// Returns true if this ply still needs a promotion piece before it can
    /// be executed.
    pub fn requires_promotion(&self) -> bool {
        self.promotion == Promotion::Pending
    }

    /// Supplies the promotion piece for a promotion-kind ply.
    ///
    /// Fails if this ply does not promote, if a choice was already supplied,
    /// or if `piece_type` is not one of knight, bishop, rook or queen.
    ///
    /// # Examples
    ///
    /// ```
    /// use chessrules::{Piece, PieceType, Player, Ply};
    /// use chessrules::square::consts::*;
    ///
    /// let pawn = Piece::new(PieceType::Pawn, Player::White);
    /// let mut ply = Ply::promotion(pawn, SQ_E7, SQ_E8);
    ///
    /// assert!(ply.requires_promotion());
    /// ply.set_promotion(PieceType::Queen).unwrap();
    /// assert!(!ply.requires_promotion());
    /// ```
    pub fn set_promotion(&mut self, piece_type: PieceType) -> Result<(), PlyError> {
        match self.promotion {
            Promotion::NotApplicable => Err(PlyError::PromotionNotApplicable),
            Promotion::Chosen(_) => Err(PlyError::PromotionAlreadyChosen),
            Promotion::Pending => match piece_type {
                PieceType::Knight | PieceType::Bishop | PieceType::Rook | PieceType::Queen => {
                    self.promotion = Promotion::Chosen(piece_type);
                    Ok(())
                }
                PieceType::Pawn | PieceType::King => {
                    Err(PlyError::InvalidPromotionPiece(piece_type))
                }
            },
        }
    }
}

impl PartialEq for Ply {
    fn eq(&self, other: &Ply) -> bool {
        self.kind == other.kind
            && self.piece == other.piece
            && self.source == other.source
            && self.target == other.target
            && self.captured == other.captured
    }
}

impl Eq for Ply {}

impl fmt::Display for Ply {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.kind {
            PlyKind::KingSideCastling => write!(f, "O-O"),
            PlyKind::QueenSideCastling => write!(f, "O-O-O"),
            _ => {
                let join = if self.captured.is_some() { 'x' } else { '-' };
                write!(f, "{}{}{}", self.source, join, self.target)?;
                match self.promotion {
                    Promotion::NotApplicable => Ok(()),
                    Promotion::Pending => write!(f, "=?"),
                    Promotion::Chosen(pt) => write!(f, "={}", pt.symbol()),
                }
            }
        }
    }
}
