//! Error types returned by game operations.

use crate::piece_type::PieceType;
use thiserror::Error;

/// The error type for ply selection, execution and history operations.
///
/// None of these errors leaves the game in a partially mutated state: the
/// failed operation has no effect and the caller may retry with corrected
/// input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlyError {
    /// The submitted ply is not a member of the current legal-ply list.
    #[error("not a legal ply in the current position")]
    IllegalPly,

    /// `undo` was called with an empty history.
    #[error("no ply in the history to undo")]
    NoHistory,

    /// `redo` was called with an empty redo stack.
    #[error("no undone ply to redo")]
    NoRedo,

    /// A promotion-kind ply was submitted for execution before a promotion
    /// piece was chosen.
    #[error("promotion piece has not been chosen")]
    PromotionNotChosen,

    /// A promotion piece was supplied for a ply kind that does not promote.
    #[error("this ply kind does not promote")]
    PromotionNotApplicable,

    /// A promotion piece was supplied twice for the same ply.
    #[error("promotion piece has already been chosen")]
    PromotionAlreadyChosen,

    /// The supplied promotion piece kind is not allowed (only knight, bishop,
    /// rook and queen are).
    #[error("{0} is not a valid promotion piece")]
    InvalidPromotionPiece(PieceType),

    /// The board contents contradict what the ply being executed requires.
    /// The legal-ply list always agrees with the board, so this indicates a
    /// programming error rather than bad caller input.
    #[error("inconsistent position: {0}")]
    Inconsistent(&'static str),
}
