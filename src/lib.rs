//! A library for implementing chess applications.
//!
//! `chessrules` provides the types and rules for representing a chess game in
//! progress: the board, the pieces, the plies a player may make, and the
//! history needed to undo and redo them. Positions can be created
//! programmatically through [`Setup`] and exported back out the same way.
//!
//! Ply generation is *pseudo-legal*: every ply obeys the movement, capture,
//! castling, en-passant and promotion rules, but plies that would leave the
//! mover's own king in check are not filtered out. Callers that need strict
//! legality can apply a ply and inspect the resulting position.
//!
//! # Examples
//!
//! ```
//! use chessrules::{Game, PieceType};
//! use chessrules::square::consts::*;
//!
//! let mut game = Game::new();
//!
//! // Twenty plies are available in the starting position.
//! assert_eq!(20, game.legal_plies().len());
//!
//! // Advance the king's pawn two squares.
//! let ply = game
//!     .legal_plies_from(SQ_E2)
//!     .into_iter()
//!     .find(|ply| ply.target() == SQ_E4)
//!     .unwrap();
//! game.perform_ply(&ply).unwrap();
//!
//! // The double advance may be captured in passing on e3.
//! assert_eq!(Some(SQ_E3), game.en_passant_target());
//!
//! // And it can be taken back.
//! game.undo().unwrap();
//! assert!(game.can_redo());
//! ```

pub mod direction;
pub mod error;
pub mod game;
pub mod piece;
pub mod piece_type;
pub mod player;
pub mod ply;
pub mod setup;
pub mod square;

pub use self::direction::{KnightJump, MoveDirection};
pub use self::error::PlyError;
pub use self::game::Game;
pub use self::piece::Piece;
pub use self::piece_type::PieceType;
pub use self::player::Player;
pub use self::ply::{Capture, Ply, PlyKind, Promotion};
pub use self::setup::Setup;
pub use self::square::{ParseSquareError, Square};
