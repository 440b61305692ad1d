//! The game state machine: board, rights, legal-ply generation, execution
//! and history.

use itertools::Itertools;
use std::fmt;

use crate::direction::{KnightJump, MoveDirection};
use crate::error::PlyError;
use crate::piece::Piece;
use crate::piece_type::PieceType;
use crate::player::Player;
use crate::ply::{Ply, PlyKind, Promotion};
use crate::setup::Setup;
use crate::square::consts::*;
use crate::square::Square;

#[derive(Clone, PartialEq, Eq)]
struct PieceGrid([Option<Piece>; Square::NUM_SQUARES]);

impl PieceGrid {
    fn empty() -> PieceGrid {
        PieceGrid([None; Square::NUM_SQUARES])
    }

    fn get(&self, sq: Square) -> Option<Piece> {
        self.0[sq.index()]
    }

    fn set(&mut self, sq: Square, pc: Option<Piece>) {
        self.0[sq.index()] = pc;
    }
}

impl fmt::Debug for PieceGrid {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(fmt, "PieceGrid {{ ")?;

        for pc in self.0.iter() {
            write!(fmt, "{pc:?} ")?;
        }
        write!(fmt, "}}")
    }
}

/// Everything needed to restore a position exactly: board, rights,
/// en-passant target and the player to move.
#[derive(Debug, Clone)]
struct Snapshot {
    board: PieceGrid,
    active_player: Player,
    white_king_side_castling: bool,
    white_queen_side_castling: bool,
    black_king_side_castling: bool,
    black_queen_side_castling: bool,
    en_passant_target: Option<Square>,
}

/// An executed ply together with the snapshot taken just before it.
#[derive(Debug, Clone)]
struct HistoryEntry {
    ply: Ply,
    before: Snapshot,
}

/// Represents a game in progress.
///
/// A `Game` owns the board, the active player, the four castling-availability
/// flags, the en-passant target and the ply history. After every mutation the
/// list of legal plies for the side to move is recomputed eagerly, so
/// [`legal_plies`](Game::legal_plies) is never stale.
///
/// Generation is *pseudo-legal*: plies that would leave the mover's own king
/// in check are not filtered out, and castling checks only that the squares
/// between king and rook are empty, not that they are unattacked.
///
/// # Examples
///
/// ```
/// use chessrules::Game;
///
/// let mut game = Game::new();
/// assert_eq!(20, game.legal_plies().len());
///
/// let ply = game.legal_plies_from("e2".parse().unwrap())[1];
/// game.perform_ply(&ply).unwrap();
///
/// game.undo().unwrap();
/// game.redo().unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct Game {
    board: PieceGrid,
    active_player: Player,
    white_king_side_castling: bool,
    white_queen_side_castling: bool,
    black_king_side_castling: bool,
    black_queen_side_castling: bool,
    en_passant_target: Option<Square>,
    legal_plies: Vec<Ply>,
    history: Vec<HistoryEntry>,
    undone: Vec<HistoryEntry>,
}

impl Game {
    /// Creates a new game with the standard starting position.
    pub fn new() -> Game {
        Game::from_setup(&Setup::standard())
    }

    /// Creates a game from the given setup and computes the legal plies for
    /// its active player.
    pub fn from_setup(setup: &Setup) -> Game {
        let mut board = PieceGrid::empty();
        for sq in Square::iter() {
            board.set(sq, setup.piece_at(sq));
        }

        let mut game = Game {
            board,
            active_player: setup.active_player,
            white_king_side_castling: setup.white_king_side_castling,
            white_queen_side_castling: setup.white_queen_side_castling,
            black_king_side_castling: setup.black_king_side_castling,
            black_queen_side_castling: setup.black_queen_side_castling,
            en_passant_target: setup.en_passant_target,
            legal_plies: Vec::new(),
            history: Vec::new(),
            undone: Vec::new(),
        };
        game.update_legal_plies();
        game
    }

    /// Exports the current state into a [`Setup`].
    pub fn to_setup(&self) -> Setup {
        let mut setup = Setup::empty();
        for sq in Square::iter() {
            setup.set_piece(sq, self.piece_at(sq));
        }
        setup.active_player = self.active_player;
        setup.white_king_side_castling = self.white_king_side_castling;
        setup.white_queen_side_castling = self.white_queen_side_castling;
        setup.black_king_side_castling = self.black_king_side_castling;
        setup.black_queen_side_castling = self.black_queen_side_castling;
        setup.en_passant_target = self.en_passant_target;
        setup
    }

    /////////////////////////////////////////////////////////////////////////
    // Accessors
    /////////////////////////////////////////////////////////////////////////

    /// Returns the player to move next.
    pub fn active_player(&self) -> Player {
        self.active_player
    }

    /// Returns the piece at the given square, if any.
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.board.get(sq)
    }

    /// Returns the square a pawn may currently be captured on in passing.
    pub fn en_passant_target(&self) -> Option<Square> {
        self.en_passant_target
    }

    /// Returns true if the given player may still castle king-side.
    pub fn king_side_castling_available(&self, player: Player) -> bool {
        match player {
            Player::White => self.white_king_side_castling,
            Player::Black => self.black_king_side_castling,
        }
    }

    /// Returns true if the given player may still castle queen-side.
    pub fn queen_side_castling_available(&self, player: Player) -> bool {
        match player {
            Player::White => self.white_queen_side_castling,
            Player::Black => self.black_queen_side_castling,
        }
    }

    /// Returns the legal plies for the active player.
    ///
    /// The list is recomputed after every mutation and always agrees with
    /// the board, rights and en-passant target. Plies are pseudo-legal: check
    /// safety is not enforced.
    pub fn legal_plies(&self) -> &[Ply] {
        &self.legal_plies
    }

    /// Returns the legal plies starting from the given square.
    pub fn legal_plies_from(&self, source: Square) -> Vec<Ply> {
        self.legal_plies
            .iter()
            .filter(|ply| ply.source() == source)
            .copied()
            .collect()
    }

    /// Returns the plies executed so far, oldest first.
    pub fn history(&self) -> impl ExactSizeIterator<Item = &Ply> {
        self.history.iter().map(|entry| &entry.ply)
    }

    /// Returns the plies that have been undone and may be redone, most
    /// recently undone last.
    pub fn undone_plies(&self) -> impl ExactSizeIterator<Item = &Ply> {
        self.undone.iter().map(|entry| &entry.ply)
    }

    /// Returns true if there is a ply to undo.
    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    /// Returns true if there is an undone ply to redo.
    pub fn can_redo(&self) -> bool {
        !self.undone.is_empty()
    }

    /////////////////////////////////////////////////////////////////////////
    // Executing a ply
    /////////////////////////////////////////////////////////////////////////

    /// Performs the given ply: moves the pieces, revokes castling rights as
    /// needed, appends to the history, switches the active player and
    /// recomputes the legal plies.
    ///
    /// The ply must be a member of the current legal-ply list (promotion
    /// choice excluded from the comparison), and a promotion-kind ply must
    /// have its promotion piece chosen. On failure the game is left
    /// unchanged.
    ///
    /// Performing a new ply invalidates the undone-ply stack.
    pub fn perform_ply(&mut self, ply: &Ply) -> Result<(), PlyError> {
        if !self.legal_plies.contains(ply) {
            return Err(PlyError::IllegalPly);
        }
        if ply.requires_promotion() {
            return Err(PlyError::PromotionNotChosen);
        }

        self.execute(*ply)?;
        self.undone.clear();
        Ok(())
    }

    /// Reverts the most recently executed ply, restoring board, rights,
    /// en-passant target and active player to their pre-execution values.
    /// The reverted ply is kept for [`redo`](Game::redo).
    pub fn undo(&mut self) -> Result<(), PlyError> {
        let entry = self.history.pop().ok_or(PlyError::NoHistory)?;
        self.restore(&entry.before);
        self.undone.push(entry);
        self.update_legal_plies();
        Ok(())
    }

    /// Re-executes the most recently undone ply.
    pub fn redo(&mut self) -> Result<(), PlyError> {
        let entry = self.undone.pop().ok_or(PlyError::NoRedo)?;
        match self.execute(entry.ply) {
            Ok(()) => Ok(()),
            Err(err) => {
                self.undone.push(entry);
                Err(err)
            }
        }
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            board: self.board.clone(),
            active_player: self.active_player,
            white_king_side_castling: self.white_king_side_castling,
            white_queen_side_castling: self.white_queen_side_castling,
            black_king_side_castling: self.black_king_side_castling,
            black_queen_side_castling: self.black_queen_side_castling,
            en_passant_target: self.en_passant_target,
        }
    }

    fn restore(&mut self, snap: &Snapshot) {
        self.board = snap.board.clone();
        self.active_player = snap.active_player;
        self.white_king_side_castling = snap.white_king_side_castling;
        self.white_queen_side_castling = snap.white_queen_side_castling;
        self.black_king_side_castling = snap.black_king_side_castling;
        self.black_queen_side_castling = snap.black_queen_side_castling;
        self.en_passant_target = snap.en_passant_target;
    }

    fn execute(&mut self, ply: Ply) -> Result<(), PlyError> {
        let before = self.snapshot();

        self.apply(&ply)?;
        self.revoke_castling(&ply);

        // A double advance exposes the skipped square to en-passant capture;
        // every other ply clears the target.
        self.en_passant_target = if ply.kind() == PlyKind::PawnDoubleAdvance {
            Square::new(
                ply.source().column(),
                (ply.source().row() + ply.target().row()) / 2,
            )
        } else {
            None
        };

        self.history.push(HistoryEntry { ply, before });
        self.active_player = self.active_player.opponent();
        self.update_legal_plies();
        Ok(())
    }

    /// Moves the pieces of the ply. All reads happen before any write, so a
    /// failure leaves the board untouched.
    fn apply(&mut self, ply: &Ply) -> Result<(), PlyError> {
        let moving = self
            .board
            .get(ply.source())
            .ok_or(PlyError::Inconsistent("no piece at the source square"))?;

        match ply.kind() {
            PlyKind::Move | PlyKind::PawnDoubleAdvance => {
                self.board.set(ply.source(), None);
                self.board.set(ply.target(), Some(moving));
            }
            PlyKind::Capture | PlyKind::EnPassantCapture => {
                let cap = ply
                    .captured()
                    .ok_or(PlyError::Inconsistent("capture ply without a captured piece"))?;
                self.board.set(cap.square, None);
                self.board.set(ply.source(), None);
                self.board.set(ply.target(), Some(moving));
            }
            PlyKind::KingSideCastling | PlyKind::QueenSideCastling => {
                let row = moving.player.home_row();
                let (rook_home, rook_target) = if ply.kind() == PlyKind::KingSideCastling {
                    (Square::new(7, row), Square::new(5, row))
                } else {
                    (Square::new(0, row), Square::new(3, row))
                };
                let (rook_home, rook_target) = rook_home
                    .zip(rook_target)
                    .ok_or(PlyError::Inconsistent("castling squares out of range"))?;
                let rook = self
                    .board
                    .get(rook_home)
                    .ok_or(PlyError::Inconsistent("no rook on its home square"))?;

                self.board.set(ply.source(), None);
                self.board.set(ply.target(), Some(moving));
                self.board.set(rook_home, None);
                self.board.set(rook_target, Some(rook));
            }
            PlyKind::Promotion | PlyKind::PromotionCapture => {
                let chosen = match ply.promotion_state() {
                    Promotion::Chosen(pt) => pt,
                    _ => return Err(PlyError::PromotionNotChosen),
                };
                if let Some(cap) = ply.captured() {
                    self.board.set(cap.square, None);
                }
                self.board.set(ply.source(), None);
                self.board
                    .set(ply.target(), Some(Piece::new(chosen, moving.player)));
            }
        }

        Ok(())
    }

    /// Clears castling rights as a side effect of the executed ply,
    /// independent of the ply's own kind: a rook leaving its home corner, a
    /// king leaving its home square, or a rook captured on its home corner
    /// all revoke the matching rights.
    fn revoke_castling(&mut self, ply: &Ply) {
        let piece = ply.piece();
        match (piece.piece_type, piece.player) {
            (PieceType::Rook, Player::White) => {
                if ply.source() == SQ_A1 {
                    self.white_queen_side_castling = false;
                }
                if ply.source() == SQ_H1 {
                    self.white_king_side_castling = false;
                }
            }
            (PieceType::Rook, Player::Black) => {
                if ply.source() == SQ_A8 {
                    self.black_queen_side_castling = false;
                }
                if ply.source() == SQ_H8 {
                    self.black_king_side_castling = false;
                }
            }
            (PieceType::King, Player::White) => {
                if ply.source() == SQ_E1 {
                    self.white_king_side_castling = false;
                    self.white_queen_side_castling = false;
                }
            }
            (PieceType::King, Player::Black) => {
                if ply.source() == SQ_E8 {
                    self.black_king_side_castling = false;
                    self.black_queen_side_castling = false;
                }
            }
            _ => {}
        }

        if let Some(cap) = ply.captured() {
            if cap.piece == Piece::new(PieceType::Rook, Player::White) {
                if cap.square == SQ_A1 {
                    self.white_queen_side_castling = false;
                }
                if cap.square == SQ_H1 {
                    self.white_king_side_castling = false;
                }
            } else if cap.piece == Piece::new(PieceType::Rook, Player::Black) {
                if cap.square == SQ_A8 {
                    self.black_queen_side_castling = false;
                }
                if cap.square == SQ_H8 {
                    self.black_king_side_castling = false;
                }
            }
        }
    }

    /////////////////////////////////////////////////////////////////////////
    // Ply generation
    /////////////////////////////////////////////////////////////////////////

    fn update_legal_plies(&mut self) {
        let mut plies = Vec::new();

        for sq in Square::iter() {
            if let Some(piece) = self.board.get(sq) {
                if piece.player == self.active_player {
                    plies.extend(self.find_plies(sq, piece));
                }
            }
        }

        self.legal_plies = plies;
    }

    fn find_plies(&self, source: Square, piece: Piece) -> Vec<Ply> {
        match piece.piece_type {
            PieceType::Pawn => self.find_pawn_plies(source, piece),
            PieceType::Knight => self.find_knight_plies(source, piece),
            PieceType::Bishop => {
                self.find_directional_plies(source, piece, usize::MAX, &MoveDirection::DIAGONAL)
            }
            PieceType::Rook => {
                self.find_directional_plies(source, piece, usize::MAX, &MoveDirection::ORTHOGONAL)
            }
            PieceType::Queen => {
                self.find_directional_plies(source, piece, usize::MAX, &MoveDirection::ALL)
            }
            PieceType::King => self.find_king_plies(source, piece),
        }
    }

    fn find_pawn_plies(&self, source: Square, piece: Piece) -> Vec<Ply> {
        let player = piece.player;
        let forward = MoveDirection::forward(player);
        let last_row = player.opponent().home_row();
        let mut plies = Vec::new();

        // One step forward, onto an empty square only.
        if let Some(target) = source.step(forward) {
            if self.piece_at(target).is_none() {
                if target.row() == last_row {
                    plies.push(Ply::promotion(piece, source, target));
                } else {
                    plies.push(Ply::simple(piece, source, target));

                    // Two steps forward, from the starting row only, with
                    // both squares empty.
                    if source.row() == player.pawn_row() {
                        if let Some(two) = source.step_by(forward, 2) {
                            if self.piece_at(two).is_none() {
                                plies.push(Ply::pawn_double_advance(piece, source, two));
                            }
                        }
                    }
                }
            }
        }

        // Diagonal captures, en passant included.
        for dir in [
            MoveDirection::forward_left(player),
            MoveDirection::forward_right(player),
        ] {
            let Some(target) = source.step(dir) else {
                continue;
            };

            match self.piece_at(target) {
                Some(victim) if victim.player.is_opponent(player) => {
                    if target.row() == last_row {
                        plies.push(Ply::promotion_capture(piece, source, target, victim));
                    } else {
                        plies.push(Ply::capture(piece, source, target, victim));
                    }
                }
                None if self.en_passant_target == Some(target) => {
                    // The vulnerable pawn stands beside the source, on the
                    // target's column.
                    if let Some(captured_square) = Square::new(target.column(), source.row()) {
                        if let Some(victim) = self.piece_at(captured_square) {
                            if victim == Piece::new(PieceType::Pawn, player.opponent()) {
                                plies.push(Ply::en_passant_capture(
                                    piece,
                                    source,
                                    target,
                                    captured_square,
                                    victim,
                                ));
                            }
                        }
                    }
                }
                _ => {}
            }
        }

        plies
    }

    fn find_knight_plies(&self, source: Square, piece: Piece) -> Vec<Ply> {
        let mut plies = Vec::new();

        for &jump in KnightJump::ALL.iter() {
            let Some(target) = source.jump(jump) else {
                continue;
            };

            match self.piece_at(target) {
                None => plies.push(Ply::simple(piece, source, target)),
                Some(victim) if victim.player.is_opponent(piece.player) => {
                    plies.push(Ply::capture(piece, source, target, victim));
                }
                Some(_) => {}
            }
        }

        plies
    }

    fn find_directional_plies(
        &self,
        source: Square,
        piece: Piece,
        max_steps: usize,
        directions: &[MoveDirection],
    ) -> Vec<Ply> {
        let mut plies = Vec::new();

        for &dir in directions {
            let mut step: u8 = 1;
            while (step as usize) <= max_steps {
                let Some(target) = source.step_by(dir, step) else {
                    break;
                };

                match self.piece_at(target) {
                    None => plies.push(Ply::simple(piece, source, target)),
                    Some(victim) if victim.player.is_opponent(piece.player) => {
                        plies.push(Ply::capture(piece, source, target, victim));
                        break;
                    }
                    Some(_) => break,
                }

                step += 1;
            }
        }

        plies
    }

    fn find_king_plies(&self, source: Square, piece: Piece) -> Vec<Ply> {
        let mut plies = self.find_directional_plies(source, piece, 1, &MoveDirection::ALL);

        let player = piece.player;
        let king_side = self.king_side_castling_available(player);
        let queen_side = self.queen_side_castling_available(player);
        if !king_side && !queen_side {
            return plies;
        }

        let row = player.home_row();
        if source.row() != row || source.column() != 4 {
            return plies;
        }

        // Occupancy only; whether the path is attacked is not considered.
        let rook = Piece::new(PieceType::Rook, player);
        let empty =
            |column: u8| Square::new(column, row).is_some_and(|sq| self.piece_at(sq).is_none());
        let rook_at = |column: u8| {
            Square::new(column, row).is_some_and(|sq| self.piece_at(sq) == Some(rook))
        };

        if king_side && empty(5) && empty(6) && rook_at(7) {
            plies.push(Ply::king_side_castling(player));
        }
        if queen_side && empty(3) && empty(2) && empty(1) && rook_at(0) {
            plies.push(Ply::queen_side_castling(player));
        }

        plies
    }
}

impl Default for Game {
    fn default() -> Game {
        Game::new()
    }
}

impl fmt::Display for Game {
    /// Renders the board as a diagram, upper-case symbols for white and
    /// lower-case for black, with the active player below.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in (0..8).rev() {
            let line = (0..8)
                .filter_map(|column| Square::new(column, row))
                .map(|sq| self.piece_at(sq).map_or('.', |pc| pc.symbol()))
                .join(" ");
            writeln!(f, "{} {}", row + 1, line)?;
        }
        writeln!(f, "  {}", ('a'..='h').join(" "))?;
        write!(f, "{} to move", self.active_player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game_with(pieces: &[(Square, PieceType, Player)], active: Player) -> Game {
        let mut setup = Setup::empty();
        for &(sq, pt, player) in pieces {
            setup.set_piece(sq, Some(Piece::new(pt, player)));
        }
        setup.active_player = active;
        Game::from_setup(&setup)
    }

    fn find_ply(game: &Game, source: Square, target: Square) -> Ply {
        game.legal_plies()
            .iter()
            .copied()
            .find(|ply| ply.source() == source && ply.target() == target)
            .unwrap_or_else(|| panic!("no ply {source}->{target}"))
    }

    fn kind_count(game: &Game, kind: PlyKind) -> usize {
        game.legal_plies()
            .iter()
            .filter(|ply| ply.kind() == kind)
            .count()
    }

    #[test]
    fn standard_position() {
        let game = Game::new();

        assert_eq!(Player::White, game.active_player());
        assert_eq!(20, game.legal_plies().len());
        assert_eq!(12, kind_count(&game, PlyKind::Move)); // 8 pawn + 4 knight
        assert_eq!(8, kind_count(&game, PlyKind::PawnDoubleAdvance));
        assert_eq!(0, kind_count(&game, PlyKind::Capture));
    }

    #[test]
    fn legal_plies_from() {
        let game = Game::new();

        let plies = game.legal_plies_from(SQ_E2);
        assert_eq!(2, plies.len());
        assert!(plies.iter().all(|ply| ply.source() == SQ_E2));

        assert!(game.legal_plies_from(SQ_E4).is_empty());
        assert_eq!(2, game.legal_plies_from(SQ_G1).len());
    }

    #[test]
    fn illegal_ply_rejected() {
        let mut game = Game::new();
        let before = game.to_setup();

        // The queen cannot leave d1 in the starting position.
        let queen = Piece::new(PieceType::Queen, Player::White);
        let ply = Ply::simple(queen, SQ_D1, SQ_D5);

        assert_eq!(Err(PlyError::IllegalPly), game.perform_ply(&ply));
        assert_eq!(before, game.to_setup());
        assert_eq!(0, game.history().len());
    }

    #[test]
    fn rook_on_open_board() {
        let game = game_with(&[(SQ_D4, PieceType::Rook, Player::White)], Player::White);

        // 7 squares in each open direction up to the edge.
        assert_eq!(14, game.legal_plies().len());
        assert_eq!(0, kind_count(&game, PlyKind::Capture));
    }

    #[test]
    fn rook_blocked_by_own_piece() {
        let game = game_with(
            &[
                (SQ_D4, PieceType::Rook, Player::White),
                (SQ_D7, PieceType::Pawn, Player::White),
            ],
            Player::White,
        );

        let rook_plies = game.legal_plies_from(SQ_D4);
        // Up direction stops short of d7 without a ply: d5, d6 only.
        assert_eq!(12, rook_plies.len());
        assert!(!rook_plies.iter().any(|ply| ply.target() == SQ_D7));
    }

    #[test]
    fn rook_captures_first_opponent() {
        let game = game_with(
            &[
                (SQ_D4, PieceType::Rook, Player::White),
                (SQ_D7, PieceType::Knight, Player::Black),
            ],
            Player::White,
        );

        let rook_plies = game.legal_plies_from(SQ_D4);
        // d5, d6 moves plus the capture on d7; nothing beyond.
        assert_eq!(13, rook_plies.len());

        let capture = find_ply(&game, SQ_D4, SQ_D7);
        assert_eq!(PlyKind::Capture, capture.kind());
        assert_eq!(SQ_D7, capture.captured().unwrap().square);
        assert!(!rook_plies.iter().any(|ply| ply.target() == SQ_D8));
    }

    #[test]
    fn slider_counts_on_open_board() {
        let bishop = game_with(&[(SQ_D4, PieceType::Bishop, Player::White)], Player::White);
        assert_eq!(13, bishop.legal_plies().len());

        let queen = game_with(&[(SQ_D4, PieceType::Queen, Player::White)], Player::White);
        assert_eq!(27, queen.legal_plies().len());

        let king = game_with(&[(SQ_D4, PieceType::King, Player::White)], Player::White);
        assert_eq!(8, king.legal_plies().len());
    }

    #[test]
    fn knight_in_corner() {
        let game = game_with(&[(SQ_A1, PieceType::Knight, Player::White)], Player::White);

        let targets: Vec<_> = game.legal_plies().iter().map(|ply| ply.target()).collect();
        assert_eq!(2, targets.len());
        assert!(targets.contains(&SQ_B3));
        assert!(targets.contains(&SQ_C2));
    }

    #[test]
    fn pawn_blocked() {
        // A piece directly ahead blocks both advances.
        let game = game_with(
            &[
                (SQ_E2, PieceType::Pawn, Player::White),
                (SQ_E3, PieceType::Knight, Player::Black),
            ],
            Player::White,
        );
        assert!(game.legal_plies_from(SQ_E2).is_empty());

        // A piece on the double-advance square blocks only that.
        let game = game_with(
            &[
                (SQ_E2, PieceType::Pawn, Player::White),
                (SQ_E4, PieceType::Knight, Player::Black),
            ],
            Player::White,
        );
        let plies = game.legal_plies_from(SQ_E2);
        assert_eq!(1, plies.len());
        assert_eq!(SQ_E3, plies[0].target());
    }

    #[test]
    fn pawn_captures_diagonally() {
        let game = game_with(
            &[
                (SQ_E4, PieceType::Pawn, Player::White),
                (SQ_D5, PieceType::Pawn, Player::Black),
                (SQ_F5, PieceType::Knight, Player::Black),
            ],
            Player::White,
        );

        let plies = game.legal_plies_from(SQ_E4);
        assert_eq!(3, plies.len());
        assert_eq!(PlyKind::Capture, find_ply(&game, SQ_E4, SQ_D5).kind());
        assert_eq!(PlyKind::Capture, find_ply(&game, SQ_E4, SQ_F5).kind());
        assert_eq!(PlyKind::Move, find_ply(&game, SQ_E4, SQ_E5).kind());
    }

    #[test]
    fn black_pawn_moves_down() {
        let game = game_with(&[(SQ_E7, PieceType::Pawn, Player::Black)], Player::Black);

        let targets: Vec<_> = game.legal_plies().iter().map(|ply| ply.target()).collect();
        assert!(targets.contains(&SQ_E6));
        assert!(targets.contains(&SQ_E5));
    }

    #[test]
    fn double_advance_sets_en_passant_target() {
        let mut game = Game::new();

        let ply = find_ply(&game, SQ_E2, SQ_E4);
        assert_eq!(PlyKind::PawnDoubleAdvance, ply.kind());
        game.perform_ply(&ply).unwrap();

        assert_eq!(Some(SQ_E3), game.en_passant_target());
        assert_eq!(Player::Black, game.active_player());

        // Any other ply clears it again.
        let reply = find_ply(&game, SQ_G8, SQ_F6);
        game.perform_ply(&reply).unwrap();
        assert_eq!(None, game.en_passant_target());
    }

    #[test]
    fn en_passant_capture() {
        let mut game = game_with(
            &[
                (SQ_E2, PieceType::Pawn, Player::White),
                (SQ_D4, PieceType::Pawn, Player::Black),
            ],
            Player::White,
        );

        game.perform_ply(&find_ply(&game, SQ_E2, SQ_E4)).unwrap();
        assert_eq!(Some(SQ_E3), game.en_passant_target());

        let ep = find_ply(&game, SQ_D4, SQ_E3);
        assert_eq!(PlyKind::EnPassantCapture, ep.kind());
        let cap = ep.captured().unwrap();
        assert_eq!(SQ_E4, cap.square);
        assert_eq!(Piece::new(PieceType::Pawn, Player::White), cap.piece);

        game.perform_ply(&ep).unwrap();
        assert_eq!(None, game.piece_at(SQ_E4));
        assert_eq!(None, game.piece_at(SQ_D4));
        assert_eq!(
            Some(Piece::new(PieceType::Pawn, Player::Black)),
            game.piece_at(SQ_E3)
        );
        assert_eq!(None, game.en_passant_target());
    }

    #[test]
    fn promotion_requires_choice() {
        let mut game = game_with(&[(SQ_E7, PieceType::Pawn, Player::White)], Player::White);
        let before = game.to_setup();

        let mut ply = find_ply(&game, SQ_E7, SQ_E8);
        assert_eq!(PlyKind::Promotion, ply.kind());
        assert!(ply.requires_promotion());

        assert_eq!(Err(PlyError::PromotionNotChosen), game.perform_ply(&ply));
        assert_eq!(before, game.to_setup());

        ply.set_promotion(PieceType::Queen).unwrap();
        game.perform_ply(&ply).unwrap();

        assert_eq!(None, game.piece_at(SQ_E7));
        assert_eq!(
            Some(Piece::new(PieceType::Queen, Player::White)),
            game.piece_at(SQ_E8)
        );
    }

    #[test]
    fn promotion_capture() {
        let mut game = game_with(
            &[
                (SQ_E7, PieceType::Pawn, Player::White),
                (SQ_D8, PieceType::Rook, Player::Black),
                (SQ_E8, PieceType::Knight, Player::Black),
            ],
            Player::White,
        );

        // e8 is occupied, so the only promotions are captures.
        let mut ply = find_ply(&game, SQ_E7, SQ_D8);
        assert_eq!(PlyKind::PromotionCapture, ply.kind());

        ply.set_promotion(PieceType::Knight).unwrap();
        game.perform_ply(&ply).unwrap();

        assert_eq!(
            Some(Piece::new(PieceType::Knight, Player::White)),
            game.piece_at(SQ_D8)
        );
    }

    #[test]
    fn no_promotion_as_simple_move() {
        let game = game_with(&[(SQ_E7, PieceType::Pawn, Player::White)], Player::White);
        assert_eq!(0, kind_count(&game, PlyKind::Move));
        assert_eq!(1, kind_count(&game, PlyKind::Promotion));
    }

    fn castling_setup() -> Vec<(Square, PieceType, Player)> {
        vec![
            (SQ_E1, PieceType::King, Player::White),
            (SQ_A1, PieceType::Rook, Player::White),
            (SQ_H1, PieceType::Rook, Player::White),
            (SQ_E8, PieceType::King, Player::Black),
            (SQ_A8, PieceType::Rook, Player::Black),
            (SQ_H8, PieceType::Rook, Player::Black),
        ]
    }

    fn game_with_rights(pieces: &[(Square, PieceType, Player)], active: Player) -> Game {
        let mut setup = Setup::empty();
        for &(sq, pt, player) in pieces {
            setup.set_piece(sq, Some(Piece::new(pt, player)));
        }
        setup.active_player = active;
        setup.white_king_side_castling = true;
        setup.white_queen_side_castling = true;
        setup.black_king_side_castling = true;
        setup.black_queen_side_castling = true;
        Game::from_setup(&setup)
    }

    #[test]
    fn castling_generated_when_path_clear() {
        let game = game_with_rights(&castling_setup(), Player::White);

        assert_eq!(1, kind_count(&game, PlyKind::KingSideCastling));
        assert_eq!(1, kind_count(&game, PlyKind::QueenSideCastling));
    }

    #[test]
    fn castling_blocked_by_occupied_square() {
        let mut pieces = castling_setup();
        pieces.push((SQ_B1, PieceType::Knight, Player::White));
        let game = game_with_rights(&pieces, Player::White);

        assert_eq!(1, kind_count(&game, PlyKind::KingSideCastling));
        assert_eq!(0, kind_count(&game, PlyKind::QueenSideCastling));
    }

    #[test]
    fn castling_requires_rights() {
        let mut setup = Setup::empty();
        for &(sq, pt, player) in castling_setup().iter() {
            setup.set_piece(sq, Some(Piece::new(pt, player)));
        }
        setup.active_player = Player::White;
        // No rights at all: no castling plies, path notwithstanding.
        let game = Game::from_setup(&setup);

        assert_eq!(0, kind_count(&game, PlyKind::KingSideCastling));
        assert_eq!(0, kind_count(&game, PlyKind::QueenSideCastling));
    }

    #[test]
    fn king_side_castling_execution() {
        let mut game = game_with_rights(&castling_setup(), Player::White);

        let ply = Ply::king_side_castling(Player::White);
        game.perform_ply(&ply).unwrap();

        assert_eq!(
            Some(Piece::new(PieceType::King, Player::White)),
            game.piece_at(SQ_G1)
        );
        assert_eq!(
            Some(Piece::new(PieceType::Rook, Player::White)),
            game.piece_at(SQ_F1)
        );
        assert_eq!(None, game.piece_at(SQ_E1));
        assert_eq!(None, game.piece_at(SQ_H1));

        assert!(!game.king_side_castling_available(Player::White));
        assert!(!game.queen_side_castling_available(Player::White));
        assert!(game.king_side_castling_available(Player::Black));
    }

    #[test]
    fn queen_side_castling_execution() {
        let mut game = game_with_rights(&castling_setup(), Player::Black);

        let ply = Ply::queen_side_castling(Player::Black);
        game.perform_ply(&ply).unwrap();

        assert_eq!(
            Some(Piece::new(PieceType::King, Player::Black)),
            game.piece_at(SQ_C8)
        );
        assert_eq!(
            Some(Piece::new(PieceType::Rook, Player::Black)),
            game.piece_at(SQ_D8)
        );
        assert_eq!(None, game.piece_at(SQ_E8));
        assert_eq!(None, game.piece_at(SQ_A8));
    }

    #[test]
    fn rook_move_revokes_one_right() {
        let mut game = game_with_rights(&castling_setup(), Player::White);

        game.perform_ply(&find_ply(&game, SQ_A1, SQ_A4)).unwrap();

        assert!(!game.queen_side_castling_available(Player::White));
        assert!(game.king_side_castling_available(Player::White));
    }

    #[test]
    fn king_move_revokes_both_rights() {
        let mut game = game_with_rights(&castling_setup(), Player::White);

        game.perform_ply(&find_ply(&game, SQ_E1, SQ_E2)).unwrap();

        assert!(!game.king_side_castling_available(Player::White));
        assert!(!game.queen_side_castling_available(Player::White));
        assert!(game.king_side_castling_available(Player::Black));
    }

    #[test]
    fn capturing_rook_revokes_rights_for_good() {
        let mut pieces = castling_setup();
        pieces.push((SQ_H4, PieceType::Queen, Player::White));
        let mut game = game_with_rights(&pieces, Player::White);

        // The white queen takes the h8 rook in place.
        let capture = find_ply(&game, SQ_H4, SQ_H8);
        assert_eq!(PlyKind::Capture, capture.kind());
        game.perform_ply(&capture).unwrap();

        assert!(!game.king_side_castling_available(Player::Black));
        assert!(game.queen_side_castling_available(Player::Black));
        assert_eq!(0, kind_count(&game, PlyKind::KingSideCastling));

        // Rights stay revoked through subsequent plies.
        game.perform_ply(&find_ply(&game, SQ_E8, SQ_D7)).unwrap();
        assert!(!game.king_side_castling_available(Player::Black));
    }

    #[test]
    fn undo_restores_everything() {
        let mut game = game_with_rights(&castling_setup(), Player::White);
        let before = game.to_setup();

        // A rook move changes board, rights and active player.
        game.perform_ply(&find_ply(&game, SQ_A1, SQ_A5)).unwrap();
        assert_ne!(before, game.to_setup());

        game.undo().unwrap();
        assert_eq!(before, game.to_setup());
        assert_eq!(Player::White, game.active_player());
        assert!(game.queen_side_castling_available(Player::White));
        assert_eq!(0, game.history().len());
        assert!(game.can_redo());
    }

    #[test]
    fn redo_restores_post_state() {
        let mut game = Game::new();

        game.perform_ply(&find_ply(&game, SQ_E2, SQ_E4)).unwrap();
        let after = game.to_setup();

        game.undo().unwrap();
        game.redo().unwrap();

        assert_eq!(after, game.to_setup());
        assert_eq!(Player::Black, game.active_player());
        assert_eq!(Some(SQ_E3), game.en_passant_target());
        assert_eq!(1, game.history().len());
        assert!(!game.can_redo());
    }

    #[test]
    fn new_ply_clears_redo_stack() {
        let mut game = Game::new();

        game.perform_ply(&find_ply(&game, SQ_E2, SQ_E4)).unwrap();
        game.undo().unwrap();
        assert!(game.can_redo());

        game.perform_ply(&find_ply(&game, SQ_D2, SQ_D4)).unwrap();
        assert!(!game.can_redo());
        assert_eq!(Err(PlyError::NoRedo), game.redo());
    }

    #[test]
    fn failed_perform_keeps_redo_stack() {
        let mut game = Game::new();

        game.perform_ply(&find_ply(&game, SQ_E2, SQ_E4)).unwrap();
        game.undo().unwrap();
        assert!(game.can_redo());

        let queen = Piece::new(PieceType::Queen, Player::White);
        let illegal = Ply::simple(queen, SQ_D1, SQ_D5);
        assert_eq!(Err(PlyError::IllegalPly), game.perform_ply(&illegal));

        // The undone future is only invalidated by a ply that executes.
        assert!(game.can_redo());
        game.redo().unwrap();
        assert_eq!(Player::Black, game.active_player());
    }

    #[test]
    fn undo_and_redo_on_empty_stacks() {
        let mut game = Game::new();
        assert_eq!(Err(PlyError::NoHistory), game.undo());
        assert_eq!(Err(PlyError::NoRedo), game.redo());
        assert!(!game.can_undo());
        assert!(!game.can_redo());
    }

    #[test]
    fn multiple_undos_redo_in_order() {
        let mut game = Game::new();

        game.perform_ply(&find_ply(&game, SQ_E2, SQ_E4)).unwrap();
        game.perform_ply(&find_ply(&game, SQ_E7, SQ_E5)).unwrap();
        let after_two = game.to_setup();

        game.undo().unwrap();
        game.undo().unwrap();
        assert_eq!(Setup::standard(), game.to_setup());
        assert_eq!(2, game.undone_plies().len());

        game.redo().unwrap();
        game.redo().unwrap();
        assert_eq!(after_two, game.to_setup());
        assert_eq!(2, game.history().len());
    }

    #[test]
    fn undo_after_promotion() {
        let mut game = game_with(&[(SQ_A7, PieceType::Pawn, Player::White)], Player::White);
        let before = game.to_setup();

        let mut ply = find_ply(&game, SQ_A7, SQ_A8);
        ply.set_promotion(PieceType::Rook).unwrap();
        game.perform_ply(&ply).unwrap();
        assert_eq!(
            Some(Piece::new(PieceType::Rook, Player::White)),
            game.piece_at(SQ_A8)
        );

        game.undo().unwrap();
        assert_eq!(before, game.to_setup());
    }

    #[test]
    fn setup_roundtrip() {
        let standard = Setup::standard();
        assert_eq!(standard, Game::from_setup(&standard).to_setup());

        let mut custom = Setup::empty();
        custom.set_piece(SQ_C6, Some(Piece::new(PieceType::Bishop, Player::Black)));
        custom.set_piece(SQ_E1, Some(Piece::new(PieceType::King, Player::White)));
        custom.active_player = Player::Black;
        custom.black_queen_side_castling = true;
        custom.en_passant_target = Some(SQ_D3);
        assert_eq!(custom, Game::from_setup(&custom).to_setup());
    }

    #[test]
    fn history_records_plies() {
        let mut game = Game::new();

        game.perform_ply(&find_ply(&game, SQ_G1, SQ_F3)).unwrap();
        game.perform_ply(&find_ply(&game, SQ_B8, SQ_C6)).unwrap();

        let history: Vec<_> = game.history().collect();
        assert_eq!(2, history.len());
        assert_eq!(SQ_G1, history[0].source());
        assert_eq!(SQ_C6, history[1].target());
    }

    #[test]
    fn display_diagram() {
        let game = Game::new();
        let text = game.to_string();

        assert!(text.starts_with("8 r n b q k b n r\n"));
        assert!(text.contains("1 R N B Q K B N R\n"));
        assert!(text.contains("  a b c d e f g h\n"));
        assert!(text.ends_with("white to move"));
    }
}
