//! Step directions and knight jumps used by ply generation.

use crate::player::Player;

/// One of the eight compass directions a piece can move along.
///
/// `Up` points toward increasing rows, which is forward for white.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum MoveDirection {
    Up,
    UpRight,
    Right,
    DownRight,
    Down,
    DownLeft,
    Left,
    UpLeft,
}

impl MoveDirection {
    /// All eight directions.
    pub const ALL: [MoveDirection; 8] = [
        MoveDirection::Up,
        MoveDirection::UpRight,
        MoveDirection::Right,
        MoveDirection::DownRight,
        MoveDirection::Down,
        MoveDirection::DownLeft,
        MoveDirection::Left,
        MoveDirection::UpLeft,
    ];

    /// The four orthogonal directions (rook lines).
    pub const ORTHOGONAL: [MoveDirection; 4] = [
        MoveDirection::Up,
        MoveDirection::Right,
        MoveDirection::Down,
        MoveDirection::Left,
    ];

    /// The four diagonal directions (bishop lines).
    pub const DIAGONAL: [MoveDirection; 4] = [
        MoveDirection::UpRight,
        MoveDirection::DownRight,
        MoveDirection::DownLeft,
        MoveDirection::UpLeft,
    ];

    /// Returns the `(column, row)` offset of a single step in this direction.
    pub fn offsets(self) -> (i8, i8) {
        match self {
            MoveDirection::Up => (0, 1),
            MoveDirection::UpRight => (1, 1),
            MoveDirection::Right => (1, 0),
            MoveDirection::DownRight => (1, -1),
            MoveDirection::Down => (0, -1),
            MoveDirection::DownLeft => (-1, -1),
            MoveDirection::Left => (-1, 0),
            MoveDirection::UpLeft => (-1, 1),
        }
    }

    /// Returns the direction pointing the opposite way.
    #[must_use]
    pub fn opposite(self) -> MoveDirection {
        match self {
            MoveDirection::Up => MoveDirection::Down,
            MoveDirection::UpRight => MoveDirection::DownLeft,
            MoveDirection::Right => MoveDirection::Left,
            MoveDirection::DownRight => MoveDirection::UpLeft,
            MoveDirection::Down => MoveDirection::Up,
            MoveDirection::DownLeft => MoveDirection::UpRight,
            MoveDirection::Left => MoveDirection::Right,
            MoveDirection::UpLeft => MoveDirection::DownRight,
        }
    }

    /// Returns the forward direction for the given player.
    pub fn forward(player: Player) -> MoveDirection {
        match player {
            Player::White => MoveDirection::Up,
            Player::Black => MoveDirection::Down,
        }
    }

    /// Returns the forward-left capture direction for the given player.
    pub fn forward_left(player: Player) -> MoveDirection {
        match player {
            Player::White => MoveDirection::UpLeft,
            Player::Black => MoveDirection::DownRight,
        }
    }

    /// Returns the forward-right capture direction for the given player.
    pub fn forward_right(player: Player) -> MoveDirection {
        match player {
            Player::White => MoveDirection::UpRight,
            Player::Black => MoveDirection::DownLeft,
        }
    }
}

/// One of the eight knight jump offsets.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum KnightJump {
    UpUpLeft,
    UpUpRight,
    RightRightUp,
    RightRightDown,
    DownDownRight,
    DownDownLeft,
    LeftLeftDown,
    LeftLeftUp,
}

impl KnightJump {
    /// All eight jumps.
    pub const ALL: [KnightJump; 8] = [
        KnightJump::UpUpLeft,
        KnightJump::UpUpRight,
        KnightJump::RightRightUp,
        KnightJump::RightRightDown,
        KnightJump::DownDownRight,
        KnightJump::DownDownLeft,
        KnightJump::LeftLeftDown,
        KnightJump::LeftLeftUp,
    ];

    /// Returns the `(column, row)` offset of this jump.
    pub fn offsets(self) -> (i8, i8) {
        match self {
            KnightJump::UpUpLeft => (-1, 2),
            KnightJump::UpUpRight => (1, 2),
            KnightJump::RightRightUp => (2, 1),
            KnightJump::RightRightDown => (2, -1),
            KnightJump::DownDownRight => (1, -2),
            KnightJump::DownDownLeft => (-1, -2),
            KnightJump::LeftLeftDown => (-2, -1),
            KnightJump::LeftLeftUp => (-2, 1),
        }
    }
}
