//! 棋盤邏輯

use crate::core_types::{Board, Position};

/// 驗證位置是否在棋盤邊界內
pub fn is_valid_position(board: &Board, pos: Position) -> bool {
    board.contains(pos)
}

