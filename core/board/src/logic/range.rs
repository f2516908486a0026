//! 攻擊距離判定
//!
//! 只處理「距離 + 地形」部分；陣營判定由上層負責。

use crate::alias::Distance;
use crate::constants::{HILL_BONUS_MIN_BASE_RANGE, HILL_RANGE_BONUS};
use crate::core_types::{Board, Position};
use crate::terrain::{TerrainSpecial, special};
use std::collections::BTreeSet;
use std::ops::RangeInclusive;

/// 站在 `pos` 時由地形提供的射程加成
///
/// 只有基礎最大射程 >= 2 的單位站在丘陵上才有 +1。
pub fn terrain_range_bonus(board: &Board, pos: Position, base_max_range: Distance) -> Distance {
    match special(board.terrain_at(pos)) {
        Some(TerrainSpecial::RangeBonus) if base_max_range >= HILL_BONUS_MIN_BASE_RANGE => {
            HILL_RANGE_BONUS
        }
        _ => 0,
    }
}

/// 站在 `from` 時的有效射程區間（含地形加成）
pub fn effective_attack_range(
    board: &Board,
    from: Position,
    min_range: Distance,
    max_range: Distance,
) -> RangeInclusive<Distance> {
    min_range..=max_range + terrain_range_bonus(board, from, max_range)
}

/// `target` 是否落在 `from` 的有效射程內
pub fn in_attack_range(
    board: &Board,
    from: Position,
    min_range: Distance,
    max_range: Distance,
    target: Position,
) -> bool {
    if !board.contains(from) || !board.contains(target) {
        return false;
    }
    effective_attack_range(board, from, min_range, max_range).contains(&from.manhattan(target))
}

/// 有效射程內的所有棋盤格（供高亮顯示）
pub fn attackable_positions(
    board: &Board,
    from: Position,
    min_range: Distance,
    max_range: Distance,
) -> BTreeSet<Position> {
    if !board.contains(from) {
        return BTreeSet::new();
    }
    board
        .positions()
        .filter(|&pos| in_attack_range(board, from, min_range, max_range, pos))
        .collect()
}
