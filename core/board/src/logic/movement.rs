//! 移動邏輯

use crate::alias::MovementCost;
use crate::core_types::{Board, Position};
use crate::logic::board::is_valid_position;
use crate::terrain::movement_cost;
use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};

/// 移動方向（四方向）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Right,
    Left,
    Down,
    Up,
}

/// 鄰格展開順序，同分時以此順序決勝
pub const DIRECTIONS: [Direction; 4] = [
    Direction::Right,
    Direction::Left,
    Direction::Down,
    Direction::Up,
];

/// 計算從當前位置往指定方向移動一格後的位置，檢查棋盤邊界
///
/// 返回 `None` 當新位置超出棋盤邊界
pub fn step_in_direction(board: &Board, pos: Position, direction: Direction) -> Option<Position> {
    let new_pos = match direction {
        Direction::Up => Position {
            x: pos.x,
            y: pos.y.checked_sub(1)?,
        },
        Direction::Down => Position {
            x: pos.x,
            y: pos.y + 1,
        },
        Direction::Left => Position {
            x: pos.x.checked_sub(1)?,
            y: pos.y,
        },
        Direction::Right => Position {
            x: pos.x + 1,
            y: pos.y,
        },
    };

    if is_valid_position(board, new_pos) {
        Some(new_pos)
    } else {
        None
    }
}

/// 依 `DIRECTIONS` 順序列出棋盤內的四方向鄰格
pub fn orthogonal_neighbors(board: &Board, pos: Position) -> Vec<Position> {
    DIRECTIONS
        .into_iter()
        .filter_map(|direction| step_in_direction(board, pos, direction))
        .collect()
}

/// 可到達位置的資訊（含成本與前驅節點）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReachableInfo {
    pub cost: MovementCost,
    pub prev: Position, // 上一個位置（可能是起點）
}

/// 以地形成本計算移動力預算內可到達的所有位置
///
/// 見 [`reachable_positions_with`]。
pub fn reachable_positions<F>(
    board: &Board,
    from: Position,
    budget: MovementCost,
    is_occupied: F,
) -> BTreeMap<Position, ReachableInfo>
where
    F: Fn(Position) -> bool,
{
    reachable_positions_with(board, from, budget, is_occupied, |pos| {
        movement_cost(board.terrain_at(pos))
    })
}

/// 計算給定移動力預算內可到達的所有位置
///
/// 成本加權的廣度優先搜尋：
/// 1. 從起點開始，依 `DIRECTIONS` 順序展開四方向鄰格
/// 2. 鄰格必須在棋盤內且未被佔據（任何單位皆阻擋）
/// 3. 累積成本（沿路徑各目的格成本之和）不得超過預算
/// 4. 只有比既有紀錄嚴格更便宜時才更新並重新入列
///
/// 結果不包含起點；起點超出棋盤時回傳空集合。
pub fn reachable_positions_with<F, G>(
    board: &Board,
    from: Position,
    budget: MovementCost,
    is_occupied: F,
    cost_of: G,
) -> BTreeMap<Position, ReachableInfo>
where
    F: Fn(Position) -> bool,
    G: Fn(Position) -> MovementCost,
{
    if !is_valid_position(board, from) {
        return BTreeMap::new();
    }

    let mut best: HashMap<Position, ReachableInfo> = HashMap::new();
    let mut queue: VecDeque<(Position, MovementCost)> = VecDeque::new();
    queue.push_back((from, 0));

    while let Some((pos, cost)) = queue.pop_front() {
        // 跳過過時的隊列項（已有更優路徑）
        if best.get(&pos).is_some_and(|info| info.cost < cost) {
            continue;
        }

        for next in orthogonal_neighbors(board, pos) {
            if next == from || is_occupied(next) {
                continue;
            }
            let new_cost = cost.saturating_add(cost_of(next));
            if new_cost > budget {
                continue;
            }
            if best.get(&next).is_some_and(|info| new_cost >= info.cost) {
                continue;
            }
            best.insert(
                next,
                ReachableInfo {
                    cost: new_cost,
                    prev: pos,
                },
            );
            queue.push_back((next, new_cost));
        }
    }

    best.into_iter().collect()
}

/// 只取可到達位置的座標集合
pub fn reachable_cells<F>(
    board: &Board,
    from: Position,
    budget: MovementCost,
    is_occupied: F,
) -> BTreeSet<Position>
where
    F: Fn(Position) -> bool,
{
    reachable_positions(board, from, budget, is_occupied)
        .into_keys()
        .collect()
}

/// 由搜尋結果回推從 `from` 到 `to` 的路徑（含兩端）
///
/// `to` 不在結果中時回傳 `None`。
pub fn reconstruct_path(
    map: &BTreeMap<Position, ReachableInfo>,
    from: Position,
    to: Position,
) -> Option<Vec<Position>> {
    let mut path = Vec::new();
    let mut current = to;
    while current != from {
        let info = map.get(&current)?;
        path.push(current);
        current = info.prev;
    }
    path.push(from);
    path.reverse();
    Some(path)
}
