//! rules.rs：單位層級的範圍判定
//!
//! 攻擊判定只有 [`can_attack`] 一個入口，AI 與玩家行動共用。
use crate::*;
use board::logic::movement::{ReachableInfo, reachable_cells, reachable_positions};
use board::logic::range::in_attack_range;
use std::collections::{BTreeMap, BTreeSet};

/// 攻擊者能否攻擊目標
///
/// 雙方皆存活、陣營不同，且距離落在攻擊者含地形加成的射程內。
pub fn can_attack(board: &Board, attacker: &UnitInstance, target: &UnitInstance) -> bool {
    attacker.is_alive()
        && target.is_alive()
        && attacker.side != target.side
        && in_attack_range(
            board,
            attacker.pos,
            attacker.def.min_range,
            attacker.def.max_range,
            target.pos,
        )
}

/// 治療者能否治療目標（不檢查目標是否受傷）
///
/// 距離 0 即治療自己，視為在範圍內。
pub fn can_heal(healer: &UnitInstance, target: &UnitInstance) -> bool {
    healer.def.is_healer()
        && healer.side == target.side
        && target.is_alive()
        && healer.pos.manhattan(target.pos) <= healer.def.max_range
}

/// 單位本回合可移動到的格子與路徑資訊（不含原地）
pub fn movement_map(
    board: &Board,
    roster: &Roster,
    unit: &UnitInstance,
) -> BTreeMap<Position, ReachableInfo> {
    reachable_positions(board, unit.pos, unit.def.movement, |pos| {
        roster.is_occupied(pos)
    })
}

/// 單位本回合可移動到的格子（不含原地）
pub fn movement_cells(board: &Board, roster: &Roster, unit: &UnitInstance) -> BTreeSet<Position> {
    reachable_cells(board, unit.pos, unit.def.movement, |pos| {
        roster.is_occupied(pos)
    })
}

/// 可攻擊的敵方單位，依名冊順序
pub fn attack_targets<'a>(
    board: &Board,
    roster: &'a Roster,
    attacker: &UnitInstance,
) -> Vec<&'a UnitInstance> {
    roster
        .iter()
        .filter(|target| can_attack(board, attacker, target))
        .collect()
}

/// 可治療的受傷友方單位，依名冊順序
pub fn heal_targets<'a>(roster: &'a Roster, healer: &UnitInstance) -> Vec<&'a UnitInstance> {
    roster
        .iter()
        .filter(|target| target.is_wounded() && can_heal(healer, target))
        .collect()
}

/// 對 `side` 而言的敵方主帥；主帥已不在時退而取任一存活敵人
pub fn enemy_hero(roster: &Roster, side: Side) -> Option<&UnitInstance> {
    let enemy = side.opponent();
    roster
        .hero(enemy)
        .or_else(|| roster.side_units(enemy).next())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;

    #[test]
    fn test_can_attack_requires_enemy_in_range() {
        let (board, roster) = ScenarioBuilder::new(
            "
            a f e .
            . . . .
            ",
        )
        .unit("a", soldier(), Side::Blue)
        .unit("f", soldier(), Side::Blue)
        .unit("e", soldier(), Side::Red)
        .build();
        let a = roster.get("a").unwrap();
        let f = roster.get("f").unwrap();
        let e = roster.get("e").unwrap();
        // 友軍相鄰也不能攻擊
        assert!(!can_attack(&board, a, f));
        assert!(can_attack(&board, f, e));
        assert!(can_attack(&board, e, f));
        // 距離 2 超出近戰射程
        assert!(!can_attack(&board, a, e));
    }

    #[test]
    fn test_hill_bonus_only_for_ranged() {
        let (board, roster) = ScenarioBuilder::new(
            "
            r:H . . . e
            s:H e2 . . .
            ",
        )
        .unit("r", archer(), Side::Blue)
        .unit("s", soldier(), Side::Blue)
        .unit("e", soldier(), Side::Red)
        .unit("e2", soldier(), Side::Red)
        .build();
        let r = roster.get("r").unwrap();
        // 弓兵基礎 2..=3，丘陵上 2..=4
        assert!(can_attack(&board, r, roster.get("e").unwrap()));
        // 近戰單位在丘陵上不加射程，鄰格仍可攻擊
        let s = roster.get("s").unwrap();
        assert!(can_attack(&board, s, roster.get("e2").unwrap()));
        // 弓兵最短射程 2，距離 2 的 e2 可打
        assert!(can_attack(&board, r, roster.get("e2").unwrap()));
    }

    #[test]
    fn test_heal_targets_include_self_and_skip_full_hp() {
        let (_, mut roster) = ScenarioBuilder::new(
            "
            c a . . b
            ",
        )
        .unit("c", cleric(), Side::Blue)
        .unit("a", soldier(), Side::Blue)
        .unit("b", soldier(), Side::Blue)
        .build();
        let c = roster.get("c").unwrap().clone();
        assert!(heal_targets(&roster, &c).is_empty());

        roster.get_mut("c").unwrap().hp -= 1;
        roster.get_mut("a").unwrap().hp -= 1;
        roster.get_mut("b").unwrap().hp -= 1;
        let c = roster.get("c").unwrap().clone();
        let ids: Vec<_> = heal_targets(&roster, &c)
            .into_iter()
            .map(|u| u.id.as_str())
            .collect();
        assert_eq!(ids, ["c", "a"]);
    }

    #[test]
    fn test_enemy_hero_fallback() {
        let (_, mut roster) = ScenarioBuilder::new("a h e")
            .unit("a", soldier(), Side::Blue)
            .unit("h", hero(), Side::Red)
            .unit("e", soldier(), Side::Red)
            .build();
        assert_eq!(enemy_hero(&roster, Side::Blue).unwrap().id, "h");
        roster.remove("h");
        assert_eq!(enemy_hero(&roster, Side::Blue).unwrap().id, "e");
        roster.remove("e");
        assert!(enemy_hero(&roster, Side::Blue).is_none());
    }

    #[test]
    fn test_movement_cells_blocked_by_units() {
        let (board, roster) = ScenarioBuilder::new(
            "
            s e .
            . . .
            ",
        )
        .unit("s", soldier(), Side::Blue)
        .unit("e", soldier(), Side::Red)
        .build();
        let s = roster.get("s").unwrap();
        let cells = movement_cells(&board, &roster, s);
        assert!(!cells.contains(&Position::new(1, 0)));
        assert!(!cells.contains(&Position::new(0, 0)));
        // 繞過敵人仍能抵達右上角
        assert!(cells.contains(&Position::new(2, 0)));
        let map = movement_map(&board, &roster, s);
        assert_eq!(map[&Position::new(2, 0)].cost, 4);
    }
}
