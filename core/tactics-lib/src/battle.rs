//! battle.rs：
//! - 負責傷害、治療與堡壘回復的結算，以及回合旗標重置。
//! - 呼叫端負責合法性檢查（射程、陣營、行動旗標），此處只做數值結算。
//! - 單位 HP 歸零即從名冊移除。
use crate::*;
use board::constants::FORT_HEAL_AMOUNT;
use board::terrain::{TerrainSpecial, defense_bonus, special};

/// 最低傷害
pub const MIN_DAMAGE: i32 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttackOutcome {
    pub attacker: UnitID,
    pub defender: UnitID,
    pub damage: i32,
    pub remaining_hp: i32,
    pub killed: bool,
    /// 被擊殺者為該陣營最後一名主帥
    pub killed_hero: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealOutcome {
    pub healer: UnitID,
    pub target: UnitID,
    /// 實際回復量（已扣除溢出）
    pub amount: i32,
    pub hp: i32,
}

/// 回合開始時地形給予的回復
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerrainHeal {
    pub unit: UnitID,
    pub pos: Position,
    pub amount: i32,
    pub hp: i32,
}

/// 傷害 = max(1, 攻擊力 - 防守方所在地形的防禦加成)
pub fn damage_against(board: &Board, atk: i32, defender_pos: Position) -> i32 {
    (atk - defense_bonus(board.terrain_at(defender_pos))).max(MIN_DAMAGE)
}

/// 結算一次攻擊：扣血、標記攻擊者已行動、擊殺時移除防守方
pub fn resolve_attack(
    board: &Board,
    roster: &mut Roster,
    attacker_id: &str,
    defender_id: &str,
) -> Result<AttackOutcome, Error> {
    let func = "resolve_attack";

    let atk = roster
        .get(attacker_id)
        .map(|u| u.def.atk)
        .ok_or_else(|| Error::UnitNotFound {
            func,
            unit_id: attacker_id.to_string(),
        })?;
    let defender = roster
        .get_mut(defender_id)
        .ok_or_else(|| Error::UnitNotFound {
            func,
            unit_id: defender_id.to_string(),
        })?;

    let damage = damage_against(board, atk, defender.pos);
    defender.hp -= damage;
    let remaining_hp = defender.hp;
    let killed = !defender.is_alive();
    let defender_was_hero = defender.is_hero();
    let defender_side = defender.side;

    if let Some(attacker) = roster.get_mut(attacker_id) {
        attacker.attacked = true;
    }
    if killed {
        roster.remove(defender_id);
    }
    // 同陣營仍有主帥時不算擊破
    let killed_hero = killed && defender_was_hero && roster.hero(defender_side).is_none();

    tracing::debug!(attacker_id, defender_id, damage, remaining_hp, killed, "attack resolved");
    Ok(AttackOutcome {
        attacker: attacker_id.to_string(),
        defender: defender_id.to_string(),
        damage,
        remaining_hp,
        killed,
        killed_hero,
    })
}

/// 結算一次治療：回復至多 heal 點，不超過最大生命
///
/// 治療者不具治療能力，或目標已滿血時不產生效果並回傳錯誤。
pub fn resolve_heal(
    roster: &mut Roster,
    healer_id: &str,
    target_id: &str,
) -> Result<HealOutcome, Error> {
    let func = "resolve_heal";

    let healer = roster.get(healer_id).ok_or_else(|| Error::UnitNotFound {
        func,
        unit_id: healer_id.to_string(),
    })?;
    let heal = healer.def.heal_amount().ok_or_else(|| Error::NotHealer {
        func,
        unit_id: healer_id.to_string(),
    })?;

    let target = roster
        .get_mut(target_id)
        .ok_or_else(|| Error::UnitNotFound {
            func,
            unit_id: target_id.to_string(),
        })?;
    if !target.is_wounded() {
        return Err(Error::TargetAtFullHp {
            func,
            target: target_id.to_string(),
        });
    }
    let before = target.hp;
    target.hp = (target.hp + heal).min(target.def.max_hp);
    let amount = target.hp - before;
    let hp = target.hp;

    if let Some(healer) = roster.get_mut(healer_id) {
        healer.attacked = true;
    }

    tracing::debug!(healer_id, target_id, amount, hp, "heal resolved");
    Ok(HealOutcome {
        healer: healer_id.to_string(),
        target: target_id.to_string(),
        amount,
        hp,
    })
}

/// 回合開始時，站在回復地形上的受傷單位回復固定量
pub fn apply_terrain_healing(board: &Board, roster: &mut Roster, side: Side) -> Vec<TerrainHeal> {
    let mut healed = Vec::new();
    for unit in roster.side_units_mut(side) {
        if special(board.terrain_at(unit.pos)) != Some(TerrainSpecial::PassiveHeal) {
            continue;
        }
        if !unit.is_wounded() {
            continue;
        }
        let before = unit.hp;
        unit.hp = (unit.hp + FORT_HEAL_AMOUNT).min(unit.def.max_hp);
        healed.push(TerrainHeal {
            unit: unit.id.clone(),
            pos: unit.pos,
            amount: unit.hp - before,
            hp: unit.hp,
        });
    }
    healed
}

/// 清除該陣營所有單位的移動／行動旗標
pub fn reset_turn_flags(roster: &mut Roster, side: Side) {
    for unit in roster.side_units_mut(side) {
        unit.reset_turn_flags();
    }
}
