//! AI 回合決策
//!
//! 每次迭代依序嘗試「治療 → 攻擊 → 移動」，執行第一個成功的行動並扣一次行動數。
//! 沒有敵人、行動數用盡、或一次迭代內沒有任何行動時結束。
use crate::*;
use board::logic::movement::orthogonal_neighbors;

mod scoring;

pub use scoring::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AiAction {
    Heal {
        healer: UnitID,
        target: UnitID,
        amount: i32,
        hp: i32,
    },
    Attack {
        attacker: UnitID,
        target: UnitID,
        damage: i32,
        remaining_hp: i32,
        killed: bool,
        killed_hero: bool,
    },
    Move {
        unit: UnitID,
        from: Position,
        to: Position,
        score: AIScore,
    },
}

impl AiAction {
    /// 戰鬥紀錄用的一行描述
    pub fn describe(&self) -> String {
        match self {
            AiAction::Heal {
                healer,
                target,
                amount,
                hp,
            } => format!("{healer} 治療 {target}，回復 {amount}（HP {hp}）"),
            AiAction::Attack {
                attacker,
                target,
                damage,
                remaining_hp,
                killed,
                ..
            } => {
                if *killed {
                    format!("{attacker} 攻擊 {target}，造成 {damage} 傷害，{target} 陣亡")
                } else {
                    format!("{attacker} 攻擊 {target}，造成 {damage} 傷害（HP {remaining_hp}）")
                }
            }
            AiAction::Move { unit, from, to, .. } => format!("{unit} 移動 {from} → {to}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiStopReason {
    BudgetExhausted,
    /// 本次迭代沒有任何可執行行動
    NoAction,
    NoEnemies,
    /// 擊殺敵方主帥
    HeroDefeated,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AiTurnReport {
    pub side: Side,
    pub actions: Vec<AiAction>,
    pub remaining_budget: ActionBudget,
    pub stop_reason: AiStopReason,
    pub winner: Option<Side>,
}

/// 執行 `side` 的 AI 回合，最多 `budget` 個行動
///
/// 每個行動後依序呼叫觀察者的 log、draw、pause。
pub fn run_ai_turn(
    board: &Board,
    roster: &mut Roster,
    side: Side,
    budget: ActionBudget,
    observer: &mut dyn TurnObserver,
) -> Result<AiTurnReport, Error> {
    let func = "run_ai_turn";

    let mut remaining = budget;
    let mut actions = Vec::new();
    let stop_reason = loop {
        if enemy_hero(roster, side).is_none() {
            break AiStopReason::NoEnemies;
        }
        if remaining == 0 {
            break AiStopReason::BudgetExhausted;
        }
        let action = match next_action(board, roster, side).map_err(|e| Error::Wrap {
            func,
            source: Box::new(e),
        })? {
            Some(action) => action,
            None => break AiStopReason::NoAction,
        };
        remaining -= 1;

        let line = action.describe();
        tracing::info!(%side, remaining, "{line}");
        observer.log(&line);
        observer.draw();
        observer.pause();

        let hero_killed = matches!(
            action,
            AiAction::Attack {
                killed_hero: true,
                ..
            }
        );
        actions.push(action);
        if hero_killed {
            break AiStopReason::HeroDefeated;
        }
    };

    let winner = (stop_reason == AiStopReason::HeroDefeated).then_some(side);
    tracing::info!(%side, actions = actions.len(), ?stop_reason, "ai turn finished");
    Ok(AiTurnReport {
        side,
        actions,
        remaining_budget: remaining,
        stop_reason,
        winner,
    })
}

/// 選出並執行一個行動
fn next_action(
    board: &Board,
    roster: &mut Roster,
    side: Side,
) -> Result<Option<AiAction>, Error> {
    if let Some((healer, target)) = select_heal(roster, side) {
        let outcome = resolve_heal(roster, &healer, &target)?;
        return Ok(Some(AiAction::Heal {
            healer,
            target,
            amount: outcome.amount,
            hp: outcome.hp,
        }));
    }

    if let Some((attacker, target)) = select_attack(board, roster, side) {
        let outcome = resolve_attack(board, roster, &attacker, &target)?;
        return Ok(Some(AiAction::Attack {
            attacker,
            target,
            damage: outcome.damage,
            remaining_hp: outcome.remaining_hp,
            killed: outcome.killed,
            killed_hero: outcome.killed_hero,
        }));
    }

    if let Some(plan) = select_move(board, roster, side) {
        roster.relocate(&plan.unit, plan.to)?;
        if let Some(unit) = roster.get_mut(&plan.unit) {
            unit.moved = true;
        }
        return Ok(Some(AiAction::Move {
            unit: plan.unit,
            from: plan.from,
            to: plan.to,
            score: plan.score,
        }));
    }

    Ok(None)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovePlan {
    pub unit: UnitID,
    pub from: Position,
    pub to: Position,
    pub score: AIScore,
}

/// 治療：主帥優先，其次生命比例最低者；同分取最先找到的組合
pub fn select_heal(roster: &Roster, side: Side) -> Option<(UnitID, UnitID)> {
    let mut best: Option<(&UnitInstance, &UnitInstance)> = None;
    for healer in roster.side_units(side).filter(|u| !u.attacked) {
        for target in heal_targets(roster, healer) {
            let better = match best {
                None => true,
                Some((_, current)) => inner::heal_priority_higher(target, current),
            };
            if better {
                best = Some((healer, target));
            }
        }
    }
    best.map(|(healer, target)| (healer.id.clone(), target.id.clone()))
}

/// 攻擊：選距離最近的（攻擊者, 目標）；同距離取名冊順序較前者
pub fn select_attack(board: &Board, roster: &Roster, side: Side) -> Option<(UnitID, UnitID)> {
    let mut best: Option<(&UnitInstance, &UnitInstance, usize)> = None;
    for attacker in roster.side_units(side).filter(|u| !u.attacked) {
        for target in attack_targets(board, roster, attacker) {
            let distance = attacker.pos.manhattan(target.pos);
            if best.is_none_or(|(_, _, d)| distance < d) {
                best = Some((attacker, target, distance));
            }
        }
    }
    best.map(|(attacker, target, _)| (attacker.id.clone(), target.id.clone()))
}

/// 移動：名冊中第一個尚未移動且有空鄰格的單位，走一格到評分最高的鄰格
///
/// 只看四方向鄰格，不計地形成本；同分取 `DIRECTIONS` 順序較前者。
pub fn select_move(board: &Board, roster: &Roster, side: Side) -> Option<MovePlan> {
    let own_hero = roster.hero(side).map(|u| u.pos);
    let enemy_hero = enemy_hero(roster, side).map(|u| u.pos);
    let enemies: Vec<Position> = roster.side_units(side.opponent()).map(|u| u.pos).collect();

    for unit in roster.side_units(side).filter(|u| !u.moved) {
        let ctx = ScoreContext {
            unit,
            own_hero,
            enemy_hero,
            enemies: &enemies,
        };
        let mut best: Option<(Position, AIScore)> = None;
        for cell in orthogonal_neighbors(board, unit.pos) {
            if roster.is_occupied(cell) {
                continue;
            }
            let score = score_cell(board, &ctx, cell);
            tracing::debug!(unit = %unit.id, %cell, score, "move candidate");
            if best.is_none_or(|(_, s)| score > s) {
                best = Some((cell, score));
            }
        }
        if let Some((to, score)) = best {
            return Some(MovePlan {
                unit: unit.id.clone(),
                from: unit.pos,
                to,
                score,
            });
        }
    }
    None
}

mod inner {
    use super::*;

    /// `candidate` 的治療優先度是否嚴格高於 `current`
    pub fn heal_priority_higher(candidate: &UnitInstance, current: &UnitInstance) -> bool {
        match (candidate.is_hero(), current.is_hero()) {
            (true, false) => true,
            (false, true) => false,
            _ => candidate.hp_ratio_lower_than(current),
        }
    }
}
