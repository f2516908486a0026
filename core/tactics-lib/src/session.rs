//! session.rs：回合控制與玩家行動
//!
//! 回合開始：堡壘回復 → 清除旗標 → 給予行動數。
//! 玩家行動都經過驗證，失敗時回傳錯誤且不改變任何狀態。
use crate::*;
use std::collections::BTreeSet;

#[derive(Debug, Clone)]
pub struct Session {
    board: Board,
    roster: Roster,
    actions_per_turn: ActionBudget,
    first_side: Side,
    active: Side,
    turn: u32,
    remaining: ActionBudget,
    winner: Option<Side>,
}

impl Session {
    /// 建立對局並開始 `first_side` 的第一回合
    pub fn new(board: Board, roster: Roster, actions_per_turn: ActionBudget, first_side: Side) -> Self {
        let mut session = Self {
            board,
            roster,
            actions_per_turn,
            first_side,
            active: first_side,
            turn: 1,
            remaining: 0,
            winner: None,
        };
        session.start_turn();
        session
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn active_side(&self) -> Side {
        self.active
    }

    /// 從 1 開始；雙方各行動一次算一回合
    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn remaining_actions(&self) -> ActionBudget {
        self.remaining
    }

    /// 勝方；主帥陣亡前為 `None`
    pub fn outcome(&self) -> Option<Side> {
        self.winner
    }

    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    /// 目前行動方的回合開始處理
    pub fn start_turn(&mut self) -> Vec<TerrainHeal> {
        let healed = apply_terrain_healing(&self.board, &mut self.roster, self.active);
        reset_turn_flags(&mut self.roster, self.active);
        self.remaining = self.actions_per_turn;
        tracing::info!(turn = self.turn, side = %self.active, healed = healed.len(), "turn started");
        healed
    }

    /// 結束目前行動方的回合，交給對手並開始其回合；對局結束後回傳錯誤
    pub fn end_turn(&mut self) -> Result<Vec<TerrainHeal>, Error> {
        self.ensure_running("Session::end_turn")?;
        self.active = self.active.opponent();
        if self.active == self.first_side {
            self.turn += 1;
        }
        Ok(self.start_turn())
    }

    /// 以 AI 執行目前行動方的回合，消耗本回合的行動數（不自動結束回合）
    pub fn run_ai_turn(&mut self, observer: &mut dyn TurnObserver) -> Result<AiTurnReport, Error> {
        let func = "Session::run_ai_turn";
        self.ensure_running(func)?;

        let report = run_ai_turn(&self.board, &mut self.roster, self.active, self.remaining, observer)
            .map_err(|e| Error::Wrap {
                func,
                source: Box::new(e),
            })?;
        self.remaining = report.remaining_budget;
        if let Some(winner) = report.winner {
            self.winner = Some(winner);
            tracing::info!(side = %winner, "hero defeated");
        }
        Ok(report)
    }

    /// 可移動格（高亮用）
    pub fn movement_highlight(&self, unit_id: &str) -> Result<BTreeSet<Position>, Error> {
        let unit = self.unit(unit_id, "Session::movement_highlight")?;
        if unit.moved {
            return Ok(BTreeSet::new());
        }
        Ok(movement_cells(&self.board, &self.roster, unit))
    }

    /// 可攻擊的敵方單位（高亮用）
    pub fn attack_highlight(&self, unit_id: &str) -> Result<Vec<UnitID>, Error> {
        let unit = self.unit(unit_id, "Session::attack_highlight")?;
        if unit.attacked {
            return Ok(Vec::new());
        }
        Ok(attack_targets(&self.board, &self.roster, unit)
            .into_iter()
            .map(|u| u.id.clone())
            .collect())
    }

    /// 可治療的友方單位（高亮用）
    pub fn heal_highlight(&self, unit_id: &str) -> Result<Vec<UnitID>, Error> {
        let unit = self.unit(unit_id, "Session::heal_highlight")?;
        if unit.attacked {
            return Ok(Vec::new());
        }
        Ok(heal_targets(&self.roster, unit)
            .into_iter()
            .map(|u| u.id.clone())
            .collect())
    }

    /// 玩家移動：目標必須在本回合可移動範圍內
    pub fn move_unit(&mut self, unit_id: &str, to: Position) -> Result<(), Error> {
        self.try_move_unit(unit_id, to)
            .inspect_err(|e| tracing::warn!(%e, "move_unit rejected"))
    }

    fn try_move_unit(&mut self, unit_id: &str, to: Position) -> Result<(), Error> {
        let func = "Session::move_unit";
        let unit = self.actor(unit_id, func)?;
        if unit.moved {
            return Err(Error::AlreadyMoved {
                func,
                unit_id: unit_id.to_string(),
            });
        }
        if !movement_cells(&self.board, &self.roster, unit).contains(&to) {
            return Err(Error::NotReachable { func, pos: to });
        }

        let from = unit.pos;
        self.roster.relocate(unit_id, to)?;
        if let Some(unit) = self.roster.get_mut(unit_id) {
            unit.moved = true;
        }
        self.remaining -= 1;
        tracing::info!(unit_id, %from, %to, "unit moved");
        Ok(())
    }

    /// 玩家攻擊
    pub fn attack(&mut self, attacker_id: &str, target_id: &str) -> Result<AttackOutcome, Error> {
        self.try_attack(attacker_id, target_id)
            .inspect_err(|e| tracing::warn!(%e, "attack rejected"))
    }

    fn try_attack(&mut self, attacker_id: &str, target_id: &str) -> Result<AttackOutcome, Error> {
        let func = "Session::attack";
        let attacker = self.actor(attacker_id, func)?;
        if attacker.attacked {
            return Err(Error::AlreadyActed {
                func,
                unit_id: attacker_id.to_string(),
            });
        }
        let target = self.unit(target_id, func)?;
        if target.side == attacker.side {
            return Err(Error::FriendlyTarget {
                func,
                target: target_id.to_string(),
            });
        }
        if !can_attack(&self.board, attacker, target) {
            return Err(Error::OutOfRange {
                func,
                unit_id: attacker_id.to_string(),
                target: target_id.to_string(),
            });
        }

        let side = attacker.side;
        let outcome = resolve_attack(&self.board, &mut self.roster, attacker_id, target_id)?;
        self.remaining -= 1;
        tracing::info!(attacker_id, target_id, damage = outcome.damage, killed = outcome.killed, "unit attacked");
        if outcome.killed_hero {
            self.winner = Some(side);
            tracing::info!(%side, "hero defeated");
        }
        Ok(outcome)
    }

    /// 玩家治療
    pub fn heal(&mut self, healer_id: &str, target_id: &str) -> Result<HealOutcome, Error> {
        self.try_heal(healer_id, target_id)
            .inspect_err(|e| tracing::warn!(%e, "heal rejected"))
    }

    fn try_heal(&mut self, healer_id: &str, target_id: &str) -> Result<HealOutcome, Error> {
        let func = "Session::heal";
        let healer = self.actor(healer_id, func)?;
        if healer.attacked {
            return Err(Error::AlreadyActed {
                func,
                unit_id: healer_id.to_string(),
            });
        }
        if !healer.def.is_healer() {
            return Err(Error::NotHealer {
                func,
                unit_id: healer_id.to_string(),
            });
        }
        let target = self.unit(target_id, func)?;
        if target.side != healer.side {
            return Err(Error::HostileTarget {
                func,
                target: target_id.to_string(),
            });
        }
        if !can_heal(healer, target) {
            return Err(Error::OutOfRange {
                func,
                unit_id: healer_id.to_string(),
                target: target_id.to_string(),
            });
        }
        if !target.is_wounded() {
            return Err(Error::TargetAtFullHp {
                func,
                target: target_id.to_string(),
            });
        }

        let outcome = resolve_heal(&mut self.roster, healer_id, target_id)?;
        self.remaining -= 1;
        tracing::info!(healer_id, target_id, amount = outcome.amount, "unit healed");
        Ok(outcome)
    }

    fn ensure_running(&self, func: &'static str) -> Result<(), Error> {
        match self.winner {
            Some(winner) => Err(Error::GameOver { func, winner }),
            None => Ok(()),
        }
    }

    fn unit(&self, unit_id: &str, func: &'static str) -> Result<&UnitInstance, Error> {
        self.roster.get(unit_id).ok_or_else(|| Error::UnitNotFound {
            func,
            unit_id: unit_id.to_string(),
        })
    }

    /// 能下指令的單位：對局未結束、仍有行動數、屬於目前行動方
    fn actor(&self, unit_id: &str, func: &'static str) -> Result<&UnitInstance, Error> {
        self.ensure_running(func)?;
        if self.remaining == 0 {
            return Err(Error::NoActionsLeft { func });
        }
        let unit = self.unit(unit_id, func)?;
        if unit.side != self.active {
            return Err(Error::NotYourTurn {
                func,
                unit_id: unit_id.to_string(),
                active: self.active,
            });
        }
        Ok(unit)
    }
}
