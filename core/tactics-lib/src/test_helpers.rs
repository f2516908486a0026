//! 測試輔助：以 ASCII 棋盤擺放單位
//!
//! ```text
//! a . F
//! . e:H .
//! ```
//! 標記名稱即單位 ID；同一標記出現多次時 ID 為 `標記#序號`。
use crate::*;
use board::loader::load_from_ascii;

pub struct ScenarioBuilder {
    ascii: String,
    units: Vec<(String, UnitDefinition, Side)>,
    hp: Vec<(UnitID, i32)>,
}

impl ScenarioBuilder {
    pub fn new(ascii: &str) -> Self {
        Self {
            ascii: ascii.to_string(),
            units: Vec::new(),
            hp: Vec::new(),
        }
    }

    /// 在標記位置放置單位；名冊順序即呼叫順序
    pub fn unit(mut self, marker: &str, def: UnitDefinition, side: Side) -> Self {
        self.units.push((marker.to_string(), def, side));
        self
    }

    /// 覆寫單位目前生命值
    pub fn hp(mut self, unit_id: &str, hp: i32) -> Self {
        self.hp.push((unit_id.to_string(), hp));
        self
    }

    pub fn build(self) -> (Board, Roster) {
        let (board, markers) = load_from_ascii(&self.ascii).expect("ASCII 棋盤格式錯誤");
        let mut roster = Roster::new();
        for (marker, def, side) in self.units {
            let positions = markers
                .get(&marker)
                .unwrap_or_else(|| panic!("找不到標記 {marker}"));
            for (index, &pos) in positions.iter().enumerate() {
                let id = if positions.len() == 1 {
                    marker.clone()
                } else {
                    format!("{marker}#{index}")
                };
                roster
                    .insert(UnitInstance::new(id, side, pos, def.clone()))
                    .expect("單位擺放衝突");
            }
        }
        for (unit_id, hp) in self.hp {
            roster
                .get_mut(&unit_id)
                .unwrap_or_else(|| panic!("找不到單位 {unit_id}"))
                .hp = hp;
        }
        (board, roster)
    }
}

fn definition(name: &str, role: Role, max_hp: i32, atk: i32) -> UnitDefinition {
    UnitDefinition {
        name: name.to_string(),
        role,
        sprite: None,
        placeholder: None,
        max_hp,
        atk,
        min_range: 1,
        max_range: 1,
        movement: 4,
        heal: None,
    }
}

pub fn hero() -> UnitDefinition {
    definition("Hero", Role::Hero, 30, 7)
}

pub fn soldier() -> UnitDefinition {
    definition("Soldier", Role::Soldier, 18, 5)
}

pub fn soldier_with_atk(atk: i32) -> UnitDefinition {
    UnitDefinition { atk, ..soldier() }
}

pub fn soldier_with_max_hp(max_hp: i32) -> UnitDefinition {
    UnitDefinition { max_hp, ..soldier() }
}

pub fn guardian() -> UnitDefinition {
    UnitDefinition {
        movement: 3,
        ..definition("ArmorKnight", Role::Guardian, 24, 5)
    }
}

pub fn archer() -> UnitDefinition {
    UnitDefinition {
        min_range: 2,
        max_range: 3,
        ..definition("Archer", Role::Ranged, 16, 5)
    }
}

pub fn cleric() -> UnitDefinition {
    cleric_with_heal(4)
}

pub fn cleric_with_heal(heal: i32) -> UnitDefinition {
    UnitDefinition {
        max_range: 2,
        heal: Some(heal),
        ..definition("Cleric", Role::Healer, 14, 2)
    }
}

/// 記錄所有回呼的觀察者
#[derive(Debug, Default)]
pub struct RecordingObserver {
    pub lines: Vec<String>,
    pub draws: usize,
    pub pauses: usize,
}

impl TurnObserver for RecordingObserver {
    fn log(&mut self, message: &str) {
        self.lines.push(message.to_string());
    }

    fn draw(&mut self) {
        self.draws += 1;
    }

    fn pause(&mut self) {
        self.pauses += 1;
    }
}
