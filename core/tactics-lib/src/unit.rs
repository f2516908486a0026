//! unit.rs：
//! - 定義陣營（Side）、職能（Role）、單位定義（UnitDefinition）與單位實體（UnitInstance）。
//! - 單位定義由資料檔載入（UnitRegistry），實體建立後複製一份定義，不再回查。
//! - 不負責戰鬥結算與範圍判定。
use crate::*;
use board::alias::{Distance, MovementCost};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum_macros::{Display, EnumIter};

/// 陣營
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
)]
pub enum Side {
    #[default]
    Blue,
    Red,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Blue => Side::Red,
            Side::Red => Side::Blue,
        }
    }

    /// 單位 ID 前綴（`P1-H`、`P2-3`）
    pub fn id_prefix(self) -> &'static str {
        match self {
            Side::Blue => "P1",
            Side::Red => "P2",
        }
    }
}

/// 職能，影響 AI 的站位評分
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum Role {
    /// 主帥，陣亡即敗北
    Hero,
    /// 護衛主帥的重裝單位
    Guardian,
    Ranged,
    Healer,
    #[default]
    Soldier,
}

/// 單位定義（資料檔中的一筆）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitDefinition {
    pub name: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub sprite: Option<String>,
    /// 無圖片時的顯示字元
    #[serde(default)]
    pub placeholder: Option<String>,
    pub max_hp: i32,
    #[serde(alias = "attack")]
    pub atk: i32,
    pub min_range: Distance,
    pub max_range: Distance,
    #[serde(alias = "move")]
    pub movement: MovementCost,
    #[serde(default)]
    pub heal: Option<i32>,
}

impl UnitDefinition {
    pub fn is_ranged(&self) -> bool {
        self.max_range >= 2
    }

    /// 治療量，未設定或非正值視為不具治療能力
    pub fn heal_amount(&self) -> Option<i32> {
        self.heal.filter(|&amount| amount > 0)
    }

    pub fn is_healer(&self) -> bool {
        self.heal_amount().is_some()
    }

    /// 顯示用字元：placeholder 優先，否則取名稱首字
    pub fn glyph(&self) -> char {
        self.placeholder
            .as_deref()
            .and_then(|s| s.chars().next())
            .or_else(|| self.name.chars().next())
            .unwrap_or('?')
    }

    pub fn validate(&self, unit_type: &str) -> Result<(), Error> {
        let func = "UnitDefinition::validate";
        let invalid = |detail: String| Error::InvalidUnitDefinition {
            func,
            unit_type: unit_type.to_string(),
            detail,
        };

        if self.max_hp <= 0 {
            return Err(invalid(format!("max_hp 必須為正，實際為 {}", self.max_hp)));
        }
        if self.atk < 0 {
            return Err(invalid(format!("atk 不可為負，實際為 {}", self.atk)));
        }
        if self.min_range < 1 || self.min_range > self.max_range {
            return Err(invalid(format!(
                "射程必須滿足 1 <= min <= max，實際為 {}..={}",
                self.min_range, self.max_range
            )));
        }
        if self.movement == 0 {
            return Err(invalid("movement 必須為正".to_string()));
        }
        if let Some(heal) = self.heal {
            if heal <= 0 {
                return Err(invalid(format!("heal 必須為正，實際為 {heal}")));
            }
        }
        Ok(())
    }
}

/// 戰場上的單位實體
#[derive(Debug, Clone, PartialEq)]
pub struct UnitInstance {
    pub id: UnitID,
    pub side: Side,
    pub pos: Position,
    pub hp: i32,
    pub def: UnitDefinition,
    /// 本回合已移動
    pub moved: bool,
    /// 本回合已攻擊或治療
    pub attacked: bool,
}

impl UnitInstance {
    /// 以滿血、旗標清空的狀態建立
    pub fn new(id: impl Into<UnitID>, side: Side, pos: Position, def: UnitDefinition) -> Self {
        Self {
            id: id.into(),
            side,
            pos,
            hp: def.max_hp,
            def,
            moved: false,
            attacked: false,
        }
    }

    pub fn is_hero(&self) -> bool {
        self.def.role == Role::Hero
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn is_wounded(&self) -> bool {
        self.hp < self.def.max_hp
    }

    pub fn reset_turn_flags(&mut self) {
        self.moved = false;
        self.attacked = false;
    }

    /// 比較生命比例 hp / max_hp，以整數交叉相乘避免浮點誤差
    pub fn hp_ratio_lower_than(&self, other: &UnitInstance) -> bool {
        i64::from(self.hp) * i64::from(other.def.max_hp)
            < i64::from(other.hp) * i64::from(self.def.max_hp)
    }
}

/// 依單位種類查詢定義
pub trait UnitTemplateGetter {
    fn get(&self, unit_type: &str) -> Option<&UnitDefinition>;
}

impl UnitTemplateGetter for BTreeMap<UnitTypeName, UnitDefinition> {
    fn get(&self, unit_type: &str) -> Option<&UnitDefinition> {
        BTreeMap::get(self, unit_type)
    }
}

/// 單位定義表，以單位種類為鍵
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitRegistry {
    definitions: BTreeMap<UnitTypeName, UnitDefinition>,
}

impl UnitRegistry {
    pub fn new(definitions: BTreeMap<UnitTypeName, UnitDefinition>) -> Result<Self, Error> {
        let registry = Self { definitions };
        registry.validate()?;
        Ok(registry)
    }

    /// 從 TOML 載入，每個單位種類一個 table
    ///
    /// ```toml
    /// [Archer]
    /// name = "Archer"
    /// role = "Ranged"
    /// max_hp = 16
    /// atk = 5
    /// min_range = 2
    /// max_range = 3
    /// movement = 4
    /// ```
    pub fn from_toml(text: &str) -> Result<Self, Error> {
        let definitions = toml::from_str(text).map_err(|e| Error::Deserialize {
            func: "UnitRegistry::from_toml",
            format: "TOML",
            reason: e.to_string(),
        })?;
        Self::new(definitions)
    }

    /// 從 JSON 物件載入，鍵為單位種類
    pub fn from_json(text: &str) -> Result<Self, Error> {
        let definitions = serde_json::from_str(text).map_err(|e| Error::Deserialize {
            func: "UnitRegistry::from_json",
            format: "JSON",
            reason: e.to_string(),
        })?;
        Self::new(definitions)
    }

    pub fn validate(&self) -> Result<(), Error> {
        for (unit_type, def) in &self.definitions {
            def.validate(unit_type)?;
        }
        Ok(())
    }

    pub fn get(&self, unit_type: &str) -> Option<&UnitDefinition> {
        self.definitions.get(unit_type)
    }

    pub fn contains(&self, unit_type: &str) -> bool {
        self.definitions.contains_key(unit_type)
    }

    pub fn types(&self) -> impl Iterator<Item = &UnitTypeName> {
        self.definitions.keys()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl UnitTemplateGetter for UnitRegistry {
    fn get(&self, unit_type: &str) -> Option<&UnitDefinition> {
        UnitRegistry::get(self, unit_type)
    }
}
