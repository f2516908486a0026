//! 地形定義與查表
//!
//! 所有數值皆為純資料，地形生成或載入後不再變動。

use crate::alias::MovementCost;
use crate::constants::BASIC_MOVEMENT_COST;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

/// 地形種類
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum Terrain {
    #[default]
    Plain,
    Forest,
    Mountain,
    Hill,
    Road,
    Fort,
}

/// 地形特殊效果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum TerrainSpecial {
    /// 遠程單位站上時射程 +1
    RangeBonus,
    /// 回合開始時回復己方單位
    PassiveHeal,
}

impl Terrain {
    /// 地圖檔使用的單字元符號
    pub fn symbol(self) -> char {
        match self {
            Terrain::Plain => 'P',
            Terrain::Forest => 'F',
            Terrain::Mountain => 'M',
            Terrain::Hill => 'H',
            Terrain::Road => 'R',
            Terrain::Fort => 'T',
        }
    }

    /// 由符號解析地形，未知符號回傳 `None`
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'P' => Some(Terrain::Plain),
            'F' => Some(Terrain::Forest),
            'M' => Some(Terrain::Mountain),
            'H' => Some(Terrain::Hill),
            'R' => Some(Terrain::Road),
            'T' => Some(Terrain::Fort),
            _ => None,
        }
    }
}

/// 進入該地形所需的移動成本（永遠為正）
pub fn movement_cost(t: Terrain) -> MovementCost {
    match t {
        Terrain::Plain => BASIC_MOVEMENT_COST,
        Terrain::Road => BASIC_MOVEMENT_COST,
        Terrain::Forest => BASIC_MOVEMENT_COST * 2,
        Terrain::Hill => BASIC_MOVEMENT_COST * 2,
        Terrain::Mountain => BASIC_MOVEMENT_COST * 3,
        Terrain::Fort => BASIC_MOVEMENT_COST,
    }
}

/// 站在該地形上時，受到的傷害減免
pub fn defense_bonus(t: Terrain) -> i32 {
    match t {
        Terrain::Plain | Terrain::Road => 0,
        Terrain::Forest | Terrain::Hill => 1,
        Terrain::Mountain => 2,
        Terrain::Fort => 3,
    }
}

pub fn special(t: Terrain) -> Option<TerrainSpecial> {
    match t {
        Terrain::Hill => Some(TerrainSpecial::RangeBonus),
        Terrain::Fort => Some(TerrainSpecial::PassiveHeal),
        _ => None,
    }
}
