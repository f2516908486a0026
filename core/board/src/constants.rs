//! 遊戲常數定義

use crate::alias::{Coord, Distance, MovementCost};

/// 基礎移動成本（平地、道路）
pub const BASIC_MOVEMENT_COST: MovementCost = 1;

/// 堡壘於回合開始時的固定回復量
pub const FORT_HEAL_AMOUNT: i32 = 3;

/// 丘陵提供的射程加成
pub const HILL_RANGE_BONUS: Distance = 1;

/// 享有丘陵射程加成所需的最低基礎最大射程
pub const HILL_BONUS_MIN_BASE_RANGE: Distance = 2;

/// 預設地圖寬度
pub const DEFAULT_MAP_WIDTH: Coord = 8;

/// 預設地圖高度
pub const DEFAULT_MAP_HEIGHT: Coord = 8;
