//! 型別別名

/// 座標分量
pub type Coord = usize;

/// 移動成本
pub type MovementCost = u32;

/// 曼哈頓距離
pub type Distance = usize;
