//! 棋盤核心
//!
//! - 地形（`terrain`）：移動成本、防禦加成與特殊效果
//! - 棋盤（`core_types::Board`）：尺寸與地形格，不存放單位
//! - 範圍計算（`logic`）：可移動範圍、攻擊距離判定、隨機地圖生成
//!
//! 本 crate 不知道「陣營」與「單位」，佔據狀態一律由呼叫端以閉包提供。

pub mod alias;
pub mod constants;
pub mod core_types;
pub mod error;
pub mod loader;
pub mod logic;
pub mod terrain;
