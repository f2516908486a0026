//! 回合制戰棋規則核心
//!
//! - `unit` / `roster`：單位定義、單位實體與名冊
//! - `rules`：攻擊、治療、移動範圍判定（AI 與玩家共用）
//! - `battle`：傷害、治療、堡壘回復結算
//! - `ai`：AI 回合決策（治療 → 攻擊 → 移動）
//! - `session`：回合控制與玩家行動驗證
//! - `config` / `spawn`：資料載入與開局配置

mod ai;
mod battle;
mod config;
mod error;
mod observer;
mod roster;
mod rules;
mod session;
mod spawn;
mod unit;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

pub use ai::*;
pub use battle::*;
pub use config::*;
pub use error::*;
pub use observer::*;
pub use roster::*;
pub use rules::*;
pub use session::*;
pub use spawn::*;
pub use unit::*;

pub use board::core_types::{Board, Position};

pub type UnitID = String;
pub type UnitTypeName = String;
pub type AIScore = i32;
pub type ActionBudget = u32;
