//! AI 回合的外部回呼：記錄訊息、重繪、節奏停頓
//!
//! 規則核心不直接輸出，也不自行等待；所有副作用由觀察者決定。

pub trait TurnObserver {
    fn log(&mut self, _message: &str) {}
    fn draw(&mut self) {}
    /// 兩個 AI 行動之間的停頓（真實計時或測試中立即返回）
    fn pause(&mut self) {}
}

/// 忽略所有回呼
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl TurnObserver for NullObserver {}
