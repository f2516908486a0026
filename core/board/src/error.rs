//! 錯誤處理系統
//!
//! 棋盤層的錯誤只發生在建構階段（地圖解析、生成參數驗證）；
//! 查詢類函式一律為全函式，不回傳錯誤。

use crate::alias::Coord;
use thiserror::Error as ThisError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// 頂層錯誤，包含原始錯誤和 context 鏈
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    contexts: Vec<String>,
}

/// 錯誤種類
#[derive(Debug, ThisError)]
pub enum ErrorKind {
    #[error(transparent)]
    Board(#[from] BoardError),
    #[error(transparent)]
    Load(#[from] LoadError),
}

/// 棋盤錯誤
#[derive(Debug, ThisError)]
pub enum BoardError {
    #[error("位置超出棋盤邊界: ({x}, {y}) 邊界 ({width}, {height})")]
    OutOfBounds {
        x: Coord,
        y: Coord,
        width: Coord,
        height: Coord,
    },
    #[error("棋盤為空")]
    EmptyBoard,
    #[error("第 {row} 列寬度為 {found}，應為 {expected}")]
    RaggedRow {
        row: Coord,
        expected: Coord,
        found: Coord,
    },
    #[error("地形散佈機率不合法: forest={forest} hill={hill} mountain={mountain}")]
    InvalidScatterWeights { forest: f64, hill: f64, mountain: f64 },
}

/// 格式載入錯誤
#[derive(Debug, ThisError)]
pub enum LoadError {
    #[error("解析失敗: {0}")]
    ParseError(String),
    #[error("未知的地形符號 '{symbol}' 於 ({x}, {y})")]
    UnknownTerrainSymbol { symbol: char, x: Coord, y: Coord },
}

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// 添加錯誤上下文，自動記錄呼叫位置
    #[track_caller]
    pub fn context<C: Into<String>>(mut self, context: C) -> Self {
        let loc = std::panic::Location::caller();
        let msg = format!("{} [{}:{}]", context.into(), loc.file(), loc.line());
        self.contexts.push(msg);
        self
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind)?;
        for ctx in &self.contexts {
            write!(f, "\n  {}", ctx)?;
        }
        Ok(())
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}

impl<E: Into<ErrorKind>> From<E> for Error {
    fn from(error: E) -> Self {
        Self {
            kind: error.into(),
            contexts: Vec::new(),
        }
    }
}

/// Result 擴展 trait，用於添加錯誤上下文
pub trait Context<T> {
    fn context<C: Into<String>>(self, context: C) -> Result<T>;
}

impl<T> Context<T> for Result<T> {
    #[track_caller]
    fn context<C: Into<String>>(self, context: C) -> Result<T> {
        let loc = std::panic::Location::caller();
        self.map_err(|e| {
            let mut e = e;
            e.contexts
                .push(format!("{} [{}:{}]", context.into(), loc.file(), loc.line()));
            e
        })
    }
}
