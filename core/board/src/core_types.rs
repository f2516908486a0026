//! 基本資料類型定義

use crate::alias::{Coord, Distance};
use crate::error::{BoardError, Result};
use crate::terrain::Terrain;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 棋盤位置（座標）
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Position {
    pub x: Coord,
    pub y: Coord,
}

impl Position {
    pub const fn new(x: Coord, y: Coord) -> Self {
        Self { x, y }
    }

    /// 曼哈頓距離
    pub fn manhattan(self, other: Position) -> Distance {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// 棋盤：尺寸與地形格
///
/// 地形以列優先（row-major）儲存，生成或載入後不再變動。
/// 單位不嵌入棋盤，佔據狀態由呼叫端另外維護。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: Coord,
    height: Coord,
    tiles: Vec<Terrain>,
}

impl Board {
    /// 建立全平地棋盤
    pub fn new(width: Coord, height: Coord) -> Self {
        Self {
            width,
            height,
            tiles: vec![Terrain::Plain; width * height],
        }
    }

    /// 以逐列地形建立棋盤
    ///
    /// 每列寬度必須一致，且至少有一列一欄。
    pub fn from_rows(rows: Vec<Vec<Terrain>>) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.len());
        if height == 0 || width == 0 {
            return Err(BoardError::EmptyBoard.into());
        }

        let mut tiles = Vec::with_capacity(width * height);
        for (y, row) in rows.into_iter().enumerate() {
            if row.len() != width {
                return Err(BoardError::RaggedRow {
                    row: y,
                    expected: width,
                    found: row.len(),
                }
                .into());
            }
            tiles.extend(row);
        }

        Ok(Self {
            width,
            height,
            tiles,
        })
    }

    pub fn width(&self) -> Coord {
        self.width
    }

    pub fn height(&self) -> Coord {
        self.height
    }

    /// 位置是否在棋盤邊界內
    pub fn contains(&self, pos: Position) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    /// 查詢地形；超出邊界時視為平地，永不失敗
    pub fn terrain_at(&self, pos: Position) -> Terrain {
        if !self.contains(pos) {
            return Terrain::default();
        }
        self.tiles
            .get(pos.y * self.width + pos.x)
            .copied()
            .unwrap_or_default()
    }

    // 僅供生成器與載入器在建構階段使用
    pub(crate) fn set_terrain(&mut self, pos: Position, terrain: Terrain) -> Result<()> {
        if !self.contains(pos) {
            return Err(BoardError::OutOfBounds {
                x: pos.x,
                y: pos.y,
                width: self.width,
                height: self.height,
            }
            .into());
        }
        let idx = pos.y * self.width + pos.x;
        self.tiles[idx] = terrain;
        Ok(())
    }

    /// 依列優先順序列出所有位置
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Position { x, y }))
    }

    /// 轉回地圖檔格式（每列一個字串）
    pub fn to_symbol_rows(&self) -> Vec<String> {
        self.tiles
            .chunks(self.width.max(1))
            .map(|row| row.iter().map(|t| t.symbol()).collect())
            .collect()
    }
}
