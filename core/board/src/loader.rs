//! 棋盤載入器

use crate::core_types::{Board, Position};
use crate::error::{Context, LoadError, Result};
use crate::terrain::Terrain;
use std::collections::HashMap;

/// 從地圖列字串建立棋盤
///
/// 每列一個字串、每個字元一格地形（`P` `F` `M` `H` `R` `T`）。
///
/// ```text
/// PPRPP
/// PTRTP
/// PPRPP
/// ```
pub fn parse_terrain_rows<S: AsRef<str>>(rows: &[S]) -> Result<Board> {
    let mut grid = Vec::with_capacity(rows.len());
    for (y, row) in rows.iter().enumerate() {
        let mut line = Vec::new();
        for (x, symbol) in row.as_ref().trim().chars().enumerate() {
            let terrain = Terrain::from_symbol(symbol)
                .ok_or(LoadError::UnknownTerrainSymbol { symbol, x, y })?;
            line.push(terrain);
        }
        grid.push(line);
    }
    Board::from_rows(grid).context("地圖列")
}

/// 從 ASCII 格式載入棋盤
///
/// ASCII 格式：每行用空格分隔的符號
/// - `.` = 平地
/// - 單一地形符號（`P` `F` `M` `H` `R` `T`）= 該地形
/// - `標記:地形符號`（如 `a:T`）= 在該地形上的標記位置
/// - 其他字串（`a`、`e1` 等）= 平地上的標記位置
/// - 相同的標記會全部收集成 Vec
///
/// 返回：(棋盤, 標記映射)
///
/// 例如：
/// ```text
/// a . F
/// . H e
/// T . .
/// ```
pub fn load_from_ascii(ascii: &str) -> Result<(Board, HashMap<String, Vec<Position>>)> {
    let lines: Vec<&str> = ascii
        .lines()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect();

    if lines.is_empty() {
        return Err(LoadError::ParseError("棋盤為空".to_string()).into());
    }

    let mut grid = Vec::with_capacity(lines.len());
    let mut markers: HashMap<String, Vec<Position>> = HashMap::new();

    for (y, line) in lines.iter().enumerate() {
        let mut row = Vec::new();
        for (x, cell) in line.split_whitespace().enumerate() {
            let pos = Position { x, y };
            let (marker, terrain) = parse_cell(cell, pos)?;
            if let Some(marker) = marker {
                markers.entry(marker.to_string()).or_default().push(pos);
            }
            row.push(terrain);
        }
        grid.push(row);
    }

    let board = Board::from_rows(grid)?;
    Ok((board, markers))
}

// 解析單一 ASCII 格：回傳 (標記, 地形)
fn parse_cell(cell: &str, pos: Position) -> Result<(Option<&str>, Terrain)> {
    if cell == "." {
        return Ok((None, Terrain::Plain));
    }

    if let Some((marker, symbol)) = cell.split_once(':') {
        let mut chars = symbol.chars();
        let terrain = match (chars.next(), chars.next()) {
            (Some(c), None) => Terrain::from_symbol(c),
            _ => None,
        };
        let Some(terrain) = terrain else {
            return Err(LoadError::ParseError(format!("無法解析格子 '{cell}' 於 {pos}")).into());
        };
        if marker.is_empty() {
            return Err(LoadError::ParseError(format!("標記為空 '{cell}' 於 {pos}")).into());
        }
        return Ok((Some(marker), terrain));
    }

    let mut chars = cell.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        if let Some(terrain) = Terrain::from_symbol(c) {
            return Ok((None, terrain));
        }
    }
    Ok((Some(cell), Terrain::Plain))
}
