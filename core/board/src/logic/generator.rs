//! 隨機地圖生成
//!
//! 1. 全部初始化為平地
//! 2. 南北貫穿一條道路
//! 3. 道路左右各放一座堡壘（地圖中央列）
//! 4. 其餘平地依機率散佈森林／丘陵／山地

use crate::alias::Coord;
use crate::core_types::{Board, Position};
use crate::error::{BoardError, Result};
use crate::terrain::Terrain;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// 平地轉為其他地形的機率（依序累加判定）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScatterWeights {
    pub forest: f64,
    pub hill: f64,
    pub mountain: f64,
}

impl Default for ScatterWeights {
    fn default() -> Self {
        Self {
            forest: 0.20,
            hill: 0.12,
            mountain: 0.12,
        }
    }
}

impl ScatterWeights {
    /// 各機率非負且總和不超過 1
    pub fn validate(&self) -> Result<()> {
        let values = [self.forest, self.hill, self.mountain];
        let valid = values.iter().all(|p| p.is_finite() && *p >= 0.0)
            && values.iter().sum::<f64>() <= 1.0;
        if !valid {
            return Err(BoardError::InvalidScatterWeights {
                forest: self.forest,
                hill: self.hill,
                mountain: self.mountain,
            }
            .into());
        }
        Ok(())
    }

    fn pick(&self, roll: f64) -> Option<Terrain> {
        let mut acc = 0.0;
        for (terrain, p) in [
            (Terrain::Forest, self.forest),
            (Terrain::Hill, self.hill),
            (Terrain::Mountain, self.mountain),
        ] {
            acc += p;
            if roll < acc {
                return Some(terrain);
            }
        }
        None
    }
}

/// 產生隨機地圖
///
/// 相同 seed 的 RNG 產生相同地圖。
pub fn generate_board<R: Rng>(
    width: Coord,
    height: Coord,
    weights: &ScatterWeights,
    rng: &mut R,
) -> Result<Board> {
    if width == 0 || height == 0 {
        return Err(BoardError::EmptyBoard.into());
    }
    weights.validate()?;

    let mut board = Board::new(width, height);

    // 道路：寬度足夠時落在 [2, width - 3]，否則取中央
    let road_x = if width >= 5 {
        rng.random_range(2..=width - 3)
    } else {
        width / 2
    };
    for y in 0..height {
        board.set_terrain(Position { x: road_x, y }, Terrain::Road)?;
    }

    // 堡壘：道路左右、中央列
    let fort_y = height / 2;
    for x in [road_x.checked_sub(1), Some(road_x + 1)]
        .into_iter()
        .flatten()
        .filter(|&x| x < width)
    {
        board.set_terrain(Position { x, y: fort_y }, Terrain::Fort)?;
    }

    // 散佈
    for pos in board.positions().collect::<Vec<_>>() {
        if board.terrain_at(pos) != Terrain::Plain {
            continue;
        }
        let roll: f64 = rng.random();
        if let Some(terrain) = weights.pick(roll) {
            board.set_terrain(pos, terrain)?;
        }
    }

    tracing::debug!(width, height, road_x, fort_y, "generated board");
    Ok(board)
}
