//! 移動評分 = 地形分 + 戰術分
use crate::*;
use board::terrain::Terrain;

// 地形分
pub const FORT_HERO_SCORE: AIScore = 6;
pub const FORT_OTHER_SCORE: AIScore = 1;
pub const HILL_RANGED_SCORE: AIScore = 3;
pub const FOREST_COVER_SCORE: AIScore = 2;
pub const MOUNTAIN_PENALTY: AIScore = -3;

// 戰術分
pub const HERO_FORT_BONUS: AIScore = 5;
pub const GUARD_RETURN_SCORE: AIScore = 4;
pub const GUARD_PRESS_SCORE: AIScore = 2;
pub const RANGED_IDEAL_DISTANCE: AIScore = 2;
pub const RANGED_HILL_BONUS: AIScore = 2;
pub const HEALER_IDEAL_DISTANCE: AIScore = 2;
pub const HEALER_FOREST_BONUS: AIScore = 1;
pub const ADVANCE_SCORE: AIScore = 1;

/// 評分時需要的戰場摘要
#[derive(Debug, Clone, Copy)]
pub struct ScoreContext<'a> {
    pub unit: &'a UnitInstance,
    pub own_hero: Option<Position>,
    /// 敵方主帥，不在時為任一存活敵人
    pub enemy_hero: Option<Position>,
    pub enemies: &'a [Position],
}

pub fn score_cell(board: &Board, ctx: &ScoreContext, cell: Position) -> AIScore {
    terrain_score(board.terrain_at(cell), &ctx.unit.def) + tactical_score(board, ctx, cell)
}

/// 依單位能力對地形的偏好
pub fn terrain_score(terrain: Terrain, def: &UnitDefinition) -> AIScore {
    match terrain {
        Terrain::Fort if def.role == Role::Hero => FORT_HERO_SCORE,
        Terrain::Fort => FORT_OTHER_SCORE,
        Terrain::Hill if def.is_ranged() => HILL_RANGED_SCORE,
        Terrain::Forest if def.is_healer() || def.is_ranged() => FOREST_COVER_SCORE,
        Terrain::Mountain => MOUNTAIN_PENALTY,
        _ => 0,
    }
}

/// 依職能的站位偏好
///
/// - 主帥：遠離最近的敵人，偏好堡壘
/// - 護衛：離主帥太遠時回防，否則向敵方主帥推進
/// - 遠程：與敵方主帥保持 2 格，偏好丘陵
/// - 治療：與己方主帥保持 2 格，偏好森林
/// - 其他：向敵方主帥推進
pub fn tactical_score(board: &Board, ctx: &ScoreContext, cell: Position) -> AIScore {
    let unit = ctx.unit;
    let from = unit.pos;
    let terrain = board.terrain_at(cell);

    match unit.def.role {
        Role::Hero => {
            let keep_away = ctx
                .enemies
                .iter()
                .map(|&enemy| distance(enemy, cell))
                .min()
                .unwrap_or(0);
            let fort = if terrain == Terrain::Fort {
                HERO_FORT_BONUS
            } else {
                0
            };
            keep_away + fort
        }
        Role::Guardian => {
            let mut score = 0;
            if let Some(hero) = ctx.own_hero {
                if distance(from, hero) > 1 && distance(cell, hero) < distance(from, hero) {
                    score += GUARD_RETURN_SCORE;
                }
            }
            if let Some(target) = ctx.enemy_hero {
                if distance(cell, target) < distance(from, target) {
                    score += GUARD_PRESS_SCORE;
                }
            }
            score
        }
        Role::Healer => {
            let mut score = ctx
                .own_hero
                .map_or(0, |hero| -(distance(cell, hero) - HEALER_IDEAL_DISTANCE).abs());
            if terrain == Terrain::Forest {
                score += HEALER_FOREST_BONUS;
            }
            score
        }
        Role::Ranged => ranged_score(ctx, cell, terrain),
        Role::Soldier if unit.def.is_ranged() => ranged_score(ctx, cell, terrain),
        Role::Soldier => match ctx.enemy_hero {
            Some(target) if distance(cell, target) < distance(from, target) => ADVANCE_SCORE,
            _ => 0,
        },
    }
}

fn ranged_score(ctx: &ScoreContext, cell: Position, terrain: Terrain) -> AIScore {
    let mut score = ctx
        .enemy_hero
        .map_or(0, |target| -(distance(cell, target) - RANGED_IDEAL_DISTANCE).abs());
    if terrain == Terrain::Hill {
        score += RANGED_HILL_BONUS;
    }
    score
}

fn distance(a: Position, b: Position) -> AIScore {
    a.manhattan(b) as AIScore
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;

    fn context<'a>(roster: &'a Roster, unit: &'a UnitInstance, enemies: &'a [Position]) -> ScoreContext<'a> {
        ScoreContext {
            unit,
            own_hero: roster.hero(unit.side).map(|u| u.pos),
            enemy_hero: enemy_hero(roster, unit.side).map(|u| u.pos),
            enemies,
        }
    }

    #[test]
    fn test_terrain_score_table() {
        let cases = [
            (Terrain::Fort, hero(), FORT_HERO_SCORE),
            (Terrain::Fort, soldier(), FORT_OTHER_SCORE),
            (Terrain::Hill, archer(), HILL_RANGED_SCORE),
            (Terrain::Hill, soldier(), 0),
            (Terrain::Forest, cleric(), FOREST_COVER_SCORE),
            (Terrain::Forest, archer(), FOREST_COVER_SCORE),
            (Terrain::Forest, soldier(), 0),
            (Terrain::Mountain, hero(), MOUNTAIN_PENALTY),
            (Terrain::Road, soldier(), 0),
        ];
        for (i, (terrain, def, want)) in cases.into_iter().enumerate() {
            assert_eq!(terrain_score(terrain, &def), want, "Case {}", i);
        }
    }

    #[test]
    fn test_hero_keeps_away_and_likes_fort() {
        let (board, roster) = ScenarioBuilder::new(
            "
            . h T
            . . .
            . e .
            ",
        )
        .unit("h", hero(), Side::Blue)
        .unit("e", soldier(), Side::Red)
        .build();
        let h = roster.get("h").unwrap();
        let enemies = [Position::new(1, 2)];
        let ctx = context(&roster, h, &enemies);
        // 堡壘：距離 3 + 5 + 地形 6
        assert_eq!(score_cell(&board, &ctx, Position::new(2, 0)), 14);
        assert_eq!(score_cell(&board, &ctx, Position::new(0, 0)), 3);
        assert_eq!(score_cell(&board, &ctx, Position::new(1, 1)), 1);
        let plan = select_move(&board, &roster, Side::Blue).unwrap();
        assert_eq!(plan.to, Position::new(2, 0));
    }

    #[test]
    fn test_guardian_returns_to_hero() {
        let (board, roster) = ScenarioBuilder::new(
            "
            h . . g .
            . . . . .
            . . . . e
            ",
        )
        .unit("h", hero(), Side::Blue)
        .unit("g", guardian(), Side::Blue)
        .unit("e", hero(), Side::Red)
        .build();
        let g = roster.get("g").unwrap();
        let enemies = [Position::new(4, 2)];
        let ctx = context(&roster, g, &enemies);
        // 左：回防 +4
        assert_eq!(tactical_score(&board, &ctx, Position::new(2, 0)), GUARD_RETURN_SCORE);
        // 右／下：推進 +2
        assert_eq!(tactical_score(&board, &ctx, Position::new(4, 0)), GUARD_PRESS_SCORE);
        assert_eq!(tactical_score(&board, &ctx, Position::new(3, 1)), GUARD_PRESS_SCORE);
    }

    #[test]
    fn test_ranged_keeps_distance_two() {
        let (board, roster) = ScenarioBuilder::new(
            "
            . . . . .
            . r . . e
            . H . . .
            ",
        )
        .unit("r", archer(), Side::Blue)
        .unit("e", hero(), Side::Red)
        .build();
        let r = roster.get("r").unwrap();
        let enemies = [Position::new(4, 1)];
        let ctx = context(&roster, r, &enemies);
        // (2,1) 距離 2：0；(0,1) 距離 4：-2；(1,2) 丘陵距離 4：-2 + 2 + 3
        assert_eq!(score_cell(&board, &ctx, Position::new(2, 1)), 0);
        assert_eq!(score_cell(&board, &ctx, Position::new(0, 1)), -2);
        assert_eq!(score_cell(&board, &ctx, Position::new(1, 2)), 3);
    }

    #[test]
    fn test_healer_stays_near_hero() {
        let (board, roster) = ScenarioBuilder::new(
            "
            h . . c F
            ",
        )
        .unit("h", hero(), Side::Blue)
        .unit("c", cleric(), Side::Blue)
        .build();
        let c = roster.get("c").unwrap();
        let ctx = context(&roster, c, &[]);
        assert_eq!(score_cell(&board, &ctx, Position::new(2, 0)), 0);
        // 森林：距離 4 → -2，+1 戰術 +2 地形
        assert_eq!(score_cell(&board, &ctx, Position::new(4, 0)), 1);
    }

    #[test]
    fn test_soldier_advances_toward_enemy_hero() {
        let (board, roster) = ScenarioBuilder::new(
            "
            . s .
            . . .
            . e .
            ",
        )
        .unit("s", soldier(), Side::Blue)
        .unit("e", hero(), Side::Red)
        .build();
        let plan = select_move(&board, &roster, Side::Blue).unwrap();
        assert_eq!(plan.to, Position::new(1, 1));
        assert_eq!(plan.score, ADVANCE_SCORE);
    }
}
