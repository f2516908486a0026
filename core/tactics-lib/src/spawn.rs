//! spawn.rs：開局單位配置
//!
//! 每個陣營：主帥放在指定位置 → 主帥四鄰（隨機順序）放額外單位 → 不足時隨機空格補齊。
use crate::*;
use board::logic::movement::orthogonal_neighbors;
use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};

/// 新單位 ID：該陣營第一名主帥為 `<前綴>-H`，其餘為 `<前綴>-<該陣營目前單位數>`
pub fn next_unit_id(roster: &Roster, side: Side, role: Role) -> UnitID {
    let prefix = side.id_prefix();
    if role == Role::Hero && roster.hero(side).is_none() {
        format!("{prefix}-H")
    } else {
        format!("{prefix}-{}", roster.side_count(side))
    }
}

/// 依設定建立開局名冊，同一個 RNG 狀態產生相同配置
pub fn create_initial_units<R: Rng>(
    config: &GameConfig,
    registry: &impl UnitTemplateGetter,
    board: &Board,
    rng: &mut R,
) -> Result<Roster, Error> {
    let func = "create_initial_units";
    let template = |unit_type: &str| {
        registry
            .get(unit_type)
            .cloned()
            .ok_or_else(|| Error::MissingUnitTemplate {
                func,
                unit_type: unit_type.to_string(),
            })
    };
    let wrap = |e: Error| Error::Wrap {
        func,
        source: Box::new(e),
    };

    let mut roster = Roster::new();
    for setup in &config.initial.sides {
        let side = setup.side;
        if !board.contains(setup.hero) {
            return Err(Error::OutOfBoard {
                func,
                pos: setup.hero,
            });
        }
        let hero = template(setup.hero_type.as_str())?;
        roster
            .insert(UnitInstance::new(
                next_unit_id(&roster, side, Role::Hero),
                side,
                setup.hero,
                hero,
            ))
            .map_err(wrap)?;

        let wanted = setup.extra + 1;
        let mut adjacent = orthogonal_neighbors(board, setup.hero);
        adjacent.shuffle(rng);
        for pos in adjacent {
            if roster.side_count(side) >= wanted {
                break;
            }
            if roster.is_occupied(pos) {
                continue;
            }
            let def = pick_from_pool(config, &template, rng)?;
            let id = next_unit_id(&roster, side, def.role);
            roster
                .insert(UnitInstance::new(id, side, pos, def))
                .map_err(wrap)?;
        }

        while roster.side_count(side) < wanted {
            let free: Vec<Position> = board
                .positions()
                .filter(|&pos| !roster.is_occupied(pos))
                .collect();
            let Some(&pos) = free.choose(rng) else {
                return Err(Error::InvalidConfig {
                    func,
                    detail: format!("棋盤已滿，無法為 {side} 配置 {wanted} 個單位"),
                });
            };
            let def = pick_from_pool(config, &template, rng)?;
            let id = next_unit_id(&roster, side, def.role);
            roster
                .insert(UnitInstance::new(id, side, pos, def))
                .map_err(wrap)?;
        }

        tracing::debug!(%side, units = roster.side_count(side), "side spawned");
    }
    Ok(roster)
}

fn pick_from_pool<R: Rng>(
    config: &GameConfig,
    template: &impl Fn(&str) -> Result<UnitDefinition, Error>,
    rng: &mut R,
) -> Result<UnitDefinition, Error> {
    let unit_type = config
        .initial
        .random_pool
        .choose(rng)
        .ok_or_else(|| Error::InvalidConfig {
            func: "pick_from_pool",
            detail: "random_pool 為空".to_string(),
        })?;
    template(unit_type.as_str())
}
