//! config.rs：遊戲設定與地圖檔
//!
//! 設定檔與地圖檔皆為 TOML；載入後立即驗證，錯誤一律回傳，不做修補。
use crate::*;
use board::alias::Coord;
use board::constants::{DEFAULT_MAP_HEIGHT, DEFAULT_MAP_WIDTH};
use board::logic::generator::ScatterWeights;
use board::loader::parse_terrain_rows;
use serde::{Deserialize, Serialize};

pub const DEFAULT_ACTIONS_PER_TURN: ActionBudget = 3;
pub const DEFAULT_HERO_TYPE: &str = "Hero";

/// 遊戲設定
///
/// ```toml
/// map_width = 8
/// map_height = 8
/// actions_per_turn = 3
/// ai_side = "Red"
///
/// [map]
/// forest = 0.2
///
/// [initial]
/// random_pool = ["Soldier", "Archer"]
///
/// [[initial.sides]]
/// side = "Blue"
/// hero = { x = 3, y = 7 }
/// extra = 3
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default = "default_map_width")]
    pub map_width: Coord,
    #[serde(default = "default_map_height")]
    pub map_height: Coord,
    #[serde(default = "default_actions_per_turn")]
    pub actions_per_turn: ActionBudget,
    /// 由 AI 操作的陣營；未設定時雙方皆由玩家操作
    #[serde(default)]
    pub ai_side: Option<Side>,
    #[serde(default)]
    pub first_side: Side,
    #[serde(default)]
    pub map: ScatterWeights,
    #[serde(default)]
    pub initial: InitialSetup,
}

/// 開局配置
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InitialSetup {
    /// 額外單位從中隨機抽取的單位種類
    #[serde(default)]
    pub random_pool: Vec<UnitTypeName>,
    #[serde(default)]
    pub sides: Vec<SideSetup>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SideSetup {
    pub side: Side,
    pub hero: Position,
    #[serde(default = "default_hero_type")]
    pub hero_type: UnitTypeName,
    /// 主帥以外的單位數
    #[serde(default)]
    pub extra: usize,
}

fn default_map_width() -> Coord {
    DEFAULT_MAP_WIDTH
}

fn default_map_height() -> Coord {
    DEFAULT_MAP_HEIGHT
}

fn default_actions_per_turn() -> ActionBudget {
    DEFAULT_ACTIONS_PER_TURN
}

fn default_hero_type() -> UnitTypeName {
    DEFAULT_HERO_TYPE.to_string()
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            map_width: DEFAULT_MAP_WIDTH,
            map_height: DEFAULT_MAP_HEIGHT,
            actions_per_turn: DEFAULT_ACTIONS_PER_TURN,
            ai_side: None,
            first_side: Side::Blue,
            map: ScatterWeights::default(),
            initial: InitialSetup::default(),
        }
    }
}

impl GameConfig {
    pub fn from_toml(text: &str) -> Result<Self, Error> {
        toml::from_str(text).map_err(|e| Error::Deserialize {
            func: "GameConfig::from_toml",
            format: "TOML",
            reason: e.to_string(),
        })
    }

    /// 檢查尺寸、行動數、地形機率與開局配置
    pub fn validate(&self, registry: &impl UnitTemplateGetter) -> Result<(), Error> {
        let func = "GameConfig::validate";
        let invalid = |detail: String| Error::InvalidConfig { func, detail };

        if self.map_width == 0 || self.map_height == 0 {
            return Err(invalid(format!(
                "地圖尺寸必須為正，實際為 {}x{}",
                self.map_width, self.map_height
            )));
        }
        if self.actions_per_turn == 0 {
            return Err(invalid("actions_per_turn 必須為正".to_string()));
        }
        self.map
            .validate()
            .map_err(|source| Error::Board { func, source })?;

        for unit_type in &self.initial.random_pool {
            let def = registry
                .get(unit_type)
                .ok_or_else(|| Error::MissingUnitTemplate {
                    func,
                    unit_type: unit_type.clone(),
                })?;
            if def.role == Role::Hero {
                return Err(invalid(format!("random_pool 不可包含主帥種類 {unit_type}")));
            }
        }

        let mut seen = Vec::new();
        for setup in &self.initial.sides {
            if seen.contains(&setup.side) {
                return Err(invalid(format!("陣營 {} 重複設定", setup.side)));
            }
            seen.push(setup.side);

            if setup.hero.x >= self.map_width || setup.hero.y >= self.map_height {
                return Err(Error::OutOfBoard {
                    func,
                    pos: setup.hero,
                });
            }
            let hero = registry
                .get(&setup.hero_type)
                .ok_or_else(|| Error::MissingUnitTemplate {
                    func,
                    unit_type: setup.hero_type.clone(),
                })?;
            if hero.role != Role::Hero {
                return Err(invalid(format!(
                    "主帥種類 {} 的職能不是 Hero",
                    setup.hero_type
                )));
            }
            if setup.extra > 0 && self.initial.random_pool.is_empty() {
                return Err(invalid(format!(
                    "陣營 {} 需要 {} 個額外單位，但 random_pool 為空",
                    setup.side, setup.extra
                )));
            }
        }
        Ok(())
    }
}

/// 地圖檔：地形列與選填的單位擺放
///
/// ```toml
/// rows = [
///     "PPRPP",
///     "PTRTP",
///     "PPRPP",
/// ]
///
/// [[units]]
/// type = "Hero"
/// side = "Blue"
/// x = 0
/// y = 0
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapFile {
    pub rows: Vec<String>,
    #[serde(default)]
    pub units: Vec<UnitPlacement>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitPlacement {
    /// 未指定時依陣營前綴自動編號
    #[serde(default)]
    pub id: Option<UnitID>,
    #[serde(rename = "type")]
    pub unit_type: UnitTypeName,
    pub side: Side,
    pub x: Coord,
    pub y: Coord,
}

impl MapFile {
    pub fn from_toml(text: &str) -> Result<Self, Error> {
        toml::from_str(text).map_err(|e| Error::Deserialize {
            func: "MapFile::from_toml",
            format: "TOML",
            reason: e.to_string(),
        })
    }

    pub fn board(&self) -> Result<Board, Error> {
        parse_terrain_rows(&self.rows).map_err(|source| Error::Board {
            func: "MapFile::board",
            source,
        })
    }

    /// 依擺放順序建立名冊
    pub fn roster(&self, board: &Board, registry: &impl UnitTemplateGetter) -> Result<Roster, Error> {
        let func = "MapFile::roster";
        let mut roster = Roster::new();
        for placement in &self.units {
            let pos = Position::new(placement.x, placement.y);
            if !board.contains(pos) {
                return Err(Error::OutOfBoard { func, pos });
            }
            let def = registry
                .get(&placement.unit_type)
                .ok_or_else(|| Error::MissingUnitTemplate {
                    func,
                    unit_type: placement.unit_type.clone(),
                })?;
            let id = match &placement.id {
                Some(id) => id.clone(),
                None => next_unit_id(&roster, placement.side, def.role),
            };
            roster
                .insert(UnitInstance::new(id, placement.side, pos, def.clone()))
                .map_err(|e| Error::Wrap {
                    func,
                    source: Box::new(e),
                })?;
        }
        Ok(roster)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const UNITS: &str = include_str!("../../../data/units.toml");
    const GAME: &str = include_str!("../../../data/game-config.toml");
    const MAP: &str = include_str!("../../../data/maps/crossing.toml");

    #[test]
    fn test_shipped_data_is_valid() {
        let registry = UnitRegistry::from_toml(UNITS).unwrap();
        let config = GameConfig::from_toml(GAME).unwrap();
        config.validate(&registry).unwrap();
        assert_eq!(config.initial.sides.len(), 2);

        let map = MapFile::from_toml(MAP).unwrap();
        let board = map.board().unwrap();
        let roster = map.roster(&board, &registry).unwrap();
        assert!(roster.hero(Side::Blue).is_some());
        assert!(roster.hero(Side::Red).is_some());
    }

    #[test]
    fn test_config_defaults() {
        let config = GameConfig::from_toml("").unwrap();
        assert_eq!(config.map_width, DEFAULT_MAP_WIDTH);
        assert_eq!(config.actions_per_turn, DEFAULT_ACTIONS_PER_TURN);
        assert_eq!(config.ai_side, None);
        assert_eq!(config.first_side, Side::Blue);
        assert_eq!(config.map, ScatterWeights::default());
    }

    #[test]
    fn test_config_validation_errors() {
        let registry = UnitRegistry::from_toml(UNITS).unwrap();
        let base = GameConfig::from_toml(GAME).unwrap();

        let mut config = base.clone();
        config.actions_per_turn = 0;
        assert!(matches!(config.validate(&registry), Err(Error::InvalidConfig { .. })));

        let mut config = base.clone();
        config.initial.sides[0].hero = Position::new(99, 0);
        assert!(matches!(config.validate(&registry), Err(Error::OutOfBoard { .. })));

        let mut config = base.clone();
        config.initial.random_pool.push("Dragon".to_string());
        assert!(matches!(
            config.validate(&registry),
            Err(Error::MissingUnitTemplate { unit_type, .. }) if unit_type == "Dragon"
        ));

        let mut config = base.clone();
        config.map.forest = 2.0;
        assert!(matches!(config.validate(&registry), Err(Error::Board { .. })));

        let mut config = base;
        config.initial.sides[0].hero_type = "Soldier".to_string();
        assert!(matches!(config.validate(&registry), Err(Error::InvalidConfig { .. })));
    }

    #[test]
    fn test_map_file_errors() {
        let registry = UnitRegistry::from_toml(UNITS).unwrap();

        let ragged = MapFile::from_toml(r#"rows = ["PPP", "PP"]"#).unwrap();
        assert!(matches!(ragged.board(), Err(Error::Board { .. })));

        let unknown = MapFile::from_toml(r#"rows = ["PXP"]"#).unwrap();
        assert!(unknown.board().is_err());

        let clash = MapFile::from_toml(
            r#"
rows = ["PPP"]

[[units]]
type = "Soldier"
side = "Blue"
x = 1
y = 0

[[units]]
type = "Soldier"
side = "Red"
x = 1
y = 0
"#,
        )
        .unwrap();
        let board = clash.board().unwrap();
        let err = clash.roster(&board, &registry).unwrap_err();
        assert!(matches!(root_error(&err), Error::PosOccupied { .. }));
    }

    #[test]
    fn test_map_file_auto_ids() {
        let registry = UnitRegistry::from_toml(UNITS).unwrap();
        let map = MapFile::from_toml(
            r#"
rows = ["PPPP"]

[[units]]
type = "Hero"
side = "Red"
x = 0
y = 0

[[units]]
type = "Soldier"
side = "Red"
x = 1
y = 0

[[units]]
id = "boss"
type = "Soldier"
side = "Red"
x = 2
y = 0
"#,
        )
        .unwrap();
        let board = map.board().unwrap();
        let roster = map.roster(&board, &registry).unwrap();
        let ids: Vec<_> = roster.iter().map(|u| u.id.as_str()).collect();
        assert_eq!(ids, ["P2-H", "P2-1", "boss"]);
    }

    #[test]
    fn test_map_file_second_hero_gets_numbered_id() {
        let registry = UnitRegistry::from_toml(UNITS).unwrap();
        let map = MapFile::from_toml(
            r#"
rows = ["PPP"]

[[units]]
type = "Hero"
side = "Blue"
x = 0
y = 0

[[units]]
type = "Hero"
side = "Blue"
x = 2
y = 0
"#,
        )
        .unwrap();
        let board = map.board().unwrap();
        let roster = map.roster(&board, &registry).unwrap();
        let ids: Vec<_> = roster.iter().map(|u| u.id.as_str()).collect();
        assert_eq!(ids, ["P1-H", "P1-1"]);
        assert!(roster.iter().all(|u| u.is_hero()));
    }
}
