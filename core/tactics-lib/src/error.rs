// 戰棋規則錯誤型別，攜帶 function name，支援來源錯誤巢狀
use crate::*;
use thiserror::Error;

/// 規則核心錯誤型別
#[derive(Debug, Error)]
pub enum Error {
    #[error("`{func}`: 單位 {unit_id} 不存在")]
    UnitNotFound { func: &'static str, unit_id: UnitID },

    #[error("`{func}`: 單位 {unit_id} 重複")]
    DuplicateUnit { func: &'static str, unit_id: UnitID },

    #[error("`{func}`: 缺少單位模板 {unit_type}")]
    MissingUnitTemplate {
        func: &'static str,
        unit_type: UnitTypeName,
    },

    #[error("`{func}`: 單位模板 {unit_type} 設定錯誤: {detail}")]
    InvalidUnitDefinition {
        func: &'static str,
        unit_type: UnitTypeName,
        detail: String,
    },

    #[error("`{func}`: 位置 {pos} 已被佔用")]
    PosOccupied { func: &'static str, pos: Position },

    #[error("`{func}`: 位置 {pos} 超出棋盤")]
    OutOfBoard { func: &'static str, pos: Position },

    #[error("`{func}`: 現在是 {active} 的回合，單位 {unit_id} 無法行動")]
    NotYourTurn {
        func: &'static str,
        unit_id: UnitID,
        active: Side,
    },

    #[error("`{func}`: 單位 {unit_id} 本回合已移動")]
    AlreadyMoved { func: &'static str, unit_id: UnitID },

    #[error("`{func}`: 單位 {unit_id} 本回合已行動")]
    AlreadyActed { func: &'static str, unit_id: UnitID },

    #[error("`{func}`: 目標 {pos} 不可到達")]
    NotReachable { func: &'static str, pos: Position },

    #[error("`{func}`: 目標 {target} 不在 {unit_id} 的範圍內")]
    OutOfRange {
        func: &'static str,
        unit_id: UnitID,
        target: UnitID,
    },

    #[error("`{func}`: 目標 {target} 為友方單位")]
    FriendlyTarget { func: &'static str, target: UnitID },

    #[error("`{func}`: 目標 {target} 為敵方單位")]
    HostileTarget { func: &'static str, target: UnitID },

    #[error("`{func}`: 單位 {unit_id} 不具治療能力")]
    NotHealer { func: &'static str, unit_id: UnitID },

    #[error("`{func}`: 目標 {target} 生命值已滿")]
    TargetAtFullHp { func: &'static str, target: UnitID },

    #[error("`{func}`: 行動次數不足")]
    NoActionsLeft { func: &'static str },

    #[error("`{func}`: 遊戲已結束，{winner} 獲勝")]
    GameOver { func: &'static str, winner: Side },

    #[error("`{func}`: 設定錯誤: {detail}")]
    InvalidConfig { func: &'static str, detail: String },

    #[error("`{func}`: {format} 反序列化失敗: {reason}")]
    Deserialize {
        func: &'static str,
        format: &'static str,
        reason: String,
    },

    #[error("`{func}`: 棋盤錯誤: {source}")]
    Board {
        func: &'static str,
        #[source]
        source: board::error::Error,
    },

    #[error("`{func}`: 包裝: {source}")]
    Wrap {
        func: &'static str,
        #[source]
        source: Box<Error>,
    },
}

pub fn root_error(err: &Error) -> &Error {
    let mut err = err;
    while let Error::Wrap { source, .. } = err {
        err = source.as_ref();
    }
    err
}
