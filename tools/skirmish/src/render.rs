//! 終端機文字繪製
//!
//! 地形以符號顯示（平地為 `.`），單位以字元顯示：藍方大寫、紅方小寫。
use board::terrain::Terrain;
use tactics_lib::{Board, Position, Roster, Side, UnitInstance};

pub fn unit_glyph(unit: &UnitInstance) -> char {
    let glyph = unit.def.glyph();
    match unit.side {
        Side::Blue => glyph.to_ascii_uppercase(),
        Side::Red => glyph.to_ascii_lowercase(),
    }
}

pub fn render_board(board: &Board, roster: &Roster) -> String {
    let mut out = String::new();
    for y in 0..board.height() {
        let row: Vec<String> = (0..board.width())
            .map(|x| {
                let pos = Position::new(x, y);
                match roster.unit_at(pos) {
                    Some(unit) => unit_glyph(unit).to_string(),
                    None => match board.terrain_at(pos) {
                        Terrain::Plain => ".".to_string(),
                        terrain => terrain.symbol().to_string(),
                    },
                }
            })
            .collect();
        out.push_str(&row.join(" "));
        out.push('\n');
    }
    out
}

/// 單位狀態列表，依名冊順序
pub fn render_roster(roster: &Roster) -> String {
    roster
        .iter()
        .map(|unit| {
            format!(
                "{} {:<5} {:<12} HP {:>2}/{:<2} {}\n",
                unit_glyph(unit),
                unit.id,
                unit.def.name,
                unit.hp,
                unit.def.max_hp,
                unit.pos
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tactics_lib::test_helpers::*;

    #[test]
    fn test_render_board() {
        let (board, roster) = ScenarioBuilder::new(
            "
            h:T F .
            . M s
            ",
        )
        .unit("h", hero(), Side::Blue)
        .unit("s", soldier(), Side::Red)
        .build();
        assert_eq!(render_board(&board, &roster), "H F .\n. M s\n");
    }

    #[test]
    fn test_render_roster() {
        let (_, roster) = ScenarioBuilder::new("h s")
            .unit("h", hero(), Side::Blue)
            .unit("s", soldier(), Side::Red)
            .hp("s", 7)
            .build();
        let text = render_roster(&roster);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("H h"));
        assert!(lines[1].contains("HP  7/18"));
        assert!(lines[1].ends_with("(1, 0)"));
    }
}
