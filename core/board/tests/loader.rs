//! 地圖載入測試

use board::core_types::Position;
use board::error::{ErrorKind, LoadError};
use board::loader::{load_from_ascii, parse_terrain_rows};
use board::terrain::Terrain;

#[test]
fn test_parse_terrain_rows() {
    let rows = ["PPRPP", "PTRTP", "FHRMP"];
    let board = parse_terrain_rows(&rows).unwrap();
    assert_eq!(board.width(), 5);
    assert_eq!(board.height(), 3);
    assert_eq!(board.terrain_at(Position::new(2, 0)), Terrain::Road);
    assert_eq!(board.terrain_at(Position::new(1, 1)), Terrain::Fort);
    assert_eq!(board.terrain_at(Position::new(0, 2)), Terrain::Forest);
    assert_eq!(board.terrain_at(Position::new(1, 2)), Terrain::Hill);
    assert_eq!(board.terrain_at(Position::new(3, 2)), Terrain::Mountain);
    assert_eq!(board.to_symbol_rows(), rows);
}

#[test]
fn test_parse_terrain_rows_errors() {
    let err = parse_terrain_rows(&["PPX"]).unwrap_err();
    assert!(matches!(
        err.kind(),
        ErrorKind::Load(LoadError::UnknownTerrainSymbol {
            symbol: 'X',
            x: 2,
            y: 0
        })
    ));

    assert!(parse_terrain_rows(&["PPP", "PP"]).is_err());
    assert!(parse_terrain_rows::<&str>(&[]).is_err());
}

#[test]
fn test_load_from_ascii_markers() {
    let ascii = r#"
a . F
. H b
a:T . .
"#;
    let (board, markers) = load_from_ascii(ascii).unwrap();
    assert_eq!(board.width(), 3);
    assert_eq!(board.height(), 3);
    assert_eq!(markers["a"], vec![Position::new(0, 0), Position::new(0, 2)]);
    assert_eq!(markers["b"], vec![Position::new(2, 1)]);
    assert_eq!(board.terrain_at(Position::new(2, 0)), Terrain::Forest);
    assert_eq!(board.terrain_at(Position::new(1, 1)), Terrain::Hill);
    assert_eq!(board.terrain_at(Position::new(0, 2)), Terrain::Fort);
    assert_eq!(board.terrain_at(Position::new(0, 0)), Terrain::Plain);
    assert!(!markers.contains_key("F"));
}

#[test]
fn test_load_from_ascii_errors() {
    assert!(load_from_ascii("   \n  ").is_err());
    assert!(load_from_ascii("a:X .").is_err());
    assert!(load_from_ascii(":T .").is_err());
    assert!(load_from_ascii(". .\n.").is_err());
}
