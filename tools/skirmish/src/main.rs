//! 無介面對戰：AI 對 AI（或 AI 對待命方）直到分出勝負或達回合上限
mod observer;
mod render;

use anyhow::{Context, Result, bail};
use board::logic::generator::generate_board;
use clap::Parser;
use observer::ConsoleObserver;
use rand::SeedableRng;
use rand::rngs::StdRng;
use render::{render_board, render_roster};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tactics_lib::{
    Board, GameConfig, MapFile, Roster, Session, UnitRegistry, create_initial_units,
};

const DEFAULT_UNITS: &str = include_str!("../../../data/units.toml");
const DEFAULT_CONFIG: &str = include_str!("../../../data/game-config.toml");

/// 回合制戰棋無介面對戰
#[derive(Parser, Debug)]
#[command(name = "skirmish")]
#[command(about = "在終端機執行 AI 對戰並印出每個行動")]
struct Args {
    /// 遊戲設定檔（TOML），未指定時使用內建設定
    #[arg(long)]
    config: Option<PathBuf>,

    /// 單位定義檔（.toml 或 .json），未指定時使用內建定義
    #[arg(long)]
    units: Option<PathBuf>,

    /// 地圖檔（TOML），未指定時隨機生成
    #[arg(long)]
    map: Option<PathBuf>,

    /// 隨機種子
    #[arg(long)]
    seed: Option<u64>,

    /// 回合上限
    #[arg(long, default_value_t = 30)]
    max_turns: u32,

    /// AI 每個行動之後的停頓（毫秒）
    #[arg(long, default_value_t = 0)]
    delay_ms: u64,

    /// 只有設定中的 ai_side 行動，另一方待命
    #[arg(long)]
    idle_opponent: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing();

    let seed = args.seed.unwrap_or_else(rand::random);
    let mut rng = StdRng::seed_from_u64(seed);
    tracing::info!(seed, "skirmish started");

    let registry = load_registry(args.units.as_deref())?;
    let config = load_config(args.config.as_deref())?;
    config
        .validate(&registry)
        .context("遊戲設定驗證失敗")?;

    let (board, roster) = match &args.map {
        Some(path) => load_map(path, &config, &registry, &mut rng)?,
        None => {
            let board = generate_board(config.map_width, config.map_height, &config.map, &mut rng)?;
            let roster = create_initial_units(&config, &registry, &board, &mut rng)?;
            (board, roster)
        }
    };
    if args.idle_opponent && config.ai_side.is_none() {
        bail!("--idle-opponent 需要在設定中指定 ai_side");
    }

    let mut session = Session::new(board, roster, config.actions_per_turn, config.first_side);
    let mut observer = ConsoleObserver::new(Duration::from_millis(args.delay_ms));
    print!("{}", render_board(session.board(), session.roster()));

    while session.turn() <= args.max_turns {
        let side = session.active_side();
        println!("\n== 第 {} 回合：{} ==", session.turn(), side);

        let acts = !args.idle_opponent || config.ai_side == Some(side);
        if acts {
            let report = session.run_ai_turn(&mut observer)?;
            if observer.take_draws() > 0 {
                print!("{}", render_board(session.board(), session.roster()));
            }
            tracing::debug!(stop_reason = ?report.stop_reason, remaining = report.remaining_budget, "turn report");
        } else {
            println!("  {side} 待命");
        }

        if let Some(winner) = session.outcome() {
            println!("\n{winner} 擊破敵方主帥，獲勝");
            print!("{}", render_roster(session.roster()));
            return Ok(());
        }

        for heal in session.end_turn()? {
            println!("  {} 於堡壘 {} 回復 {}（HP {}）", heal.unit, heal.pos, heal.amount, heal.hp);
        }
    }

    println!("\n{} 回合內未分勝負", args.max_turns);
    print!("{}", render_roster(session.roster()));
    Ok(())
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_registry(path: Option<&Path>) -> Result<UnitRegistry> {
    let Some(path) = path else {
        return Ok(UnitRegistry::from_toml(DEFAULT_UNITS)?);
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("無法讀取單位定義 {}", path.display()))?;
    let registry = match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => UnitRegistry::from_json(&text)?,
        _ => UnitRegistry::from_toml(&text)?,
    };
    Ok(registry)
}

fn load_config(path: Option<&Path>) -> Result<GameConfig> {
    let text = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("無法讀取遊戲設定 {}", path.display()))?,
        None => DEFAULT_CONFIG.to_string(),
    };
    Ok(GameConfig::from_toml(&text)?)
}

/// 地圖檔沒有擺放單位時，依設定隨機配置
fn load_map(
    path: &Path,
    config: &GameConfig,
    registry: &UnitRegistry,
    rng: &mut StdRng,
) -> Result<(Board, Roster)> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("無法讀取地圖 {}", path.display()))?;
    let map = MapFile::from_toml(&text)?;
    let board = map.board()?;
    let roster = if map.units.is_empty() {
        create_initial_units(config, registry, &board, rng)?
    } else {
        map.roster(&board, registry)?
    };
    Ok((board, roster))
}
