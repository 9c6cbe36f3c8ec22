//! Binary entrypoint for Soul Dungeon.
//!
//! Opens a terminal window by default. `--script <file>` replays commands
//! headlessly and prints every frame as text instead.
use std::{
    fs, io,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, anyhow};
use bracket_terminal::prelude::*;
use clap::Parser;
use log::{error, info};

use soul_dungeon::{
    GameConfig,
    data::BuiltinContent,
    game::Game,
    input::{InputSource, Keyboard, ScriptedInput},
    render::{Frame, RenderSurface, TerminalSurface, TextSurface},
    save::JsonSlotStore,
};

#[derive(Parser)]
#[command(name = "soul-dungeon")]
#[command(about = "A journey from rock bottom to glory through the dungeon of the mind")]
#[command(version)]
struct Cli {
    /// Directory for save_slot_<n>.json files
    #[arg(long)]
    save_dir: Option<PathBuf>,

    /// Seed for a reproducible journey
    #[arg(long)]
    seed: Option<u64>,

    /// JSON settings file; other flags override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Replay commands from a script instead of opening a window
    #[arg(long)]
    script: Option<PathBuf>,

    /// Verbose logging (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

struct SoulDungeonState {
    game: Game,
}

impl GameState for SoulDungeonState {
    fn tick(&mut self, ctx: &mut BTerm) {
        let command = Keyboard::new(ctx).next_command();
        if let Some(command) = command {
            if let Err(err) = self.game.handle(command) {
                error!("{err}");
                ctx.quit();
                return;
            }
        }
        if self.game.mode().is_finished() {
            ctx.quit();
            return;
        }
        let frame = Frame::capture(&self.game);
        if let Err(err) = TerminalSurface::new(ctx).present(&frame) {
            error!("drawing failed: {err}");
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(&cli)?;
    let store = JsonSlotStore::new(config.save_dir.clone());
    info!("saves live in {}", store.dir().display());
    let game = Game::new(config, Box::new(BuiltinContent::new()), Box::new(store))
        .context("the dungeon could not be laid out")?;

    match &cli.script {
        Some(path) => run_script(game, path),
        None => run_window(game),
    }
}

fn run_window(game: Game) -> Result<()> {
    let context = BTermBuilder::simple80x50()
        .with_title("Soul Dungeon")
        .build()
        .map_err(|err| anyhow!("terminal setup failed: {err}"))?;
    main_loop(context, SoulDungeonState { game }).map_err(|err| anyhow!("{err}"))
}

fn run_script(mut game: Game, path: &Path) -> Result<()> {
    let mut input = ScriptedInput::from_file(path)
        .with_context(|| format!("reading script {}", path.display()))?;
    info!("replaying {} commands from {}", input.remaining(), path.display());

    let mut surface = TextSurface::new(io::stdout().lock());
    surface.present(&Frame::capture(&game))?;
    while let Some(command) = input.next_command() {
        game.handle(command)?;
        surface.present(&Frame::capture(&game))?;
        if game.mode().is_finished() {
            break;
        }
    }
    info!("script finished on turn {} in {}", game.turn, game.mode().name());
    Ok(())
}

fn load_config(cli: &Cli) -> Result<GameConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => GameConfig::default(),
    };
    if let Some(dir) = &cli.save_dir {
        config.save_dir = dir.clone();
    }
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }
    Ok(config)
}

fn init_logging(verbosity: u8) {
    // The terminal UI owns the screen, so stay quiet unless asked.
    let level = match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}
