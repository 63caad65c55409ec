//! TriVasion headless session
//!
//! Loads the settings, builds every screen, plays a scripted session
//! through the real input path and writes a PNG snapshot per stage.

#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

mod config;
mod game;
mod level;
mod screens;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Arg, Command};
use game_ui::foundation::logging;
use game_ui::prelude::*;

use crate::config::GameSettings;
use crate::game::Game;
use crate::level::STARTING_LIVES;

const DEFAULT_SETTINGS_PATH: &str = "settings.toml";
const DEFAULT_OUTPUT_DIR: &str = "snapshots";

fn main() -> Result<()> {
    logging::init();

    let matches = Command::new("trivasion")
        .about("Runs a scripted TriVasion session and saves a snapshot of every screen")
        .arg(
            Arg::new("settings")
                .short('s')
                .long("settings")
                .value_name("FILE")
                .help("Settings file (.toml or .ron), created with defaults if missing")
                .default_value(DEFAULT_SETTINGS_PATH),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("DIR")
                .help("Output directory for snapshots")
                .default_value(DEFAULT_OUTPUT_DIR),
        )
        .arg(
            Arg::new("font")
                .short('f')
                .long("font")
                .value_name("FILE")
                .help("TTF/OTF font to rasterize text with (needs the fontdue feature)"),
        )
        .get_matches();

    let settings_path = matches
        .get_one::<String>("settings")
        .cloned()
        .unwrap_or_else(|| DEFAULT_SETTINGS_PATH.to_string());
    let output_dir = matches
        .get_one::<String>("output")
        .map_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR), PathBuf::from);

    let settings = GameSettings::load_or_create(&settings_path)
        .with_context(|| format!("Failed to load settings from {settings_path}"))?;
    log::info!("Loaded settings: {:?}", settings);

    let fonts = load_fonts(matches.get_one::<String>("font").map(Path::new))?;
    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;

    let mut game = Game::new(settings, settings_path, fonts)?;
    run_session(&mut game, &output_dir)?;

    log::info!("Session finished in {:?} with {} lives left", game.state(), game.level().lives());
    Ok(())
}

#[cfg(feature = "fontdue")]
fn load_fonts(path: Option<&Path>) -> Result<Box<dyn TextRasterizer>> {
    match path {
        Some(path) => {
            let bytes = std::fs::read(path).with_context(|| format!("Failed to read font {}", path.display()))?;
            Ok(Box::new(game_ui::ui::FontdueRasterizer::from_bytes(&bytes)?))
        }
        None => Ok(Box::new(BlockFont)),
    }
}

#[cfg(not(feature = "fontdue"))]
fn load_fonts(path: Option<&Path>) -> Result<Box<dyn TextRasterizer>> {
    if let Some(path) = path {
        log::warn!("Built without the fontdue feature; ignoring {}", path.display());
    }
    Ok(Box::new(BlockFont))
}

fn run_session(game: &mut Game, output_dir: &Path) -> Result<()> {
    snapshot(game, output_dir, "01_menu")?;

    let start = centre_of(game, GameState::Menu, "Menu_Start_Button")?;
    game.frame(&[InputEvent::MouseMotion { position: start }])?;
    snapshot(game, output_dir, "02_menu_hover")?;

    let next = centre_of(game, GameState::Menu, "Menu_Options_Waves_Next_Button")?;
    click(game, next)?;
    log::info!("Pending waves: {}", game.pending_settings().waves);
    snapshot(game, output_dir, "03_options")?;

    click(game, start)?;
    snapshot(game, output_dir, "04_play")?;

    let picker = centre_of(game, GameState::Play, "Circle_Tower_Picker")?;
    click(game, picker)?;
    log::debug!("Selected {:?}", game.selected_tower());
    click(game, Point::new(48, 48))?;
    log::info!("Towers placed: {:?}", game.towers());
    snapshot(game, output_dir, "05_tower")?;

    let speed = centre_of(game, GameState::Play, screens::FASTFORWARD_BUTTON)?;
    click(game, speed)?;
    log::info!("Fast forward: {}", game.is_fast_forward());

    game.frame(&[InputEvent::KeyDown { key: KeyCode::Escape }, InputEvent::KeyUp { key: KeyCode::Escape }])?;
    snapshot(game, output_dir, "06_pause")?;

    let resume = centre_of(game, GameState::Pause, "Gamepause_Resume_Button")?;
    click(game, resume)?;
    game.damage(STARTING_LIVES)?;
    snapshot(game, output_dir, "07_game_over")?;

    game.frame(&[InputEvent::Quit])?;
    anyhow::ensure!(!game.is_running(), "Session did not quit");
    Ok(())
}

fn click(game: &mut Game, position: Point) -> Result<()> {
    game.frame(&[InputEvent::MouseButtonDown { position, button: MouseButton::Left }])?;
    game.frame(&[InputEvent::MouseButtonUp { position, button: MouseButton::Left }])
}

fn centre_of(game: &Game, state: GameState, name: &str) -> Result<Point> {
    let node = game
        .interfaces()
        .interface(state)
        .find(name)
        .with_context(|| format!("No component '{name}' on the {state:?} screen"))?;
    let element = node.element();
    Ok(element.position() + element.size().to_vector() / 2)
}

fn snapshot(game: &Game, output_dir: &Path, stage: &str) -> Result<()> {
    let (width, height) = game.settings().resolution;
    let mut canvas = Canvas::new(Size::new(width, height)?);
    canvas.clear(Color::BLACK);
    game.render(&mut canvas);

    let path = output_dir.join(format!("{stage}.png"));
    canvas
        .save_png(&path)
        .with_context(|| format!("Failed to save {}", path.display()))?;
    log::info!("Saved {} ({:?})", path.display(), game.state());
    Ok(())
}
