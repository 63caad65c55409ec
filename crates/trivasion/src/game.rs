//! Game shell: state transitions driven by UI commands
//!
//! Input is folded into [`InputState`], dispatched to the interfaces, and
//! only then are the commands staged by button callbacks applied. Nothing
//! mutates the component tree while it is being walked.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use game_ui::prelude::*;

use crate::config::{GameSettings, OPTION_ROWS};
use crate::level::{Level, Tower};
use crate::screens::{self, ScreenBuilder};

/// Intents staged by widget callbacks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiCommand {
    /// Start a fresh level
    StartGame,
    /// Move to another game state
    ChangeState(GameState),
    /// Pause or resume gameplay
    TogglePause,
    /// Toggle double speed
    ToggleFastForward,
    /// Pick a tower to place
    SelectTower(Tower),
    /// Step an options row
    CycleSetting {
        /// Settings key
        key: &'static str,
        /// Direction, usually 1 or -1
        step: i32,
    },
    /// Commit and save the staged settings
    ApplySettings,
    /// Leave the game
    Quit,
}

/// Top-level game state
pub struct Game {
    settings: GameSettings,
    pending: GameSettings,
    settings_path: String,
    fonts: Box<dyn TextRasterizer>,
    commands: CommandQueue<UiCommand>,
    interfaces: InterfaceManager,
    input: InputState,
    state: GameState,
    level: Level,
    towers: BTreeMap<(u32, u32), Tower>,
    selected_tower: Option<Tower>,
    fast_forward: bool,
    running: bool,
}

impl std::fmt::Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("state", &self.state)
            .field("level", &self.level)
            .field("selected_tower", &self.selected_tower)
            .field("running", &self.running)
            .finish_non_exhaustive()
    }
}

impl Game {
    /// Build every screen and open the menu
    pub fn new(settings: GameSettings, settings_path: impl Into<String>, fonts: Box<dyn TextRasterizer>) -> Result<Self> {
        let commands = CommandQueue::new();
        let level = Level::new(settings.waves, settings.difficulty);
        let interfaces = ScreenBuilder::new(fonts.as_ref(), &settings, &commands)
            .build_all(&level)
            .context("Failed to build interfaces")?;

        let mut game = Self {
            pending: settings.clone(),
            settings,
            settings_path: settings_path.into(),
            fonts,
            commands,
            interfaces,
            input: InputState::new(),
            state: GameState::Menu,
            level,
            towers: BTreeMap::new(),
            selected_tower: None,
            fast_forward: false,
            running: true,
        };
        game.enter(GameState::Menu);
        Ok(game)
    }

    /// Current state
    pub const fn state(&self) -> GameState {
        self.state
    }

    /// Level in progress
    pub const fn level(&self) -> &Level {
        &self.level
    }

    /// Committed settings
    pub const fn settings(&self) -> &GameSettings {
        &self.settings
    }

    /// Settings as edited in the options menu, not yet applied
    pub const fn pending_settings(&self) -> &GameSettings {
        &self.pending
    }

    /// Tower waiting to be placed
    pub const fn selected_tower(&self) -> Option<Tower> {
        self.selected_tower
    }

    /// Towers placed on the grid, by cell
    pub const fn towers(&self) -> &BTreeMap<(u32, u32), Tower> {
        &self.towers
    }

    /// Running at double speed
    pub const fn is_fast_forward(&self) -> bool {
        self.fast_forward
    }

    /// False once the player quits
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Every interface
    pub const fn interfaces(&self) -> &InterfaceManager {
        &self.interfaces
    }

    /// Process one frame of input, then apply the commands it staged
    pub fn frame(&mut self, events: &[InputEvent]) -> Result<()> {
        for event in events {
            self.handle_event(event);
        }
        for command in self.commands.drain() {
            self.apply(command)?;
        }
        self.input.end_frame();
        Ok(())
    }

    fn handle_event(&mut self, event: &InputEvent) {
        // key repeat arrives as further KeyDowns while the binding is still down
        let pause_edge = matches!(*event, InputEvent::KeyDown { key } if InputState::key_name(key) == Some("pause"))
            && !self.input.pause_pressed();
        self.input.handle_event(event);
        if *event == InputEvent::Quit {
            self.running = false;
            return;
        }
        if pause_edge && matches!(self.state, GameState::Play | GameState::Pause) {
            self.commands.send(UiCommand::TogglePause);
        }

        let consumed = self.interfaces.handle_event(event, &self.input);
        if let (true, GameState::Play, InputEvent::MouseButtonDown { position, .. }) = (consumed, self.state, *event) {
            self.place_selected(position);
        }
    }

    fn place_selected(&mut self, position: Point) {
        let Some(tower) = self.selected_tower else {
            return;
        };
        let Some(grid) = self.interfaces.interface(GameState::Play).grid() else {
            return;
        };
        let Some(coords) = grid.cell_at(position) else {
            return;
        };
        let clicked = grid
            .get_cell(coords)
            .is_some_and(|cell| cell.tile_state() == TileState::Active);
        if !clicked || self.towers.contains_key(&coords) {
            return;
        }

        if self.level.buy(tower) {
            log::info!("Placed {} tower at {:?}", tower.name(), coords);
            self.towers.insert(coords, tower);
            self.selected_tower = None;
            if let Err(e) = self.refresh_information() {
                log::error!("Failed to update the information panel: {}", e);
            }
        } else {
            log::warn!("Not enough credits for a {} tower", tower.name());
        }
    }

    /// Apply one staged command
    pub fn apply(&mut self, command: UiCommand) -> Result<()> {
        log::debug!("Applying {:?}", command);
        match command {
            UiCommand::StartGame => self.start_level()?,
            UiCommand::ChangeState(state) => self.enter(state),
            UiCommand::TogglePause => match self.state {
                GameState::Play => self.enter(GameState::Pause),
                GameState::Pause => self.enter(GameState::Play),
                GameState::Menu | GameState::End => {}
            },
            UiCommand::ToggleFastForward => self.toggle_fast_forward()?,
            UiCommand::SelectTower(tower) => {
                if self.level.credits() >= tower.cost() {
                    self.selected_tower = Some(tower);
                } else {
                    log::warn!("Cannot afford a {} tower ({} credits)", tower.name(), self.level.credits());
                }
            }
            UiCommand::CycleSetting { key, step } => self.cycle_setting(key, step)?,
            UiCommand::ApplySettings => self.apply_settings()?,
            UiCommand::Quit => self.running = false,
        }
        Ok(())
    }

    /// Lose `lives`, ending the level when none are left
    pub fn damage(&mut self, lives: u32) -> Result<()> {
        self.level.lose_lives(lives);
        self.refresh_information()?;
        if self.level.is_over() {
            self.enter(GameState::End);
        }
        Ok(())
    }

    /// Draw every visible interface
    pub fn render(&self, target: &mut dyn RenderTarget) {
        self.interfaces.render(target);
    }

    fn enter(&mut self, state: GameState) {
        self.interfaces.switch_to(state);
        if matches!(state, GameState::Pause | GameState::End) {
            // gameplay stays on screen under the overlay
            let play = self.interfaces.interface_mut(GameState::Play);
            play.show();
            play.deactivate();
        }
        log::info!("{:?} -> {:?}", self.state, state);
        self.state = state;
    }

    fn start_level(&mut self) -> Result<()> {
        self.level = Level::new(self.settings.waves, self.settings.difficulty);
        log::info!("Starting {} waves on {}", self.level.waves(), self.level.difficulty());
        self.towers.clear();
        self.selected_tower = None;
        self.fast_forward = false;
        let play = ScreenBuilder::new(self.fonts.as_ref(), &self.settings, &self.commands)
            .gameplay(&self.level)
            .context("Failed to build gameplay interface")?;
        self.interfaces.replace(GameState::Play, play);
        self.enter(GameState::Play);
        Ok(())
    }

    fn cycle_setting(&mut self, key: &str, step: i32) -> Result<()> {
        let Some(value) = self.pending.cycle(key, step) else {
            return Ok(());
        };
        let Some((option, _)) = OPTION_ROWS.iter().find(|(_, row_key)| *row_key == key) else {
            return Ok(());
        };
        let panel = self
            .interfaces
            .interface_mut(GameState::Menu)
            .find_mut(screens::OPTIONS_PANEL)
            .and_then(UINode::as_panel_mut)
            .context("Menu has no options panel")?;
        panel.set_text(&screens::selected_label_name(option), &value.to_string(), self.fonts.as_ref())?;
        Ok(())
    }

    fn apply_settings(&mut self) -> Result<()> {
        let rebuild = self.settings.display_changed(&self.pending);
        self.settings = self.pending.clone();
        self.settings
            .save_to_file(&self.settings_path)
            .with_context(|| format!("Failed to save settings to {}", self.settings_path))?;
        log::info!("Saved settings to {}", self.settings_path);

        if rebuild {
            self.interfaces = ScreenBuilder::new(self.fonts.as_ref(), &self.settings, &self.commands)
                .build_all(&self.level)
                .context("Failed to rebuild interfaces")?;
            self.enter(self.state);
        }
        Ok(())
    }

    fn toggle_fast_forward(&mut self) -> Result<()> {
        self.fast_forward = !self.fast_forward;
        log::info!("Fast forward {}", if self.fast_forward { "on" } else { "off" });
        let text = if self.fast_forward { "x2" } else { ">>" };
        let button = information_panel(&mut self.interfaces)?
            .find_mut(screens::FASTFORWARD_BUTTON)
            .and_then(UINode::as_button_mut)
            .context("Gameplay has no fast-forward button")?;
        button.set_text(text, self.fonts.as_ref())?;
        Ok(())
    }

    /// Rewrite lives, credits and wave progress from the level
    fn refresh_information(&mut self) -> Result<()> {
        let lines = [
            (screens::LIVES_LABEL, format!("Lives: {}", self.level.lives())),
            (screens::CREDITS_LABEL, format!("Credits: {}", self.level.credits())),
            (screens::WAVES_LABEL, format!("Wave: {}/{}", self.level.wave(), self.level.waves())),
        ];
        let panel = information_panel(&mut self.interfaces)?;
        for (label, text) in &lines {
            panel.set_text(label, text, self.fonts.as_ref())?;
        }
        Ok(())
    }
}

fn information_panel(interfaces: &mut InterfaceManager) -> Result<&mut UIPanel> {
    interfaces
        .interface_mut(GameState::Play)
        .find_mut(screens::INFORMATION_PANEL)
        .and_then(UINode::as_panel_mut)
        .context("Gameplay has no information panel")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(name: &str) -> Game {
        let path = std::env::temp_dir().join(name);
        Game::new(GameSettings::default(), path.to_str().unwrap(), Box::new(BlockFont)).unwrap()
    }

    fn centre_of(game: &Game, state: GameState, name: &str) -> Point {
        let element = game.interfaces().interface(state).find(name).unwrap().element();
        element.position() + element.size().to_vector() / 2
    }

    fn click(game: &mut Game, at: Point) {
        game.frame(&[InputEvent::MouseButtonDown { position: at, button: MouseButton::Left }]).unwrap();
        game.frame(&[InputEvent::MouseButtonUp { position: at, button: MouseButton::Left }]).unwrap();
    }

    #[test]
    fn test_starts_on_menu() {
        let game = game("trivasion_game_menu.toml");
        assert_eq!(game.state(), GameState::Menu);
        assert!(game.interfaces().interface(GameState::Menu).is_active());
        assert!(!game.interfaces().interface(GameState::Play).is_visible());
    }

    #[test]
    fn test_start_button_enters_play() {
        let mut game = game("trivasion_game_start.toml");
        let start = centre_of(&game, GameState::Menu, "Menu_Start_Button");
        click(&mut game, start);
        assert_eq!(game.state(), GameState::Play);
        assert!(!game.interfaces().interface(GameState::Menu).is_visible());
        assert!(game.interfaces().interface(GameState::Play).is_active());
    }

    #[test]
    fn test_pause_keeps_gameplay_visible() {
        let mut game = game("trivasion_game_pause.toml");
        game.apply(UiCommand::StartGame).unwrap();
        game.frame(&[InputEvent::KeyDown { key: KeyCode::Escape }]).unwrap();
        assert_eq!(game.state(), GameState::Pause);
        let play = game.interfaces().interface(GameState::Play);
        assert!(play.is_visible());
        assert!(!play.is_active());

        let resume = centre_of(&game, GameState::Pause, "Gamepause_Resume_Button");
        click(&mut game, resume);
        assert_eq!(game.state(), GameState::Play);
        assert!(game.interfaces().interface(GameState::Play).is_active());
    }

    #[test]
    fn test_resume_works_every_time() {
        let mut game = game("trivasion_game_resume.toml");
        game.apply(UiCommand::StartGame).unwrap();
        for _ in 0..2 {
            game.frame(&[InputEvent::KeyDown { key: KeyCode::Escape }]).unwrap();
            game.frame(&[InputEvent::KeyUp { key: KeyCode::Escape }]).unwrap();
            assert_eq!(game.state(), GameState::Pause);

            let resume = centre_of(&game, GameState::Pause, "Gamepause_Resume_Button");
            let button = game.interfaces().interface(GameState::Pause).find("Gamepause_Resume_Button").and_then(UINode::as_button).unwrap();
            assert_eq!(button.state(), ButtonState::Idle);
            click(&mut game, resume);
            assert_eq!(game.state(), GameState::Play);
        }
    }

    #[test]
    fn test_held_pause_key_toggles_once() {
        let mut game = game("trivasion_game_repeat.toml");
        game.apply(UiCommand::StartGame).unwrap();
        let down = InputEvent::KeyDown { key: KeyCode::Escape };
        game.frame(&[down]).unwrap();
        game.frame(&[down, down]).unwrap();
        assert_eq!(game.state(), GameState::Pause);

        game.frame(&[InputEvent::KeyUp { key: KeyCode::Escape }, down]).unwrap();
        assert_eq!(game.state(), GameState::Play);
    }

    #[test]
    fn test_fast_forward_relabels_button() {
        let mut game = game("trivasion_game_speed.toml");
        game.apply(UiCommand::StartGame).unwrap();
        let target = centre_of(&game, GameState::Play, screens::FASTFORWARD_BUTTON);
        click(&mut game, target);
        assert!(game.is_fast_forward());

        let label = |game: &Game| {
            let button = game.interfaces().interface(GameState::Play).find(screens::FASTFORWARD_BUTTON).and_then(UINode::as_button).unwrap();
            button.label().unwrap().content().to_string()
        };
        assert_eq!(label(&game), "x2");
        game.apply(UiCommand::ToggleFastForward).unwrap();
        assert!(!game.is_fast_forward());
        assert_eq!(label(&game), ">>");
    }

    #[test]
    fn test_cycle_updates_selected_label() {
        let mut game = game("trivasion_game_cycle.toml");
        let next = centre_of(&game, GameState::Menu, "Menu_Options_Waves_Next_Button");
        click(&mut game, next);

        assert_eq!(game.pending_settings().waves, 15);
        assert_eq!(game.settings().waves, 10);
        let label = game
            .interfaces()
            .interface(GameState::Menu)
            .find(&screens::selected_label_name("Waves"))
            .and_then(UINode::as_label)
            .unwrap();
        assert_eq!(label.content(), "15");
    }

    #[test]
    fn test_apply_resolution_rebuilds_screens() {
        let mut game = game("trivasion_game_apply.toml");
        game.apply(UiCommand::CycleSetting { key: "resolution", step: 1 }).unwrap();
        game.apply(UiCommand::ApplySettings).unwrap();

        assert_eq!(game.settings().resolution, (1280, 720));
        let play = game.interfaces().interface(GameState::Play);
        assert_eq!(play.grid().map(UIGrid::grid_size), Some((32, 18)));
        assert_eq!(game.state(), GameState::Menu);
        assert!(game.interfaces().interface(GameState::Menu).is_active());
        let _ = std::fs::remove_file(std::env::temp_dir().join("trivasion_game_apply.toml"));
    }

    #[test]
    fn test_damage_ends_level() {
        let mut game = game("trivasion_game_damage.toml");
        game.apply(UiCommand::StartGame).unwrap();
        game.damage(4).unwrap();
        let lives = game
            .interfaces()
            .interface(GameState::Play)
            .find(screens::LIVES_LABEL)
            .and_then(UINode::as_label)
            .unwrap();
        assert_eq!(lives.content(), "Lives: 6");

        game.damage(6).unwrap();
        assert_eq!(game.state(), GameState::End);
        assert!(game.interfaces().interface(GameState::Play).is_visible());
    }

    #[test]
    fn test_selected_tower_is_placed_on_click() {
        let mut game = game("trivasion_game_tower.toml");
        game.apply(UiCommand::StartGame).unwrap();
        let picker = centre_of(&game, GameState::Play, "Octagon_Tower_Picker");
        click(&mut game, picker);
        assert_eq!(game.selected_tower(), Some(Tower::Octagon));

        click(&mut game, Point::new(48, 48));
        assert_eq!(game.towers().get(&(1, 1)), Some(&Tower::Octagon));
        assert_eq!(game.level().credits(), 50);
        assert_eq!(game.selected_tower(), None);
        let credits = game
            .interfaces()
            .interface(GameState::Play)
            .find(screens::CREDITS_LABEL)
            .and_then(UINode::as_label)
            .unwrap();
        assert_eq!(credits.content(), "Credits: 50");
    }

    #[test]
    fn test_quit_event_stops_game() {
        let mut game = game("trivasion_game_quit.toml");
        game.frame(&[InputEvent::Quit]).unwrap();
        assert!(!game.is_running());
    }
}
