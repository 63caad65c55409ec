//! Screen builders
//!
//! Every screen is laid out in tenths of the current resolution ("tithes"),
//! so a resolution change means rebuilding every interface. Button callbacks
//! only stage [`UiCommand`]s; the game applies them after dispatch.

use game_ui::foundation::math::round_even;
use game_ui::prelude::*;
use game_ui::ui::widgets::ButtonCallback;

use crate::config::OPTION_ROWS;
use crate::game::UiCommand;
use crate::level::{Level, Tower};

/// Options panel on the menu screen
pub const OPTIONS_PANEL: &str = "Menu_Options_Panel";
/// Information panel on the gameplay screen
pub const INFORMATION_PANEL: &str = "Information_Panel";
/// Label showing remaining lives
pub const LIVES_LABEL: &str = "Lives_Label_Label";
/// Label showing available credits
pub const CREDITS_LABEL: &str = "Credits_Label_Label";
/// Label showing wave progress
pub const WAVES_LABEL: &str = "Waves_Label_Label";
/// Button toggling double speed
pub const FASTFORWARD_BUTTON: &str = "Fastforward_Button";

/// Name of the label holding the selected value of an option row
pub fn selected_label_name(option: &str) -> String {
    format!("Menu_Options_{option}_Selected_Label")
}

/// Builds the four game screens for one resolution
pub struct ScreenBuilder<'a> {
    fonts: &'a dyn TextRasterizer,
    settings: &'a dyn SettingsProvider,
    commands: CommandQueue<UiCommand>,
    screen: (u32, u32),
    tithe: (u32, u32),
}

impl<'a> ScreenBuilder<'a> {
    /// Builder for the resolution reported by `settings`
    pub fn new(
        fonts: &'a dyn TextRasterizer,
        settings: &'a dyn SettingsProvider,
        commands: &CommandQueue<UiCommand>,
    ) -> Self {
        let screen = settings.get_resolution();
        Self {
            fonts,
            settings,
            commands: commands.clone(),
            screen,
            tithe: (screen.0 / 10, screen.1 / 10),
        }
    }

    /// Every interface, keyed by game state
    pub fn build_all(&self, level: &Level) -> UiResult<InterfaceManager> {
        log::info!("Building interfaces for {}x{}", self.screen.0, self.screen.1);
        Ok(InterfaceManager::new(
            self.menu()?,
            self.gameplay(level)?,
            self.pause()?,
            self.game_over()?,
        ))
    }

    /// Title, options panel and start/quit buttons
    pub fn menu(&self) -> UiResult<Interface> {
        let title = self.title("Menu", "TriVasion!", Color::new(100, 100, 100), Color::WHITE, 64)?;
        let options = self.options_panel()?;
        let start = UIButton::quick_create(
            QuickButton {
                name: "Menu_Start_Button".to_string(),
                text: "Start Game".to_string(),
                position: self.tithes(8.0, 5.0),
                v_align: Alignment::End,
                min_size: self.tithe_size(1.0, 1.0),
                callback: Some(self.send(UiCommand::StartGame)),
                ..QuickButton::default()
            },
            self.fonts,
        )?;
        let quit = UIButton::quick_create(
            QuickButton {
                name: "Menu_Quit_Button".to_string(),
                text: "Quit Game".to_string(),
                position: self.tithes(8.0, 7.0),
                v_align: Alignment::Start,
                min_size: self.tithe_size(1.0, 1.0),
                callback: Some(self.send(UiCommand::Quit)),
                ..QuickButton::default()
            },
            self.fonts,
        )?;

        Ok(Interface::new(0).with_components(vec![
            title,
            options,
            UINode::Button(start),
            UINode::Button(quit),
        ]))
    }

    /// Tower picker, information panel and the level's play-field grid
    pub fn gameplay(&self, level: &Level) -> UiResult<Interface> {
        Ok(Interface::new(0)
            .with_components(vec![self.towers_panel()?, self.information_panel(level)?])
            .with_grid(level.create_grid(self.screen)?))
    }

    /// Translucent pause overlay
    pub fn pause(&self) -> UiResult<Interface> {
        self.overlay("Gamepause", "Game Paused", "Gamepause_Resume_Button", "Resume Game", UiCommand::ChangeState(GameState::Play))
    }

    /// Translucent game-over overlay
    pub fn game_over(&self) -> UiResult<Interface> {
        self.overlay("Gameover", "Game Over", "Gameover_Retry_Button", "Try Again", UiCommand::StartGame)
    }

    fn overlay(&self, prefix: &str, heading: &str, button: &str, label: &str, command: UiCommand) -> UiResult<Interface> {
        let background = UIPanel::new(
            format!("{prefix}_Background"),
            0,
            Point::new(0, 0),
            Size::new(self.screen.0, self.screen.1)?,
            Color::BLACK,
            128,
        )?;
        let title = self.title(prefix, heading, Color::new(64, 64, 64), Color::new(200, 200, 200), 50)?;
        let button = UIButton::quick_create(
            QuickButton {
                name: button.to_string(),
                priority: 1,
                text: label.to_string(),
                position: self.center(),
                padding: (10, 5),
                button_color: Color::new(0, 1, 0),
                callback: Some(self.send(command)),
                ..QuickButton::default()
            },
            self.fonts,
        )?;

        Ok(Interface::new(10).with_components(vec![UINode::Panel(background), title, UINode::Button(button)]))
    }

    fn title(&self, prefix: &str, text: &str, background: Color, text_color: Color, text_size: u32) -> UiResult<UINode> {
        let panel = UIPanel::create_text_box(
            TextBoxOptions {
                name: format!("{prefix}_Title"),
                priority: 1,
                text: text.to_string(),
                position: Point::new(round_even(f64::from(self.screen.0) / 2.0), self.tithes(0.0, 1.0).y),
                v_align: Alignment::Start,
                min_size: (self.screen.0, self.tithe.1),
                box_color: background,
                text_color,
                text_size,
                ..TextBoxOptions::default()
            },
            self.fonts,
        )?;
        Ok(UINode::Panel(panel))
    }

    fn options_panel(&self) -> UiResult<UINode> {
        let (width, height) = self.tithe_size(5.0, 6.0);
        let mut panel = UIPanel::new(OPTIONS_PANEL, 0, self.tithes(1.0, 3.0), Size::new(width, height)?, Color::new(255, 64, 64), 255)?;

        let title = UIPanel::create_text_box(
            TextBoxOptions {
                name: "Menu_Options_Panel_Title".to_string(),
                text: "Options".to_string(),
                position: self.tithes(2.5, 2.0),
                h_align: Alignment::Start,
                v_align: Alignment::Start,
                min_size: self.tithe_size(2.0, 1.0),
                box_color: Color::new(0, 0, 228),
                text_size: 42,
                ..TextBoxOptions::default()
            },
            self.fonts,
        )?;
        let save = UIButton::quick_create(
            QuickButton {
                name: "Menu_Options_Panel_Save".to_string(),
                text: "Save".to_string(),
                position: self.tithes(2.5, 9.0),
                h_align: Alignment::Start,
                v_align: Alignment::Start,
                min_size: self.tithe_size(2.0, 1.0),
                callback: Some(self.send(UiCommand::ApplySettings)),
                ..QuickButton::default()
            },
            self.fonts,
        )?;

        let mut children = vec![UINode::Panel(title), UINode::Button(save)];
        for (row, (option, key)) in (1..).zip(OPTION_ROWS) {
            children.push(self.options_row(option, key, row)?);
        }
        panel.add_children(children);
        Ok(UINode::Panel(panel))
    }

    fn options_row(&self, option: &str, key: &'static str, row: u32) -> UiResult<UINode> {
        let origin = self.tithes(1.0, f64::from(row + 2));
        let (width, height) = self.tithe_size(5.0, 1.0);
        let mut panel = UIPanel::new(
            format!("Menu_Options_{option}_Row"),
            0,
            origin,
            Size::new(width, height)?,
            Color::new(255, 0, 0),
            128,
        )?;

        let title = UIPanel::create_text_box(
            TextBoxOptions {
                name: format!("Menu_Options_{option}_Title"),
                priority: 1,
                text: format!("{option}:"),
                position: origin + self.tithes(1.0, 0.0),
                v_align: Alignment::Start,
                min_size: self.tithe_size(2.0, 1.0),
                box_color: Color::new(0, 0, 228),
                box_alpha: 128,
                text_size: 24,
                ..TextBoxOptions::default()
            },
            self.fonts,
        )?;
        let value = self
            .settings
            .get_setting(key)
            .map_or_else(|| option.to_string(), |value| value.to_string());
        let selected = UIPanel::create_text_box(
            TextBoxOptions {
                name: format!("Menu_Options_{option}_Selected"),
                priority: 1,
                text: value,
                position: origin + self.tithes(4.0, 0.0),
                v_align: Alignment::Start,
                min_size: self.tithe_size(1.0, 1.0),
                box_color: Color::new(0, 0, 228),
                box_alpha: 128,
                text_size: 16,
                ..TextBoxOptions::default()
            },
            self.fonts,
        )?;
        let previous = UIButton::quick_create(
            QuickButton {
                name: format!("Menu_Options_{option}_Previous_Button"),
                text: "<".to_string(),
                position: origin + self.tithes(3.0, 0.0),
                h_align: Alignment::Start,
                v_align: Alignment::Start,
                min_size: self.tithe_size(0.5, 1.0),
                callback: Some(self.send(UiCommand::CycleSetting { key, step: -1 })),
                ..QuickButton::default()
            },
            self.fonts,
        )?;
        let next = UIButton::quick_create(
            QuickButton {
                name: format!("Menu_Options_{option}_Next_Button"),
                text: ">".to_string(),
                position: origin + self.tithes(5.0, 0.0),
                h_align: Alignment::End,
                v_align: Alignment::Start,
                min_size: self.tithe_size(0.5, 1.0),
                callback: Some(self.send(UiCommand::CycleSetting { key, step: 1 })),
                ..QuickButton::default()
            },
            self.fonts,
        )?;

        panel.add_children(vec![
            UINode::Panel(title),
            UINode::Panel(selected),
            UINode::Button(previous),
            UINode::Button(next),
        ]);
        Ok(UINode::Panel(panel))
    }

    fn towers_panel(&self) -> UiResult<UINode> {
        let (width, height) = self.tithe_size(2.0, 8.0);
        let mut panel = UIPanel::new("Tower_Panel", 1, self.tithes(8.0, 0.0), Size::new(width, height)?, Color::BLACK, 255)?;

        let mut children = Vec::new();
        for (slot, tower) in (1_u32..).zip(Tower::ALL) {
            let slot = f64::from(slot);
            let picker = UIButton::quick_create(
                QuickButton {
                    name: format!("{}_Tower_Picker", tower.name()),
                    text: format!("{} Tower", tower.name()),
                    position: self.tithes(9.0, 2.0 * slot - 1.0),
                    min_size: self.tithe_size(1.0, 1.0),
                    text_size: 20,
                    callback: Some(self.send(UiCommand::SelectTower(tower))),
                    ..QuickButton::default()
                },
                self.fonts,
            )?;
            let cost = UIPanel::create_text_box(
                TextBoxOptions {
                    name: format!("{}_Tower_Cost", tower.name()),
                    text: format!("Cost: {}", tower.cost()),
                    position: self.tithes(9.0, 2.0 * slot),
                    v_align: Alignment::End,
                    min_size: self.tithe_size(1.0, 0.5),
                    box_color: Color::BLACK,
                    box_alpha: 128,
                    text_size: 24,
                    ..TextBoxOptions::default()
                },
                self.fonts,
            )?;
            children.push(UINode::Button(picker));
            children.push(UINode::Panel(cost));
        }
        panel.add_children(children);
        Ok(UINode::Panel(panel))
    }

    fn information_panel(&self, level: &Level) -> UiResult<UINode> {
        let (width, height) = self.tithe_size(10.0, 2.0);
        let mut panel = UIPanel::new(INFORMATION_PANEL, 1, self.tithes(0.0, 8.0), Size::new(width, height)?, Color::BLACK, 255)?;

        panel.add_children(vec![
            self.information_label("Lives_Label", &format!("Lives: {}", level.lives()), (0.0, 0.0), 3.0)?,
            self.information_label("Credits_Label", &format!("Credits: {}", level.credits()), (0.0, 1.0), 3.0)?,
            self.information_label("Waves_Label", &format!("Wave: {}/{}", level.wave(), level.waves()), (4.0, 1.0), 2.0)?,
            self.information_button("Playpause_Button", "||", (4.0, 0.0), 1.0, UiCommand::TogglePause)?,
            self.information_button(FASTFORWARD_BUTTON, ">>", (5.0, 0.0), 1.0, UiCommand::ToggleFastForward)?,
            self.information_button("Main_Menu_Button", "Main Menu", (7.0, 0.0), 3.0, UiCommand::ChangeState(GameState::Menu))?,
            self.information_button("Quit_Game_Button", "Quit Game", (7.0, 1.0), 3.0, UiCommand::Quit)?,
        ]);
        Ok(UINode::Panel(panel))
    }

    fn information_label(&self, name: &str, text: &str, (col, row): (f64, f64), width: f64) -> UiResult<UINode> {
        let panel = UIPanel::create_text_box(
            TextBoxOptions {
                name: name.to_string(),
                text: text.to_string(),
                position: self.tithes(col, row + 8.0),
                h_align: Alignment::Start,
                v_align: Alignment::Start,
                min_size: self.tithe_size(width, 1.0),
                box_color: Color::BLACK,
                text_size: 24,
                ..TextBoxOptions::default()
            },
            self.fonts,
        )?;
        Ok(UINode::Panel(panel))
    }

    fn information_button(&self, name: &str, text: &str, (col, row): (f64, f64), width: f64, command: UiCommand) -> UiResult<UINode> {
        let button = UIButton::quick_create(
            QuickButton {
                name: name.to_string(),
                text: text.to_string(),
                position: self.tithes(col, row + 8.0),
                h_align: Alignment::Start,
                v_align: Alignment::Start,
                min_size: self.tithe_size(width, 1.0),
                callback: Some(self.send(command)),
                ..QuickButton::default()
            },
            self.fonts,
        )?;
        Ok(UINode::Button(button))
    }

    fn send(&self, command: UiCommand) -> ButtonCallback {
        let commands = self.commands.clone();
        Box::new(move || commands.send(command))
    }

    fn center(&self) -> Point {
        Point::new(
            round_even(f64::from(self.screen.0) / 2.0),
            round_even(f64::from(self.screen.1) / 2.0),
        )
    }

    fn tithes(&self, x: f64, y: f64) -> Point {
        Point::new(
            round_even(f64::from(self.tithe.0) * x),
            round_even(f64::from(self.tithe.1) * y),
        )
    }

    fn tithe_size(&self, x: f64, y: f64) -> (u32, u32) {
        let point = self.tithes(x, y);
        (u32::try_from(point.x).unwrap_or(0), u32::try_from(point.y).unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameSettings;

    fn build(settings: &GameSettings) -> (InterfaceManager, CommandQueue<UiCommand>) {
        let queue = CommandQueue::new();
        let level = Level::new(settings.waves, settings.difficulty);
        let manager = ScreenBuilder::new(&BlockFont, settings, &queue).build_all(&level).unwrap();
        (manager, queue)
    }

    #[test]
    fn test_menu_layout() {
        let (manager, _) = build(&GameSettings::default());
        let menu = manager.interface(GameState::Menu);
        assert_eq!(menu.priority(), 0);

        let title = menu.find("Menu_Title").unwrap();
        assert_eq!(title.element().position(), Point::new(0, 60));
        assert_eq!(title.element().size().width(), 800);

        // six rows plus title and save
        let options = menu.find(OPTIONS_PANEL).and_then(UINode::as_panel).unwrap();
        assert_eq!(options.children().len(), 8);
        let waves = menu.find(&selected_label_name("Waves")).and_then(UINode::as_label).unwrap();
        assert_eq!(waves.content(), "10");
        let resolution = menu.find(&selected_label_name("Resolution")).and_then(UINode::as_label).unwrap();
        assert_eq!(resolution.content(), "800x600");

        // start button sits above its anchor, quit below
        let start = menu.get_component("Menu_Start_Button").unwrap();
        assert_eq!(start.element().boundaries().bottom, 300);
        let quit = menu.get_component("Menu_Quit_Button").unwrap();
        assert_eq!(quit.element().position().y, 420);
    }

    #[test]
    fn test_overlays_sit_above_gameplay() {
        let (manager, _) = build(&GameSettings::default());
        assert_eq!(manager.interface(GameState::Pause).priority(), 10);
        assert_eq!(manager.interface(GameState::End).priority(), 10);
        let background = manager.interface(GameState::Pause).get_component("Gamepause_Background").unwrap();
        assert_eq!(background.element().alpha(), 128);
        assert_eq!(background.element().size(), Size::new(800, 600).unwrap());

        let resume = manager.interface(GameState::Pause).get_component("Gamepause_Resume_Button").unwrap();
        let centre = resume.element().position() + resume.element().size().to_vector() / 2;
        assert_eq!(centre, Point::new(400, 300));
    }

    #[test]
    fn test_gameplay_has_grid_and_panels() {
        let (manager, _) = build(&GameSettings::default());
        let play = manager.interface(GameState::Play);
        assert_eq!(play.grid().map(UIGrid::grid_size), Some((20, 15)));
        let lives = play.find(LIVES_LABEL).and_then(UINode::as_label).unwrap();
        assert_eq!(lives.content(), "Lives: 10");
        let waves = play.find(WAVES_LABEL).and_then(UINode::as_label).unwrap();
        assert_eq!(waves.content(), "Wave: 1/10");
        assert!(play.find("Octagon_Tower_Picker").is_some());
        assert!(play.find("Octagon_Tower_Cost_Label").and_then(UINode::as_label).is_some_and(|l| l.content() == "Cost: 50"));
    }

    #[test]
    fn test_layout_scales_with_resolution() {
        let settings = GameSettings { resolution: (1600, 900), ..GameSettings::default() };
        let (manager, _) = build(&settings);
        let panel = manager.interface(GameState::Play).find(INFORMATION_PANEL).unwrap();
        assert_eq!(panel.element().position(), Point::new(0, 720));
        assert_eq!(panel.element().size(), Size::new(1600, 180).unwrap());
    }

    #[test]
    fn test_callbacks_only_stage_commands() {
        let (mut manager, queue) = build(&GameSettings::default());
        manager.switch_to(GameState::Menu);
        let quit = manager.interface(GameState::Menu).get_component("Menu_Quit_Button").unwrap();
        let target = quit.element().position() + Point::new(5, 5);

        let mut input = InputState::new();
        let click = InputEvent::MouseButtonDown { position: target, button: MouseButton::Left };
        input.handle_event(&click);
        assert!(manager.handle_event(&click, &input));
        assert_eq!(queue.drain(), vec![UiCommand::Quit]);
        assert!(manager.interface(GameState::Menu).is_visible());
    }
}
