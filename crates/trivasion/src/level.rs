//! Level state and the play-field grid

use game_ui::prelude::*;

use crate::config::Difficulty;

/// Edge length of one play-field tile in pixels
pub const CELL_SIZE: u32 = 32;
/// Border width of one play-field tile in pixels
pub const CELL_BORDER: u32 = 1;
/// Lives at the start of a level
pub const STARTING_LIVES: u32 = 10;
/// Credits at the start of a level
pub const STARTING_CREDITS: u32 = 100;

/// Placeable tower kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tower {
    /// Cheapest tower
    Circle,
    /// Mid-range tower
    Square,
    /// Mid-range tower
    Hexagon,
    /// Most expensive tower
    Octagon,
}

impl Tower {
    /// Every tower, in picker order
    pub const ALL: [Tower; 4] = [Tower::Circle, Tower::Square, Tower::Hexagon, Tower::Octagon];

    /// Display name
    pub const fn name(self) -> &'static str {
        match self {
            Tower::Circle => "Circle",
            Tower::Square => "Square",
            Tower::Hexagon => "Hexagon",
            Tower::Octagon => "Octagon",
        }
    }

    /// Price in credits
    pub const fn cost(self) -> u32 {
        match self {
            Tower::Circle => 10,
            Tower::Square | Tower::Hexagon => 25,
            Tower::Octagon => 50,
        }
    }
}

/// One playthrough: wave progress, lives and credits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Level {
    waves: u32,
    difficulty: Difficulty,
    wave: u32,
    lives: u32,
    credits: u32,
}

impl Level {
    /// Start a level at wave 1
    pub const fn new(waves: u32, difficulty: Difficulty) -> Self {
        Self {
            waves,
            difficulty,
            wave: 1,
            lives: STARTING_LIVES,
            credits: STARTING_CREDITS,
        }
    }

    /// Total waves
    pub const fn waves(&self) -> u32 {
        self.waves
    }

    /// Difficulty
    pub const fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Current wave, starting at 1
    pub const fn wave(&self) -> u32 {
        self.wave
    }

    /// Remaining lives
    pub const fn lives(&self) -> u32 {
        self.lives
    }

    /// Available credits
    pub const fn credits(&self) -> u32 {
        self.credits
    }

    /// Whether the level is lost
    pub const fn is_over(&self) -> bool {
        self.lives == 0
    }

    /// Lose up to `amount` lives
    pub fn lose_lives(&mut self, amount: u32) {
        self.lives = self.lives.saturating_sub(amount);
    }

    /// Pay for `tower`; fails without charging when credits are short
    pub fn buy(&mut self, tower: Tower) -> bool {
        match self.credits.checked_sub(tower.cost()) {
            Some(left) => {
                self.credits = left;
                true
            }
            None => false,
        }
    }

    /// Cells across and down that fit the play area of `screen`
    ///
    /// The play area is the top-left eight tenths of the screen on each axis;
    /// the tower panel and information panel take the rest.
    pub fn grid_dimensions(screen: (u32, u32)) -> (u32, u32) {
        let play_width = screen.0 / 10 * 8;
        let play_height = screen.1 / 10 * 8;
        ((play_width / CELL_SIZE).max(1), (play_height / CELL_SIZE).max(1))
    }

    /// Fresh play-field grid for `screen`
    pub fn create_grid(&self, screen: (u32, u32)) -> UiResult<UIGrid> {
        UIGrid::new(
            "Level_Grid",
            Point::new(0, 0),
            Self::grid_dimensions(screen),
            Size::new(CELL_SIZE, CELL_SIZE)?,
            CELL_BORDER,
            Color::new(64, 64, 64),
        )
    }
}
