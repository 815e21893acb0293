//! Game configuration: board radius, enabled expansions and move ceiling

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::board::{DEFAULT_BOARD_RADIUS, MAX_BOARD_RADIUS};
use crate::error::HiveError;
use crate::tiles::BugType;

/// Default number of moves (both sides counted) before a game is drawn
pub const DEFAULT_MAX_GAME_LENGTH: u32 = 1000;

/// Which expansion bugs take part in the game
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Expansions {
    pub mosquito: bool,
    pub ladybug: bool,
    pub pillbug: bool,
}

impl Expansions {
    pub const NONE: Expansions = Expansions { mosquito: false, ladybug: false, pillbug: false };
    pub const ALL: Expansions = Expansions { mosquito: true, ladybug: true, pillbug: true };

    /// Whether tiles of this bug type may enter play
    pub fn enables(self, bug: BugType) -> bool {
        match bug {
            BugType::Mosquito => self.mosquito,
            BugType::Ladybug => self.ladybug,
            BugType::Pillbug => self.pillbug,
            _ => true,
        }
    }

    /// Enabled bug types in catalog order
    pub fn bug_types(self) -> impl Iterator<Item = BugType> {
        BugType::ALL.into_iter().filter(move |&b| self.enables(b))
    }

    pub fn num_bug_types(self) -> usize {
        self.bug_types().count()
    }
}

impl Default for Expansions {
    fn default() -> Self {
        Expansions::ALL
    }
}

/// UHP game type string, e.g. `Base` or `Base+MLP`
impl fmt::Display for Expansions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Base")?;
        if *self == Expansions::NONE {
            return Ok(());
        }
        f.write_str("+")?;
        for (enabled, letter) in [(self.mosquito, 'M'), (self.ladybug, 'L'), (self.pillbug, 'P')] {
            if enabled {
                write!(f, "{}", letter)?;
            }
        }
        Ok(())
    }
}

impl FromStr for Expansions {
    type Err = HiveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || HiveError::UnknownGameType(s.to_string());

        let rest = s.strip_prefix("Base").ok_or_else(unknown)?;
        if rest.is_empty() {
            return Ok(Expansions::NONE);
        }
        let letters = rest.strip_prefix('+').ok_or_else(unknown)?;
        if letters.is_empty() {
            return Err(unknown());
        }

        let mut expansions = Expansions::NONE;
        for c in letters.chars() {
            let flag = match c {
                'M' => &mut expansions.mosquito,
                'L' => &mut expansions.ladybug,
                'P' => &mut expansions.pillbug,
                _ => return Err(unknown()),
            };
            if *flag {
                return Err(unknown());
            }
            *flag = true;
        }
        Ok(expansions)
    }
}

/// Configuration of a single game
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Hard limit on the distance of any tile from the origin
    pub board_radius: u8,
    pub expansions: Expansions,
    /// Move number at which the game is declared a draw
    pub max_game_length: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_radius: DEFAULT_BOARD_RADIUS,
            expansions: Expansions::ALL,
            max_game_length: DEFAULT_MAX_GAME_LENGTH,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), HiveError> {
        if self.board_radius == 0 || self.board_radius > MAX_BOARD_RADIUS {
            return Err(HiveError::InvalidRadius(self.board_radius));
        }
        if self.max_game_length == 0 {
            return Err(HiveError::InvalidConfig("max_game_length must be positive".to_string()));
        }
        Ok(())
    }

    /// Load from JSON; missing fields take their defaults
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: GameConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
