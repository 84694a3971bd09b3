use std::fmt;
use std::path::Path;

use crate::error::ConfigError;
use crate::game::{COLS, ROWS};

/// Deepest search that can matter: one ply per empty cell.
pub const MAX_DEPTH: usize = ROWS * COLS;

/// Named search depths offered to human players.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Search settings for non-interactive play.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub depth: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig { depth: 6 }
    }
}

/// Depth used by each difficulty level.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DifficultyConfig {
    pub easy: usize,
    pub medium: usize,
    pub hard: usize,
}

impl Default for DifficultyConfig {
    fn default() -> Self {
        DifficultyConfig {
            easy: 3,
            medium: 5,
            hard: 7,
        }
    }
}

impl DifficultyConfig {
    pub fn depth(&self, difficulty: Difficulty) -> usize {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
        }
    }
}

/// Settings for a human-vs-AI game.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub difficulty: Difficulty,
    /// Human plays Red and moves first.
    pub human_first: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            difficulty: Difficulty::Medium,
            human_first: true,
        }
    }
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub search: SearchConfig,
    pub difficulty: DifficultyConfig,
    pub game: GameConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let depths = [
            ("search.depth", self.search.depth),
            ("difficulty.easy", self.difficulty.easy),
            ("difficulty.medium", self.difficulty.medium),
            ("difficulty.hard", self.difficulty.hard),
        ];
        for (name, depth) in depths {
            validate_depth(name, depth)?;
        }
        Ok(())
    }

    /// Depth for the configured difficulty.
    pub fn game_depth(&self) -> usize {
        self.difficulty.depth(self.game.difficulty)
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }
}

/// Check a depth given on the command line or in a file.
pub fn validate_depth(name: &str, depth: usize) -> Result<(), ConfigError> {
    if depth == 0 || depth > MAX_DEPTH {
        return Err(ConfigError::Validation(format!(
            "{name} must be in 1..={MAX_DEPTH}, got {depth}"
        )));
    }
    Ok(())
}
