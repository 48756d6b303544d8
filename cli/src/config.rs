//! Optional TOML configuration for the terminal front-end.
//!
//! ```toml
//! seed = 42
//!
//! [board]
//! rows = 4
//! columns = 4
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use twenty48_core::{Coord, GameConfig};

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub seed: Option<u64>,
    pub board: BoardSection,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct BoardSection {
    pub rows: Coord,
    pub columns: Coord,
}

impl Default for BoardSection {
    fn default() -> Self {
        let config = GameConfig::default();
        Self {
            rows: config.rows,
            columns: config.columns,
        }
    }
}

impl CliConfig {
    /// Loads `path` when given, otherwise falls back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("Invalid config {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig::new(self.board.rows, self.board.columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config = CliConfig::parse("").unwrap();

        assert_eq!(config, CliConfig::default());
        assert_eq!(config.game_config(), GameConfig::default());
    }

    #[test]
    fn partial_board_section_keeps_other_defaults() {
        let config = CliConfig::parse("seed = 9\n[board]\nrows = 5\n").unwrap();

        assert_eq!(config.seed, Some(9));
        assert_eq!(config.game_config(), GameConfig::new(5, 4));
    }

    #[test]
    fn zero_sized_board_is_clamped() {
        let config = CliConfig::parse("[board]\nrows = 0\ncolumns = 0\n").unwrap();

        assert_eq!(config.game_config().size(), (1, 1));
    }

    #[test]
    fn malformed_config_is_an_error() {
        assert!(CliConfig::parse("[board]\nrows = \"four\"\n").is_err());
        assert!(CliConfig::load(Some(Path::new("/nonexistent/twenty48.toml"))).is_err());
    }
}
