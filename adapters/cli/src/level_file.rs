use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::Deserialize;
use wave_defence_world::Level;

/// Level description as stored on disk.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct LevelFile {
    /// Display name of the level.
    pub(crate) name: String,
    /// Side length of one tile in world units.
    pub(crate) tile_length: f32,
    /// Tile codes, one grid row per line.
    pub(crate) layout: String,
}

impl LevelFile {
    /// Reads the level file stored at `path`.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read level file at {}", path.display()))?;
        Self::from_toml(&contents)
            .with_context(|| format!("invalid level file at {}", path.display()))
    }

    /// Parses a level description from TOML text.
    pub(crate) fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("failed to parse level toml")
    }

    /// Non-blank layout rows with surrounding whitespace removed.
    pub(crate) fn rows(&self) -> Vec<&str> {
        self.layout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect()
    }

    /// Validates the layout and builds the level.
    pub(crate) fn to_level(&self) -> Result<Level> {
        let rows = self.rows();
        Level::from_rows(rows.as_slice(), self.tile_length)
            .with_context(|| format!("level `{}` is invalid", self.name))
    }
}
