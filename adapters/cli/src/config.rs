use std::{fs, path::Path, time::Duration};

use anyhow::{bail, Context, Result};
use glam::Vec2;
use serde::Deserialize;
use wave_defence_core::TowerKind;
use wave_defence_simulation::SimulationConfig;
use wave_defence_system_tower_targeting::TargetPolicy;
use wave_defence_world::WorldConfig;

/// Settings for a headless run, read from a TOML file.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct GameConfig {
    /// Fixed simulation step in milliseconds.
    pub(crate) tick_interval_ms: u64,
    /// Ticks after which a run without an outcome is abandoned.
    pub(crate) max_ticks: u64,
    /// Health the goal starts with.
    pub(crate) goal_health: u32,
    /// Credits the player starts with.
    pub(crate) starting_credits: u32,
    /// Rule towers use to pick among several enemies in range.
    pub(crate) targeting: TargetPolicy,
    /// Towers the scripted player tries to build.
    pub(crate) placements: Vec<ScriptedPlacement>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 20,
            max_ticks: 30_000,
            goal_health: 100,
            starting_credits: 150,
            targeting: TargetPolicy::default(),
            placements: Vec::new(),
        }
    }
}

/// Tower the scripted player selects and clicks on a given tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ScriptedPlacement {
    /// Tick on which the tower is selected.
    pub(crate) tick: u64,
    /// Kind of tower to build.
    pub(crate) kind: TowerKind,
    /// Column of the tile the cursor points at.
    pub(crate) column: u32,
    /// Row of the tile the cursor points at.
    pub(crate) row: u32,
}

impl ScriptedPlacement {
    /// Cursor position at the centre of the targeted tile.
    pub(crate) fn cursor(&self, tile_length: f32) -> Vec2 {
        Vec2::new(
            (self.column as f32 + 0.5) * tile_length,
            (self.row as f32 + 0.5) * tile_length,
        )
    }
}

impl GameConfig {
    /// Reads and validates the configuration stored at `path`.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read game config at {}", path.display()))?;
        Self::from_toml(&contents)
            .with_context(|| format!("invalid game config at {}", path.display()))
    }

    /// Parses and validates a configuration from TOML text.
    pub(crate) fn from_toml(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents).context("failed to parse game config toml")?;
        if config.tick_interval_ms == 0 {
            bail!("tick_interval_ms must be positive");
        }
        if config.max_ticks == 0 {
            bail!("max_ticks must be positive");
        }
        Ok(config)
    }

    /// Fixed simulation step.
    pub(crate) fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Settings forwarded to the simulation.
    pub(crate) fn simulation_config(&self) -> SimulationConfig {
        SimulationConfig {
            world: WorldConfig {
                goal_health: self.goal_health,
                starting_credits: self.starting_credits,
            },
            targeting: self.targeting,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let config = GameConfig::from_toml("targeting = \"nearest\"").expect("partial config");

        assert_eq!(config.tick_interval(), Duration::from_millis(20));
        assert_eq!(config.max_ticks, 30_000);
        assert_eq!(config.targeting, TargetPolicy::Nearest);
        assert_eq!(
            config.simulation_config().world,
            WorldConfig {
                goal_health: 100,
                starting_credits: 150,
            }
        );
        assert!(config.placements.is_empty());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let error = GameConfig::from_toml("tick_rate = 5").expect_err("unknown key");

        assert!(format!("{error:#}").contains("tick_rate"));
    }

    #[test]
    fn zero_tick_interval_is_rejected() {
        assert!(GameConfig::from_toml("tick_interval_ms = 0").is_err());
    }

    #[test]
    fn placements_are_read_in_order() {
        let config = GameConfig::from_toml(
            r#"
                [[placements]]
                tick = 0
                kind = "bolt"
                column = 2
                row = 1

                [[placements]]
                tick = 40
                kind = "bubble"
                column = 4
                row = 3
            "#,
        )
        .expect("placements config");

        assert_eq!(config.placements.len(), 2);
        assert_eq!(config.placements[1].kind, TowerKind::Bubble);
        assert_eq!(config.placements[0].cursor(32.0), Vec2::new(80.0, 48.0));
    }

    #[test]
    fn bundled_config_parses() {
        let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/config.toml");

        let config = GameConfig::load(&path).expect("bundled config");

        assert_eq!(config.tick_interval_ms, 20);
        assert!(!config.placements.is_empty());
    }
}
