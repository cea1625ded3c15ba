#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Wave Defence adapters.

use anyhow::Result as AnyResult;
use glam::Vec2;
use std::time::Duration;
use wave_defence_core::{EnemyKind, ProjectileKind, TileKind, TowerKind};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Untinted sprite colour.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    /// Tint applied to previews that cannot be placed.
    pub const RED: Self = Self::new(1.0, 0.0, 0.0, 1.0);

    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Returns a new color lightened towards white by the provided amount.
    #[must_use]
    pub fn lighten(self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);

        Self {
            red: lighten_channel(self.red, amount),
            green: lighten_channel(self.green, amount),
            blue: lighten_channel(self.blue, amount),
            alpha: self.alpha,
        }
    }

    /// Returns the same color with a replaced alpha channel.
    #[must_use]
    pub const fn with_alpha(self, alpha: f32) -> Self {
        Self { alpha, ..self }
    }
}

fn lighten_channel(channel: f32, amount: f32) -> f32 {
    channel + (1.0 - channel) * amount
}

/// Identifies the artwork a backend should draw for a drawable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpriteKey {
    /// Terrain tile.
    Tile(TileKind),
    /// Walking enemy.
    Enemy(EnemyKind),
    /// Placed or previewed tower.
    Tower(TowerKind),
    /// Projectile in flight.
    Projectile(ProjectileKind),
}

impl SpriteKey {
    /// Stable asset name a backend may use to look the sprite up.
    #[must_use]
    pub fn asset_name(self) -> String {
        match self {
            Self::Tile(TileKind::Wall) => "tile_wall".to_owned(),
            Self::Tile(TileKind::Path) => "tile_path".to_owned(),
            Self::Tile(TileKind::Goal) => "tile_goal".to_owned(),
            Self::Enemy(kind) => format!("enemy_{}", kind.name()),
            Self::Tower(TowerKind::Bolt) => "tower_bolt".to_owned(),
            Self::Tower(TowerKind::Bubble) => "tower_bubble".to_owned(),
            Self::Projectile(ProjectileKind::Bolt) => "projectile_bolt".to_owned(),
            Self::Projectile(ProjectileKind::Bubble) => "projectile_bubble".to_owned(),
        }
    }
}

/// Single sprite placed in world units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Drawable {
    /// Artwork to draw.
    pub sprite: SpriteKey,
    /// Centre of the sprite in world units.
    pub position: Vec2,
    /// Uniform scale applied to the sprite's native size.
    pub scale: f32,
    /// Multiplicative tint.
    pub tint: Color,
}

impl Drawable {
    /// Creates an untinted drawable at unit scale.
    #[must_use]
    pub const fn new(sprite: SpriteKey, position: Vec2) -> Self {
        Self {
            sprite,
            position,
            scale: 1.0,
            tint: Color::WHITE,
        }
    }

    /// Returns the drawable with a replaced scale.
    #[must_use]
    pub const fn scaled(self, scale: f32) -> Self {
        Self { scale, ..self }
    }

    /// Returns the drawable with a replaced tint.
    #[must_use]
    pub const fn tinted(self, tint: Color) -> Self {
        Self { tint, ..self }
    }
}

/// Circle outlining the reach of the tower being placed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RangeIndicator {
    /// Centre of the circle in world units.
    pub center: Vec2,
    /// Radius in world units.
    pub radius: f32,
    /// Outline colour.
    pub tint: Color,
}

/// Numbers shown in the heads-up display.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Hud {
    /// Remaining goal health.
    pub goal_health: u32,
    /// Credits available for building.
    pub credits: u32,
    /// One-based number of the current wave, zero before the first wave.
    pub wave: u32,
}

/// Scene description emitted by the simulation once per frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    /// Side length of a tile in world units.
    pub tile_length: f32,
    /// Terrain tiles in row-major order.
    pub tiles: Vec<Drawable>,
    /// Enemies, oldest first.
    pub enemies: Vec<Drawable>,
    /// Placed towers in id order.
    pub towers: Vec<Drawable>,
    /// Projectiles, oldest first.
    pub projectiles: Vec<Drawable>,
    /// Tower following the cursor, if a placement is in progress.
    pub preview: Option<Drawable>,
    /// Reach of the previewed tower.
    pub range: Option<RangeIndicator>,
    /// Heads-up display numbers.
    pub hud: Hud,
}

impl Scene {
    /// Every drawable in painter's order: terrain, towers, enemies, projectiles, then the preview.
    pub fn drawables(&self) -> impl Iterator<Item = &Drawable> {
        self.tiles
            .iter()
            .chain(self.towers.iter())
            .chain(self.enemies.iter())
            .chain(self.projectiles.iter())
            .chain(self.preview.iter())
    }

    /// Number of drawables the scene contains.
    #[must_use]
    pub fn drawable_count(&self) -> usize {
        self.drawables().count()
    }
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameInput {
    /// Cursor position in world units, when the cursor is over the play area.
    pub cursor: Option<Vec2>,
    /// Whether the primary button was pressed on this frame.
    pub left_click: bool,
    /// Whether the secondary button was pressed on this frame.
    pub right_click: bool,
    /// Whether the player asked to leave the level on this frame.
    pub escape: bool,
    /// Tower kind picked from the sidebar on this frame.
    pub select_tower: Option<TowerKind>,
}

/// Decision returned by the per-frame update closure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FrameControl {
    /// Keep presenting frames.
    Continue,
    /// Stop the backend after this frame.
    Exit,
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            scene,
        }
    }
}

/// Rendering backend capable of presenting Wave Defence scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until the update closure requests an exit.
    ///
    /// The closure receives the simulated frame delta and the input captured
    /// by the adapter, and refreshes the scene before it is presented.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) -> FrameControl;
}
