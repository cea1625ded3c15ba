#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Wave Defence engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Systems and the orchestrator submit
//! [`Command`] values describing desired mutations, the world executes those
//! commands via its `apply` entry point, and then broadcasts [`Event`] values
//! for systems and hosts to react to deterministically. Systems consume event
//! streams, query immutable snapshots, and respond exclusively with new
//! command batches.

use std::time::Duration;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Side length of a tower's square footprint measured in tiles.
pub const TOWER_FOOTPRINT_TILES: f32 = 2.0 / 3.0;

/// Side length of an enemy's square footprint measured in tiles.
pub const ENEMY_FOOTPRINT_TILES: f32 = 0.6;

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Advances the simulation clock and counts down every tower cooldown.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Requests that a new enemy enter the maze at the level's spawn point.
    SpawnEnemy {
        /// Kind of enemy to create.
        kind: EnemyKind,
    },
    /// Marks the provided wave as started so hosts can display it.
    StartWave {
        /// One-based number of the wave that became active.
        wave: u32,
    },
    /// Marks the provided wave as finished, resetting every tower cooldown.
    FinishWave {
        /// One-based number of the wave that consumed its last instruction.
        wave: u32,
    },
    /// Requests that a ready tower launch a projectile and restart its cooldown.
    ///
    /// The world ignores the request when the tower is unknown or cooling down.
    FireProjectile {
        /// Tower performing the shot.
        tower: TowerId,
        /// Kind of projectile to launch.
        projectile: ProjectileKind,
        /// World-space launch position.
        origin: Vec2,
        /// Launch velocity in world units per second.
        velocity: Vec2,
    },
    /// Moves every enemy along the direction field and resolves goal contact.
    AdvanceEnemies {
        /// Duration of simulated time to integrate.
        dt: Duration,
    },
    /// Moves every projectile and resolves projectile-versus-enemy damage.
    AdvanceProjectiles {
        /// Duration of simulated time to integrate.
        dt: Duration,
    },
    /// Starts placing a tower of the provided kind under the cursor.
    BeginPlacement {
        /// Kind of tower the player selected.
        kind: TowerKind,
    },
    /// Moves the in-progress placement preview to the cursor position.
    MovePlacement {
        /// Cursor position expressed in world units.
        cursor: Vec2,
    },
    /// Attempts to turn the in-progress preview into a permanent tower.
    ConfirmPlacement,
    /// Discards the in-progress preview, if any.
    CancelPlacement,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms that an enemy entered the maze.
    EnemySpawned {
        /// Identifier assigned to the enemy.
        enemy: EnemyId,
        /// Kind of the spawned enemy.
        kind: EnemyKind,
        /// World-space position the enemy occupies after spawning.
        position: Vec2,
    },
    /// Reports that an enemy touched the goal and left the maze.
    EnemyReachedGoal {
        /// Identifier of the enemy that reached the goal.
        enemy: EnemyId,
        /// Kind of the enemy.
        kind: EnemyKind,
        /// Damage delivered to the goal.
        damage: u32,
    },
    /// Reports that a projectile struck an enemy.
    EnemyDamaged {
        /// Identifier of the enemy that was hit.
        enemy: EnemyId,
        /// Identifier of the projectile that landed the hit.
        projectile: ProjectileId,
        /// Health left after the hit.
        remaining: Health,
    },
    /// Reports that an enemy ran out of health and was removed.
    EnemyDefeated {
        /// Identifier of the defeated enemy.
        enemy: EnemyId,
        /// Kind of the defeated enemy.
        kind: EnemyKind,
        /// Credits awarded for the kill.
        reward: u32,
    },
    /// Confirms that a tower launched a projectile.
    ProjectileLaunched {
        /// Identifier assigned to the projectile.
        projectile: ProjectileId,
        /// Tower that fired.
        tower: TowerId,
        /// Kind of projectile that was launched.
        kind: ProjectileKind,
    },
    /// Reports that a projectile left the simulation.
    ProjectileRemoved {
        /// Identifier of the removed projectile.
        projectile: ProjectileId,
        /// Why the projectile was removed.
        reason: ExpiryReason,
    },
    /// Reports that the goal took damage.
    GoalDamaged {
        /// Goal health left after the damage was applied.
        remaining: Health,
    },
    /// Announces that the goal health reached zero. Emitted once per world.
    GoalDestroyed,
    /// Announces that a wave became active.
    WaveStarted {
        /// One-based wave number.
        wave: u32,
    },
    /// Announces that a wave consumed all of its spawn instructions.
    WaveFinished {
        /// One-based wave number.
        wave: u32,
    },
    /// Confirms that a placement preview was created.
    PlacementStarted {
        /// Kind of tower being placed.
        kind: TowerKind,
    },
    /// Confirms that the placement preview was discarded.
    PlacementCancelled {
        /// Kind of tower that was being placed.
        kind: TowerKind,
    },
    /// Reports that a placement confirmation was rejected.
    PlacementRejected {
        /// Kind of tower requested for placement.
        kind: TowerKind,
        /// Specific reason the placement failed.
        reason: PlacementError,
    },
    /// Confirms that a tower was placed into the world.
    TowerPlaced {
        /// Identifier assigned to the tower by the world.
        tower: TowerId,
        /// Kind of tower that was placed.
        kind: TowerKind,
        /// Tile-centre position the tower occupies.
        position: Vec2,
        /// Credits spent on the tower.
        cost: u32,
    },
    /// Fire-and-forget request for the host to play a sound.
    PlaySound {
        /// Sound that should be played.
        cue: SoundCue,
    },
}

/// Reasons a projectile may leave the simulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExpiryReason {
    /// The projectile struck an enemy.
    Impact,
    /// The projectile left the play area.
    OutOfBounds,
    /// The projectile satisfied its kind-specific death predicate.
    Dissipated,
}

/// Sound cues signalled to the host audio collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SoundCue {
    /// Played once when a level opens.
    Intro,
    /// Played once when the goal is destroyed.
    GameOver,
    /// Played when a bubble bursts on an enemy.
    BubblePop,
    /// Played when an enemy is defeated.
    EnemyDefeated,
}

impl SoundCue {
    /// Asset name the host uses to look the sound up.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Intro => "intro",
            Self::GameOver => "gameover",
            Self::BubblePop => "bubblepop",
            Self::EnemyDefeated => "enemydeath",
        }
    }
}

/// Cardinal movement directions expressed in screen orientation.
///
/// North points toward decreasing row indices, matching the host's
/// downward-growing y axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    North,
    /// Movement toward increasing column indices.
    East,
    /// Movement toward increasing row indices.
    South,
    /// Movement toward decreasing column indices.
    West,
}

impl Direction {
    /// Column and row delta of a single step.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::North => (0, -1),
            Self::East => (1, 0),
            Self::South => (0, 1),
            Self::West => (-1, 0),
        }
    }

    /// Unit vector pointing along the direction in world space.
    #[must_use]
    pub fn unit(self) -> Vec2 {
        let (dx, dy) = self.delta();
        Vec2::new(dx as f32, dy as f32)
    }

    /// Direction after a quarter turn counter-clockwise on screen.
    #[must_use]
    pub const fn turn_left(self) -> Self {
        match self {
            Self::North => Self::West,
            Self::West => Self::South,
            Self::South => Self::East,
            Self::East => Self::North,
        }
    }

    /// Direction after a quarter turn clockwise on screen.
    #[must_use]
    pub const fn turn_right(self) -> Self {
        match self {
            Self::North => Self::East,
            Self::East => Self::South,
            Self::South => Self::West,
            Self::West => Self::North,
        }
    }

    /// Opposite direction.
    #[must_use]
    pub const fn reverse(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
        }
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Returns the adjacent cell in `direction` when it lies inside a
    /// `columns` by `rows` grid.
    #[must_use]
    pub fn neighbor(self, direction: Direction, columns: u32, rows: u32) -> Option<CellCoord> {
        let (dx, dy) = direction.delta();
        let column = self.column.checked_add_signed(dx)?;
        let row = self.row.checked_add_signed(dy)?;
        if column < columns && row < rows {
            Some(CellCoord::new(column, row))
        } else {
            None
        }
    }
}

/// Kind of terrain stored in a single tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileKind {
    /// Terrain enemies cannot traverse.
    Wall,
    /// Terrain that forms the enemy route.
    Path,
    /// The tile enemies attempt to reach.
    Goal,
}

impl TileKind {
    /// Reports whether enemies may walk across the tile.
    #[must_use]
    pub const fn is_passable(self) -> bool {
        !matches!(self, Self::Wall)
    }
}

/// Axis-aligned bounding box used by every overlap test in the simulation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    min: Vec2,
    max: Vec2,
}

impl Bounds {
    /// Creates a box centred on `center` extending `half_extent` on each side.
    #[must_use]
    pub fn centered(center: Vec2, half_extent: Vec2) -> Self {
        let half_extent = half_extent.abs();
        Self {
            min: center - half_extent,
            max: center + half_extent,
        }
    }

    /// Creates a square box centred on `center` with the provided side length.
    #[must_use]
    pub fn square(center: Vec2, side: f32) -> Self {
        Self::centered(center, Vec2::splat(side * 0.5))
    }

    /// Creates a box spanning the provided corners.
    #[must_use]
    pub fn from_corners(a: Vec2, b: Vec2) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Upper-left corner of the box.
    #[must_use]
    pub const fn min(&self) -> Vec2 {
        self.min
    }

    /// Lower-right corner of the box.
    #[must_use]
    pub const fn max(&self) -> Vec2 {
        self.max
    }

    /// Centre point of the box.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Reports whether the interiors of two boxes intersect.
    ///
    /// Boxes that merely share an edge do not overlap, so tiles laid edge to
    /// edge never collide with each other.
    #[must_use]
    pub fn overlaps(&self, other: &Bounds) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }

    /// Reports whether `other` lies entirely inside this box.
    #[must_use]
    pub fn contains(&self, other: &Bounds) -> bool {
        other.min.x >= self.min.x
            && other.min.y >= self.min.y
            && other.max.x <= self.max.x
            && other.max.y <= self.max.y
    }

    /// Reports whether the point lies inside or on the edge of the box.
    #[must_use]
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.y >= self.min.y
            && point.x <= self.max.x
            && point.y <= self.max.y
    }
}

/// Remaining hit points of an enemy or of the goal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Health(u32);

impl Health {
    /// Creates a new health value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric health value.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Health after subtracting `amount`, saturating at zero.
    #[must_use]
    pub const fn damaged(self, amount: u32) -> Self {
        Self(self.0.saturating_sub(amount))
    }

    /// Reports whether no health remains.
    #[must_use]
    pub const fn is_depleted(&self) -> bool {
        self.0 == 0
    }
}

/// Unique identifier assigned to an enemy. Allocated in creation order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a tower.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TowerId(u32);

impl TowerId {
    /// Creates a new tower identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the tower identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a projectile. Allocated in creation order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProjectileId(u32);

impl ProjectileId {
    /// Creates a new projectile identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Kinds of enemies that waves may spawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnemyKind {
    /// Fast, fragile scout.
    Goblin,
    /// Sturdier foot soldier.
    Orc,
    /// Slow brute that hits the goal hard.
    Troll,
}

impl EnemyKind {
    /// Every enemy kind in declaration order.
    pub const ALL: [EnemyKind; 3] = [Self::Goblin, Self::Orc, Self::Troll];

    /// Name used by wave files.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Goblin => "goblin",
            Self::Orc => "orc",
            Self::Troll => "troll",
        }
    }

    /// Resolves a wave-file name, ignoring ASCII case.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
    }

    /// Health an enemy of this kind spawns with.
    #[must_use]
    pub const fn max_health(self) -> Health {
        match self {
            Self::Goblin => Health::new(3),
            Self::Orc => Health::new(8),
            Self::Troll => Health::new(20),
        }
    }

    /// Movement speed measured in tiles per second.
    #[must_use]
    pub const fn speed_in_tiles(self) -> f32 {
        match self {
            Self::Goblin => 1.0,
            Self::Orc => 0.75,
            Self::Troll => 0.5,
        }
    }

    /// Damage dealt to the goal on contact.
    #[must_use]
    pub const fn goal_damage(self) -> u32 {
        match self {
            Self::Goblin => 5,
            Self::Orc => 10,
            Self::Troll => 25,
        }
    }

    /// Credits awarded when the enemy is defeated.
    #[must_use]
    pub const fn reward(self) -> u32 {
        match self {
            Self::Goblin => 5,
            Self::Orc => 10,
            Self::Troll => 25,
        }
    }
}

/// Types of towers that can be constructed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TowerKind {
    /// Long-range tower that launches travelling bolts.
    Bolt,
    /// Short-range tower that blows growing bubbles around itself.
    Bubble,
}

impl TowerKind {
    /// Every tower kind in declaration order.
    pub const ALL: [TowerKind; 2] = [Self::Bolt, Self::Bubble];

    /// Human-readable name shown by hosts.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Bolt => "Bolt Tower",
            Self::Bubble => "Bubble Tower",
        }
    }

    /// Time a tower waits after firing before it may fire again.
    #[must_use]
    pub const fn fire_cooldown(self) -> Duration {
        match self {
            Self::Bolt => Duration::from_millis(2_000),
            Self::Bubble => Duration::from_millis(1_500),
        }
    }

    /// Targeting radius measured in tiles from the tower centre.
    #[must_use]
    pub const fn range_in_tiles(self) -> f32 {
        match self {
            Self::Bolt => 7.0,
            Self::Bubble => 4.5,
        }
    }

    /// Credits required to build the tower.
    #[must_use]
    pub const fn cost(self) -> u32 {
        match self {
            Self::Bolt => 50,
            Self::Bubble => 80,
        }
    }

    /// Projectile the tower launches when it fires.
    #[must_use]
    pub const fn projectile(self) -> ProjectileKind {
        match self {
            Self::Bolt => ProjectileKind::Bolt,
            Self::Bubble => ProjectileKind::Bubble,
        }
    }
}

/// Types of projectiles fired by towers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectileKind {
    /// Small dart travelling in a straight line.
    Bolt,
    /// Stationary bubble that swells until it bursts.
    Bubble,
}

impl ProjectileKind {
    /// Damage applied to the first enemy the projectile touches.
    #[must_use]
    pub const fn damage(self) -> u32 {
        match self {
            Self::Bolt => 2,
            Self::Bubble => 1,
        }
    }

    /// Travel speed measured in tiles per second.
    #[must_use]
    pub const fn speed_in_tiles(self) -> f32 {
        match self {
            Self::Bolt => 8.0,
            Self::Bubble => 0.0,
        }
    }

    /// Visual scale the projectile spawns with.
    #[must_use]
    pub const fn initial_scale(self) -> f32 {
        match self {
            Self::Bolt => 1.0,
            Self::Bubble => 0.1,
        }
    }

    /// Scale gained per second of flight.
    #[must_use]
    pub const fn growth_per_second(self) -> f32 {
        match self {
            Self::Bolt => 0.0,
            Self::Bubble => 0.75,
        }
    }

    /// Scale at which the projectile bursts on its own, if any.
    #[must_use]
    pub const fn max_scale(self) -> Option<f32> {
        match self {
            Self::Bolt => None,
            Self::Bubble => Some(0.7),
        }
    }

    /// Collision radius at scale 1.0 measured in tiles.
    #[must_use]
    pub const fn radius_in_tiles(self) -> f32 {
        match self {
            Self::Bolt => 0.15,
            Self::Bubble => 2.5,
        }
    }

    /// Sound played when the projectile strikes an enemy.
    #[must_use]
    pub const fn impact_cue(self) -> Option<SoundCue> {
        match self {
            Self::Bolt => None,
            Self::Bubble => Some(SoundCue::BubblePop),
        }
    }
}

/// Reasons a tower placement may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlacementError {
    /// The footprint extends beyond the play area.
    OutOfBounds,
    /// The footprint overlaps a wall tile.
    BlockedByWall,
    /// The footprint overlaps an existing tower.
    Occupied,
    /// The player cannot afford the tower.
    InsufficientCredits,
}

/// Immutable representation of a single enemy's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemySnapshot {
    /// Unique identifier assigned to the enemy.
    pub id: EnemyId,
    /// Kind of the enemy.
    pub kind: EnemyKind,
    /// Continuous world-space position of the enemy centre.
    pub position: Vec2,
    /// Velocity applied on the latest advance, in world units per second.
    pub velocity: Vec2,
    /// Remaining health.
    pub health: Health,
}

/// Read-only snapshot describing all live enemies in population order.
#[derive(Clone, Debug, Default)]
pub struct EnemyView {
    snapshots: Vec<EnemySnapshot>,
}

impl EnemyView {
    /// Creates a new enemy view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<EnemySnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured enemies, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &EnemySnapshot> {
        self.snapshots.iter()
    }

    /// Number of captured enemies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view holds no enemies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<EnemySnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a single tower's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TowerSnapshot {
    /// Identifier allocated to the tower by the world.
    pub id: TowerId,
    /// Kind of tower that was constructed.
    pub kind: TowerKind,
    /// Tile-centre position of the tower.
    pub position: Vec2,
    /// Time left before the tower may fire again.
    pub cooldown: Duration,
}

impl TowerSnapshot {
    /// Reports whether the tower finished its cooldown.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.cooldown.is_zero()
    }
}

/// Read-only snapshot describing all towers placed within the maze.
#[derive(Clone, Debug, Default)]
pub struct TowerView {
    snapshots: Vec<TowerSnapshot>,
}

impl TowerView {
    /// Creates a new tower view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<TowerSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured tower snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &TowerSnapshot> {
        self.snapshots.iter()
    }

    /// Number of captured towers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view holds no towers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<TowerSnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a live projectile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectileSnapshot {
    /// Identifier allocated to the projectile.
    pub id: ProjectileId,
    /// Kind of projectile.
    pub kind: ProjectileKind,
    /// World-space position of the projectile centre.
    pub position: Vec2,
    /// Velocity in world units per second.
    pub velocity: Vec2,
    /// Current visual scale.
    pub scale: f32,
}

/// Target assignment computed for a ready tower.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TowerTarget {
    /// Tower that will fire.
    pub tower: TowerId,
    /// Enemy selected as the target.
    pub enemy: EnemyId,
    /// Normalised aim vector leading the target by its velocity.
    pub aim: Vec2,
}

/// Snapshot of the tower currently following the cursor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacementPreview {
    /// Kind of tower being placed.
    pub kind: TowerKind,
    /// Raw cursor position the preview follows.
    pub position: Vec2,
    /// Tile-centre the tower would occupy if confirmed, when the cursor is on the grid.
    pub snapped: Option<Vec2>,
    /// Reason the current position cannot be confirmed, if any.
    pub rejection: Option<PlacementError>,
}

impl PlacementPreview {
    /// Reports whether confirming now would place the tower.
    #[must_use]
    pub const fn is_placeable(&self) -> bool {
        self.rejection.is_none()
    }
}
