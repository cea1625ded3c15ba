#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Wave scheduling system responsible for emitting enemy spawn commands.

mod parse;

use std::time::Duration;

use wave_defence_core::{Command, EnemyKind, Event};

pub use parse::{parse_waves, WaveParseError};

/// Batch of identical enemies released at a fixed cadence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpawnGroup {
    kind: EnemyKind,
    count: u32,
    interval: Duration,
    start: Duration,
}

impl SpawnGroup {
    /// Creates a group of `count` enemies released every `interval` from `start`.
    #[must_use]
    pub const fn new(kind: EnemyKind, count: u32, interval: Duration, start: Duration) -> Self {
        Self {
            kind,
            count,
            interval,
            start,
        }
    }

    /// Kind of enemy released by the group.
    #[must_use]
    pub const fn kind(&self) -> EnemyKind {
        self.kind
    }

    /// Number of enemies in the group.
    #[must_use]
    pub const fn count(&self) -> u32 {
        self.count
    }

    /// Expands the group into one instruction per enemy.
    pub fn instructions(&self) -> impl Iterator<Item = SpawnInstruction> + '_ {
        (0..self.count).map(move |index| SpawnInstruction {
            kind: self.kind,
            offset: self.start.saturating_add(self.interval.saturating_mul(index)),
        })
    }
}

/// Single enemy release scheduled relative to the start of its wave.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SpawnInstruction {
    /// Kind of enemy to spawn.
    pub kind: EnemyKind,
    /// Time after the wave starts at which the enemy appears.
    pub offset: Duration,
}

/// Ordered spawn instructions of a single wave.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Wave {
    instructions: Vec<SpawnInstruction>,
}

impl Wave {
    /// Merges the provided groups into a wave ordered by offset.
    ///
    /// Instructions with equal offsets keep the order of their groups.
    #[must_use]
    pub fn from_groups(groups: &[SpawnGroup]) -> Self {
        let mut instructions: Vec<SpawnInstruction> =
            groups.iter().flat_map(SpawnGroup::instructions).collect();
        instructions.sort_by_key(|instruction| instruction.offset);
        Self { instructions }
    }

    /// Instructions in release order.
    #[must_use]
    pub fn instructions(&self) -> &[SpawnInstruction] {
        &self.instructions
    }

    /// Number of enemies the wave releases.
    #[must_use]
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Reports whether the wave releases no enemies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}

/// Lifecycle of a single wave.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WavePhase {
    /// The wave has not started.
    Pending,
    /// The wave clock is running and instructions are being consumed.
    Active,
    /// Every instruction was consumed.
    Finished,
}

#[derive(Debug)]
struct WaveState {
    wave: Wave,
    phase: WavePhase,
    consumed: usize,
}

/// Pure system that releases enemies wave by wave as simulated time passes.
#[derive(Debug)]
pub struct WaveScheduler {
    waves: Vec<WaveState>,
    current: usize,
    clock: Duration,
}

impl WaveScheduler {
    /// Creates a scheduler that will run the provided waves in order.
    #[must_use]
    pub fn new(waves: Vec<Wave>) -> Self {
        Self {
            waves: waves
                .into_iter()
                .map(|wave| WaveState {
                    wave,
                    phase: WavePhase::Pending,
                    consumed: 0,
                })
                .collect(),
            current: 0,
            clock: Duration::ZERO,
        }
    }

    /// Consumes time events and emits wave and spawn commands.
    pub fn handle(&mut self, events: &[Event], out: &mut Vec<Command>) {
        let mut accumulated = Duration::ZERO;
        for event in events {
            if let Event::TimeAdvanced { dt } = event {
                accumulated = accumulated.saturating_add(*dt);
            }
        }

        self.advance(accumulated, out);
    }

    /// Advances the active wave clock by `elapsed`.
    ///
    /// A zero duration is ignored. The wave that consumes its last instruction
    /// finishes on the same call, and its successor becomes active with a clock
    /// of zero; its instructions are considered from the next call onward.
    pub fn advance(&mut self, elapsed: Duration, out: &mut Vec<Command>) {
        if elapsed.is_zero() {
            return;
        }

        let number = self.current + 1;
        let Some(state) = self.waves.get_mut(self.current) else {
            return;
        };

        if state.phase == WavePhase::Pending {
            state.phase = WavePhase::Active;
            out.push(Command::StartWave {
                wave: number as u32,
            });
        }

        self.clock = self.clock.saturating_add(elapsed);
        while let Some(instruction) = state.wave.instructions.get(state.consumed) {
            if instruction.offset > self.clock {
                break;
            }
            tracing::debug!(wave = number, kind = ?instruction.kind, "spawn instruction due");
            out.push(Command::SpawnEnemy {
                kind: instruction.kind,
            });
            state.consumed += 1;
        }

        if state.consumed < state.wave.len() {
            return;
        }

        state.phase = WavePhase::Finished;
        out.push(Command::FinishWave {
            wave: number as u32,
        });
        self.clock = Duration::ZERO;
        self.current += 1;

        if let Some(next) = self.waves.get_mut(self.current) {
            next.phase = WavePhase::Active;
            out.push(Command::StartWave {
                wave: (number + 1) as u32,
            });
        }
    }

    /// Phase of the wave at zero-based `index`.
    #[must_use]
    pub fn phase(&self, index: usize) -> Option<WavePhase> {
        self.waves.get(index).map(|state| state.phase)
    }

    /// Total number of waves.
    #[must_use]
    pub fn wave_count(&self) -> usize {
        self.waves.len()
    }

    /// Time elapsed in the active wave.
    #[must_use]
    pub fn clock(&self) -> Duration {
        self.clock
    }

    /// Reports whether every wave finished.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.current >= self.waves.len()
    }
}
