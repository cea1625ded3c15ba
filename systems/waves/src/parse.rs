//! Text encoding of wave data.
//!
//! Waves are separated by newlines or `;`. Each wave lists whitespace
//! separated groups written as `kind/count/interval/start`, with the interval
//! and start measured in seconds. Text after `#` is a comment.

use std::time::Duration;

use thiserror::Error;
use wave_defence_core::EnemyKind;

use crate::{SpawnGroup, Wave};

/// Reasons wave text cannot be parsed.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum WaveParseError {
    /// A group does not have exactly four `/`-separated fields.
    #[error("wave {wave}: group {group:?} has {found} fields, expected 4")]
    FieldCount {
        /// One-based wave number.
        wave: usize,
        /// Offending group text.
        group: String,
        /// Number of fields found.
        found: usize,
    },
    /// A group names an enemy kind that does not exist.
    #[error("wave {wave}: unknown enemy {name:?}")]
    UnknownEnemy {
        /// One-based wave number.
        wave: usize,
        /// Unrecognised enemy name.
        name: String,
    },
    /// The enemy count is not a non-negative integer.
    #[error("wave {wave}: invalid enemy count {value:?}")]
    InvalidCount {
        /// One-based wave number.
        wave: usize,
        /// Offending field text.
        value: String,
    },
    /// A time field is not a non-negative number of seconds.
    #[error("wave {wave}: invalid time {value:?}")]
    InvalidSeconds {
        /// One-based wave number.
        wave: usize,
        /// Offending field text.
        value: String,
    },
}

/// Parses every wave described by `text`, in order.
pub fn parse_waves(text: &str) -> Result<Vec<Wave>, WaveParseError> {
    let mut waves = Vec::new();

    for line in text.lines() {
        let content = line.split('#').next().unwrap_or_default();
        for chunk in content.split(';') {
            if chunk.trim().is_empty() {
                continue;
            }
            let number = waves.len() + 1;
            let groups = chunk
                .split_whitespace()
                .map(|group| parse_group(number, group))
                .collect::<Result<Vec<_>, _>>()?;
            waves.push(Wave::from_groups(&groups));
        }
    }

    tracing::debug!(waves = waves.len(), "wave data parsed");
    Ok(waves)
}

fn parse_group(wave: usize, group: &str) -> Result<SpawnGroup, WaveParseError> {
    let fields: Vec<&str> = group.split('/').collect();
    let [name, count, interval, start] = fields.as_slice() else {
        return Err(WaveParseError::FieldCount {
            wave,
            group: group.to_owned(),
            found: fields.len(),
        });
    };

    let kind = EnemyKind::from_name(name).ok_or_else(|| WaveParseError::UnknownEnemy {
        wave,
        name: (*name).to_owned(),
    })?;
    let count = count
        .parse::<u32>()
        .map_err(|_| WaveParseError::InvalidCount {
            wave,
            value: (*count).to_owned(),
        })?;

    Ok(SpawnGroup::new(
        kind,
        count,
        parse_seconds(wave, interval)?,
        parse_seconds(wave, start)?,
    ))
}

fn parse_seconds(wave: usize, value: &str) -> Result<Duration, WaveParseError> {
    let invalid = || WaveParseError::InvalidSeconds {
        wave,
        value: value.to_owned(),
    };
    let seconds = value.parse::<f64>().map_err(|_| invalid())?;
    if !seconds.is_finite() || seconds < 0.0 {
        return Err(invalid());
    }
    Ok(Duration::from_millis((seconds * 1_000.0).round() as u64))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offsets(wave: &Wave) -> Vec<(EnemyKind, u128)> {
        wave.instructions()
            .iter()
            .map(|instruction| (instruction.kind, instruction.offset.as_millis()))
            .collect()
    }

    #[test]
    fn parses_newline_and_semicolon_separated_waves() {
        let waves = parse_waves("goblin/3/0.5/1\norc/1/0/0 goblin/1/0/0.25;troll/1/0/2")
            .expect("valid wave text");
        assert_eq!(waves.len(), 3);
        assert_eq!(
            offsets(&waves[0]),
            vec![
                (EnemyKind::Goblin, 1_000),
                (EnemyKind::Goblin, 1_500),
                (EnemyKind::Goblin, 2_000),
            ]
        );
        assert_eq!(
            offsets(&waves[1]),
            vec![(EnemyKind::Orc, 0), (EnemyKind::Goblin, 250)]
        );
        assert_eq!(offsets(&waves[2]), vec![(EnemyKind::Troll, 2_000)]);
    }

    #[test]
    fn comments_and_blank_lines_are_skipped() {
        let text = "# opening wave\n\n  goblin/1/0/0  # lone scout\n;;\n";
        let waves = parse_waves(text).expect("valid wave text");
        assert_eq!(waves.len(), 1);
        assert_eq!(waves[0].len(), 1);
    }

    #[test]
    fn malformed_groups_are_reported_with_their_wave() {
        assert_eq!(
            parse_waves("goblin/1/0/0\ngoblin/1/0"),
            Err(WaveParseError::FieldCount {
                wave: 2,
                group: "goblin/1/0".to_owned(),
                found: 3,
            })
        );
        assert_eq!(
            parse_waves("dragon/1/0/0"),
            Err(WaveParseError::UnknownEnemy {
                wave: 1,
                name: "dragon".to_owned(),
            })
        );
        assert_eq!(
            parse_waves("orc/-1/0/0"),
            Err(WaveParseError::InvalidCount {
                wave: 1,
                value: "-1".to_owned(),
            })
        );
        assert_eq!(
            parse_waves("orc/1/soon/0"),
            Err(WaveParseError::InvalidSeconds {
                wave: 1,
                value: "soon".to_owned(),
            })
        );
        assert_eq!(
            parse_waves("orc/1/0/-2"),
            Err(WaveParseError::InvalidSeconds {
                wave: 1,
                value: "-2".to_owned(),
            })
        );
    }
}
