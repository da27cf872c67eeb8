use crate::config::ConfigError;

/// Default score thresholds; entry `i` is the minimum score for level `i + 1`.
pub const DEFAULT_LEVEL_THRESHOLDS: [u32; 6] = [0, 50, 120, 210, 320, 450];

/// Default tick rates per level, in ticks per second.
///
/// The first three entries carry over the original difficulty curve; the rest
/// extend it at the same cadence.
pub const DEFAULT_LEVEL_SPEEDS: [f32; 6] = [3.0, 5.0, 8.0, 10.0, 12.0, 15.0];

/// Score-to-level and level-to-speed policy tables.
///
/// Thresholds are strictly increasing and start at 0, so every score maps to
/// exactly one level and `level_for_score(0) == 1`. Validated at construction;
/// the lookup functions afterwards are total.
#[derive(Debug, Clone)]
pub struct LevelTable {
    thresholds: Vec<u32>,
    speeds: Vec<f32>,
}

impl LevelTable {
    /// Builds a validated table; one speed per threshold.
    pub fn new(thresholds: Vec<u32>, speeds: Vec<f32>) -> Result<Self, ConfigError> {
        if thresholds.is_empty() {
            return Err(ConfigError::EmptyLevelTable);
        }
        if thresholds[0] != 0 {
            return Err(ConfigError::FirstThresholdNotZero {
                found: thresholds[0],
            });
        }
        if let Some(index) = (1..thresholds.len()).find(|&i| thresholds[i] <= thresholds[i - 1]) {
            return Err(ConfigError::ThresholdsNotIncreasing { index });
        }
        if thresholds.len() != speeds.len() {
            return Err(ConfigError::SpeedTableLengthMismatch {
                thresholds: thresholds.len(),
                speeds: speeds.len(),
            });
        }
        if let Some(index) = speeds.iter().position(|speed| *speed <= 0.0) {
            return Err(ConfigError::NonPositiveSpeed {
                level: level_index_to_number(index),
            });
        }

        Ok(Self { thresholds, speeds })
    }

    /// The built-in six-level progression.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(
            DEFAULT_LEVEL_THRESHOLDS.to_vec(),
            DEFAULT_LEVEL_SPEEDS.to_vec(),
        )
        .expect("built-in level tables must validate")
    }

    /// Highest reachable level (1-based).
    #[must_use]
    pub fn max_level(&self) -> u32 {
        level_index_to_number(self.thresholds.len() - 1)
    }

    /// Returns the 1-based level for `score`: the largest index whose
    /// threshold does not exceed the score.
    #[must_use]
    pub fn level_for_score(&self, score: u32) -> u32 {
        let reached = self
            .thresholds
            .iter()
            .take_while(|threshold| **threshold <= score)
            .count();
        // thresholds[0] == 0, so at least level 1 is always reached.
        level_index_to_number(reached - 1)
    }

    /// Tick rate for `level` in ticks per second, clamped to the table end.
    #[must_use]
    pub fn speed_for_level(&self, level: u32) -> f32 {
        let index = usize::try_from(level.saturating_sub(1)).unwrap_or(usize::MAX);
        let index = index.min(self.speeds.len() - 1);
        self.speeds[index]
    }

    /// Points still needed to reach the next level, `None` at the max level.
    #[must_use]
    pub fn score_to_next_level(&self, score: u32, level: u32) -> Option<u32> {
        let next_index = usize::try_from(level).ok()?;
        let next_threshold = *self.thresholds.get(next_index)?;
        Some(next_threshold.saturating_sub(score))
    }
}

fn level_index_to_number(index: usize) -> u32 {
    u32::try_from(index + 1).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use crate::config::ConfigError;

    use super::{DEFAULT_LEVEL_SPEEDS, LevelTable};

    #[test]
    fn level_zero_score_is_level_one() {
        let table = LevelTable::standard();
        assert_eq!(table.level_for_score(0), 1);
    }

    #[test]
    fn level_transitions_exactly_at_thresholds() {
        let table = LevelTable::standard();

        assert_eq!(table.level_for_score(49), 1);
        assert_eq!(table.level_for_score(50), 2);
        assert_eq!(table.level_for_score(119), 2);
        assert_eq!(table.level_for_score(120), 3);
        assert_eq!(table.level_for_score(450), 6);
        assert_eq!(table.level_for_score(100_000), 6);
    }

    #[test]
    fn level_for_score_is_monotone() {
        let table = LevelTable::standard();

        let mut previous = 0;
        for score in 0..600 {
            let level = table.level_for_score(score);
            assert!(level >= previous, "level dropped at score {score}");
            previous = level;
        }
    }

    #[test]
    fn speed_clamps_beyond_the_table() {
        let table = LevelTable::standard();
        let top = DEFAULT_LEVEL_SPEEDS[DEFAULT_LEVEL_SPEEDS.len() - 1];

        assert_eq!(table.speed_for_level(6), top);
        assert_eq!(table.speed_for_level(7), top);
        assert_eq!(table.speed_for_level(u32::MAX), top);
    }

    #[test]
    fn score_to_next_level_counts_down_and_ends() {
        let table = LevelTable::standard();

        assert_eq!(table.score_to_next_level(0, 1), Some(50));
        assert_eq!(table.score_to_next_level(30, 1), Some(20));
        assert_eq!(table.score_to_next_level(60, 2), Some(60));
        assert_eq!(table.score_to_next_level(500, 6), None);
    }

    #[test]
    fn construction_rejects_bad_tables() {
        assert_eq!(
            LevelTable::new(vec![], vec![]).unwrap_err(),
            ConfigError::EmptyLevelTable
        );
        assert_eq!(
            LevelTable::new(vec![10, 20], vec![3.0, 5.0]).unwrap_err(),
            ConfigError::FirstThresholdNotZero { found: 10 }
        );
        assert_eq!(
            LevelTable::new(vec![0, 50, 50], vec![3.0, 5.0, 8.0]).unwrap_err(),
            ConfigError::ThresholdsNotIncreasing { index: 2 }
        );
        assert_eq!(
            LevelTable::new(vec![0, 50], vec![3.0]).unwrap_err(),
            ConfigError::SpeedTableLengthMismatch {
                thresholds: 2,
                speeds: 1
            }
        );
        assert_eq!(
            LevelTable::new(vec![0, 50], vec![3.0, 0.0]).unwrap_err(),
            ConfigError::NonPositiveSpeed { level: 2 }
        );
    }
}
