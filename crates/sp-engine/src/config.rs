//! Seating configuration documents
//!
//! A `SeatingConfig` captures one setup: how many people, the layout, the
//! ordering policy, how genders are labeled, and the setup-time seat pins.
//! Documents load from JSON or YAML.
//!
//! ```yaml
//! student_count: 24
//! mode: pair
//! rows: 4
//! units_per_row: 3
//! arrangement: random
//! pair_order: alternate
//! labeling:
//!   type: ranges
//!   male: ["1-12"]
//!   female: ["13-24"]
//! fixed_seats:
//!   0: [3, 15]
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use sp_core::{BoardPosition, LayoutShape, PairOrder, PinnedSeats, SeatingMode, SpError, SpResult};

use crate::roster::{LabelingRule, RosterEntry, load_roster};

/// Placement order for people who are not pinned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Arrangement {
    /// Ascending original number
    #[default]
    Ordered,
    /// Shuffled, gender-aware in pair mode
    Random,
}

/// Gender labeling as written in a config document
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LabelingConfig {
    #[default]
    OddEven,
    Ranges {
        #[serde(default)]
        male: Vec<String>,
        #[serde(default)]
        female: Vec<String>,
    },
    External {
        entries: Vec<RosterEntry>,
    },
    /// Roster file, resolved when the session is built
    File {
        path: PathBuf,
    },
}

/// Upper bounds applied when validating a config
#[derive(Debug, Clone)]
pub struct ConfigLimits {
    pub max_students: usize,
    pub max_rows: usize,
    pub max_units_per_row: usize,
}

impl Default for ConfigLimits {
    fn default() -> Self {
        Self {
            max_students: 100,
            max_rows: 15,
            max_units_per_row: 15,
        }
    }
}

/// One seating setup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatingConfig {
    pub student_count: usize,
    #[serde(default)]
    pub mode: SeatingMode,
    pub rows: usize,
    pub units_per_row: usize,
    #[serde(default)]
    pub arrangement: Arrangement,
    #[serde(default)]
    pub pair_order: PairOrder,
    #[serde(default)]
    pub labeling: LabelingConfig,
    #[serde(default)]
    pub randomize_numbers: bool,
    #[serde(default)]
    pub board_position: BoardPosition,
    #[serde(default)]
    pub fixed_seats: PinnedSeats,
}

impl SeatingConfig {
    /// Single seats, ordered, odd/even labeling
    pub fn single(student_count: usize, rows: usize, units_per_row: usize) -> Self {
        Self {
            student_count,
            mode: SeatingMode::Single,
            rows,
            units_per_row,
            arrangement: Arrangement::Ordered,
            pair_order: PairOrder::default(),
            labeling: LabelingConfig::OddEven,
            randomize_numbers: false,
            board_position: BoardPosition::default(),
            fixed_seats: PinnedSeats::new(),
        }
    }

    /// Pair slots, ordered, odd/even labeling
    pub fn pair(student_count: usize, rows: usize, teams_per_row: usize) -> Self {
        Self {
            mode: SeatingMode::Pair,
            ..Self::single(student_count, rows, teams_per_row)
        }
    }

    pub fn with_arrangement(mut self, arrangement: Arrangement) -> Self {
        self.arrangement = arrangement;
        self
    }

    pub fn with_pair_order(mut self, order: PairOrder) -> Self {
        self.pair_order = order;
        self
    }

    pub fn with_labeling(mut self, labeling: LabelingConfig) -> Self {
        self.labeling = labeling;
        self
    }

    pub fn with_randomized_numbers(mut self, randomize: bool) -> Self {
        self.randomize_numbers = randomize;
        self
    }

    pub fn with_fixed_seats(mut self, fixed_seats: PinnedSeats) -> Self {
        self.fixed_seats = fixed_seats;
        self
    }

    pub fn layout(&self) -> LayoutShape {
        LayoutShape {
            rows: self.rows,
            units_per_row: self.units_per_row,
            mode: self.mode,
        }
    }

    #[inline]
    pub fn sequential(&self) -> bool {
        self.arrangement == Arrangement::Ordered
    }

    /// Labeling only matters for randomly arranged pairs; every other
    /// setup labels odd/even.
    pub fn effective_labeling(&self) -> &LabelingConfig {
        static ODD_EVEN: LabelingConfig = LabelingConfig::OddEven;
        if self.mode == SeatingMode::Pair && self.arrangement == Arrangement::Random {
            &self.labeling
        } else {
            &ODD_EVEN
        }
    }

    /// Resolve the effective labeling into a rule, reading roster files.
    ///
    /// An external roster with no entries is rejected here.
    pub fn labeling_rule(&self) -> SpResult<LabelingRule> {
        let rule = match self.effective_labeling() {
            LabelingConfig::OddEven => LabelingRule::OddEven,
            LabelingConfig::Ranges { male, female } => LabelingRule::from_ranges(male, female),
            LabelingConfig::External { entries } => LabelingRule::External {
                entries: entries.clone(),
            },
            LabelingConfig::File { path } => LabelingRule::External {
                entries: load_roster(path)?,
            },
        };

        if let LabelingRule::External { entries } = &rule {
            if entries.is_empty() {
                return Err(SpError::RosterFile("roster has no valid entries".into()));
            }
        }
        Ok(rule)
    }

    /// Check the config against `limits` and the layout it describes
    pub fn validate(&self, limits: &ConfigLimits) -> SpResult<()> {
        check_range("student_count", self.student_count, limits.max_students)?;
        check_range("rows", self.rows, limits.max_rows)?;
        check_range("units_per_row", self.units_per_row, limits.max_units_per_row)?;

        let capacity = self.layout().capacity_for(self.student_count);
        let mut seen = HashSet::new();
        for (&slot, ids) in &self.fixed_seats {
            if slot >= capacity {
                return Err(SpError::Validation(format!(
                    "fixed seat {} is outside the layout ({} slots)",
                    slot, capacity
                )));
            }
            if self.mode == SeatingMode::Single && ids.count() > 1 {
                return Err(SpError::Validation(format!(
                    "fixed seat {} holds {} people in single mode",
                    slot,
                    ids.count()
                )));
            }
            for id in ids.iter() {
                if id == 0 || id as usize > self.student_count {
                    return Err(SpError::Validation(format!(
                        "fixed seat {}: number {} is outside 1..={}",
                        slot, id, self.student_count
                    )));
                }
                if !seen.insert(id) {
                    let message = format!("number {} is pinned more than once", id);
                    return Err(SpError::Validation(message));
                }
            }
        }

        Ok(())
    }

    pub fn from_json_str(json: &str) -> SpResult<Self> {
        serde_json::from_str(json).map_err(|e| SpError::Config(e.to_string()))
    }

    pub fn from_yaml_str(yaml: &str) -> SpResult<Self> {
        serde_yml::from_str(yaml).map_err(|e| SpError::Config(e.to_string()))
    }

    /// Load from a `.json`, `.yaml` or `.yml` file.
    ///
    /// A relative roster file path is resolved against the config's directory.
    pub fn load(path: impl AsRef<Path>) -> SpResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        let mut config = match extension.as_deref() {
            Some("json") => Self::from_json_str(&content)?,
            Some("yaml" | "yml") => Self::from_yaml_str(&content)?,
            other => {
                let format = other.unwrap_or("<none>");
                return Err(SpError::Config(format!("unsupported config format: {}", format)));
            }
        };

        if let LabelingConfig::File { path: roster } = &mut config.labeling {
            if roster.is_relative() {
                if let Some(dir) = path.parent() {
                    *roster = dir.join(&*roster);
                }
            }
        }

        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn to_json(&self) -> SpResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| SpError::Serialization(e.to_string()))
    }
}

fn check_range(name: &str, value: usize, max: usize) -> SpResult<()> {
    if value == 0 || value > max {
        return Err(SpError::Validation(format!("{} must be in 1..={}, got {}", name, max, value)));
    }
    Ok(())
}
