//! Lobby configuration model.
//!
//! The rules a lobby's host can edit while the lobby is open, and the
//! version counter that orders those edits for clients.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Default number of cards in a hand.
pub const DEFAULT_HAND_SIZE: u8 = 10;

/// Smallest hand a lobby may be configured with.
pub const MIN_HAND_SIZE: u8 = 3;

/// Largest hand a lobby may be configured with.
pub const MAX_HAND_SIZE: u8 = 50;

/// Default score needed to win.
pub const DEFAULT_SCORE_LIMIT: u32 = 25;

/// Largest score limit a lobby may be configured with.
pub const MAX_SCORE_LIMIT: u32 = 10_000;

/// Longest time limit, in seconds, that may be set for a stage.
pub const MAX_TIME_LIMIT: TimeLimit = 900;

/// A stage duration in seconds.
pub type TimeLimit = u32;

/// Stages of a round that can carry a time limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    Playing,
    Revealing,
    Judging,
    Complete,
}

impl Stage {
    pub const ALL: [Stage; 4] = [
        Stage::Playing,
        Stage::Revealing,
        Stage::Judging,
        Stage::Complete,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Playing => "Playing",
            Self::Revealing => "Revealing",
            Self::Judging => "Judging",
            Self::Complete => "Complete",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How time limits are enforced once a stage runs out of time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeLimitMode {
    /// The stage is forced to advance.
    Hard,
    /// Players are only told they are out of time.
    Soft,
}

/// Per-stage time limits and how they are enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeLimits {
    pub mode: TimeLimitMode,
    pub playing: TimeLimit,
    pub revealing: TimeLimit,
    pub judging: TimeLimit,
    pub complete: TimeLimit,
}

impl TimeLimits {
    /// Get the limit for a stage.
    pub fn get(&self, stage: Stage) -> TimeLimit {
        match stage {
            Stage::Playing => self.playing,
            Stage::Revealing => self.revealing,
            Stage::Judging => self.judging,
            Stage::Complete => self.complete,
        }
    }

    /// Set the limit for exactly one stage.
    pub fn set(&mut self, stage: Stage, limit: TimeLimit) {
        let slot = match stage {
            Stage::Playing => &mut self.playing,
            Stage::Revealing => &mut self.revealing,
            Stage::Judging => &mut self.judging,
            Stage::Complete => &mut self.complete,
        };
        *slot = limit;
    }
}

impl Default for TimeLimits {
    fn default() -> Self {
        default_time_limits()
    }
}

/// The limits a lobby starts from when time limits are first enabled.
pub fn default_time_limits() -> TimeLimits {
    TimeLimits {
        mode: TimeLimitMode::Soft,
        playing: 60,
        revealing: 30,
        judging: 30,
        complete: 2,
    }
}

/// Whether time limits are in force.
///
/// On the wire this is an optional `timeLimits` object: absent or `null`
/// when disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<TimeLimits>", into = "Option<TimeLimits>")]
pub enum TimeLimitSetting {
    #[default]
    Disabled,
    Enabled(TimeLimits),
}

impl TimeLimitSetting {
    pub fn is_disabled(&self) -> bool {
        matches!(self, Self::Disabled)
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Enabled(_))
    }

    /// Get the limits if enabled.
    pub fn limits(&self) -> Option<&TimeLimits> {
        match self {
            Self::Enabled(limits) => Some(limits),
            Self::Disabled => None,
        }
    }

    /// Get mutable limits if enabled.
    pub fn limits_mut(&mut self) -> Option<&mut TimeLimits> {
        match self {
            Self::Enabled(limits) => Some(limits),
            Self::Disabled => None,
        }
    }

    /// The mode in force, or `None` when disabled.
    pub fn mode(&self) -> Option<TimeLimitMode> {
        self.limits().map(|limits| limits.mode)
    }
}

impl From<Option<TimeLimits>> for TimeLimitSetting {
    fn from(limits: Option<TimeLimits>) -> Self {
        match limits {
            Some(limits) => Self::Enabled(limits),
            None => Self::Disabled,
        }
    }
}

impl From<TimeLimitSetting> for Option<TimeLimits> {
    fn from(setting: TimeLimitSetting) -> Self {
        match setting {
            TimeLimitSetting::Enabled(limits) => Some(limits),
            TimeLimitSetting::Disabled => None,
        }
    }
}

/// Game rules a lobby is configured with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rules {
    pub hand_size: u8,

    /// `None` means the game runs until stopped.
    #[serde(default)]
    pub score_limit: Option<u32>,

    #[serde(default, skip_serializing_if = "TimeLimitSetting::is_disabled")]
    pub time_limits: TimeLimitSetting,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            hand_size: DEFAULT_HAND_SIZE,
            score_limit: Some(DEFAULT_SCORE_LIMIT),
            time_limits: TimeLimitSetting::Disabled,
        }
    }
}

/// Editable lobby configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    pub rules: Rules,

    /// Bumped once per applied edit.
    #[serde(with = "version_string")]
    pub version: u64,
}

impl Config {
    /// The version as clients see it.
    pub fn version_string(&self) -> String {
        self.version.to_string()
    }
}

/// Versions travel as strings so clients never lose precision.
pub(crate) mod version_string {
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(version: &u64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(version)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}
