//! Outbound events and who they are addressed to.
//!
//! Events are the only thing a successful action hands to the broadcaster.
//! Each carries the config version it produced, as a string, so clients can
//! order updates and drop duplicates.

use serde::{Deserialize, Serialize};

use super::rules::{Stage, TimeLimit, TimeLimitMode};

/// What changed about the time limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TimeLimitChange {
    ForStage {
        stage: Stage,
        #[serde(rename = "timeLimit")]
        time_limit: TimeLimit,
    },
    /// `None` means time limits were disabled.
    Mode { mode: Option<TimeLimitMode> },
}

/// A state change clients need to hear about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all_fields = "camelCase")]
pub enum Event {
    TimeLimitsChanged {
        version: String,
        #[serde(flatten)]
        change: TimeLimitChange,
    },
    HandSizeSet {
        version: String,
        hand_size: u8,
    },
    ScoreLimitSet {
        version: String,
        score_limit: Option<u32>,
    },
}

impl Event {
    pub fn time_limit_for_stage(version: u64, stage: Stage, time_limit: TimeLimit) -> Self {
        Self::TimeLimitsChanged {
            version: version.to_string(),
            change: TimeLimitChange::ForStage { stage, time_limit },
        }
    }

    pub fn time_limit_mode(version: u64, mode: Option<TimeLimitMode>) -> Self {
        Self::TimeLimitsChanged {
            version: version.to_string(),
            change: TimeLimitChange::Mode { mode },
        }
    }

    pub fn hand_size_set(version: u64, hand_size: u8) -> Self {
        Self::HandSizeSet {
            version: version.to_string(),
            hand_size,
        }
    }

    pub fn score_limit_set(version: u64, score_limit: Option<u32>) -> Self {
        Self::ScoreLimitSet {
            version: version.to_string(),
            score_limit,
        }
    }

    /// The config version this event was produced at.
    pub fn version(&self) -> &str {
        match self {
            Self::TimeLimitsChanged { version, .. }
            | Self::HandSizeSet { version, .. }
            | Self::ScoreLimitSet { version, .. } => version,
        }
    }
}

/// Who should receive an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Target {
    /// Every participant in the lobby.
    All,
}

/// An event paired with its recipients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Addressed {
    pub target: Target,
    pub event: Event,
}

/// Address an event to everyone in the lobby.
pub fn target_all(event: Event) -> Addressed {
    Addressed {
        target: Target::All,
        event,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_stage_event_wire_shape() {
        let event = Event::time_limit_for_stage(5, Stage::Playing, 90);
        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!({
                "event": "TimeLimitsChanged",
                "version": "5",
                "stage": "Playing",
                "timeLimit": 90
            })
        );
    }

    #[test]
    fn test_disable_event_carries_null_mode() {
        let event = Event::time_limit_mode(2, None);
        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!({ "event": "TimeLimitsChanged", "version": "2", "mode": null })
        );
    }

    #[test]
    fn test_other_events_wire_shape() {
        assert_eq!(
            serde_json::to_value(Event::hand_size_set(3, 12)).unwrap(),
            json!({ "event": "HandSizeSet", "version": "3", "handSize": 12 })
        );
        assert_eq!(
            serde_json::to_value(Event::score_limit_set(4, None)).unwrap(),
            json!({ "event": "ScoreLimitSet", "version": "4", "scoreLimit": null })
        );
    }

    #[test]
    fn test_addressed_event_decodes() {
        let addressed = target_all(Event::time_limit_mode(8, Some(TimeLimitMode::Hard)));
        let json = serde_json::to_value(&addressed).unwrap();
        assert_eq!(json["target"], json!("All"));

        let back: Addressed = serde_json::from_value(json).unwrap();
        assert_eq!(back, addressed);
        assert_eq!(back.event.version(), "8");
    }
}
