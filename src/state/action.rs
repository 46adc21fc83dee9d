//! Client actions and the resolver that narrows raw messages into them.
//!
//! Actions arrive as JSON objects tagged by an `action` field. Some kinds
//! share a tag and are told apart by which fields are present, e.g.
//!
//! ```text
//! { "action": "ChangeTimeLimit", "stage": "Playing", "timeLimit": 90 }
//! { "action": "ChangeTimeLimit", "mode": "Hard" }
//! { "action": "ChangeTimeLimit", "mode": null }
//! ```
//!
//! [`Action::resolve`] does that narrowing once, so nothing past the
//! boundary ever inspects raw fields again.

use serde::de::{self, DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::{Map, Value};

use super::error::ActionError;
use super::rules::{Stage, TimeLimit, TimeLimitMode};

pub const CHANGE_TIME_LIMIT: &str = "ChangeTimeLimit";
pub const SET_HAND_SIZE: &str = "SetHandSize";
pub const SET_SCORE_LIMIT: &str = "SetScoreLimit";

/// A configuration edit, optionally pinned to the config version the
/// client last saw (the `if` field on the wire).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigEdit<T> {
    pub expected_version: Option<String>,
    pub edit: T,
}

impl<T> ConfigEdit<T> {
    /// An edit that applies whatever the current version is.
    pub fn new(edit: T) -> Self {
        Self {
            expected_version: None,
            edit,
        }
    }

    /// An edit that only applies at the given version.
    pub fn at_version(version: impl Into<String>, edit: T) -> Self {
        Self {
            expected_version: Some(version.into()),
            edit,
        }
    }
}

/// The two shapes of `ChangeTimeLimit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeTimeLimit {
    /// Set the limit for one stage. Requires time limits to be enabled.
    ForStage { stage: Stage, time_limit: TimeLimit },
    /// Set the enforcement mode. `None` disables time limits entirely.
    Mode { mode: Option<TimeLimitMode> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetHandSize {
    pub hand_size: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetScoreLimit {
    pub score_limit: Option<u32>,
}

/// A resolved client action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    ChangeTimeLimit(ConfigEdit<ChangeTimeLimit>),
    SetHandSize(ConfigEdit<SetHandSize>),
    SetScoreLimit(ConfigEdit<SetScoreLimit>),
}

impl Action {
    /// Narrow a raw message into a typed action.
    pub fn resolve(raw: &Value) -> Result<Self, ActionError> {
        let object = raw.as_object().ok_or(ActionError::MissingDiscriminator)?;
        let name = object
            .get("action")
            .and_then(Value::as_str)
            .ok_or(ActionError::MissingDiscriminator)?;

        match name {
            CHANGE_TIME_LIMIT => {
                let edit = resolve_change_time_limit(object)?;
                Ok(Self::ChangeTimeLimit(config_edit(object, CHANGE_TIME_LIMIT, edit)?))
            }
            SET_HAND_SIZE => {
                let hand_size = required(object, SET_HAND_SIZE, "handSize")?;
                Ok(Self::SetHandSize(config_edit(
                    object,
                    SET_HAND_SIZE,
                    SetHandSize { hand_size },
                )?))
            }
            SET_SCORE_LIMIT => {
                // Explicit null means "no limit", so the field itself must be present.
                let score_limit = required(object, SET_SCORE_LIMIT, "scoreLimit")?;
                Ok(Self::SetScoreLimit(config_edit(
                    object,
                    SET_SCORE_LIMIT,
                    SetScoreLimit { score_limit },
                )?))
            }
            other => Err(ActionError::UnknownAction {
                action: other.to_string(),
            }),
        }
    }

    /// The `action` discriminator.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ChangeTimeLimit(_) => CHANGE_TIME_LIMIT,
            Self::SetHandSize(_) => SET_HAND_SIZE,
            Self::SetScoreLimit(_) => SET_SCORE_LIMIT,
        }
    }

    /// Whether the action edits lobby configuration.
    pub fn is_configure(&self) -> bool {
        matches!(
            self,
            Self::ChangeTimeLimit(_) | Self::SetHandSize(_) | Self::SetScoreLimit(_)
        )
    }

    /// Convert to the wire shape accepted by [`Action::resolve`].
    pub fn to_json(&self) -> Value {
        let (mut obj, expected_version) = match self {
            Self::ChangeTimeLimit(edit) => {
                let obj = match edit.edit {
                    ChangeTimeLimit::ForStage { stage, time_limit } => serde_json::json!({
                        "action": CHANGE_TIME_LIMIT,
                        "stage": stage,
                        "timeLimit": time_limit
                    }),
                    ChangeTimeLimit::Mode { mode } => serde_json::json!({
                        "action": CHANGE_TIME_LIMIT,
                        "mode": mode
                    }),
                };
                (obj, &edit.expected_version)
            }
            Self::SetHandSize(edit) => (
                serde_json::json!({
                    "action": SET_HAND_SIZE,
                    "handSize": edit.edit.hand_size
                }),
                &edit.expected_version,
            ),
            Self::SetScoreLimit(edit) => (
                serde_json::json!({
                    "action": SET_SCORE_LIMIT,
                    "scoreLimit": edit.edit.score_limit
                }),
                &edit.expected_version,
            ),
        };
        if let Some(version) = expected_version {
            obj["if"] = serde_json::json!(version);
        }
        obj
    }
}

impl<'de> Deserialize<'de> for Action {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        Self::resolve(&raw).map_err(de::Error::custom)
    }
}

fn resolve_change_time_limit(object: &Map<String, Value>) -> Result<ChangeTimeLimit, ActionError> {
    // A stage wins over a mode when a client sends both.
    if let Some(stage) = optional::<Stage>(object, CHANGE_TIME_LIMIT, "stage")? {
        let time_limit = required(object, CHANGE_TIME_LIMIT, "timeLimit")?;
        return Ok(ChangeTimeLimit::ForStage { stage, time_limit });
    }
    if let Some(mode) = optional::<Option<TimeLimitMode>>(object, CHANGE_TIME_LIMIT, "mode")? {
        return Ok(ChangeTimeLimit::Mode { mode });
    }
    Err(ActionError::shape(
        CHANGE_TIME_LIMIT,
        "expected either a `stage` with a `timeLimit`, or a `mode`",
    ))
}

fn config_edit<T>(
    object: &Map<String, Value>,
    action: &'static str,
    edit: T,
) -> Result<ConfigEdit<T>, ActionError> {
    Ok(ConfigEdit {
        expected_version: optional(object, action, "if")?,
        edit,
    })
}

/// Decode a field if present. A present `null` decodes as `T`'s null.
fn optional<T: DeserializeOwned>(
    object: &Map<String, Value>,
    action: &'static str,
    key: &str,
) -> Result<Option<T>, ActionError> {
    match object.get(key) {
        None => Ok(None),
        Some(value) => T::deserialize(value)
            .map(Some)
            .map_err(|e| ActionError::shape(action, format!("field `{key}`: {e}"))),
    }
}

fn required<T: DeserializeOwned>(
    object: &Map<String, Value>,
    action: &'static str,
    key: &str,
) -> Result<T, ActionError> {
    optional(object, action, key)?
        .ok_or_else(|| ActionError::shape(action, format!("missing field `{key}`")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_resolve_stage_change() {
        let action = Action::resolve(&json!({
            "action": "ChangeTimeLimit",
            "stage": "Judging",
            "timeLimit": 30
        }))
        .unwrap();

        assert_eq!(
            action,
            Action::ChangeTimeLimit(ConfigEdit::new(ChangeTimeLimit::ForStage {
                stage: Stage::Judging,
                time_limit: 30,
            }))
        );
    }

    #[test]
    fn test_resolve_mode_change() {
        let action = Action::resolve(&json!({
            "action": "ChangeTimeLimit",
            "mode": "Hard",
            "if": "3"
        }))
        .unwrap();

        assert_eq!(
            action,
            Action::ChangeTimeLimit(ConfigEdit::at_version(
                "3",
                ChangeTimeLimit::Mode {
                    mode: Some(TimeLimitMode::Hard)
                }
            ))
        );
    }

    #[test]
    fn test_resolve_null_mode_is_disable() {
        let action = Action::resolve(&json!({ "action": "ChangeTimeLimit", "mode": null })).unwrap();
        assert_eq!(
            action,
            Action::ChangeTimeLimit(ConfigEdit::new(ChangeTimeLimit::Mode { mode: None }))
        );
    }

    #[test]
    fn test_resolve_rejects_neither_stage_nor_mode() {
        let err = Action::resolve(&json!({ "action": "ChangeTimeLimit" })).unwrap_err();
        assert!(matches!(
            err,
            ActionError::InvalidShape {
                action: CHANGE_TIME_LIMIT,
                ..
            }
        ));
    }

    #[test]
    fn test_resolve_stage_without_limit() {
        let err = Action::resolve(&json!({ "action": "ChangeTimeLimit", "stage": "Playing" }))
            .unwrap_err();
        assert_eq!(
            err,
            ActionError::shape(CHANGE_TIME_LIMIT, "missing field `timeLimit`")
        );
    }

    #[test]
    fn test_resolve_stage_wins_over_mode() {
        let action = Action::resolve(&json!({
            "action": "ChangeTimeLimit",
            "stage": "Complete",
            "timeLimit": 5,
            "mode": null
        }))
        .unwrap();
        assert!(matches!(
            action,
            Action::ChangeTimeLimit(ConfigEdit {
                edit: ChangeTimeLimit::ForStage {
                    stage: Stage::Complete,
                    time_limit: 5
                },
                ..
            })
        ));
    }

    #[test]
    fn test_resolve_bad_fields() {
        let bad_stage = Action::resolve(&json!({
            "action": "ChangeTimeLimit",
            "stage": "Starting",
            "timeLimit": 5
        }));
        assert!(bad_stage.unwrap_err().is_shape_error());

        let negative = Action::resolve(&json!({
            "action": "ChangeTimeLimit",
            "stage": "Playing",
            "timeLimit": -1
        }));
        assert!(negative.unwrap_err().is_shape_error());

        let bad_mode = Action::resolve(&json!({ "action": "ChangeTimeLimit", "mode": "Strict" }));
        assert!(bad_mode.unwrap_err().is_shape_error());
    }

    #[test]
    fn test_resolve_discriminator_errors() {
        assert_eq!(
            Action::resolve(&json!({ "stage": "Playing" })).unwrap_err(),
            ActionError::MissingDiscriminator
        );
        assert_eq!(
            Action::resolve(&json!("ChangeTimeLimit")).unwrap_err(),
            ActionError::MissingDiscriminator
        );
        assert_eq!(
            Action::resolve(&json!({ "action": "Kick" })).unwrap_err(),
            ActionError::UnknownAction {
                action: "Kick".to_string()
            }
        );
    }

    #[test]
    fn test_resolve_other_configure_actions() {
        assert_eq!(
            Action::resolve(&json!({ "action": "SetHandSize", "handSize": 12 })).unwrap(),
            Action::SetHandSize(ConfigEdit::new(SetHandSize { hand_size: 12 }))
        );
        assert_eq!(
            Action::resolve(&json!({ "action": "SetScoreLimit", "scoreLimit": null })).unwrap(),
            Action::SetScoreLimit(ConfigEdit::new(SetScoreLimit { score_limit: None }))
        );
        assert!(Action::resolve(&json!({ "action": "SetScoreLimit" }))
            .unwrap_err()
            .is_shape_error());
    }

    #[test]
    fn test_deserialize_uses_resolver() {
        let action: Action =
            serde_json::from_str(r#"{"action":"ChangeTimeLimit","mode":"Soft"}"#).unwrap();
        assert_eq!(action.name(), CHANGE_TIME_LIMIT);
        assert!(action.is_configure());

        let err = serde_json::from_str::<Action>(r#"{"action":"ChangeTimeLimit"}"#).unwrap_err();
        assert!(err.to_string().contains("invalid ChangeTimeLimit action"));
    }

    #[test]
    fn test_to_json_is_resolvable() {
        let action = Action::ChangeTimeLimit(ConfigEdit::at_version(
            "9",
            ChangeTimeLimit::ForStage {
                stage: Stage::Revealing,
                time_limit: 20,
            },
        ));
        let json = action.to_json();
        assert_eq!(
            json,
            json!({
                "action": "ChangeTimeLimit",
                "stage": "Revealing",
                "timeLimit": 20,
                "if": "9"
            })
        );
        assert_eq!(Action::resolve(&json).unwrap(), action);
    }
}
