//! Handlers for configuration edits.
//!
//! Each handler validates against the lobby as passed in, and only once
//! every check has passed does it mutate, bump the version, and build its
//! event. A rejection hands the lobby back as it arrived.

use super::action::{
    ChangeTimeLimit, ConfigEdit, SetHandSize, SetScoreLimit, CHANGE_TIME_LIMIT, SET_HAND_SIZE,
    SET_SCORE_LIMIT,
};
use super::error::ActionError;
use super::event::{target_all, Event};
use super::handler::{AuthContext, Handled, Rejected};
use super::lobby::Lobby;
use super::rules::{
    default_time_limits, TimeLimitSetting, MAX_HAND_SIZE, MAX_SCORE_LIMIT, MAX_TIME_LIMIT,
    MIN_HAND_SIZE,
};

/// Change one stage's time limit, or the time limit mode.
pub fn change_time_limit(
    _auth: &AuthContext,
    lobby: Lobby,
    action: ConfigEdit<ChangeTimeLimit>,
) -> Result<Handled, Rejected> {
    if let Err(error) = validate_change_time_limit(&lobby, &action) {
        return Err(Rejected::new(lobby, error));
    }
    Ok(apply_change_time_limit(lobby, action.edit))
}

fn validate_change_time_limit(
    lobby: &Lobby,
    action: &ConfigEdit<ChangeTimeLimit>,
) -> Result<(), ActionError> {
    check_version(lobby, action)?;
    match action.edit {
        ChangeTimeLimit::ForStage { time_limit, .. } => {
            if lobby.config.rules.time_limits.is_disabled() {
                return Err(ActionError::Precondition(
                    "time limits must be enabled before a stage limit can be set",
                ));
            }
            if time_limit > MAX_TIME_LIMIT {
                return Err(ActionError::shape(
                    CHANGE_TIME_LIMIT,
                    format!("time limit {time_limit}s is over the maximum of {MAX_TIME_LIMIT}s"),
                ));
            }
            Ok(())
        }
        // Setting the mode is how time limits get enabled or disabled.
        ChangeTimeLimit::Mode { .. } => Ok(()),
    }
}

fn apply_change_time_limit(mut lobby: Lobby, edit: ChangeTimeLimit) -> Handled {
    let time_limits = &mut lobby.config.rules.time_limits;
    match edit {
        ChangeTimeLimit::ForStage { stage, time_limit } => {
            if let Some(limits) = time_limits.limits_mut() {
                limits.set(stage, time_limit);
            }
        }
        // Disabling discards every stage limit; re-enabling starts from defaults.
        ChangeTimeLimit::Mode { mode: None } => *time_limits = TimeLimitSetting::Disabled,
        ChangeTimeLimit::Mode { mode: Some(mode) } => {
            let mut limits = time_limits.limits().copied().unwrap_or_else(default_time_limits);
            limits.mode = mode;
            *time_limits = TimeLimitSetting::Enabled(limits);
        }
    }

    let version = lobby.bump_version();
    let event = match edit {
        ChangeTimeLimit::ForStage { stage, time_limit } => {
            Event::time_limit_for_stage(version, stage, time_limit)
        }
        ChangeTimeLimit::Mode { mode } => Event::time_limit_mode(version, mode),
    };
    Handled {
        lobby,
        events: vec![target_all(event)],
    }
}

/// Change how many cards each player holds.
pub fn set_hand_size(
    _auth: &AuthContext,
    mut lobby: Lobby,
    action: ConfigEdit<SetHandSize>,
) -> Result<Handled, Rejected> {
    let hand_size = action.edit.hand_size;
    let valid = check_version(&lobby, &action).and_then(|()| {
        if (MIN_HAND_SIZE..=MAX_HAND_SIZE).contains(&hand_size) {
            Ok(())
        } else {
            Err(ActionError::shape(
                SET_HAND_SIZE,
                format!("hand size must be between {MIN_HAND_SIZE} and {MAX_HAND_SIZE}"),
            ))
        }
    });
    if let Err(error) = valid {
        return Err(Rejected::new(lobby, error));
    }

    lobby.config.rules.hand_size = hand_size;
    let version = lobby.bump_version();
    Ok(Handled {
        lobby,
        events: vec![target_all(Event::hand_size_set(version, hand_size))],
    })
}

/// Change the score needed to win, or remove the limit.
pub fn set_score_limit(
    _auth: &AuthContext,
    mut lobby: Lobby,
    action: ConfigEdit<SetScoreLimit>,
) -> Result<Handled, Rejected> {
    let score_limit = action.edit.score_limit;
    let valid = check_version(&lobby, &action).and_then(|()| match score_limit {
        Some(limit) if !(1..=MAX_SCORE_LIMIT).contains(&limit) => Err(ActionError::shape(
            SET_SCORE_LIMIT,
            format!("score limit must be between 1 and {MAX_SCORE_LIMIT}"),
        )),
        _ => Ok(()),
    });
    if let Err(error) = valid {
        return Err(Rejected::new(lobby, error));
    }

    lobby.config.rules.score_limit = score_limit;
    let version = lobby.bump_version();
    Ok(Handled {
        lobby,
        events: vec![target_all(Event::score_limit_set(version, score_limit))],
    })
}

/// Reject edits based on a config version the lobby has moved past.
fn check_version<T>(lobby: &Lobby, action: &ConfigEdit<T>) -> Result<(), ActionError> {
    match &action.expected_version {
        Some(expected) if *expected != lobby.config.version_string() => {
            Err(ActionError::ConfigEditConflict {
                expected: expected.clone(),
                actual: lobby.config.version_string(),
            })
        }
        _ => Ok(()),
    }
}
