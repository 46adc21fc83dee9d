//! Errors raised while resolving or applying an action.

use thiserror::Error;

/// Why an action was refused.
///
/// Every variant is reported back to the client that sent the action only.
/// A refused action never changes the lobby and never emits events.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    #[error("action has no `action` discriminator")]
    MissingDiscriminator,

    #[error("unknown action: {action}")]
    UnknownAction { action: String },

    #[error("invalid {action} action: {reason}")]
    InvalidShape {
        action: &'static str,
        reason: String,
    },

    #[error("{0}")]
    Precondition(&'static str),

    #[error("config was edited concurrently (expected version {expected}, lobby is at {actual})")]
    ConfigEditConflict { expected: String, actual: String },

    #[error("only privileged users may {0}")]
    Unprivileged(&'static str),
}

impl ActionError {
    pub(crate) fn shape(action: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidShape {
            action,
            reason: reason.into(),
        }
    }

    /// Whether the action was malformed, as opposed to well-formed but
    /// refused in the lobby's current state.
    pub fn is_shape_error(&self) -> bool {
        matches!(
            self,
            Self::MissingDiscriminator | Self::UnknownAction { .. } | Self::InvalidShape { .. }
        )
    }
}

/// Errors from applying an action through a [`LobbyManager`](super::LobbyManager).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("no lobby with id {0}")]
    LobbyNotFound(String),

    #[error(transparent)]
    Action(#[from] ActionError),
}
