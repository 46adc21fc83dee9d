//! The uniform handler contract and the dispatcher that routes actions.
//!
//! Every handler takes the lobby by value and gives it back, either in
//! [`Handled`] with the events it produced, or untouched in [`Rejected`].
//! Nothing can hold on to the lobby past the call.

use super::action::Action;
use super::configure;
use super::error::ActionError;
use super::event::Addressed;
use super::lobby::Lobby;

/// What a user may do in a lobby.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Privilege {
    /// The lobby's owner(s): may edit configuration.
    Privileged,
    #[default]
    Unprivileged,
}

/// The identity an action was sent with.
///
/// Issued by the session layer. Handlers only pass it along.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    pub user_id: String,
    pub privilege: Privilege,
}

impl AuthContext {
    pub fn new(user_id: impl Into<String>, privilege: Privilege) -> Self {
        Self {
            user_id: user_id.into(),
            privilege,
        }
    }

    pub fn privileged(user_id: impl Into<String>) -> Self {
        Self::new(user_id, Privilege::Privileged)
    }

    pub fn is_privileged(&self) -> bool {
        self.privilege == Privilege::Privileged
    }
}

/// A successfully applied action.
#[derive(Debug, Clone)]
pub struct Handled {
    pub lobby: Lobby,
    /// In the order they must be delivered.
    pub events: Vec<Addressed>,
}

/// A refused action, with the lobby exactly as it was passed in.
#[derive(Debug, Clone)]
pub struct Rejected {
    pub lobby: Lobby,
    pub error: ActionError,
}

impl Rejected {
    pub fn new(lobby: Lobby, error: ActionError) -> Self {
        Self { lobby, error }
    }
}

/// The shape every action handler has.
pub type Handler<A> = fn(&AuthContext, Lobby, A) -> Result<Handled, Rejected>;

/// Route a resolved action to its handler.
pub fn dispatch(auth: &AuthContext, lobby: Lobby, action: Action) -> Result<Handled, Rejected> {
    if action.is_configure() && !auth.is_privileged() {
        return Err(Rejected::new(
            lobby,
            ActionError::Unprivileged("configure the lobby"),
        ));
    }

    tracing::debug!(
        lobby_id = %lobby.id,
        user_id = %auth.user_id,
        action = action.name(),
        version = lobby.config.version,
        "dispatching action"
    );

    match action {
        Action::ChangeTimeLimit(edit) => run(configure::change_time_limit, auth, lobby, edit),
        Action::SetHandSize(edit) => run(configure::set_hand_size, auth, lobby, edit),
        Action::SetScoreLimit(edit) => run(configure::set_score_limit, auth, lobby, edit),
    }
}

fn run<A>(
    handler: Handler<A>,
    auth: &AuthContext,
    lobby: Lobby,
    action: A,
) -> Result<Handled, Rejected> {
    handler(auth, lobby, action)
}
