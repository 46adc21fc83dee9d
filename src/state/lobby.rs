//! Lobby state management.
//!
//! A lobby owns its configuration for as long as the game session lives.
//! The manager hands each lobby to exactly one handler at a time.

use std::collections::HashMap;

use serde_json::Value;

use super::action::Action;
use super::error::DispatchError;
use super::event::Addressed;
use super::handler::{dispatch, AuthContext, Handled, Rejected};
use super::rules::Config;

/// Lobby state.
#[derive(Debug, Clone)]
pub struct Lobby {
    /// Unique lobby ID
    pub id: String,

    /// Display name
    pub name: String,

    /// Editable configuration
    pub config: Config,

    /// When lobby was created
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Lobby {
    /// Create a lobby with default rules at version 0.
    pub fn new(id: String, name: String) -> Self {
        Self::with_config(id, name, Config::default())
    }

    /// Create a lobby from existing configuration (for restoring state).
    pub fn with_config(id: String, name: String, config: Config) -> Self {
        Self {
            id,
            name,
            config,
            created_at: chrono::Utc::now(),
        }
    }

    /// Advance the config version, returning the new value.
    pub(crate) fn bump_version(&mut self) -> u64 {
        self.config.version += 1;
        self.config.version
    }

    /// Convert to JSON for sending to clients.
    pub fn to_json(&self) -> Value {
        serde_json::json!({
            "lobby_id": self.id,
            "name": self.name,
            "config": self.config,
            "created_at": self.created_at
        })
    }
}

/// Lobby manager - tracks all active lobbies.
#[derive(Debug, Default)]
pub struct LobbyManager {
    /// Lobbies by ID
    lobbies: HashMap<String, Lobby>,
}

impl LobbyManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a lobby, replacing any with the same ID.
    pub fn add(&mut self, lobby: Lobby) {
        self.lobbies.insert(lobby.id.clone(), lobby);
    }

    /// Get lobby by ID.
    pub fn get(&self, lobby_id: &str) -> Option<&Lobby> {
        self.lobbies.get(lobby_id)
    }

    /// Remove a lobby entirely.
    pub fn remove(&mut self, lobby_id: &str) -> Option<Lobby> {
        self.lobbies.remove(lobby_id)
    }

    /// Count lobbies.
    pub fn count(&self) -> usize {
        self.lobbies.len()
    }

    /// Get all lobby IDs.
    pub fn lobby_ids(&self) -> impl Iterator<Item = &String> {
        self.lobbies.keys()
    }

    /// Apply an action to one lobby, returning the events to broadcast.
    ///
    /// On failure the lobby is stored back unchanged.
    pub fn apply(
        &mut self,
        lobby_id: &str,
        auth: &AuthContext,
        action: Action,
    ) -> Result<Vec<Addressed>, DispatchError> {
        let lobby = self
            .lobbies
            .remove(lobby_id)
            .ok_or_else(|| DispatchError::LobbyNotFound(lobby_id.to_string()))?;
        let action_name = action.name();

        match dispatch(auth, lobby, action) {
            Ok(Handled { lobby, events }) => {
                tracing::debug!(
                    lobby_id,
                    action = action_name,
                    version = lobby.config.version,
                    events = events.len(),
                    "applied action"
                );
                self.lobbies.insert(lobby_id.to_string(), lobby);
                Ok(events)
            }
            Err(Rejected { lobby, error }) => {
                tracing::warn!(
                    lobby_id,
                    user_id = %auth.user_id,
                    action = action_name,
                    %error,
                    "rejected action"
                );
                self.lobbies.insert(lobby_id.to_string(), lobby);
                Err(error.into())
            }
        }
    }

    /// Resolve a raw client message and apply it.
    pub fn apply_json(
        &mut self,
        lobby_id: &str,
        auth: &AuthContext,
        raw: &Value,
    ) -> Result<Vec<Addressed>, DispatchError> {
        if !self.lobbies.contains_key(lobby_id) {
            return Err(DispatchError::LobbyNotFound(lobby_id.to_string()));
        }
        let action = Action::resolve(raw)?;
        self.apply(lobby_id, auth, action)
    }
}
