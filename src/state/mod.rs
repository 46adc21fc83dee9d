//! State management module for game lobbies.
//!
//! This module provides the action pipeline and the state it mutates:
//!
//! - `rules` - Lobby configuration (rules and version)
//! - `action` - Client actions and the resolver for raw messages
//! - `configure` - Handlers for configuration edits
//! - `event` - Outbound events and their recipients
//! - `handler` - The handler contract and dispatcher
//! - `lobby` - Lobbies and the manager that applies actions to them
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐  resolve  ┌──────────┐  dispatch  ┌──────────────────────┐
//! │ raw JSON     │──────────▶│  Action  │───────────▶│ handler(auth, lobby) │
//! └──────────────┘           └──────────┘            └──────────┬───────────┘
//!                                                               │
//!                       ┌───────────────────────────────────────┴───────┐
//!                       ▼                                               ▼
//!          ┌─────────────────────────┐                   ┌─────────────────────────┐
//!          │ Handled                 │                   │ Rejected                │
//!          │  lobby (version + 1)    │                   │  lobby (unchanged)      │
//!          │  events → broadcaster   │                   │  error → sender only    │
//!          └─────────────────────────┘                   └─────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust
//! use lobby_state::state::{dispatch, Action, AuthContext, Lobby};
//!
//! let lobby = Lobby::new("lobby-1".into(), "Friday".into());
//! let action = Action::resolve(&serde_json::json!({
//!     "action": "ChangeTimeLimit",
//!     "mode": "Soft",
//! }))
//! .unwrap();
//!
//! let handled = dispatch(&AuthContext::privileged("host"), lobby, action).unwrap();
//! assert_eq!(handled.lobby.config.version, 1);
//! assert_eq!(handled.events[0].event.version(), "1");
//! ```

pub mod action;
pub mod configure;
pub mod error;
pub mod event;
pub mod handler;
pub mod lobby;
pub mod rules;

// Re-export commonly used types
pub use action::{Action, ChangeTimeLimit, ConfigEdit, SetHandSize, SetScoreLimit};
pub use error::{ActionError, DispatchError};
pub use event::{target_all, Addressed, Event, Target, TimeLimitChange};
pub use handler::{dispatch, AuthContext, Handled, Handler, Privilege, Rejected};
pub use lobby::{Lobby, LobbyManager};
pub use rules::{
    default_time_limits, Config, Rules, Stage, TimeLimit, TimeLimitMode, TimeLimitSetting,
    TimeLimits, DEFAULT_HAND_SIZE, DEFAULT_SCORE_LIMIT, MAX_HAND_SIZE, MAX_SCORE_LIMIT,
    MAX_TIME_LIMIT, MIN_HAND_SIZE,
};
