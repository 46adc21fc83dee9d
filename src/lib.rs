//! Lobby State Library
//!
//! This crate is the authoritative core for game lobby state: it resolves
//! client actions, validates and applies them, and produces the events
//! every participant needs to stay in sync.
//!
//! # Overview
//!
//! - **Rules** - The configuration a lobby's host can edit, including
//!   per-stage time limits, with a version counter.
//!
//! - **Actions** - Typed client intents, narrowed from raw JSON once at the
//!   boundary.
//!
//! - **Handlers** - One function per action kind: validate, mutate, bump the
//!   version, emit events. A refused action changes nothing.
//!
//! - **Events** - Addressed notifications for the broadcaster, carrying the
//!   new version as a string.
//!
//! # Design Principles
//!
//! 1. **Ownership in, ownership out** - Handlers take the lobby by value and
//!    return it, so no half-updated lobby is ever observable.
//!
//! 2. **Exactly one version per edit** - The version moves only when an
//!    action is applied.
//!
//! 3. **No networking** - This crate is pure state, no WebSocket or HTTP.
//!
//! 4. **Serialization-ready** - Actions, rules and events map to the JSON
//!    clients exchange.
//!
//! # Example
//!
//! ```rust
//! use lobby_state::state::{AuthContext, Lobby, LobbyManager};
//!
//! let mut lobbies = LobbyManager::new();
//! lobbies.add(Lobby::new("lobby-1".to_string(), "Friday".to_string()));
//!
//! let host = AuthContext::privileged("host");
//! let events = lobbies
//!     .apply_json(
//!         "lobby-1",
//!         &host,
//!         &serde_json::json!({ "action": "ChangeTimeLimit", "mode": "Hard" }),
//!     )
//!     .unwrap();
//! assert_eq!(events.len(), 1);
//!
//! // Stage limits can be edited once time limits are enabled.
//! lobbies
//!     .apply_json(
//!         "lobby-1",
//!         &host,
//!         &serde_json::json!({ "action": "ChangeTimeLimit", "stage": "Judging", "timeLimit": 45 }),
//!     )
//!     .unwrap();
//! assert_eq!(lobbies.get("lobby-1").unwrap().config.version, 2);
//! ```

pub mod state;

// Re-export everything from state module at crate root
pub use state::*;
