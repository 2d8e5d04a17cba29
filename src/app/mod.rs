//! Application layer coordinating state, events, and actions.
//!
//! This module sits between the runtime shim (main.rs) and the
//! domain/session/storage layers, implementing the event-driven control
//! flow.
//!
//! # Architecture
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! User Input → Events → Event Handler → State + Storage Mutations → Actions
//!                  ↑                                          ↓
//!                  └───────── Session Outcomes ───────────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`state`]: Central application state container

pub mod actions;
pub mod handler;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event, DEFAULT_TITLE};
pub use state::AppState;
