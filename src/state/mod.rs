//! State management module
//!
//! This module handles the shared application context, admin sessions and
//! the record form workflow that keeps drafts in those sessions

pub mod context;
pub mod forms;
pub mod storage;

// Re-export commonly used state components
pub use context::{AppContext, FormDraft, Notification, NotificationLevel, Session};
pub use forms::{RecordForm, SubmitOutcome};
pub use storage::{MemorySessionStore, RedisSessionStore, SessionStore};
