//! Deck editing core: the document store and its edit operations, text and
//! chart sub-editors, chart geometry, export, and the local user store.

pub mod auth;
pub mod chart;
pub mod config;
pub mod deck_file;
pub mod edit_session;
pub mod editor;
pub mod error;
pub mod export;
pub mod infographic_draft;
pub mod session;
pub mod store;

pub use config::Config;
pub use error::{AuthError, EditError, ExportError, SlidesmithError};
pub use session::DeckSession;
pub use store::DocumentStore;
