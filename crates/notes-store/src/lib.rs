//! notes-store: Storage layer for the notes service
//!
//! This crate provides:
//! - [`NoteStore`], the single owner of the note collection
//! - Sequential id assignment that never reuses an id
//! - Validation of create and update requests before any mutation
//! - Id-ordered pagination
//! - Optional JSON snapshot persistence between restarts
//!
//! # Usage
//!
//! ```rust,ignore
//! use notes_core::{NewNote, PageRequest};
//! use notes_store::{NoteStore, StoreConfig};
//!
//! let store = NoteStore::from_config(StoreConfig::from_env()).await?;
//!
//! let note = store.create(NewNote::new("First", "Hello")).await?;
//! let page = store.list(PageRequest::new(1, 20)).await;
//! ```

pub mod error;
pub mod snapshot;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use store::{NoteStore, StoreConfig};

// Re-export notes-core for downstream crates
pub use notes_core;
