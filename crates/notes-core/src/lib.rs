//! notes-core: Core types for the notes service
//!
//! This crate provides:
//! - The [`Note`] entity and its [`NoteId`] identifier
//! - Typed request bodies for creation ([`NewNote`]) and partial updates ([`NotePatch`])
//! - Field validation rules shared by every caller
//! - Pagination parameters and results ([`PageRequest`], [`Page`])
//!
//! Nothing in this crate performs I/O. The storage layer lives in
//! `notes-store` and the HTTP surface in `notes-server`.

pub mod pagination;
pub mod types;
pub mod validation;

pub use pagination::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, Page, PagePolicy, PageRequest};
pub use types::{NewNote, Note, NoteId, NotePatch, ValidNewNote};
pub use validation::{MAX_TITLE_LEN, ValidationError};
