//! # FileDock Protocol Library
//!
//! This crate defines the wire contract between the FileDock daemon and its
//! clients.
//!
//! ## Overview
//!
//! Every body the daemon reads or writes over HTTP is defined here as a
//! plain serde type:
//!
//! - **Request vocabulary**: the [`Action`](messages::Action) variant parsed
//!   from the `action` query parameter
//! - **Entries**: the [`FileEntry`](messages::FileEntry) shape shared by
//!   directory listings and search results
//! - **Responses**: list bodies and the uniform error body
//!
//! The crate carries no I/O and no daemon logic, so clients can depend on it
//! without pulling in the server stack.
//!
//! ## Modules
//!
//! - [`messages`]: request and response body definitions

pub mod messages;

pub use messages::{Action, ErrorResponse, FileEntry, ListResponse};
