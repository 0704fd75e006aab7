//! # FileDock Daemon Library
//!
//! This crate provides the daemon (server) functionality for FileDock,
//! exposing a remote, browsable view of a single configured directory tree.
//!
//! ## Overview
//!
//! The daemon runs on machines whose files you want to reach remotely.
//! It provides:
//!
//! - **Directory Listing**: Immediate children of any path under the root,
//!   with size, type, and creation-time metadata
//! - **Fuzzy Search**: A fresh full-tree scan per query, matched by
//!   substring containment or bounded edit distance
//! - **Preview & Download**: Raw byte access to individual files, inline or
//!   as an attachment
//! - **Path Confinement**: Every request path is resolved against the root
//!   before any I/O; escapes are rejected
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        HTTP Server                          │
//! ├─────────────────────────────────────────────────────────────┤
//! │                                                             │
//! │  ┌───────────────────────────────────────────────────────┐  │
//! │  │                  Request Router                       │  │
//! │  └───────────────────────────────────────────────────────┘  │
//! │                                                             │
//! │  ┌────────────┐  ┌──────────┐  ┌───────────┐  ┌──────────┐  │
//! │  │  Resolver  │  │  Lister  │  │  Scanner  │  │  Matcher │  │
//! │  └────────────┘  └──────────┘  └───────────┘  └──────────┘  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use daemon::config::Config;
//! use daemon::router::AppState;
//! use daemon::server::Server;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load_default()?;
//!     config.validate()?;
//!
//!     let state = Arc::new(AppState::from_config(&config));
//!     let mut server = Server::start(config.bind_addr()?, state).await?;
//!
//!     // The daemon is now serving requests.
//!     // Wait for shutdown signal...
//!
//!     server.shutdown();
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`config`]: Configuration loading and defaults
//! - [`files`]: Path resolution, listing, scanning, and matching
//! - [`router`]: Request dispatch and response shaping
//! - [`server`]: HTTP server bootstrap and lifecycle

pub mod config;
pub mod files;
pub mod router;
pub mod server;

// Re-export protocol for convenience
pub use protocol;

// Re-export config types for convenience
pub use config::Config;

// Re-export files types for convenience
pub use files::{BrowseError, DirectoryLister, ResolveError, ScannedFile};

// Re-export router types for convenience
pub use router::{build_router, ApiError, AppState};

// Re-export server types for convenience
pub use server::Server;
