//! Tankobon - a local manga library server.
//!
//! Serves a `manga/chapter/page` directory tree to a browser reader that
//! shows pages either as one vertical scroll or as right-to-left two-page
//! spreads, the way a printed volume reads.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                     READER (client)                       │
//! │  ReaderController: intents -> state -> spreads -> view    │
//! └─────────────────────────────┬─────────────────────────────┘
//!                               │ /api/manga, /api/chapters,
//!                               │ /api/pages, /img
//! ┌─────────────────────────────┴─────────────────────────────┐
//! │                       API (axum)                          │
//! └─────────────────────────────┬─────────────────────────────┘
//!                               │
//! ┌─────────────────────────────┴─────────────────────────────┐
//! │  LibraryIndex  ─ PathGuard (root confinement)             │
//! │                ─ natural (ordering)                       │
//! └───────────────────────────────────────────────────────────┘
//! ```

// === Core Modules ===

/// Directory-backed library listings.
pub mod library;

/// RTL two-page spread layout.
pub mod spread;

/// Reader state machine and render model.
pub mod reader;

// === Service ===

/// REST API.
pub mod api;

/// HTTP client for a running server.
pub mod client;

/// Server configuration.
pub mod config;

// === Re-exports ===

pub use config::ServerConfig;
pub use library::{LibraryError, LibraryIndex, PathGuard, PathTraversalError};
pub use reader::{Intent, Mode, ReaderController, ReaderState, ReaderView};
pub use spread::{total_spreads, Slot, Spread, SpreadLayout};
