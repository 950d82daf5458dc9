//! # Memoz Architecture
//!
//! Memoz is a **UI-agnostic memo library**: memos that can be categorized,
//! tagged, pinned, searched, archived, trashed, exported, printed and shared.
//! The `memoz` binary is one client of it; nothing in the library assumes a
//! terminal.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, formats output, writes export files    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands, parses ids                    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Lifecycle of the active, archive and trash collections   │
//! │  - Export, import and the shared-link registry              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - DataStore key-value trait                                │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Read-only projections sit beside the command layer and take plain slices
//! of memos: [`query`] (filter, sort, selection), [`search`] (highlighting),
//! [`stats`], [`print`] and [`templates`].
//!
//! ## Collections
//!
//! Three collections hold memos: active, archive and trash. Each is its own
//! id space, and every move between them mints a new id (see [`model`]).
//! Trash entries expire 30 days after deletion; expired entries are dropped
//! whenever the trash is written.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Business logic for each command
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: Core data types (`Memo`, `ArchivedMemo`, `DeletedMemo`, `SharedMemo`)
//! - [`query`]: List view filtering, sorting and bulk selection
//! - [`search`]: Match highlighting and query syntax
//! - [`stats`]: Statistics and insights
//! - [`print`]: Print-ready HTML
//! - [`templates`]: Built-in memo templates
//! - [`config`]: Configuration management
//! - [`clipboard`]: Clipboard and e-mail sharing
//! - [`error`]: Error types
//! - `cli`: Argument parsing and terminal output for the binary (not part of the lib API)

pub mod api;
pub mod clipboard;
pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod print;
pub mod query;
pub mod search;
pub mod stats;
pub mod store;
pub mod templates;
