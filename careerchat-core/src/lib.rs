//! # careerchat-core
//!
//! Core library for careerchat - the backend for a university careers
//! service chatbot.
//!
//! This library provides:
//! - Domain types for interactions, categories, FAQ entries and periods
//! - An append-only interaction log over SQLite
//! - Dashboard analytics derived from the log
//! - A pluggable FAQ store (flat JSON file or SQLite)
//! - The chat facade that validates, answers and records exchanges
//! - Configuration management and logging infrastructure
//!
//! ## Architecture
//!
//! The interaction log is the single source of truth: the chat facade
//! appends to it, and every dashboard aggregate is recomputed from it on
//! demand. Nothing derived is ever persisted.
//!
//! ## Example
//!
//! ```rust,no_run
//! use careerchat_core::{Config, Database};
//!
//! // Load configuration
//! let config = Config::load().expect("failed to load config");
//!
//! // Open database
//! let db = Database::open(&config.database_path()).expect("failed to open database");
//! db.migrate().expect("failed to run migrations");
//! ```

// Re-export commonly used items at the crate root
pub use analytics::Aggregator;
pub use chat::{ChatService, ModelClient};
pub use config::Config;
pub use db::Database;
pub use error::{Error, Result};
pub use faq::{FaqStore, FileFaqStore, NewFaq, SqliteFaqStore};
pub use interactions::{InteractionLog, NewInteraction};
pub use types::*;

// Public modules
pub mod analytics;
pub mod chat;
pub mod config;
pub mod db;
pub mod error;
pub mod faq;
pub mod interactions;
pub mod logging;
pub mod types;
