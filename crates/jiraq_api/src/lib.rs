//! Typed Jira Cloud REST API client crate used by the jiraq CLI.

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod search;
pub mod time;

pub use client::JiraClient;
pub use config::JiraConfig;
pub use error::{JiraError, Result};
pub use models::{Field, FieldSchema, Fields, Issue, Status, User};
pub use search::{SearchOptions, SearchPage, DEFAULT_MAX_RESULTS};
pub use time::JiraTime;
