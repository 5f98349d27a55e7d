//! User directory configuration
//!
//! The directory backend (project and database name) is resolved exactly once
//! at startup and passed into the directory constructor. Nothing mutates it
//! afterwards.

use serde::{Deserialize, Serialize};
use std::env;

/// Configuration for the user directory backend
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DirectoryConfig {
    /// Backend project identifier
    pub project_id: String,

    /// Database name within the project
    pub database: String,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            project_id: String::from("wavely-dev"),
            database: String::from("(default)"),
        }
    }
}

impl DirectoryConfig {
    /// Create a configuration with an explicit project and database
    pub fn new(project_id: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            database: database.into(),
        }
    }

    /// Resolve configuration from environment variables
    ///
    /// Reads `DIRECTORY_PROJECT_ID` and `DIRECTORY_DATABASE`, falling back to
    /// the development defaults when unset.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            project_id: env::var("DIRECTORY_PROJECT_ID").unwrap_or(defaults.project_id),
            database: env::var("DIRECTORY_DATABASE").unwrap_or(defaults.database),
        }
    }
}
