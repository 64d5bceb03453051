//! Runtime settings sourced from the environment.
//!
//! Settings are read from process environment variables, with a `.env` file
//! loaded first when present. Only the store location is configurable; the
//! seed catalog has its own loader in [`crate::config::categories`].

/// Database URL used when `DATABASE_URL` is not set.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/budget_tracker.sqlite";

/// Application settings resolved at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Connection URL for the relational store
    pub database_url: String,
}

impl Settings {
    /// Resolves settings from the environment, loading `.env` first if one
    /// exists. Missing variables fall back to local SQLite defaults, so a
    /// fresh checkout runs without any configuration.
    #[must_use]
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

        Self { database_url }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
        }
    }
}
