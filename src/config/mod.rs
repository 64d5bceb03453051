//! Configuration management for the budget tracker.

/// Seed-catalog loading from categories.toml
pub mod categories;

/// Database configuration and connection management
pub mod database;

/// Runtime settings from the environment
pub mod settings;
