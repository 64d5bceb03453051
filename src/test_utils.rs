//! Shared test utilities for the budget tracker.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::core::scope::UserScope;
use crate::entities::user;
use crate::errors::Result;
use chrono::NaiveDate;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Inserts a bare user named `test_user` and returns it with its scope.
///
/// Goes through the entity directly so category tests start from an empty
/// tree; seeding behavior is covered by the account and seed tests.
pub async fn create_test_user(db: &DatabaseConnection) -> Result<(user::Model, UserScope)> {
    create_user_named(db, "test_user").await
}

/// Inserts a bare user with the given username and returns it with its scope.
pub async fn create_user_named(
    db: &DatabaseConnection,
    username: &str,
) -> Result<(user::Model, UserScope)> {
    let created = user::ActiveModel {
        username: Set(username.to_string()),
        expected_monthly_income: Set(0),
        ..Default::default()
    }
    .insert(db)
    .await?;

    let scope = UserScope::new(&created);
    Ok((created, scope))
}

/// Shorthand date constructor for test fixtures.
///
/// # Panics
/// Panics on an invalid calendar date.
#[allow(clippy::unwrap_used)]
pub fn d(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Asserts that ordinals form the dense sequence 1..N.
pub fn assert_dense(orders: &[i32]) {
    let expected: Vec<i32> = (1..=i32::try_from(orders.len()).unwrap_or(i32::MAX)).collect();
    assert_eq!(orders, expected.as_slice(), "ordinals not dense: {orders:?}");
}
