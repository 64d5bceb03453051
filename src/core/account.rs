//! Account creation and user-level settings.
//!
//! Account creation and default seeding happen in one transaction, so a
//! half-seeded user can never be observed.

use crate::config::categories::Catalog;
use crate::core::{scope::UserScope, seed};
use crate::entities::{user, User};
use crate::errors::{Error, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};

/// Creates a new account and seeds its default categories.
///
/// The username must be non-empty and not yet taken. Expected monthly income
/// starts at zero and is set later through the onboarding flow.
pub async fn create_account(
    db: &DatabaseConnection,
    username: &str,
    catalog: &Catalog,
) -> Result<user::Model> {
    let username = username.trim();
    if username.is_empty() {
        return Err(Error::Validation {
            message: "Username cannot be empty".to_string(),
        });
    }

    let taken = User::find()
        .filter(user::Column::Username.eq(username))
        .one(db)
        .await?;
    if taken.is_some() {
        return Err(Error::DuplicateName {
            name: username.to_string(),
        });
    }

    let txn = db.begin().await?;

    let created = user::ActiveModel {
        username: Set(username.to_string()),
        expected_monthly_income: Set(0),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    let scope = UserScope::new(&created);
    seed::seed_default_categories(&txn, &scope, catalog).await?;

    txn.commit().await?;

    tracing::info!(user_id = created.id, "account created");
    Ok(created)
}

/// Fetches a user row by id.
pub async fn get_user(db: &DatabaseConnection, user_id: i64) -> Result<user::Model> {
    User::find_by_id(user_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "user",
            key: user_id.to_string(),
        })
}

/// Updates the expected monthly income used by the planning projection.
pub async fn set_expected_monthly_income(
    db: &DatabaseConnection,
    scope: &UserScope,
    amount: i64,
) -> Result<user::Model> {
    if amount < 0 {
        return Err(Error::InvalidAmount { amount });
    }

    let user = get_user(db, scope.user_id()).await?;
    let mut active: user::ActiveModel = user.into();
    active.expected_monthly_income = Set(amount);
    active.update(db).await.map_err(Into::into)
}
