//! Income ledger operations.
//!
//! Incomes are plain dated rows: created, edited, and hard-deleted directly,
//! listed newest first.

use crate::core::scope::UserScope;
use crate::entities::income;
use crate::errors::{Error, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, ModelTrait, QueryFilter, QueryOrder, Set,
};

use chrono::NaiveDate;

/// Retrieves the user's incomes, newest first.
pub async fn list(db: &DatabaseConnection, scope: &UserScope) -> Result<Vec<income::Model>> {
    scope
        .incomes()
        .order_by_desc(income::Column::Date)
        .order_by_desc(income::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds an income by id within the scope.
pub async fn get(db: &DatabaseConnection, scope: &UserScope, income_id: i64) -> Result<income::Model> {
    scope
        .incomes()
        .filter(income::Column::Id.eq(income_id))
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "income",
            key: income_id.to_string(),
        })
}

/// Records a new income.
pub async fn add(
    db: &DatabaseConnection,
    scope: &UserScope,
    amount: i64,
    date: NaiveDate,
) -> Result<income::Model> {
    if amount < 0 {
        return Err(Error::InvalidAmount { amount });
    }

    income::ActiveModel {
        user_id: Set(scope.user_id()),
        amount: Set(amount),
        date: Set(date),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Updates an existing income's amount and date.
pub async fn update(
    db: &DatabaseConnection,
    scope: &UserScope,
    income_id: i64,
    amount: i64,
    date: NaiveDate,
) -> Result<income::Model> {
    if amount < 0 {
        return Err(Error::InvalidAmount { amount });
    }

    let existing = get(db, scope, income_id).await?;
    let mut active_model: income::ActiveModel = existing.into();
    active_model.amount = Set(amount);
    active_model.date = Set(date);
    active_model.update(db).await.map_err(Into::into)
}

/// Hard-deletes an income.
pub async fn delete(db: &DatabaseConnection, scope: &UserScope, income_id: i64) -> Result<()> {
    let existing = get(db, scope, income_id).await?;
    existing.delete(db).await?;
    Ok(())
}
