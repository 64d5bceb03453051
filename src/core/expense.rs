//! Expense ledger operations, including the bulk per-label sheet.
//!
//! An expense always files under a label that was active and owned by the
//! same user at creation time. The bulk sheet submits one optional amount per
//! label of a group and creates one expense per entry that actually carries a
//! positive amount, all dated the same day.

use crate::core::{group, label, scope::UserScope};
use crate::entities::expense;
use crate::errors::{Error, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, ModelTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

use chrono::NaiveDate;
use std::collections::HashSet;

/// One row of the bulk expense sheet: a label and the amount typed next to
/// it, `None` when the field was left empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BulkExpenseEntry {
    /// Target label id
    pub label_id: i64,
    /// Submitted amount, if any
    pub amount: Option<i64>,
}

/// Retrieves the user's expenses, newest first.
pub async fn list(db: &DatabaseConnection, scope: &UserScope) -> Result<Vec<expense::Model>> {
    scope
        .expenses()
        .order_by_desc(expense::Column::Date)
        .order_by_desc(expense::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds an expense by id within the scope.
pub async fn get(
    db: &DatabaseConnection,
    scope: &UserScope,
    expense_id: i64,
) -> Result<expense::Model> {
    scope
        .expenses()
        .filter(expense::Column::Id.eq(expense_id))
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "expense",
            key: expense_id.to_string(),
        })
}

/// Records a new expense under an active, owned label.
pub async fn add(
    db: &DatabaseConnection,
    scope: &UserScope,
    label_id: i64,
    amount: i64,
    date: NaiveDate,
) -> Result<expense::Model> {
    label::get_active(db, scope, label_id).await?;
    if amount <= 0 {
        return Err(Error::InvalidAmount { amount });
    }

    expense::ActiveModel {
        user_id: Set(scope.user_id()),
        label_id: Set(label_id),
        amount: Set(amount),
        date: Set(date),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Updates an existing expense's label, amount, and date.
pub async fn update(
    db: &DatabaseConnection,
    scope: &UserScope,
    expense_id: i64,
    label_id: i64,
    amount: i64,
    date: NaiveDate,
) -> Result<expense::Model> {
    let existing = get(db, scope, expense_id).await?;
    label::get_active(db, scope, label_id).await?;
    if amount <= 0 {
        return Err(Error::InvalidAmount { amount });
    }

    let mut active_model: expense::ActiveModel = existing.into();
    active_model.label_id = Set(label_id);
    active_model.amount = Set(amount);
    active_model.date = Set(date);
    active_model.update(db).await.map_err(Into::into)
}

/// Hard-deletes an expense.
pub async fn delete(db: &DatabaseConnection, scope: &UserScope, expense_id: i64) -> Result<()> {
    let existing = get(db, scope, expense_id).await?;
    existing.delete(db).await?;
    Ok(())
}

/// Creates one expense per filled-in sheet entry, all dated the same day.
///
/// The whole payload is validated first: every label must belong to the given
/// active group of this user, and no filled amount may be zero or negative.
/// Entries left empty are skipped. Inserts run in one transaction.
pub async fn add_bulk(
    db: &DatabaseConnection,
    scope: &UserScope,
    group_id: i64,
    entries: &[BulkExpenseEntry],
    date: NaiveDate,
) -> Result<Vec<expense::Model>> {
    group::get_active(db, scope, group_id).await?;

    let members: HashSet<i64> = label::list_for_group(db, scope, group_id)
        .await?
        .into_iter()
        .map(|l| l.id)
        .collect();

    for entry in entries {
        if !members.contains(&entry.label_id) {
            return Err(Error::NotFound {
                entity: "label",
                key: entry.label_id.to_string(),
            });
        }
        if let Some(amount) = entry.amount {
            if amount < 0 {
                return Err(Error::InvalidAmount { amount });
            }
        }
    }

    let txn = db.begin().await?;
    let mut created = Vec::new();
    for entry in entries {
        let Some(amount) = entry.amount.filter(|a| *a > 0) else {
            continue;
        };
        let row = expense::ActiveModel {
            user_id: Set(scope.user_id()),
            label_id: Set(entry.label_id),
            amount: Set(amount),
            date: Set(date),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        created.push(row);
    }
    txn.commit().await?;

    tracing::info!(
        user_id = scope.user_id(),
        group_id,
        count = created.len(),
        "bulk expenses recorded"
    );
    Ok(created)
}
