//! Label business logic - create, update, reorder, soft-delete, restore.
//!
//! Labels live inside a group; ordinals and name uniqueness are scoped to the
//! active labels of one user+group. The onboarding sheets update budget
//! expectations through the typed [`LabelAmount`] payload rather than loose
//! form keys.

use crate::core::{group, ordering, scope::UserScope};
use crate::entities::label;
use crate::errors::{Error, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

/// One submitted amount for one label, the unit of every bulk sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelAmount {
    /// Target label id
    pub label_id: i64,
    /// Submitted amount
    pub amount: i64,
}

/// Retrieves the active labels of one group, ordered by their ordinal.
pub async fn list_for_group(
    db: &DatabaseConnection,
    scope: &UserScope,
    group_id: i64,
) -> Result<Vec<label::Model>> {
    scope
        .labels()
        .filter(label::Column::GroupId.eq(group_id))
        .filter(label::Column::IsDeleted.eq(false))
        .order_by_asc(label::Column::SortOrder)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves all of the user's active labels across groups.
pub async fn list_active(db: &DatabaseConnection, scope: &UserScope) -> Result<Vec<label::Model>> {
    scope
        .labels()
        .filter(label::Column::IsDeleted.eq(false))
        .order_by_asc(label::Column::GroupId)
        .order_by_asc(label::Column::SortOrder)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves the user's soft-deleted labels, available for restore.
pub async fn list_deleted(db: &DatabaseConnection, scope: &UserScope) -> Result<Vec<label::Model>> {
    scope
        .labels()
        .filter(label::Column::IsDeleted.eq(true))
        .order_by_asc(label::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a label by id within the scope, deleted or not.
pub async fn get(db: &DatabaseConnection, scope: &UserScope, label_id: i64) -> Result<label::Model> {
    scope
        .labels()
        .filter(label::Column::Id.eq(label_id))
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "label",
            key: label_id.to_string(),
        })
}

/// Finds an active label by id within the scope.
pub async fn get_active(
    db: &DatabaseConnection,
    scope: &UserScope,
    label_id: i64,
) -> Result<label::Model> {
    let label = get(db, scope, label_id).await?;
    if label.is_deleted {
        return Err(Error::NotFound {
            entity: "label",
            key: label_id.to_string(),
        });
    }
    Ok(label)
}

/// Creates a new label at the end of the group's active list.
///
/// The group must be active and owned by the scope; a deleted or foreign
/// group behaves as if it did not exist. The name must be unique
/// (case-insensitive) among the group's active labels.
pub async fn create(
    db: &DatabaseConnection,
    scope: &UserScope,
    group_id: i64,
    name: &str,
    expected_monthly: i64,
) -> Result<label::Model> {
    group::get_active(db, scope, group_id).await?;

    let name = name.trim();
    if name.is_empty() {
        return Err(Error::Validation {
            message: "Label name cannot be empty".to_string(),
        });
    }
    if expected_monthly < 0 {
        return Err(Error::InvalidAmount {
            amount: expected_monthly,
        });
    }

    let siblings = list_for_group(db, scope, group_id).await?;
    ensure_name_free(&siblings, name, None)?;

    let positions: Vec<i32> = siblings.iter().map(|l| l.sort_order).collect();
    let created = label::ActiveModel {
        user_id: Set(scope.user_id()),
        group_id: Set(group_id),
        name: Set(name.to_string()),
        expected_monthly: Set(expected_monthly),
        sort_order: Set(ordering::next_position(&positions)),
        is_deleted: Set(false),
        ..Default::default()
    }
    .insert(db)
    .await?;

    tracing::info!(user_id = scope.user_id(), label_id = created.id, "label created");
    Ok(created)
}

/// Updates an active label's name and budget expectation.
pub async fn update(
    db: &DatabaseConnection,
    scope: &UserScope,
    label_id: i64,
    name: &str,
    expected_monthly: i64,
) -> Result<label::Model> {
    let label = get_active(db, scope, label_id).await?;

    let name = name.trim();
    if name.is_empty() {
        return Err(Error::Validation {
            message: "Label name cannot be empty".to_string(),
        });
    }
    if expected_monthly < 0 {
        return Err(Error::InvalidAmount {
            amount: expected_monthly,
        });
    }

    let siblings = list_for_group(db, scope, label.group_id).await?;
    ensure_name_free(&siblings, name, Some(label.id))?;

    let mut active_model: label::ActiveModel = label.into();
    active_model.name = Set(name.to_string());
    active_model.expected_monthly = Set(expected_monthly);
    active_model.update(db).await.map_err(Into::into)
}

/// Updates only the budget expectation of an active label.
pub async fn set_expected_monthly(
    db: &DatabaseConnection,
    scope: &UserScope,
    label_id: i64,
    amount: i64,
) -> Result<label::Model> {
    if amount < 0 {
        return Err(Error::InvalidAmount { amount });
    }

    let label = get_active(db, scope, label_id).await?;
    let mut active_model: label::ActiveModel = label.into();
    active_model.expected_monthly = Set(amount);
    active_model.update(db).await.map_err(Into::into)
}

/// Applies an onboarding sheet of budget expectations in one transaction.
///
/// Every entry is validated against the scope before any row is written, so
/// a payload referencing a foreign or deleted label changes nothing.
pub async fn set_expected_monthly_bulk(
    db: &DatabaseConnection,
    scope: &UserScope,
    entries: &[LabelAmount],
) -> Result<()> {
    for entry in entries {
        if entry.amount < 0 {
            return Err(Error::InvalidAmount {
                amount: entry.amount,
            });
        }
        get_active(db, scope, entry.label_id).await?;
    }

    let txn = db.begin().await?;
    for entry in entries {
        label::ActiveModel {
            id: Set(entry.label_id),
            expected_monthly: Set(entry.amount),
            ..Default::default()
        }
        .update(&txn)
        .await?;
    }
    txn.commit().await?;
    Ok(())
}

/// Soft-deletes a label and re-packs the group's remaining active ordinals.
pub async fn soft_delete(
    db: &DatabaseConnection,
    scope: &UserScope,
    label_id: i64,
) -> Result<label::Model> {
    let label = get_active(db, scope, label_id).await?;
    let group_id = label.group_id;

    let txn = db.begin().await?;

    let mut active_model: label::ActiveModel = label.into();
    active_model.is_deleted = Set(true);
    let deleted = active_model.update(&txn).await?;

    repack_group(&txn, scope, group_id).await?;
    txn.commit().await?;

    tracing::info!(user_id = scope.user_id(), label_id, "label soft-deleted");
    Ok(deleted)
}

/// Restores a soft-deleted label at the end of its group's active list.
pub async fn restore(
    db: &DatabaseConnection,
    scope: &UserScope,
    label_id: i64,
) -> Result<label::Model> {
    let label = get(db, scope, label_id).await?;
    if !label.is_deleted {
        return Ok(label);
    }

    let txn = db.begin().await?;

    let positions: Vec<i32> = active_pairs(&txn, scope, label.group_id)
        .await?
        .into_iter()
        .map(|(_, p)| p)
        .collect();

    let mut active_model: label::ActiveModel = label.into();
    active_model.is_deleted = Set(false);
    active_model.sort_order = Set(ordering::next_position(&positions));
    let restored = active_model.update(&txn).await?;

    txn.commit().await?;
    Ok(restored)
}

/// Swaps the label with its immediate active neighbor above, within the group.
pub async fn move_up(
    db: &DatabaseConnection,
    scope: &UserScope,
    label_id: i64,
) -> Result<label::Model> {
    swap_with_neighbor(db, scope, label_id, Direction::Up).await
}

/// Swaps the label with its immediate active neighbor below, within the group.
pub async fn move_down(
    db: &DatabaseConnection,
    scope: &UserScope,
    label_id: i64,
) -> Result<label::Model> {
    swap_with_neighbor(db, scope, label_id, Direction::Down).await
}

enum Direction {
    Up,
    Down,
}

async fn swap_with_neighbor(
    db: &DatabaseConnection,
    scope: &UserScope,
    label_id: i64,
    direction: Direction,
) -> Result<label::Model> {
    let label = get_active(db, scope, label_id).await?;

    let txn = db.begin().await?;

    let siblings = active_pairs(&txn, scope, label.group_id).await?;
    let neighbor = match direction {
        Direction::Up => ordering::neighbor_above(&siblings, label.sort_order),
        Direction::Down => ordering::neighbor_below(&siblings, label.sort_order),
    };

    let Some((neighbor_id, neighbor_position)) = neighbor else {
        txn.commit().await?;
        return Ok(label);
    };

    let own_position = label.sort_order;

    let mut own: label::ActiveModel = label.into();
    own.sort_order = Set(neighbor_position);
    let moved = own.update(&txn).await?;

    label::ActiveModel {
        id: Set(neighbor_id),
        sort_order: Set(own_position),
        ..Default::default()
    }
    .update(&txn)
    .await?;

    txn.commit().await?;
    Ok(moved)
}

/// `(id, sort_order)` pairs of the group's active labels, ordered.
async fn active_pairs<C>(db: &C, scope: &UserScope, group_id: i64) -> Result<Vec<(i64, i32)>>
where
    C: ConnectionTrait,
{
    let active = label::Entity::find()
        .filter(label::Column::UserId.eq(scope.user_id()))
        .filter(label::Column::GroupId.eq(group_id))
        .filter(label::Column::IsDeleted.eq(false))
        .order_by_asc(label::Column::SortOrder)
        .all(db)
        .await?;
    Ok(active.into_iter().map(|l| (l.id, l.sort_order)).collect())
}

/// Rewrites the group's active ordinals to 1..N in their current order.
async fn repack_group<C>(db: &C, scope: &UserScope, group_id: i64) -> Result<()>
where
    C: ConnectionTrait,
{
    let pairs = active_pairs(db, scope, group_id).await?;
    for (id, position) in ordering::compact(&pairs) {
        label::ActiveModel {
            id: Set(id),
            sort_order: Set(position),
            ..Default::default()
        }
        .update(db)
        .await?;
    }
    Ok(())
}

fn ensure_name_free(siblings: &[label::Model], name: &str, exclude: Option<i64>) -> Result<()> {
    let wanted = name.to_lowercase();
    let clash = siblings
        .iter()
        .filter(|l| Some(l.id) != exclude)
        .any(|l| l.name.to_lowercase() == wanted);
    if clash {
        return Err(Error::DuplicateName {
            name: name.to_string(),
        });
    }
    Ok(())
}
