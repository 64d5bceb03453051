//! Group business logic - create, rename, reorder, soft-delete, restore.
//!
//! Active groups of a user hold dense ordinals 1..N. Every mutation that
//! rewrites more than one row (soft-delete re-pack, neighbor swap) runs inside
//! a store transaction so competing requests cannot interleave a half-applied
//! renumbering.

use crate::core::{ordering, scope::UserScope};
use crate::entities::group;
use crate::errors::{Error, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

/// Retrieves the user's active groups ordered by their ordinal.
pub async fn list_active(db: &DatabaseConnection, scope: &UserScope) -> Result<Vec<group::Model>> {
    scope
        .groups()
        .filter(group::Column::IsDeleted.eq(false))
        .order_by_asc(group::Column::SortOrder)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves the user's soft-deleted groups, available for restore.
pub async fn list_deleted(db: &DatabaseConnection, scope: &UserScope) -> Result<Vec<group::Model>> {
    scope
        .groups()
        .filter(group::Column::IsDeleted.eq(true))
        .order_by_asc(group::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a group by id within the scope, deleted or not.
///
/// A miss and a cross-tenant probe both surface as [`Error::NotFound`].
pub async fn get(db: &DatabaseConnection, scope: &UserScope, group_id: i64) -> Result<group::Model> {
    scope
        .groups()
        .filter(group::Column::Id.eq(group_id))
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "group",
            key: group_id.to_string(),
        })
}

/// Finds an active group by id within the scope.
pub async fn get_active(
    db: &DatabaseConnection,
    scope: &UserScope,
    group_id: i64,
) -> Result<group::Model> {
    let group = get(db, scope, group_id).await?;
    if group.is_deleted {
        return Err(Error::NotFound {
            entity: "group",
            key: group_id.to_string(),
        });
    }
    Ok(group)
}

/// Finds an active group by its seeded code.
pub async fn get_by_code(
    db: &DatabaseConnection,
    scope: &UserScope,
    code: &str,
) -> Result<group::Model> {
    scope
        .groups()
        .filter(group::Column::Code.eq(code))
        .filter(group::Column::IsDeleted.eq(false))
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "group",
            key: code.to_string(),
        })
}

/// Creates a new group at the end of the user's active list.
///
/// The name must be non-empty and unique (case-insensitive) among the user's
/// active groups; soft-deleted groups never count.
pub async fn create(db: &DatabaseConnection, scope: &UserScope, name: &str) -> Result<group::Model> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::Validation {
            message: "Group name cannot be empty".to_string(),
        });
    }

    let active = list_active(db, scope).await?;
    ensure_name_free(&active, name, None)?;

    let positions: Vec<i32> = active.iter().map(|g| g.sort_order).collect();
    let created = group::ActiveModel {
        user_id: Set(scope.user_id()),
        name: Set(name.to_string()),
        sort_order: Set(ordering::next_position(&positions)),
        is_deleted: Set(false),
        code: Set(None),
        protected: Set(false),
        ..Default::default()
    }
    .insert(db)
    .await?;

    tracing::info!(user_id = scope.user_id(), group_id = created.id, "group created");
    Ok(created)
}

/// Renames an active group.
///
/// Renaming a protected group is a silent no-op: the stored name is kept and
/// the unchanged row is returned, mirroring how the edit form forces the value
/// back. Unprotected renames run the same uniqueness check as creation,
/// excluding the group itself.
pub async fn rename(
    db: &DatabaseConnection,
    scope: &UserScope,
    group_id: i64,
    new_name: &str,
) -> Result<group::Model> {
    let group = get_active(db, scope, group_id).await?;
    if group.protected {
        tracing::debug!(group_id, "rename of protected group ignored");
        return Ok(group);
    }

    let new_name = new_name.trim();
    if new_name.is_empty() {
        return Err(Error::Validation {
            message: "Group name cannot be empty".to_string(),
        });
    }

    let active = list_active(db, scope).await?;
    ensure_name_free(&active, new_name, Some(group.id))?;

    let mut active_model: group::ActiveModel = group.into();
    active_model.name = Set(new_name.to_string());
    active_model.update(db).await.map_err(Into::into)
}

/// Soft-deletes a group and re-packs the remaining active ordinals to 1..N.
///
/// Protected groups cannot be deleted; the caller surfaces
/// [`Error::ProtectedGroup`] as a warning and treats the request as a no-op.
pub async fn soft_delete(
    db: &DatabaseConnection,
    scope: &UserScope,
    group_id: i64,
) -> Result<group::Model> {
    let group = get_active(db, scope, group_id).await?;
    if group.protected {
        return Err(Error::ProtectedGroup { name: group.name });
    }

    let txn = db.begin().await?;

    let mut active_model: group::ActiveModel = group.into();
    active_model.is_deleted = Set(true);
    let deleted = active_model.update(&txn).await?;

    repack_active(&txn, scope).await?;
    txn.commit().await?;

    tracing::info!(user_id = scope.user_id(), group_id, "group soft-deleted");
    Ok(deleted)
}

/// Restores a soft-deleted group, appending it after the active groups.
///
/// The restored group always lands at max(active ordinal)+1, never at its
/// original position. Restoring an active group is a no-op.
pub async fn restore(
    db: &DatabaseConnection,
    scope: &UserScope,
    group_id: i64,
) -> Result<group::Model> {
    let group = get(db, scope, group_id).await?;
    if !group.is_deleted {
        return Ok(group);
    }

    let txn = db.begin().await?;

    let positions: Vec<i32> = active_pairs(&txn, scope)
        .await?
        .into_iter()
        .map(|(_, p)| p)
        .collect();

    let mut active_model: group::ActiveModel = group.into();
    active_model.is_deleted = Set(false);
    active_model.sort_order = Set(ordering::next_position(&positions));
    let restored = active_model.update(&txn).await?;

    txn.commit().await?;

    tracing::info!(user_id = scope.user_id(), group_id, "group restored");
    Ok(restored)
}

/// Swaps the group with its immediate active neighbor above.
///
/// No-op when the group is already first.
pub async fn move_up(
    db: &DatabaseConnection,
    scope: &UserScope,
    group_id: i64,
) -> Result<group::Model> {
    swap_with_neighbor(db, scope, group_id, Direction::Up).await
}

/// Swaps the group with its immediate active neighbor below.
///
/// No-op when the group is already last.
pub async fn move_down(
    db: &DatabaseConnection,
    scope: &UserScope,
    group_id: i64,
) -> Result<group::Model> {
    swap_with_neighbor(db, scope, group_id, Direction::Down).await
}

enum Direction {
    Up,
    Down,
}

async fn swap_with_neighbor(
    db: &DatabaseConnection,
    scope: &UserScope,
    group_id: i64,
    direction: Direction,
) -> Result<group::Model> {
    let group = get_active(db, scope, group_id).await?;

    let txn = db.begin().await?;

    let siblings = active_pairs(&txn, scope).await?;
    let neighbor = match direction {
        Direction::Up => ordering::neighbor_above(&siblings, group.sort_order),
        Direction::Down => ordering::neighbor_below(&siblings, group.sort_order),
    };

    let Some((neighbor_id, neighbor_position)) = neighbor else {
        txn.commit().await?;
        return Ok(group);
    };

    let own_position = group.sort_order;

    let mut own: group::ActiveModel = group.into();
    own.sort_order = Set(neighbor_position);
    let moved = own.update(&txn).await?;

    group::ActiveModel {
        id: Set(neighbor_id),
        sort_order: Set(own_position),
        ..Default::default()
    }
    .update(&txn)
    .await?;

    txn.commit().await?;
    Ok(moved)
}

/// `(id, sort_order)` pairs of the scope's active groups, ordered.
async fn active_pairs<C>(db: &C, scope: &UserScope) -> Result<Vec<(i64, i32)>>
where
    C: ConnectionTrait,
{
    let active = group::Entity::find()
        .filter(group::Column::UserId.eq(scope.user_id()))
        .filter(group::Column::IsDeleted.eq(false))
        .order_by_asc(group::Column::SortOrder)
        .all(db)
        .await?;
    Ok(active.into_iter().map(|g| (g.id, g.sort_order)).collect())
}

/// Rewrites active ordinals to 1..N in their current order.
async fn repack_active<C>(db: &C, scope: &UserScope) -> Result<()>
where
    C: ConnectionTrait,
{
    let pairs = active_pairs(db, scope).await?;
    for (id, position) in ordering::compact(&pairs) {
        group::ActiveModel {
            id: Set(id),
            sort_order: Set(position),
            ..Default::default()
        }
        .update(db)
        .await?;
    }
    Ok(())
}

fn ensure_name_free(active: &[group::Model], name: &str, exclude: Option<i64>) -> Result<()> {
    let wanted = name.to_lowercase();
    let clash = active
        .iter()
        .filter(|g| Some(g.id) != exclude)
        .any(|g| g.name.to_lowercase() == wanted);
    if clash {
        return Err(Error::DuplicateName {
            name: name.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::{assert_dense, create_test_user, setup_test_db};

    async fn orders(db: &DatabaseConnection, scope: &UserScope) -> Vec<i32> {
        list_active(db, scope)
            .await
            .unwrap()
            .iter()
            .map(|g| g.sort_order)
            .collect()
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ordinals() -> Result<()> {
        let db = setup_test_db().await?;
        let (_, scope) = create_test_user(&db).await?;

        let housing = create(&db, &scope, "Housing").await?;
        let food = create(&db, &scope, "Food").await?;

        assert_eq!(housing.sort_order, 1);
        assert_eq!(food.sort_order, 2);
        assert_dense(&orders(&db, &scope).await);

        Ok(())
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_name_case_insensitive() -> Result<()> {
        let db = setup_test_db().await?;
        let (_, scope) = create_test_user(&db).await?;

        create(&db, &scope, "Housing").await?;
        let result = create(&db, &scope, "  housing ").await;

        assert!(matches!(result.unwrap_err(), Error::DuplicateName { .. }));
        Ok(())
    }

    #[tokio::test]
    async fn test_uniqueness_ignores_soft_deleted_groups() -> Result<()> {
        let db = setup_test_db().await?;
        let (_, scope) = create_test_user(&db).await?;

        let housing = create(&db, &scope, "Housing").await?;
        soft_delete(&db, &scope, housing.id).await?;

        // Same name is free again once the original is soft-deleted
        let replacement = create(&db, &scope, "Housing").await?;
        assert_eq!(replacement.sort_order, 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_soft_delete_repacks_remaining_ordinals() -> Result<()> {
        let db = setup_test_db().await?;
        let (_, scope) = create_test_user(&db).await?;

        create(&db, &scope, "A").await?;
        let b = create(&db, &scope, "B").await?;
        create(&db, &scope, "C").await?;

        soft_delete(&db, &scope, b.id).await?;

        let remaining = list_active(&db, &scope).await?;
        let names: Vec<&str> = remaining.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["A", "C"]);
        assert_eq!(orders(&db, &scope).await, vec![1, 2]);

        Ok(())
    }

    #[tokio::test]
    async fn test_protected_group_cannot_be_deleted_or_renamed() -> Result<()> {
        let db = setup_test_db().await?;
        let (_, scope) = create_test_user(&db).await?;

        let fixed = group::ActiveModel {
            user_id: Set(scope.user_id()),
            name: Set("Monthly Fixed Expenses".to_string()),
            sort_order: Set(1),
            is_deleted: Set(false),
            code: Set(Some("monthly_fixed".to_string())),
            protected: Set(true),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        let result = soft_delete(&db, &scope, fixed.id).await;
        assert!(matches!(result.unwrap_err(), Error::ProtectedGroup { .. }));
        assert!(!get(&db, &scope, fixed.id).await?.is_deleted);

        // Rename is a silent no-op, not an error
        let renamed = rename(&db, &scope, fixed.id, "Something Else").await?;
        assert_eq!(renamed.name, "Monthly Fixed Expenses");
        assert_eq!(get(&db, &scope, fixed.id).await?.name, "Monthly Fixed Expenses");

        Ok(())
    }

    #[tokio::test]
    async fn test_restore_appends_at_end() -> Result<()> {
        let db = setup_test_db().await?;
        let (_, scope) = create_test_user(&db).await?;

        let a = create(&db, &scope, "A").await?;
        create(&db, &scope, "B").await?;
        create(&db, &scope, "C").await?;

        soft_delete(&db, &scope, a.id).await?;
        let restored = restore(&db, &scope, a.id).await?;

        // Originally first; lands after the remaining two, not back at 1
        assert_eq!(restored.sort_order, 3);
        assert_dense(&orders(&db, &scope).await);

        Ok(())
    }

    #[tokio::test]
    async fn test_move_up_and_down_swap_neighbors() -> Result<()> {
        let db = setup_test_db().await?;
        let (_, scope) = create_test_user(&db).await?;

        let a = create(&db, &scope, "A").await?;
        let b = create(&db, &scope, "B").await?;
        let c = create(&db, &scope, "C").await?;

        // Moving the first item up is a no-op
        let unchanged = move_up(&db, &scope, a.id).await?;
        assert_eq!(unchanged.sort_order, 1);

        // Moving the last item down is a no-op
        let unchanged = move_down(&db, &scope, c.id).await?;
        assert_eq!(unchanged.sort_order, 3);

        let moved = move_up(&db, &scope, b.id).await?;
        assert_eq!(moved.sort_order, 1);
        assert_eq!(get(&db, &scope, a.id).await?.sort_order, 2);
        assert_dense(&orders(&db, &scope).await);

        Ok(())
    }

    #[tokio::test]
    async fn test_cross_tenant_lookup_is_not_found() -> Result<()> {
        let db = setup_test_db().await?;
        let (_, scope_a) = create_test_user(&db).await?;
        let (_, scope_b) = crate::test_utils::create_user_named(&db, "other").await?;

        let group = create(&db, &scope_a, "Housing").await?;

        let result = get(&db, &scope_b, group.id).await;
        assert!(matches!(result.unwrap_err(), Error::NotFound { .. }));

        Ok(())
    }
}
