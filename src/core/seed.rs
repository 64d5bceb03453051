//! Default category seeding for fresh accounts.
//!
//! Seeding runs exactly once, during account creation, and lays down the
//! catalog groups and labels with ordinals assigned by catalog position. The
//! well-known names and codes the reporting engine matches against live here
//! next to the routine that creates them.

use crate::config::categories::Catalog;
use crate::core::scope::UserScope;
use crate::entities::{group, label};
use crate::errors::{Error, Result};
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};

/// Code of the seeded annual-expenses group
pub const ANNUAL_CODE: &str = "annual_expenses";
/// Code of the seeded fixed monthly expenses group
pub const FIXED_CODE: &str = "monthly_fixed";
/// Code of the seeded variable monthly expenses group
pub const VARIABLE_CODE: &str = "monthly_variable";
/// Code of the seeded groceries group
pub const GROCERIES_CODE: &str = "groceries";
/// Code of the seeded emergency group
pub const EMERGENCY_CODE: &str = "emergency";

/// Name the yearly dashboard matches for the fixed-expense column
pub const FIXED_GROUP_NAME: &str = "Monthly Fixed Expenses";
/// Name the yearly dashboard matches for the variable-expense column
pub const VARIABLE_GROUP_NAME: &str = "Monthly Variable Expenses";
/// Label name the yearly dashboard matches for the installment column
pub const ANNUAL_INSTALLMENT_LABEL: &str = "Annual Expenses Installment";
/// Substring (case-insensitive) identifying the annual group in planning
pub const ANNUAL_NAME_HINT: &str = "annual";
/// Substring (case-insensitive) identifying the savings label
pub const SAVINGS_NAME_HINT: &str = "saving";

/// Seeds the catalog's groups and labels for a fresh account.
///
/// Group and label ordinals are assigned by catalog position starting at 1.
/// Refuses to run for a user that already has coded groups, since a second
/// pass would violate the per-user unique-code rule.
pub async fn seed_default_categories<C>(
    db: &C,
    scope: &UserScope,
    catalog: &Catalog,
) -> Result<()>
where
    C: ConnectionTrait,
{
    let already_coded = group::Entity::find()
        .filter(group::Column::UserId.eq(scope.user_id()))
        .filter(group::Column::Code.is_not_null())
        .one(db)
        .await?;
    if already_coded.is_some() {
        return Err(Error::AlreadySeeded {
            user_id: scope.user_id(),
        });
    }

    for (group_position, group_seed) in (1..).zip(&catalog.groups) {
        let created = group::ActiveModel {
            user_id: Set(scope.user_id()),
            name: Set(group_seed.name.clone()),
            sort_order: Set(group_position),
            is_deleted: Set(false),
            code: Set(Some(group_seed.code.clone())),
            protected: Set(group_seed.protected),
            ..Default::default()
        }
        .insert(db)
        .await?;

        for (label_position, label_seed) in (1..).zip(&group_seed.labels) {
            label::ActiveModel {
                user_id: Set(scope.user_id()),
                group_id: Set(created.id),
                name: Set(label_seed.name.trim().to_string()),
                expected_monthly: Set(label_seed.expected_monthly),
                sort_order: Set(label_position),
                is_deleted: Set(false),
                ..Default::default()
            }
            .insert(db)
            .await?;
        }
    }

    tracing::info!(
        user_id = scope.user_id(),
        groups = catalog.groups.len(),
        "seeded default categories"
    );
    Ok(())
}
