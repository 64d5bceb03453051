//! Label entity - Expense subcategory within a group.
//!
//! Labels carry the monthly budget expectation (`expected_monthly`) compared
//! against actual spending by the reporting engine. Like groups they are
//! manually ordered (dense 1..N within a user+group's active labels) and
//! soft-deletable.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Label database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "labels")]
pub struct Model {
    /// Unique identifier for the label
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Id of the owning user, set once at creation
    pub user_id: i64,
    /// Id of the containing group
    pub group_id: i64,
    /// Display name, unique per user+group among active labels (case-insensitive)
    pub name: String,
    /// Budgeted monthly amount in whole currency units, never negative
    pub expected_monthly: i64,
    /// Position within the group's active labels, dense 1..N
    pub sort_order: i32,
    /// Soft delete flag - if true, label is hidden but data is preserved
    pub is_deleted: bool,
}

/// Defines relationships between Label and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each label belongs to one user
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
    /// Each label belongs to one group
    #[sea_orm(
        belongs_to = "super::group::Entity",
        from = "Column::GroupId",
        to = "super::group::Column::Id"
    )]
    Group,
    /// One label has many expenses
    #[sea_orm(has_many = "super::expense::Entity")]
    Expenses,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::group::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Group.def()
    }
}

impl Related<super::expense::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Expenses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
