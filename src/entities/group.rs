//! Group entity - Top-level expense category owned by a user.
//!
//! Groups are manually ordered (dense 1..N `sort_order` among a user's active
//! groups), soft-deletable, and optionally system-seeded. Seeded groups carry a
//! stable `code` so flows can locate them after renames, and the `protected`
//! flag makes a group immune to rename and deletion.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Group database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "groups")]
pub struct Model {
    /// Unique identifier for the group
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Id of the owning user, set once at creation
    pub user_id: i64,
    /// Display name, unique per user among active groups (case-insensitive)
    pub name: String,
    /// Position within the user's active groups, dense 1..N
    pub sort_order: i32,
    /// Soft delete flag - if true, group is hidden but data is preserved
    pub is_deleted: bool,
    /// Stable identifier for system-seeded groups, unique per user when set
    pub code: Option<String>,
    /// Whether the name is immutable and deletion forbidden
    pub protected: bool,
}

/// Defines relationships between Group and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each group belongs to one user
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
    /// One group has many labels
    #[sea_orm(has_many = "super::label::Entity")]
    Labels,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::label::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Labels.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
