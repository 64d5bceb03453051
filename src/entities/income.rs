//! Income entity - A dated income record in the ledger.
//!
//! Incomes are created, edited, and hard-deleted directly; there is no
//! soft-delete for ledger rows.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Income database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "incomes")]
pub struct Model {
    /// Unique identifier for the income record
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Id of the owning user, set once at creation
    pub user_id: i64,
    /// Amount in whole currency units, never negative
    pub amount: i64,
    /// Day the income was received
    pub date: Date,
}

/// Defines relationships between Income and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each income belongs to one user
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
