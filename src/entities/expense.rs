//! Expense entity - A dated expense record linked to a label.
//!
//! Expenses are created, edited, and hard-deleted directly. The label link is
//! mandatory and must point at an active label owned by the same user at
//! creation time; the label may be soft-deleted later without touching the
//! expense rows.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Expense database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    /// Unique identifier for the expense record
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Id of the owning user, set once at creation
    pub user_id: i64,
    /// Id of the label the spending is filed under
    pub label_id: i64,
    /// Amount in whole currency units, always positive
    pub amount: i64,
    /// Day the expense occurred
    pub date: Date,
}

/// Defines relationships between Expense and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each expense belongs to one user
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
    /// Each expense belongs to one label
    #[sea_orm(
        belongs_to = "super::label::Entity",
        from = "Column::LabelId",
        to = "super::label::Column::Id"
    )]
    Label,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::label::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Label.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
