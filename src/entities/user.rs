//! User entity - The account that owns every other row in the store.
//!
//! Besides identity, the user carries the expected monthly income used by the
//! planning projection. Every other entity references the owning user and is
//! only ever queried through a [`crate::core::scope::UserScope`].

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// User database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Unique identifier for the user
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Login name, unique across the store
    #[sea_orm(unique)]
    pub username: String,
    /// Expected monthly income in whole currency units, never negative
    pub expected_monthly_income: i64,
}

/// Defines relationships between User and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One user owns many groups
    #[sea_orm(has_many = "super::group::Entity")]
    Groups,
    /// One user owns many labels
    #[sea_orm(has_many = "super::label::Entity")]
    Labels,
    /// One user owns many income records
    #[sea_orm(has_many = "super::income::Entity")]
    Incomes,
    /// One user owns many expense records
    #[sea_orm(has_many = "super::expense::Entity")]
    Expenses,
}

impl Related<super::group::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Groups.def()
    }
}

impl Related<super::label::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Labels.def()
    }
}

impl Related<super::income::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Incomes.def()
    }
}

impl Related<super::expense::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Expenses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
