//! Explicit per-user scoping handle.
//!
//! Every core operation takes a [`UserScope`] parameter instead of reading an
//! ambient "current user". A scope is only constructible from a loaded user
//! row, so a call site cannot forget ownership filtering: the query helpers
//! here are the single place the `user_id` filter is applied.

use crate::entities::{expense, group, income, label, user};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, Select};

/// Capability handle tying queries and mutations to one user's rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserScope {
    user_id: i64,
}

impl UserScope {
    /// Builds a scope for the given user row.
    #[must_use]
    pub const fn new(user: &user::Model) -> Self {
        Self { user_id: user.id }
    }

    /// Id of the scoped user.
    #[must_use]
    pub const fn user_id(&self) -> i64 {
        self.user_id
    }

    /// Select over the user's groups.
    #[must_use]
    pub fn groups(&self) -> Select<group::Entity> {
        group::Entity::find().filter(group::Column::UserId.eq(self.user_id))
    }

    /// Select over the user's labels.
    #[must_use]
    pub fn labels(&self) -> Select<label::Entity> {
        label::Entity::find().filter(label::Column::UserId.eq(self.user_id))
    }

    /// Select over the user's incomes.
    #[must_use]
    pub fn incomes(&self) -> Select<income::Entity> {
        income::Entity::find().filter(income::Column::UserId.eq(self.user_id))
    }

    /// Select over the user's expenses.
    #[must_use]
    pub fn expenses(&self) -> Select<expense::Entity> {
        expense::Entity::find().filter(expense::Column::UserId.eq(self.user_id))
    }
}
