//! Database configuration module for the budget tracker.
//!
//! This module handles `SQLite` database connection and table creation using `SeaORM`.
//! It provides functions for establishing database connections and creating all necessary
//! tables based on the entity definitions. The module uses `SeaORM`'s
//! `Schema::create_table_from_entity` method to automatically generate SQL statements
//! from the entity models, ensuring that the database schema matches the Rust struct
//! definitions without requiring manual SQL.

use crate::config::settings::Settings;
use crate::entities::{Expense, Group, Income, Label, User};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Establishes a connection to the store described by the given settings.
pub async fn create_connection(settings: &Settings) -> Result<DatabaseConnection> {
    Database::connect(&settings.database_url)
        .await
        .map_err(Into::into)
}

/// Creates all necessary database tables using `SeaORM`'s schema generation
/// from entity definitions.
///
/// This function uses the `DeriveEntityModel` macros to automatically generate proper
/// SQL statements for table creation, ensuring the database schema matches the Rust
/// struct definitions. It creates tables for users, groups, labels, incomes, and
/// expenses.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let user_table = schema.create_table_from_entity(User);
    let group_table = schema.create_table_from_entity(Group);
    let label_table = schema.create_table_from_entity(Label);
    let income_table = schema.create_table_from_entity(Income);
    let expense_table = schema.create_table_from_entity(Expense);

    db.execute(builder.build(&user_table)).await?;
    db.execute(builder.build(&group_table)).await?;
    db.execute(builder.build(&label_table)).await?;
    db.execute(builder.build(&income_table)).await?;
    db.execute(builder.build(&expense_table)).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{ExpenseModel, GroupModel, IncomeModel, LabelModel, UserModel};
    use sea_orm::{EntityTrait, QuerySelect};

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Test that tables exist by querying them
        let _: Vec<UserModel> = User::find().limit(1).all(&db).await?;
        let _: Vec<GroupModel> = Group::find().limit(1).all(&db).await?;
        let _: Vec<LabelModel> = Label::find().limit(1).all(&db).await?;
        let _: Vec<IncomeModel> = Income::find().limit(1).all(&db).await?;
        let _: Vec<ExpenseModel> = Expense::find().limit(1).all(&db).await?;

        Ok(())
    }
}
