//! Planning projection and budget simulation.
//!
//! The planning overview compares expected monthly income against the sum of
//! budget expectations, folding the annual group in as a /12 monthly
//! equivalent. The simulator answers "what if I budgeted these amounts
//! instead" against total recorded income. Both are pure reads.

use crate::core::{account, group, label, scope::UserScope, seed};
use crate::entities::{group as group_entity, label as label_entity};
use crate::errors::{Error, Result};
use sea_orm::DatabaseConnection;

use crate::core::label::LabelAmount;

/// One non-annual group with its labels and their combined expectation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupPlan {
    /// The group
    pub group: group_entity::Model,
    /// Active labels of the group, in order
    pub labels: Vec<label_entity::Model>,
    /// Sum of the labels' `expected_monthly`
    pub expected_total: i64,
}

/// View-model for the planning page.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanningOverview {
    /// The user's expected monthly income
    pub expected_monthly_income: i64,
    /// The group treated as annual, when one matches the designation
    pub annual_group: Option<group_entity::Model>,
    /// Active labels of the annual group
    pub annual_labels: Vec<label_entity::Model>,
    /// Sum of the annual labels' expectations (a yearly figure)
    pub annual_total: i64,
    /// `annual_total / 12`
    pub annual_monthly_equivalent: f64,
    /// Every other active group with its expectation totals
    pub groups: Vec<GroupPlan>,
    /// Non-annual expectations plus the annual monthly equivalent
    pub monthly_expense_total: f64,
    /// `expected_monthly_income - monthly_expense_total`
    pub net_balance: f64,
}

/// Result of a budget simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BudgetSimulation {
    /// Sum of the simulated per-label amounts
    pub total_simulated: i64,
    /// Total income ever recorded for the user
    pub total_income: i64,
    /// `total_income - total_simulated`
    pub balance: i64,
}

/// Builds the planning view-model.
///
/// The annual group is the first active group whose name contains the annual
/// designation (case-insensitive). Without one, the annual contribution is
/// zero and every active group counts as monthly.
// Cast safety: amounts are whole currency units far below 2^52, so the
// i64-to-f64 conversions are exact.
#[allow(clippy::cast_precision_loss)]
pub async fn overview(db: &DatabaseConnection, scope: &UserScope) -> Result<PlanningOverview> {
    let user = account::get_user(db, scope.user_id()).await?;

    let hint = seed::ANNUAL_NAME_HINT.to_lowercase();
    let mut annual_group = None;
    let mut plans = Vec::new();
    for candidate in group::list_active(db, scope).await? {
        if annual_group.is_none() && candidate.name.to_lowercase().contains(&hint) {
            annual_group = Some(candidate);
            continue;
        }
        let members = label::list_for_group(db, scope, candidate.id).await?;
        let expected_total = members.iter().map(|l| l.expected_monthly).sum();
        plans.push(GroupPlan {
            group: candidate,
            labels: members,
            expected_total,
        });
    }

    let annual_labels = match &annual_group {
        Some(annual) => label::list_for_group(db, scope, annual.id).await?,
        None => Vec::new(),
    };
    let annual_total: i64 = annual_labels.iter().map(|l| l.expected_monthly).sum();
    let annual_monthly_equivalent = annual_total as f64 / 12.0;

    let non_annual_total: i64 = plans.iter().map(|p| p.expected_total).sum();
    let monthly_expense_total = non_annual_total as f64 + annual_monthly_equivalent;
    let net_balance = user.expected_monthly_income as f64 - monthly_expense_total;

    Ok(PlanningOverview {
        expected_monthly_income: user.expected_monthly_income,
        annual_group,
        annual_labels,
        annual_total,
        annual_monthly_equivalent,
        groups: plans,
        monthly_expense_total,
        net_balance,
    })
}

/// Runs a what-if budget over total recorded income.
///
/// The payload is validated before anything is summed: every label must be
/// active and owned by the scope, and no amount may be negative.
pub async fn simulate(
    db: &DatabaseConnection,
    scope: &UserScope,
    entries: &[LabelAmount],
) -> Result<BudgetSimulation> {
    for entry in entries {
        if entry.amount < 0 {
            return Err(Error::InvalidAmount {
                amount: entry.amount,
            });
        }
        label::get_active(db, scope, entry.label_id).await?;
    }

    let total_simulated: i64 = entries.iter().map(|e| e.amount).sum();
    let total_income: i64 = scope
        .incomes()
        .all(db)
        .await?
        .iter()
        .map(|i| i.amount)
        .sum();

    Ok(BudgetSimulation {
        total_simulated,
        total_income,
        balance: total_income - total_simulated,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::float_cmp)]
    use super::*;
    use crate::core::{account, group as groups, income as incomes, label as labels};
    use crate::test_utils::{create_test_user, d, setup_test_db};

    #[tokio::test]
    async fn test_planning_folds_annual_group_to_monthly_equivalent() -> Result<()> {
        let db = setup_test_db().await?;
        let (user, scope) = create_test_user(&db).await?;
        account::set_expected_monthly_income(&db, &scope, 5000).await?;
        let _ = user;

        let annual = groups::create(&db, &scope, "Annual Expenses").await?;
        labels::create(&db, &scope, annual.id, "Vacation", 700).await?;
        labels::create(&db, &scope, annual.id, "Car Insurance", 500).await?;

        let fixed = groups::create(&db, &scope, "Monthly Fixed Expenses").await?;
        labels::create(&db, &scope, fixed.id, "Rent", 2000).await?;
        labels::create(&db, &scope, fixed.id, "Loan", 1000).await?;

        let plan = overview(&db, &scope).await?;

        assert_eq!(plan.expected_monthly_income, 5000);
        assert_eq!(plan.annual_total, 1200);
        assert_eq!(plan.annual_monthly_equivalent, 100.0);
        assert_eq!(plan.groups.len(), 1);
        assert_eq!(plan.groups[0].expected_total, 3000);
        assert_eq!(plan.monthly_expense_total, 3100.0);
        assert_eq!(plan.net_balance, 1900.0);

        Ok(())
    }

    #[tokio::test]
    async fn test_planning_without_annual_group_contributes_zero() -> Result<()> {
        let db = setup_test_db().await?;
        let (_, scope) = create_test_user(&db).await?;
        account::set_expected_monthly_income(&db, &scope, 4000).await?;

        let fixed = groups::create(&db, &scope, "Monthly Fixed Expenses").await?;
        labels::create(&db, &scope, fixed.id, "Rent", 1500).await?;

        let plan = overview(&db, &scope).await?;

        assert!(plan.annual_group.is_none());
        assert_eq!(plan.annual_total, 0);
        assert_eq!(plan.annual_monthly_equivalent, 0.0);
        assert_eq!(plan.net_balance, 2500.0);

        Ok(())
    }

    #[tokio::test]
    async fn test_simulation_sums_against_all_recorded_income() -> Result<()> {
        let db = setup_test_db().await?;
        let (_, scope) = create_test_user(&db).await?;

        let food = groups::create(&db, &scope, "Food").await?;
        let bread = labels::create(&db, &scope, food.id, "Bread", 0).await?;
        let fruit = labels::create(&db, &scope, food.id, "Fruit", 0).await?;

        incomes::add(&db, &scope, 3000, d(2023, 12, 1)).await?;
        incomes::add(&db, &scope, 2000, d(2024, 6, 1)).await?;

        let simulation = simulate(
            &db,
            &scope,
            &[
                LabelAmount { label_id: bread.id, amount: 400 },
                LabelAmount { label_id: fruit.id, amount: 100 },
            ],
        )
        .await?;

        assert_eq!(simulation.total_simulated, 500);
        assert_eq!(simulation.total_income, 5000);
        assert_eq!(simulation.balance, 4500);

        Ok(())
    }

    #[tokio::test]
    async fn test_simulation_rejects_foreign_label() -> Result<()> {
        let db = setup_test_db().await?;
        let (_, scope) = create_test_user(&db).await?;
        let (_, other) = crate::test_utils::create_user_named(&db, "other").await?;

        let food = groups::create(&db, &other, "Food").await?;
        let foreign = labels::create(&db, &other, food.id, "Bread", 0).await?;

        let result = simulate(
            &db,
            &scope,
            &[LabelAmount { label_id: foreign.id, amount: 10 }],
        )
        .await;

        assert!(matches!(result.unwrap_err(), Error::NotFound { .. }));
        Ok(())
    }
}
