//! Range totals, grouped breakdown, and the monthly dashboard.
//!
//! Everything in this module is a pure read: no mutation, repeatable, safe to
//! call concurrently. Date ranges are inclusive on both ends. A label filter
//! takes precedence over a group filter when both are given.

use crate::core::{group, label, scope::UserScope};
use crate::entities::{expense, group as group_entity, income, label as label_entity};
use crate::errors::Result;
use sea_orm::{ColumnTrait, DatabaseConnection, QueryFilter, QueryOrder};

use chrono::{Datelike, NaiveDate};
use std::collections::HashMap;

/// Inclusive date range with optional label/group narrowing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeQuery {
    /// First day included
    pub start: NaiveDate,
    /// Last day included
    pub end: NaiveDate,
    /// Narrow to one label; wins over `group_id` when both are set
    pub label_id: Option<i64>,
    /// Narrow to the labels of one group
    pub group_id: Option<i64>,
}

impl RangeQuery {
    /// Unfiltered query over the given range.
    #[must_use]
    pub const fn over(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start,
            end,
            label_id: None,
            group_id: None,
        }
    }
}

/// Income and expense sums over a range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeTotals {
    /// Sum of income amounts in range
    pub income: i64,
    /// Sum of expense amounts in range (after filters)
    pub expense: i64,
    /// `income - expense`
    pub balance: i64,
}

/// Expenses of one label within a range, with their running sum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelBreakdown {
    /// The label, `None` when the referenced row no longer resolves
    pub label: Option<label_entity::Model>,
    /// Matching expenses, newest first
    pub expenses: Vec<expense::Model>,
    /// Sum of the matching expense amounts
    pub total: i64,
}

/// View-model for the home view: totals, per-label partitions, and the
/// category lists backing the filter bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overview {
    /// Echo of the queried range and filters
    pub query: RangeQuery,
    /// Totals over the range
    pub totals: RangeTotals,
    /// Expenses partitioned by label, in first-seen order
    pub breakdown: Vec<LabelBreakdown>,
    /// The user's active groups
    pub groups: Vec<group_entity::Model>,
    /// The user's active labels
    pub labels: Vec<label_entity::Model>,
}

/// Budget-vs-actual row of the monthly dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelSpend {
    /// The label
    pub label: label_entity::Model,
    /// Budgeted monthly amount
    pub expected: i64,
    /// Spending recorded this month
    pub actual: i64,
    /// The expenses behind `actual`, newest first
    pub expenses: Vec<expense::Model>,
}

/// View-model for the monthly dashboard, optionally scoped to one group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyDashboard {
    /// First day of the dashboard month
    pub start: NaiveDate,
    /// Last day of the dashboard month
    pub end: NaiveDate,
    /// The user's active groups, for the group picker
    pub groups: Vec<group_entity::Model>,
    /// The selected group, when one was requested
    pub selected_group: Option<group_entity::Model>,
    /// One row per active label of the selected group
    pub rows: Vec<LabelSpend>,
    /// Sum of `expected` over the rows
    pub total_expected: i64,
    /// Sum of `actual` over the rows
    pub total_actual: i64,
}

/// First and last day of the calendar month containing `date`.
///
/// The end bound is computed from the first day of the following month, so
/// 28/29/30/31-day months all come out right.
#[must_use]
pub fn month_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let (year, month) = (date.year(), date.month());
    let start = NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(date);

    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let end = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .unwrap_or(date);

    (start, end)
}

/// Sums income and filtered expense amounts over the range.
pub async fn range_totals(
    db: &DatabaseConnection,
    scope: &UserScope,
    query: RangeQuery,
) -> Result<RangeTotals> {
    let incomes = incomes_in_range(db, scope, query.start, query.end).await?;
    let expenses = expenses_in_range(db, scope, query).await?;

    let income: i64 = incomes.iter().map(|i| i.amount).sum();
    let expense: i64 = expenses.iter().map(|e| e.amount).sum();

    Ok(RangeTotals {
        income,
        expense,
        balance: income - expense,
    })
}

/// Partitions the range's expenses by label, keeping first-seen order.
pub async fn grouped_breakdown(
    db: &DatabaseConnection,
    scope: &UserScope,
    query: RangeQuery,
) -> Result<Vec<LabelBreakdown>> {
    let expenses = expenses_in_range(db, scope, query).await?;
    let labels = label_index(db, scope).await?;

    let mut partitions: Vec<(i64, LabelBreakdown)> = Vec::new();
    for row in expenses {
        let slot = partitions.iter_mut().find(|(id, _)| *id == row.label_id);
        match slot {
            Some((_, partition)) => {
                partition.total += row.amount;
                partition.expenses.push(row);
            }
            None => {
                partitions.push((
                    row.label_id,
                    LabelBreakdown {
                        label: labels.get(&row.label_id).cloned(),
                        total: row.amount,
                        expenses: vec![row],
                    },
                ));
            }
        }
    }

    Ok(partitions.into_iter().map(|(_, p)| p).collect())
}

/// Builds the home view-model for the range.
pub async fn overview(
    db: &DatabaseConnection,
    scope: &UserScope,
    query: RangeQuery,
) -> Result<Overview> {
    let totals = range_totals(db, scope, query).await?;
    let breakdown = grouped_breakdown(db, scope, query).await?;
    let groups = group::list_active(db, scope).await?;
    let labels = label::list_active(db, scope).await?;

    Ok(Overview {
        query,
        totals,
        breakdown,
        groups,
        labels,
    })
}

/// Builds the monthly dashboard for the month containing `today`.
///
/// Without a selected group the dashboard only carries the group picker;
/// with one, a budget-vs-actual row per active label of that group.
pub async fn monthly_dashboard(
    db: &DatabaseConnection,
    scope: &UserScope,
    today: NaiveDate,
    group_id: Option<i64>,
) -> Result<MonthlyDashboard> {
    let (start, end) = month_bounds(today);
    let groups = group::list_active(db, scope).await?;

    let Some(group_id) = group_id else {
        return Ok(MonthlyDashboard {
            start,
            end,
            groups,
            selected_group: None,
            rows: Vec::new(),
            total_expected: 0,
            total_actual: 0,
        });
    };

    let selected = group::get_active(db, scope, group_id).await?;
    let members = label::list_for_group(db, scope, group_id).await?;

    let mut in_month = expenses_in_range(
        db,
        scope,
        RangeQuery {
            start,
            end,
            label_id: None,
            group_id: Some(group_id),
        },
    )
    .await?;

    let mut rows = Vec::with_capacity(members.len());
    let mut total_expected = 0;
    let mut total_actual = 0;
    for member in members {
        let (own, rest): (Vec<_>, Vec<_>) =
            in_month.into_iter().partition(|e| e.label_id == member.id);
        in_month = rest;

        let actual: i64 = own.iter().map(|e| e.amount).sum();
        total_expected += member.expected_monthly;
        total_actual += actual;
        rows.push(LabelSpend {
            expected: member.expected_monthly,
            actual,
            expenses: own,
            label: member,
        });
    }

    Ok(MonthlyDashboard {
        start,
        end,
        groups,
        selected_group: Some(selected),
        rows,
        total_expected,
        total_actual,
    })
}

/// The range's expenses, newest first, honoring the filter precedence.
pub(crate) async fn expenses_in_range(
    db: &DatabaseConnection,
    scope: &UserScope,
    query: RangeQuery,
) -> Result<Vec<expense::Model>> {
    let mut select = scope
        .expenses()
        .filter(expense::Column::Date.between(query.start, query.end));

    if let Some(label_id) = query.label_id {
        select = select.filter(expense::Column::LabelId.eq(label_id));
    } else if let Some(group_id) = query.group_id {
        // Deleted labels keep their expenses; membership, not liveness,
        // decides what the group filter covers.
        let member_ids: Vec<i64> = scope
            .labels()
            .filter(label_entity::Column::GroupId.eq(group_id))
            .all(db)
            .await?
            .into_iter()
            .map(|l| l.id)
            .collect();
        select = select.filter(expense::Column::LabelId.is_in(member_ids));
    }

    select
        .order_by_desc(expense::Column::Date)
        .order_by_desc(expense::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// The range's incomes, newest first.
pub(crate) async fn incomes_in_range(
    db: &DatabaseConnection,
    scope: &UserScope,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<income::Model>> {
    scope
        .incomes()
        .filter(income::Column::Date.between(start, end))
        .order_by_desc(income::Column::Date)
        .all(db)
        .await
        .map_err(Into::into)
}

/// All of the user's labels, deleted included, indexed by id.
pub(crate) async fn label_index(
    db: &DatabaseConnection,
    scope: &UserScope,
) -> Result<HashMap<i64, label_entity::Model>> {
    let labels = scope.labels().all(db).await?;
    Ok(labels.into_iter().map(|l| (l.id, l)).collect())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::{expense as expenses, group as groups, income as incomes, label as labels};
    use crate::test_utils::{create_test_user, d, setup_test_db};

    #[test]
    fn test_month_bounds_handles_month_lengths() {
        assert_eq!(
            month_bounds(d(2024, 2, 10)),
            (d(2024, 2, 1), d(2024, 2, 29)) // leap year
        );
        assert_eq!(month_bounds(d(2023, 2, 1)), (d(2023, 2, 1), d(2023, 2, 28)));
        assert_eq!(month_bounds(d(2024, 4, 30)), (d(2024, 4, 1), d(2024, 4, 30)));
        assert_eq!(month_bounds(d(2024, 12, 25)), (d(2024, 12, 1), d(2024, 12, 31)));
    }

    #[tokio::test]
    async fn test_range_bounds_are_inclusive() -> Result<()> {
        let db = setup_test_db().await?;
        let (_, scope) = create_test_user(&db).await?;
        let food = groups::create(&db, &scope, "Food").await?;
        let bread = labels::create(&db, &scope, food.id, "Bread", 0).await?;

        expenses::add(&db, &scope, bread.id, 10, d(2024, 5, 1)).await?;
        expenses::add(&db, &scope, bread.id, 20, d(2024, 5, 31)).await?;
        expenses::add(&db, &scope, bread.id, 40, d(2024, 6, 1)).await?;
        incomes::add(&db, &scope, 100, d(2024, 4, 30)).await?;
        incomes::add(&db, &scope, 500, d(2024, 5, 15)).await?;

        let totals =
            range_totals(&db, &scope, RangeQuery::over(d(2024, 5, 1), d(2024, 5, 31))).await?;

        // Both boundary days count; the June expense and April income do not
        assert_eq!(totals.expense, 30);
        assert_eq!(totals.income, 500);
        assert_eq!(totals.balance, 470);

        Ok(())
    }

    #[tokio::test]
    async fn test_label_filter_wins_over_group_filter() -> Result<()> {
        let db = setup_test_db().await?;
        let (_, scope) = create_test_user(&db).await?;
        let food = groups::create(&db, &scope, "Food").await?;
        let housing = groups::create(&db, &scope, "Housing").await?;
        let bread = labels::create(&db, &scope, food.id, "Bread", 0).await?;
        let rent = labels::create(&db, &scope, housing.id, "Rent", 0).await?;

        expenses::add(&db, &scope, bread.id, 10, d(2024, 5, 2)).await?;
        expenses::add(&db, &scope, rent.id, 900, d(2024, 5, 3)).await?;

        let query = RangeQuery {
            start: d(2024, 5, 1),
            end: d(2024, 5, 31),
            label_id: Some(rent.id),
            group_id: Some(food.id), // would select bread; must lose
        };
        let totals = range_totals(&db, &scope, query).await?;
        assert_eq!(totals.expense, 900);

        Ok(())
    }

    #[tokio::test]
    async fn test_breakdown_partitions_by_label() -> Result<()> {
        let db = setup_test_db().await?;
        let (_, scope) = create_test_user(&db).await?;
        let food = groups::create(&db, &scope, "Food").await?;
        let bread = labels::create(&db, &scope, food.id, "Bread", 0).await?;
        let fruit = labels::create(&db, &scope, food.id, "Fruit", 0).await?;

        expenses::add(&db, &scope, bread.id, 10, d(2024, 5, 2)).await?;
        expenses::add(&db, &scope, fruit.id, 5, d(2024, 5, 3)).await?;
        expenses::add(&db, &scope, bread.id, 15, d(2024, 5, 4)).await?;

        let partitions =
            grouped_breakdown(&db, &scope, RangeQuery::over(d(2024, 5, 1), d(2024, 5, 31)))
                .await?;

        assert_eq!(partitions.len(), 2);
        let bread_part = partitions
            .iter()
            .find(|p| p.label.as_ref().map(|l| l.id) == Some(bread.id))
            .unwrap();
        assert_eq!(bread_part.total, 25);
        assert_eq!(bread_part.expenses.len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_range_totals_is_repeatable() -> Result<()> {
        let db = setup_test_db().await?;
        let (_, scope) = create_test_user(&db).await?;
        let food = groups::create(&db, &scope, "Food").await?;
        let bread = labels::create(&db, &scope, food.id, "Bread", 0).await?;
        expenses::add(&db, &scope, bread.id, 10, d(2024, 5, 2)).await?;
        incomes::add(&db, &scope, 100, d(2024, 5, 2)).await?;

        let query = RangeQuery::over(d(2024, 5, 1), d(2024, 5, 31));
        let first = range_totals(&db, &scope, query).await?;
        let second = range_totals(&db, &scope, query).await?;
        assert_eq!(first, second);

        Ok(())
    }

    #[tokio::test]
    async fn test_monthly_dashboard_rows_cover_selected_group() -> Result<()> {
        let db = setup_test_db().await?;
        let (_, scope) = create_test_user(&db).await?;
        let food = groups::create(&db, &scope, "Food").await?;
        let bread = labels::create(&db, &scope, food.id, "Bread", 120).await?;
        let fruit = labels::create(&db, &scope, food.id, "Fruit", 60).await?;

        expenses::add(&db, &scope, bread.id, 30, d(2024, 5, 2)).await?;
        expenses::add(&db, &scope, bread.id, 20, d(2024, 5, 20)).await?;
        // Outside the dashboard month
        expenses::add(&db, &scope, fruit.id, 99, d(2024, 4, 28)).await?;

        let dashboard = monthly_dashboard(&db, &scope, d(2024, 5, 15), Some(food.id)).await?;

        assert_eq!(dashboard.start, d(2024, 5, 1));
        assert_eq!(dashboard.end, d(2024, 5, 31));
        assert_eq!(dashboard.rows.len(), 2);
        assert_eq!(dashboard.rows[0].actual, 50);
        assert_eq!(dashboard.rows[1].actual, 0);
        assert_eq!(dashboard.total_expected, 180);
        assert_eq!(dashboard.total_actual, 50);

        Ok(())
    }
}
