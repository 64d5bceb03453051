//! Yearly dashboard - monthly series, category totals, and chart series.
//!
//! All pure reads over one calendar year. Month boundaries come from
//! [`report::month_bounds`], so 28/29/30/31-day months are handled by
//! construction. The fixed/variable columns match the well-known seeded group
//! names and the installment column matches the well-known label name; a user
//! without those simply gets zero columns.

use crate::core::{group, label, report, scope::UserScope, seed};
use crate::entities::{expense, group as group_entity, label as label_entity};
use crate::errors::Result;
use sea_orm::DatabaseConnection;
use serde::Serialize;

use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};
use std::ops::RangeInclusive;

/// Years selectable on the dashboard.
pub const YEAR_RANGE: RangeInclusive<i32> = 2020..=2030;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// One month of the yearly breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthRow {
    /// Month number, 1-12
    pub month: u32,
    /// English month name
    pub name: &'static str,
    /// Income recorded in the month
    pub income: i64,
    /// Spending filed under the fixed-expenses group
    pub fixed: i64,
    /// Spending filed under the variable-expenses group
    pub variable: i64,
    /// Spending filed under the annual-installment label
    pub installment: i64,
    /// `income - (fixed + variable + installment)`
    pub balance: i64,
}

/// Budget-vs-actual for one label over the year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTotal {
    /// The label
    pub label: label_entity::Model,
    /// Spending recorded in the year
    pub actual: i64,
    /// `expected_monthly * 12`
    pub expected: i64,
    /// `actual - expected`
    pub diff: i64,
}

/// Actual yearly spending of one group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupTotal {
    /// The group
    pub group: group_entity::Model,
    /// Spending recorded in the year across the group's labels
    pub total: i64,
}

/// A chart point carrying a name and a value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamedValue {
    /// Series label
    pub name: String,
    /// Series value
    pub value: i64,
}

/// A bar-chart point comparing actual against expected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BarPoint {
    /// Series label
    pub name: String,
    /// Recorded spending
    pub actual: i64,
    /// Budgeted spending
    pub expected: i64,
}

/// A line-chart point of income against expense for one month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LinePoint {
    /// English month name
    pub month: &'static str,
    /// Income recorded in the month
    pub income: i64,
    /// Tracked spending in the month
    pub expense: i64,
}

/// Chart-ready series derived from the yearly aggregates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartData {
    /// Per-label actuals where spending was recorded (pie/donut)
    pub pie: Vec<NamedValue>,
    /// Per-label actual vs. expected (bar)
    pub bar: Vec<BarPoint>,
    /// Per-month income vs. expense (line)
    pub line: Vec<LinePoint>,
    /// Per-month expense intensity (heatmap)
    pub heatmap: Vec<NamedValue>,
    /// Per-group actuals where spending was recorded
    pub group_totals: Vec<NamedValue>,
    /// Monthly actuals of the savings label
    pub savings: Vec<NamedValue>,
}

/// View-model for the yearly dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearlyDashboard {
    /// The displayed year
    pub year: i32,
    /// Selectable years
    pub years: Vec<i32>,
    /// Twelve-month breakdown
    pub monthly: Vec<MonthRow>,
    /// Income recorded over the whole year
    pub total_income: i64,
    /// Spending recorded over the whole year
    pub total_expense: i64,
    /// `total_income - total_expense`
    pub balance: i64,
    /// Budget-vs-actual per active label
    pub categories: Vec<CategoryTotal>,
    /// Actual spending per active group, where any was recorded
    pub group_totals: Vec<GroupTotal>,
    /// Derived chart series
    pub charts: ChartData,
}

fn year_bounds(year: i32) -> (NaiveDate, NaiveDate) {
    let start = NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or(NaiveDate::MIN);
    let end = NaiveDate::from_ymd_opt(year, 12, 31).unwrap_or(NaiveDate::MAX);
    (start, end)
}

fn sum_in<F>(expenses: &[expense::Model], start: NaiveDate, end: NaiveDate, keep: F) -> i64
where
    F: Fn(&expense::Model) -> bool,
{
    expenses
        .iter()
        .filter(|e| e.date >= start && e.date <= end && keep(e))
        .map(|e| e.amount)
        .sum()
}

/// Computes the twelve-month income/fixed/variable/installment breakdown.
pub async fn monthly_series(
    db: &DatabaseConnection,
    scope: &UserScope,
    year: i32,
) -> Result<Vec<MonthRow>> {
    let (start, end) = year_bounds(year);
    let expenses =
        report::expenses_in_range(db, scope, report::RangeQuery::over(start, end)).await?;
    let incomes = report::incomes_in_range(db, scope, start, end).await?;
    let labels = report::label_index(db, scope).await?;

    // Classify label ids once; deleted labels still resolve so their
    // expenses keep counting toward the right column.
    let group_names: HashMap<i64, String> = scope
        .groups()
        .all(db)
        .await?
        .into_iter()
        .map(|g| (g.id, g.name))
        .collect();
    let ids_in_group = |wanted: &str| -> HashSet<i64> {
        labels
            .values()
            .filter(|l| group_names.get(&l.group_id).map(String::as_str) == Some(wanted))
            .map(|l| l.id)
            .collect()
    };
    let fixed_ids = ids_in_group(seed::FIXED_GROUP_NAME);
    let variable_ids = ids_in_group(seed::VARIABLE_GROUP_NAME);
    let installment_ids: HashSet<i64> = labels
        .values()
        .filter(|l| l.name == seed::ANNUAL_INSTALLMENT_LABEL)
        .map(|l| l.id)
        .collect();

    let mut rows = Vec::with_capacity(12);
    for (month, name) in (1u32..=12).zip(MONTH_NAMES) {
        let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
            continue;
        };
        let (month_start, month_end) = report::month_bounds(first);

        let fixed = sum_in(&expenses, month_start, month_end, |e| {
            fixed_ids.contains(&e.label_id)
        });
        let variable = sum_in(&expenses, month_start, month_end, |e| {
            variable_ids.contains(&e.label_id)
        });
        let installment = sum_in(&expenses, month_start, month_end, |e| {
            installment_ids.contains(&e.label_id)
        });
        let income: i64 = incomes
            .iter()
            .filter(|i| i.date >= month_start && i.date <= month_end)
            .map(|i| i.amount)
            .sum();

        rows.push(MonthRow {
            month,
            name,
            income,
            fixed,
            variable,
            installment,
            balance: income - (fixed + variable + installment),
        });
    }
    Ok(rows)
}

/// Computes actual vs. expected for every active label over the year.
pub async fn category_totals(
    db: &DatabaseConnection,
    scope: &UserScope,
    year: i32,
) -> Result<Vec<CategoryTotal>> {
    let (start, end) = year_bounds(year);
    let expenses =
        report::expenses_in_range(db, scope, report::RangeQuery::over(start, end)).await?;

    let mut totals = Vec::new();
    for label in label::list_active(db, scope).await? {
        let actual = sum_in(&expenses, start, end, |e| e.label_id == label.id);
        let expected = label.expected_monthly * 12;
        totals.push(CategoryTotal {
            label,
            actual,
            expected,
            diff: actual - expected,
        });
    }
    Ok(totals)
}

/// Computes actual yearly spending per active group, keeping non-zero rows.
pub async fn group_totals(
    db: &DatabaseConnection,
    scope: &UserScope,
    year: i32,
) -> Result<Vec<GroupTotal>> {
    let (start, end) = year_bounds(year);
    let expenses =
        report::expenses_in_range(db, scope, report::RangeQuery::over(start, end)).await?;
    let labels = report::label_index(db, scope).await?;

    let mut totals = Vec::new();
    for group in group::list_active(db, scope).await? {
        let total = sum_in(&expenses, start, end, |e| {
            labels.get(&e.label_id).map(|l| l.group_id) == Some(group.id)
        });
        if total > 0 {
            totals.push(GroupTotal { group, total });
        }
    }
    Ok(totals)
}

/// Monthly actuals of the savings label, matched by name substring.
///
/// All-zero months are reported when no label matches.
pub async fn savings_series(
    db: &DatabaseConnection,
    scope: &UserScope,
    year: i32,
) -> Result<Vec<NamedValue>> {
    let (start, end) = year_bounds(year);
    let expenses =
        report::expenses_in_range(db, scope, report::RangeQuery::over(start, end)).await?;

    let hint = seed::SAVINGS_NAME_HINT.to_lowercase();
    let savings_label = label::list_active(db, scope)
        .await?
        .into_iter()
        .find(|l| l.name.to_lowercase().contains(&hint));

    let mut series = Vec::with_capacity(12);
    for (month, name) in (1u32..=12).zip(MONTH_NAMES) {
        let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
            continue;
        };
        let (month_start, month_end) = report::month_bounds(first);
        let value = savings_label.as_ref().map_or(0, |l| {
            sum_in(&expenses, month_start, month_end, |e| e.label_id == l.id)
        });
        series.push(NamedValue {
            name: name.to_string(),
            value,
        });
    }
    Ok(series)
}

/// Per-label actual totals where spending was recorded (pie/donut series).
#[must_use]
pub fn pie_slices(categories: &[CategoryTotal]) -> Vec<NamedValue> {
    categories
        .iter()
        .filter(|c| c.actual > 0)
        .map(|c| NamedValue {
            name: c.label.name.clone(),
            value: c.actual,
        })
        .collect()
}

/// Per-label actual vs. expected (bar series).
#[must_use]
pub fn actual_vs_expected(categories: &[CategoryTotal]) -> Vec<BarPoint> {
    categories
        .iter()
        .map(|c| BarPoint {
            name: c.label.name.clone(),
            actual: c.actual,
            expected: c.expected,
        })
        .collect()
}

/// Per-month income vs. tracked expense (line series).
#[must_use]
pub fn income_vs_expense(monthly: &[MonthRow]) -> Vec<LinePoint> {
    monthly
        .iter()
        .map(|m| LinePoint {
            month: m.name,
            income: m.income,
            expense: m.fixed + m.variable + m.installment,
        })
        .collect()
}

/// Per-month tracked expense intensity (heatmap series).
#[must_use]
pub fn expense_intensity(monthly: &[MonthRow]) -> Vec<NamedValue> {
    monthly
        .iter()
        .map(|m| NamedValue {
            name: m.name.to_string(),
            value: m.fixed + m.variable + m.installment,
        })
        .collect()
}

/// Builds the full yearly dashboard view-model.
pub async fn dashboard(
    db: &DatabaseConnection,
    scope: &UserScope,
    year: i32,
) -> Result<YearlyDashboard> {
    let (start, end) = year_bounds(year);

    let monthly = monthly_series(db, scope, year).await?;
    let categories = category_totals(db, scope, year).await?;
    let groups = group_totals(db, scope, year).await?;
    let savings = savings_series(db, scope, year).await?;

    let totals = report::range_totals(db, scope, report::RangeQuery::over(start, end)).await?;

    let charts = ChartData {
        pie: pie_slices(&categories),
        bar: actual_vs_expected(&categories),
        line: income_vs_expense(&monthly),
        heatmap: expense_intensity(&monthly),
        group_totals: groups
            .iter()
            .map(|g| NamedValue {
                name: g.group.name.clone(),
                value: g.total,
            })
            .collect(),
        savings,
    };

    Ok(YearlyDashboard {
        year,
        years: YEAR_RANGE.collect(),
        monthly,
        total_income: totals.income,
        total_expense: totals.expense,
        balance: totals.balance,
        categories,
        group_totals: groups,
        charts,
    })
}
