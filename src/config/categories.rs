//! Seed-catalog loading from categories.toml
//!
//! New accounts are seeded with a fixed set of groups and labels. The catalog
//! defining that set can be loaded from a TOML file, and a built-in default
//! matching the shipped starter categories is used when no file is given.
//! Catalog order is meaningful: groups and labels receive their ordinals from
//! their position in the file, starting at 1.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Catalog of groups and labels seeded into a fresh account
#[derive(Debug, Clone, Deserialize)]
pub struct Catalog {
    /// Groups to seed, in display order
    pub groups: Vec<GroupSeed>,
}

/// Seed definition for a single group
#[derive(Debug, Clone, Deserialize)]
pub struct GroupSeed {
    /// Stable identifier, unique per user (e.g. `monthly_fixed`)
    pub code: String,
    /// Human-readable group name
    pub name: String,
    /// Whether the group resists rename and deletion
    pub protected: bool,
    /// Labels to seed inside the group, in display order
    pub labels: Vec<LabelSeed>,
}

/// Seed definition for a single label
#[derive(Debug, Clone, Deserialize)]
pub struct LabelSeed {
    /// Human-readable label name
    pub name: String,
    /// Initial monthly budget expectation
    #[serde(default)]
    pub expected_monthly: i64,
}

impl LabelSeed {
    fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            expected_monthly: 0,
        }
    }
}

/// Loads a seed catalog from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required fields are missing
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Catalog> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read catalog file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse categories.toml: {e}"),
    })
}

impl Default for Catalog {
    /// The built-in starter catalog: five groups, the first three protected,
    /// every label starting with a zero expectation.
    fn default() -> Self {
        let group = |code: &str, name: &str, protected: bool, labels: &[&str]| GroupSeed {
            code: code.to_string(),
            name: name.to_string(),
            protected,
            labels: labels.iter().map(|n| LabelSeed::named(n)).collect(),
        };

        Self {
            groups: vec![
                group(
                    "annual_expenses",
                    "Annual Expenses",
                    true,
                    &["Vacation", "Car Insurance"],
                ),
                group(
                    "monthly_fixed",
                    "Monthly Fixed Expenses",
                    true,
                    &[
                        "Rent",
                        "Pocket Money",
                        "Loan",
                        "School Fees",
                        "Savings",
                        "Family Support",
                        "Phone Plan",
                        "Electricity",
                        "Water",
                    ],
                ),
                group(
                    "monthly_variable",
                    "Monthly Variable Expenses",
                    true,
                    &[
                        "Fuel",
                        "Vegetables",
                        "Fruits",
                        "Meat",
                        "Charity",
                        "Dining Out",
                        "Clothes",
                    ],
                ),
                group("groceries", "Groceries", false, &["Flour", "Rice"]),
                group(
                    "emergency",
                    "Emergency",
                    false,
                    &["Emergency Fund", "Unexpected Repairs"],
                ),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_catalog_toml() {
        let toml_str = r#"
            [[groups]]
            code = "annual_expenses"
            name = "Annual Expenses"
            protected = true
            labels = [
                { name = "Vacation" },
                { name = "Car Insurance", expected_monthly = 120 },
            ]

            [[groups]]
            code = "groceries"
            name = "Groceries"
            protected = false
            labels = [{ name = "Flour" }]
        "#;

        let catalog: Catalog = toml::from_str(toml_str).unwrap();
        assert_eq!(catalog.groups.len(), 2);
        assert_eq!(catalog.groups[0].code, "annual_expenses");
        assert!(catalog.groups[0].protected);
        assert_eq!(catalog.groups[0].labels[0].expected_monthly, 0);
        assert_eq!(catalog.groups[0].labels[1].expected_monthly, 120);
        assert!(!catalog.groups[1].protected);
    }

    #[test]
    fn test_default_catalog_shape() {
        let catalog = Catalog::default();

        assert_eq!(catalog.groups.len(), 5);

        let label_counts: Vec<usize> = catalog.groups.iter().map(|g| g.labels.len()).collect();
        assert_eq!(label_counts, vec![2, 9, 7, 2, 2]);

        let protected: Vec<bool> = catalog.groups.iter().map(|g| g.protected).collect();
        assert_eq!(protected, vec![true, true, true, false, false]);

        for group in &catalog.groups {
            for label in &group.labels {
                assert_eq!(label.expected_monthly, 0, "label {} not zeroed", label.name);
            }
        }
    }
}
