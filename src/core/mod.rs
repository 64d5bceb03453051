//! Core business logic - framework-agnostic category-tree, ledger, seeding,
//! and reporting operations.
//!
//! Every operation takes an explicit [`scope::UserScope`] so ownership
//! filtering is enforced at each call site instead of through ambient state.
//! Mutations that touch several sibling rows (re-pack, swap, seeding, bulk
//! inserts) run inside a single store transaction.

/// Account creation and user-level settings
pub mod account;
/// Expense ledger operations, including the bulk per-label sheet
pub mod expense;
/// Group operations - create, rename, reorder, soft-delete, restore
pub mod group;
/// Income ledger operations
pub mod income;
/// Label operations - create, update, reorder, soft-delete, restore
pub mod label;
/// Dense-ordinal helpers shared by the group and label modules
pub mod ordering;
/// Planning projection and budget simulation
pub mod planning;
/// Range totals, grouped breakdown, and the monthly dashboard
pub mod report;
/// Explicit per-user scoping handle
pub mod scope;
/// Default category seeding for fresh accounts
pub mod seed;
/// Yearly dashboard - monthly series, category totals, chart series
pub mod yearly;
