//! Aggregate totals over a list of transactions.

use serde::{Deserialize, Serialize};

/// Income, expense, balance and savings-rate figures.
///
/// Every figure is rounded to two decimal places. `balance` is derived
/// from the already-rounded `income` and `expenses`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSummary {
    /// Sum of non-negative amounts.
    pub income: f64,
    /// Sum of the absolute values of negative amounts.
    pub expenses: f64,
    /// `income - expenses`.
    pub balance: f64,
    /// Balance as a percentage of income; `0` when there is no income.
    pub savings_rate: f64,
}
