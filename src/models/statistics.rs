use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Deposit, Member};

/// Deposit totals of a member. Derived on every query,
/// never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepositStatistics {
    pub year: i32,
    pub total_amount: Decimal,
    pub member: Member,
}

impl DepositStatistics {
    /// Sum up the deposits of a member and tag the total with `year`.
    ///
    /// All deposits are summed, deposits carry no date to filter by.
    pub fn summarize(year: i32, member: Member, deposits: &[Deposit]) -> Self {
        let total_amount = deposits.iter().map(|d| d.amount).sum();
        Self {
            year,
            total_amount,
            member,
        }
    }
}
