use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct DepositFilter {
    pub id: Option<u32>,
    pub member_number: Option<u32>,
    pub membership_id: Option<u32>,
}

/// A cash deposit, made against the membership that was
/// active at the time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Deposit {
    pub id: u32,
    pub membership_id: u32,
    pub member_number: u32,
    pub amount: Decimal,
}
