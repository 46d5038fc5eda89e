use anyhow::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::{
    Deposit, DepositFilter, Membership, MembershipFilter, Query,
};

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct MemberFilter {
    pub member_number: Option<u32>,
    /// Exact, case sensitive match
    pub last_name: Option<String>,
    /// Substring search over first and last name
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Member {
    pub member_number: u32,
    pub first_name: String,
    pub last_name: String,
    pub birthday: NaiveDate,
}

impl Member {
    /// Get all memberships of a member, oldest first
    pub async fn get_memberships<DB>(&self, db: &DB) -> Result<Vec<Membership>>
    where
        DB: Query<Membership, Filter = MembershipFilter>,
    {
        let memberships = db
            .query(&MembershipFilter {
                member_number: Some(self.member_number),
                ..Default::default()
            })
            .await?;
        Ok(memberships)
    }

    /// Get the currently active membership, if there is one
    pub async fn get_active_membership<DB>(
        &self,
        db: &DB,
    ) -> Result<Option<Membership>>
    where
        DB: Query<Membership, Filter = MembershipFilter>,
    {
        let mut memberships = db
            .query(&MembershipFilter {
                member_number: Some(self.member_number),
                active: Some(true),
                ..Default::default()
            })
            .await?;
        Ok(memberships.pop())
    }

    /// Get all deposits made by a member
    pub async fn get_deposits<DB>(&self, db: &DB) -> Result<Vec<Deposit>>
    where
        DB: Query<Deposit, Filter = DepositFilter>,
    {
        let deposits = db
            .query(&DepositFilter {
                member_number: Some(self.member_number),
                ..Default::default()
            })
            .await?;
        Ok(deposits)
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
