use anyhow::Result;
use clap::Args;
use rust_decimal::Decimal;

use crate::formatting::PrintFormatted;
use crate::MembershipStore;

#[derive(Args, Debug)]
pub struct MakeDeposit {
    #[clap(short, long)]
    pub member: u32,
    #[clap(short, long)]
    pub amount: Decimal,
}

impl MakeDeposit {
    pub async fn run(self, store: &MembershipStore) -> Result<()> {
        store.deposit(self.member, self.amount).await?;
        println!("Deposited {} for member {}.", self.amount, self.member);
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct DepositStatisticsReport {
    /// Print as JSON
    #[clap(long)]
    pub json: bool,
}

impl DepositStatisticsReport {
    pub async fn run(self, store: &MembershipStore) -> Result<()> {
        let statistics = store.get_deposit_statistics().await?;
        if self.json {
            println!("{}", serde_json::to_string_pretty(&statistics)?);
        } else {
            statistics.print_formatted();
        }
        Ok(())
    }
}
