use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands::{
    AddMember, CancelMembership, DeleteMember, DepositStatisticsReport, JoinMember, ListMembers,
    MakeDeposit, ShowMember,
};
use crate::MembershipStore;

#[derive(Parser, Debug)]
#[clap(name = "cashdesk", version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[clap(long, env = "CASHDESK_DB", default_value = "members.sqlite3")]
    pub db: String,

    /// Log filter, used when RUST_LOG is not set
    #[clap(long, default_value = "info")]
    pub log_level: String,

    #[clap(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn init() -> Self {
        Self::parse()
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Register a member
    #[clap(name = "add")]
    Add(AddMember),
    /// Delete a member with all memberships and deposits
    #[clap(name = "delete")]
    Delete(DeleteMember),
    /// List members
    #[clap(name = "list")]
    List(ListMembers),
    /// Show a member with memberships and deposits
    #[clap(name = "show")]
    Show(ShowMember),

    /// Start a membership
    #[clap(name = "join")]
    Join(JoinMember),
    /// Cancel the active membership
    #[clap(name = "cancel")]
    Cancel(CancelMembership),

    /// Record a deposit
    #[clap(name = "deposit")]
    Deposit(MakeDeposit),
    /// Deposit totals per member
    #[clap(name = "statistics")]
    Statistics(DepositStatisticsReport),
}

impl Command {
    pub async fn run(self, store: &MembershipStore) -> Result<()> {
        match self {
            Command::Add(cmd) => cmd.run(store).await,
            Command::Delete(cmd) => cmd.run(store).await,
            Command::List(cmd) => cmd.run(store).await,
            Command::Show(cmd) => cmd.run(store).await,
            Command::Join(cmd) => cmd.run(store).await,
            Command::Cancel(cmd) => cmd.run(store).await,
            Command::Deposit(cmd) => cmd.run(store).await,
            Command::Statistics(cmd) => cmd.run(store).await,
        }
    }
}
