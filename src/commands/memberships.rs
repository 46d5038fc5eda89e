use anyhow::Result;
use clap::Args;

use crate::formatting::PrintFormatted;
use crate::MembershipStore;

#[derive(Args, Debug)]
pub struct JoinMember {
    #[clap(short, long)]
    pub member: u32,
}

impl JoinMember {
    pub async fn run(self, store: &MembershipStore) -> Result<()> {
        let membership = store.join_member(self.member).await?;
        membership.print_formatted();
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct CancelMembership {
    #[clap(short, long)]
    pub member: u32,
}

impl CancelMembership {
    pub async fn run(self, store: &MembershipStore) -> Result<()> {
        let membership = store.cancel_membership(self.member).await?;
        membership.print_formatted();
        Ok(())
    }
}
