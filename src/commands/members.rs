use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;

use crate::formatting::PrintFormatted;
use crate::models::MemberFilter;
use crate::MembershipStore;

#[derive(Args, Debug)]
pub struct AddMember {
    #[clap(short, long)]
    pub first_name: String,
    #[clap(short, long)]
    pub last_name: String,
    /// Date of birth, YYYY-MM-DD
    #[clap(short, long)]
    pub birthday: NaiveDate,
}

impl AddMember {
    /// Run the command and register a member
    pub async fn run(self, store: &MembershipStore) -> Result<()> {
        let member_number = store
            .add_member(&self.first_name, &self.last_name, self.birthday)
            .await?;
        println!("Member added with number {}.", member_number);
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct DeleteMember {
    #[clap(short, long)]
    pub member: u32,
}

impl DeleteMember {
    pub async fn run(self, store: &MembershipStore) -> Result<()> {
        let member = store.get_member(self.member).await?;
        store.delete_member(self.member).await?;
        println!("Deleted member {} ({}).", member.member_number, member.full_name());
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct ListMembers {
    #[clap(short, long)]
    pub name: Option<String>,
}

impl ListMembers {
    /// Run the command and list members
    pub async fn run(self, store: &MembershipStore) -> Result<()> {
        let filter = MemberFilter {
            name: self.name,
            ..Default::default()
        };
        let members = store.list_members(&filter).await?;
        println!("{} members.", members.len());
        members.print_formatted();
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct ShowMember {
    #[clap(short, long)]
    pub member: u32,
}

impl ShowMember {
    /// Run the command and show a member
    pub async fn run(self, store: &MembershipStore) -> Result<()> {
        let member = store.get_member(self.member).await?;
        let memberships = store.get_memberships(self.member).await?;
        let deposits = store.get_deposits(self.member).await?;

        println!();
        member.print_formatted();
        println!();
        memberships.print_formatted();
        println!();
        deposits.print_formatted();
        println!();
        Ok(())
    }
}
