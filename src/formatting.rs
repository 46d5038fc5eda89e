use crate::models::{Deposit, DepositStatistics, Member, Membership};

pub trait PrintFormatted {
    fn print_formatted(&self);
}

impl PrintFormatted for Member {
    fn print_formatted(&self) {
        println!("Number:\t\t\t{}", self.member_number);
        println!("First Name:\t\t{}", self.first_name);
        println!("Last Name:\t\t{}", self.last_name);
        println!("Birthday:\t\t{}", self.birthday);
    }
}

impl PrintFormatted for Vec<Member> {
    fn print_formatted(&self) {
        println!(
            "{:>6}\t{:<24}\t{:<24}\t{}",
            "Number", "First Name", "Last Name", "Birthday"
        );
        println!("{:-<80}", "-");
        for member in self {
            println!(
                "{:>6}\t{:<24}\t{:<24}\t{}",
                member.member_number, member.first_name, member.last_name, member.birthday
            );
        }
    }
}

impl PrintFormatted for Membership {
    fn print_formatted(&self) {
        let end = match self.end {
            Some(end) => end.format("%Y-%m-%d %H:%M:%S").to_string(),
            None => "None".to_string(),
        };
        println!("Membership:\t\t{}", self.id);
        println!("Member:\t\t\t{}", self.member_number);
        println!("Begin:\t\t\t{}", self.begin.format("%Y-%m-%d %H:%M:%S"));
        println!("End:\t\t\t{}", end);
        println!("Active:\t\t\t{}", self.active);
    }
}

impl PrintFormatted for Vec<Membership> {
    fn print_formatted(&self) {
        println!("{:>6}\t{:<20}\t{:<20}\t{}", "ID", "Begin", "End", "Active");
        println!("{:-<70}", "-");
        for membership in self {
            let end = match membership.end {
                Some(end) => end.format("%Y-%m-%d %H:%M:%S").to_string(),
                None => "".to_string(),
            };
            let active = if membership.active { "*" } else { "" };
            println!(
                "{:>6}\t{:<20}\t{:<20}\t{}",
                membership.id,
                membership.begin.format("%Y-%m-%d %H:%M:%S"),
                end,
                active
            );
        }
    }
}

/// A deposit table row. Amounts are printed exactly as stored.
pub fn deposit_row(deposit: &Deposit) -> String {
    format!(
        "{:>6}\t{:>10}\t{:>12}",
        deposit.id, deposit.membership_id, deposit.amount
    )
}

pub fn statistics_row(stats: &DepositStatistics) -> String {
    format!(
        "{:>6}\t{:<32}\t{:>4}\t{:>12}",
        stats.member.member_number,
        stats.member.full_name(),
        stats.year,
        stats.total_amount
    )
}

impl PrintFormatted for Vec<Deposit> {
    fn print_formatted(&self) {
        println!("{:>6}\t{:>10}\t{:>12}", "ID", "Membership", "Amount");
        println!("{:-<40}", "-");
        for deposit in self {
            println!("{}", deposit_row(deposit));
        }
    }
}

impl PrintFormatted for Vec<DepositStatistics> {
    fn print_formatted(&self) {
        println!(
            "{:>6}\t{:<32}\t{:>4}\t{:>12}",
            "Number", "Name", "Year", "Total"
        );
        println!("{:-<70}", "-");
        for stats in self {
            println!("{}", statistics_row(stats));
        }
    }
}
