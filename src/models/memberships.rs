use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct MembershipFilter {
    pub id: Option<u32>,
    pub member_number: Option<u32>,
    pub active: Option<bool>,
}

/// An enrollment interval of a member.
#[derive(Debug, Clone, Default, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Membership {
    pub id: u32,
    pub member_number: u32,
    #[sqlx(rename = "began_at")]
    pub begin: NaiveDateTime,
    #[sqlx(rename = "ended_at")]
    pub end: Option<NaiveDateTime>,
    pub active: bool,
}

impl Membership {
    /// Start a new, active membership for a member
    pub fn start(member_number: u32, begin: NaiveDateTime) -> Self {
        Self {
            member_number,
            begin,
            end: None,
            active: true,
            ..Default::default()
        }
    }

    /// Close the membership
    pub fn cancel(&mut self, end: NaiveDateTime) {
        self.end = Some(end);
        self.active = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 4, day)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_membership_start_and_cancel() {
        let mut membership = Membership::start(23, at(1));
        assert!(membership.active);
        assert_eq!(membership.member_number, 23);
        assert_eq!(membership.begin, at(1));
        assert_eq!(membership.end, None);

        membership.cancel(at(9));
        assert!(!membership.active);
        assert_eq!(membership.end, Some(at(9)));
    }
}
