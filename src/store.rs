use anyhow::Result as BackendResult;
use chrono::{Datelike, Local, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::{
    config::StoreConfig,
    db::{connection, schema, Connection},
    errors::StoreError,
    models::{
        Delete, Deposit, DepositStatistics, Insert, Member, MemberFilter, Membership, Query,
        Transact, Update,
    },
};

pub type Result<T> = std::result::Result<T, StoreError>;

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Members, their memberships and deposits.
///
/// The store owns a single backend connection between `initialize`
/// and `dispose`. It does not synchronize concurrent callers.
#[derive(Debug)]
pub struct MembershipStore {
    config: StoreConfig,
    conn: Option<Connection>,
}

impl MembershipStore {
    pub fn new(config: StoreConfig) -> Self {
        Self { config, conn: None }
    }

    pub fn is_initialized(&self) -> bool {
        self.conn.is_some()
    }

    /// Open the backend connection and install the schema
    pub async fn initialize(&mut self) -> Result<()> {
        if self.conn.is_some() {
            return Err(StoreError::AlreadyInitialized);
        }
        let conn = connection::open(&self.config.database).await?;
        schema::install(&conn).await?;
        self.conn = Some(conn);
        info!(database = %self.config.database, "membership store initialized");
        Ok(())
    }

    /// Release the backend connection. Does nothing if the
    /// store was never initialized.
    pub async fn dispose(&mut self) -> Result<()> {
        if let Some(conn) = self.conn.take() {
            connection::close(conn).await?;
            info!("membership store disposed");
        }
        Ok(())
    }

    fn connection(&self) -> Result<&Connection> {
        self.conn.as_ref().ok_or(StoreError::NotInitialized)
    }

    async fn find_member(db: &Connection, member_number: u32) -> Result<Member> {
        debug!(member_number, "looking up member");
        let filter = MemberFilter {
            member_number: Some(member_number),
            ..Default::default()
        };
        let mut members: Vec<Member> = db.query(&filter).await?;
        members.pop().ok_or(StoreError::NotFound(member_number))
    }

    async fn find_active_membership(db: &Connection, member: &Member) -> Result<Membership> {
        member
            .get_active_membership(db)
            .await?
            .ok_or(StoreError::NoActiveMembership(member.member_number))
    }

    /// Commit staged changes. If staging or the commit failed, the
    /// transaction is rolled back and the error is returned as it was
    /// raised by the backend.
    async fn finish<T>(db: &Connection, staged: BackendResult<T>) -> Result<T> {
        let err = match staged {
            Ok(value) => match db.commit().await {
                Ok(()) => return Ok(value),
                Err(err) => err,
            },
            Err(err) => err,
        };
        warn!(error = %err, "rolling back staged changes");
        if let Err(rollback_err) = db.rollback().await {
            warn!(error = %rollback_err, "rollback failed");
        }
        Err(err.into())
    }

    /// Register a new member. Last names are unique.
    pub async fn add_member(
        &self,
        first_name: &str,
        last_name: &str,
        birthday: NaiveDate,
    ) -> Result<u32> {
        let db = self.connection()?;

        let duplicates: Vec<Member> = db
            .query(&MemberFilter {
                last_name: Some(last_name.to_string()),
                ..Default::default()
            })
            .await?;
        if !duplicates.is_empty() {
            return Err(StoreError::DuplicateName(last_name.to_string()));
        }

        let member = Member {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            birthday,
            ..Default::default()
        };

        db.begin().await?;
        let staged = db.insert(member).await;
        let member = Self::finish(db, staged).await?;

        info!(member_number = member.member_number, "member added");
        Ok(member.member_number)
    }

    /// Delete a member together with all memberships and deposits
    pub async fn delete_member(&self, member_number: u32) -> Result<()> {
        let db = self.connection()?;
        let member = Self::find_member(db, member_number).await?;
        let memberships = member.get_memberships(db).await?;
        let deposits = member.get_deposits(db).await?;

        db.begin().await?;
        let staged = async move {
            for deposit in deposits {
                db.delete(deposit).await?;
            }
            for membership in memberships {
                db.delete(membership).await?;
            }
            db.delete(member).await?;
            Ok::<_, anyhow::Error>(())
        }
        .await;
        Self::finish(db, staged).await?;

        info!(member_number, "member deleted");
        Ok(())
    }

    /// Start a new membership
    pub async fn join_member(&self, member_number: u32) -> Result<Membership> {
        let db = self.connection()?;
        let member = Self::find_member(db, member_number).await?;
        if member.get_active_membership(db).await?.is_some() {
            return Err(StoreError::AlreadyMember(member_number));
        }

        db.begin().await?;
        let staged = db.insert(Membership::start(member_number, now())).await;
        let membership = Self::finish(db, staged).await?;

        info!(member_number, membership = membership.id, "membership started");
        Ok(membership)
    }

    /// End the active membership. The change is committed
    /// before returning.
    pub async fn cancel_membership(&self, member_number: u32) -> Result<Membership> {
        let db = self.connection()?;
        let member = Self::find_member(db, member_number).await?;
        let mut membership = Self::find_active_membership(db, &member).await?;
        membership.cancel(now());

        db.begin().await?;
        let staged = db.update(membership).await;
        let membership = Self::finish(db, staged).await?;

        info!(member_number, membership = membership.id, "membership cancelled");
        Ok(membership)
    }

    /// Record a deposit against the active membership
    pub async fn deposit(&self, member_number: u32, amount: Decimal) -> Result<()> {
        let db = self.connection()?;
        if amount <= Decimal::ZERO {
            return Err(StoreError::InvalidAmount(amount));
        }
        let member = Self::find_member(db, member_number).await?;
        let membership = Self::find_active_membership(db, &member).await?;

        let deposit = Deposit {
            membership_id: membership.id,
            member_number,
            amount,
            ..Default::default()
        };

        db.begin().await?;
        let staged = db.insert(deposit).await;
        let deposit = Self::finish(db, staged).await?;

        info!(
            member_number,
            membership = membership.id,
            deposit = deposit.id,
            amount = %deposit.amount,
            "deposit recorded"
        );
        Ok(())
    }

    /// Deposit totals per member, tagged with the current year.
    ///
    /// Totals cover every deposit a member ever made, there is
    /// no deposit date to restrict them to the year.
    pub async fn get_deposit_statistics(&self) -> Result<Vec<DepositStatistics>> {
        let db = self.connection()?;
        let year = Local::now().year();

        let members: Vec<Member> = db.query(&MemberFilter::default()).await?;
        let mut statistics = Vec::with_capacity(members.len());
        for member in members {
            let deposits = member.get_deposits(db).await?;
            statistics.push(DepositStatistics::summarize(year, member, &deposits));
        }
        Ok(statistics)
    }

    pub async fn list_members(&self, filter: &MemberFilter) -> Result<Vec<Member>> {
        let db = self.connection()?;
        let members: Vec<Member> = db.query(filter).await?;
        Ok(members)
    }

    pub async fn get_member(&self, member_number: u32) -> Result<Member> {
        let db = self.connection()?;
        Self::find_member(db, member_number).await
    }

    pub async fn get_memberships(&self, member_number: u32) -> Result<Vec<Membership>> {
        let db = self.connection()?;
        let member = Self::find_member(db, member_number).await?;
        Ok(member.get_memberships(db).await?)
    }

    pub async fn get_deposits(&self, member_number: u32) -> Result<Vec<Deposit>> {
        let db = self.connection()?;
        let member = Self::find_member(db, member_number).await?;
        Ok(member.get_deposits(db).await?)
    }
}

impl Default for MembershipStore {
    fn default() -> Self {
        Self::new(StoreConfig::default())
    }
}
