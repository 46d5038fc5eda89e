use std::str::FromStr;

use anyhow::Result;
use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::{sqlite::SqliteRow, FromRow, QueryBuilder, Row, Sqlite};

use crate::{
    db::{
        results::{Id, QueryError},
        Connection,
    },
    models::{Delete, Deposit, DepositFilter, Insert, Query, Retrieve},
};

// Amounts are stored as TEXT to keep the exact decimal value.
impl<'r> FromRow<'r, SqliteRow> for Deposit {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let amount: String = row.try_get("amount")?;
        let amount = Decimal::from_str(&amount).map_err(|err| sqlx::Error::ColumnDecode {
            index: "amount".to_string(),
            source: Box::new(err),
        })?;
        Ok(Self {
            id: row.try_get("id")?,
            membership_id: row.try_get("membership_id")?,
            member_number: row.try_get("member_number")?,
            amount,
        })
    }
}

#[async_trait]
impl Query<Deposit> for Connection {
    type Filter = DepositFilter;

    async fn query(&self, filter: &Self::Filter) -> Result<Vec<Deposit>> {
        let mut conn = self.lock().await;
        let mut qry = QueryBuilder::<Sqlite>::new(
            r#"
            SELECT
                id,
                membership_id,
                member_number,
                amount
            FROM deposits
            WHERE 1
            "#,
        );
        if let Some(id) = filter.id {
            qry.push(" AND id = ").push_bind(id);
        }
        if let Some(member_number) = filter.member_number {
            qry.push(" AND member_number = ").push_bind(member_number);
        }
        if let Some(membership_id) = filter.membership_id {
            qry.push(" AND membership_id = ").push_bind(membership_id);
        }
        qry.push(" ORDER BY id");

        let deposits: Vec<Deposit> = qry.build_query_as().fetch_all(&mut *conn).await?;
        Ok(deposits)
    }
}

#[async_trait]
impl Retrieve<Deposit> for Connection {
    type Key = u32;

    async fn retrieve(&self, id: Self::Key) -> Result<Deposit> {
        let filter = DepositFilter {
            id: Some(id),
            ..Default::default()
        };
        let mut deposits: Vec<Deposit> = self.query(&filter).await?;
        let deposit = deposits.pop().ok_or(QueryError::NotFound)?;
        Ok(deposit)
    }
}

#[async_trait]
impl Insert<Deposit> for Connection {
    async fn insert(&self, deposit: Deposit) -> Result<Deposit> {
        let insert: Id<u32> = {
            let mut conn = self.lock().await;
            let mut qry = QueryBuilder::<Sqlite>::new(
                r#"INSERT INTO deposits (
                    membership_id,
                    member_number,
                    amount
                ) VALUES (
                "#,
            );
            qry.separated(", ")
                .push_bind(deposit.membership_id)
                .push_bind(deposit.member_number)
                .push_bind(deposit.amount.to_string());

            qry.push(") RETURNING id ")
                .build_query_as()
                .fetch_one(&mut *conn)
                .await?
        };
        self.retrieve(insert.id).await
    }
}

#[async_trait]
impl Delete<Deposit> for Connection {
    async fn delete(&self, deposit: Deposit) -> Result<()> {
        let mut conn = self.lock().await;
        QueryBuilder::<Sqlite>::new("DELETE FROM deposits WHERE id = ")
            .push_bind(deposit.id)
            .build()
            .execute(&mut *conn)
            .await?;
        Ok(())
    }
}
