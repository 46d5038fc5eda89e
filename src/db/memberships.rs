use anyhow::Result;
use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite};

use crate::{
    db::{
        results::{Id, QueryError},
        Connection,
    },
    models::{Delete, Insert, Membership, MembershipFilter, Query, Retrieve, Update},
};

#[async_trait]
impl Query<Membership> for Connection {
    type Filter = MembershipFilter;

    /// Fetch memberships, oldest first
    async fn query(&self, filter: &Self::Filter) -> Result<Vec<Membership>> {
        let mut conn = self.lock().await;
        let mut qry = QueryBuilder::<Sqlite>::new(
            r#"
            SELECT
                id,
                member_number,
                began_at,
                ended_at,
                active
            FROM memberships
            WHERE 1
            "#,
        );
        if let Some(id) = filter.id {
            qry.push(" AND id = ").push_bind(id);
        }
        if let Some(member_number) = filter.member_number {
            qry.push(" AND member_number = ").push_bind(member_number);
        }
        if let Some(active) = filter.active {
            qry.push(" AND active = ").push_bind(active);
        }
        qry.push(" ORDER BY id");

        let memberships: Vec<Membership> =
            qry.build_query_as().fetch_all(&mut *conn).await?;
        Ok(memberships)
    }
}

#[async_trait]
impl Retrieve<Membership> for Connection {
    type Key = u32;

    async fn retrieve(&self, id: Self::Key) -> Result<Membership> {
        let filter = MembershipFilter {
            id: Some(id),
            ..Default::default()
        };
        let mut memberships: Vec<Membership> = self.query(&filter).await?;
        let membership = memberships.pop().ok_or(QueryError::NotFound)?;
        Ok(membership)
    }
}

#[async_trait]
impl Insert<Membership> for Connection {
    async fn insert(&self, membership: Membership) -> Result<Membership> {
        let insert: Id<u32> = {
            let mut conn = self.lock().await;
            let mut qry = QueryBuilder::<Sqlite>::new(
                r#"INSERT INTO memberships (
                    member_number,
                    began_at,
                    ended_at,
                    active
                ) VALUES (
                "#,
            );
            qry.separated(", ")
                .push_bind(membership.member_number)
                .push_bind(membership.begin)
                .push_bind(membership.end)
                .push_bind(membership.active);

            qry.push(") RETURNING id ")
                .build_query_as()
                .fetch_one(&mut *conn)
                .await?
        };
        self.retrieve(insert.id).await
    }
}

#[async_trait]
impl Update<Membership> for Connection {
    /// Update membership
    async fn update(&self, membership: Membership) -> Result<Membership> {
        {
            let mut conn = self.lock().await;
            QueryBuilder::<Sqlite>::new("UPDATE memberships SET")
                .push(" began_at = ")
                .push_bind(membership.begin)
                .push(", ended_at = ")
                .push_bind(membership.end)
                .push(", active = ")
                .push_bind(membership.active)
                .push(" WHERE id = ")
                .push_bind(membership.id)
                .build()
                .execute(&mut *conn)
                .await?;
        }
        self.retrieve(membership.id).await
    }
}

#[async_trait]
impl Delete<Membership> for Connection {
    async fn delete(&self, membership: Membership) -> Result<()> {
        let mut conn = self.lock().await;
        QueryBuilder::<Sqlite>::new("DELETE FROM memberships WHERE id = ")
            .push_bind(membership.id)
            .build()
            .execute(&mut *conn)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::db::connection;
    use crate::models::Member;

    async fn insert_member(db: &Connection) -> Member {
        db.insert(Member {
            first_name: "Eris".to_string(),
            last_name: "Discordia".to_string(),
            ..Default::default()
        })
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_membership_insert() {
        let (_handle, db) = connection::open_test().await;
        let m = insert_member(&db).await;
        let begin = NaiveDate::from_ymd_opt(2023, 4, 2)
            .unwrap()
            .and_hms_opt(10, 23, 42)
            .unwrap();

        let membership = db.insert(Membership::start(m.member_number, begin)).await.unwrap();
        assert!(membership.id > 0);
        assert_eq!(membership.member_number, m.member_number);
        assert_eq!(membership.begin, begin);
        assert_eq!(membership.end, None);
        assert!(membership.active);
    }

    #[tokio::test]
    async fn test_membership_update() {
        let (_handle, db) = connection::open_test().await;
        let m = insert_member(&db).await;
        let begin = NaiveDate::from_ymd_opt(2023, 4, 2)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();

        let mut membership = db.insert(Membership::start(m.member_number, begin)).await.unwrap();
        membership.cancel(end);
        let membership = db.update(membership).await.unwrap();

        assert!(!membership.active);
        assert_eq!(membership.end, Some(end));
    }

    #[tokio::test]
    async fn test_membership_single_active() {
        let (_handle, db) = connection::open_test().await;
        let m = insert_member(&db).await;
        let begin = NaiveDate::from_ymd_opt(2023, 4, 2)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();

        db.insert(Membership::start(m.member_number, begin)).await.unwrap();
        let result = db.insert(Membership::start(m.member_number, begin)).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_member_get_active_membership() {
        let (_handle, db) = connection::open_test().await;
        let m = insert_member(&db).await;
        let begin = NaiveDate::from_ymd_opt(2023, 4, 2)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();

        assert_eq!(m.get_active_membership(&db).await.unwrap(), None);

        let mut first = db.insert(Membership::start(m.member_number, begin)).await.unwrap();
        first.cancel(begin);
        db.update(first).await.unwrap();
        let second = db.insert(Membership::start(m.member_number, begin)).await.unwrap();

        let memberships = m.get_memberships(&db).await.unwrap();
        assert_eq!(memberships.len(), 2);
        assert_eq!(m.get_active_membership(&db).await.unwrap(), Some(second));
    }
}
