use anyhow::Result;
use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite};

use crate::{
    db::{
        results::{Id, QueryError},
        Connection,
    },
    models::{Delete, Insert, Member, MemberFilter, Query, Retrieve},
};

#[async_trait]
impl Query<Member> for Connection {
    type Filter = MemberFilter;

    /// Fetch members, in order of their member number
    async fn query(&self, filter: &Self::Filter) -> Result<Vec<Member>> {
        let mut conn = self.lock().await;
        let mut qry = QueryBuilder::<Sqlite>::new(
            r#"
            SELECT
                member_number,
                first_name,
                last_name,
                birthday
            FROM members
            WHERE 1
            "#,
        );

        if let Some(member_number) = filter.member_number {
            qry.push(" AND member_number = ").push_bind(member_number);
        }
        if let Some(last_name) = filter.last_name.clone() {
            // = is case sensitive for TEXT in sqlite, LIKE is not
            qry.push(" AND last_name = ").push_bind(last_name);
        }
        if let Some(name) = filter.name.clone() {
            qry.push(" AND (first_name || ' ' || last_name) LIKE ")
                .push_bind(format!("%{}%", name));
        }
        qry.push(" ORDER BY member_number");

        let members: Vec<Member> = qry.build_query_as().fetch_all(&mut *conn).await?;
        Ok(members)
    }
}

#[async_trait]
impl Retrieve<Member> for Connection {
    type Key = u32;

    /// Fetch a single member by member number
    async fn retrieve(&self, member_number: Self::Key) -> Result<Member> {
        let filter = MemberFilter {
            member_number: Some(member_number),
            ..Default::default()
        };
        let mut members: Vec<Member> = self.query(&filter).await?;
        if members.len() > 1 {
            return Err(QueryError::Ambiguous(members.len()).into());
        }
        let member = members.pop().ok_or(QueryError::NotFound)?;
        Ok(member)
    }
}

#[async_trait]
impl Insert<Member> for Connection {
    /// Create member, the member number is assigned by the database
    async fn insert(&self, member: Member) -> Result<Member> {
        let insert: Id<u32> = {
            let mut conn = self.lock().await;
            let mut qry = QueryBuilder::<Sqlite>::new(
                r#"INSERT INTO members (
                    first_name,
                    last_name,
                    birthday
                ) VALUES (
                "#,
            );
            qry.separated(", ")
                .push_bind(&member.first_name)
                .push_bind(&member.last_name)
                .push_bind(member.birthday);

            qry.push(") RETURNING member_number AS id ")
                .build_query_as()
                .fetch_one(&mut *conn)
                .await?
        };
        self.retrieve(insert.id).await
    }
}

#[async_trait]
impl Delete<Member> for Connection {
    /// Delete member
    async fn delete(&self, member: Member) -> Result<()> {
        let mut conn = self.lock().await;
        QueryBuilder::<Sqlite>::new("DELETE FROM members WHERE member_number = ")
            .push_bind(member.member_number)
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

    #[tokio::test]
    async fn test_member_insert() {
        let (_handle, db) = connection::open_test().await;
        let birthday = NaiveDate::from_ymd_opt(1990, 1, 1).unwrap();
        let member = Member {
            first_name: "Ann".to_string(),
            last_name: "Smith".to_string(),
            birthday,
            ..Member::default()
        };
        let member = db.insert(member).await.unwrap();

        assert!(member.member_number > 0);
        assert_eq!(member.first_name, "Ann");
        assert_eq!(member.last_name, "Smith");
        assert_eq!(member.birthday, birthday);
    }

    #[tokio::test]
    async fn test_member_filter_last_name() {
        let (_handle, db) = connection::open_test().await;
        db.insert(Member {
            first_name: "Ann".to_string(),
            last_name: "Smith".to_string(),
            ..Member::default()
        })
        .await
        .unwrap();
        db.insert(Member {
            first_name: "Eris".to_string(),
            last_name: "Discordia".to_string(),
            ..Member::default()
        })
        .await
        .unwrap();

        let filter = MemberFilter {
            last_name: Some("Smith".to_string()),
            ..MemberFilter::default()
        };
        let members: Vec<Member> = db.query(&filter).await.unwrap();
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].first_name, "Ann");

        // Last name match is exact
        let filter = MemberFilter {
            last_name: Some("smith".to_string()),
            ..MemberFilter::default()
        };
        let members: Vec<Member> = db.query(&filter).await.unwrap();
        assert_eq!(members.len(), 0);
    }

    #[tokio::test]
    async fn test_member_query_name_like() {
        let (_handle, db) = connection::open_test().await;
        db.insert(Member {
            first_name: "Test".to_string(),
            last_name: "Member".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();

        let filter = MemberFilter {
            name: Some("tEsT MeMber".to_string()),
            ..MemberFilter::default()
        };
        let members: Vec<Member> = db.query(&filter).await.unwrap();
        assert_eq!(members.len(), 1);

        let filter = MemberFilter {
            name: Some("f3st MeMber".to_string()),
            ..MemberFilter::default()
        };
        let members: Vec<Member> = db.query(&filter).await.unwrap();
        assert_eq!(members.len(), 0);
    }

    #[tokio::test]
    async fn test_member_retrieve_missing() {
        let (_handle, db) = connection::open_test().await;
        let result: Result<Member> = db.retrieve(42).await;
        let err = result.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<QueryError>(),
            Some(QueryError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_member_delete() {
        let (_handle, db) = connection::open_test().await;
        let member = Member {
            first_name: "Test".to_string(),
            last_name: "Member 1".to_string(),
            ..Member::default()
        };
        let member = db.insert(member).await.unwrap();
        let member_number = member.member_number;

        db.delete(member).await.unwrap();

        let result: Result<Member> = db.retrieve(member_number).await;
        assert!(result.is_err());
    }
}
