use std::str::FromStr;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteConnection},
    Connection as SqlConnection,
};
use tokio::sync::Mutex;
use tracing::debug;

use crate::models::Transact;

/// A thread safe connection to the database
pub type Connection = Arc<Mutex<SqliteConnection>>;

/// Open a connection to the database
pub async fn open(filename: &str) -> Result<Connection> {
    let conn = SqliteConnectOptions::from_str(filename)?
        .create_if_missing(true)
        .foreign_keys(true);
    let conn = SqliteConnection::connect_with(&conn).await?;
    let conn = Arc::new(Mutex::new(conn));
    debug!(database = filename, "opened database connection");
    Ok(conn)
}

/// Close the connection. If the handle is still shared,
/// the connection is closed when the last clone is dropped.
pub async fn close(conn: Connection) -> Result<()> {
    match Arc::try_unwrap(conn) {
        Ok(conn) => {
            conn.into_inner().close().await?;
            debug!("closed database connection");
        }
        Err(_) => debug!("database connection still in use, closing on drop"),
    }
    Ok(())
}

#[async_trait]
impl Transact for Connection {
    async fn begin(&self) -> Result<()> {
        let mut conn = self.lock().await;
        sqlx::query("BEGIN").execute(&mut *conn).await?;
        Ok(())
    }

    async fn commit(&self) -> Result<()> {
        let mut conn = self.lock().await;
        sqlx::query("COMMIT").execute(&mut *conn).await?;
        Ok(())
    }

    async fn rollback(&self) -> Result<()> {
        let mut conn = self.lock().await;
        sqlx::query("ROLLBACK").execute(&mut *conn).await?;
        Ok(())
    }
}

#[cfg(test)]
pub(crate) use testing::*;

#[cfg(test)]
mod testing {
    use std::fs;
    use std::path::{Path, PathBuf};

    use super::*;
    use crate::db::schema;

    pub struct TestHandle {
        filename: PathBuf,
    }

    impl TestHandle {
        pub fn path(&self) -> String {
            self.filename.to_string_lossy().into_owned()
        }
    }

    impl Drop for TestHandle {
        fn drop(&mut self) {
            let path = Path::new(&self.filename);
            if path.exists() {
                fs::remove_file(path).unwrap();
            }
        }
    }

    /// Open a new test database connection.
    /// The database will be created on each open.
    pub async fn open_test() -> (TestHandle, Connection) {
        let filename = std::env::temp_dir()
            .join(format!("cashdesk_test_{}.sqlite3", rand::random::<u64>()));
        let handle = TestHandle {
            filename: filename.clone(),
        };
        let conn = open(filename.to_str().unwrap()).await.unwrap();

        // Install the schema
        schema::install(&conn).await.unwrap();

        (handle, conn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Insert, Member, MemberFilter, Query};

    #[tokio::test]
    async fn test_rollback_discards_staged_changes() {
        let (_handle, db) = open_test().await;

        db.begin().await.unwrap();
        db.insert(Member {
            last_name: "Discordia".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();
        db.rollback().await.unwrap();

        let members: Vec<Member> = db.query(&MemberFilter::default()).await.unwrap();
        assert!(members.is_empty());
    }

    #[tokio::test]
    async fn test_commit_persists_staged_changes() {
        let (_handle, db) = open_test().await;

        db.begin().await.unwrap();
        db.insert(Member {
            last_name: "Discordia".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();
        db.commit().await.unwrap();

        let members: Vec<Member> = db.query(&MemberFilter::default()).await.unwrap();
        assert_eq!(members.len(), 1);
    }

    #[tokio::test]
    async fn test_close_connection() {
        let db = open("sqlite::memory:").await.unwrap();
        close(db).await.unwrap();
    }
}
