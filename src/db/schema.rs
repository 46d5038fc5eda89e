use anyhow::Result;
use sqlx::Executor;
use tracing::debug;

use crate::db::Connection;

/// Install the database schema. Existing tables are kept.
pub async fn install(conn: &Connection) -> Result<()> {
    let mut conn = conn.lock().await;
    let schema_data = include_str!("../../db/schema.sql");
    debug!("installing database schema");
    (&mut *conn).execute(schema_data).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connection;

    #[tokio::test]
    async fn test_install() {
        let conn = connection::open("sqlite::memory:").await.unwrap();
        install(&conn).await.unwrap();
        // Installing twice must not fail
        install(&conn).await.unwrap();
    }
}
