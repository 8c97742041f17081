//! Schema versions for the libSQL store.
//!
//! The `schema_version` ledger records every schema change that has been
//! applied; opening a store applies whatever is missing, oldest first.

use libsql::{Connection, params};
use tracing::{debug, info};

use crate::error::StoreError;

/// One schema change.
struct SchemaChange {
    version: i64,
    label: &'static str,
    ddl: &'static str,
}

/// Append new changes at the end; versions must keep increasing.
static SCHEMA_CHANGES: &[SchemaChange] = &[SchemaChange {
    version: 1,
    label: "local_storage",
    ddl: r#"
        CREATE TABLE IF NOT EXISTS local_storage (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL,
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );
    "#,
}];

const LEDGER_DDL: &str = "CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER PRIMARY KEY,
    label TEXT NOT NULL,
    applied_at TEXT NOT NULL DEFAULT (datetime('now'))
)";

fn migration_err(context: &str, e: impl std::fmt::Display) -> StoreError {
    StoreError::Migration(format!("{context}: {e}"))
}

/// Bring the schema up to the newest version.
pub async fn run_migrations(conn: &Connection) -> Result<(), StoreError> {
    conn.execute(LEDGER_DDL, ())
        .await
        .map_err(|e| migration_err("Creating schema_version", e))?;

    let applied = applied_version(conn).await?;
    let pending = SCHEMA_CHANGES.iter().filter(|c| c.version > applied);

    for change in pending {
        info!(version = change.version, label = change.label, "Upgrading store schema");
        conn.execute_batch(change.ddl)
            .await
            .map_err(|e| migration_err(&format!("Schema v{} ({})", change.version, change.label), e))?;
        conn.execute(
            "INSERT OR IGNORE INTO schema_version (version, label) VALUES (?1, ?2)",
            params![change.version, change.label],
        )
        .await
        .map_err(|e| migration_err(&format!("Recording schema v{}", change.version), e))?;
    }

    debug!(version = applied_version(conn).await?, "Store schema ready");
    Ok(())
}

/// Newest recorded schema version; 0 for a fresh database.
async fn applied_version(conn: &Connection) -> Result<i64, StoreError> {
    let mut rows = conn
        .query("SELECT COALESCE(MAX(version), 0) FROM schema_version", ())
        .await
        .map_err(|e| migration_err("Reading schema_version", e))?;

    match rows.next().await.map_err(|e| migration_err("Reading schema_version", e))? {
        Some(row) => row.get::<i64>(0).map_err(|e| migration_err("Decoding schema version", e)),
        None => Ok(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn memory_conn() -> (libsql::Database, Connection) {
        let db = libsql::Builder::new_local(":memory:").build().await.unwrap();
        let conn = db.connect().unwrap();
        (db, conn)
    }

    #[tokio::test]
    async fn migrations_are_idempotent() {
        let (_db, conn) = memory_conn().await;
        run_migrations(&conn).await.unwrap();
        run_migrations(&conn).await.unwrap();

        let version = applied_version(&conn).await.unwrap();
        assert_eq!(version, SCHEMA_CHANGES.last().unwrap().version);
    }

    #[tokio::test]
    async fn ledger_records_each_change_once() {
        let (_db, conn) = memory_conn().await;
        run_migrations(&conn).await.unwrap();
        run_migrations(&conn).await.unwrap();

        let mut rows = conn
            .query("SELECT COUNT(*) FROM schema_version", ())
            .await
            .unwrap();
        let count: i64 = rows.next().await.unwrap().unwrap().get(0).unwrap();
        assert_eq!(count, SCHEMA_CHANGES.len() as i64);

        conn.execute(
            "INSERT INTO local_storage (key, value) VALUES ('k', 'v')",
            (),
        )
        .await
        .unwrap();
    }
}
