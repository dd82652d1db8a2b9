//! Streamed SQL backup dump.
//!
//! Emits `DROP TABLE IF EXISTS` + the engine-reported `CREATE TABLE` DDL +
//! one `INSERT` per row for every user table, bracketed by
//! `PRAGMA foreign_keys` off/on. Output flows table-by-table, row-by-row
//! through a bounded channel, so memory use is independent of database size.

use bytes::Bytes;
use chrono::Utc;
use futures::TryStreamExt;
use sea_orm::DatabaseConnection;
use sqlx::sqlite::{SqlitePool, SqliteRow};
use sqlx::{Row, TypeInfo, ValueRef};
use tokio::sync::mpsc;

/// Channel depth; keeps at most a handful of statements buffered.
const CHANNEL_CAPACITY: usize = 32;

pub type DumpChunk = Result<Bytes, std::io::Error>;

/// Spawns the dump producer and returns the receiving end of the stream.
pub fn sql_dump_stream(db: &DatabaseConnection) -> mpsc::Receiver<DumpChunk> {
    let pool = db.get_sqlite_connection_pool().clone();
    let (tx, rx) = mpsc::channel::<DumpChunk>(CHANNEL_CAPACITY);

    tokio::spawn(async move {
        if let Err(e) = produce_dump(&pool, &tx).await {
            tracing::error!(error = %e, "SQL backup dump failed");
            let _ = tx
                .send(Err(std::io::Error::other(format!("dump failed: {e}"))))
                .await;
        }
    });

    rx
}

async fn produce_dump(pool: &SqlitePool, tx: &mpsc::Sender<DumpChunk>) -> Result<(), sqlx::Error> {
    send(tx, format!("-- SQL backup generated at {}\n", Utc::now().to_rfc3339())).await;
    send(tx, "PRAGMA foreign_keys=OFF;\n\n".to_string()).await;

    let tables: Vec<(String, String)> = sqlx::query_as(
        "SELECT name, sql FROM sqlite_master \
         WHERE type = 'table' AND name NOT LIKE 'sqlite_%' \
         ORDER BY name",
    )
    .fetch_all(pool)
    .await?;

    for (name, ddl) in tables {
        send(tx, format!("DROP TABLE IF EXISTS \"{}\";\n{};\n", name, ddl)).await;

        let query = format!("SELECT * FROM \"{}\"", name);
        let mut rows = sqlx::query(&query).fetch(pool);
        while let Some(row) = rows.try_next().await? {
            send(tx, insert_statement(&name, &row)).await;
        }
        send(tx, "\n".to_string()).await;
    }

    send(tx, "PRAGMA foreign_keys=ON;\n".to_string()).await;
    Ok(())
}

async fn send(tx: &mpsc::Sender<DumpChunk>, chunk: String) {
    // The receiver going away (client disconnect) just ends the dump.
    let _ = tx.send(Ok(Bytes::from(chunk))).await;
}

fn insert_statement(table: &str, row: &SqliteRow) -> String {
    let values = (0..row.columns().len())
        .map(|i| quote_value(row, i))
        .collect::<Vec<_>>()
        .join(", ");
    format!("INSERT INTO \"{}\" VALUES ({});\n", table, values)
}

/// Renders one column value as a SQL literal with driver-level quoting.
fn quote_value(row: &SqliteRow, index: usize) -> String {
    let Ok(raw) = row.try_get_raw(index) else {
        return "NULL".to_string();
    };
    if raw.is_null() {
        return "NULL".to_string();
    }

    match raw.type_info().name() {
        "INTEGER" | "BOOLEAN" => row
            .try_get::<i64, _>(index)
            .map(|v| v.to_string())
            .unwrap_or_else(|_| "NULL".to_string()),
        "REAL" => row
            .try_get::<f64, _>(index)
            .map(|v| v.to_string())
            .unwrap_or_else(|_| "NULL".to_string()),
        "BLOB" => row
            .try_get::<Vec<u8>, _>(index)
            .map(|v| format!("X'{}'", v.iter().map(|b| format!("{:02x}", b)).collect::<String>()))
            .unwrap_or_else(|_| "NULL".to_string()),
        _ => row
            .try_get::<String, _>(index)
            .map(|v| format!("'{}'", v.replace('\'', "''")))
            .unwrap_or_else(|_| "NULL".to_string()),
    }
}
