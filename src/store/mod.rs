//! SQLite-backed persistence for funds, holdings, histories and orders.

use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{self, ConnectionManager, Pool, PooledConnection};
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info};

use crate::core::error::{Error, Result};

pub mod funds;
pub mod history;
pub mod holdings;
pub mod models;
pub mod orders;
pub mod schema;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;
pub type DbConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

/// Creates the database file (and parent directory) if missing and applies
/// the connection pragmas once.
pub fn init(db_path: &str) -> Result<()> {
    if let Some(db_dir) = Path::new(db_path).parent()
        && !db_dir.exists()
    {
        fs::create_dir_all(db_dir)?;
    }

    let mut conn = SqliteConnection::establish(db_path)?;
    conn.batch_execute(
        "PRAGMA journal_mode = WAL;\n         PRAGMA foreign_keys = ON;\n         PRAGMA busy_timeout = 30000;",
    )?;
    Ok(())
}

pub fn create_pool(db_path: &str) -> Result<Arc<DbPool>> {
    let manager = ConnectionManager::<SqliteConnection>::new(db_path);
    let pool = Pool::builder()
        .max_size(2)
        .connection_timeout(Duration::from_secs(30))
        .connection_customizer(Box::new(ConnectionCustomizer))
        .build(manager)?;
    Ok(Arc::new(pool))
}

pub fn run_migrations(pool: &DbPool) -> Result<()> {
    info!("Running database migrations");
    let mut connection = get_connection(pool)?;

    let applied = connection
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| Error::Migration(e.to_string()))?;

    if applied.is_empty() {
        debug!("No pending migrations to apply");
    } else {
        for migration_version in &applied {
            info!("Applied migration {}", migration_version);
        }
    }

    Ok(())
}

pub fn get_connection(pool: &DbPool) -> Result<DbConnection> {
    Ok(pool.get()?)
}

#[derive(Debug)]
struct ConnectionCustomizer;

impl r2d2::CustomizeConnection<SqliteConnection, r2d2::Error> for ConnectionCustomizer {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> std::result::Result<(), r2d2::Error> {
        conn.batch_execute("PRAGMA foreign_keys = ON; PRAGMA busy_timeout = 30000;")
            .map_err(r2d2::Error::QueryError)
    }
}

#[cfg(test)]
pub(crate) fn open_test_pool(dir: &std::path::Path) -> Arc<DbPool> {
    let db_path = dir.join("pfm-test.db");
    let db_path = db_path.to_str().expect("test db path is valid UTF-8");
    init(db_path).expect("failed to init test database");
    let pool = create_pool(db_path).expect("failed to create test pool");
    run_migrations(&pool).expect("failed to run test migrations");
    pool
}
