//! The [`Database`] handle: the one place connections and transactions are made.
//!
//! A `Database` is built once at startup (which runs the schema migrations)
//! and cloned into whatever needs the store. It wraps an `r2d2` pool of
//! SQLite connections against one file; every pooled connection gets the
//! pragmas from [`schema::configure`] when it is opened, and WAL mode lets
//! readers proceed while a writer holds the lock.
//!
//! Multi-statement work goes through [`Database::read`] or
//! [`Database::write`]. Both check out a connection and scope a transaction
//! around a closure: it commits when the closure returns `Ok` and rolls back
//! on any other exit, including an early `?` return or a panic (the
//! transaction's `Drop` rolls back).

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{Connection, TransactionBehavior};

use crate::error::StorageError;
use crate::schema;

/// Default time a connection waits on a locked database before failing.
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_millis(5_000);

/// Default number of pooled connections.
pub const DEFAULT_POOL_SIZE: u32 = 8;

/// Connection parameters for [`Database::open`].
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// SQLite database file; created if absent.
    pub path: PathBuf,
    /// How long a statement waits for a competing writer.
    pub busy_timeout: Duration,
    /// Upper bound on open connections.
    pub pool_size: u32,
}

impl DatabaseConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DatabaseConfig {
            path: path.into(),
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
            pool_size: DEFAULT_POOL_SIZE,
        }
    }

    pub fn with_busy_timeout(mut self, busy_timeout: Duration) -> Self {
        self.busy_timeout = busy_timeout;
        self
    }

    pub fn with_pool_size(mut self, pool_size: u32) -> Self {
        self.pool_size = pool_size;
        self
    }
}

/// Shared, cheaply cloneable handle to the directory database.
#[derive(Clone)]
pub struct Database {
    pool: Pool<SqliteConnectionManager>,
}

impl fmt::Debug for Database {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Database")
            .field("max_size", &self.pool.max_size())
            .finish()
    }
}

impl Database {
    /// Builds the connection pool and ensures the schema exists.
    pub fn open(config: DatabaseConfig) -> Result<Self, StorageError> {
        let busy_timeout = config.busy_timeout;
        let manager = SqliteConnectionManager::file(&config.path)
            .with_init(move |conn| schema::configure(conn, busy_timeout));
        let pool = Pool::builder()
            .max_size(config.pool_size.max(1))
            .build(manager)?;

        let mut conn = pool.get()?;
        schema::initialize(&mut conn)?;
        drop(conn);

        tracing::info!(
            path = %config.path.display(),
            pool_size = config.pool_size,
            "database schema ready"
        );
        Ok(Database { pool })
    }

    /// Runs `f` inside a deferred transaction, giving it a consistent snapshot
    /// across several statements.
    pub fn read<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&Connection) -> Result<T, E>,
        E: From<StorageError>,
    {
        self.scoped(TransactionBehavior::Deferred, f)
    }

    /// Runs `f` inside an immediate (write-locked) transaction.
    ///
    /// Concurrent writers queue behind each other for up to the busy timeout,
    /// so each call observes and leaves a state no other writer interleaves
    /// with.
    pub fn write<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&Connection) -> Result<T, E>,
        E: From<StorageError>,
    {
        self.scoped(TransactionBehavior::Immediate, f)
    }

    fn scoped<T, E, F>(&self, behavior: TransactionBehavior, f: F) -> Result<T, E>
    where
        F: FnOnce(&Connection) -> Result<T, E>,
        E: From<StorageError>,
    {
        let mut conn = self.pool.get().map_err(StorageError::from)?;
        let tx = conn
            .transaction_with_behavior(behavior)
            .map_err(StorageError::from)?;
        let out = f(&*tx)?;
        tx.commit().map_err(StorageError::from)?;
        Ok(out)
    }
}
