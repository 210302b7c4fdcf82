#[macro_use]
extern crate diesel;

use anyhow::Result as Fallible;
use diesel::{connection::SimpleConnection as _, r2d2, sqlite::SqliteConnection};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use hktap_core::{repositories as repo, usecases as uc};
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::{
    cell::{RefCell, RefMut},
    sync::Arc,
    time::Duration,
};

mod models;
mod repo_impl;
mod schema;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");

type Connection = SqliteConnection;

type ConnectionManager = r2d2::ConnectionManager<Connection>;
type ConnectionPool = r2d2::Pool<ConnectionManager>;
type PooledConnection = r2d2::PooledConnection<ConnectionManager>;

type SharedConnectionPool = Arc<RwLock<ConnectionPool>>;

pub struct DbReadOnly<'a> {
    _locked_pool: RwLockReadGuard<'a, ConnectionPool>,
    conn: RefCell<PooledConnection>,
}

// A pool that hands out no connection counts as an unavailable store.
fn pool_error(err: r2d2::PoolError) -> repo::Error {
    repo::Error::Other(anyhow::Error::new(err).context("No pooled database connection available"))
}

impl<'a> DbReadOnly<'a> {
    fn try_new(pool: &'a SharedConnectionPool) -> Result<Self, repo::Error> {
        let locked_pool = pool.read();
        let conn = locked_pool.get().map_err(|err| {
            log::error!("Failed to obtain pooled database connection for read-only access: {err}");
            pool_error(err)
        })?;
        Ok(Self {
            _locked_pool: locked_pool,
            conn: RefCell::new(conn),
        })
    }
}

pub struct DbReadWrite<'a> {
    _locked_pool: RwLockWriteGuard<'a, ConnectionPool>,
    conn: RefCell<PooledConnection>,
}

/// A connection that is borrowed by a running transaction.
pub struct DbConnection<'a> {
    conn: RefCell<&'a mut SqliteConnection>,
}

impl<'a> DbConnection<'a> {
    fn new(conn: &'a mut SqliteConnection) -> Self {
        Self {
            conn: RefCell::new(conn),
        }
    }
}

impl<'a> DbReadWrite<'a> {
    fn try_new(pool: &'a SharedConnectionPool) -> Result<Self, repo::Error> {
        let locked_pool = pool.write();
        let conn = locked_pool.get().map_err(|err| {
            log::error!("Failed to obtain pooled database connection for read/write access: {err}");
            pool_error(err)
        })?;
        Ok(Self {
            _locked_pool: locked_pool,
            conn: RefCell::new(conn),
        })
    }

    /// Runs `f` in a transaction that is rolled back if `f` fails.
    pub fn transaction<T, F, E>(&self, f: F) -> Result<T, uc::Error>
    where
        F: FnOnce(&DbConnection) -> Result<T, E>,
        E: Into<uc::Error>,
    {
        // The use case error is smuggled out of the transaction closure
        // while diesel only sees a rollback request.
        let mut usecase_error = None;
        use diesel::Connection;
        self.conn
            .borrow_mut()
            // Diesel 2 passes the mutable borrow of the connection into the
            // closure, so the repositories inside operate on that borrow.
            .transaction(|conn| {
                f(&DbConnection::new(conn))
                    .map_err(Into::into)
                    .map_err(|err| {
                        usecase_error = Some(err);
                        diesel::result::Error::RollbackTransaction
                    })
            })
            .map_err(|err| {
                if let Some(usecase_error) = usecase_error {
                    debug_assert!(matches!(err, diesel::result::Error::RollbackTransaction));
                    usecase_error
                } else {
                    repo_impl::from_diesel_err(err).into()
                }
            })
    }

    fn sqlite_conn(&self) -> RefMut<PooledConnection> {
        self.conn.borrow_mut()
    }
}

#[derive(Clone)]
pub struct Connections {
    // Only a single connection with write access will be
    // handed out at a time from the pool. Multiple read
    // connections can be accessed concurrently. This locking
    // pattern around the connection pool prevents SQLITE_LOCKED
    // ("database is locked") errors that would otherwise surface
    // as failed requests.
    pool: SharedConnectionPool,
}

/// Configure the database engine
///
/// Some values like the text encoding can only be changed once after the
/// database has initially been created.
pub fn initialize_database(connection: &mut SqliteConnection) -> Fallible<()> {
    connection.batch_execute(
        r#"
PRAGMA journal_mode = WAL;        -- better write-concurrency
PRAGMA synchronous = NORMAL;      -- fsync only in critical moments, safe for journal_mode = WAL
PRAGMA wal_autocheckpoint = 1000; -- write WAL changes back every 1000 pages (default)
PRAGMA wal_checkpoint(TRUNCATE);  -- free some space by truncating possibly massive WAL files from the last run
PRAGMA automatic_index = 1;       -- detect and log missing indexes
PRAGMA foreign_keys = 1;          -- check foreign key constraints
PRAGMA encoding = 'UTF-8';
"#,
    )?;
    Ok(())
}

impl Connections {
    /// Opens a pool of `pool_size` connections.
    ///
    /// Without a `connection_timeout` r2d2 waits up to 30 seconds for
    /// a free connection before giving up.
    pub fn init(
        url: &str,
        pool_size: u32,
        connection_timeout: Option<Duration>,
    ) -> Fallible<Self> {
        // Establish a test connection before creating the connection pool to fail early.
        // If the given file is inaccessible r2d2 does multiple retries and logs errors
        // instead of failing immediately. Malformed file name for testing: ":/tmp/hktap.sqlite"
        use diesel::Connection as _;
        // The test connection is dropped right away, missing files
        // have been created at this point.
        let _ = diesel::SqliteConnection::establish(url)?;
        let manager = ConnectionManager::new(url);
        let mut builder = ConnectionPool::builder().max_size(pool_size);
        if let Some(timeout) = connection_timeout {
            builder = builder.connection_timeout(timeout);
        }
        let pool = builder.build(manager)?;
        initialize_database(&mut *pool.get()?)?;
        Ok(Self::new(pool))
    }

    fn new(pool: ConnectionPool) -> Self {
        Self {
            pool: Arc::new(RwLock::new(pool)),
        }
    }

    pub fn shared(&self) -> Result<DbReadOnly, repo::Error> {
        DbReadOnly::try_new(&self.pool)
    }

    pub fn exclusive(&self) -> Result<DbReadWrite, repo::Error> {
        DbReadWrite::try_new(&self.pool)
    }
}

pub fn run_embedded_database_migrations(conn: DbReadWrite<'_>) -> Fallible<()> {
    log::info!("Running embedded database migrations");
    let mut sqlite_conn = conn.sqlite_conn();
    let applied = sqlite_conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| anyhow::anyhow!("Failed to run database migrations: {err}"))?;
    log::debug!("Applied {} database migration(s)", applied.len());
    Ok(())
}
