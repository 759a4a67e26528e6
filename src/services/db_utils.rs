use actix::{Actor, Addr, SyncContext};
use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool, PoolError, PooledConnection};
use diesel::SqliteConnection;

use crate::types::StoreResult;

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;

pub struct DbActor(pub DbPool);

pub struct AppState {
    pub db: Addr<DbActor>,
}

impl Actor for DbActor {
    type Context = SyncContext<Self>;
}

/// Pragmas applied to every connection the pool hands out.
#[derive(Debug, Clone, Copy)]
pub struct ConnectionOptions {
    pub busy_timeout_ms: u32,
}

impl Default for ConnectionOptions {
    fn default() -> Self {
        ConnectionOptions { busy_timeout_ms: 5_000 }
    }
}

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionOptions {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        conn.batch_execute(&format!(
            "PRAGMA foreign_keys = ON; PRAGMA busy_timeout = {};",
            self.busy_timeout_ms
        ))
        .map_err(diesel::r2d2::Error::QueryError)
    }
}

pub fn get_db_pool(db_url: &str, pool_size: u32) -> Result<DbPool, PoolError> {
    let manager = ConnectionManager::<SqliteConnection>::new(db_url);

    Pool::builder()
        .max_size(pool_size)
        .connection_customizer(Box::new(ConnectionOptions::default()))
        .build(manager)
}

pub fn establish_connection(
    pool: &DbPool,
) -> StoreResult<PooledConnection<ConnectionManager<SqliteConnection>>> {
    Ok(pool.get()?)
}
