//! Shared fixtures: in-memory stores with the schema applied.

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::SqliteConnection;

use crate::bootstrap::{run_migrations, seed_defaults};
use crate::schema::menu_items;
use crate::services::db_models::MenuItem;
use crate::services::db_utils::{ConnectionOptions, DbPool};

pub fn test_connection() -> SqliteConnection {
    let mut conn = SqliteConnection::establish(":memory:").expect("in-memory sqlite");
    conn.batch_execute("PRAGMA foreign_keys = ON;").expect("enable foreign keys");
    run_migrations(&mut conn).expect("migrations");
    conn
}

pub fn seeded_connection() -> SqliteConnection {
    let mut conn = test_connection();
    seed_defaults(&mut conn).expect("seed data");
    conn
}

/// A single-connection pool so every checkout sees the same in-memory database.
pub fn seeded_pool() -> DbPool {
    let pool = Pool::builder()
        .max_size(1)
        .connection_customizer(Box::new(ConnectionOptions::default()))
        .build(ConnectionManager::<SqliteConnection>::new(":memory:"))
        .expect("in-memory pool");

    let mut conn = pool.get().expect("pooled connection");
    run_migrations(&mut conn).expect("migrations");
    seed_defaults(&mut conn).expect("seed data");
    drop(conn);

    pool
}

pub fn menu_item_named(conn: &mut SqliteConnection, name: &str) -> MenuItem {
    menu_items::table
        .filter(menu_items::name.eq(name))
        .select(MenuItem::as_select())
        .first(conn)
        .expect("seeded menu item")
}
