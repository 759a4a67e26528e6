//! Schema creation and first-run seed data.

use diesel::prelude::*;
use diesel::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

use crate::schema::{inventory, menu_items, restaurant_tables};
use crate::services::insertable::{NewInventoryItem, NewMenuItem, NewRestaurantTable};
use crate::types::InitError;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");

const DEFAULT_MENU: [(&str, &str, i64, &str); 5] = [
    ("Margherita Pizza", "Pizza", 1299, "Classic cheese and tomato pizza"),
    ("Spaghetti Carbonara", "Pasta", 1499, "Creamy pasta with pancetta"),
    ("Tiramisu", "Dessert", 799, "Coffee-flavored Italian dessert"),
    ("House Wine", "Drinks", 699, "Red wine by the glass"),
    ("Caesar Salad", "Appetizer", 999, "Romaine lettuce with Caesar dressing"),
];

const DEFAULT_TABLE_CAPACITIES: [i32; 5] = [2, 4, 4, 6, 8];

const DEFAULT_INVENTORY: [(&str, f64, &str, f64); 5] = [
    ("Flour", 50.0, "kg", 10.0),
    ("Tomatoes", 30.0, "kg", 5.0),
    ("Mozzarella", 20.0, "kg", 5.0),
    ("Olive Oil", 15.0, "liters", 3.0),
    ("Basil", 2.0, "kg", 0.5),
];

pub fn run_migrations(conn: &mut SqliteConnection) -> Result<(), InitError> {
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| InitError::Migration(err.to_string()))?;

    for version in applied {
        tracing::info!(%version, "migration applied");
    }
    Ok(())
}

/// Fills each of menu, tables and inventory with defaults, but only when
/// that table is still empty.
pub fn seed_defaults(conn: &mut SqliteConnection) -> QueryResult<()> {
    conn.immediate_transaction(|conn| {
        if menu_items::table.count().get_result::<i64>(conn)? == 0 {
            for (name, category, price_cents, description) in DEFAULT_MENU {
                diesel::insert_into(menu_items::table)
                    .values(NewMenuItem {
                        name: name.to_owned(),
                        category: category.to_owned(),
                        price_cents,
                        description: Some(description.to_owned()),
                        available: Some(true),
                    })
                    .execute(conn)?;
            }
            tracing::info!(rows = DEFAULT_MENU.len(), "seeded menu");
        }

        if restaurant_tables::table.count().get_result::<i64>(conn)? == 0 {
            for capacity in DEFAULT_TABLE_CAPACITIES {
                diesel::insert_into(restaurant_tables::table)
                    .values(NewRestaurantTable { capacity })
                    .execute(conn)?;
            }
            tracing::info!(rows = DEFAULT_TABLE_CAPACITIES.len(), "seeded tables");
        }

        if inventory::table.count().get_result::<i64>(conn)? == 0 {
            for (item_name, quantity, unit, threshold) in DEFAULT_INVENTORY {
                diesel::insert_into(inventory::table)
                    .values(NewInventoryItem {
                        item_name: item_name.to_owned(),
                        quantity,
                        unit: unit.to_owned(),
                        threshold: Some(threshold),
                    })
                    .execute(conn)?;
            }
            tracing::info!(rows = DEFAULT_INVENTORY.len(), "seeded inventory");
        }

        Ok(())
    })
}
