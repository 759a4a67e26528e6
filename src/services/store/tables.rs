use diesel::prelude::*;
use diesel::SqliteConnection;
use validator::Validate;

use crate::schema::restaurant_tables;
use crate::services::db_models::RestaurantTable;
use crate::services::insertable::NewRestaurantTable;
use crate::types::{StoreError, StoreResult, TableStatus};

pub fn create_table(
    conn: &mut SqliteConnection,
    new_table: NewRestaurantTable,
) -> StoreResult<RestaurantTable> {
    new_table.validate()?;

    let table = diesel::insert_into(restaurant_tables::table)
        .values(&new_table)
        .returning(RestaurantTable::as_returning())
        .get_result(conn)?;

    tracing::info!(table_id = table.id, capacity = table.capacity, "table added");
    Ok(table)
}

pub fn get_table(conn: &mut SqliteConnection, table_id: i64) -> StoreResult<RestaurantTable> {
    restaurant_tables::table
        .find(table_id)
        .select(RestaurantTable::as_select())
        .first(conn)
        .optional()?
        .ok_or_else(|| StoreError::not_found("table", table_id))
}

pub fn list_tables(
    conn: &mut SqliteConnection,
    status: Option<TableStatus>,
) -> StoreResult<Vec<RestaurantTable>> {
    let mut query = restaurant_tables::table
        .select(RestaurantTable::as_select())
        .order(restaurant_tables::id)
        .into_boxed();

    if let Some(status) = status {
        query = query.filter(restaurant_tables::status.eq(status));
    }

    Ok(query.load(conn)?)
}

/// Moves a table to `status`. A table already in that status is rejected,
/// so two hosts cannot both occupy the same table.
pub fn set_table_status(
    conn: &mut SqliteConnection,
    table_id: i64,
    status: TableStatus,
) -> StoreResult<RestaurantTable> {
    conn.immediate_transaction(|conn| {
        let current = get_table(conn, table_id)?;
        if current.status == status {
            return Err(StoreError::InvalidState(format!("table {table_id} is already {status}")));
        }

        let table = force_table_status(conn, table_id, status)?;
        tracing::info!(table_id, from = %current.status, to = %status, "table status changed");
        Ok(table)
    })
}

/// Unconditional status write, used when seating a reservation.
pub(crate) fn force_table_status(
    conn: &mut SqliteConnection,
    table_id: i64,
    status: TableStatus,
) -> StoreResult<RestaurantTable> {
    diesel::update(restaurant_tables::table.find(table_id))
        .set(restaurant_tables::status.eq(status))
        .returning(RestaurantTable::as_returning())
        .get_result(conn)
        .optional()?
        .ok_or_else(|| StoreError::not_found("table", table_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::{seeded_connection, test_connection};

    #[test]
    fn new_tables_start_available() {
        let mut conn = test_connection();

        let table = create_table(&mut conn, NewRestaurantTable { capacity: 4 }).unwrap();

        assert_eq!(table.status, TableStatus::Available);
        assert_eq!(table.capacity, 4);
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let mut conn = test_connection();

        let err = create_table(&mut conn, NewRestaurantTable { capacity: 0 }).unwrap_err();

        assert!(matches!(err, StoreError::Validation(_)));
    }

    #[test]
    fn occupy_and_free_toggle_status() {
        let mut conn = seeded_connection();
        let table_id = list_tables(&mut conn, None).unwrap()[1].id;

        let occupied = set_table_status(&mut conn, table_id, TableStatus::Occupied).unwrap();
        assert_eq!(occupied.status, TableStatus::Occupied);
        assert_eq!(list_tables(&mut conn, Some(TableStatus::Occupied)).unwrap(), vec![occupied]);

        let freed = set_table_status(&mut conn, table_id, TableStatus::Available).unwrap();
        assert_eq!(freed.status, TableStatus::Available);
        assert!(list_tables(&mut conn, Some(TableStatus::Occupied)).unwrap().is_empty());
    }

    #[test]
    fn occupying_an_occupied_table_fails() {
        let mut conn = seeded_connection();
        let table_id = list_tables(&mut conn, None).unwrap()[0].id;
        set_table_status(&mut conn, table_id, TableStatus::Occupied).unwrap();

        let err = set_table_status(&mut conn, table_id, TableStatus::Occupied).unwrap_err();

        assert!(matches!(err, StoreError::InvalidState(_)));
    }

    #[test]
    fn unknown_table_is_not_found() {
        let mut conn = test_connection();

        assert!(matches!(
            set_table_status(&mut conn, 7, TableStatus::Occupied),
            Err(StoreError::NotFound { entity: "table", id: 7 })
        ));
    }
}
