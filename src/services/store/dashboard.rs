use chrono::NaiveDate;
use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::schema::{inventory, orders, reservations, restaurant_tables};
use crate::services::db_models::DashboardCounts;
use crate::types::{OrderStatus, StoreResult, TableStatus};

/// Headline counts; `today` is the caller's local calendar date.
pub fn dashboard_counts(
    conn: &mut SqliteConnection,
    today: NaiveDate,
) -> StoreResult<DashboardCounts> {
    let pending_orders = orders::table
        .filter(orders::status.eq(OrderStatus::Pending))
        .count()
        .get_result(conn)?;

    let available_tables = restaurant_tables::table
        .filter(restaurant_tables::status.eq(TableStatus::Available))
        .count()
        .get_result(conn)?;

    let low_stock_items = inventory::table
        .filter(inventory::quantity.le(inventory::threshold))
        .count()
        .get_result(conn)?;

    let todays_reservations = reservations::table
        .filter(reservations::reservation_date.eq(today))
        .count()
        .get_result(conn)?;

    Ok(DashboardCounts {
        pending_orders,
        available_tables,
        low_stock_items,
        todays_reservations,
    })
}

#[cfg(test)]
mod tests {
    use chrono::NaiveTime;

    use super::*;
    use crate::services::insertable::{NewInventoryItem, NewReservation};
    use crate::services::store::{inventory as inventory_store, orders as order_store};
    use crate::services::store::{reservations as reservation_store, tables};
    use crate::test::seeded_connection;

    #[test]
    fn counts_reflect_fresh_reads() {
        let mut conn = seeded_connection();
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();

        let initial = dashboard_counts(&mut conn, today).unwrap();
        assert_eq!(
            initial,
            DashboardCounts {
                pending_orders: 0,
                available_tables: 5,
                low_stock_items: 0,
                todays_reservations: 0,
            }
        );

        tables::set_table_status(&mut conn, 2, TableStatus::Occupied).unwrap();
        order_store::create_order(&mut conn, 2, "Alice".into()).unwrap();
        for (date, hour) in [(today, 19), (today, 20), (today.succ_opt().unwrap(), 19)] {
            reservation_store::create_reservation(
                &mut conn,
                NewReservation {
                    table_id: 4,
                    customer_name: "Party".into(),
                    phone: String::new(),
                    reservation_date: date,
                    reservation_time: NaiveTime::from_hms_opt(hour, 0, 0).unwrap(),
                    party_size: 6,
                },
            )
            .unwrap();
        }
        inventory_store::create_inventory_item(
            &mut conn,
            NewInventoryItem {
                item_name: "Saffron".into(),
                quantity: 2.0,
                unit: "g".into(),
                threshold: Some(2.0),
            },
        )
        .unwrap();

        let after = dashboard_counts(&mut conn, today).unwrap();
        assert_eq!(after.pending_orders, 1);
        assert_eq!(after.available_tables, 4);
        assert_eq!(after.todays_reservations, 2);
        assert_eq!(after.low_stock_items, 1);
    }
}
