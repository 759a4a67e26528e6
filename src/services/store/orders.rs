use diesel::prelude::*;
use diesel::SqliteConnection;
use validator::Validate;

use crate::schema::{bills, menu_items, order_items, orders};
use crate::services::db_models::{Bill, Order, OrderDetails, OrderItem, OrderLine, PendingOrder};
use crate::services::insertable::{NewBill, NewOrder, NewOrderItem};
use crate::services::store::{local_now, menu, tables};
use crate::types::{OrderStatus, StoreError, StoreResult};

pub fn create_order(
    conn: &mut SqliteConnection,
    table_id: i64,
    customer_name: String,
) -> StoreResult<Order> {
    conn.immediate_transaction(|conn| {
        tables::get_table(conn, table_id)?;

        let order = diesel::insert_into(orders::table)
            .values(NewOrder {
                table_id,
                customer_name,
                created_at: local_now(),
            })
            .returning(Order::as_returning())
            .get_result(conn)?;

        tracing::info!(order_id = order.id, table_id, "order opened");
        Ok(order)
    })
}

pub fn get_order(conn: &mut SqliteConnection, order_id: i64) -> StoreResult<Order> {
    orders::table
        .find(order_id)
        .select(Order::as_select())
        .first(conn)
        .optional()?
        .ok_or_else(|| StoreError::not_found("order", order_id))
}

fn get_pending_order(conn: &mut SqliteConnection, order_id: i64) -> StoreResult<Order> {
    let order = get_order(conn, order_id)?;
    if order.status != OrderStatus::Pending {
        return Err(StoreError::InvalidState(format!(
            "order {order_id} is already {}",
            order.status
        )));
    }

    Ok(order)
}

pub fn list_orders(
    conn: &mut SqliteConnection,
    status: Option<OrderStatus>,
) -> StoreResult<Vec<Order>> {
    let mut query = orders::table
        .select(Order::as_select())
        .order(orders::id)
        .into_boxed();

    if let Some(status) = status {
        query = query.filter(orders::status.eq(status));
    }

    Ok(query.load(conn)?)
}

/// Lines of an order priced at the current menu price. Lines whose menu
/// item has been deleted do not join and are left out.
pub fn order_lines(conn: &mut SqliteConnection, order_id: i64) -> StoreResult<Vec<OrderLine>> {
    let rows = order_items::table
        .inner_join(menu_items::table)
        .filter(order_items::order_id.eq(order_id))
        .order(order_items::id)
        .select((
            order_items::id,
            order_items::menu_item_id,
            menu_items::name,
            order_items::quantity,
            menu_items::price_cents,
            order_items::notes,
        ))
        .load::<(i64, i64, String, i32, i64, Option<String>)>(conn)?;

    rows.into_iter()
        .map(|row| -> StoreResult<OrderLine> {
            let (order_item_id, menu_item_id, name, quantity, price_cents, notes) = row;
            let subtotal_cents = i64::from(quantity)
                .checked_mul(price_cents)
                .ok_or_else(|| amount_overflow(order_id))?;

            Ok(OrderLine {
                order_item_id,
                menu_item_id,
                name,
                quantity,
                price_cents,
                subtotal_cents,
                notes,
            })
        })
        .collect()
}

/// Sum of quantity × current price over the lines.
pub fn order_total(lines: &[OrderLine]) -> Option<i64> {
    lines
        .iter()
        .try_fold(0i64, |total, line| total.checked_add(line.subtotal_cents))
}

fn amount_overflow(order_id: i64) -> StoreError {
    StoreError::InvalidState(format!("order {order_id} total is too large"))
}

pub fn order_details(conn: &mut SqliteConnection, order_id: i64) -> StoreResult<OrderDetails> {
    let order = get_order(conn, order_id)?;
    let lines = order_lines(conn, order_id)?;
    let total_cents = order_total(&lines).ok_or_else(|| amount_overflow(order_id))?;

    Ok(OrderDetails { order, lines, total_cents })
}

pub fn pending_orders(conn: &mut SqliteConnection) -> StoreResult<Vec<PendingOrder>> {
    let pending = orders::table
        .filter(orders::status.eq(OrderStatus::Pending))
        .order(orders::id)
        .select(Order::as_select())
        .load(conn)?;

    let items = OrderItem::belonging_to(&pending)
        .select(OrderItem::as_select())
        .load(conn)?
        .grouped_by(&pending);

    Ok(pending
        .into_iter()
        .zip(items)
        .map(|(order, items)| PendingOrder {
            id: order.id,
            table_id: order.table_id,
            customer_name: order.customer_name,
            created_at: order.created_at,
            item_count: items.len() as i64,
        })
        .collect())
}

pub fn add_order_item(
    conn: &mut SqliteConnection,
    new_item: NewOrderItem,
) -> StoreResult<OrderItem> {
    new_item.validate()?;

    conn.immediate_transaction(|conn| {
        get_pending_order(conn, new_item.order_id)?;

        let menu_item = menu::get_menu_item(conn, new_item.menu_item_id)?;
        if !menu_item.available {
            return Err(StoreError::InvalidState(format!("{} is not available", menu_item.name)));
        }

        let item = diesel::insert_into(order_items::table)
            .values(&new_item)
            .returning(OrderItem::as_returning())
            .get_result(conn)?;

        tracing::info!(
            order_id = item.order_id,
            menu_item_id = item.menu_item_id,
            quantity = item.quantity,
            "item added to order"
        );
        Ok(item)
    })
}

pub fn remove_order_item(
    conn: &mut SqliteConnection,
    order_id: i64,
    order_item_id: i64,
) -> StoreResult<()> {
    conn.immediate_transaction(|conn| {
        get_pending_order(conn, order_id)?;

        let deleted = diesel::delete(
            order_items::table
                .filter(order_items::id.eq(order_item_id))
                .filter(order_items::order_id.eq(order_id)),
        )
        .execute(conn)?;
        if deleted == 0 {
            return Err(StoreError::not_found("order item", order_item_id));
        }

        tracing::info!(order_id, order_item_id, "item removed from order");
        Ok(())
    })
}

/// Completes a pending order and issues its bill. The bill amount is the
/// order total at this instant and never follows later price changes.
pub fn complete_order(conn: &mut SqliteConnection, order_id: i64) -> StoreResult<Bill> {
    conn.immediate_transaction(|conn| {
        get_pending_order(conn, order_id)?;

        let lines = order_lines(conn, order_id)?;
        if lines.is_empty() {
            return Err(StoreError::InvalidState(format!("order {order_id} has no items")));
        }
        let amount_cents = order_total(&lines).ok_or_else(|| amount_overflow(order_id))?;

        diesel::update(orders::table.find(order_id))
            .set(orders::status.eq(OrderStatus::Completed))
            .execute(conn)?;

        let bill = diesel::insert_into(bills::table)
            .values(NewBill {
                order_id,
                amount_cents,
                created_at: local_now(),
            })
            .returning(Bill::as_returning())
            .get_result(conn)?;

        tracing::info!(order_id, bill_id = bill.id, amount_cents, "order completed");
        Ok(bill)
    })
}

/// Deletes a pending order together with its items.
pub fn cancel_order(conn: &mut SqliteConnection, order_id: i64) -> StoreResult<()> {
    conn.immediate_transaction(|conn| {
        get_pending_order(conn, order_id)?;

        let items_removed =
            diesel::delete(order_items::table.filter(order_items::order_id.eq(order_id)))
                .execute(conn)?;
        diesel::delete(orders::table.find(order_id)).execute(conn)?;

        tracing::info!(order_id, items_removed, "order cancelled");
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::insertable::{MenuItemChanges, NewMenuItem};
    use crate::services::store::billing;
    use crate::test::{menu_item_named, seeded_connection};
    use crate::types::{BillStatus, TableStatus};

    fn occupied_table(conn: &mut SqliteConnection) -> i64 {
        let table_id = tables::list_tables(conn, None).unwrap()[1].id;
        tables::set_table_status(conn, table_id, TableStatus::Occupied).unwrap();
        table_id
    }

    fn total(conn: &mut SqliteConnection, order_id: i64) -> i64 {
        order_details(conn, order_id).unwrap().total_cents
    }

    fn line(order_id: i64, menu_item_id: i64, quantity: i32) -> NewOrderItem {
        NewOrderItem { order_id, menu_item_id, quantity, notes: None }
    }

    fn add(
        conn: &mut SqliteConnection,
        order_id: i64,
        menu_item_id: i64,
        quantity: i32,
    ) -> OrderItem {
        add_order_item(conn, line(order_id, menu_item_id, quantity)).unwrap()
    }

    #[test]
    fn orders_need_an_existing_table() {
        let mut conn = seeded_connection();

        let err = create_order(&mut conn, 999, "Alice".into()).unwrap_err();

        assert!(matches!(err, StoreError::NotFound { entity: "table", id: 999 }));
    }

    #[test]
    fn total_grows_by_quantity_times_price() {
        let mut conn = seeded_connection();
        let table_id = occupied_table(&mut conn);
        let order = create_order(&mut conn, table_id, "Alice".into()).unwrap();
        let pizza = menu_item_named(&mut conn, "Margherita Pizza");
        let wine = menu_item_named(&mut conn, "House Wine");

        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(total(&mut conn, order.id), 0);

        add(&mut conn, order.id, pizza.id, 2);
        assert_eq!(total(&mut conn, order.id), 2 * 1299);

        add(&mut conn, order.id, wine.id, 3);
        assert_eq!(total(&mut conn, order.id), 2 * 1299 + 3 * 699);

        let details = order_details(&mut conn, order.id).unwrap();
        assert_eq!(details.lines.len(), 2);
        assert_eq!(details.lines[1].subtotal_cents, 2097);
        assert_eq!(details.total_cents, 4695);
    }

    #[test]
    fn quantity_must_be_positive() {
        let mut conn = seeded_connection();
        let table_id = occupied_table(&mut conn);
        let order = create_order(&mut conn, table_id, "Bob".into()).unwrap();
        let pizza = menu_item_named(&mut conn, "Margherita Pizza");

        let err = add_order_item(&mut conn, line(order.id, pizza.id, 0)).unwrap_err();

        assert!(matches!(err, StoreError::Validation(_)));
    }

    #[test]
    fn quantity_has_a_ceiling() {
        let mut conn = seeded_connection();
        let table_id = occupied_table(&mut conn);
        let order = create_order(&mut conn, table_id, "Bob".into()).unwrap();
        let pizza = menu_item_named(&mut conn, "Margherita Pizza");
        let err = add_order_item(&mut conn, line(order.id, pizza.id, 1001)).unwrap_err();

        assert!(matches!(err, StoreError::Validation(_)));
    }

    #[test]
    fn oversized_totals_are_reported_instead_of_wrapping() {
        let mut conn = seeded_connection();
        let table_id = occupied_table(&mut conn);
        let order = create_order(&mut conn, table_id, "Grace".into()).unwrap();
        let caviar: i64 = diesel::insert_into(menu_items::table)
            .values(NewMenuItem {
                name: "Caviar".into(),
                category: "Main".into(),
                price_cents: i64::MAX / 2,
                description: None,
                available: None,
            })
            .returning(menu_items::id)
            .get_result(&mut conn)
            .unwrap();
        add(&mut conn, order.id, caviar, 3);

        assert!(matches!(order_details(&mut conn, order.id), Err(StoreError::InvalidState(_))));
        assert!(matches!(complete_order(&mut conn, order.id), Err(StoreError::InvalidState(_))));
        assert_eq!(get_order(&mut conn, order.id).unwrap().status, OrderStatus::Pending);
        assert!(billing::unpaid_bills(&mut conn).unwrap().is_empty());
    }

    #[test]
    fn unavailable_items_cannot_be_ordered() {
        let mut conn = seeded_connection();
        let table_id = occupied_table(&mut conn);
        let order = create_order(&mut conn, table_id, "Bob".into()).unwrap();
        let tiramisu = menu_item_named(&mut conn, "Tiramisu");
        menu::set_menu_item_availability(&mut conn, tiramisu.id, false).unwrap();

        let err = add_order_item(&mut conn, line(order.id, tiramisu.id, 1)).unwrap_err();

        assert!(matches!(err, StoreError::InvalidState(_)));
    }

    #[test]
    fn completing_issues_one_bill_with_a_frozen_amount() {
        let mut conn = seeded_connection();
        let table_id = occupied_table(&mut conn);
        let order = create_order(&mut conn, table_id, "Alice".into()).unwrap();
        let pizza = menu_item_named(&mut conn, "Margherita Pizza");
        add(&mut conn, order.id, pizza.id, 2);

        let bill = complete_order(&mut conn, order.id).unwrap();

        assert_eq!(bill.order_id, order.id);
        assert_eq!(bill.amount_cents, 2598);
        assert_eq!(bill.status, BillStatus::Unpaid);
        assert_eq!(bill.payment_method, None);
        assert_eq!(get_order(&mut conn, order.id).unwrap().status, OrderStatus::Completed);

        let repriced = MenuItemChanges { price_cents: Some(1599), ..Default::default() };
        menu::update_menu_item(&mut conn, pizza.id, repriced).unwrap();
        assert_eq!(billing::get_bill(&mut conn, bill.id).unwrap().amount_cents, 2598);

        assert!(matches!(complete_order(&mut conn, order.id), Err(StoreError::InvalidState(_))));
        assert_eq!(billing::unpaid_bills(&mut conn).unwrap().len(), 1);
    }

    #[test]
    fn completed_orders_are_closed_to_new_items() {
        let mut conn = seeded_connection();
        let table_id = occupied_table(&mut conn);
        let order = create_order(&mut conn, table_id, "Alice".into()).unwrap();
        let pizza = menu_item_named(&mut conn, "Margherita Pizza");
        add(&mut conn, order.id, pizza.id, 1);
        complete_order(&mut conn, order.id).unwrap();

        let err = add_order_item(&mut conn, line(order.id, pizza.id, 1)).unwrap_err();

        assert!(matches!(err, StoreError::InvalidState(_)));
    }

    #[test]
    fn empty_orders_cannot_be_completed() {
        let mut conn = seeded_connection();
        let table_id = occupied_table(&mut conn);
        let order = create_order(&mut conn, table_id, "Carol".into()).unwrap();

        assert!(matches!(complete_order(&mut conn, order.id), Err(StoreError::InvalidState(_))));
        assert!(billing::unpaid_bills(&mut conn).unwrap().is_empty());
    }

    #[test]
    fn cancelling_removes_order_and_items_without_a_bill() {
        let mut conn = seeded_connection();
        let table_id = occupied_table(&mut conn);
        let order = create_order(&mut conn, table_id, "Dave".into()).unwrap();
        let pizza = menu_item_named(&mut conn, "Margherita Pizza");
        add(&mut conn, order.id, pizza.id, 1);
        add(&mut conn, order.id, pizza.id, 2);

        cancel_order(&mut conn, order.id).unwrap();

        assert!(matches!(get_order(&mut conn, order.id), Err(StoreError::NotFound { .. })));
        let leftover: i64 = order_items::table
            .filter(order_items::order_id.eq(order.id))
            .count()
            .get_result(&mut conn)
            .unwrap();
        assert_eq!(leftover, 0);
        assert!(billing::unpaid_bills(&mut conn).unwrap().is_empty());
        assert!(matches!(cancel_order(&mut conn, order.id), Err(StoreError::NotFound { .. })));
    }

    #[test]
    fn removing_a_line_updates_the_total() {
        let mut conn = seeded_connection();
        let table_id = occupied_table(&mut conn);
        let order = create_order(&mut conn, table_id, "Erin".into()).unwrap();
        let pizza = menu_item_named(&mut conn, "Margherita Pizza");
        let salad = menu_item_named(&mut conn, "Caesar Salad");
        add(&mut conn, order.id, pizza.id, 1);
        let salad_line = add(&mut conn, order.id, salad.id, 1);

        remove_order_item(&mut conn, order.id, salad_line.id).unwrap();

        assert_eq!(total(&mut conn, order.id), 1299);
        assert!(matches!(
            remove_order_item(&mut conn, order.id, salad_line.id),
            Err(StoreError::NotFound { entity: "order item", .. })
        ));
    }

    #[test]
    fn deleted_menu_items_leave_lines_behind() {
        let mut conn = seeded_connection();
        let table_id = occupied_table(&mut conn);
        let order = create_order(&mut conn, table_id, "Frank".into()).unwrap();
        let pizza = menu_item_named(&mut conn, "Margherita Pizza");
        let salad = menu_item_named(&mut conn, "Caesar Salad");
        add(&mut conn, order.id, pizza.id, 1);
        add(&mut conn, order.id, salad.id, 1);

        menu::delete_menu_item(&mut conn, salad.id).unwrap();

        assert_eq!(total(&mut conn, order.id), 1299);
        assert_eq!(pending_orders(&mut conn).unwrap()[0].item_count, 2);
    }

    #[test]
    fn pending_orders_report_item_counts() {
        let mut conn = seeded_connection();
        let table_id = occupied_table(&mut conn);
        let pizza = menu_item_named(&mut conn, "Margherita Pizza");
        let first = create_order(&mut conn, table_id, "Gina".into()).unwrap();
        let second = create_order(&mut conn, table_id, "Hank".into()).unwrap();
        let done = create_order(&mut conn, table_id, "Ivy".into()).unwrap();
        add(&mut conn, first.id, pizza.id, 4);
        add(&mut conn, done.id, pizza.id, 1);
        complete_order(&mut conn, done.id).unwrap();

        let pending = pending_orders(&mut conn).unwrap();

        let counts: Vec<(i64, i64)> =
            pending.iter().map(|order| (order.id, order.item_count)).collect();
        assert_eq!(counts, [(first.id, 1), (second.id, 0)]);
        assert_eq!(list_orders(&mut conn, Some(OrderStatus::Completed)).unwrap().len(), 1);
    }
}
