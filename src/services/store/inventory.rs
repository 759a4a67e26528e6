use diesel::prelude::*;
use diesel::SqliteConnection;
use validator::Validate;

use crate::schema::inventory;
use crate::services::db_models::{InventoryItem, InventoryStatus};
use crate::services::insertable::{InventoryChanges, NewInventoryItem};
use crate::types::{StoreError, StoreResult};

pub fn create_inventory_item(
    conn: &mut SqliteConnection,
    new_item: NewInventoryItem,
) -> StoreResult<InventoryStatus> {
    new_item.validate()?;

    let item = diesel::insert_into(inventory::table)
        .values(&new_item)
        .returning(InventoryItem::as_returning())
        .get_result(conn)
        .map_err(|err| match StoreError::from(err) {
            StoreError::Conflict(_) => StoreError::Conflict(format!(
                "inventory item '{}' already exists",
                new_item.item_name
            )),
            other => other,
        })?;

    tracing::info!(
        inventory_item_id = item.id,
        item_name = %item.item_name,
        "inventory item added"
    );
    Ok(item.into())
}

pub fn get_inventory_item(
    conn: &mut SqliteConnection,
    item_id: i64,
) -> StoreResult<InventoryStatus> {
    inventory::table
        .find(item_id)
        .select(InventoryItem::as_select())
        .first(conn)
        .optional()?
        .map(InventoryStatus::from)
        .ok_or_else(|| StoreError::not_found("inventory item", item_id))
}

/// Every item with its low-stock flag, recomputed on each read.
pub fn list_inventory(
    conn: &mut SqliteConnection,
    low_stock_only: bool,
) -> StoreResult<Vec<InventoryStatus>> {
    let mut query = inventory::table
        .select(InventoryItem::as_select())
        .order(inventory::id)
        .into_boxed();

    if low_stock_only {
        query = query.filter(inventory::quantity.le(inventory::threshold));
    }

    Ok(query.load(conn)?.into_iter().map(InventoryStatus::from).collect())
}

pub fn update_inventory_item(
    conn: &mut SqliteConnection,
    item_id: i64,
    changes: InventoryChanges,
) -> StoreResult<InventoryStatus> {
    changes.validate()?;

    if changes == InventoryChanges::default() {
        return get_inventory_item(conn, item_id);
    }

    let item = diesel::update(inventory::table.find(item_id))
        .set(&changes)
        .returning(InventoryItem::as_returning())
        .get_result(conn)
        .optional()?
        .ok_or_else(|| StoreError::not_found("inventory item", item_id))?;

    if item.is_low_stock() {
        tracing::warn!(
            inventory_item_id = item_id,
            item_name = %item.item_name,
            quantity = item.quantity,
            threshold = item.threshold,
            "stock at or below threshold"
        );
    } else {
        tracing::info!(
            inventory_item_id = item_id,
            quantity = item.quantity,
            "inventory item updated"
        );
    }
    Ok(item.into())
}

pub fn delete_inventory_item(conn: &mut SqliteConnection, item_id: i64) -> StoreResult<()> {
    let deleted = diesel::delete(inventory::table.find(item_id)).execute(conn)?;
    if deleted == 0 {
        return Err(StoreError::not_found("inventory item", item_id));
    }

    tracing::info!(inventory_item_id = item_id, "inventory item deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::{seeded_connection, test_connection};

    fn new_item(item_name: &str, quantity: f64, threshold: f64) -> NewInventoryItem {
        NewInventoryItem {
            item_name: item_name.to_owned(),
            quantity,
            unit: "kg".to_owned(),
            threshold: Some(threshold),
        }
    }

    #[test]
    fn low_stock_is_quantity_at_or_below_threshold() {
        let mut conn = test_connection();

        let scarce = create_inventory_item(&mut conn, new_item("Saffron", 2.0, 5.0)).unwrap();
        let plenty = create_inventory_item(&mut conn, new_item("Rice", 10.0, 5.0)).unwrap();
        let edge = create_inventory_item(&mut conn, new_item("Capers", 5.0, 5.0)).unwrap();

        assert!(scarce.low_stock);
        assert!(!plenty.low_stock);
        assert!(edge.low_stock);

        let low: Vec<i64> = list_inventory(&mut conn, true)
            .unwrap()
            .iter()
            .map(|status| status.item.id)
            .collect();
        assert_eq!(low, [scarce.item.id, edge.item.id]);
    }

    #[test]
    fn threshold_defaults_when_omitted() {
        let mut conn = test_connection();

        let salt = NewInventoryItem { threshold: None, ..new_item("Salt", 4.0, 0.0) };
        let item = create_inventory_item(&mut conn, salt).unwrap();

        assert_eq!(item.item.threshold, 10.0);
        assert!(item.low_stock);
    }

    #[test]
    fn names_are_unique() {
        let mut conn = seeded_connection();

        let err = create_inventory_item(&mut conn, new_item("Flour", 1.0, 1.0)).unwrap_err();

        assert!(matches!(err, StoreError::Conflict(msg) if msg.contains("Flour")));
    }

    #[test]
    fn updating_quantity_recomputes_the_flag() {
        let mut conn = test_connection();
        let item = create_inventory_item(&mut conn, new_item("Parmesan", 8.0, 3.0)).unwrap();

        let updated = update_inventory_item(
            &mut conn,
            item.item.id,
            InventoryChanges { quantity: Some(-1.0), threshold: None },
        )
        .unwrap();

        assert_eq!(updated.item.quantity, -1.0);
        assert_eq!(updated.item.threshold, 3.0);
        assert!(updated.low_stock);
    }

    #[test]
    fn deleting_twice_reports_not_found() {
        let mut conn = test_connection();
        let item = create_inventory_item(&mut conn, new_item("Yeast", 1.0, 0.2)).unwrap();

        delete_inventory_item(&mut conn, item.item.id).unwrap();

        assert!(matches!(
            delete_inventory_item(&mut conn, item.item.id),
            Err(StoreError::NotFound { entity: "inventory item", .. })
        ));
        assert!(list_inventory(&mut conn, false).unwrap().is_empty());
    }
}
