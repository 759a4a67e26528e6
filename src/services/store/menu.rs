use diesel::prelude::*;
use diesel::SqliteConnection;
use validator::Validate;

use crate::schema::menu_items;
use crate::services::db_models::{MenuCategory, MenuItem};
use crate::services::insertable::{MenuItemChanges, NewMenuItem};
use crate::types::{StoreError, StoreResult};

#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize)]
pub struct MenuFilter {
    pub category: Option<String>,
    pub available: Option<bool>,
}

pub fn create_menu_item(
    conn: &mut SqliteConnection,
    new_item: NewMenuItem,
) -> StoreResult<MenuItem> {
    new_item.validate()?;

    let item = diesel::insert_into(menu_items::table)
        .values(&new_item)
        .returning(MenuItem::as_returning())
        .get_result(conn)?;

    tracing::info!(
        menu_item_id = item.id,
        name = %item.name,
        price_cents = item.price_cents,
        "menu item created"
    );
    Ok(item)
}

pub fn get_menu_item(conn: &mut SqliteConnection, item_id: i64) -> StoreResult<MenuItem> {
    menu_items::table
        .find(item_id)
        .select(MenuItem::as_select())
        .first(conn)
        .optional()?
        .ok_or_else(|| StoreError::not_found("menu item", item_id))
}

pub fn list_menu_items(
    conn: &mut SqliteConnection,
    filter: &MenuFilter,
) -> StoreResult<Vec<MenuItem>> {
    let mut query = menu_items::table
        .select(MenuItem::as_select())
        .order(menu_items::id)
        .into_boxed();

    if let Some(category) = &filter.category {
        query = query.filter(menu_items::category.eq(category.clone()));
    }
    if let Some(available) = filter.available {
        query = query.filter(menu_items::available.eq(available));
    }

    Ok(query.load(conn)?)
}

pub fn update_menu_item(
    conn: &mut SqliteConnection,
    item_id: i64,
    changes: MenuItemChanges,
) -> StoreResult<MenuItem> {
    changes.validate()?;

    if changes == MenuItemChanges::default() {
        return get_menu_item(conn, item_id);
    }

    let item = diesel::update(menu_items::table.find(item_id))
        .set(&changes)
        .returning(MenuItem::as_returning())
        .get_result(conn)
        .optional()?
        .ok_or_else(|| StoreError::not_found("menu item", item_id))?;

    tracing::info!(menu_item_id = item_id, "menu item updated");
    Ok(item)
}

pub fn set_menu_item_availability(
    conn: &mut SqliteConnection,
    item_id: i64,
    available: bool,
) -> StoreResult<MenuItem> {
    let item = diesel::update(menu_items::table.find(item_id))
        .set(menu_items::available.eq(available))
        .returning(MenuItem::as_returning())
        .get_result(conn)
        .optional()?
        .ok_or_else(|| StoreError::not_found("menu item", item_id))?;

    tracing::info!(menu_item_id = item_id, available, "menu item availability changed");
    Ok(item)
}

/// Order lines that reference the item are left untouched.
pub fn delete_menu_item(conn: &mut SqliteConnection, item_id: i64) -> StoreResult<()> {
    let deleted = diesel::delete(menu_items::table.find(item_id)).execute(conn)?;
    if deleted == 0 {
        return Err(StoreError::not_found("menu item", item_id));
    }

    tracing::info!(menu_item_id = item_id, "menu item deleted");
    Ok(())
}

pub fn menu_by_category(conn: &mut SqliteConnection) -> StoreResult<Vec<MenuCategory>> {
    let items = list_menu_items(conn, &MenuFilter::default())?;
    Ok(group_by_category(items))
}

/// Partitions items by category, categories in order of first appearance.
pub fn group_by_category(items: Vec<MenuItem>) -> Vec<MenuCategory> {
    let mut groups: Vec<MenuCategory> = Vec::new();

    for item in items {
        match groups.iter_mut().find(|group| group.category == item.category) {
            Some(group) => group.items.push(item),
            None => groups.push(MenuCategory {
                category: item.category.clone(),
                items: vec![item],
            }),
        }
    }

    groups
}
