use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use diesel::prelude::*;
use serde::Serialize;

use crate::schema::{
    bills, inventory, menu_items, order_items, orders, reservations, restaurant_tables,
};
use crate::types::{BillStatus, OrderStatus, PaymentMethod, ReservationStatus, TableStatus};

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq, Serialize)]
#[diesel(table_name = menu_items)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct MenuItem {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub price_cents: i64,
    pub description: Option<String>,
    pub available: bool,
}

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq, Serialize)]
#[diesel(table_name = restaurant_tables)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct RestaurantTable {
    pub id: i64,
    pub capacity: i32,
    pub status: TableStatus,
}

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq, Serialize)]
#[diesel(table_name = orders)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Order {
    pub id: i64,
    pub table_id: i64,
    pub customer_name: String,
    pub status: OrderStatus,
    pub created_at: NaiveDateTime,
}

#[derive(Queryable, Selectable, Identifiable, Associations, Debug, Clone, PartialEq, Serialize)]
#[diesel(belongs_to(Order))]
#[diesel(table_name = order_items)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub menu_item_id: i64,
    pub quantity: i32,
    pub notes: Option<String>,
}

/// `amount_cents` is frozen when the order is completed.
#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq, Serialize)]
#[diesel(table_name = bills)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Bill {
    pub id: i64,
    pub order_id: i64,
    pub amount_cents: i64,
    pub payment_method: Option<PaymentMethod>,
    pub status: BillStatus,
    pub created_at: NaiveDateTime,
}

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq, Serialize)]
#[diesel(table_name = inventory)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct InventoryItem {
    pub id: i64,
    pub item_name: String,
    pub quantity: f64,
    pub unit: String,
    pub threshold: f64,
}

impl InventoryItem {
    pub fn is_low_stock(&self) -> bool {
        self.quantity <= self.threshold
    }
}

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq, Serialize)]
#[diesel(table_name = reservations)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Reservation {
    pub id: i64,
    pub table_id: i64,
    pub customer_name: String,
    pub phone: String,
    #[serde(rename = "date")]
    pub reservation_date: NaiveDate,
    #[serde(rename = "time")]
    pub reservation_time: NaiveTime,
    pub party_size: i32,
    pub status: ReservationStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MenuCategory {
    pub category: String,
    pub items: Vec<MenuItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderLine {
    pub order_item_id: i64,
    pub menu_item_id: i64,
    pub name: String,
    pub quantity: i32,
    pub price_cents: i64,
    pub subtotal_cents: i64,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderDetails {
    #[serde(flatten)]
    pub order: Order,
    pub lines: Vec<OrderLine>,
    pub total_cents: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PendingOrder {
    pub id: i64,
    pub table_id: i64,
    pub customer_name: String,
    pub created_at: NaiveDateTime,
    pub item_count: i64,
}

/// A bill together with the table and customer of its order.
#[derive(Queryable, Debug, Clone, PartialEq, Serialize)]
pub struct BillSummary {
    pub bill_id: i64,
    pub order_id: i64,
    pub table_id: i64,
    pub customer_name: String,
    pub amount_cents: i64,
    pub payment_method: Option<PaymentMethod>,
    pub status: BillStatus,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InventoryStatus {
    #[serde(flatten)]
    pub item: InventoryItem,
    pub low_stock: bool,
}

impl From<InventoryItem> for InventoryStatus {
    fn from(item: InventoryItem) -> Self {
        let low_stock = item.is_low_stock();
        InventoryStatus { item, low_stock }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DashboardCounts {
    pub pending_orders: i64,
    pub available_tables: i64,
    pub low_stock_items: i64,
    pub todays_reservations: i64,
}
