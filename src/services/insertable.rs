use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use diesel::{AsChangeset, Insertable};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::schema::bills;
use crate::schema::inventory;
use crate::schema::menu_items;
use crate::schema::order_items;
use crate::schema::orders;
use crate::schema::reservations;
use crate::schema::restaurant_tables;

/// `available` left unset takes the column default (available).
#[derive(Insertable, Deserialize, Serialize, Validate, Debug, Clone)]
#[diesel(table_name = menu_items)]
pub struct NewMenuItem {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub category: String,
    #[validate(range(min = 1, max = 100_000_000))]
    pub price_cents: i64,
    pub description: Option<String>,
    pub available: Option<bool>,
}

#[derive(AsChangeset, Deserialize, Validate, Debug, Clone, Default, PartialEq)]
#[diesel(table_name = menu_items)]
pub struct MenuItemChanges {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    #[validate(length(min = 1))]
    pub category: Option<String>,
    #[validate(range(min = 1, max = 100_000_000))]
    pub price_cents: Option<i64>,
    pub description: Option<String>,
}

#[derive(Insertable, Deserialize, Serialize, Validate, Debug, Clone)]
#[diesel(table_name = restaurant_tables)]
pub struct NewRestaurantTable {
    #[validate(range(min = 1))]
    pub capacity: i32,
}

#[derive(Insertable, Serialize, Clone)]
#[diesel(table_name = orders)]
pub struct NewOrder {
    pub table_id: i64,
    pub customer_name: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable, Serialize, Validate, Debug, Clone)]
#[diesel(table_name = order_items)]
pub struct NewOrderItem {
    pub order_id: i64,
    pub menu_item_id: i64,
    #[validate(range(min = 1, max = 1000))]
    pub quantity: i32,
    pub notes: Option<String>,
}

#[derive(Insertable, Serialize, Clone)]
#[diesel(table_name = bills)]
pub struct NewBill {
    pub order_id: i64,
    pub amount_cents: i64,
    pub created_at: NaiveDateTime,
}

/// `threshold` left unset takes the column default.
#[derive(Insertable, Deserialize, Serialize, Validate, Debug, Clone)]
#[diesel(table_name = inventory)]
pub struct NewInventoryItem {
    #[validate(length(min = 1))]
    pub item_name: String,
    pub quantity: f64,
    #[validate(length(min = 1))]
    pub unit: String,
    #[validate(range(min = 0.0))]
    pub threshold: Option<f64>,
}

#[derive(AsChangeset, Deserialize, Validate, Debug, Clone, Default, PartialEq)]
#[diesel(table_name = inventory)]
pub struct InventoryChanges {
    pub quantity: Option<f64>,
    #[validate(range(min = 0.0))]
    pub threshold: Option<f64>,
}

#[derive(Insertable, Deserialize, Serialize, Validate, Debug, Clone)]
#[diesel(table_name = reservations)]
pub struct NewReservation {
    pub table_id: i64,
    #[validate(length(min = 1))]
    pub customer_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(rename = "date")]
    pub reservation_date: NaiveDate,
    #[serde(rename = "time")]
    pub reservation_time: NaiveTime,
    #[validate(range(min = 1))]
    pub party_size: i32,
}
