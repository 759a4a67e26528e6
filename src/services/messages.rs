use actix::Message;
use chrono::NaiveDate;

use crate::services::db_models::{
    Bill, BillSummary, DashboardCounts, InventoryStatus, MenuCategory, MenuItem, Order,
    OrderDetails, OrderItem, PendingOrder, Reservation, RestaurantTable,
};
use crate::services::insertable::{
    InventoryChanges, MenuItemChanges, NewInventoryItem, NewMenuItem, NewOrderItem, NewReservation,
    NewRestaurantTable,
};
use crate::services::store::menu::MenuFilter;
use crate::types::{OrderStatus, PaymentMethod, StoreResult, TableStatus};

// menu

#[derive(Message)]
#[rtype(result = "StoreResult<MenuItem>")]
pub struct CreateMenuItem(pub NewMenuItem);

#[derive(Message)]
#[rtype(result = "StoreResult<MenuItem>")]
pub struct FetchMenuItem(pub i64);

#[derive(Message)]
#[rtype(result = "StoreResult<Vec<MenuItem>>")]
pub struct FetchMenuItems(pub MenuFilter);

#[derive(Message)]
#[rtype(result = "StoreResult<Vec<MenuCategory>>")]
pub struct FetchMenuByCategory;

#[derive(Message)]
#[rtype(result = "StoreResult<MenuItem>")]
pub struct UpdateMenuItem {
    pub id: i64,
    pub changes: MenuItemChanges,
}

#[derive(Message)]
#[rtype(result = "StoreResult<MenuItem>")]
pub struct SetMenuItemAvailability {
    pub id: i64,
    pub available: bool,
}

#[derive(Message)]
#[rtype(result = "StoreResult<()>")]
pub struct DeleteMenuItem(pub i64);

// tables

#[derive(Message)]
#[rtype(result = "StoreResult<RestaurantTable>")]
pub struct CreateTable(pub NewRestaurantTable);

#[derive(Message)]
#[rtype(result = "StoreResult<Vec<RestaurantTable>>")]
pub struct FetchTables(pub Option<TableStatus>);

#[derive(Message)]
#[rtype(result = "StoreResult<RestaurantTable>")]
pub struct SetTableStatus {
    pub id: i64,
    pub status: TableStatus,
}

// orders

#[derive(Message)]
#[rtype(result = "StoreResult<Order>")]
pub struct CreateOrder {
    pub table_id: i64,
    pub customer_name: String,
}

#[derive(Message)]
#[rtype(result = "StoreResult<OrderDetails>")]
pub struct FetchOrder(pub i64);

#[derive(Message)]
#[rtype(result = "StoreResult<Vec<Order>>")]
pub struct FetchOrders(pub Option<OrderStatus>);

#[derive(Message)]
#[rtype(result = "StoreResult<Vec<PendingOrder>>")]
pub struct FetchPendingOrders;

#[derive(Message)]
#[rtype(result = "StoreResult<OrderItem>")]
pub struct AddItemToOrder(pub NewOrderItem);

#[derive(Message)]
#[rtype(result = "StoreResult<()>")]
pub struct RemoveItemFromOrder {
    pub order_id: i64,
    pub order_item_id: i64,
}

#[derive(Message)]
#[rtype(result = "StoreResult<Bill>")]
pub struct CompleteOrder(pub i64);

#[derive(Message)]
#[rtype(result = "StoreResult<()>")]
pub struct CancelOrder(pub i64);

// billing

#[derive(Message)]
#[rtype(result = "StoreResult<Vec<BillSummary>>")]
pub struct FetchUnpaidBills;

#[derive(Message)]
#[rtype(result = "StoreResult<Vec<BillSummary>>")]
pub struct FetchRecentPayments(pub i64);

#[derive(Message)]
#[rtype(result = "StoreResult<Bill>")]
pub struct PayBill {
    pub id: i64,
    pub method: PaymentMethod,
}

// inventory

#[derive(Message)]
#[rtype(result = "StoreResult<InventoryStatus>")]
pub struct CreateInventoryItem(pub NewInventoryItem);

#[derive(Message)]
#[rtype(result = "StoreResult<Vec<InventoryStatus>>")]
pub struct FetchInventory {
    pub low_stock_only: bool,
}

#[derive(Message)]
#[rtype(result = "StoreResult<InventoryStatus>")]
pub struct UpdateInventoryItem {
    pub id: i64,
    pub changes: InventoryChanges,
}

#[derive(Message)]
#[rtype(result = "StoreResult<()>")]
pub struct DeleteInventoryItem(pub i64);

// reservations

#[derive(Message)]
#[rtype(result = "StoreResult<Reservation>")]
pub struct CreateReservation(pub NewReservation);

#[derive(Message)]
#[rtype(result = "StoreResult<Vec<Reservation>>")]
pub struct FetchReservations(pub NaiveDate);

#[derive(Message)]
#[rtype(result = "StoreResult<Reservation>")]
pub struct SeatReservation(pub i64);

#[derive(Message)]
#[rtype(result = "StoreResult<Reservation>")]
pub struct CancelReservation(pub i64);

// dashboard

#[derive(Message)]
#[rtype(result = "StoreResult<DashboardCounts>")]
pub struct FetchDashboard(pub NaiveDate);
