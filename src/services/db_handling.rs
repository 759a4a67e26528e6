use actix::Handler;

use crate::services::db_models::{
    Bill, BillSummary, DashboardCounts, InventoryStatus, MenuCategory, MenuItem, Order,
    OrderDetails, OrderItem, PendingOrder, Reservation, RestaurantTable,
};
use crate::services::db_utils::{establish_connection, DbActor};
use crate::services::messages::*;
use crate::services::store::{billing, dashboard, inventory, menu, orders, reservations, tables};
use crate::types::StoreResult;

impl Handler<CreateMenuItem> for DbActor {
    type Result = StoreResult<MenuItem>;

    fn handle(&mut self, msg: CreateMenuItem, _ctx: &mut Self::Context) -> Self::Result {
        let mut conn = establish_connection(&self.0)?;

        menu::create_menu_item(&mut conn, msg.0)
    }
}

impl Handler<FetchMenuItem> for DbActor {
    type Result = StoreResult<MenuItem>;

    fn handle(&mut self, msg: FetchMenuItem, _ctx: &mut Self::Context) -> Self::Result {
        let mut conn = establish_connection(&self.0)?;

        menu::get_menu_item(&mut conn, msg.0)
    }
}

impl Handler<FetchMenuItems> for DbActor {
    type Result = StoreResult<Vec<MenuItem>>;

    fn handle(&mut self, msg: FetchMenuItems, _ctx: &mut Self::Context) -> Self::Result {
        let mut conn = establish_connection(&self.0)?;

        menu::list_menu_items(&mut conn, &msg.0)
    }
}

impl Handler<FetchMenuByCategory> for DbActor {
    type Result = StoreResult<Vec<MenuCategory>>;

    fn handle(&mut self, _msg: FetchMenuByCategory, _ctx: &mut Self::Context) -> Self::Result {
        let mut conn = establish_connection(&self.0)?;

        menu::menu_by_category(&mut conn)
    }
}

impl Handler<UpdateMenuItem> for DbActor {
    type Result = StoreResult<MenuItem>;

    fn handle(&mut self, msg: UpdateMenuItem, _ctx: &mut Self::Context) -> Self::Result {
        let mut conn = establish_connection(&self.0)?;

        menu::update_menu_item(&mut conn, msg.id, msg.changes)
    }
}

impl Handler<SetMenuItemAvailability> for DbActor {
    type Result = StoreResult<MenuItem>;

    fn handle(&mut self, msg: SetMenuItemAvailability, _ctx: &mut Self::Context) -> Self::Result {
        let mut conn = establish_connection(&self.0)?;

        menu::set_menu_item_availability(&mut conn, msg.id, msg.available)
    }
}

impl Handler<DeleteMenuItem> for DbActor {
    type Result = StoreResult<()>;

    fn handle(&mut self, msg: DeleteMenuItem, _ctx: &mut Self::Context) -> Self::Result {
        let mut conn = establish_connection(&self.0)?;

        menu::delete_menu_item(&mut conn, msg.0)
    }
}

impl Handler<CreateTable> for DbActor {
    type Result = StoreResult<RestaurantTable>;

    fn handle(&mut self, msg: CreateTable, _ctx: &mut Self::Context) -> Self::Result {
        let mut conn = establish_connection(&self.0)?;

        tables::create_table(&mut conn, msg.0)
    }
}

impl Handler<FetchTables> for DbActor {
    type Result = StoreResult<Vec<RestaurantTable>>;

    fn handle(&mut self, msg: FetchTables, _ctx: &mut Self::Context) -> Self::Result {
        let mut conn = establish_connection(&self.0)?;

        tables::list_tables(&mut conn, msg.0)
    }
}

impl Handler<SetTableStatus> for DbActor {
    type Result = StoreResult<RestaurantTable>;

    fn handle(&mut self, msg: SetTableStatus, _ctx: &mut Self::Context) -> Self::Result {
        let mut conn = establish_connection(&self.0)?;

        tables::set_table_status(&mut conn, msg.id, msg.status)
    }
}

impl Handler<CreateOrder> for DbActor {
    type Result = StoreResult<Order>;

    fn handle(&mut self, msg: CreateOrder, _ctx: &mut Self::Context) -> Self::Result {
        let mut conn = establish_connection(&self.0)?;

        orders::create_order(&mut conn, msg.table_id, msg.customer_name)
    }
}

impl Handler<FetchOrder> for DbActor {
    type Result = StoreResult<OrderDetails>;

    fn handle(&mut self, msg: FetchOrder, _ctx: &mut Self::Context) -> Self::Result {
        let mut conn = establish_connection(&self.0)?;

        orders::order_details(&mut conn, msg.0)
    }
}

impl Handler<FetchOrders> for DbActor {
    type Result = StoreResult<Vec<Order>>;

    fn handle(&mut self, msg: FetchOrders, _ctx: &mut Self::Context) -> Self::Result {
        let mut conn = establish_connection(&self.0)?;

        orders::list_orders(&mut conn, msg.0)
    }
}

impl Handler<FetchPendingOrders> for DbActor {
    type Result = StoreResult<Vec<PendingOrder>>;

    fn handle(&mut self, _msg: FetchPendingOrders, _ctx: &mut Self::Context) -> Self::Result {
        let mut conn = establish_connection(&self.0)?;

        orders::pending_orders(&mut conn)
    }
}

impl Handler<AddItemToOrder> for DbActor {
    type Result = StoreResult<OrderItem>;

    fn handle(&mut self, msg: AddItemToOrder, _ctx: &mut Self::Context) -> Self::Result {
        let mut conn = establish_connection(&self.0)?;

        orders::add_order_item(&mut conn, msg.0)
    }
}

impl Handler<RemoveItemFromOrder> for DbActor {
    type Result = StoreResult<()>;

    fn handle(&mut self, msg: RemoveItemFromOrder, _ctx: &mut Self::Context) -> Self::Result {
        let mut conn = establish_connection(&self.0)?;

        orders::remove_order_item(&mut conn, msg.order_id, msg.order_item_id)
    }
}

impl Handler<CompleteOrder> for DbActor {
    type Result = StoreResult<Bill>;

    fn handle(&mut self, msg: CompleteOrder, _ctx: &mut Self::Context) -> Self::Result {
        let mut conn = establish_connection(&self.0)?;

        orders::complete_order(&mut conn, msg.0)
    }
}

impl Handler<CancelOrder> for DbActor {
    type Result = StoreResult<()>;

    fn handle(&mut self, msg: CancelOrder, _ctx: &mut Self::Context) -> Self::Result {
        let mut conn = establish_connection(&self.0)?;

        orders::cancel_order(&mut conn, msg.0)
    }
}

impl Handler<FetchUnpaidBills> for DbActor {
    type Result = StoreResult<Vec<BillSummary>>;

    fn handle(&mut self, _msg: FetchUnpaidBills, _ctx: &mut Self::Context) -> Self::Result {
        let mut conn = establish_connection(&self.0)?;

        billing::unpaid_bills(&mut conn)
    }
}

impl Handler<FetchRecentPayments> for DbActor {
    type Result = StoreResult<Vec<BillSummary>>;

    fn handle(&mut self, msg: FetchRecentPayments, _ctx: &mut Self::Context) -> Self::Result {
        let mut conn = establish_connection(&self.0)?;

        billing::recent_payments(&mut conn, msg.0)
    }
}

impl Handler<PayBill> for DbActor {
    type Result = StoreResult<Bill>;

    fn handle(&mut self, msg: PayBill, _ctx: &mut Self::Context) -> Self::Result {
        let mut conn = establish_connection(&self.0)?;

        billing::pay_bill(&mut conn, msg.id, msg.method)
    }
}

impl Handler<CreateInventoryItem> for DbActor {
    type Result = StoreResult<InventoryStatus>;

    fn handle(&mut self, msg: CreateInventoryItem, _ctx: &mut Self::Context) -> Self::Result {
        let mut conn = establish_connection(&self.0)?;

        inventory::create_inventory_item(&mut conn, msg.0)
    }
}

impl Handler<FetchInventory> for DbActor {
    type Result = StoreResult<Vec<InventoryStatus>>;

    fn handle(&mut self, msg: FetchInventory, _ctx: &mut Self::Context) -> Self::Result {
        let mut conn = establish_connection(&self.0)?;

        inventory::list_inventory(&mut conn, msg.low_stock_only)
    }
}

impl Handler<UpdateInventoryItem> for DbActor {
    type Result = StoreResult<InventoryStatus>;

    fn handle(&mut self, msg: UpdateInventoryItem, _ctx: &mut Self::Context) -> Self::Result {
        let mut conn = establish_connection(&self.0)?;

        inventory::update_inventory_item(&mut conn, msg.id, msg.changes)
    }
}

impl Handler<DeleteInventoryItem> for DbActor {
    type Result = StoreResult<()>;

    fn handle(&mut self, msg: DeleteInventoryItem, _ctx: &mut Self::Context) -> Self::Result {
        let mut conn = establish_connection(&self.0)?;

        inventory::delete_inventory_item(&mut conn, msg.0)
    }
}

impl Handler<CreateReservation> for DbActor {
    type Result = StoreResult<Reservation>;

    fn handle(&mut self, msg: CreateReservation, _ctx: &mut Self::Context) -> Self::Result {
        let mut conn = establish_connection(&self.0)?;

        reservations::create_reservation(&mut conn, msg.0)
    }
}

impl Handler<FetchReservations> for DbActor {
    type Result = StoreResult<Vec<Reservation>>;

    fn handle(&mut self, msg: FetchReservations, _ctx: &mut Self::Context) -> Self::Result {
        let mut conn = establish_connection(&self.0)?;

        reservations::reservations_on(&mut conn, msg.0)
    }
}

impl Handler<SeatReservation> for DbActor {
    type Result = StoreResult<Reservation>;

    fn handle(&mut self, msg: SeatReservation, _ctx: &mut Self::Context) -> Self::Result {
        let mut conn = establish_connection(&self.0)?;

        reservations::seat_reservation(&mut conn, msg.0)
    }
}

impl Handler<CancelReservation> for DbActor {
    type Result = StoreResult<Reservation>;

    fn handle(&mut self, msg: CancelReservation, _ctx: &mut Self::Context) -> Self::Result {
        let mut conn = establish_connection(&self.0)?;

        reservations::cancel_reservation(&mut conn, msg.0)
    }
}

impl Handler<FetchDashboard> for DbActor {
    type Result = StoreResult<DashboardCounts>;

    fn handle(&mut self, msg: FetchDashboard, _ctx: &mut Self::Context) -> Self::Result {
        let mut conn = establish_connection(&self.0)?;

        dashboard::dashboard_counts(&mut conn, msg.0)
    }
}
