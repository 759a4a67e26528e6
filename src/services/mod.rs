use actix::MailboxError;
use actix_web::http::StatusCode;
use actix_web::web::{self, ServiceConfig};
use actix_web::{error, get, HttpResponse, Responder, ResponseError};
use serde::Serialize;

use crate::types::{StoreError, StoreResult};

pub mod db_handling;
pub mod db_models;
pub mod db_utils;
pub mod insertable;
pub mod messages;
pub mod store;

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl ResponseError for StoreError {
    fn status_code(&self) -> StatusCode {
        match self {
            StoreError::NotFound { .. } => StatusCode::NOT_FOUND,
            StoreError::Conflict(_) => StatusCode::CONFLICT,
            StoreError::Validation(_) => StatusCode::BAD_REQUEST,
            StoreError::InvalidState(_) => StatusCode::UNPROCESSABLE_ENTITY,
            StoreError::Database(_) | StoreError::Pool(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if self.status_code().is_server_error() {
            tracing::error!(error = %self, "store failure");
        }
        HttpResponse::build(self.status_code()).json(ErrorBody { error: self.to_string() })
    }
}

fn respond<T: Serialize>(
    result: Result<StoreResult<T>, MailboxError>,
    status: StatusCode,
) -> HttpResponse {
    match result {
        Ok(Ok(resp)) => HttpResponse::build(status).json(resp),
        Ok(Err(err)) => err.error_response(),
        Err(err) => {
            tracing::error!(error = %err, "database actor unavailable");
            let error = format!("Unable to perform action: {err}");
            HttpResponse::InternalServerError().json(ErrorBody { error })
        }
    }
}

fn respond_empty(result: Result<StoreResult<()>, MailboxError>) -> HttpResponse {
    match result {
        Ok(Ok(())) => HttpResponse::NoContent().finish(),
        other => respond(other, StatusCode::NO_CONTENT),
    }
}

/// Registers every route; shared by the server and the tests.
pub fn configure(cfg: &mut ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        let message = err.to_string();
        let response = HttpResponse::BadRequest().json(ErrorBody { error: message });
        error::InternalError::from_response(err, response).into()
    }))
    .service(home_page)
    .service(healthcheck)
    .service(dashboard_route::dashboard)
    .service(
        web::scope("/tables")
            .service(tables_route::list_tables)
            .service(tables_route::add_table)
            .service(tables_route::occupy_table)
            .service(tables_route::free_table),
    )
    .service(
        web::scope("/menu")
            .service(menu_route::view_menu)
            .service(menu_route::grouped_menu)
            .service(menu_route::add_menu_item)
            .service(menu_route::get_menu_item)
            .service(menu_route::update_menu_item)
            .service(menu_route::set_availability)
            .service(menu_route::delete_menu_item),
    )
    .service(
        web::scope("/orders")
            .service(order_route::create_order)
            .service(order_route::list_orders)
            .service(order_route::pending_orders)
            .service(order_route::get_order)
            .service(order_route::cancel_order)
            .service(order_route::add_item)
            .service(order_route::remove_item)
            .service(order_route::complete_order),
    )
    .service(
        web::scope("/bills")
            .service(billing_route::unpaid_bills)
            .service(billing_route::recent_payments)
            .service(billing_route::pay_bill),
    )
    .service(
        web::scope("/inventory")
            .service(inventory_route::view_inventory)
            .service(inventory_route::add_inventory_item)
            .service(inventory_route::update_inventory_item)
            .service(inventory_route::delete_inventory_item),
    )
    .service(
        web::scope("/reservations")
            .service(reservations_route::list_reservations)
            .service(reservations_route::create_reservation)
            .service(reservations_route::seat_reservation)
            .service(reservations_route::cancel_reservation),
    );
}

#[get("/")]
pub async fn home_page() -> impl Responder {
    HttpResponse::Ok().body("Casa Delizia restaurant service")
}

#[get("/healthcheck")]
pub async fn healthcheck() -> impl Responder {
    HttpResponse::Ok().body("I'm alive!")
}

pub mod dashboard_route {
    use actix_web::http::StatusCode;
    use actix_web::web::Data;
    use actix_web::{get, HttpResponse};

    use super::respond;
    use crate::services::db_utils::AppState;
    use crate::services::messages::FetchDashboard;

    #[get("/dashboard")]
    pub async fn dashboard(state: Data<AppState>) -> HttpResponse {
        let today = chrono::Local::now().date_naive();
        respond(state.db.send(FetchDashboard(today)).await, StatusCode::OK)
    }
}

// sub-route "/tables"
pub mod tables_route {
    use actix_web::http::StatusCode;
    use actix_web::web::{Data, Json, Path, Query};
    use actix_web::{get, post, HttpResponse};
    use serde::Deserialize;

    use super::respond;
    use crate::services::db_utils::AppState;
    use crate::services::insertable::NewRestaurantTable;
    use crate::services::messages::{CreateTable, FetchTables, SetTableStatus};
    use crate::types::TableStatus;

    #[derive(Deserialize)]
    pub struct TableQuery {
        pub status: Option<TableStatus>,
    }

    #[get("")]
    pub async fn list_tables(state: Data<AppState>, query: Query<TableQuery>) -> HttpResponse {
        respond(state.db.send(FetchTables(query.status)).await, StatusCode::OK)
    }

    #[post("")]
    pub async fn add_table(state: Data<AppState>, body: Json<NewRestaurantTable>) -> HttpResponse {
        respond(state.db.send(CreateTable(body.into_inner())).await, StatusCode::CREATED)
    }

    #[post("/{table_id}/occupy")]
    pub async fn occupy_table(state: Data<AppState>, path: Path<i64>) -> HttpResponse {
        let msg = SetTableStatus { id: path.into_inner(), status: TableStatus::Occupied };
        respond(state.db.send(msg).await, StatusCode::OK)
    }

    #[post("/{table_id}/free")]
    pub async fn free_table(state: Data<AppState>, path: Path<i64>) -> HttpResponse {
        let msg = SetTableStatus { id: path.into_inner(), status: TableStatus::Available };
        respond(state.db.send(msg).await, StatusCode::OK)
    }
}

// sub-route "/menu"
pub mod menu_route {
    use actix_web::http::StatusCode;
    use actix_web::web::{Data, Json, Path, Query};
    use actix_web::{delete, get, patch, post, put, HttpResponse};
    use serde::Deserialize;

    use super::{respond, respond_empty};
    use crate::services::db_utils::AppState;
    use crate::services::insertable::{MenuItemChanges, NewMenuItem};
    use crate::services::messages::{
        CreateMenuItem, DeleteMenuItem, FetchMenuByCategory, FetchMenuItem, FetchMenuItems,
        SetMenuItemAvailability, UpdateMenuItem,
    };
    use crate::services::store::menu::MenuFilter;

    #[derive(Deserialize)]
    pub struct AvailabilityBody {
        pub available: bool,
    }

    #[get("")]
    pub async fn view_menu(state: Data<AppState>, filter: Query<MenuFilter>) -> HttpResponse {
        respond(state.db.send(FetchMenuItems(filter.into_inner())).await, StatusCode::OK)
    }

    #[get("/grouped")]
    pub async fn grouped_menu(state: Data<AppState>) -> HttpResponse {
        respond(state.db.send(FetchMenuByCategory).await, StatusCode::OK)
    }

    #[post("")]
    pub async fn add_menu_item(state: Data<AppState>, body: Json<NewMenuItem>) -> HttpResponse {
        respond(state.db.send(CreateMenuItem(body.into_inner())).await, StatusCode::CREATED)
    }

    #[get("/{item_id}")]
    pub async fn get_menu_item(state: Data<AppState>, path: Path<i64>) -> HttpResponse {
        respond(state.db.send(FetchMenuItem(path.into_inner())).await, StatusCode::OK)
    }

    #[patch("/{item_id}")]
    pub async fn update_menu_item(
        state: Data<AppState>,
        path: Path<i64>,
        body: Json<MenuItemChanges>,
    ) -> HttpResponse {
        let msg = UpdateMenuItem { id: path.into_inner(), changes: body.into_inner() };
        respond(state.db.send(msg).await, StatusCode::OK)
    }

    #[put("/{item_id}/availability")]
    pub async fn set_availability(
        state: Data<AppState>,
        path: Path<i64>,
        body: Json<AvailabilityBody>,
    ) -> HttpResponse {
        let msg = SetMenuItemAvailability { id: path.into_inner(), available: body.available };
        respond(state.db.send(msg).await, StatusCode::OK)
    }

    #[delete("/{item_id}")]
    pub async fn delete_menu_item(state: Data<AppState>, path: Path<i64>) -> HttpResponse {
        respond_empty(state.db.send(DeleteMenuItem(path.into_inner())).await)
    }
}

// sub-route "/orders"
pub mod order_route {
    use actix_web::http::StatusCode;
    use actix_web::web::{Data, Json, Path, Query};
    use actix_web::{delete, get, post, HttpResponse};
    use serde::Deserialize;

    use super::{respond, respond_empty};
    use crate::services::db_utils::AppState;
    use crate::services::insertable::NewOrderItem;
    use crate::services::messages::{
        AddItemToOrder, CancelOrder, CompleteOrder, CreateOrder, FetchOrder, FetchOrders,
        FetchPendingOrders, RemoveItemFromOrder,
    };
    use crate::types::OrderStatus;

    #[derive(Deserialize)]
    pub struct NewOrderBody {
        pub table_id: i64,
        pub customer_name: String,
    }

    #[derive(Deserialize)]
    pub struct OrderQuery {
        pub status: Option<OrderStatus>,
    }

    #[derive(Deserialize)]
    pub struct OrderItemBody {
        pub menu_item_id: i64,
        #[serde(default = "one")]
        pub quantity: i32,
        pub notes: Option<String>,
    }

    fn one() -> i32 {
        1
    }

    #[post("")]
    pub async fn create_order(state: Data<AppState>, body: Json<NewOrderBody>) -> HttpResponse {
        let NewOrderBody { table_id, customer_name } = body.into_inner();
        respond(state.db.send(CreateOrder { table_id, customer_name }).await, StatusCode::CREATED)
    }

    #[get("")]
    pub async fn list_orders(state: Data<AppState>, query: Query<OrderQuery>) -> HttpResponse {
        respond(state.db.send(FetchOrders(query.status)).await, StatusCode::OK)
    }

    #[get("/pending")]
    pub async fn pending_orders(state: Data<AppState>) -> HttpResponse {
        respond(state.db.send(FetchPendingOrders).await, StatusCode::OK)
    }

    #[get("/{order_id}")]
    pub async fn get_order(state: Data<AppState>, path: Path<i64>) -> HttpResponse {
        respond(state.db.send(FetchOrder(path.into_inner())).await, StatusCode::OK)
    }

    #[delete("/{order_id}")]
    pub async fn cancel_order(state: Data<AppState>, path: Path<i64>) -> HttpResponse {
        respond_empty(state.db.send(CancelOrder(path.into_inner())).await)
    }

    #[post("/{order_id}/items")]
    pub async fn add_item(
        state: Data<AppState>,
        path: Path<i64>,
        body: Json<OrderItemBody>,
    ) -> HttpResponse {
        let OrderItemBody { menu_item_id, quantity, notes } = body.into_inner();
        let msg = AddItemToOrder(NewOrderItem {
            order_id: path.into_inner(),
            menu_item_id,
            quantity,
            notes,
        });
        respond(state.db.send(msg).await, StatusCode::CREATED)
    }

    #[delete("/{order_id}/items/{order_item_id}")]
    pub async fn remove_item(state: Data<AppState>, path: Path<(i64, i64)>) -> HttpResponse {
        let (order_id, order_item_id) = path.into_inner();
        respond_empty(state.db.send(RemoveItemFromOrder { order_id, order_item_id }).await)
    }

    #[post("/{order_id}/complete")]
    pub async fn complete_order(state: Data<AppState>, path: Path<i64>) -> HttpResponse {
        respond(state.db.send(CompleteOrder(path.into_inner())).await, StatusCode::CREATED)
    }
}

// sub-route "/bills"
pub mod billing_route {
    use actix_web::http::StatusCode;
    use actix_web::web::{Data, Json, Path, Query};
    use actix_web::{get, post, HttpResponse};
    use serde::Deserialize;

    use super::respond;
    use crate::services::db_utils::AppState;
    use crate::services::messages::{FetchRecentPayments, FetchUnpaidBills, PayBill};
    use crate::services::store::billing::RECENT_PAYMENTS_LIMIT;
    use crate::types::PaymentMethod;

    #[derive(Deserialize)]
    pub struct RecentQuery {
        pub limit: Option<i64>,
    }

    #[derive(Deserialize)]
    pub struct PaymentBody {
        pub payment_method: PaymentMethod,
    }

    #[get("/unpaid")]
    pub async fn unpaid_bills(state: Data<AppState>) -> HttpResponse {
        respond(state.db.send(FetchUnpaidBills).await, StatusCode::OK)
    }

    #[get("/recent")]
    pub async fn recent_payments(state: Data<AppState>, query: Query<RecentQuery>) -> HttpResponse {
        let limit = query.limit.unwrap_or(RECENT_PAYMENTS_LIMIT);
        respond(state.db.send(FetchRecentPayments(limit)).await, StatusCode::OK)
    }

    #[post("/{bill_id}/pay")]
    pub async fn pay_bill(
        state: Data<AppState>,
        path: Path<i64>,
        body: Json<PaymentBody>,
    ) -> HttpResponse {
        let msg = PayBill { id: path.into_inner(), method: body.payment_method };
        respond(state.db.send(msg).await, StatusCode::OK)
    }
}

// sub-route "/inventory"
pub mod inventory_route {
    use actix_web::http::StatusCode;
    use actix_web::web::{Data, Json, Path, Query};
    use actix_web::{delete, get, patch, post, HttpResponse};
    use serde::Deserialize;

    use super::{respond, respond_empty};
    use crate::services::db_utils::AppState;
    use crate::services::insertable::{InventoryChanges, NewInventoryItem};
    use crate::services::messages::{
        CreateInventoryItem, DeleteInventoryItem, FetchInventory, UpdateInventoryItem,
    };

    #[derive(Deserialize)]
    pub struct InventoryQuery {
        #[serde(default)]
        pub low_stock: bool,
    }

    #[get("")]
    pub async fn view_inventory(
        state: Data<AppState>,
        query: Query<InventoryQuery>,
    ) -> HttpResponse {
        let msg = FetchInventory { low_stock_only: query.low_stock };
        respond(state.db.send(msg).await, StatusCode::OK)
    }

    #[post("")]
    pub async fn add_inventory_item(
        state: Data<AppState>,
        body: Json<NewInventoryItem>,
    ) -> HttpResponse {
        respond(state.db.send(CreateInventoryItem(body.into_inner())).await, StatusCode::CREATED)
    }

    #[patch("/{item_id}")]
    pub async fn update_inventory_item(
        state: Data<AppState>,
        path: Path<i64>,
        body: Json<InventoryChanges>,
    ) -> HttpResponse {
        let msg = UpdateInventoryItem { id: path.into_inner(), changes: body.into_inner() };
        respond(state.db.send(msg).await, StatusCode::OK)
    }

    #[delete("/{item_id}")]
    pub async fn delete_inventory_item(state: Data<AppState>, path: Path<i64>) -> HttpResponse {
        respond_empty(state.db.send(DeleteInventoryItem(path.into_inner())).await)
    }
}

// sub-route "/reservations"
pub mod reservations_route {
    use actix_web::http::StatusCode;
    use actix_web::web::{Data, Json, Path, Query};
    use actix_web::{get, post, HttpResponse};
    use chrono::NaiveDate;
    use serde::Deserialize;

    use super::respond;
    use crate::services::db_utils::AppState;
    use crate::services::insertable::NewReservation;
    use crate::services::messages::{
        CancelReservation, CreateReservation, FetchReservations, SeatReservation,
    };

    #[derive(Deserialize)]
    pub struct ReservationQuery {
        pub date: Option<NaiveDate>,
    }

    /// Reservations for `?date=`, or for today.
    #[get("")]
    pub async fn list_reservations(
        state: Data<AppState>,
        query: Query<ReservationQuery>,
    ) -> HttpResponse {
        let date = query.date.unwrap_or_else(|| chrono::Local::now().date_naive());
        respond(state.db.send(FetchReservations(date)).await, StatusCode::OK)
    }

    #[post("")]
    pub async fn create_reservation(
        state: Data<AppState>,
        body: Json<NewReservation>,
    ) -> HttpResponse {
        respond(state.db.send(CreateReservation(body.into_inner())).await, StatusCode::CREATED)
    }

    #[post("/{reservation_id}/seat")]
    pub async fn seat_reservation(state: Data<AppState>, path: Path<i64>) -> HttpResponse {
        respond(state.db.send(SeatReservation(path.into_inner())).await, StatusCode::OK)
    }

    #[post("/{reservation_id}/cancel")]
    pub async fn cancel_reservation(state: Data<AppState>, path: Path<i64>) -> HttpResponse {
        respond(state.db.send(CancelReservation(path.into_inner())).await, StatusCode::OK)
    }
}
