use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::schema::{bills, orders};
use crate::services::db_models::{Bill, BillSummary};
use crate::types::{BillStatus, PaymentMethod, StoreError, StoreResult};

pub const RECENT_PAYMENTS_LIMIT: i64 = 10;

pub fn get_bill(conn: &mut SqliteConnection, bill_id: i64) -> StoreResult<Bill> {
    bills::table
        .find(bill_id)
        .select(Bill::as_select())
        .first(conn)
        .optional()?
        .ok_or_else(|| StoreError::not_found("bill", bill_id))
}

type SummaryColumns = (
    bills::id,
    bills::order_id,
    orders::table_id,
    orders::customer_name,
    bills::amount_cents,
    bills::payment_method,
    bills::status,
    bills::created_at,
);

const SUMMARY_COLUMNS: SummaryColumns = (
    bills::id,
    bills::order_id,
    orders::table_id,
    orders::customer_name,
    bills::amount_cents,
    bills::payment_method,
    bills::status,
    bills::created_at,
);

pub fn unpaid_bills(conn: &mut SqliteConnection) -> StoreResult<Vec<BillSummary>> {
    Ok(bills::table
        .inner_join(orders::table)
        .filter(bills::status.eq(BillStatus::Unpaid))
        .order(bills::id)
        .select(SUMMARY_COLUMNS)
        .load(conn)?)
}

/// Paid bills, newest first.
pub fn recent_payments(conn: &mut SqliteConnection, limit: i64) -> StoreResult<Vec<BillSummary>> {
    if limit < 1 {
        return Err(StoreError::Validation(format!("limit must be at least 1, got {limit}")));
    }

    Ok(bills::table
        .inner_join(orders::table)
        .filter(bills::status.eq(BillStatus::Paid))
        .order((bills::created_at.desc(), bills::id.desc()))
        .limit(limit)
        .select(SUMMARY_COLUMNS)
        .load(conn)?)
}

/// Settles an unpaid bill. Payment cannot be undone.
pub fn pay_bill(
    conn: &mut SqliteConnection,
    bill_id: i64,
    method: PaymentMethod,
) -> StoreResult<Bill> {
    conn.immediate_transaction(|conn| {
        let bill = get_bill(conn, bill_id)?;
        if bill.status == BillStatus::Paid {
            return Err(StoreError::InvalidState(format!("bill {bill_id} is already paid")));
        }

        let bill = diesel::update(bills::table.find(bill_id))
            .set((bills::status.eq(BillStatus::Paid), bills::payment_method.eq(Some(method))))
            .returning(Bill::as_returning())
            .get_result(conn)?;

        tracing::info!(
            bill_id,
            order_id = bill.order_id,
            amount_cents = bill.amount_cents,
            %method,
            "bill paid"
        );
        Ok(bill)
    })
}
