use chrono::NaiveDate;
use diesel::prelude::*;
use diesel::SqliteConnection;
use validator::Validate;

use crate::schema::reservations;
use crate::services::db_models::Reservation;
use crate::services::insertable::NewReservation;
use crate::services::store::tables;
use crate::types::{ReservationStatus, StoreError, StoreResult, TableStatus};

pub fn get_reservation(
    conn: &mut SqliteConnection,
    reservation_id: i64,
) -> StoreResult<Reservation> {
    reservations::table
        .find(reservation_id)
        .select(Reservation::as_select())
        .first(conn)
        .optional()?
        .ok_or_else(|| StoreError::not_found("reservation", reservation_id))
}

/// Books a table slot. The slot check and the insert share one transaction,
/// so at most one live reservation exists per (table, date, time).
pub fn create_reservation(
    conn: &mut SqliteConnection,
    new_reservation: NewReservation,
) -> StoreResult<Reservation> {
    new_reservation.validate()?;

    conn.immediate_transaction(|conn| {
        let table = tables::get_table(conn, new_reservation.table_id)?;
        if new_reservation.party_size > table.capacity {
            return Err(StoreError::Validation(format!(
                "party of {} does not fit table {} (capacity {})",
                new_reservation.party_size, table.id, table.capacity
            )));
        }

        let taken: i64 = reservations::table
            .filter(reservations::table_id.eq(new_reservation.table_id))
            .filter(reservations::reservation_date.eq(new_reservation.reservation_date))
            .filter(reservations::reservation_time.eq(new_reservation.reservation_time))
            .filter(reservations::status.ne(ReservationStatus::Cancelled))
            .count()
            .get_result(conn)?;
        if taken > 0 {
            return Err(StoreError::Conflict(format!(
                "table {} is already reserved on {} at {}",
                new_reservation.table_id,
                new_reservation.reservation_date,
                new_reservation.reservation_time
            )));
        }

        let reservation = diesel::insert_into(reservations::table)
            .values(&new_reservation)
            .returning(Reservation::as_returning())
            .get_result(conn)?;

        tracing::info!(
            reservation_id = reservation.id,
            table_id = reservation.table_id,
            date = %reservation.reservation_date,
            time = %reservation.reservation_time,
            "reservation confirmed"
        );
        Ok(reservation)
    })
}

/// Reservations for one day, earliest first.
pub fn reservations_on(
    conn: &mut SqliteConnection,
    date: NaiveDate,
) -> StoreResult<Vec<Reservation>> {
    Ok(reservations::table
        .filter(reservations::reservation_date.eq(date))
        .order((reservations::reservation_time, reservations::id))
        .select(Reservation::as_select())
        .load(conn)?)
}

/// Seats a confirmed reservation and occupies its table.
pub fn seat_reservation(
    conn: &mut SqliteConnection,
    reservation_id: i64,
) -> StoreResult<Reservation> {
    conn.immediate_transaction(|conn| {
        let reservation = transition(conn, reservation_id, ReservationStatus::Seated)?;
        tables::force_table_status(conn, reservation.table_id, TableStatus::Occupied)?;

        tracing::info!(reservation_id, table_id = reservation.table_id, "reservation seated");
        Ok(reservation)
    })
}

pub fn cancel_reservation(
    conn: &mut SqliteConnection,
    reservation_id: i64,
) -> StoreResult<Reservation> {
    conn.immediate_transaction(|conn| {
        let reservation = transition(conn, reservation_id, ReservationStatus::Cancelled)?;

        tracing::info!(reservation_id, table_id = reservation.table_id, "reservation cancelled");
        Ok(reservation)
    })
}

/// Seated and Cancelled are terminal; only Confirmed reservations move.
fn transition(
    conn: &mut SqliteConnection,
    reservation_id: i64,
    to: ReservationStatus,
) -> StoreResult<Reservation> {
    let current = get_reservation(conn, reservation_id)?;
    if current.status != ReservationStatus::Confirmed {
        return Err(StoreError::InvalidState(format!(
            "reservation {reservation_id} is already {}",
            current.status
        )));
    }

    Ok(diesel::update(reservations::table.find(reservation_id))
        .set(reservations::status.eq(to))
        .returning(Reservation::as_returning())
        .get_result(conn)?)
}
