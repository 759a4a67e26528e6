//! One function per business action against the store. Every write commits
//! before the function returns; read-check-write actions run inside an
//! immediate transaction so a single writer holds the database for the
//! whole action.

use chrono::NaiveDateTime;

pub mod billing;
pub mod dashboard;
pub mod inventory;
pub mod menu;
pub mod orders;
pub mod reservations;
pub mod tables;

pub(crate) fn local_now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}
