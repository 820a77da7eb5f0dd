//! Entity definitions for the reservation store.
//!
//! `restaurant` owns its `opening_hours` and `dining_table` rows; a `booking`
//! points at one restaurant, one table and one customer without owning them.

pub mod prelude;

pub mod booking;
pub mod customer;
pub mod dining_table;
pub mod opening_hours;
pub mod restaurant;
pub mod sea_orm_active_enums;
