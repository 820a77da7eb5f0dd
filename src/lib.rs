#![deny(
    missing_debug_implementations,
    clippy::print_stderr,
    clippy::print_stdout
)]

//! # Restaurant reservations
//!
//! A record keeper for restaurants, their opening hours and tables, customers and
//! bookings, stored through [SeaORM](https://www.sea-ql.org/SeaORM).
//!
//! Two pieces carry the logic:
//!
//! 1. [`seed`]: every restaurant listing first reconciles the store against a canonical
//!    baseline of four restaurants. Each seeded restaurant receives seven opening-hours
//!    rows and six tables in the same transaction. Reconciliation is idempotent and
//!    never duplicates a restaurant name.
//!
//! 2. [`reader`]: restaurants are listed by name, and bookings are listed together with
//!    the restaurant, table and customer they refer to. Booking timestamps are normalized
//!    by [`timestamp::format_timestamp`] whatever representation they were stored in.
//!
//! ## A quick taste
//!
//! ```no_run
//! use restaurant_reservations::{Reader, schema::create_tables};
//! use sea_orm::Database;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::connect("sqlite::memory:").await?;
//! create_tables(&db).await?;
//!
//! let restaurants = Reader::list_restaurants(&db).await?;
//! assert_eq!(restaurants.len(), 4);
//!
//! for booking in Reader::list_bookings(&db).await? {
//!     let row = booking.display();
//!     tracing::info!("{} at {} on {}", row.customer_name, row.restaurant_name, row.date);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod entities;
pub mod error;
pub mod reader;
pub mod response;
pub mod schema;
pub mod seed;
pub mod timestamp;

pub use config::Config;
pub use error::{Listing, ReservationError};
pub use reader::{BookingRow, BookingWithDetails, Reader};
pub use seed::{InsertPlan, SeedReport, Seeder, plan_inserts};
pub use timestamp::{StoredTimestamp, Timestamp, format_timestamp};
