pub use super::booking::Entity as Booking;
pub use super::customer::Entity as Customer;
pub use super::dining_table::Entity as DiningTable;
pub use super::opening_hours::Entity as OpeningHours;
pub use super::restaurant::Entity as Restaurant;
