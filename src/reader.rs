//! Read views backing the restaurant and booking listings.

use crate::{
    entities::{
        booking, customer, dining_table, restaurant, sea_orm_active_enums::BookingStatus,
    },
    error::{Listing, ReservationError},
    seed::Seeder,
    timestamp::{StoredTimestamp, format_timestamp},
};
use sea_orm::{ConnectionTrait, DbErr, EntityTrait, LoaderTrait, QueryOrder, TransactionTrait};
use serde::{Deserialize, Serialize};

/// Shown in place of special requests that were never provided. An empty string typed
/// by a guest is displayed as is.
pub const NO_SPECIAL_REQUESTS: &str = "-";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestaurantSummary {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub id: Option<i32>,
    pub name: String,
    pub cuisine: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableSummary {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub id: Option<i32>,
    pub table_number: String,
    pub capacity: i32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerSummary {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub id: Option<i32>,
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl From<restaurant::Model> for RestaurantSummary {
    fn from(model: restaurant::Model) -> Self {
        Self {
            id: Some(model.id),
            name: model.name,
            cuisine: model.cuisine,
        }
    }
}

impl From<dining_table::Model> for TableSummary {
    fn from(model: dining_table::Model) -> Self {
        Self {
            id: Some(model.id),
            table_number: model.table_number,
            capacity: model.capacity,
        }
    }
}

impl From<customer::Model> for CustomerSummary {
    fn from(model: customer::Model) -> Self {
        Self {
            id: Some(model.id),
            name: model.name,
            email: model.email,
            phone: model.phone,
        }
    }
}

/// A booking with the restaurant, table and customer it refers to.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingWithDetails {
    pub id: i32,
    pub restaurant_id: i32,
    pub table_id: i32,
    pub customer_id: i32,
    pub booking_date: String,
    pub booking_time: String,
    pub party_size: i32,
    pub status: BookingStatus,
    pub special_requests: Option<String>,
    pub created_at: StoredTimestamp,
    pub updated_at: StoredTimestamp,
    pub restaurant: RestaurantSummary,
    pub table: TableSummary,
    pub customer: CustomerSummary,
}

/// A booking flattened into display strings, one field per listing column.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRow {
    pub id: String,
    pub restaurant_id: String,
    pub table_id: String,
    pub customer_id: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub restaurant_name: String,
    pub restaurant_cuisine: String,
    pub table: String,
    pub table_capacity: String,
    pub date: String,
    pub time: String,
    pub guests: String,
    pub status: String,
    pub status_description: String,
    pub special_requests: String,
    pub created_at: String,
    pub updated_at: String,
}

impl BookingRow {
    pub const HEADERS: [&'static str; 14] = [
        "ID",
        "Restaurant ID",
        "Table ID",
        "Customer ID",
        "Customer",
        "Restaurant",
        "Table",
        "Date",
        "Time",
        "Guests",
        "Status",
        "Special Requests",
        "Created At",
        "Updated At",
    ];

    /// Cells in [`Self::HEADERS`] order.
    pub fn cells(&self) -> [String; 14] {
        [
            self.id.clone(),
            self.restaurant_id.clone(),
            self.table_id.clone(),
            self.customer_id.clone(),
            format!(
                "{} <{}> {}",
                self.customer_name, self.customer_email, self.customer_phone
            ),
            format!("{} ({})", self.restaurant_name, self.restaurant_cuisine),
            format!("{} (capacity: {})", self.table, self.table_capacity),
            self.date.clone(),
            self.time.clone(),
            self.guests.clone(),
            self.status.clone(),
            self.special_requests.clone(),
            self.created_at.clone(),
            self.updated_at.clone(),
        ]
    }
}

impl BookingWithDetails {
    fn assemble(
        booking: booking::Model,
        restaurant: restaurant::Model,
        table: dining_table::Model,
        customer: customer::Model,
    ) -> Self {
        Self {
            id: booking.id,
            restaurant_id: booking.restaurant_id,
            table_id: booking.table_id,
            customer_id: booking.customer_id,
            booking_date: booking.booking_date,
            booking_time: booking.booking_time,
            party_size: booking.party_size,
            status: booking.status,
            special_requests: booking.special_requests,
            created_at: booking.created_at,
            updated_at: booking.updated_at,
            restaurant: restaurant.into(),
            table: table.into(),
            customer: customer.into(),
        }
    }

    pub fn special_requests_display(&self) -> &str {
        self.special_requests
            .as_deref()
            .unwrap_or(NO_SPECIAL_REQUESTS)
    }

    pub fn display(&self) -> BookingRow {
        BookingRow {
            id: format!("#{}", self.id),
            restaurant_id: self.restaurant_id.to_string(),
            table_id: self.table_id.to_string(),
            customer_id: self.customer_id.to_string(),
            customer_name: self.customer.name.clone(),
            customer_email: self.customer.email.clone(),
            customer_phone: self.customer.phone.clone(),
            restaurant_name: self.restaurant.name.clone(),
            restaurant_cuisine: self.restaurant.cuisine.clone(),
            table: format!("#{}", self.table.table_number),
            table_capacity: self.table.capacity.to_string(),
            date: self.booking_date.clone(),
            time: self.booking_time.clone(),
            guests: self.party_size.to_string(),
            status: self.status.to_string(),
            status_description: self.status.description().to_owned(),
            special_requests: self.special_requests_display().to_owned(),
            created_at: format_timestamp(&self.created_at),
            updated_at: format_timestamp(&self.updated_at),
        }
    }
}

#[derive(Debug)]
pub struct Reader;

impl Reader {
    /// Reconcile the canonical restaurants, then list every restaurant by name.
    pub async fn list_restaurants<C>(db: &C) -> Result<Vec<restaurant::Model>, ReservationError>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        Seeder::reconcile(db)
            .await
            .map_err(ReservationError::SeedFailure)?;

        restaurant::Entity::find()
            .order_by_asc(restaurant::Column::Name)
            .order_by_asc(restaurant::Column::Id)
            .all(db)
            .await
            .map_err(ReservationError::read(Listing::Restaurants))
    }

    /// List every booking in insertion order with its restaurant, table and customer.
    pub async fn list_bookings<C>(db: &C) -> Result<Vec<BookingWithDetails>, ReservationError>
    where
        C: ConnectionTrait,
    {
        Self::load_bookings(db)
            .await
            .map_err(ReservationError::read(Listing::Bookings))
    }

    async fn load_bookings<C>(db: &C) -> Result<Vec<BookingWithDetails>, DbErr>
    where
        C: ConnectionTrait,
    {
        let bookings = booking::Entity::find()
            .order_by_asc(booking::Column::Id)
            .all(db)
            .await?;

        let restaurants = bookings.load_one(restaurant::Entity, db).await?;
        let tables = bookings.load_one(dining_table::Entity, db).await?;
        let customers = bookings.load_one(customer::Entity, db).await?;

        bookings
            .into_iter()
            .zip(restaurants)
            .zip(tables)
            .zip(customers)
            .map(|(((booking, restaurant), table), customer)| -> Result<_, DbErr> {
                let missing = |what: &str| {
                    DbErr::RecordNotFound(format!("{what} referenced by booking {}", booking.id))
                };
                let restaurant = restaurant.ok_or_else(|| missing("restaurant"))?;
                let table = table.ok_or_else(|| missing("table"))?;
                let customer = customer.ok_or_else(|| missing("customer"))?;
                Ok(BookingWithDetails::assemble(
                    booking, restaurant, table, customer,
                ))
            })
            .collect()
    }
}
