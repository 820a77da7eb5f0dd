#![allow(unused)]

use restaurant_reservations::{
    Config,
    entities::{
        booking, customer, dining_table, opening_hours, restaurant,
        sea_orm_active_enums::BookingStatus,
    },
    schema::create_tables,
    timestamp::StoredTimestamp,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use std::path::{Path, PathBuf};

pub struct TestContext {
    pub db: DatabaseConnection,
    path: Option<PathBuf>,
}

impl TestContext {
    pub async fn new(test_name: &str) -> Self {
        let config = Config {
            database_url: "sqlite::memory:".to_owned(),
            ..Default::default()
        };
        Self::connect(test_name, config, None).await
    }

    /// A store in a fresh database file, so several pooled connections see the same data.
    pub async fn file_backed(test_name: &str, max_connections: u32) -> Self {
        let path = std::env::temp_dir().join(format!(
            "restaurant-reservations-{test_name}-{}.db",
            std::process::id()
        ));
        remove_database_files(&path);
        let config = Config {
            database_url: format!("sqlite://{}?mode=rwc", path.display()),
            max_connections,
            ..Default::default()
        };
        Self::connect(test_name, config, Some(path)).await
    }

    async fn connect(test_name: &str, config: Config, path: Option<PathBuf>) -> Self {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init();

        let db = config
            .connect()
            .await
            .unwrap_or_else(|err| panic!("{test_name}: could not connect: {err}"));
        create_tables(&db)
            .await
            .unwrap_or_else(|err| panic!("{test_name}: could not create tables: {err}"));

        Self { db, path }
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        if let Some(path) = &self.path {
            remove_database_files(path);
        }
    }
}

fn remove_database_files(path: &Path) {
    for suffix in ["", "-wal", "-shm"] {
        let mut file = path.as_os_str().to_owned();
        file.push(suffix);
        let _ = std::fs::remove_file(file);
    }
}

/// A restaurant that is not part of the canonical baseline
pub async fn insert_restaurant(
    db: &DatabaseConnection,
    name: &str,
) -> Result<restaurant::Model, DbErr> {
    restaurant::ActiveModel {
        name: Set(name.to_owned()),
        description: Set(format!("{name} description")),
        address: Set("1 Test St, San Francisco, CA 94110".to_owned()),
        phone: Set("(415) 555-0000".to_owned()),
        email: Set("owner@example.com".to_owned()),
        cuisine: Set("Fusion".to_owned()),
        price_range: Set("$$".to_owned()),
        image_url: Set(Some("https://example.com/front.jpg".to_owned())),
        ..Default::default()
    }
    .insert(db)
    .await
}

pub async fn insert_customer(
    db: &DatabaseConnection,
    name: &str,
    email: &str,
) -> Result<customer::Model, DbErr> {
    customer::ActiveModel {
        name: Set(name.to_owned()),
        email: Set(email.to_owned()),
        phone: Set("(415) 555-1234".to_owned()),
        ..Default::default()
    }
    .insert(db)
    .await
}

pub struct NewBooking<'a> {
    pub table: &'a dining_table::Model,
    pub customer: &'a customer::Model,
    pub date: &'a str,
    pub time: &'a str,
    pub party_size: i32,
    pub status: BookingStatus,
    pub special_requests: Option<&'a str>,
    pub created_at: StoredTimestamp,
    pub updated_at: StoredTimestamp,
}

pub async fn insert_booking(
    db: &DatabaseConnection,
    new: NewBooking<'_>,
) -> Result<booking::Model, DbErr> {
    booking::ActiveModel {
        restaurant_id: Set(new.table.restaurant_id),
        table_id: Set(new.table.id),
        customer_id: Set(new.customer.id),
        booking_date: Set(new.date.to_owned()),
        booking_time: Set(new.time.to_owned()),
        party_size: Set(new.party_size),
        status: Set(new.status),
        special_requests: Set(new.special_requests.map(str::to_owned)),
        created_at: Set(new.created_at),
        updated_at: Set(new.updated_at),
        ..Default::default()
    }
    .insert(db)
    .await
}

pub async fn find_restaurant(
    db: &DatabaseConnection,
    name: &str,
) -> Result<restaurant::Model, DbErr> {
    restaurant::Entity::find()
        .filter(restaurant::Column::Name.eq(name))
        .one(db)
        .await?
        .ok_or_else(|| DbErr::RecordNotFound(name.to_owned()))
}

pub async fn find_table(
    db: &DatabaseConnection,
    restaurant: &restaurant::Model,
    table_number: &str,
) -> Result<dining_table::Model, DbErr> {
    dining_table::Entity::find()
        .filter(dining_table::Column::RestaurantId.eq(restaurant.id))
        .filter(dining_table::Column::TableNumber.eq(table_number))
        .one(db)
        .await?
        .ok_or_else(|| DbErr::RecordNotFound(table_number.to_owned()))
}

pub async fn opening_hours_of(
    db: &DatabaseConnection,
    restaurant: &restaurant::Model,
) -> Result<Vec<opening_hours::Model>, DbErr> {
    opening_hours::Entity::find()
        .filter(opening_hours::Column::RestaurantId.eq(restaurant.id))
        .order_by_asc(opening_hours::Column::DayOfWeek)
        .all(db)
        .await
}

pub async fn tables_of(
    db: &DatabaseConnection,
    restaurant: &restaurant::Model,
) -> Result<Vec<dining_table::Model>, DbErr> {
    dining_table::Entity::find()
        .filter(dining_table::Column::RestaurantId.eq(restaurant.id))
        .order_by_asc(dining_table::Column::TableNumber)
        .all(db)
        .await
}

/// `(restaurants, opening_hours, tables)` row counts
pub async fn row_counts(db: &DatabaseConnection) -> Result<(u64, u64, u64), DbErr> {
    Ok((
        restaurant::Entity::find().count(db).await?,
        opening_hours::Entity::find().count(db).await?,
        dining_table::Entity::find().count(db).await?,
    ))
}

/// Asserts the canonical opening hours and tables of a seeded restaurant.
pub async fn assert_fully_seeded(
    db: &DatabaseConnection,
    restaurant: &restaurant::Model,
) -> Result<(), DbErr> {
    let hours = opening_hours_of(db, restaurant).await?;
    let days: Vec<i32> = hours.iter().map(|h| h.day_of_week).collect();
    assert_eq!(days, [0, 1, 2, 3, 4, 5, 6], "{}", restaurant.name);
    for hour in &hours {
        if hour.day_of_week == 0 {
            assert!(hour.is_closed);
            assert_eq!((hour.open_time.as_str(), hour.close_time.as_str()), ("00:00", "00:00"));
        } else {
            assert!(!hour.is_closed);
            assert_eq!((hour.open_time.as_str(), hour.close_time.as_str()), ("11:00", "22:00"));
        }
    }

    let tables: Vec<(String, i32)> = tables_of(db, restaurant)
        .await?
        .into_iter()
        .map(|t| (t.table_number, t.capacity))
        .collect();
    assert_eq!(
        tables,
        [
            ("T1".to_owned(), 2),
            ("T2".to_owned(), 2),
            ("T3".to_owned(), 4),
            ("T4".to_owned(), 4),
            ("T5".to_owned(), 6),
            ("T6".to_owned(), 8),
        ],
        "{}",
        restaurant.name
    );
    Ok(())
}
