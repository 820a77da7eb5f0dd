//! DDL for the reservation store, derived from the entity definitions.

use crate::entities::{booking, customer, dining_table, opening_hours, restaurant};
use sea_orm::{
    ConnectionTrait, DbErr, EntityTrait, Schema,
    sea_query::{Index, IndexCreateStatement},
};

/// Create every table and index if it does not exist yet. Safe to call on each start.
pub async fn create_tables<C>(db: &C) -> Result<(), DbErr>
where
    C: ConnectionTrait,
{
    create_table(db, restaurant::Entity).await?;
    create_table(db, opening_hours::Entity).await?;
    create_table(db, dining_table::Entity).await?;
    create_table(db, customer::Entity).await?;
    create_table(db, booking::Entity).await?;

    for stmt in unique_indexes() {
        db.execute(db.get_database_backend().build(&stmt)).await?;
    }

    tracing::debug!("reservation schema is in place");
    Ok(())
}

async fn create_table<C, E>(db: &C, entity: E) -> Result<(), DbErr>
where
    C: ConnectionTrait,
    E: EntityTrait,
{
    let backend = db.get_database_backend();
    let mut stmt = Schema::new(backend).create_table_from_entity(entity);
    stmt.if_not_exists();
    db.execute(backend.build(&stmt)).await?;
    Ok(())
}

/// One opening-hours row per weekday and one table per number, per restaurant.
fn unique_indexes() -> [IndexCreateStatement; 2] {
    [
        Index::create()
            .name("idx-opening_hours-restaurant_id-day_of_week")
            .table(opening_hours::Entity)
            .col(opening_hours::Column::RestaurantId)
            .col(opening_hours::Column::DayOfWeek)
            .unique()
            .if_not_exists()
            .to_owned(),
        Index::create()
            .name("idx-tables-restaurant_id-table_number")
            .table(dining_table::Entity)
            .col(dining_table::Column::RestaurantId)
            .col(dining_table::Column::TableNumber)
            .unique()
            .if_not_exists()
            .to_owned(),
    ]
}
