use super::sea_orm_active_enums::BookingStatus;
use crate::timestamp::StoredTimestamp;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A reservation. `created_at` and `updated_at` are read back as they were stored,
/// because rows may carry epoch seconds, epoch milliseconds or date strings depending
/// on who wrote them; see [`crate::timestamp`] for how they are displayed.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bookings")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub restaurant_id: i32,
    pub table_id: i32,
    pub customer_id: i32,
    /// `YYYY-MM-DD`
    pub booking_date: String,
    /// `HH:MM`
    pub booking_time: String,
    pub party_size: i32,
    pub status: BookingStatus,
    pub special_requests: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub created_at: StoredTimestamp,
    #[sea_orm(column_type = "Text")]
    pub updated_at: StoredTimestamp,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::restaurant::Entity",
        from = "Column::RestaurantId",
        to = "super::restaurant::Column::Id"
    )]
    Restaurant,
    #[sea_orm(
        belongs_to = "super::dining_table::Entity",
        from = "Column::TableId",
        to = "super::dining_table::Column::Id"
    )]
    DiningTable,
    #[sea_orm(
        belongs_to = "super::customer::Entity",
        from = "Column::CustomerId",
        to = "super::customer::Column::Id"
    )]
    Customer,
}

impl Related<super::restaurant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Restaurant.def()
    }
}

impl Related<super::dining_table::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DiningTable.def()
    }
}

impl Related<super::customer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customer.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
