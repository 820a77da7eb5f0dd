use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Lifecycle state of a booking, stored as its kebab-case label.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "kebab-case")]
pub enum BookingStatus {
    #[sea_orm(string_value = "confirmed")]
    Confirmed,
    #[sea_orm(string_value = "completed")]
    Completed,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
    #[sea_orm(string_value = "no-show")]
    NoShow,
}

impl BookingStatus {
    /// Human readable meaning of the status, as shown next to booking listings.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Confirmed => "Active, awaiting customer arrival",
            Self::Completed => "Successfully finished dining",
            Self::Cancelled => "Cancelled by customer/restaurant",
            Self::NoShow => "Customer did not arrive",
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_value())
    }
}
