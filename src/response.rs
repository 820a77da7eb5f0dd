//! JSON envelopes returned to HTTP callers.

use crate::{entities::restaurant, error::ReservationError, reader::BookingWithDetails};
use serde::{Deserialize, Serialize};

/// `{ "restaurants": [...] }`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestaurantsResponse {
    pub restaurants: Vec<restaurant::Model>,
}

/// `{ "bookings": [...] }`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BookingsResponse {
    pub bookings: Vec<BookingWithDetails>,
}

/// `{ "error": "..." }`, sent with status 500
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl From<&ReservationError> for ErrorResponse {
    fn from(err: &ReservationError) -> Self {
        Self {
            error: err.public_message().to_owned(),
        }
    }
}
