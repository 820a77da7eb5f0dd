use sea_orm::DbErr;
use std::fmt;
use thiserror::Error;

/// HTTP status every failure maps to; callers are expected to retry the request.
pub const INTERNAL_SERVER_ERROR: u16 = 500;

/// The listing an operation was producing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listing {
    Restaurants,
    Bookings,
}

impl fmt::Display for Listing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Restaurants => "restaurants",
            Self::Bookings => "bookings",
        })
    }
}

/// An error from a listing operation
#[derive(Debug, Error)]
pub enum ReservationError {
    /// Reconciling the canonical restaurants failed; nothing from this attempt was kept
    #[error("Failed to seed restaurants: {0}")]
    SeedFailure(#[source] DbErr),
    /// The listing query itself failed
    #[error("Failed to read {listing}: {source}")]
    ReadFailure {
        listing: Listing,
        #[source]
        source: DbErr,
    },
}

impl ReservationError {
    pub(crate) fn read(listing: Listing) -> impl FnOnce(DbErr) -> Self {
        move |source| Self::ReadFailure { listing, source }
    }

    pub fn status_code(&self) -> u16 {
        INTERNAL_SERVER_ERROR
    }

    /// Generic message suitable for clients; the underlying cause is only logged.
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::SeedFailure(_)
            | Self::ReadFailure {
                listing: Listing::Restaurants,
                ..
            } => "Failed to fetch restaurants",
            Self::ReadFailure {
                listing: Listing::Bookings,
                ..
            } => "Failed to fetch bookings",
        }
    }

    pub fn db_err(&self) -> &DbErr {
        match self {
            Self::SeedFailure(err) | Self::ReadFailure { source: err, .. } => err,
        }
    }
}
