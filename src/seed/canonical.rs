//! The canonical baseline every store converges to.

use crate::entities::{dining_table, opening_hours, restaurant};
use sea_orm::ActiveValue::Set;

pub const GREEN_GARDEN: &str = "The Green Garden";

pub const SUNDAY: i32 = 0;
pub const DAYS_PER_WEEK: i32 = 7;
pub const OPEN_TIME: &str = "11:00";
pub const CLOSE_TIME: &str = "22:00";
/// Open and close time recorded for a closed day
pub const CLOSED_TIME: &str = "00:00";

/// `(table_number, capacity)` of the tables every seeded restaurant receives
pub const CANONICAL_TABLES: [(&str, i32); 6] = [
    ("T1", 2),
    ("T2", 2),
    ("T3", 4),
    ("T4", 4),
    ("T5", 6),
    ("T6", 8),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CanonicalRestaurant {
    pub name: &'static str,
    pub description: &'static str,
    pub address: &'static str,
    pub phone: &'static str,
    pub email: &'static str,
    pub cuisine: &'static str,
    pub price_range: &'static str,
}

pub const CANONICAL_RESTAURANTS: [CanonicalRestaurant; 4] = [
    CanonicalRestaurant {
        name: "The Italian Corner",
        description: "Authentic Italian cuisine in a cozy atmosphere",
        address: "123 Main St, San Francisco, CA 94102",
        phone: "(415) 555-0101",
        email: "info@italiancorner.com",
        cuisine: "Italian",
        price_range: "$$$",
    },
    CanonicalRestaurant {
        name: "Sakura Sushi",
        description: "Fresh sushi and sashimi crafted by expert chefs",
        address: "742 Market St, San Francisco, CA 94103",
        phone: "(415) 555-0142",
        email: "hello@sakurasushi.com",
        cuisine: "Japanese",
        price_range: "$$$",
    },
    CanonicalRestaurant {
        name: "El Camino Taqueria",
        description: "Vibrant Mexican flavors with street-food favorites",
        address: "88 Mission St, San Francisco, CA 94105",
        phone: "(415) 555-0199",
        email: "contact@elcaminotaqueria.com",
        cuisine: "Mexican",
        price_range: "$$",
    },
    CanonicalRestaurant {
        name: GREEN_GARDEN,
        description: "Seasonal vegetarian and vegan dishes with local produce",
        address: "501 Castro St, San Francisco, CA 94114",
        phone: "(415) 555-0167",
        email: "reservations@greengarden.com",
        cuisine: "Vegetarian",
        price_range: "$$$",
    },
];

impl CanonicalRestaurant {
    pub fn green_garden() -> &'static Self {
        &CANONICAL_RESTAURANTS[3]
    }

    pub fn into_active_model(self) -> restaurant::ActiveModel {
        restaurant::ActiveModel {
            name: Set(self.name.to_owned()),
            description: Set(self.description.to_owned()),
            address: Set(self.address.to_owned()),
            phone: Set(self.phone.to_owned()),
            email: Set(self.email.to_owned()),
            cuisine: Set(self.cuisine.to_owned()),
            price_range: Set(self.price_range.to_owned()),
            image_url: Set(None),
            ..Default::default()
        }
    }
}

/// The seven weekly rows for a restaurant: Sunday closed, every other day 11:00 to 22:00.
pub fn opening_hours_for(restaurant_id: i32) -> Vec<opening_hours::ActiveModel> {
    (0..DAYS_PER_WEEK)
        .map(|day| {
            let is_closed = day == SUNDAY;
            let (open_time, close_time) = if is_closed {
                (CLOSED_TIME, CLOSED_TIME)
            } else {
                (OPEN_TIME, CLOSE_TIME)
            };
            opening_hours::ActiveModel {
                restaurant_id: Set(restaurant_id),
                day_of_week: Set(day),
                open_time: Set(open_time.to_owned()),
                close_time: Set(close_time.to_owned()),
                is_closed: Set(is_closed),
                ..Default::default()
            }
        })
        .collect()
}

pub fn tables_for(restaurant_id: i32) -> Vec<dining_table::ActiveModel> {
    CANONICAL_TABLES
        .iter()
        .map(|(table_number, capacity)| dining_table::ActiveModel {
            restaurant_id: Set(restaurant_id),
            table_number: Set((*table_number).to_owned()),
            capacity: Set(*capacity),
            ..Default::default()
        })
        .collect()
}
