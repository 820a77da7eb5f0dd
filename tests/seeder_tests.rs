pub mod common;

use common::*;
use maplit::btreeset;
use pretty_assertions::assert_eq;
use restaurant_reservations::{
    InsertPlan, Reader, ReservationError, SeedReport, Seeder,
    entities::restaurant,
    schema::create_tables,
};
use sea_orm::{ConnectionTrait, DbErr, EntityTrait, SqlErr};
use std::collections::BTreeSet;

fn names(restaurants: &[restaurant::Model]) -> BTreeSet<String> {
    restaurants.iter().map(|r| r.name.clone()).collect()
}

#[tokio::test]
async fn empty_store_receives_the_baseline() -> Result<(), DbErr> {
    let ctx = TestContext::new("empty_store_receives_the_baseline").await;

    let restaurants = Reader::list_restaurants(&ctx.db).await.unwrap();

    assert_eq!(
        names(&restaurants),
        btreeset! {
            "The Italian Corner".to_owned(),
            "Sakura Sushi".to_owned(),
            "El Camino Taqueria".to_owned(),
            "The Green Garden".to_owned(),
        }
    );
    for restaurant in &restaurants {
        assert_fully_seeded(&ctx.db, restaurant).await?;
        assert_eq!(restaurant.image_url, None);
    }
    assert_eq!(row_counts(&ctx.db).await?, (4, 28, 24));

    let sakura = find_restaurant(&ctx.db, "Sakura Sushi").await?;
    assert_eq!(sakura.cuisine, "Japanese");
    assert_eq!(sakura.price_range, "$$$");
    assert_eq!(sakura.address, "742 Market St, San Francisco, CA 94103");

    Ok(())
}

#[tokio::test]
async fn restaurants_are_listed_by_name() -> Result<(), DbErr> {
    let ctx = TestContext::new("restaurants_are_listed_by_name").await;

    let listed: Vec<String> = Reader::list_restaurants(&ctx.db)
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.name)
        .collect();

    assert_eq!(
        listed,
        [
            "El Camino Taqueria",
            "Sakura Sushi",
            "The Green Garden",
            "The Italian Corner",
        ]
    );

    Ok(())
}

#[tokio::test]
async fn listing_twice_inserts_nothing_the_second_time() -> Result<(), DbErr> {
    let ctx = TestContext::new("listing_twice_inserts_nothing_the_second_time").await;

    let first = Reader::list_restaurants(&ctx.db).await.unwrap();
    let counts = row_counts(&ctx.db).await?;

    let second = Reader::list_restaurants(&ctx.db).await.unwrap();

    assert_eq!(names(&first), names(&second));
    assert_eq!(first, second);
    assert_eq!(row_counts(&ctx.db).await?, counts);
    assert_eq!(Seeder::reconcile(&ctx.db).await?, SeedReport::default());

    Ok(())
}

#[tokio::test]
async fn reconcile_reports_what_it_inserted() -> Result<(), DbErr> {
    let ctx = TestContext::new("reconcile_reports_what_it_inserted").await;

    let report = Seeder::reconcile(&ctx.db).await?;

    assert_eq!(
        report,
        SeedReport {
            restaurants: 4,
            opening_hours: 28,
            tables: 24,
        }
    );
    assert_eq!(report.total_rows(), 56);
    assert!(Seeder::reconcile(&ctx.db).await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn partial_store_gains_green_garden() -> Result<(), DbErr> {
    let ctx = TestContext::new("partial_store_gains_green_garden").await;
    insert_restaurant(&ctx.db, "Burger Barn").await?;
    insert_restaurant(&ctx.db, "Sakura Sushi").await?;

    let restaurants = Reader::list_restaurants(&ctx.db).await.unwrap();

    assert_eq!(
        names(&restaurants),
        btreeset! {
            "Burger Barn".to_owned(),
            "Sakura Sushi".to_owned(),
            "The Green Garden".to_owned(),
        }
    );
    let green_garden = find_restaurant(&ctx.db, "The Green Garden").await?;
    assert_fully_seeded(&ctx.db, &green_garden).await?;
    assert_eq!(green_garden.cuisine, "Vegetarian");

    // Restaurants that were already there are not touched
    let burger_barn = find_restaurant(&ctx.db, "Burger Barn").await?;
    assert!(opening_hours_of(&ctx.db, &burger_barn).await?.is_empty());
    assert!(tables_of(&ctx.db, &burger_barn).await?.is_empty());
    assert_eq!(row_counts(&ctx.db).await?, (3, 7, 6));

    // And the next listing leaves the store as it is
    Reader::list_restaurants(&ctx.db).await.unwrap();
    assert_eq!(row_counts(&ctx.db).await?, (3, 7, 6));

    Ok(())
}

#[tokio::test]
async fn partial_store_with_green_garden_is_left_alone() -> Result<(), DbErr> {
    let ctx = TestContext::new("partial_store_with_green_garden_is_left_alone").await;
    insert_restaurant(&ctx.db, "Burger Barn").await?;
    insert_restaurant(&ctx.db, "The Green Garden").await?;

    let restaurants = Reader::list_restaurants(&ctx.db).await.unwrap();

    assert_eq!(restaurants.len(), 2);
    assert_eq!(row_counts(&ctx.db).await?, (2, 0, 0));

    Ok(())
}

#[tokio::test]
async fn store_at_baseline_size_is_left_alone() -> Result<(), DbErr> {
    let ctx = TestContext::new("store_at_baseline_size_is_left_alone").await;
    for name in ["Alpha", "Bravo", "Charlie", "Delta"] {
        insert_restaurant(&ctx.db, name).await?;
    }

    let restaurants = Reader::list_restaurants(&ctx.db).await.unwrap();

    assert_eq!(
        restaurants.iter().map(|r| r.name.as_str()).collect::<Vec<_>>(),
        ["Alpha", "Bravo", "Charlie", "Delta"]
    );
    assert_eq!(row_counts(&ctx.db).await?, (4, 0, 0));

    Ok(())
}

#[tokio::test]
async fn stale_plan_is_treated_as_already_seeded() -> Result<(), DbErr> {
    let ctx = TestContext::new("stale_plan_is_treated_as_already_seeded").await;
    Seeder::reconcile(&ctx.db).await?;

    // Another caller planned against the empty store before the first one committed
    let report = Seeder::execute_plan(&ctx.db, &InsertPlan::baseline()).await?;
    assert_eq!(report, SeedReport::default());

    let report = Seeder::execute_plan(&ctx.db, &InsertPlan::green_garden()).await?;
    assert!(report.is_empty());

    assert_eq!(row_counts(&ctx.db).await?, (4, 28, 24));

    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_first_listings_seed_once() -> Result<(), DbErr> {
    let ctx = std::sync::Arc::new(
        TestContext::file_backed("concurrent_first_listings_seed_once", 4).await,
    );

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let ctx = std::sync::Arc::clone(&ctx);
            tokio::spawn(async move { Reader::list_restaurants(&ctx.db).await })
        })
        .collect();

    for handle in handles {
        let restaurants = handle.await.expect("listing task panicked").unwrap();
        assert_eq!(restaurants.len(), 4);
    }
    assert_eq!(row_counts(&ctx.db).await?, (4, 28, 24));
    for restaurant in &Reader::list_restaurants(&ctx.db).await.unwrap() {
        assert_fully_seeded(&ctx.db, restaurant).await?;
    }

    Ok(())
}

#[tokio::test]
async fn failed_seeding_leaves_nothing_behind() -> Result<(), DbErr> {
    let ctx = TestContext::new("failed_seeding_leaves_nothing_behind").await;
    ctx.db.execute_unprepared("DROP TABLE opening_hours").await?;

    let err = Reader::list_restaurants(&ctx.db).await.unwrap_err();
    assert!(matches!(err, ReservationError::SeedFailure(_)));
    assert_eq!(err.status_code(), 500);
    assert_eq!(err.public_message(), "Failed to fetch restaurants");

    // The restaurants inserted before the failure were rolled back
    assert_eq!(restaurant::Entity::find().all(&ctx.db).await?, vec![]);

    // Once the store is healthy again the next listing seeds everything
    create_tables(&ctx.db).await?;
    let restaurants = Reader::list_restaurants(&ctx.db).await.unwrap();
    assert_eq!(restaurants.len(), 4);
    for restaurant in &restaurants {
        assert_fully_seeded(&ctx.db, restaurant).await?;
    }

    Ok(())
}

#[tokio::test]
async fn store_rejects_duplicate_names() -> Result<(), DbErr> {
    let ctx = TestContext::new("store_rejects_duplicate_names").await;
    insert_restaurant(&ctx.db, "The Green Garden").await?;

    let err = insert_restaurant(&ctx.db, "The Green Garden")
        .await
        .unwrap_err();
    assert!(matches!(
        err.sql_err(),
        Some(SqlErr::UniqueConstraintViolation(_))
    ));

    Ok(())
}
