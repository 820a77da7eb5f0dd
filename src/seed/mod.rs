//! Idempotent seeding of the canonical restaurants.
//!
//! Reconciliation is split in two: [`plan_inserts`] decides, from the restaurant names
//! currently stored, which canonical restaurants are missing, and [`Seeder::execute_plan`]
//! writes them together with their opening hours and tables in a single transaction.
//!
//! "Already seeded" means "a restaurant with that name exists". The store enforces
//! unique names, so when two callers race on an empty store the loser's insert fails
//! with a unique constraint violation; that transaction is rolled back and the call
//! reports that nothing had to be inserted.

mod canonical;
mod plan;

pub use canonical::*;
pub use plan::*;

use crate::entities::{dining_table, opening_hours, restaurant};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseTransaction, DbErr, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, SqlErr, TransactionTrait,
};
use std::collections::BTreeSet;

/// Rows written by one reconciliation
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub restaurants: usize,
    pub opening_hours: usize,
    pub tables: usize,
}

impl SeedReport {
    pub fn is_empty(&self) -> bool {
        self.total_rows() == 0
    }

    pub fn total_rows(&self) -> usize {
        self.restaurants + self.opening_hours + self.tables
    }
}

#[derive(Debug)]
pub struct Seeder;

impl Seeder {
    /// Bring the store up to the canonical baseline.
    pub async fn reconcile<C>(db: &C) -> Result<SeedReport, DbErr>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        let existing = Self::existing_names(db).await?;
        let plan = plan_inserts(&existing);
        tracing::debug!(
            existing = existing.len(),
            planned = ?plan.names(),
            "reconciling canonical restaurants"
        );
        Self::execute_plan(db, &plan).await
    }

    pub async fn existing_names<C>(db: &C) -> Result<BTreeSet<String>, DbErr>
    where
        C: ConnectionTrait,
    {
        let names: Vec<String> = restaurant::Entity::find()
            .select_only()
            .column(restaurant::Column::Name)
            .into_tuple()
            .all(db)
            .await?;
        Ok(names.into_iter().collect())
    }

    /// Insert the planned restaurants, read back their ids, then insert their
    /// opening hours and tables. All or nothing.
    pub async fn execute_plan<C>(db: &C, plan: &InsertPlan) -> Result<SeedReport, DbErr>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        if plan.is_empty() {
            return Ok(SeedReport::default());
        }

        let txn = db.begin().await?;

        let inserted = match insert_restaurants(&txn, plan).await {
            Ok(inserted) => inserted,
            Err(err) if is_unique_violation(&err) => {
                txn.rollback().await?;
                tracing::warn!(
                    names = ?plan.names(),
                    "canonical restaurants were inserted concurrently, nothing to seed"
                );
                return Ok(SeedReport::default());
            }
            Err(err) => {
                txn.rollback().await?;
                tracing::error!(error = %err, "failed to insert canonical restaurants");
                return Err(err);
            }
        };

        let report = match insert_children(&txn, &inserted).await {
            Ok(report) => report,
            Err(err) => {
                txn.rollback().await?;
                tracing::error!(
                    error = %err,
                    "failed to insert opening hours or tables, seeding rolled back"
                );
                return Err(err);
            }
        };

        txn.commit().await?;

        tracing::info!(
            restaurants = report.restaurants,
            opening_hours = report.opening_hours,
            tables = report.tables,
            "seeded canonical restaurants"
        );
        Ok(report)
    }
}

async fn insert_restaurants(
    txn: &DatabaseTransaction,
    plan: &InsertPlan,
) -> Result<Vec<restaurant::Model>, DbErr> {
    restaurant::Entity::insert_many(
        plan.restaurants()
            .iter()
            .map(|canonical| canonical.into_active_model()),
    )
    .exec(txn)
    .await?;

    // Generated ids are only known once the rows are read back by name
    restaurant::Entity::find()
        .filter(restaurant::Column::Name.is_in(plan.names()))
        .order_by_asc(restaurant::Column::Id)
        .all(txn)
        .await
}

async fn insert_children(
    txn: &DatabaseTransaction,
    restaurants: &[restaurant::Model],
) -> Result<SeedReport, DbErr> {
    let hours: Vec<_> = restaurants
        .iter()
        .flat_map(|r| opening_hours_for(r.id))
        .collect();
    let tables: Vec<_> = restaurants.iter().flat_map(|r| tables_for(r.id)).collect();

    let report = SeedReport {
        restaurants: restaurants.len(),
        opening_hours: hours.len(),
        tables: tables.len(),
    };

    if !hours.is_empty() {
        opening_hours::Entity::insert_many(hours).exec(txn).await?;
    }
    if !tables.is_empty() {
        dining_table::Entity::insert_many(tables).exec(txn).await?;
    }

    Ok(report)
}

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}
