//! Demo catalog for local runs and tests.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveValue, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, TransactionTrait,
};

use super::entity::{client, order, order_detail, product};
use super::repository::EntityRepository;

const CLIENTS: &[(&str, &str)] = &[
    ("Ana", "ana@example.com"),
    ("Andres", "andres@example.com"),
    ("Beatriz", "beatriz@example.com"),
    ("Carlos", "carlos@example.com"),
    ("Diana", "diana@example.com"),
];

/// name, description, price in cents
const PRODUCTS: &[(&str, Option<&str>, i64)] = &[
    ("Pen", Some("Blue ink ballpoint"), 250),
    ("Notebook", None, 1000),
    ("Stapler", Some(""), 750),
    ("Backpack", Some("Water resistant"), 4500),
    ("Eraser", None, 75),
];

/// client index, date, hour
const ORDERS: &[(usize, (i32, u32, u32), u32)] = &[
    (0, (2024, 1, 1), 0),
    (0, (2024, 2, 15), 9),
    (1, (2024, 2, 20), 11),
    (1, (2024, 3, 5), 16),
    (2, (2024, 3, 10), 14),
];

/// order index, product index, quantity
const DETAILS: &[(usize, usize, i32)] = &[
    (0, 0, 3),
    (0, 1, 1),
    (1, 0, 2),
    (1, 4, 4),
    (2, 2, 1),
    (2, 3, 1),
    (3, 1, 2),
    (4, 3, 1),
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub clients: usize,
    pub products: usize,
    pub orders: usize,
    pub details: usize,
}

/// Insert the demo catalog in one transaction.
///
/// Does nothing when the clients table already has rows.
///
/// # Errors
/// Any failed insert rolls the whole catalog back and is returned.
pub async fn seed_demo_data(db: &DatabaseConnection) -> Result<Option<SeedSummary>, DbErr> {
    if client::Entity::find().count(db).await? > 0 {
        tracing::info!("sales tables already populated, skipping demo data");
        return Ok(None);
    }

    let clients = EntityRepository::<client::Entity>::new();
    let products = EntityRepository::<product::Entity>::new();
    let orders = EntityRepository::<order::Entity>::new();
    let details = EntityRepository::<order_detail::Entity>::new();

    let txn = db.begin().await?;

    let mut client_ids = Vec::with_capacity(CLIENTS.len());
    for (name, email) in CLIENTS {
        let row = clients
            .add(
                &txn,
                client::ActiveModel {
                    name: ActiveValue::Set((*name).to_owned()),
                    email: ActiveValue::Set((*email).to_owned()),
                    ..Default::default()
                },
            )
            .await?;
        client_ids.push(row.client_id);
    }

    let mut product_ids = Vec::with_capacity(PRODUCTS.len());
    for (name, description, cents) in PRODUCTS {
        let row = products
            .add(
                &txn,
                product::ActiveModel {
                    name: ActiveValue::Set((*name).to_owned()),
                    description: ActiveValue::Set(description.map(ToOwned::to_owned)),
                    price: ActiveValue::Set(Decimal::new(*cents, 2)),
                    ..Default::default()
                },
            )
            .await?;
        product_ids.push(row.product_id);
    }

    let mut order_ids = Vec::with_capacity(ORDERS.len());
    for (client_idx, (y, m, d), hour) in ORDERS {
        let row = orders
            .add(
                &txn,
                order::ActiveModel {
                    client_id: ActiveValue::Set(client_ids[*client_idx]),
                    order_date: ActiveValue::Set(timestamp(*y, *m, *d, *hour)?),
                    ..Default::default()
                },
            )
            .await?;
        order_ids.push(row.order_id);
    }

    for (order_idx, product_idx, quantity) in DETAILS {
        details
            .add(
                &txn,
                order_detail::ActiveModel {
                    order_id: ActiveValue::Set(order_ids[*order_idx]),
                    product_id: ActiveValue::Set(product_ids[*product_idx]),
                    quantity: ActiveValue::Set(*quantity),
                    ..Default::default()
                },
            )
            .await?;
    }

    txn.commit().await?;

    let summary = SeedSummary {
        clients: client_ids.len(),
        products: product_ids.len(),
        orders: order_ids.len(),
        details: DETAILS.len(),
    };
    tracing::info!(?summary, "demo data inserted");
    Ok(Some(summary))
}

fn timestamp(y: i32, m: u32, d: u32, hour: u32) -> Result<NaiveDateTime, DbErr> {
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|date| date.and_hms_opt(hour, 0, 0))
        .ok_or_else(|| DbErr::Custom(format!("invalid seed date {y}-{m}-{d} {hour}:00")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::migrated_sqlite;

    #[tokio::test]
    async fn seeding_twice_inserts_once() {
        let db = migrated_sqlite().await;

        let first = seed_demo_data(&db).await.unwrap().unwrap();
        assert_eq!(first.clients, CLIENTS.len());
        assert_eq!(first.details, DETAILS.len());

        assert!(seed_demo_data(&db).await.unwrap().is_none());
        assert_eq!(
            order_detail::Entity::find().count(&db).await.unwrap(),
            DETAILS.len() as u64
        );
    }
}
