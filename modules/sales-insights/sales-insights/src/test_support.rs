//! Fixtures shared by the unit tests of this crate.

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use sales_insights_sdk::models::{Client, Order, OrderDetail, OrderLine, Product};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

use crate::domain::error::DomainError;
use crate::domain::repo::{ClientLine, SalesRepository};
use crate::domain::service::Service;
use crate::infra::storage::migrations::Migrator;

pub fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap()
}

pub fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

pub fn client(id: i32, name: &str) -> Client {
    Client {
        client_id: id,
        name: name.to_owned(),
        email: format!("{}@example.com", name.to_lowercase()),
    }
}

pub fn product(id: i32, name: &str, description: Option<&str>, price: &str) -> Product {
    Product {
        product_id: id,
        name: name.to_owned(),
        description: description.map(ToOwned::to_owned),
        price: dec(price),
    }
}

pub fn order(id: i32, client_id: i32, date: NaiveDateTime) -> Order {
    Order {
        order_id: id,
        client_id,
        order_date: date,
    }
}

pub fn detail(id: i32, order_id: i32, product_id: i32, quantity: i32) -> OrderDetail {
    OrderDetail {
        order_detail_id: id,
        order_id,
        product_id,
        quantity,
    }
}

/// In-memory implementation of the repository port.
#[derive(Default, Clone)]
pub struct InMemoryRepo {
    pub clients: Vec<Client>,
    pub products: Vec<Product>,
    pub orders: Vec<Order>,
    pub details: Vec<OrderDetail>,
    pub offline: bool,
}

impl InMemoryRepo {
    /// Ana buys 3 pens in order 10.
    pub fn ana_and_pen() -> Self {
        Self {
            clients: vec![client(1, "Ana")],
            products: vec![product(100, "Pen", Some("Blue ink"), "2.5")],
            orders: vec![order(10, 1, at(2024, 1, 1))],
            details: vec![detail(1000, 10, 100, 3)],
            offline: false,
        }
    }

    pub fn into_service(self) -> Arc<Service> {
        Arc::new(Service::new(Arc::new(self)))
    }

    fn check(&self) -> Result<(), DomainError> {
        if self.offline {
            return Err(DomainError::Unavailable(anyhow::anyhow!(
                "connection pool timed out"
            )));
        }
        Ok(())
    }

    fn product_name(&self, product_id: i32) -> String {
        self.products
            .iter()
            .find(|p| p.product_id == product_id)
            .map(|p| p.name.clone())
            .unwrap_or_default()
    }

    fn order_client(&self, order_id: i32) -> Option<i32> {
        self.orders
            .iter()
            .find(|o| o.order_id == order_id)
            .map(|o| o.client_id)
    }
}

#[async_trait]
impl SalesRepository for InMemoryRepo {
    async fn clients_with_name_prefix(&self, prefix: &str) -> Result<Vec<Client>, DomainError> {
        self.check()?;
        Ok(self
            .clients
            .iter()
            .filter(|c| c.name.starts_with(prefix))
            .cloned()
            .collect())
    }

    async fn products_priced_above(&self, price: Decimal) -> Result<Vec<Product>, DomainError> {
        self.check()?;
        Ok(self
            .products
            .iter()
            .filter(|p| p.price > price)
            .cloned()
            .collect())
    }

    async fn order_lines(&self, order_id: Option<i32>) -> Result<Vec<OrderLine>, DomainError> {
        self.check()?;
        Ok(self
            .details
            .iter()
            .filter(|d| order_id.is_none_or(|id| d.order_id == id))
            .map(|d| OrderLine {
                order_id: d.order_id,
                product_name: self.product_name(d.product_id),
                quantity: d.quantity,
            })
            .collect())
    }

    async fn order_quantities(&self, order_id: i32) -> Result<Vec<i32>, DomainError> {
        self.check()?;
        Ok(self
            .details
            .iter()
            .filter(|d| d.order_id == order_id)
            .map(|d| d.quantity)
            .collect())
    }

    async fn most_expensive_product(&self) -> Result<Option<Product>, DomainError> {
        self.check()?;
        let mut products = self.products.clone();
        products.sort_by(|a, b| b.price.cmp(&a.price).then(a.product_id.cmp(&b.product_id)));
        Ok(products.into_iter().next())
    }

    async fn orders_after(&self, date: NaiveDateTime) -> Result<Vec<Order>, DomainError> {
        self.check()?;
        Ok(self
            .orders
            .iter()
            .filter(|o| o.order_date > date)
            .cloned()
            .collect())
    }

    async fn product_prices(&self) -> Result<Vec<Decimal>, DomainError> {
        self.check()?;
        Ok(self.products.iter().map(|p| p.price).collect())
    }

    async fn products_without_description(&self) -> Result<Vec<Product>, DomainError> {
        self.check()?;
        Ok(self
            .products
            .iter()
            .filter(|p| p.description.as_deref().is_none_or(str::is_empty))
            .cloned()
            .collect())
    }

    async fn order_counts_by_client(&self) -> Result<Vec<(i32, i64)>, DomainError> {
        self.check()?;
        let ids: BTreeSet<i32> = self.orders.iter().map(|o| o.client_id).collect();
        Ok(ids
            .into_iter()
            .map(|id| {
                let n = self.orders.iter().filter(|o| o.client_id == id).count();
                (id, i64::try_from(n).unwrap())
            })
            .collect())
    }

    async fn find_client(&self, client_id: i32) -> Result<Option<Client>, DomainError> {
        self.check()?;
        Ok(self
            .clients
            .iter()
            .find(|c| c.client_id == client_id)
            .cloned())
    }

    async fn product_names_for_client(&self, client_id: i32) -> Result<Vec<String>, DomainError> {
        self.check()?;
        let names: BTreeSet<String> = self
            .details
            .iter()
            .filter(|d| self.order_client(d.order_id) == Some(client_id))
            .map(|d| self.product_name(d.product_id))
            .collect();
        Ok(names.into_iter().collect())
    }

    async fn client_names_for_product(&self, product_id: i32) -> Result<Vec<String>, DomainError> {
        self.check()?;
        let names: BTreeSet<String> = self
            .details
            .iter()
            .filter(|d| d.product_id == product_id)
            .filter_map(|d| self.order_client(d.order_id))
            .filter_map(|id| self.clients.iter().find(|c| c.client_id == id))
            .map(|c| c.name.clone())
            .collect();
        Ok(names.into_iter().collect())
    }

    async fn list_clients(&self) -> Result<Vec<Client>, DomainError> {
        self.check()?;
        Ok(self.clients.clone())
    }

    async fn list_orders(&self) -> Result<Vec<Order>, DomainError> {
        self.check()?;
        Ok(self.orders.clone())
    }

    async fn find_order(&self, order_id: i32) -> Result<Option<Order>, DomainError> {
        self.check()?;
        Ok(self.orders.iter().find(|o| o.order_id == order_id).cloned())
    }

    async fn client_lines(&self) -> Result<Vec<ClientLine>, DomainError> {
        self.check()?;
        Ok(self
            .details
            .iter()
            .filter_map(|d| {
                let client_id = self.order_client(d.order_id)?;
                let unit_price = self
                    .products
                    .iter()
                    .find(|p| p.product_id == d.product_id)?
                    .price;
                Some(ClientLine {
                    client_id,
                    quantity: d.quantity,
                    unit_price,
                })
            })
            .collect())
    }

    async fn ping(&self) -> Result<(), DomainError> {
        self.check()
    }
}

/// Fresh in-memory `SQLite` database on a single pooled connection.
pub async fn memory_sqlite() -> DatabaseConnection {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1).min_connections(1).sqlx_logging(false);
    Database::connect(opts).await.unwrap()
}

/// [`memory_sqlite`] with the schema applied.
pub async fn migrated_sqlite() -> DatabaseConnection {
    let db = memory_sqlite().await;
    Migrator::up(&db, None).await.unwrap();
    db
}
