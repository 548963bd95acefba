use async_trait::async_trait;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use sales_insights_sdk::models::{Client, Order, OrderLine, Product};

use super::error::DomainError;

/// Quantity and unit price of one order line, attributed to the ordering client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientLine {
    pub client_id: i32,
    pub quantity: i32,
    pub unit_price: Decimal,
}

/// Read access to the sales tables.
///
/// List results come back in primary-key order unless stated otherwise.
#[async_trait]
pub trait SalesRepository: Send + Sync {
    /// Case-sensitive prefix match on the client name.
    async fn clients_with_name_prefix(&self, prefix: &str) -> Result<Vec<Client>, DomainError>;

    async fn products_priced_above(&self, price: Decimal) -> Result<Vec<Product>, DomainError>;

    /// Lines with product names, for one order or for all of them.
    async fn order_lines(&self, order_id: Option<i32>) -> Result<Vec<OrderLine>, DomainError>;

    async fn order_quantities(&self, order_id: i32) -> Result<Vec<i32>, DomainError>;

    /// Highest price first; the lowest id wins a tie.
    async fn most_expensive_product(&self) -> Result<Option<Product>, DomainError>;

    async fn orders_after(&self, date: NaiveDateTime) -> Result<Vec<Order>, DomainError>;

    async fn product_prices(&self) -> Result<Vec<Decimal>, DomainError>;

    /// Products whose description is null or empty.
    async fn products_without_description(&self) -> Result<Vec<Product>, DomainError>;

    /// `(client_id, order count)` for every client with at least one order.
    async fn order_counts_by_client(&self) -> Result<Vec<(i32, i64)>, DomainError>;

    async fn find_client(&self, client_id: i32) -> Result<Option<Client>, DomainError>;

    /// Distinct product names, sorted.
    async fn product_names_for_client(&self, client_id: i32) -> Result<Vec<String>, DomainError>;

    /// Distinct client names, sorted.
    async fn client_names_for_product(&self, product_id: i32) -> Result<Vec<String>, DomainError>;

    async fn list_clients(&self) -> Result<Vec<Client>, DomainError>;

    async fn list_orders(&self) -> Result<Vec<Order>, DomainError>;

    async fn find_order(&self, order_id: i32) -> Result<Option<Order>, DomainError>;

    async fn client_lines(&self) -> Result<Vec<ClientLine>, DomainError>;

    /// Round trip used by health checks.
    async fn ping(&self) -> Result<(), DomainError>;
}
