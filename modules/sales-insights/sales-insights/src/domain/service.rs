use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use sales_insights_sdk::models::{
    Client, ClientOrderCount, ClientOrders, ClientSales, ClientTotalProducts, Order, OrderLine,
    OrderSummary, OrderWithDetails, Product, ProductQuantity, TopClients,
};

use super::error::DomainError;
use super::repo::SalesRepository;

/// Canned read-only queries over clients, products and orders.
///
/// Queries that can only answer with a single value report an empty result as
/// [`DomainError::NotFound`].
pub struct Service {
    repo: Arc<dyn SalesRepository>,
}

impl Service {
    pub fn new(repo: Arc<dyn SalesRepository>) -> Self {
        Self { repo }
    }

    pub async fn clients_by_name_prefix(&self, prefix: &str) -> Result<Vec<Client>, DomainError> {
        let clients = self.repo.clients_with_name_prefix(prefix).await?;
        tracing::debug!(prefix, matched = clients.len(), "clients by name prefix");
        Ok(clients)
    }

    pub async fn products_above_price(&self, price: Decimal) -> Result<Vec<Product>, DomainError> {
        self.repo.products_priced_above(price).await
    }

    pub async fn order_details(&self, order_id: i32) -> Result<Vec<ProductQuantity>, DomainError> {
        let lines = self.repo.order_lines(Some(order_id)).await?;
        Ok(lines
            .into_iter()
            .map(|l| ProductQuantity {
                product_name: l.product_name,
                quantity: l.quantity,
            })
            .collect())
    }

    pub async fn order_total_quantity(&self, order_id: i32) -> Result<i64, DomainError> {
        let quantities = self.repo.order_quantities(order_id).await?;
        Ok(quantities.into_iter().map(i64::from).sum())
    }

    pub async fn most_expensive_product(&self) -> Result<Product, DomainError> {
        self.repo
            .most_expensive_product()
            .await?
            .ok_or_else(|| DomainError::not_found("Product"))
    }

    pub async fn orders_after_date(&self, date: NaiveDateTime) -> Result<Vec<Order>, DomainError> {
        self.repo.orders_after(date).await
    }

    pub async fn average_product_price(&self) -> Result<Decimal, DomainError> {
        let prices = self.repo.product_prices().await?;
        if prices.is_empty() {
            return Err(DomainError::not_found("Product"));
        }
        let count = Decimal::from(prices.len());
        let total: Decimal = prices.into_iter().sum();
        Ok((total / count).normalize())
    }

    pub async fn products_missing_description(&self) -> Result<Vec<Product>, DomainError> {
        self.repo.products_without_description().await
    }

    /// Every client sharing the highest order count, in client id order.
    pub async fn client_with_most_orders(&self) -> Result<TopClients, DomainError> {
        let counts = self.repo.order_counts_by_client().await?;
        let Some(max_orders) = counts.iter().map(|&(_, n)| n).max() else {
            return Ok(TopClients::default());
        };

        let mut top_clients = Vec::new();
        for (client_id, orders_count) in counts {
            if orders_count != max_orders {
                continue;
            }
            let client = self.repo.find_client(client_id).await?;
            if client.is_none() {
                tracing::warn!(client_id, "grouped orders reference a missing client");
            }
            top_clients.push(ClientOrderCount {
                client,
                orders_count,
            });
        }

        Ok(TopClients {
            max_orders,
            top_clients,
        })
    }

    pub async fn all_order_details(&self) -> Result<Vec<OrderLine>, DomainError> {
        self.repo.order_lines(None).await
    }

    pub async fn products_bought_by_client(
        &self,
        client_id: i32,
    ) -> Result<Vec<String>, DomainError> {
        self.repo.product_names_for_client(client_id).await
    }

    pub async fn clients_who_bought_product(
        &self,
        product_id: i32,
    ) -> Result<Vec<String>, DomainError> {
        self.repo.client_names_for_product(product_id).await
    }

    pub async fn clients_with_orders(&self) -> Result<Vec<ClientOrders>, DomainError> {
        let clients = self.repo.list_clients().await?;
        let orders = self.repo.list_orders().await?;

        let mut by_client: BTreeMap<i32, Vec<OrderSummary>> = BTreeMap::new();
        for order in orders {
            by_client
                .entry(order.client_id)
                .or_default()
                .push(OrderSummary {
                    order_id: order.order_id,
                    order_date: order.order_date,
                });
        }

        Ok(clients
            .into_iter()
            .map(|c| ClientOrders {
                orders: by_client.remove(&c.client_id).unwrap_or_default(),
                client_id: c.client_id,
                client_name: c.name,
            })
            .collect())
    }

    pub async fn order_with_details(&self, order_id: i32) -> Result<OrderWithDetails, DomainError> {
        let Some(order) = self.repo.find_order(order_id).await? else {
            return Err(DomainError::not_found(format!("Order {order_id}")));
        };
        let details = self.repo.order_lines(Some(order_id)).await?;

        Ok(OrderWithDetails {
            order_id: order.order_id,
            order_date: order.order_date,
            details,
        })
    }

    /// Total quantity ordered per client; clients without orders get 0.
    pub async fn clients_total_products(&self) -> Result<Vec<ClientTotalProducts>, DomainError> {
        let clients = self.repo.list_clients().await?;
        let lines = self.repo.client_lines().await?;

        let mut totals: BTreeMap<i32, i64> = BTreeMap::new();
        for line in lines {
            *totals.entry(line.client_id).or_default() += i64::from(line.quantity);
        }

        Ok(clients
            .into_iter()
            .map(|c| ClientTotalProducts {
                total_products: totals.get(&c.client_id).copied().unwrap_or_default(),
                client_id: c.client_id,
                client_name: c.name,
            })
            .collect())
    }

    /// Sales per client (quantity times unit price), highest first.
    ///
    /// Equal totals keep client id order; clients without orders get 0.
    pub async fn client_sales(&self) -> Result<Vec<ClientSales>, DomainError> {
        let clients = self.repo.list_clients().await?;
        let lines = self.repo.client_lines().await?;

        let mut totals: BTreeMap<i32, Decimal> = BTreeMap::new();
        for line in lines {
            *totals.entry(line.client_id).or_default() +=
                Decimal::from(line.quantity) * line.unit_price;
        }

        let mut sales: Vec<ClientSales> = clients
            .into_iter()
            .map(|c| ClientSales {
                total_sales: totals
                    .get(&c.client_id)
                    .copied()
                    .unwrap_or_default()
                    .normalize(),
                client_id: c.client_id,
                client_name: c.name,
            })
            .collect();

        sales.sort_by(|a, b| {
            b.total_sales
                .cmp(&a.total_sales)
                .then(a.client_id.cmp(&b.client_id))
        });
        Ok(sales)
    }

    /// Check that the database answers.
    pub async fn ping(&self) -> Result<(), DomainError> {
        self.repo.ping().await
    }
}
