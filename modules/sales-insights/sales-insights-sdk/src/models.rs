//! Public models for the sales-insights module.
//!
//! Entities mirror the four tables; relationships are carried as foreign-key
//! fields only. Projections are the shapes the canned queries return.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Client {
    pub client_id: i32,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub product_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub order_id: i32,
    pub client_id: i32,
    pub order_date: NaiveDateTime,
}

/// Line item joining an order to a product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDetail {
    pub order_detail_id: i32,
    pub order_id: i32,
    pub product_id: i32,
    pub quantity: i32,
}

/// Product name and quantity of one line of a known order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductQuantity {
    pub product_name: String,
    pub quantity: i32,
}

/// A line item with its order id and product name resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLine {
    pub order_id: i32,
    pub product_name: String,
    pub quantity: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSummary {
    pub order_id: i32,
    pub order_date: NaiveDateTime,
}

/// A client with every order it placed (possibly none).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientOrders {
    pub client_id: i32,
    pub client_name: String,
    pub orders: Vec<OrderSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderWithDetails {
    pub order_id: i32,
    pub order_date: NaiveDateTime,
    pub details: Vec<OrderLine>,
}

/// Order count of one client.
///
/// `client` is `None` only if the client row vanished between the grouping
/// query and the lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientOrderCount {
    pub client: Option<Client>,
    pub orders_count: i64,
}

/// Every client tied at the highest order count.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TopClients {
    pub max_orders: i64,
    pub top_clients: Vec<ClientOrderCount>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientTotalProducts {
    pub client_id: i32,
    pub client_name: String,
    pub total_products: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSales {
    pub client_id: i32,
    pub client_name: String,
    pub total_sales: Decimal,
}
