//! JSON shapes of the query endpoints.
//!
//! Field names are camelCase; money amounts are plain JSON numbers.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use sales_insights_sdk::models::{
    Client, ClientOrderCount, ClientOrders, ClientSales, ClientTotalProducts, Order, OrderLine,
    OrderSummary, OrderWithDetails, Product, ProductQuantity, TopClients,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientDto {
    pub client_id: i32,
    pub name: String,
    pub email: String,
}

impl From<Client> for ClientDto {
    fn from(c: Client) -> Self {
        Self {
            client_id: c.client_id,
            name: c.name,
            email: c.email,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub product_id: i32,
    pub name: String,
    pub description: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub price: Decimal,
}

impl From<Product> for ProductDto {
    fn from(p: Product) -> Self {
        Self {
            product_id: p.product_id,
            name: p.name,
            description: p.description,
            price: p.price,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderDto {
    pub order_id: i32,
    pub client_id: i32,
    pub order_date: NaiveDateTime,
}

impl From<Order> for OrderDto {
    fn from(o: Order) -> Self {
        Self {
            order_id: o.order_id,
            client_id: o.client_id,
            order_date: o.order_date,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuantityDto {
    pub product_name: String,
    pub quantity: i32,
}

impl From<ProductQuantity> for ProductQuantityDto {
    fn from(p: ProductQuantity) -> Self {
        Self {
            product_name: p.product_name,
            quantity: p.quantity,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetailsDto {
    pub order_id: i32,
    pub product_name: String,
    pub quantity: i32,
}

impl From<OrderLine> for OrderDetailsDto {
    fn from(l: OrderLine) -> Self {
        Self {
            order_id: l.order_id,
            product_name: l.product_name,
            quantity: l.quantity,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummaryDto {
    pub order_id: i32,
    pub order_date: NaiveDateTime,
}

impl From<OrderSummary> for OrderSummaryDto {
    fn from(o: OrderSummary) -> Self {
        Self {
            order_id: o.order_id,
            order_date: o.order_date,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientOrdersDto {
    pub client_id: i32,
    pub client_name: String,
    pub orders: Vec<OrderSummaryDto>,
}

impl From<ClientOrders> for ClientOrdersDto {
    fn from(c: ClientOrders) -> Self {
        Self {
            client_id: c.client_id,
            client_name: c.client_name,
            orders: c.orders.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderWithDetailsDto {
    pub order_id: i32,
    pub order_date: NaiveDateTime,
    pub details: Vec<OrderDetailsDto>,
}

impl From<OrderWithDetails> for OrderWithDetailsDto {
    fn from(o: OrderWithDetails) -> Self {
        Self {
            order_id: o.order_id,
            order_date: o.order_date,
            details: o.details.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientOrderCountDto {
    pub client: Option<ClientDto>,
    pub orders_count: i64,
}

impl From<ClientOrderCount> for ClientOrderCountDto {
    fn from(c: ClientOrderCount) -> Self {
        Self {
            client: c.client.map(Into::into),
            orders_count: c.orders_count,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TopClientsDto {
    pub max_orders: i64,
    pub top_clients: Vec<ClientOrderCountDto>,
}

impl From<TopClients> for TopClientsDto {
    fn from(t: TopClients) -> Self {
        Self {
            max_orders: t.max_orders,
            top_clients: t.top_clients.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientTotalProductsDto {
    pub client_id: i32,
    pub client_name: String,
    pub total_products: i64,
}

impl From<ClientTotalProducts> for ClientTotalProductsDto {
    fn from(c: ClientTotalProducts) -> Self {
        Self {
            client_id: c.client_id,
            client_name: c.client_name,
            total_products: c.total_products,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientSalesDto {
    pub client_id: i32,
    pub client_name: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub total_sales: Decimal,
}

impl From<ClientSales> for ClientSalesDto {
    fn from(c: ClientSales) -> Self {
        Self {
            client_id: c.client_id,
            client_name: c.client_name,
            total_sales: c.total_sales,
        }
    }
}

/// A bare decimal, rendered as a JSON number.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = f64)]
pub struct AmountDto(#[serde(with = "rust_decimal::serde::float")] pub Decimal);

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthDto {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{at, client, dec, product};

    #[test]
    fn product_serializes_camel_case_with_numeric_price() {
        let dto: ProductDto = product(100, "Pen", None, "2.5").into();
        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "productId": 100,
                "name": "Pen",
                "description": null,
                "price": 2.5
            })
        );
    }

    #[test]
    fn order_date_is_iso_8601() {
        let dto = OrderSummaryDto {
            order_id: 10,
            order_date: at(2024, 1, 1),
        };
        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["orderDate"], "2024-01-01T00:00:00");
    }

    #[test]
    fn top_clients_nest_client_objects() {
        let dto: TopClientsDto = TopClients {
            max_orders: 2,
            top_clients: vec![ClientOrderCount {
                client: Some(client(1, "Ana")),
                orders_count: 2,
            }],
        }
        .into();
        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["maxOrders"], 2);
        assert_eq!(json["topClients"][0]["ordersCount"], 2);
        assert_eq!(json["topClients"][0]["client"]["name"], "Ana");
    }

    #[test]
    fn amount_is_a_bare_number() {
        let json = serde_json::to_string(&AmountDto(dec("7.5"))).unwrap();
        assert_eq!(json, "7.5");
    }
}
