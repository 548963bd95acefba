//! Entity models to SDK models.

use sales_insights_sdk::models::{Client, Order, OrderDetail, Product};

use super::entity::{client, order, order_detail, product};

impl From<client::Model> for Client {
    fn from(m: client::Model) -> Self {
        Self {
            client_id: m.client_id,
            name: m.name,
            email: m.email,
        }
    }
}

impl From<product::Model> for Product {
    fn from(m: product::Model) -> Self {
        Self {
            product_id: m.product_id,
            name: m.name,
            description: m.description,
            price: m.price,
        }
    }
}

impl From<order::Model> for Order {
    fn from(m: order::Model) -> Self {
        Self {
            order_id: m.order_id,
            client_id: m.client_id,
            order_date: m.order_date,
        }
    }
}

impl From<order_detail::Model> for OrderDetail {
    fn from(m: order_detail::Model) -> Self {
        Self {
            order_detail_id: m.order_detail_id,
            order_id: m.order_id,
            product_id: m.product_id,
            quantity: m.quantity,
        }
    }
}
