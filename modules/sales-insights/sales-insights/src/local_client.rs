use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use sales_insights_sdk::{
    Client, ClientOrders, ClientSales, ClientTotalProducts, Order, OrderLine, OrderWithDetails,
    Product, ProductQuantity, SalesInsightsApi, SalesInsightsError, TopClients,
};

use crate::domain::service::Service;

/// In-process [`SalesInsightsApi`] backed directly by the domain service.
pub struct LocalClient {
    service: Arc<Service>,
}

impl LocalClient {
    #[must_use]
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl SalesInsightsApi for LocalClient {
    async fn clients_by_name_prefix(
        &self,
        prefix: &str,
    ) -> Result<Vec<Client>, SalesInsightsError> {
        self.service
            .clients_by_name_prefix(prefix)
            .await
            .map_err(Into::into)
    }

    async fn products_above_price(
        &self,
        price: Decimal,
    ) -> Result<Vec<Product>, SalesInsightsError> {
        self.service
            .products_above_price(price)
            .await
            .map_err(Into::into)
    }

    async fn order_details(
        &self,
        order_id: i32,
    ) -> Result<Vec<ProductQuantity>, SalesInsightsError> {
        self.service.order_details(order_id).await.map_err(Into::into)
    }

    async fn order_total_quantity(&self, order_id: i32) -> Result<i64, SalesInsightsError> {
        self.service
            .order_total_quantity(order_id)
            .await
            .map_err(Into::into)
    }

    async fn most_expensive_product(&self) -> Result<Product, SalesInsightsError> {
        self.service.most_expensive_product().await.map_err(Into::into)
    }

    async fn orders_after_date(
        &self,
        date: NaiveDateTime,
    ) -> Result<Vec<Order>, SalesInsightsError> {
        self.service.orders_after_date(date).await.map_err(Into::into)
    }

    async fn average_product_price(&self) -> Result<Decimal, SalesInsightsError> {
        self.service.average_product_price().await.map_err(Into::into)
    }

    async fn products_missing_description(&self) -> Result<Vec<Product>, SalesInsightsError> {
        self.service
            .products_missing_description()
            .await
            .map_err(Into::into)
    }

    async fn client_with_most_orders(&self) -> Result<TopClients, SalesInsightsError> {
        self.service
            .client_with_most_orders()
            .await
            .map_err(Into::into)
    }

    async fn all_order_details(&self) -> Result<Vec<OrderLine>, SalesInsightsError> {
        self.service.all_order_details().await.map_err(Into::into)
    }

    async fn products_bought_by_client(
        &self,
        client_id: i32,
    ) -> Result<Vec<String>, SalesInsightsError> {
        self.service
            .products_bought_by_client(client_id)
            .await
            .map_err(Into::into)
    }

    async fn clients_who_bought_product(
        &self,
        product_id: i32,
    ) -> Result<Vec<String>, SalesInsightsError> {
        self.service
            .clients_who_bought_product(product_id)
            .await
            .map_err(Into::into)
    }

    async fn clients_with_orders(&self) -> Result<Vec<ClientOrders>, SalesInsightsError> {
        self.service.clients_with_orders().await.map_err(Into::into)
    }

    async fn order_with_details(
        &self,
        order_id: i32,
    ) -> Result<OrderWithDetails, SalesInsightsError> {
        self.service
            .order_with_details(order_id)
            .await
            .map_err(Into::into)
    }

    async fn clients_total_products(
        &self,
    ) -> Result<Vec<ClientTotalProducts>, SalesInsightsError> {
        self.service
            .clients_total_products()
            .await
            .map_err(Into::into)
    }

    async fn client_sales(&self) -> Result<Vec<ClientSales>, SalesInsightsError> {
        self.service.client_sales().await.map_err(Into::into)
    }
}
