use std::sync::Arc;

use axum::routing::get;
use axum::{Extension, Json, Router};

use crate::api::rest::{handlers, openapi};
use crate::domain::service::Service;

/// Query routes nested under `base_path`, plus `/health` and `/openapi.json`
/// at the root. Unmatched paths answer with a 404 problem.
#[must_use]
pub fn router(service: Arc<Service>, base_path: &str) -> Router {
    let queries = Router::new()
        .route("/clients", get(handlers::get_clients))
        .route("/products", get(handlers::get_products))
        .route("/order-details", get(handlers::get_order_details))
        .route("/order-quantity", get(handlers::get_order_quantity))
        .route(
            "/most-expensive-product",
            get(handlers::get_most_expensive_product),
        )
        .route("/orders-after-date", get(handlers::get_orders_after_date))
        .route(
            "/average-product-price",
            get(handlers::get_average_product_price),
        )
        .route(
            "/products-without-description",
            get(handlers::get_products_without_description),
        )
        .route(
            "/client-with-most-orders",
            get(handlers::get_client_with_most_orders),
        )
        .route("/all-orders-details", get(handlers::get_all_orders_details))
        .route("/products-by-client", get(handlers::get_products_by_client))
        .route("/clients-by-product", get(handlers::get_clients_by_product))
        .route("/clients-with-orders", get(handlers::get_clients_with_orders))
        .route(
            "/order-with-details/{orderId}",
            get(handlers::get_order_with_details),
        )
        .route(
            "/clients-total-products",
            get(handlers::get_clients_total_products),
        )
        .route("/client-sales", get(handlers::get_client_sales));

    let base = normalize_base_path(base_path);
    let doc = Arc::new(openapi::document(&base));

    let root = if base.is_empty() {
        Router::new().merge(queries)
    } else {
        Router::new().nest(&base, queries)
    };

    root.route("/health", get(handlers::health))
        .route(
            "/openapi.json",
            get(move || {
                let doc = Arc::clone(&doc);
                async move { Json(doc.as_ref().clone()) }
            }),
        )
        .fallback(handlers::route_not_found)
        .layer(Extension(service))
}

/// `"api/linq/"` becomes `"/api/linq"`; `"/"` and `""` mean no prefix.
#[must_use]
pub fn normalize_base_path(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}
