use std::sync::Arc;

use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Extension, OriginalUri, Path, Query};
use axum::Json;
use storelab_errors::{ApiResult, Problem};

use crate::domain::error::DomainError;
use crate::domain::service::Service;
use crate::errors::ErrorCode;

use super::dto::{
    AmountDto, ClientDto, ClientOrdersDto, ClientSalesDto, ClientTotalProductsDto, HealthDto,
    OrderDetailsDto, OrderDto, OrderWithDetailsDto, ProductDto, ProductQuantityDto, TopClientsDto,
};
use super::error::{current_trace_id, domain_error_to_problem, invalid_parameter};
use super::params::{
    self, ClientIdQuery, DateQuery, NameQuery, OrderIdQuery, PriceQuery, ProductIdQuery,
};

fn query<T>(extracted: Result<Query<T>, QueryRejection>, instance: &str) -> ApiResult<T> {
    extracted
        .map(|Query(q)| q)
        .map_err(|rejection| invalid_parameter("query", &rejection.body_text(), instance))
}

fn at(instance: &str) -> impl Fn(DomainError) -> Problem + '_ {
    move |e| domain_error_to_problem(&e, instance)
}

fn list<T, D: From<T>>(items: Vec<T>) -> Json<Vec<D>> {
    Json(items.into_iter().map(Into::into).collect())
}

#[utoipa::path(
    get,
    path = "/clients",
    tag = "linq",
    params(NameQuery),
    responses(
        (status = 200, description = "Clients whose name starts with the prefix", body = [ClientDto]),
        (status = 400, description = "Missing name", body = Problem, content_type = "application/problem+json"),
    )
)]
pub async fn get_clients(
    Extension(svc): Extension<Arc<Service>>,
    OriginalUri(uri): OriginalUri,
    q: Result<Query<NameQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<ClientDto>>> {
    let q = query(q, uri.path())?;
    let name = params::required("name", q.name.as_deref(), uri.path())?;
    let clients = svc.clients_by_name_prefix(name).await.map_err(at(uri.path()))?;
    Ok(list(clients))
}

#[utoipa::path(
    get,
    path = "/products",
    tag = "linq",
    params(PriceQuery),
    responses(
        (status = 200, description = "Products priced above the bound", body = [ProductDto]),
        (status = 400, description = "Missing or malformed price", body = Problem, content_type = "application/problem+json"),
    )
)]
pub async fn get_products(
    Extension(svc): Extension<Arc<Service>>,
    OriginalUri(uri): OriginalUri,
    q: Result<Query<PriceQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<ProductDto>>> {
    let q = query(q, uri.path())?;
    let price = params::parse_decimal("price", q.price.as_deref(), uri.path())?;
    let products = svc.products_above_price(price).await.map_err(at(uri.path()))?;
    Ok(list(products))
}

#[utoipa::path(
    get,
    path = "/order-details",
    tag = "linq",
    params(OrderIdQuery),
    responses(
        (status = 200, description = "Product name and quantity of each line of the order", body = [ProductQuantityDto]),
        (status = 400, description = "Missing or malformed orderId", body = Problem, content_type = "application/problem+json"),
    )
)]
pub async fn get_order_details(
    Extension(svc): Extension<Arc<Service>>,
    OriginalUri(uri): OriginalUri,
    q: Result<Query<OrderIdQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<ProductQuantityDto>>> {
    let q = query(q, uri.path())?;
    let order_id = params::parse_id("orderId", q.order_id.as_deref(), uri.path())?;
    let lines = svc.order_details(order_id).await.map_err(at(uri.path()))?;
    Ok(list(lines))
}

#[utoipa::path(
    get,
    path = "/order-quantity",
    tag = "linq",
    params(OrderIdQuery),
    responses(
        (status = 200, description = "Total quantity of the order, 0 without lines", body = i64),
        (status = 400, description = "Missing or malformed orderId", body = Problem, content_type = "application/problem+json"),
    )
)]
pub async fn get_order_quantity(
    Extension(svc): Extension<Arc<Service>>,
    OriginalUri(uri): OriginalUri,
    q: Result<Query<OrderIdQuery>, QueryRejection>,
) -> ApiResult<Json<i64>> {
    let q = query(q, uri.path())?;
    let order_id = params::parse_id("orderId", q.order_id.as_deref(), uri.path())?;
    let total = svc.order_total_quantity(order_id).await.map_err(at(uri.path()))?;
    Ok(Json(total))
}

#[utoipa::path(
    get,
    path = "/most-expensive-product",
    tag = "linq",
    responses(
        (status = 200, description = "Highest priced product", body = ProductDto),
        (status = 404, description = "No products", body = Problem, content_type = "application/problem+json"),
    )
)]
pub async fn get_most_expensive_product(
    Extension(svc): Extension<Arc<Service>>,
    OriginalUri(uri): OriginalUri,
) -> ApiResult<Json<ProductDto>> {
    let product = svc.most_expensive_product().await.map_err(at(uri.path()))?;
    Ok(Json(product.into()))
}

#[utoipa::path(
    get,
    path = "/orders-after-date",
    tag = "linq",
    params(DateQuery),
    responses(
        (status = 200, description = "Orders placed after the date", body = [OrderDto]),
        (status = 400, description = "Missing or malformed date", body = Problem, content_type = "application/problem+json"),
    )
)]
pub async fn get_orders_after_date(
    Extension(svc): Extension<Arc<Service>>,
    OriginalUri(uri): OriginalUri,
    q: Result<Query<DateQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<OrderDto>>> {
    let q = query(q, uri.path())?;
    let date = params::parse_date("date", q.date.as_deref(), uri.path())?;
    let orders = svc.orders_after_date(date).await.map_err(at(uri.path()))?;
    Ok(list(orders))
}

#[utoipa::path(
    get,
    path = "/average-product-price",
    tag = "linq",
    responses(
        (status = 200, description = "Mean price over all products", body = AmountDto),
        (status = 404, description = "No products", body = Problem, content_type = "application/problem+json"),
    )
)]
pub async fn get_average_product_price(
    Extension(svc): Extension<Arc<Service>>,
    OriginalUri(uri): OriginalUri,
) -> ApiResult<Json<AmountDto>> {
    let avg = svc.average_product_price().await.map_err(at(uri.path()))?;
    Ok(Json(AmountDto(avg)))
}

#[utoipa::path(
    get,
    path = "/products-without-description",
    tag = "linq",
    responses(
        (status = 200, description = "Products with a null or empty description", body = [ProductDto]),
    )
)]
pub async fn get_products_without_description(
    Extension(svc): Extension<Arc<Service>>,
    OriginalUri(uri): OriginalUri,
) -> ApiResult<Json<Vec<ProductDto>>> {
    let products = svc.products_missing_description().await.map_err(at(uri.path()))?;
    Ok(list(products))
}

#[utoipa::path(
    get,
    path = "/client-with-most-orders",
    tag = "linq",
    responses(
        (status = 200, description = "Every client tied at the highest order count", body = TopClientsDto),
    )
)]
pub async fn get_client_with_most_orders(
    Extension(svc): Extension<Arc<Service>>,
    OriginalUri(uri): OriginalUri,
) -> ApiResult<Json<TopClientsDto>> {
    let top = svc.client_with_most_orders().await.map_err(at(uri.path()))?;
    Ok(Json(top.into()))
}

#[utoipa::path(
    get,
    path = "/all-orders-details",
    tag = "linq",
    responses(
        (status = 200, description = "Every order line with its product name", body = [OrderDetailsDto]),
    )
)]
pub async fn get_all_orders_details(
    Extension(svc): Extension<Arc<Service>>,
    OriginalUri(uri): OriginalUri,
) -> ApiResult<Json<Vec<OrderDetailsDto>>> {
    let lines = svc.all_order_details().await.map_err(at(uri.path()))?;
    Ok(list(lines))
}

#[utoipa::path(
    get,
    path = "/products-by-client",
    tag = "linq",
    params(ClientIdQuery),
    responses(
        (status = 200, description = "Distinct product names ordered by the client", body = [String]),
        (status = 400, description = "Missing or malformed clientId", body = Problem, content_type = "application/problem+json"),
    )
)]
pub async fn get_products_by_client(
    Extension(svc): Extension<Arc<Service>>,
    OriginalUri(uri): OriginalUri,
    q: Result<Query<ClientIdQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<String>>> {
    let q = query(q, uri.path())?;
    let client_id = params::parse_id("clientId", q.client_id.as_deref(), uri.path())?;
    let names = svc.products_bought_by_client(client_id).await.map_err(at(uri.path()))?;
    Ok(Json(names))
}

#[utoipa::path(
    get,
    path = "/clients-by-product",
    tag = "linq",
    params(ProductIdQuery),
    responses(
        (status = 200, description = "Distinct names of clients who ordered the product", body = [String]),
        (status = 400, description = "Missing or malformed productId", body = Problem, content_type = "application/problem+json"),
    )
)]
pub async fn get_clients_by_product(
    Extension(svc): Extension<Arc<Service>>,
    OriginalUri(uri): OriginalUri,
    q: Result<Query<ProductIdQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<String>>> {
    let q = query(q, uri.path())?;
    let product_id = params::parse_id("productId", q.product_id.as_deref(), uri.path())?;
    let names = svc.clients_who_bought_product(product_id).await.map_err(at(uri.path()))?;
    Ok(Json(names))
}

#[utoipa::path(
    get,
    path = "/clients-with-orders",
    tag = "linq",
    responses(
        (status = 200, description = "Each client with its orders", body = [ClientOrdersDto]),
    )
)]
pub async fn get_clients_with_orders(
    Extension(svc): Extension<Arc<Service>>,
    OriginalUri(uri): OriginalUri,
) -> ApiResult<Json<Vec<ClientOrdersDto>>> {
    let rows = svc.clients_with_orders().await.map_err(at(uri.path()))?;
    Ok(list(rows))
}

#[utoipa::path(
    get,
    path = "/order-with-details/{orderId}",
    tag = "linq",
    params(("orderId" = i32, Path, description = "Order identifier")),
    responses(
        (status = 200, description = "The order with its lines", body = OrderWithDetailsDto),
        (status = 400, description = "Malformed orderId", body = Problem, content_type = "application/problem+json"),
        (status = 404, description = "No such order", body = Problem, content_type = "application/problem+json"),
    )
)]
pub async fn get_order_with_details(
    Extension(svc): Extension<Arc<Service>>,
    OriginalUri(uri): OriginalUri,
    raw: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<OrderWithDetailsDto>> {
    let raw = raw
        .map(|Path(id)| id)
        .map_err(|rejection| invalid_parameter("orderId", &rejection.body_text(), uri.path()))?;
    let order_id = params::parse_id("orderId", Some(&raw), uri.path())?;
    let order = svc.order_with_details(order_id).await.map_err(at(uri.path()))?;
    Ok(Json(order.into()))
}

#[utoipa::path(
    get,
    path = "/clients-total-products",
    tag = "linq",
    responses(
        (status = 200, description = "Total quantity ordered per client", body = [ClientTotalProductsDto]),
    )
)]
pub async fn get_clients_total_products(
    Extension(svc): Extension<Arc<Service>>,
    OriginalUri(uri): OriginalUri,
) -> ApiResult<Json<Vec<ClientTotalProductsDto>>> {
    let totals = svc.clients_total_products().await.map_err(at(uri.path()))?;
    Ok(list(totals))
}

#[utoipa::path(
    get,
    path = "/client-sales",
    tag = "linq",
    responses(
        (status = 200, description = "Sales per client, highest first", body = [ClientSalesDto]),
    )
)]
pub async fn get_client_sales(
    Extension(svc): Extension<Arc<Service>>,
    OriginalUri(uri): OriginalUri,
) -> ApiResult<Json<Vec<ClientSalesDto>>> {
    let sales = svc.client_sales().await.map_err(at(uri.path()))?;
    Ok(list(sales))
}

/// Liveness of the service and its database.
pub async fn health(
    Extension(svc): Extension<Arc<Service>>,
    OriginalUri(uri): OriginalUri,
) -> ApiResult<Json<HealthDto>> {
    if let Err(e) = svc.ping().await {
        tracing::warn!(error = %e, "health check failed");
        return Err(ErrorCode::sales_insights_db_unavailable_v1().with_context(
            "The database is currently unavailable",
            uri.path(),
            current_trace_id(),
        ));
    }
    Ok(Json(HealthDto {
        status: "ok".to_owned(),
    }))
}

/// Problem body for paths no route matches.
pub async fn route_not_found(OriginalUri(uri): OriginalUri) -> Problem {
    ErrorCode::sales_insights_not_found_v1().with_context(
        format!("No route for {}", uri.path()),
        uri.path(),
        current_trace_id(),
    )
}
