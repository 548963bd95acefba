use storelab_errors::{Problem, ValidationViolation};
use utoipa::OpenApi;
use utoipa::openapi::server::Server;

use super::dto::{
    AmountDto, ClientDto, ClientOrderCountDto, ClientOrdersDto, ClientSalesDto,
    ClientTotalProductsDto, OrderDetailsDto, OrderDto, OrderSummaryDto, OrderWithDetailsDto,
    ProductDto, ProductQuantityDto, TopClientsDto,
};
use super::handlers;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Sales insights",
        description = "Read-only analytical queries over clients, products and orders"
    ),
    paths(
        handlers::get_clients,
        handlers::get_products,
        handlers::get_order_details,
        handlers::get_order_quantity,
        handlers::get_most_expensive_product,
        handlers::get_orders_after_date,
        handlers::get_average_product_price,
        handlers::get_products_without_description,
        handlers::get_client_with_most_orders,
        handlers::get_all_orders_details,
        handlers::get_products_by_client,
        handlers::get_clients_by_product,
        handlers::get_clients_with_orders,
        handlers::get_order_with_details,
        handlers::get_clients_total_products,
        handlers::get_client_sales,
    ),
    components(schemas(
        ClientDto,
        ProductDto,
        OrderDto,
        ProductQuantityDto,
        OrderDetailsDto,
        OrderSummaryDto,
        ClientOrdersDto,
        OrderWithDetailsDto,
        ClientOrderCountDto,
        TopClientsDto,
        ClientTotalProductsDto,
        ClientSalesDto,
        AmountDto,
        Problem,
        ValidationViolation,
    )),
    tags((name = "linq", description = "Canned filtering, aggregation, grouping and join queries"))
)]
pub struct ApiDoc;

/// The generated document, with the query routes served under `base_path`.
#[must_use]
pub fn document(base_path: &str) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    let url = if base_path.is_empty() { "/" } else { base_path };
    doc.servers = Some(vec![Server::new(url)]);
    doc
}
