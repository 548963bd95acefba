use std::sync::Arc;

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::api::rest::routes::router;
use crate::domain::service::Service;
use crate::test_support::{InMemoryRepo, at, client, detail, order, product};

async fn get(svc: Arc<Service>, uri: &str) -> (StatusCode, Value, String) {
    let app = router(svc, "/api/linq");
    let resp = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = resp.status();
    let content_type = resp
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_owned();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body, content_type)
}

fn tied_shop() -> InMemoryRepo {
    InMemoryRepo {
        clients: vec![client(1, "Ana"), client(2, "Andres"), client(3, "Beatriz")],
        products: vec![
            product(100, "Pen", Some("Blue ink"), "2.5"),
            product(101, "Notebook", None, "10"),
        ],
        orders: vec![
            order(10, 1, at(2024, 1, 1)),
            order(11, 1, at(2024, 2, 1)),
            order(12, 2, at(2024, 3, 1)),
            order(13, 2, at(2024, 3, 2)),
            order(14, 3, at(2024, 4, 1)),
        ],
        details: vec![detail(1, 10, 100, 3), detail(2, 12, 101, 1)],
        offline: false,
    }
}

#[tokio::test]
async fn order_details_for_ana_and_pen() {
    let svc = InMemoryRepo::ana_and_pen().into_service();

    let (status, body, _) = get(svc, "/api/linq/order-details?orderId=10").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([{"productName": "Pen", "quantity": 3}]));
}

#[tokio::test]
async fn client_sales_renders_decimal_number() {
    let svc = InMemoryRepo::ana_and_pen().into_service();

    let (status, body, _) = get(svc, "/api/linq/client-sales").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([{"clientId": 1, "clientName": "Ana", "totalSales": 7.5}])
    );
}

#[tokio::test]
async fn order_quantity_is_a_bare_integer() {
    let svc = InMemoryRepo::ana_and_pen().into_service();

    let (_, found, _) = get(svc.clone(), "/api/linq/order-quantity?orderId=10").await;
    let (_, none, _) = get(svc, "/api/linq/order-quantity?orderId=99").await;

    assert_eq!(found, json!(3));
    assert_eq!(none, json!(0));
}

#[tokio::test]
async fn tie_returns_every_top_client() {
    let svc = tied_shop().into_service();

    let (status, body, _) = get(svc, "/api/linq/client-with-most-orders").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["maxOrders"], 2);
    let names: Vec<&str> = body["topClients"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["client"]["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Ana", "Andres"]);
}

#[tokio::test]
async fn order_with_details_404_carries_problem() {
    let svc = tied_shop().into_service();

    let (status, body, content_type) = get(svc, "/api/linq/order-with-details/404").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(content_type, "application/problem+json");
    assert_eq!(body["code"], "SALES_NOT_FOUND");
    assert_eq!(body["instance"], "/api/linq/order-with-details/404");
}

#[tokio::test]
async fn order_with_details_nests_lines() {
    let svc = tied_shop().into_service();

    let (status, body, _) = get(svc, "/api/linq/order-with-details/10").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["orderId"], 10);
    assert_eq!(body["orderDate"], "2024-01-01T00:00:00");
    assert_eq!(
        body["details"],
        json!([{"orderId": 10, "productName": "Pen", "quantity": 3}])
    );
}

#[tokio::test]
async fn malformed_parameters_are_400() {
    let svc = tied_shop().into_service();

    for uri in [
        "/api/linq/order-details?orderId=ten",
        "/api/linq/order-details",
        "/api/linq/products?price=cheap",
        "/api/linq/orders-after-date?date=yesterday",
        "/api/linq/products-by-client?clientId=1.5",
        "/api/linq/clients-by-product",
        "/api/linq/clients",
        "/api/linq/order-with-details/abc",
    ] {
        let (status, body, content_type) = get(svc.clone(), uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(content_type, "application/problem+json", "{uri}");
        assert_eq!(body["code"], "SALES_BAD_REQUEST", "{uri}");
        assert!(body["errors"].as_array().is_some_and(|e| !e.is_empty()), "{uri}");
    }
}

#[tokio::test]
async fn empty_prefix_lists_every_client() {
    let svc = tied_shop().into_service();

    let (_, all, _) = get(svc.clone(), "/api/linq/clients?name=").await;
    let (_, an, _) = get(svc, "/api/linq/clients?name=An").await;

    assert_eq!(all.as_array().unwrap().len(), 3);
    assert_eq!(
        an,
        json!([
            {"clientId": 1, "name": "Ana", "email": "ana@example.com"},
            {"clientId": 2, "name": "Andres", "email": "andres@example.com"}
        ])
    );
}

#[tokio::test]
async fn empty_catalog_single_results_are_404() {
    let svc = InMemoryRepo::default().into_service();

    for uri in [
        "/api/linq/most-expensive-product",
        "/api/linq/average-product-price",
    ] {
        let (status, body, _) = get(svc.clone(), uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(body["detail"], "Product not found");
    }

    let (status, body, _) = get(svc, "/api/linq/client-with-most-orders").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"maxOrders": 0, "topClients": []}));
}

#[tokio::test]
async fn average_price_is_a_number() {
    let svc = tied_shop().into_service();

    let (status, body, _) = get(svc, "/api/linq/average-product-price").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(6.25));
}

#[tokio::test]
async fn offline_storage_is_503() {
    let svc = InMemoryRepo {
        offline: true,
        ..InMemoryRepo::default()
    }
    .into_service();

    let (status, body, _) = get(svc.clone(), "/api/linq/client-sales").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["code"], "SALES_DB_UNAVAILABLE");

    let (status, _, _) = get(svc, "/health").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn health_and_openapi_live_at_root() {
    let svc = tied_shop().into_service();

    let (status, body, _) = get(svc.clone(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));

    let (status, doc, _) = get(svc, "/openapi.json").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(doc["servers"][0]["url"], "/api/linq");
    assert!(doc["paths"]["/client-sales"]["get"].is_object());
}

#[tokio::test]
async fn unknown_routes_are_problem_404() {
    let svc = tied_shop().into_service();

    let (status, body, content_type) = get(svc, "/api/linq/nope").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(content_type, "application/problem+json");
    assert_eq!(body["instance"], "/api/linq/nope");
}
