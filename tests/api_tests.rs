use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use renata_store::{app::AppState, build_router, infrastructure::config::Config};
use serde_json::{json, Value};
use tower::ServiceExt;

fn app() -> Router {
    let config = Config::default();
    build_router(AppState::seeded(&config), Duration::from_secs(5))
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn login(app: &Router) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/admin/login",
        None,
        Some(json!({ "email": "admin@example.com", "password": "password123" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["data"]["token"].as_str().unwrap().to_string()
}

fn ids(body: &Value) -> Vec<String> {
    body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_health() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_product_filters() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/api/products", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"].as_array().unwrap().len(), 12);
    assert_eq!(body["data"][1]["salePrice"], 1.49);
    assert_eq!(body["data"][1]["categoryId"], "fruits");

    let (_, body) = send(
        &app,
        Method::GET,
        "/api/products?search=queso",
        None,
        None,
    )
    .await;
    assert_eq!(ids(&body), vec!["4"]);

    let (_, body) = send(
        &app,
        Method::GET,
        "/api/products?category=frozen&minPrice=7&maxPrice=10",
        None,
        None,
    )
    .await;
    assert_eq!(ids(&body), vec!["12"]);

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/products?minPrice=10&maxPrice=1",
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_featured_price_range_and_categories() {
    let app = app();

    let (_, body) = send(
        &app,
        Method::GET,
        "/api/products/featured?limit=2",
        None,
        None,
    )
    .await;
    assert_eq!(ids(&body), vec!["1", "3"]);

    let (_, body) = send(&app, Method::GET, "/api/products/price-range", None, None).await;
    assert_eq!(body["data"]["minPrice"], 1.99);
    assert_eq!(body["data"]["maxPrice"], 12.99);

    let (_, body) = send(&app, Method::GET, "/api/categories", None, None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 6);

    let (status, body) = send(&app, Method::GET, "/api/categories/dairy", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Lácteos");

    let (status, _) = send(&app, Method::GET, "/api/products/999", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_admin_routes_require_login() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/api/admin/dashboard", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "UNAUTHORIZED");

    let (status, _) = send(
        &app,
        Method::GET,
        "/api/admin/dashboard",
        Some("not-a-token"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/admin/login",
        None,
        Some(json!({ "email": "admin@example.com", "password": "wrong" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Correo electrónico o contraseña incorrectos");
}

#[tokio::test]
async fn test_logout_revokes_token() {
    let app = app();
    let token = login(&app).await;

    let (status, _) = send(&app, Method::GET, "/api/admin/dashboard", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, Method::POST, "/api/admin/logout", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, Method::GET, "/api/admin/dashboard", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_product_crud_updates_storefront_and_dashboard() {
    let app = app();
    let token = login(&app).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/admin/products",
        Some(&token),
        Some(json!({
            "name": "Harina 000",
            "description": "Harina de trigo para panaderías",
            "price": 2.75,
            "categoryId": "groceries",
            "stock": 3
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(id, "product-13");
    assert_eq!(body["data"]["imageUrl"], "https://via.placeholder.com/150");

    // 新商品在前台可见
    let (_, body) = send(&app, Method::GET, "/api/products?search=harina", None, None).await;
    assert_eq!(ids(&body), vec![id.clone()]);

    let (_, body) = send(&app, Method::GET, "/api/admin/dashboard", Some(&token), None).await;
    assert_eq!(body["data"]["totalProducts"], 13);
    assert_eq!(body["data"]["lowStockProducts"], 1);
    assert_eq!(body["data"]["unreadMessages"], 2);

    // 低库存触发通知
    let (_, body) = send(
        &app,
        Method::GET,
        "/api/admin/notifications",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(body["data"]["unread"], 1);
    assert_eq!(body["data"]["notifications"][0]["type"], "product");
    assert_eq!(body["data"]["notifications"][0]["title"], "Stock bajo");

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/admin/products/{}", id),
        Some(&token),
        Some(json!({ "stock": 40, "onSale": true, "salePrice": 2.5 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["stock"], 40);
    assert_eq!(body["data"]["salePrice"], 2.5);
    assert_eq!(body["data"]["name"], "Harina 000");

    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/api/admin/products/{}", id),
        Some(&token),
        Some(json!({ "price": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        Method::DELETE,
        &format!("/api/admin/products/{}", id),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, Method::GET, &format!("/api/products/{}", id), None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_product_requires_fields() {
    let app = app();
    let token = login(&app).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/admin/products",
        Some(&token),
        Some(json!({ "name": " ", "price": 1.0, "categoryId": "fruits" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "El nombre del producto es obligatorio");
}

#[tokio::test]
async fn test_create_category() {
    let app = app();
    let token = login(&app).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/admin/categories",
        Some(&token),
        Some(json!({ "name": "Bebidas", "description": "Jugos y gaseosas" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["id"], "cat-7");

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/admin/categories",
        Some(&token),
        Some(json!({ "id": "dairy", "name": "Lácteos" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, body) = send(&app, Method::GET, "/api/categories", None, None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 7);
}

#[tokio::test]
async fn test_contact_message_flow() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/contact",
        None,
        Some(json!({
            "name": "Lucía Fernández",
            "email": "lucia@example.com",
            "phone": "+54 9 351 555-0101",
            "message": "Necesito una cotización para 50 cajas de tomates."
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["id"], "4");
    assert_eq!(body["data"]["read"], false);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/contact",
        None,
        Some(json!({ "name": "Sin correo", "email": "nada", "message": "Hola" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let token = login(&app).await;

    let (_, body) = send(
        &app,
        Method::GET,
        "/api/admin/messages?unreadOnly=true",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(ids(&body), vec!["4", "3", "2"]);

    let (_, body) = send(
        &app,
        Method::GET,
        "/api/admin/notifications",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(body["data"]["notifications"][0]["type"], "message");

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/admin/messages/4",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["read"], true);

    let (_, body) = send(
        &app,
        Method::GET,
        "/api/admin/messages/4/reply-links",
        Some(&token),
        None,
    )
    .await;
    assert!(body["data"]["mailto"]
        .as_str()
        .unwrap()
        .starts_with("mailto:lucia@example.com?subject="));
    assert!(body["data"]["whatsapp"]
        .as_str()
        .unwrap()
        .starts_with("https://wa.me/5493515550101?text="));

    let (_, body) = send(
        &app,
        Method::GET,
        "/api/admin/messages/1/reply-links",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(body["data"]["whatsapp"], Value::Null);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/admin/messages/2/read",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        Method::DELETE,
        "/api/admin/messages/3",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, Method::GET, "/api/admin/dashboard", Some(&token), None).await;
    assert_eq!(body["data"]["unreadMessages"], 0);
    assert_eq!(body["data"]["totalMessages"], 3);
}

#[tokio::test]
async fn test_contact_whatsapp_link() {
    let app = app();

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/contact/whatsapp",
        None,
        Some(json!({ "name": "Ana", "email": "ana@example.com", "message": "Hola" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/contact/whatsapp",
        None,
        Some(json!({
            "name": "Ana",
            "email": "ana@example.com",
            "phone": "351 555 0101",
            "message": "Hola"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["url"]
        .as_str()
        .unwrap()
        .starts_with("https://wa.me/5493512742582?text=Hola%2C%20mi%20nombre%20es%20Ana."));

    // 只生成链接，不写入收件箱
    let token = login(&app).await;
    let (_, body) = send(&app, Method::GET, "/api/admin/messages", Some(&token), None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_notifications_mark_and_clear() {
    let app = app();
    for name in ["Ana", "Beto"] {
        let (status, _) = send(
            &app,
            Method::POST,
            "/api/contact",
            None,
            Some(json!({ "name": name, "email": "cliente@example.com", "message": "Consulta" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let token = login(&app).await;
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/admin/notifications/1/read",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(
        &app,
        Method::POST,
        "/api/admin/notifications/read-all",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(body["data"]["updated"], 1);

    let (_, body) = send(
        &app,
        Method::POST,
        "/api/admin/notifications/clear",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(body["data"]["removed"], 2);

    let (_, body) = send(
        &app,
        Method::GET,
        "/api/admin/notifications",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(body["data"]["unread"], 0);
    assert!(body["data"]["notifications"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_settings() {
    let app = app();

    let (_, body) = send(&app, Method::GET, "/api/settings", None, None).await;
    assert_eq!(body["data"]["companyName"], "DistribuidoraRenata");
    let mut settings = body["data"].clone();

    settings["scheduleSaturday"] = json!("9:00 - 13:00");
    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/admin/settings",
        None,
        Some(settings.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let token = login(&app).await;
    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/admin/settings",
        Some(&token),
        Some(settings.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, Method::GET, "/api/settings", None, None).await;
    assert_eq!(body["data"]["scheduleSaturday"], "9:00 - 13:00");

    settings["companyName"] = json!("");
    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/admin/settings",
        Some(&token),
        Some(settings),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

fn assert_error_body(body: &Value, status: StatusCode) {
    assert_eq!(body["error"], "BAD_REQUEST");
    assert_eq!(body["code"], status.as_u16());
    assert!(body["message"].as_str().is_some());
    assert!(body["timestamp"].as_str().is_some());
}

#[tokio::test]
async fn test_malformed_requests_use_error_body() {
    let app = app();

    // 缺少 message 字段
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/contact",
        None,
        Some(json!({ "name": "Ana", "email": "ana@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error_body(&body, status);
    assert_eq!(body["message"], "El mensaje es obligatorio");

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/products?minPrice=abc",
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error_body(&body, status);

    let token = login(&app).await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/admin/products",
        Some(&token),
        Some(json!({ "name": "Arroz", "price": 1.5, "categoryId": "groceries", "stock": -4 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error_body(&body, status);

    // 非 JSON 请求体
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/admin/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{email"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_error_body(&body, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_cleared_filters_are_ignored() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/products?search=&category=&minPrice=&maxPrice=",
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 12);

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/products?category=fruits&minPrice=&maxPrice=2",
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    for product in body["data"].as_array().unwrap() {
        assert_eq!(product["categoryId"], "fruits");
        assert!(product["price"].as_f64().unwrap() <= 2.0);
    }
}

#[tokio::test]
async fn test_editing_low_stock_product_raises_notification() {
    let app = app();
    let token = login(&app).await;

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/admin/products/10",
        Some(&token),
        Some(json!({ "stock": 3 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    send(
        &app,
        Method::POST,
        "/api/admin/notifications/clear",
        Some(&token),
        None,
    )
    .await;

    // 只改价格，库存仍然偏低
    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/admin/products/10",
        Some(&token),
        Some(json!({ "price": 4.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["stock"], 3);

    let (_, body) = send(
        &app,
        Method::GET,
        "/api/admin/notifications",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(body["data"]["unread"], 1);
    assert_eq!(body["data"]["notifications"][0]["title"], "Stock bajo");
    assert_eq!(body["data"]["notifications"][0]["type"], "product");
}

#[tokio::test]
async fn test_settings_update_raises_system_notification() {
    let app = app();
    let token = login(&app).await;

    let (_, body) = send(&app, Method::GET, "/api/settings", None, None).await;
    let mut settings = body["data"].clone();
    settings["phone"] = json!("+54 351 555-0199");

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/admin/settings",
        Some(&token),
        Some(settings),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(
        &app,
        Method::GET,
        "/api/admin/notifications",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(body["data"]["notifications"][0]["type"], "system");
    assert_eq!(
        body["data"]["notifications"][0]["title"],
        "Configuración actualizada"
    );
}
