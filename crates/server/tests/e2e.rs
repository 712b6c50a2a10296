use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use reqwest::StatusCode;
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use server::routes::{self, AppState};
use service::customer::service::CustomerService;
use service::customer::store::memory::MemoryCustomerStore;
use service::customer::store::CustomerStore;

struct TestApp {
    base_url: String,
}

// Each test gets its own server over a fresh in-memory store, so the journeys
// below run without any database.
async fn start_server() -> anyhow::Result<TestApp> {
    let store: Arc<dyn CustomerStore> = Arc::new(MemoryCustomerStore::new());
    let state = AppState { customers: Arc::new(CustomerService::new(store)) };
    let app: Router = routes::build_router(state, CorsLayer::very_permissive());

    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}", addr);

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("server error: {}", e);
        }
    });

    Ok(TestApp { base_url })
}

fn client() -> reqwest::Client {
    reqwest::Client::new()
}

#[tokio::test]
async fn e2e_health() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client().get(format!("{}/health", app.base_url)).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn e2e_customer_journey() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();
    let root = format!("{}/api/v1/customers", app.base_url);

    // Register
    let res = c
        .post(&root)
        .json(&json!({"name": "Alex", "email": "alex@test.com", "age": 21}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: serde_json::Value = res.json().await?;
    let id = created["id"].as_i64().expect("created id");
    assert!(id > 0);
    assert_eq!(created["name"], "Alex");
    assert_eq!(created["email"], "alex@test.com");
    assert_eq!(created["age"], 21);

    // Duplicate email is rejected and the list stays unchanged.
    let res = c
        .post(&root)
        .json(&json!({"name": "Somebody", "email": "alex@test.com", "age": 33}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CONFLICT);

    let res = c.get(&root).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let all: serde_json::Value = res.json().await?;
    assert_eq!(all.as_array().map(|a| a.len()), Some(1));

    // Update the age and read it back.
    let res = c
        .put(format!("{}/{}", root, id))
        .json(&json!({"name": "Alex", "email": "alex@test.com", "age": 22}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let res = c.get(format!("{}/{}", root, id)).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let fetched: serde_json::Value = res.json().await?;
    assert_eq!(fetched["id"], id);
    assert_eq!(fetched["age"], 22);

    // Delete, then the record is gone.
    let res = c.delete(format!("{}/{}", root, id)).send().await?;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = c.get(format!("{}/{}", root, id)).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn e2e_unknown_id_maps_to_404() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();
    let root = format!("{}/api/v1/customers", app.base_url);

    let res = c.get(format!("{}/999", root)).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = res.json().await?;
    assert_eq!(body["error"], "Not Found");

    let res = c.delete(format!("{}/999", root)).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = c
        .put(format!("{}/999", root))
        .json(&json!({"name": "N", "email": "n@test.com", "age": 1}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn e2e_validation_maps_to_400() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();
    let root = format!("{}/api/v1/customers", app.base_url);

    for body in [
        json!({"name": "", "email": "x@test.com", "age": 20}),
        json!({"name": "X", "email": "not-an-email", "age": 20}),
        json!({"name": "X", "email": "x@test.com", "age": 0}),
    ] {
        let res = c.post(&root).json(&body).send().await?;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "body: {}", body);
    }

    // Nothing was inserted.
    let res = c.get(&root).send().await?;
    let all: serde_json::Value = res.json().await?;
    assert_eq!(all.as_array().map(|a| a.len()), Some(0));
    Ok(())
}
