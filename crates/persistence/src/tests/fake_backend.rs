// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! A minimal in-process HTTP backend for exercising `RemoteStore`.

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::routing::{delete, get, put};
use axum::{Json, Router};
use serde_json::{Value, json};
use tokio::net::TcpListener;

use super::helpers::{GOOD_TOKEN, create_test_order};

type Rejection = (StatusCode, Json<Value>);

#[derive(Clone)]
struct Backend {
    orders: Value,
}

fn authorize(headers: &HeaderMap) -> Result<(), Rejection> {
    let expected: String = format!("Bearer {GOOD_TOKEN}");
    let presented: Option<&str> = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());
    if presented == Some(expected.as_str()) {
        Ok(())
    } else {
        Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "invalid token" })),
        ))
    }
}

async fn profile(headers: HeaderMap) -> Result<Json<Value>, Rejection> {
    authorize(&headers)?;
    Ok(Json(json!({
        "id": "user-1",
        "name": "Asha Rao",
        "email": "asha@example.com",
        "points": 300,
        "pointsLifetime": 1200
    })))
}

async fn accept(headers: HeaderMap) -> Result<StatusCode, Rejection> {
    authorize(&headers)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_orders(
    headers: HeaderMap,
    State(backend): State<Backend>,
) -> Result<Json<Value>, Rejection> {
    authorize(&headers)?;
    Ok(Json(backend.orders))
}

async fn create_order(headers: HeaderMap) -> Result<Json<Value>, Rejection> {
    authorize(&headers)?;
    Ok(Json(json!({ "orderId": "srv_order_2" })))
}

async fn update_order(
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<StatusCode, Rejection> {
    authorize(&headers)?;
    if id == "srv_order_1" {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err((
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "no such order" })),
        ))
    }
}

async fn cart_object(headers: HeaderMap) -> Result<Json<Value>, Rejection> {
    authorize(&headers)?;
    Ok(Json(json!({ "items": "not-a-list" })))
}

async fn bills_failing(headers: HeaderMap) -> Result<Json<Value>, Rejection> {
    authorize(&headers)?;
    Err((
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "bills table locked" })),
    ))
}

async fn empty_list(headers: HeaderMap) -> Result<Json<Value>, Rejection> {
    authorize(&headers)?;
    Ok(Json(json!([])))
}

async fn create_activity(headers: HeaderMap) -> Result<Json<Value>, Rejection> {
    authorize(&headers)?;
    Ok(Json(json!({ "activityId": "srv_activity_1" })))
}

async fn forbidden(headers: HeaderMap) -> Result<StatusCode, Rejection> {
    authorize(&headers)?;
    Err((
        StatusCode::FORBIDDEN,
        Json(json!({ "error": "read only account" })),
    ))
}

/// Starts the fake backend on an ephemeral port and returns its base URL.
///
/// It holds one stored order with id `srv_order_1`.
pub async fn spawn_backend() -> String {
    let stored = create_test_order(450).with_id("srv_order_1");
    let backend: Backend = Backend {
        orders: json!([serde_json::to_value(&stored).unwrap()]),
    };
    let app: Router = Router::new()
        .route("/user/profile", get(profile).put(accept))
        .route("/orders", get(list_orders).post(create_order))
        .route("/orders/{id}", put(update_order))
        .route("/cart", get(cart_object).post(accept).delete(accept))
        .route("/bills", get(bills_failing).post(forbidden))
        .route("/points/activity", get(empty_list).post(create_activity))
        .route("/user/data", delete(accept))
        .with_state(backend);

    let listener: TcpListener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// Returns a URL on which nothing is listening.
pub async fn unreachable_url() -> String {
    let listener: TcpListener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}
