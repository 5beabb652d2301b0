mod common;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use common::{memory_state, memory_state_with};
use rental_backend::{router, ListFailurePolicy, Settings};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn app() -> Router {
    router(memory_state().await)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let body = match body {
        Some(v) => Body::from(v.to_string()),
        None => Body::empty(),
    };
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body)
        .expect("request");
    let resp = app.clone().oneshot(req).await.expect("response");
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.expect("body");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

fn falsa_123() -> Value {
    json!({
        "direccion": "Calle Falsa 123",
        "ciudad": "Madrid",
        "pais": "España",
        "codigo_postal": "28001",
        "superficie": 85.5,
        "habitaciones": 2,
        "baños": 1,
        "precio": 1200,
        "estado": "disponible",
        "descripcion": "Nuevo",
        "propietario_id": 1
    })
}

#[tokio::test]
async fn apartment_lifecycle_over_http() {
    let app = app().await;

    let (status, body) = send(&app, Method::POST, "/apartamentos/add", Some(falsa_123())).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["data"]["id"].as_i64().expect("id");
    assert_eq!(body["data"]["baños"], json!(1));

    let (status, body) = send(&app, Method::GET, "/apartamentos?ciudad=Madrid", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["count"], json!(1));
    assert_eq!(body["data"][0]["direccion"], json!("Calle Falsa 123"));

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/apartamentos/{}", id),
        Some(json!({ "precio": 1300, "estado": "reservado" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["changed"], json!(true));
    assert_eq!(body["data"]["precio"], json!(1300.0));
    assert_eq!(body["data"]["ciudad"], json!("Madrid"));

    let (_, body) = send(&app, Method::GET, "/apartamentos?ba%C3%B1os=1&estado=reservado", None).await;
    assert_eq!(body["meta"]["count"], json!(1));

    let (status, _) = send(&app, Method::DELETE, &format!("/apartamentos/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    let (_, body) = send(&app, Method::GET, "/apartamentos?ciudad=Madrid", None).await;
    assert_eq!(body["data"], json!([]));
    let (status, body) = send(&app, Method::DELETE, &format!("/apartamentos/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], json!("not_found"));
}

#[tokio::test]
async fn validation_failures_use_the_error_envelope() {
    let app = app().await;

    let mut free = falsa_123();
    free["precio"] = json!(0);
    let (status, body) = send(&app, Method::POST, "/apartamentos/add", Some(free)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], json!("validation_error"));
    assert_eq!(body["error"]["details"]["field"], json!("precio"));

    let mut unknown = falsa_123();
    unknown["estado"] = json!("demolido");
    let (status, body) = send(&app, Method::POST, "/apartamentos/add", Some(unknown)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["details"]["field"], json!("estado"));

    let (_, body) = send(&app, Method::GET, "/apartamentos", None).await;
    assert_eq!(body["meta"]["count"], json!(0));
}

#[tokio::test]
async fn malformed_input_is_a_bad_request() {
    let app = app().await;

    let req = Request::builder()
        .method(Method::POST)
        .uri("/apartamentos/add")
        .header("content-type", "application/json")
        .body(Body::from("{\"direccion\": "))
        .expect("request");
    let resp = app.clone().oneshot(req).await.expect("response");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, Method::POST, "/apartamentos/add", Some(json!({ "ciudad": "Madrid" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], json!("bad_request"));

    let (status, _) = send(&app, Method::GET, "/apartamentos/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = send(&app, Method::GET, "/apartamentos?precio=barato", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = send(&app, Method::GET, "/apartamentos/0", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn reservations_over_http() {
    let app = app().await;
    let (_, body) = send(&app, Method::POST, "/apartamentos/add", Some(falsa_123())).await;
    let apartment_id = body["data"]["id"].as_i64().expect("id");

    let reservation = json!({
        "apartamento_id": apartment_id,
        "usuario_id": 7,
        "fecha_inicio": "2024-06-01",
        "fecha_fin": "2024-06-15"
    });
    let (status, body) = send(&app, Method::POST, "/reservas/add", Some(reservation.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["estado"], json!("pendiente"));
    let id = body["data"]["id"].as_i64().expect("id");

    let (status, body) = send(&app, Method::POST, "/reservas/add", Some(reservation)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["details"]["field"], json!("apartamento_id"));

    let (status, _) = send(
        &app,
        Method::POST,
        "/reservas/add",
        Some(json!({ "apartamento_id": 999, "usuario_id": 7, "fecha_inicio": "a", "fecha_fin": "b" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = send(&app, Method::GET, &format!("/reservas?usuario_id=7&apartamento_id={}", apartment_id), None).await;
    assert_eq!(body["meta"]["count"], json!(1));

    let (status, body) = send(&app, Method::PUT, &format!("/reservas/{}", id), Some(json!({ "estado": "confirmado" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["estado"], json!("confirmado"));

    let (status, body) = send(&app, Method::PUT, &format!("/reservas/{}", id), Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["changed"], json!(false));

    let (status, _) = send(&app, Method::GET, &format!("/reservas/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, Method::DELETE, &format!("/reservas/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, Method::GET, &format!("/reservas/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn images_over_http() {
    let app = app().await;
    let (_, body) = send(&app, Method::POST, "/apartamentos/add", Some(falsa_123())).await;
    let apartment_id = body["data"]["id"].as_i64().expect("id");
    let base = format!("/apartamentos/{}/imagenes", apartment_id);
    let image = json!({ "imagen": "data:image/png;base64,iVBORw0KGgo=", "descripcion": "Fachada" });

    let (status, body) = send(&app, Method::POST, &base, Some(image.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    let image_id = body["data"]["id"].as_i64().expect("id");

    let (status, body) = send(&app, Method::POST, &base, Some(image)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["duplicate"], json!(true));
    assert_eq!(body["data"]["id"], json!(image_id));

    let (_, body) = send(&app, Method::GET, &base, None).await;
    assert_eq!(body["meta"]["count"], json!(1));

    let (status, _) = send(&app, Method::GET, &format!("{}/{}", base, image_id), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, Method::GET, "/apartamentos/999/imagenes", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, Method::POST, &base, Some(json!({ "descripcion": "sin imagen" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["details"]["field"], json!("imagen"));

    let (status, _) = send(&app, Method::DELETE, &format!("{}/{}", base, image_id), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, Method::DELETE, &format!("{}/{}", base, image_id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn ambient_routes() {
    let app = app().await;

    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("ok"));

    let (status, body) = send(&app, Method::GET, "/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["database"], json!("ok"));

    let (_, body) = send(&app, Method::GET, "/version", None).await;
    assert_eq!(body["name"], json!("rental-backend"));

    let (status, body) = send(&app, Method::GET, "/catalog/estados", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["apartment"]["default"], json!("disponible"));
    assert_eq!(body["data"]["reservation"]["active"], json!(["pendiente", "confirmado"]));

    let (status, body) = send(&app, Method::GET, "/nowhere", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], json!("not_found"));
}

#[tokio::test]
async fn oversized_bodies_get_the_error_envelope() {
    let settings = Settings {
        max_body_bytes: 1024,
        list_failure_policy: ListFailurePolicy::Strict,
        ..Settings::default()
    };
    let app = router(memory_state_with(settings).await);
    let (_, body) = send(&app, Method::POST, "/apartamentos/add", Some(falsa_123())).await;
    let uri = format!("/apartamentos/{}/imagenes", body["data"]["id"]);
    let image = json!({ "imagen": "a".repeat(4096), "descripcion": "grande" }).to_string();

    // Declared length over the limit: refused before any handler runs.
    let req = Request::builder()
        .method(Method::POST)
        .uri(&uri)
        .header("content-type", "application/json")
        .header("content-length", image.len().to_string())
        .body(Body::from(image.clone()))
        .expect("request");
    let resp = app.clone().oneshot(req).await.expect("response");
    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.expect("body");
    let body: Value = serde_json::from_slice(&bytes).expect("json envelope");
    assert_eq!(body["error"]["code"], json!("payload_too_large"));

    // No declared length: the limit trips while the body is read.
    let (status, body) = send(&app, Method::POST, &uri, Some(serde_json::from_str(&image).expect("json"))).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["error"]["code"], json!("payload_too_large"));
}
