use super::*;
use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use shared::protocol::{OptionsCatalog, PredictErrorBody, PredictionResponse};
use tokio::net::TcpListener;

fn sample_catalog() -> OptionsCatalog {
    OptionsCatalog {
        makes: vec!["mazda".to_string(), "toyota".to_string()],
        conditions: vec!["brand_new".to_string(), "foreign_used".to_string()],
        models: vec!["mazda_cx5".to_string(), "corolla".to_string()],
        model_make_mapping: HashMap::from([
            ("mazda_cx5".to_string(), vec!["mazda".to_string()]),
            ("corolla".to_string(), vec!["toyota".to_string()]),
        ]),
    }
}

async fn spawn_server(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve");
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn fetch_options_returns_catalog() {
    let router = Router::new().route(
        "/api/options",
        get(|| async { Json(sample_catalog()) }),
    );
    let base_url = spawn_server(router).await;

    let client = PredictorClient::new(&base_url).expect("client");
    let catalog = client.fetch_options().await.expect("catalog");

    assert_eq!(catalog.makes, vec!["mazda", "toyota"]);
    assert_eq!(catalog.makes_for_model("mazda_cx5"), ["mazda"]);
}

#[tokio::test]
async fn fetch_options_rejects_server_error() {
    let router = Router::new().route(
        "/api/options",
        get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
    );
    let base_url = spawn_server(router).await;

    let client = PredictorClient::new(&base_url).expect("client");
    let err = client.fetch_options().await.expect_err("should fail");
    assert!(matches!(err, ClientError::Http(_)));
}

#[tokio::test]
async fn predict_returns_price_and_sends_backend_column_names() {
    let seen_body: Arc<tokio::sync::Mutex<Option<serde_json::Value>>> =
        Arc::new(tokio::sync::Mutex::new(None));
    let router = Router::new()
        .route(
            "/api/predict",
            post(
                |State(seen): State<Arc<tokio::sync::Mutex<Option<serde_json::Value>>>>,
                 Json(body): Json<serde_json::Value>| async move {
                    *seen.lock().await = Some(body);
                    Json(PredictionResponse {
                        predicted_price: 1_500_000.0,
                    })
                },
            ),
        )
        .with_state(seen_body.clone());
    let base_url = spawn_server(router).await;

    let mut session = FormSession::default();
    session.set_catalog(sample_catalog());
    session.select_make("toyota".to_string());
    session.model = "corolla".to_string();
    session.condition = "foreign_used".to_string();
    session.age = "3".to_string();
    session.engine_size = "1.8".to_string();
    session.horse_power = "140".to_string();
    let request = session.build_request().expect("valid form");

    let client = PredictorClient::new(&base_url).expect("client");
    let price = client.predict(&request).await.expect("price");
    assert_eq!(price, 1_500_000.0);

    let body = seen_body.lock().await.take().expect("request body");
    assert_eq!(body["Make"], "toyota");
    assert_eq!(body["Engine Size"], 1.8);
    assert_eq!(body["Horse Power"], 140.0);
}

#[tokio::test]
async fn predict_surfaces_server_error_body() {
    let router = Router::new().route(
        "/api/predict",
        post(|| async {
            (
                StatusCode::BAD_REQUEST,
                Json(PredictErrorBody {
                    error: "bad input".to_string(),
                }),
            )
        }),
    );
    let base_url = spawn_server(router).await;

    let client = PredictorClient::new(&base_url).expect("client");
    let request = sample_request();
    let err = client.predict(&request).await.expect_err("should fail");
    match err {
        ClientError::Api { message } => assert_eq!(message, "bad input"),
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn predict_without_error_body_reports_status() {
    let router = Router::new().route(
        "/api/predict",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let base_url = spawn_server(router).await;

    let client = PredictorClient::new(&base_url).expect("client");
    let err = client
        .predict(&sample_request())
        .await
        .expect_err("should fail");
    assert!(matches!(
        err,
        ClientError::UnexpectedStatus(StatusCode::INTERNAL_SERVER_ERROR)
    ));
}

#[tokio::test]
async fn invalid_form_never_reaches_the_predict_endpoint() {
    let hits = Arc::new(AtomicUsize::new(0));
    let router = Router::new()
        .route(
            "/api/predict",
            post(|State(hits): State<Arc<AtomicUsize>>| async move {
                hits.fetch_add(1, Ordering::SeqCst);
                Json(PredictionResponse {
                    predicted_price: 1.0,
                })
            }),
        )
        .with_state(hits.clone());
    let base_url = spawn_server(router).await;
    let client = PredictorClient::new(&base_url).expect("client");

    let mut session = FormSession::default();
    session.set_catalog(sample_catalog());
    session.select_make("mazda".to_string());
    session.model = "mazda_cx5".to_string();
    session.condition = "brand_new".to_string();
    session.age = "0".to_string();
    session.engine_size = "2.5".to_string();
    session.horse_power = "187".to_string();

    match session.build_request() {
        Err(err) => {
            assert_eq!(err, shared::error::ValidationError::NonPositiveNumeric);
            assert_eq!(err.to_string(), "Please enter valid numeric values");
        }
        Ok(request) => {
            // Only a valid form may produce traffic.
            let _ = client.predict(&request).await;
            panic!("age of zero must not validate");
        }
    }
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

fn sample_request() -> shared::protocol::PredictionRequest {
    shared::protocol::PredictionRequest {
        make: "toyota".to_string(),
        model: "corolla".to_string(),
        condition: "foreign_used".to_string(),
        age: 3.0,
        engine_size: 1.8,
        horse_power: 140.0,
    }
}

#[test]
fn selecting_a_make_filters_models_to_its_mapping() {
    let mut session = FormSession::default();
    session.set_catalog(OptionsCatalog {
        makes: vec!["mazda".to_string()],
        conditions: Vec::new(),
        models: vec!["mazda_cx5".to_string()],
        model_make_mapping: HashMap::from([(
            "mazda_cx5".to_string(),
            vec!["mazda".to_string()],
        )]),
    });

    session.select_make("mazda".to_string());
    assert_eq!(
        session.visible_models(),
        ModelListing::Models(vec!["mazda_cx5".to_string()])
    );
}

#[test]
fn make_with_no_mapped_models_yields_placeholder_state() {
    let mut session = FormSession::default();
    session.set_catalog(sample_catalog());

    session.select_make("mazda".to_string());
    session.model = "mazda_cx5".to_string();
    session.select_make("nonexistent".to_string());

    assert_eq!(session.visible_models(), ModelListing::NoModelsForMake);
    assert!(session.model.is_empty(), "stale model must be cleared");
}

#[test]
fn model_survives_make_change_only_while_valid() {
    let mut session = FormSession::default();
    session.set_catalog(sample_catalog());
    session.model = "corolla".to_string();

    session.select_make("toyota".to_string());
    assert_eq!(session.model, "corolla");

    session.select_make("mazda".to_string());
    assert!(session.model.is_empty());
}

#[test]
fn clearing_the_make_restores_the_full_model_list() {
    let mut session = FormSession::default();
    session.set_catalog(sample_catalog());
    session.select_make("mazda".to_string());

    session.select_make(String::new());
    assert_eq!(
        session.visible_models(),
        ModelListing::Models(vec!["mazda_cx5".to_string(), "corolla".to_string()])
    );
}

#[test]
fn set_catalog_drops_selections_the_catalog_no_longer_offers() {
    let mut session = FormSession::default();
    session.set_catalog(sample_catalog());
    session.select_make("toyota".to_string());
    session.model = "corolla".to_string();
    session.condition = "brand_new".to_string();

    session.set_catalog(OptionsCatalog {
        makes: vec!["mazda".to_string()],
        conditions: vec!["brand_new".to_string()],
        models: vec!["mazda_cx5".to_string()],
        model_make_mapping: HashMap::from([(
            "mazda_cx5".to_string(),
            vec!["mazda".to_string()],
        )]),
    });

    assert!(session.make.is_empty());
    assert!(session.model.is_empty());
    assert_eq!(session.condition, "brand_new");
}

#[test]
fn missing_selections_are_rejected_before_numerics() {
    let mut session = FormSession::default();
    session.set_catalog(sample_catalog());
    session.age = "3".to_string();
    session.engine_size = "1.8".to_string();
    session.horse_power = "140".to_string();

    assert_eq!(
        session.build_request(),
        Err(shared::error::ValidationError::MissingSelection)
    );
}

#[test]
fn unparseable_numeric_text_counts_as_non_positive() {
    let mut session = FormSession::default();
    session.set_catalog(sample_catalog());
    session.select_make("toyota".to_string());
    session.model = "corolla".to_string();
    session.condition = "foreign_used".to_string();
    session.age = "three".to_string();
    session.engine_size = "1.8".to_string();
    session.horse_power = "140".to_string();

    assert_eq!(
        session.build_request(),
        Err(shared::error::ValidationError::NonPositiveNumeric)
    );
}

#[test]
fn valid_form_builds_the_wire_request() {
    let mut session = FormSession::default();
    session.set_catalog(sample_catalog());
    session.select_make("toyota".to_string());
    session.model = "corolla".to_string();
    session.condition = "foreign_used".to_string();
    session.age = "3".to_string();
    session.engine_size = "1.8".to_string();
    session.horse_power = "140".to_string();

    let request = session.build_request().expect("valid form");
    assert_eq!(request.make, "toyota");
    assert_eq!(request.age, 3.0);
    assert_eq!(request.engine_size, 1.8);
    assert_eq!(request.horse_power, 140.0);
}
