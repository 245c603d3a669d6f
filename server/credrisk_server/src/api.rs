use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, Json, State},
    http::Method,
    response::Html,
    routing::{get, post},
    Router,
};
use credrisk_core::{predict_json, PredictionResult, ServingContext};
use credrisk_encode::schema::training_name;
use credrisk_encode::{FieldKind, INPUT_FIELDS};
use serde::Serialize;
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};

use crate::error::{ApiError, ServerError};

pub type SharedContext = Arc<ServingContext>;

const UI_PAGE: &str = include_str!("../assets/ui.html");

#[derive(Debug, Serialize)]
struct FieldDto {
    name: &'static str,
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    categories: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
struct SchemaResponse {
    fields: Vec<FieldDto>,
    columns: Vec<String>,
    threshold: f64,
    scorer: String,
}

pub fn router(ctx: SharedContext) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/pred", post(predict))
        .route("/schema", get(schema))
        .route("/ui", get(ui))
        .layer(cors)
        .with_state(ctx)
}

pub async fn serve(ctx: SharedContext, addr: SocketAddr) -> Result<(), ServerError> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;
    log::info!("credrisk listening on http://{addr}");
    axum::serve(listener, router(ctx))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServerError::Serve)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    log::info!("shutdown signal received");
}

async fn root() -> Json<Value> {
    Json(json!({ "message": "API is running" }))
}

async fn health() -> &'static str {
    "ok"
}

async fn predict(
    State(ctx): State<SharedContext>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<PredictionResult>, ApiError> {
    let Json(body) = payload.inspect_err(|r| log::warn!("rejected request body: {}", r.body_text()))?;
    let started = Instant::now();
    match predict_json(&ctx, body) {
        Ok(result) => {
            log::info!(
                "prediction class={} probability={:.4} in {}us",
                result.predicted_class.as_u8(),
                result.probability,
                started.elapsed().as_micros()
            );
            Ok(Json(result))
        }
        Err(e) => {
            if e.is_bad_input() {
                log::warn!("rejected record: {e}");
            } else {
                log::error!("scoring failed: {e}");
            }
            Err(e.into())
        }
    }
}

async fn schema(State(ctx): State<SharedContext>) -> Json<SchemaResponse> {
    let encoders = ctx.assembler().encoders();
    let fields = INPUT_FIELDS
        .iter()
        .map(|f| FieldDto {
            name: f.name,
            kind: match f.kind {
                FieldKind::Integer => "integer",
                FieldKind::Float => "float",
                FieldKind::Category => "category",
            },
            categories: match f.kind {
                FieldKind::Category => encoders
                    .get(training_name(f.name))
                    .map(|e| e.categories().to_vec()),
                _ => None,
            },
        })
        .collect();

    Json(SchemaResponse {
        fields,
        columns: ctx.layout().columns().to_vec(),
        threshold: ctx.policy().threshold(),
        scorer: ctx.scorer().backend_name().to_string(),
    })
}

async fn ui() -> Html<&'static str> {
    Html(UI_PAGE)
}
