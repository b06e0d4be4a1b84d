use std::net::SocketAddr;
use std::str::FromStr;

use anyhow::Result;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use crate::config::Config;
use crate::engine::{calculate_tagged, CalculationError, CalculationResult, SensitivityResult};
use crate::model::{InputBag, ModelKind, OperationalModel};
use crate::report::comparison::build_comparison;
use crate::report::ranking::rank_from_inputs;
use crate::report::{CalculationReport, ComparisonRow, StrategyRanking};

#[derive(Clone)]
struct ApiState {
    config: Config,
}

#[derive(Debug, Serialize)]
struct ApiResponse<T: Serialize> {
    ok: bool,
    data: T,
}

#[derive(Debug, Serialize)]
struct ApiErrorBody {
    ok: bool,
    error: String,
}

#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl From<CalculationError> for ApiError {
    fn from(error: CalculationError) -> Self {
        warn!("rejected calculation: {error}");
        Self::bad_request(error.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ApiErrorBody {
            ok: false,
            error: self.message,
        });
        (self.status, body).into_response()
    }
}

type ApiResult<T> = std::result::Result<Json<ApiResponse<T>>, ApiError>;

#[derive(Debug, Clone, Deserialize)]
struct CalculateRequest {
    model: String,
    solution: String,
    /// Overlaid on the configured defaults.
    #[serde(default)]
    inputs: InputBag,
}

#[derive(Debug, Clone, Deserialize)]
struct RankRequest {
    model: String,
    #[serde(default)]
    inputs: InputBag,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

#[derive(Debug, Serialize)]
struct CompareResponse {
    rows: Vec<ComparisonRow>,
    breakeven: Option<u32>,
}

#[derive(Debug, Serialize)]
struct RankResponse {
    rankings: Vec<StrategyRanking>,
}

pub async fn run_server(config: Config, bind: SocketAddr) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!("cost model API listening on http://{bind}");
    axum::serve(listener, router(config)).await?;
    Ok(())
}

fn router(config: Config) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/v1/calculate", post(calculate))
        .route("/v1/sensitivity", post(sensitivity))
        .route("/v1/compare", post(compare))
        .route("/v1/rank", post(rank))
        .route("/v1/config", get(show_config))
        .layer(cors)
        .with_state(ApiState { config })
}

async fn health() -> Json<ApiResponse<HealthResponse>> {
    ok(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn show_config(State(state): State<ApiState>) -> Json<ApiResponse<Config>> {
    ok(state.config)
}

async fn calculate(
    State(state): State<ApiState>,
    Json(request): Json<CalculateRequest>,
) -> ApiResult<CalculationReport> {
    let result = run_calculation(&state, &request)?;
    Ok(ok(CalculationReport::build(result)))
}

async fn sensitivity(
    State(state): State<ApiState>,
    Json(request): Json<CalculateRequest>,
) -> ApiResult<SensitivityResult> {
    let result = run_calculation(&state, &request)?;
    Ok(ok(result.sensitivity()))
}

async fn compare(
    State(state): State<ApiState>,
    Json(request): Json<CalculateRequest>,
) -> ApiResult<CompareResponse> {
    let result = run_calculation(&state, &request)?;
    Ok(ok(CompareResponse {
        rows: build_comparison(&result),
        breakeven: result.breakeven,
    }))
}

async fn rank(
    State(state): State<ApiState>,
    Json(request): Json<RankRequest>,
) -> ApiResult<RankResponse> {
    let inputs = effective_inputs(&state, &request.inputs);
    let kind = ModelKind::from_str(&request.model).map_err(CalculationError::from)?;
    let model = OperationalModel::from_inputs(kind, &inputs).map_err(CalculationError::from)?;
    model.validate().map_err(CalculationError::from)?;
    Ok(ok(RankResponse {
        rankings: rank_from_inputs(&model, &inputs),
    }))
}

fn ok<T: Serialize>(data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse { ok: true, data })
}

fn effective_inputs(state: &ApiState, request_inputs: &InputBag) -> InputBag {
    let mut inputs = state.config.inputs.clone();
    inputs.merge(request_inputs);
    inputs
}

fn run_calculation(
    state: &ApiState,
    request: &CalculateRequest,
) -> std::result::Result<CalculationResult, ApiError> {
    let inputs = effective_inputs(state, &request.inputs);
    Ok(calculate_tagged(&request.model, &request.solution, &inputs)?)
}
