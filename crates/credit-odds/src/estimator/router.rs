use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::domain::{AnswerSet, FactorKey, ProductType};
use super::rules::{rule_table, RuleTable};
use super::session::{QuestionnaireService, SessionId, SessionRepository, SessionView};
use super::ApprovalEstimate;
use crate::error::AppError;

type SharedService<R> = Arc<QuestionnaireService<R>>;

/// Router builder exposing the product catalogue, one-shot estimates and
/// questionnaire sessions.
pub fn estimator_router<R>(service: SharedService<R>) -> Router
where
    R: SessionRepository + 'static,
{
    Router::new()
        .route("/api/v1/products", get(products_handler))
        .route("/api/v1/products/:product/factors", get(factors_handler))
        .route("/api/v1/estimates", post(estimate_handler::<R>))
        .route("/api/v1/sessions", post(create_session_handler::<R>))
        .route(
            "/api/v1/sessions/:session_id",
            get(session_handler::<R>).delete(discard_session_handler::<R>),
        )
        .route(
            "/api/v1/sessions/:session_id/product",
            post(select_product_handler::<R>),
        )
        .route("/api/v1/sessions/:session_id/answer", post(answer_handler::<R>))
        .route("/api/v1/sessions/:session_id/next", post(next_handler::<R>))
        .route("/api/v1/sessions/:session_id/back", post(back_handler::<R>))
        .route(
            "/api/v1/sessions/:session_id/restart",
            post(restart_handler::<R>),
        )
        .with_state(service)
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductSummary {
    pub key: &'static str,
    pub label: &'static str,
    pub factor_count: usize,
    pub max_points: u32,
}

#[derive(Debug, Deserialize)]
pub struct EstimateRequest {
    pub product: String,
    #[serde(default)]
    pub answers: BTreeMap<String, String>,
}

#[derive(Debug, Serialize)]
pub struct EstimateResponse {
    #[serde(flatten)]
    pub estimate: ApprovalEstimate,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ignored_answers: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateSessionRequest {
    #[serde(default)]
    pub product: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SelectProductRequest {
    pub product: String,
}

#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    pub value: String,
}

pub(crate) async fn products_handler() -> Json<Vec<ProductSummary>> {
    let products = ProductType::ordered()
        .into_iter()
        .map(|product| {
            let table = RuleTable::for_product(product);
            ProductSummary {
                key: product.key(),
                label: product.label(),
                factor_count: table.len(),
                max_points: table.max_points(),
            }
        })
        .collect();
    Json(products)
}

pub(crate) async fn factors_handler(Path(product): Path<String>) -> Json<&'static RuleTable> {
    Json(rule_table(&product))
}

pub(crate) async fn estimate_handler<R>(
    State(service): State<SharedService<R>>,
    Json(request): Json<EstimateRequest>,
) -> Json<EstimateResponse>
where
    R: SessionRepository + 'static,
{
    let mut answers = AnswerSet::new();
    let mut ignored_answers = Vec::new();
    for (key, value) in request.answers {
        match key.parse::<FactorKey>() {
            Ok(factor) => answers.record(factor, value),
            Err(_) => ignored_answers.push(key),
        }
    }

    let estimate = service.estimate(&request.product, &answers);
    Json(EstimateResponse {
        estimate,
        ignored_answers,
    })
}

pub(crate) async fn create_session_handler<R>(
    State(service): State<SharedService<R>>,
    request: Option<Json<CreateSessionRequest>>,
) -> Result<(StatusCode, Json<SessionView>), AppError>
where
    R: SessionRepository + 'static,
{
    let request = request.map(|Json(request)| request).unwrap_or_default();
    let view = service.start(request.product.as_deref())?;
    Ok((StatusCode::CREATED, Json(view)))
}

pub(crate) async fn session_handler<R>(
    State(service): State<SharedService<R>>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionView>, AppError>
where
    R: SessionRepository + 'static,
{
    Ok(Json(service.get(&SessionId(session_id))?))
}

pub(crate) async fn discard_session_handler<R>(
    State(service): State<SharedService<R>>,
    Path(session_id): Path<String>,
) -> Result<StatusCode, AppError>
where
    R: SessionRepository + 'static,
{
    service.discard(&SessionId(session_id))?;
    Ok(StatusCode::NO_CONTENT)
}

pub(crate) async fn select_product_handler<R>(
    State(service): State<SharedService<R>>,
    Path(session_id): Path<String>,
    Json(request): Json<SelectProductRequest>,
) -> Result<Json<SessionView>, AppError>
where
    R: SessionRepository + 'static,
{
    let view = service.select_product(&SessionId(session_id), &request.product)?;
    Ok(Json(view))
}

pub(crate) async fn answer_handler<R>(
    State(service): State<SharedService<R>>,
    Path(session_id): Path<String>,
    Json(request): Json<AnswerRequest>,
) -> Result<Json<SessionView>, AppError>
where
    R: SessionRepository + 'static,
{
    let view = service.answer(&SessionId(session_id), &request.value)?;
    Ok(Json(view))
}

pub(crate) async fn next_handler<R>(
    State(service): State<SharedService<R>>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionView>, AppError>
where
    R: SessionRepository + 'static,
{
    Ok(Json(service.next(&SessionId(session_id))?))
}

pub(crate) async fn back_handler<R>(
    State(service): State<SharedService<R>>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionView>, AppError>
where
    R: SessionRepository + 'static,
{
    Ok(Json(service.back(&SessionId(session_id))?))
}

pub(crate) async fn restart_handler<R>(
    State(service): State<SharedService<R>>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionView>, AppError>
where
    R: SessionRepository + 'static,
{
    Ok(Json(service.restart(&SessionId(session_id))?))
}
