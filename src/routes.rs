use std::{num::NonZeroU64, sync::Arc};

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    routing::get,
};
use serde_json::{Map, Value};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    AppState,
    error::{AppError, AppResult},
    models::{ApiMessage, Movie},
    sample,
    validator::{validate_full, validate_partial},
};

type Body = Result<Json<Map<String, Value>>, JsonRejection>;

pub fn router(state: Arc<AppState>) -> Router {
    let mut router = Router::new()
        .route("/v1/movies", get(index).post(add))
        .route("/v1/movies/{id}", get(page).put(update).patch(patch).delete(remove))
        .route("/v1/movies/{id}/sort/{field}", get(sorted_page));

    if state.config.enable_sample_data {
        router = router.route("/v1/movies/fill-with-sample-data", get(fill_with_sample_data));
    }

    router
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .with_state(state)
        .layer(CorsLayer::new().allow_origin(Any).allow_headers(Any).allow_methods(Any))
        .layer(TraceLayer::new_for_http())
}

pub async fn index(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<Movie>>> {
    Ok(Json(state.movies.find_all().await?))
}

pub async fn add(State(state): State<Arc<AppState>>, body: Body) -> AppResult<Json<ApiMessage>> {
    let record = validate_full(&json_body(body)?)?;
    let id = state.movies.insert(&record).await?;
    Ok(Json(ApiMessage::new(200, "Movie has been added").with_id(id)))
}

pub async fn page(
    State(state): State<Arc<AppState>>,
    Path(limit): Path<String>,
) -> AppResult<Json<Vec<Movie>>> {
    let limit = parse_limit(&limit)?;
    Ok(Json(state.movies.find_by_limit(limit).await?))
}

pub async fn sorted_page(
    State(state): State<Arc<AppState>>,
    Path((limit, field)): Path<(String, String)>,
) -> AppResult<Json<Vec<Movie>>> {
    let limit = parse_limit(&limit)?;
    Ok(Json(state.movies.find_by_limit_sorted(limit, &field).await?))
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Body,
) -> AppResult<Json<ApiMessage>> {
    let id = parse_id(&id)?;
    let record = validate_full(&json_body(body)?)?;
    let message = if state.movies.update(id, &record).await? {
        "Movie has been updated."
    } else {
        "Movie was not modified."
    };
    Ok(Json(ApiMessage::new(200, message)))
}

pub async fn patch(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Body,
) -> AppResult<Json<ApiMessage>> {
    let id = parse_id(&id)?;
    let fields = validate_partial(&json_body(body)?)?;
    let message = if state.movies.patch(id, &fields).await? {
        "Movie has been updated."
    } else {
        "Movie was not modified."
    };
    Ok(Json(ApiMessage::new(200, message)))
}

pub async fn remove(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiMessage>> {
    let id = parse_id(&id)?;
    state.movies.delete(id).await?;
    Ok(Json(ApiMessage::new(200, "Movie has been deleted.")))
}

pub async fn fill_with_sample_data(
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<ApiMessage>> {
    sample::insert_sample_data(state.movies.as_ref()).await?;
    Ok(Json(ApiMessage::new(200, "fake data has been inserted")))
}

async fn not_found() -> AppError {
    AppError::RouteNotFound
}

async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

fn json_body(body: Body) -> AppResult<Map<String, Value>> {
    body.map(|Json(map)| map).map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

// Path segments behave like a `[0-9]+` route constraint: anything else is 404.
fn digits(raw: &str) -> AppResult<&str> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AppError::RouteNotFound);
    }
    Ok(raw)
}

fn parse_id(raw: &str) -> AppResult<i32> {
    digits(raw)?.parse().map_err(|_| AppError::RouteNotFound)
}

// SQLite binds LIMIT as a signed 64-bit integer.
fn parse_limit(raw: &str) -> AppResult<NonZeroU64> {
    digits(raw)?
        .parse::<i64>()
        .ok()
        .and_then(|n| u64::try_from(n).ok())
        .and_then(NonZeroU64::new)
        .ok_or_else(|| AppError::BadRequest("limit must be a positive integer".to_string()))
}
