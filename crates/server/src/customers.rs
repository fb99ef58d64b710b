//! Customer catalog API endpoints

use api_types::trends::TrendsQuery;
use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    ServerError,
    extract::ApiQuery,
    server::ServerState,
    types::customer::{CustomerProfile, FiltersResponse, SpendingGoalsResponse, SpendingTrendsResponse},
};

pub async fn profile(
    State(state): State<ServerState>,
    Path(customer_id): Path<String>,
) -> Result<Json<CustomerProfile>, ServerError> {
    Ok(Json(state.engine.profile(&customer_id)?))
}

pub async fn filters(
    State(state): State<ServerState>,
    Path(customer_id): Path<String>,
) -> Result<Json<FiltersResponse>, ServerError> {
    Ok(Json(state.engine.filters(&customer_id)?))
}

pub async fn goals(
    State(state): State<ServerState>,
    Path(customer_id): Path<String>,
) -> Result<Json<SpendingGoalsResponse>, ServerError> {
    Ok(Json(state.engine.goals(&customer_id)?))
}

pub async fn trends(
    State(state): State<ServerState>,
    Path(customer_id): Path<String>,
    ApiQuery(query): ApiQuery<TrendsQuery>,
) -> Result<Json<SpendingTrendsResponse>, ServerError> {
    Ok(Json(state.engine.trends(&customer_id, query.months)?))
}
