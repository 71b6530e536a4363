use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

use fjord_catalog::{Cabin, DatasetSummary};
use crate::{error::AppError, state::AppState};

#[derive(Debug, Serialize)]
struct SummaryResponse {
    #[serde(flatten)]
    summary: DatasetSummary,
    loaded_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
struct ShipCabinsResponse {
    ship_code: String,
    cabins: Vec<Cabin>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/summary", get(get_summary))
        .route("/v1/ships/{code}/cabins", get(get_ship_cabins))
}

async fn get_summary(State(state): State<AppState>) -> Json<SummaryResponse> {
    Json(SummaryResponse {
        summary: state.resolver.dataset().summary(),
        loaded_at: state.loaded_at,
    })
}

async fn get_ship_cabins(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<ShipCabinsResponse>, AppError> {
    let cabins: Vec<Cabin> = state
        .resolver
        .dataset()
        .cabins_for_ship(&code)
        .into_iter()
        .cloned()
        .collect();

    if cabins.is_empty() {
        return Err(AppError::NotFoundError(format!("No cabins for ship {}", code)));
    }

    Ok(Json(ShipCabinsResponse { ship_code: code, cabins }))
}
