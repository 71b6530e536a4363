use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::info;

use fjord_catalog::Dataset;
use fjord_core::LookupCard;
use crate::{error::AppError, state::AppState};

#[derive(Debug, Deserialize)]
struct LookupQuery {
    #[serde(default)]
    booking_id: String,
}

#[derive(Debug, Serialize)]
pub struct LookupResponse {
    pub booking_id: String,
    pub cards: Vec<LookupCard>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/lookup", get(lookup_booking))
        .route("/v1/lookup/random", get(lookup_random))
}

async fn lookup_booking(
    State(state): State<AppState>,
    Query(query): Query<LookupQuery>,
) -> Json<LookupResponse> {
    let booking_id = query.booking_id.trim().to_string();
    let cards = state.resolver.resolve(&booking_id);
    Json(LookupResponse { booking_id, cards })
}

async fn lookup_random(State(state): State<AppState>) -> Result<Json<LookupResponse>, AppError> {
    let booking_id = random_booking_id(state.resolver.dataset())
        .ok_or_else(|| AppError::NotFoundError("No bookings loaded".to_string()))?;
    info!("Random pick: {}", booking_id);

    let cards = state.resolver.resolve(&booking_id);
    Ok(Json(LookupResponse { booking_id, cards }))
}

fn random_booking_id(dataset: &Dataset) -> Option<String> {
    dataset
        .bookings
        .choose(&mut rand::thread_rng())
        .map(|b| b.booking_id.clone())
}
