use std::collections::BTreeMap;
use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use fjord_catalog::{Cabin, Excursion, Locale, Port, Ship, VoyageProduct};
use crate::state::AppState;

#[derive(Debug, Serialize)]
struct CollectionResponse<T> {
    total: usize,
    items: Vec<T>,
}

impl<T: Clone> CollectionResponse<T> {
    fn of(items: &[T]) -> Self {
        Self {
            total: items.len(),
            items: items.to_vec(),
        }
    }
}

/// Enough of a booking to label a quick pick
#[derive(Debug, Serialize)]
struct BookingPick {
    booking_id: String,
    status: String,
    ship_code: String,
    sailing_description: String,
}

#[derive(Debug, Serialize)]
struct CabinGroupsResponse {
    total: usize,
    ships: BTreeMap<String, Vec<Cabin>>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/bookings", get(list_bookings))
        .route("/v1/ships", get(list_ships))
        .route("/v1/cabins", get(list_cabins_by_ship))
        .route("/v1/ports", get(list_ports))
        .route("/v1/excursions", get(list_excursions))
        .route("/v1/voyage-products", get(list_voyage_products))
        .route("/v1/locales", get(list_locales))
}

async fn list_bookings(State(state): State<AppState>) -> Json<CollectionResponse<BookingPick>> {
    let items: Vec<BookingPick> = state
        .resolver
        .dataset()
        .bookings
        .iter()
        .map(|b| BookingPick {
            booking_id: b.booking_id.clone(),
            status: b.status.clone(),
            ship_code: b.ship_code.clone(),
            sailing_description: b.sailing_description.clone(),
        })
        .collect();
    Json(CollectionResponse { total: items.len(), items })
}

async fn list_ships(State(state): State<AppState>) -> Json<CollectionResponse<Ship>> {
    Json(CollectionResponse::of(&state.resolver.dataset().ships))
}

async fn list_cabins_by_ship(State(state): State<AppState>) -> Json<CabinGroupsResponse> {
    let dataset = state.resolver.dataset();
    let ships = dataset
        .cabins_by_ship()
        .into_iter()
        .map(|(code, cabins)| (code.to_string(), cabins.into_iter().cloned().collect()))
        .collect();
    Json(CabinGroupsResponse { total: dataset.cabins.len(), ships })
}

async fn list_ports(State(state): State<AppState>) -> Json<CollectionResponse<Port>> {
    Json(CollectionResponse::of(&state.resolver.dataset().ports))
}

async fn list_excursions(State(state): State<AppState>) -> Json<CollectionResponse<Excursion>> {
    Json(CollectionResponse::of(&state.resolver.dataset().excursions))
}

async fn list_voyage_products(
    State(state): State<AppState>,
) -> Json<CollectionResponse<VoyageProduct>> {
    Json(CollectionResponse::of(&state.resolver.dataset().voyage_products))
}

async fn list_locales(State(state): State<AppState>) -> Json<CollectionResponse<Locale>> {
    Json(CollectionResponse::of(&state.resolver.dataset().locales))
}
