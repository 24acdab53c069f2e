use axum::{
    extract::{Path, State},
    Json,
};
use log::info;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::{
    climate::{Error, ErrorBody},
    AppState, Precipitation, Station, TemperatureObservation, TemperatureStats,
};

/// One entry of the temperature statistics list.
///
/// The list is serialized as three single-key objects, e.g.
/// `[{"minimum temperature": 56.0}, {"maximum temperature": 87.0}, {"average temperature": 74.6}]`.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(untagged)]
pub enum TemperatureStat {
    Minimum {
        #[serde(rename = "minimum temperature")]
        minimum: Option<f64>,
    },
    Maximum {
        #[serde(rename = "maximum temperature")]
        maximum: Option<f64>,
    },
    Average {
        #[serde(rename = "average temperature")]
        average: Option<f64>,
    },
}

impl TemperatureStat {
    pub fn list(stats: TemperatureStats) -> Vec<TemperatureStat> {
        vec![
            TemperatureStat::Minimum {
                minimum: stats.minimum,
            },
            TemperatureStat::Maximum {
                maximum: stats.maximum,
            },
            TemperatureStat::Average {
                average: stats.average,
            },
        ]
    }
}

#[utoipa::path(
    get,
    path = "/api/v1.0/precipitation",
    responses(
        (status = OK, description = "Precipitation for the last 12 months of observations", content_type = "application/json", body = Vec<Precipitation>),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to query observations", body = ErrorBody)
    ))]
pub async fn precipitation(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Precipitation>>, Error> {
    info!("Server request for precipitation data");
    let rows = state.climate.list_precipitation().await?;
    Ok(Json(rows))
}

#[utoipa::path(
    get,
    path = "/api/v1.0/stations",
    responses(
        (status = OK, description = "Every weather station", content_type = "application/json", body = Vec<Station>),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to query stations", body = ErrorBody)
    ))]
pub async fn stations(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Station>>, Error> {
    info!("Server request for list of stations");
    let rows = state.climate.list_stations().await?;
    Ok(Json(rows))
}

#[utoipa::path(
    get,
    path = "/api/v1.0/tobs",
    responses(
        (status = OK, description = "Temperature observations of the most active station for the last 12 months", content_type = "application/json", body = Vec<TemperatureObservation>),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to query observations", body = ErrorBody)
    ))]
pub async fn tobs(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<TemperatureObservation>>, Error> {
    info!(
        "Server request for temperature data of most active station {}",
        state.climate.summary().most_active_station
    );
    let rows = state.climate.list_most_active_observations().await?;
    Ok(Json(rows))
}

#[utoipa::path(
    get,
    path = "/api/v1.0/{start}",
    params(
        ("start" = String, Path, description = "First day of the range, yyyy-mm-dd"),
    ),
    responses(
        (status = OK, description = "Minimum, maximum and average temperature from the start date through the last observation", content_type = "application/json", body = Vec<TemperatureStat>),
        (status = NOT_FOUND, description = "Invalid date or date range", body = ErrorBody),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to query observations", body = ErrorBody)
    ))]
pub async fn temperature_stats_from(
    State(state): State<Arc<AppState>>,
    Path(start): Path<String>,
) -> Result<Json<Vec<TemperatureStat>>, Error> {
    temperature_stats(&state, start, None).await
}

#[utoipa::path(
    get,
    path = "/api/v1.0/{start}/{end}",
    params(
        ("start" = String, Path, description = "First day of the range, yyyy-mm-dd"),
        ("end" = String, Path, description = "Last day of the range, yyyy-mm-dd"),
    ),
    responses(
        (status = OK, description = "Minimum, maximum and average temperature between the two dates", content_type = "application/json", body = Vec<TemperatureStat>),
        (status = NOT_FOUND, description = "Invalid date or date range", body = ErrorBody),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to query observations", body = ErrorBody)
    ))]
pub async fn temperature_stats_between(
    State(state): State<Arc<AppState>>,
    Path((start, end)): Path<(String, String)>,
) -> Result<Json<Vec<TemperatureStat>>, Error> {
    temperature_stats(&state, start, Some(end)).await
}

async fn temperature_stats(
    state: &AppState,
    start: String,
    end: Option<String>,
) -> Result<Json<Vec<TemperatureStat>>, Error> {
    info!(
        "Server request for temperature stats, start: {} end: {}",
        start,
        end.as_deref().unwrap_or("(last observation)")
    );
    let stats = state
        .climate
        .temperature_stats(&start, end.as_deref())
        .await?;
    Ok(Json(TemperatureStat::list(stats)))
}
