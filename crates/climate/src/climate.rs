use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use log::{error, info};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::{
    climate_data, ClimateData, DateRange, DateRangeError, Precipitation, Station, Summary,
    TemperatureObservation, TemperatureStats,
};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("{0}")]
    InvalidDateRange(#[from] DateRangeError),
    #[error("{0}")]
    Store(#[from] climate_data::Error),
}

/// JSON body returned for every failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    #[schema(example = "The start date is not valid. Be sure to use the format yyyy-mm-dd.")]
    pub error: String,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            // Range problems are reported as 404 to stay compatible with existing clients
            Error::InvalidDateRange(_) => StatusCode::NOT_FOUND,
            Error::Store(e) => {
                error!("error querying observations: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Read operations over the observation data.
///
/// The summary is computed once when the service is built and never
/// refreshed; construct a new `Climate` to pick up changed data.
pub struct Climate {
    store: Arc<dyn ClimateData>,
    summary: Summary,
}

impl Climate {
    pub async fn new(store: Arc<dyn ClimateData>) -> Result<Self, Error> {
        let summary = store.summary().await?;
        info!(
            "observations cover {} - {}, most active station: {}",
            summary.first_date, summary.last_date, summary.most_active_station
        );

        Ok(Self { store, summary })
    }

    pub fn summary(&self) -> &Summary {
        &self.summary
    }

    /// Window used by the precipitation and temperature listings.
    pub fn trailing_year(&self) -> DateRange {
        DateRange::trailing_year(self.summary.last_date)
    }

    pub async fn list_precipitation(&self) -> Result<Vec<Precipitation>, Error> {
        Ok(self.store.precipitation(self.trailing_year()).await?)
    }

    pub async fn list_stations(&self) -> Result<Vec<Station>, Error> {
        Ok(self.store.stations().await?)
    }

    pub async fn list_most_active_observations(
        &self,
    ) -> Result<Vec<TemperatureObservation>, Error> {
        Ok(self
            .store
            .temperature_observations(
                self.trailing_year(),
                self.summary.most_active_station.clone(),
            )
            .await?)
    }

    /// Validates the raw dates, then aggregates temperatures over the range.
    pub async fn temperature_stats(
        &self,
        start: &str,
        end: Option<&str>,
    ) -> Result<TemperatureStats, Error> {
        let range = DateRange::validate(start, end, &self.summary)?;
        Ok(self.store.temperature_stats(range).await?)
    }
}
