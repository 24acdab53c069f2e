pub mod climate_data;
pub mod sqlite;

pub use climate_data::*;
pub use sqlite::*;

use serde::{Deserialize, Serialize};
use time::Date;
use utoipa::ToSchema;

// Dates go over the wire as `yyyy-mm-dd`, the same format accepted in paths.
time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

/// Values derived once from the whole `measurement` table.
///
/// Held immutably for the life of the process; building a new
/// [`crate::Climate`] is the only way to recompute it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Summary {
    #[serde(with = "iso_date")]
    #[schema(value_type = String, example = "2010-01-01")]
    pub first_date: Date,
    #[serde(with = "iso_date")]
    #[schema(value_type = String, example = "2017-08-23")]
    pub last_date: Date,
    /// Station with the most rows in `measurement`, ties broken by station id
    pub most_active_station: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct Precipitation {
    #[serde(with = "iso_date")]
    #[schema(value_type = String, example = "2017-08-23")]
    pub date: Date,
    /// Precipitation in inches, absent when the station did not report it
    pub prcp: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct Station {
    #[schema(example = "USC00519281")]
    pub station: String,
    #[schema(example = "WAIHEE 837.5, HI US")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct TemperatureObservation {
    #[serde(with = "iso_date")]
    #[schema(value_type = String, example = "2017-08-23")]
    pub date: Date,
    /// Observed temperature in degrees Fahrenheit
    pub tobs: f64,
}

/// Aggregates over `tobs`. All three are `None` when no rows matched.
#[derive(Debug, Clone, Copy, PartialEq, Default, sqlx::FromRow)]
pub struct TemperatureStats {
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub average: Option<f64>,
}
