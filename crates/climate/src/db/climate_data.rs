use async_trait::async_trait;
use log::{debug, warn};
use time::Date;

use super::{Database, Precipitation, Station, Summary, TemperatureObservation, TemperatureStats};
use crate::DateRange;

pub struct ClimateAccess {
    db: Database,
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Failed to query sqlite: {0}")]
    Query(#[from] sqlx::Error),
    #[error("No observations found in the measurement table")]
    EmptyStore,
}

#[async_trait]
pub trait ClimateData: Sync + Send {
    /// Coverage dates and most active station over the whole data set
    async fn summary(&self) -> Result<Summary, Error>;
    async fn precipitation(&self, range: DateRange) -> Result<Vec<Precipitation>, Error>;
    async fn stations(&self) -> Result<Vec<Station>, Error>;
    async fn temperature_observations(
        &self,
        range: DateRange,
        station_id: String,
    ) -> Result<Vec<TemperatureObservation>, Error>;
    async fn temperature_stats(&self, range: DateRange) -> Result<TemperatureStats, Error>;
}

impl ClimateAccess {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ClimateData for ClimateAccess {
    async fn summary(&self) -> Result<Summary, Error> {
        let (first_date, last_date): (Option<Date>, Option<Date>) =
            sqlx::query_as("SELECT MIN(date), MAX(date) FROM measurement")
                .fetch_one(self.db.pool())
                .await?;

        let (Some(first_date), Some(last_date)) = (first_date, last_date) else {
            return Err(Error::EmptyStore);
        };

        let (most_active_station, observation_count): (String, i64) = sqlx::query_as(
            "SELECT station, COUNT(*) AS observation_count
             FROM measurement
             GROUP BY station
             ORDER BY observation_count DESC, station ASC
             LIMIT 1",
        )
        .fetch_optional(self.db.pool())
        .await?
        .ok_or(Error::EmptyStore)?;
        debug!(
            "most active station {} has {} observations",
            most_active_station, observation_count
        );

        let known: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM station WHERE station = ?")
            .bind(&most_active_station)
            .fetch_one(self.db.pool())
            .await?;
        if known == 0 {
            warn!(
                "most active station {} has no entry in the station table",
                most_active_station
            );
        }

        Ok(Summary {
            first_date,
            last_date,
            most_active_station,
        })
    }

    async fn precipitation(&self, range: DateRange) -> Result<Vec<Precipitation>, Error> {
        let rows = sqlx::query_as::<_, Precipitation>(
            "SELECT date, prcp FROM measurement WHERE date >= ? AND date <= ?",
        )
        .bind(range.start)
        .bind(range.end)
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows)
    }

    async fn stations(&self) -> Result<Vec<Station>, Error> {
        let rows = sqlx::query_as::<_, Station>("SELECT station, name FROM station")
            .fetch_all(self.db.pool())
            .await?;

        Ok(rows)
    }

    async fn temperature_observations(
        &self,
        range: DateRange,
        station_id: String,
    ) -> Result<Vec<TemperatureObservation>, Error> {
        let rows = sqlx::query_as::<_, TemperatureObservation>(
            "SELECT date, tobs FROM measurement
             WHERE date >= ? AND date <= ? AND station = ?",
        )
        .bind(range.start)
        .bind(range.end)
        .bind(station_id)
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows)
    }

    async fn temperature_stats(&self, range: DateRange) -> Result<TemperatureStats, Error> {
        let stats = sqlx::query_as::<_, TemperatureStats>(
            "SELECT MIN(tobs) AS minimum, MAX(tobs) AS maximum, AVG(tobs) AS average
             FROM measurement
             WHERE date >= ? AND date <= ?",
        )
        .bind(range.start)
        .bind(range.end)
        .fetch_one(self.db.pool())
        .await?;

        Ok(stats)
    }
}
