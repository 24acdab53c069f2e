use crate::helpers::{mock_store, spawn_app};
use axum::http::StatusCode;
use climate::{
    climate_data::Error, DateRange, Precipitation, Station, TemperatureObservation,
    TemperatureStats,
};
use serde_json::json;
use time::macros::date;

fn trailing_year() -> DateRange {
    DateRange::new(date!(2016 - 08 - 23), date!(2017 - 08 - 23))
}

fn mock_stats() -> TemperatureStats {
    TemperatureStats {
        minimum: Some(58.0),
        maximum: Some(87.0),
        average: Some(74.5),
    }
}

#[tokio::test]
async fn precipitation_covers_trailing_year() {
    let mut store = mock_store();
    store
        .expect_precipitation()
        .withf(|range| *range == trailing_year())
        .times(1)
        .returning(|_| {
            Ok(vec![
                Precipitation {
                    date: date!(2016 - 08 - 23),
                    prcp: Some(0.15),
                },
                Precipitation {
                    date: date!(2017 - 08 - 23),
                    prcp: None,
                },
            ])
        });

    let test_app = spawn_app(store).await;
    let (status, body) = test_app.get_json("/api/v1.0/precipitation").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            {"date": "2016-08-23", "prcp": 0.15},
            {"date": "2017-08-23", "prcp": null}
        ])
    );
}

#[tokio::test]
async fn stations_lists_id_and_name() {
    let mut store = mock_store();
    store.expect_stations().times(1).returning(|| {
        Ok(vec![
            Station {
                station: "USC00519397".to_string(),
                name: "WAIKIKI 717.2, HI US".to_string(),
            },
            Station {
                station: "USC00519281".to_string(),
                name: "WAIHEE 837.5, HI US".to_string(),
            },
        ])
    });

    let test_app = spawn_app(store).await;
    let (status, body) = test_app.get_json("/api/v1.0/stations").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            {"station": "USC00519397", "name": "WAIKIKI 717.2, HI US"},
            {"station": "USC00519281", "name": "WAIHEE 837.5, HI US"}
        ])
    );
}

#[tokio::test]
async fn tobs_queries_most_active_station_over_trailing_year() {
    let mut store = mock_store();
    store
        .expect_temperature_observations()
        .withf(|range, station_id| *range == trailing_year() && station_id == "USC00519281")
        .times(1)
        .returning(|_, _| {
            Ok(vec![TemperatureObservation {
                date: date!(2017 - 08 - 18),
                tobs: 79.0,
            }])
        });

    let test_app = spawn_app(store).await;
    let (status, body) = test_app.get_json("/api/v1.0/tobs").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([{"date": "2017-08-18", "tobs": 79.0}]));
}

#[tokio::test]
async fn stats_from_start_run_through_last_observation() {
    let mut store = mock_store();
    store
        .expect_temperature_stats()
        .withf(|range| *range == DateRange::new(date!(2016 - 08 - 23), date!(2017 - 08 - 23)))
        .times(1)
        .returning(|_| Ok(mock_stats()));

    let test_app = spawn_app(store).await;
    let (status, body) = test_app.get_json("/api/v1.0/2016-08-23").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            {"minimum temperature": 58.0},
            {"maximum temperature": 87.0},
            {"average temperature": 74.5}
        ])
    );
}

#[tokio::test]
async fn omitted_end_matches_explicit_last_date() {
    let mut store = mock_store();
    store
        .expect_temperature_stats()
        .withf(|range| *range == DateRange::new(date!(2016 - 08 - 23), date!(2017 - 08 - 23)))
        .times(2)
        .returning(|_| Ok(mock_stats()));

    let test_app = spawn_app(store).await;
    let implicit = test_app.get_json("/api/v1.0/2016-08-23").await;
    let explicit = test_app.get_json("/api/v1.0/2016-08-23/2017-08-23").await;

    assert_eq!(implicit, explicit);
}

#[tokio::test]
async fn stats_between_dates() {
    let mut store = mock_store();
    store
        .expect_temperature_stats()
        .withf(|range| *range == DateRange::new(date!(2012 - 02 - 28), date!(2012 - 03 - 05)))
        .times(1)
        .returning(|_| Ok(TemperatureStats::default()));

    let test_app = spawn_app(store).await;
    let (status, body) = test_app.get_json("/api/v1.0/2012-02-28/2012-03-05").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            {"minimum temperature": null},
            {"maximum temperature": null},
            {"average temperature": null}
        ])
    );
}

#[tokio::test]
async fn stats_accept_unpadded_month_and_day() {
    let mut store = mock_store();
    store
        .expect_temperature_stats()
        .withf(|range| *range == DateRange::new(date!(2016 - 08 - 23), date!(2017 - 01 - 05)))
        .times(1)
        .returning(|_| Ok(mock_stats()));

    let test_app = spawn_app(store).await;
    let (status, _) = test_app.get_json("/api/v1.0/2016-8-23/2017-1-5").await;

    assert_eq!(status, StatusCode::OK);
}

async fn assert_rejected(uri: &str, message: &str) {
    let mut store = mock_store();
    store.expect_temperature_stats().never();

    let test_app = spawn_app(store).await;
    let (status, body) = test_app.get_json(uri).await;

    assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
    assert_eq!(body, json!({ "error": message }), "{uri}");
}

#[tokio::test]
async fn malformed_start_is_not_found() {
    let message = "The start date is not valid. Be sure to use the format yyyy-mm-dd.";
    assert_rejected("/api/v1.0/Aug%2023%202016", message).await;
    assert_rejected("/api/v1.0/+2016-08-23", message).await;
    assert_rejected("/api/v1.0/not-a-date/also-not-a-date", message).await;
}

#[tokio::test]
async fn start_before_first_observation_is_not_found() {
    assert_rejected(
        "/api/v1.0/2005-01-01",
        "The start date is before the first temperature observation on 2010-01-01.",
    )
    .await;
}

#[tokio::test]
async fn malformed_end_is_not_found() {
    assert_rejected(
        "/api/v1.0/2016-08-23/23-08-2017",
        "The end date is not valid. Be sure to use the format yyyy-mm-dd.",
    )
    .await;
}

#[tokio::test]
async fn end_after_last_observation_is_not_found() {
    assert_rejected(
        "/api/v1.0/2016-08-23/2018-01-01",
        "The end date is after the last temperature observation on 2017-08-23.",
    )
    .await;
}

#[tokio::test]
async fn inverted_range_is_not_found() {
    assert_rejected(
        "/api/v1.0/2017-01-01/2016-01-01",
        "The start date is after the end date. Please enter a valid date range.",
    )
    .await;
}

#[tokio::test]
async fn store_failure_is_internal_error() {
    let mut store = mock_store();
    store
        .expect_stations()
        .times(1)
        .returning(|| Err(Error::Query(sqlx::Error::PoolTimedOut)));

    let test_app = spawn_app(store).await;
    let (status, body) = test_app.get_json("/api/v1.0/stations").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("sqlite"));
}
