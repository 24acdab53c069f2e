use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use climate::{
    app, build_app_state_with_store, climate_data::Error, ClimateData, DateRange, Precipitation,
    Station, Summary, TemperatureObservation, TemperatureStats,
};
use hyper::{header, Method};
use mockall::mock;
use std::sync::Arc;
use time::macros::date;
use tower::ServiceExt;

mock! {
    pub ClimateAccess {}

    #[async_trait]
    impl ClimateData for ClimateAccess {
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
}

pub struct TestApp {
    pub app: Router,
}

/// Mock store whose summary covers 2010-01-01 through 2017-08-23.
pub fn mock_store() -> MockClimateAccess {
    let mut store = MockClimateAccess::new();
    store
        .expect_summary()
        .times(1)
        .returning(|| Ok(mock_summary()));
    store
}

pub fn mock_summary() -> Summary {
    Summary {
        first_date: date!(2010 - 01 - 01),
        last_date: date!(2017 - 08 - 23),
        most_active_station: "USC00519281".to_string(),
    }
}

pub async fn spawn_app(store: MockClimateAccess) -> TestApp {
    let store: Arc<dyn ClimateData> = Arc::new(store);
    let app_state = build_app_state_with_store(String::from("http://127.0.0.1:5000"), store)
        .await
        .expect("Failed to build app state.");

    TestApp { app: app(app_state) }
}

impl TestApp {
    pub async fn get(&self, uri: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method(Method::GET)
            .uri(uri)
            .header(header::ACCEPT, "application/json")
            .body(Body::empty())
            .unwrap();

        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request.");

        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    pub async fn get_json(&self, uri: &str) -> (StatusCode, serde_json::Value) {
        let (status, body) = self.get(uri).await;
        let json = serde_json::from_str(&body)
            .unwrap_or_else(|e| panic!("response body is not json ({}): {}", e, body));
        (status, json)
    }
}
