use crate::{
    climate::{self, Climate},
    db, index_handler, precipitation, routes, stations, temperature_stats_between,
    temperature_stats_from, tobs, ClimateAccess, ClimateData, Database,
};
use anyhow::anyhow;
use axum::{
    body::Body,
    extract::Request,
    middleware::{self, Next},
    response::IntoResponse,
    routing::get,
    Router,
};
use hyper::{
    header::{ACCEPT, CONTENT_TYPE},
    Method,
};
use log::info;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

#[derive(Clone)]
pub struct AppState {
    pub remote_url: String,
    pub climate: Arc<Climate>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::api::climate_routes::precipitation,
        routes::api::climate_routes::stations,
        routes::api::climate_routes::tobs,
        routes::api::climate_routes::temperature_stats_from,
        routes::api::climate_routes::temperature_stats_between,
    ),
    components(
        schemas(
                climate::ErrorBody,
                db::Precipitation,
                db::Station,
                db::TemperatureObservation,
                routes::api::climate_routes::TemperatureStat,
            )
    ),
    tags(
        (name = "hawaii climate api", description = "a read-only RESTful api over historical Hawaii weather station observations")
    )
)]
struct ApiDoc;

pub async fn build_app_state(
    remote_url: String,
    database_path: String,
    max_connections: u32,
) -> Result<AppState, anyhow::Error> {
    let db = Database::new(&database_path, max_connections)
        .await
        .map_err(|e| anyhow!("error opening observations database: {}", e))?;
    let store: Arc<dyn ClimateData> = Arc::new(ClimateAccess::new(db));

    build_app_state_with_store(remote_url, store).await
}

/// Builds the state around any store; computes the summary once.
pub async fn build_app_state_with_store(
    remote_url: String,
    store: Arc<dyn ClimateData>,
) -> Result<AppState, anyhow::Error> {
    let climate = Climate::new(store)
        .await
        .map_err(|e| anyhow!("error loading observation summary: {}", e))?;

    Ok(AppState {
        remote_url,
        climate: Arc::new(climate),
    })
}

pub fn app(app_state: AppState) -> Router {
    let api_docs = ApiDoc::openapi();
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([ACCEPT, CONTENT_TYPE])
        .allow_origin(Any);

    Router::new()
        .route("/", get(index_handler))
        // Static segments take priority over the {start} parameter
        .route("/api/v1.0/precipitation", get(precipitation))
        .route("/api/v1.0/stations", get(stations))
        .route("/api/v1.0/tobs", get(tobs))
        .route("/api/v1.0/{start}", get(temperature_stats_from))
        .route("/api/v1.0/{start}/{end}", get(temperature_stats_between))
        .with_state(Arc::new(app_state))
        .layer(middleware::from_fn(log_request))
        .merge(Scalar::with_url("/docs", api_docs))
        .layer(cors)
}

async fn log_request(request: Request<Body>, next: Next) -> impl IntoResponse {
    let now = time::OffsetDateTime::now_utc();
    let path = request
        .uri()
        .path_and_query()
        .map(|p| p.as_str())
        .unwrap_or_default();
    info!(target: "http_request","new request, {} {}", request.method().as_str(), path);

    let response = next.run(request).await;
    let response_time = time::OffsetDateTime::now_utc() - now;
    info!(target: "http_response", "response, code: {}, time: {}", response.status().as_str(), response_time);

    response
}
