use crate::cli::ServeArgs;
use crate::infra::{AppState, Services};
use crate::routes::with_service_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use educare::config::AppConfig;
use educare::error::AppError;
use educare::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let services = Services::from_config(&config)?;
    if config.admission.enrollment_endpoint.is_none() {
        warn!("APP_ENROLLMENT_API_URL is not set; enrollment submissions will be refused");
    }
    if config.admission.contact_endpoint.is_none() {
        warn!("APP_CONTACT_API_URL is not set; contact messages will be refused");
    }

    let app = with_service_routes(services.admission, services.access, services.observations)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        min_age = config.admission.eligibility.min_age,
        max_age = config.admission.eligibility.max_age,
        "educare admission service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
