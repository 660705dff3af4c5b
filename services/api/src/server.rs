use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemorySubmissionSink, InMemorySurveySessions};
use crate::routes::with_survey_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use speakit::config::AppConfig;
use speakit::error::AppError;
use speakit::telemetry;
use speakit::workflows::survey::SurveySessionService;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

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

    let sessions = Arc::new(InMemorySurveySessions::default());
    let sink = Arc::new(InMemorySubmissionSink::default());
    let survey_service = Arc::new(SurveySessionService::new(sessions, sink));

    let app = with_survey_routes(survey_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "background survey service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
