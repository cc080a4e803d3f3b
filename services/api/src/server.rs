use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemorySessionRepository};
use crate::routes::with_operational_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use chrono::Utc;
use credit_odds::config::AppConfig;
use credit_odds::error::AppError;
use credit_odds::estimator::{QuestionnaireService, SessionRepository};
use credit_odds::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

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

    let repository = Arc::new(InMemorySessionRepository::with_capacity(
        config.sessions.max_sessions,
    ));
    let service = Arc::new(QuestionnaireService::new(repository, config.sessions));
    spawn_idle_sweeper(service.clone());

    let app = with_operational_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        session_ttl_minutes = config.sessions.ttl_minutes,
        max_sessions = config.sessions.max_sessions,
        "credit odds estimator ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}

fn spawn_idle_sweeper<R>(service: Arc<QuestionnaireService<R>>)
where
    R: SessionRepository + 'static,
{
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(SWEEP_INTERVAL);
        loop {
            ticker.tick().await;
            if let Err(err) = service.purge_idle(Utc::now()) {
                warn!(error = %err, "idle session sweep failed");
            }
        }
    });
}
