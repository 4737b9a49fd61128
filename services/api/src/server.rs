use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_eligibility_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use sme_loan::config::{AppConfig, StorageBackend};
use sme_loan::error::AppError;
use sme_loan::telemetry;
use sme_loan::workflows::eligibility::{
    EligibilityRepository, EligibilityService, InMemoryEligibilityRepository, ProductCatalog,
    SqliteEligibilityRepository,
};
use std::sync::atomic::{AtomicBool, Ordering};
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

    let catalog = Arc::new(ProductCatalog::load_or_empty(
        &config.catalog.products_path,
    ));

    match config.storage.backend {
        StorageBackend::Sqlite => {
            let repository = SqliteEligibilityRepository::open(&config.storage.database_path)?;
            info!(path = %config.storage.database_path.display(), "sqlite storage opened");
            serve(config, Arc::new(repository), catalog).await
        }
        StorageBackend::Memory => {
            info!("using in-memory storage, data is lost on restart");
            let repository = Arc::new(InMemoryEligibilityRepository::default());
            serve(config, repository, catalog).await
        }
    }
}

async fn serve<R>(
    config: AppConfig,
    repository: Arc<R>,
    catalog: Arc<ProductCatalog>,
) -> Result<(), AppError>
where
    R: EligibilityRepository + 'static,
{
    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let service = Arc::new(EligibilityService::new(repository, catalog));
    let app = with_eligibility_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "loan eligibility service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
