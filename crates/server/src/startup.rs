use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use common::utils::logging::init_logging_default;
use configs::{AppConfig, StorageBackend};
use dotenvy::dotenv;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use service::customer::service::CustomerService;
use service::customer::store::memory::MemoryCustomerStore;
use service::customer::store::seaorm::OrmCustomerStore;
use service::customer::store::sql::SqlCustomerStore;
use service::customer::store::CustomerStore;

use crate::routes::{self, AppState};

/// Initialize logging via shared common utils
fn init_logging() {
    init_logging_default();
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn load_config() -> anyhow::Result<AppConfig> {
    match AppConfig::load_and_validate() {
        Ok(cfg) => Ok(cfg),
        Err(e) => {
            warn!(error = %e, "config file unavailable, falling back to environment");
            AppConfig::from_env()
        }
    }
}

/// Wire the storage backend named in the configuration.
async fn select_store(cfg: &AppConfig) -> anyhow::Result<Arc<dyn CustomerStore>> {
    let store: Arc<dyn CustomerStore> = match cfg.storage.backend {
        StorageBackend::Memory => Arc::new(MemoryCustomerStore::new()),
        StorageBackend::Sql => {
            let db = models::db::connect_with_config(&cfg.database).await?;
            Arc::new(SqlCustomerStore { db })
        }
        StorageBackend::Orm => {
            let db = models::db::connect_with_config(&cfg.database).await?;
            Arc::new(OrmCustomerStore { db })
        }
    };
    Ok(store)
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    let cfg = load_config()?;
    let store = select_store(&cfg).await?;
    let state = AppState { customers: Arc::new(CustomerService::new(store)) };

    let app: Router = routes::build_router(state, build_cors());

    let addr: SocketAddr = format!("{}:{}", cfg.server.host, cfg.server.port).parse()?;
    info!(%addr, backend = ?cfg.storage.backend, "starting customer server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
