use std::sync::Arc;

use thiserror::Error;
use tokio::sync::RwLock;
use tracing::info;

use crate::config::AppConfig;
use crate::data::loader::DEFAULT_CONFIG_NAME;
use crate::data::{DataError, DataPaths, DataService};

pub mod api;
pub mod routes;
pub mod static_files;

/// The data service as handed to request handlers. Reads share the lock;
/// a configuration switch holds it exclusively for load plus merge.
pub type SharedService = Arc<RwLock<DataService>>;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to load game data: {0}")]
    Data(#[from] DataError),
    #[error("server io error: {0}")]
    Io(#[from] std::io::Error),
}

pub fn shared(service: DataService) -> SharedService {
    Arc::new(RwLock::new(service))
}

/// Load data per `config` and return it ready to serve. Any base-data failure is fatal.
pub fn load_service(config: &AppConfig) -> Result<DataService, DataError> {
    let mut service =
        DataService::with_policy(DataPaths::from_root(&config.data_dir), config.merge_policy);
    service.initialize()?;
    if config.server_config != DEFAULT_CONFIG_NAME {
        service.load_server_config(&config.server_config)?;
    }
    Ok(service)
}

pub async fn run_server(config: &AppConfig) -> Result<(), ServerError> {
    let service = shared(load_service(config)?);
    let app = routes::create_routes(service, Some(&config.client_dir));

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!(addr = %bind_addr, "holonet server listening");
    info!("api available at http://{bind_addr}/api");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown requested");
    }
}
