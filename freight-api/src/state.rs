use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use freight_shipment::ShipmentService;
use freight_store::app_config::{Config, Environment};

use crate::error::AppError;

#[derive(Clone)]
pub struct ServiceInfo {
    pub name: String,
    pub version: String,
    pub environment: Environment,
}

#[derive(Clone)]
pub struct AppState {
    pub shipments: Arc<ShipmentService>,
    pub service: ServiceInfo,
    pub public_url: String,
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(config: &Config, shipments: Arc<ShipmentService>) -> Self {
        Self {
            shipments,
            service: ServiceInfo {
                name: config.service.name.clone(),
                version: config.service.version.clone(),
                environment: config.service.environment,
            },
            public_url: config.server.public_url.trim_end_matches('/').to_string(),
            request_timeout: Duration::from_millis(config.server.request_timeout_ms),
        }
    }

    /// Run a core call under the request deadline. The future is dropped when the
    /// deadline passes.
    pub async fn with_deadline<T, E, F>(&self, fut: F) -> Result<T, AppError>
    where
        F: Future<Output = Result<T, E>>,
        E: Into<AppError>,
    {
        match tokio::time::timeout(self.request_timeout, fut).await {
            Ok(result) => result.map_err(Into::into),
            Err(_) => Err(AppError::TimeoutError),
        }
    }
}
