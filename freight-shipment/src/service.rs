use std::sync::Arc;

use chrono::Utc;
use freight_core::{
    CountryDatabase, RecordPage, RegionClassifier, ShipmentRecord, ShipmentRepository, StoreError,
};
use freight_pricing::{PricingEngine, PricingError};
use freight_shared::Page;
use uuid::Uuid;

use crate::models::{Shipment, ShipmentDraft};
use crate::validation::{ShipmentValidator, ValidationError};

/// Coarse classification of a failure, for callers that need to branch on it
/// (the HTTP layer maps it to a status code).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    NotFound,
    Internal,
}

#[derive(Debug, thiserror::Error)]
pub enum ShipmentError {
    #[error("shipment was invalid: {0}")]
    Invalid(#[from] ValidationError),

    #[error("could not calculate the price of the shipment: {0}")]
    Pricing(#[from] PricingError),

    #[error("could not create shipment in storage: {0}")]
    Create(#[source] StoreError),

    #[error("could not get shipment: {0}")]
    Get(#[source] StoreError),

    #[error("could not list shipments: {0}")]
    List(#[source] StoreError),
}

impl ShipmentError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ShipmentError::Invalid(_) | ShipmentError::Pricing(_) => ErrorKind::InvalidInput,
            ShipmentError::Create(e) | ShipmentError::Get(e) | ShipmentError::List(e) => match e {
                StoreError::NotFound { .. } => ErrorKind::NotFound,
                StoreError::DuplicateKey { .. } | StoreError::IndexDesync { .. } => ErrorKind::Internal,
            },
        }
    }
}

/// One page of a tenant's shipments plus the tenant's total count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShipmentPage {
    pub shipments: Vec<Shipment>,
    pub total: usize,
    pub page: Page,
}

/// Orchestrates validation, pricing and persistence of shipments.
pub struct ShipmentService {
    repo: Arc<dyn ShipmentRepository>,
    validator: ShipmentValidator,
    pricing: PricingEngine,
}

impl ShipmentService {
    pub fn new(countries: Arc<CountryDatabase>, repo: Arc<dyn ShipmentRepository>) -> Self {
        Self {
            repo,
            validator: ShipmentValidator::new(countries.clone()),
            pricing: PricingEngine::new(RegionClassifier::new(countries)),
        }
    }

    #[tracing::instrument(
        skip(self, draft),
        fields(tenant_id = %draft.tenant_id, sender_country = %draft.sender.country_code)
    )]
    pub async fn create_shipment(&self, draft: ShipmentDraft) -> Result<Shipment, ShipmentError> {
        self.validator.validate(&draft)?;

        let id = Uuid::new_v4();
        let created_at = Utc::now();

        let price = self
            .pricing
            .calculate(draft.package.weight, &draft.sender.country_code)?;

        let shipment = draft.into_shipment(id, created_at, price);

        self.repo
            .store(ShipmentRecord::from(&shipment))
            .await
            .map_err(|e| {
                tracing::error!(shipment_id = %id, error = %e, "failed to persist shipment");
                ShipmentError::Create(e)
            })?;

        tracing::info!(
            shipment_id = %shipment.id,
            weight = shipment.package.weight,
            price = shipment.package.price,
            "shipment created"
        );

        Ok(shipment)
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_shipment(&self, tenant_id: Uuid, shipment_id: Uuid) -> Result<Shipment, ShipmentError> {
        let record = self
            .repo
            .get(tenant_id, shipment_id)
            .await
            .map_err(ShipmentError::Get)?;

        Ok(record.into())
    }

    #[tracing::instrument(skip(self), fields(limit = page.limit, offset = page.offset))]
    pub async fn list_shipments(&self, tenant_id: Uuid, page: Page) -> Result<ShipmentPage, ShipmentError> {
        let RecordPage { records, total } = self
            .repo
            .list_page(tenant_id, page.limit, page.offset)
            .await
            .map_err(list_error)?;

        tracing::debug!(returned = records.len(), total, "listed shipments");

        Ok(ShipmentPage {
            shipments: records.into_iter().map(Shipment::from).collect(),
            total,
            page,
        })
    }
}

fn list_error(e: StoreError) -> ShipmentError {
    if matches!(e, StoreError::IndexDesync { .. }) {
        tracing::error!(error = %e, "shipment store invariant violated");
    }
    ShipmentError::List(e)
}
