use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Storage-layer shape of a shipment. Kept apart from the domain model so the two
/// can evolve independently; the shipment crate maps between them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShipmentRecord {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub sender: PartyRecord,
    pub receiver: PartyRecord,
    pub package: PackageRecord,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartyRecord {
    pub name: String,
    pub email: String,
    pub address: String,
    pub country_code: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackageRecord {
    pub weight: i32,
    pub price: i32,
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("shipment {shipment_id} already exists for tenant {tenant_id}")]
    DuplicateKey { tenant_id: Uuid, shipment_id: Uuid },

    #[error("shipment {shipment_id} not found for tenant {tenant_id}")]
    NotFound { tenant_id: Uuid, shipment_id: Uuid },

    #[error("shipment indexes out of sync for tenant {tenant_id}: {detail}")]
    IndexDesync { tenant_id: Uuid, detail: String },
}

pub type StoreResult<T> = Result<T, StoreError>;

/// One window of a tenant's records together with the tenant's total, both read
/// under the same guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordPage {
    pub records: Vec<ShipmentRecord>,
    pub total: usize,
}

/// Tenant-scoped shipment storage.
///
/// Inserts are atomic with respect to readers: `get`, `list` and `list_page` observe
/// either the state before an insert or after it, never in between.
#[async_trait]
pub trait ShipmentRepository: Send + Sync {
    async fn store(&self, shipment: ShipmentRecord) -> StoreResult<()>;

    async fn get(&self, tenant_id: Uuid, shipment_id: Uuid) -> StoreResult<ShipmentRecord>;

    /// Up to `limit` shipments of the tenant, skipping the first `offset`, in
    /// insertion order.
    async fn list(
        &self,
        tenant_id: Uuid,
        limit: usize,
        offset: usize,
    ) -> StoreResult<Vec<ShipmentRecord>>;

    /// Same window as `list`, plus the tenant's total shipment count taken from
    /// the same snapshot.
    async fn list_page(
        &self,
        tenant_id: Uuid,
        limit: usize,
        offset: usize,
    ) -> StoreResult<RecordPage>;
}
