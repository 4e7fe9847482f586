use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use uuid::Uuid;
use freight_core::{RecordPage, ShipmentRecord, ShipmentRepository, StoreError, StoreResult};

/// Both indexes live behind one lock so an insert is visible in both or neither.
#[derive(Default)]
struct Tables {
    /// Unique index: (tenant_id, shipment_id) -> record
    by_key: HashMap<(Uuid, Uuid), Arc<ShipmentRecord>>,

    /// Non-unique index: tenant_id -> records in insertion order
    by_tenant: HashMap<Uuid, Vec<Arc<ShipmentRecord>>>,
}

/// In-memory shipment store. Writers are serialized by the write guard; readers
/// share the read guard and never see a half-applied insert.
#[derive(Default)]
pub struct MemoryShipmentRepository {
    tables: RwLock<Tables>,
}

impl MemoryShipmentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Tables {
    fn tenant_total(&self, tenant_id: Uuid) -> usize {
        self.by_tenant.get(&tenant_id).map_or(0, Vec::len)
    }

    fn window(
        &self,
        tenant_id: Uuid,
        limit: usize,
        offset: usize,
    ) -> StoreResult<Vec<ShipmentRecord>> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let Some(records) = self.by_tenant.get(&tenant_id) else {
            return Ok(Vec::new());
        };

        let page: Vec<ShipmentRecord> = records
            .iter()
            .skip(offset)
            .take(limit)
            .map(|record| record.as_ref().clone())
            .collect();

        // Every tenant-index entry must also be in the unique index.
        if let Some(missing) = page
            .iter()
            .find(|record| !self.by_key.contains_key(&(tenant_id, record.id)))
        {
            return Err(StoreError::IndexDesync {
                tenant_id,
                detail: format!("shipment {} missing from key index", missing.id),
            });
        }

        Ok(page)
    }
}

#[async_trait]
impl ShipmentRepository for MemoryShipmentRepository {
    async fn store(&self, shipment: ShipmentRecord) -> StoreResult<()> {
        let key = (shipment.tenant_id, shipment.id);
        let record = Arc::new(shipment);

        let mut tables = self.tables.write();

        if tables.by_key.contains_key(&key) {
            tracing::error!(tenant_id = %key.0, shipment_id = %key.1, "duplicate shipment key");
            return Err(StoreError::DuplicateKey {
                tenant_id: key.0,
                shipment_id: key.1,
            });
        }

        tables.by_key.insert(key, record.clone());
        tables.by_tenant.entry(key.0).or_default().push(record);

        tracing::debug!(tenant_id = %key.0, shipment_id = %key.1, "stored shipment");
        Ok(())
    }

    async fn get(&self, tenant_id: Uuid, shipment_id: Uuid) -> StoreResult<ShipmentRecord> {
        let tables = self.tables.read();

        tables
            .by_key
            .get(&(tenant_id, shipment_id))
            .map(|record| record.as_ref().clone())
            .ok_or(StoreError::NotFound { tenant_id, shipment_id })
    }

    async fn list(
        &self,
        tenant_id: Uuid,
        limit: usize,
        offset: usize,
    ) -> StoreResult<Vec<ShipmentRecord>> {
        self.tables.read().window(tenant_id, limit, offset)
    }

    async fn list_page(
        &self,
        tenant_id: Uuid,
        limit: usize,
        offset: usize,
    ) -> StoreResult<RecordPage> {
        let tables = self.tables.read();

        Ok(RecordPage {
            records: tables.window(tenant_id, limit, offset)?,
            total: tables.tenant_total(tenant_id),
        })
    }
}
