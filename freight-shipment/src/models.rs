use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use freight_core::{PackageRecord, PartyRecord, ShipmentRecord};
use freight_shared::Masked;

/// Sender or receiver of a shipment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    pub name: String,
    pub email: Masked<String>,
    pub address: String,
    pub country_code: String,
}

impl Party {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        address: impl Into<String>,
        country_code: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: Masked(email.into()),
            address: address.into(),
            country_code: country_code.into(),
        }
    }
}

/// Package as submitted by the client, before pricing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageDraft {
    pub weight: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    pub weight: i32,
    pub price: i32,
}

/// Client-submitted shipment data. Identity, timestamp and price are assigned
/// by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipmentDraft {
    pub tenant_id: Uuid,
    pub sender: Party,
    pub receiver: Party,
    pub package: PackageDraft,
}

impl ShipmentDraft {
    /// Turn the draft into a shipment once it has been validated and priced.
    pub fn into_shipment(self, id: Uuid, created_at: DateTime<Utc>, price: i32) -> Shipment {
        Shipment {
            id,
            tenant_id: self.tenant_id,
            created_at,
            sender: self.sender,
            receiver: self.receiver,
            package: Package {
                weight: self.package.weight,
                price,
            },
        }
    }
}

/// A priced, persisted shipment. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shipment {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub sender: Party,
    pub receiver: Party,
    pub package: Package,
}

impl From<&Party> for PartyRecord {
    fn from(party: &Party) -> Self {
        Self {
            name: party.name.clone(),
            email: party.email.expose().clone(),
            address: party.address.clone(),
            country_code: party.country_code.clone(),
        }
    }
}

impl From<PartyRecord> for Party {
    fn from(record: PartyRecord) -> Self {
        Self {
            name: record.name,
            email: Masked(record.email),
            address: record.address,
            country_code: record.country_code,
        }
    }
}

impl From<&Shipment> for ShipmentRecord {
    fn from(shipment: &Shipment) -> Self {
        Self {
            id: shipment.id,
            tenant_id: shipment.tenant_id,
            created_at: shipment.created_at,
            sender: PartyRecord::from(&shipment.sender),
            receiver: PartyRecord::from(&shipment.receiver),
            package: PackageRecord {
                weight: shipment.package.weight,
                price: shipment.package.price,
            },
        }
    }
}

impl From<ShipmentRecord> for Shipment {
    fn from(record: ShipmentRecord) -> Self {
        Self {
            id: record.id,
            tenant_id: record.tenant_id,
            created_at: record.created_at,
            sender: record.sender.into(),
            receiver: record.receiver.into(),
            package: Package {
                weight: record.package.weight,
                price: record.package.price,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_mapping_preserves_fields() {
        let draft = ShipmentDraft {
            tenant_id: Uuid::new_v4(),
            sender: Party::new("Anna Svensson", "anna@example.se", "Storgatan 1", "SE"),
            receiver: Party::new("Hans Meier", "hans@example.de", "Hauptstrasse 2", "DE"),
            package: PackageDraft { weight: 12 },
        };
        let shipment = draft.into_shipment(Uuid::new_v4(), Utc::now(), 300);

        let record = ShipmentRecord::from(&shipment);
        assert_eq!(record.sender.email, "anna@example.se");
        assert_eq!(record.package, PackageRecord { weight: 12, price: 300 });

        assert_eq!(Shipment::from(record), shipment);
    }

    #[test]
    fn test_debug_masks_email() {
        let party = Party::new("Anna", "anna@example.se", "Storgatan 1", "SE");
        let debug = format!("{:?}", party);

        assert!(!debug.contains("anna@example.se"));
        assert!(debug.contains("Storgatan 1"));
    }
}
