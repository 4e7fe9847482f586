pub mod country;
pub mod repository;

pub use country::{Country, CountryDatabase, CountryError, RegionClass, RegionClassifier};
pub use repository::{
    PackageRecord, PartyRecord, RecordPage, ShipmentRecord, ShipmentRepository, StoreError, StoreResult,
};
