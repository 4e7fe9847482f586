pub mod models;
pub mod validation;
pub mod service;

pub use models::{Package, PackageDraft, Party, Shipment, ShipmentDraft};
pub use validation::{Entity, Rule, ShipmentValidator, ValidationError};
pub use service::{ErrorKind, ShipmentError, ShipmentPage, ShipmentService};
