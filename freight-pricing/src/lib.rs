pub mod pricing;

pub use pricing::{PricingEngine, PricingError, WeightClass};
