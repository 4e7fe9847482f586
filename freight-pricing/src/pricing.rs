use freight_core::{CountryError, RegionClass, RegionClassifier};

/// Region multipliers are expressed in tenths.
const MULTIPLIER_SCALE: i32 = 10;

pub const MIN_WEIGHT: i32 = 0;
pub const MAX_WEIGHT: i32 = 1000;

/// Weight band of a package. Bands are closed on the upper bound and contiguous:
/// `[0,10]`, `(10,25]`, `(25,50]`, `(50,1000]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightClass {
    Small,
    Medium,
    Large,
    Huge,
}

impl WeightClass {
    pub const ALL: [WeightClass; 4] = [
        WeightClass::Small,
        WeightClass::Medium,
        WeightClass::Large,
        WeightClass::Huge,
    ];

    pub fn for_weight(weight: i32) -> Option<Self> {
        match weight {
            MIN_WEIGHT..=10 => Some(WeightClass::Small),
            11..=25 => Some(WeightClass::Medium),
            26..=50 => Some(WeightClass::Large),
            51..=MAX_WEIGHT => Some(WeightClass::Huge),
            _ => None,
        }
    }

    /// Base price in SEK.
    pub const fn base_price(self) -> i32 {
        match self {
            WeightClass::Small => 100,
            WeightClass::Medium => 300,
            WeightClass::Large => 500,
            WeightClass::Huge => 2000,
        }
    }
}

// Prices are computed with truncating integer division. That is only exact while
// every base price times every multiplier is a multiple of the scale.
const _: () = {
    let mut w = 0;
    while w < WeightClass::ALL.len() {
        let mut r = 0;
        while r < RegionClass::ALL.len() {
            let product = WeightClass::ALL[w].base_price() * RegionClass::ALL[r].multiplier_tenths();
            assert!(product % MULTIPLIER_SCALE == 0, "pricing table loses precision");
            r += 1;
        }
        w += 1;
    }
};

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum PricingError {
    #[error("weight: {weight} doesn't have a defined price")]
    UnknownWeightClass { weight: i32 },

    #[error("countryCode: {country_code} is not defined")]
    UnknownRegion {
        country_code: String,
        #[source]
        source: CountryError,
    },
}

/// Computes shipping prices from package weight and sender country. Pure and
/// deterministic.
#[derive(Debug, Clone)]
pub struct PricingEngine {
    classifier: RegionClassifier,
}

impl PricingEngine {
    pub fn new(classifier: RegionClassifier) -> Self {
        Self { classifier }
    }

    pub fn calculate(&self, weight: i32, sender_country_code: &str) -> Result<i32, PricingError> {
        let weight_class = WeightClass::for_weight(weight)
            .ok_or(PricingError::UnknownWeightClass { weight })?;

        let region = self
            .classifier
            .classify(sender_country_code)
            .map_err(|source| PricingError::UnknownRegion {
                country_code: sender_country_code.to_string(),
                source,
            })?;

        let price = weight_class.base_price() * region.multiplier_tenths() / MULTIPLIER_SCALE;

        tracing::trace!(weight, ?weight_class, ?region, price, "calculated price");
        Ok(price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use freight_core::CountryDatabase;
    use std::sync::Arc;

    fn engine() -> PricingEngine {
        PricingEngine::new(RegionClassifier::new(Arc::new(CountryDatabase::iso3166())))
    }

    #[test]
    fn test_price_table() {
        let engine = engine();

        let cases = [
            ("SE", 10, 100),
            ("SE", 25, 300),
            ("SE", 50, 500),
            ("SE", 1000, 2000),
            ("DE", 10, 150),
            ("DE", 25, 450),
            ("DE", 50, 750),
            ("DE", 1000, 3000),
            ("US", 10, 250),
            ("US", 25, 750),
            ("US", 50, 1250),
            ("US", 1000, 5000),
        ];

        for (country, weight, expected) in cases {
            assert_eq!(engine.calculate(weight, country).unwrap(), expected, "{country}/{weight}");
        }
    }

    #[test]
    fn test_band_edges() {
        let engine = engine();

        assert_eq!(engine.calculate(0, "SE").unwrap(), 100);
        assert_eq!(engine.calculate(11, "SE").unwrap(), 300);
        assert_eq!(engine.calculate(26, "SE").unwrap(), 500);
        assert_eq!(engine.calculate(51, "SE").unwrap(), 2000);
    }

    #[test]
    fn test_unknown_weight_class() {
        let engine = engine();

        assert_eq!(
            engine.calculate(-1, "SE").unwrap_err(),
            PricingError::UnknownWeightClass { weight: -1 }
        );
        assert_eq!(
            engine.calculate(1001, "SE").unwrap_err(),
            PricingError::UnknownWeightClass { weight: 1001 }
        );
    }

    #[test]
    fn test_unknown_region() {
        let err = engine().calculate(0, "XX").unwrap_err();

        assert!(matches!(
            err,
            PricingError::UnknownRegion { ref country_code, .. } if country_code == "XX"
        ));
        assert_eq!(err.to_string(), "countryCode: XX is not defined");
    }

    #[test]
    fn test_truncation_is_exact() {
        for weight_class in WeightClass::ALL {
            for region in RegionClass::ALL {
                let product = weight_class.base_price() * region.multiplier_tenths();
                assert_eq!(product % MULTIPLIER_SCALE, 0, "{weight_class:?}/{region:?}");
            }
        }
    }
}
