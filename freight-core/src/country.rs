use std::collections::HashMap;
use std::sync::Arc;

/// Max length of an ISO 3166-1 alpha-2 code.
pub const ALPHA2_LEN: usize = 2;

/// Region class derived from the sender country, drives the price multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegionClass {
    Nordic,
    Eu,
    RestOfWorld,
}

impl RegionClass {
    pub const ALL: [RegionClass; 3] = [RegionClass::Nordic, RegionClass::Eu, RegionClass::RestOfWorld];

    /// Price multiplier in tenths (10 = x1.0).
    pub const fn multiplier_tenths(self) -> i32 {
        match self {
            RegionClass::Nordic => 10,
            RegionClass::Eu => 15,
            RegionClass::RestOfWorld => 25,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Country {
    pub alpha2: String,
    pub eu_member: bool,
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum CountryError {
    /// The code is not a known alpha-2 code, which includes codes longer than 2.
    #[error("could not find country by code: {0}")]
    UnknownCountry(String),
}

/// Lookup table of known countries, keyed by upper-case alpha-2 code.
///
/// Built once at start-up and handed around as an `Arc`; tests build small
/// tables with [`CountryDatabase::from_entries`].
#[derive(Debug, Clone, Default)]
pub struct CountryDatabase {
    countries: HashMap<String, Country>,
}

impl CountryDatabase {
    /// The full ISO 3166-1 table with EU membership flags.
    pub fn iso3166() -> Self {
        Self::from_entries(
            ISO_ALPHA2
                .iter()
                .map(|code| (*code, EU_MEMBERS.contains(code))),
        )
    }

    pub fn from_entries<'a>(entries: impl IntoIterator<Item = (&'a str, bool)>) -> Self {
        let countries = entries
            .into_iter()
            .map(|(code, eu_member)| {
                let alpha2 = code.to_ascii_uppercase();
                (alpha2.clone(), Country { alpha2, eu_member })
            })
            .collect();

        Self { countries }
    }

    /// Find a country by its alpha-2 code, case-insensitively.
    pub fn find(&self, code: &str) -> Result<&Country, CountryError> {
        if code.chars().count() > ALPHA2_LEN {
            return Err(CountryError::UnknownCountry(code.to_string()));
        }

        self.countries
            .get(&code.to_ascii_uppercase())
            .ok_or_else(|| CountryError::UnknownCountry(code.to_string()))
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }
}

const NORDIC: [&str; 4] = ["SE", "NO", "DK", "FI"];

/// Maps a country code to its region class.
#[derive(Debug, Clone)]
pub struct RegionClassifier {
    countries: Arc<CountryDatabase>,
}

impl RegionClassifier {
    pub fn new(countries: Arc<CountryDatabase>) -> Self {
        Self { countries }
    }

    pub fn classify(&self, country_code: &str) -> Result<RegionClass, CountryError> {
        let country = self.countries.find(country_code)?;

        // Nordic wins over EU membership.
        if NORDIC.contains(&country.alpha2.as_str()) {
            return Ok(RegionClass::Nordic);
        }

        if country.eu_member {
            return Ok(RegionClass::Eu);
        }

        Ok(RegionClass::RestOfWorld)
    }
}

const EU_MEMBERS: [&str; 27] = [
    "AT", "BE", "BG", "HR", "CY", "CZ", "DK", "EE", "FI", "FR", "DE", "GR", "HU", "IE",
    "IT", "LV", "LT", "LU", "MT", "NL", "PL", "PT", "RO", "SK", "SI", "ES", "SE",
];

const ISO_ALPHA2: [&str; 249] = [
    "AD", "AE", "AF", "AG", "AI", "AL", "AM", "AO", "AQ", "AR", "AS", "AT", "AU", "AW",
    "AX", "AZ", "BA", "BB", "BD", "BE", "BF", "BG", "BH", "BI", "BJ", "BL", "BM", "BN",
    "BO", "BQ", "BR", "BS", "BT", "BV", "BW", "BY", "BZ", "CA", "CC", "CD", "CF", "CG",
    "CH", "CI", "CK", "CL", "CM", "CN", "CO", "CR", "CU", "CV", "CW", "CX", "CY", "CZ",
    "DE", "DJ", "DK", "DM", "DO", "DZ", "EC", "EE", "EG", "EH", "ER", "ES", "ET", "FI",
    "FJ", "FK", "FM", "FO", "FR", "GA", "GB", "GD", "GE", "GF", "GG", "GH", "GI", "GL",
    "GM", "GN", "GP", "GQ", "GR", "GS", "GT", "GU", "GW", "GY", "HK", "HM", "HN", "HR",
    "HT", "HU", "ID", "IE", "IL", "IM", "IN", "IO", "IQ", "IR", "IS", "IT", "JE", "JM",
    "JO", "JP", "KE", "KG", "KH", "KI", "KM", "KN", "KP", "KR", "KW", "KY", "KZ", "LA",
    "LB", "LC", "LI", "LK", "LR", "LS", "LT", "LU", "LV", "LY", "MA", "MC", "MD", "ME",
    "MF", "MG", "MH", "MK", "ML", "MM", "MN", "MO", "MP", "MQ", "MR", "MS", "MT", "MU",
    "MV", "MW", "MX", "MY", "MZ", "NA", "NC", "NE", "NF", "NG", "NI", "NL", "NO", "NP",
    "NR", "NU", "NZ", "OM", "PA", "PE", "PF", "PG", "PH", "PK", "PL", "PM", "PN", "PR",
    "PS", "PT", "PW", "PY", "QA", "RE", "RO", "RS", "RU", "RW", "SA", "SB", "SC", "SD",
    "SE", "SG", "SH", "SI", "SJ", "SK", "SL", "SM", "SN", "SO", "SR", "SS", "ST", "SV",
    "SX", "SY", "SZ", "TC", "TD", "TF", "TG", "TH", "TJ", "TK", "TL", "TM", "TN", "TO",
    "TR", "TT", "TV", "TW", "TZ", "UA", "UG", "UM", "US", "UY", "UZ", "VA", "VC", "VE",
    "VG", "VI", "VN", "VU", "WF", "WS", "YE", "YT", "ZA", "ZM", "ZW",
];

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> RegionClassifier {
        RegionClassifier::new(Arc::new(CountryDatabase::iso3166()))
    }

    #[test]
    fn test_iso_table_is_complete() {
        let db = CountryDatabase::iso3166();
        assert_eq!(db.len(), 249);
        assert!(EU_MEMBERS.iter().all(|code| db.find(code).unwrap().eu_member));
    }

    #[test]
    fn test_classify_regions() {
        let classifier = classifier();

        for code in ["SE", "NO", "DK", "FI", "se", "Fi"] {
            assert_eq!(classifier.classify(code).unwrap(), RegionClass::Nordic, "{code}");
        }
        for code in ["DE", "fr", "PL"] {
            assert_eq!(classifier.classify(code).unwrap(), RegionClass::Eu, "{code}");
        }
        for code in ["US", "GB", "IS", "CH"] {
            assert_eq!(classifier.classify(code).unwrap(), RegionClass::RestOfWorld, "{code}");
        }
    }

    #[test]
    fn test_unknown_and_overlong_codes() {
        let classifier = classifier();

        assert_eq!(
            classifier.classify("XX").unwrap_err(),
            CountryError::UnknownCountry("XX".to_string())
        );
        assert_eq!(
            classifier.classify("SWE").unwrap_err(),
            CountryError::UnknownCountry("SWE".to_string())
        );
        assert!(matches!(
            classifier.classify("sweden").unwrap_err(),
            CountryError::UnknownCountry(_)
        ));
        assert!(matches!(classifier.classify("").unwrap_err(), CountryError::UnknownCountry(_)));
    }

    #[test]
    fn test_fake_table() {
        let db = CountryDatabase::from_entries([("zz", true), ("yy", false)]);
        let classifier = RegionClassifier::new(Arc::new(db));

        assert_eq!(classifier.classify("ZZ").unwrap(), RegionClass::Eu);
        assert_eq!(classifier.classify("yy").unwrap(), RegionClass::RestOfWorld);
        assert!(classifier.classify("SE").is_err());
    }

    #[test]
    fn test_multipliers() {
        assert_eq!(RegionClass::Nordic.multiplier_tenths(), 10);
        assert_eq!(RegionClass::Eu.multiplier_tenths(), 15);
        assert_eq!(RegionClass::RestOfWorld.multiplier_tenths(), 25);
    }
}
