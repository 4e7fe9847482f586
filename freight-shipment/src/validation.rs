use std::fmt;
use std::sync::Arc;

use freight_core::{CountryDatabase, CountryError};
use freight_pricing::pricing::{MAX_WEIGHT, MIN_WEIGHT};
use validator::ValidateEmail;

use crate::models::{PackageDraft, Party, ShipmentDraft};

pub const MAX_NAME_LEN: usize = 30;
pub const MAX_ADDRESS_LEN: usize = 100;

/// Which part of the shipment failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Sender,
    Receiver,
    Package,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::Sender => write!(f, "sender"),
            Entity::Receiver => write!(f, "receiver"),
            Entity::Package => write!(f, "package"),
        }
    }
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum Rule {
    #[error("name is longer than the max length: {max}")]
    NameTooLong { max: usize },

    #[error("name is not valid, it contains numbers")]
    NameContainsDigit,

    #[error("email is not valid")]
    InvalidEmail,

    #[error("address is longer than max length: {max}")]
    AddressTooLong { max: usize },

    #[error("country code is invalid: {0}")]
    InvalidCountryCode(#[source] CountryError),

    #[error("weight: {weight} can't be below minimum: {min}")]
    WeightBelowMinimum { weight: i32, min: i32 },

    #[error("weight: {weight} can't be above maximum: {max}")]
    WeightAboveMaximum { weight: i32, max: i32 },
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
#[error("failed to validate {entity}: {rule}")]
pub struct ValidationError {
    pub entity: Entity,
    #[source]
    pub rule: Rule,
}

/// Checks a draft against the field rules, stopping at the first failure.
#[derive(Debug, Clone)]
pub struct ShipmentValidator {
    countries: Arc<CountryDatabase>,
}

impl ShipmentValidator {
    pub fn new(countries: Arc<CountryDatabase>) -> Self {
        Self { countries }
    }

    pub fn validate(&self, draft: &ShipmentDraft) -> Result<(), ValidationError> {
        self.validate_party(&draft.sender)
            .map_err(|rule| ValidationError { entity: Entity::Sender, rule })?;

        self.validate_party(&draft.receiver)
            .map_err(|rule| ValidationError { entity: Entity::Receiver, rule })?;

        validate_package(&draft.package)
            .map_err(|rule| ValidationError { entity: Entity::Package, rule })
    }

    fn validate_party(&self, party: &Party) -> Result<(), Rule> {
        if party.name.chars().count() > MAX_NAME_LEN {
            return Err(Rule::NameTooLong { max: MAX_NAME_LEN });
        }

        if party.name.chars().any(|c| c.is_ascii_digit()) {
            return Err(Rule::NameContainsDigit);
        }

        if !party.email.expose().validate_email() {
            return Err(Rule::InvalidEmail);
        }

        if party.address.chars().count() > MAX_ADDRESS_LEN {
            return Err(Rule::AddressTooLong { max: MAX_ADDRESS_LEN });
        }

        self.countries
            .find(&party.country_code)
            .map_err(Rule::InvalidCountryCode)?;

        Ok(())
    }
}

fn validate_package(package: &PackageDraft) -> Result<(), Rule> {
    if package.weight < MIN_WEIGHT {
        return Err(Rule::WeightBelowMinimum { weight: package.weight, min: MIN_WEIGHT });
    }

    if package.weight > MAX_WEIGHT {
        return Err(Rule::WeightAboveMaximum { weight: package.weight, max: MAX_WEIGHT });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn validator() -> ShipmentValidator {
        ShipmentValidator::new(Arc::new(CountryDatabase::iso3166()))
    }

    fn draft() -> ShipmentDraft {
        ShipmentDraft {
            tenant_id: Uuid::new_v4(),
            sender: Party::new("Anna Svensson", "anna@example.se", "Storgatan 1", "SE"),
            receiver: Party::new("Hans Meier", "hans@example.de", "Hauptstrasse 2", "de"),
            package: PackageDraft { weight: 10 },
        }
    }

    #[test]
    fn test_valid_draft() {
        assert!(validator().validate(&draft()).is_ok());
    }

    #[test]
    fn test_name_with_digit() {
        let mut d = draft();
        d.sender.name = "R2D2".to_string();

        let err = validator().validate(&d).unwrap_err();
        assert_eq!(err, ValidationError { entity: Entity::Sender, rule: Rule::NameContainsDigit });
    }

    #[test]
    fn test_name_too_long() {
        let mut d = draft();
        d.receiver.name = "a".repeat(31);

        let err = validator().validate(&d).unwrap_err();
        assert_eq!(err.entity, Entity::Receiver);
        assert_eq!(err.rule, Rule::NameTooLong { max: 30 });

        d.receiver.name = "a".repeat(30);
        assert!(validator().validate(&d).is_ok());
    }

    #[test]
    fn test_address_length() {
        let mut d = draft();
        d.receiver.address = "x".repeat(101);

        let err = validator().validate(&d).unwrap_err();
        assert_eq!(err.entity, Entity::Receiver);
        assert_eq!(err.rule, Rule::AddressTooLong { max: 100 });

        d.receiver.address = "x".repeat(100);
        assert!(validator().validate(&d).is_ok());
    }

    #[test]
    fn test_invalid_email() {
        let mut d = draft();
        d.sender.email = "not-an-email".into();

        let err = validator().validate(&d).unwrap_err();
        assert_eq!(err, ValidationError { entity: Entity::Sender, rule: Rule::InvalidEmail });
    }

    #[test]
    fn test_country_code() {
        let mut d = draft();
        d.sender.country_code = "XX".to_string();
        let err = validator().validate(&d).unwrap_err();
        assert!(matches!(err.rule, Rule::InvalidCountryCode(CountryError::UnknownCountry(_))));

        d.sender.country_code = "SWE".to_string();
        let err = validator().validate(&d).unwrap_err();
        assert!(matches!(err.rule, Rule::InvalidCountryCode(CountryError::UnknownCountry(_))));
    }

    #[test]
    fn test_weight_bounds() {
        let mut d = draft();
        d.package.weight = 1001;
        let err = validator().validate(&d).unwrap_err();
        assert_eq!(err.entity, Entity::Package);
        assert_eq!(err.rule, Rule::WeightAboveMaximum { weight: 1001, max: 1000 });

        d.package.weight = -1;
        let err = validator().validate(&d).unwrap_err();
        assert_eq!(err.rule, Rule::WeightBelowMinimum { weight: -1, min: 0 });

        d.package.weight = 1000;
        assert!(validator().validate(&d).is_ok());
    }

    #[test]
    fn test_sender_checked_before_receiver() {
        let mut d = draft();
        d.sender.name = "1".to_string();
        d.receiver.name = "2".to_string();

        let err = validator().validate(&d).unwrap_err();
        assert_eq!(err.entity, Entity::Sender);
        assert_eq!(err.to_string(), "failed to validate sender: name is not valid, it contains numbers");
    }
}
