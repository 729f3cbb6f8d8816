//! Feature Record - one customer as entered on the Predict form
//!
//! Categorical fields are closed enums; their integer codes are the label
//! encoding the classifier was trained with and must not be reordered.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::vector::FeatureVector;

// ============================================================================
// CATEGORICAL FIELDS
// ============================================================================

/// Error for a categorical label that has no code
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {field} `{value}`")]
pub struct UnknownCategory {
    pub field: &'static str,
    pub value: String,
}

/// Customer gender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Gender {
    #[default]
    Male,
    Female,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    /// Label-encoded value
    pub fn code(self) -> u8 {
        match self {
            Gender::Male => 1,
            Gender::Female => 0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

/// Subscription plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SubscriptionType {
    #[default]
    Standard,
    Premium,
    Basic,
}

impl SubscriptionType {
    pub const ALL: [SubscriptionType; 3] = [
        SubscriptionType::Standard,
        SubscriptionType::Premium,
        SubscriptionType::Basic,
    ];

    /// Label-encoded value
    pub fn code(self) -> u8 {
        match self {
            SubscriptionType::Standard => 2,
            SubscriptionType::Premium => 1,
            SubscriptionType::Basic => 0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SubscriptionType::Standard => "Standard",
            SubscriptionType::Premium => "Premium",
            SubscriptionType::Basic => "Basic",
        }
    }
}

/// Contract length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ContractLength {
    #[default]
    Monthly,
    Annual,
    Quarterly,
}

impl ContractLength {
    pub const ALL: [ContractLength; 3] = [
        ContractLength::Monthly,
        ContractLength::Annual,
        ContractLength::Quarterly,
    ];

    /// Label-encoded value
    pub fn code(self) -> u8 {
        match self {
            ContractLength::Monthly => 1,
            ContractLength::Annual => 0,
            ContractLength::Quarterly => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ContractLength::Monthly => "Monthly",
            ContractLength::Annual => "Annual",
            ContractLength::Quarterly => "Quarterly",
        }
    }
}

macro_rules! impl_category_text {
    ($ty:ty, $field:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $ty {
            type Err = UnknownCategory;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .into_iter()
                    .find(|v| v.label().eq_ignore_ascii_case(s.trim()))
                    .ok_or_else(|| UnknownCategory {
                        field: $field,
                        value: s.to_string(),
                    })
            }
        }
    };
}

impl_category_text!(Gender, "gender");
impl_category_text!(SubscriptionType, "subscription type");
impl_category_text!(ContractLength, "contract length");

// ============================================================================
// FEATURE RECORD
// ============================================================================

/// One customer's raw inputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    pub age: u32,
    pub gender: Gender,
    /// Months
    pub tenure: u32,
    /// Uses in the last month
    pub usage_frequency: u32,
    /// Calls in the last month
    pub support_calls: u32,
    /// Days
    pub payment_delay: u32,
    pub subscription_type: SubscriptionType,
    pub contract_length: ContractLength,
    pub total_spend: f64,
    /// Days since last interaction
    pub last_interaction: u32,
}

impl Default for FeatureRecord {
    /// Predict form defaults
    fn default() -> Self {
        Self {
            age: 30,
            gender: Gender::Male,
            tenure: 12,
            usage_frequency: 10,
            support_calls: 3,
            payment_delay: 5,
            subscription_type: SubscriptionType::Standard,
            contract_length: ContractLength::Monthly,
            total_spend: 500.0,
            last_interaction: 20,
        }
    }
}

impl FeatureRecord {
    /// Encode into the fixed column order of `FEATURE_LAYOUT`
    pub fn encode(&self) -> FeatureVector {
        FeatureVector::from_values([
            f64::from(self.age),
            f64::from(self.gender.code()),
            f64::from(self.tenure),
            f64::from(self.usage_frequency),
            f64::from(self.support_calls),
            f64::from(self.payment_delay),
            f64::from(self.subscription_type.code()),
            f64::from(self.contract_length.code()),
            self.total_spend,
            f64::from(self.last_interaction),
        ])
    }
}

impl From<&FeatureRecord> for FeatureVector {
    fn from(record: &FeatureRecord) -> Self {
        record.encode()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categorical_codes() {
        assert_eq!(Gender::Male.code(), 1);
        assert_eq!(Gender::Female.code(), 0);

        assert_eq!(SubscriptionType::Standard.code(), 2);
        assert_eq!(SubscriptionType::Premium.code(), 1);
        assert_eq!(SubscriptionType::Basic.code(), 0);

        assert_eq!(ContractLength::Monthly.code(), 1);
        assert_eq!(ContractLength::Annual.code(), 0);
        assert_eq!(ContractLength::Quarterly.code(), 2);
    }

    #[test]
    fn test_parse_labels() {
        assert_eq!("Female".parse::<Gender>(), Ok(Gender::Female));
        assert_eq!("premium".parse::<SubscriptionType>(), Ok(SubscriptionType::Premium));
        assert_eq!(" Quarterly ".parse::<ContractLength>(), Ok(ContractLength::Quarterly));

        let err = "Weekly".parse::<ContractLength>().unwrap_err();
        assert_eq!(err.field, "contract length");
        assert_eq!(err.to_string(), "unknown contract length `Weekly`");
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for g in Gender::ALL {
            assert_eq!(g.to_string().parse::<Gender>(), Ok(g));
        }
        for s in SubscriptionType::ALL {
            assert_eq!(s.to_string().parse::<SubscriptionType>(), Ok(s));
        }
        for c in ContractLength::ALL {
            assert_eq!(c.to_string().parse::<ContractLength>(), Ok(c));
        }
    }

    #[test]
    fn test_encode_default_form_values() {
        let vector = FeatureRecord::default().encode();
        assert_eq!(
            vector.values,
            [30.0, 1.0, 12.0, 10.0, 3.0, 5.0, 2.0, 1.0, 500.0, 20.0]
        );
    }

    #[test]
    fn test_encode_female_annual_basic() {
        let record = FeatureRecord {
            age: 51,
            gender: Gender::Female,
            tenure: 40,
            usage_frequency: 2,
            support_calls: 9,
            payment_delay: 28,
            subscription_type: SubscriptionType::Basic,
            contract_length: ContractLength::Annual,
            total_spend: 123.45,
            last_interaction: 7,
        };

        let vector = record.encode();
        assert_eq!(vector.get_by_name("gender"), Some(0.0));
        assert_eq!(vector.get_by_name("subscription_type"), Some(0.0));
        assert_eq!(vector.get_by_name("contract_length"), Some(0.0));
        assert_eq!(vector.get_by_name("total_spend"), Some(123.45));
        assert_eq!(vector.get_by_name("payment_delay"), Some(28.0));
        assert_eq!(vector.get(0), Some(51.0));
        assert_eq!(vector.get(9), Some(7.0));
    }

    #[test]
    fn test_record_deserializes_from_labels() {
        let json = r#"{
            "age": 30, "gender": "Male", "tenure": 12, "usage_frequency": 10,
            "support_calls": 3, "payment_delay": 5, "subscription_type": "Standard",
            "contract_length": "Monthly", "total_spend": 500.0, "last_interaction": 20
        }"#;
        let record: FeatureRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record, FeatureRecord::default());
    }
}
