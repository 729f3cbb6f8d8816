//! Prediction request/response models

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use churn_core::{
    ChurnLabel, ChurnPrediction, ContractLength, FeatureRecord, Gender, SubscriptionType,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use crate::views::predict::banner_message;

/// Predict form / JSON body. Field names match the form controls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct PredictRequest {
    #[validate(range(max = 120, message = "must be between 0 and 120"))]
    pub age: u32,

    pub gender: Gender,

    #[validate(range(max = 100, message = "must be between 0 and 100"))]
    pub tenure: u32,

    #[validate(range(max = 100, message = "must be between 0 and 100"))]
    pub usage_frequency: u32,

    #[validate(range(max = 50, message = "must be between 0 and 50"))]
    pub support_calls: u32,

    #[validate(range(max = 100, message = "must be between 0 and 100"))]
    pub payment_delay: u32,

    pub subscription_type: SubscriptionType,

    pub contract_length: ContractLength,

    #[validate(range(min = 0.0, message = "must not be negative"))]
    pub total_spend: f64,

    #[validate(range(max = 100, message = "must be between 0 and 100"))]
    pub last_interaction: u32,
}

impl Default for PredictRequest {
    fn default() -> Self {
        FeatureRecord::default().into()
    }
}

impl From<FeatureRecord> for PredictRequest {
    fn from(r: FeatureRecord) -> Self {
        Self {
            age: r.age,
            gender: r.gender,
            tenure: r.tenure,
            usage_frequency: r.usage_frequency,
            support_calls: r.support_calls,
            payment_delay: r.payment_delay,
            subscription_type: r.subscription_type,
            contract_length: r.contract_length,
            total_spend: r.total_spend,
            last_interaction: r.last_interaction,
        }
    }
}

impl PredictRequest {
    pub fn to_record(&self) -> FeatureRecord {
        FeatureRecord {
            age: self.age,
            gender: self.gender,
            tenure: self.tenure,
            usage_frequency: self.usage_frequency,
            support_calls: self.support_calls,
            payment_delay: self.payment_delay,
            subscription_type: self.subscription_type,
            contract_length: self.contract_length,
            total_spend: self.total_spend,
            last_interaction: self.last_interaction,
        }
    }
}

/// One line per failing field, sorted by field name
pub fn describe_validation(errors: &ValidationErrors) -> String {
    let mut lines: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                let reason = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                format!("{} {}", field, reason)
            })
        })
        .collect();
    lines.sort();
    lines.join("; ")
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PredictResponse {
    pub prediction_id: Uuid,
    /// 0 = not churned, 1 = churned
    pub label: ChurnLabel,
    pub churned: bool,
    pub message: String,
    pub confidence: f64,
    pub confidence_display: String,
    /// `[p(not churned), p(churned)]`
    pub probabilities: [f64; 2],
    pub encoded: BTreeMap<String, f64>,
    pub inference_time_us: u64,
    pub predicted_at: DateTime<Utc>,
}

impl From<ChurnPrediction> for PredictResponse {
    fn from(p: ChurnPrediction) -> Self {
        Self {
            prediction_id: Uuid::new_v4(),
            label: p.label,
            churned: p.label.is_churned(),
            message: banner_message(p.label).to_string(),
            confidence: p.confidence,
            confidence_display: p.confidence_display(),
            probabilities: p.probabilities.0,
            encoded: p
                .encoded
                .named_values()
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
            inference_time_us: p.inference_time_us,
            predicted_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_request_matches_form_defaults() {
        let req = PredictRequest::default();
        assert_eq!(req.age, 30);
        assert_eq!(req.gender, Gender::Male);
        assert_eq!(req.subscription_type, SubscriptionType::Standard);
        assert_eq!(req.contract_length, ContractLength::Monthly);
        assert_eq!(req.total_spend, 500.0);
        assert!(req.validate().is_ok());
        assert_eq!(req.to_record(), FeatureRecord::default());
    }

    #[test]
    fn test_range_limits() {
        let ok = PredictRequest { age: 120, support_calls: 50, total_spend: 0.0, ..Default::default() };
        assert!(ok.validate().is_ok());

        let too_old = PredictRequest { age: 121, ..Default::default() };
        let err = too_old.validate().unwrap_err();
        assert_eq!(describe_validation(&err), "age must be between 0 and 120");

        let many = PredictRequest {
            support_calls: 51,
            total_spend: -1.0,
            ..Default::default()
        };
        let err = many.validate().unwrap_err();
        assert_eq!(
            describe_validation(&err),
            "support_calls must be between 0 and 50; total_spend must not be negative"
        );
    }
}
