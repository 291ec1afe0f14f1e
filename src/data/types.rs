use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Geography {
    France,
    Spain,
    Germany,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CardType {
    Silver,
    Gold,
    Platinum,
    Diamond,
}

/// Customer attributes submitted to `POST {base_url}/prediction`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PredictionRequest {
    pub credit_score: u32,
    pub geography: Geography,
    pub gender: Gender,
    pub age: u32,
    pub tenure: u32,
    pub balance: f64,
    pub num_of_products: u8,
    pub has_cr_card: bool,
    pub is_active_member: bool,
    pub satisfaction: u8,
    pub estimated_salary: f64,
    pub points_earned: u32,
    pub card_type: CardType,
}

/// Verdict returned by the prediction service.
///
/// `will_churn` is the model's own decision and is never recomputed from
/// `churn_probability`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResponse {
    pub churn_probability: f64,
    pub will_churn: bool,
    /// ISO-8601, display only
    pub predicted_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub number_of_predictions: u64,
    pub mean_churn_probability: f64,
}

/// True for a finite value inside [0, 1].
pub fn is_probability(value: f64) -> bool {
    value.is_finite() && (0.0..=1.0).contains(&value)
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl Geography {
    pub const ALL: [Geography; 3] = [Geography::France, Geography::Spain, Geography::Germany];

    pub fn as_str(&self) -> &'static str {
        match self {
            Geography::France => "France",
            Geography::Spain => "Spain",
            Geography::Germany => "Germany",
        }
    }
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

impl CardType {
    pub const ALL: [CardType; 4] = [
        CardType::Silver,
        CardType::Gold,
        CardType::Platinum,
        CardType::Diamond,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CardType::Silver => "SILVER",
            CardType::Gold => "GOLD",
            CardType::Platinum => "PLATINUM",
            CardType::Diamond => "DIAMOND",
        }
    }
}

// Case-insensitive parsing for values typed on the command line
macro_rules! wire_enum_text {
    ($ty:ty, $kind:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let trimmed = s.trim();
                <$ty>::ALL
                    .into_iter()
                    .find(|v| v.as_str().eq_ignore_ascii_case(trimmed))
                    .ok_or_else(|| UnknownVariant {
                        kind: $kind,
                        value: trimmed.to_string(),
                    })
            }
        }
    };
}

wire_enum_text!(Geography, "geography");
wire_enum_text!(Gender, "gender");
wire_enum_text!(CardType, "card type");

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_request() -> PredictionRequest {
        PredictionRequest {
            credit_score: 619,
            geography: Geography::Germany,
            gender: Gender::Female,
            age: 42,
            tenure: 2,
            balance: 83807.86,
            num_of_products: 2,
            has_cr_card: false,
            is_active_member: true,
            satisfaction: 4,
            estimated_salary: 112542.58,
            points_earned: 456,
            card_type: CardType::Diamond,
        }
    }

    #[test]
    fn test_request_wire_field_names() {
        let value = serde_json::to_value(sample_request()).unwrap();

        assert_eq!(
            value,
            json!({
                "creditScore": 619,
                "geography": "Germany",
                "gender": "Female",
                "age": 42,
                "tenure": 2,
                "balance": 83807.86,
                "numOfProducts": 2,
                "hasCrCard": false,
                "isActiveMember": true,
                "satisfaction": 4,
                "estimatedSalary": 112542.58,
                "pointsEarned": 456,
                "cardType": "DIAMOND"
            })
        );
    }

    #[test]
    fn test_request_survives_wire_round_trip() {
        let request = sample_request();
        let wire = serde_json::to_string(&request).unwrap();
        let back: PredictionRequest = serde_json::from_str(&wire).unwrap();

        assert_eq!(back, request);
    }

    #[test]
    fn test_partial_request_rejected() {
        let partial = json!({ "creditScore": 600, "geography": "France" });
        assert!(serde_json::from_value::<PredictionRequest>(partial).is_err());
    }

    #[test]
    fn test_response_and_stats_parse_camel_case() {
        let response: PredictionResponse = serde_json::from_value(json!({
            "churnProbability": 0.82,
            "willChurn": true,
            "predictedAt": "2025-03-14T09:26:53Z"
        }))
        .unwrap();
        assert_eq!(response.churn_probability, 0.82);
        assert!(response.will_churn);
        assert_eq!(response.predicted_at, "2025-03-14T09:26:53Z");

        let stats: StatsResponse = serde_json::from_value(json!({
            "numberOfPredictions": 128,
            "meanChurnProbability": 0.204
        }))
        .unwrap();
        assert_eq!(stats.number_of_predictions, 128);
        assert_eq!(stats.mean_churn_probability, 0.204);
    }

    #[test]
    fn test_snake_case_response_rejected() {
        let legacy = json!({
            "churn_probability": 0.4,
            "prediction": false,
            "timeStamp": "2025-03-14T09:26:53Z"
        });
        assert!(serde_json::from_value::<PredictionResponse>(legacy).is_err());
    }

    #[test]
    fn test_enum_parsing_ignores_case() {
        assert_eq!("FRANCE".parse::<Geography>().unwrap(), Geography::France);
        assert_eq!(" female ".parse::<Gender>().unwrap(), Gender::Female);
        assert_eq!("platinum".parse::<CardType>().unwrap(), CardType::Platinum);

        let err = "Portugal".parse::<Geography>().unwrap_err();
        assert_eq!(err.to_string(), "unknown geography 'Portugal'");
    }

    #[test]
    fn test_is_probability() {
        assert!(is_probability(0.0));
        assert!(is_probability(1.0));
        assert!(!is_probability(1.01));
        assert!(!is_probability(-0.1));
        assert!(!is_probability(f64::NAN));
    }
}
