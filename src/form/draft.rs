use std::ops::RangeInclusive;
use std::str::FromStr;
use crate::data::types::{CardType, Gender, Geography, PredictionRequest, UnknownVariant};

/// Wire names of every field a draft accepts, in form order.
pub const FIELDS: [&str; 13] = [
    "creditScore",
    "geography",
    "gender",
    "age",
    "tenure",
    "balance",
    "numOfProducts",
    "hasCrCard",
    "isActiveMember",
    "satisfaction",
    "estimatedSalary",
    "pointsEarned",
    "cardType",
];

const CREDIT_SCORE_RANGE: RangeInclusive<u32> = 50..=850;
const AGE_RANGE: RangeInclusive<u32> = 18..=100;
const TENURE_RANGE: RangeInclusive<u32> = 0..=50;
const PRODUCTS_RANGE: RangeInclusive<u8> = 1..=4;
const SATISFACTION_RANGE: RangeInclusive<u8> = 1..=5;

/// Mutable draft of a prediction request.
///
/// Always holds a complete request; edits replace one field at a time and a
/// rejected edit leaves the draft as it was.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionDraft {
    request: PredictionRequest,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FormError {
    #[error("unknown field '{0}' (expected one of: {fields})", fields = FIELDS.join(", "))]
    UnknownField(String),

    #[error("invalid value '{value}' for {field}: {reason}")]
    InvalidValue {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("{field} must be between {min} and {max} (got {value})")]
    OutOfRange {
        field: &'static str,
        min: f64,
        max: f64,
        value: f64,
    },

    #[error("{field} must be a finite, non-negative amount (got {value})")]
    InvalidAmount { field: &'static str, value: f64 },

    #[error("expected field=value, got '{0}'")]
    MalformedAssignment(String),
}

impl Default for PredictionDraft {
    fn default() -> Self {
        Self {
            request: PredictionRequest {
                credit_score: 650,
                geography: Geography::France,
                gender: Gender::Male,
                age: 35,
                tenure: 5,
                balance: 50000.0,
                num_of_products: 1,
                has_cr_card: true,
                is_active_member: true,
                satisfaction: 3,
                estimated_salary: 50000.0,
                points_earned: 500,
                card_type: CardType::Silver,
            },
        }
    }
}

impl PredictionDraft {
    pub fn request(&self) -> &PredictionRequest {
        &self.request
    }

    /// Update one field by its wire name.
    pub fn set(&mut self, field: &str, value: &str) -> Result<(), FormError> {
        let req = &mut self.request;

        match field {
            "creditScore" => req.credit_score = parse_number("creditScore", value)?,
            "geography" => req.geography = parse_choice("geography", value)?,
            "gender" => req.gender = parse_choice("gender", value)?,
            "age" => req.age = parse_number("age", value)?,
            "tenure" => req.tenure = parse_number("tenure", value)?,
            "balance" => req.balance = parse_number("balance", value)?,
            "numOfProducts" => req.num_of_products = parse_number("numOfProducts", value)?,
            "hasCrCard" => req.has_cr_card = parse_flag("hasCrCard", value)?,
            "isActiveMember" => req.is_active_member = parse_flag("isActiveMember", value)?,
            "satisfaction" => req.satisfaction = parse_number("satisfaction", value)?,
            "estimatedSalary" => req.estimated_salary = parse_number("estimatedSalary", value)?,
            "pointsEarned" => req.points_earned = parse_number("pointsEarned", value)?,
            "cardType" => req.card_type = parse_choice("cardType", value)?,
            other => return Err(FormError::UnknownField(other.to_string())),
        }

        Ok(())
    }

    /// Apply a `field=value` assignment as typed on the command line
    pub fn apply_assignment(&mut self, assignment: &str) -> Result<(), FormError> {
        let (field, value) = assignment
            .split_once('=')
            .ok_or_else(|| FormError::MalformedAssignment(assignment.to_string()))?;

        self.set(field.trim(), value.trim())
    }

    /// Overlay every entry of a TOML table keyed by wire field names.
    ///
    /// All or nothing: one bad entry leaves the draft untouched.
    pub fn apply_table(&mut self, table: &toml::Table) -> Result<(), FormError> {
        let mut next = self.clone();

        for (field, value) in table {
            let text = match value {
                toml::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            next.set(field, &text)?;
        }

        *self = next;
        Ok(())
    }

    /// Check the draft against the bounds the input form enforces
    pub fn validate(&self) -> Result<(), FormError> {
        let req = &self.request;

        check_range("creditScore", req.credit_score, CREDIT_SCORE_RANGE)?;
        check_range("age", req.age, AGE_RANGE)?;
        check_range("tenure", req.tenure, TENURE_RANGE)?;
        check_range("numOfProducts", req.num_of_products, PRODUCTS_RANGE)?;
        check_range("satisfaction", req.satisfaction, SATISFACTION_RANGE)?;
        check_amount("balance", req.balance)?;
        check_amount("estimatedSalary", req.estimated_salary)?;

        Ok(())
    }
}

fn parse_number<T>(field: &'static str, value: &str) -> Result<T, FormError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| FormError::InvalidValue {
        field,
        value: value.to_string(),
        reason: e.to_string(),
    })
}

fn parse_choice<T>(field: &'static str, value: &str) -> Result<T, FormError>
where
    T: FromStr<Err = UnknownVariant>,
{
    value.parse().map_err(|e: UnknownVariant| FormError::InvalidValue {
        field,
        value: value.to_string(),
        reason: e.to_string(),
    })
}

fn parse_flag(field: &'static str, value: &str) -> Result<bool, FormError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(FormError::InvalidValue {
            field,
            value: value.to_string(),
            reason: "expected true or false".to_string(),
        }),
    }
}

fn check_range<T>(field: &'static str, value: T, range: RangeInclusive<T>) -> Result<(), FormError>
where
    T: PartialOrd + Copy + Into<f64>,
{
    if range.contains(&value) {
        return Ok(());
    }

    Err(FormError::OutOfRange {
        field,
        min: (*range.start()).into(),
        max: (*range.end()).into(),
        value: value.into(),
    })
}

fn check_amount(field: &'static str, value: f64) -> Result<(), FormError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(FormError::InvalidAmount { field, value })
    }
}
