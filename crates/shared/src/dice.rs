//! Request and response bodies for `POST /api/dice`.
//!
//! The sheet client builds dice specs from whatever the sheet fields hold, so
//! numeric fields may arrive as JSON numbers or as numeric strings. Field names
//! follow the engine's vocabulary (`count`, `faces`, `reference`) and also
//! accept the sheet's legacy names (`num`, `roll`, `ref`).

use serde::{Deserialize, Deserializer, Serialize};
use sheetroll_domain::{DiceError, DieRequest, DieResult, ScoringRule};

/// A number as sent by the client: either a JSON number or a string holding one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Numeric {
    Number(serde_json::Number),
    Text(String),
}

impl Numeric {
    /// Best-effort numeric value; anything unparsable becomes NaN.
    pub fn as_f64(&self) -> f64 {
        match self {
            Self::Number(number) => number.as_f64().unwrap_or(f64::NAN),
            Self::Text(text) => text.trim().parse::<f64>().unwrap_or(f64::NAN),
        }
    }

    pub fn from_f64(value: f64) -> Self {
        serde_json::Number::from_f64(value)
            .map(Self::Number)
            .unwrap_or_else(|| Self::Text(value.to_string()))
    }
}

impl From<i64> for Numeric {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<i32> for Numeric {
    fn from(value: i32) -> Self {
        Self::Number(value.into())
    }
}

impl From<&str> for Numeric {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// One die as requested over the wire, before validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DieSpec {
    /// Number of dice
    #[serde(alias = "num")]
    pub count: Numeric,
    /// Faces per die
    #[serde(alias = "roll")]
    pub faces: Numeric,
    /// Rating the roll is judged against
    #[serde(default, alias = "ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<Numeric>,
}

impl DieSpec {
    pub fn new(count: impl Into<Numeric>, faces: impl Into<Numeric>) -> Self {
        Self {
            count: count.into(),
            faces: faces.into(),
            reference: None,
        }
    }

    pub fn with_reference(mut self, reference: f64) -> Self {
        self.reference = Some(Numeric::from_f64(reference));
        self
    }

    /// Validate into a domain request.
    pub fn to_request(&self) -> Result<DieRequest, DiceError> {
        DieRequest::from_numbers(
            self.count.as_f64(),
            self.faces.as_f64(),
            self.reference.as_ref().map(Numeric::as_f64),
        )
    }
}

/// Body of `POST /api/dice`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiceRollRequest {
    /// Dice to roll; a missing list is a bad request
    #[serde(default)]
    pub dices: Option<Vec<DieSpec>>,
    /// Scoring rule key ("20", "20b", "100", "100b")
    #[serde(
        default,
        deserialize_with = "resolver_key",
        skip_serializing_if = "Option::is_none"
    )]
    pub resolver_key: Option<ScoringRule>,
}

/// Empty or null keys mean "no classification"; numbers are read as their
/// decimal key so `20` and `"20"` select the same rule.
fn resolver_key<'de, D>(deserializer: D) -> Result<Option<ScoringRule>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    let rule = match raw {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::Bool(false)) => None,
        Some(serde_json::Value::String(key)) if key.is_empty() => None,
        Some(serde_json::Value::String(key)) => Some(ScoringRule::from_key(&key)),
        Some(serde_json::Value::Number(key)) => Some(ScoringRule::from_key(&key.to_string())),
        Some(_) => Some(ScoringRule::Unrecognized),
    };
    Ok(rule)
}

/// Response body of `POST /api/dice`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceRollResponse {
    pub results: Vec<DieResult>,
}
