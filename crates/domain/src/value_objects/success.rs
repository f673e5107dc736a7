//! Success tier classification
//!
//! Maps a resolved roll and a reference rating to a tier under one of four
//! fixed scoring rules. Within a rule the branches are evaluated top to bottom
//! and the first match wins; the branches overlap, so their order is part of
//! the rule.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Discrete outcome label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SuccessTier {
    Sucesso,
    Fracasso,
    Bom,
    Extremo,
    Unknown,
}

impl fmt::Display for SuccessTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Sucesso => "Sucesso",
            Self::Fracasso => "Fracasso",
            Self::Bom => "Bom",
            Self::Extremo => "Extremo",
            Self::Unknown => "Unknown",
        };
        f.write_str(label)
    }
}

/// Scoring rule selected by the caller's resolver key.
///
/// Wire keys are `"20"`, `"20b"`, `"100"` and `"100b"`. Any other key
/// deserializes to [`ScoringRule::Unrecognized`], which classifies every roll
/// as [`SuccessTier::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScoringRule {
    /// d20 roll-over: beat `20 - reference`
    #[serde(rename = "20")]
    Linear20,
    /// d20 roll-over with Bom/Extremo bands
    #[serde(rename = "20b")]
    Branched20,
    /// d100 roll-under: at most `reference`
    #[serde(rename = "100")]
    Linear100,
    /// d100 roll-under with Bom/Extremo bands
    #[serde(rename = "100b")]
    Branched100,
    #[serde(other)]
    Unrecognized,
}

impl ScoringRule {
    /// Resolve a wire key, falling back to `Unrecognized`.
    pub fn from_key(key: &str) -> Self {
        match key {
            "20" => Self::Linear20,
            "20b" => Self::Branched20,
            "100" => Self::Linear100,
            "100b" => Self::Branched100,
            _ => Self::Unrecognized,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Self::Linear20 => "20",
            Self::Branched20 => "20b",
            Self::Linear100 => "100",
            Self::Branched100 => "100b",
            Self::Unrecognized => "unrecognized",
        }
    }

    pub fn classify(self, reference: f64, roll: i64) -> SuccessTier {
        classify(self, reference, roll)
    }
}

/// Classify `roll` against `reference` under `rule`.
pub fn classify(rule: ScoringRule, reference: f64, roll: i64) -> SuccessTier {
    let value = roll as f64;
    let fifth = (reference * 0.2).floor();
    let half = (reference * 0.5).floor();

    match rule {
        ScoringRule::Linear20 => {
            if roll == 1 {
                SuccessTier::Fracasso
            } else if value > 20.0 - reference {
                SuccessTier::Sucesso
            } else {
                SuccessTier::Fracasso
            }
        }
        ScoringRule::Branched20 => {
            if roll == 1 {
                SuccessTier::Fracasso
            } else if value > 20.0 - fifth {
                SuccessTier::Extremo
            } else if value > 20.0 - half {
                SuccessTier::Bom
            } else if value > 20.0 - reference {
                SuccessTier::Sucesso
            } else {
                SuccessTier::Fracasso
            }
        }
        ScoringRule::Linear100 => {
            if value <= reference {
                SuccessTier::Sucesso
            } else {
                SuccessTier::Fracasso
            }
        }
        ScoringRule::Branched100 => {
            if roll == 100 {
                SuccessTier::Fracasso
            } else if roll == 1 {
                SuccessTier::Sucesso
            } else if value <= fifth {
                SuccessTier::Extremo
            } else if value <= half {
                SuccessTier::Bom
            } else if value <= reference {
                SuccessTier::Sucesso
            } else {
                SuccessTier::Fracasso
            }
        }
        ScoringRule::Unrecognized => SuccessTier::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear20() {
        assert_eq!(classify(ScoringRule::Linear20, 10.0, 1), SuccessTier::Fracasso);
        assert_eq!(classify(ScoringRule::Linear20, 10.0, 15), SuccessTier::Sucesso);
        assert_eq!(classify(ScoringRule::Linear20, 10.0, 9), SuccessTier::Fracasso);
        // Threshold is strict: 20 - 10 = 10 does not pass
        assert_eq!(classify(ScoringRule::Linear20, 10.0, 10), SuccessTier::Fracasso);
        assert_eq!(classify(ScoringRule::Linear20, 10.0, 11), SuccessTier::Sucesso);
    }

    #[test]
    fn test_linear20_natural_one_fails_even_with_huge_reference() {
        assert_eq!(classify(ScoringRule::Linear20, 25.0, 1), SuccessTier::Fracasso);
    }

    #[test]
    fn test_branched20() {
        // reference 10: Extremo > 18, Bom > 15, Sucesso > 10
        assert_eq!(classify(ScoringRule::Branched20, 10.0, 1), SuccessTier::Fracasso);
        assert_eq!(classify(ScoringRule::Branched20, 10.0, 19), SuccessTier::Extremo);
        assert_eq!(classify(ScoringRule::Branched20, 10.0, 18), SuccessTier::Bom);
        assert_eq!(classify(ScoringRule::Branched20, 10.0, 16), SuccessTier::Bom);
        assert_eq!(classify(ScoringRule::Branched20, 10.0, 15), SuccessTier::Sucesso);
        assert_eq!(classify(ScoringRule::Branched20, 10.0, 11), SuccessTier::Sucesso);
        assert_eq!(classify(ScoringRule::Branched20, 10.0, 10), SuccessTier::Fracasso);
    }

    #[test]
    fn test_branched20_floors_fractional_bands() {
        // reference 7: floor(1.4) = 1 -> Extremo > 19; floor(3.5) = 3 -> Bom > 17
        assert_eq!(classify(ScoringRule::Branched20, 7.0, 20), SuccessTier::Extremo);
        assert_eq!(classify(ScoringRule::Branched20, 7.0, 19), SuccessTier::Bom);
        assert_eq!(classify(ScoringRule::Branched20, 7.0, 18), SuccessTier::Bom);
        assert_eq!(classify(ScoringRule::Branched20, 7.0, 17), SuccessTier::Sucesso);
    }

    #[test]
    fn test_linear100() {
        assert_eq!(classify(ScoringRule::Linear100, 40.0, 40), SuccessTier::Sucesso);
        assert_eq!(classify(ScoringRule::Linear100, 40.0, 1), SuccessTier::Sucesso);
        assert_eq!(classify(ScoringRule::Linear100, 40.0, 41), SuccessTier::Fracasso);
    }

    #[test]
    fn test_branched100() {
        assert_eq!(classify(ScoringRule::Branched100, 50.0, 100), SuccessTier::Fracasso);
        assert_eq!(classify(ScoringRule::Branched100, 50.0, 1), SuccessTier::Sucesso);
        assert_eq!(classify(ScoringRule::Branched100, 50.0, 10), SuccessTier::Extremo);
        assert_eq!(classify(ScoringRule::Branched100, 50.0, 25), SuccessTier::Bom);
        assert_eq!(classify(ScoringRule::Branched100, 50.0, 50), SuccessTier::Sucesso);
        assert_eq!(classify(ScoringRule::Branched100, 50.0, 51), SuccessTier::Fracasso);
    }

    #[test]
    fn test_branched100_critical_failure_beats_high_reference() {
        assert_eq!(classify(ScoringRule::Branched100, 150.0, 100), SuccessTier::Fracasso);
    }

    #[test]
    fn test_branched100_natural_one_is_plain_success() {
        // 1 <= floor(50 * 0.2) would be Extremo, but the roll == 1 branch comes first
        assert_eq!(classify(ScoringRule::Branched100, 50.0, 1), SuccessTier::Sucesso);
    }

    #[test]
    fn test_unrecognized_rule_is_unknown() {
        assert_eq!(classify(ScoringRule::Unrecognized, 50.0, 1), SuccessTier::Unknown);
        assert_eq!(ScoringRule::from_key("d6"), ScoringRule::Unrecognized);
    }

    #[test]
    fn test_keys_round_trip_through_serde() {
        let rule: ScoringRule = serde_json::from_str(r#""20b""#).unwrap();
        assert_eq!(rule, ScoringRule::Branched20);
        assert_eq!(rule.key(), "20b");

        let rule: ScoringRule = serde_json::from_str(r#""pbta""#).unwrap();
        assert_eq!(rule, ScoringRule::Unrecognized);
    }

    #[test]
    fn test_tier_serializes_as_label() {
        assert_eq!(
            serde_json::to_string(&SuccessTier::Extremo).unwrap(),
            r#""Extremo""#
        );
        assert_eq!(SuccessTier::Fracasso.to_string(), "Fracasso");
    }
}
