use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::stories::errors::StoryError;

/// The comedians a story can be told as. The wire value is the snake_case
/// name; `Display` and `FromStr` round-trip it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Comedian {
    ChiquitoDeLaCalzada,
    JoseMota,
    LeoHarlem,
}

impl Comedian {
    pub const ALL: [Comedian; 3] = [
        Comedian::ChiquitoDeLaCalzada,
        Comedian::JoseMota,
        Comedian::LeoHarlem,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Comedian::ChiquitoDeLaCalzada => "chiquito_de_la_calzada",
            Comedian::JoseMota => "jose_mota",
            Comedian::LeoHarlem => "leo_harlem",
        }
    }

    /// Human-readable stage name
    pub fn display_name(&self) -> &'static str {
        match self {
            Comedian::ChiquitoDeLaCalzada => "Chiquito de la Calzada",
            Comedian::JoseMota => "José Mota",
            Comedian::LeoHarlem => "Leo Harlem",
        }
    }
}

impl std::fmt::Display for Comedian {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Comedian {
    type Err = StoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "chiquito_de_la_calzada" => Ok(Comedian::ChiquitoDeLaCalzada),
            "jose_mota" => Ok(Comedian::JoseMota),
            "leo_harlem" => Ok(Comedian::LeoHarlem),
            other => Err(StoryError::UnknownComedian(other.to_string())),
        }
    }
}

/// A generated story as persisted. `comedian` is stored as its wire value.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Story {
    pub id: String,
    pub user_id: String,
    pub prompt: String,
    pub comedian: String,
    pub story: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_comedian_wire_value_roundtrip() {
        for comedian in Comedian::ALL {
            let parsed = Comedian::from_str(comedian.as_str()).expect("parse");
            assert_eq!(parsed, comedian);
        }
    }

    #[test]
    fn test_comedian_serde_uses_snake_case() {
        let json = serde_json::to_string(&Comedian::JoseMota).expect("serialize");
        assert_eq!(json, r#""jose_mota""#);
        let back: Comedian = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, Comedian::JoseMota);
    }

    #[test]
    fn test_unknown_comedian_is_rejected() {
        let result = Comedian::from_str("eugenio");
        assert!(matches!(result, Err(StoryError::UnknownComedian(_))));
    }
}
