//! Check-in records — the core data model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Trail difficulty rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Expert,
    Extreme,
}

impl Difficulty {
    /// The accepted wire spellings, in rating order.
    pub const ALL: [&'static str; 4] = ["Beginner", "Intermediate", "Expert", "Extreme"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Expert => "Expert",
            Difficulty::Extreme => "Extreme",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Beginner" => Ok(Difficulty::Beginner),
            "Intermediate" => Ok(Difficulty::Intermediate),
            "Expert" => Ok(Difficulty::Expert),
            "Extreme" => Ok(Difficulty::Extreme),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}

/// One accepted check-in. Immutable once created; the store stamps
/// `timestamp` and `transaction_id` at append time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInRecord {
    pub trail_id: String,
    pub trail_name: String,
    pub difficulty: Difficulty,
    pub wallet_address: String,
    pub timestamp: DateTime<Utc>,
    /// Opaque correlation token for the (stubbed) chain submission.
    pub transaction_id: String,
}

/// A validated check-in that has not been stored yet.
#[derive(Debug, Clone)]
pub struct NewCheckIn {
    pub trail_id: String,
    pub trail_name: String,
    pub difficulty: Difficulty,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_roundtrip() {
        for name in Difficulty::ALL {
            let d: Difficulty = name.parse().unwrap();
            assert_eq!(d.as_str(), name);
        }
        assert!("Insane".parse::<Difficulty>().is_err());
    }

    #[test]
    fn test_record_wire_format_is_camel_case() {
        let record = CheckInRecord {
            trail_id: "3".into(),
            trail_name: "Black Diamond".into(),
            difficulty: Difficulty::Expert,
            wallet_address: "addr_test_abc".into(),
            timestamp: Utc::now(),
            transaction_id: "tx_abc123def".into(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["trailName"], "Black Diamond");
        assert_eq!(json["walletAddress"], "addr_test_abc");
        assert_eq!(json["difficulty"], "Expert");
        assert_eq!(json["transactionId"], "tx_abc123def");
    }
}
