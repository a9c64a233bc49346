use serde::Serialize;

/// One persisted validation event. Never updated after insert.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub id: i64,
    pub identifier: String,
    pub address: String,
    pub balance: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewRecord {
    pub identifier: String,
    pub address: String,
    pub balance: f64,
}

impl NewRecord {
    pub fn into_record(self, id: i64) -> Record {
        Record {
            id,
            identifier: self.identifier,
            address: self.address,
            balance: self.balance,
        }
    }
}

/// Terminal result of one validation request.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Success { balance: f64 },
    InvalidAddressFormat,
    BalanceLookupFailed,
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }

    /// Message sent back to the requester.
    pub fn reply(&self) -> String {
        match self {
            Outcome::Success { balance } => {
                format!("✅ Wallet address verified! Balance: {balance} ETH")
            }
            Outcome::InvalidAddressFormat => "❌ Invalid Ethereum wallet address format.".to_string(),
            Outcome::BalanceLookupFailed => {
                "⚠️ Failed to fetch wallet balance. Please try again later.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replies_are_human_readable() {
        assert_eq!(
            Outcome::Success { balance: 42.5 }.reply(),
            "✅ Wallet address verified! Balance: 42.5 ETH"
        );
        assert_eq!(
            Outcome::Success { balance: 0.0 }.reply(),
            "✅ Wallet address verified! Balance: 0 ETH"
        );
        assert!(Outcome::InvalidAddressFormat.reply().contains("Invalid"));
        assert!(Outcome::BalanceLookupFailed.reply().contains("Failed"));
    }

    #[test]
    fn new_record_keeps_fields() {
        let record = NewRecord {
            identifier: "42".into(),
            address: "0x1234567890123456789012345678901234567890".into(),
            balance: 1.5,
        }
        .into_record(7);
        assert_eq!(record.id, 7);
        assert_eq!(record.identifier, "42");
        assert_eq!(record.balance, 1.5);
    }
}
