use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// ProgramId
// ---------------------------------------------------------------------------

/// Length in bytes of an on-chain program address.
pub const PROGRAM_ID_LEN: usize = 32;

/// A 32-byte program address, rendered as base58.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgramId([u8; PROGRAM_ID_LEN]);

impl ProgramId {
    pub fn new(bytes: [u8; PROGRAM_ID_LEN]) -> Self {
        ProgramId(bytes)
    }

    /// Decode a base58 address. The error is a human-readable reason.
    pub fn from_base58(s: &str) -> std::result::Result<Self, String> {
        let bytes = bs58::decode(s)
            .into_vec()
            .map_err(|e| format!("not valid base58 ({e})"))?;
        let bytes: [u8; PROGRAM_ID_LEN] = bytes.try_into().map_err(|b: Vec<u8>| {
            format!("decodes to {} bytes, expected {PROGRAM_ID_LEN}", b.len())
        })?;
        Ok(ProgramId(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; PROGRAM_ID_LEN] {
        &self.0
    }

    pub fn to_base58(&self) -> String {
        bs58::encode(self.0).into_string()
    }
}

impl fmt::Display for ProgramId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base58())
    }
}

impl FromStr for ProgramId {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        ProgramId::from_base58(s)
    }
}

impl Serialize for ProgramId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// ---------------------------------------------------------------------------
// Signature
// ---------------------------------------------------------------------------

/// Handle to a transaction, as returned by a history listing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Signature(String);

impl Signature {
    pub fn new(s: impl Into<String>) -> Self {
        Signature(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Signature {
    fn from(s: &str) -> Self {
        Signature(s.to_owned())
    }
}

impl From<String> for Signature {
    fn from(s: String) -> Self {
        Signature(s)
    }
}

// ---------------------------------------------------------------------------
// Commitment
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Commitment {
    Processed,
    #[default]
    Confirmed,
    Finalized,
}

impl Commitment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Commitment::Processed => "processed",
            Commitment::Confirmed => "confirmed",
            Commitment::Finalized => "finalized",
        }
    }
}

impl fmt::Display for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Commitment {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "processed" => Ok(Commitment::Processed),
            "confirmed" => Ok(Commitment::Confirmed),
            "finalized" => Ok(Commitment::Finalized),
            other => Err(format!(
                "unknown commitment '{other}' (expected processed, confirmed or finalized)"
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// ActivityRecord
// ---------------------------------------------------------------------------

/// A fetched transaction, reduced to the parts the probe inspects.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ActivityRecord {
    pub slot: Option<u64>,
    pub log_messages: Vec<String>,
}

impl ActivityRecord {
    pub fn with_logs<I, S>(logs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ActivityRecord {
            slot: None,
            log_messages: logs.into_iter().map(Into::into).collect(),
        }
    }

    /// First log line containing `marker` verbatim (case-sensitive).
    pub fn find_marker(&self, marker: &str) -> Option<&str> {
        self.log_messages
            .iter()
            .map(String::as_str)
            .find(|line| line.contains(marker))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const CI_PROOF_CORE: &str = "4Nd1mBQtrMJVYVfKf2PJy9NZUZdTAsp7D4xWLs4gDB4T";

    #[test]
    fn program_id_parses_and_displays_base58() {
        let id: ProgramId = CI_PROOF_CORE.parse().unwrap();
        assert_eq!(id.to_string(), CI_PROOF_CORE);
        assert_eq!(id.as_bytes().len(), PROGRAM_ID_LEN);
    }

    #[test]
    fn program_id_rejects_bad_alphabet() {
        // '0', 'O', 'I' and 'l' are not in the base58 alphabet
        let err = ProgramId::from_base58("0OIl").unwrap_err();
        assert!(err.contains("base58"), "{err}");
    }

    #[test]
    fn program_id_rejects_wrong_length() {
        let err = ProgramId::from_base58("3yZe7d").unwrap_err();
        assert!(err.contains("expected 32"), "{err}");
    }

    #[test]
    fn program_id_serializes_as_string() {
        let id = ProgramId::from_base58(CI_PROOF_CORE).unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{CI_PROOF_CORE}\""));
    }

    #[test]
    fn commitment_round_trips_through_str() {
        for c in [
            Commitment::Processed,
            Commitment::Confirmed,
            Commitment::Finalized,
        ] {
            assert_eq!(c.as_str().parse::<Commitment>().unwrap(), c);
        }
        assert!("max".parse::<Commitment>().is_err());
    }

    #[test]
    fn find_marker_is_case_sensitive() {
        let record = ActivityRecord::with_logs([
            "Program 4Nd1 invoke [1]",
            "Program log: hello, world!",
        ]);
        assert_eq!(record.find_marker("Program log: Hello, world!"), None);
    }

    #[test]
    fn find_marker_returns_first_matching_line() {
        let record = ActivityRecord::with_logs([
            "Program log: Instruction: SayHello",
            "Program log: Hello, world! (1)",
            "Program log: Hello, world! (2)",
        ]);
        assert_eq!(
            record.find_marker("Hello, world!"),
            Some("Program log: Hello, world! (1)")
        );
    }

    #[test]
    fn find_marker_on_empty_logs() {
        assert_eq!(ActivityRecord::default().find_marker("x"), None);
    }
}
