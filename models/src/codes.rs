// models/src/codes.rs

use std::fmt;

/// Prefix of a human-readable code, one per sequenced entity type.
///
/// The display code (`PT-001`, `V-002`, `B-003`) is distinct from the
/// record's storage UUID: it is minted from the entity's named counter and
/// shown to clinic staff. Numbers are never reused and are not guaranteed
/// contiguous (an aborted registration leaves a gap).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodePrefix {
    Patient,
    Visit,
    Bill,
}

impl CodePrefix {
    pub fn as_str(&self) -> &'static str {
        match self {
            CodePrefix::Patient => "PT",
            CodePrefix::Visit => "V",
            CodePrefix::Bill => "B",
        }
    }

    /// Name of the counter record backing this prefix.
    pub fn sequence_name(&self) -> &'static str {
        match self {
            CodePrefix::Patient => "patients",
            CodePrefix::Visit => "visits",
            CodePrefix::Bill => "bills",
        }
    }

    /// Formats an allocated sequence number into its display code,
    /// zero-padded to three digits.
    pub fn code(&self, number: u64) -> String {
        format!("{}-{:03}", self.as_str(), number)
    }
}

impl fmt::Display for CodePrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
