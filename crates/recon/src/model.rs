use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Address {
    pub value: Option<String>,
    pub country: Option<String>,
    pub postal_code: Option<String>,
}

/// An alternate name form for an entity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Alias {
    pub value: Option<String>,
    pub kind: Option<String>,
}

/// External identifier (passport, registration number, ...) plus free-text context.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdNumber {
    pub value: Option<String>,
    pub comment: Option<String>,
}

/// Canonical watchlist entity, built once per input line and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub id: i64,
    pub kind: String,
    pub name: String,
    pub aliases: Vec<Alias>,
    pub nationality: Vec<String>,
    pub addresses: Vec<Address>,
    pub id_numbers: Vec<IdNumber>,
    pub place_of_birth: Option<String>,
    pub position: Option<String>,
    pub reported_dates_of_birth: Vec<String>,
}

impl Record {
    /// Record with only the required fields set.
    pub fn new(id: i64, kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id,
            kind: kind.into(),
            name: name.into(),
            aliases: Vec::new(),
            nationality: Vec::new(),
            addresses: Vec::new(),
            id_numbers: Vec::new(),
            place_of_birth: None,
            position: None,
            reported_dates_of_birth: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Evidence
// ---------------------------------------------------------------------------

/// One matched criterion between a left (list A) and a right (list B) record.
///
/// Values are the display strings as read, not the normalized forms used for
/// comparison. Serialized untagged with the `gbr_*` / `ofac_*` keys of the
/// established output format. `IdentifierMatch` has only optional fields, so it
/// must stay the last variant for untagged deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Evidence {
    NameToName {
        #[serde(rename = "gbr_name")]
        left_name: String,
        #[serde(rename = "ofac_name")]
        right_name: String,
    },
    NameToAlias {
        #[serde(rename = "gbr_name")]
        left_name: String,
        #[serde(rename = "ofac_alias")]
        right_alias: String,
    },
    AliasToName {
        #[serde(rename = "gbr_alias")]
        left_alias: String,
        #[serde(rename = "ofac_name")]
        right_name: String,
    },
    AliasToAlias {
        #[serde(rename = "gbr_alias")]
        left_alias: String,
        #[serde(rename = "ofac_alias")]
        right_alias: String,
    },
    /// Absent identifier values are written as `null`.
    IdentifierMatch {
        #[serde(rename = "gbr_id_number")]
        left_value: Option<String>,
        #[serde(rename = "gbr_comment")]
        left_comment: Option<String>,
        #[serde(rename = "ofac_id_number")]
        right_value: Option<String>,
        #[serde(rename = "ofac_comment")]
        right_comment: Option<String>,
    },
}

impl Evidence {
    pub fn kind(&self) -> EvidenceKind {
        match self {
            Self::NameToName { .. } => EvidenceKind::NameToName,
            Self::NameToAlias { .. } => EvidenceKind::NameToAlias,
            Self::AliasToName { .. } => EvidenceKind::AliasToName,
            Self::AliasToAlias { .. } => EvidenceKind::AliasToAlias,
            Self::IdentifierMatch { .. } => EvidenceKind::IdentifierMatch,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EvidenceKind {
    NameToName,
    NameToAlias,
    AliasToName,
    AliasToAlias,
    IdentifierMatch,
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Aggregated evidence for one left/right pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairResult {
    #[serde(rename = "gbr_id")]
    pub left_id: i64,
    #[serde(rename = "ofac_id")]
    pub right_id: i64,
    pub matches: Vec<Evidence>,
}

impl PairResult {
    pub fn has_matches(&self) -> bool {
        !self.matches.is_empty()
    }
}

/// Counters from one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    pub pairs_compared: u64,
    pub pairs_matched: u64,
    pub evidence: u64,
    pub shards: usize,
}
