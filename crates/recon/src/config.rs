use serde::Deserialize;

use crate::error::XrefError;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// A cross-reference job: two line-delimited sources and one merged output.
#[derive(Debug, Clone, Deserialize)]
pub struct XrefConfig {
    pub name: String,
    /// List A. Its ids are reported as `gbr_id`.
    pub left: SourceConfig,
    /// List B. Its ids are reported as `ofac_id`.
    pub right: SourceConfig,
    pub output: OutputConfig,
    #[serde(default)]
    pub execution: ExecutionConfig,
    #[serde(default)]
    pub records: RecordsConfig,
}

// ---------------------------------------------------------------------------
// Sources + Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    pub name: String,
    pub file: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub file: String,
    #[serde(default)]
    pub order: OutputOrder,
}

/// Ordering of the merged output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputOrder {
    /// Left-major input order: shard order, then left record, then right record.
    #[default]
    Input,
    /// Sorted by `(left_id, right_id)`.
    Ids,
}

impl std::fmt::Display for OutputOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Input => write!(f, "input"),
            Self::Ids => write!(f, "ids"),
        }
    }
}

// ---------------------------------------------------------------------------
// Execution
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct ExecutionConfig {
    /// Left records per shard.
    #[serde(default = "default_shard_size")]
    pub shard_size: usize,
    /// Worker threads; 0 uses one per core.
    #[serde(default)]
    pub workers: usize,
}

fn default_shard_size() -> usize {
    256
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            shard_size: default_shard_size(),
            workers: 0,
        }
    }
}

// ---------------------------------------------------------------------------
// Invalid record policy
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct RecordsConfig {
    #[serde(default)]
    pub on_invalid: InvalidRecordPolicy,
}

/// What to do with a line that cannot become a [`Record`](crate::model::Record).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidRecordPolicy {
    /// Report the line and continue with the rest of the source.
    #[default]
    Skip,
    /// Fail the whole load on the first invalid line.
    Abort,
}

impl std::fmt::Display for InvalidRecordPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Skip => write!(f, "skip"),
            Self::Abort => write!(f, "abort"),
        }
    }
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl XrefConfig {
    pub fn from_toml(input: &str) -> Result<Self, XrefError> {
        let config: XrefConfig =
            toml::from_str(input).map_err(|e| XrefError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), XrefError> {
        if self.name.trim().is_empty() {
            return Err(XrefError::ConfigValidation("name must not be empty".into()));
        }

        for (side, source) in [("left", &self.left), ("right", &self.right)] {
            if source.name.trim().is_empty() {
                return Err(XrefError::ConfigValidation(format!(
                    "{side}: source name must not be empty"
                )));
            }
            if source.file.trim().is_empty() {
                return Err(XrefError::ConfigValidation(format!(
                    "{side} source '{}': file must not be empty",
                    source.name
                )));
            }
        }

        if self.left.name == self.right.name {
            return Err(XrefError::ConfigValidation(format!(
                "left and right sources share the name '{}'",
                self.left.name
            )));
        }

        if self.output.file.trim().is_empty() {
            return Err(XrefError::ConfigValidation("output file must not be empty".into()));
        }

        self.execution.validate()
    }
}

impl ExecutionConfig {
    pub fn validate(&self) -> Result<(), XrefError> {
        if self.shard_size == 0 {
            return Err(XrefError::ConfigValidation("shard_size must be at least 1".into()));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"
name = "gbr-ofac"

[left]
name = "gbr"
file = "gbr.jsonl"

[right]
name = "ofac"
file = "ofac.jsonl"

[output]
file = "output.jsonl"
"#;

    #[test]
    fn parse_valid_with_defaults() {
        let config = XrefConfig::from_toml(VALID).unwrap();
        assert_eq!(config.name, "gbr-ofac");
        assert_eq!(config.left.file, "gbr.jsonl");
        assert_eq!(config.right.name, "ofac");
        assert_eq!(config.output.order, OutputOrder::Input);
        assert_eq!(config.execution.shard_size, 256);
        assert_eq!(config.execution.workers, 0);
        assert_eq!(config.records.on_invalid, InvalidRecordPolicy::Skip);
    }

    #[test]
    fn parse_all_sections() {
        let input = format!(
            r#"{VALID}
order = "ids"

[execution]
shard_size = 16
workers = 4

[records]
on_invalid = "abort"
"#
        );
        let config = XrefConfig::from_toml(&input).unwrap();
        assert_eq!(config.output.order, OutputOrder::Ids);
        assert_eq!(config.execution.shard_size, 16);
        assert_eq!(config.execution.workers, 4);
        assert_eq!(config.records.on_invalid, InvalidRecordPolicy::Abort);
    }

    #[test]
    fn reject_zero_shard_size() {
        let input = format!("{VALID}\n[execution]\nshard_size = 0\n");
        let err = XrefConfig::from_toml(&input).unwrap_err();
        assert!(matches!(err, XrefError::ConfigValidation(_)));
    }

    #[test]
    fn reject_same_source_names() {
        let input = VALID.replace("name = \"ofac\"", "name = \"gbr\"");
        let err = XrefConfig::from_toml(&input).unwrap_err();
        assert!(err.to_string().contains("share the name"));
    }

    #[test]
    fn reject_empty_file() {
        let input = VALID.replace("file = \"gbr.jsonl\"", "file = \"\"");
        let err = XrefConfig::from_toml(&input).unwrap_err();
        assert!(err.to_string().contains("left source 'gbr'"));
    }

    #[test]
    fn reject_missing_output() {
        let input = VALID.replace("[output]\nfile = \"output.jsonl\"\n", "");
        let err = XrefConfig::from_toml(&input).unwrap_err();
        assert!(matches!(err, XrefError::ConfigParse(_)));
    }

    #[test]
    fn reject_unknown_order() {
        let input = format!("{VALID}order = \"random\"\n");
        let err = XrefConfig::from_toml(&input).unwrap_err();
        assert!(matches!(err, XrefError::ConfigParse(_)));
    }
}
