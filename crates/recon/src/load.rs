use std::collections::HashSet;

use crate::config::InvalidRecordPolicy;
use crate::error::XrefError;
use crate::model::Record;
use crate::standardize::parse_record;

/// Standardized records of one source plus the lines that were rejected.
#[derive(Debug, Clone)]
pub struct LoadReport {
    pub source: String,
    pub records: Vec<Record>,
    pub rejected: Vec<RejectedLine>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RejectedLine {
    /// 1-based line number in the source text.
    pub line: usize,
    pub error: XrefError,
}

/// Decode every non-blank line of `data` into a [`Record`].
///
/// Ids must be unique within a source; a repeated id rejects the later line.
/// Under [`InvalidRecordPolicy::Abort`] the first rejection is returned as
/// [`XrefError::Line`].
pub fn load_records(
    source: &str,
    data: &str,
    policy: InvalidRecordPolicy,
) -> Result<LoadReport, XrefError> {
    let mut records = Vec::new();
    let mut rejected = Vec::new();
    let mut seen_ids: HashSet<i64> = HashSet::new();

    for (idx, line) in data.lines().enumerate() {
        let line_no = idx + 1;
        if line.trim().is_empty() {
            continue;
        }

        let outcome = parse_record(line).and_then(|record| {
            if seen_ids.insert(record.id) {
                Ok(record)
            } else {
                Err(XrefError::DuplicateId { id: record.id })
            }
        });

        match outcome {
            Ok(record) => records.push(record),
            Err(error) => match policy {
                InvalidRecordPolicy::Abort => {
                    return Err(XrefError::Line {
                        source: source.to_string(),
                        line: line_no,
                        error: Box::new(error),
                    });
                }
                InvalidRecordPolicy::Skip => {
                    log::warn!("{source}: skipping line {line_no}: {error}");
                    rejected.push(RejectedLine { line: line_no, error });
                }
            },
        }
    }

    log::info!(
        "{source}: loaded {} record(s), rejected {} line(s)",
        records.len(),
        rejected.len()
    );

    Ok(LoadReport {
        source: source.to_string(),
        records,
        rejected,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIXED: &str = r#"{"id": 1, "type": "individual", "name": "Jane Doe"}

{"id": 2, "type": "individual"}
not json
{"id": 1, "type": "entity", "name": "Duplicate"}
{"id": 3, "type": "entity", "name": "Acme"}
"#;

    #[test]
    fn skip_reports_and_continues() {
        let report = load_records("gbr", MIXED, InvalidRecordPolicy::Skip).unwrap();
        assert_eq!(report.source, "gbr");
        let ids: Vec<i64> = report.records.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(report.records[0].name, "Jane Doe");

        let lines: Vec<usize> = report.rejected.iter().map(|r| r.line).collect();
        assert_eq!(lines, vec![3, 4, 5]);
        assert_eq!(report.rejected[0].error, XrefError::MissingRequiredField { field: "name" });
        assert!(matches!(report.rejected[1].error, XrefError::Decode(_)));
        assert_eq!(report.rejected[2].error, XrefError::DuplicateId { id: 1 });
    }

    #[test]
    fn abort_stops_at_first_failure() {
        let err = load_records("ofac", MIXED, InvalidRecordPolicy::Abort).unwrap_err();
        match err {
            XrefError::Line { source, line, error } => {
                assert_eq!(source, "ofac");
                assert_eq!(line, 3);
                assert_eq!(*error, XrefError::MissingRequiredField { field: "name" });
            }
            other => panic!("expected line error, got {other:?}"),
        }
    }

    #[test]
    fn empty_source() {
        let report = load_records("gbr", "\n  \n", InvalidRecordPolicy::Abort).unwrap();
        assert!(report.records.is_empty());
        assert!(report.rejected.is_empty());
    }
}
