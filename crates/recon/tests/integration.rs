use std::path::PathBuf;

use xref_recon::config::{ExecutionConfig, InvalidRecordPolicy, OutputOrder};
use xref_recon::load::{load_records, LoadReport};
use xref_recon::model::{Evidence, EvidenceKind, PairResult};
use xref_recon::pipeline::{run, run_with};
use xref_recon::XrefError;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn load(file: &str, policy: InvalidRecordPolicy) -> Result<LoadReport, XrefError> {
    let path = fixtures_dir().join(file);
    let data = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("cannot read {}: {e}", path.display()));
    load_records(file.trim_end_matches(".jsonl"), &data, policy)
}

fn load_both() -> (LoadReport, LoadReport) {
    (
        load("gbr.jsonl", InvalidRecordPolicy::Skip).unwrap(),
        load("ofac.jsonl", InvalidRecordPolicy::Skip).unwrap(),
    )
}

fn kinds(result: &PairResult) -> Vec<EvidenceKind> {
    result.matches.iter().map(Evidence::kind).collect()
}

// -------------------------------------------------------------------------
// Loading
// -------------------------------------------------------------------------

#[test]
fn fixtures_load_with_rejections() {
    let (gbr, ofac) = load_both();

    let ids: Vec<i64> = gbr.records.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 5]);
    let rejected: Vec<usize> = gbr.rejected.iter().map(|r| r.line).collect();
    assert_eq!(rejected, vec![4, 6]);
    assert_eq!(gbr.rejected[0].error, XrefError::MissingRequiredField { field: "name" });

    assert_eq!(ofac.records.len(), 5);
    assert!(ofac.rejected.is_empty());
}

#[test]
fn abort_policy_fails_on_bad_fixture() {
    let err = load("gbr.jsonl", InvalidRecordPolicy::Abort).unwrap_err();
    assert!(matches!(err, XrefError::Line { line: 4, .. }), "got {err:?}");
    assert!(err.to_string().starts_with("source 'gbr', line 4:"));
}

// -------------------------------------------------------------------------
// Matching
// -------------------------------------------------------------------------

#[test]
fn fixture_pairs_and_evidence() {
    let (gbr, ofac) = load_both();
    let results = run(&gbr.records, &ofac.records);

    let keys: Vec<(i64, i64)> = results.iter().map(|r| (r.left_id, r.right_id)).collect();
    assert_eq!(keys, vec![(1, 9), (1, 13), (2, 10), (5, 12)]);

    assert_eq!(kinds(&results[0]), vec![EvidenceKind::NameToName, EvidenceKind::IdentifierMatch]);
    assert_eq!(
        results[0].matches[1],
        Evidence::IdentifierMatch {
            left_value: Some("X1".into()),
            left_comment: Some("passport".into()),
            right_value: Some("X1".into()),
            right_comment: Some("reg".into()),
        }
    );

    assert_eq!(kinds(&results[1]), vec![EvidenceKind::NameToAlias, EvidenceKind::AliasToName]);

    assert_eq!(
        results[2].matches,
        vec![Evidence::NameToAlias {
            left_name: "McDonald's-Group.".into(),
            right_alias: "mcdonalds group".into(),
        }]
    );

    // The repeated right-side identifier collapses to one entry.
    assert_eq!(
        kinds(&results[3]),
        vec![
            EvidenceKind::AliasToAlias,
            EvidenceKind::AliasToAlias,
            EvidenceKind::AliasToName,
            EvidenceKind::IdentifierMatch,
        ]
    );
}

#[test]
fn sharded_run_matches_plain_run() {
    let (gbr, ofac) = load_both();
    let expected = run(&gbr.records, &ofac.records);

    for shard_size in [1, 2, 3, 100] {
        let exec = ExecutionConfig { shard_size, workers: 2 };
        let (results, stats) =
            run_with(&gbr.records, &ofac.records, &exec, OutputOrder::Input).unwrap();
        assert_eq!(results, expected, "shard_size={shard_size}");
        assert_eq!(stats.pairs_compared, 20);
        assert_eq!(stats.pairs_matched, 4);
        assert_eq!(stats.evidence, 9);
    }
}

#[test]
fn output_uses_source_keys() {
    let (gbr, ofac) = load_both();
    let results = run(&gbr.records, &ofac.records);
    let json = serde_json::to_value(&results[0]).unwrap();

    assert_eq!(
        json,
        serde_json::json!({
            "gbr_id": 1,
            "ofac_id": 9,
            "matches": [
                {"gbr_name": "Ali Hassan", "ofac_name": "ali hassan"},
                {
                    "gbr_id_number": "X1",
                    "gbr_comment": "passport",
                    "ofac_id_number": "X1",
                    "ofac_comment": "reg"
                }
            ]
        })
    );

    let back: PairResult = serde_json::from_value(json).unwrap();
    assert_eq!(back, results[0]);
}
