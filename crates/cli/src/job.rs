//! One cross-reference job: load both sources, run the all-pairs pipeline,
//! write the merged output.

use std::path::{Path, PathBuf};

use serde::Serialize;
use xref_recon::config::{ExecutionConfig, InvalidRecordPolicy, OutputOrder, XrefConfig};
use xref_recon::load::{load_records, LoadReport};
use xref_recon::model::RunStats;
use xref_recon::pipeline::{run_sharded, run_with};

use crate::exit_codes::{xref_exit_code, EXIT_ERROR, EXIT_XREF_INPUT};
use crate::output::JsonlWriter;
use crate::CliError;

/// Fully resolved job settings.
#[derive(Debug, Clone)]
pub struct JobSpec {
    pub name: String,
    pub left: SourceSpec,
    pub right: SourceSpec,
    pub output: PathBuf,
    pub order: OutputOrder,
    pub execution: ExecutionConfig,
    pub on_invalid: InvalidRecordPolicy,
    /// How to switch to skip-and-report, shown when a record aborts the job.
    pub skip_hint: &'static str,
}

#[derive(Debug, Clone)]
pub struct SourceSpec {
    pub name: String,
    pub path: PathBuf,
}

impl JobSpec {
    /// Build from a config file, resolving paths against the config's directory.
    pub fn from_config(config: XrefConfig, config_path: &Path) -> Self {
        let base_dir = config_path.parent().unwrap_or_else(|| Path::new("."));
        Self {
            name: config.name,
            left: SourceSpec {
                name: config.left.name,
                path: base_dir.join(&config.left.file),
            },
            right: SourceSpec {
                name: config.right.name,
                path: base_dir.join(&config.right.file),
            },
            output: base_dir.join(&config.output.file),
            order: config.output.order,
            execution: config.execution,
            on_invalid: config.records.on_invalid,
            skip_hint: "set on_invalid = \"skip\" under [records] to report bad lines and continue",
        }
    }
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct JobSummary {
    pub meta: JobMeta,
    pub left: SourceSummary,
    pub right: SourceSummary,
    pub output: String,
    pub order: String,
    pub stats: RunStats,
}

#[derive(Debug, Serialize)]
pub struct JobMeta {
    pub job: String,
    pub engine_version: String,
    pub commit: String,
    pub run_at: String,
}

#[derive(Debug, Serialize)]
pub struct SourceSummary {
    pub name: String,
    pub file: String,
    pub loaded: usize,
    pub rejected: Vec<RejectedSummary>,
}

#[derive(Debug, Serialize)]
pub struct RejectedSummary {
    pub line: usize,
    pub error: String,
}

impl SourceSummary {
    fn from_report(report: &LoadReport, path: &Path) -> Self {
        Self {
            name: report.source.clone(),
            file: path.display().to_string(),
            loaded: report.records.len(),
            rejected: report
                .rejected
                .iter()
                .map(|r| RejectedSummary {
                    line: r.line,
                    error: r.error.to_string(),
                })
                .collect(),
        }
    }
}

impl JobSummary {
    pub fn to_json(&self) -> Result<String, CliError> {
        serde_json::to_string_pretty(self).map_err(|e| CliError {
            code: EXIT_ERROR,
            message: format!("JSON serialization error: {e}"),
            hint: None,
        })
    }

    /// Human summary to stderr.
    pub fn print(&self) {
        eprintln!(
            "job '{}': {} x {} record(s), {} pair(s) compared, {} matched, {} evidence entries",
            self.meta.job,
            self.left.loaded,
            self.right.loaded,
            self.stats.pairs_compared,
            self.stats.pairs_matched,
            self.stats.evidence,
        );
        for source in [&self.left, &self.right] {
            if !source.rejected.is_empty() {
                eprintln!("  {}: {} line(s) rejected", source.name, source.rejected.len());
            }
        }
        eprintln!("wrote {}", self.output);
    }
}

// ---------------------------------------------------------------------------
// Execute
// ---------------------------------------------------------------------------

fn job_err(err: xref_recon::XrefError) -> CliError {
    CliError {
        code: xref_exit_code(&err),
        message: err.to_string(),
        hint: None,
    }
}

fn load_source(source: &SourceSpec, spec: &JobSpec) -> Result<LoadReport, CliError> {
    let data = std::fs::read_to_string(&source.path).map_err(|e| CliError {
        code: EXIT_XREF_INPUT,
        message: format!("cannot read {}: {e}", source.path.display()),
        hint: None,
    })?;
    load_records(&source.name, &data, spec.on_invalid).map_err(|e| CliError {
        hint: Some(spec.skip_hint.to_string()),
        ..job_err(e)
    })
}

pub fn execute(spec: &JobSpec) -> Result<JobSummary, CliError> {
    let left = load_source(&spec.left, spec)?;
    let right = load_source(&spec.right, spec)?;

    let mut writer = JsonlWriter::create(&spec.output).map_err(job_err)?;

    let stats = match spec.order {
        OutputOrder::Input => run_sharded(&left.records, &right.records, &spec.execution, |shard| {
            writer.write_all(&shard.results)
        }),
        OutputOrder::Ids => run_with(&left.records, &right.records, &spec.execution, spec.order)
            .and_then(|(results, stats)| writer.write_all(&results).map(|()| stats)),
    };

    let stats = match stats {
        Ok(stats) => stats,
        Err(e) => {
            writer.discard();
            return Err(job_err(e));
        }
    };
    writer.finish().map_err(job_err)?;

    Ok(JobSummary {
        meta: JobMeta {
            job: spec.name.clone(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            commit: env!("XREF_COMMIT").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
        },
        left: SourceSummary::from_report(&left, &spec.left.path),
        right: SourceSummary::from_report(&right, &spec.right.path),
        output: spec.output.display().to_string(),
        order: spec.order.to_string(),
        stats,
    })
}
