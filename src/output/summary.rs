//! End-of-run reporting
//!
//! Collects one row per executed job, prints a table for the operator, and
//! persists the same data as a `snapshot_manifest` artifact.

use chrono::Utc;
use comfy_table::{presets::NOTHING, Table};
use serde::Serialize;
use std::path::PathBuf;

use crate::error::Result;
use crate::output::ArtifactWriter;
use crate::shop::engine::ExtractOutcome;

/// One executed job in the run report
#[derive(Debug, Serialize)]
pub struct JobReport {
    pub resource: String,
    pub status: String,
    pub records: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifact: Option<String>,
    #[serde(skip_serializing)]
    complete: bool,
}

impl JobReport {
    /// Build a report row from a finished extraction
    pub fn new(resource: &str, outcome: &ExtractOutcome) -> Self {
        Self {
            resource: resource.to_string(),
            status: outcome.status_label().to_string(),
            records: outcome.record_count(),
            artifact: outcome.artifact().map(|p| p.display().to_string()),
            complete: outcome.is_complete(),
        }
    }
}

/// Summary of one full extraction run
#[derive(Debug, Serialize, Default)]
pub struct RunSummary {
    pub generated_at: String,
    pub jobs: Vec<JobReport>,
}

impl RunSummary {
    /// Start an empty summary stamped with the current time
    pub fn new() -> Self {
        Self {
            generated_at: Utc::now().to_rfc3339(),
            jobs: Vec::new(),
        }
    }

    /// Append a finished job
    pub fn push(&mut self, report: JobReport) {
        self.jobs.push(report);
    }

    /// Whether any job ended without completing
    pub fn had_errors(&self) -> bool {
        self.jobs.iter().any(|job| !job.complete)
    }

    /// Render the summary as a table
    pub fn table(&self) -> Table {
        let mut table = Table::new();
        table.load_preset(NOTHING);
        table.set_header(vec!["Resource", "Status", "Records", "Artifact"]);
        for job in &self.jobs {
            table.add_row(vec![
                job.resource.clone(),
                job.status.clone(),
                job.records.to_string(),
                job.artifact.clone().unwrap_or_else(|| "-".to_string()),
            ]);
        }
        table
    }

    /// Print the summary table to stdout
    pub fn print_table(&self) {
        println!("{}", self.table());
    }

    /// Persist the summary as the `snapshot_manifest` artifact
    pub fn write_manifest(&self, writer: &ArtifactWriter) -> Result<PathBuf> {
        writer.write_json(self, "snapshot_manifest")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn complete_outcome(total: u64) -> ExtractOutcome {
        ExtractOutcome::Complete {
            records: Vec::new(),
            total,
            artifact: Some(PathBuf::from("json/collect.json")),
        }
    }

    #[test]
    fn test_job_report_from_complete_outcome() {
        let report = JobReport::new("collects", &complete_outcome(12));
        assert_eq!(report.resource, "collects");
        assert_eq!(report.status, "complete");
        assert_eq!(report.records, 12);
        assert_eq!(report.artifact.as_deref(), Some("json/collect.json"));
    }

    #[test]
    fn test_job_report_from_failed_outcome() {
        let outcome = ExtractOutcome::Failed {
            errors: vec!["the call failed".to_string()],
            fetched: 3,
        };
        let report = JobReport::new("products", &outcome);
        assert_eq!(report.status, "failed");
        assert_eq!(report.records, 3);
        assert!(report.artifact.is_none());
    }

    #[test]
    fn test_had_errors() {
        let mut summary = RunSummary::new();
        summary.push(JobReport::new("collects", &complete_outcome(1)));
        assert!(!summary.had_errors());

        summary.push(JobReport::new(
            "products",
            &ExtractOutcome::NotStarted("no count".to_string()),
        ));
        assert!(summary.had_errors());
    }

    #[test]
    fn test_table_lists_every_job() {
        let mut summary = RunSummary::new();
        summary.push(JobReport::new("smart-collections", &complete_outcome(5)));
        summary.push(JobReport::new(
            "collects",
            &ExtractOutcome::NotStarted("no count".to_string()),
        ));

        let rendered = summary.table().to_string();
        assert!(rendered.contains("smart-collections"));
        assert!(rendered.contains("collects"));
        assert!(rendered.contains("not started"));
        assert!(rendered.contains("json/collect.json"));
    }

    #[test]
    fn test_manifest_round_trips_through_the_writer() {
        let tmp = TempDir::new().unwrap();
        let writer = ArtifactWriter::new(tmp.path(), false);

        let mut summary = RunSummary::new();
        summary.push(JobReport::new("products", &complete_outcome(2)));

        let path = summary.write_manifest(&writer).unwrap();
        assert!(path.to_string_lossy().ends_with("snapshot_manifest.json"));

        let parsed: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(parsed["jobs"].as_array().unwrap().len(), 1);
        assert_eq!(parsed["jobs"][0]["resource"], "products");
        assert!(parsed["generated_at"].is_string());
    }
}
