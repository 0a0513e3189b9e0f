//! Paginated extraction engine
//!
//! One generic pagination/accumulation/validation loop drives every catalog
//! extraction; resources differ only by their [`ExtractionSpec`]. The loop
//! fetches pages strictly in order with a fixed pause between them, detects
//! end-of-data, and cross-checks the fetched tally against the count
//! endpoint observed before paging began.

use log::{debug, error, info, warn};
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::{api, defaults};
use crate::output::ArtifactWriter;
use crate::shop::client::ReadOnlyShop;

/// Endpoint and key configuration for one catalog resource
#[derive(Debug, Clone, Copy)]
pub struct ExtractionSpec {
    /// Human-readable label used in logs
    pub label: &'static str,
    /// Endpoint returning `{"count": n}` for the resource
    pub count_path: &'static str,
    /// Paged list endpoint for the resource
    pub list_path: &'static str,
    /// Key holding the record array in a page response
    pub record_key: &'static str,
    /// Logical artifact name for the completed dataset
    pub artifact_name: &'static str,
}

impl ExtractionSpec {
    /// List endpoint path for one page
    fn page_path(&self, page: u32, limit: u32) -> String {
        let separator = if self.list_path.contains('?') { '&' } else { '?' };
        format!(
            "{}{}page={}&limit={}",
            self.list_path, separator, page, limit
        )
    }

    /// Artifact name for one page's raw records
    fn chunk_name(&self, page: u32) -> String {
        format!("{}_page_{}", self.artifact_name, page)
    }
}

/// Tuning knobs for one extraction run
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Records per page
    pub limit: u32,
    /// First page number
    pub start_page: u32,
    /// Pause between page fetches
    pub page_delay: Duration,
    /// Write each page's raw records to its own artifact as it arrives
    pub chunk: bool,
    /// Do not retain records in memory; the tally is still tracked and
    /// validated, and no combined artifact is written
    pub less_memory: bool,
    /// Write the completed dataset artifact
    pub write: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            limit: api::DEFAULT_LIMIT,
            start_page: api::DEFAULT_START_PAGE,
            page_delay: Duration::from_secs(defaults::PAGE_DELAY_SECS),
            chunk: false,
            less_memory: false,
            write: true,
        }
    }
}

/// Authoritative record count reported by the API
#[derive(Deserialize, Debug)]
pub struct CountResponse {
    pub count: u64,
}

/// Outcome of one extraction run
///
/// The three variants keep apart the failure modes callers need to
/// distinguish: a run that never issued a list call, a run that started
/// and went wrong, and a validated success.
#[derive(Debug)]
pub enum ExtractOutcome {
    /// The count endpoint was unreachable or unusable; the list endpoint
    /// was never called
    NotStarted(String),
    /// Paging began but a page fetch failed mid-stream, or the final tally
    /// diverged from the starting count
    Failed { errors: Vec<String>, fetched: u64 },
    /// Every page arrived and the tally matched the starting count
    Complete {
        records: Vec<Value>,
        total: u64,
        artifact: Option<PathBuf>,
    },
}

impl ExtractOutcome {
    /// Whether the run completed and validated
    pub fn is_complete(&self) -> bool {
        matches!(self, ExtractOutcome::Complete { .. })
    }

    /// Records fetched before the run ended, validated or not
    pub fn record_count(&self) -> u64 {
        match self {
            ExtractOutcome::NotStarted(_) => 0,
            ExtractOutcome::Failed { fetched, .. } => *fetched,
            ExtractOutcome::Complete { total, .. } => *total,
        }
    }

    /// Short status label for reports
    pub fn status_label(&self) -> &'static str {
        match self {
            ExtractOutcome::NotStarted(_) => "not started",
            ExtractOutcome::Failed { .. } => "failed",
            ExtractOutcome::Complete { .. } => "complete",
        }
    }

    /// Path of the completed dataset artifact, when one was written
    pub fn artifact(&self) -> Option<&Path> {
        match self {
            ExtractOutcome::Complete { artifact, .. } => artifact.as_deref(),
            _ => None,
        }
    }
}

/// Drives paginated extractions against a read-only shop view
pub struct Extractor<'a> {
    shop: &'a ReadOnlyShop,
    writer: &'a ArtifactWriter,
}

impl<'a> Extractor<'a> {
    /// Create an extractor over a shop view and an artifact writer
    pub fn new(shop: &'a ReadOnlyShop, writer: &'a ArtifactWriter) -> Self {
        Self { shop, writer }
    }

    /// Run one paginated extraction to completion
    ///
    /// Fetches the authoritative count, then walks the list endpoint page
    /// by page until an empty or keyless page signals end-of-data, and
    /// validates the tally against the starting count before declaring
    /// success. Pages are fetched strictly sequentially with
    /// `opts.page_delay` between them.
    pub async fn extract(&self, spec: &ExtractionSpec, opts: &ExtractOptions) -> ExtractOutcome {
        info!("Beginning {} extraction", spec.label);

        let starting_count = match self.shop.get(spec.count_path).await {
            Ok(body) => match serde_json::from_value::<CountResponse>(body) {
                Ok(count) => count.count,
                Err(e) => {
                    let msg = format!(
                        "calling {} returned an unusable body: {}",
                        spec.count_path, e
                    );
                    error!("{}", msg);
                    return ExtractOutcome::NotStarted(msg);
                }
            },
            Err(e) => {
                let msg = format!("calling {} failed: {}", spec.count_path, e);
                error!("{}", msg);
                return ExtractOutcome::NotStarted(msg);
            }
        };
        debug!("{} starting count: {}", spec.label, starting_count);

        let mut errors: Vec<String> = Vec::new();
        let mut records: Vec<Value> = Vec::new();
        let mut fetched: u64 = 0;
        let mut page = Some(opts.start_page);

        while let Some(current) = page {
            debug!("------ page {} via limit {}", current, opts.limit);
            let path = spec.page_path(current, opts.limit);

            let body = match self.shop.get(&path).await {
                Ok(body) => body,
                Err(e) => {
                    // Stop paging; this is a mid-stream failure, not end-of-data
                    errors.push(format!("the call [{}] failed: {}", path, e));
                    break;
                }
            };

            let page_records = match body.get(spec.record_key).and_then(Value::as_array) {
                Some(list) if !list.is_empty() => list.clone(),
                // An absent key and an empty list both mean end-of-data
                _ => {
                    page = None;
                    continue;
                }
            };

            if opts.chunk && opts.write {
                if let Err(e) = self.writer.write_json(&page_records, &spec.chunk_name(current)) {
                    error!("Failed to write page {} of {}: {}", current, spec.label, e);
                }
            }

            fetched += page_records.len() as u64;
            if !opts.less_memory {
                records.extend(page_records);
            }

            page = Some(current + 1);
            debug!("Sleeping for {:?}", opts.page_delay);
            tokio::time::sleep(opts.page_delay).await;
        }

        info!("End {} extraction", spec.label);

        if !errors.is_empty() {
            info!("{} extraction has errors", spec.label);
            return ExtractOutcome::Failed { errors, fetched };
        }

        if fetched != starting_count {
            let msg = format!(
                "Starting count ({}) != number of records pulled from the API ({}).",
                starting_count, fetched
            );
            warn!("{}", msg);
            errors.push(msg);
            return ExtractOutcome::Failed { errors, fetched };
        }

        let mut artifact = None;
        if opts.write && !opts.less_memory {
            // A failed write is reported but does not demote the outcome;
            // the dataset already validated
            match self.writer.write_json(&records, spec.artifact_name) {
                Ok(path) => artifact = Some(path),
                Err(e) => error!("Failed to write {} artifact: {}", spec.artifact_name, e),
            }
        }

        info!("Job complete: {} {} found", fetched, spec.label);
        ExtractOutcome::Complete {
            records,
            total: fetched,
            artifact,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SPEC: ExtractionSpec = ExtractionSpec {
        label: "test items",
        count_path: "admin/items/count.json",
        list_path: "admin/items.json",
        record_key: "items",
        artifact_name: "items_all",
    };

    #[test]
    fn test_default_options() {
        let opts = ExtractOptions::default();
        assert_eq!(opts.limit, 20);
        assert_eq!(opts.start_page, 1);
        assert_eq!(opts.page_delay, Duration::from_secs(1));
        assert!(!opts.chunk);
        assert!(!opts.less_memory);
        assert!(opts.write);
    }

    #[test]
    fn test_page_path() {
        assert_eq!(
            TEST_SPEC.page_path(3, 20),
            "admin/items.json?page=3&limit=20"
        );
    }

    #[test]
    fn test_page_path_with_existing_query() {
        let spec = ExtractionSpec {
            list_path: "admin/items.json?fields=id",
            ..TEST_SPEC
        };
        assert_eq!(
            spec.page_path(1, 5),
            "admin/items.json?fields=id&page=1&limit=5"
        );
    }

    #[test]
    fn test_chunk_name_is_per_resource() {
        assert_eq!(TEST_SPEC.chunk_name(2), "items_all_page_2");
    }

    #[test]
    fn test_outcome_helpers() {
        let complete = ExtractOutcome::Complete {
            records: vec![],
            total: 4,
            artifact: None,
        };
        assert!(complete.is_complete());
        assert_eq!(complete.record_count(), 4);
        assert_eq!(complete.status_label(), "complete");

        let failed = ExtractOutcome::Failed {
            errors: vec!["boom".to_string()],
            fetched: 2,
        };
        assert!(!failed.is_complete());
        assert_eq!(failed.record_count(), 2);
        assert_eq!(failed.status_label(), "failed");

        let not_started = ExtractOutcome::NotStarted("no count".to_string());
        assert!(!not_started.is_complete());
        assert_eq!(not_started.record_count(), 0);
        assert_eq!(not_started.status_label(), "not started");
    }
}
