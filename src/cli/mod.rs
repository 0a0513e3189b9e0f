//! CLI argument parsing

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

use crate::config::{api, defaults};
use crate::shop::ExtractOptions;

/// Shop catalog snapshot CLI
#[derive(Parser, Debug)]
#[command(name = "shopsnap")]
#[command(version)]
#[command(about = "Snapshot shop catalog data to local JSON artifacts", long_about = None)]
pub struct Cli {
    /// Resources to extract (default: all, in the standard order)
    #[arg(value_enum)]
    pub resources: Vec<ResourceKind>,

    /// Shop name (the <shop>.myshopify.com subdomain)
    #[arg(short, long)]
    pub shop: Option<String>,

    /// API key (overrides env vars and the credentials file)
    #[arg(short, long)]
    pub key: Option<String>,

    /// API password (overrides env vars and the credentials file)
    #[arg(short, long)]
    pub password: Option<String>,

    /// Records per page
    #[arg(long, default_value_t = api::DEFAULT_LIMIT)]
    pub limit: u32,

    /// Seconds to pause between page fetches
    #[arg(long, default_value_t = defaults::PAGE_DELAY_SECS)]
    pub delay: u64,

    /// Write each page of raw records to its own artifact as it arrives
    #[arg(long)]
    pub chunk: bool,

    /// Do not retain records in memory (validation-only run)
    #[arg(long)]
    pub less_memory: bool,

    /// Skip writing artifacts entirely
    #[arg(long)]
    pub no_write: bool,

    /// Overwrite existing artifacts instead of suffixing new names
    #[arg(long)]
    pub overwrite: bool,

    /// Directory for JSON artifacts
    #[arg(long, default_value = defaults::OUTPUT_DIR)]
    pub out_dir: PathBuf,

    /// Skip the preflight shop reachability check
    #[arg(long)]
    pub no_ping: bool,

    /// Suppress the progress spinner
    #[arg(short, long)]
    pub quiet: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(short, long, default_value = defaults::LOG_LEVEL)]
    pub log_level: String,
}

impl Cli {
    /// Resources to run: the explicit selection, or all in the standard order
    pub fn selected_resources(&self) -> Vec<ResourceKind> {
        if self.resources.is_empty() {
            ResourceKind::all()
        } else {
            self.resources.clone()
        }
    }

    /// Extraction options assembled from the flags
    pub fn extract_options(&self) -> ExtractOptions {
        ExtractOptions {
            limit: self.limit,
            page_delay: Duration::from_secs(self.delay),
            chunk: self.chunk,
            less_memory: self.less_memory,
            write: !self.no_write,
            ..ExtractOptions::default()
        }
    }
}

/// Extractable catalog resources
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ResourceKind {
    /// Rule-based collections
    SmartCollections,
    /// Manually curated collections
    CustomCollections,
    /// Collection membership records
    Collects,
    /// The full product catalog
    Products,
}

impl ResourceKind {
    /// Every resource, in the standard run order
    pub fn all() -> Vec<ResourceKind> {
        vec![
            ResourceKind::SmartCollections,
            ResourceKind::CustomCollections,
            ResourceKind::Collects,
            ResourceKind::Products,
        ]
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceKind::SmartCollections => write!(f, "smart-collections"),
            ResourceKind::CustomCollections => write!(f, "custom-collections"),
            ResourceKind::Collects => write!(f, "collects"),
            ResourceKind::Products => write!(f, "products"),
        }
    }
}
