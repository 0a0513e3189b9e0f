//! shopsnap - Snapshot shop catalog data to local JSON artifacts
//!
//! A batch ETL CLI that pulls collections, collect relationships, and
//! products from a shop admin API page by page, validates each dataset
//! against the API's own count endpoint, and writes one JSON artifact per
//! dataset.
//!
//! # Features
//!
//! - One generic pagination engine shared by every resource
//! - Count validation: a snapshot only counts as complete when the fetched
//!   tally matches the API's count endpoint
//! - Per-page chunked artifacts and a reduced-memory validation-only mode
//! - Collision-avoiding artifact naming with an overwrite switch
//!
//! # Example
//!
//! ```bash
//! # Snapshot everything with credentials from the environment
//! shopsnap
//!
//! # Only the product catalog, one artifact per page
//! shopsnap products --chunk
//!
//! # Validation-only run, nothing retained or written
//! shopsnap --less-memory --no-write
//!
//! # Replace earlier snapshots instead of suffixing
//! shopsnap --overwrite --out-dir snapshots
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod shop;
pub mod ui;

pub use cli::{Cli, ResourceKind};
pub use error::{Result, ShopError};
pub use output::{ArtifactWriter, JobReport, RunSummary};
pub use shop::{
    CredentialResolver, ExtractOptions, ExtractOutcome, ExtractionSpec, Extractor, ReadOnlyShop,
    ShopCredentials, ShopTransport, COLLECTS, CUSTOM_COLLECTIONS, PRODUCTS, SMART_COLLECTIONS,
};
