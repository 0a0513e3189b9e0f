//! Product extraction call site

use crate::config::api;
use crate::shop::engine::{ExtractOptions, ExtractOutcome, ExtractionSpec, Extractor};

/// The full product catalog
pub const PRODUCTS: ExtractionSpec = ExtractionSpec {
    label: "products",
    count_path: api::PRODUCTS_COUNT,
    list_path: api::PRODUCTS,
    record_key: "products",
    artifact_name: "products_all",
};

impl Extractor<'_> {
    /// Extract every product
    pub async fn extract_products(&self, opts: &ExtractOptions) -> ExtractOutcome {
        self.extract(&PRODUCTS, opts).await
    }
}
