//! Collection extraction call sites
//!
//! Custom collections, smart collections, and the collect relationship
//! records are the same paginated walk over different endpoints; each call
//! site only supplies its [`ExtractionSpec`].

use crate::config::api;
use crate::shop::engine::{ExtractOptions, ExtractOutcome, ExtractionSpec, Extractor};

/// Manually curated collections
pub const CUSTOM_COLLECTIONS: ExtractionSpec = ExtractionSpec {
    label: "custom collections",
    count_path: api::CUSTOM_COLLECTIONS_COUNT,
    list_path: api::CUSTOM_COLLECTIONS,
    record_key: "custom_collections",
    artifact_name: "custom_collection",
};

/// Rule-based collections
pub const SMART_COLLECTIONS: ExtractionSpec = ExtractionSpec {
    label: "smart collections",
    count_path: api::SMART_COLLECTIONS_COUNT,
    list_path: api::SMART_COLLECTIONS,
    record_key: "smart_collections",
    artifact_name: "smart_collection",
};

/// Records linking a product to a collection
pub const COLLECTS: ExtractionSpec = ExtractionSpec {
    label: "collects",
    count_path: api::COLLECTS_COUNT,
    list_path: api::COLLECTS,
    record_key: "collects",
    artifact_name: "collect",
};

impl Extractor<'_> {
    /// Extract every custom collection
    pub async fn extract_custom_collections(&self, opts: &ExtractOptions) -> ExtractOutcome {
        self.extract(&CUSTOM_COLLECTIONS, opts).await
    }

    /// Extract every smart collection
    pub async fn extract_smart_collections(&self, opts: &ExtractOptions) -> ExtractOutcome {
        self.extract(&SMART_COLLECTIONS, opts).await
    }

    /// Extract every collect (collection membership) record
    pub async fn extract_collects(&self, opts: &ExtractOptions) -> ExtractOutcome {
        self.extract(&COLLECTS, opts).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::ArtifactWriter;
    use crate::shop::client::ShopTransport;
    use std::time::Duration;
    use tempfile::TempDir;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_specs_use_their_own_endpoints_and_keys() {
        for spec in [CUSTOM_COLLECTIONS, SMART_COLLECTIONS, COLLECTS] {
            assert!(spec.count_path.contains(spec.record_key));
            assert!(spec.list_path.contains(spec.record_key));
            assert!(spec.count_path.ends_with("/count.json"));
        }
    }

    #[test]
    fn test_artifact_names_are_distinct() {
        let names = [
            CUSTOM_COLLECTIONS.artifact_name,
            SMART_COLLECTIONS.artifact_name,
            COLLECTS.artifact_name,
        ];
        assert_eq!(names, ["custom_collection", "smart_collection", "collect"]);
    }

    #[tokio::test]
    async fn test_extract_smart_collections_end_to_end() {
        let server = MockServer::start().await;
        let shop = ShopTransport::test_client(&server.uri()).into_read_only();
        let tmp = TempDir::new().unwrap();
        let writer = ArtifactWriter::new(tmp.path(), false);

        Mock::given(method("GET"))
            .and(path("/admin/smart_collections/count.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"count": 2})))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/admin/smart_collections.json"))
            .and(query_param("page", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "smart_collections": [{"id": 10, "title": "New"}, {"id": 11, "title": "Sale"}]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/admin/smart_collections.json"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "smart_collections": []
            })))
            .mount(&server)
            .await;

        let opts = ExtractOptions {
            page_delay: Duration::ZERO,
            ..ExtractOptions::default()
        };
        let outcome = Extractor::new(&shop, &writer)
            .extract_smart_collections(&opts)
            .await;

        assert!(outcome.is_complete());
        assert_eq!(outcome.record_count(), 2);
        assert!(tmp.path().join("smart_collection.json").is_file());
    }

    #[tokio::test]
    async fn test_extract_collects_count_failure_is_not_started() {
        let server = MockServer::start().await;
        let shop = ShopTransport::test_client(&server.uri()).into_read_only();
        let tmp = TempDir::new().unwrap();
        let writer = ArtifactWriter::new(tmp.path(), false);

        Mock::given(method("GET"))
            .and(path("/admin/collects/count.json"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let opts = ExtractOptions {
            page_delay: Duration::ZERO,
            ..ExtractOptions::default()
        };
        let outcome = Extractor::new(&shop, &writer).extract_collects(&opts).await;

        assert!(matches!(outcome, ExtractOutcome::NotStarted(_)));
    }
}
