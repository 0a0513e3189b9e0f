//! Shop admin API client and the paginated extraction engine

pub mod client;
pub mod collections;
pub mod credentials;
pub mod engine;
pub mod products;

pub use client::{prepare_path, ReadOnlyShop, ShopTransport};
pub use collections::{COLLECTS, CUSTOM_COLLECTIONS, SMART_COLLECTIONS};
pub use credentials::{CredentialResolver, ShopCredentials};
pub use engine::{CountResponse, ExtractOptions, ExtractOutcome, ExtractionSpec, Extractor};
pub use products::PRODUCTS;
