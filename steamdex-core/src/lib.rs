//! Catalog data model and the pure transformations of the ingestion
//! pipeline: language parsing, top-tag ranking, price resolution, record
//! building and completeness classification.
//!
//! Nothing here touches the network or the filesystem. `steamdex-client`
//! produces the [`upstream`] shapes and `steamdex-store` persists the
//! [`types`] records.

pub mod builder;
pub mod languages;
pub mod tags;
pub mod types;
pub mod upstream;

pub use builder::{
    Classification, build_record, classify, display_name, is_complete, is_non_game, resolve_price,
};
pub use languages::{Languages, NOT_AVAILABLE, parse_supported_languages};
pub use tags::top_tags;
pub use types::*;
pub use upstream::{AppDetails, AppDetailsEnvelope, AppStats};
