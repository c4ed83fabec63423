//! Fusion, indexing and recommendation pipeline

pub mod batch;
pub mod cohort;
pub mod feed;
pub mod fusion;
pub mod index;
pub mod ingest;
pub mod recommend;
pub mod scan;

pub use batch::{rebuild_recommendations, BatchSummary};
pub use cohort::{group_by_dimension, Cohort, CohortKey};
pub use feed::aggregate_feed;
pub use fusion::fuse;
pub use index::SimilarityIndex;
pub use ingest::{ingest, IngestSummary};
pub use recommend::{recommend, recommend_for};
pub use scan::{scan_manifests, ScanResult};
