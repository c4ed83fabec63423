//! Core domain types

pub mod embedding;
pub mod hash;
pub mod modality;
pub mod recommendation;

pub use embedding::{FusedEmbedding, Segment};
pub use hash::ContentHash;
pub use modality::{Modality, ModalityVector};
pub use recommendation::{rank_order, RecommendationEntry, RecommendationSet};
