//! Error taxonomy for fusion, indexing and storage

use thiserror::Error;

use crate::core::Modality;

/// Errors raised by the embedding and recommendation pipeline.
///
/// Per-video and per-cohort variants are recoverable: batch drivers count
/// them and move on. Only storage failures on the bulk read abort a run.
#[derive(Error, Debug)]
pub enum VidsimError {
	#[error("Nothing to fuse for video '{video_id}': all modality vectors are empty")]
	IncompleteInput { video_id: String },

	#[error("Embedding for video '{video_id}' has zero norm and cannot be normalized")]
	DegenerateVector { video_id: String },

	#[error("No usable embeddings to index")]
	EmptyCorpus,

	#[error(
		"Dimension mismatch for video '{video_id}': expected {expected}, got {actual}\nSuggestion: Group embeddings into cohorts before building an index"
	)]
	DimensionMismatch {
		video_id: String,
		expected: usize,
		actual: usize,
	},

	#[error("Invalid {modality} vector: expected dimension {expected}, got {actual}")]
	InvalidModality {
		modality: Modality,
		expected: usize,
		actual: usize,
	},

	#[error("Expected a {expected} vector in the {expected} slot, got {actual}")]
	ModalityOrder { expected: Modality, actual: Modality },

	#[error("Video '{video_id}' appears more than once in the index input")]
	DuplicateVideo { video_id: String },

	#[error("Row {row} out of range for index with {rows} rows")]
	RowOutOfRange { row: usize, rows: usize },

	#[error("Storage error: {0}\nSuggestion: Check disk space and permissions for the data directory")]
	Storage(#[from] std::io::Error),

	#[error("Serialization error: {0}")]
	Serialization(String),
}

pub type Result<T> = std::result::Result<T, VidsimError>;
