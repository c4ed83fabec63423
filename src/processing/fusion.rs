//! Modality fusion by concatenation

use crate::core::{FusedEmbedding, Modality, ModalityVector, Segment};
use crate::error::{Result, VidsimError};

/// Concatenate visual, audio and text vectors, in that order.
///
/// No weighting or projection is applied, so each modality contributes in
/// proportion to its raw dimensionality. Empty vectors are omitted rather
/// than zero-filled and the layout of present modalities is recorded on the
/// result.
pub fn fuse(
	video_id: &str,
	visual: &ModalityVector,
	audio: &ModalityVector,
	text: &ModalityVector,
) -> Result<FusedEmbedding> {
	let slots = [visual, audio, text];

	for (expected, vector) in Modality::ALL.iter().zip(slots.iter()) {
		if vector.modality() != *expected {
			return Err(VidsimError::ModalityOrder {
				expected: *expected,
				actual: vector.modality(),
			});
		}
	}

	let dimension: usize = slots.iter().map(|v| v.dimension()).sum();
	if dimension == 0 {
		return Err(VidsimError::IncompleteInput {
			video_id: video_id.to_string(),
		});
	}

	let mut values = Vec::with_capacity(dimension);
	let mut segments = Vec::with_capacity(slots.len());

	for vector in slots.iter().filter(|v| !v.is_empty()) {
		values.extend_from_slice(vector.values());
		segments.push(Segment {
			modality: vector.modality(),
			dimension: vector.dimension(),
		});
	}

	FusedEmbedding::new(video_id, segments, values)
}
