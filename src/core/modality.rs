//! Per-modality feature vectors produced by the extractors

use serde::{Deserialize, Serialize};

use crate::error::{Result, VidsimError};

/// Signal channel a feature vector was extracted from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
	Visual,
	Audio,
	Text,
}

impl Modality {
	/// Fusion order
	pub const ALL: [Modality; 3] = [Modality::Visual, Modality::Audio, Modality::Text];

	pub fn as_str(&self) -> &'static str {
		match self {
			Modality::Visual => "visual",
			Modality::Audio => "audio",
			Modality::Text => "text",
		}
	}
}

impl std::fmt::Display for Modality {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.as_str())
	}
}

/// Raw output of one extractor.
///
/// The dimension is the length of `values`. An empty vector means the
/// extractor produced no usable signal; fusion drops it entirely instead
/// of zero-filling.
#[derive(Debug, Clone, PartialEq)]
pub struct ModalityVector {
	modality: Modality,
	values: Vec<f32>,
}

impl ModalityVector {
	pub fn new(modality: Modality, values: Vec<f32>) -> Self {
		Self { modality, values }
	}

	/// Absent signal for a modality
	pub fn empty(modality: Modality) -> Self {
		Self {
			modality,
			values: Vec::new(),
		}
	}

	pub fn modality(&self) -> Modality {
		self.modality
	}

	pub fn values(&self) -> &[f32] {
		&self.values
	}

	pub fn dimension(&self) -> usize {
		self.values.len()
	}

	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}

	/// Enforce a fixed dimension contract. Empty vectors always pass.
	pub fn expect_dimension(self, expected: usize) -> Result<Self> {
		if !self.is_empty() && self.dimension() != expected {
			return Err(VidsimError::InvalidModality {
				modality: self.modality,
				expected,
				actual: self.dimension(),
			});
		}
		Ok(self)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn dimension_follows_values() {
		let v = ModalityVector::new(Modality::Audio, vec![0.5; 40]);
		assert_eq!(v.dimension(), 40);
		assert!(!v.is_empty());

		let empty = ModalityVector::empty(Modality::Visual);
		assert_eq!(empty.dimension(), 0);
		assert!(empty.is_empty());
	}

	#[test]
	fn expect_dimension_rejects_wrong_length() {
		let v = ModalityVector::new(Modality::Text, vec![0.1; 100]);
		let err = v.expect_dimension(384).unwrap_err();
		assert!(matches!(
			err,
			VidsimError::InvalidModality {
				modality: Modality::Text,
				expected: 384,
				actual: 100
			}
		));
	}

	#[test]
	fn expect_dimension_accepts_absent_signal() {
		let v = ModalityVector::empty(Modality::Text);
		assert!(v.expect_dimension(384).is_ok());
	}

	#[test]
	fn modality_serializes_lowercase() {
		let json = serde_json::to_string(&Modality::Visual).unwrap();
		assert_eq!(json, "\"visual\"");
	}
}
