//! Exact inner-product index over L2-normalized embeddings
//!
//! Rows are stored in a dense row-major matrix. Every query scores the query
//! row against all rows, so a full recommendation sweep is quadratic in the
//! corpus size. That is accepted in exchange for exact results.

use std::cmp::Ordering;
use std::collections::HashMap;

use ndarray::{Array2, ArrayView1};

use crate::core::embedding::is_degenerate_norm;
use crate::core::FusedEmbedding;
use crate::error::{Result, VidsimError};

/// Point-in-time snapshot of one cohort. Later repository writes are not
/// observed until the index is rebuilt.
#[derive(Debug, Clone)]
pub struct SimilarityIndex {
	dimension: usize,
	matrix: Array2<f32>,
	id_to_row: HashMap<String, usize>,
	row_to_id: Vec<String>,
}

impl SimilarityIndex {
	/// Stack, normalize and label all embeddings in input order.
	///
	/// All embeddings must share one dimension; mixing dimensions is a
	/// grouping bug upstream and fails the whole build.
	pub fn build(embeddings: &[FusedEmbedding]) -> Result<Self> {
		let first = embeddings.first().ok_or(VidsimError::EmptyCorpus)?;
		let dimension = first.dimension();

		let mut matrix = Array2::<f32>::zeros((embeddings.len(), dimension));
		let mut id_to_row = HashMap::with_capacity(embeddings.len());
		let mut row_to_id = Vec::with_capacity(embeddings.len());

		for (row, embedding) in embeddings.iter().enumerate() {
			if embedding.dimension() != dimension {
				return Err(VidsimError::DimensionMismatch {
					video_id: embedding.video_id().to_string(),
					expected: dimension,
					actual: embedding.dimension(),
				});
			}

			let video_id = embedding.video_id().to_string();
			if id_to_row.insert(video_id.clone(), row).is_some() {
				return Err(VidsimError::DuplicateVideo { video_id });
			}
			row_to_id.push(video_id);

			matrix.row_mut(row).assign(&ArrayView1::from(embedding.values()));
		}

		for (row, mut values) in matrix.rows_mut().into_iter().enumerate() {
			let norm = values.dot(&values).sqrt();
			if is_degenerate_norm(norm) {
				return Err(VidsimError::DegenerateVector {
					video_id: row_to_id[row].clone(),
				});
			}
			values.mapv_inplace(|x| x / norm);
		}

		Ok(Self {
			dimension,
			matrix,
			id_to_row,
			row_to_id,
		})
	}

	pub fn dimension(&self) -> usize {
		self.dimension
	}

	pub fn len(&self) -> usize {
		self.row_to_id.len()
	}

	pub fn is_empty(&self) -> bool {
		self.row_to_id.is_empty()
	}

	pub fn video_id(&self, row: usize) -> Option<&str> {
		self.row_to_id.get(row).map(String::as_str)
	}

	pub fn row_of(&self, video_id: &str) -> Option<usize> {
		self.id_to_row.get(video_id).copied()
	}

	/// Normalized vector stored at `row`
	pub fn row(&self, row: usize) -> Option<ArrayView1<'_, f32>> {
		(row < self.len()).then(|| self.matrix.row(row))
	}

	/// Top `n` rows by score against `row`, the query row included.
	///
	/// Ties are broken by ascending row number.
	pub fn search(&self, row: usize, n: usize) -> Result<Vec<(usize, f32)>> {
		let query = self.row(row).ok_or(VidsimError::RowOutOfRange {
			row,
			rows: self.len(),
		})?;

		let scores = self.matrix.dot(&query);
		let ranked = scores
			.iter()
			.map(|&s| canonical_score(s))
			.enumerate()
			.collect();

		Ok(top_n(ranked, n))
	}

	/// Top `k` neighbours of `row`, excluding the row itself
	pub fn query(&self, row: usize, k: usize) -> Result<Vec<(usize, f32)>> {
		let mut hits = self.search(row, k.saturating_add(1))?;
		hits.retain(|(candidate, _)| *candidate != row);
		hits.truncate(k);
		Ok(hits)
	}
}

/// Clamp rounding overshoot and fold -0.0 into 0.0 so equal scores tie
fn canonical_score(score: f32) -> f32 {
	if score == 0.0 {
		0.0
	} else {
		score.clamp(-1.0, 1.0)
	}
}

fn by_score_then_row(a: &(usize, f32), b: &(usize, f32)) -> Ordering {
	b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0))
}

fn top_n(mut ranked: Vec<(usize, f32)>, n: usize) -> Vec<(usize, f32)> {
	if n == 0 {
		return Vec::new();
	}
	if n < ranked.len() {
		ranked.select_nth_unstable_by(n - 1, by_score_then_row);
		ranked.truncate(n);
	}
	ranked.sort_by(by_score_then_row);
	ranked
}

#[cfg(test)]
mod tests {
	use super::*;

	fn emb(id: &str, values: &[f32]) -> FusedEmbedding {
		FusedEmbedding::from_values(id, values.to_vec()).unwrap()
	}

	fn abc() -> Vec<FusedEmbedding> {
		vec![emb("A", &[1.0, 0.0]), emb("B", &[0.0, 1.0]), emb("C", &[0.9, 0.1])]
	}

	#[test]
	fn rows_are_unit_length() {
		let corpus = vec![
			emb("a", &[3.0, 4.0, 0.0]),
			emb("b", &[-1.0, 2.0, 7.5]),
			emb("c", &[1e-3, 1e-3, 1e-3]),
			emb("d", &[250.0, -90.0, 13.0]),
		];
		let index = SimilarityIndex::build(&corpus).unwrap();

		for row in 0..index.len() {
			let v = index.row(row).unwrap();
			let norm = v.dot(&v).sqrt();
			assert!((norm - 1.0).abs() < 1e-5, "row {} has norm {}", row, norm);
		}
	}

	#[test]
	fn labels_follow_input_order() {
		let index = SimilarityIndex::build(&abc()).unwrap();
		assert_eq!(index.len(), 3);
		assert_eq!(index.dimension(), 2);
		assert_eq!(index.video_id(0), Some("A"));
		assert_eq!(index.video_id(2), Some("C"));
		assert_eq!(index.row_of("B"), Some(1));
		assert_eq!(index.row_of("Z"), None);
	}

	#[test]
	fn empty_input_is_empty_corpus() {
		let err = SimilarityIndex::build(&[]).unwrap_err();
		assert!(matches!(err, VidsimError::EmptyCorpus));
	}

	#[test]
	fn mixed_dimensions_fail_the_build() {
		let corpus = vec![emb("a", &[1.0, 0.0]), emb("b", &[1.0, 0.0, 0.0])];
		let err = SimilarityIndex::build(&corpus).unwrap_err();
		assert!(matches!(
			err,
			VidsimError::DimensionMismatch { ref video_id, expected: 2, actual: 3 } if video_id == "b"
		));
	}

	#[test]
	fn zero_vector_is_degenerate() {
		let corpus = vec![emb("ok", &[1.0, 1.0]), emb("flat", &[0.0, 0.0])];
		let err = SimilarityIndex::build(&corpus).unwrap_err();
		assert!(matches!(err, VidsimError::DegenerateVector { ref video_id } if video_id == "flat"));
	}

	#[test]
	fn duplicate_ids_are_rejected() {
		let corpus = vec![emb("a", &[1.0, 0.0]), emb("a", &[0.0, 1.0])];
		let err = SimilarityIndex::build(&corpus).unwrap_err();
		assert!(matches!(err, VidsimError::DuplicateVideo { .. }));
	}

	#[test]
	fn query_scores_against_every_other_row() {
		let index = SimilarityIndex::build(&abc()).unwrap();
		let hits = index.query(0, 2).unwrap();

		assert_eq!(hits.len(), 2);
		assert_eq!(hits[0].0, 2);
		assert!((hits[0].1 - 0.9939).abs() < 1e-3);
		assert_eq!(hits[1].0, 1);
		assert!(hits[1].1.abs() < 1e-6);
	}

	#[test]
	fn search_includes_query_row() {
		let index = SimilarityIndex::build(&abc()).unwrap();
		let hits = index.search(1, 1).unwrap();
		assert_eq!(hits, vec![(1, 1.0)]);
	}

	#[test]
	fn ties_break_by_ascending_row() {
		let corpus = vec![
			emb("q", &[1.0, 0.0]),
			emb("x", &[0.0, 1.0]),
			emb("y", &[0.0, -1.0]),
			emb("z", &[0.0, 2.0]),
		];
		let index = SimilarityIndex::build(&corpus).unwrap();
		let rows: Vec<usize> = index.query(0, 3).unwrap().into_iter().map(|(r, _)| r).collect();
		assert_eq!(rows, [1, 2, 3]);
	}

	#[test]
	fn query_out_of_range() {
		let index = SimilarityIndex::build(&abc()).unwrap();
		assert!(matches!(
			index.query(3, 1),
			Err(VidsimError::RowOutOfRange { row: 3, rows: 3 })
		));
	}

	#[test]
	fn k_larger_than_corpus_returns_all_others() {
		let index = SimilarityIndex::build(&abc()).unwrap();
		assert_eq!(index.query(0, 50).unwrap().len(), 2);
		assert!(index.query(0, 0).unwrap().is_empty());
	}
}
