//! Grouping embeddings into comparable cohorts

use std::collections::BTreeMap;

use crate::core::{FusedEmbedding, Segment};

/// Embeddings in one cohort share a dimension and a modality layout
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CohortKey {
	pub dimension: usize,
	pub layout: Vec<Segment>,
}

impl std::fmt::Display for CohortKey {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}D", self.dimension)?;
		if !self.layout.is_empty() {
			let parts: Vec<String> = self
				.layout
				.iter()
				.map(|s| format!("{}:{}", s.modality, s.dimension))
				.collect();
			write!(f, " [{}]", parts.join(" "))?;
		}
		Ok(())
	}
}

#[derive(Debug, Clone)]
pub struct Cohort {
	pub key: CohortKey,
	pub members: Vec<FusedEmbedding>,
}

/// Split a corpus into cohorts, ordered by key; members keep input order
pub fn group_by_dimension(embeddings: Vec<FusedEmbedding>) -> Vec<Cohort> {
	let mut groups: BTreeMap<CohortKey, Vec<FusedEmbedding>> = BTreeMap::new();

	for embedding in embeddings {
		let key = CohortKey {
			dimension: embedding.dimension(),
			layout: embedding.segments().to_vec(),
		};
		groups.entry(key).or_default().push(embedding);
	}

	groups
		.into_iter()
		.map(|(key, members)| Cohort { key, members })
		.collect()
}
