//! Content hashing for change detection and file naming

use std::fs;
use std::path::Path;
use xxhash_rust::xxh3::xxh3_64;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentHash(String);

impl ContentHash {
	/// Hash a file's full contents
	pub fn compute(path: &Path) -> std::io::Result<Self> {
		let bytes = fs::read(path)?;
		Ok(Self::of_bytes(&bytes))
	}

	pub fn of_bytes(bytes: &[u8]) -> Self {
		Self(format!("{:016x}", xxh3_64(bytes)))
	}

	pub fn of_str(s: &str) -> Self {
		Self::of_bytes(s.as_bytes())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	pub fn short(&self) -> &str {
		&self.0[..8]
	}
}

impl std::fmt::Display for ContentHash {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}
