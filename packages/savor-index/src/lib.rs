mod error;

pub use error::{Error, Result};

/// One similarity match: the insertion index of a stored vector and its inner
/// product against the query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
	pub index: usize,
	pub score: f32,
}

/// Exact inner-product index over a small per-request candidate set.
///
/// Vectors are scanned exhaustively; with unit-normalized inputs the inner
/// product equals cosine similarity. Built fresh for every request, so there
/// is no update or delete surface.
#[derive(Debug)]
pub struct FlatIndex {
	dim: usize,
	vectors: Vec<Vec<f32>>,
}

impl FlatIndex {
	pub fn new(dim: usize) -> Result<Self> {
		if dim == 0 {
			return Err(Error::ZeroDimension);
		}

		Ok(Self { dim, vectors: Vec::new() })
	}

	pub fn dim(&self) -> usize {
		self.dim
	}

	pub fn len(&self) -> usize {
		self.vectors.len()
	}

	pub fn is_empty(&self) -> bool {
		self.vectors.is_empty()
	}

	pub fn add(&mut self, vector: Vec<f32>) -> Result<()> {
		if vector.len() != self.dim {
			return Err(Error::DimensionMismatch { expected: self.dim, actual: vector.len() });
		}

		self.vectors.push(vector);

		Ok(())
	}

	/// Scores every stored vector against `query` and returns all hits,
	/// ordered by descending score. Equal scores keep insertion order.
	pub fn search(&self, query: &[f32]) -> Result<Vec<Hit>> {
		if query.len() != self.dim {
			return Err(Error::DimensionMismatch { expected: self.dim, actual: query.len() });
		}

		let mut hits: Vec<Hit> = self
			.vectors
			.iter()
			.enumerate()
			.map(|(index, vector)| Hit { index, score: dot(query, vector) })
			.collect();

		hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));

		Ok(hits)
	}
}

/// Scales `vector` to unit L2 norm in place. Zero vectors are left untouched.
pub fn l2_normalize(vector: &mut [f32]) {
	let norm = vector.iter().map(|value| value * value).sum::<f32>().sqrt();

	if norm > 0.0 {
		for value in vector.iter_mut() {
			*value /= norm;
		}
	}
}

fn dot(a: &[f32], b: &[f32]) -> f32 {
	a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}
