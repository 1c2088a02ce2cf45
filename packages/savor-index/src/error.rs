pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
	#[error("Index dimension must be greater than zero.")]
	ZeroDimension,
	#[error("Vector length {actual} does not match index dimension {expected}.")]
	DimensionMismatch { expected: usize, actual: usize },
}
