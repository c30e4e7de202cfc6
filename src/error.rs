use thiserror::Error;

/// Everything that can go wrong while talking to a bridge.
#[derive(Debug, Error)]
pub enum Error {
	/// The HTTP request could not be performed.
	#[error("bridge request failed: {0}")]
	Http(#[from] reqwest::Error),

	/// The bridge answered with a non-success status.
	#[error("bridge answered with HTTP {0}")]
	Status(u16),

	/// The bridge reported the light resource as not available.
	#[error("light index {0} is not available")]
	Index(usize),

	/// No light carries the requested name.
	#[error("light {0:?} not found")]
	NotFound(String),

	/// The response did not describe a light.
	#[error("malformed bridge response: {0}")]
	Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
