//! Error types for the blog client.

use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by [`SessionStore`](crate::SessionStore) operations.
///
/// Only authentication and registration failures carry a user-facing
/// message; transport and storage failures wrap their source. Live-channel
/// failures never appear here - the channel recovers internally and only
/// flips its connectivity flag.
#[derive(Debug, Error)]
pub enum Error {
	/// Login was rejected by the server.
	#[error("{message}")]
	Authentication { message: String },

	/// Registration was rejected by the server (validation or conflict).
	#[error("{message}")]
	Registration { message: String },

	/// HTTP transport failure reaching the service.
	#[error("Request failed: {0}")]
	Http(#[from] reqwest::Error),

	/// JSON serialization/deserialization error.
	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),

	/// Durable-storage I/O error.
	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),
}

impl Error {
	/// Returns true if this failure should be shown verbatim to the user.
	pub fn is_user_facing(&self) -> bool {
		matches!(
			self,
			Error::Authentication { .. } | Error::Registration { .. }
		)
	}
}
