//! Request and response bodies for the authentication endpoints.

use serde::{Deserialize, Serialize};

use crate::identity::Identity;

/// Body of `POST /auth/login`.
///
/// The server resolves `email_or_username` against either column, so callers
/// pass whatever the user typed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
	pub email_or_username: String,
	pub password: String,
}

/// Body of `POST /auth/register`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
	pub username: String,
	pub email: String,
	pub password: String,
	pub full_name: String,
}

/// Successful response from either auth endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
	pub token: String,
	pub user: Identity,
}

/// Error body returned by the server on a non-2xx auth response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
	pub error: String,
}
