//! The authenticated user record and its pairing with a bearer token.

use serde::{Deserialize, Serialize};

/// Role assigned to a user by the server.
///
/// Unknown role strings deserialize to [`Role::Unknown`] so an identity
/// written by a newer server still parses on restore.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
	User,
	Admin,
	#[serde(other)]
	Unknown,
}

impl Role {
	pub fn is_admin(self) -> bool {
		matches!(self, Role::Admin)
	}
}

/// The authenticated user's profile record, as issued by the server.
///
/// Immutable for the lifetime of a session; a fresh login replaces it
/// wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
	pub id: String,
	pub username: String,
	pub email: String,
	pub full_name: String,
	pub role: Role,
	/// RFC 3339 timestamp, treated opaquely by the client.
	pub created_at: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub avatar_url: Option<String>,
}

/// Bearer token paired with the identity it authenticates.
///
/// Either fully present (both fields set and mutually consistent) or not
/// held at all. Never persisted or published partially.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
	pub token: String,
	pub identity: Identity,
}
