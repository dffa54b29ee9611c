//! Durable storage for the persisted session.
//!
//! Two entries live under the state directory: `token` (the opaque bearer
//! token, mode 0600 on unix) and `identity.json` (the serialized identity).
//! They are written together and cleared together; a load that finds only
//! one of them, or content that fails to parse, yields no session.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use blog_protocol::{Identity, Session};
use tracing::warn;

use crate::error::Result;

const TOKEN_FILE: &str = "token";
const IDENTITY_FILE: &str = "identity.json";

/// File-backed store for the session entries.
#[derive(Debug, Clone)]
pub struct SessionStorage {
	token_path: PathBuf,
	identity_path: PathBuf,
}

impl SessionStorage {
	pub fn new(state_dir: &Path) -> Self {
		Self {
			token_path: state_dir.join(TOKEN_FILE),
			identity_path: state_dir.join(IDENTITY_FILE),
		}
	}

	/// Reads the persisted session, if both entries are present and parse.
	///
	/// Any missing file or malformed content is treated as "no session";
	/// corruption is logged and never propagated.
	pub fn load(&self) -> Option<Session> {
		let token = fs::read_to_string(&self.token_path).ok()?;
		let token = token.trim_end_matches('\n').to_string();
		if token.is_empty() {
			return None;
		}
		let raw = fs::read_to_string(&self.identity_path).ok()?;
		match serde_json::from_str::<Identity>(&raw) {
			Ok(identity) => Some(Session { token, identity }),
			Err(error) => {
				warn!(path = %self.identity_path.display(), %error, "discarding malformed persisted identity");
				None
			}
		}
	}

	/// Writes both entries, creating the state directory if needed.
	pub fn store(&self, session: &Session) -> Result<()> {
		if let Some(parent) = self.token_path.parent() {
			fs::create_dir_all(parent)?;
		}
		write_token(&self.token_path, &session.token)?;
		fs::write(&self.identity_path, serde_json::to_string_pretty(&session.identity)?)?;
		Ok(())
	}

	/// Removes both entries. Missing files are not an error.
	pub fn clear(&self) -> Result<()> {
		remove_if_present(&self.token_path)?;
		remove_if_present(&self.identity_path)?;
		Ok(())
	}
}

fn write_token(path: &Path, token: &str) -> io::Result<()> {
	fs::write(path, token)?;
	#[cfg(unix)]
	{
		use std::os::unix::fs::PermissionsExt;
		fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
	}
	Ok(())
}

fn remove_if_present(path: &Path) -> io::Result<()> {
	match fs::remove_file(path) {
		Ok(()) => Ok(()),
		Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
		Err(e) => Err(e),
	}
}
