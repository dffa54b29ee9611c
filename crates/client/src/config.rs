//! Client configuration: service endpoints and the state directory.

use std::path::PathBuf;

/// Default HTTP base URL when `BLOG_API_URL` is unset.
pub const DEFAULT_API_URL: &str = "http://localhost:8080";

/// Default live-channel URL when `BLOG_WS_URL` is unset.
pub const DEFAULT_WS_URL: &str = "ws://localhost:8080/ws";

/// Endpoints and storage location for a client instance.
#[derive(Debug, Clone)]
pub struct ClientConfig {
	/// Base URL for the HTTP API, without a trailing slash.
	pub api_base_url: String,
	/// URL of the live-channel WebSocket endpoint.
	pub ws_url: String,
	/// Directory holding the persisted session entries.
	pub state_dir: PathBuf,
}

impl ClientConfig {
	/// Builds a config from documented defaults plus `BLOG_API_URL`,
	/// `BLOG_WS_URL`, and `BLOG_STATE_DIR` overrides.
	pub fn from_env() -> Self {
		let api_base_url =
			std::env::var("BLOG_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
		let ws_url = std::env::var("BLOG_WS_URL").unwrap_or_else(|_| DEFAULT_WS_URL.to_string());
		let state_dir = std::env::var_os("BLOG_STATE_DIR")
			.map(PathBuf::from)
			.unwrap_or_else(default_state_dir);
		Self { api_base_url, ws_url, state_dir }
	}

	/// Joins `path` onto the API base URL.
	pub fn api_url(&self, path: &str) -> String {
		format!("{}{path}", self.api_base_url.trim_end_matches('/'))
	}
}

impl Default for ClientConfig {
	fn default() -> Self {
		Self {
			api_base_url: DEFAULT_API_URL.to_string(),
			ws_url: DEFAULT_WS_URL.to_string(),
			state_dir: default_state_dir(),
		}
	}
}

/// Resolves the session state directory (`~/.config/blog` by default).
fn default_state_dir() -> PathBuf {
	let config_home = std::env::var_os("XDG_CONFIG_HOME")
		.map(PathBuf::from)
		.or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))
		.unwrap_or_else(|| PathBuf::from("."));
	config_home.join("blog")
}
