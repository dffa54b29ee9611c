//! Single source of truth for "who is logged in".

use std::sync::atomic::{AtomicBool, Ordering};

use blog_protocol::{
	AuthResponse, ErrorResponse, Identity, LoginRequest, RegisterRequest, Session,
};
use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::storage::SessionStorage;

/// Payload for [`SessionStore::register`].
#[derive(Debug, Clone)]
pub struct NewAccount {
	pub username: String,
	pub email: String,
	pub password: String,
	pub full_name: String,
}

/// Owns the authenticated-identity lifecycle: credential exchange, durable
/// persistence, and synchronous lookup for the rest of the application.
///
/// The store is the only writer of its session state; consumers read through
/// the accessors. Durable storage is written before the in-memory session
/// becomes visible, so no reader ever observes a logged-in state that is not
/// on disk.
///
/// Overlapping `login`/`register` calls are not serialized: the last response
/// to arrive is the one published and persisted.
pub struct SessionStore {
	http: reqwest::Client,
	config: ClientConfig,
	storage: SessionStorage,
	session: Mutex<Option<Session>>,
	loading: AtomicBool,
}

impl SessionStore {
	pub fn new(config: ClientConfig) -> Self {
		let storage = SessionStorage::new(&config.state_dir);
		Self {
			http: reqwest::Client::new(),
			config,
			storage,
			session: Mutex::new(None),
			loading: AtomicBool::new(true),
		}
	}

	/// Restores a previously persisted session, once, at startup.
	///
	/// Malformed or partial persisted data is treated as "no session"; this
	/// never fails. Clears the `loading` flag exactly once; later calls are
	/// no-ops.
	pub fn initialize(&self) {
		if !self.loading.swap(false, Ordering::SeqCst) {
			return;
		}
		match self.storage.load() {
			Some(session) => {
				info!(username = %session.identity.username, "restored persisted session");
				*self.session.lock() = Some(session);
			}
			None => debug!("no persisted session"),
		}
	}

	/// Exchanges credentials for a session via `POST /auth/login`.
	///
	/// On success the session is persisted, then published, then returned.
	/// On failure the prior session (if any) is untouched and the error
	/// carries the server-supplied message.
	pub async fn login(&self, identifier: &str, password: &str) -> Result<Session> {
		let body = LoginRequest {
			email_or_username: identifier.to_string(),
			password: password.to_string(),
		};
		let response = self
			.http
			.post(self.config.api_url("/auth/login"))
			.json(&body)
			.send()
			.await?;

		if !response.status().is_success() {
			let message = error_message(response, "Login failed").await;
			warn!(identifier, "login rejected");
			return Err(Error::Authentication { message });
		}

		let auth: AuthResponse = response.json().await?;
		let session = self.publish(auth)?;
		info!(username = %session.identity.username, "logged in");
		Ok(session)
	}

	/// Creates an account via `POST /auth/register`; on success the server
	/// returns a token+identity exactly as login does.
	pub async fn register(&self, account: NewAccount) -> Result<Session> {
		let body = RegisterRequest {
			username: account.username,
			email: account.email,
			password: account.password,
			full_name: account.full_name,
		};
		let response = self
			.http
			.post(self.config.api_url("/auth/register"))
			.json(&body)
			.send()
			.await?;

		if !response.status().is_success() {
			let message = error_message(response, "Registration failed").await;
			warn!(username = %body.username, "registration rejected");
			return Err(Error::Registration { message });
		}

		let auth: AuthResponse = response.json().await?;
		let session = self.publish(auth)?;
		info!(username = %session.identity.username, "registered");
		Ok(session)
	}

	/// Clears the in-memory session and both durable entries.
	///
	/// Idempotent: logging out with no session is a no-op. Purely local, no
	/// network call.
	pub fn logout(&self) -> Result<()> {
		self.storage.clear()?;
		if self.session.lock().take().is_some() {
			info!("logged out");
		}
		Ok(())
	}

	/// True until [`initialize`](Self::initialize) has run.
	pub fn is_loading(&self) -> bool {
		self.loading.load(Ordering::SeqCst)
	}

	pub fn session(&self) -> Option<Session> {
		self.session.lock().clone()
	}

	pub fn token(&self) -> Option<String> {
		self.session.lock().as_ref().map(|s| s.token.clone())
	}

	pub fn identity(&self) -> Option<Identity> {
		self.session.lock().as_ref().map(|s| s.identity.clone())
	}

	pub fn config(&self) -> &ClientConfig {
		&self.config
	}

	/// Fetches published posts with the store's HTTP client.
	pub async fn fetch_posts(&self) -> Result<Vec<blog_protocol::BlogPost>> {
		crate::posts::fetch_posts(&self.http, &self.config).await
	}

	/// Persists the exchanged session, then makes it visible to readers.
	fn publish(&self, auth: AuthResponse) -> Result<Session> {
		let session = Session { token: auth.token, identity: auth.user };
		self.storage.store(&session)?;
		*self.session.lock() = Some(session.clone());
		Ok(session)
	}
}

/// Extracts the `{error}` body from a failed auth response, falling back to
/// `fallback` when the body is missing or unparseable.
async fn error_message(response: reqwest::Response, fallback: &str) -> String {
	match response.json::<ErrorResponse>().await {
		Ok(body) => body.error,
		Err(_) => fallback.to_string(),
	}
}
