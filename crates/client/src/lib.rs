//! Client session and live-notification core for the blog service.
//!
//! Two independent components compose inside the application:
//!
//! - [`SessionStore`]: owns the authenticated-identity lifecycle -
//!   credential exchange, durable token/identity persistence, and
//!   synchronous lookup.
//! - [`NotificationChannel`]: owns one best-effort live subscription,
//!   decodes push frames into typed events, and exposes an observable event
//!   sequence plus a connectivity flag.
//!
//! Both are constructed from a [`ClientConfig`] and injected into whatever
//! consumes them; there are no process-wide singletons. Presentation code
//! reads their published state and mutates only through their operations.
//!
//! # Failure model
//!
//! Authentication and registration failures propagate to the caller as
//! [`Error::Authentication`] / [`Error::Registration`] carrying the server
//! message. Everything else recovers internally: corrupt persisted sessions
//! restore to logged-out, undecodable frames are discarded, and a dead
//! transport only clears the connectivity flag.

pub mod channel;
pub mod config;
pub mod error;
pub mod notify;
pub mod posts;
pub mod session;
pub mod storage;

pub use channel::NotificationChannel;
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use notify::{DesktopNotifier, NoopNotifier, NotificationPermission};
pub use posts::fetch_posts;
pub use session::{NewAccount, SessionStore};
pub use storage::SessionStorage;

// Re-exported so callers of `fetch_posts` can build an HTTP client without
// pinning their own reqwest version.
pub use reqwest;
