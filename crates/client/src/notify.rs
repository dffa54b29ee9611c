//! Best-effort desktop notification seam.
//!
//! Raising a notification is decoupled from the channel's decode path: an
//! observer task subscribes to the channel's broadcast stream and forwards
//! events to a [`DesktopNotifier`]. A notifier that fails, or a permission
//! that is never granted, can only suppress notifications - it cannot affect
//! the event sequence or the connectivity flag.

use std::sync::Arc;

use blog_protocol::NotificationEvent;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tracing::debug;

/// Host notification-permission state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationPermission {
	/// Undecided; a single request may be issued.
	Default,
	Granted,
	Denied,
}

/// Host capability for raising desktop-style notifications.
///
/// Implementations must not block; `notify` is fire-and-forget.
pub trait DesktopNotifier: Send + Sync + 'static {
	fn permission(&self) -> NotificationPermission;

	/// Asks the host for permission. Called at most once per channel, and
	/// only while [`permission`](Self::permission) is
	/// [`NotificationPermission::Default`].
	fn request_permission(&self) {}

	fn notify(&self, summary: &str, body: &str);
}

/// Notifier for hosts without a notification capability.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNotifier;

impl DesktopNotifier for NoopNotifier {
	fn permission(&self) -> NotificationPermission {
		NotificationPermission::Denied
	}

	fn notify(&self, _summary: &str, _body: &str) {}
}

/// Spawns the observer task that mirrors decoded events to the notifier.
///
/// Issues the one-time permission request if the host is undecided. The task
/// ends when the channel shuts down or the event stream closes.
pub(crate) fn spawn_observer(
	mut events: broadcast::Receiver<NotificationEvent>,
	mut shutdown: watch::Receiver<bool>,
	notifier: Arc<dyn DesktopNotifier>,
) -> JoinHandle<()> {
	tokio::spawn(async move {
		if notifier.permission() == NotificationPermission::Default {
			notifier.request_permission();
		}

		loop {
			tokio::select! {
				_ = shutdown.changed() => break,
				event = events.recv() => match event {
					Ok(event) => {
						if notifier.permission() == NotificationPermission::Granted {
							notifier.notify(event.summary(), event.body());
						}
					}
					Err(broadcast::error::RecvError::Lagged(skipped)) => {
						debug!(skipped, "notification observer lagged");
					}
					Err(broadcast::error::RecvError::Closed) => break,
				},
			}
		}
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use parking_lot::Mutex;

	struct RecordingNotifier {
		permission: Mutex<NotificationPermission>,
		requests: Mutex<u32>,
		raised: Mutex<Vec<(String, String)>>,
	}

	impl RecordingNotifier {
		fn new(permission: NotificationPermission) -> Arc<Self> {
			Arc::new(Self {
				permission: Mutex::new(permission),
				requests: Mutex::new(0),
				raised: Mutex::new(Vec::new()),
			})
		}
	}

	impl DesktopNotifier for RecordingNotifier {
		fn permission(&self) -> NotificationPermission {
			*self.permission.lock()
		}

		fn request_permission(&self) {
			*self.requests.lock() += 1;
			*self.permission.lock() = NotificationPermission::Granted;
		}

		fn notify(&self, summary: &str, body: &str) {
			self.raised.lock().push((summary.to_string(), body.to_string()));
		}
	}

	#[tokio::test]
	async fn undecided_permission_is_requested_once() {
		let notifier = RecordingNotifier::new(NotificationPermission::Default);
		let (events_tx, events_rx) = broadcast::channel(8);
		let (_shutdown_tx, shutdown_rx) = watch::channel(false);

		let observer = spawn_observer(events_rx, shutdown_rx, notifier.clone());
		events_tx
			.send(NotificationEvent::NewPost { title: "Hello".into() })
			.unwrap();
		drop(events_tx);
		observer.await.unwrap();

		assert_eq!(*notifier.requests.lock(), 1);
		assert_eq!(
			notifier.raised.lock().clone(),
			vec![("New blog post".to_string(), "Hello".to_string())]
		);
	}

	#[tokio::test]
	async fn denied_permission_suppresses_notifications() {
		let notifier = RecordingNotifier::new(NotificationPermission::Denied);
		let (events_tx, events_rx) = broadcast::channel(8);
		let (_shutdown_tx, shutdown_rx) = watch::channel(false);

		let observer = spawn_observer(events_rx, shutdown_rx, notifier.clone());
		events_tx
			.send(NotificationEvent::NewComment { excerpt: "nice".into() })
			.unwrap();
		drop(events_tx);
		observer.await.unwrap();

		assert_eq!(*notifier.requests.lock(), 0);
		assert!(notifier.raised.lock().is_empty());
	}
}
