//! Live notification channel.
//!
//! One WebSocket subscription per channel lifetime, receive-only. Inbound
//! text frames are decoded into [`NotificationEvent`]s and appended, in
//! delivery order, to an in-memory sequence that observers can snapshot or
//! stream. The channel is an optional enhancement: a connection that cannot
//! be established, or drops, only flips the connectivity flag - it never
//! surfaces as an error, and there is no automatic reconnect.

use std::sync::Arc;

use blog_protocol::{Frame, NotificationEvent};
use futures_util::StreamExt;
use parking_lot::Mutex;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, info, warn};

use crate::config::ClientConfig;
use crate::notify::{self, DesktopNotifier};

const EVENT_STREAM_CAPACITY: usize = 64;

/// Handle to the live channel. Dropping it releases the transport.
pub struct NotificationChannel {
	events: Arc<Mutex<Vec<NotificationEvent>>>,
	events_tx: broadcast::Sender<NotificationEvent>,
	connected_rx: watch::Receiver<bool>,
	shutdown_tx: watch::Sender<bool>,
	reader: Mutex<Option<JoinHandle<()>>>,
}

impl NotificationChannel {
	/// Opens the channel: one connection attempt, made on a background task.
	///
	/// Returns immediately; success or failure is reported through the
	/// connectivity flag. `notifier` receives a one-time permission request
	/// if the host is undecided, and decoded events while permission is
	/// granted.
	pub fn open(config: &ClientConfig, notifier: Arc<dyn DesktopNotifier>) -> Self {
		let events = Arc::new(Mutex::new(Vec::new()));
		let (events_tx, _) = broadcast::channel(EVENT_STREAM_CAPACITY);
		let (connected_tx, connected_rx) = watch::channel(false);
		let (shutdown_tx, shutdown_rx) = watch::channel(false);

		notify::spawn_observer(events_tx.subscribe(), shutdown_rx.clone(), notifier);

		let reader = tokio::spawn(run_reader(
			config.ws_url.clone(),
			events.clone(),
			events_tx.clone(),
			connected_tx,
			shutdown_rx,
		));

		Self {
			events,
			events_tx,
			connected_rx,
			shutdown_tx,
			reader: Mutex::new(Some(reader)),
		}
	}

	/// Terminates the transport and waits for the reader task to finish.
	///
	/// After this returns, no further events are appended even if the socket
	/// still had frames in flight.
	pub async fn close(&self) {
		let _ = self.shutdown_tx.send(true);
		let handle = self.reader.lock().take();
		if let Some(handle) = handle {
			let _ = handle.await;
		}
	}

	pub fn is_connected(&self) -> bool {
		*self.connected_rx.borrow()
	}

	/// Watch receiver tracking the connectivity flag.
	pub fn connected_watch(&self) -> watch::Receiver<bool> {
		self.connected_rx.clone()
	}

	/// Snapshot of the decoded events, oldest first.
	pub fn events(&self) -> Vec<NotificationEvent> {
		self.events.lock().clone()
	}

	/// Subscribes to events decoded after this call.
	pub fn subscribe(&self) -> broadcast::Receiver<NotificationEvent> {
		self.events_tx.subscribe()
	}
}

impl Drop for NotificationChannel {
	fn drop(&mut self) {
		let _ = self.shutdown_tx.send(true);
	}
}

/// Reader task: single connection attempt, then the frame loop.
async fn run_reader(
	url: String,
	events: Arc<Mutex<Vec<NotificationEvent>>>,
	events_tx: broadcast::Sender<NotificationEvent>,
	connected_tx: watch::Sender<bool>,
	mut shutdown_rx: watch::Receiver<bool>,
) {
	let stream = tokio::select! {
		biased;
		_ = shutdown_rx.changed() => return,
		result = connect_async(url.as_str()) => match result {
			Ok((stream, _response)) => {
				info!(url = %url, "live channel connected");
				stream
			}
			Err(error) => {
				// Optional feature: the rest of the application works
				// identically without it.
				info!(url = %url, %error, "live channel unavailable");
				return;
			}
		},
	};

	let _ = connected_tx.send(true);
	let (_write, mut read) = stream.split();

	loop {
		tokio::select! {
			biased;
			_ = shutdown_rx.changed() => break,
			frame = read.next() => match frame {
				Some(Ok(Message::Text(text))) => {
					handle_frame(text.as_str(), &events, &events_tx);
				}
				Some(Ok(Message::Close(_))) | None => {
					info!(url = %url, "live channel closed");
					break;
				}
				Some(Ok(_)) => {}
				Some(Err(error)) => {
					warn!(url = %url, %error, "live channel transport error");
					break;
				}
			},
		}
	}

	let _ = connected_tx.send(false);
}

/// Decodes one inbound frame and appends the event, if recognized.
///
/// Undecodable payloads are discarded; they never tear down the channel.
fn handle_frame(
	text: &str,
	events: &Mutex<Vec<NotificationEvent>>,
	events_tx: &broadcast::Sender<NotificationEvent>,
) {
	let frame: Frame = match serde_json::from_str(text) {
		Ok(frame) => frame,
		Err(error) => {
			warn!(%error, "discarding undecodable live-channel frame");
			return;
		}
	};
	match frame.decode() {
		Some(event) => {
			events.lock().push(event.clone());
			let _ = events_tx.send(event);
		}
		None => debug!(kind = %frame.kind, "ignoring live-channel frame"),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	fn fixtures() -> (
		Arc<Mutex<Vec<NotificationEvent>>>,
		broadcast::Sender<NotificationEvent>,
	) {
		let (tx, _) = broadcast::channel(8);
		(Arc::new(Mutex::new(Vec::new())), tx)
	}

	#[test]
	fn recognized_frame_is_appended() {
		let (events, tx) = fixtures();
		let frame = json!({"type": "new_post", "data": {"title": "Hello"}}).to_string();

		handle_frame(&frame, &events, &tx);

		assert_eq!(
			events.lock().clone(),
			vec![NotificationEvent::NewPost { title: "Hello".into() }]
		);
	}

	#[test]
	fn undecodable_frame_is_discarded() {
		let (events, tx) = fixtures();

		handle_frame("{not json at all", &events, &tx);

		assert!(events.lock().is_empty());
	}

	#[test]
	fn unknown_kind_is_ignored() {
		let (events, tx) = fixtures();
		let frame = json!({"type": "connection", "message": "welcome"}).to_string();

		handle_frame(&frame, &events, &tx);

		assert!(events.lock().is_empty());
	}

	#[test]
	fn frames_append_in_delivery_order() {
		let (events, tx) = fixtures();

		handle_frame(
			&json!({"type": "new_post", "data": {"title": "first"}}).to_string(),
			&events,
			&tx,
		);
		handle_frame(
			&json!({"type": "new_comment", "data": {"content": "second"}}).to_string(),
			&events,
			&tx,
		);

		assert_eq!(
			events.lock().clone(),
			vec![
				NotificationEvent::NewPost { title: "first".into() },
				NotificationEvent::NewComment { excerpt: "second".into() },
			]
		);
	}
}
