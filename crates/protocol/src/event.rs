//! Live-channel frames and their decoded notification events.
//!
//! Inbound frames are UTF-8 JSON objects `{"type": string, "data": object}`.
//! A [`Frame`] is the raw envelope; [`Frame::decode`] maps the kinds this
//! client understands to a typed [`NotificationEvent`] and returns `None` for
//! everything else (housekeeping frames, kinds added by newer servers).

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Number of characters of comment content carried in a notification.
pub const COMMENT_EXCERPT_CHARS: usize = 50;

/// Raw envelope of a live-channel frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Frame {
	#[serde(rename = "type")]
	pub kind: String,
	#[serde(default)]
	pub data: Value,
}

/// A decoded push message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NotificationEvent {
	/// A blog post was published.
	NewPost { title: String },
	/// A comment was posted. `excerpt` is the first
	/// [`COMMENT_EXCERPT_CHARS`] characters of the comment content.
	NewComment { excerpt: String },
}

#[derive(Deserialize)]
struct NewPostData {
	title: String,
}

#[derive(Deserialize)]
struct NewCommentData {
	content: String,
}

impl Frame {
	/// Decodes the frame into a typed event.
	///
	/// Returns `None` when the kind is unrecognized or the payload does not
	/// carry the expected fields. The `new_blog_post` spelling used by older
	/// servers is accepted as an alias for `new_post`.
	pub fn decode(&self) -> Option<NotificationEvent> {
		match self.kind.as_str() {
			"new_post" | "new_blog_post" => {
				let data: NewPostData = serde_json::from_value(self.data.clone()).ok()?;
				Some(NotificationEvent::NewPost { title: data.title })
			}
			"new_comment" => {
				let data: NewCommentData = serde_json::from_value(self.data.clone()).ok()?;
				Some(NotificationEvent::NewComment {
					excerpt: comment_excerpt(&data.content),
				})
			}
			_ => None,
		}
	}
}

impl NotificationEvent {
	/// Short heading for user-facing display of the event.
	pub fn summary(&self) -> &'static str {
		match self {
			NotificationEvent::NewPost { .. } => "New blog post",
			NotificationEvent::NewComment { .. } => "New comment",
		}
	}

	/// Body text for user-facing display of the event.
	pub fn body(&self) -> &str {
		match self {
			NotificationEvent::NewPost { title } => title,
			NotificationEvent::NewComment { excerpt } => excerpt,
		}
	}
}

/// Truncates comment content to [`COMMENT_EXCERPT_CHARS`] characters,
/// respecting char boundaries.
pub fn comment_excerpt(content: &str) -> String {
	content.chars().take(COMMENT_EXCERPT_CHARS).collect()
}
