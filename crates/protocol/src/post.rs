//! Blog post records served by `GET /blogposts`.

use serde::{Deserialize, Serialize};

/// A published blog post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogPost {
	pub id: String,
	pub title: String,
	pub content: String,
}
