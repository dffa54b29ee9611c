//! Read-only access to published posts, consumed by presentation code.

use blog_protocol::BlogPost;

use crate::config::ClientConfig;
use crate::error::Result;

/// Fetches all published posts from `GET /blogposts`.
pub async fn fetch_posts(http: &reqwest::Client, config: &ClientConfig) -> Result<Vec<BlogPost>> {
	let posts = http
		.get(config.api_url("/blogposts"))
		.send()
		.await?
		.error_for_status()?
		.json()
		.await?;
	Ok(posts)
}
