//! Wire types shared by the blog client components.
//!
//! This crate defines the serde shapes exchanged with the blog service:
//!
//! - [`auth`] - Request/response bodies for `/auth/login` and `/auth/register`
//! - [`identity`] - The authenticated user record and [`Session`] pairing
//! - [`event`] - Live-channel frames and their decoded [`NotificationEvent`]s
//! - [`post`] - Blog post records served by `GET /blogposts`
//!
//! [`Session`]: identity::Session
//! [`NotificationEvent`]: event::NotificationEvent

pub mod auth;
pub mod event;
pub mod identity;
pub mod post;

pub use auth::{AuthResponse, ErrorResponse, LoginRequest, RegisterRequest};
pub use event::{Frame, NotificationEvent, comment_excerpt};
pub use identity::{Identity, Role, Session};
pub use post::BlogPost;
