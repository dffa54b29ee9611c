//! In-process servers backing the integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;

use axum::extract::ws::{Message as WsMessage, WebSocketUpgrade};
use axum::extract::{State, ws::WebSocket};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use blog_client::ClientConfig;
use blog_protocol::{AuthResponse, BlogPost, Identity, LoginRequest, RegisterRequest, Role};
use serde_json::json;
use tokio::net::TcpListener;
use tokio::sync::broadcast;

pub const PASSWORD: &str = "password1";

pub fn alice() -> Identity {
	Identity {
		id: "u1".into(),
		username: "alice".into(),
		email: "a@x.com".into(),
		full_name: "Alice A".into(),
		role: Role::User,
		created_at: "2026-01-01T00:00:00Z".into(),
		avatar_url: None,
	}
}

async fn login(Json(req): Json<LoginRequest>) -> Response {
	if req.password != PASSWORD {
		return (
			StatusCode::UNAUTHORIZED,
			Json(json!({"error": "invalid credentials"})),
		)
			.into_response();
	}
	match req.email_or_username.as_str() {
		"alice" | "a@x.com" => Json(AuthResponse { token: "tok-login".into(), user: alice() }).into_response(),
		"broken" => (StatusCode::INTERNAL_SERVER_ERROR, "not json").into_response(),
		_ => (
			StatusCode::UNAUTHORIZED,
			Json(json!({"error": "invalid credentials"})),
		)
			.into_response(),
	}
}

async fn register(Json(req): Json<RegisterRequest>) -> Response {
	if req.username == "taken" {
		return (
			StatusCode::CONFLICT,
			Json(json!({"error": "username already exists"})),
		)
			.into_response();
	}
	let user = Identity {
		id: "u2".into(),
		username: req.username,
		email: req.email,
		full_name: req.full_name,
		role: Role::User,
		created_at: "2026-01-02T00:00:00Z".into(),
		avatar_url: None,
	};
	Json(AuthResponse { token: "tok-register".into(), user }).into_response()
}

async fn blogposts() -> Json<Vec<BlogPost>> {
	Json(vec![BlogPost {
		id: "p1".into(),
		title: "First".into(),
		content: "Hello world".into(),
	}])
}

/// Starts the auth/posts HTTP server and returns its address.
pub async fn spawn_api_server() -> SocketAddr {
	let app = Router::new()
		.route("/auth/login", post(login))
		.route("/auth/register", post(register))
		.route("/blogposts", get(blogposts));

	let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
	let addr = listener.local_addr().unwrap();
	tokio::spawn(async move {
		axum::serve(listener, app).await.unwrap();
	});
	addr
}

/// Instruction for the scripted live-channel server.
#[derive(Debug, Clone)]
pub enum ServerCmd {
	/// Send one raw text frame to the connected client.
	Frame(String),
	/// Drop the socket without a close handshake.
	Abort,
}

async fn ws_session(mut socket: WebSocket, mut commands: broadcast::Receiver<ServerCmd>) {
	while let Ok(cmd) = commands.recv().await {
		match cmd {
			ServerCmd::Frame(text) => {
				if socket.send(WsMessage::Text(text.into())).await.is_err() {
					break;
				}
			}
			ServerCmd::Abort => break,
		}
	}
}

/// Starts a WebSocket server that replays [`ServerCmd`]s to each client.
pub async fn spawn_ws_server() -> (SocketAddr, broadcast::Sender<ServerCmd>) {
	let (tx, _) = broadcast::channel::<ServerCmd>(32);
	let commands = tx.clone();

	let app = Router::new()
		.route(
			"/ws",
			get(
				|ws: WebSocketUpgrade, State(tx): State<broadcast::Sender<ServerCmd>>| async move {
					// Subscribe before the 101 goes out so commands sent as
					// soon as the client sees itself connected are not lost.
					let commands = tx.subscribe();
					ws.on_upgrade(move |socket| ws_session(socket, commands))
				},
			),
		)
		.with_state(commands);

	let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
	let addr = listener.local_addr().unwrap();
	tokio::spawn(async move {
		axum::serve(listener, app).await.unwrap();
	});
	(addr, tx)
}

/// Client config pointing both endpoints at the given test servers.
pub fn test_config(api: Option<SocketAddr>, ws: Option<SocketAddr>, state_dir: &std::path::Path) -> ClientConfig {
	ClientConfig {
		api_base_url: api
			.map(|a| format!("http://{a}"))
			.unwrap_or_else(|| "http://127.0.0.1:1/".into()),
		ws_url: ws
			.map(|a| format!("ws://{a}/ws"))
			.unwrap_or_else(|| "ws://127.0.0.1:1/ws".into()),
		state_dir: state_dir.to_path_buf(),
	}
}
