//! `blog` - command-line front for the blog client library.

mod logging;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use blog_client::{ClientConfig, NewAccount, NoopNotifier, NotificationChannel, SessionStore};
use clap::{Parser, Subcommand};
use tokio::sync::broadcast;

#[derive(Parser)]
#[command(name = "blog", about = "Client for the blog service", version)]
struct Cli {
	/// Increase log verbosity (-v, -vv)
	#[arg(short, long, action = clap::ArgAction::Count, global = true)]
	verbose: u8,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand)]
enum Command {
	/// Log in with a username or email
	Login {
		identifier: String,
		password: String,
	},
	/// Create an account and log in
	Register {
		username: String,
		email: String,
		password: String,
		#[arg(long)]
		full_name: String,
	},
	/// Clear the persisted session
	Logout,
	/// Show the logged-in identity
	Whoami,
	/// List published posts
	Posts,
	/// Follow live notifications until interrupted
	Listen {
		/// Stop after this many seconds instead of waiting for Ctrl-C
		#[arg(long)]
		duration: Option<u64>,
	},
}

#[tokio::main]
async fn main() -> Result<()> {
	let cli = Cli::parse();
	logging::init_logging(cli.verbose);

	let config = ClientConfig::from_env();
	let store = SessionStore::new(config.clone());
	store.initialize();

	match cli.command {
		Command::Login { identifier, password } => {
			let session = store.login(&identifier, &password).await?;
			println!("logged in as {}", session.identity.username);
		}
		Command::Register { username, email, password, full_name } => {
			let session = store
				.register(NewAccount { username, email, password, full_name })
				.await?;
			println!("registered as {}", session.identity.username);
		}
		Command::Logout => {
			store.logout()?;
			println!("logged out");
		}
		Command::Whoami => match store.identity() {
			Some(identity) => {
				println!("{} <{}> ({:?})", identity.username, identity.email, identity.role);
			}
			None => println!("not logged in"),
		},
		Command::Posts => {
			for post in store.fetch_posts().await? {
				println!("{}  {}", post.id, post.title);
			}
		}
		Command::Listen { duration } => listen(&config, duration).await,
	}

	Ok(())
}

/// Streams decoded notifications to stdout until Ctrl-C or the deadline.
async fn listen(config: &ClientConfig, duration: Option<u64>) {
	let channel = NotificationChannel::open(config, Arc::new(NoopNotifier));
	let mut events = channel.subscribe();
	let mut connected = channel.connected_watch();

	let deadline = duration.map(Duration::from_secs);
	let stop = async {
		match deadline {
			Some(d) => tokio::time::sleep(d).await,
			None => {
				let _ = tokio::signal::ctrl_c().await;
			}
		}
	};
	tokio::pin!(stop);

	loop {
		tokio::select! {
			() = &mut stop => break,
			changed = connected.changed() => {
				if changed.is_ok() {
					let live = *connected.borrow();
					println!("live updates {}", if live { "on" } else { "off" });
				}
			}
			event = events.recv() => match event {
				Ok(event) => println!("{}: {}", event.summary(), event.body()),
				Err(broadcast::error::RecvError::Lagged(_)) => {}
				Err(broadcast::error::RecvError::Closed) => break,
			},
		}
	}

	channel.close().await;
}
