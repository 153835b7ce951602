//! Ready event handler.
//!
//! Fired once per gateway connection after the handshake completes.

use serenity::all::{Context, Ready};

/// Logs the connected bot user and the number of guilds it can see.
pub async fn handle_ready(_ctx: Context, ready: Ready) {
    tracing::info!(
        "{} is connected to Discord ({} guilds)",
        ready.user.name,
        ready.guilds.len()
    );
}
