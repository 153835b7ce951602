//! Discord gateway client.
//!
//! The bot connects with the configured token and keeps a gateway session open. Its
//! `Http` handle is what the Discord integration uses for role assignment, channel
//! creation and direct messages, so those features are only available when a bot
//! token is configured.
//!
//! # Gateway Intents
//!
//! - `GUILDS` - Guild availability, needed before roles and channels can be managed
//! - `GUILD_MEMBERS` - Member joins, used to restore tier roles (privileged intent)
//!
//! `GUILD_MEMBERS` must be enabled in the Discord Developer Portal for the bot application.

pub mod handler;
pub mod start;
