//! Guild member event handlers.

use chrono::Utc;
use sea_orm::DatabaseConnection;
use serenity::all::{Context, Member, RoleId};

use crate::server::data::{membership::MembershipRepository, user::UserRepository};

/// Gives a rejoining member the role of their current membership tier.
///
/// Members who never logged in to the application, or who are on the free tier, are left
/// untouched.
pub async fn handle_guild_member_addition(db: &DatabaseConnection, ctx: Context, member: Member) {
    let discord_id = member.user.id.get().to_string();

    let user = match UserRepository::new(db).find_by_discord_id(&discord_id).await {
        Ok(Some(user)) => user,
        Ok(None) => return,
        Err(e) => {
            tracing::error!("Failed to query user by discord_id: {:?}", e);
            return;
        }
    };

    let role_id = match MembershipRepository::new(db)
        .tier_role_for_user(user.id, Utc::now())
        .await
    {
        Ok(Some(role_id)) => role_id,
        Ok(None) => return,
        Err(e) => {
            tracing::error!("Failed to resolve tier role for user {}: {:?}", user.id, e);
            return;
        }
    };

    if let Err(e) = member.add_role(&ctx.http, RoleId::new(role_id)).await {
        tracing::warn!("Failed to restore role {} for user {}: {:?}", role_id, user.id, e);
    } else {
        tracing::info!("Restored role {} for rejoining user {}", role_id, user.id);
    }
}
