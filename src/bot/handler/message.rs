use serenity::all::{Context, Message};

use crate::conversion::units::UnitRegistry;
use crate::conversion::{convert_message, Reply};
use crate::profile::{ProfileStore, UserId};

/// Handle message creation in a channel.
///
/// Runs the conversion engine over the message text and replies with the
/// result. Messages from bots, messages outside guilds, and messages whose
/// tokens produce nothing are all ignored silently.
pub async fn handle_message(
    store: &dyn ProfileStore,
    units: &UnitRegistry,
    ctx: Context,
    message: Message,
) {
    if message.author.bot {
        return;
    }
    // Only convert in guild channels (not DMs); the output timezone set is
    // built from the guild's members.
    let Some(guild_id) = message.guild_id else {
        return;
    };
    // Cheap pre-check before involving the engine at all.
    if !message.content.contains('{') {
        return;
    }

    // Cached members first; the cache ref must not be held across an await.
    let mut members: Vec<UserId> = {
        match ctx.cache.guild(guild_id) {
            Some(guild) => guild.members.keys().map(|id| id.get()).collect(),
            None => Vec::new(),
        }
    };

    // The cache only holds members seen so far. Fall back to the API, which
    // requires the GUILD_MEMBERS privileged intent.
    if members.is_empty() {
        members = match ctx.http.get_guild_members(guild_id, None, None).await {
            Ok(fetched) => fetched.iter().map(|m| m.user.id.get()).collect(),
            Err(e) => {
                tracing::error!("Failed to fetch guild members from API: {:?}", e);
                Vec::new()
            }
        };
    }

    let author = message.author.id.get();
    let reply = match convert_message(store, units, author, &members, &message.content).await {
        Ok(reply) => reply,
        Err(e) => {
            tracing::error!("Profile store unavailable during conversion: {:?}", e);
            send_reply(&ctx, &message, &e.to_string()).await;
            return;
        }
    };

    if reply.is_empty() {
        return;
    }

    let text = render_reply(&reply);
    send_reply(&ctx, &message, &text).await;
}

async fn send_reply(ctx: &Context, message: &Message, text: &str) {
    if let Err(e) = message.reply(&ctx.http, text).await {
        tracing::error!("Failed to send conversion reply: {:?}", e);
    }
}

/// Renders a conversion reply as one Discord message.
///
/// Time rows come first, one line per timezone with every converted time in
/// token order. Quantity lines follow, then informational asides, then
/// per-token errors.
fn render_reply(reply: &Reply) -> String {
    let mut lines: Vec<String> = Vec::new();

    for row in &reply.time_rows {
        let times: Vec<String> = row
            .times
            .iter()
            .map(|time| format!("`{}`", time.format("%-I:%M %p")))
            .collect();
        lines.push(format!("**{}**: {}", row.zone, times.join("  |  ")));
    }

    for (original, converted) in &reply.quantity_lines {
        lines.push(format!("`{original}` = `{converted}`"));
    }

    for note in &reply.notes {
        lines.push(format!("*{note}*"));
    }

    for error in &reply.errors {
        lines.push(error.to_string());
    }

    lines.join("\n")
}
