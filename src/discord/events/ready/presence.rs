// Bot presence, set once the gateway session is ready.

use async_trait::async_trait;
use serenity::all::{ActivityData, Context, OnlineStatus};

use super::{BotEvent, BotEventHandler};
use crate::discord::{Data, Error};

const DEFAULT_ACTIVITY: &str = "with lum";

pub struct Presence;

/// Resets the bot's status to the default message.
pub fn reset_status(ctx: &Context) {
    let activity = ActivityData::playing(DEFAULT_ACTIVITY);
    ctx.set_presence(Some(activity), OnlineStatus::Online);
}

#[async_trait]
impl BotEventHandler for Presence {
    fn name(&self) -> &'static str {
        "presence"
    }

    async fn handle(&self, ctx: &Context, event: &BotEvent, _data: &Data) -> Result<(), Error> {
        if let BotEvent::Ready(ready) = event {
            tracing::info!(user = %ready.user.name, guilds = ready.guilds.len(), "Connected");
            reset_status(ctx);
        }
        Ok(())
    }
}
