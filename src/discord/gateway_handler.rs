// serenity entry point: every gateway event the bot cares about is handed to
// the event catalog along with the shared data.

use std::sync::Arc;

use async_trait::async_trait;
use serenity::all::{Context, EventHandler, Interaction, Ready};

use crate::discord::events::{BotEvent, EventCatalog};
use crate::discord::Data;

pub struct GatewayHandler {
    data: Arc<Data>,
    events: EventCatalog,
}

impl GatewayHandler {
    pub fn new(data: Arc<Data>, events: EventCatalog) -> Self {
        events.log_summary();
        Self { data, events }
    }
}

#[async_trait]
impl EventHandler for GatewayHandler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        self.events
            .dispatch(&ctx, BotEvent::Ready(ready), &self.data)
            .await;
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        self.events
            .dispatch(&ctx, BotEvent::InteractionCreate(interaction), &self.data)
            .await;
    }
}
