// Gateway event routing.
//
// Handlers are grouped by event name (`ready/`, `interaction_create/`) and run
// in registration order every time that event arrives.

#[path = "ready/register_commands.rs"]
pub mod register_commands;

#[path = "ready/presence.rs"]
pub mod presence;

#[path = "interaction_create/handle_commands.rs"]
pub mod handle_commands;

use std::collections::HashMap;
use std::future::Future;

use async_trait::async_trait;
use serenity::all::{Context, Interaction, Ready};

use crate::core::alerts::{AlertSender, AlertService};
use crate::discord::{Data, Error};

pub const READY: &str = "ready";
pub const INTERACTION_CREATE: &str = "interactionCreate";

/// The gateway events the bot reacts to.
pub enum BotEvent {
    Ready(Ready),
    InteractionCreate(Interaction),
}

impl BotEvent {
    pub fn name(&self) -> &'static str {
        match self {
            BotEvent::Ready(_) => READY,
            BotEvent::InteractionCreate(_) => INTERACTION_CREATE,
        }
    }
}

#[async_trait]
pub trait BotEventHandler: Send + Sync {
    /// Used in logs and alert context.
    fn name(&self) -> &'static str;

    async fn handle(&self, ctx: &Context, event: &BotEvent, data: &Data) -> Result<(), Error>;
}

#[derive(Default)]
pub struct EventCatalog {
    handlers: HashMap<&'static str, Vec<Box<dyn BotEventHandler>>>,
}

impl EventCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(mut self, event: &'static str, handler: Box<dyn BotEventHandler>) -> Self {
        self.handlers.entry(event).or_default().push(handler);
        self
    }

    pub fn handler_count(&self, event: &str) -> usize {
        self.handlers.get(event).map_or(0, Vec::len)
    }

    pub fn log_summary(&self) {
        let mut events: Vec<_> = self.handlers.keys().collect();
        events.sort();
        for event in events {
            tracing::info!("{}: {} event handlers found", event, self.handler_count(event));
        }
    }

    /// Run every handler registered for the event. A failing handler is logged
    /// and alerted, the remaining handlers still run.
    pub async fn dispatch(&self, ctx: &Context, event: BotEvent, data: &Data) {
        let event_name = event.name();
        let Some(handlers) = self.handlers.get(event_name) else {
            return;
        };

        let runs = handlers
            .iter()
            .map(|handler| (handler.name(), handler.handle(ctx, &event, data)))
            .collect::<Vec<_>>();
        run_handlers(event_name, runs, data.alerts.as_ref()).await;
    }
}

/// Await each handler run in order. Failures are logged and alerted with an
/// `event:<event>/<handler>` context.
pub async fn run_handlers<I, Fut, S>(event_name: &str, runs: I, alerts: &AlertService<S>)
where
    I: IntoIterator<Item = (&'static str, Fut)>,
    Fut: Future<Output = Result<(), Error>>,
    S: AlertSender,
{
    for (handler_name, run) in runs {
        if let Err(e) = run.await {
            tracing::error!(
                event = event_name,
                handler = handler_name,
                "Event handler failed: {}",
                e
            );
            let context = format!("event:{}/{}", event_name, handler_name);
            alerts.notify(&*e, Some(context.as_str())).await;
        }
    }
}

/// The bot's own event handlers.
pub fn bot_events() -> EventCatalog {
    EventCatalog::new()
        .register(READY, Box::new(register_commands::RegisterCommands))
        .register(READY, Box::new(presence::Presence))
        .register(INTERACTION_CREATE, Box::new(handle_commands::HandleCommands))
}
